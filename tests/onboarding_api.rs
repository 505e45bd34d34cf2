//! Integration tests for the support REST surface.
//!
//! Each test spins up an Axum server on a random port and exercises the real
//! REST contract over HTTP.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use ekopay::onboarding::{OnboardingRouteState, OnboardingStore, onboarding_routes};
use ekopay::store::MemoryPreferences;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Start an Axum server on a random port, return (port, store, prefs).
async fn start_server() -> (u16, Arc<OnboardingStore>, Arc<MemoryPreferences>) {
    let prefs = Arc::new(MemoryPreferences::new());
    let store = Arc::new(OnboardingStore::new(prefs.clone()));
    let app = onboarding_routes(OnboardingRouteState {
        store: Arc::clone(&store),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, store, prefs)
}

#[tokio::test]
async fn health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store, _prefs) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ekopay");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn status_defaults_to_not_completed() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store, _prefs) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/onboarding/status"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["onboarding_completed"], false);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn reset_clears_completed_flag() {
    timeout(TEST_TIMEOUT, async {
        let (port, store, _prefs) = start_server().await;
        store.write_completed().await.unwrap();

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/onboarding/reset"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["onboarding_completed"], false);

        assert!(!store.try_current().await.unwrap());
        assert!(!store.current().await);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn complete_then_status() {
    timeout(TEST_TIMEOUT, async {
        let (port, store, _prefs) = start_server().await;

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/onboarding/complete"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = reqwest::get(format!("http://127.0.0.1:{port}/api/onboarding/status"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["onboarding_completed"], true);
        assert!(store.current().await);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn storage_failure_is_503() {
    timeout(TEST_TIMEOUT, async {
        let (port, _store, prefs) = start_server().await;
        prefs.set_failing(true);

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/onboarding/status"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 503);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("unavailable"));

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/api/onboarding/reset"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 503);
    })
    .await
    .expect("test timed out");
}
