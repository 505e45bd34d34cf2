//! REST endpoints for onboarding status and the support reset hook.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::StorageError;

use super::store::OnboardingStore;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub store: Arc<OnboardingStore>,
}

/// Onboarding status returned by the REST endpoints.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OnboardingStatus {
    pub onboarding_completed: bool,
}

fn storage_failure(e: StorageError) -> Response {
    tracing::warn!(error = %e, "Onboarding endpoint storage failure");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": "ekopay"}))
}

/// GET /api/onboarding/status
///
/// Reads storage directly so a broken store shows up as 503.
async fn get_status(State(state): State<OnboardingRouteState>) -> Response {
    match state.store.try_current().await {
        Ok(onboarding_completed) => Json(OnboardingStatus { onboarding_completed }).into_response(),
        Err(e) => storage_failure(e),
    }
}

/// POST /api/onboarding/reset
async fn reset(State(state): State<OnboardingRouteState>) -> Response {
    match state.store.reset().await {
        Ok(()) => Json(OnboardingStatus {
            onboarding_completed: false,
        })
        .into_response(),
        Err(e) => storage_failure(e),
    }
}

/// POST /api/onboarding/complete
async fn complete(State(state): State<OnboardingRouteState>) -> Response {
    match state.store.write_completed().await {
        Ok(()) => Json(OnboardingStatus {
            onboarding_completed: true,
        })
        .into_response(),
        Err(e) => storage_failure(e),
    }
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/reset", post(reset))
        .route("/api/onboarding/complete", post(complete))
        .with_state(state)
}
