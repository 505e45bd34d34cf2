use std::sync::Arc;

use ekopay::config::AppConfig;
use ekopay::navigator::AppNavigator;
use ekopay::onboarding::{OnboardingRouteState, onboarding_routes};
use ekopay::shell::Shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("Ekopay v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Preferences: {}", config.db_path.display());
    eprintln!("   Route policy: {:?}", config.route_policy);
    eprintln!(
        "   Debug routes: {}",
        if config.debug_routes { "enabled" } else { "disabled" }
    );

    // ── Preferences + navigation ─────────────────────────────────────────
    let navigator = AppNavigator::open(&config).await?;

    // ── Support HTTP server ──────────────────────────────────────────────
    if let Some(port) = config.http_port {
        let app = onboarding_routes(OnboardingRouteState {
            store: Arc::clone(navigator.store()),
        });
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        eprintln!("   Support API: http://0.0.0.0:{port}/api/onboarding/status");
        tokio::spawn(async move {
            tracing::info!(port, "Support server started");
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Support server stopped");
            }
        });
    }

    eprintln!("   Type `help` for commands. `quit` to exit.\n");

    let mut shell = Shell::new(navigator);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell.run(stdin).await?;

    Ok(())
}
