//! # attest-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Attest API.
//! Binds to a configurable port (default 8080).

use attest_api::state::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let config = AppConfig { port };

    let state = attest_api::state::AppState::try_with_config(config).map_err(|e| {
        tracing::error!("Issuer key initialization failed: {e}");
        e
    })?;
    tracing::info!(issuer_did = %state.registry.issuer_did(), "Issuer identity loaded");

    let app = attest_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Attest API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
