//! # assure-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the mock compliance backend.
//! Binds to a configurable port (default 8080).

use assure_api::state::{AppConfig, AppState};

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

    let auth_token = std::env::var("AUTH_TOKEN").ok();
    if auth_token.is_none() {
        tracing::warn!("AUTH_TOKEN not set; any bearer token longer than 20 characters passes");
    }

    let state = AppState::with_config(AppConfig {
        port,
        auth_token,
        ..AppConfig::default()
    });
    let app = assure_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Assure API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
