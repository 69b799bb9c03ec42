use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lms_admin_api::{app, config, is_development, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_JWT_SECRET, UPSTREAM_BASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting LMS Admin API in {:?} mode", config.environment);
    if is_development!() {
        tracing::warn!("development mode: using the built-in JWT secret unless SECURITY_JWT_SECRET is set");
    }

    let state = AppState::from_config(config).context("failed to configure profile source")?;
    let router = app::app_with_layers(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("LMS Admin API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
