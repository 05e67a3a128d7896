use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vitrine_server::{AppState, ServerConfig, app_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("Failed to read configuration")?;
    let state = AppState::from_config(&config).context("Failed to initialise application state")?;
    if !config.conversions.is_configured() {
        tracing::warn!("META_PIXEL_ID or META_ACCESS_TOKEN missing; /api/conversions will answer 500");
    }

    let app = app_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, cms = %config.cms.base_url, "listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
