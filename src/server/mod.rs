mod router;
mod state;

pub use router::build_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;

pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = AppState::from_config(config)?;

    let _sweeper = (config.rate_limit.sweep_interval_secs > 0).then(|| {
        state
            .limiter
            .spawn_sweeper(Duration::from_secs(config.rate_limit.sweep_interval_secs))
    });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "rosterguard demo server listening");

    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "failed to listen for shutdown signal");
    }
}
