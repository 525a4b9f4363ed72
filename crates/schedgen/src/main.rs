use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use schedgen::config::AppConfig;
use schedgen::server;
use schedgen::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::var("SCHEDGEN_CONFIG") {
        Ok(path) => AppConfig::load_from_file(Path::new(&path))
            .map_err(|e| anyhow::anyhow!("failed to load config from {path}: {e}"))?,
        Err(_) => AppConfig::default(),
    };
    info!(
        address = %config.bind_addr(),
        cache_ttl_secs = config.cache_ttl_secs,
        max_queue = config.limits.max_queue,
        max_schedules = config.limits.max_schedules,
        "starting schedgen"
    );

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    let router = server::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("schedgen stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("shutdown signal received");
}
