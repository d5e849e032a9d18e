pub mod accounts;
pub mod analysis;
pub mod api;
pub mod chat;
pub mod config;
pub mod core_state;
pub mod db;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod report;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Binary entry: logging, settings, core state, then serve until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("NutriCare starting v{}", config::APP_VERSION);

    let settings = config::load().context("loading settings")?;
    let bind = settings.bind_addr();
    let addr = tokio::net::lookup_host(&bind)
        .await
        .with_context(|| format!("resolving bind address {bind}"))?
        .next()
        .with_context(|| format!("no address for {bind}"))?;

    let core = tokio::task::spawn_blocking(move || core_state::CoreState::from_settings(settings))
        .await
        .context("startup task failed")??;

    let mut server = api::start_server_on(Arc::new(core), addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;
    tracing::info!("Ctrl-C received, shutting down");

    server.shutdown();
    server.wait().await;
    Ok(())
}
