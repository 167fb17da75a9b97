//! `cellagent-server` binary.

use std::path::PathBuf;

use anyhow::Context;
use cellagent_server::settings::{self, CONFIG_PATH_ENV};
use cellagent_server::{router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = settings::load(config_path.as_deref()).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();
    info!(
        "Configuration loaded from {}",
        settings::describe_source(config_path.as_deref())
    );

    let state = AppState::from_config(&config).context("building application state")?;
    let listener = TcpListener::bind(config.bind_addr()?)
        .await
        .context("binding listener")?;
    info!("cellagent server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("cellagent server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
