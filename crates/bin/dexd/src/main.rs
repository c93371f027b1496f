//! # dexd: dex dashboard daemon
//!
//! Composition root that wires the widgets and adapters together and starts
//! the server.
//!
//! ## Responsibilities
//! - Load configuration (`dex.toml`, environment overrides)
//! - Install the tracing subscriber
//! - Build the dashboard (widgets, instrument consoles, command buttons,
//!   service-control form)
//! - Construct the reqwest command poster
//! - Build the axum router and serve it
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod wiring;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dex_adapter_command_reqwest::HttpCommandPoster;
use dex_adapter_http_axum::router;
use dex_adapter_http_axum::state::AppState;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dashboard = wiring::build_dashboard(&config.dashboard).context("invalid dashboard configuration")?;
    let poster = HttpCommandPoster::new(config.commands.clone())?;

    let state = AppState::new(dashboard, poster).with_refresh_seconds(config.server.refresh_seconds);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        %bind_addr,
        commands = %config.commands.base_url,
        "dexd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("dexd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
