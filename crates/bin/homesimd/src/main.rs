//! # homesimd — smart-home simulator daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration from `homesim.toml`
//! - Initialise `tracing` from the configured filter
//! - Seed the home through the virtual integration and register the built-in rules
//! - Spawn the tick loop and serve the dashboard on a single-threaded runtime
//! - Handle graceful shutdown (Ctrl-C): stop the server, then the tick loop
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use homesim_adapter_http_axum::router;
use homesim_adapter_http_axum::state::AppState;
use homesim_adapter_virtual::VirtualIntegration;
use homesim_app::home::Home;
use homesim_app::ports::SystemClock;
use homesim_app::ticker;
use homesim_domain::automation::presets;

use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load homesim.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid logging filter")?,
        )
        .init();

    let mut home = Home::new(SystemClock, VirtualIntegration::new(config.motion_hold()))
        .context("failed to seed the home")?;
    home.register_rules(presets::builtin(config.presets())?)
        .context("failed to register built-in rules")?;
    if !config.automation.enabled {
        home.set_automation_enabled(false);
        tracing::info!("automation disabled by configuration");
    }
    let home = Arc::new(Mutex::new(home));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = tokio::spawn(ticker::run(
        Arc::clone(&home),
        config.tick_period(),
        shutdown_rx,
    ));

    let app = router::build(AppState::new(home, config.tick_period()));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "homesimd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The receiver may already be gone if the tick loop ended on its own.
    let _ = shutdown_tx.send(true);
    let ticks = ticker.await.context("tick loop panicked")?;
    tracing::info!(ticks, "homesimd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
