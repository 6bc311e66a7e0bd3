//! # Papyrus Node
//!
//! Serves Papyrus streams and blocks over HTTP.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (`PAPYRUS_CONFIG` file, then `PAPYRUS_*` env overrides)
//! 3. Open the store (memory or JSON file)
//! 4. Seed the welcome stream if enabled and the store is empty
//! 5. Start the HTTP gateway and wait for Ctrl+C

use anyhow::Result;
use papyrus_node::config::NodeConfig;
use papyrus_node::NodeRuntime;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::load()?;

    let mut runtime = NodeRuntime::new(config)?;
    runtime.start().await?;

    info!("Press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
