//! # Papyrus Node Runtime
//!
//! Wires a store, the notebook service and the HTTP gateway together. The
//! `main.rs` binary is a thin shell around [`NodeRuntime`]; the library
//! exists so the wiring can be tested.
//!
//! ## Modules
//!
//! - `config` - `NodeConfig`, TOML file and environment loading
//! - `seed` - Welcome stream for empty stores

pub mod config;
pub mod seed;

use anyhow::{Context, Result};
use papyrus_core::{
    FileBackedStore, InMemoryStore, NotebookApi, NotebookDependencies, NotebookService,
    SystemTimeSource,
};
use papyrus_gateway::GatewayService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{NodeConfig, StorageBackend};

/// The node runtime: one notebook service behind one HTTP gateway.
pub struct NodeRuntime {
    config: NodeConfig,
    notebook: Arc<dyn NotebookApi>,
    gateway: GatewayService,
}

impl NodeRuntime {
    /// Validate the configuration and open the store.
    ///
    /// The file backend loads its snapshot here, so a corrupt data file fails
    /// startup instead of being overwritten.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let notebook = open_notebook(&config)?;
        let gateway = GatewayService::new(config.gateway.clone(), Arc::clone(&notebook))?;

        Ok(Self {
            config,
            notebook,
            gateway,
        })
    }

    /// Seed if configured, then start serving. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        info!("===========================================");
        info!("  Papyrus Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        if self.config.seed.welcome_stream {
            seed::seed_welcome_stream(self.notebook.as_ref())
                .await
                .context("Failed to seed welcome stream")?;
        }

        let addr = self.gateway.start().await?;

        info!(
            backend = ?self.config.storage.backend,
            addr = %addr,
            "Papyrus node running"
        );
        Ok(addr)
    }

    /// Stop accepting requests and wait for in-flight ones.
    pub async fn shutdown(&mut self) {
        info!("Shutting down Papyrus node");
        self.gateway.shutdown().await;
    }

    pub fn notebook(&self) -> Arc<dyn NotebookApi> {
        Arc::clone(&self.notebook)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
}

fn open_notebook(config: &NodeConfig) -> Result<Arc<dyn NotebookApi>> {
    let time_source = SystemTimeSource;
    let notebook: Arc<dyn NotebookApi> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Arc::new(NotebookService::new(
                NotebookDependencies {
                    store: InMemoryStore::new(),
                    time_source,
                },
                config.notebook.clone(),
            ))
        }
        StorageBackend::File => {
            let path = &config.storage.data_file;
            let store = FileBackedStore::open(path)
                .with_context(|| format!("Failed to open data file {}", path.display()))?;
            info!(
                path = %path.display(),
                streams = store.stream_count(),
                blocks = store.block_count(),
                "Using file-backed store"
            );
            Arc::new(NotebookService::new(
                NotebookDependencies { store, time_source },
                config.notebook.clone(),
            ))
        }
    };
    Ok(notebook)
}
