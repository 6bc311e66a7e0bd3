//! # Node Configuration
//!
//! Unified configuration for the notebook service, the gateway and the node
//! itself. Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. TOML file named by `PAPYRUS_CONFIG`
//! 3. `PAPYRUS_HTTP_HOST`, `PAPYRUS_HTTP_PORT`, `PAPYRUS_DATA_FILE`, `PAPYRUS_SEED`

use papyrus_core::NotebookConfig;
use papyrus_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENV_CONFIG: &str = "PAPYRUS_CONFIG";
pub const ENV_HTTP_HOST: &str = "PAPYRUS_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "PAPYRUS_HTTP_PORT";
pub const ENV_DATA_FILE: &str = "PAPYRUS_DATA_FILE";
pub const ENV_SEED: &str = "PAPYRUS_SEED";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Service input limits.
    pub notebook: NotebookConfig,
    /// HTTP gateway.
    pub gateway: GatewayConfig,
    /// Where streams and blocks live.
    pub storage: StorageConfig,
    /// First-run content.
    pub seed: SeedConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on exit.
    #[default]
    Memory,
    /// JSON snapshot at `storage.data_file`.
    File,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_file: PathBuf::from("./data/papyrus.json"),
        }
    }
}

/// Seeding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Create the welcome stream when the store holds no streams.
    pub welcome_stream: bool,
}

impl NodeConfig {
    /// Load from `PAPYRUS_CONFIG` (if set) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CONFIG) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing tables and keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply `PAPYRUS_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HTTP_HOST) {
            self.gateway.http.host = host.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_HTTP_HOST,
                value: host.clone(),
            })?;
        }

        if let Some(port) = lookup(ENV_HTTP_PORT) {
            self.gateway.http.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_HTTP_PORT,
                value: port.clone(),
            })?;
        }

        if let Some(file) = lookup(ENV_DATA_FILE).filter(|f| !f.is_empty()) {
            self.storage.backend = StorageBackend::File;
            self.storage.data_file = PathBuf::from(file);
        }

        if let Some(seed) = lookup(ENV_SEED) {
            self.seed.welcome_stream = matches!(
                seed.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notebook.validate()?;
        self.gateway.validate()?;
        if self.storage.backend == StorageBackend::File
            && self.storage.data_file.as_os_str().is_empty()
        {
            return Err(ConfigError::MissingDataFile);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("storage.backend is \"file\" but storage.data_file is empty")]
    MissingDataFile,

    #[error(transparent)]
    Notebook(#[from] papyrus_core::ConfigError),

    #[error(transparent)]
    Gateway(#[from] papyrus_gateway::domain::config::ConfigError),
}
