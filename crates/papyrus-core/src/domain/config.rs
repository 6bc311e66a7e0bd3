//! # Notebook Configuration
//!
//! Input limits enforced by the service. Every field has a default so a
//! partial TOML table is enough.

use serde::{Deserialize, Serialize};

/// Service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConfig {
    pub limits: LimitsConfig,
}

impl NotebookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}

/// Size limits applied during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum stream name length in characters, after trimming.
    pub max_stream_name_chars: usize,
    /// Maximum block content size in bytes, after stringification.
    pub max_content_bytes: usize,
    /// Maximum entries in one reorder batch.
    pub max_reorder_batch: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_stream_name_chars: 200,
            max_content_bytes: 1024 * 1024,
            max_reorder_batch: 1000,
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stream_name_chars == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_stream_name_chars cannot be 0".into(),
            ));
        }
        if self.max_content_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_content_bytes cannot be 0".into(),
            ));
        }
        if self.max_reorder_batch == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_reorder_batch cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
