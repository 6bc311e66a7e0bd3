//! # Notebook Service
//!
//! The main service implementing the notebook API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `StreamApi` (Stream Lifecycle Manager, `streams.rs`)
//! 2. Implements `BlockApi` (Block Lifecycle Manager, `blocks.rs`)
//! 3. Implements `OrderingApi` (Ordering Engine, `ordering.rs`)
//! 4. Uses dependency injection for the store and the clock
//!
//! Input limits are checked here, before the store is touched. Store failures
//! are re-classified through [`NotebookError::from_store`] and logged once.

mod blocks;
mod ordering;
mod streams;

use crate::adapters::{InMemoryStore, SystemTimeSource};
use crate::domain::config::NotebookConfig;
use crate::domain::entities::{Block, StreamId};
use crate::domain::errors::{ErrorKind, NotebookError, StoreError};
use crate::domain::ordering::sort_blocks;
use crate::domain::validation::messages;
use crate::ports::outbound::{DocumentStore, TimeSource};
use tracing::{error, warn};

/// The notebook service.
pub struct NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    pub(crate) store: DS,
    pub(crate) time_source: TS,
    pub(crate) config: NotebookConfig,
}

/// Dependencies for NotebookService
pub struct NotebookDependencies<DS, TS> {
    pub store: DS,
    pub time_source: TS,
}

impl<DS, TS> NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    pub fn new(deps: NotebookDependencies<DS, TS>, config: NotebookConfig) -> Self {
        Self {
            store: deps.store,
            time_source: deps.time_source,
            config,
        }
    }

    pub fn store(&self) -> &DS {
        &self.store
    }

    pub fn config(&self) -> &NotebookConfig {
        &self.config
    }

    /// Trim and length-check a stream name.
    pub(crate) fn normalize_name(&self, raw: &str) -> Result<String, NotebookError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(self.rejected(messages::STREAM_NAME.to_string()));
        }
        let max = self.config.limits.max_stream_name_chars;
        if name.chars().count() > max {
            return Err(self.rejected(format!(
                "Stream name must be at most {max} characters"
            )));
        }
        Ok(name.to_owned())
    }

    pub(crate) fn check_content(&self, content: &str) -> Result<(), NotebookError> {
        let max = self.config.limits.max_content_bytes;
        if content.len() > max {
            return Err(self.rejected(format!("content must be at most {max} bytes")));
        }
        Ok(())
    }

    /// Build a validation error and log the rejection.
    pub(crate) fn rejected(&self, message: String) -> NotebookError {
        warn!(reason = %message, "Rejected invalid input");
        NotebookError::validation(message)
    }

    /// Re-classify a store failure and log it at the matching level.
    pub(crate) fn store_failure(&self, operation: &'static str, err: StoreError) -> NotebookError {
        let err = NotebookError::from_store(operation, err);
        match err.kind() {
            ErrorKind::NotFound => warn!(operation, error = %err, "Entity not found"),
            ErrorKind::Internal => error!(operation, error = %err, "Store operation failed"),
            ErrorKind::Validation => {}
        }
        err
    }

    /// Blocks of a stream in display order.
    pub(crate) fn sorted_blocks(
        &self,
        operation: &'static str,
        stream_id: &StreamId,
    ) -> Result<Vec<Block>, NotebookError> {
        let mut blocks = self
            .store
            .find_blocks(stream_id)
            .map_err(|e| self.store_failure(operation, e))?;
        sort_blocks(&mut blocks);
        Ok(blocks)
    }
}

impl NotebookService<InMemoryStore, SystemTimeSource> {
    /// A service over an empty in-memory store with default limits.
    pub fn in_memory() -> Self {
        Self::new(
            NotebookDependencies {
                store: InMemoryStore::new(),
                time_source: SystemTimeSource,
            },
            NotebookConfig::default(),
        )
    }
}
