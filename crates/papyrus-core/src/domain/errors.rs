//! # Domain Errors
//!
//! Two layers of errors:
//!
//! - `StoreError` is what a `DocumentStore` adapter reports.
//! - `NotebookError` is what the service reports to its callers. Every
//!   variant falls into exactly one `ErrorKind`.
//!
//! Store failures are classified by variant, never by parsing messages.

use super::entities::{BlockId, StreamId};
use std::fmt;

/// The table a store error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Stream,
    Block,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Stream => f.write_str("stream"),
            EntityKind::Block => f.write_str("block"),
        }
    }
}

/// Errors reported by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Update or delete targeted a row that does not exist.
    #[error("record to {operation} not found: {entity} {id}")]
    RecordNotFound {
        entity: EntityKind,
        id: String,
        operation: &'static str,
    },

    /// Insert referenced a parent row that does not exist.
    #[error("foreign key constraint failed: {entity} {id} does not exist")]
    ForeignKeyViolation { entity: EntityKind, id: String },

    /// Delete of a parent row that still has dependents.
    #[error("{entity} {id} still has {dependents} dependent rows")]
    DependentRows {
        entity: EntityKind,
        id: String,
        dependents: usize,
    },

    /// Insert collided with an existing primary key.
    #[error("duplicate key: {entity} {id}")]
    DuplicateKey { entity: EntityKind, id: String },

    /// Underlying I/O failed.
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// Persisted data could not be decoded or is inconsistent.
    #[error("store corruption: {message}")]
    Corruption { message: String },
}

/// Caller-visible error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input. Detected before any store access.
    Validation,
    /// Referenced entity absent at store-access time.
    NotFound,
    /// Anything else.
    Internal,
}

/// Errors returned by the notebook service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotebookError {
    /// Input rejected before touching the store.
    #[error("{message}")]
    Validation { message: String },

    #[error("Stream not found")]
    StreamNotFound { id: StreamId },

    #[error("Block not found")]
    BlockNotFound { id: BlockId },

    /// Unclassified failure. `message` is for diagnostics only.
    #[error("failed to {operation}: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

impl NotebookError {
    pub fn validation(message: impl Into<String>) -> Self {
        NotebookError::Validation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NotebookError::Validation { .. } => ErrorKind::Validation,
            NotebookError::StreamNotFound { .. } | NotebookError::BlockNotFound { .. } => {
                ErrorKind::NotFound
            }
            NotebookError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Re-classify a store failure.
    ///
    /// Missing rows and dangling parent references become not-found errors;
    /// every other store failure is internal.
    pub fn from_store(operation: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound {
                entity: EntityKind::Stream,
                id,
                ..
            }
            | StoreError::ForeignKeyViolation {
                entity: EntityKind::Stream,
                id,
            } => NotebookError::StreamNotFound {
                id: StreamId::new(id),
            },
            StoreError::RecordNotFound {
                entity: EntityKind::Block,
                id,
                ..
            }
            | StoreError::ForeignKeyViolation {
                entity: EntityKind::Block,
                id,
            } => NotebookError::BlockNotFound { id: BlockId::new(id) },
            other => NotebookError::Internal {
                operation,
                message: other.to_string(),
            },
        }
    }
}
