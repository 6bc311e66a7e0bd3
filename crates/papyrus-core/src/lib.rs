//! # Papyrus Core
//!
//! The block ordering and context-flagging engine behind Papyrus streams.
//!
//! A stream is a named, ordered collection of blocks. Each block carries
//! markdown or prompt text, a non-negative `order` and an `inContext` flag.
//! This crate owns every rule about how those values change.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Named Streams | A stream name is never empty after trimming |
//! | 2 | No Orphans | A block is only created for an existing stream; deleting a stream deletes its blocks in the same transaction |
//! | 3 | Atomic Reorder | A batch reorder rewrites every listed block or none |
//! | 4 | Orthogonal Flags | Toggling `inContext` never changes `order` and vice versa |
//! | 5 | Immutable Identity | A block's `type` and `streamId` never change after creation |
//! | 6 | Validate First | Malformed input is rejected before the store is touched |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, commands, errors, validation and ordering algorithms
//! - `ports/` - Inbound API traits and outbound store/clock traits
//! - `adapters/` - In-memory and file-backed stores, system clock
//! - `service/` - `NotebookService`, the Ordering Engine and both lifecycle managers
//!
//! ## Usage
//!
//! ```ignore
//! use papyrus_core::{BlockApi, BlockDraft, BlockType, NotebookService, StreamApi};
//!
//! let service = NotebookService::in_memory();
//!
//! let stream = service.create_stream("Notes").await?;
//! let block = service
//!     .create_block(BlockDraft::new(stream.stream.id.clone(), BlockType::Markdown, "hello", 0))
//!     .await?;
//! ```

#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::{FileBackedStore, InMemoryStore, SystemTimeSource};
pub use domain::commands::{BlockDraft, BlockPatch, MoveDirection, OrderUpdate};
pub use domain::config::{ConfigError, LimitsConfig, NotebookConfig};
pub use domain::entities::{
    Block, BlockId, BlockType, Stream, StreamDetail, StreamId, StreamSummary, Timestamp,
};
pub use domain::errors::{EntityKind, ErrorKind, NotebookError, StoreError};
pub use ports::inbound::{BlockApi, NotebookApi, OrderingApi, StreamApi};
pub use ports::outbound::{DocumentStore, TimeSource, WriteOp};
pub use service::{NotebookDependencies, NotebookService};
