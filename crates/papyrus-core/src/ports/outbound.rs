//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the notebook service.
//!
//! Production: `FileBackedStore` (JSON snapshot on disk)
//! Testing: `InMemoryStore`

use crate::domain::commands::BlockPatch;
use crate::domain::entities::{Block, BlockId, Stream, StreamId, Timestamp};
use crate::domain::errors::StoreError;
use std::sync::Arc;

/// Relational-style document store holding streams and blocks.
///
/// Adapters use interior mutability so one store can be shared behind an
/// `Arc` by every request handler.
///
/// Reads return blocks in no particular order. Sorting is the caller's job.
pub trait DocumentStore: Send + Sync {
    /// Insert a new stream.
    ///
    /// ## Errors
    ///
    /// - `DuplicateKey`: a stream with this id exists
    fn insert_stream(&self, stream: Stream) -> Result<(), StoreError>;

    /// A stream and all of its blocks, read from one consistent view.
    fn find_stream_with_blocks(
        &self,
        id: &StreamId,
    ) -> Result<Option<(Stream, Vec<Block>)>, StoreError>;

    /// Every stream with its current block count.
    fn find_streams(&self) -> Result<Vec<(Stream, usize)>, StoreError>;

    /// Set a stream's name and `updated_at`, returning the updated row.
    ///
    /// ## Errors
    ///
    /// - `RecordNotFound`
    fn update_stream_name(
        &self,
        id: &StreamId,
        name: &str,
        updated_at: Timestamp,
    ) -> Result<Stream, StoreError>;

    fn find_blocks(&self, stream_id: &StreamId) -> Result<Vec<Block>, StoreError>;

    fn count_blocks(&self, stream_id: &StreamId) -> Result<usize, StoreError>;

    /// Insert a new block.
    ///
    /// ## Errors
    ///
    /// - `ForeignKeyViolation`: the parent stream does not exist
    /// - `DuplicateKey`: a block with this id exists
    fn insert_block(&self, block: Block) -> Result<(), StoreError>;

    fn find_block(&self, id: &BlockId) -> Result<Option<Block>, StoreError>;

    /// Apply the fields present in `patch` and set `updated_at`.
    ///
    /// ## Errors
    ///
    /// - `RecordNotFound`
    fn update_block(
        &self,
        id: &BlockId,
        patch: &BlockPatch,
        updated_at: Timestamp,
    ) -> Result<Block, StoreError>;

    /// ## Errors
    ///
    /// - `RecordNotFound`
    fn delete_block(&self, id: &BlockId) -> Result<(), StoreError>;

    /// Apply `ops` in sequence as one transaction.
    ///
    /// ## Atomicity
    ///
    /// Either every operation is applied, or the store is left exactly as it
    /// was and the first failure is returned. Returns the number of
    /// operations applied.
    fn transaction(&self, ops: Vec<WriteOp>) -> Result<usize, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn insert_stream(&self, stream: Stream) -> Result<(), StoreError> {
        (**self).insert_stream(stream)
    }

    fn find_stream_with_blocks(
        &self,
        id: &StreamId,
    ) -> Result<Option<(Stream, Vec<Block>)>, StoreError> {
        (**self).find_stream_with_blocks(id)
    }

    fn find_streams(&self) -> Result<Vec<(Stream, usize)>, StoreError> {
        (**self).find_streams()
    }

    fn update_stream_name(
        &self,
        id: &StreamId,
        name: &str,
        updated_at: Timestamp,
    ) -> Result<Stream, StoreError> {
        (**self).update_stream_name(id, name, updated_at)
    }

    fn find_blocks(&self, stream_id: &StreamId) -> Result<Vec<Block>, StoreError> {
        (**self).find_blocks(stream_id)
    }

    fn count_blocks(&self, stream_id: &StreamId) -> Result<usize, StoreError> {
        (**self).count_blocks(stream_id)
    }

    fn insert_block(&self, block: Block) -> Result<(), StoreError> {
        (**self).insert_block(block)
    }

    fn find_block(&self, id: &BlockId) -> Result<Option<Block>, StoreError> {
        (**self).find_block(id)
    }

    fn update_block(
        &self,
        id: &BlockId,
        patch: &BlockPatch,
        updated_at: Timestamp,
    ) -> Result<Block, StoreError> {
        (**self).update_block(id, patch, updated_at)
    }

    fn delete_block(&self, id: &BlockId) -> Result<(), StoreError> {
        (**self).delete_block(id)
    }

    fn transaction(&self, ops: Vec<WriteOp>) -> Result<usize, StoreError> {
        (**self).transaction(ops)
    }
}

/// One write inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Patch a block. Fails with `RecordNotFound` when the block is absent.
    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
        updated_at: Timestamp,
    },
    /// Delete a block. Fails with `RecordNotFound` when the block is absent.
    DeleteBlock { id: BlockId },
    /// Delete every block of a stream. Never fails for a missing stream.
    DeleteStreamBlocks { stream_id: StreamId },
    /// Delete a stream. Fails with `RecordNotFound` when absent and with
    /// `DependentRows` while it still owns blocks.
    DeleteStream { id: StreamId },
}

impl WriteOp {
    /// Set a block's order.
    pub fn set_order(id: BlockId, order: u32, updated_at: Timestamp) -> Self {
        WriteOp::UpdateBlock {
            id,
            patch: BlockPatch::order(order),
            updated_at,
        }
    }

    pub fn delete_block(id: BlockId) -> Self {
        WriteOp::DeleteBlock { id }
    }

    pub fn delete_stream_blocks(stream_id: StreamId) -> Self {
        WriteOp::DeleteStreamBlocks { stream_id }
    }

    pub fn delete_stream(id: StreamId) -> Self {
        WriteOp::DeleteStream { id }
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
