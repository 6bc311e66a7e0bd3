//! # Inbound Ports (Driving Ports)
//!
//! The operations a host can invoke on a notebook. The HTTP gateway is one
//! such host; the node's seeding step is another.
//!
//! Every operation validates its input before touching the store, so a
//! `Validation` error guarantees nothing was written.

use crate::domain::commands::{BlockDraft, BlockPatch, MoveDirection, OrderUpdate};
use crate::domain::entities::{Block, BlockId, StreamDetail, StreamId, StreamSummary};
use crate::domain::errors::NotebookError;
use async_trait::async_trait;

/// Stream Lifecycle Manager.
#[async_trait]
pub trait StreamApi: Send + Sync {
    /// All streams with their block counts, most recently updated first.
    async fn list_streams(&self) -> Result<Vec<StreamSummary>, NotebookError>;

    /// Create a stream named `name` (trimmed). Its block count is 0.
    ///
    /// ## Errors
    ///
    /// - `Validation`: name is blank or too long
    async fn create_stream(&self, name: &str) -> Result<StreamSummary, NotebookError>;

    /// The stream with its blocks in display order.
    ///
    /// ## Errors
    ///
    /// - `StreamNotFound`
    async fn get_stream(&self, id: &StreamId) -> Result<StreamDetail, NotebookError>;

    /// Rename a stream. Refreshes its `updatedAt`.
    ///
    /// ## Errors
    ///
    /// - `Validation`: name is blank or too long
    /// - `StreamNotFound`
    async fn rename_stream(&self, id: &StreamId, name: &str)
        -> Result<StreamSummary, NotebookError>;

    /// Delete a stream and every block it owns in one transaction.
    ///
    /// ## Errors
    ///
    /// - `StreamNotFound`
    async fn delete_stream(&self, id: &StreamId) -> Result<(), NotebookError>;
}

/// Block Lifecycle Manager.
#[async_trait]
pub trait BlockApi: Send + Sync {
    /// Create a block inside an existing stream. `inContext` defaults to `true`.
    ///
    /// ## Errors
    ///
    /// - `Validation`: content too large
    /// - `StreamNotFound`: parent stream missing at insert time
    async fn create_block(&self, draft: BlockDraft) -> Result<Block, NotebookError>;

    /// Apply a partial update. Only the fields present in `patch` change.
    ///
    /// ## Errors
    ///
    /// - `Validation`: empty patch or content too large
    /// - `BlockNotFound`
    async fn update_block(&self, id: &BlockId, patch: BlockPatch) -> Result<Block, NotebookError>;

    /// Delete one block. Siblings keep their orders.
    ///
    /// ## Errors
    ///
    /// - `BlockNotFound`
    async fn delete_block(&self, id: &BlockId) -> Result<(), NotebookError>;
}

/// Ordering Engine.
#[async_trait]
pub trait OrderingApi: Send + Sync {
    /// Set `order` on every listed block atomically. Returns the number of
    /// entries applied.
    ///
    /// ## Errors
    ///
    /// - `Validation`: empty or oversized batch
    /// - `BlockNotFound`: any id missing, in which case nothing changes
    async fn reorder_blocks(&self, updates: Vec<OrderUpdate>) -> Result<usize, NotebookError>;

    /// Swap a block with its neighbour and renumber the stream `0..N-1`.
    /// Returns the stream's blocks in their new order.
    ///
    /// ## Errors
    ///
    /// - `BlockNotFound`
    async fn move_block(
        &self,
        id: &BlockId,
        direction: MoveDirection,
    ) -> Result<Vec<Block>, NotebookError>;
}

/// The full notebook surface.
pub trait NotebookApi: StreamApi + BlockApi + OrderingApi {}

impl<T> NotebookApi for T where T: StreamApi + BlockApi + OrderingApi {}
