use super::tables::Tables;
use crate::domain::commands::BlockPatch;
use crate::domain::entities::{Block, BlockId, Stream, StreamId, Timestamp};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{DocumentStore, WriteOp};
use parking_lot::RwLock;

/// In-memory document store.
///
/// Readers share the lock; every write holds it exclusively, so each
/// operation observes a consistent view. Transactions run against a staged
/// copy that replaces the live tables only when every operation succeeded.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Number of streams currently stored.
    pub fn stream_count(&self) -> usize {
        self.tables.read().stream_count()
    }

    /// Number of blocks currently stored, across all streams.
    pub fn block_count(&self) -> usize {
        self.tables.read().block_count()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.read())
    }

    /// Run `f` against a staged copy of the tables, then `on_commit` against
    /// the result. The staged copy replaces the live tables only if both
    /// succeed.
    pub(crate) fn commit<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<R, StoreError>,
        on_commit: impl FnOnce(&Tables) -> Result<(), StoreError>,
    ) -> Result<R, StoreError> {
        let mut live = self.tables.write();
        let mut staged = live.clone();
        let out = f(&mut staged)?;
        on_commit(&staged)?;
        *live = staged;
        Ok(out)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Tables) -> Result<R, StoreError>) -> Result<R, StoreError> {
        self.commit(f, |_| Ok(()))
    }
}

impl DocumentStore for InMemoryStore {
    fn insert_stream(&self, stream: Stream) -> Result<(), StoreError> {
        self.write(|t| t.insert_stream(stream))
    }

    fn find_stream_with_blocks(
        &self,
        id: &StreamId,
    ) -> Result<Option<(Stream, Vec<Block>)>, StoreError> {
        Ok(self.read(|t| t.stream(id).map(|s| (s.clone(), t.blocks_of(id)))))
    }

    fn find_streams(&self) -> Result<Vec<(Stream, usize)>, StoreError> {
        Ok(self.read(Tables::streams_with_counts))
    }

    fn update_stream_name(
        &self,
        id: &StreamId,
        name: &str,
        updated_at: Timestamp,
    ) -> Result<Stream, StoreError> {
        self.write(|t| t.rename_stream(id, name, updated_at))
    }

    fn find_blocks(&self, stream_id: &StreamId) -> Result<Vec<Block>, StoreError> {
        Ok(self.read(|t| t.blocks_of(stream_id)))
    }

    fn count_blocks(&self, stream_id: &StreamId) -> Result<usize, StoreError> {
        Ok(self.read(|t| t.count_blocks(stream_id)))
    }

    fn insert_block(&self, block: Block) -> Result<(), StoreError> {
        self.write(|t| t.insert_block(block))
    }

    fn find_block(&self, id: &BlockId) -> Result<Option<Block>, StoreError> {
        Ok(self.read(|t| t.block(id).cloned()))
    }

    fn update_block(
        &self,
        id: &BlockId,
        patch: &BlockPatch,
        updated_at: Timestamp,
    ) -> Result<Block, StoreError> {
        self.write(|t| t.update_block(id, patch, updated_at))
    }

    fn delete_block(&self, id: &BlockId) -> Result<(), StoreError> {
        self.write(|t| t.delete_block(id))
    }

    fn transaction(&self, ops: Vec<WriteOp>) -> Result<usize, StoreError> {
        self.write(|t| {
            for op in &ops {
                t.apply(op)?;
            }
            Ok(ops.len())
        })
    }
}
