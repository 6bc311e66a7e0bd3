use crate::domain::commands::BlockPatch;
use crate::domain::entities::{Block, BlockId, Stream, StreamId, Timestamp};
use crate::domain::errors::{EntityKind, StoreError};
use crate::ports::outbound::WriteOp;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Current on-disk snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The two tables behind every store adapter.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    streams: HashMap<StreamId, Stream>,
    blocks: HashMap<BlockId, Block>,
}

impl Tables {
    pub fn insert_stream(&mut self, stream: Stream) -> Result<(), StoreError> {
        if self.streams.contains_key(&stream.id) {
            return Err(StoreError::DuplicateKey {
                entity: EntityKind::Stream,
                id: stream.id.to_string(),
            });
        }
        self.streams.insert(stream.id.clone(), stream);
        Ok(())
    }

    pub fn stream(&self, id: &StreamId) -> Option<&Stream> {
        self.streams.get(id)
    }

    pub fn blocks_of(&self, stream_id: &StreamId) -> Vec<Block> {
        self.blocks
            .values()
            .filter(|block| &block.stream_id == stream_id)
            .cloned()
            .collect()
    }

    pub fn count_blocks(&self, stream_id: &StreamId) -> usize {
        self.blocks
            .values()
            .filter(|block| &block.stream_id == stream_id)
            .count()
    }

    pub fn streams_with_counts(&self) -> Vec<(Stream, usize)> {
        let mut counts: HashMap<&StreamId, usize> = HashMap::new();
        for block in self.blocks.values() {
            *counts.entry(&block.stream_id).or_default() += 1;
        }
        self.streams
            .values()
            .map(|stream| {
                let count = counts.get(&stream.id).copied().unwrap_or(0);
                (stream.clone(), count)
            })
            .collect()
    }

    pub fn rename_stream(
        &mut self,
        id: &StreamId,
        name: &str,
        updated_at: Timestamp,
    ) -> Result<Stream, StoreError> {
        let stream = self
            .streams
            .get_mut(id)
            .ok_or_else(|| StoreError::RecordNotFound {
                entity: EntityKind::Stream,
                id: id.to_string(),
                operation: "update",
            })?;
        stream.name = name.to_owned();
        stream.updated_at = updated_at;
        Ok(stream.clone())
    }

    pub fn insert_block(&mut self, block: Block) -> Result<(), StoreError> {
        if !self.streams.contains_key(&block.stream_id) {
            return Err(StoreError::ForeignKeyViolation {
                entity: EntityKind::Stream,
                id: block.stream_id.to_string(),
            });
        }
        if self.blocks.contains_key(&block.id) {
            return Err(StoreError::DuplicateKey {
                entity: EntityKind::Block,
                id: block.id.to_string(),
            });
        }
        self.blocks.insert(block.id.clone(), block);
        Ok(())
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn update_block(
        &mut self,
        id: &BlockId,
        patch: &BlockPatch,
        updated_at: Timestamp,
    ) -> Result<Block, StoreError> {
        let block = self
            .blocks
            .get_mut(id)
            .ok_or_else(|| StoreError::RecordNotFound {
                entity: EntityKind::Block,
                id: id.to_string(),
                operation: "update",
            })?;
        if let Some(content) = &patch.content {
            block.content = content.clone();
        }
        if let Some(in_context) = patch.in_context {
            block.in_context = in_context;
        }
        if let Some(order) = patch.order {
            block.order = order;
        }
        block.updated_at = updated_at;
        Ok(block.clone())
    }

    pub fn delete_block(&mut self, id: &BlockId) -> Result<(), StoreError> {
        self.blocks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::RecordNotFound {
                entity: EntityKind::Block,
                id: id.to_string(),
                operation: "delete",
            })
    }

    pub fn delete_stream_blocks(&mut self, stream_id: &StreamId) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|_, block| &block.stream_id != stream_id);
        before - self.blocks.len()
    }

    pub fn delete_stream(&mut self, id: &StreamId) -> Result<(), StoreError> {
        if !self.streams.contains_key(id) {
            return Err(StoreError::RecordNotFound {
                entity: EntityKind::Stream,
                id: id.to_string(),
                operation: "delete",
            });
        }
        let dependents = self.count_blocks(id);
        if dependents > 0 {
            return Err(StoreError::DependentRows {
                entity: EntityKind::Stream,
                id: id.to_string(),
                dependents,
            });
        }
        self.streams.remove(id);
        Ok(())
    }

    /// Apply one transactional write. On error `self` may be partially
    /// modified; callers apply ops to a staged copy.
    pub fn apply(&mut self, op: &WriteOp) -> Result<(), StoreError> {
        match op {
            WriteOp::UpdateBlock {
                id,
                patch,
                updated_at,
            } => self.update_block(id, patch, *updated_at).map(|_| ()),
            WriteOp::DeleteBlock { id } => self.delete_block(id),
            WriteOp::DeleteStreamBlocks { stream_id } => {
                self.delete_stream_blocks(stream_id);
                Ok(())
            }
            WriteOp::DeleteStream { id } => self.delete_stream(id),
        }
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Serialized form of the tables.
///
/// Rows are written sorted by id so the file is stable across saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub version: u32,
    pub streams: Vec<Stream>,
    pub blocks: Vec<Block>,
}

impl Snapshot {
    pub(crate) fn from_tables(tables: &Tables) -> Self {
        let mut streams: Vec<Stream> = tables.streams.values().cloned().collect();
        streams.sort_by(|a, b| a.id.cmp(&b.id));
        let mut blocks: Vec<Block> = tables.blocks.values().cloned().collect();
        blocks.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            version: SNAPSHOT_VERSION,
            streams,
            blocks,
        }
    }

    /// Rebuild tables, rejecting unknown versions, duplicate ids and
    /// orphaned blocks.
    pub(crate) fn into_tables(self) -> Result<Tables, StoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::Corruption {
                message: format!("unsupported snapshot version {}", self.version),
            });
        }

        let mut tables = Tables::default();
        for stream in self.streams {
            tables.insert_stream(stream).map_err(corruption)?;
        }

        let known: HashSet<StreamId> = tables.streams.keys().cloned().collect();
        for block in self.blocks {
            if !known.contains(&block.stream_id) {
                return Err(StoreError::Corruption {
                    message: format!(
                        "block {} references missing stream {}",
                        block.id, block.stream_id
                    ),
                });
            }
            tables.insert_block(block).map_err(corruption)?;
        }
        Ok(tables)
    }
}

fn corruption(err: StoreError) -> StoreError {
    StoreError::Corruption {
        message: err.to_string(),
    }
}
