use super::memory::InMemoryStore;
use super::tables::{Snapshot, Tables};
use crate::domain::commands::BlockPatch;
use crate::domain::entities::{Block, BlockId, Stream, StreamId, Timestamp};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{DocumentStore, WriteOp};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed document store.
///
/// Keeps the tables in memory and persists a JSON snapshot after every
/// successful mutation. A mutation becomes visible only once its snapshot
/// has been written, so a failed save leaves both the file and the
/// in-memory view unchanged.
#[derive(Debug)]
pub struct FileBackedStore {
    memory: InMemoryStore,
    path: PathBuf,
}

impl FileBackedStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    ///
    /// A missing file is an empty store. An unreadable or inconsistent file
    /// is an error; it is never silently replaced.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let tables = match std::fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot =
                    serde_json::from_slice(&bytes).map_err(|e| StoreError::Corruption {
                        message: format!("{}: {e}", path.display()),
                    })?;
                let tables = snapshot.into_tables()?;
                info!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    streams = tables.stream_count(),
                    blocks = tables.block_count(),
                    "Loaded notebook snapshot"
                );
                tables
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No existing notebook file, starting empty");
                Tables::default()
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        Ok(Self {
            memory: InMemoryStore::from_tables(tables),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stream_count(&self) -> usize {
        self.memory.stream_count()
    }

    pub fn block_count(&self) -> usize {
        self.memory.block_count()
    }

    fn save(&self, tables: &Tables) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(&Snapshot::from_tables(tables)).map_err(|e| {
            StoreError::Io {
                message: format!("failed to encode snapshot: {e}"),
            }
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
        file.write_all(&bytes).map_err(|e| io_error(&temp_path, e))?;
        file.sync_all().map_err(|e| io_error(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Persisted notebook snapshot");
        Ok(())
    }

    fn write<R>(&self, f: impl FnOnce(&mut Tables) -> Result<R, StoreError>) -> Result<R, StoreError> {
        self.memory.commit(f, |tables| self.save(tables))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io {
        message: format!("{}: {err}", path.display()),
    }
}

impl DocumentStore for FileBackedStore {
    fn insert_stream(&self, stream: Stream) -> Result<(), StoreError> {
        self.write(|t| t.insert_stream(stream))
    }

    fn find_stream_with_blocks(
        &self,
        id: &StreamId,
    ) -> Result<Option<(Stream, Vec<Block>)>, StoreError> {
        self.memory.find_stream_with_blocks(id)
    }

    fn find_streams(&self) -> Result<Vec<(Stream, usize)>, StoreError> {
        self.memory.find_streams()
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
        self.memory.find_blocks(stream_id)
    }

    fn count_blocks(&self, stream_id: &StreamId) -> Result<usize, StoreError> {
        self.memory.count_blocks(stream_id)
    }

    fn insert_block(&self, block: Block) -> Result<(), StoreError> {
        self.write(|t| t.insert_block(block))
    }

    fn find_block(&self, id: &BlockId) -> Result<Option<Block>, StoreError> {
        self.memory.find_block(id)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BlockType;
    use chrono::Utc;
    use tempfile::TempDir;

    fn markdown(stream: &Stream, order: u32, content: &str) -> Block {
        let now = Utc::now();
        Block {
            id: BlockId::generate(),
            stream_id: stream.id.clone(),
            block_type: BlockType::Markdown,
            content: content.to_string(),
            order,
            in_context: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileBackedStore::open(dir.path().join("nested/papyrus.json")).unwrap();
        assert_eq!(store.stream_count(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_reopen_restores_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data/papyrus.json");

        let stream = Stream::new("Persisted", Utc::now());
        let block = markdown(&stream, 0, "kept");
        {
            let store = FileBackedStore::open(&path).unwrap();
            store.insert_stream(stream.clone()).unwrap();
            store.insert_block(block.clone()).unwrap();
            store
                .update_block(&block.id, &BlockPatch::in_context(false), Utc::now())
                .unwrap();
        }

        let reopened = FileBackedStore::open(&path).unwrap();
        let (loaded, blocks) = reopened.find_stream_with_blocks(&stream.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Persisted");
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].in_context);
        assert_eq!(blocks[0].content, "kept");
    }

    #[test]
    fn test_failed_transaction_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papyrus.json");

        let stream = Stream::new("s", Utc::now());
        let block = markdown(&stream, 0, "a");
        {
            let store = FileBackedStore::open(&path).unwrap();
            store.insert_stream(stream.clone()).unwrap();
            store.insert_block(block.clone()).unwrap();
            let result = store.transaction(vec![
                WriteOp::set_order(block.id.clone(), 5, Utc::now()),
                WriteOp::delete_block(BlockId::new("ghost")),
            ]);
            assert!(result.is_err());
        }

        let reopened = FileBackedStore::open(&path).unwrap();
        assert_eq!(reopened.find_block(&block.id).unwrap().unwrap().order, 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("papyrus.json");
        std::fs::write(&path, b"{ not json").unwrap();

        assert!(matches!(
            FileBackedStore::open(&path),
            Err(StoreError::Corruption { .. })
        ));
    }

    #[test]
    fn test_unwritable_path_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("sub");
        let store = FileBackedStore::open(parent.join("papyrus.json")).unwrap();

        // A regular file where the parent directory should be.
        std::fs::write(&parent, b"").unwrap();

        let err = store
            .insert_stream(Stream::new("lost", Utc::now()))
            .unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.stream_count(), 0);
    }
}
