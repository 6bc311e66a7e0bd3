//! # Stream Lifecycle Manager
//!
//! Implements the StreamApi trait.

use super::*;
use crate::domain::entities::{Stream, StreamDetail, StreamSummary};
use crate::ports::inbound::StreamApi;
use crate::ports::outbound::WriteOp;
use async_trait::async_trait;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Most recently updated first; ties by newest creation, then id.
fn compare_recent(a: &StreamSummary, b: &StreamSummary) -> Ordering {
    b.stream
        .updated_at
        .cmp(&a.stream.updated_at)
        .then_with(|| b.stream.created_at.cmp(&a.stream.created_at))
        .then_with(|| a.stream.id.cmp(&b.stream.id))
}

#[async_trait]
impl<DS, TS> StreamApi for NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    async fn list_streams(&self) -> Result<Vec<StreamSummary>, NotebookError> {
        let mut summaries: Vec<StreamSummary> = self
            .store
            .find_streams()
            .map_err(|e| self.store_failure("list streams", e))?
            .into_iter()
            .map(|(stream, block_count)| StreamSummary {
                stream,
                block_count,
            })
            .collect();
        summaries.sort_by(compare_recent);

        debug!(count = summaries.len(), "Listed streams");
        Ok(summaries)
    }

    async fn create_stream(&self, name: &str) -> Result<StreamSummary, NotebookError> {
        let name = self.normalize_name(name)?;
        let stream = Stream::new(name, self.time_source.now());

        self.store
            .insert_stream(stream.clone())
            .map_err(|e| self.store_failure("create stream", e))?;

        info!(stream_id = %stream.id, name = %stream.name, "Created stream");
        Ok(StreamSummary {
            stream,
            block_count: 0,
        })
    }

    async fn get_stream(&self, id: &StreamId) -> Result<StreamDetail, NotebookError> {
        let (stream, mut blocks) = self
            .store
            .find_stream_with_blocks(id)
            .map_err(|e| self.store_failure("fetch stream", e))?
            .ok_or_else(|| {
                debug!(stream_id = %id, "Stream not found");
                NotebookError::StreamNotFound { id: id.clone() }
            })?;
        sort_blocks(&mut blocks);

        debug!(stream_id = %id, blocks = blocks.len(), "Fetched stream");
        Ok(StreamDetail { stream, blocks })
    }

    async fn rename_stream(
        &self,
        id: &StreamId,
        name: &str,
    ) -> Result<StreamSummary, NotebookError> {
        let name = self.normalize_name(name)?;

        let stream = self
            .store
            .update_stream_name(id, &name, self.time_source.now())
            .map_err(|e| self.store_failure("update stream", e))?;
        let block_count = self
            .store
            .count_blocks(id)
            .map_err(|e| self.store_failure("update stream", e))?;

        info!(stream_id = %id, name = %stream.name, "Renamed stream");
        Ok(StreamSummary {
            stream,
            block_count,
        })
    }

    async fn delete_stream(&self, id: &StreamId) -> Result<(), NotebookError> {
        self.store
            .transaction(vec![
                WriteOp::delete_stream_blocks(id.clone()),
                WriteOp::delete_stream(id.clone()),
            ])
            .map_err(|e| self.store_failure("delete stream", e))?;

        info!(stream_id = %id, "Deleted stream and its blocks");
        Ok(())
    }
}
