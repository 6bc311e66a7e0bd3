//! # Block Lifecycle Manager
//!
//! Implements the BlockApi trait.

use super::*;
use crate::domain::commands::{BlockDraft, BlockPatch};
use crate::domain::entities::BlockId;
use crate::ports::inbound::BlockApi;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl<DS, TS> BlockApi for NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    async fn create_block(&self, draft: BlockDraft) -> Result<Block, NotebookError> {
        if draft.stream_id.as_str().is_empty() {
            return Err(self.rejected(messages::STREAM_ID.to_string()));
        }
        self.check_content(&draft.content)?;

        let now = self.time_source.now();
        let block = Block {
            id: BlockId::generate(),
            stream_id: draft.stream_id,
            block_type: draft.block_type,
            content: draft.content,
            order: draft.order,
            in_context: draft.in_context.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        // The store enforces the parent reference; a missing stream surfaces
        // as a foreign key violation.
        self.store
            .insert_block(block.clone())
            .map_err(|e| self.store_failure("create block", e))?;

        info!(
            block_id = %block.id,
            stream_id = %block.stream_id,
            block_type = %block.block_type,
            order = block.order,
            "Created block"
        );
        Ok(block)
    }

    async fn update_block(&self, id: &BlockId, patch: BlockPatch) -> Result<Block, NotebookError> {
        if patch.is_empty() {
            return Err(self.rejected(messages::NO_FIELDS.to_string()));
        }
        if let Some(content) = &patch.content {
            self.check_content(content)?;
        }

        let block = self
            .store
            .update_block(id, &patch, self.time_source.now())
            .map_err(|e| self.store_failure("update block", e))?;

        info!(
            block_id = %id,
            content = patch.content.is_some(),
            in_context = ?patch.in_context,
            order = ?patch.order,
            "Updated block"
        );
        Ok(block)
    }

    async fn delete_block(&self, id: &BlockId) -> Result<(), NotebookError> {
        self.store
            .delete_block(id)
            .map_err(|e| self.store_failure("delete block", e))?;

        info!(block_id = %id, "Deleted block");
        Ok(())
    }
}
