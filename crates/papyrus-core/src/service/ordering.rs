//! # Ordering Engine
//!
//! Implements the OrderingApi trait.
//!
//! Both operations write through a single store transaction, so concurrent
//! readers see either every new order or none of them.

use super::*;
use crate::domain::commands::{MoveDirection, OrderUpdate};
use crate::domain::entities::BlockId;
use crate::domain::errors::EntityKind;
use crate::domain::ordering::{plan_move, MovePlan};
use crate::ports::inbound::OrderingApi;
use crate::ports::outbound::WriteOp;
use async_trait::async_trait;
use tracing::{debug, info};

impl<DS, TS> NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    fn check_batch(&self, updates: &[OrderUpdate]) -> Result<(), NotebookError> {
        if updates.is_empty() {
            return Err(self.rejected(messages::UPDATES_EMPTY.to_string()));
        }
        let max = self.config.limits.max_reorder_batch;
        if updates.len() > max {
            return Err(self.rejected(format!(
                "updates must contain at most {max} entries, got {}",
                updates.len()
            )));
        }
        if updates.iter().any(|u| u.id.as_str().is_empty()) {
            return Err(self.rejected(messages::UPDATE_ID.to_string()));
        }
        Ok(())
    }

    /// Write every update in one transaction. Entries apply in list order.
    fn apply_orders(
        &self,
        operation: &'static str,
        updates: Vec<OrderUpdate>,
    ) -> Result<usize, NotebookError> {
        let now = self.time_source.now();
        let ops: Vec<WriteOp> = updates
            .into_iter()
            .map(|update| WriteOp::set_order(update.id, update.order, now))
            .collect();

        self.store
            .transaction(ops)
            .map_err(|e| self.store_failure(operation, e))
    }
}

#[async_trait]
impl<DS, TS> OrderingApi for NotebookService<DS, TS>
where
    DS: DocumentStore,
    TS: TimeSource,
{
    async fn reorder_blocks(&self, updates: Vec<OrderUpdate>) -> Result<usize, NotebookError> {
        self.check_batch(&updates)?;

        let updated = self.apply_orders("reorder blocks", updates)?;

        info!(updated, "Reordered blocks");
        Ok(updated)
    }

    async fn move_block(
        &self,
        id: &BlockId,
        direction: MoveDirection,
    ) -> Result<Vec<Block>, NotebookError> {
        let target = self
            .store
            .find_block(id)
            .map_err(|e| self.store_failure("move block", e))?
            .ok_or_else(|| self.store_failure("move block", missing_block(id)))?;

        let blocks = self.sorted_blocks("move block", &target.stream_id)?;

        match plan_move(&blocks, id, direction) {
            MovePlan::Unchanged => {
                debug!(block_id = %id, %direction, "Block already at edge, nothing to move");
                Ok(blocks)
            }
            MovePlan::Missing => Err(self.store_failure("move block", missing_block(id))),
            MovePlan::Reorder(updates) => {
                let updated = self.apply_orders("move block", updates)?;
                info!(
                    block_id = %id,
                    stream_id = %target.stream_id,
                    %direction,
                    updated,
                    "Moved block"
                );
                self.sorted_blocks("move block", &target.stream_id)
            }
        }
    }
}

fn missing_block(id: &BlockId) -> StoreError {
    StoreError::RecordNotFound {
        entity: EntityKind::Block,
        id: id.to_string(),
        operation: "update",
    }
}
