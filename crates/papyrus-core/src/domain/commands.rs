//! # Commands
//!
//! Typed inputs for mutating operations. Values here have already passed
//! shape validation (see `validation`); semantic limits are enforced by the
//! service before it touches the store.

use super::entities::{BlockId, BlockType, StreamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything needed to create a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    pub stream_id: StreamId,
    pub block_type: BlockType,
    /// Already stringified.
    pub content: String,
    /// Caller-chosen position, conventionally the current block count.
    pub order: u32,
    /// `None` means "use the default" (`true`).
    pub in_context: Option<bool>,
}

impl BlockDraft {
    pub fn new(
        stream_id: StreamId,
        block_type: BlockType,
        content: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            stream_id,
            block_type,
            content: content.into(),
            order,
            in_context: None,
        }
    }

    /// Set the initial context flag explicitly.
    pub fn with_in_context(mut self, in_context: bool) -> Self {
        self.in_context = Some(in_context);
        self
    }
}

/// Partial update of a block. `type` and `streamId` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub content: Option<String>,
    pub in_context: Option<bool>,
    pub order: Option<u32>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn in_context(in_context: bool) -> Self {
        Self {
            in_context: Some(in_context),
            ..Self::default()
        }
    }

    pub fn order(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    /// True when no recognized field is set.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.in_context.is_none() && self.order.is_none()
    }
}

/// One entry of a batch reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: BlockId,
    pub order: u32,
}

impl OrderUpdate {
    pub fn new(id: BlockId, order: u32) -> Self {
        Self { id, order }
    }
}

/// Direction for moving a block one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards position 0.
    Up,
    /// Towards the end of the stream.
    Down,
}

impl MoveDirection {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "up" => Some(MoveDirection::Up),
            "down" => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => f.write_str("up"),
            MoveDirection::Down => f.write_str("down"),
        }
    }
}
