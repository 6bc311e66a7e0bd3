//! # Entities
//!
//! Streams, blocks and their identifiers.
//!
//! Field names serialize in camelCase because these structs are returned
//! verbatim by the HTTP gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wall-clock instant in UTC.
pub type Timestamp = DateTime<Utc>;

/// Opaque stream identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque block identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of content a block holds. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Markdown text.
    Markdown,
    /// Prompt text. Stored as inert content.
    Prompt,
}

impl BlockType {
    /// Parse the wire name (`"markdown"` or `"prompt"`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "markdown" => Some(BlockType::Markdown),
            "prompt" => Some(BlockType::Prompt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Markdown => "markdown",
            BlockType::Prompt => "prompt",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named collection of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: StreamId,
    /// Trimmed, never empty.
    pub name: String,
    pub created_at: Timestamp,
    /// Refreshed on rename only.
    pub updated_at: Timestamp,
}

impl Stream {
    /// Create a stream with a fresh identifier and both timestamps set to `now`.
    pub fn new(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id: StreamId::generate(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A unit of content inside a stream.
///
/// `order` positions the block among its siblings; `in_context` marks whether
/// the block is included in downstream context. The two never influence each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub stream_id: StreamId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub order: u32,
    pub in_context: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A stream together with the number of blocks it owns.
///
/// `block_count` is derived at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSummary {
    #[serde(flatten)]
    pub stream: Stream,
    pub block_count: usize,
}

/// A stream with all of its blocks, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDetail {
    #[serde(flatten)]
    pub stream: Stream,
    pub blocks: Vec<Block>,
}
