//! # Payload Validation
//!
//! Turns loosely-typed JSON request bodies into typed commands.
//!
//! Only the *shape* of the payload is checked here (presence and JSON type
//! of each field). Semantic rules such as trimming, emptiness and size limits
//! are enforced by the service so that Rust callers get them too.
//!
//! Messages are caller-facing and returned verbatim by the gateway.

use super::commands::{BlockDraft, BlockPatch, MoveDirection, OrderUpdate};
use super::entities::{BlockId, BlockType, StreamId};
use super::errors::NotebookError;
use serde_json::Value;

pub mod messages {
    pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";
    pub const STREAM_NAME: &str = "Stream name is required and must be a non-empty string";
    pub const STREAM_ID: &str = "streamId is required and must be a string";
    pub const BLOCK_TYPE: &str = "type is required and must be either \"markdown\" or \"prompt\"";
    pub const CONTENT_REQUIRED: &str = "content is required";
    pub const CREATE_ORDER: &str = "order is required and must be a non-negative integer";
    pub const ORDER: &str = "order must be a non-negative integer";
    pub const IN_CONTEXT: &str = "inContext must be a boolean";
    pub const NO_FIELDS: &str = "No valid fields to update";
    pub const UPDATES_NOT_ARRAY: &str = "updates must be an array of {id, order} objects";
    pub const UPDATES_EMPTY: &str = "updates must contain at least one {id, order} entry";
    pub const UPDATE_ID: &str = "Each update must have a valid id string";
    pub const UPDATE_ORDER: &str = "Each update must have a valid order number";
    pub const DIRECTION: &str = "direction must be either \"up\" or \"down\"";
}

/// Text stored for a content value.
///
/// Strings are kept as-is; every other JSON value is stored as its compact
/// JSON text, so `{"a":1}` becomes the string `{"a":1}`.
pub fn content_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Read a non-negative integer order.
///
/// Integral floats such as `2.0` are accepted; negatives, fractions and
/// values above `u32::MAX` are not.
pub fn order_value(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Treat explicit `null` the same as an absent field.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|v| !v.is_null())
}

fn require_object(body: &Value) -> Result<(), NotebookError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(NotebookError::validation(messages::BODY_NOT_OBJECT))
    }
}

/// `{"name": "..."}` as used by create and rename. Returns the raw string.
pub fn stream_name(body: &Value) -> Result<String, NotebookError> {
    require_object(body)?;
    field(body, "name")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| NotebookError::validation(messages::STREAM_NAME))
}

/// `{"streamId", "type", "content", "order", "inContext"?}`.
pub fn block_draft(body: &Value) -> Result<BlockDraft, NotebookError> {
    require_object(body)?;

    let stream_id = field(body, "streamId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| NotebookError::validation(messages::STREAM_ID))?;

    let block_type = field(body, "type")
        .and_then(Value::as_str)
        .and_then(BlockType::parse)
        .ok_or_else(|| NotebookError::validation(messages::BLOCK_TYPE))?;

    let content = field(body, "content")
        .map(content_text)
        .ok_or_else(|| NotebookError::validation(messages::CONTENT_REQUIRED))?;

    let order = field(body, "order")
        .and_then(order_value)
        .ok_or_else(|| NotebookError::validation(messages::CREATE_ORDER))?;

    let in_context = match field(body, "inContext") {
        None => None,
        Some(value) => Some(
            value
                .as_bool()
                .ok_or_else(|| NotebookError::validation(messages::IN_CONTEXT))?,
        ),
    };

    Ok(BlockDraft {
        stream_id: StreamId::new(stream_id),
        block_type,
        content,
        order,
        in_context,
    })
}

/// `{"content"?, "inContext"?, "order"?}`. Unrecognized fields are ignored,
/// which is how `type` and `streamId` stay immutable.
///
/// A present `null` is a value here, not an absent field: `content: null`
/// stores the text `null`, while a `null` flag or order is rejected.
///
/// An empty patch is returned as-is; the service rejects it.
pub fn block_patch(body: &Value) -> Result<BlockPatch, NotebookError> {
    require_object(body)?;

    let mut patch = BlockPatch::default();

    if let Some(content) = body.get("content") {
        patch.content = Some(content_text(content));
    }

    if let Some(value) = body.get("inContext") {
        patch.in_context = Some(
            value
                .as_bool()
                .ok_or_else(|| NotebookError::validation(messages::IN_CONTEXT))?,
        );
    }

    if let Some(value) = body.get("order") {
        patch.order =
            Some(order_value(value).ok_or_else(|| NotebookError::validation(messages::ORDER))?);
    }

    Ok(patch)
}

/// `{"updates": [{"id", "order"}, ...]}`.
pub fn order_updates(body: &Value) -> Result<Vec<OrderUpdate>, NotebookError> {
    require_object(body)?;

    let entries = field(body, "updates")
        .and_then(Value::as_array)
        .ok_or_else(|| NotebookError::validation(messages::UPDATES_NOT_ARRAY))?;

    entries
        .iter()
        .map(|entry| {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| NotebookError::validation(messages::UPDATE_ID))?;
            let order = entry
                .get("order")
                .and_then(order_value)
                .ok_or_else(|| NotebookError::validation(messages::UPDATE_ORDER))?;
            Ok(OrderUpdate::new(BlockId::new(id), order))
        })
        .collect()
}

/// `{"direction": "up" | "down"}`.
pub fn move_direction(body: &Value) -> Result<MoveDirection, NotebookError> {
    require_object(body)?;
    field(body, "direction")
        .and_then(Value::as_str)
        .and_then(MoveDirection::parse)
        .ok_or_else(|| NotebookError::validation(messages::DIRECTION))
}
