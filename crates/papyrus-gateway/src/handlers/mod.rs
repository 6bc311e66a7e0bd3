//! HTTP handlers.
//!
//! Handlers take the raw body as bytes and parse it themselves, so a
//! malformed body produces the same `{"error": ...}` shape as every other
//! failure instead of an extractor rejection.

pub mod blocks;
pub mod streams;

use crate::domain::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

/// Parse a request body as JSON. Shape checks belong to the validators.
pub(crate) fn json_body(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed JSON body");
        ApiError::invalid_json()
    })
}

/// `{"success": true}` for deletes.
pub(crate) fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
