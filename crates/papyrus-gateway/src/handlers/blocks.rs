//! Block endpoints, including reorder and move.

use super::{json_body, success};
use crate::domain::error::ApiResult;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use papyrus_core::domain::validation;
use papyrus_core::{BlockApi, BlockId, OrderingApi};
use serde_json::json;

/// `POST /api/blocks`
pub async fn create_block(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let draft = validation::block_draft(&json_body(&body)?)?;
    let block = state.notebook.create_block(draft).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// `PATCH /api/blocks/:id`
pub async fn update_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let patch = validation::block_patch(&json_body(&body)?)?;
    let block = state
        .notebook
        .update_block(&BlockId::new(id), patch)
        .await?;
    Ok(Json(block))
}

/// `DELETE /api/blocks/:id`
pub async fn delete_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.notebook.delete_block(&BlockId::new(id)).await?;
    Ok(success())
}

/// `POST /api/blocks/reorder`
pub async fn reorder_blocks(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let updates = validation::order_updates(&json_body(&body)?)?;
    let updated = state.notebook.reorder_blocks(updates).await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

/// `POST /api/blocks/:id/move`
pub async fn move_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let direction = validation::move_direction(&json_body(&body)?)?;
    let blocks = state
        .notebook
        .move_block(&BlockId::new(id), direction)
        .await?;
    Ok(Json(json!({ "blocks": blocks })))
}
