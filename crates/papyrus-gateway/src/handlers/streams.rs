//! Stream endpoints.

use super::{json_body, success};
use crate::domain::error::ApiResult;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use papyrus_core::domain::validation;
use papyrus_core::{StreamApi, StreamId};

/// `GET /api/streams`
pub async fn list_streams(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let streams = state.notebook.list_streams().await?;
    Ok(Json(streams))
}

/// `POST /api/streams`
pub async fn create_stream(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let name = validation::stream_name(&json_body(&body)?)?;
    let stream = state.notebook.create_stream(&name).await?;
    Ok((StatusCode::CREATED, Json(stream)))
}

/// `GET /api/streams/:id`
pub async fn get_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let stream = state.notebook.get_stream(&StreamId::new(id)).await?;
    Ok(Json(stream))
}

/// `PATCH /api/streams/:id`
pub async fn rename_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let name = validation::stream_name(&json_body(&body)?)?;
    let stream = state
        .notebook
        .rename_stream(&StreamId::new(id), &name)
        .await?;
    Ok(Json(stream))
}

/// `DELETE /api/streams/:id`
pub async fn delete_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.notebook.delete_stream(&StreamId::new(id)).await?;
    Ok(success())
}
