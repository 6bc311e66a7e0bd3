//! Route table and shared handler state.

use crate::domain::config::GatewayConfig;
use crate::handlers::{blocks, health_check, streams};
use crate::middleware::{create_cors_layer, TracingLayer};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use papyrus_core::NotebookApi;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;


/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub notebook: Arc<dyn NotebookApi>,
}

/// Build the HTTP router with its middleware stack.
///
/// Layers run outermost first: tracing, CORS, timeout, body limit.
pub fn build_router(notebook: Arc<dyn NotebookApi>, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(create_cors_layer(&config.cors))
        .layer(TimeoutLayer::new(config.timeouts.request))
        .layer(DefaultBodyLimit::max(config.limits.max_request_size));

    Router::new()
        .route(
            "/api/streams",
            get(streams::list_streams).post(streams::create_stream),
        )
        .route(
            "/api/streams/:id",
            get(streams::get_stream)
                .patch(streams::rename_stream)
                .delete(streams::delete_stream),
        )
        .route("/api/blocks", post(blocks::create_block))
        .route("/api/blocks/reorder", post(blocks::reorder_blocks))
        .route(
            "/api/blocks/:id",
            patch(blocks::update_block).delete(blocks::delete_block),
        )
        .route("/api/blocks/:id/move", post(blocks::move_block))
        .route("/health", get(health_check))
        .layer(middleware)
        .with_state(AppState { notebook })
}
