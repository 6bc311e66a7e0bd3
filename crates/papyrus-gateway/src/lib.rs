//! Papyrus Gateway - HTTP interface for streams and blocks.
//!
//! Translates JSON requests into calls on a [`NotebookApi`] and maps the
//! results back to HTTP status codes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                PAPYRUS GATEWAY               │
//! ├──────────────────────────────────────────────┤
//! │  Middleware Stack                            │
//! │  Tracing → CORS → Timeout → Body limit       │
//! │                     │                        │
//! │  Handlers (streams, blocks, health)          │
//! │  JSON body → validation → NotebookApi        │
//! └─────────────────────┼────────────────────────┘
//!                       ▼
//!              papyrus-core service
//! ```
//!
//! # Status Mapping
//!
//! | Error kind | Status |
//! |------------|--------|
//! | Validation | 400 |
//! | Not found  | 404 |
//! | Internal   | 500, with `details` |
//!
//! # Usage
//!
//! ```ignore
//! use papyrus_gateway::{GatewayConfig, GatewayService};
//!
//! let notebook: Arc<dyn NotebookApi> = Arc::new(NotebookService::in_memory());
//! let mut gateway = GatewayService::new(GatewayConfig::default(), notebook)?;
//! let addr = gateway.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
