//! Middleware stack for the gateway.
//!
//! Order (outermost first): tracing, CORS, timeout, body limit.

pub mod cors;
pub mod tracing;

pub use self::cors::create_cors_layer;
pub use self::tracing::{TracingLayer, TracingService};
