//! # Adapters Module
//!
//! ## Modules
//!
//! - `storage`: `DocumentStore` implementations (in-memory and file-backed)
//! - `infra`: system clock

pub mod infra;
pub mod storage;

pub use infra::SystemTimeSource;
pub use storage::{FileBackedStore, InMemoryStore};
