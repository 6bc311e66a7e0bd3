//! Storage Adapters
//!
//! Implementations of the `DocumentStore` trait.
//!
//! Both adapters share the same table logic (`tables.rs`): foreign keys on
//! block insert, dependent-row checks on stream delete, and staged
//! transactions that are swapped in only after every operation succeeds.
//!
//! The on-disk snapshot format stays private to this module:
//!
//! ```compile_fail
//! use papyrus_core::adapters::storage::Snapshot;
//! ```

mod file;
mod memory;
mod tables;

pub use file::FileBackedStore;
pub use memory::InMemoryStore;
