//! # Papyrus Test Suite
//!
//! Cross-crate tests that need more than one workspace member.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── http_flows.rs    # Real TCP server via NodeRuntime
//! │   ├── persistence.rs   # File-backed store across restarts
//! │   └── concurrency.rs   # Atomic reorders under contention
//! └── benches/
//!     └── ordering_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p papyrus-tests
//! cargo bench -p papyrus-tests
//! ```

pub mod integration;
