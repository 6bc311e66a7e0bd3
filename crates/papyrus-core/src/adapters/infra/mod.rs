//! Infrastructure Adapters
//!
//! Implementations of infrastructure traits (Time).

mod time;

pub use time::SystemTimeSource;
