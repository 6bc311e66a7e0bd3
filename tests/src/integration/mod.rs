//! End-to-end flows across core, gateway and node.

pub mod concurrency;
pub mod http_flows;
pub mod persistence;
