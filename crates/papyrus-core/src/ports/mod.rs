//! # Ports Layer
//!
//! - `inbound.rs` - Driving ports (API exposed to the gateway and other hosts)
//! - `outbound.rs` - Driven ports (store and clock required by the service)

pub mod inbound;
pub mod outbound;
