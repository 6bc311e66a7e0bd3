//! # Domain Layer
//!
//! Pure domain logic for Papyrus streams and blocks.
//! Nothing in this layer performs I/O.
//!
//! ## Modules
//!
//! - `entities` - Stream, Block and their identifiers
//! - `commands` - Validated inputs for mutations (drafts, patches, order updates)
//! - `config` - Service configuration and input limits
//! - `errors` - Store and service error taxonomy
//! - `ordering` - Sorting, renumbering and move planning for blocks
//! - `validation` - Translation of loosely-typed JSON payloads into commands

pub mod commands;
pub mod config;
pub mod entities;
pub mod errors;
pub mod ordering;
pub mod validation;
