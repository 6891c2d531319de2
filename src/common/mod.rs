//! Common types and utilities shared across the index.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (node capacity, duplicate policy)
//! - Error types
//! - Identifiers (NodeId)

pub mod config;
pub mod error;
mod node_id;

pub use config::{BTreeConfig, DuplicatePolicy};
pub use error::{Error, Result};
pub use node_id::NodeId;
