//! Index structures.
//!
//! - [`btree`] - In-memory B-tree
//! - [`SharedIndex`] - Lock-protected handle for multi-threaded callers

pub mod btree;
mod shared;

pub use btree::{BTreeIndex, Entry, Iter, Node, TreeStats};
pub use shared::{IndexReadGuard, IndexWriteGuard, SharedIndex};
