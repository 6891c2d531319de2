//! B-tree index implementation.
//!
//! # Components
//! - [`BTreeIndex`] - The tree and its public operations
//! - [`Node`] / [`Entry`] - Node layout (entries, children, parent link)
//! - [`Iter`] - In-order traversal
//! - [`TreeStats`] - Split/rotation/merge counters
//!
//! Nodes live in an arena and point at each other with
//! [`NodeId`](crate::NodeId)s; the parent link is just another id.

mod arena;
mod delete;
mod insert;
mod iter;
mod node;
mod search;
mod sibling;
mod stats;
mod tree;

pub use iter::Iter;
pub use node::{Entry, Node};
pub use stats::TreeStats;
pub use tree::BTreeIndex;
