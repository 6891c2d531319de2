//! btree-index - An in-memory B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          btree-index                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Shared wrapper (index/shared.rs)              │   │
//! │  │        SharedIndex: RwLock, single writer / readers      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 BTreeIndex (index/btree/)                │   │
//! │  │   search → insert + split  |  delete + rotate/merge      │   │
//! │  │              sibling locator   ·   in-order Iter         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                    Node arena                            │   │
//! │  │     Node { entries, children: [NodeId], parent }         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B-tree and its shared wrapper
//!
//! # Quick Start
//! ```
//! use btree_index::{BTreeConfig, BTreeIndex};
//!
//! let mut tree = BTreeIndex::with_config(BTreeConfig::new(4)).unwrap();
//! for k in 1..=50 {
//!     tree.insert(k, k * k).unwrap();
//! }
//!
//! assert_eq!(tree.get(&7), Some(&49));
//! assert!(tree.delete(&7));
//! assert_eq!(tree.get(&7), None);
//! assert!(tree.validate().is_ok());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_NODE_CAPACITY, MIN_NODE_CAPACITY};
pub use common::{BTreeConfig, DuplicatePolicy, Error, NodeId, Result};

pub use index::{BTreeIndex, Entry, Iter, Node, SharedIndex, TreeStats};
