//! Node - the unit of storage, split and merge.
//!
//! A [`Node`] holds an ordered run of entries plus, for internal nodes,
//! one more child id than it has entries:
//!
//! ```text
//!            entries:   [ k0 | k1 | k2 ]
//!           children: [c0] [c1] [c2] [c3]
//!
//!   c0 < k0 < c1 < k1 < c2 < k2 < c3
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::common::NodeId;

/// A key and its associated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A B-tree node.
///
/// A node is a leaf if and only if `children` is empty. An internal node
/// always has exactly `entries.len() + 1` children.
///
/// `parent` is a non-owning back-link into the same arena; it is rewritten
/// on every split, rotation and merge that moves the node.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) entries: Vec<Entry<K, V>>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf with the given parent.
    pub fn new(parent: Option<NodeId>) -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    pub(crate) fn from_parts(
        entries: Vec<Entry<K, V>>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    ) -> Self {
        debug_assert!(children.is_empty() || children.len() == entries.len() + 1);
        Self {
            entries,
            children,
            parent,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of keys in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|e| &e.key)
    }

    // ========================================================================
    // Node-local search
    // ========================================================================

    /// Scan the entries in increasing order.
    ///
    /// Returns `Ok(i)` if `entries[i]` matches, or `Err(i)` with the index
    /// of the child to descend into (which is also the insertion point).
    pub fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        for (i, entry) in self.entries.iter().enumerate() {
            match key.cmp(entry.key.borrow()) {
                Ordering::Equal => return Ok(i),
                Ordering::Less => return Err(i),
                Ordering::Greater => {}
            }
        }
        Err(self.entries.len())
    }

    /// Child to descend into for a key that lands at slot `idx`.
    #[inline]
    pub(crate) fn child(&self, idx: usize) -> Option<NodeId> {
        self.children.get(idx).copied()
    }

    /// Position of `child` in this node's child array.
    pub(crate) fn position_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}
