//! Structural statistics for a B-tree.

use std::fmt;

/// Counters for the structural events a tree has gone through.
///
/// Lookups don't touch these; only the split and rebalance engines do.
/// Useful for checking which rebalance path a delete took.
///
/// # Example
/// ```
/// use btree_index::BTreeIndex;
///
/// let mut tree = BTreeIndex::new();
/// for k in 1..=3 {
///     tree.insert(k, ()).unwrap();
/// }
/// assert_eq!(tree.stats().root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Non-root node splits.
    pub splits: u64,

    /// Root splits (each one adds a level).
    pub root_splits: u64,

    /// Borrows from a left sibling.
    pub rotations_right: u64,

    /// Borrows from a right sibling.
    pub rotations_left: u64,

    /// Sibling merges.
    pub merges: u64,

    /// Root collapses (each one removes a level).
    pub root_collapses: u64,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rotations in either direction.
    pub fn rotations(&self) -> u64 {
        self.rotations_left + self.rotations_right
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, root_splits: {}, rotations: {} (left {}, right {}), merges: {}, root_collapses: {} }}",
            self.splits,
            self.root_splits,
            self.rotations(),
            self.rotations_left,
            self.rotations_right,
            self.merges,
            self.root_collapses
        )
    }
}
