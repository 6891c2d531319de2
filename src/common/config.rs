//! Configuration for the B-tree index.

use super::error::{Error, Result};

/// Default number of entry slots per node.
///
/// With 3 slots a node splits as soon as it holds 3 keys, so at rest every
/// node holds 1 or 2 keys (a 2-3 tree).
pub const DEFAULT_NODE_CAPACITY: usize = 3;

/// Smallest capacity for which a split yields two non-empty halves.
pub const MIN_NODE_CAPACITY: usize = 3;

/// What `insert` does when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Replace the stored value and hand back the previous one.
    #[default]
    Overwrite,
    /// Leave the tree untouched and return [`Error::DuplicateKey`].
    Reject,
}

/// Per-tree configuration, fixed for the lifetime of a tree instance.
///
/// # Thresholds
/// For a capacity `c`:
/// - a node splits when it reaches `c` entries, so it holds at most `c - 1`
/// - a non-root node underflows below `(c - 1) / 2` entries
/// - the split promotes the entry at index `c / 2`
///
/// | capacity | max keys | min keys | split index |
/// |----------|----------|----------|-------------|
/// | 3        | 2        | 1        | 1           |
/// | 4        | 3        | 1        | 2           |
/// | 5        | 4        | 2        | 2           |
///
/// # Example
/// ```
/// use btree_index::{BTreeConfig, DuplicatePolicy};
///
/// let config = BTreeConfig::default()
///     .with_capacity(5)
///     .with_duplicates(DuplicatePolicy::Reject);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_keys(), 4);
/// assert_eq!(config.min_keys(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    /// Entry slots per node.
    pub capacity: usize,

    /// Duplicate-key handling on insert.
    pub duplicates: DuplicatePolicy,
}

impl BTreeConfig {
    /// Create a config with the given capacity and the default duplicate policy.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Check that the configuration can build a tree.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity < MIN_NODE_CAPACITY`
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_NODE_CAPACITY {
            return Err(Error::InvalidCapacity {
                capacity: self.capacity,
                minimum: MIN_NODE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Maximum number of keys a node holds between operations.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.capacity - 1
    }

    /// Minimum number of keys a non-root node must hold.
    #[inline]
    pub fn min_keys(&self) -> usize {
        (self.capacity - 1) / 2
    }

    /// Index of the entry promoted when a full node splits.
    #[inline]
    pub fn split_index(&self) -> usize {
        self.capacity / 2
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CAPACITY)
    }
}
