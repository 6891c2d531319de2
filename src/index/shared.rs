//! Shared, lock-protected access to a [`BTreeIndex`].
//!
//! The tree itself is single-threaded. [`SharedIndex`] puts it behind a
//! `parking_lot::RwLock`: inserts and deletes take the write lock (they
//! re-parent nodes and must not interleave), lookups and traversals take
//! the read lock.
//!
//! - [`IndexReadGuard`] - Shared read access (multiple allowed)
//! - [`IndexWriteGuard`] - Exclusive write access

use std::borrow::Borrow;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use crate::common::{BTreeConfig, Result};
use crate::index::btree::BTreeIndex;

/// A cloneable handle to a tree shared between threads.
///
/// # Thread Safety
/// - `inner`: `RwLock` — many readers, one writer
///
/// # Example
/// ```
/// use btree_index::SharedIndex;
/// use std::thread;
///
/// let index = SharedIndex::new();
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let index = index.clone();
///         thread::spawn(move || {
///             for k in 0..100 {
///                 index.insert(t * 100 + k, k).unwrap();
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(index.len(), 400);
/// ```
pub struct SharedIndex<K, V> {
    inner: Arc<RwLock<BTreeIndex<K, V>>>,
}

impl<K: Ord, V> SharedIndex<K, V> {
    /// Create a shared, empty tree with the default configuration.
    pub fn new() -> Self {
        Self::from_tree(BTreeIndex::new())
    }

    /// Create a shared, empty tree from a configuration.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `config.capacity < 3`
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        Ok(Self::from_tree(BTreeIndex::with_config(config)?))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: BTreeIndex<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    // ========================================================================
    // Public API: Guards
    // ========================================================================

    /// Take the read lock.
    pub fn read(&self) -> IndexReadGuard<'_, K, V> {
        IndexReadGuard::new(self.inner.read())
    }

    /// Take the write lock.
    pub fn write(&self) -> IndexWriteGuard<'_, K, V> {
        IndexWriteGuard::new(self.inner.write())
    }

    // ========================================================================
    // Public API: Single-operation shortcuts
    // ========================================================================

    /// Insert under the write lock. See [`BTreeIndex::insert`].
    pub fn insert(&self, key: K, value: V) -> Result<Option<V>> {
        self.write().insert(key, value)
    }

    /// Delete under the write lock. See [`BTreeIndex::delete`].
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.write().delete(key)
    }

    /// Look up under the read lock and clone the value out.
    pub fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.read().get(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<K: Ord, V> Default for SharedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for SharedIndex<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Guard for read-only access to a shared tree.
///
/// Multiple `IndexReadGuard`s can exist at the same time.
pub struct IndexReadGuard<'a, K, V> {
    lock: RwLockReadGuard<'a, BTreeIndex<K, V>>,
}

impl<'a, K, V> IndexReadGuard<'a, K, V> {
    pub(crate) fn new(lock: RwLockReadGuard<'a, BTreeIndex<K, V>>) -> Self {
        Self { lock }
    }
}

impl<K, V> Deref for IndexReadGuard<'_, K, V> {
    type Target = BTreeIndex<K, V>;

    #[inline]
    fn deref(&self) -> &BTreeIndex<K, V> {
        &self.lock
    }
}

/// Guard for exclusive write access to a shared tree.
///
/// Only one `IndexWriteGuard` can exist at a time. In debug builds the
/// tree is validated when the guard drops.
pub struct IndexWriteGuard<'a, K: Ord, V> {
    lock: RwLockWriteGuard<'a, BTreeIndex<K, V>>,
}

impl<'a, K: Ord, V> IndexWriteGuard<'a, K, V> {
    pub(crate) fn new(lock: RwLockWriteGuard<'a, BTreeIndex<K, V>>) -> Self {
        Self { lock }
    }
}

impl<K: Ord, V> Deref for IndexWriteGuard<'_, K, V> {
    type Target = BTreeIndex<K, V>;

    #[inline]
    fn deref(&self) -> &BTreeIndex<K, V> {
        &self.lock
    }
}

impl<K: Ord, V> DerefMut for IndexWriteGuard<'_, K, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut BTreeIndex<K, V> {
        &mut self.lock
    }
}

impl<K: Ord, V> Drop for IndexWriteGuard<'_, K, V> {
    fn drop(&mut self) {
        debug_assert!(
            self.lock.validate().is_ok(),
            "tree invariants broken by write: {:?}",
            self.lock.validate()
        );
        trace!(len = self.lock.len(), "btree.write_release");
    }
}
