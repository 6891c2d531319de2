//! In-order traversal.

use std::iter::FusedIterator;

use crate::common::NodeId;

use super::arena::NodeArena;
use super::tree::BTreeIndex;

/// Lazy in-order iterator over a tree's entries.
///
/// Holds a stack of `(node, next entry index)` frames for the path from the
/// root to the current position. Cloning the iterator gives an independent
/// cursor at the same position.
pub struct Iter<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a BTreeIndex<K, V>) -> Self {
        let mut iter = Self {
            arena: &tree.arena,
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.descend_leftmost(tree.root);
        iter
    }

    fn descend_leftmost(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            match self.arena.get(id).child(0) {
                Some(child) => id = child,
                None => return,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, idx) = self.stack.pop()?;
            let arena = self.arena;
            let node = arena.get(id);
            if idx < node.len() {
                self.stack.push((id, idx + 1));
                if let Some(child) = node.child(idx + 1) {
                    self.descend_leftmost(child);
                }
                self.remaining -= 1;
                let entry = &node.entries[idx];
                return Some((&entry.key, &entry.value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> BTreeIndex<K, V> {
    /// Iterate over the entries in increasing key order.
    ///
    /// # Example
    /// ```
    /// use btree_index::BTreeIndex;
    ///
    /// let mut tree = BTreeIndex::new();
    /// for k in [3, 1, 2] {
    ///     tree.insert(k, k * 10).unwrap();
    /// }
    /// let pairs: Vec<_> = tree.iter().collect();
    /// assert_eq!(pairs, vec![(&1, &10), (&2, &20), (&3, &30)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Alias for [`BTreeIndex::iter`].
    #[inline]
    pub fn traverse(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut id = self.root;
        while let Some(child) = self.arena.get(id).child(0) {
            id = child;
        }
        let entry = self.arena.get(id).entries.first()?;
        Some((&entry.key, &entry.value))
    }

    /// The entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut id = self.root;
        while let Some(&child) = self.arena.get(id).children.last() {
            id = child;
        }
        let entry = self.arena.get(id).entries.last()?;
        Some((&entry.key, &entry.value))
    }
}

impl<'a, K, V> IntoIterator for &'a BTreeIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
