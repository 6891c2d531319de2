//! Deletion and the rebalance engine.
//!
//! Entries are always physically removed from a leaf. Deleting a key held
//! by an internal node first swaps in its in-order predecessor (the last
//! entry of the right-most leaf under the key's left child) and removes
//! that leaf entry instead.
//!
//! A non-root node left with fewer than `min_keys` entries is repaired
//! with the first applicable step:
//!
//! ```text
//!  rotate right: borrow from the left sibling through the parent
//!
//!        [ .. S .. ]                 [ .. L2 .. ]
//!         /       \        =>         /        \
//!    [L1 L2]      [ ]             [L1]         [S]
//!
//!  rotate left: borrow from the right sibling through the parent
//!
//!        [ .. S .. ]                 [ .. R1 .. ]
//!         /       \        =>         /        \
//!       [ ]     [R1 R2]             [S]        [R2]
//!
//!  merge: neither sibling can spare an entry
//!
//!        [ .. S .. ]                 [ .. .. ]
//!         /       \        =>            |
//!       [L]       [ ]                  [L S]
//! ```
//!
//! Rotation prefers the left sibling. A merge takes an entry out of the
//! parent, so rebalancing continues upward; an emptied root with a single
//! child absorbs that child, keeping the root's id.

use std::borrow::Borrow;

use tracing::{debug, trace};

use crate::common::NodeId;

use super::node::Node;
use super::tree::BTreeIndex;

impl<K: Ord, V> BTreeIndex<K, V> {
    /// Remove `key` and return its value, or `None` if it was absent.
    ///
    /// An absent key leaves the tree untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key`, returning whether it was present.
    ///
    /// # Example
    /// ```
    /// use btree_index::BTreeIndex;
    ///
    /// let mut tree = BTreeIndex::new();
    /// for k in 1..=8 {
    ///     tree.insert(k, ()).unwrap();
    /// }
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&5));
    /// assert!(!tree.contains_key(&5));
    /// assert_eq!(tree.len(), 7);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Remove `key` and return the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, idx) = self.locate(key)?;

        let (removed, leaf) = if self.arena.get(id).is_leaf() {
            (self.arena.get_mut(id).entries.remove(idx), id)
        } else {
            // Swap in the predecessor from the bottom of the left subtree
            let leaf = self.rightmost_leaf(self.arena.get(id).children[idx]);
            let predecessor = match self.arena.get_mut(leaf).entries.pop() {
                Some(entry) => entry,
                None => panic!("{} is an empty non-root leaf", leaf),
            };
            let removed = std::mem::replace(&mut self.arena.get_mut(id).entries[idx], predecessor);
            trace!(node = %id, leaf = %leaf, "btree.delete_internal");
            (removed, leaf)
        };

        self.len -= 1;
        self.rebalance(leaf);
        Some((removed.key, removed.value))
    }

    /// Remove and return the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        let key = self.first_key_value()?.0.clone();
        self.remove_entry(&key)
    }

    /// Remove and return the largest entry.
    pub fn pop_last(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        let key = self.last_key_value()?.0.clone();
        self.remove_entry(&key)
    }

    fn rightmost_leaf(&self, mut id: NodeId) -> NodeId {
        while let Some(&last) = self.arena.get(id).children.last() {
            id = last;
        }
        id
    }

    // ========================================================================
    // Internal: Rebalance engine
    // ========================================================================

    /// Repair underflow at `id`, walking up while merges drain parents.
    fn rebalance(&mut self, mut id: NodeId) {
        let min = self.config.min_keys();

        loop {
            let node = self.arena.get(id);
            let Some(parent) = node.parent else {
                if node.is_empty() && !node.is_leaf() {
                    self.collapse_root();
                }
                return;
            };

            if node.len() >= min {
                return;
            }

            let left = self.left_sibling(id);
            let right = self.right_sibling(id);

            if let Some(left) = left.filter(|&l| self.arena.get(l).len() > min) {
                self.rotate_right(left, id, parent);
                return;
            }
            if let Some(right) = right.filter(|&r| self.arena.get(r).len() > min) {
                self.rotate_left(right, id, parent);
                return;
            }

            match (left, right) {
                (Some(left), _) => self.merge(left, id, parent),
                (None, Some(right)) => self.merge(id, right, parent),
                (None, None) => panic!("{} has a parent but no siblings", id),
            }
            id = parent;
        }
    }

    /// Move the left sibling's last entry up into the parent and the
    /// separator down into the front of `id`.
    fn rotate_right(&mut self, left: NodeId, id: NodeId, parent: NodeId) {
        let pos = self.child_position(parent, left);

        let sibling = self.arena.get_mut(left);
        let borrowed = match sibling.entries.pop() {
            Some(entry) => entry,
            None => panic!("rotating from empty sibling {}", left),
        };
        let moved_child = sibling.children.pop();

        let separator = std::mem::replace(&mut self.arena.get_mut(parent).entries[pos], borrowed);

        let node = self.arena.get_mut(id);
        node.entries.insert(0, separator);
        if let Some(child) = moved_child {
            node.children.insert(0, child);
            self.arena.get_mut(child).parent = Some(id);
        }

        self.stats.rotations_right += 1;
        trace!(node = %id, sibling = %left, parent = %parent, "btree.rotate_right");
    }

    /// Move the right sibling's first entry up into the parent and the
    /// separator down onto the end of `id`.
    fn rotate_left(&mut self, right: NodeId, id: NodeId, parent: NodeId) {
        let pos = self.child_position(parent, id);

        let sibling = self.arena.get_mut(right);
        let borrowed = sibling.entries.remove(0);
        let moved_child = if sibling.is_leaf() {
            None
        } else {
            Some(sibling.children.remove(0))
        };

        let separator = std::mem::replace(&mut self.arena.get_mut(parent).entries[pos], borrowed);

        let node = self.arena.get_mut(id);
        node.entries.push(separator);
        if let Some(child) = moved_child {
            node.children.push(child);
            self.arena.get_mut(child).parent = Some(id);
        }

        self.stats.rotations_left += 1;
        trace!(node = %id, sibling = %right, parent = %parent, "btree.rotate_left");
    }

    /// Fold `right` and the separator between the two into `left`, then
    /// release `right`.
    fn merge(&mut self, left: NodeId, right: NodeId, parent: NodeId) {
        let pos = self.child_position(parent, left);

        let parent_node = self.arena.get_mut(parent);
        let separator = parent_node.entries.remove(pos);
        let dropped = parent_node.children.remove(pos + 1);
        debug_assert_eq!(dropped, right);

        let Node {
            entries, children, ..
        } = self.arena.free(right);

        let node = self.arena.get_mut(left);
        node.entries.push(separator);
        node.entries.extend(entries);
        node.children.extend(children);
        self.arena.adopt_children(left);

        self.stats.merges += 1;
        debug!(node = %left, released = %right, parent = %parent, "btree.merge");
    }

    /// Pull the root's only child up into the root.
    fn collapse_root(&mut self) {
        let root = self.root;
        let child = {
            let node = self.arena.get(root);
            debug_assert!(node.is_empty() && node.children.len() == 1);
            node.children[0]
        };

        let Node {
            entries, children, ..
        } = self.arena.free(child);

        let node = self.arena.get_mut(root);
        node.entries = entries;
        node.children = children;
        self.arena.adopt_children(root);

        self.stats.root_collapses += 1;
        debug!(root = %root, released = %child, "btree.collapse_root");
    }
}
