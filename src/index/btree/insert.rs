//! Insertion and the split engine.
//!
//! A new entry always lands in a leaf. When a node reaches `capacity`
//! entries it splits around index `capacity / 2`:
//!
//! ```text
//!   before (capacity 3)          after
//!
//!      parent [ .. ]           parent [ .. B .. ]
//!         |                          /     \
//!    node [A B C]              node [A]   right [C]
//! ```
//!
//! The middle entry moves up into the parent, which may split in turn.
//! Splitting the root is special: both halves move into new nodes and the
//! root is rebuilt in place around the promoted entry, so its id never
//! changes.

use tracing::{debug, trace};

use crate::common::{DuplicatePolicy, Error, NodeId, Result};

use super::node::{Entry, Node};
use super::tree::BTreeIndex;

impl<K: Ord, V> BTreeIndex<K, V> {
    /// Insert a key/value pair.
    ///
    /// Returns `Ok(None)` when the key is new. When the key is already
    /// present the tree's [`DuplicatePolicy`] decides:
    /// - `Overwrite` replaces the value and returns `Ok(Some(previous))`
    /// - `Reject` leaves the tree untouched and returns `Err(Error::DuplicateKey)`
    ///
    /// # Example
    /// ```
    /// use btree_index::BTreeIndex;
    ///
    /// let mut tree = BTreeIndex::new();
    /// assert_eq!(tree.insert(1, "a").unwrap(), None);
    /// assert_eq!(tree.insert(1, "b").unwrap(), Some("a"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        // Descend to the leaf bracketing the key, watching for a match on the way
        let mut id = self.root;
        let slot = loop {
            let node = self.arena.get(id);
            match node.search(&key) {
                Ok(idx) => return self.insert_duplicate(id, idx, value),
                Err(idx) => match node.child(idx) {
                    Some(child) => id = child,
                    None => break idx,
                },
            }
        };

        self.arena
            .get_mut(id)
            .entries
            .insert(slot, Entry::new(key, value));
        self.len += 1;

        self.split_upward(id);
        Ok(None)
    }

    fn insert_duplicate(&mut self, id: NodeId, idx: usize, value: V) -> Result<Option<V>> {
        match self.config.duplicates {
            DuplicatePolicy::Overwrite => {
                let slot = &mut self.arena.get_mut(id).entries[idx].value;
                Ok(Some(std::mem::replace(slot, value)))
            }
            DuplicatePolicy::Reject => Err(Error::DuplicateKey),
        }
    }

    // ========================================================================
    // Internal: Split engine
    // ========================================================================

    /// Split `id` and then its ancestors for as long as they are full.
    fn split_upward(&mut self, mut id: NodeId) {
        while self.arena.get(id).len() >= self.config.capacity {
            match self.arena.get(id).parent {
                Some(parent) => {
                    self.split_node(id, parent);
                    id = parent;
                }
                None => {
                    debug_assert_eq!(id, self.root);
                    self.split_root();
                    return;
                }
            }
        }
    }

    /// Split a full non-root node into itself and a new right sibling.
    fn split_node(&mut self, id: NodeId, parent: NodeId) {
        let mid = self.config.split_index();

        let node = self.arena.get_mut(id);
        let right_entries = node.entries.split_off(mid + 1);
        let promoted = node.entries.remove(mid);
        let right_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(mid + 1)
        };

        let right = self
            .arena
            .alloc(Node::from_parts(right_entries, right_children, Some(parent)));
        self.arena.adopt_children(right);

        // The promoted key goes right after this node's slot, the new
        // sibling right after the key.
        let pos = self.child_position(parent, id);
        let parent_node = self.arena.get_mut(parent);
        parent_node.entries.insert(pos, promoted);
        parent_node.children.insert(pos + 1, right);

        self.stats.splits += 1;
        trace!(node = %id, sibling = %right, parent = %parent, "btree.split");
    }

    /// Split the full root into two new children, keeping the root's id.
    fn split_root(&mut self) {
        let root = self.root;
        let mid = self.config.split_index();

        let node = self.arena.get_mut(root);
        let mut left_entries = std::mem::take(&mut node.entries);
        let mut left_children = std::mem::take(&mut node.children);
        let right_entries = left_entries.split_off(mid + 1);
        let promoted = left_entries.remove(mid);
        let right_children = if left_children.is_empty() {
            Vec::new()
        } else {
            left_children.split_off(mid + 1)
        };

        let left = self
            .arena
            .alloc(Node::from_parts(left_entries, left_children, Some(root)));
        let right = self
            .arena
            .alloc(Node::from_parts(right_entries, right_children, Some(root)));
        self.arena.adopt_children(left);
        self.arena.adopt_children(right);

        let node = self.arena.get_mut(root);
        node.entries.push(promoted);
        node.children = vec![left, right];

        self.stats.root_splits += 1;
        debug!(root = %root, left = %left, right = %right, "btree.split_root");
    }
}
