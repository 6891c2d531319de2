//! Point lookup.
//!
//! Search walks down from the root, scanning each node's keys in order:
//! an equal key stops the walk, a smaller key sends it into the child left
//! of that key, and a key above all of them follows the trailing child.
//! Running out of children means the key is absent.

use std::borrow::Borrow;

use crate::common::NodeId;

use super::tree::BTreeIndex;

impl<K: Ord, V> BTreeIndex<K, V> {
    /// Find the node and slot holding `key`.
    ///
    /// Returns `None` if the key is not in the tree. Has no side effects.
    pub fn locate<Q>(&self, key: &Q) -> Option<(NodeId, usize)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut id = self.root;
        loop {
            let node = self.arena.get(id);
            match node.search(key) {
                Ok(idx) => return Some((id, idx)),
                Err(idx) => id = node.child(idx)?,
            }
        }
    }

    /// Get the value stored under `key`.
    ///
    /// # Example
    /// ```
    /// use btree_index::BTreeIndex;
    ///
    /// let mut tree = BTreeIndex::new();
    /// tree.insert("k", 7).unwrap();
    /// assert_eq!(tree.get("k"), Some(&7));
    /// assert_eq!(tree.get("missing"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, idx) = self.locate(key)?;
        Some(&self.arena.get(id).entries[idx].value)
    }

    /// Alias for [`BTreeIndex::get`].
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key)
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, idx) = self.locate(key)?;
        Some(&mut self.arena.get_mut(id).entries[idx].value)
    }

    /// Get the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, idx) = self.locate(key)?;
        let entry = &self.arena.get(id).entries[idx];
        Some((&entry.key, &entry.value))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }
}
