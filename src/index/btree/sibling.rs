//! Sibling locator.
//!
//! Siblings are found through the parent's child array: locate this node's
//! slot, then step one to the left or right. The root has no siblings.

use crate::common::NodeId;

use super::tree::BTreeIndex;

impl<K, V> BTreeIndex<K, V> {
    /// Position of `child` within `parent`'s child array.
    ///
    /// # Panics
    /// Panics if `parent` does not hold `child`, which means the parent
    /// link and the child array disagree.
    pub(super) fn child_position(&self, parent: NodeId, child: NodeId) -> usize {
        match self.arena.get(parent).position_of(child) {
            Some(pos) => pos,
            None => panic!("{} is not a child of {}", child, parent),
        }
    }

    /// The node immediately left of `id` under the same parent.
    pub fn left_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.arena.get(id).parent?;
        let pos = self.child_position(parent, id);
        if pos == 0 {
            return None;
        }
        self.arena.get(parent).child(pos - 1)
    }

    /// The node immediately right of `id` under the same parent.
    pub fn right_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.arena.get(id).parent?;
        let pos = self.child_position(parent, id);
        self.arena.get(parent).child(pos + 1)
    }
}
