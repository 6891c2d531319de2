//! Node arena - owns every node of a tree.
//!
//! Nodes refer to each other by [`NodeId`] instead of by pointer. Freed
//! slots go onto a free list and are handed out again by the next
//! allocation.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      NodeArena                       │
//! │  slots: Vec<Option<Node>>                            │
//! │   [Some(root)] [Some(n1)] [None] [Some(n3)] ...      │
//! │  free_list: Vec<NodeId>   (LIFO)                     │
//! │   [Node(2)]                                          │
//! └──────────────────────────────────────────────────────┘
//! ```

use crate::common::NodeId;

use super::node::Node;

pub(crate) struct NodeArena<K, V> {
    /// Node slots. `None` marks a released slot.
    slots: Vec<Option<Node<K, V>>>,

    /// Stack of released slot ids (LIFO).
    free_list: Vec<NodeId>,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store a node, reusing a released slot when one is available.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            debug_assert!(self.slots[id.0].is_none(), "free slot {} is occupied", id);
            self.slots[id.0] = Some(node);
            return id;
        }

        let id = NodeId::new(self.slots.len());
        self.slots.push(Some(node));
        id
    }

    /// Release a node and return its contents.
    ///
    /// # Panics
    /// Panics if `id` is not a live node.
    pub fn free(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.slots[id.0]
            .take()
            .unwrap_or_else(|| panic!("double free of {}", id));
        self.free_list.push(id);
        node
    }

    /// Borrow a live node.
    ///
    /// # Panics
    /// Panics if `id` is not a live node. Ids handed out by the tree are
    /// always live, so this indicates a bookkeeping bug.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<K, V> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id),
        }
    }

    /// Mutably borrow a live node.
    ///
    /// # Panics
    /// Same as [`NodeArena::get`].
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {}", id),
        }
    }

    /// Borrow a node if the id is live.
    pub fn try_get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Point every child of `id` back at `id`.
    pub fn adopt_children(&mut self, id: NodeId) {
        for i in 0..self.get(id).children.len() {
            let child = self.get(id).children[i];
            self.get_mut(child).parent = Some(id);
        }
    }

    /// Ids of all live nodes, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| NodeId::new(i))
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
