//! The [`BTreeIndex`] type: construction, introspection and validation.
//!
//! The operations themselves live next to this file:
//! - [`search`](super::search) - point lookup
//! - [`insert`](super::insert) - insertion and splitting
//! - [`delete`](super::delete) - deletion and rebalancing
//! - [`sibling`](super::sibling) - sibling lookup through the parent
//! - [`iter`](super::iter) - in-order traversal

use std::fmt::{self, Debug, Write};

use crate::common::{BTreeConfig, Error, NodeId, Result};

use super::arena::NodeArena;
use super::node::Node;
use super::stats::TreeStats;

/// An in-memory B-tree mapping ordered keys to values.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │                       BTreeIndex                          │
/// │  root: NodeId ──────┐                                     │
/// │                     ▼                                     │
/// │  ┌─────────────────────────────────────────────────────┐  │
/// │  │ arena: NodeArena   [Node0] [Node1] [Node2] ...      │  │
/// │  │  children: Vec<NodeId>  ──▶ owning edges            │  │
/// │  │  parent: Option<NodeId> ──▶ back-links              │  │
/// │  └─────────────────────────────────────────────────────┘  │
/// │  config: BTreeConfig   len: usize   stats: TreeStats      │
/// └───────────────────────────────────────────────────────────┘
/// ```
///
/// The root keeps the same [`NodeId`] for the whole life of the tree: a
/// root split moves both halves into fresh nodes and rebuilds the root in
/// place, and a root collapse pulls the only child back up into it.
///
/// # Example
/// ```
/// use btree_index::BTreeIndex;
///
/// let mut tree = BTreeIndex::new();
/// tree.insert(3, "three").unwrap();
/// tree.insert(1, "one").unwrap();
/// tree.insert(2, "two").unwrap();
///
/// assert_eq!(tree.get(&2), Some(&"two"));
/// assert!(tree.delete(&1));
/// assert!(!tree.delete(&1));
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, vec![2, 3]);
/// ```
pub struct BTreeIndex<K, V> {
    /// Owns every node of the tree.
    pub(super) arena: NodeArena<K, V>,

    /// Root node (stable across splits and collapses).
    pub(super) root: NodeId,

    /// Capacity and duplicate policy (immutable after construction).
    pub(super) config: BTreeConfig,

    /// Number of entries stored.
    pub(super) len: usize,

    /// Structural event counters.
    pub(super) stats: TreeStats,
}

impl<K, V> BTreeIndex<K, V> {
    /// Create an empty tree with the default configuration (capacity 3,
    /// overwrite on duplicate keys).
    pub fn new() -> Self {
        Self::build(BTreeConfig::default())
    }

    /// Create an empty tree with the given node capacity.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity < 3`
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(capacity))
    }

    /// Create an empty tree from a full configuration.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `config.capacity < 3`
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: BTreeConfig) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(None));

        Self {
            arena,
            root,
            config,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Size and shape
    // ========================================================================

    /// Number of entries in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels. An empty tree has height 0, a lone root leaf 1.
    pub fn height(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut height = 1;
        let mut id = self.root;
        while let Some(child) = self.arena.get(id).child(0) {
            height += 1;
            id = child;
        }
        height
    }

    /// Node capacity this tree was built with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// Structural event counters.
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Remove every entry. The configuration is kept and the stats reset.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.alloc(Node::new(None));
        self.len = 0;
        self.stats.reset();
    }

    // ========================================================================
    // Public API: Node introspection (diagnostics and tests)
    // ========================================================================

    /// Id of the root node.
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Borrow a node by id, or `None` if the slot is not live.
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.arena.try_get(id)
    }

    /// Ids of every live node, in allocation-slot order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.ids()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }
}

impl<K: Ord, V> BTreeIndex<K, V> {
    // ========================================================================
    // Public API: Validation
    // ========================================================================

    /// Check every structural invariant of the tree.
    ///
    /// - every non-root node holds `min_keys..=max_keys` keys
    /// - keys increase strictly and sit between their separators
    /// - internal nodes have one more child than keys
    /// - each child's parent link names the node holding it
    /// - all leaves are at the same depth
    /// - `len()` matches the entry count and every live node is reachable
    ///
    /// # Errors
    /// - `Error::InvariantViolation` naming the first offending node
    pub fn validate(&self) -> Result<()> {
        let root = self.arena.get(self.root);
        if root.parent.is_some() {
            return Err(Error::invariant(self.root, "root has a parent link"));
        }

        let mut walk = Walk {
            leaf_depth: None,
            entries: 0,
            nodes: 0,
        };
        self.validate_node(self.root, None, None, 0, &mut walk)?;

        if walk.entries != self.len {
            return Err(Error::invariant(
                self.root,
                format!("len is {} but tree holds {} entries", self.len, walk.entries),
            ));
        }
        if walk.nodes != self.arena.live_count() {
            return Err(Error::invariant(
                self.root,
                format!(
                    "{} live nodes but only {} reachable",
                    self.arena.live_count(),
                    walk.nodes
                ),
            ));
        }
        Ok(())
    }

    fn validate_node<'a>(
        &'a self,
        id: NodeId,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.arena.get(id);
        walk.nodes += 1;
        walk.entries += node.len();

        if node.len() > self.config.max_keys() {
            return Err(Error::invariant(
                id,
                format!("{} keys exceeds maximum {}", node.len(), self.config.max_keys()),
            ));
        }
        if !node.is_root() && node.len() < self.config.min_keys() {
            return Err(Error::invariant(
                id,
                format!("{} keys below minimum {}", node.len(), self.config.min_keys()),
            ));
        }
        if node.is_root() && id != self.root {
            return Err(Error::invariant(id, "non-root node without parent link"));
        }

        for pair in node.entries.windows(2) {
            if pair[0].key >= pair[1].key {
                return Err(Error::invariant(id, "keys not strictly increasing"));
            }
        }
        if let (Some(lower), Some(first)) = (lower, node.entries.first()) {
            if first.key <= *lower {
                return Err(Error::invariant(id, "key not above left separator"));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.entries.last()) {
            if last.key >= *upper {
                return Err(Error::invariant(id, "key not below right separator"));
            }
        }

        if node.is_leaf() {
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::invariant(
                        id,
                        format!("leaf at depth {} but others at {}", depth, expected),
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.is_empty() {
            return Err(Error::invariant(id, "internal node without keys"));
        }
        if node.children.len() != node.len() + 1 {
            return Err(Error::invariant(
                id,
                format!("{} keys but {} children", node.len(), node.children.len()),
            ));
        }

        for (i, &child) in node.children.iter().enumerate() {
            if self.arena.get(child).parent != Some(id) {
                return Err(Error::invariant(child, format!("parent link does not name {}", id)));
            }
            let lo = if i == 0 { lower } else { Some(&node.entries[i - 1].key) };
            let hi = node.entries.get(i).map(|e| &e.key).or(upper);
            self.validate_node(child, lo, hi, depth + 1, walk)?;
        }
        Ok(())
    }
}

struct Walk {
    leaf_depth: Option<usize>,
    entries: usize,
    nodes: usize,
}

impl<K: Debug, V> BTreeIndex<K, V> {
    /// Render the tree depth-first, one node per line, indented by depth.
    ///
    /// ```text
    /// Node(0) root [4]
    ///   Node(3) [2]
    ///     Node(1) [1]
    ///     Node(2) [3]
    ///   Node(4) [6]
    ///     ...
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.arena.get(id);
        let keys: Vec<&K> = node.keys().collect();
        let role = if id == self.root { " root" } else { "" };
        // writing into a String cannot fail
        let _ = writeln!(out, "{:indent$}{}{} {:?}", "", id, role, keys, indent = depth * 2);
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}

impl<K, V> Default for BTreeIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for BTreeIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
