//! B-tree scenario tests.
//!
//! Each test builds a tree from a fixed insertion order, checks its shape
//! level by level, deletes a key and checks the shape again.
//! All trees use the default capacity of 3 (a node splits at 3 keys).

use btree_index::{BTreeConfig, BTreeIndex, DuplicatePolicy, Error, NodeId};

/// Keys of every node, grouped by level, left to right.
fn levels(tree: &BTreeIndex<i32, i32>) -> Vec<Vec<Vec<i32>>> {
    let mut out = Vec::new();
    let mut frontier: Vec<NodeId> = vec![tree.root_id()];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        let mut level = Vec::new();
        for id in frontier {
            let node = tree.node(id).unwrap();
            level.push(node.keys().copied().collect());
            next.extend_from_slice(node.children());
        }
        out.push(level);
        frontier = next;
    }
    out
}

fn build(keys: &[i32]) -> BTreeIndex<i32, i32> {
    let mut tree = BTreeIndex::new();
    for &k in keys {
        tree.insert(k, k * 100).unwrap();
    }
    for &k in keys {
        assert_eq!(tree.get(&k), Some(&(k * 100)), "key {} missing after build", k);
    }
    tree.validate().unwrap();
    tree
}

fn assert_contains_exactly(tree: &BTreeIndex<i32, i32>, expected: &[i32]) {
    let keys: Vec<i32> = tree.keys().copied().collect();
    assert_eq!(keys, expected);
    for &k in expected {
        assert_eq!(tree.get(&k), Some(&(k * 100)));
    }
    assert_eq!(tree.len(), expected.len());
}

// ============================================================================
// Insertion
// ============================================================================

/// Inserting 1..=50 in order splits leaves, internal nodes and the root
/// repeatedly; every key stays reachable.
#[test]
fn test_insert_balance_split_cascade() {
    let keys: Vec<i32> = (1..=50).collect();
    let tree = build(&keys);

    assert_eq!(tree.len(), 50);
    // a 2-3 tree of height h holds between 2^h - 1 and 3^h - 1 keys
    assert!(tree.height() >= 4, "height {}", tree.height());
    assert!(tree.height() <= 6, "height {}", tree.height());
    assert!(tree.stats().root_splits as usize == tree.height() - 1);

    assert_eq!(tree.get(&0), None);
    assert_eq!(tree.get(&51), None);
}

#[test]
fn test_build_matches_reference_shape() {
    let tree = build(&[1, 2, 3, 4, 5, 8, 9, 6]);
    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![8]],
            vec![vec![1], vec![3], vec![5, 6], vec![9]],
        ]
    );
}

// ============================================================================
// Leaf delete without underflow
// ============================================================================

///     |2|             |2|
///    /   \      =>   /   \
///   |1|  |3|4|      |1|  |4|
#[test]
fn test_delete_leaf_first_simple() {
    let mut tree = build(&[1, 2, 3, 4]);
    assert_eq!(levels(&tree), vec![vec![vec![2]], vec![vec![1], vec![3, 4]]]);

    assert!(tree.delete(&3));

    assert_eq!(levels(&tree), vec![vec![vec![2]], vec![vec![1], vec![4]]]);
    assert_eq!(tree.get(&3), None);
    assert_contains_exactly(&tree, &[1, 2, 4]);
}

///     |2|             |2|
///    /   \      =>   /   \
///   |1|  |3|4|      |1|  |3|
#[test]
fn test_delete_leaf_end_simple() {
    let mut tree = build(&[1, 2, 3, 4]);
    assert!(tree.delete(&4));

    assert_eq!(levels(&tree), vec![vec![vec![2]], vec![vec![1], vec![3]]]);
    assert_contains_exactly(&tree, &[1, 2, 3]);
}

// ============================================================================
// Leaf delete with rotation
// ============================================================================

///      |4|                    |4|
///    /     \                /     \
///   |2|    |6|      =>     |2|    |7|
///  /  \   /   \           /  \   /   \
/// |1| |3| |5| |7|8|      |1| |3| |6| |8|
#[test]
fn test_delete_rotates_left_from_right_sibling() {
    let mut tree = build(&[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![6]],
            vec![vec![1], vec![3], vec![5], vec![7, 8]],
        ]
    );

    assert!(tree.delete(&5));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![7]],
            vec![vec![1], vec![3], vec![6], vec![8]],
        ]
    );
    assert_eq!(tree.stats().rotations_left, 1);
    assert_eq!(tree.stats().rotations_right, 0);
    assert_eq!(tree.stats().merges, 0);
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 6, 7, 8]);
    tree.validate().unwrap();
}

///      |4|                   |4|
///    /      \              /      \
///   |2|     |8|     =>    |2|     |6|
///  /  \    /    \        /  \    /   \
/// |1| |3| |5|6| |9|     |1| |3| |5| |8|
#[test]
fn test_delete_rotates_right_from_left_sibling() {
    let mut tree = build(&[1, 2, 3, 4, 5, 8, 9, 6]);
    assert!(tree.delete(&9));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![6]],
            vec![vec![1], vec![3], vec![5], vec![8]],
        ]
    );
    assert_eq!(tree.stats().rotations_right, 1);
    assert_eq!(tree.stats().rotations_left, 0);
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 5, 6, 8]);
    tree.validate().unwrap();
}

///      |4|                        |4|
///    /      \                   /      \
///   |2|     |6|9|        =>    |2|     |6|8|
///  /  \    /  \     \         /  \    /   \   \
/// |1| |3| |5| |7|8| |10|     |1| |3| |5|  |7| |9|
#[test]
fn test_delete_rotates_right_under_full_parent() {
    let mut tree = build(&[1, 2, 3, 4, 5, 6, 7, 10, 9, 8]);
    assert!(tree.delete(&10));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![6, 8]],
            vec![vec![1], vec![3], vec![5], vec![7], vec![9]],
        ]
    );
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

///      |4|                           |4|
///    /      \                      /      \
///   |2|     |15|25|         =>    |2|     |14|25|
///  /  \    /      \    \         /  \    /   \    \
/// |1| |3| |10|14| |20| |30|     |1| |3| |10| |15| |30|
#[test]
fn test_delete_middle_child_rotates_right() {
    let mut tree = build(&[1, 2, 3, 4, 10, 15, 20, 25, 30, 14]);
    assert!(tree.delete(&20));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![14, 25]],
            vec![vec![1], vec![3], vec![10], vec![15], vec![30]],
        ]
    );
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 10, 14, 15, 25, 30]);
}

/// Both siblings have a spare key; the left one is used.
#[test]
fn test_delete_middle_child_prefers_left_sibling() {
    let mut tree = build(&[1, 2, 3, 4, 10, 15, 20, 25, 30, 14, 31]);
    assert!(tree.delete(&20));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![14, 25]],
            vec![vec![1], vec![3], vec![10], vec![15], vec![30, 31]],
        ]
    );
    assert_eq!(tree.stats().rotations_right, 1);
    assert_eq!(tree.stats().rotations_left, 0);
}

// ============================================================================
// Leaf delete with merge
// ============================================================================

///      |4|                       |4|
///   /       \                 /      \
///  |2|      |6|8|      =>    |2|     |6|
///  /  \    /  \  \          /  \    /   \
/// |1| |3| |5| |7| |9|      |1| |3| |5| |7|8|
#[test]
fn test_delete_merges_when_siblings_are_minimal() {
    let mut tree = build(&(1..=9).collect::<Vec<_>>());
    let nodes = tree.node_count();
    assert!(tree.delete(&9));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![6]],
            vec![vec![1], vec![3], vec![5], vec![7, 8]],
        ]
    );
    assert_eq!(tree.stats().merges, 1);
    assert_eq!(tree.node_count(), nodes - 1);
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 5, 6, 7, 8]);
}

/// A merge drains the parent, which merges in turn and empties the root.
#[test]
fn test_delete_merge_cascade_shrinks_tree() {
    let mut tree = build(&(1..=7).collect::<Vec<_>>());
    let root = tree.root_id();
    assert_eq!(tree.height(), 3);

    assert!(tree.delete(&7));

    assert_eq!(tree.root_id(), root);
    assert_eq!(tree.height(), 2);
    assert_eq!(
        levels(&tree),
        vec![vec![vec![2, 4]], vec![vec![1], vec![3], vec![5, 6]]]
    );
    assert_eq!(tree.stats().root_collapses, 1);
    tree.validate().unwrap();
}

// ============================================================================
// Internal delete
// ============================================================================

#[test]
fn test_delete_internal_key() {
    let mut tree = build(&[1, 2, 3, 4, 5, 8, 9, 6]);

    // 8 sits in an internal node; its predecessor 6 takes its place
    assert_eq!(tree.remove(&8), Some(800));

    assert_eq!(
        levels(&tree),
        vec![
            vec![vec![4]],
            vec![vec![2], vec![6]],
            vec![vec![1], vec![3], vec![5], vec![9]],
        ]
    );
    assert_contains_exactly(&tree, &[1, 2, 3, 4, 5, 6, 9]);
    tree.validate().unwrap();
}

#[test]
fn test_delete_root_key() {
    let mut tree = build(&(1..=8).collect::<Vec<_>>());
    assert!(tree.delete(&4));

    assert_contains_exactly(&tree, &[1, 2, 3, 5, 6, 7, 8]);
    tree.validate().unwrap();
}

// ============================================================================
// Absent keys and duplicates
// ============================================================================

#[test]
fn test_delete_absent_key_is_idempotent() {
    let mut tree = build(&[10, 20, 30, 40, 50]);
    let shape = levels(&tree);

    for _ in 0..5 {
        assert!(!tree.delete(&25));
        assert!(!tree.delete(&0));
        assert!(!tree.delete(&99));
    }

    assert_eq!(levels(&tree), shape);
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_delete_then_reinsert() {
    let mut tree = build(&(1..=20).collect::<Vec<_>>());
    for k in (1..=20).filter(|k| k % 3 == 0) {
        assert!(tree.delete(&k));
    }
    for k in (1..=20).filter(|k| k % 3 == 0) {
        assert_eq!(tree.insert(k, k * 100).unwrap(), None);
    }

    assert_contains_exactly(&tree, &(1..=20).collect::<Vec<_>>());
    tree.validate().unwrap();
}

#[test]
fn test_duplicate_policies() {
    let mut overwrite = build(&[1, 2, 3]);
    assert_eq!(overwrite.insert(2, 7).unwrap(), Some(200));
    assert_eq!(overwrite.get(&2), Some(&7));
    assert_eq!(overwrite.len(), 3);

    let config = BTreeConfig::default().with_duplicates(DuplicatePolicy::Reject);
    let mut reject = BTreeIndex::with_config(config).unwrap();
    for k in 1..=3 {
        reject.insert(k, k * 100).unwrap();
    }
    assert_eq!(reject.insert(2, 7), Err(Error::DuplicateKey));
    assert_eq!(reject.get(&2), Some(&200));
    assert_eq!(reject.len(), 3);
}

#[test]
fn test_invalid_capacity() {
    for capacity in 0..3 {
        let err = BTreeIndex::<i32, i32>::with_capacity(capacity).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCapacity {
                capacity,
                minimum: 3
            }
        );
    }
}

// ============================================================================
// Generic keys
// ============================================================================

#[test]
fn test_string_keys() {
    let mut tree = BTreeIndex::with_capacity(4).unwrap();
    let words = ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date", "grape"];
    for (i, w) in words.iter().enumerate() {
        tree.insert(w.to_string(), i).unwrap();
    }

    assert_eq!(tree.get("kiwi"), Some(&3));
    assert!(tree.delete("apple"));
    assert!(!tree.contains_key("apple"));

    let keys: Vec<&str> = tree.keys().map(|s| s.as_str()).collect();
    assert_eq!(
        keys,
        vec!["banana", "cherry", "date", "fig", "grape", "kiwi", "pear"]
    );
    tree.validate().unwrap();
}
