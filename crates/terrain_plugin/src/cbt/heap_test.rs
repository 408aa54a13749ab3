use super::*;

/// Freshly constructed tree: single root leaf, reduced.
#[test]
fn test_new_tree_has_single_root_leaf() {
  let cbt = Cbt::new(3).unwrap();
  assert_eq!(cbt.max_depth(), 3);
  assert_eq!(cbt.leaf_count(), 1);
  assert!(cbt.is_active_leaf(CbtNode::root()));
  assert_eq!(cbt.leaves(), vec![CbtNode::root()]);
}

#[test]
fn test_depth_zero_tree() {
  let cbt = Cbt::new(0).unwrap();
  assert_eq!(cbt.leaf_count(), 1);
  assert_eq!(cbt.leaf_to_heap_index(0), CbtNode::root());
}

#[test]
fn test_depth_out_of_range() {
  let err = Cbt::new(Cbt::MAX_SUPPORTED_DEPTH + 1).unwrap_err();
  assert_eq!(
    err,
    CbtError::DepthOutOfRange {
      requested: Cbt::MAX_SUPPORTED_DEPTH + 1,
      maximum: Cbt::MAX_SUPPORTED_DEPTH,
    }
  );
}

/// Scenario: depth 3, split only the root. Two leaves at depth 1.
#[test]
fn test_split_root() {
  let mut cbt = Cbt::new(3).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.sum_reduction();

  assert_eq!(cbt.leaf_count(), 2);
  let leaves = cbt.leaves();
  assert_eq!(leaves, vec![CbtNode::new(2), CbtNode::new(3)]);
  assert!(leaves.iter().all(|n| n.depth() == 1));
}

#[test]
fn test_split_at_max_depth_fails() {
  let mut cbt = Cbt::new(2).unwrap();
  let deep = CbtNode::new(4); // depth 2 == max_depth
  assert_eq!(
    cbt.split(deep),
    Err(CbtError::MaxDepthExceeded {
      node: 4,
      max_depth: 2
    })
  );
}

#[test]
fn test_split_is_idempotent() {
  let mut cbt = Cbt::new(3).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.sum_reduction();
  assert_eq!(cbt.leaf_count(), 2);
}

/// After reduction every internal count equals the sum of its children, and
/// the root count equals the leaf count.
#[test]
fn test_reduction_invariant() {
  let mut cbt = Cbt::new(4).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.split(CbtNode::new(2)).unwrap();
  cbt.split(CbtNode::new(5)).unwrap();
  cbt.sum_reduction();

  for d in 0..cbt.max_depth() {
    for k in (1u32 << d)..(1u32 << (d + 1)) {
      let node = CbtNode::new(k);
      let sum = cbt.count(CbtNode::new(k << 1)) + cbt.count(CbtNode::new(k << 1 | 1));
      assert_eq!(cbt.count(node), sum, "reduction broken at node {}", k);
    }
  }
  assert_eq!(cbt.count(CbtNode::root()), cbt.leaf_count());
}

/// leaves() and leaf_to_heap_index agree on ordering.
#[test]
fn test_leaf_ordinal_round_trip() {
  let mut cbt = Cbt::new(4).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.split(CbtNode::new(3)).unwrap();
  cbt.split(CbtNode::new(6)).unwrap();
  cbt.sum_reduction();

  let leaves = cbt.leaves();
  assert_eq!(leaves.len(), cbt.leaf_count() as usize);
  for (l, leaf) in leaves.iter().enumerate() {
    assert_eq!(
      cbt.leaf_to_heap_index(l as u32),
      *leaf,
      "ordinal {} resolves to a different node",
      l
    );
  }
}

/// Every enumerated leaf is a true leaf.
#[test]
fn test_leaves_are_active() {
  let mut cbt = Cbt::new(5).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.split(CbtNode::new(2)).unwrap();
  cbt.sum_reduction();

  for leaf in cbt.leaves() {
    assert!(cbt.is_active_leaf(leaf), "node {} is not a leaf", leaf.id);
  }
}

/// Merge undoes a split.
#[test]
fn test_merge_restores_single_leaf() {
  let mut cbt = Cbt::new(3).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.sum_reduction();
  assert_eq!(cbt.leaf_count(), 2);

  cbt.merge(CbtNode::root());
  cbt.sum_reduction();
  assert_eq!(cbt.leaf_count(), 1);
  assert!(cbt.is_active_leaf(CbtNode::root()));
}

/// Leaf areas always tile the root domain: sum of 2^-depth over all leaves
/// is exactly 1, regardless of the split sequence.
#[test]
fn test_leaves_tile_domain() {
  let mut cbt = Cbt::new(6).unwrap();
  cbt.split(CbtNode::root()).unwrap();
  cbt.split(CbtNode::new(2)).unwrap();
  cbt.split(CbtNode::new(4)).unwrap();
  cbt.split(CbtNode::new(9)).unwrap();
  cbt.sum_reduction();

  let total: f64 = cbt
    .leaves()
    .iter()
    .map(|n| 0.5f64.powi(n.depth() as i32))
    .sum();
  assert!((total - 1.0).abs() < 1e-12, "leaves do not tile: {}", total);
}
