//! Cbt - the flat heap: reduction, split/merge, leaf enumeration.
//!
//! # Bit-field invariant
//!
//! Every active leaf owns exactly one set bit, located at the slot of its
//! leftmost depth-D descendant. Splitting a node activates the slot of its
//! right child (the left child inherits the parent's slot); merging clears
//! the right child's slot again. Reduced counts are only valid directly
//! after [`Cbt::sum_reduction`] - split/merge mutate the bit-field alone.

use crate::error::CbtError;

use super::CbtNode;

/// Array-backed compact binary tree with a fixed depth bound.
#[derive(Debug)]
pub struct Cbt {
  /// `heap[0]` = max depth; `heap[1..2^(D+1))` = per-node counts / bit-field.
  heap: Vec<u32>,
  max_depth: u32,
}

impl Cbt {
  /// Largest supported depth bound. The heap for depth 24 is already
  /// 2^25 slots; deeper planar patches have no realized use.
  pub const MAX_SUPPORTED_DEPTH: u32 = 24;

  /// Allocate a tree with depth bound `max_depth` and a single active leaf
  /// (the root), reduced and ready for queries.
  pub fn new(max_depth: u32) -> Result<Self, CbtError> {
    if max_depth > Self::MAX_SUPPORTED_DEPTH {
      return Err(CbtError::DepthOutOfRange {
        requested: max_depth,
        maximum: Self::MAX_SUPPORTED_DEPTH,
      });
    }

    let mut heap = vec![0u32; 1usize << (max_depth + 1)];
    heap[0] = max_depth;

    let mut cbt = Self { heap, max_depth };

    // Root leaf occupies the leftmost bit-field slot.
    let slot = cbt.ceil_slot(CbtNode::root());
    cbt.heap[slot] = 1;
    cbt.sum_reduction();

    Ok(cbt)
  }

  /// Depth bound of this tree.
  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  /// Number of active leaves (root's reduced count).
  #[inline]
  pub fn leaf_count(&self) -> u32 {
    self.heap[1]
  }

  /// Reduced count of the given node's subtree.
  #[inline]
  pub fn count(&self, node: CbtNode) -> u32 {
    self.heap[node.id as usize]
  }

  /// Bit-field slot of the node's leftmost depth-D descendant.
  #[inline]
  fn ceil_slot(&self, node: CbtNode) -> usize {
    (node.id << (self.max_depth - node.depth())) as usize
  }

  /// Rebuild every internal count bottom-up.
  ///
  /// Deterministic, O(2^D). Must be re-run after any batch of split/merge
  /// mutations before counts are consulted.
  pub fn sum_reduction(&mut self) {
    for d in (0..self.max_depth).rev() {
      for k in (1usize << d)..(1usize << (d + 1)) {
        self.heap[k] = self.heap[k << 1] + self.heap[k << 1 | 1];
      }
    }
  }

  /// Activate the right child of `node` in the bit-field.
  ///
  /// Does not preserve conformance and does not update reduced counts; use
  /// [`split_conforming`](crate::refine::split_conforming) followed by
  /// [`Cbt::sum_reduction`] for a crack-free update. Idempotent on already
  /// split nodes.
  pub fn split(&mut self, node: CbtNode) -> Result<(), CbtError> {
    let right = node
      .right_child(self.max_depth)
      .ok_or(CbtError::MaxDepthExceeded {
        node: node.id,
        max_depth: self.max_depth,
      })?;
    let slot = self.ceil_slot(right);
    self.heap[slot] = 1;
    Ok(())
  }

  /// Collapse `parent`'s two children back into a single leaf.
  ///
  /// Defined only when both children are leaves: the right child's single
  /// bit sits at its leftmost slot and is cleared; the left child's bit is
  /// the parent's own slot and survives as the parent's leaf bit.
  pub fn merge(&mut self, parent: CbtNode) {
    debug_assert!(
      parent.depth() < self.max_depth,
      "node {} has no children to merge",
      parent.id
    );
    let right = CbtNode::new(parent.id << 1 | 1);
    let slot = self.ceil_slot(right);
    self.heap[slot] = 0;
  }

  /// True when `node` is a currently realized leaf: its subtree holds one
  /// leaf and its parent's holds more (counts as of the last reduction).
  #[inline]
  pub fn is_active_leaf(&self, node: CbtNode) -> bool {
    self.heap[node.id as usize] == 1
      && (node.is_root() || self.heap[(node.id >> 1) as usize] > 1)
  }

  /// Resolve leaf ordinal `l` to its heap index.
  ///
  /// Count-guided descent: go left while the ordinal fits in the left
  /// subtree, otherwise subtract and go right. O(depth).
  pub fn leaf_to_heap_index(&self, l: u32) -> CbtNode {
    debug_assert!(l < self.leaf_count(), "leaf ordinal {} out of range", l);
    let mut l = l;
    let mut k = 1u32;
    while self.heap[k as usize] > 1 {
      let left = self.heap[(k << 1) as usize];
      if l < left {
        k <<= 1;
      } else {
        l -= left;
        k = k << 1 | 1;
      }
    }
    CbtNode::new(k)
  }

  /// All active leaves in depth-first, left-to-right order.
  ///
  /// The order is the vertex buffer contract: stable across repeated calls
  /// on an unmodified tree, and position `l` equals `leaf_to_heap_index(l)`.
  pub fn leaves(&self) -> Vec<CbtNode> {
    let mut out = Vec::with_capacity(self.leaf_count() as usize);
    let mut stack = vec![1u32];
    while let Some(k) = stack.pop() {
      match self.heap[k as usize] {
        0 => {}
        1 => out.push(CbtNode::new(k)),
        _ => {
          // Right pushed first so the left subtree is emitted first.
          stack.push(k << 1 | 1);
          stack.push(k << 1);
        }
      }
    }
    out
  }
}

#[cfg(test)]
#[path = "heap_test.rs"]
mod heap_test;
