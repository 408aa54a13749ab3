//! CbtNode - immutable value type representing a position in the heap.
//!
//! Nodes are identified by their 1-based heap index. The index's binary
//! digits after the implicit leading 1 are the child-selection path from the
//! root, so depth is just the MSB position.

use crate::bits::{bit, find_msb};

/// Heap position - immutable value type.
///
/// Carries no tree state; whether the node is an active leaf is a property
/// of the [`Cbt`](super::Cbt) it is resolved against.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CbtNode {
  /// 1-based heap index. Never 0.
  pub id: u32,
}

impl CbtNode {
  /// Create a node from a raw heap index.
  #[inline]
  pub fn new(id: u32) -> Self {
    debug_assert!(id != 0, "heap index 0 is not a node");
    Self { id }
  }

  /// The root node (heap index 1).
  #[inline]
  pub fn root() -> Self {
    Self { id: 1 }
  }

  /// Depth of this node (root = 0).
  #[inline]
  pub fn depth(&self) -> u32 {
    find_msb(self.id)
  }

  /// True for the root node.
  #[inline]
  pub fn is_root(&self) -> bool {
    self.id == 1
  }

  /// Left child (deeper: depth + 1).
  ///
  /// Returns None when already at `max_depth`.
  #[inline]
  pub fn left_child(&self, max_depth: u32) -> Option<Self> {
    (self.depth() < max_depth).then(|| Self { id: self.id << 1 })
  }

  /// Right child (deeper: depth + 1).
  ///
  /// Returns None when already at `max_depth`.
  #[inline]
  pub fn right_child(&self, max_depth: u32) -> Option<Self> {
    (self.depth() < max_depth).then(|| Self {
      id: self.id << 1 | 1,
    })
  }

  /// Parent node (coarser: depth - 1). Returns None for the root.
  #[inline]
  pub fn parent(&self) -> Option<Self> {
    (!self.is_root()).then(|| Self { id: self.id >> 1 })
  }

  /// The other child of this node's parent. Returns None for the root.
  #[inline]
  pub fn sibling(&self) -> Option<Self> {
    (!self.is_root()).then(|| Self { id: self.id ^ 1 })
  }

  /// Child-selection bit at the given step of the path (0 = first step
  /// below the root).
  #[inline]
  pub fn path_bit(&self, step: u32) -> u32 {
    debug_assert!(step < self.depth());
    bit(self.id, self.depth() - 1 - step)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
