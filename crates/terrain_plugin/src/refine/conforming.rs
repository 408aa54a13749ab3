//! Conforming split and merge over heap indices.
//!
//! A split must cascade across the longest-edge neighbor chain until no
//! T-junction remains: whenever a triangle bisects its hypotenuse, the
//! triangle across that hypotenuse must bisect too, which in turn forces its
//! parent's hypotenuse, and so on toward the root. The cascade is an
//! iterative loop over heap indices - there is no object graph to walk.
//!
//! Termination: each iteration moves to the edge neighbor of a parent, which
//! strictly decreases depth, and stops at the root or at a domain boundary
//! (neighbor id 0). Re-splitting an already split node is idempotent.

use crate::cbt::{Cbt, CbtNode};
use crate::error::CbtError;
use crate::leb::{edge_neighbor, Domain};

/// Split `node` and propagate forced splits across the longest-edge
/// neighbor chain until the tree is crack-free again.
///
/// No-op when `node` is already split (counts as of the last reduction).
/// Mutates the bit-field only; run [`Cbt::sum_reduction`] after a batch.
/// Errors when `node` sits at the depth bound.
pub fn split_conforming(cbt: &mut Cbt, node: CbtNode, domain: Domain) -> Result<(), CbtError> {
  if cbt.count(node) > 1 {
    return Ok(());
  }

  cbt.split(node)?;
  let mut iter = edge_neighbor(node.id, domain);

  while iter > 1 {
    let neighbor = CbtNode::new(iter);
    cbt.split(neighbor)?;
    let parent = CbtNode::new(iter >> 1);
    cbt.split(parent)?;
    iter = edge_neighbor(parent.id, domain);
  }
  Ok(())
}

/// The pair of subtrees forming a leaf's parent diamond.
///
/// `base` is the leaf's parent; `top` is the triangle across the parent's
/// hypotenuse (or the parent itself on the domain boundary). The two halves
/// meet at the vertex the split introduced, and must collapse together.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DiamondParent {
  pub base: CbtNode,
  pub top: CbtNode,
}

/// Diamond parent of a non-root node.
pub fn diamond_parent(node: CbtNode, domain: Domain) -> DiamondParent {
  debug_assert!(!node.is_root());
  let base = CbtNode::new(node.id >> 1);
  let top_id = edge_neighbor(base.id, domain);
  let top = if top_id == 0 { base } else { CbtNode::new(top_id) };
  DiamondParent { base, top }
}

/// Merge `node` with its sibling - and the other half of the diamond - when
/// doing so cannot reintroduce a crack.
///
/// The inverse of [`split_conforming`], gated rather than cascading: the
/// merge applies only when both diamond halves hold at most two leaves each
/// (counts as of the last reduction). Returns whether a merge was applied;
/// a refusal is a normal outcome, not an error. Root merges are refused.
pub fn merge_conforming(cbt: &mut Cbt, node: CbtNode, domain: Domain) -> bool {
  if node.is_root() {
    return false;
  }

  let diamond = diamond_parent(node, domain);
  if cbt.count(diamond.base) <= 2 && cbt.count(diamond.top) <= 2 {
    cbt.merge(diamond.base);
    if diamond.top != diamond.base {
      cbt.merge(diamond.top);
    }
    true
  } else {
    false
  }
}

/// Check the crack-free invariant: no leaf's edge-neighbor region is
/// subdivided (at most one leaf lives across any hypotenuse).
///
/// Requires reduced counts. O(leaves * depth) - a validation helper for
/// tests and debug assertions, not a per-frame check.
pub fn is_conforming(cbt: &Cbt, domain: Domain) -> bool {
  cbt.leaves().iter().all(|leaf| {
    let e = edge_neighbor(leaf.id, domain);
    e == 0 || cbt.count(CbtNode::new(e)) <= 1
  })
}

#[cfg(test)]
#[path = "conforming_test.rs"]
mod conforming_test;
