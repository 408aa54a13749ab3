//! Refinement driver - policy-driven conforming updates.
//!
//! One update classifies every leaf against a policy, applies merges first
//! (farther detail is shed before nearby detail is added), then splits, and
//! re-reduces the tree. Each phase works off a snapshot: decisions are made
//! against the tree as of the last reduction, and the tree is reduced again
//! between the merge and split phases so splits never target leaves a merge
//! already collapsed.
//!
//! # Scheduling Strategy
//!
//! 1. Classify all leaves (no mutation)
//! 2. Apply merges (budget-limited, diamond-gated)
//! 3. Reduce
//! 4. Apply splits (budget-limited, cascades not counted)
//! 5. Reduce

use std::collections::HashSet;

use glam::Vec2;

use crate::cbt::{Cbt, CbtNode};
use crate::leb::{node_vertices, Domain};

pub mod budget;
pub mod conforming;

// Re-exports
pub use budget::{RefinementBudget, RefinementStats};
pub use conforming::{
  diamond_parent, is_conforming, merge_conforming, split_conforming, DiamondParent,
};

/// Snapshot of one leaf handed to the policy.
#[derive(Clone, Copy, Debug)]
pub struct LeafView {
  /// The leaf's heap position.
  pub node: CbtNode,
  /// Triangle vertices in the unit domain, counter-clockwise.
  pub vertices: [Vec2; 3],
}

impl LeafView {
  /// Length of the leaf's hypotenuse (its longest edge).
  #[inline]
  pub fn hypotenuse_length(&self) -> f32 {
    (self.vertices[2] - self.vertices[0]).length()
  }

  /// Triangle centroid.
  #[inline]
  pub fn centroid(&self) -> Vec2 {
    (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
  }
}

/// What the policy wants done with a leaf.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RefineAction {
  /// Bisect this leaf (cascades as needed).
  Split,
  /// Collapse this leaf into its parent (subject to the diamond gate).
  Merge,
  /// Leave as is.
  Keep,
}

/// Per-leaf refinement decision, invoked once per leaf per update.
pub trait RefinePolicy {
  /// Decide what to do with `leaf`.
  fn classify(&self, leaf: &LeafView) -> RefineAction;
}

impl<F> RefinePolicy for F
where
  F: Fn(&LeafView) -> RefineAction,
{
  fn classify(&self, leaf: &LeafView) -> RefineAction {
    self(leaf)
  }
}

/// Distance-based LOD policy: split when a triangle looks too big from the
/// eye point, merge when it looks small enough to coarsen.
///
/// The measure is the ratio of hypotenuse length to eye distance. Merging
/// uses a fraction of the split threshold so leaves near the boundary do not
/// oscillate between updates.
#[derive(Clone, Copy, Debug)]
pub struct DistancePolicy {
  /// Eye position in the unit domain's plane.
  pub eye: Vec2,
  /// Split when `hypotenuse / distance` exceeds this.
  pub split_ratio: f32,
  /// Merge when the ratio falls below `split_ratio * merge_hysteresis`.
  /// Must be < 1.0 to leave a dead band.
  pub merge_hysteresis: f32,
}

impl Default for DistancePolicy {
  fn default() -> Self {
    Self {
      eye: Vec2::ZERO,
      split_ratio: 1.0,
      merge_hysteresis: 0.5,
    }
  }
}

impl RefinePolicy for DistancePolicy {
  fn classify(&self, leaf: &LeafView) -> RefineAction {
    debug_assert!(
      self.merge_hysteresis < 1.0,
      "merge_hysteresis {} leaves no dead band below split_ratio",
      self.merge_hysteresis
    );
    let dist = self.eye.distance(leaf.centroid()).max(1e-6);
    let ratio = leaf.hypotenuse_length() / dist;
    if ratio > self.split_ratio {
      RefineAction::Split
    } else if ratio < self.split_ratio * self.merge_hysteresis {
      RefineAction::Merge
    } else {
      RefineAction::Keep
    }
  }
}

/// Run one policy-driven update. Leaves the tree reduced and conforming.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "refine", fields(leaves = cbt.leaf_count()))
)]
pub fn refine<P: RefinePolicy>(
  cbt: &mut Cbt,
  domain: Domain,
  policy: &P,
  budget: &RefinementBudget,
) -> RefinementStats {
  let mut stats = RefinementStats::default();
  let mut to_split: Vec<CbtNode> = Vec::new();
  let mut to_merge: Vec<CbtNode> = Vec::new();

  // Phase 1: classify against the current snapshot
  {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("classify").entered();
    for node in cbt.leaves() {
      // The square root is not a triangle; it must split before the policy
      // can see anything.
      if domain == Domain::Square && node.is_root() {
        to_split.push(node);
        continue;
      }
      let view = LeafView {
        node,
        vertices: node_vertices(node.id, domain),
      };
      match policy.classify(&view) {
        RefineAction::Split => to_split.push(node),
        RefineAction::Merge => to_merge.push(node),
        RefineAction::Keep => {}
      }
    }
  }

  // Phase 2: merges first (shed load), then reduce so the split phase sees
  // which leaves survived.
  {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("apply_merges").entered();
    // Leaves from both halves of one diamond may be classified Merge;
    // process each diamond once - keyed on both halves, since the two
    // parents name the same diamond from opposite sides - so stats stay
    // honest and the budget is charged per collapse.
    let mut seen_halves: HashSet<u32> = HashSet::new();
    for node in to_merge {
      if !budget.can_merge(stats.merges_performed) {
        break;
      }
      if node.is_root() {
        continue;
      }
      let diamond = diamond_parent(node, domain);
      if seen_halves.contains(&diamond.base.id) || seen_halves.contains(&diamond.top.id) {
        continue;
      }
      seen_halves.insert(diamond.base.id);
      seen_halves.insert(diamond.top.id);
      if merge_conforming(cbt, node, domain) {
        stats.merges_performed += 1;
      } else {
        stats.merges_refused += 1;
      }
    }
  }
  cbt.sum_reduction();

  // Phase 3: splits
  {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("apply_splits").entered();
    for node in to_split {
      if !budget.can_split(stats.splits_performed) {
        break;
      }
      // Skip leaves a merge collapsed, and leaves at the depth bound.
      if !cbt.is_active_leaf(node) || node.depth() >= cbt.max_depth() {
        continue;
      }
      if split_conforming(cbt, node, domain).is_ok() {
        stats.splits_performed += 1;
      }
    }
  }
  cbt.sum_reduction();

  stats
}
