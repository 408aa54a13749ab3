//! Same-depth neighbor resolution via the split-rule fold.
//!
//! For a node at depth d, the tuple of same-depth neighbor ids
//! `(left, right, edge, node)` is computed by starting from the root tuple
//! and applying one of two transition rules per path bit:
//!
//! ```text
//! split left (bit 0):          split right (bit 1):
//!   left  = 2*node + 1           left  = 2*edge
//!   right = 2*edge + 1           right = 2*node
//!   edge  = 2*right + 1          edge  = 2*left
//!   node  = 2*node               node  = 2*node + 1
//! ```
//!
//! An id of 0 means "no neighbor" (domain boundary); the `+1` offsets are
//! suppressed for absent inputs so 0 stays 0 through the fold. `edge` is the
//! node across the hypotenuse - the one that must also split to keep the
//! mesh crack-free.

use crate::bits::{bit, find_msb};

use super::Domain;

/// Same-depth neighborhood of a node. Computed on demand, never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NeighborIds {
  /// Neighbor across one leg (an edge touching the apex). 0 when absent.
  pub left: u32,
  /// Neighbor across the other leg. 0 when absent.
  pub right: u32,
  /// Neighbor across the hypotenuse. 0 when absent.
  pub edge: u32,
  /// The node itself.
  pub node: u32,
}

/// One step of the fold: push the neighborhood one level down.
#[inline]
fn split_ids(ids: NeighborIds, split_bit: u32) -> NeighborIds {
  let NeighborIds {
    left,
    right,
    edge,
    node,
  } = ids;
  // Keep absent neighbors absent: 0 doubles to 0, never to 1.
  let b_right = u32::from(right != 0);
  let b_edge = u32::from(edge != 0);

  if split_bit == 0 {
    NeighborIds {
      left: node << 1 | 1,
      right: edge << 1 | b_edge,
      edge: right << 1 | b_right,
      node: node << 1,
    }
  } else {
    NeighborIds {
      left: edge << 1,
      right: node << 1,
      edge: left << 1,
      node: node << 1 | 1,
    }
  }
}

/// Neighborhood of heap index `k` at its own depth.
///
/// For the square domain the first path bit selects the half-triangle and
/// seeds the tuple so the two halves are each other's edge neighbor; the
/// remaining bits fold exactly as in the triangle domain.
pub fn same_depth_neighbors(k: u32, domain: Domain) -> NeighborIds {
  debug_assert!(k != 0, "0 is not a node index");
  let depth = find_msb(k);

  let (mut ids, folded_bits) = match domain {
    Domain::Triangle => (
      NeighborIds {
        left: 0,
        right: 0,
        edge: 0,
        node: 1,
      },
      depth,
    ),
    Domain::Square => {
      if depth == 0 {
        // The root square has no neighbors.
        return NeighborIds {
          left: 0,
          right: 0,
          edge: 0,
          node: 1,
        };
      }
      let b = bit(k, depth - 1);
      (
        NeighborIds {
          left: 0,
          right: 0,
          edge: 3 - b,
          node: 2 + b,
        },
        depth - 1,
      )
    }
  };

  for i in (0..folded_bits).rev() {
    ids = split_ids(ids, bit(k, i));
  }
  ids
}

/// The node sharing `k`'s hypotenuse, or 0 at the domain boundary.
#[inline]
pub fn edge_neighbor(k: u32, domain: Domain) -> u32 {
  same_depth_neighbors(k, domain).edge
}

#[cfg(test)]
#[path = "neighbors_test.rs"]
mod neighbors_test;
