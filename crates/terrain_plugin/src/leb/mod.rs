//! Longest-edge bisection (LEB) - adjacency and geometry from node paths.
//!
//! Nothing here touches tree state. Both the three geometric neighbors of a
//! node and its triangle's vertices are pure functions of the heap index,
//! derived by folding fixed per-bit rules over the node's path. This is what
//! lets the tree stay a flat integer array: adjacency is never stored.
//!
//! # Module Structure
//!
//! - [`neighbors`]: same-depth neighbor tuple via the split-rule fold
//! - [`matrices`]: per-node transform matrices and vertex evaluation

pub mod matrices;
pub mod neighbors;

// Re-exports
pub use matrices::{node_vertices, splitting_matrix, winding_matrix};
pub use neighbors::{edge_neighbor, same_depth_neighbors, NeighborIds};

/// Root domain of the subdivision.
///
/// The square domain bisects the unit square into two half-triangles along
/// the main diagonal at depth 1; the triangle domain's root is a single unit
/// right triangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Domain {
  /// Unit right triangle: (0,1), (0,0), (1,0), hypotenuse on the diagonal.
  Triangle,
  /// Unit square split along the (0,0)-(1,1) diagonal.
  Square,
}
