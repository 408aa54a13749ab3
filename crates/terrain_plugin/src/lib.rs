//! terrain_plugin - Framework/engine independent adaptive terrain meshing
//!
//! This crate provides an adaptive planar mesh generator driven by
//! longest-edge bisection (LEB) over a compact binary tree (CBT). The tree is
//! a flat integer heap; geometry and adjacency are derived on demand from
//! node indices, so there are no pointer-based tree nodes anywhere.
//!
//! # Features
//!
//! - **Compact Binary Tree**: array-backed subdivision state with bottom-up
//!   sum-reduction and O(depth) leaf-ordinal resolution
//! - **Conforming Splits**: a single split cascades across longest-edge
//!   neighbors until the mesh is crack-free
//! - **Path-Derived Geometry**: per-node transform matrices computed from the
//!   binary path, for triangle and square root domains
//! - **Texture Backend**: a texel-per-node encoding of the same heap, updated
//!   by level-synchronous passes, with an asynchronous leaf-count readback
//!
//! # Example
//!
//! ```ignore
//! use terrain_plugin::{Cbt, Domain, MeshConfig, emit, split_conforming};
//!
//! let mut cbt = Cbt::new(6).unwrap();
//! let leaf = cbt.leaf_to_heap_index(0);
//! split_conforming(&mut cbt, leaf, Domain::Square).unwrap();
//! cbt.sum_reduction();
//!
//! let mesh = emit(&cbt, Domain::Square, &MeshConfig::default());
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod bits;
pub mod error;

pub use bits::find_msb;
pub use error::CbtError;

// Compact binary tree - subdivision state
pub mod cbt;
pub use cbt::{Cbt, CbtNode};

// Longest-edge bisection - neighbors and transforms
pub mod leb;
pub use leb::{edge_neighbor, node_vertices, same_depth_neighbors, Domain, NeighborIds};

// Conforming refinement driver
pub mod refine;
pub use refine::{
  is_conforming, merge_conforming, refine, split_conforming, DistancePolicy, LeafView,
  RefineAction, RefinePolicy, RefinementBudget, RefinementStats,
};

// Vertex/UV buffer emission
pub mod mesh;
pub use mesh::{emit, MeshConfig, MeshOutput, PlaneBounds};

// Texture-encoded CBT backend
pub mod texture;
pub use texture::{LeafCountReadback, ReadbackQueue, TextureCbt};

// Splat channel routing for the material collaborator
pub mod splat;
pub use splat::{splat_channel, splat_source, splat_texture};
