//! Vertex/UV buffer emission from the leaf enumeration.
//!
//! Every leaf contributes one triangle: three vertices, non-indexed, in leaf
//! order. The order is the contract with the rendering collaborator - the
//! buffer layout is exactly `leaves()` - so it is stable across repeated
//! calls on an unmodified tree. Positions are object-space plane coordinates
//! (z = 0); height displacement and axis mapping belong to the consumer.

use glam::Vec2;
use rayon::prelude::*;

use crate::cbt::Cbt;
use crate::leb::{node_vertices, Domain};

/// Axis-aligned bounds of the emitted plane geometry.
#[derive(Clone, Copy, Debug)]
pub struct PlaneBounds {
  pub min: Vec2,
  pub max: Vec2,
}

impl PlaneBounds {
  /// Bounds with inverted extents, ready for encapsulation.
  pub fn empty() -> Self {
    Self {
      min: Vec2::splat(f32::INFINITY),
      max: Vec2::splat(f32::NEG_INFINITY),
    }
  }

  /// Expand to include a point.
  #[inline]
  pub fn encapsulate(&mut self, p: Vec2) {
    self.min = self.min.min(p);
    self.max = self.max.max(p);
  }
}

impl Default for PlaneBounds {
  fn default() -> Self {
    Self::empty()
  }
}

/// Configuration for buffer emission.
#[derive(Clone, Copy, Debug)]
pub struct MeshConfig {
  /// World-space extent of the unit domain.
  pub scale: Vec2,
  /// World-space position of the domain's (0,0) corner.
  pub offset: Vec2,
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self {
      scale: Vec2::ONE,
      offset: Vec2::ZERO,
    }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_scale(mut self, scale: Vec2) -> Self {
    self.scale = scale;
    self
  }

  pub fn with_offset(mut self, offset: Vec2) -> Self {
    self.offset = offset;
    self
  }
}

/// Emission result: one triangle per leaf, non-indexed.
#[derive(Default)]
pub struct MeshOutput {
  /// Object-space positions, 3 per leaf, z = 0.
  pub positions: Vec<[f32; 3]>,
  /// UV coordinates straight from the unit domain, parallel to positions.
  pub uvs: Vec<[f32; 2]>,
  /// Bounds of all emitted positions in the plane.
  pub bounds: PlaneBounds,
}

impl MeshOutput {
  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Number of triangles (one per leaf).
  pub fn triangle_count(&self) -> usize {
    self.positions.len() / 3
  }
}

/// Emit vertex and UV buffers for every leaf of the tree.
///
/// Per-leaf transforms are evaluated in parallel; output order is leaf
/// order. A square-domain tree whose root is still unsplit emits the two
/// half-triangles directly.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "mesh::emit", fields(leaves = cbt.leaf_count()))
)]
pub fn emit(cbt: &Cbt, domain: Domain, config: &MeshConfig) -> MeshOutput {
  let leaf_ids: Vec<u32> = {
    let leaves = cbt.leaves();
    if domain == Domain::Square && leaves.len() == 1 {
      // Unsplit square root: not a triangle, emit both halves.
      vec![2, 3]
    } else {
      leaves.into_iter().map(|n| n.id).collect()
    }
  };

  let triangles: Vec<[Vec2; 3]> = leaf_ids
    .into_par_iter()
    .map(|id| node_vertices(id, domain))
    .collect();

  let mut out = MeshOutput::default();
  out.positions.reserve(triangles.len() * 3);
  out.uvs.reserve(triangles.len() * 3);

  for tri in &triangles {
    for v in tri {
      let p = config.offset + *v * config.scale;
      out.positions.push([p.x, p.y, 0.0]);
      out.uvs.push([v.x, v.y]);
      out.bounds.encapsulate(p);
    }
  }
  out
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
