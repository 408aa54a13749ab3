//! Per-node transform matrices and vertex evaluation.
//!
//! A node's triangle is never stored: it is derived by composing one of two
//! fixed 3x3 child-selector matrices per path bit onto an accumulator, then
//! applying a winding-correction mirror determined by path parity, and
//! finally mapping the accumulated barycentric weights through the canonical
//! root vertices. Rows of the weight matrix are the barycentric coordinates
//! of the node's three vertices relative to the root triangle.
//!
//! The hypotenuse always runs between a triangle's first and third vertex;
//! the mirror swaps those two, so the convention survives winding fixes.

use glam::{Mat3, Vec2, Vec3};

use crate::bits::{bit, find_msb};

use super::Domain;

/// Root triangle for the triangle domain: hypotenuse on the diagonal.
const TRI_ROOT: [Vec2; 3] = [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];

/// Lower-right half of the unit square (node 2). Hypotenuse on the
/// (0,0)-(1,1) diagonal, counter-clockwise.
const SQUARE_HALF_0: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];

/// Upper-left half of the unit square (node 3).
const SQUARE_HALF_1: [Vec2; 3] = [Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0)];

/// Build a Mat3 from row vectors (glam stores columns).
#[inline]
fn mat3_from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Mat3 {
  Mat3::from_cols(r0, r1, r2).transpose()
}

/// Child-selector matrix for one bisection step.
///
/// Child 0 keeps the first vertex, child 1 the third; both take the
/// hypotenuse midpoint as their new apex.
pub fn splitting_matrix(split_bit: u32) -> Mat3 {
  let b = split_bit as f32;
  let c = 1.0 - b;
  mat3_from_rows(
    Vec3::new(c, b, 0.0),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(0.0, c, b),
  )
}

/// Winding-correction mirror: swaps the first and third vertex when the
/// mirror bit is set, identity otherwise.
pub fn winding_matrix(mirror_bit: u32) -> Mat3 {
  let b = mirror_bit as f32;
  let c = 1.0 - b;
  mat3_from_rows(
    Vec3::new(c, 0.0, b),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(b, 0.0, c),
  )
}

/// Map a weight matrix through root vertices.
#[inline]
fn apply_weights(weights: Mat3, root: [Vec2; 3]) -> [Vec2; 3] {
  let eval = |row: Vec3| root[0] * row.x + root[1] * row.y + root[2] * row.z;
  [
    eval(weights.row(0)),
    eval(weights.row(1)),
    eval(weights.row(2)),
  ]
}

/// Vertices of node `k`'s triangle in the unit domain, counter-clockwise.
///
/// Pure and memoizable per node index; this is the only place geometry is
/// derived from topology. In the square domain the root (k = 1) is the whole
/// square, not a triangle - square-domain callers always split the root
/// first, and the mesh emitter special-cases the unsplit root.
pub fn node_vertices(k: u32, domain: Domain) -> [Vec2; 3] {
  debug_assert!(k != 0, "0 is not a node index");
  let depth = find_msb(k);

  let (root, folded_bits) = match domain {
    Domain::Triangle => (TRI_ROOT, depth),
    Domain::Square => {
      debug_assert!(depth >= 1, "the square root is not a triangle");
      let root = if bit(k, depth - 1) == 0 {
        SQUARE_HALF_0
      } else {
        SQUARE_HALF_1
      };
      (root, depth - 1)
    }
  };

  let mut weights = Mat3::IDENTITY;
  // Most significant path bit first: earliest bisection innermost.
  for i in (0..folded_bits).rev() {
    weights = splitting_matrix(bit(k, i)) * weights;
  }
  weights = winding_matrix(folded_bits & 1) * weights;

  apply_weights(weights, root)
}

/// Signed area of a triangle (positive = counter-clockwise).
pub fn signed_area(v: &[Vec2; 3]) -> f32 {
  0.5 * (v[1] - v[0]).perp_dot(v[2] - v[0])
}

#[cfg(test)]
#[path = "matrices_test.rs"]
mod matrices_test;
