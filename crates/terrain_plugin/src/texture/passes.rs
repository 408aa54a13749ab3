//! Full-plane update passes for [`TextureCbt`].
//!
//! Unlike the CPU backend, which edits one split at a time and cascades along
//! neighbors, the texture backend rebuilds the whole frontier every update
//! from a scratch plane of split flags. A flag on texel `k` means "node `k`
//! is internal this frame". The flag set is made closed under `parent` and
//! `edge` by the level-synchronous propagation passes, which is exactly the
//! conforming closure the CPU cascade computes node by node. Coarsening is
//! implicit: a node the policy stops flagging simply resolves as a leaf on
//! the next update.

use rayon::prelude::*;

use super::encoding::{decode_count, encode_count};
use super::TextureCbt;
use crate::cbt::{Cbt, CbtNode};
use crate::leb::{edge_neighbor, node_vertices, Domain};
use crate::refine::{LeafView, RefineAction, RefinePolicy};

impl TextureCbt {
  /// Run one full update: seed, propagate, resolve, reduce.
  ///
  /// The policy is evaluated for every node above the depth bound, not just
  /// current leaves; a node is flagged when the policy answers
  /// [`RefineAction::Split`] for its triangle. Passes execute in program
  /// order, each reading only the previous pass's output.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "texture::update", fields(max_depth = self.max_depth))
  )]
  pub fn update<P: RefinePolicy + Sync>(&mut self, policy: &P) {
    self.seed_pass(policy);
    self.propagation_passes();
    self.resolve_pass();
    self.reduction_passes();
    self.flags.fill(0);
  }

  /// Pass 1: per-texel policy evaluation.
  fn seed_pass<P: RefinePolicy + Sync>(&mut self, policy: &P) {
    let max_depth = self.max_depth;
    let domain = self.domain;
    // Only nodes above the depth bound can split; deeper texels stay clear.
    // The root square is not a triangle, so its texel is never evaluated.
    let first: usize = if domain == Domain::Square { 2 } else { 1 };
    let end = 1usize << max_depth;
    if first >= end {
      return;
    }

    self.flags[first..end]
      .par_iter_mut()
      .enumerate()
      .for_each(|(i, flag)| {
        let k = (first + i) as u32;
        let leaf = LeafView {
          node: CbtNode::new(k),
          vertices: node_vertices(k, domain),
        };
        *flag = (policy.classify(&leaf) == RefineAction::Split) as u8;
      });

    if domain == Domain::Square && max_depth > 0 {
      // The root square always splits into its two halves.
      self.flags[1] = 1;
    }
  }

  /// Pass 2: one pass per level, `D-1` down to `0`.
  ///
  /// First pull split demand up from the children, then exchange it across
  /// the hypotenuse. The exchange is written as a gather - `edge(edge(k))`
  /// is `k` for same-depth neighbors, so pulling from the neighbor is the
  /// same as the CPU cascade's push into it. One exchange per level
  /// suffices; anything it sets only obligates shallower levels, which run
  /// later.
  fn propagation_passes(&mut self) {
    let domain = self.domain;
    for d in (0..self.max_depth).rev() {
      let lo = 1usize << d;
      let hi = 1usize << (d + 1);

      let pulled: Vec<u8> = (lo..hi)
        .into_par_iter()
        .map(|k| self.flags[k] | self.flags[k << 1] | self.flags[k << 1 | 1])
        .collect();

      let exchanged: Vec<u8> = (lo..hi)
        .into_par_iter()
        .map(|k| {
          let e = edge_neighbor(k as u32, domain);
          let from_edge = if e == 0 { 0 } else { pulled[e as usize - lo] };
          pulled[k - lo] | from_edge
        })
        .collect();

      self.flags[lo..hi].copy_from_slice(&exchanged);
    }
  }

  /// Pass 3: derive the leaf bit-field from the propagated flags.
  ///
  /// Flags are upward-closed after propagation, so on any root-to-slot path
  /// the frontier leaf is the first unflagged node. Each deepest-level texel
  /// walks its own ancestry and sets itself iff it is that leaf's leftmost
  /// descendant slot.
  fn resolve_pass(&mut self) {
    let max_depth = self.max_depth;
    let flags = &self.flags;

    let lo = 1usize << max_depth;
    let bits: Vec<[f32; 4]> = (lo..lo * 2)
      .into_par_iter()
      .map(|s| {
        let mut a = s as u32;
        while a > 1 && flags[(a >> 1) as usize] == 0 {
          a >>= 1;
        }
        let ceil_slot = a << (max_depth - CbtNode::new(a).depth());
        encode_count((ceil_slot == s as u32) as u32)
      })
      .collect();

    self.texels[lo..lo * 2].copy_from_slice(&bits);
  }

  /// Pass 4: bottom-up sum reduction, one pass per level.
  pub(crate) fn reduction_passes(&mut self) {
    for d in (0..self.max_depth).rev() {
      let lo = 1usize << d;
      let hi = 1usize << (d + 1);
      let sums: Vec<[f32; 4]> = (lo..hi)
        .into_par_iter()
        .map(|k| {
          encode_count(
            decode_count(self.texels[k << 1]) + decode_count(self.texels[k << 1 | 1]),
          )
        })
        .collect();
      self.texels[lo..hi].copy_from_slice(&sums);
    }
  }

  /// Materialize the current frontier as a CPU-backend tree.
  ///
  /// Replays every leaf's ancestry as splits. Backends share the leaf
  /// enumeration contract, so the result's `leaves()` matches this tree's.
  pub fn to_cbt(&self) -> Result<Cbt, crate::error::CbtError> {
    let mut cbt = Cbt::new(self.max_depth)?;
    for leaf in self.leaves() {
      let depth = leaf.depth();
      for t in 0..depth {
        cbt.split(CbtNode::new(leaf.id >> (depth - t)))?;
      }
    }
    cbt.sum_reduction();
    Ok(cbt)
  }
}

#[cfg(test)]
#[path = "passes_test.rs"]
mod passes_test;
