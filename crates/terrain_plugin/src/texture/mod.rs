//! Texture-encoded tree backend.
//!
//! [`TextureCbt`] is a data-parallel reinterpretation of [`Cbt`](crate::cbt::Cbt):
//! the heap lives in a 2D texture (one texel per heap slot, counts packed
//! across RGBA bytes) and every update runs as a fixed sequence of full-plane
//! passes rather than per-node cascades. Same split/reduce/enumerate
//! interface, selectable at runtime as an alternate backend.
//!
//! Pass order per update, each pass reading only the previous pass's output:
//!
//! 1. *seed* - evaluate the split policy for every node texel;
//! 2. *split propagation* - one pass per depth level from `D-1` down to `0`,
//!    pulling split demand up from children and pushing it across the
//!    hypotenuse neighbor (level-synchronous, unlike the CPU cascade);
//! 3. *resolve* - derive the leaf bit-field from the propagated flags;
//! 4. *sum reduction* - one pass per level, bottom-up.
//!
//! Reading the leaf count out of texel 1 is the backend's only blocking
//! operation and is modeled as a cancelable async request ([`ReadbackQueue`],
//! [`LeafCountReadback`]).

mod encoding;
mod passes;
mod readback;

pub use encoding::{decode_count, encode_count, texture_dimensions};
pub use readback::{LeafCountReadback, ReadbackQueue, RequestId};

use crate::cbt::CbtNode;
use crate::error::CbtError;
use crate::leb::Domain;

/// Heap-in-a-texture tree with a fixed depth bound.
///
/// Texel `k` of the count plane holds the reduced count of heap slot `k`,
/// byte-packed per [`encode_count`]. The flag plane is scratch for the
/// propagation passes and is zero between updates.
#[derive(Debug)]
pub struct TextureCbt {
  /// RGBA count plane, `width * height == 2^(D+1)` texels.
  pub(crate) texels: Vec<[f32; 4]>,
  /// Scratch split-demand plane, same extent.
  pub(crate) flags: Vec<u8>,
  pub(crate) width: u32,
  pub(crate) height: u32,
  pub(crate) max_depth: u32,
  pub(crate) domain: Domain,
}

impl TextureCbt {
  /// Allocate the texture planes for depth bound `max_depth` with a single
  /// active leaf.
  pub fn new(max_depth: u32, domain: Domain) -> Result<Self, CbtError> {
    if max_depth > crate::cbt::Cbt::MAX_SUPPORTED_DEPTH {
      return Err(CbtError::DepthOutOfRange {
        requested: max_depth,
        maximum: crate::cbt::Cbt::MAX_SUPPORTED_DEPTH,
      });
    }

    let (width, height) = texture_dimensions(max_depth);
    let len = (width * height) as usize;
    let mut cbt = Self {
      texels: vec![encode_count(0); len],
      flags: vec![0; len],
      width,
      height,
      max_depth,
      domain,
    };

    // Root leaf: leftmost deepest slot set, then reduce.
    cbt.texels[1usize << max_depth] = encode_count(1);
    cbt.reduction_passes();
    Ok(cbt)
  }

  /// Depth bound of this tree.
  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  /// Texture extent in texels.
  #[inline]
  pub fn dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  #[inline]
  pub(crate) fn count(&self, k: u32) -> u32 {
    decode_count(self.texels[k as usize])
  }

  /// Number of active leaves, decoded from texel 1.
  #[inline]
  pub fn leaf_count(&self) -> u32 {
    self.count(1)
  }

  /// Resolve leaf ordinal `l` by count-guided descent over decoded texels.
  pub fn leaf_to_heap_index(&self, l: u32) -> CbtNode {
    debug_assert!(l < self.leaf_count(), "leaf ordinal {} out of range", l);
    let mut l = l;
    let mut k = 1u32;
    while self.count(k) > 1 {
      let left = self.count(k << 1);
      if l < left {
        k <<= 1;
      } else {
        l -= left;
        k = k << 1 | 1;
      }
    }
    CbtNode::new(k)
  }

  /// All active leaves in leaf-ordinal order.
  pub fn leaves(&self) -> Vec<CbtNode> {
    (0..self.leaf_count())
      .map(|l| self.leaf_to_heap_index(l))
      .collect()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
