//! Bit-level helpers for heap index math.
//!
//! A node's heap index encodes its path from the root: ignoring the implicit
//! leading 1, each binary digit selects a child (0 = left, 1 = right). The
//! position of the most significant set bit is therefore the node's depth.

/// Position of the most significant set bit.
///
/// `find_msb(0) == 0` by convention; callers must not treat 0 as a valid
/// node index.
#[inline]
pub fn find_msb(v: u32) -> u32 {
  if v == 0 {
    0
  } else {
    v.ilog2()
  }
}

/// Extract bit `i` of `v` (0 = least significant).
#[inline]
pub fn bit(v: u32, i: u32) -> u32 {
  (v >> i) & 1
}

#[cfg(test)]
#[path = "bits_test.rs"]
mod bits_test;
