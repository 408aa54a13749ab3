//! Texel packing for the count plane.
//!
//! Each texel carries one 32-bit count split big-endian across its RGBA
//! channels, every byte normalized to the [0,1] float range. The round trip
//! is exact for the full 24-bit budget the tree can ever produce (leaf
//! counts top out at `2^MAX_SUPPORTED_DEPTH`), and in practice for all of
//! u32: a byte divided by 255 survives an f32 store and re-quantization.

/// Pack a count into one RGBA texel, big-endian byte order.
#[inline]
pub fn encode_count(v: u32) -> [f32; 4] {
  [
    ((v >> 24) & 0xff) as f32 / 255.0,
    ((v >> 16) & 0xff) as f32 / 255.0,
    ((v >> 8) & 0xff) as f32 / 255.0,
    (v & 0xff) as f32 / 255.0,
  ]
}

/// Recover the count from an RGBA texel written by [`encode_count`].
#[inline]
pub fn decode_count(texel: [f32; 4]) -> u32 {
  let byte = |c: f32| (c * 255.0).round() as u32;
  byte(texel[0]) << 24 | byte(texel[1]) << 16 | byte(texel[2]) << 8 | byte(texel[3])
}

/// Near-square width/height factorization of the `2^(D+1)` heap slots.
///
/// Texel index and heap index coincide under row-major layout, so only the
/// product matters; the split keeps both extents within hardware limits for
/// deep trees.
#[inline]
pub fn texture_dimensions(max_depth: u32) -> (u32, u32) {
  let bits = max_depth + 1;
  (1 << ((bits + 1) / 2), 1 << (bits / 2))
}

#[cfg(test)]
#[path = "encoding_test.rs"]
mod encoding_test;
