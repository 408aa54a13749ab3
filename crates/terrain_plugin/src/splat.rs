//! Splat-map channel addressing.
//!
//! Terrain layer weights are stored four to a texture, one per RGBA channel.
//! A flat layer index addresses into that stack: layer 0 is channel "r" of
//! texture 0, layer 4 is channel "r" of texture 1, and so on. The material
//! collaborator consumes these to pick its sampler and swizzle.

/// Channel names in texture storage order.
pub const CHANNELS: [&str; 4] = ["r", "g", "b", "a"];

/// RGBA channel name for a flat layer index.
#[inline]
pub fn splat_channel(layer: usize) -> &'static str {
  CHANNELS[layer % 4]
}

/// Splat texture index for a flat layer index.
#[inline]
pub fn splat_texture(layer: usize) -> usize {
  layer / 4
}

/// Texture index and channel name for a flat layer index.
#[inline]
pub fn splat_source(layer: usize) -> (usize, &'static str) {
  (splat_texture(layer), splat_channel(layer))
}

#[cfg(test)]
#[path = "splat_test.rs"]
mod splat_test;
