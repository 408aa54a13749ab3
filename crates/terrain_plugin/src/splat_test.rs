use super::{splat_channel, splat_source, splat_texture, CHANNELS};

#[test]
fn first_texture_maps_channels_in_order() {
  assert_eq!(splat_channel(0), "r");
  assert_eq!(splat_channel(1), "g");
  assert_eq!(splat_channel(2), "b");
  assert_eq!(splat_channel(3), "a");
  for layer in 0..4 {
    assert_eq!(splat_texture(layer), 0);
  }
}

#[test]
fn fifth_layer_wraps_to_second_texture() {
  assert_eq!(splat_texture(4), 1);
  assert_eq!(splat_channel(4), "r");
  assert_eq!(splat_source(4), (1, "r"));
}

#[test]
fn channel_cycle_repeats_every_four_layers() {
  for layer in 0..32 {
    assert_eq!(splat_channel(layer), CHANNELS[layer % 4]);
    assert_eq!(splat_texture(layer), layer / 4);
  }
}
