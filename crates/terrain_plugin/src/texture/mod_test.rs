use super::{texture_dimensions, TextureCbt};
use crate::cbt::Cbt;
use crate::error::CbtError;
use crate::leb::Domain;

#[test]
fn fresh_tree_has_a_single_root_leaf() {
  let cbt = TextureCbt::new(6, Domain::Square).unwrap();
  assert_eq!(cbt.leaf_count(), 1);
  assert_eq!(cbt.leaves().iter().map(|n| n.id).collect::<Vec<_>>(), vec![1]);
  assert_eq!(cbt.dimensions(), texture_dimensions(6));
  assert_eq!(cbt.max_depth(), 6);
}

#[test]
fn rejects_unsupported_depth() {
  let err = TextureCbt::new(Cbt::MAX_SUPPORTED_DEPTH + 1, Domain::Triangle).unwrap_err();
  assert!(matches!(err, CbtError::DepthOutOfRange { .. }));
}

#[test]
fn texel_plane_matches_heap_extent() {
  let cbt = TextureCbt::new(8, Domain::Triangle).unwrap();
  let (w, h) = cbt.dimensions();
  assert_eq!((w * h) as usize, 1usize << 9);
}
