use super::*;

/// MSB positions match the depth convention: node 1 is the root at depth 0.
#[test]
fn test_find_msb_known_values() {
  assert_eq!(find_msb(1), 0);
  assert_eq!(find_msb(5), 2);
  assert_eq!(find_msb(8), 3);
}

#[test]
fn test_find_msb_zero_convention() {
  assert_eq!(find_msb(0), 0, "degenerate input maps to 0 by convention");
}

#[test]
fn test_find_msb_powers_of_two() {
  for d in 0..31u32 {
    assert_eq!(find_msb(1 << d), d);
    if d > 0 {
      assert_eq!(find_msb((1 << d) | 1), d, "low bits do not affect the MSB");
    }
  }
}

#[test]
fn test_bit_extraction() {
  // 0b1011: bits 0, 1 and 3 set
  assert_eq!(bit(0b1011, 0), 1);
  assert_eq!(bit(0b1011, 1), 1);
  assert_eq!(bit(0b1011, 2), 0);
  assert_eq!(bit(0b1011, 3), 1);
}
