//! IJK cube coordinate arithmetic.
//!
//! Cells are addressed by an integer triple on three axes spaced 120 degrees
//! apart. The normalized form has all components non-negative and at least
//! one component zero; the cube form satisfies `i + j + k = 0`.

use crate::constants::{M_RSIN60, M_SIN60};
use crate::types::{CoordIJ, CoordIJK, Direction, Vec2d};

/// Unit vectors for the seven digits, indexed by digit value.
#[rustfmt::skip]
pub(crate) const UNIT_VECS: [CoordIJK; 7] = [
  CoordIJK::new(0, 0, 0), // Center
  CoordIJK::new(0, 0, 1), // KAxes
  CoordIJK::new(0, 1, 0), // JAxes
  CoordIJK::new(0, 1, 1), // JkAxes
  CoordIJK::new(1, 0, 0), // IAxes
  CoordIJK::new(1, 0, 1), // IkAxes
  CoordIJK::new(1, 1, 0), // IjAxes
];

impl CoordIJK {
  /// Component-wise sum.
  #[inline]
  #[must_use]
  pub(crate) fn add(&self, other: &CoordIJK) -> CoordIJK {
    CoordIJK::new(
      self.i.saturating_add(other.i),
      self.j.saturating_add(other.j),
      self.k.saturating_add(other.k),
    )
  }

  /// Component-wise difference, `self - other`.
  #[inline]
  #[must_use]
  pub(crate) fn sub(&self, other: &CoordIJK) -> CoordIJK {
    CoordIJK::new(
      self.i.saturating_sub(other.i),
      self.j.saturating_sub(other.j),
      self.k.saturating_sub(other.k),
    )
  }

  /// Uniform scale by an integer factor, in place.
  #[inline]
  pub(crate) fn scale(&mut self, factor: i32) {
    self.i = self.i.saturating_mul(factor);
    self.j = self.j.saturating_mul(factor);
    self.k = self.k.saturating_mul(factor);
  }

  /// Snaps the coordinates to the canonical form: all components
  /// non-negative, smallest component zero.
  pub(crate) fn normalize(&mut self) {
    if self.i < 0 {
      self.j = self.j.saturating_sub(self.i);
      self.k = self.k.saturating_sub(self.i);
      self.i = 0;
    }
    if self.j < 0 {
      self.i = self.i.saturating_sub(self.j);
      self.k = self.k.saturating_sub(self.j);
      self.j = 0;
    }
    if self.k < 0 {
      self.i = self.i.saturating_sub(self.k);
      self.j = self.j.saturating_sub(self.k);
      self.k = 0;
    }

    let min = self.i.min(self.j).min(self.k);
    if min > 0 {
      self.i -= min;
      self.j -= min;
      self.k -= min;
    }
  }

  /// The digit whose unit vector equals these coordinates after
  /// normalization, or [`Direction::Invalid`] if there is none.
  #[must_use]
  pub(crate) fn to_digit(&self) -> Direction {
    let mut c = *self;
    c.normalize();
    for (digit, unit) in UNIT_VECS.iter().enumerate() {
      if c == *unit {
        return Direction::from_digit(digit as u8);
      }
    }
    Direction::Invalid
  }

  /// Moves to the neighboring hex in the given digit direction, in place.
  pub(crate) fn neighbor(&mut self, digit: Direction) {
    if digit != Direction::Center && digit != Direction::Invalid {
      *self = self.add(&UNIT_VECS[digit as usize]);
      self.normalize();
    }
  }

  /// Rotates 60 degrees counter-clockwise, in place.
  pub(crate) fn rotate_60ccw(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(i + k, i + j, j + k);
    self.normalize();
  }

  /// Rotates 60 degrees clockwise, in place.
  pub(crate) fn rotate_60cw(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(i + j, j + k, i + k);
    self.normalize();
  }

  /// Replaces the coordinates with those of the same-centered cell one
  /// resolution finer, counter-clockwise aperture 7.
  pub(crate) fn down_ap7(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(3 * i + j, 3 * j + k, i + 3 * k);
    self.normalize();
  }

  /// Replaces the coordinates with those of the same-centered cell one
  /// resolution finer, clockwise aperture 7.
  pub(crate) fn down_ap7r(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(3 * i + k, i + 3 * j, j + 3 * k);
    self.normalize();
  }

  /// Ascends one resolution in a counter-clockwise aperture 7 grid.
  pub(crate) fn up_ap7(&mut self) {
    let i = f64::from(self.i - self.k);
    let j = f64::from(self.j - self.k);
    self.i = ((3.0 * i - j) / 7.0).round() as i32;
    self.j = ((i + 2.0 * j) / 7.0).round() as i32;
    self.k = 0;
    self.normalize();
  }

  /// Ascends one resolution in a clockwise aperture 7 grid.
  pub(crate) fn up_ap7r(&mut self) {
    let i = f64::from(self.i - self.k);
    let j = f64::from(self.j - self.k);
    self.i = ((2.0 * i + j) / 7.0).round() as i32;
    self.j = ((3.0 * j - i) / 7.0).round() as i32;
    self.k = 0;
    self.normalize();
  }

  /// Descends one resolution in a counter-clockwise aperture 3 grid. Used
  /// to reach the substrate grid of cell vertices.
  pub(crate) fn down_ap3(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(2 * i + j, 2 * j + k, i + 2 * k);
    self.normalize();
  }

  /// Descends one resolution in a clockwise aperture 3 grid.
  pub(crate) fn down_ap3r(&mut self) {
    let (i, j, k) = (self.i, self.j, self.k);
    *self = CoordIJK::new(2 * i + k, i + 2 * j, j + 2 * k);
    self.normalize();
  }

  /// Grid distance to another coordinate.
  #[must_use]
  pub(crate) fn distance_to(&self, other: &CoordIJK) -> i32 {
    let mut diff = self.sub(other);
    diff.normalize();
    diff.i.abs().max(diff.j.abs()).max(diff.k.abs())
  }

  /// Center point of this hex on the face plane.
  #[must_use]
  pub(crate) fn to_hex2d(&self) -> Vec2d {
    let i = f64::from(self.i - self.k);
    let j = f64::from(self.j - self.k);
    Vec2d::new(i - 0.5 * j, j * M_SIN60)
  }

  /// Converts to cube form, where `i + j + k = 0`.
  pub(crate) fn to_cube(&mut self) {
    self.i = -self.i + self.k;
    self.j -= self.k;
    self.k = -self.i - self.j;
  }

  /// Converts from cube form back to the normalized form.
  pub(crate) fn from_cube(&mut self) {
    self.i = self.i.saturating_neg();
    self.k = 0;
    self.normalize();
  }

  /// Two-axis form relative to an implicit origin.
  #[must_use]
  pub(crate) fn to_ij(&self) -> CoordIJ {
    CoordIJ { i: self.i - self.k, j: self.j - self.k }
  }

  /// Builds normalized coordinates from the two-axis form.
  #[must_use]
  pub(crate) fn from_ij(ij: &CoordIJ) -> CoordIJK {
    let mut ijk = CoordIJK::new(ij.i, ij.j, 0);
    ijk.normalize();
    ijk
  }
}

/// Rounds fractional cube coordinates to the nearest cell center, patching
/// the component with the largest rounding error so the cube invariant
/// holds.
pub(crate) fn cube_round(i: f64, j: f64, k: f64) -> CoordIJK {
  let mut ri = i.round() as i32;
  let mut rj = j.round() as i32;
  let mut rk = k.round() as i32;

  let i_diff = (f64::from(ri) - i).abs();
  let j_diff = (f64::from(rj) - j).abs();
  let k_diff = (f64::from(rk) - k).abs();

  if i_diff > j_diff && i_diff > k_diff {
    ri = -rj - rk;
  } else if j_diff > k_diff {
    rj = -ri - rk;
  } else {
    rk = -ri - rj;
  }

  CoordIJK::new(ri, rj, rk)
}

/// Determines the containing hex of a 2D Cartesian point on the face plane.
pub(crate) fn hex2d_to_coord_ijk(v: &Vec2d) -> CoordIJK {
  let mut h = CoordIJK::default();

  // Quantize into the axial ij system first.
  let a1 = v.x.abs();
  let a2 = v.y.abs();

  let x2 = a2 * M_RSIN60;
  let x1 = a1 + x2 / 2.0;

  let m1 = x1 as i32;
  let m2 = x2 as i32;

  let r1 = x1 - f64::from(m1);
  let r2 = x2 - f64::from(m2);

  if r1 < 0.5 {
    if r1 < 1.0 / 3.0 {
      h.i = m1;
      h.j = if r2 < (1.0 + r1) / 2.0 { m2 } else { m2 + 1 };
    } else {
      h.j = if r2 < 1.0 - r1 { m2 } else { m2 + 1 };
      h.i = if (1.0 - r1) <= r2 && r2 < 2.0 * r1 { m1 + 1 } else { m1 };
    }
  } else if r1 < 2.0 / 3.0 {
    h.j = if r2 < 1.0 - r1 { m2 } else { m2 + 1 };
    h.i = if (2.0 * r1 - 1.0) < r2 && r2 < 1.0 - r1 { m1 } else { m1 + 1 };
  } else {
    h.i = m1 + 1;
    h.j = if r2 < r1 / 2.0 { m2 } else { m2 + 1 };
  }

  // Fold across the axes if necessary.
  if v.x < 0.0 {
    if h.j % 2 == 0 {
      let axis_i = i64::from(h.j) / 2;
      let diff = i64::from(h.i) - axis_i;
      h.i = (i64::from(h.i) - 2 * diff) as i32;
    } else {
      let axis_i = (i64::from(h.j) + 1) / 2;
      let diff = i64::from(h.i) - axis_i;
      h.i = (i64::from(h.i) - (2 * diff + 1)) as i32;
    }
  }

  if v.y < 0.0 {
    h.i = (i64::from(h.i) - (2 * i64::from(h.j) + 1) / 2) as i32;
    h.j = -h.j;
  }

  h.normalize();
  h
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_examples() {
    let mut c = CoordIJK::new(2, 3, 4);
    c.normalize();
    assert_eq!(c, CoordIJK::new(0, 1, 2));

    let mut c = CoordIJK::new(-2, -3, -4);
    c.normalize();
    assert_eq!(c, CoordIJK::new(2, 1, 0));

    let mut c = CoordIJK::new(2, -1, 0);
    c.normalize();
    assert_eq!(c, CoordIJK::new(3, 0, 1));

    let mut c = CoordIJK::new(10, 20, 5);
    c.normalize();
    assert_eq!(c, CoordIJK::new(5, 15, 0));
  }

  #[test]
  fn to_digit_unit_vectors() {
    for (digit, unit) in UNIT_VECS.iter().enumerate() {
      assert_eq!(unit.to_digit() as u8, digit as u8);
    }
    // Unnormalized center and non-unit vectors.
    assert_eq!(CoordIJK::new(2, 2, 2).to_digit(), Direction::Center);
    assert_eq!(CoordIJK::new(1, 1, 2).to_digit(), Direction::KAxes);
    assert_eq!(CoordIJK::new(2, 0, 0).to_digit(), Direction::Invalid);
  }

  #[test]
  fn neighbor_moves_one_step() {
    let mut c = CoordIJK::default();
    c.neighbor(Direction::IAxes);
    assert_eq!(c, UNIT_VECS[Direction::IAxes as usize]);

    let mut c = CoordIJK::default();
    c.neighbor(Direction::Center);
    assert_eq!(c, CoordIJK::default());
  }

  #[test]
  fn rotations_are_inverse() {
    let mut c = CoordIJK::new(3, 1, 0);
    let orig = c;
    c.rotate_60ccw();
    assert_ne!(c, orig);
    c.rotate_60cw();
    assert_eq!(c, orig);
  }

  #[test]
  fn ap7_round_trips() {
    for unit in &UNIT_VECS {
      let mut c = *unit;
      c.down_ap7();
      c.up_ap7();
      assert_eq!(c, *unit, "ccw aperture 7 round trip for {unit:?}");

      let mut c = *unit;
      c.down_ap7r();
      c.up_ap7r();
      assert_eq!(c, *unit, "cw aperture 7 round trip for {unit:?}");
    }
  }

  #[test]
  fn distance_is_max_component() {
    let a = CoordIJK::default();
    let b = CoordIJK::new(3, 0, 1);
    assert_eq!(a.distance_to(&b), 3);
    assert_eq!(b.distance_to(&a), 3);
    assert_eq!(a.distance_to(&a), 0);
  }

  #[test]
  fn hex2d_round_trip() {
    for ijk in [
      CoordIJK::default(),
      CoordIJK::new(1, 0, 0),
      CoordIJK::new(0, 3, 1),
      CoordIJK::new(7, 2, 0),
    ] {
      let recovered = hex2d_to_coord_ijk(&ijk.to_hex2d());
      assert_eq!(recovered, ijk, "hex2d round trip for {ijk:?}");
    }
  }

  #[test]
  fn cube_round_trip() {
    for ijk in [CoordIJK::new(1, 0, 0), CoordIJK::new(0, 2, 1), CoordIJK::new(4, 0, 3)] {
      let mut c = ijk;
      c.to_cube();
      assert_eq!(c.i + c.j + c.k, 0, "cube invariant for {ijk:?}");
      c.from_cube();
      assert_eq!(c, ijk, "cube round trip for {ijk:?}");
    }
  }

  #[test]
  fn cube_round_fixes_largest_error() {
    assert_eq!(cube_round(1.1, -0.6, -0.45), CoordIJK::new(1, -1, 0));
    assert_eq!(cube_round(0.0, 0.0, 0.0), CoordIJK::default());
  }

  #[test]
  fn ij_round_trip() {
    let ijk = CoordIJK::new(0, 3, 1);
    let recovered = CoordIJK::from_ij(&ijk.to_ij());
    let mut expected = ijk;
    expected.normalize();
    assert_eq!(recovered, expected);
  }
}
