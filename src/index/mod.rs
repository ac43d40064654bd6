//! The 64-bit index codec: field accessors, digit rotations and the
//! conversions between indexes and face-centered IJK addresses.

pub mod string;
pub mod validity;

use crate::base_cells::{
  base_cell_is_cw_offset, base_cell_to_face_ijk, face_ijk_to_base_cell,
  face_ijk_to_base_cell_ccw_rot60, is_base_cell_pentagon, INVALID_BASE_CELL, INVALID_ROTATIONS,
  MAX_FACE_COORD,
};
use crate::constants::{
  BASE_CELL_MASK, BASE_CELL_OFFSET, CELL_MODE, DIGIT_MASK, HIGH_BIT_MASK, INDEX_INIT, MAX_RESOLUTION,
  MODE_DEPENDENT_MASK, MODE_DEPENDENT_OFFSET, MODE_MASK, MODE_OFFSET, NUM_BASE_CELLS,
  PER_DIGIT_OFFSET, RES_MASK, RES_OFFSET,
};
use crate::coords::face_ijk::{adjust_overage_class_ii, Overage};
use crate::error::GeoHexError;
use crate::types::{Direction, FaceIJK, HexIndex, NULL_INDEX};

/// Whether a resolution uses the Class III grid orientation (odd
/// resolutions, rotated 30 degrees on the face plane).
#[inline]
#[must_use]
pub fn is_resolution_class_iii(res: i32) -> bool {
  res % 2 == 1
}

impl HexIndex {
  /// The index mode field.
  #[inline]
  #[must_use]
  pub fn mode(self) -> u8 {
    ((self.0 & MODE_MASK) >> MODE_OFFSET) as u8
  }

  #[inline]
  pub(crate) fn set_mode(&mut self, mode: u8) {
    self.0 = (self.0 & !MODE_MASK) | (u64::from(mode) << MODE_OFFSET);
  }

  /// The resolution field, 0..=15.
  #[inline]
  #[must_use]
  pub fn resolution(self) -> i32 {
    ((self.0 & RES_MASK) >> RES_OFFSET) as i32
  }

  #[inline]
  pub(crate) fn set_resolution(&mut self, res: i32) {
    self.0 = (self.0 & !RES_MASK) | ((res as u64) << RES_OFFSET);
  }

  /// The base cell field, 0..=121 for valid indexes.
  #[inline]
  #[must_use]
  pub fn base_cell(self) -> i32 {
    ((self.0 & BASE_CELL_MASK) >> BASE_CELL_OFFSET) as i32
  }

  #[inline]
  pub(crate) fn set_base_cell(&mut self, base_cell: i32) {
    self.0 = (self.0 & !BASE_CELL_MASK) | ((base_cell as u64) << BASE_CELL_OFFSET);
  }

  /// The digit taken to descend from resolution `res - 1` to `res`.
  /// `res` must be in 1..=15.
  #[inline]
  #[must_use]
  pub fn digit(self, res: i32) -> Direction {
    let shift = (MAX_RESOLUTION - res) as u64 * PER_DIGIT_OFFSET;
    Direction::from_digit(((self.0 >> shift) & DIGIT_MASK) as u8)
  }

  #[inline]
  pub(crate) fn set_digit(&mut self, res: i32, digit: Direction) {
    let shift = (MAX_RESOLUTION - res) as u64 * PER_DIGIT_OFFSET;
    self.0 = (self.0 & !(DIGIT_MASK << shift)) | ((digit as u64) << shift);
  }

  /// The mode-dependent bits: edge direction for directed edges, vertex
  /// number for vertex indexes.
  #[inline]
  pub(crate) fn mode_dependent(self) -> u8 {
    ((self.0 & MODE_DEPENDENT_MASK) >> MODE_DEPENDENT_OFFSET) as u8
  }

  #[inline]
  pub(crate) fn set_mode_dependent(&mut self, value: u8) {
    self.0 = (self.0 & !MODE_DEPENDENT_MASK) | (u64::from(value) << MODE_DEPENDENT_OFFSET);
  }

  /// The reserved high bit; must be 0 for a valid index.
  #[inline]
  pub(crate) fn high_bit(self) -> u8 {
    ((self.0 & HIGH_BIT_MASK) >> 63) as u8
  }

  /// The coarsest non-center digit, or [`Direction::Center`] if all digits
  /// are center.
  #[must_use]
  pub(crate) fn leading_non_zero_digit(self) -> Direction {
    for r in 1..=self.resolution() {
      let digit = self.digit(r);
      if digit != Direction::Center {
        return digit;
      }
    }
    Direction::Center
  }

  /// Rotates all digits 60 degrees counter-clockwise.
  #[must_use]
  pub(crate) fn rotate_60ccw(mut self) -> Self {
    for r in 1..=self.resolution() {
      let rotated = self.digit(r).rotate_60ccw();
      self.set_digit(r, rotated);
    }
    self
  }

  /// Rotates all digits 60 degrees clockwise.
  #[must_use]
  pub(crate) fn rotate_60cw(mut self) -> Self {
    for r in 1..=self.resolution() {
      let rotated = self.digit(r).rotate_60cw();
      self.set_digit(r, rotated);
    }
    self
  }

  /// Rotates 60 degrees counter-clockwise about a pentagonal center,
  /// skipping the deleted k-axes subsequence.
  #[must_use]
  pub(crate) fn rotate_pent_60ccw(mut self) -> Self {
    let res = self.resolution();
    let mut found_first_non_zero = false;
    for r in 1..=res {
      let rotated = self.digit(r).rotate_60ccw();
      self.set_digit(r, rotated);

      if !found_first_non_zero && rotated != Direction::Center {
        found_first_non_zero = true;
        if self.leading_non_zero_digit() == Direction::KAxes {
          self = self.rotate_pent_60ccw();
        }
      }
    }
    self
  }

  /// Rotates 60 degrees clockwise about a pentagonal center, skipping the
  /// deleted k-axes subsequence.
  #[must_use]
  pub(crate) fn rotate_pent_60cw(mut self) -> Self {
    let res = self.resolution();
    let mut found_first_non_zero = false;
    for r in 1..=res {
      let rotated = self.digit(r).rotate_60cw();
      self.set_digit(r, rotated);

      if !found_first_non_zero && rotated != Direction::Center {
        found_first_non_zero = true;
        if self.leading_non_zero_digit() == Direction::KAxes {
          self = self.rotate_pent_60cw();
        }
      }
    }
    self
  }
}

/// Builds a cell index with the given resolution and base cell, with every
/// in-range digit set to `init_digit`.
pub(crate) fn make_cell_index(res: i32, base_cell: i32, init_digit: Direction) -> HexIndex {
  let mut h = HexIndex(INDEX_INIT);
  h.set_mode(CELL_MODE);
  h.set_resolution(res);
  h.set_base_cell(base_cell);
  for r in 1..=res {
    h.set_digit(r, init_digit);
  }
  h
}

/// The cell index of a base cell number, or [`NULL_INDEX`] out of range.
pub(crate) fn base_cell_to_cell(base_cell: i32) -> HexIndex {
  if !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return NULL_INDEX;
  }
  make_cell_index(0, base_cell, Direction::Center)
}

/// Encodes a face-centered IJK address at a resolution into a cell index.
///
/// Returns [`NULL_INDEX`] when the coordinates are outside the encodable
/// range for the resolution.
pub(crate) fn face_ijk_to_index(fijk: &FaceIJK, res: i32) -> HexIndex {
  let mut h = HexIndex(INDEX_INIT);
  h.set_mode(CELL_MODE);
  h.set_resolution(res);

  if res == 0 {
    if fijk.coord.i > MAX_FACE_COORD || fijk.coord.j > MAX_FACE_COORD || fijk.coord.k > MAX_FACE_COORD
    {
      return NULL_INDEX;
    }
    let base_cell = face_ijk_to_base_cell(fijk);
    if base_cell == INVALID_BASE_CELL {
      return NULL_INDEX;
    }
    h.set_base_cell(base_cell);
    return h;
  }

  // Build the index digits from finest to coarsest: at each step the digit
  // is the offset of the current cell from the center of its parent, read
  // on the finer grid.
  let mut fijk_bc = *fijk;
  for r in (1..=res).rev() {
    let last_ijk = fijk_bc.coord;
    if is_resolution_class_iii(r) {
      fijk_bc.coord.up_ap7();
    } else {
      fijk_bc.coord.up_ap7r();
    }
    let mut last_center = fijk_bc.coord;
    if is_resolution_class_iii(r) {
      last_center.down_ap7();
    } else {
      last_center.down_ap7r();
    }

    let mut diff = last_ijk.sub(&last_center);
    diff.normalize();

    let digit = diff.to_digit();
    if digit == Direction::Invalid {
      return NULL_INDEX;
    }
    h.set_digit(r, digit);
  }

  // fijk_bc now holds the res 0 coordinates on the original face.
  if fijk_bc.coord.i > MAX_FACE_COORD
    || fijk_bc.coord.j > MAX_FACE_COORD
    || fijk_bc.coord.k > MAX_FACE_COORD
  {
    return NULL_INDEX;
  }

  let base_cell = face_ijk_to_base_cell(&fijk_bc);
  if base_cell == INVALID_BASE_CELL {
    return NULL_INDEX;
  }
  h.set_base_cell(base_cell);

  let num_rots = face_ijk_to_base_cell_ccw_rot60(&fijk_bc);
  if num_rots == INVALID_ROTATIONS {
    return NULL_INDEX;
  }

  if is_base_cell_pentagon(base_cell) {
    // A leading k-axes digit sits in the pentagon's deleted wedge; rotate
    // out of it before applying the base cell orientation.
    if h.leading_non_zero_digit() == Direction::KAxes {
      if base_cell_is_cw_offset(base_cell, fijk_bc.face) {
        h = h.rotate_60cw();
      } else {
        h = h.rotate_60ccw();
      }
    }
    for _ in 0..num_rots {
      h = h.rotate_pent_60ccw();
    }
  } else {
    for _ in 0..num_rots {
      h = h.rotate_60ccw();
    }
  }

  h
}

/// Decodes a cell index to its canonical face-centered IJK address.
pub(crate) fn index_to_face_ijk(h: HexIndex) -> Result<FaceIJK, GeoHexError> {
  let base_cell = h.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return Err(GeoHexError::CellInvalid);
  }

  // A pentagon with a leading ik-axes digit must be rotated out of the
  // deleted wedge before walking the digits.
  let mut h_digits = h;
  if is_base_cell_pentagon(base_cell) && h_digits.leading_non_zero_digit() == Direction::IkAxes {
    h_digits = h_digits.rotate_60cw();
  }

  let mut fijk = base_cell_to_face_ijk(base_cell);
  if !index_to_face_ijk_on_home_face(h_digits, &mut fijk) {
    // The cell cannot have left its home face.
    return Ok(fijk);
  }

  // The cell may have crossed onto another face; check and adjust in the
  // Class II grid.
  let orig_ijk = fijk.coord;

  let res = h.resolution();
  let mut adj_res = res;
  if is_resolution_class_iii(res) {
    fijk.coord.down_ap7r();
    adj_res += 1;
  }

  let pent_leading_4 =
    is_base_cell_pentagon(base_cell) && h_digits.leading_non_zero_digit() == Direction::IAxes;

  let mut overage = adjust_overage_class_ii(&mut fijk, adj_res, pent_leading_4, false);
  if overage != Overage::None {
    // A pentagon base cell may need several adjustments in a row.
    if is_base_cell_pentagon(base_cell) {
      while overage == Overage::NewFace {
        overage = adjust_overage_class_ii(&mut fijk, adj_res, false, false);
      }
    }
    if adj_res != res {
      fijk.coord.up_ap7r();
    }
  } else if adj_res != res {
    fijk.coord = orig_ijk;
  }

  Ok(fijk)
}

/// Applies the index digits to an already initialized face address,
/// walking the descent from the base cell. Returns whether the result may
/// have overflowed the face's bounded region.
pub(crate) fn index_to_face_ijk_on_home_face(h: HexIndex, fijk: &mut FaceIJK) -> bool {
  let res = h.resolution();
  let base_cell = h.base_cell();

  // A hexagon base cell centered on its face at resolution 0, or one whose
  // home coordinates are the face origin, cannot overflow the face.
  let possible_overage = is_base_cell_pentagon(base_cell)
    || !(res == 0 || (fijk.coord.i == 0 && fijk.coord.j == 0 && fijk.coord.k == 0));

  for r in 1..=res {
    if is_resolution_class_iii(r) {
      fijk.coord.down_ap7();
    } else {
      fijk.coord.down_ap7r();
    }
    fijk.coord.neighbor(h.digit(r));
  }

  possible_overage
}
