//! Local IJK coordinates: expressing one cell's position in a coordinate
//! frame anchored on another cell's base cell, across face boundaries.
//!
//! The local frame is the origin cell's base cell coordinate system; the
//! origin itself maps to its own in-base-cell coordinates, so callers that
//! need an origin-centered frame subtract `cell_to_local_ijk(origin,
//! origin)`.

use crate::base_cells::{
  base_cell_direction, base_cell_neighbor, is_base_cell_pentagon, is_base_cell_polar_pentagon,
  BASE_CELL_NEIGHBOR_60CCW_ROTS, INVALID_BASE_CELL,
};
use crate::constants::{CELL_MODE, INDEX_INIT, NUM_BASE_CELLS};
use crate::error::GeoHexError;
use crate::index::validity::is_valid_cell;
use crate::index::{index_to_face_ijk_on_home_face, is_resolution_class_iii};
use crate::types::{CoordIJ, CoordIJK, Direction, FaceIJK, HexIndex};

/// Clockwise rotations to apply to local coordinates when unfolding across
/// a pentagon, indexed by `[leading digit][direction]`.
#[rustfmt::skip]
static PENTAGON_ROTATIONS: [[i32; 7]; 7] = [
  [0, -1, 0, 0, 0, 0, 0],       // center
  [-1, -1, -1, -1, -1, -1, -1], // k-axes (deleted)
  [0, -1, 0, 0, 0, 1, 0],       // j-axes
  [0, -1, 0, 0, 1, 1, 0],       // jk-axes
  [0, -1, 0, 5, 0, 0, 0],       // i-axes
  [0, -1, 5, 5, 0, 0, 0],       // ik-axes
  [0, -1, 0, 0, 0, 0, 0],       // ij-axes
];

/// Counter-clockwise rotations for the reverse (local-to-cell) direction.
#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],        // center
  [-1, -1, -1, -1, -1, -1, -1], // k-axes (deleted)
  [0, 1, 0, 0, 0, 0, 0],        // j-axes
  [0, 1, 0, 0, 0, 1, 0],        // jk-axes
  [0, 5, 0, 0, 0, 0, 0],        // i-axes
  [0, 5, 0, 5, 0, 0, 0],        // ik-axes
  [0, 0, 0, 0, 0, 0, 0],        // ij-axes
];

/// Reverse rotations when the index is on a non-polar pentagon, indexed by
/// `[reverse direction][index leading digit]`.
#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE_NONPOLAR: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, 1, 0, 0, 0, 0, 0],
  [0, 1, 0, 0, 0, 1, 0],
  [0, 5, 0, 0, 0, 0, 0],
  [0, 1, 0, 5, 1, 1, 0],
  [0, 0, 0, 0, 0, 0, 0],
];

/// Reverse rotations when the index is on a polar pentagon.
#[rustfmt::skip]
static PENTAGON_ROTATIONS_REVERSE_POLAR: [[i32; 7]; 7] = [
  [0, 0, 0, 0, 0, 0, 0],
  [-1, -1, -1, -1, -1, -1, -1],
  [0, 1, 1, 1, 1, 1, 1],
  [0, 1, 0, 0, 0, 1, 0],
  [0, 1, 0, 0, 1, 1, 1],
  [0, 1, 0, 5, 1, 1, 0],
  [0, 1, 1, 0, 1, 1, 1],
];

/// Leading digit / direction pairs whose unfolding across a pentagon is
/// ambiguous; such pairs fail rather than risk a wrong answer.
#[rustfmt::skip]
static FAILED_DIRECTIONS: [[bool; 7]; 7] = [
  [false, false, false, false, false, false, false],
  [false, false, false, false, false, false, false],
  [false, false, false, false, true,  true,  false],
  [false, false, false, false, true,  false, true],
  [false, false, true,  true,  false, false, false],
  [false, false, true,  false, false, false, true],
  [false, false, false, true,  false, true,  false],
];

/// Computes the IJK coordinates of `index` in the local frame anchored on
/// `origin`'s base cell.
pub(crate) fn cell_to_local_ijk(origin: HexIndex, index: HexIndex) -> Result<CoordIJK, GeoHexError> {
  let res = origin.resolution();
  if res != index.resolution() {
    return Err(GeoHexError::ResMismatch);
  }

  let origin_base_cell = origin.base_cell();
  let base_cell = index.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&origin_base_cell) || !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return Err(GeoHexError::CellInvalid);
  }

  // Direction from the origin base cell to the index base cell.
  let mut dir = Direction::Center;
  let mut rev_dir = Direction::Center;
  if origin_base_cell != base_cell {
    dir = base_cell_direction(origin_base_cell, base_cell);
    if dir == Direction::Invalid {
      // The base cells are not neighbors; the local frame cannot reach.
      return Err(GeoHexError::Failed);
    }
    rev_dir = base_cell_direction(base_cell, origin_base_cell);
    debug_assert_ne!(rev_dir, Direction::Invalid);
  }

  let origin_on_pent = is_base_cell_pentagon(origin_base_cell);
  let index_on_pent = is_base_cell_pentagon(base_cell);

  let mut index = index;
  if dir != Direction::Center {
    // Rotate the index into the orientation of the origin base cell,
    // clockwise to undo the rotation into its own base cell.
    let base_cell_rotations =
      BASE_CELL_NEIGHBOR_60CCW_ROTS[origin_base_cell as usize][dir as usize];
    if index_on_pent {
      for _ in 0..base_cell_rotations {
        index = index.rotate_pent_60cw();
        rev_dir = rev_dir.rotate_60cw();
        if rev_dir == Direction::KAxes {
          rev_dir = rev_dir.rotate_60cw();
        }
      }
    } else {
      for _ in 0..base_cell_rotations {
        index = index.rotate_60cw();
        rev_dir = rev_dir.rotate_60cw();
      }
    }
  }

  // Build coordinates in base cell coordinate space; the face is unused.
  let mut index_fijk = FaceIJK::default();
  index_to_face_ijk_on_home_face(index, &mut index_fijk);

  if dir != Direction::Center {
    debug_assert_ne!(base_cell, origin_base_cell);
    debug_assert!(!(origin_on_pent && index_on_pent));

    let mut pentagon_rotations = 0;
    let mut direction_rotations = 0;

    if origin_on_pent {
      let origin_leading = origin.leading_non_zero_digit();
      if FAILED_DIRECTIONS[origin_leading as usize][dir as usize] {
        return Err(GeoHexError::Failed);
      }
      direction_rotations = PENTAGON_ROTATIONS[origin_leading as usize][dir as usize];
      pentagon_rotations = direction_rotations;
    } else if index_on_pent {
      let index_leading = index.leading_non_zero_digit();
      if FAILED_DIRECTIONS[index_leading as usize][rev_dir as usize] {
        return Err(GeoHexError::Failed);
      }
      pentagon_rotations = PENTAGON_ROTATIONS[rev_dir as usize][index_leading as usize];
    }

    if pentagon_rotations < 0 || direction_rotations < 0 {
      return Err(GeoHexError::Failed);
    }

    for _ in 0..pentagon_rotations {
      index_fijk.coord.rotate_60cw();
    }

    // Offset between the two base cells at this resolution.
    let mut offset = CoordIJK::default();
    offset.neighbor(dir);
    for r in (0..res).rev() {
      if is_resolution_class_iii(r + 1) {
        offset.down_ap7();
      } else {
        offset.down_ap7r();
      }
    }

    if origin_on_pent {
      for _ in 0..direction_rotations {
        offset.rotate_60cw();
      }
    }

    index_fijk.coord = index_fijk.coord.add(&offset);
    index_fijk.coord.normalize();
  } else if origin_on_pent && index_on_pent {
    // Same pentagon base cell; rotate by the leading digits alone.
    debug_assert_eq!(base_cell, origin_base_cell);

    let origin_leading = origin.leading_non_zero_digit();
    let index_leading = index.leading_non_zero_digit();
    if FAILED_DIRECTIONS[origin_leading as usize][index_leading as usize] {
      return Err(GeoHexError::Failed);
    }

    let rotations = PENTAGON_ROTATIONS[origin_leading as usize][index_leading as usize];
    if rotations < 0 {
      return Err(GeoHexError::Failed);
    }
    for _ in 0..rotations {
      index_fijk.coord.rotate_60cw();
    }
  }

  Ok(index_fijk.coord)
}

/// Recovers a cell index from local IJK coordinates anchored on `origin`'s
/// base cell. Inverse of [`cell_to_local_ijk`].
pub(crate) fn local_ijk_to_cell(origin: HexIndex, ijk: &CoordIJK) -> Result<HexIndex, GeoHexError> {
  let res = origin.resolution();
  let origin_base_cell = origin.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&origin_base_cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let origin_on_pent = is_base_cell_pentagon(origin_base_cell);

  let mut out = HexIndex(INDEX_INIT);
  out.set_mode(CELL_MODE);
  out.set_resolution(res);

  if res == 0 {
    if ijk.i > 1 || ijk.j > 1 || ijk.k > 1 {
      // Out of range for a direct base cell neighbor.
      return Err(GeoHexError::Failed);
    }
    let dir = ijk.to_digit();
    if dir == Direction::Invalid {
      return Err(GeoHexError::Failed);
    }
    let base_cell = base_cell_neighbor(origin_base_cell, dir);
    if base_cell == INVALID_BASE_CELL {
      return Err(GeoHexError::Pentagon);
    }
    out.set_base_cell(base_cell);
    return Ok(out);
  }

  // Build the index from finest resolution up, peeling one digit per
  // level. What remains at the top is the offset to the base cell.
  let mut ijk_copy = *ijk;
  for r in (0..res).rev() {
    let last_ijk = ijk_copy;
    if is_resolution_class_iii(r + 1) {
      ijk_copy.up_ap7();
    } else {
      ijk_copy.up_ap7r();
    }
    let mut last_center = ijk_copy;
    if is_resolution_class_iii(r + 1) {
      last_center.down_ap7();
    } else {
      last_center.down_ap7r();
    }

    let mut diff = last_ijk.sub(&last_center);
    diff.normalize();
    out.set_digit(r + 1, diff.to_digit());
  }

  // ijk_copy now holds the base cell offset in the origin's system.
  if ijk_copy.i > 1 || ijk_copy.j > 1 || ijk_copy.k > 1 {
    return Err(GeoHexError::Failed);
  }

  let mut dir = ijk_copy.to_digit();
  if dir == Direction::Invalid {
    return Err(GeoHexError::Failed);
  }
  let mut base_cell = base_cell_neighbor(origin_base_cell, dir);
  // A missing neighbor can only mean the origin is a pentagon and the
  // offset points into the deleted wedge; pentagons never neighbor each
  // other, so any found neighbor is a hexagon or our own base cell.
  let index_on_pent = base_cell != INVALID_BASE_CELL && is_base_cell_pentagon(base_cell);

  if dir != Direction::Center {
    // Unwarp the base cell direction for pentagon distortion, then rotate
    // the index into the destination base cell's coordinate space.
    let mut pentagon_rotations = 0;
    if origin_on_pent {
      let origin_leading = origin.leading_non_zero_digit();
      pentagon_rotations = PENTAGON_ROTATIONS_REVERSE[origin_leading as usize][dir as usize];
      if pentagon_rotations < 0 {
        return Err(GeoHexError::CellInvalid);
      }
      for _ in 0..pentagon_rotations {
        dir = dir.rotate_60ccw();
      }
      // If the direction still points into the deleted wedge there is no
      // cell at these coordinates.
      if dir == Direction::KAxes {
        return Err(GeoHexError::Pentagon);
      }
      base_cell = base_cell_neighbor(origin_base_cell, dir);
      debug_assert_ne!(base_cell, INVALID_BASE_CELL);
      debug_assert!(!is_base_cell_pentagon(base_cell));
    }
    if base_cell == INVALID_BASE_CELL {
      return Err(GeoHexError::Pentagon);
    }

    let base_cell_rotations =
      BASE_CELL_NEIGHBOR_60CCW_ROTS[origin_base_cell as usize][dir as usize];
    debug_assert!(base_cell_rotations >= 0);

    if index_on_pent {
      let rev_dir = base_cell_direction(base_cell, origin_base_cell);
      debug_assert_ne!(rev_dir, Direction::Invalid);

      for _ in 0..base_cell_rotations {
        out = out.rotate_60ccw();
      }

      let index_leading = out.leading_non_zero_digit();
      let table = if is_base_cell_polar_pentagon(base_cell) {
        &PENTAGON_ROTATIONS_REVERSE_POLAR
      } else {
        &PENTAGON_ROTATIONS_REVERSE_NONPOLAR
      };
      let rotations = table[rev_dir as usize][index_leading as usize];
      if rotations < 0 {
        return Err(GeoHexError::CellInvalid);
      }
      for _ in 0..rotations {
        out = out.rotate_pent_60ccw();
      }
    } else {
      for _ in 0..pentagon_rotations {
        out = out.rotate_pent_60ccw();
      }
      for _ in 0..base_cell_rotations {
        out = out.rotate_60ccw();
      }
    }
  } else if origin_on_pent && index_on_pent {
    let origin_leading = origin.leading_non_zero_digit();
    let index_leading = out.leading_non_zero_digit();
    let rotations = PENTAGON_ROTATIONS_REVERSE[origin_leading as usize][index_leading as usize];
    if rotations < 0 {
      return Err(GeoHexError::CellInvalid);
    }
    for _ in 0..rotations {
      out = out.rotate_60ccw();
    }
  }

  if index_on_pent && out.leading_non_zero_digit() == Direction::KAxes {
    // The recovered index sits in the deleted subsequence.
    return Err(GeoHexError::Pentagon);
  }

  out.set_base_cell(base_cell);
  Ok(out)
}

/// Computes the two-axis local IJ coordinates of `index` relative to
/// `origin`. `mode` is reserved and must be 0.
pub fn cell_to_local_ij(
  origin: HexIndex,
  index: HexIndex,
  mode: u32,
) -> Result<CoordIJ, GeoHexError> {
  if mode != 0 {
    return Err(GeoHexError::OptionInvalid);
  }
  if !is_valid_cell(origin) || !is_valid_cell(index) {
    return Err(GeoHexError::CellInvalid);
  }
  let ijk = cell_to_local_ijk(origin, index)?;
  Ok(ijk.to_ij())
}

/// Recovers a cell from two-axis local IJ coordinates relative to
/// `origin`. `mode` is reserved and must be 0.
pub fn local_ij_to_cell(
  origin: HexIndex,
  ij: &CoordIJ,
  mode: u32,
) -> Result<HexIndex, GeoHexError> {
  if mode != 0 {
    return Err(GeoHexError::OptionInvalid);
  }
  if !is_valid_cell(origin) {
    return Err(GeoHexError::CellInvalid);
  }
  let ijk = CoordIJK::from_ij(ij);
  local_ijk_to_cell(origin, &ijk)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::index::base_cell_to_cell;
  use crate::indexing::geo_to_cell;
  use crate::types::LatLng;

  fn sf_cell(res: i32) -> HexIndex {
    geo_to_cell(&LatLng::from_degrees(37.779, -122.419), res).unwrap()
  }

  #[test]
  fn identity_round_trip() {
    let origin = sf_cell(5);
    let ijk = cell_to_local_ijk(origin, origin).unwrap();
    let recovered = local_ijk_to_cell(origin, &ijk).unwrap();
    assert_eq!(recovered, origin);
  }

  #[test]
  fn neighbor_round_trips() {
    let origin = sf_cell(5);
    let mut ring = [crate::types::NULL_INDEX; 7];
    let count = crate::traversal::k_ring(origin, 1, &mut ring).unwrap();
    for &cell in &ring[..count] {
      let ijk = cell_to_local_ijk(origin, cell).unwrap();
      let recovered = local_ijk_to_cell(origin, &ijk).unwrap();
      assert_eq!(recovered, cell, "local round trip for {cell:x}");
    }
  }

  #[test]
  fn res_mismatch_rejected() {
    assert_eq!(cell_to_local_ijk(sf_cell(5), sf_cell(6)), Err(GeoHexError::ResMismatch));
  }

  #[test]
  fn local_ij_identity() {
    let origin = sf_cell(5);
    let ij = cell_to_local_ij(origin, origin, 0).unwrap();
    let recovered = local_ij_to_cell(origin, &ij, 0).unwrap();
    assert_eq!(recovered, origin);
  }

  #[test]
  fn nonzero_mode_rejected() {
    let origin = sf_cell(5);
    assert_eq!(cell_to_local_ij(origin, origin, 1), Err(GeoHexError::OptionInvalid));
    assert_eq!(
      local_ij_to_cell(origin, &CoordIJ { i: 0, j: 0 }, 7),
      Err(GeoHexError::OptionInvalid)
    );
  }

  #[test]
  fn cross_base_cell_frame() {
    // Resolution 0: local frames between neighboring base cells resolve.
    let origin = base_cell_to_cell(15);
    for digit in 1..7u8 {
      let dir = Direction::from_digit(digit);
      let neighbor_bc = base_cell_neighbor(15, dir);
      let neighbor = base_cell_to_cell(neighbor_bc);
      let ijk = cell_to_local_ijk(origin, neighbor).unwrap();
      let recovered = local_ijk_to_cell(origin, &ijk).unwrap();
      assert_eq!(recovered, neighbor, "base cell frame towards {neighbor_bc}");
    }
  }
}
