//! Single-step neighbor traversal, including the digit rewriting needed
//! when a step crosses base cell and face boundaries.

use crate::base_cells::{
  base_cell_is_cw_offset, is_base_cell_pentagon, is_base_cell_polar_pentagon, BASE_CELL_DATA,
  BASE_CELL_NEIGHBORS, BASE_CELL_NEIGHBOR_60CCW_ROTS, INVALID_BASE_CELL,
};
use crate::constants::NUM_BASE_CELLS;
use crate::error::GeoHexError;
use crate::index::is_resolution_class_iii;
use crate::index::validity::{is_pentagon, is_valid_cell};
use crate::types::{Direction, HexIndex};
use crate::types::Direction::{Center as C, IAxes as I, IjAxes as IJ, IkAxes as IK, JAxes as J, JkAxes as JK, KAxes as K};

// Digit rewriting tables for moving a cell one step in a direction. "II"
// tables apply on Class III resolution digits, "III" on Class II, because
// the rotation of the finer grid relative to the parent alternates.

#[rustfmt::skip]
const NEW_DIGIT_II: [[Direction; 7]; 7] = [
  [C,  K,  J,  JK, I,  IK, IJ],
  [K,  I,  JK, IJ, IK, J,  C],
  [J,  JK, K,  I,  IJ, C,  IK],
  [JK, IJ, I,  IK, C,  K,  J],
  [I,  IK, IJ, C,  J,  JK, K],
  [IK, J,  C,  K,  JK, IJ, I],
  [IJ, C,  IK, J,  K,  I,  JK],
];

#[rustfmt::skip]
const NEW_ADJUSTMENT_II: [[Direction; 7]; 7] = [
  [C, C,  C,  C,  C,  C,  C],
  [C, K,  C,  K,  C,  IK, C],
  [C, C,  J,  JK, C,  C,  J],
  [C, K,  JK, JK, C,  C,  C],
  [C, C,  C,  C,  I,  I,  IJ],
  [C, IK, C,  C,  I,  IK, C],
  [C, C,  J,  C,  IJ, C,  IJ],
];

#[rustfmt::skip]
const NEW_DIGIT_III: [[Direction; 7]; 7] = [
  [C,  K,  J,  JK, I,  IK, IJ],
  [K,  J,  JK, I,  IK, IJ, C],
  [J,  JK, I,  IK, IJ, C,  K],
  [JK, I,  IK, IJ, C,  K,  J],
  [I,  IK, IJ, C,  K,  J,  JK],
  [IK, IJ, C,  K,  J,  JK, I],
  [IJ, C,  K,  J,  JK, I,  IK],
];

#[rustfmt::skip]
const NEW_ADJUSTMENT_III: [[Direction; 7]; 7] = [
  [C, C,  C,  C,  C,  C,  C],
  [C, K,  C,  JK, C,  K,  C],
  [C, C,  J,  J,  C,  C,  IJ],
  [C, JK, J,  JK, C,  C,  C],
  [C, C,  C,  C,  I,  IK, I],
  [C, K,  C,  C,  IK, IK, C],
  [C, C,  IJ, C,  I,  C,  IJ],
];

/// Moves one step from `origin` in `dir`, rewriting digits and, when the
/// step leaves the base cell, applying the neighboring base cell's
/// orientation.
///
/// `rotations` carries the accumulated ccw rotation of the caller's frame
/// relative to the origin's; it is updated with the rotations picked up by
/// this step. Returns [`GeoHexError::Pentagon`] when the step leads into a
/// pentagon's deleted wedge.
pub(crate) fn neighbor_rotations(
  origin: HexIndex,
  mut dir: Direction,
  rotations: &mut i32,
) -> Result<HexIndex, GeoHexError> {
  if dir == Direction::Center || dir == Direction::Invalid {
    return Err(GeoHexError::Failed);
  }

  *rotations = rotations.rem_euclid(6);
  for _ in 0..*rotations {
    dir = dir.rotate_60ccw();
  }

  let mut out = origin;
  let mut new_rotations = 0;
  let old_base_cell = out.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&old_base_cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let old_leading_digit = out.leading_non_zero_digit();

  // Rewrite digits from fine to coarse until the adjustment is absorbed,
  // possibly stepping into a neighboring base cell at the top.
  let mut r = out.resolution() - 1;
  loop {
    if r == -1 {
      if is_base_cell_pentagon(old_base_cell) && dir == Direction::KAxes {
        return Err(GeoHexError::Pentagon);
      }

      out.set_base_cell(BASE_CELL_NEIGHBORS[old_base_cell as usize][dir as usize]);
      new_rotations = BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][dir as usize];

      if out.base_cell() == INVALID_BASE_CELL {
        // The k neighbor of this hexagon is a pentagon; route through the
        // ik neighbor instead and rotate into its frame.
        out.set_base_cell(
          BASE_CELL_NEIGHBORS[old_base_cell as usize][Direction::IkAxes as usize],
        );
        new_rotations =
          BASE_CELL_NEIGHBOR_60CCW_ROTS[old_base_cell as usize][Direction::IkAxes as usize];

        out = out.rotate_60ccw();
        *rotations += 1;
      }
      break;
    }

    let old_digit = out.digit(r + 1);
    if old_digit == Direction::Invalid {
      return Err(GeoHexError::CellInvalid);
    }

    let next_dir;
    if is_resolution_class_iii(r + 1) {
      out.set_digit(r + 1, NEW_DIGIT_II[old_digit as usize][dir as usize]);
      next_dir = NEW_ADJUSTMENT_II[old_digit as usize][dir as usize];
    } else {
      out.set_digit(r + 1, NEW_DIGIT_III[old_digit as usize][dir as usize]);
      next_dir = NEW_ADJUSTMENT_III[old_digit as usize][dir as usize];
    }

    if next_dir == Direction::Center {
      break;
    }
    dir = next_dir;
    r -= 1;
  }

  let new_base_cell = out.base_cell();
  if is_base_cell_pentagon(new_base_cell) {
    let mut already_adjusted_k_subsequence = false;

    // Force rotation out of the missing k-axes subsequence.
    if out.leading_non_zero_digit() == Direction::KAxes {
      if old_base_cell != new_base_cell {
        // The step entered the pentagon across a base cell boundary;
        // rotate based on the face we arrived from.
        if base_cell_is_cw_offset(new_base_cell, BASE_CELL_DATA[old_base_cell as usize].home.face)
        {
          out = out.rotate_60cw();
        } else {
          out = out.rotate_60ccw();
        }
        already_adjusted_k_subsequence = true;
      } else {
        match old_leading_digit {
          // Undefined: the k direction is deleted at the pentagon center.
          Direction::Center => return Err(GeoHexError::Pentagon),
          Direction::JkAxes => {
            out = out.rotate_60ccw();
            *rotations += 1;
          }
          Direction::IkAxes => {
            out = out.rotate_60cw();
            *rotations += 5;
          }
          _ => return Err(GeoHexError::Failed),
        }
      }
    }

    for _ in 0..new_rotations {
      out = out.rotate_pent_60ccw();
    }

    if old_base_cell != new_base_cell {
      if is_base_cell_polar_pentagon(new_base_cell) {
        // Polar pentagons are orientated towards all neighbors except
        // base cells 8 and 118.
        if old_base_cell != 118
          && old_base_cell != 8
          && out.leading_non_zero_digit() != Direction::JkAxes
        {
          *rotations += 1;
        }
      } else if out.leading_non_zero_digit() == Direction::IkAxes && !already_adjusted_k_subsequence
      {
        *rotations += 1;
      }
    }
  } else {
    for _ in 0..new_rotations {
      out = out.rotate_60ccw();
    }
  }

  *rotations = (*rotations + new_rotations).rem_euclid(6);
  Ok(out)
}

/// Direction from `origin` to a directly adjacent cell, probing the six
/// neighbor slots. Returns [`Direction::Center`] for the cell itself and
/// [`Direction::Invalid`] when the cells are not neighbors.
pub(crate) fn direction_for_neighbor(origin: HexIndex, destination: HexIndex) -> Direction {
  if origin == destination {
    return Direction::Center;
  }

  // Pentagons have no k neighbor; start probing at j.
  let start = if is_pentagon(origin) { Direction::JAxes as u8 } else { Direction::KAxes as u8 };
  for digit in start..=Direction::IjAxes as u8 {
    let dir = Direction::from_digit(digit);
    let mut rotations = 0;
    match neighbor_rotations(origin, dir, &mut rotations) {
      Ok(neighbor) if neighbor == destination => return dir,
      _ => {}
    }
  }
  Direction::Invalid
}

/// Fills `out` with the neighbors of `origin`, ordered by direction.
/// Hexagons have 6 neighbors, pentagons 5. Returns the number written.
pub fn neighbors(origin: HexIndex, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  if !is_valid_cell(origin) {
    return Err(GeoHexError::CellInvalid);
  }
  let needed = if is_pentagon(origin) { 5 } else { 6 };
  if out.len() < needed {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut count = 0;
  for dir in Direction::NEIGHBOR_DIRECTIONS {
    let mut rotations = 0;
    match neighbor_rotations(origin, dir, &mut rotations) {
      Ok(neighbor) => {
        out[count] = neighbor;
        count += 1;
      }
      // The pentagon's missing direction is skipped, not an error.
      Err(GeoHexError::Pentagon) => {}
      Err(e) => return Err(e),
    }
  }
  debug_assert_eq!(count, needed);
  Ok(count)
}

/// Whether two cells share an edge.
pub fn are_neighbor_cells(origin: HexIndex, destination: HexIndex) -> Result<bool, GeoHexError> {
  if !is_valid_cell(origin) || !is_valid_cell(destination) {
    return Err(GeoHexError::CellInvalid);
  }
  if origin == destination {
    return Ok(false);
  }
  if origin.resolution() != destination.resolution() {
    return Err(GeoHexError::ResMismatch);
  }
  Ok(direction_for_neighbor(origin, destination) != Direction::Invalid)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::geo_to_cell;
  use crate::types::{LatLng, NULL_INDEX};

  fn sf_cell(res: i32) -> HexIndex {
    geo_to_cell(&LatLng::from_degrees(37.779265, -122.419277), res).unwrap()
  }

  #[test]
  fn hexagon_has_six_neighbors() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 6];
    assert_eq!(neighbors(origin, &mut out), Ok(6));
    for &n in &out {
      assert!(is_valid_cell(n));
      assert_ne!(n, origin);
    }
    // All distinct.
    let mut sorted = out;
    sorted.sort_unstable();
    assert!(sorted.windows(2).all(|w| w[0] != w[1]));
  }

  #[test]
  fn pentagon_has_five_neighbors() {
    let pentagon = HexIndex(0x8009fffffffffff);
    let mut out = [NULL_INDEX; 6];
    assert_eq!(neighbors(pentagon, &mut out), Ok(5));
    for &n in &out[..5] {
      assert!(is_valid_cell(n));
    }
  }

  #[test]
  fn direction_round_trip() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 6];
    let count = neighbors(origin, &mut out).unwrap();
    for &neighbor in &out[..count] {
      let dir = direction_for_neighbor(origin, neighbor);
      assert_ne!(dir, Direction::Invalid);
      let mut rotations = 0;
      assert_eq!(neighbor_rotations(origin, dir, &mut rotations), Ok(neighbor));
    }
  }

  #[test]
  fn pentagon_k_step_fails() {
    let pentagon = HexIndex(0x8009fffffffffff);
    let mut rotations = 0;
    assert_eq!(
      neighbor_rotations(pentagon, Direction::KAxes, &mut rotations),
      Err(GeoHexError::Pentagon)
    );
  }

  #[test]
  fn are_neighbor_cells_contract() {
    let origin = sf_cell(9);
    let mut ring = [NULL_INDEX; 6];
    let count = neighbors(origin, &mut ring).unwrap();
    for &n in &ring[..count] {
      assert_eq!(are_neighbor_cells(origin, n), Ok(true));
      assert_eq!(are_neighbor_cells(n, origin), Ok(true));
    }
    assert_eq!(are_neighbor_cells(origin, origin), Ok(false));
    assert_eq!(are_neighbor_cells(origin, sf_cell(8)), Err(GeoHexError::ResMismatch));
    assert_eq!(are_neighbor_cells(origin, NULL_INDEX), Err(GeoHexError::CellInvalid));
  }

  #[test]
  fn neighbors_buffer_too_small() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 5];
    assert_eq!(neighbors(origin, &mut out), Err(GeoHexError::BufferTooSmall));
  }
}
