//! Grid distance and straight-line cell paths via local IJK coordinates.

use crate::coords::ijk::cube_round;
use crate::error::GeoHexError;
use crate::index::validity::is_valid_cell;
use crate::local_ijk::{cell_to_local_ijk, local_ijk_to_cell};
use crate::types::{HexIndex, NULL_INDEX};

/// Grid distance between two cells of the same resolution.
///
/// May fail for cells that are very far apart or separated by pentagon
/// distortion the local frame cannot unfold.
pub fn grid_distance(origin: HexIndex, destination: HexIndex) -> Result<i32, GeoHexError> {
  if !is_valid_cell(origin) || !is_valid_cell(destination) {
    return Err(GeoHexError::CellInvalid);
  }
  let origin_ijk = cell_to_local_ijk(origin, origin)?;
  let destination_ijk = cell_to_local_ijk(origin, destination)?;
  Ok(origin_ijk.distance_to(&destination_ijk))
}

/// Number of cells in the path from `start` to `end`, i.e. the grid
/// distance plus one.
pub fn grid_path_size(start: HexIndex, end: HexIndex) -> Result<i32, GeoHexError> {
  Ok(grid_distance(start, end)? + 1)
}

/// Fills `out` with the line of cells from `start` to `end` inclusive,
/// returning the number written.
///
/// The path is found by linear interpolation between the endpoints' cube
/// coordinates in the local frame of `start`; each sample is rounded to
/// the containing cell. The path is not necessarily unique on the
/// hexagonal grid, but it is deterministic.
pub fn grid_path(start: HexIndex, end: HexIndex, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  let distance = grid_distance(start, end)?;
  let size = distance as usize + 1;
  if out.len() < size {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut start_ijk = cell_to_local_ijk(start, start)?;
  let mut end_ijk = cell_to_local_ijk(start, end)?;
  start_ijk.to_cube();
  end_ijk.to_cube();

  let steps = f64::from(distance.max(1));
  let i_step = f64::from(end_ijk.i - start_ijk.i) / steps;
  let j_step = f64::from(end_ijk.j - start_ijk.j) / steps;
  let k_step = f64::from(end_ijk.k - start_ijk.k) / steps;

  for n in 0..=distance {
    let t = f64::from(n);
    let mut sample = cube_round(
      f64::from(start_ijk.i) + i_step * t,
      f64::from(start_ijk.j) + j_step * t,
      f64::from(start_ijk.k) + k_step * t,
    );
    sample.from_cube();
    out[n as usize] = local_ijk_to_cell(start, &sample)?;
  }

  Ok(size)
}

/// Allocating form of [`grid_path`].
pub fn grid_path_vec(start: HexIndex, end: HexIndex) -> Result<Vec<HexIndex>, GeoHexError> {
  let size = grid_path_size(start, end)? as usize;
  let mut out = vec![NULL_INDEX; size];
  let count = grid_path(start, end, &mut out)?;
  out.truncate(count);
  Ok(out)
}
