//! k-ring enumeration: all cells within grid distance k of an origin.

use crate::constants::NUM_CELLS_MAX_RES;
use crate::error::GeoHexError;
use crate::index::validity::is_valid_cell;
use crate::traversal::neighbors::neighbor_rotations;
use crate::types::{Direction, HexIndex, NULL_INDEX};
use std::collections::{HashSet, VecDeque};

/// A k-ring radius that covers every cell at the finest resolution; rings
/// this large are capped at the total cell count.
const K_ALL_CELLS_AT_MAX_RES: i32 = 13_780_510;

/// Upper bound on the number of cells within distance `k` of any origin:
/// `3k(k+1) + 1`. Rings around pentagons are smaller.
pub fn max_k_ring_size(k: i32) -> Result<i64, GeoHexError> {
  if k < 0 {
    return Err(GeoHexError::Domain);
  }
  if k >= K_ALL_CELLS_AT_MAX_RES {
    return Ok(NUM_CELLS_MAX_RES);
  }
  let k = i64::from(k);
  Ok(3 * k * (k + 1) + 1)
}

/// Breadth-first enumeration of cells within distance `k` of `origin`,
/// recording each cell's distance. The closure receives cells in
/// non-decreasing distance order.
fn k_ring_internal<F>(origin: HexIndex, k: i32, mut emit: F) -> Result<usize, GeoHexError>
where
  F: FnMut(usize, HexIndex, i32) -> Result<(), GeoHexError>,
{
  let mut seen: HashSet<HexIndex> = HashSet::new();
  let mut queue: VecDeque<(HexIndex, i32)> = VecDeque::new();

  seen.insert(origin);
  queue.push_back((origin, 0));
  emit(0, origin, 0)?;
  let mut count = 1;

  while let Some((cell, distance)) = queue.pop_front() {
    if distance >= k {
      continue;
    }
    for dir in Direction::NEIGHBOR_DIRECTIONS {
      let mut rotations = 0;
      let neighbor = match neighbor_rotations(cell, dir, &mut rotations) {
        Ok(n) => n,
        // No neighbor in the pentagon's deleted direction.
        Err(GeoHexError::Pentagon) => continue,
        Err(e) => return Err(e),
      };
      if !seen.insert(neighbor) {
        continue;
      }
      queue.push_back((neighbor, distance + 1));
      emit(count, neighbor, distance + 1)?;
      count += 1;
    }
  }
  Ok(count)
}

/// Fills `out` with all cells within grid distance `k` of `origin`,
/// returning the number written. The output order is deterministic but
/// callers should compare results as sets.
pub fn k_ring(origin: HexIndex, k: i32, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  if !is_valid_cell(origin) {
    return Err(GeoHexError::CellInvalid);
  }
  let max_size = max_k_ring_size(k)?;
  if (out.len() as i64) < max_size {
    return Err(GeoHexError::BufferTooSmall);
  }

  k_ring_internal(origin, k, |i, cell, _| {
    out[i] = cell;
    Ok(())
  })
}

/// Like [`k_ring`] but also records each cell's grid distance from the
/// origin in `distances`.
pub fn k_ring_distances(
  origin: HexIndex,
  k: i32,
  out: &mut [HexIndex],
  distances: &mut [i32],
) -> Result<usize, GeoHexError> {
  if !is_valid_cell(origin) {
    return Err(GeoHexError::CellInvalid);
  }
  let max_size = max_k_ring_size(k)?;
  if (out.len() as i64) < max_size || (distances.len() as i64) < max_size {
    return Err(GeoHexError::BufferTooSmall);
  }

  k_ring_internal(origin, k, |i, cell, distance| {
    out[i] = cell;
    distances[i] = distance;
    Ok(())
  })
}

/// Allocating form of [`k_ring`].
pub fn k_ring_vec(origin: HexIndex, k: i32) -> Result<Vec<HexIndex>, GeoHexError> {
  if !is_valid_cell(origin) {
    return Err(GeoHexError::CellInvalid);
  }
  let max_size = max_k_ring_size(k)? as usize;
  let mut out = vec![NULL_INDEX; max_size];
  let count = k_ring(origin, k, &mut out)?;
  out.truncate(count);
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indexing::geo_to_cell;
  use crate::traversal::grid_distance;
  use crate::types::LatLng;

  fn sf_cell(res: i32) -> HexIndex {
    geo_to_cell(&LatLng::from_degrees(37.779265, -122.419277), res).unwrap()
  }

  #[test]
  fn max_size_formula() {
    assert_eq!(max_k_ring_size(0), Ok(1));
    assert_eq!(max_k_ring_size(1), Ok(7));
    assert_eq!(max_k_ring_size(2), Ok(19));
    assert_eq!(max_k_ring_size(-1), Err(GeoHexError::Domain));
    assert_eq!(max_k_ring_size(K_ALL_CELLS_AT_MAX_RES), Ok(NUM_CELLS_MAX_RES));
  }

  #[test]
  fn k_zero_is_origin_only() {
    let origin = sf_cell(9);
    assert_eq!(k_ring_vec(origin, 0), Ok(vec![origin]));
  }

  #[test]
  fn hexagon_rings_are_full() {
    let origin = sf_cell(9);
    for k in 1..=3 {
      let ring = k_ring_vec(origin, k).unwrap();
      assert_eq!(ring.len() as i64, max_k_ring_size(k).unwrap(), "full ring at k={k}");
      for &cell in &ring {
        let d = grid_distance(origin, cell).unwrap();
        assert!(d <= k, "cell {cell:x} within distance {k}");
      }
    }
  }

  #[test]
  fn pentagon_rings_are_smaller() {
    let pentagon = HexIndex(0x8009fffffffffff);
    let ring = k_ring_vec(pentagon, 1).unwrap();
    assert_eq!(ring.len(), 6, "pentagon plus its five neighbors");
  }

  #[test]
  fn distances_match_bfs_depth() {
    let origin = sf_cell(9);
    let max = max_k_ring_size(2).unwrap() as usize;
    let mut cells = vec![NULL_INDEX; max];
    let mut dists = vec![0; max];
    let count = k_ring_distances(origin, 2, &mut cells, &mut dists).unwrap();
    assert_eq!(count, 19);
    for i in 0..count {
      assert_eq!(grid_distance(origin, cells[i]), Ok(dists[i]));
    }
  }

  #[test]
  fn buffer_too_small() {
    let origin = sf_cell(9);
    let mut out = [NULL_INDEX; 6];
    assert_eq!(k_ring(origin, 1, &mut out), Err(GeoHexError::BufferTooSmall));
  }
}
