//! Polygon fill: enumerating all cells whose centers lie inside a
//! spherical polygon.
//!
//! The algorithm traces the polygon edges with grid lines, finds one
//! interior seed cell next to the trace, and flood-fills inward. The
//! polygon is a single closed loop of vertices; the last vertex connects
//! implicitly back to the first.

use crate::error::GeoHexError;
use crate::indexing::{cell_to_geo, geo_to_cell};
use crate::traversal::{grid_distance, grid_path_size, grid_path_vec, neighbors};
use crate::types::{HexIndex, LatLng, NULL_INDEX};
use std::collections::{HashSet, VecDeque};
use std::f64::consts::PI;

/// Whether a point lies inside the polygon, by longitude-ray crossing
/// count. Edges spanning more than half the circle are unwrapped across
/// the antimeridian.
#[must_use]
pub fn point_inside_polygon(point: &LatLng, polygon: &[LatLng]) -> bool {
  if polygon.len() < 3 {
    return false;
  }

  let mut crossings = 0;
  for i in 0..polygon.len() {
    let p1 = &polygon[i];
    let p2 = &polygon[(i + 1) % polygon.len()];

    // Order the edge endpoints south to north.
    let (a, b) = if p1.lat < p2.lat { (p1, p2) } else { (p2, p1) };

    if point.lat <= a.lat || point.lat > b.lat {
      continue;
    }

    let mut lng_span = b.lng - a.lng;
    if lng_span.abs() > PI {
      // The edge crosses the antimeridian; unwrap the shorter way around.
      lng_span += if lng_span > 0.0 { -2.0 * PI } else { 2.0 * PI };
    }

    let val = lng_span * (point.lat - a.lat) - (b.lat - a.lat) * (point.lng - a.lng);
    if val > 0.0 {
      crossings += 1;
    }
  }

  crossings % 2 == 1
}

/// Upper bound on the number of cells [`polyfill`] can produce for the
/// polygon, derived from the grid span of its bounding box plus the size
/// of the edge trace.
pub fn max_polyfill_size(polygon: &[LatLng], res: i32) -> Result<usize, GeoHexError> {
  if polygon.len() < 3 {
    return Err(GeoHexError::Domain);
  }

  let mut min_lat = f64::MAX;
  let mut max_lat = f64::MIN;
  let mut min_lng = f64::MAX;
  let mut max_lng = f64::MIN;
  for p in polygon {
    min_lat = min_lat.min(p.lat);
    max_lat = max_lat.max(p.lat);
    min_lng = min_lng.min(p.lng);
    max_lng = max_lng.max(p.lng);
  }

  let top_left = geo_to_cell(&LatLng::new(max_lat, min_lng), res)?;
  let top_right = geo_to_cell(&LatLng::new(max_lat, max_lng), res)?;
  let bottom_left = geo_to_cell(&LatLng::new(min_lat, min_lng), res)?;

  let width = grid_distance(top_left, top_right).unwrap_or(0) as usize;
  let height = grid_distance(top_left, bottom_left).unwrap_or(0) as usize;

  // Area of the bounding parallelogram in grid space, padded for grid
  // distortion and irregular shapes.
  let estimate = (width + 2) * (height + 2) + 12;

  let mut trace_size = 0usize;
  for i in 0..polygon.len() {
    let p1 = geo_to_cell(&polygon[i], res)?;
    let p2 = geo_to_cell(&polygon[(i + 1) % polygon.len()], res)?;
    trace_size += grid_path_size(p1, p2).unwrap_or(1) as usize;
  }

  Ok(estimate + trace_size)
}

/// Cells whose insertion order tracks discovery order, with constant-time
/// membership. Keeps the output deterministic for identical inputs.
#[derive(Default)]
struct CellSet {
  ordered: Vec<HexIndex>,
  members: HashSet<HexIndex>,
}

impl CellSet {
  fn insert(&mut self, cell: HexIndex) -> bool {
    if self.members.insert(cell) {
      self.ordered.push(cell);
      true
    } else {
      false
    }
  }

  fn contains(&self, cell: &HexIndex) -> bool {
    self.members.contains(cell)
  }
}

/// Fills `out` with all cells at `res` whose centers lie inside the
/// polygon, returning the number written. The output order is
/// deterministic for identical inputs but otherwise unspecified.
pub fn polyfill(polygon: &[LatLng], res: i32, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  if polygon.len() < 3 {
    return Err(GeoHexError::Domain);
  }
  let max_size = max_polyfill_size(polygon, res)?;
  if out.len() < max_size {
    return Err(GeoHexError::BufferTooSmall);
  }

  let mut found = CellSet::default();

  // Trace the polygon edges with grid lines. A segment whose path cannot
  // be computed (distant endpoints across pentagon distortion) is skipped;
  // the fill recovers the missing cells from the inside.
  for i in 0..polygon.len() {
    let p1 = geo_to_cell(&polygon[i], res)?;
    let p2 = geo_to_cell(&polygon[(i + 1) % polygon.len()], res)?;
    if let Ok(path) = grid_path_vec(p1, p2) {
      for cell in path {
        found.insert(cell);
      }
    }
  }

  // Find one interior seed: a neighbor of the trace whose center is
  // inside the polygon.
  let mut seed = None;
  let mut neighbor_buf = [NULL_INDEX; 6];
  'seed_search: for i in 0..found.ordered.len() {
    let boundary_cell = found.ordered[i];
    let count = neighbors(boundary_cell, &mut neighbor_buf)?;
    for &neighbor in &neighbor_buf[..count] {
      if found.contains(&neighbor) {
        continue;
      }
      let center = cell_to_geo(neighbor)?;
      if point_inside_polygon(&center, polygon) {
        seed = Some(neighbor);
        break 'seed_search;
      }
    }
  }

  // Flood-fill the interior. Without a seed the polygon is too small to
  // have one and the trace is the complete result.
  if let Some(seed) = seed {
    let mut queue = VecDeque::new();
    found.insert(seed);
    queue.push_back(seed);

    while let Some(cell) = queue.pop_front() {
      let count = neighbors(cell, &mut neighbor_buf)?;
      for &neighbor in &neighbor_buf[..count] {
        if found.contains(&neighbor) {
          continue;
        }
        let center = cell_to_geo(neighbor)?;
        if point_inside_polygon(&center, polygon) {
          found.insert(neighbor);
          queue.push_back(neighbor);
        }
      }
    }
  }

  if found.ordered.len() > out.len() {
    return Err(GeoHexError::BufferTooSmall);
  }
  out[..found.ordered.len()].copy_from_slice(&found.ordered);
  Ok(found.ordered.len())
}

/// Allocating form of [`polyfill`].
pub fn polyfill_vec(polygon: &[LatLng], res: i32) -> Result<Vec<HexIndex>, GeoHexError> {
  let max_size = max_polyfill_size(polygon, res)?;
  let mut out = vec![NULL_INDEX; max_size];
  let count = polyfill(polygon, res, &mut out)?;
  out.truncate(count);
  Ok(out)
}
