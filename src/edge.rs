//! Directed-edge indexes: a single step from a cell to one of its
//! neighbors.
//!
//! A directed edge is the origin cell's bit pattern with the mode field
//! set to directed edge and the step direction (1..=6) packed into the
//! mode-dependent bits.

use crate::constants::{CELL_MODE, DIRECTED_EDGE_MODE};
use crate::error::GeoHexError;
use crate::index::is_resolution_class_iii;
use crate::index::validity::{is_pentagon, is_valid_cell, is_valid_directed_edge};
use crate::traversal::{direction_for_neighbor, neighbor_rotations};
use crate::types::{Direction, HexIndex, LatLng};
use crate::vertex::{cell_to_vertex, vertex_to_geo};

/// The two topological vertex numbers bounding an edge, keyed by grid
/// class and edge direction. Class III grids are rotated 30 degrees,
/// shifting which vertex pair each direction touches.
#[rustfmt::skip]
static EDGE_VERTEX_NUMS: [[[u8; 2]; 7]; 2] = [
  // Class II: center, k, j, jk, i, ik, ij
  [[0, 0], [3, 4], [4, 5], [5, 0], [0, 1], [1, 2], [2, 3]],
  // Class III
  [[0, 0], [2, 3], [3, 4], [4, 5], [5, 0], [0, 1], [1, 2]],
];

/// Builds the directed edge from `origin` towards the neighbor in `dir`.
pub(crate) fn directed_edge_from(origin: HexIndex, dir: Direction) -> Result<HexIndex, GeoHexError> {
  if dir == Direction::Center || dir == Direction::Invalid {
    return Err(GeoHexError::Domain);
  }
  if is_pentagon(origin) && dir == Direction::KAxes {
    // The pentagon's missing direction carries no edge.
    return Err(GeoHexError::Pentagon);
  }

  let mut edge = origin;
  edge.set_mode(DIRECTED_EDGE_MODE);
  edge.set_mode_dependent(dir as u8);
  Ok(edge)
}

/// Builds the directed edge between two neighboring cells.
///
/// Succeeds exactly when the grid distance between the cells is 1; the
/// edge direction is the local IJK unit vector from `origin` to
/// `destination`.
pub fn cells_to_directed_edge(
  origin: HexIndex,
  destination: HexIndex,
) -> Result<HexIndex, GeoHexError> {
  if !is_valid_cell(origin) || !is_valid_cell(destination) {
    return Err(GeoHexError::CellInvalid);
  }
  if origin.resolution() != destination.resolution() {
    return Err(GeoHexError::ResMismatch);
  }

  let dir = direction_for_neighbor(origin, destination);
  if dir == Direction::Invalid || dir == Direction::Center {
    return Err(GeoHexError::NotNeighbors);
  }
  directed_edge_from(origin, dir)
}

/// The origin cell of a directed edge.
pub fn directed_edge_origin(edge: HexIndex) -> Result<HexIndex, GeoHexError> {
  if !is_valid_directed_edge(edge) {
    return Err(GeoHexError::DirEdgeInvalid);
  }
  let mut origin = edge;
  origin.set_mode(CELL_MODE);
  origin.set_mode_dependent(0);
  Ok(origin)
}

/// The destination cell of a directed edge: the origin's neighbor in the
/// edge's direction.
pub fn directed_edge_destination(edge: HexIndex) -> Result<HexIndex, GeoHexError> {
  let origin = directed_edge_origin(edge)?;
  let dir = Direction::from_digit(edge.mode_dependent());
  let mut rotations = 0;
  neighbor_rotations(origin, dir, &mut rotations)
}

/// The two geographic vertices bounding a directed edge.
pub fn directed_edge_boundary(edge: HexIndex) -> Result<[LatLng; 2], GeoHexError> {
  let origin = directed_edge_origin(edge)?;
  let dir = Direction::from_digit(edge.mode_dependent());

  let class_iii = usize::from(is_resolution_class_iii(origin.resolution()));
  let [v0, v1] = EDGE_VERTEX_NUMS[class_iii][dir as usize];

  // Pentagons have five vertices; their vertex numbers wrap.
  let count = if is_pentagon(origin) { 5 } else { 6 };
  let vertex0 = cell_to_vertex(origin, v0 % count)?;
  let vertex1 = cell_to_vertex(origin, v1 % count)?;

  Ok([vertex_to_geo(vertex0)?, vertex_to_geo(vertex1)?])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::great_circle_distance_rads;
  use crate::indexing::geo_to_cell;
  use crate::traversal::{grid_distance, k_ring_vec, neighbors};
  use crate::types::{LatLng, NULL_INDEX};

  fn sf_cell(res: i32) -> HexIndex {
    geo_to_cell(&LatLng::from_degrees(37.779265, -122.419277), res).unwrap()
  }

  #[test]
  fn edge_round_trip() {
    let origin = sf_cell(9);
    let mut ring = [NULL_INDEX; 6];
    let count = neighbors(origin, &mut ring).unwrap();
    for &destination in &ring[..count] {
      let edge = cells_to_directed_edge(origin, destination).unwrap();
      assert!(is_valid_directed_edge(edge));
      assert_eq!(directed_edge_origin(edge), Ok(origin));
      assert_eq!(directed_edge_destination(edge), Ok(destination));
    }
  }

  #[test]
  fn non_neighbors_rejected() {
    let origin = sf_cell(9);
    let far = k_ring_vec(origin, 2)
      .unwrap()
      .into_iter()
      .find(|&c| grid_distance(origin, c) == Ok(2))
      .unwrap();
    assert_eq!(cells_to_directed_edge(origin, far), Err(GeoHexError::NotNeighbors));
    assert_eq!(cells_to_directed_edge(origin, origin), Err(GeoHexError::NotNeighbors));
  }

  #[test]
  fn pentagon_missing_direction_fails() {
    let pentagon = HexIndex(0x8009fffffffffff);
    assert_eq!(
      directed_edge_from(pentagon, Direction::KAxes),
      Err(GeoHexError::Pentagon)
    );
    // The other directions carry edges.
    for digit in 2..7u8 {
      assert!(directed_edge_from(pentagon, Direction::from_digit(digit)).is_ok());
    }
  }

  #[test]
  fn edge_boundary_spans_one_cell_edge() {
    let origin = sf_cell(8);
    let mut ring = [NULL_INDEX; 6];
    let count = neighbors(origin, &mut ring).unwrap();
    for &destination in &ring[..count] {
      let edge = cells_to_directed_edge(origin, destination).unwrap();
      let [a, b] = directed_edge_boundary(edge).unwrap();
      let length = great_circle_distance_rads(&a, &b);
      assert!(length > 0.0, "edge endpoints are distinct");
      // An edge is much shorter than the cell's diameter.
      let center = crate::indexing::cell_to_geo(origin).unwrap();
      let radius = great_circle_distance_rads(&center, &a);
      assert!(length < 3.0 * radius);
    }
  }

  #[test]
  fn invalid_edges_rejected() {
    assert_eq!(directed_edge_origin(NULL_INDEX), Err(GeoHexError::DirEdgeInvalid));
    assert_eq!(
      directed_edge_origin(HexIndex(0x85283473fffffff)),
      Err(GeoHexError::DirEdgeInvalid)
    );
  }
}
