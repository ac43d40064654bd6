//! Vertex-mode indexes: addressing a single corner of a cell.
//!
//! A vertex index is the owner cell's bit pattern with the mode field set
//! to vertex and the vertex number (0..=5, 0..=4 for pentagons) packed
//! into the mode-dependent bits.

use crate::constants::{CELL_MODE, NUM_HEX_VERTS, NUM_PENT_VERTS, VERTEX_MODE};
use crate::coords::face_ijk::{
  adjust_overage_class_ii, adjust_pent_vert_overage, face_ijk_pent_to_verts, face_ijk_to_verts,
  hex2d_to_geo, Overage,
};
use crate::error::GeoHexError;
use crate::index::index_to_face_ijk;
use crate::index::validity::{is_pentagon, is_valid_cell, is_valid_vertex};
use crate::types::{FaceIJK, HexIndex, LatLng};

/// Number of topological vertices of a cell: 5 for pentagons, 6 otherwise.
fn vertex_count(cell: HexIndex) -> usize {
  if is_pentagon(cell) {
    NUM_PENT_VERTS
  } else {
    NUM_HEX_VERTS
  }
}

/// Builds the vertex index for one corner of a cell.
pub fn cell_to_vertex(cell: HexIndex, vertex_num: u8) -> Result<HexIndex, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  if usize::from(vertex_num) >= vertex_count(cell) {
    return Err(GeoHexError::Domain);
  }

  let mut vertex = cell;
  vertex.set_mode(VERTEX_MODE);
  vertex.set_mode_dependent(vertex_num);
  Ok(vertex)
}

/// Fills `out` with all vertex indexes of a cell, returning the number
/// written (5 for pentagons, 6 otherwise).
pub fn cell_to_vertices(cell: HexIndex, out: &mut [HexIndex]) -> Result<usize, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let count = vertex_count(cell);
  if out.len() < count {
    return Err(GeoHexError::BufferTooSmall);
  }
  for (n, slot) in out.iter_mut().take(count).enumerate() {
    *slot = cell_to_vertex(cell, n as u8)?;
  }
  Ok(count)
}

/// The owner cell of a vertex index.
pub(crate) fn vertex_owner(vertex: HexIndex) -> HexIndex {
  let mut owner = vertex;
  owner.set_mode(CELL_MODE);
  owner.set_mode_dependent(0);
  owner
}

/// Geographic position of a single cell vertex.
///
/// The vertex's face address is computed directly from the owner cell's
/// center rather than by deriving the whole boundary.
pub fn vertex_to_geo(vertex: HexIndex) -> Result<LatLng, GeoHexError> {
  if !is_valid_vertex(vertex) {
    return Err(GeoHexError::VertexInvalid);
  }

  let vertex_num = usize::from(vertex.mode_dependent());
  let owner = vertex_owner(vertex);
  let res = owner.resolution();

  let mut center = index_to_face_ijk(owner)?;
  let (fijk, adj_res) = if is_pentagon(owner) {
    let mut verts = [FaceIJK::default(); NUM_PENT_VERTS];
    let adj_res = face_ijk_pent_to_verts(&mut center, res, &mut verts);
    let mut fijk = verts[vertex_num];
    adjust_pent_vert_overage(&mut fijk, adj_res);
    (fijk, adj_res)
  } else {
    let mut verts = [FaceIJK::default(); NUM_HEX_VERTS];
    let adj_res = face_ijk_to_verts(&mut center, res, &mut verts);
    let mut fijk = verts[vertex_num];
    let _: Overage = adjust_overage_class_ii(&mut fijk, adj_res, false, true);
    (fijk, adj_res)
  };

  Ok(hex2d_to_geo(&fijk.coord.to_hex2d(), fijk.face, adj_res, true))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geo::great_circle_distance_rads;
  use crate::indexing::{cell_boundary, geo_to_cell};
  use crate::types::{LatLng, NULL_INDEX};

  #[test]
  fn vertex_numbers_in_range() {
    let hex_cell = HexIndex(0x85283473fffffff);
    for n in 0..6 {
      let v = cell_to_vertex(hex_cell, n).unwrap();
      assert!(is_valid_vertex(v));
      assert_eq!(vertex_owner(v), hex_cell);
    }
    assert_eq!(cell_to_vertex(hex_cell, 6), Err(GeoHexError::Domain));

    let pent_cell = HexIndex(0x8009fffffffffff);
    assert!(cell_to_vertex(pent_cell, 4).is_ok());
    assert_eq!(cell_to_vertex(pent_cell, 5), Err(GeoHexError::Domain));
  }

  #[test]
  fn vertices_counts() {
    let hex_cell = HexIndex(0x85283473fffffff);
    let mut out = [NULL_INDEX; 6];
    assert_eq!(cell_to_vertices(hex_cell, &mut out), Ok(6));

    let pent_cell = HexIndex(0x8009fffffffffff);
    assert_eq!(cell_to_vertices(pent_cell, &mut out), Ok(5));
  }

  #[test]
  fn distinct_vertices() {
    let cell = geo_to_cell(&LatLng::from_degrees(48.8566, 2.3522), 9).unwrap();
    let mut coords = Vec::new();
    for n in 0..6 {
      let v = cell_to_vertex(cell, n).unwrap();
      coords.push(vertex_to_geo(v).unwrap());
    }
    for a in 0..coords.len() {
      for b in (a + 1)..coords.len() {
        assert!(
          great_circle_distance_rads(&coords[a], &coords[b]) > 1e-10,
          "vertices {a} and {b} are distinct"
        );
      }
    }
  }

  #[test]
  fn vertex_geo_matches_boundary() {
    // Each vertex position appears among the cell's boundary vertices.
    let cell = geo_to_cell(&LatLng::from_degrees(37.779, -122.419), 6).unwrap();
    let boundary = cell_boundary(cell).unwrap();
    for n in 0..6 {
      let v = cell_to_vertex(cell, n).unwrap();
      let geo = vertex_to_geo(v).unwrap();
      let near_boundary_vert = boundary.verts[..boundary.num_verts]
        .iter()
        .any(|b| great_circle_distance_rads(b, &geo) < 1e-9);
      assert!(near_boundary_vert, "vertex {n} lies on the cell boundary");
    }
  }

  #[test]
  fn invalid_vertex_rejected() {
    assert_eq!(vertex_to_geo(NULL_INDEX), Err(GeoHexError::VertexInvalid));
    // A cell index is not a vertex index.
    assert_eq!(
      vertex_to_geo(HexIndex(0x85283473fffffff)),
      Err(GeoHexError::VertexInvalid)
    );
  }
}
