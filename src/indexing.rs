//! Public conversions between geographic coordinates and cell indexes.

use crate::constants::{MAX_RESOLUTION, NUM_HEX_VERTS, NUM_PENT_VERTS};
use crate::coords::face_ijk::{
  face_ijk_pent_to_cell_boundary, face_ijk_to_cell_boundary, face_ijk_to_geo, geo_to_face_ijk,
};
use crate::error::GeoHexError;
use crate::geo::validate_lat_lng;
use crate::index::validity::{is_pentagon, is_valid_cell};
use crate::index::{face_ijk_to_index, index_to_face_ijk};
use crate::types::{CellBoundary, HexIndex, LatLng, NULL_INDEX};

/// Finds the cell containing a geographic point at the given resolution.
///
/// The latitude must be within [-pi/2, pi/2]; longitudes outside (-pi, pi]
/// are accepted and treated modulo the full circle by the projection.
pub fn geo_to_cell(geo: &LatLng, res: i32) -> Result<HexIndex, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  validate_lat_lng(geo)?;

  let fijk = geo_to_face_ijk(geo, res);
  let h = face_ijk_to_index(&fijk, res);
  if h == NULL_INDEX {
    return Err(GeoHexError::Failed);
  }
  Ok(h)
}

/// Center point of a cell in geographic coordinates.
pub fn cell_to_geo(cell: HexIndex) -> Result<LatLng, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let fijk = index_to_face_ijk(cell)?;
  Ok(face_ijk_to_geo(&fijk, cell.resolution()))
}

/// Boundary polygon of a cell, clockwise. Hexagons produce 6 vertices,
/// pentagons 5; Class III cells crossing an icosahedron edge gain an
/// extra vertex per crossing, up to a total of 10.
pub fn cell_boundary(cell: HexIndex) -> Result<CellBoundary, GeoHexError> {
  if !is_valid_cell(cell) {
    return Err(GeoHexError::CellInvalid);
  }
  let fijk = index_to_face_ijk(cell)?;
  let mut boundary = CellBoundary::default();
  if is_pentagon(cell) {
    face_ijk_pent_to_cell_boundary(&fijk, cell.resolution(), 0, NUM_PENT_VERTS, &mut boundary);
  } else {
    face_ijk_to_cell_boundary(&fijk, cell.resolution(), 0, NUM_HEX_VERTS, &mut boundary);
  }
  Ok(boundary)
}
