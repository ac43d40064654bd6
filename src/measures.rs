//! Exact and average cell measures: areas and edge lengths.

use crate::constants::{
  EARTH_RADIUS_KM, HEX_AREA_AVG_KM2, HEX_AREA_AVG_M2, HEX_EDGE_LENGTH_AVG_KM,
  HEX_EDGE_LENGTH_AVG_M, MAX_RESOLUTION,
};
use crate::edge::directed_edge_boundary;
use crate::error::GeoHexError;
use crate::geo::great_circle_distance_rads;
use crate::indexing::{cell_boundary, cell_to_geo};
use crate::types::{HexIndex, LatLng};

/// Surface area of a spherical triangle from its three great-circle edge
/// lengths, by L'Huilier's theorem.
fn triangle_edge_lengths_to_area(a: f64, b: f64, c: f64) -> f64 {
  let mut s = (a + b + c) / 2.0;
  let a = (s - a) / 2.0;
  let b = (s - b) / 2.0;
  let c = (s - c) / 2.0;
  s /= 2.0;
  4.0 * (s.tan() * a.tan() * b.tan() * c.tan()).max(0.0).sqrt().atan()
}

/// Surface area of a spherical triangle given its vertices.
fn triangle_area(a: &LatLng, b: &LatLng, c: &LatLng) -> f64 {
  triangle_edge_lengths_to_area(
    great_circle_distance_rads(a, b),
    great_circle_distance_rads(b, c),
    great_circle_distance_rads(c, a),
  )
}

/// Exact area of a cell in square radians, computed by triangulating the
/// boundary around the cell center.
pub fn cell_area_rads2(cell: HexIndex) -> Result<f64, GeoHexError> {
  let center = cell_to_geo(cell)?;
  let boundary = cell_boundary(cell)?;

  let mut area = 0.0;
  for i in 0..boundary.num_verts {
    let j = (i + 1) % boundary.num_verts;
    area += triangle_area(&boundary.verts[i], &boundary.verts[j], &center);
  }
  Ok(area)
}

/// Exact area of a cell in square kilometers.
pub fn cell_area_km2(cell: HexIndex) -> Result<f64, GeoHexError> {
  Ok(cell_area_rads2(cell)? * EARTH_RADIUS_KM * EARTH_RADIUS_KM)
}

/// Exact area of a cell in square meters.
pub fn cell_area_m2(cell: HexIndex) -> Result<f64, GeoHexError> {
  Ok(cell_area_km2(cell)? * 1_000_000.0)
}

/// Exact great-circle length of a directed edge in radians.
pub fn exact_edge_length_rads(edge: HexIndex) -> Result<f64, GeoHexError> {
  let [a, b] = directed_edge_boundary(edge)?;
  Ok(great_circle_distance_rads(&a, &b))
}

/// Exact great-circle length of a directed edge in kilometers.
pub fn exact_edge_length_km(edge: HexIndex) -> Result<f64, GeoHexError> {
  Ok(exact_edge_length_rads(edge)? * EARTH_RADIUS_KM)
}

/// Exact great-circle length of a directed edge in meters.
pub fn exact_edge_length_m(edge: HexIndex) -> Result<f64, GeoHexError> {
  Ok(exact_edge_length_km(edge)? * 1000.0)
}

/// Average hexagon area at a resolution in square kilometers.
pub fn hexagon_area_avg_km2(res: i32) -> Result<f64, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  Ok(HEX_AREA_AVG_KM2[res as usize])
}

/// Average hexagon area at a resolution in square meters.
pub fn hexagon_area_avg_m2(res: i32) -> Result<f64, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  Ok(HEX_AREA_AVG_M2[res as usize])
}

/// Average hexagon edge length at a resolution in kilometers.
pub fn hexagon_edge_length_avg_km(res: i32) -> Result<f64, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  Ok(HEX_EDGE_LENGTH_AVG_KM[res as usize])
}

/// Average hexagon edge length at a resolution in meters.
pub fn hexagon_edge_length_avg_m(res: i32) -> Result<f64, GeoHexError> {
  if !(0..=MAX_RESOLUTION).contains(&res) {
    return Err(GeoHexError::ResDomain);
  }
  Ok(HEX_EDGE_LENGTH_AVG_M[res as usize])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::GeoHexError;

  #[test]
  fn unit_conversions_are_consistent() {
    let cell = HexIndex(0x85283473fffffff);
    let rads2 = cell_area_rads2(cell).unwrap();
    let km2 = cell_area_km2(cell).unwrap();
    let m2 = cell_area_m2(cell).unwrap();
    assert!((km2 - rads2 * EARTH_RADIUS_KM * EARTH_RADIUS_KM).abs() < 1e-9 * km2);
    assert!((m2 - km2 * 1e6).abs() < 1e-9 * m2);
  }

  #[test]
  fn res5_cell_area_near_average() {
    let cell = HexIndex(0x85283473fffffff);
    let area = cell_area_km2(cell).unwrap();
    let avg = hexagon_area_avg_km2(5).unwrap();
    assert!((area - avg).abs() < avg * 0.2, "cell area {area} near average {avg}");
  }

  #[test]
  fn avg_tables_are_monotonic() {
    for res in 1..=MAX_RESOLUTION {
      assert!(hexagon_area_avg_km2(res).unwrap() < hexagon_area_avg_km2(res - 1).unwrap());
      assert!(
        hexagon_edge_length_avg_m(res).unwrap() < hexagon_edge_length_avg_m(res - 1).unwrap()
      );
    }
    assert_eq!(hexagon_area_avg_km2(16), Err(GeoHexError::ResDomain));
    assert_eq!(hexagon_edge_length_avg_km(-1), Err(GeoHexError::ResDomain));
  }

  #[test]
  fn triangle_area_of_octant() {
    // An octant of the unit sphere has area pi/2.
    let a = LatLng::new(0.0, 0.0);
    let b = LatLng::new(0.0, std::f64::consts::FRAC_PI_2);
    let c = LatLng::new(std::f64::consts::FRAC_PI_2, 0.0);
    let area = triangle_area(&a, &b, &c);
    assert!((area - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
  }

  #[test]
  fn edge_length_positive() {
    let origin = crate::indexing::geo_to_cell(&LatLng::from_degrees(37.8, -122.4), 6).unwrap();
    let mut ring = [crate::types::NULL_INDEX; 6];
    let count = crate::traversal::neighbors(origin, &mut ring).unwrap();
    for &n in &ring[..count] {
      let edge = crate::edge::cells_to_directed_edge(origin, n).unwrap();
      let len_km = exact_edge_length_km(edge).unwrap();
      assert!(len_km > 0.0);
      // Same order of magnitude as the published average.
      let avg = hexagon_edge_length_avg_km(6).unwrap();
      assert!(len_km < avg * 10.0 && len_km > avg / 10.0);
    }
  }
}
