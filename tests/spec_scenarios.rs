//! End-to-end scenarios with literal inputs and known outputs.

use geohex::{
  cell_boundary, cell_to_geo, cells_to_directed_edge, compact_vec, geo_to_cell, grid_distance,
  grid_path_vec, is_pentagon, is_valid_cell, k_ring_vec, neighbors, res0_cells, uncompact_vec,
  Direction, GeoHexError, HexIndex, LatLng, NULL_INDEX,
};

#[test]
fn paris_at_res_9() {
  let paris = LatLng::from_degrees(48.8566, 2.3522);
  let cell = geo_to_cell(&paris, 9).unwrap();
  assert_eq!(cell, HexIndex(0x891fb466257ffff));
}

#[test]
fn paris_neighbors_are_adjacent() {
  let cell = HexIndex(0x891fb466257ffff);
  let mut out = [NULL_INDEX; 6];
  let count = neighbors(cell, &mut out).unwrap();
  assert_eq!(count, 6);
  for &n in &out {
    assert_eq!(grid_distance(cell, n), Ok(1));
  }
}

#[test]
fn known_cell_fields() {
  let cell = HexIndex(0x85283473fffffff);
  assert!(is_valid_cell(cell));
  assert_eq!(cell.resolution(), 5);
  assert_eq!(cell.base_cell(), 20);
  assert_eq!(cell.digit(1), Direction::Center);
  assert_eq!(cell.digit(2), Direction::IjAxes);
  assert_eq!(cell.digit(3), Direction::IAxes);
  assert_eq!(cell.digit(4), Direction::JkAxes);
  assert_eq!(cell.digit(5), Direction::IAxes);
  for r in 6..=15 {
    assert_eq!(cell.digit(r), Direction::Invalid);
  }
  assert!(!is_pentagon(cell));
  assert_eq!(cell_boundary(cell).unwrap().num_verts, 6);
}

#[test]
fn pentagon_base_cell_4() {
  let pentagon = HexIndex(0x8009fffffffffff);
  assert!(is_pentagon(pentagon));
  assert_eq!(pentagon.base_cell(), 4);

  let ring = k_ring_vec(pentagon, 1).unwrap();
  assert_eq!(ring.len(), 6, "pentagon plus exactly five neighbors");

  let mut out = [NULL_INDEX; 6];
  assert_eq!(neighbors(pentagon, &mut out), Ok(5));

  // Edges to the five actual neighbors succeed.
  for &n in &out[..5] {
    assert!(cells_to_directed_edge(pentagon, n).is_ok());
  }

  // An edge bit pattern pointing into the pentagon's deleted direction is
  // not a valid directed edge.
  let mut k_edge = pentagon.0;
  k_edge = (k_edge & !(0xF << 59)) | (2 << 59); // directed edge mode
  k_edge = (k_edge & !(0x7 << 56)) | (1 << 56); // k-axes direction
  assert!(!geohex::is_valid_directed_edge(HexIndex(k_edge)));
}

#[test]
fn path_to_self() {
  let cell = HexIndex(0x85283473fffffff);
  assert_eq!(grid_path_vec(cell, cell), Ok(vec![cell]));
  assert_eq!(grid_distance(cell, cell), Ok(0));
}

#[test]
fn res0_uncompact_compact_round_trip() {
  let mut cells = [NULL_INDEX; 122];
  res0_cells(&mut cells);

  let uncompacted = uncompact_vec(&cells, 1).unwrap();
  assert_eq!(uncompacted.len(), 842, "110 hexagons * 7 + 12 pentagons * 6");

  let mut compacted = compact_vec(&uncompacted).unwrap();
  compacted.sort_unstable();
  let mut expected = cells.to_vec();
  expected.sort_unstable();
  assert_eq!(compacted, expected);
}

#[test]
fn invalid_inputs_yield_specific_errors() {
  assert_eq!(cell_to_geo(NULL_INDEX), Err(GeoHexError::CellInvalid));
  assert_eq!(
    geo_to_cell(&LatLng::from_degrees(91.0, 0.0), 5),
    Err(GeoHexError::LatLngDomain)
  );
  assert_eq!(
    geo_to_cell(&LatLng::from_degrees(0.0, 0.0), 16),
    Err(GeoHexError::ResDomain)
  );
}
