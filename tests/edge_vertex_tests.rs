//! Directed edge and vertex mode behavior through the public surface.

use geohex::{
  cell_to_vertex, cell_to_vertices, cells_to_directed_edge, directed_edge_boundary,
  directed_edge_destination, directed_edge_origin, exact_edge_length_km, exact_edge_length_m,
  exact_edge_length_rads, geo_to_cell, great_circle_distance_rads, is_pentagon,
  is_valid_directed_edge, is_valid_vertex, k_ring_vec, neighbors, vertex_to_geo, GeoHexError,
  HexIndex, LatLng, NULL_INDEX,
};

fn sydney_cell(res: i32) -> HexIndex {
  geo_to_cell(&LatLng::from_degrees(-33.8688, 151.2093), res).unwrap()
}

#[test]
fn edges_to_all_neighbors() {
  let origin = sydney_cell(9);
  let mut ring = [NULL_INDEX; 6];
  let count = neighbors(origin, &mut ring).unwrap();
  assert_eq!(count, 6);

  for &destination in &ring {
    let edge = cells_to_directed_edge(origin, destination).unwrap();
    assert!(is_valid_directed_edge(edge));
    assert_eq!(directed_edge_origin(edge), Ok(origin));
    assert_eq!(directed_edge_destination(edge), Ok(destination));

    // The reverse edge is a different index with swapped endpoints.
    let reverse = cells_to_directed_edge(destination, origin).unwrap();
    assert_ne!(reverse, edge);
    assert_eq!(directed_edge_destination(reverse), Ok(origin));
  }
}

#[test]
fn edge_boundary_and_length() {
  let origin = sydney_cell(8);
  let mut ring = [NULL_INDEX; 6];
  neighbors(origin, &mut ring).unwrap();

  let edge = cells_to_directed_edge(origin, ring[0]).unwrap();
  let [a, b] = directed_edge_boundary(edge).unwrap();

  let rads = exact_edge_length_rads(edge).unwrap();
  assert!((rads - great_circle_distance_rads(&a, &b)).abs() < 1e-15);
  let km = exact_edge_length_km(edge).unwrap();
  let m = exact_edge_length_m(edge).unwrap();
  assert!((m - km * 1000.0).abs() < 1e-9 * m);
  assert!(km > 0.0);
}

#[test]
fn non_neighbor_edge_fails() {
  let origin = sydney_cell(9);
  let far = k_ring_vec(origin, 3)
    .unwrap()
    .into_iter()
    .find(|&c| geohex::grid_distance(origin, c) == Ok(3))
    .unwrap();
  assert_eq!(cells_to_directed_edge(origin, far), Err(GeoHexError::NotNeighbors));
}

#[test]
fn vertex_round_trips() {
  let cell = sydney_cell(7);
  let mut verts = [NULL_INDEX; 6];
  let count = cell_to_vertices(cell, &mut verts).unwrap();
  assert_eq!(count, 6);

  for (n, &v) in verts.iter().enumerate() {
    assert!(is_valid_vertex(v));
    assert_eq!(cell_to_vertex(cell, n as u8), Ok(v));
    let geo = vertex_to_geo(v).unwrap();
    assert!(geo.lat.is_finite() && geo.lng.is_finite());
  }
}

#[test]
fn pentagon_vertices() {
  let pentagon = HexIndex(0x8009fffffffffff);
  assert!(is_pentagon(pentagon));

  let mut verts = [NULL_INDEX; 6];
  assert_eq!(cell_to_vertices(pentagon, &mut verts), Ok(5));
  assert_eq!(cell_to_vertex(pentagon, 5), Err(GeoHexError::Domain));

  for &v in &verts[..5] {
    assert!(is_valid_vertex(v));
    let geo = vertex_to_geo(v).unwrap();
    assert!(geo.lat.is_finite());
  }
}

#[test]
fn edge_endpoints_lie_on_origin_boundary() {
  let origin = sydney_cell(6);
  let mut ring = [NULL_INDEX; 6];
  neighbors(origin, &mut ring).unwrap();
  let destination = ring[0];

  let edge = cells_to_directed_edge(origin, destination).unwrap();
  let [a, b] = directed_edge_boundary(edge).unwrap();

  let origin_boundary = geohex::cell_boundary(origin).unwrap();
  for endpoint in [a, b] {
    let on_origin = origin_boundary.verts[..origin_boundary.num_verts]
      .iter()
      .any(|v| great_circle_distance_rads(v, &endpoint) < 1e-9);
    assert!(on_origin, "edge endpoint lies on the origin boundary");
  }
}
