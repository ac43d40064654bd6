//! Structural invariants checked across many cells and resolutions.

use geohex::{
  are_neighbor_cells, cell_area_km2, cell_area_m2, cell_area_rads2, cell_boundary,
  cell_children_count, cell_to_center_child, cell_to_children_vec, cell_to_geo, cell_to_parent,
  geo_to_cell, grid_distance, grid_path_vec, index_from_string, index_to_string, is_pentagon,
  k_ring_vec, neighbors, num_cells, pentagons, res0_cells, HexIndex, LatLng, NULL_INDEX,
};
use std::collections::HashSet;

fn sample_cells(res: i32) -> Vec<HexIndex> {
  [
    (48.8566, 2.3522),    // Paris
    (37.7793, -122.4193), // San Francisco
    (-33.8688, 151.2093), // Sydney
    (64.1466, -21.9426),  // Reykjavik
    (-1.2921, 36.8219),   // Nairobi
    (89.9, 0.0),          // near the north pole
  ]
  .iter()
  .map(|&(lat, lng)| geo_to_cell(&LatLng::from_degrees(lat, lng), res).unwrap())
  .collect()
}

#[test]
fn center_round_trip() {
  for res in [0, 1, 2, 5, 9, 12, 15] {
    for cell in sample_cells(res) {
      let center = cell_to_geo(cell).unwrap();
      assert_eq!(
        geo_to_cell(&center, res),
        Ok(cell),
        "the nearest cell to a cell's center is the cell itself (res {res})"
      );
    }
  }
}

#[test]
fn parent_contains_child() {
  for cell in sample_cells(7) {
    for parent_res in 4..=7 {
      let parent = cell_to_parent(cell, parent_res).unwrap();
      assert_eq!(parent.resolution(), parent_res);
      let siblings = cell_to_children_vec(parent, 7).unwrap();
      assert!(siblings.contains(&cell), "cell appears among its ancestor's children");
    }
    // Ancestry reaches resolution 0.
    let root = cell_to_parent(cell, 0).unwrap();
    assert_eq!(root.resolution(), 0);
    assert_eq!(root.base_cell(), cell.base_cell());
  }
}

#[test]
fn children_count_and_center_child() {
  for cell in sample_cells(4) {
    for child_res in 4..=6 {
      let children = cell_to_children_vec(cell, child_res).unwrap();
      assert_eq!(children.len() as i64, cell_children_count(cell, child_res).unwrap());
      assert!(children.contains(&cell_to_center_child(cell, child_res).unwrap()));

      // Children partition: each child's parent is the original cell.
      for &child in &children {
        assert_eq!(cell_to_parent(child, 4), Ok(cell));
      }
    }
  }
}

#[test]
fn children_cover_parent_area() {
  // The child set's outline zigzags around the parent hexagon, so the
  // area sums agree only approximately.
  for cell in sample_cells(3) {
    let parent_area = cell_area_rads2(cell).unwrap();
    let child_area_sum: f64 = cell_to_children_vec(cell, 5)
      .unwrap()
      .iter()
      .map(|&c| cell_area_rads2(c).unwrap())
      .sum();
    let relative = (child_area_sum - parent_area).abs() / parent_area;
    assert!(relative < 1e-2, "children tile the parent (off by {relative})");
  }
}

#[test]
fn grid_distance_symmetry() {
  for cell in sample_cells(8) {
    for other in k_ring_vec(cell, 3).unwrap() {
      assert_eq!(grid_distance(cell, other), grid_distance(other, cell));
    }
    assert_eq!(grid_distance(cell, cell), Ok(0));
  }
}

#[test]
fn path_properties() {
  for cell in sample_cells(8) {
    for other in k_ring_vec(cell, 3).unwrap() {
      let Ok(path) = grid_path_vec(cell, other) else {
        continue;
      };
      let distance = grid_distance(cell, other).unwrap();
      assert_eq!(path.len() as i32, distance + 1);
      assert_eq!(path[0], cell);
      assert_eq!(*path.last().unwrap(), other);
      for pair in path.windows(2) {
        assert_eq!(are_neighbor_cells(pair[0], pair[1]), Ok(true));
      }
    }
  }
}

#[test]
fn neighbor_counts_and_distances() {
  let mut res0 = [NULL_INDEX; 122];
  res0_cells(&mut res0);
  for &cell in res0.iter().take(30) {
    let mut out = [NULL_INDEX; 6];
    let count = neighbors(cell, &mut out).unwrap();
    assert_eq!(count == 5, is_pentagon(cell));
    for &n in &out[..count] {
      assert_eq!(grid_distance(cell, n), Ok(1));
    }
  }
}

#[test]
fn boundary_counts_and_unit_sphere() {
  for res in [0, 1, 2, 5] {
    for cell in sample_cells(res) {
      let boundary = cell_boundary(cell).unwrap();
      if is_pentagon(cell) {
        assert!(boundary.num_verts >= 5);
      } else {
        assert!(boundary.num_verts >= 6);
      }
      assert!(boundary.num_verts <= 10);
      for vert in &boundary.verts[..boundary.num_verts] {
        assert!(vert.lat.abs() <= std::f64::consts::FRAC_PI_2 + 1e-12);
        assert!(vert.lng.abs() <= std::f64::consts::PI + 1e-12);
      }
    }
  }
}

#[test]
fn string_round_trip() {
  for res in [0, 7, 15] {
    for cell in sample_cells(res) {
      assert_eq!(index_from_string(&index_to_string(cell)), Ok(cell));
    }
  }
}

#[test]
fn exactly_122_base_cells_and_12_pentagons() {
  let mut res0 = [NULL_INDEX; 122];
  res0_cells(&mut res0);
  let unique: HashSet<_> = res0.iter().collect();
  assert_eq!(unique.len(), 122);
  assert_eq!(res0.iter().filter(|&&c| is_pentagon(c)).count(), 12);

  for res in [0, 3, 15] {
    let mut pents = [NULL_INDEX; 12];
    pentagons(res, &mut pents).unwrap();
    let unique: HashSet<_> = pents.iter().collect();
    assert_eq!(unique.len(), 12);
  }
}

#[test]
fn cell_count_formula() {
  assert_eq!(num_cells(0), Ok(2 + 120));
  assert_eq!(num_cells(1), Ok(2 + 120 * 7));
  assert_eq!(num_cells(2), Ok(2 + 120 * 49));
}

#[test]
fn area_units_are_consistent() {
  for cell in sample_cells(5) {
    let km2 = cell_area_km2(cell).unwrap();
    let m2 = cell_area_m2(cell).unwrap();
    assert!((m2 - km2 * 1e6).abs() <= 1e-6 * m2);
  }
}

#[test]
fn res0_cells_tile_the_sphere() {
  let mut res0 = [NULL_INDEX; 122];
  res0_cells(&mut res0);
  let total: f64 = res0.iter().map(|&c| cell_area_rads2(c).unwrap()).sum();
  let sphere = 4.0 * std::f64::consts::PI;
  assert!(
    ((total - sphere) / sphere).abs() < 1e-6,
    "res 0 cells cover the sphere: {total} vs {sphere}"
  );
}

#[test]
fn k_ring_matches_grid_distance() {
  for cell in sample_cells(9) {
    let k = 2;
    let ring: HashSet<_> = k_ring_vec(cell, k).unwrap().into_iter().collect();
    // Everything within distance k is in the ring, and vice versa.
    for &member in &ring {
      let d = grid_distance(cell, member).unwrap();
      assert!(d <= k);
    }
    for neighbor_ring_cell in k_ring_vec(cell, k + 1).unwrap() {
      let d = grid_distance(cell, neighbor_ring_cell).unwrap();
      assert_eq!(ring.contains(&neighbor_ring_cell), d <= k);
    }
  }
}
