//! Grid traversal behavior: rings, paths and neighbor relations.

use geohex::{
  are_neighbor_cells, cell_to_local_ij, geo_to_cell, grid_distance, grid_path_vec, is_pentagon,
  k_ring, k_ring_distances, k_ring_vec, local_ij_to_cell, max_k_ring_size, neighbors, HexIndex,
  LatLng, NULL_INDEX,
};
use std::collections::HashSet;

fn nairobi(res: i32) -> HexIndex {
  geo_to_cell(&LatLng::from_degrees(-1.2921, 36.8219), res).unwrap()
}

#[test]
fn ring_growth_is_six_per_k() {
  let origin = nairobi(8);
  let mut previous = 1usize;
  for k in 1..=4 {
    let ring = k_ring_vec(origin, k).unwrap();
    assert_eq!(ring.len() - previous, 6 * k as usize, "ring {k} adds 6k cells");
    previous = ring.len();
  }
}

#[test]
fn rings_nest() {
  let origin = nairobi(8);
  let inner: HashSet<_> = k_ring_vec(origin, 2).unwrap().into_iter().collect();
  let outer: HashSet<_> = k_ring_vec(origin, 3).unwrap().into_iter().collect();
  assert!(inner.is_subset(&outer));
}

#[test]
fn ring_buffers_and_distances_agree() {
  let origin = nairobi(9);
  let max = max_k_ring_size(3).unwrap() as usize;
  let mut cells_a = vec![NULL_INDEX; max];
  let mut cells_b = vec![NULL_INDEX; max];
  let mut dists = vec![0i32; max];

  let count_a = k_ring(origin, 3, &mut cells_a).unwrap();
  let count_b = k_ring_distances(origin, 3, &mut cells_b, &mut dists).unwrap();
  assert_eq!(count_a, count_b);
  assert_eq!(cells_a[..count_a], cells_b[..count_b]);

  for i in 0..count_b {
    assert_eq!(grid_distance(origin, cells_b[i]), Ok(dists[i]));
  }
}

#[test]
fn neighbor_relation_is_symmetric() {
  let origin = nairobi(7);
  let mut out = [NULL_INDEX; 6];
  let count = neighbors(origin, &mut out).unwrap();
  for &n in &out[..count] {
    assert_eq!(are_neighbor_cells(origin, n), Ok(true));
    assert_eq!(are_neighbor_cells(n, origin), Ok(true));

    let mut back = [NULL_INDEX; 6];
    let back_count = neighbors(n, &mut back).unwrap();
    assert!(back[..back_count].contains(&origin), "neighbor lists are mutual");
  }
}

#[test]
fn pentagon_ring_two() {
  let pentagon = HexIndex(0x8009fffffffffff);
  assert!(is_pentagon(pentagon));
  let ring1 = k_ring_vec(pentagon, 1).unwrap();
  let ring2 = k_ring_vec(pentagon, 2).unwrap();
  assert_eq!(ring1.len(), 6);
  // A pentagon's second ring has 10 cells instead of 12.
  assert_eq!(ring2.len(), 16);
}

#[test]
fn paths_are_minimal() {
  let origin = nairobi(9);
  for destination in k_ring_vec(origin, 5).unwrap() {
    let Ok(path) = grid_path_vec(origin, destination) else {
      continue;
    };
    let d = grid_distance(origin, destination).unwrap();
    // A path cannot be shorter than the grid distance, and ours is exact.
    assert_eq!(path.len() as i32, d + 1);
    let unique: HashSet<_> = path.iter().collect();
    assert_eq!(unique.len(), path.len(), "path has no repeated cells");
  }
}

#[test]
fn local_ij_frames_cover_a_disk() {
  let origin = nairobi(8);
  for cell in k_ring_vec(origin, 3).unwrap() {
    let Ok(ij) = cell_to_local_ij(origin, cell, 0) else {
      continue;
    };
    assert_eq!(local_ij_to_cell(origin, &ij, 0), Ok(cell), "local IJ round trip for {cell:x}");
  }
  // The origin itself sits at a fixed coordinate in its own frame.
  let self_ij = cell_to_local_ij(origin, origin, 0).unwrap();
  let recovered = local_ij_to_cell(origin, &self_ij, 0).unwrap();
  assert_eq!(recovered, origin);
}

#[test]
fn distance_triangle_inequality() {
  let origin = nairobi(8);
  let ring = k_ring_vec(origin, 3).unwrap();
  let a = ring[ring.len() / 3];
  let b = ring[2 * ring.len() / 3];
  let dab = grid_distance(a, b).unwrap();
  let dao = grid_distance(a, origin).unwrap();
  let dob = grid_distance(origin, b).unwrap();
  assert!(dab <= dao + dob);
}
