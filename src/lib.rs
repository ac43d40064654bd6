#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)]

//! `geohex` is a hierarchical hexagonal geospatial indexing grid.
//!
//! The Earth's surface is partitioned into cells across 16 resolutions,
//! derived from a spherical icosahedron tiled by hexagons with twelve
//! pentagons at the icosahedron vertices. Every cell, cell vertex and
//! directed cell edge is addressed by a 64-bit [`HexIndex`].
//!
//! The engine is stateless: all operations are free functions over value
//! types, backed by compile-time constant tables.

mod base_cells;
pub mod constants;
mod coords;
mod edge;
mod error;
mod geo;
mod hierarchy;
mod index;
mod indexing;
mod inspection;
mod local_ijk;
mod math;
mod measures;
mod region;
mod traversal;
mod types;
mod vertex;

pub use error::GeoHexError;
pub use types::{
  CellBoundary, CoordIJ, CoordIJK, Direction, FaceIJK, HexIndex, LatLng, Vec2d, Vec3d, NULL_INDEX,
};

pub use geo::{
  degs_to_rads, great_circle_distance_km, great_circle_distance_m, great_circle_distance_rads,
  rads_to_degs,
};

pub use index::is_resolution_class_iii;
pub use index::string::{index_from_string, index_to_string, index_to_string_buf};
pub use index::validity::{is_pentagon, is_valid_cell, is_valid_directed_edge, is_valid_vertex};

pub use indexing::{cell_boundary, cell_to_geo, geo_to_cell};

pub use hierarchy::{
  cell_children_count, cell_to_center_child, cell_to_child_pos, cell_to_children,
  cell_to_children_vec, cell_to_parent, child_pos_to_cell,
};

pub use local_ijk::{cell_to_local_ij, local_ij_to_cell};

pub use traversal::{
  are_neighbor_cells, grid_distance, grid_path, grid_path_size, grid_path_vec, k_ring,
  k_ring_distances, k_ring_vec, max_k_ring_size, neighbors,
};

pub use vertex::{cell_to_vertex, cell_to_vertices, vertex_to_geo};

pub use edge::{
  cells_to_directed_edge, directed_edge_boundary, directed_edge_destination, directed_edge_origin,
};

pub use measures::{
  cell_area_km2, cell_area_m2, cell_area_rads2, exact_edge_length_km, exact_edge_length_m,
  exact_edge_length_rads, hexagon_area_avg_km2, hexagon_area_avg_m2, hexagon_edge_length_avg_km,
  hexagon_edge_length_avg_m,
};

pub use region::{
  compact, compact_vec, max_polyfill_size, point_inside_polygon, polyfill, polyfill_vec, uncompact,
  uncompact_size, uncompact_vec,
};

pub use inspection::{is_res_class_iii, num_cells, pentagon_count, pentagons, res0_cells};
