//! Internal coordinate systems: IJK cube coordinates and face-centered
//! IJK addresses on the icosahedron.

pub mod face_ijk;
pub mod ijk;
