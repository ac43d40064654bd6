//! Core value types shared across the crate.

use crate::constants::MAX_CELL_BNDRY_VERTS;
use crate::error::GeoHexError;
use std::fmt;

/// A 64-bit grid index.
///
/// Depending on its mode bits the same representation addresses a cell, a
/// directed edge or a cell vertex. Equality, ordering and hashing are those
/// of the underlying integer.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HexIndex(pub u64);

/// The all-zero index, used to signal "no index".
pub const NULL_INDEX: HexIndex = HexIndex(0);

impl fmt::LowerHex for HexIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(&self.0, f)
  }
}

impl fmt::Display for HexIndex {
  /// Canonical string form: lowercase hexadecimal, no prefix.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:x}", self.0)
  }
}

impl std::str::FromStr for HexIndex {
  type Err = GeoHexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    crate::index::string::index_from_string(s)
  }
}

/// Geographic coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
  /// Latitude in radians, in [-pi/2, pi/2].
  pub lat: f64,
  /// Longitude in radians, wrapped to (-pi, pi].
  pub lng: f64,
}

/// The geographic boundary polygon of a cell, in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBoundary {
  /// Number of vertices actually present in `verts`.
  pub num_verts: usize,
  /// Boundary vertices; entries past `num_verts` are not significant.
  pub verts: [LatLng; MAX_CELL_BNDRY_VERTS],
}

impl Default for CellBoundary {
  fn default() -> Self {
    Self { num_verts: 0, verts: [LatLng::default(); MAX_CELL_BNDRY_VERTS] }
  }
}

/// Two-axis hexagon coordinates relative to a local origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordIJ {
  pub i: i32,
  pub j: i32,
}

/// Cube coordinates addressing hexagons: three axes spaced 120 degrees
/// apart. The normalized form keeps every component non-negative with at
/// least one component zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordIJK {
  pub i: i32,
  pub j: i32,
  pub k: i32,
}

impl CoordIJK {
  pub const fn new(i: i32, j: i32, k: i32) -> Self {
    Self { i, j, k }
  }
}

/// An icosahedron face number together with IJK coordinates in that face's
/// face-centered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceIJK {
  /// Icosahedron face number, 0..=19.
  pub face: i32,
  /// IJK coordinates on that face.
  pub coord: CoordIJK,
}

/// 2D Cartesian vector on a face plane.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2d {
  pub x: f64,
  pub y: f64,
}

/// 3D Cartesian vector on or near the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3d {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// A move between a cell and one of its neighbors, or between a parent cell
/// center and one of its children. Digit 7 is the out-of-range sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr))]
pub enum Direction {
  /// No movement.
  #[default]
  Center = 0,
  /// K-axis direction. The missing direction of every pentagon.
  KAxes = 1,
  /// J-axis direction.
  JAxes = 2,
  /// J+K direction.
  JkAxes = 3,
  /// I-axis direction.
  IAxes = 4,
  /// I+K direction.
  IkAxes = 5,
  /// I+J direction.
  IjAxes = 6,
  /// Out-of-range sentinel; also fills digits beyond an index's resolution.
  Invalid = 7,
}

impl Direction {
  /// All traversal directions, in digit order.
  pub(crate) const NEIGHBOR_DIRECTIONS: [Direction; 6] = [
    Direction::KAxes,
    Direction::JAxes,
    Direction::JkAxes,
    Direction::IAxes,
    Direction::IkAxes,
    Direction::IjAxes,
  ];

  /// Converts a raw digit in 0..=7 to a `Direction`.
  #[inline]
  pub(crate) fn from_digit(digit: u8) -> Self {
    match digit {
      0 => Direction::Center,
      1 => Direction::KAxes,
      2 => Direction::JAxes,
      3 => Direction::JkAxes,
      4 => Direction::IAxes,
      5 => Direction::IkAxes,
      6 => Direction::IjAxes,
      _ => Direction::Invalid,
    }
  }

  /// Rotates the direction 60 degrees counter-clockwise.
  #[inline]
  #[must_use]
  pub(crate) fn rotate_60ccw(self) -> Self {
    match self {
      Direction::KAxes => Direction::IkAxes,
      Direction::IkAxes => Direction::IAxes,
      Direction::IAxes => Direction::IjAxes,
      Direction::IjAxes => Direction::JAxes,
      Direction::JAxes => Direction::JkAxes,
      Direction::JkAxes => Direction::KAxes,
      other => other,
    }
  }

  /// Rotates the direction 60 degrees clockwise.
  #[inline]
  #[must_use]
  pub(crate) fn rotate_60cw(self) -> Self {
    match self {
      Direction::KAxes => Direction::JkAxes,
      Direction::JkAxes => Direction::JAxes,
      Direction::JAxes => Direction::IjAxes,
      Direction::IjAxes => Direction::IAxes,
      Direction::IAxes => Direction::IkAxes,
      Direction::IkAxes => Direction::KAxes,
      other => other,
    }
  }
}

impl TryFrom<u8> for Direction {
  type Error = GeoHexError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    if value > 7 {
      return Err(GeoHexError::Domain);
    }
    Ok(Direction::from_digit(value))
  }
}
