//! 3D Cartesian vector operations on the unit sphere.

use crate::types::{LatLng, Vec3d};

impl Vec3d {
  pub(crate) const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }

  /// Spherical-to-Cartesian conversion onto the unit sphere.
  #[inline]
  pub(crate) fn from_geo(geo: &LatLng) -> Self {
    let r = geo.lat.cos();
    Self { x: geo.lng.cos() * r, y: geo.lng.sin() * r, z: geo.lat.sin() }
  }

  /// Squared Euclidean distance to another point.
  #[inline]
  pub(crate) fn square_dist(&self, other: &Vec3d) -> f64 {
    let dx = self.x - other.x;
    let dy = self.y - other.y;
    let dz = self.z - other.z;
    dx * dx + dy * dy + dz * dz
  }

  /// Cartesian-to-spherical conversion, assuming a point on the unit
  /// sphere. Longitude is 0 at the poles.
  #[inline]
  pub(crate) fn to_geo(&self) -> LatLng {
    let lat = self.z.clamp(-1.0, 1.0).asin();
    let lng = if self.x == 0.0 && self.y == 0.0 { 0.0 } else { self.y.atan2(self.x) };
    LatLng { lat, lng }
  }
}
