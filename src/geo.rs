//! Geographic coordinate arithmetic: azimuths, great-circle distances and
//! angle normalization.

use crate::constants::{EARTH_RADIUS_KM, EPSILON_RAD, M_2PI};
use crate::error::GeoHexError;
use crate::types::LatLng;
use std::f64::consts::{FRAC_PI_2, PI};

/// Converts an angle in degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * PI / 180.0
}

/// Converts an angle in radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * 180.0 / PI
}

impl LatLng {
  /// Builds a coordinate from radians.
  pub const fn new(lat: f64, lng: f64) -> Self {
    Self { lat, lng }
  }

  /// Builds a coordinate from degrees.
  #[must_use]
  pub fn from_degrees(lat_degs: f64, lng_degs: f64) -> Self {
    Self { lat: degs_to_rads(lat_degs), lng: degs_to_rads(lng_degs) }
  }

  /// Whether both components are within [`EPSILON_RAD`] of the other's.
  #[inline]
  pub(crate) fn almost_equals(&self, other: &LatLng) -> bool {
    (self.lat - other.lat).abs() < EPSILON_RAD && (self.lng - other.lng).abs() < EPSILON_RAD
  }
}

/// Normalizes an angle in radians into [0, 2*pi).
#[inline]
pub(crate) fn pos_angle_rads(rads: f64) -> f64 {
  let mut tmp = if rads < 0.0 { rads + M_2PI } else { rads };
  while tmp >= M_2PI {
    tmp -= M_2PI;
  }
  tmp
}

/// Wraps a longitude into (-pi, pi].
#[inline]
pub(crate) fn constrain_lng(mut lng: f64) -> f64 {
  while lng > PI {
    lng -= M_2PI;
  }
  while lng < -PI {
    lng += M_2PI;
  }
  lng
}

/// Azimuth in radians from `p1` to `p2`.
pub(crate) fn geo_azimuth_rads(p1: &LatLng, p2: &LatLng) -> f64 {
  ((p2.lng - p1.lng).cos() * p2.lat.cos())
    .atan2(p1.lat.cos() * p2.lat.sin() - p1.lat.sin() * p2.lat.cos() * (p2.lng - p1.lng).cos())
}

/// Computes the point at the given azimuth and angular `distance` from `p1`.
pub(crate) fn geo_az_distance_rads(p1: &LatLng, az: f64, distance: f64) -> LatLng {
  if distance < EPSILON_RAD {
    return *p1;
  }

  let az = pos_angle_rads(az);
  let mut p2 = LatLng::default();

  if az < EPSILON_RAD || (az - PI).abs() < EPSILON_RAD {
    // Due north or due south.
    p2.lat = if az < EPSILON_RAD { p1.lat + distance } else { p1.lat - distance };

    if (p2.lat - FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = FRAC_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = -FRAC_PI_2;
      p2.lng = 0.0;
    } else {
      p2.lng = constrain_lng(p1.lng);
    }
  } else {
    let sin_lat =
      (p1.lat.sin() * distance.cos() + p1.lat.cos() * distance.sin() * az.cos()).clamp(-1.0, 1.0);
    p2.lat = sin_lat.asin();

    if (p2.lat - FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = FRAC_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + FRAC_PI_2).abs() < EPSILON_RAD {
      p2.lat = -FRAC_PI_2;
      p2.lng = 0.0;
    } else {
      let cos_p1_lat = p1.lat.cos();
      let inv_cos_p2_lat = 1.0 / p2.lat.cos();
      let sin_lng = (az.sin() * distance.sin() * inv_cos_p2_lat).clamp(-1.0, 1.0);
      let cos_lng =
        ((distance.cos() - p1.lat.sin() * p2.lat.sin()) / cos_p1_lat * inv_cos_p2_lat).clamp(-1.0, 1.0);
      p2.lng = constrain_lng(p1.lng + sin_lng.atan2(cos_lng));
    }
  }

  p2
}

/// Great-circle distance between two coordinates in radians, by the
/// haversine formula.
#[must_use]
pub fn great_circle_distance_rads(a: &LatLng, b: &LatLng) -> f64 {
  let sin_lat = ((b.lat - a.lat) * 0.5).sin();
  let sin_lng = ((b.lng - a.lng) * 0.5).sin();
  let h = (sin_lat * sin_lat + a.lat.cos() * b.lat.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance between two coordinates in kilometers.
#[must_use]
pub fn great_circle_distance_km(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_rads(a, b) * EARTH_RADIUS_KM
}

/// Great-circle distance between two coordinates in meters.
#[must_use]
pub fn great_circle_distance_m(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_km(a, b) * 1000.0
}

/// Validates a latitude/longitude argument: both components finite and
/// latitude within [-pi/2, pi/2]. Longitudes are not auto-wrapped.
pub(crate) fn validate_lat_lng(geo: &LatLng) -> Result<(), GeoHexError> {
  if !geo.lat.is_finite() || !geo.lng.is_finite() || geo.lat.abs() > FRAC_PI_2 + EPSILON_RAD {
    return Err(GeoHexError::LatLngDomain);
  }
  Ok(())
}
