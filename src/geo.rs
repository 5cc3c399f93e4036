//! Coordinate type, planar distance and bearing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::DistanceMetric;

/// A geographic position in decimal degrees.
///
/// Serialized as `[lng, lat]`, the order GeoJSON and directions services use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Linear interpolation in degree space. `ratio` 0 yields `self`, 1 yields `other`.
    #[inline]
    pub fn lerp(self, other: Coordinate, ratio: f64) -> Coordinate {
        // Endpoints are returned verbatim so boundary progress is exact.
        if ratio <= 0.0 {
            return self;
        }
        if ratio >= 1.0 {
            return other;
        }
        Coordinate {
            lng: self.lng + (other.lng - self.lng) * ratio,
            lat: self.lat + (other.lat - self.lat) * ratio,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.lng, c.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}

/// Euclidean distance in raw degree space.
///
/// Not a physical length, but proportional to one over short segments, which
/// is all the progress model needs to split a polyline by travelled fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl DistanceMetric for Planar {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        let dx = from.lng - to.lng;
        let dy = from.lat - to.lat;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Initial great-circle bearing from `from` to `to`, in degrees `[0, 360)`
/// clockwise from north.
pub fn bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles
    if deg >= 360.0 { 0.0 } else { deg }
}
