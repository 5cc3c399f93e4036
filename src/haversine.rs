//! Haversine great-circle distance.
//!
//! The optimizer's cost function and the straight-line fallback route both
//! use this. Ignores the road network entirely.

use rayon::prelude::*;

use crate::geo::Coordinate;
use crate::traits::{DistanceMatrixProvider, DistanceMetric};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Average driving speed assumption for straight-line ETAs (~50 km/h).
pub const DEFAULT_SPEED_MPS: f64 = 13.9;

/// Great-circle distance between two points in meters.
pub fn haversine_m(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // rounding can push `a` a hair outside [0, 1], where asin is NaN
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}

/// [`DistanceMetric`] in meters along the great circle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_m(from, to)
    }
}

/// Estimates travel time from straight-line distance and an assumed speed,
/// for routes that never went through a directions service.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in m/s.
    pub speed_mps: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_mps: f64) -> Self {
        Self { speed_mps }
    }

    /// Convert distance in meters to travel time in seconds.
    pub fn meters_to_seconds(&self, meters: f64) -> f64 {
        if self.speed_mps <= 0.0 || !self.speed_mps.is_finite() {
            return 0.0;
        }
        meters.max(0.0) / self.speed_mps
    }
}

impl<M> DistanceMatrixProvider for M
where
    M: DistanceMetric + Sync,
{
    fn matrix_for(&self, locations: &[Coordinate]) -> Vec<Vec<f64>> {
        distance_matrix(self, locations)
    }
}

/// Pairwise distances under `metric`. Rows are computed in parallel; the
/// result does not depend on scheduling.
pub fn distance_matrix<M>(metric: &M, locations: &[Coordinate]) -> Vec<Vec<f64>>
where
    M: DistanceMetric + Sync,
{
    locations
        .par_iter()
        .enumerate()
        .map(|(i, from)| {
            locations
                .iter()
                .enumerate()
                .map(|(j, to)| {
                    if i == j {
                        0.0
                    } else {
                        metric.distance(*from, *to)
                    }
                })
                .collect::<Vec<f64>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinate::new(-115.1, 36.1);
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, actual distance ~370 km
        let lv = Coordinate::new(-115.14, 36.17);
        let la = Coordinate::new(-118.24, 34.05);
        let dist = haversine_m(lv, la);
        assert!(
            dist > 350_000.0 && dist < 400_000.0,
            "LV to LA should be ~370km, got {}",
            dist
        );
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinate::new(-115.17, 36.12);
        let b = Coordinate::new(-115.06, 36.03);
        assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        let d = haversine_m(Coordinate::new(0.0, 0.0), Coordinate::new(180.0, 0.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_matrix_diagonal_is_zero() {
        let locations = vec![
            Coordinate::new(-115.1, 36.1),
            Coordinate::new(-115.2, 36.2),
            Coordinate::new(-115.3, 36.3),
        ];
        let matrix = Haversine.matrix_for(&locations);

        for i in 0..locations.len() {
            assert_eq!(matrix[i][i], 0.0, "Diagonal should be zero");
        }
    }

    #[test]
    fn test_matrix_symmetric() {
        let locations = vec![Coordinate::new(-115.1, 36.1), Coordinate::new(-115.2, 36.2)];
        let matrix = Haversine.matrix_for(&locations);

        assert!((matrix[0][1] - matrix[1][0]).abs() < 1e-9, "Matrix should be symmetric");
    }

    #[test]
    fn test_reasonable_travel_time() {
        let provider = HaversineMatrix::new(10.0);
        assert_eq!(provider.meters_to_seconds(9_000.0), 900.0);
        assert_eq!(HaversineMatrix::new(0.0).meters_to_seconds(9_000.0), 0.0);
    }
}
