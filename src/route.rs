//! Route geometry as supplied by the routing collaborator.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RouteError, RouteResult};
use crate::geo::Coordinate;
use crate::haversine::{haversine_m, HaversineMatrix};
use crate::polyline::{clamp_progress, Polyline};
use crate::traits::Waypoint;

/// A travel path plus its aggregate distance and duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRouteGeometry")]
pub struct RouteGeometry {
    pub polyline: Polyline,
    /// Total road distance in meters.
    pub distance_m: f64,
    /// Total travel time in seconds.
    pub duration_s: f64,
    /// Road distance of each leg, one per consecutive stop pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawRouteGeometry {
    #[serde(default)]
    polyline: Polyline,
    #[serde(default)]
    distance_m: f64,
    #[serde(default)]
    duration_s: f64,
    #[serde(default)]
    legs: Option<Vec<f64>>,
}

impl From<RawRouteGeometry> for RouteGeometry {
    fn from(raw: RawRouteGeometry) -> Self {
        let route = Self::new(raw.polyline, raw.distance_m, raw.duration_s);
        match raw.legs {
            Some(legs) => route.with_legs(legs),
            None => route,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

impl RouteGeometry {
    pub fn new(polyline: Polyline, distance_m: f64, duration_s: f64) -> Self {
        Self {
            polyline,
            distance_m: non_negative(distance_m),
            duration_s: non_negative(duration_s),
            legs: None,
        }
    }

    pub fn with_legs(mut self, legs: Vec<f64>) -> Self {
        self.legs = Some(legs);
        self
    }

    /// Placeholder for fewer than 2 stops: nothing to travel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Offline fallback: connect the stops directly.
    ///
    /// Not road-accurate. Distance is great-circle, duration assumes a
    /// constant `speed_mps`.
    pub fn straight_line<S: Waypoint>(stops: &[S], speed_mps: f64) -> Self {
        let points: Vec<Coordinate> = stops.iter().map(|stop| stop.coordinate()).collect();
        let legs: Vec<f64> = points.windows(2).map(|pair| haversine_m(pair[0], pair[1])).collect();
        let distance_m: f64 = legs.iter().sum();
        let duration_s = HaversineMatrix::new(speed_mps).meters_to_seconds(distance_m);

        let route = Self::new(Polyline::new(points), distance_m, duration_s);
        if legs.is_empty() {
            route
        } else {
            route.with_legs(legs)
        }
    }

    /// Check per-leg metadata against the stops it is meant to describe.
    pub fn validate_legs(&self, stop_count: usize) -> RouteResult<()> {
        let legs = self.legs.as_deref().ok_or(RouteError::MissingLegs)?;

        let expected = stop_count.saturating_sub(1);
        if legs.len() != expected {
            return Err(RouteError::LegCountMismatch {
                legs: legs.len(),
                stops: stop_count,
                expected,
            });
        }

        for (index, &distance) in legs.iter().enumerate() {
            if !distance.is_finite() || distance < 0.0 {
                return Err(RouteError::InvalidLegDistance { index, distance });
            }
        }

        Ok(())
    }

    /// Index of the stop the vehicle is heading to at progress `t`.
    ///
    /// `None` with fewer than 2 stops or once the route is complete. Uses
    /// road distance per leg when the legs match the stops, otherwise splits
    /// progress evenly across legs. A leg counts as reached as soon as the
    /// accumulated distance equals the target.
    pub fn next_stop_index(&self, stop_count: usize, t: f64) -> Option<usize> {
        if stop_count < 2 {
            return None;
        }

        let t = clamp_progress(t);
        if t >= 1.0 {
            return None;
        }

        let last_stop = stop_count - 1;

        if self.distance_m > 0.0 {
            match self.validate_legs(stop_count) {
                Ok(()) => {
                    let target = t * self.distance_m;
                    let mut acc = 0.0;
                    for (i, leg) in self.legs.iter().flatten().enumerate() {
                        if acc + leg >= target {
                            return Some(last_stop.min(i + 1));
                        }
                        acc += leg;
                    }
                    return Some(last_stop);
                }
                Err(RouteError::MissingLegs) => {}
                Err(err) => warn!(%err, "ignoring leg distances"),
            }
        }

        let leg_count = stop_count - 1;
        let current_leg = (t * leg_count as f64).floor() as usize;
        Some(last_stop.min(current_leg + 1))
    }
}

// ============================================================================
// Directions response
// ============================================================================

/// One route from a directions service response, as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub geometry: LineString,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub distance: f64,
}

impl From<DirectionsRoute> for RouteGeometry {
    fn from(route: DirectionsRoute) -> Self {
        let geometry = RouteGeometry::new(
            Polyline::new(route.geometry.coordinates),
            route.distance,
            route.duration,
        );
        if route.legs.is_empty() {
            geometry
        } else {
            geometry.with_legs(route.legs.into_iter().map(|leg| leg.distance).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_with_legs(legs: Vec<f64>) -> RouteGeometry {
        let total = legs.iter().sum();
        RouteGeometry::new(Polyline::default(), total, 0.0).with_legs(legs)
    }

    #[test]
    fn test_new_clamps_aggregates() {
        let route = RouteGeometry::new(Polyline::default(), -5.0, f64::NAN);
        assert_eq!(route.distance_m, 0.0);
        assert_eq!(route.duration_s, 0.0);
    }

    #[test]
    fn test_loaded_route_is_clamped() {
        let json = r#"{
            "polyline": [[-115.17, 36.12], [-115.16, 36.11]],
            "distance_m": -250.0,
            "duration_s": 90.0,
            "legs": [-250.0]
        }"#;
        let route: RouteGeometry = serde_json::from_str(json).unwrap();
        assert_eq!(route.polyline.len(), 2);
        assert_eq!(route.distance_m, 0.0);
        assert_eq!(route.duration_s, 90.0);
        // legs are kept as given and rejected on use
        assert_eq!(
            route.validate_legs(2),
            Err(RouteError::InvalidLegDistance { index: 0, distance: -250.0 })
        );
    }

    #[test]
    fn test_route_survives_serde() {
        let route = route_with_legs(vec![100.0, 200.0]);
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(serde_json::from_str::<RouteGeometry>(&json).unwrap(), route);
    }

    #[test]
    fn test_validate_legs() {
        let route = route_with_legs(vec![100.0, 200.0]);
        assert_eq!(route.validate_legs(3), Ok(()));
        assert_eq!(
            route.validate_legs(4),
            Err(RouteError::LegCountMismatch { legs: 2, stops: 4, expected: 3 })
        );
        assert_eq!(RouteGeometry::empty().validate_legs(3), Err(RouteError::MissingLegs));

        let bad = route_with_legs(vec![100.0, -1.0]);
        assert_eq!(
            bad.validate_legs(3),
            Err(RouteError::InvalidLegDistance { index: 1, distance: -1.0 })
        );
    }

    #[test]
    fn test_next_stop_uses_leg_distances() {
        // short first leg, long second leg
        let route = route_with_legs(vec![100.0, 900.0]);
        assert_eq!(route.next_stop_index(3, 0.0), Some(1));
        assert_eq!(route.next_stop_index(3, 0.05), Some(1));
        assert_eq!(route.next_stop_index(3, 0.5), Some(2));
        assert_eq!(route.next_stop_index(3, 1.0), None);
    }

    #[test]
    fn test_next_stop_boundary_counts_as_reached() {
        let route = route_with_legs(vec![250.0, 750.0]);
        // target equals the first leg exactly
        assert_eq!(route.next_stop_index(3, 0.25), Some(1));
    }

    #[test]
    fn test_next_stop_falls_back_to_leg_count() {
        let route = RouteGeometry::new(Polyline::default(), 1000.0, 0.0);
        assert_eq!(route.next_stop_index(3, 0.1), Some(1));
        assert_eq!(route.next_stop_index(3, 0.6), Some(2));

        // mismatched legs are ignored
        let mismatched = route_with_legs(vec![10.0, 990.0]);
        assert_eq!(mismatched.next_stop_index(5, 0.3), Some(2));
    }

    #[test]
    fn test_next_stop_needs_two_stops() {
        assert_eq!(RouteGeometry::empty().next_stop_index(1, 0.5), None);
    }

    #[test]
    fn test_from_directions_response() {
        let json = r#"{
            "geometry": { "type": "LineString", "coordinates": [[-115.17, 36.12], [-115.16, 36.11]] },
            "distance": 1530.4,
            "duration": 182.9,
            "legs": [{ "distance": 1530.4, "duration": 182.9 }]
        }"#;
        let response: DirectionsRoute = serde_json::from_str(json).unwrap();
        let route = RouteGeometry::from(response);
        assert_eq!(route.polyline.len(), 2);
        assert_eq!(route.distance_m, 1530.4);
        assert_eq!(route.legs, Some(vec![1530.4]));
        assert_eq!(route.validate_legs(2), Ok(()));
    }
}
