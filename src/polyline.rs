//! Polyline geometry and distance-parameterized progress along it.
//!
//! Progress `t` is a fraction of path length travelled, not of the vertex
//! list: `t = 0.5` is halfway by distance. [`point_at`], [`split_at`] and
//! [`heading_at`] all locate `t` through the same cumulative-length search, so
//! they always agree on where the cut point is.
//!
//! [`point_at`]: PolylineProgress::point_at
//! [`split_at`]: PolylineProgress::split_at
//! [`heading_at`]: PolylineProgress::heading_at

use serde::{Deserialize, Serialize};

use crate::geo::{bearing_degrees, Coordinate, Planar};
use crate::traits::DistanceMetric;

/// Progress lookahead used to derive the direction of travel.
pub const HEADING_LOOKAHEAD: f64 = 0.01;

/// A route geometry as an ordered list of coordinates.
///
/// Open path: the last point is never joined back to the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// True when the polyline has at least one segment to travel along.
    pub fn is_traversable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Progress model over this polyline using `metric` for segment lengths.
    pub fn progress<M: DistanceMetric>(&self, metric: M) -> PolylineProgress<'_, M> {
        PolylineProgress::new(self, metric)
    }

    /// [`PolylineProgress::point_at`] with planar segment lengths.
    pub fn point_at(&self, t: f64) -> Option<Coordinate> {
        self.progress(Planar).point_at(t)
    }

    /// [`PolylineProgress::split_at`] with planar segment lengths.
    pub fn split_at(&self, t: f64) -> (Polyline, Polyline) {
        self.progress(Planar).split_at(t)
    }

    /// [`PolylineProgress::heading_at`] with planar segment lengths.
    pub fn heading_at(&self, t: f64) -> Option<f64> {
        self.progress(Planar).heading_at(t)
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Clamp a progress value to `[0, 1]`; NaN maps to the start.
pub fn clamp_progress(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Where a progress value lands: the segment it falls in and the exact point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cut {
    segment: usize,
    point: Coordinate,
}

/// Cumulative-length index over a polyline.
///
/// Built once per geometry and queried every frame.
#[derive(Debug, Clone)]
pub struct PolylineProgress<'a, M> {
    points: &'a [Coordinate],
    /// `cumulative[i]` is the path length from the start to `points[i]`.
    cumulative: Vec<f64>,
    metric: M,
}

impl<'a, M: DistanceMetric> PolylineProgress<'a, M> {
    pub fn new(polyline: &'a Polyline, metric: M) -> Self {
        let points = polyline.points();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        if !points.is_empty() {
            cumulative.push(0.0);
        }
        for pair in points.windows(2) {
            acc += metric.distance(pair[0], pair[1]);
            cumulative.push(acc);
        }

        Self {
            points,
            cumulative,
            metric,
        }
    }

    /// Total path length in the metric's unit.
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn locate(&self, t: f64) -> Option<Cut> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }

        let t = clamp_progress(t);
        let total = self.total_length();
        let first = Cut {
            segment: 0,
            point: self.points[0],
        };
        let last = Cut {
            segment: n - 2,
            point: self.points[n - 1],
        };

        if total <= 0.0 || t <= 0.0 {
            return Some(first);
        }
        if t >= 1.0 {
            return Some(last);
        }

        let target = total * t;
        for segment in 0..n - 1 {
            let start = self.cumulative[segment];
            let end = self.cumulative[segment + 1];
            if end >= target {
                let len = end - start;
                let ratio = if len > 0.0 {
                    (target - start) / len
                } else {
                    0.0
                };
                let point = self.points[segment].lerp(self.points[segment + 1], ratio);
                return Some(Cut { segment, point });
            }
        }

        Some(last)
    }

    /// Point at distance-fraction `t` along the path.
    ///
    /// `None` for fewer than 2 points. When every point coincides the first
    /// point is returned for any `t`.
    pub fn point_at(&self, t: f64) -> Option<Coordinate> {
        self.locate(t).map(|cut| cut.point)
    }

    /// Path length from the start to [`point_at(t)`](Self::point_at).
    pub fn distance_at(&self, t: f64) -> f64 {
        match self.locate(t) {
            Some(cut) => {
                self.cumulative[cut.segment]
                    + self.metric.distance(self.points[cut.segment], cut.point)
            }
            None => 0.0,
        }
    }

    /// Split into the traveled and remaining sub-polylines at `t`.
    ///
    /// Both halves contain the cut point so they join without a gap. Fewer
    /// than 2 points come back unsplit as `(input, empty)`.
    pub fn split_at(&self, t: f64) -> (Polyline, Polyline) {
        let points = self.points;
        if points.len() < 2 {
            return (Polyline::new(points.to_vec()), Polyline::default());
        }

        let t = clamp_progress(t);
        if t <= 0.0 {
            return (Polyline::new(vec![points[0]]), Polyline::new(points.to_vec()));
        }
        if t >= 1.0 {
            return (
                Polyline::new(points.to_vec()),
                Polyline::new(vec![points[points.len() - 1]]),
            );
        }

        let Some(cut) = self.locate(t) else {
            return (Polyline::new(points.to_vec()), Polyline::default());
        };

        let mut traveled = points[..=cut.segment].to_vec();
        if traveled.last() != Some(&cut.point) {
            traveled.push(cut.point);
        }

        let mut remaining = Vec::with_capacity(points.len() - cut.segment);
        remaining.push(cut.point);
        let ahead = &points[cut.segment + 1..];
        let ahead = if ahead.first() == Some(&cut.point) {
            &ahead[1..]
        } else {
            ahead
        };
        remaining.extend_from_slice(ahead);

        (Polyline::new(traveled), Polyline::new(remaining))
    }

    /// Direction of travel at `t`, in degrees clockwise from north.
    ///
    /// Looks [`HEADING_LOOKAHEAD`] ahead. `None` when the two sampled points
    /// coincide; the caller should keep showing its previous heading.
    pub fn heading_at(&self, t: f64) -> Option<f64> {
        let t = clamp_progress(t);
        let here = self.point_at(t)?;
        let ahead = self.point_at((t + HEADING_LOOKAHEAD).min(1.0))?;
        if here == ahead {
            return None;
        }
        Some(bearing_degrees(here, ahead))
    }
}
