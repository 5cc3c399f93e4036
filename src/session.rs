//! Owner of the active route and its playback.
//!
//! Progress is only meaningful against the geometry it was measured on, so
//! every route change goes through here and forces playback back to a stopped
//! start.

use tracing::debug;

use crate::geo::Coordinate;
use crate::playback::{PlaybackState, TickOutcome};
use crate::polyline::Polyline;
use crate::route::RouteGeometry;
use crate::traits::DistanceMetric;

/// Renderable state for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub position: Coordinate,
    /// Degrees clockwise from north; last known heading when the model has none.
    pub heading: Option<f64>,
    pub traveled: Polyline,
    pub remaining: Polyline,
    pub progress: f64,
    /// Set on the frame where playback reached the end.
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct RouteSession<M> {
    route: Option<RouteGeometry>,
    playback: PlaybackState,
    last_heading: Option<f64>,
    metric: M,
}

impl<M: DistanceMetric> RouteSession<M> {
    pub fn new(metric: M) -> Self {
        Self {
            route: None,
            playback: PlaybackState::default(),
            last_heading: None,
            metric,
        }
    }

    pub fn route(&self) -> Option<&RouteGeometry> {
        self.route.as_ref()
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Play/pause/speed controls. Route changes are not made through here.
    pub fn playback_mut(&mut self) -> &mut PlaybackState {
        &mut self.playback
    }

    /// Replace the active route. Playback stops at the start.
    pub fn set_route(&mut self, route: RouteGeometry) {
        debug!(
            points = route.polyline.len(),
            distance_m = route.distance_m,
            "route replaced, playback reset"
        );
        self.route = Some(route);
        self.invalidate();
    }

    pub fn clear_route(&mut self) {
        self.route = None;
        self.invalidate();
    }

    /// Stops were added, removed or reordered; the current route is stale.
    pub fn stops_changed(&mut self) {
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.playback.reset();
        self.last_heading = None;
    }

    /// Advance playback by `dt_secs` and derive the frame to draw.
    ///
    /// `None` when there is no route with at least one segment; playback does
    /// not advance in that case.
    pub fn frame(&mut self, dt_secs: f64) -> Option<Frame> {
        let route = self.route.as_ref().filter(|route| route.polyline.is_traversable())?;

        let completed = self.playback.tick(dt_secs) == TickOutcome::Completed;
        let t = self.playback.progress();

        let progress = route.polyline.progress(&self.metric);
        let position = progress.point_at(t)?;
        if let Some(heading) = progress.heading_at(t) {
            self.last_heading = Some(heading);
        }
        let (traveled, remaining) = progress.split_at(t);

        Some(Frame {
            position,
            heading: self.last_heading,
            traveled,
            remaining,
            progress: t,
            completed,
        })
    }
}
