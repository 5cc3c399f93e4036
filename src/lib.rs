//! route-engine
//!
//! Stop ordering and playback geometry for a route-planning map: reorders
//! stops to shorten the trip, and turns a playback clock into a vehicle
//! position, heading and traveled/remaining split along the route polyline.

pub mod error;
pub mod geo;
pub mod haversine;
pub mod optimizer;
pub mod playback;
pub mod polyline;
pub mod route;
pub mod session;
pub mod stop;
pub mod traits;

pub use error::{RouteError, RouteResult};
pub use geo::{bearing_degrees, Coordinate, Planar};
pub use haversine::{haversine_m, Haversine, HaversineMatrix};
pub use optimizer::{optimize, optimize_with, tour_cost, OptimizationPreview, OptimizeOptions};
pub use playback::{FrameTimer, PlaybackState, TickOutcome, BASE_RATE};
pub use polyline::{Polyline, PolylineProgress};
pub use route::RouteGeometry;
pub use session::{Frame, RouteSession};
pub use stop::{Stop, StopId, StopOrigin};
