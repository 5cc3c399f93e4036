//! Engine error type.
//!
//! Geometry that is merely too short is not an error; the progress model
//! answers with `None` or an unsplit polyline instead. Errors are reserved
//! for metadata that contradicts the stops it claims to describe.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route has {legs} legs but {stops} stops need {expected}")]
    LegCountMismatch {
        legs: usize,
        stops: usize,
        expected: usize,
    },

    #[error("leg {index} has invalid distance {distance}")]
    InvalidLegDistance { index: usize, distance: f64 },

    #[error("route has no legs")]
    MissingLegs,
}

/// Shorthand result type for the engine.
pub type RouteResult<T> = Result<T, RouteError>;
