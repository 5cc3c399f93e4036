//! Core domain traits for the route engine.
//!
//! These are intentionally minimal. Callers that keep their own stop models
//! only need to implement [`Waypoint`] to use the optimizer.

use std::fmt::Debug;
use std::hash::Hash;

use crate::geo::Coordinate;

/// Unique identifier for engine entities.
pub trait Id: Clone + Eq + Hash + Debug {}

impl<T> Id for T where T: Clone + Eq + Hash + Debug {}

/// Anything with a fixed position that can be ordered into a tour.
pub trait Waypoint {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location as (longitude, latitude).
    fn coordinate(&self) -> Coordinate;
}

/// Distance between two coordinates.
///
/// Implementations must be symmetric, return 0 for identical points and
/// never return a negative or NaN value for finite input.
pub trait DistanceMetric {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).distance(from, to)
    }
}

/// Provides a pairwise distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order. Every
/// [`DistanceMetric`] is a provider; implement this directly to feed the
/// optimizer road distances from elsewhere.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Coordinate]) -> Vec<Vec<f64>>;
}
