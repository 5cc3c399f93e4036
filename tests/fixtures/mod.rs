//! Test fixtures for route-engine.
//!
//! Provides real Las Vegas / Henderson coordinates (from OpenStreetMap) and
//! helpers for turning them into stops.

pub mod las_vegas_stops;

pub use las_vegas_stops::*;
