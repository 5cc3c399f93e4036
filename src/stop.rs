//! Stop model supplied by the stop-management collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::traits::Waypoint;

/// Opaque, caller-assigned stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a stop was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopOrigin {
    MapClick,
    SearchResult,
}

/// A user-specified stop on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub label: String,
    pub coordinate: Coordinate,
    pub origin: StopOrigin,
}

impl Stop {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        coordinate: Coordinate,
        origin: StopOrigin,
    ) -> Self {
        Self {
            id: StopId::new(id),
            label: label.into(),
            coordinate,
            origin,
        }
    }
}

impl Waypoint for Stop {
    type Id = StopId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
