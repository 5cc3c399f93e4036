//! Real Las Vegas / Henderson locations as route stops.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use route_engine::{Coordinate, Stop, StopOrigin};

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }

    pub fn stop(&self, id: &str) -> Stop {
        Stop::new(id, self.name, self.coordinate(), StopOrigin::SearchResult)
    }
}

// ============================================================================
// Strip
// ============================================================================

pub const STRIP: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("Caesars Palace", 36.1162, -115.1745),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Strip Steak", 36.0908722, -115.1776176),
];

// ============================================================================
// Henderson cluster (all within a couple of km of each other)
// ============================================================================

pub const HENDERSON: &[Location] = &[
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Naga", 36.0137634, -114.9928676),
    Location::new("Buffalo Wild Wings Henderson", 36.0090449, -114.9917034),
];

// ============================================================================
// Spread across the metro area
// ============================================================================

pub const METRO: &[Location] = &[
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Location::new("Budget Suites South", 36.0366259, -115.1713361),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
];

/// Stops `s0..sN` in the given location order.
pub fn stops_from(locations: &[Location]) -> Vec<Stop> {
    locations
        .iter()
        .enumerate()
        .map(|(i, loc)| loc.stop(&format!("s{}", i)))
        .collect()
}

/// Shuffled copy of `items`; the same seed always gives the same order.
pub fn scrambled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut SmallRng::seed_from_u64(seed));
    out
}

/// A directions-service response for Wynn -> Bellagio -> MGM Grand.
pub const DIRECTIONS_RESPONSE: &str = r#"{
    "geometry": {
        "type": "LineString",
        "coordinates": [
            [-115.165818, 36.126378],
            [-115.170100, 36.121900],
            [-115.172400, 36.117000],
            [-115.176700, 36.112600],
            [-115.172900, 36.108200],
            [-115.168872, 36.102365]
        ]
    },
    "distance": 3412.7,
    "duration": 498.3,
    "legs": [
        { "distance": 1905.2, "duration": 270.1 },
        { "distance": 1507.5, "duration": 228.2 }
    ]
}"#;
