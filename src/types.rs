//! Core types for mission-planner.
//!
//! These types define the foundation that everything builds on.
//! They flow from the store through the reactive snapshot into the map
//! synchronizer, the list rows and the exporter.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

// =============================================================================
// Coordinates
// =============================================================================

/// Geographic position as delivered by a map click, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Longitude-first pair, the order map geometries expect.
    pub const fn to_lng_lat(self) -> LngLat {
        LngLat {
            lng: self.lng,
            lat: self.lat,
        }
    }
}

/// Longitude-first coordinate pair used for markers and route geometry.
///
/// Serializes as a `[lng, lat]` array like any GeoJSON position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

// =============================================================================
// Waypoint
// =============================================================================

/// Altitude given to every waypoint created by a click, in meters.
pub const DEFAULT_ALTITUDE: f64 = 100.0;

/// Opaque waypoint identifier.
///
/// Allocated once at creation and never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(String);

impl WaypointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WaypointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single mission point.
///
/// Position is fixed at creation. Only `alt` has an edit path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub lat: f64,
    pub lng: f64,
    pub alt: f64,
}

impl Waypoint {
    /// Create a waypoint at `coordinate` with the default altitude.
    pub fn new(id: WaypointId, coordinate: Coordinate) -> Self {
        Self {
            id,
            lat: coordinate.lat,
            lng: coordinate.lng,
            alt: DEFAULT_ALTITUDE,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn lng_lat(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

/// Immutable point-in-time copy of the waypoint collection.
///
/// Cloning is a reference count bump, so every reader can hold its own.
pub type Snapshot = Rc<[Waypoint]>;

/// Extract the route through `waypoints`, in collection order.
pub fn derive_path(waypoints: &[Waypoint]) -> Vec<LngLat> {
    waypoints.iter().map(Waypoint::lng_lat).collect()
}

// =============================================================================
// Reorder direction
// =============================================================================

/// Direction of a single-step reorder in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the start of the mission (index - 1).
    Up,
    /// Towards the end of the mission (index + 1).
    Down,
}

impl Direction {
    /// Neighbour index for `index`, or None if it would leave `0..len`.
    pub fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            Direction::Up => index.checked_sub(1)?,
            Direction::Down => index.checked_add(1)?,
        };
        (index < len && target < len).then_some(target)
    }
}

// =============================================================================
// Tests
// =============================================================================
