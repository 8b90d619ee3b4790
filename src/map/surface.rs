//! The map capability the synchronizer drives.
//!
//! A surface is an imperative, stateful renderer: it hands out a handle for
//! every marker it places and must be told explicitly to remove each one.
//! Nothing here knows about waypoints.

use crate::config::{MarkerStyle, RouteStyle};
use crate::types::{Coordinate, LngLat};

/// Handle to a marker currently placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Text attached to a waypoint marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLabel {
    /// 1-based position in the mission.
    pub seq: usize,
    pub alt: f64,
}

impl MarkerLabel {
    /// Popup text, e.g. `WP 2: Alt 150m`.
    pub fn text(&self) -> String {
        format!("WP {}: Alt {}m", self.seq, self.alt)
    }
}

/// Events a surface reports back to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Style and sources finished loading; the surface accepts commands.
    Ready,
    /// The user clicked the map at this position.
    Click(Coordinate),
}

/// Rendering capability provided by the host's map engine.
pub trait MapSurface {
    /// Add the (initially empty) route line. Called once, on ready.
    fn install_route(&mut self, style: &RouteStyle);

    /// Place a marker and return its handle.
    fn place_marker(&mut self, position: LngLat, label: &MarkerLabel, style: &MarkerStyle)
        -> MarkerHandle;

    /// Remove a previously placed marker.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Replace the whole route geometry.
    fn set_route(&mut self, path: &[LngLat]);

    /// Tear the surface down. No command follows.
    fn release(&mut self);
}
