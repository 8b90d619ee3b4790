//! Identifier allocation for new waypoints.
//!
//! The store never invents ids itself; it asks an [`IdAllocator`] so hosts and
//! tests can pick between random and predictable ids.

use uuid::Uuid;

use crate::types::WaypointId;

/// Source of waypoint ids. Every call must return an id never seen before in
/// the session.
pub trait IdAllocator {
    fn allocate(&mut self) -> WaypointId;
}

impl<T: IdAllocator + ?Sized> IdAllocator for Box<T> {
    fn allocate(&mut self) -> WaypointId {
        (**self).allocate()
    }
}

/// Random v4 UUIDs. Default for interactive sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdAllocator for RandomIds {
    fn allocate(&mut self) -> WaypointId {
        WaypointId::new(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter ids (`wp-1`, `wp-2`, ...).
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("wp")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn allocate(&mut self) -> WaypointId {
        let id = WaypointId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
