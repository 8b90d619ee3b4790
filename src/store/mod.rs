//! Waypoint Store - sole authority over the mission collection.
//!
//! - **WaypointStore**: ordered collection behind a reactive signal, with the
//!   add / update altitude / delete / reorder mutations
//! - **IdAllocator**: injected id source (random UUIDs or a counter)

mod ids;
mod waypoints;

pub use ids::*;
pub use waypoints::*;
