//! Map synchronization.
//!
//! The store is declarative, the map surface is imperative. This module sits
//! between them:
//!
//! ```text
//! WaypointStore snapshot → render effect → reconcile() → RenderCommands → MapSurface
//! MapSurface click       → MapEvent::Click → WaypointStore::add
//! ```
//!
//! - **surface**: the external map capability as a trait, plus its events
//! - **reconcile**: pure full-rebuild reconciliation
//! - **sync**: the Uninitialized / Ready / Disposed synchronizer
//! - **recording**: in-memory surface for tests and headless hosts

mod recording;
mod reconcile;
mod surface;
mod sync;

pub use recording::*;
pub use reconcile::*;
pub use surface::*;
pub use sync::*;
