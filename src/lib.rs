//! # mission-planner
//!
//! Reactive core of a click-to-plan flight mission editor.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! One store owns the ordered waypoint collection. Every mutation publishes an
//! immutable snapshot; readers never get write access.
//!
//! ```text
//! map click / list edit → WaypointStore → snapshot signal ─┬→ render effect → MapSurface
//!                                                          ├→ list rows
//!                                                          └→ MissionExporter → mission.json
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Waypoint, coordinates, snapshots, reorder direction
//! - [`store`] - The waypoint store and id allocation
//! - [`map`] - Map surface trait, reconciliation, synchronizer
//! - [`export`] - Mission records, JSON document, delivery
//! - [`list`] - List edit events and list rows
//! - [`session`] - Mount / unmount of a complete editor
//! - [`config`] - Map configuration from the environment
//! - [`error`] - Map and export errors

pub mod config;
pub mod error;
pub mod export;
pub mod list;
pub mod map;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{MapConfig, MarkerStyle, RouteStyle};

pub use error::{ExportError, MapError};

pub use store::{IdAllocator, RandomIds, SequentialIds, WaypointStore};

pub use map::{
    reconcile, MapEvent, MapSurface, MapSynchronizer, MarkerHandle, MarkerLabel,
    RecordingSurface, RenderCommand, RenderedSet, SyncState,
};

pub use export::{
    mission_records, Delivery, DirectoryDelivery, MemoryDelivery, MissionDocument,
    MissionExporter, MissionRecord, MISSION_FILE_NAME,
};

pub use list::{ListEvent, ListRow};

pub use session::{mount, mount_with_ids, MissionSession};
