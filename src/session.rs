//! Session - one mission editor mounted around one store.
//!
//! # Example
//!
//! ```ignore
//! use mission_planner::{session, MapConfig, MapEvent, Coordinate};
//!
//! let mut session = session::mount(&MapConfig::from_env(), |config| MySurface::open(config));
//!
//! // Host forwards map and list events
//! session.dispatch(MapEvent::Ready);
//! session.dispatch(MapEvent::Click(Coordinate::new(10.0, 20.0)));
//!
//! // Clean up
//! session.unmount();
//! ```

use log::{debug, info};

use crate::config::MapConfig;
use crate::error::{ExportError, MapError};
use crate::export::{Delivery, MissionDocument, MissionExporter};
use crate::list::{self, ListEvent, ListRow};
use crate::map::{MapEvent, MapSurface, MapSynchronizer, SyncState};
use crate::store::{IdAllocator, RandomIds, WaypointStore};

/// Handle returned by [`mount`].
///
/// Owns the store, exporter and map synchronizer. Dropping it tears the map
/// down just like [`MissionSession::unmount`].
pub struct MissionSession<S: MapSurface + 'static> {
    store: WaypointStore,
    exporter: MissionExporter,
    map: MapSynchronizer<S>,
}

/// Mount a session with random waypoint ids.
pub fn mount<S, F>(config: &MapConfig, connect: F) -> MissionSession<S>
where
    S: MapSurface + 'static,
    F: FnOnce(&MapConfig) -> Result<S, MapError>,
{
    mount_with_ids(config, RandomIds, connect)
}

/// Mount a session drawing waypoint ids from `ids`.
pub fn mount_with_ids<S, F>(
    config: &MapConfig,
    ids: impl IdAllocator + 'static,
    connect: F,
) -> MissionSession<S>
where
    S: MapSurface + 'static,
    F: FnOnce(&MapConfig) -> Result<S, MapError>,
{
    let store = WaypointStore::with_ids(ids);
    let exporter = MissionExporter::new(store.clone());
    let map = MapSynchronizer::attach(store.clone(), config, connect);
    info!("mission session mounted");

    MissionSession {
        store,
        exporter,
        map,
    }
}

impl<S: MapSurface + 'static> MissionSession<S> {
    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn map_state(&self) -> SyncState {
        self.map.state()
    }

    pub fn map(&self) -> &MapSynchronizer<S> {
        &self.map
    }

    /// Route a map surface event.
    pub fn dispatch(&mut self, event: MapEvent) {
        self.map.handle(event);
    }

    /// Route a list edit. Returns true if the mission changed.
    pub fn edit(&self, event: ListEvent) -> bool {
        list::apply(&self.store, event)
    }

    /// Rows for the waypoint list.
    pub fn rows(&self) -> Vec<ListRow> {
        list::rows(&self.store.snapshot())
    }

    pub fn can_export(&self) -> bool {
        self.exporter.can_export()
    }

    /// Export and deliver the mission.
    ///
    /// Does nothing and returns `Ok(None)` while the mission is empty, the
    /// same way the export action is hidden then.
    pub fn export_to(
        &self,
        delivery: &mut dyn Delivery,
    ) -> Result<Option<MissionDocument>, ExportError> {
        if !self.can_export() {
            debug!("export requested for empty mission");
            return Ok(None);
        }
        self.exporter.export_to(delivery).map(Some)
    }

    /// Release the map and end the session.
    pub fn unmount(mut self) {
        self.map.dispose();
        info!("mission session unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemoryDelivery;
    use crate::map::RecordingSurface;
    use crate::store::SequentialIds;
    use crate::types::Coordinate;

    #[test]
    fn test_mount_without_token_keeps_list_working() {
        let mut session = mount(&MapConfig::default(), |_| Ok(RecordingSurface::new()));
        session.dispatch(MapEvent::Ready);
        session.dispatch(MapEvent::Click(Coordinate::new(1.0, 2.0)));

        assert_eq!(session.map_state(), SyncState::Uninitialized);
        assert!(session.rows().is_empty());
        assert!(!session.can_export());
    }

    #[test]
    fn test_empty_export_is_skipped() {
        let config = MapConfig::default().with_access_token("t");
        let session = mount_with_ids(&config, SequentialIds::new(), |_| Ok(RecordingSurface::new()));
        let mut delivery = MemoryDelivery::default();

        assert!(session.export_to(&mut delivery).unwrap().is_none());
        assert!(delivery.delivered.is_empty());
    }

    #[test]
    fn test_unmount_releases_surface() {
        let config = MapConfig::default().with_access_token("t");
        let surface = RecordingSurface::new();
        let handle = surface.clone();
        let mut session = mount(&config, move |_| Ok(handle));
        session.dispatch(MapEvent::Ready);
        session.dispatch(MapEvent::Click(Coordinate::new(1.0, 2.0)));
        assert_eq!(surface.marker_count(), 1);

        session.unmount();
        assert!(surface.is_released());
        assert_eq!(surface.marker_count(), 0);
    }
}
