//! Mission Exporter - snapshot to `mission.json`.
//!
//! Export is read-only and deterministic: the same snapshot always produces
//! byte-identical output. Records carry `seq`, the waypoint's 1-based position
//! at export time, and are pretty-printed with 2-space indentation.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::ExportError;
use crate::store::WaypointStore;
use crate::types::{Waypoint, WaypointId};

/// File name every export is delivered under.
pub const MISSION_FILE_NAME: &str = "mission.json";

/// One exported waypoint. Field order is the document's key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionRecord {
    pub id: WaypointId,
    pub lng: f64,
    pub lat: f64,
    pub alt: f64,
    pub seq: usize,
}

/// Build records for `waypoints` in collection order.
pub fn mission_records(waypoints: &[Waypoint]) -> Vec<MissionRecord> {
    waypoints
        .iter()
        .enumerate()
        .map(|(i, wp)| MissionRecord {
            id: wp.id.clone(),
            lng: wp.lng,
            lat: wp.lat,
            alt: wp.alt,
            seq: i + 1,
        })
        .collect()
}

/// Serialized mission ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionDocument {
    pub file_name: String,
    pub contents: String,
}

impl MissionDocument {
    /// Serialize `waypoints` into a named document.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Result<Self, ExportError> {
        let contents = serde_json::to_string_pretty(&mission_records(waypoints))?;
        Ok(Self {
            file_name: MISSION_FILE_NAME.to_string(),
            contents,
        })
    }
}

/// Hands a finished document to the user.
pub trait Delivery {
    fn deliver(&mut self, document: &MissionDocument) -> Result<(), ExportError>;
}

/// Writes documents into a directory, like a browser download folder.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&mut self, document: &MissionDocument) -> Result<(), ExportError> {
        let path = self.dir.join(&document.file_name);
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, &document.contents))
            .map_err(|source| ExportError::Deliver {
                name: path.display().to_string(),
                source,
            })?;
        info!("mission written to {}", path.display());
        Ok(())
    }
}

/// Keeps documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDelivery {
    pub delivered: Vec<MissionDocument>,
}

impl Delivery for MemoryDelivery {
    fn deliver(&mut self, document: &MissionDocument) -> Result<(), ExportError> {
        self.delivered.push(document.clone());
        Ok(())
    }
}

/// Reads store snapshots and exports them.
#[derive(Clone)]
pub struct MissionExporter {
    store: WaypointStore,
}

impl MissionExporter {
    pub fn new(store: WaypointStore) -> Self {
        Self { store }
    }

    /// Whether the export action should be offered.
    pub fn can_export(&self) -> bool {
        !self.store.is_empty()
    }

    /// Serialize the current snapshot.
    ///
    /// An empty collection produces `[]`.
    pub fn export(&self) -> Result<MissionDocument, ExportError> {
        MissionDocument::from_waypoints(&self.store.snapshot())
    }

    /// Serialize the current snapshot and deliver it.
    pub fn export_to(&self, delivery: &mut dyn Delivery) -> Result<MissionDocument, ExportError> {
        let document = self.export()?;
        delivery.deliver(&document)?;
        info!("exported mission with {} waypoints", self.store.len());
        Ok(document)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SequentialIds;
    use crate::types::{Coordinate, Direction};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seq_follows_position() {
        let store = WaypointStore::with_ids(SequentialIds::new());
        for i in 0..3 {
            store.add(Coordinate::new(i as f64, i as f64));
        }
        // History should not matter, only current order
        store.reorder(2, Direction::Up);
        store.reorder(0, Direction::Down);

        let records = mission_records(&store.snapshot());
        let seqs: Vec<_> = records.iter().map(|r| r.seq).collect();
        let ids: Vec<_> = records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(ids, vec!["wp-3", "wp-1", "wp-2"]);
    }

    #[test]
    fn test_document_format() {
        let store = WaypointStore::with_ids(SequentialIds::new());
        let id = store.add(Coordinate::new(10.0, 20.0));
        store.update_altitude(&id, 150.5);

        let doc = MissionExporter::new(store).export().unwrap();
        assert_eq!(doc.file_name, "mission.json");
        assert_eq!(
            doc.contents,
            "[\n  {\n    \"id\": \"wp-1\",\n    \"lng\": 20.0,\n    \"lat\": 10.0,\n    \"alt\": 150.5,\n    \"seq\": 1\n  }\n]"
        );
    }

    #[test]
    fn test_empty_export() {
        let exporter = MissionExporter::new(WaypointStore::new());
        assert!(!exporter.can_export());
        assert_eq!(exporter.export().unwrap().contents, "[]");
    }

    #[test]
    fn test_export_is_deterministic_and_read_only() {
        let store = WaypointStore::new();
        store.add(Coordinate::new(1.5, -2.5));
        store.add(Coordinate::new(3.0, 4.0));
        let before = store.snapshot();
        let exporter = MissionExporter::new(store.clone());

        let a = exporter.export().unwrap();
        let b = exporter.export().unwrap();
        assert_eq!(a, b);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_memory_delivery() {
        let store = WaypointStore::new();
        store.add(Coordinate::new(1.0, 2.0));
        let exporter = MissionExporter::new(store);
        let mut delivery = MemoryDelivery::default();

        let doc = exporter.export_to(&mut delivery).unwrap();
        exporter.export_to(&mut delivery).unwrap();
        assert_eq!(delivery.delivered, vec![doc.clone(), doc]);
    }

    #[test]
    fn test_directory_delivery() {
        let dir = std::env::temp_dir().join(format!("mission-export-{}", std::process::id()));
        let store = WaypointStore::new();
        store.add(Coordinate::new(1.0, 2.0));

        let mut delivery = DirectoryDelivery::new(&dir);
        let doc = MissionExporter::new(store).export_to(&mut delivery).unwrap();

        let written = fs::read_to_string(dir.join(MISSION_FILE_NAME)).unwrap();
        assert_eq!(written, doc.contents);
        let _ = fs::remove_dir_all(&dir);
    }
}
