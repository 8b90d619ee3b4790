//! Waypoint Store - the single writer of the mission collection.
//!
//! Holds the ordered collection in a reactive [`Signal`]. Every successful
//! mutation builds a complete new [`Snapshot`] and publishes it, which
//! synchronously re-runs every effect that read the previous one (the map
//! synchronizer, list presenters). No-ops publish nothing.
//!
//! # Example
//!
//! ```ignore
//! use mission_planner::{Coordinate, Direction, WaypointStore};
//!
//! let store = WaypointStore::new();
//! let id = store.add(Coordinate::new(10.0, 20.0));
//! store.update_altitude(&id, 150.0);
//! store.reorder(0, Direction::Down); // no-op, only one waypoint
//! assert_eq!(store.len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use spark_signals::{derived, signal, Derived, Signal};

use super::ids::{IdAllocator, RandomIds};
use crate::types::{derive_path, Coordinate, Direction, LngLat, Snapshot, Waypoint, WaypointId};

/// Owned, observable waypoint collection.
///
/// Clones share the same collection and id allocator.
#[derive(Clone)]
pub struct WaypointStore {
    waypoints: Signal<Snapshot>,
    ids: Rc<RefCell<Box<dyn IdAllocator>>>,
}

impl WaypointStore {
    /// Create an empty store with random UUID ids.
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    /// Create an empty store drawing ids from `ids`.
    pub fn with_ids(ids: impl IdAllocator + 'static) -> Self {
        let ids: Box<dyn IdAllocator> = Box::new(ids);
        Self {
            waypoints: signal(Snapshot::from(Vec::new())),
            ids: Rc::new(RefCell::new(ids)),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current snapshot.
    ///
    /// Reading inside an effect or derived subscribes it to future snapshots.
    pub fn snapshot(&self) -> Snapshot {
        self.waypoints.get()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn get(&self, id: &WaypointId) -> Option<Waypoint> {
        self.snapshot().iter().find(|wp| &wp.id == id).cloned()
    }

    /// Reactive route through the collection, `(lng, lat)` per waypoint.
    pub fn path(&self) -> Derived<Vec<LngLat>> {
        let waypoints = self.waypoints.clone();
        derived(move || derive_path(&waypoints.get()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a waypoint at `coordinate` with the default altitude.
    pub fn add(&self, coordinate: Coordinate) -> WaypointId {
        let id = self.ids.borrow_mut().allocate();
        let mut next = self.snapshot().to_vec();
        next.push(Waypoint::new(id.clone(), coordinate));
        debug!("waypoint {} added at ({}, {})", id, coordinate.lat, coordinate.lng);
        self.publish(next);
        id
    }

    /// Set the altitude of waypoint `id`.
    ///
    /// Returns false (and leaves the collection untouched) for an unknown id
    /// or a value that is not a finite number.
    pub fn update_altitude(&self, id: &WaypointId, alt: f64) -> bool {
        if !alt.is_finite() {
            debug!("altitude {} for {} rejected", alt, id);
            return false;
        }

        let current = self.snapshot();
        let Some(index) = position_of(&current, id) else {
            debug!("altitude update for unknown waypoint {}", id);
            return false;
        };
        if current[index].alt == alt {
            return false;
        }

        let mut next = current.to_vec();
        next[index].alt = alt;
        self.publish(next);
        true
    }

    /// Remove waypoint `id`; later waypoints shift up one position.
    pub fn delete(&self, id: &WaypointId) -> bool {
        let current = self.snapshot();
        let Some(index) = position_of(&current, id) else {
            debug!("delete of unknown waypoint {}", id);
            return false;
        };

        let mut next = current.to_vec();
        next.remove(index);
        debug!("waypoint {} deleted from position {}", id, index + 1);
        self.publish(next);
        true
    }

    /// Swap the waypoint at `index` with its neighbour in `direction`.
    ///
    /// Bounds are checked before anything moves: moving the first entry up,
    /// the last entry down, or an index past the end does nothing.
    pub fn reorder(&self, index: usize, direction: Direction) -> bool {
        let current = self.snapshot();
        let Some(target) = direction.neighbour(index, current.len()) else {
            debug!("reorder {:?} at {} out of range", direction, index);
            return false;
        };

        let mut next = current.to_vec();
        next.swap(index, target);
        self.publish(next);
        true
    }

    /// Drop every waypoint.
    pub fn clear(&self) {
        if self.is_empty() {
            return;
        }
        self.publish(Vec::new());
    }

    fn publish(&self, next: Vec<Waypoint>) {
        self.waypoints.set(Snapshot::from(next));
    }
}

impl Default for WaypointStore {
    fn default() -> Self {
        Self::new()
    }
}

fn position_of(waypoints: &[Waypoint], id: &WaypointId) -> Option<usize> {
    waypoints.iter().position(|wp| &wp.id == id)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SequentialIds;
    use crate::types::DEFAULT_ALTITUDE;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::collections::HashSet;

    fn store_with(n: usize) -> (WaypointStore, Vec<WaypointId>) {
        let store = WaypointStore::with_ids(SequentialIds::new());
        let ids = (0..n)
            .map(|i| store.add(Coordinate::new(i as f64, i as f64 * 2.0)))
            .collect();
        (store, ids)
    }

    fn order(store: &WaypointStore) -> Vec<String> {
        store.snapshot().iter().map(|wp| wp.id.to_string()).collect()
    }

    #[test]
    fn test_add_keeps_click_order_and_unique_ids() {
        let store = WaypointStore::new();
        let clicks: Vec<_> = (0..20).map(|i| Coordinate::new(i as f64, -(i as f64))).collect();
        for c in &clicks {
            store.add(*c);
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), clicks.len());
        let ids: HashSet<_> = snapshot.iter().map(|wp| wp.id.clone()).collect();
        assert_eq!(ids.len(), clicks.len());
        for (wp, c) in snapshot.iter().zip(&clicks) {
            assert_eq!(wp.coordinate(), *c);
            assert_eq!(wp.alt, DEFAULT_ALTITUDE);
        }
    }

    #[test]
    fn test_update_altitude() {
        let (store, ids) = store_with(3);

        assert!(store.update_altitude(&ids[1], 150.0));
        let snapshot = store.snapshot();
        assert_eq!(snapshot[1].alt, 150.0);
        assert_eq!(snapshot[0].alt, DEFAULT_ALTITUDE);
        assert_eq!(snapshot[2].alt, DEFAULT_ALTITUDE);
        assert_eq!(snapshot[1].coordinate(), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_update_altitude_rejects_non_numeric() {
        let (store, ids) = store_with(1);

        assert!(!store.update_altitude(&ids[0], f64::NAN));
        assert!(!store.update_altitude(&ids[0], f64::INFINITY));
        assert_eq!(store.snapshot()[0].alt, DEFAULT_ALTITUDE);
    }

    #[test]
    fn test_update_altitude_unknown_id() {
        let (store, _) = store_with(2);
        let before = store.snapshot();

        assert!(!store.update_altitude(&WaypointId::from("missing"), 5.0));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (store, ids) = store_with(3);

        assert!(store.delete(&ids[1]));
        assert_eq!(order(&store), vec!["wp-1", "wp-3"]);

        assert!(!store.delete(&ids[1]));
        assert_eq!(order(&store), vec!["wp-1", "wp-3"]);
    }

    #[test]
    fn test_delete_only_waypoint() {
        let (store, ids) = store_with(1);
        assert!(store.delete(&ids[0]));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reorder_bounds() {
        for n in 0..5 {
            let (store, _) = store_with(n);
            let before = order(&store);

            assert!(!store.reorder(0, Direction::Up));
            assert_eq!(order(&store), before);

            if n > 0 {
                assert!(!store.reorder(n - 1, Direction::Down));
                assert_eq!(order(&store), before);
            }
            assert!(!store.reorder(n + 3, Direction::Up));
            assert_eq!(order(&store), before);
        }
    }

    #[test]
    fn test_reorder_swaps_adjacent_only() {
        let (store, _) = store_with(4);

        assert!(store.reorder(2, Direction::Up));
        assert_eq!(order(&store), vec!["wp-1", "wp-3", "wp-2", "wp-4"]);

        assert!(store.reorder(0, Direction::Down));
        assert_eq!(order(&store), vec!["wp-3", "wp-1", "wp-2", "wp-4"]);
    }

    #[test]
    fn test_reorder_inverse_pair_restores_order() {
        let (store, _) = store_with(5);
        let initial = order(&store);

        for i in 1..5 {
            assert!(store.reorder(i, Direction::Up));
            assert!(store.reorder(i - 1, Direction::Down));
            assert_eq!(order(&store), initial);
        }
    }

    #[test]
    fn test_path_tracks_collection() {
        let (store, ids) = store_with(3);
        let path = store.path();

        let check = |store: &WaypointStore, path: &[LngLat]| {
            let snapshot = store.snapshot();
            assert_eq!(path.len(), snapshot.len());
            for (p, wp) in path.iter().zip(snapshot.iter()) {
                assert_eq!(*p, LngLat::new(wp.lng, wp.lat));
            }
        };

        check(&store, &path.get());
        store.reorder(1, Direction::Down);
        check(&store, &path.get());
        store.delete(&ids[0]);
        check(&store, &path.get());
        store.add(Coordinate::new(-5.0, 7.5));
        check(&store, &path.get());
        store.clear();
        assert!(path.get().is_empty());
    }

    #[test]
    fn test_publishes_only_on_change() {
        let (store, ids) = store_with(2);
        let runs = Rc::new(Cell::new(0));
        let count = runs.clone();
        let observed = store.clone();
        let _stop = effect(move || {
            let _ = observed.snapshot();
            count.set(count.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        store.update_altitude(&ids[0], 120.0);
        assert_eq!(runs.get(), 2);

        // No-ops
        store.update_altitude(&ids[0], 120.0);
        store.delete(&WaypointId::from("missing"));
        store.reorder(0, Direction::Up);
        assert_eq!(runs.get(), 2);

        store.reorder(0, Direction::Down);
        assert_eq!(runs.get(), 3);
    }
}
