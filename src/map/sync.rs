//! Map Synchronizer - keeps a map surface equal to the waypoint collection.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --(surface created + MapEvent::Ready)--> Ready --(dispose)--> Disposed
//! ```
//!
//! - **Uninitialized**: nothing renders, nothing is buffered, clicks are
//!   dropped. A synchronizer whose surface failed to connect stays here.
//! - **Ready**: one render effect observes the store. It runs once on entry
//!   and again, synchronously, for every published snapshot. Clicks become
//!   `add` calls.
//! - **Disposed**: markers removed, surface released, effect stopped. Terminal.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use log::{debug, error, info, warn};
use spark_signals::effect;

use crate::config::{MapConfig, MarkerStyle, RouteStyle};
use crate::error::MapError;
use crate::store::WaypointStore;
use crate::types::{Coordinate, Waypoint};

use super::reconcile::{apply, reconcile, RenderedSet};
use super::surface::{MapEvent, MapSurface};

/// Where a synchronizer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Ready,
    Disposed,
}

struct Inner<S> {
    state: SyncState,
    surface: Option<S>,
    rendered: RenderedSet,
    marker_style: MarkerStyle,
    route_style: RouteStyle,
    renders: usize,
}

impl<S: MapSurface> Inner<S> {
    /// Full rebuild of markers and route for `waypoints`.
    fn render(&mut self, waypoints: &[Waypoint]) {
        if self.state != SyncState::Ready {
            return;
        }
        let Inner {
            surface: Some(surface),
            rendered,
            marker_style,
            ..
        } = self
        else {
            return;
        };

        let previous = mem::take(rendered);
        let commands = reconcile(&previous, waypoints);
        *rendered = apply(surface, previous, commands, marker_style);
        self.renders += 1;
        debug!("map rendered {} waypoints", waypoints.len());
    }

    fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            let rendered = mem::take(&mut self.rendered);
            let removals = rendered.removals().collect();
            let _ = apply(&mut surface, rendered, removals, &self.marker_style);
            surface.release();
        }
        self.state = SyncState::Disposed;
    }
}

/// Drives one map surface from one waypoint store.
pub struct MapSynchronizer<S: MapSurface + 'static> {
    store: WaypointStore,
    inner: Rc<RefCell<Inner<S>>>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl<S: MapSurface + 'static> MapSynchronizer<S> {
    /// Create the surface through `connect` and wait for its ready event.
    ///
    /// A missing access token or a failing `connect` is logged and leaves the
    /// synchronizer permanently uninitialized. `connect` is not called
    /// without a token.
    pub fn attach<F>(store: WaypointStore, config: &MapConfig, connect: F) -> Self
    where
        F: FnOnce(&MapConfig) -> Result<S, MapError>,
    {
        let surface = match config.require_token().and_then(|_| connect(config)) {
            Ok(surface) => {
                info!("map surface created, waiting for ready");
                Some(surface)
            }
            Err(err) => {
                error!("map disabled: {}", err);
                None
            }
        };

        Self {
            store,
            inner: Rc::new(RefCell::new(Inner {
                state: SyncState::Uninitialized,
                surface,
                rendered: RenderedSet::new(),
                marker_style: config.marker.clone(),
                route_style: config.route.clone(),
                renders: 0,
            })),
            stop_effect: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.inner.borrow().state
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SyncState::Ready
    }

    /// Whether a surface exists (connected, not yet released).
    pub fn has_surface(&self) -> bool {
        self.inner.borrow().surface.is_some()
    }

    /// Markers the last render left on the surface.
    pub fn rendered(&self) -> RenderedSet {
        self.inner.borrow().rendered.clone()
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> usize {
        self.inner.borrow().renders
    }

    /// Route a surface event.
    pub fn handle(&mut self, event: MapEvent) {
        match event {
            MapEvent::Ready => self.on_ready(),
            MapEvent::Click(coordinate) => self.on_click(coordinate),
        }
    }

    fn on_ready(&mut self) {
        {
            let mut inner = self.inner.borrow_mut();
            match (inner.state, inner.surface.is_some()) {
                (SyncState::Uninitialized, true) => {}
                (SyncState::Uninitialized, false) => {
                    warn!("ready event without a map surface ignored");
                    return;
                }
                (state, _) => {
                    debug!("ready event in state {:?} ignored", state);
                    return;
                }
            }

            let Inner {
                surface: Some(surface),
                route_style,
                ..
            } = &mut *inner
            else {
                return;
            };
            surface.install_route(route_style);
            inner.state = SyncState::Ready;
        }
        info!("map ready");

        // The effect runs immediately (initial render) and then once per
        // published snapshot.
        let inner = self.inner.clone();
        let store = self.store.clone();
        let stop = effect(move || {
            let snapshot = store.snapshot();
            inner.borrow_mut().render(&snapshot);
        });
        self.stop_effect = Some(Box::new(stop));
    }

    fn on_click(&self, coordinate: Coordinate) {
        let state = self.state();
        if state != SyncState::Ready {
            debug!("click in state {:?} ignored", state);
            return;
        }
        self.store.add(coordinate);
    }

    /// Stop observing the store, remove every marker and release the surface.
    pub fn dispose(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        let mut inner = self.inner.borrow_mut();
        if inner.state == SyncState::Disposed {
            return;
        }
        inner.teardown();
        info!("map disposed");
    }
}

impl<S: MapSurface + 'static> Drop for MapSynchronizer<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// Tests
// =============================================================================
