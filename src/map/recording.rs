//! Recording surface - an in-memory [`MapSurface`].
//!
//! Keeps the rendered state (markers, route, lifecycle) and a log of every
//! call. Clones share state, so a test or headless host can hand one clone to
//! the synchronizer and inspect the other.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use log::warn;

use crate::config::{MarkerStyle, RouteStyle};
use crate::types::LngLat;

use super::surface::{MapSurface, MarkerHandle, MarkerLabel};

/// One call received by the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    InstallRoute,
    PlaceMarker(MarkerHandle),
    RemoveMarker(MarkerHandle),
    SetRoute(usize),
    Release,
}

/// A marker as it currently sits on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub position: LngLat,
    pub label: MarkerLabel,
}

#[derive(Debug, Default)]
struct SurfaceState {
    markers: BTreeMap<MarkerHandle, PlacedMarker>,
    route: Vec<LngLat>,
    route_style: Option<RouteStyle>,
    released: bool,
    next_handle: u64,
    calls: Vec<SurfaceCall>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.state.borrow().markers.len()
    }

    /// Live markers in placement order.
    pub fn markers(&self) -> Vec<PlacedMarker> {
        self.state.borrow().markers.values().cloned().collect()
    }

    pub fn route(&self) -> Ref<'_, [LngLat]> {
        Ref::map(self.state.borrow(), |s| s.route.as_slice())
    }

    pub fn route_style(&self) -> Option<RouteStyle> {
        self.state.borrow().route_style.clone()
    }

    pub fn is_released(&self) -> bool {
        self.state.borrow().released
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

impl MapSurface for RecordingSurface {
    fn install_route(&mut self, style: &RouteStyle) {
        let mut state = self.state.borrow_mut();
        state.route_style = Some(style.clone());
        state.route.clear();
        state.calls.push(SurfaceCall::InstallRoute);
    }

    fn place_marker(
        &mut self,
        position: LngLat,
        label: &MarkerLabel,
        _style: &MarkerStyle,
    ) -> MarkerHandle {
        let mut state = self.state.borrow_mut();
        let handle = MarkerHandle(state.next_handle);
        state.next_handle += 1;
        state.markers.insert(
            handle,
            PlacedMarker {
                handle,
                position,
                label: label.clone(),
            },
        );
        state.calls.push(SurfaceCall::PlaceMarker(handle));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        let mut state = self.state.borrow_mut();
        if state.markers.remove(&handle).is_none() {
            warn!("remove of unknown marker {:?}", handle);
        }
        state.calls.push(SurfaceCall::RemoveMarker(handle));
    }

    fn set_route(&mut self, path: &[LngLat]) {
        let mut state = self.state.borrow_mut();
        state.route = path.to_vec();
        state.calls.push(SurfaceCall::SetRoute(path.len()));
    }

    fn release(&mut self) {
        let mut state = self.state.borrow_mut();
        state.released = true;
        state.markers.clear();
        state.route.clear();
        state.calls.push(SurfaceCall::Release);
    }
}
