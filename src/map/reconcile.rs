//! Reconciliation of map artifacts against a waypoint snapshot.
//!
//! # Algorithm
//!
//! Full rebuild on every snapshot:
//!
//! 1. Remove every marker placed by the previous pass
//! 2. Place one marker per waypoint, in collection order, labelled with its
//!    1-based position and altitude
//! 3. Replace the route geometry with the derived path in a single update
//!
//! [`reconcile`] is pure: it only produces commands. [`apply`] runs them
//! against a surface and returns the new rendered set, which becomes the
//! input of the next pass.

use crate::config::MarkerStyle;
use crate::types::{derive_path, LngLat, Waypoint};

use super::surface::{MapSurface, MarkerHandle, MarkerLabel};

/// One imperative instruction for a map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    RemoveMarker(MarkerHandle),
    PlaceMarker { position: LngLat, label: MarkerLabel },
    SetRoute(Vec<LngLat>),
}

/// Markers currently on the surface, in placement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedSet {
    markers: Vec<MarkerHandle>,
}

impl RenderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Commands that clear every rendered marker.
    pub fn removals(&self) -> impl Iterator<Item = RenderCommand> + '_ {
        self.markers.iter().copied().map(RenderCommand::RemoveMarker)
    }
}

/// Commands that turn `rendered` into the rendering of `waypoints`.
pub fn reconcile(rendered: &RenderedSet, waypoints: &[Waypoint]) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(rendered.len() + waypoints.len() + 1);

    commands.extend(rendered.removals());

    commands.extend(waypoints.iter().enumerate().map(|(i, wp)| {
        RenderCommand::PlaceMarker {
            position: wp.lng_lat(),
            label: MarkerLabel {
                seq: i + 1,
                alt: wp.alt,
            },
        }
    }));

    commands.push(RenderCommand::SetRoute(derive_path(waypoints)));
    commands
}

/// Run `commands` against `surface`, starting from `rendered`.
///
/// Returns the markers left on the surface afterwards.
pub fn apply<S: MapSurface + ?Sized>(
    surface: &mut S,
    rendered: RenderedSet,
    commands: Vec<RenderCommand>,
    style: &MarkerStyle,
) -> RenderedSet {
    let mut markers = rendered.markers;

    for command in commands {
        match command {
            RenderCommand::RemoveMarker(handle) => {
                surface.remove_marker(handle);
                markers.retain(|m| *m != handle);
            }
            RenderCommand::PlaceMarker { position, label } => {
                markers.push(surface.place_marker(position, &label, style));
            }
            RenderCommand::SetRoute(path) => surface.set_route(&path),
        }
    }

    RenderedSet { markers }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::RecordingSurface;
    use crate::types::{Coordinate, WaypointId};

    fn wp(id: &str, lat: f64, lng: f64, alt: f64) -> Waypoint {
        Waypoint {
            alt,
            ..Waypoint::new(WaypointId::from(id), Coordinate::new(lat, lng))
        }
    }

    #[test]
    fn test_reconcile_from_nothing() {
        let commands = reconcile(&RenderedSet::new(), &[wp("a", 10.0, 20.0, 100.0)]);
        assert_eq!(
            commands,
            vec![
                RenderCommand::PlaceMarker {
                    position: LngLat::new(20.0, 10.0),
                    label: MarkerLabel { seq: 1, alt: 100.0 },
                },
                RenderCommand::SetRoute(vec![LngLat::new(20.0, 10.0)]),
            ]
        );
    }

    #[test]
    fn test_reconcile_removes_everything_first() {
        let rendered = RenderedSet {
            markers: vec![MarkerHandle(4), MarkerHandle(9)],
        };
        let commands = reconcile(&rendered, &[wp("b", 1.0, 2.0, 50.0)]);

        assert_eq!(commands[0], RenderCommand::RemoveMarker(MarkerHandle(4)));
        assert_eq!(commands[1], RenderCommand::RemoveMarker(MarkerHandle(9)));
        assert!(matches!(commands[2], RenderCommand::PlaceMarker { .. }));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn test_reconcile_empty_clears_route() {
        let rendered = RenderedSet {
            markers: vec![MarkerHandle(1)],
        };
        let commands = reconcile(&rendered, &[]);
        assert_eq!(
            commands,
            vec![
                RenderCommand::RemoveMarker(MarkerHandle(1)),
                RenderCommand::SetRoute(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_labels_follow_position() {
        let waypoints = [
            wp("c", 0.0, 0.0, 30.0),
            wp("a", 1.0, 1.0, 10.0),
            wp("b", 2.0, 2.0, 20.0),
        ];
        let labels: Vec<_> = reconcile(&RenderedSet::new(), &waypoints)
            .into_iter()
            .filter_map(|c| match c {
                RenderCommand::PlaceMarker { label, .. } => Some((label.seq, label.alt)),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec![(1, 30.0), (2, 10.0), (3, 20.0)]);
    }

    #[test]
    fn test_apply_tracks_handles() {
        let mut surface = RecordingSurface::new();
        let style = MarkerStyle::default();
        let waypoints = [wp("a", 1.0, 2.0, 100.0), wp("b", 3.0, 4.0, 100.0)];

        let rendered = apply(
            &mut surface,
            RenderedSet::new(),
            reconcile(&RenderedSet::new(), &waypoints),
            &style,
        );
        assert_eq!(rendered.len(), 2);
        assert_eq!(surface.marker_count(), 2);

        let commands = reconcile(&rendered, &waypoints[..1]);
        let rendered = apply(&mut surface, rendered, commands, &style);
        assert_eq!(rendered.len(), 1);
        assert_eq!(surface.marker_count(), 1);
        assert_eq!(*surface.route(), [LngLat::new(2.0, 1.0)]);
    }
}
