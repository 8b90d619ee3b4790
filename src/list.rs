//! Waypoint list - edit events in, rows out.
//!
//! The list widget itself is the host's business. This module is the glue on
//! both sides of it:
//!
//! - `ListEvent` + `apply` turn widget events into store calls, dropping
//!   non-numeric altitude text before it reaches the store
//! - `rows` turns a snapshot into what each list row shows
//!
//! # Example
//!
//! ```ignore
//! use mission_planner::list::{self, ListEvent};
//!
//! list::apply(&store, ListEvent::Altitude { id, text: "150".into() });
//! for row in list::rows(&store.snapshot()) {
//!     println!("{} {} {}", row.seq, row.coords, row.alt);
//! }
//! ```

use log::debug;

use crate::store::WaypointStore;
use crate::types::{Direction, Waypoint, WaypointId};

/// Shown in place of the list while the mission is empty.
pub const EMPTY_HINT: &str = "Click on the map to add waypoints.";

// =============================================================================
// Events
// =============================================================================

/// An edit coming from the waypoint list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Raw text of the altitude input for waypoint `id`.
    Altitude { id: WaypointId, text: String },
    /// Move the row at `index` one step.
    Reorder { index: usize, direction: Direction },
    /// Delete button of waypoint `id`.
    Delete { id: WaypointId },
}

/// Apply `event` to `store`. Returns true if the collection changed.
pub fn apply(store: &WaypointStore, event: ListEvent) -> bool {
    match event {
        ListEvent::Altitude { id, text } => match parse_altitude(&text) {
            Some(alt) => store.update_altitude(&id, alt),
            None => {
                debug!("altitude input {:?} for {} discarded", text, id);
                false
            }
        },
        ListEvent::Reorder { index, direction } => store.reorder(index, direction),
        ListEvent::Delete { id } => store.delete(&id),
    }
}

/// Read a number from the start of `text`, the way a number field does.
///
/// Leading whitespace is skipped and trailing garbage ignored (`"150m"` is
/// 150). Returns None when no finite number starts the text.
pub fn parse_altitude(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// =============================================================================
// Rows
// =============================================================================

/// What one list row shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: WaypointId,
    /// 1-based mission position.
    pub seq: usize,
    /// `Lat: 10.000000, Lng: 20.000000`
    pub coords: String,
    pub alt: f64,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// One row per waypoint, in mission order.
pub fn rows(waypoints: &[Waypoint]) -> Vec<ListRow> {
    let last = waypoints.len().saturating_sub(1);
    waypoints
        .iter()
        .enumerate()
        .map(|(i, wp)| ListRow {
            id: wp.id.clone(),
            seq: i + 1,
            coords: format!("Lat: {:.6}, Lng: {:.6}", wp.lat, wp.lng),
            alt: wp.alt,
            can_move_up: i > 0,
            can_move_down: i < last,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
