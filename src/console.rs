//! Console host pieces: a map surface that logs what it would draw, and the
//! waypoint list rendered to the terminal.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use log::info;

use mission_planner::list::EMPTY_HINT;
use mission_planner::{
    ListRow, LngLat, MapConfig, MapError, MapSurface, MarkerHandle, MarkerLabel, MarkerStyle,
    RouteStyle,
};

/// Map surface without a map. Every command becomes a log line.
pub struct ConsoleSurface {
    next_handle: u64,
}

impl ConsoleSurface {
    pub fn open(config: &MapConfig) -> Result<Self, MapError> {
        info!(
            "map view {} centred on ({}, {}) at zoom {}",
            config.style_url, config.center.lng, config.center.lat, config.zoom
        );
        Ok(Self { next_handle: 0 })
    }
}

impl MapSurface for ConsoleSurface {
    fn install_route(&mut self, style: &RouteStyle) {
        info!(
            "route layer installed (color {}, width {}, opacity {})",
            style.color, style.width, style.opacity
        );
    }

    fn place_marker(
        &mut self,
        position: LngLat,
        label: &MarkerLabel,
        style: &MarkerStyle,
    ) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        info!(
            "marker {} at ({:.6}, {:.6}) {} [{}]",
            handle.0,
            position.lng,
            position.lat,
            label.text(),
            style.color
        );
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        info!("marker {} removed", handle.0);
    }

    fn set_route(&mut self, path: &[LngLat]) {
        info!("route set through {} points", path.len());
    }

    fn release(&mut self) {
        info!("map released");
    }
}

/// Print the waypoint list, or the empty hint.
pub fn print_rows(out: &mut impl Write, rows: &[ListRow], can_export: bool) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::White),
        Print("Waypoints\n"),
        ResetColor
    )?;

    if rows.is_empty() {
        queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(EMPTY_HINT),
            Print("\n"),
            ResetColor
        )?;
        return out.flush();
    }

    for row in rows {
        let up = if row.can_move_up { "↑" } else { " " };
        let down = if row.can_move_down { "↓" } else { " " };
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("{:>3} ", row.seq)),
            ResetColor,
            Print(&row.coords),
            SetForegroundColor(Color::Yellow),
            Print(format!("  Alt (m): {}", row.alt)),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("  {}{} ✕\n", up, down)),
            ResetColor
        )?;
    }

    if can_export {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            Print("[export] Export Mission (JSON)\n"),
            ResetColor
        )?;
    }
    out.flush()
}
