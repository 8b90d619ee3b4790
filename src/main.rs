//! planner - drive a mission session from line commands.
//!
//! ```text
//! click <lat> <lng>     add a waypoint (what a map click does)
//! alt <n> <value>       set the altitude of row n
//! up <n> | down <n>     move row n one step
//! del <n>               delete row n
//! list                  show the waypoint list
//! export                write mission.json into --out
//! quit
//! ```

mod console;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use mission_planner::{
    mount_with_ids, Coordinate, Direction, DirectoryDelivery, IdAllocator, ListEvent, MapConfig,
    MapEvent, MissionSession, RandomIds, SequentialIds,
};

use console::{print_rows, ConsoleSurface};

#[derive(Parser, Debug)]
#[command(name = "planner", about = "Plan a flight mission from the terminal")]
struct Args {
    /// Directory mission.json is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Map access token (overrides MISSION_MAP_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Use wp-1, wp-2, ... instead of random ids
    #[arg(long)]
    sequential_ids: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = MapConfig::from_env();
    if let Some(token) = args.token {
        config = config.with_access_token(token);
    }

    let ids: Box<dyn IdAllocator> = if args.sequential_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(RandomIds)
    };
    let mut session = mount_with_ids(&config, ids, ConsoleSurface::open);
    // The console surface has nothing to load.
    session.dispatch(MapEvent::Ready);

    let mut delivery = DirectoryDelivery::new(&args.out);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit" | "exit"] => break,
            ["list"] => {}
            ["export"] => match session.export_to(&mut delivery) {
                Ok(Some(doc)) => info!("{} ready ({} bytes)", doc.file_name, doc.contents.len()),
                Ok(None) => warn!("nothing to export yet"),
                Err(err) => warn!("export failed: {}", err),
            },
            ["click", lat, lng] => match (lat.parse::<f64>(), lng.parse::<f64>()) {
                (Ok(lat), Ok(lng)) if lat.is_finite() && lng.is_finite() => {
                    session.dispatch(MapEvent::Click(Coordinate::new(lat, lng)));
                }
                _ => warn!("click needs two numbers"),
            },
            ["alt", n, value] => {
                if let Some(id) = row_id(&session, n) {
                    session.edit(ListEvent::Altitude {
                        id,
                        text: value.to_string(),
                    });
                }
            }
            ["up", n] => reorder(&session, n, Direction::Up),
            ["down", n] => reorder(&session, n, Direction::Down),
            ["del", n] => {
                if let Some(id) = row_id(&session, n) {
                    session.edit(ListEvent::Delete { id });
                }
            }
            _ => {
                warn!("unknown command {:?}", line.trim());
                continue;
            }
        }

        let mut stdout = io::stdout();
        print_rows(&mut stdout, &session.rows(), session.can_export())
            .context("failed to print waypoint list")?;
    }

    session.unmount();
    Ok(())
}

/// Id of 1-based row `n`, if it exists.
fn row_id(session: &MissionSession<ConsoleSurface>, n: &str) -> Option<mission_planner::WaypointId> {
    let index = n.parse::<usize>().ok()?.checked_sub(1)?;
    session.rows().get(index).map(|row| row.id.clone())
}

fn reorder(session: &MissionSession<ConsoleSurface>, n: &str, direction: Direction) {
    if let Some(index) = n.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
        session.edit(ListEvent::Reorder { index, direction });
    }
}
