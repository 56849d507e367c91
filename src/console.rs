//! Line-oriented interactive shell.
//!
//! A minimal stand-in for a map frontend: commands arrive on stdin, and the
//! map backend echoes its render commands as text. All business logic stays
//! in the core; this module only parses commands and prints outcomes.

use crate::app::TracerApp;
use crate::constants::DEFAULT_STORE_FILE;
use crate::location::StaticLocationProvider;
use crate::persist::FilePersistence;
use crate::render::MapLayerAdapter;
use crate::session::DrawingMode;
use crate::store::PolygonRecordStore;
use crate::types::{Coordinate, PolygonId};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Map backend that narrates render commands on stdout.
pub struct ConsoleMapLayer;

impl MapLayerAdapter for ConsoleMapLayer {
    fn render_draft(&mut self, ring: &[Coordinate]) {
        println!("[map] draft: {} vertices", ring.len());
    }

    fn clear_draft(&mut self) {
        println!("[map] draft cleared");
    }

    fn render_polygon(&mut self, _id: PolygonId, ring: &[Coordinate], label: &str) {
        println!("[map] polygon \"{}\" with {} vertices", label, ring.len());
    }

    fn remove_polygon(&mut self, _id: PolygonId) {
        println!("[map] polygon removed");
    }

    fn set_polygons_visible(&mut self, visible: bool) {
        println!(
            "[map] polygons {}",
            if visible { "shown" } else { "hidden" }
        );
    }
}

/// Runs the interactive shell until `quit` or end of input.
///
/// Loads the polygon collection from the default store file next to the
/// working directory, so traced polygons survive across runs.
pub fn run_app() -> io::Result<()> {
    let store = PolygonRecordStore::load(Box::new(FilePersistence::new(DEFAULT_STORE_FILE)));
    let mut app = TracerApp::new(
        store,
        Box::new(ConsoleMapLayer),
        // No platform geolocation in a terminal; `locate` reports the denial.
        Box::new(StaticLocationProvider::denied()),
    );

    println!("area tracer: type 'help' for commands");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !dispatch(&mut app, line.trim()) {
            break;
        }
    }
    Ok(())
}

/// Executes one command line; returns `false` when the shell should exit.
fn dispatch(app: &mut TracerApp, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("help") => print_help(),
        Some("draw") => match app.toggle_drawing() {
            DrawingMode::Drawing => println!("drawing: click vertices with 'click <lon> <lat>'"),
            DrawingMode::Idle => println!("stopped drawing, draft discarded"),
        },
        Some("click") => match parse_coordinate(words.next(), words.next()) {
            Some(vertex) if app.mode() == DrawingMode::Drawing => {
                match app.map_clicked(vertex) {
                    Some(area) => println!(
                        "vertex added: {} m2 ({} ha) so far",
                        area.square_meters, area.hectares
                    ),
                    None => println!("vertex added"),
                }
            }
            Some(_) => println!("not drawing: 'draw' first"),
            None => println!("usage: click <lon> <lat>"),
        },
        Some("save") => {
            let rest: Vec<&str> = words.collect();
            let name = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            match app.save_draft(name) {
                Ok(id) => {
                    // The id is stable across runs; show it once at save time.
                    println!("saved ({id})");
                }
                Err(e) => println!("cannot save: {e}"),
            }
        }
        Some("cancel") => {
            app.cancel_draft();
            println!("draft discarded");
        }
        Some("list") => {
            if app.polygons().is_empty() {
                println!("no saved polygons");
            }
            for (i, polygon) in app.polygons().iter().enumerate() {
                println!(
                    "{}. {}: {} m2 ({} ha), saved {}",
                    i + 1,
                    polygon.name,
                    polygon.area.square_meters,
                    polygon.area.hectares,
                    polygon.created.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Some("rename") => match (index_arg(app, words.next()), words.collect::<Vec<_>>()) {
            (Some(id), rest) if !rest.is_empty() => match app.rename_polygon(id, rest.join(" ")) {
                Ok(()) => println!("renamed"),
                Err(e) => println!("cannot rename: {e}"),
            },
            _ => println!("usage: rename <number> <new name>"),
        },
        Some("delete") => match index_arg(app, words.next()) {
            Some(id) => match app.delete_polygon(id) {
                Ok(()) => println!("deleted"),
                Err(e) => println!("cannot delete: {e}"),
            },
            None => println!("usage: delete <number>"),
        },
        Some("show") => app.set_polygons_visible(true),
        Some("hide") => app.set_polygons_visible(false),
        Some("locate") => {
            let mut request = app.request_location();
            loop {
                match request.poll_result() {
                    Some(Ok(position)) => {
                        println!("centered on {}, {}", position.lon, position.lat);
                        break;
                    }
                    Some(Err(e)) => {
                        println!("location unavailable: {e}");
                        break;
                    }
                    None => thread::sleep(Duration::from_millis(50)),
                }
            }
        }
        Some("quit") | Some("exit") => return false,
        Some(other) => println!("unknown command '{other}': type 'help'"),
    }
    true
}

fn print_help() {
    println!("commands:");
    println!("  draw                 toggle drawing mode (restarting discards the draft)");
    println!("  click <lon> <lat>    add a vertex at the given position");
    println!("  save [name]          save the draft as a polygon");
    println!("  cancel               discard the draft");
    println!("  list                 list saved polygons");
    println!("  rename <n> <name>    rename polygon number n");
    println!("  delete <n>           delete polygon number n");
    println!("  show / hide          toggle saved polygon visibility");
    println!("  locate               re-center on the current position");
    println!("  quit                 exit");
}

/// Parses a longitude/latitude argument pair.
fn parse_coordinate(lon: Option<&str>, lat: Option<&str>) -> Option<Coordinate> {
    let lon: f64 = lon?.parse().ok()?;
    let lat: f64 = lat?.parse().ok()?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return None;
    }
    Some(Coordinate::new(lon, lat))
}

/// Resolves a 1-based list number to a polygon id.
fn index_arg(app: &TracerApp, arg: Option<&str>) -> Option<PolygonId> {
    let number: usize = arg?.parse().ok()?;
    app.polygons().get(number.checked_sub(1)?).map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_accepts_valid_pairs() {
        assert_eq!(
            parse_coordinate(Some("-122.41"), Some("37.77")),
            Some(Coordinate::new(-122.41, 37.77))
        );
    }

    #[test]
    fn test_parse_coordinate_rejects_out_of_range_values() {
        assert_eq!(parse_coordinate(Some("181.0"), Some("0.0")), None);
        assert_eq!(parse_coordinate(Some("0.0"), Some("-91.0")), None);
        assert_eq!(parse_coordinate(Some("abc"), Some("0.0")), None);
        assert_eq!(parse_coordinate(Some("0.0"), None), None);
    }
}
