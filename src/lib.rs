//! # Area Tracer
//!
//! Trace a closed polygon on a map by clicking successive vertices, get the
//! real-world ground area it encloses, and keep named polygons across
//! sessions. The crate holds the non-visual core:
//! - **Geodesic area**: a ring of longitude/latitude vertices to square
//!   meters and hectares, accounting for Earth's curvature
//! - **Drawing session**: the Idle/Drawing state machine that accumulates
//!   vertices and enforces the minimum-3-points rule
//! - **Polygon store**: create/list/rename/delete with write-through durable
//!   persistence
//!
//! Map rendering is an external collaborator behind the [`MapLayerAdapter`]
//! contract; the bundled console shell is one small backend.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod app;
mod area;
mod console;
mod constants;
mod location;
mod persist;
mod render;
mod session;
mod store;
mod types;

// Re-export public types and functions
pub use app::*;
pub use area::compute_area;
pub use console::*;
pub use location::*;
pub use persist::*;
pub use render::*;
pub use session::*;
pub use store::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_trace_and_save_flow() {
        let store = PolygonRecordStore::load(Box::new(MemoryPersistence::new()));
        let mut app = TracerApp::new(
            store,
            Box::new(NullMapLayer),
            Box::new(StaticLocationProvider::denied()),
        );

        app.toggle_drawing();
        app.map_clicked(Coordinate::new(9.17, 48.78));
        app.map_clicked(Coordinate::new(9.18, 48.78));
        app.map_clicked(Coordinate::new(9.18, 48.79));
        let id = app.save_draft(None).unwrap();

        assert_eq!(app.polygons().len(), 1);
        assert_eq!(app.polygons()[0].id, id);
        assert_eq!(app.mode(), DrawingMode::Idle);
    }

    #[test]
    fn test_zero_area_for_degenerate_ring() {
        let area = compute_area(&[Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
        assert_eq!(area, AreaMeasurement::zero());
    }
}
