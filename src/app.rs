//! The application controller wiring the core components together.
//!
//! [`TracerApp`] owns the drawing session, the polygon store, the map
//! backend, and the location provider, and translates user commands into
//! core calls. After every state transition it tells the map backend what
//! should now be visible, so rendering stays in lockstep with the store
//! without the backend holding any business logic.

use crate::location::{LocationProvider, PositionRequest};
use crate::render::MapLayerAdapter;
use crate::session::{DrawingMode, DrawingSession};
use crate::store::{PolygonRecordStore, StoreError};
use crate::types::{AreaMeasurement, Coordinate, InsufficientVertices, Polygon, PolygonId};
use thiserror::Error;

/// Errors from saving the current draft.
#[derive(Error, Debug)]
pub enum SaveError {
    /// The draft is too short to form a polygon; keep clicking.
    #[error(transparent)]
    Draft(#[from] InsufficientVertices),
    /// The store rejected the new polygon or could not persist it.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The interactive area tracer application.
///
/// Explicitly constructed at startup and explicitly owned; multiple
/// independent instances can coexist, which the tests rely on.
pub struct TracerApp {
    session: DrawingSession,
    store: PolygonRecordStore,
    map: Box<dyn MapLayerAdapter>,
    location: Box<dyn LocationProvider>,
    polygons_visible: bool,
}

impl TracerApp {
    /// Wires up a new application instance and renders the polygons the
    /// store loaded from persistence.
    pub fn new(
        store: PolygonRecordStore,
        mut map: Box<dyn MapLayerAdapter>,
        location: Box<dyn LocationProvider>,
    ) -> Self {
        for polygon in store.list() {
            map.render_polygon(polygon.id, &polygon.vertices, &Self::label(polygon));
        }

        Self {
            session: DrawingSession::new(),
            store,
            map,
            location,
            polygons_visible: true,
        }
    }

    /// The current drawing mode.
    pub fn mode(&self) -> DrawingMode {
        self.session.mode()
    }

    /// All saved polygons in insertion order.
    pub fn polygons(&self) -> &[Polygon] {
        self.store.list()
    }

    /// Live area of the current draft, once it has 3 or more vertices.
    pub fn live_area(&self) -> Option<AreaMeasurement> {
        self.session.live_area()
    }

    /// Whether saved polygons are currently shown on the map.
    pub fn polygons_visible(&self) -> bool {
        self.polygons_visible
    }

    /// Turns drawing mode on or off and returns the new mode.
    ///
    /// Either direction discards any in-progress draft, so the draft layer
    /// is cleared both ways.
    pub fn toggle_drawing(&mut self) -> DrawingMode {
        let mode = self.session.toggle();
        self.map.clear_draft();
        mode
    }

    /// Handles a map click while tracing.
    ///
    /// Appends a vertex when drawing and refreshes the draft layer. Returns
    /// the live area once the draft encloses one; clicks outside drawing
    /// mode have no effect and return `None`.
    pub fn map_clicked(&mut self, vertex: Coordinate) -> Option<AreaMeasurement> {
        if !self.session.add_vertex(vertex) {
            return None;
        }
        self.map.render_draft(self.session.draft());
        self.session.live_area()
    }

    /// Abandons the current draft without leaving a trace on the map.
    pub fn cancel_draft(&mut self) {
        self.session.cancel();
        self.map.clear_draft();
    }

    /// Saves the current draft as a named polygon.
    ///
    /// Finishes the draft, persists the new polygon, and only after the
    /// write-through succeeded swaps the draft layer for the saved polygon
    /// layer.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, or `None` for the positional default
    ///
    /// # Returns
    ///
    /// The id of the new polygon.
    pub fn save_draft(&mut self, name: Option<String>) -> Result<PolygonId, SaveError> {
        let polygon = self.session.finalize(name, self.store.len())?;
        let id = polygon.id;
        self.store.create(polygon)?;

        self.map.clear_draft();
        if let Some(saved) = self.store.get(id) {
            self.map
                .render_polygon(saved.id, &saved.vertices, &Self::label(saved));
        }
        Ok(id)
    }

    /// Renames a saved polygon and refreshes its label on the map.
    pub fn rename_polygon(
        &mut self,
        id: PolygonId,
        new_name: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.store.rename(id, new_name)?;
        if let Some(renamed) = self.store.get(id) {
            self.map
                .render_polygon(renamed.id, &renamed.vertices, &Self::label(renamed));
        }
        Ok(())
    }

    /// Deletes a saved polygon and removes its layer, in lockstep.
    pub fn delete_polygon(&mut self, id: PolygonId) -> Result<(), StoreError> {
        self.store.delete(id)?;
        self.map.remove_polygon(id);
        Ok(())
    }

    /// Shows or hides all saved polygons.
    pub fn set_polygons_visible(&mut self, visible: bool) {
        self.polygons_visible = visible;
        self.map.set_polygons_visible(visible);
    }

    /// Starts a single-shot position request for re-centering the view.
    pub fn request_location(&mut self) -> PositionRequest {
        self.location.request_position()
    }

    /// Display label for a saved polygon's map layer.
    fn label(polygon: &Polygon) -> String {
        format!("{} ({} ha)", polygon.name, polygon.area.hectares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::StaticLocationProvider;
    use crate::persist::MemoryPersistence;
    use crate::render::{RecordingMapLayer, RenderCommand};
    use std::cell::RefCell;
    use std::rc::Rc;

    type CommandLog = Rc<RefCell<Vec<RenderCommand>>>;

    fn app_with_store(store: PolygonRecordStore) -> (TracerApp, CommandLog) {
        let (layer, commands) = RecordingMapLayer::new();
        let app = TracerApp::new(
            store,
            Box::new(layer),
            Box::new(StaticLocationProvider::fixed(Coordinate::new(13.4, 52.5))),
        );
        (app, commands)
    }

    fn empty_app() -> (TracerApp, CommandLog) {
        app_with_store(PolygonRecordStore::load(Box::new(MemoryPersistence::new())))
    }

    fn trace_triangle(app: &mut TracerApp) {
        app.toggle_drawing();
        app.map_clicked(Coordinate::new(0.0, 0.0));
        app.map_clicked(Coordinate::new(0.001, 0.0));
        app.map_clicked(Coordinate::new(0.001, 0.001));
    }

    #[test]
    fn test_startup_renders_loaded_polygons() {
        let saved = Polygon::new(
            "Loaded".to_string(),
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.001, 0.0),
                Coordinate::new(0.001, 0.001),
            ],
        )
        .unwrap();
        let blob = serde_json::to_string(&vec![saved.clone()]).unwrap();
        let store = PolygonRecordStore::load(Box::new(MemoryPersistence::with_blob(blob)));

        let (app, commands) = app_with_store(store);

        assert_eq!(app.polygons().len(), 1);
        let commands = commands.borrow();
        assert!(matches!(commands[0], RenderCommand::Polygon(id, _) if id == saved.id));
    }

    #[test]
    fn test_clicks_are_ignored_while_idle() {
        let (mut app, commands) = empty_app();

        assert!(app.map_clicked(Coordinate::new(1.0, 1.0)).is_none());
        assert!(commands.borrow().is_empty());
    }

    #[test]
    fn test_clicks_refresh_draft_layer_and_report_area() {
        let (mut app, commands) = empty_app();
        app.toggle_drawing();

        assert!(app.map_clicked(Coordinate::new(0.0, 0.0)).is_none());
        assert!(app.map_clicked(Coordinate::new(0.001, 0.0)).is_none());
        let area = app.map_clicked(Coordinate::new(0.001, 0.001));

        assert!(area.expect("three vertices enclose area").square_meters > 0.0);
        let commands = commands.borrow();
        assert!(commands.contains(&RenderCommand::Draft(1)));
        assert!(commands.contains(&RenderCommand::Draft(2)));
        assert!(commands.contains(&RenderCommand::Draft(3)));
    }

    #[test]
    fn test_save_renders_polygon_only_after_persist() {
        let (mut app, commands) = empty_app();
        trace_triangle(&mut app);

        let id = app.save_draft(Some("Back Paddock".to_string())).unwrap();

        assert_eq!(app.mode(), DrawingMode::Idle);
        assert_eq!(app.polygons().len(), 1);
        let commands = commands.borrow();
        let tail = &commands[commands.len() - 2..];
        assert_eq!(tail[0], RenderCommand::ClearDraft);
        assert!(matches!(&tail[1], RenderCommand::Polygon(got, label)
            if *got == id && label.starts_with("Back Paddock")));
    }

    #[test]
    fn test_save_uses_store_count_for_default_names() {
        let (mut app, _commands) = empty_app();

        trace_triangle(&mut app);
        app.save_draft(None).unwrap();
        trace_triangle(&mut app);
        app.save_draft(None).unwrap();

        let names: Vec<&str> = app.polygons().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Polygon 1", "Polygon 2"]);
    }

    #[test]
    fn test_save_with_short_draft_fails_and_keeps_draft() {
        let (mut app, _commands) = empty_app();
        app.toggle_drawing();
        app.map_clicked(Coordinate::new(0.0, 0.0));
        app.map_clicked(Coordinate::new(0.001, 0.0));

        let result = app.save_draft(None);

        assert!(matches!(result, Err(SaveError::Draft(_))));
        assert_eq!(app.mode(), DrawingMode::Drawing);
        assert!(app.polygons().is_empty());
    }

    #[test]
    fn test_toggle_off_discards_draft_and_clears_layer() {
        let (mut app, commands) = empty_app();
        app.toggle_drawing();
        app.map_clicked(Coordinate::new(0.0, 0.0));

        let mode = app.toggle_drawing();

        assert_eq!(mode, DrawingMode::Idle);
        assert!(app.live_area().is_none());
        assert_eq!(commands.borrow().last(), Some(&RenderCommand::ClearDraft));
    }

    #[test]
    fn test_delete_removes_store_entry_and_layer_in_lockstep() {
        let (mut app, commands) = empty_app();
        trace_triangle(&mut app);
        let id = app.save_draft(None).unwrap();

        app.delete_polygon(id).unwrap();

        assert!(app.polygons().is_empty());
        assert_eq!(commands.borrow().last(), Some(&RenderCommand::Remove(id)));
        assert!(matches!(
            app.delete_polygon(id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_rename_refreshes_label() {
        let (mut app, commands) = empty_app();
        trace_triangle(&mut app);
        let id = app.save_draft(None).unwrap();

        app.rename_polygon(id, "Renamed Field").unwrap();

        let commands = commands.borrow();
        assert!(matches!(commands.last(), Some(RenderCommand::Polygon(got, label))
            if *got == id && label.starts_with("Renamed Field")));
    }

    #[test]
    fn test_visibility_toggle_reaches_backend() {
        let (mut app, commands) = empty_app();

        app.set_polygons_visible(false);
        assert!(!app.polygons_visible());
        assert_eq!(commands.borrow().last(), Some(&RenderCommand::Visible(false)));

        app.set_polygons_visible(true);
        assert!(app.polygons_visible());
        assert_eq!(commands.borrow().last(), Some(&RenderCommand::Visible(true)));
    }

    #[test]
    fn test_location_request_resolves_without_touching_state() {
        let (mut app, _commands) = empty_app();
        trace_triangle(&mut app);

        let mut request = app.request_location();
        let answer = request.poll_result().expect("static provider answers");

        assert_eq!(answer, Ok(Coordinate::new(13.4, 52.5)));
        // Re-centering never adds a vertex or otherwise touches the draft.
        assert!(app.live_area().is_some());
        assert_eq!(app.mode(), DrawingMode::Drawing);
    }
}
