//! The capability contract between the core and a map rendering backend.
//!
//! The core fires these commands after every state transition that changes
//! what should be visible and never reads anything back; backends are
//! interchangeable and hold only non-owning render handles keyed by polygon
//! id.

use crate::types::{Coordinate, PolygonId};

/// Rendering commands a map backend must accept.
///
/// All methods are fire-and-forget; the core consumes no return values and
/// assumes nothing about how (or whether) a backend actually draws.
pub trait MapLayerAdapter {
    /// Shows the in-progress draft ring, replacing any previous draft layer.
    fn render_draft(&mut self, ring: &[Coordinate]);

    /// Removes the draft layer, if one is shown.
    fn clear_draft(&mut self);

    /// Shows a saved polygon under the given id with its display label.
    ///
    /// Rendering the same id again replaces the existing layer; backends key
    /// their handles by `id`.
    fn render_polygon(&mut self, id: PolygonId, ring: &[Coordinate], label: &str);

    /// Removes the layer for a saved polygon.
    fn remove_polygon(&mut self, id: PolygonId);

    /// Shows or hides all saved polygon layers at once.
    ///
    /// Visibility is a display toggle only; hidden polygons stay stored.
    fn set_polygons_visible(&mut self, visible: bool);
}

/// A backend that draws nothing.
///
/// Useful for headless runs where the core logic should execute without any
/// map attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMapLayer;

impl MapLayerAdapter for NullMapLayer {
    fn render_draft(&mut self, _ring: &[Coordinate]) {}

    fn clear_draft(&mut self) {}

    fn render_polygon(&mut self, _id: PolygonId, _ring: &[Coordinate], _label: &str) {}

    fn remove_polygon(&mut self, _id: PolygonId) {}

    fn set_polygons_visible(&mut self, _visible: bool) {}
}

/// A single rendering command, as observed by [`RecordingMapLayer`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// `render_draft` with the number of draft vertices.
    Draft(usize),
    /// `clear_draft`.
    ClearDraft,
    /// `render_polygon` with its id and label.
    Polygon(PolygonId, String),
    /// `remove_polygon`.
    Remove(PolygonId),
    /// `set_polygons_visible`.
    Visible(bool),
}

/// Test backend that records every command it receives, in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingMapLayer {
    /// Every command received so far.
    pub commands: std::rc::Rc<std::cell::RefCell<Vec<RenderCommand>>>,
}

#[cfg(test)]
impl RecordingMapLayer {
    /// Creates a recorder and a shared handle to its command log.
    pub fn new() -> (Self, std::rc::Rc<std::cell::RefCell<Vec<RenderCommand>>>) {
        let layer = Self::default();
        let commands = layer.commands.clone();
        (layer, commands)
    }
}

#[cfg(test)]
impl MapLayerAdapter for RecordingMapLayer {
    fn render_draft(&mut self, ring: &[Coordinate]) {
        self.commands
            .borrow_mut()
            .push(RenderCommand::Draft(ring.len()));
    }

    fn clear_draft(&mut self) {
        self.commands.borrow_mut().push(RenderCommand::ClearDraft);
    }

    fn render_polygon(&mut self, id: PolygonId, _ring: &[Coordinate], label: &str) {
        self.commands
            .borrow_mut()
            .push(RenderCommand::Polygon(id, label.to_string()));
    }

    fn remove_polygon(&mut self, id: PolygonId) {
        self.commands.borrow_mut().push(RenderCommand::Remove(id));
    }

    fn set_polygons_visible(&mut self, visible: bool) {
        self.commands
            .borrow_mut()
            .push(RenderCommand::Visible(visible));
    }
}
