//! The interactive drawing session state machine.
//!
//! A [`DrawingSession`] accumulates vertices for one in-progress polygon and
//! enforces the validity rules around starting, cancelling, and finishing a
//! draft. It holds no persistence concerns; a finished draft is handed back
//! to the caller as a [`Polygon`] for the store to insert.

use crate::area::compute_area;
use crate::constants::MIN_RING_VERTICES;
use crate::types::{AreaMeasurement, Coordinate, InsufficientVertices, Polygon, Ring};

/// Whether the session is currently accepting vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingMode {
    /// Not drawing; map clicks are ignored.
    Idle,
    /// Actively tracing a polygon; each map click appends a vertex.
    Drawing,
}

/// The in-progress polygon being traced, one per interaction context.
///
/// The session owns its draft vertices exclusively. Finishing a draft moves
/// the buffer into the returned [`Polygon`]; abandoning one discards it.
/// Drafts are transient and never persisted.
#[derive(Debug)]
pub struct DrawingSession {
    mode: DrawingMode,
    draft: Ring,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSession {
    /// Creates an idle session with an empty draft.
    pub fn new() -> Self {
        Self {
            mode: DrawingMode::Idle,
            draft: Ring::new(),
        }
    }

    /// The current drawing mode.
    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// The draft vertices accumulated so far, in click order.
    pub fn draft(&self) -> &[Coordinate] {
        &self.draft
    }

    /// Enters drawing mode, always starting from an empty draft.
    ///
    /// Calling this while already drawing is a discard-and-restart: the prior
    /// draft is thrown away rather than kept as a second overlapping draft.
    pub fn start(&mut self) {
        self.draft.clear();
        self.mode = DrawingMode::Drawing;
    }

    /// Flips drawing mode on or off and returns the new mode.
    ///
    /// Turning drawing off mid-draw abandons the current shape; stopping is
    /// never a pause.
    pub fn toggle(&mut self) -> DrawingMode {
        match self.mode {
            DrawingMode::Idle => self.start(),
            DrawingMode::Drawing => self.cancel(),
        }
        self.mode
    }

    /// Appends a vertex to the draft.
    ///
    /// Vertices are append-only and kept in strict click order. Returns
    /// `false` when the session is idle, in which case the click has no
    /// effect.
    pub fn add_vertex(&mut self, vertex: Coordinate) -> bool {
        if self.mode != DrawingMode::Drawing {
            return false;
        }
        self.draft.push(vertex);
        true
    }

    /// Live area feedback for the current draft.
    ///
    /// Recomputed on demand, never stored. `None` until the draft has enough
    /// vertices to enclose any area.
    pub fn live_area(&self) -> Option<AreaMeasurement> {
        if self.draft.len() < MIN_RING_VERTICES {
            return None;
        }
        Some(compute_area(&self.draft))
    }

    /// Abandons the draft and returns to idle, regardless of current mode.
    pub fn cancel(&mut self) {
        self.draft.clear();
        self.mode = DrawingMode::Idle;
    }

    /// Finishes the draft into a new [`Polygon`] and resets the session.
    ///
    /// The minimum-3-vertices rule is a hard precondition: on failure the
    /// draft is left untouched so the user can keep clicking. On success the
    /// draft buffer moves into the polygon, the session returns to idle, and
    /// the caller is responsible for inserting the polygon into a store.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, or `None` for the positional default
    ///   ("Polygon N")
    /// * `saved_count` - How many polygons the store currently holds; the
    ///   store is authoritative for the default numbering
    ///
    /// # Returns
    ///
    /// The new polygon, or [`InsufficientVertices`] when the draft has fewer
    /// than 3 vertices.
    pub fn finalize(
        &mut self,
        name: Option<String>,
        saved_count: usize,
    ) -> Result<Polygon, InsufficientVertices> {
        if self.draft.len() < MIN_RING_VERTICES {
            return Err(InsufficientVertices {
                have: self.draft.len(),
            });
        }

        let name = name.unwrap_or_else(|| format!("Polygon {}", saved_count + 1));
        let polygon = Polygon::new(name, std::mem::take(&mut self.draft))?;
        self.mode = DrawingMode::Idle;
        Ok(polygon)
    }
}
