//! The durable collection of saved polygons.
//!
//! [`PolygonRecordStore`] owns every saved [`Polygon`] and keeps the durable
//! copy in lockstep with memory: each mutation re-serializes the whole
//! collection through the persistence provider before reporting success, and
//! rolls the in-memory state back when the write fails. Rendering handles
//! held elsewhere are keyed by polygon id only; they never own the records.

use crate::persist::{PersistenceError, PersistenceProvider};
use crate::types::{Polygon, PolygonId};
use thiserror::Error;

/// Errors from store operations.
///
/// `DuplicateId` and `NotFound` indicate a caller bug rather than a
/// user-correctable condition; ids are generated to make collisions
/// impossible in practice, but the contract rejects them instead of silently
/// overwriting.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A polygon with this id is already stored.
    #[error("polygon {0} already exists")]
    DuplicateId(PolygonId),
    /// No polygon with this id is stored.
    #[error("polygon {0} not found")]
    NotFound(PolygonId),
    /// The write-through persist failed; the mutation was not committed.
    #[error("persistence unavailable: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Insertion-ordered mapping from polygon id to saved polygon.
pub struct PolygonRecordStore {
    polygons: Vec<Polygon>,
    provider: Box<dyn PersistenceProvider>,
}

impl PolygonRecordStore {
    /// Reconstructs the store from the provider's saved collection.
    ///
    /// An absent blob starts an empty store. A malformed blob is logged and
    /// also starts an empty store; corrupt persisted data must never block
    /// startup. Duplicate ids in the blob keep their first occurrence.
    pub fn load(provider: Box<dyn PersistenceProvider>) -> Self {
        let polygons = match provider.read_all() {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Polygon>>(&blob) {
                Ok(parsed) => dedup_by_id(parsed),
                Err(e) => {
                    log::warn!("discarding malformed polygon collection: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("could not read polygon collection, starting empty: {e}");
                Vec::new()
            }
        };

        Self { polygons, provider }
    }

    /// All saved polygons in insertion order.
    pub fn list(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Looks up a polygon by id.
    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    /// Number of saved polygons.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Whether the store holds no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Inserts a new polygon and persists the collection.
    ///
    /// # Returns
    ///
    /// `StoreError::DuplicateId` if the id is already present, or
    /// `StoreError::Persistence` if the write-through failed, in which case
    /// the polygon is not kept.
    pub fn create(&mut self, polygon: Polygon) -> Result<(), StoreError> {
        if self.get(polygon.id).is_some() {
            return Err(StoreError::DuplicateId(polygon.id));
        }

        self.polygons.push(polygon);
        if let Err(e) = self.persist() {
            self.polygons.pop();
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes a polygon and persists the remaining collection.
    ///
    /// Other entries are unaffected. Fails with `StoreError::NotFound` if the
    /// id is absent; on a failed write-through the entry is restored at its
    /// original position.
    pub fn delete(&mut self, id: PolygonId) -> Result<(), StoreError> {
        let index = self
            .polygons
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.polygons.remove(index);
        if let Err(e) = self.persist() {
            self.polygons.insert(index, removed);
            return Err(e.into());
        }
        Ok(())
    }

    /// Changes a polygon's display name and persists the collection.
    ///
    /// Only the name is touched; vertices and area are immutable after
    /// creation. On a failed write-through the old name is restored.
    pub fn rename(&mut self, id: PolygonId, new_name: impl Into<String>) -> Result<(), StoreError> {
        let polygon = self
            .polygons
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let old_name = std::mem::replace(&mut polygon.name, new_name.into());
        if let Err(e) = self.persist() {
            if let Some(polygon) = self.polygons.iter_mut().find(|p| p.id == id) {
                polygon.name = old_name;
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Serializes the whole collection through the provider.
    fn persist(&mut self) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string_pretty(&self.polygons)?;
        self.provider.write_all(&blob)
    }
}

/// Keeps the first occurrence of every id, dropping later duplicates.
fn dedup_by_id(parsed: Vec<Polygon>) -> Vec<Polygon> {
    let mut polygons: Vec<Polygon> = Vec::with_capacity(parsed.len());
    for polygon in parsed {
        if polygons.iter().any(|p| p.id == polygon.id) {
            log::warn!("dropping duplicate polygon id {} from saved data", polygon.id);
            continue;
        }
        polygons.push(polygon);
    }
    polygons
}
