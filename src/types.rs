//! Core data types and structures for the area tracer.
//!
//! This module defines the fundamental data structures used throughout the
//! application: geographic coordinates, rings of vertices, area measurements,
//! and the persisted polygon record.

use crate::area::compute_area;
use crate::constants::MIN_RING_VERTICES;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for saved polygons.
pub type PolygonId = Uuid;

/// An ordered, open sequence of coordinates describing a single closed loop.
///
/// The first vertex is never repeated at the end; the closing edge is implied.
pub type Ring = Vec<Coordinate>;

/// A geographic position in decimal degrees, WGS-84.
///
/// Serialized as a `[longitude, latitude]` pair to match the on-disk polygon
/// record format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    /// Longitude in decimal degrees, in [-180, 180].
    pub lon: f64,
    /// Latitude in decimal degrees, in [-90, 90].
    pub lat: f64,
}

impl Coordinate {
    /// Creates a coordinate from a longitude/latitude pair in decimal degrees.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.lon, c.lat)
    }
}

/// Ground area enclosed by a ring, in both unit systems the UI displays.
///
/// Always derived from a ring via [`compute_area`], never mutated on its own.
/// Both fields are rounded to 2 decimal places; `hectares` is rounded from the
/// unrounded square-meter value rather than derived from the rounded one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaMeasurement {
    /// Enclosed area in square meters, non-negative.
    pub square_meters: f64,
    /// Enclosed area in hectares, non-negative.
    pub hectares: f64,
}

impl AreaMeasurement {
    /// The defined zero case for empty or degenerate rings.
    pub fn zero() -> Self {
        Self {
            square_meters: 0.0,
            hectares: 0.0,
        }
    }
}

/// Error raised when a ring has too few vertices to form a polygon.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("a polygon needs at least 3 vertices, got {have}")]
pub struct InsufficientVertices {
    /// Number of vertices the ring actually had.
    pub have: usize,
}

/// A saved, named polygon.
///
/// Immutable after creation except for `name` (rename) and removal from the
/// store. The vertex ring and the area stamped at creation time are never
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Unique identifier for this polygon.
    pub id: PolygonId,
    /// User-displayable name.
    pub name: String,
    /// The vertex ring, always at least 3 vertices.
    pub vertices: Ring,
    /// Ground area computed once when the polygon was saved.
    pub area: AreaMeasurement,
    /// When the polygon was saved.
    pub created: DateTime<Utc>,
}

impl Polygon {
    /// Creates a new polygon from a finished ring.
    ///
    /// Computes the area, generates a fresh id, and stamps the creation time.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name for the polygon
    /// * `vertices` - The finished vertex ring
    ///
    /// # Returns
    ///
    /// The new polygon, or [`InsufficientVertices`] if the ring has fewer
    /// than 3 vertices.
    pub fn new(name: String, vertices: Ring) -> Result<Self, InsufficientVertices> {
        if vertices.len() < MIN_RING_VERTICES {
            return Err(InsufficientVertices {
                have: vertices.len(),
            });
        }

        let area = compute_area(&vertices);
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            vertices,
            area,
            created: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Ring {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.0),
            Coordinate::new(0.001, 0.001),
        ]
    }

    #[test]
    fn test_polygon_creation() {
        let polygon = Polygon::new("Test Field".to_string(), triangle()).unwrap();

        assert_eq!(polygon.name, "Test Field");
        assert_eq!(polygon.vertices.len(), 3);
        assert!(polygon.area.square_meters > 0.0);
        assert!(!polygon.id.is_nil());
    }

    #[test]
    fn test_polygon_rejects_short_ring() {
        let ring = vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
        let result = Polygon::new("Too Short".to_string(), ring);

        assert_eq!(result.unwrap_err(), InsufficientVertices { have: 2 });
    }

    #[test]
    fn test_polygon_ids_are_unique() {
        let a = Polygon::new("A".to_string(), triangle()).unwrap();
        let b = Polygon::new("B".to_string(), triangle()).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let c = Coordinate::new(-122.41, 37.77);
        let json = serde_json::to_string(&c).unwrap();

        assert_eq!(json, "[-122.41,37.77]");

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_area_measurement_wire_field_names() {
        let area = AreaMeasurement {
            square_meters: 1234.56,
            hectares: 0.12,
        };
        let json = serde_json::to_string(&area).unwrap();

        assert!(json.contains("squareMeters"));
        assert!(json.contains("hectares"));
    }

    #[test]
    fn test_polygon_roundtrip_serialization() {
        let original = Polygon::new("Round Trip".to_string(), triangle()).unwrap();

        let json = serde_json::to_string_pretty(&original).unwrap();
        let restored: Polygon = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
