//! Shared application-wide constants.
//! Centralizes tweakable values used across the area math, drawing session,
//! and persistence.

use std::time::Duration;

// Geometry
/// Earth's mean radius in meters, used by the spherical area formula.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;
/// Number of square meters in one hectare.
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;
/// Minimum number of vertices a ring needs before it encloses any area.
pub const MIN_RING_VERTICES: usize = 3;

// Location
/// How long a single-shot position request may stay unanswered before it is
/// reported as timed out.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(6);

// Persistence
/// Default file name for the durable polygon collection.
pub const DEFAULT_STORE_FILE: &str = "polygons.json";
