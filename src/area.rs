//! Geodesic area computation for vertex rings.
//!
//! Treats a ring of longitude/latitude vertices as a closed loop on a sphere
//! of Earth's mean radius and computes the enclosed ground area. Polygons
//! traced on a map can span enough ground distance that a flat planar
//! shoelace would visibly under- or over-report, so the summation accounts
//! for curvature.

use crate::constants::{EARTH_MEAN_RADIUS_M, MIN_RING_VERTICES, SQUARE_METERS_PER_HECTARE};
use crate::types::{AreaMeasurement, Coordinate};

/// Computes the ground area enclosed by a ring.
///
/// The ring is open; the closing edge from the last vertex back to the first
/// is supplied internally. For each edge the difference in longitude
/// (radians) is weighted by `2 + sin(lat_a) + sin(lat_b)`, the terms are
/// summed, and the absolute value is scaled by `R^2 / 2`. The magnitude is
/// invariant under cyclic rotation of the vertex list and under winding
/// reversal; the winding sign is discarded.
///
/// # Arguments
///
/// * `ring` - The vertices to measure, in click order
///
/// # Returns
///
/// The enclosed area with both fields rounded to 2 decimal places. A ring
/// with fewer than 3 vertices has no area and returns the zero measurement;
/// that is a defined result, not an error.
pub fn compute_area(ring: &[Coordinate]) -> AreaMeasurement {
    if ring.len() < MIN_RING_VERTICES {
        return AreaMeasurement::zero();
    }

    let mut sum = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = &ring[(i + 1) % ring.len()];
        let delta_lon = b.lon.to_radians() - a.lon.to_radians();
        sum += delta_lon * (2.0 + a.lat.to_radians().sin() + b.lat.to_radians().sin());
    }

    let square_meters = (sum * EARTH_MEAN_RADIUS_M * EARTH_MEAN_RADIUS_M / 2.0).abs();

    // Each field rounds from the unrounded square-meter value.
    AreaMeasurement {
        square_meters: round2(square_meters),
        hectares: round2(square_meters / SQUARE_METERS_PER_HECTARE),
    }
}

/// Rounds a value to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
