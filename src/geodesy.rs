//! Coordinate-pair distance and proximity primitives

use haversine::{distance, Location as HaversineLocation, Units};

use crate::models::Coordinate;
use crate::{Result, RouteWatchError};

/// Great-circle distance between two coordinates in kilometers
#[must_use]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let from = HaversineLocation {
        latitude: a.lat,
        longitude: a.lon,
    };
    let to = HaversineLocation {
        latitude: b.lat,
        longitude: b.lon,
    };
    distance(from, to, Units::Kilometers)
}

/// The candidate closest to `target` by planar degree distance
///
/// Intentionally a cheap planar approximation rather than geodesic: it only
/// ranks points within a small local neighborhood, so absolute distance does
/// not matter. Ties keep the first occurrence in iteration order.
pub fn nearest_point(target: &Coordinate, candidates: &[Coordinate]) -> Result<Coordinate> {
    let mut best = *candidates.first().ok_or_else(|| {
        RouteWatchError::invalid_input("nearest-point search over an empty candidate set")
    })?;
    let mut best_dist_sq = f64::INFINITY;

    for candidate in candidates {
        let dx = target.lon - candidate.lon;
        let dy = target.lat - candidate.lat;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = *candidate;
        }
    }

    Ok(best)
}
