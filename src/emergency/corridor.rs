//! Buffered bounding-box construction for spatial feature queries

use crate::models::{BoundingBox, RouteGeometry};
use crate::{Result, RouteWatchError};

/// Compute the route's bounding box, expanded by `buffer_deg` on every side
///
/// The buffer exists purely to avoid missing near-boundary features before
/// the precise corridor filter runs; the box itself over-includes near the
/// corners and must never be used as the final inclusion test.
pub fn bounding_box(route: &RouteGeometry, buffer_deg: f64) -> Result<BoundingBox> {
    let mut points = route.points().iter();
    let first = points.next().ok_or_else(|| {
        RouteWatchError::invalid_input("cannot build a corridor around an empty route")
    })?;

    let mut bbox = BoundingBox {
        min_lon: first.lon,
        min_lat: first.lat,
        max_lon: first.lon,
        max_lat: first.lat,
    };

    for point in points {
        bbox.min_lon = bbox.min_lon.min(point.lon);
        bbox.min_lat = bbox.min_lat.min(point.lat);
        bbox.max_lon = bbox.max_lon.max(point.lon);
        bbox.max_lat = bbox.max_lat.max(point.lat);
    }

    bbox.min_lon -= buffer_deg;
    bbox.min_lat -= buffer_deg;
    bbox.max_lon += buffer_deg;
    bbox.max_lat += buffer_deg;

    Ok(bbox)
}
