//! Coordinate and bounding-box models for route geometry

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair, longitude first
///
/// The (lon, lat) ordering matches GeoJSON and the routing providers this
/// engine consumes; polyline decoding reorders its (lat, lon) output into
/// this convention at the boundary.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Latitude in decimal degrees
    pub lat: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether the coordinate lies within valid WGS84 degree ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Format as a "lat, lon" display string
    #[must_use]
    pub fn format_lat_lon(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Whether a coordinate falls inside the box (bounds inclusive)
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }

    /// Render as an Overpass QL bbox filter: `(south,west,north,east)`
    #[must_use]
    pub fn overpass_filter(&self) -> String {
        format!(
            "({},{},{},{})",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
