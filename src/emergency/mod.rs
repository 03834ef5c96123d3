//! Emergency facility discovery along a route
//!
//! Builds the buffered corridor query box, consumes raw point features from
//! a POI collaborator, and filters them down to the deduplicated set of
//! facilities within the route corridor.

pub mod corridor;
pub mod filter;
pub mod overpass;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

pub use corridor::bounding_box;
pub use filter::filter_facilities;
pub use overpass::OverpassClient;

/// A raw point feature from the POI collaborator
///
/// Features without a usable coordinate (relations with no computed center)
/// are carried through so the filter can skip them explicitly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawFeature {
    /// Source identifier, unique per feature (e.g. "node/123")
    pub id: String,
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Category of an emergency facility
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FacilityCategory {
    Medical,
    Police,
    Fire,
    Other,
}

impl FacilityCategory {
    /// Classify from source tags
    ///
    /// The explicit `emergency` tag takes priority over `amenity`.
    #[must_use]
    pub fn from_tags(tags: &HashMap<String, String>) -> Self {
        let label = tags
            .get("emergency")
            .or_else(|| tags.get("amenity"))
            .map(String::as_str)
            .unwrap_or_default();

        match label {
            "hospital" | "clinic" => FacilityCategory::Medical,
            "police" => FacilityCategory::Police,
            "fire_station" => FacilityCategory::Fire,
            _ => FacilityCategory::Other,
        }
    }

    /// Display name used when the source feature carries no name
    #[must_use]
    pub fn fallback_name(self) -> &'static str {
        match self {
            FacilityCategory::Medical => "Medical Facility",
            FacilityCategory::Police => "Police Station",
            FacilityCategory::Fire => "Fire Department",
            FacilityCategory::Other => "Emergency Service",
        }
    }
}

/// An emergency facility retained within the route corridor
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmergencyFacility {
    /// Source identifier; rendering side effects are keyed by this
    pub id: String,
    pub category: FacilityCategory,
    pub name: String,
    pub coordinate: Coordinate,
    /// Distance to the nearest route point in kilometers
    pub distance_km: f64,
    /// The route point this facility is closest to
    pub nearest_route_point: Coordinate,
}
