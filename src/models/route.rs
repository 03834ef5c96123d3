//! Route geometry and route-update event models

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::polyline;

/// An ordered route path from origin to destination
///
/// Built once per route-update event and replaced wholesale when the route
/// changes; never mutated in place.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteGeometry(Vec<Coordinate>);

impl RouteGeometry {
    /// Create a route from already-decoded coordinates
    #[must_use]
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    /// Decode an encoded polyline into a route
    ///
    /// The codec yields (lat, lon) pairs; they are reordered here into the
    /// crate-wide (lon, lat) convention. Malformed input decodes to an empty
    /// route, which downstream consumers treat as "no route".
    #[must_use]
    pub fn from_encoded(encoded: &str) -> Self {
        let points = polyline::decode(encoded)
            .into_iter()
            .map(|(lat, lon)| Coordinate::new(lon, lat))
            .collect();
        Self(points)
    }

    /// The route's coordinates in travel order
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One maneuver step of a step-by-step route description
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteStep {
    /// Location of the step's maneuver point
    pub location: Coordinate,
    /// Instruction text, when the routing provider supplies one
    pub instruction: Option<String>,
}

impl RouteStep {
    #[must_use]
    pub fn new(location: Coordinate) -> Self {
        Self {
            location,
            instruction: None,
        }
    }
}

/// A route-update event from the directions collaborator
///
/// Geometry and steps are optional: an update with neither still yields a
/// valid (empty) analysis pass.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteUpdate {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Encoded polyline geometry of the selected route
    pub geometry: Option<String>,
    /// Maneuver steps of the selected route, in travel order
    pub steps: Vec<RouteStep>,
}
