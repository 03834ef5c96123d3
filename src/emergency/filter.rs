//! Corridor proximity filtering of raw POI features

use std::collections::HashSet;

use tracing::debug;

use super::{EmergencyFacility, FacilityCategory, RawFeature};
use crate::geodesy;
use crate::models::RouteGeometry;

/// Filter raw features down to deduplicated facilities within the corridor
///
/// The corridor radius is the authoritative inclusion test; the bounding box
/// used to fetch the candidates is only a coarse pre-filter and over-includes
/// near its corners. Deduplication is by source identifier, never by display
/// name: two distinct facilities may legitimately share a name. Output keeps
/// first-seen input order. Pure transformation, no side effects.
#[must_use]
pub fn filter_facilities(
    features: &[RawFeature],
    route: &RouteGeometry,
    corridor_radius_km: f64,
) -> Vec<EmergencyFacility> {
    if route.is_empty() {
        debug!("Skipping proximity filter: no route");
        return Vec::new();
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut facilities = Vec::new();

    for feature in features {
        if !seen_ids.insert(&feature.id) {
            continue;
        }

        let Some(coordinate) = feature.coordinate else {
            continue;
        };
        if !coordinate.is_valid() {
            continue;
        }

        // Route is non-empty, so the nearest-point search cannot fail
        let Ok(nearest) = geodesy::nearest_point(&coordinate, route.points()) else {
            continue;
        };
        let distance_km = geodesy::distance_km(&coordinate, &nearest);

        if distance_km > corridor_radius_km {
            continue;
        }

        let category = FacilityCategory::from_tags(&feature.tags);
        let name = feature
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| category.fallback_name().to_string());

        facilities.push(EmergencyFacility {
            id: feature.id.clone(),
            category,
            name,
            coordinate,
            distance_km,
            nearest_route_point: nearest,
        });
    }

    debug!(
        "Retained {} of {} candidate features within {}km corridor",
        facilities.len(),
        features.len(),
        corridor_radius_km
    );

    facilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use std::collections::HashMap;

    fn route() -> RouteGeometry {
        // Roughly north-south along lon 0, one degree of latitude
        RouteGeometry::new(vec![
            Coordinate::new(0.0, 40.0),
            Coordinate::new(0.0, 40.5),
            Coordinate::new(0.0, 41.0),
        ])
    }

    fn feature(id: &str, coordinate: Option<Coordinate>, pairs: &[(&str, &str)]) -> RawFeature {
        RawFeature {
            id: id.to_string(),
            coordinate,
            tags: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_in_corridor_feature_is_retained() {
        // ~0.01 degrees of longitude at lat 40 is well under 5 km
        let features = vec![feature(
            "node/1",
            Some(Coordinate::new(0.01, 40.5)),
            &[("amenity", "hospital"), ("name", "St. Mary")],
        )];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].name, "St. Mary");
        assert_eq!(facilities[0].category, FacilityCategory::Medical);
        assert!(facilities[0].distance_km < 5.0);
        assert_eq!(facilities[0].nearest_route_point, Coordinate::new(0.0, 40.5));
    }

    #[test]
    fn test_out_of_corridor_feature_is_excluded() {
        // One degree of longitude at lat 40 is ~85 km
        let features = vec![feature(
            "node/2",
            Some(Coordinate::new(1.0, 40.5)),
            &[("amenity", "hospital")],
        )];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert!(facilities.is_empty());
    }

    #[test]
    fn test_missing_coordinate_is_skipped() {
        let features = vec![
            feature("relation/3", None, &[("amenity", "police")]),
            feature(
                "node/4",
                Some(Coordinate::new(0.01, 40.5)),
                &[("amenity", "police")],
            ),
        ];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].id, "node/4");
    }

    #[test]
    fn test_invalid_coordinate_is_skipped() {
        let features = vec![feature(
            "node/5",
            Some(Coordinate::new(-190.0, 40.5)),
            &[("amenity", "police")],
        )];
        assert!(filter_facilities(&features, &route(), 5.0).is_empty());
    }

    #[test]
    fn test_dedup_is_by_id_not_name() {
        let features = vec![
            feature("node/6", Some(Coordinate::new(0.01, 40.2)), &[]),
            // Same id again: dropped
            feature("node/6", Some(Coordinate::new(0.01, 40.3)), &[]),
            // Different id, same fallback display name: kept
            feature("node/7", Some(Coordinate::new(0.01, 40.4)), &[]),
        ];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].id, "node/6");
        assert_eq!(facilities[1].id, "node/7");
        assert_eq!(facilities[0].name, facilities[1].name);
    }

    #[test]
    fn test_fallback_name_per_category() {
        let features = vec![feature(
            "node/8",
            Some(Coordinate::new(0.01, 40.5)),
            &[("amenity", "fire_station")],
        )];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert_eq!(facilities[0].name, "Fire Department");
    }

    #[test]
    fn test_output_keeps_first_seen_order() {
        let features = vec![
            feature("node/b", Some(Coordinate::new(0.01, 41.0)), &[]),
            feature("node/a", Some(Coordinate::new(0.01, 40.0)), &[]),
        ];
        let facilities = filter_facilities(&features, &route(), 5.0);
        assert_eq!(facilities[0].id, "node/b");
        assert_eq!(facilities[1].id, "node/a");
    }

    #[test]
    fn test_empty_route_yields_no_facilities() {
        let features = vec![feature(
            "node/9",
            Some(Coordinate::new(0.0, 40.0)),
            &[("amenity", "hospital")],
        )];
        let empty = RouteGeometry::new(vec![]);
        assert!(filter_facilities(&features, &empty, 5.0).is_empty());
    }

    #[test]
    fn test_tags_map_is_empty_by_default() {
        let f = feature("node/10", Some(Coordinate::new(0.0, 40.0)), &[]);
        assert_eq!(f.tags, HashMap::new());
    }
}
