//! Route analysis orchestration
//!
//! One full recomputation pass per route-update event: decode the geometry,
//! query and filter emergency facilities around the corridor, sample the
//! route steps for per-point place/weather lookups, and classify the overall
//! risk. The pass never fails outright; any collaborator lookup that errors
//! degrades its own slice of the output and the rest continues.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, RouteWatchConfig};
use crate::emergency::{corridor, filter_facilities, EmergencyFacility, RawFeature};
use crate::models::{BoundingBox, Coordinate, RouteGeometry, RouteUpdate, WeatherObservation};
use crate::risk::{RiskClassifier, RouteRiskReport};
use crate::sampler::{self, SampledCity};
use crate::Result;

/// Sentinel place name used when reverse geocoding fails or finds nothing
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Weather lookup collaborator
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current weather at a point
    async fn current_weather(&self, point: Coordinate) -> Result<WeatherObservation>;
}

/// Reverse-geocoding collaborator
#[async_trait]
pub trait PlaceNameProvider: Send + Sync {
    /// Resolved place name for a point
    async fn place_name(&self, point: Coordinate) -> Result<String>;
}

/// POI feature query collaborator
#[async_trait]
pub trait FeatureProvider: Send + Sync {
    /// Raw emergency-related features within a bounding box
    async fn features_in(&self, bbox: &BoundingBox) -> Result<Vec<RawFeature>>;
}

/// The complete output of one analysis run
///
/// Replaces the previous run's output wholesale; callers keying rendering
/// side effects by facility id must tear the old set down before showing
/// this one.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAnalysis {
    pub report: RouteRiskReport,
    pub facilities: Vec<EmergencyFacility>,
    pub cities: Vec<SampledCity>,
    pub start_weather: Option<WeatherObservation>,
    pub end_weather: Option<WeatherObservation>,
}

/// Per-route-update analysis service over the collaborator seams
pub struct RouteAnalysisService<W, P, F> {
    weather: W,
    places: P,
    features: F,
    classifier: RiskClassifier,
    analysis: AnalysisConfig,
}

impl<W, P, F> RouteAnalysisService<W, P, F>
where
    W: WeatherProvider,
    P: PlaceNameProvider,
    F: FeatureProvider,
{
    pub fn new(weather: W, places: P, features: F, config: &RouteWatchConfig) -> Self {
        Self {
            weather,
            places,
            features,
            classifier: RiskClassifier::new(config.thresholds),
            analysis: config.analysis,
        }
    }

    /// Run one full analysis pass for a route update
    ///
    /// The engine is stateless between invocations; each call owns its route,
    /// bounding box, and outputs exclusively.
    pub async fn analyze(&self, update: &RouteUpdate) -> RouteAnalysis {
        info!(
            "Analyzing route update: {} steps, geometry {}",
            update.steps.len(),
            if update.geometry.is_some() { "present" } else { "absent" }
        );

        let route = update
            .geometry
            .as_deref()
            .map(RouteGeometry::from_encoded)
            .unwrap_or_else(|| RouteGeometry::new(Vec::new()));

        let sampled = sampler::sample_steps(&update.steps, self.analysis.sample_stride);
        debug!("Sampled {} of {} route steps", sampled.len(), update.steps.len());

        let city_lookups = join_all(
            sampled
                .iter()
                .map(|step| self.lookup_city(step.location)),
        );

        let (facilities, raw_cities, start_weather, end_weather) = futures::join!(
            self.locate_facilities(&route),
            city_lookups,
            self.fetch_weather(update.origin),
            self.fetch_weather(update.destination),
        );

        // The classifier sees every sampled point's observation; city
        // deduplication is a display concern and happens after.
        let observations: Vec<WeatherObservation> = raw_cities
            .iter()
            .filter_map(|city| city.weather.clone())
            .collect();
        let cities = sampler::dedup_cities(raw_cities);

        let report = self.classifier.analyze(&observations);

        info!(
            "Route analysis complete: severity {:?}, {} facilities, {} cities",
            report.severity,
            facilities.len(),
            cities.len()
        );

        RouteAnalysis {
            report,
            facilities,
            cities,
            start_weather,
            end_weather,
        }
    }

    /// Query and filter emergency facilities around the route corridor
    async fn locate_facilities(&self, route: &RouteGeometry) -> Vec<EmergencyFacility> {
        if route.is_empty() {
            debug!("No route geometry, skipping facility query");
            return Vec::new();
        }

        let bbox = match corridor::bounding_box(route, self.analysis.bbox_buffer_deg) {
            Ok(bbox) => bbox,
            Err(e) => {
                warn!("Failed to build corridor bounding box: {e}");
                return Vec::new();
            }
        };

        let features = match self.features.features_in(&bbox).await {
            Ok(features) => features,
            Err(e) => {
                warn!("POI feature query failed, continuing without facilities: {e}");
                Vec::new()
            }
        };

        filter_facilities(&features, route, self.analysis.corridor_radius_km)
    }

    /// Resolve one sampled point to a named city with its weather
    async fn lookup_city(&self, point: Coordinate) -> SampledCity {
        let (name, weather) = futures::join!(
            self.places.place_name(point),
            self.weather.current_weather(point),
        );

        let name = match name {
            Ok(name) => name,
            Err(e) => {
                warn!("Place-name lookup failed for {}: {e}", point.format_lat_lon());
                UNKNOWN_LOCATION.to_string()
            }
        };

        let weather = match weather {
            Ok(observation) => Some(observation),
            Err(e) => {
                warn!("Weather lookup failed for {}: {e}", point.format_lat_lon());
                None
            }
        };

        SampledCity {
            name,
            weather,
            coordinate: point,
        }
    }

    async fn fetch_weather(&self, point: Coordinate) -> Option<WeatherObservation> {
        match self.weather.current_weather(point).await {
            Ok(observation) => Some(observation),
            Err(e) => {
                warn!("Weather lookup failed for {}: {e}", point.format_lat_lon());
                None
            }
        }
    }
}
