//! `RouteWatch` - Route risk analysis and emergency facility proximity
//!
//! This library provides the core engine for turning a driving route and a
//! set of weather observations and point-of-interest features into a
//! severity-classified risk report and a corridor-filtered set of emergency
//! facilities. Map rendering, UI, and transport policy belong to callers.

pub mod analysis;
pub mod config;
pub mod emergency;
pub mod error;
pub mod geocoding;
pub mod geodesy;
pub mod models;
pub mod polyline;
pub mod risk;
pub mod sampler;
pub mod weather_api;

// Re-export core types for public API
pub use analysis::{
    FeatureProvider, PlaceNameProvider, RouteAnalysis, RouteAnalysisService, WeatherProvider,
    UNKNOWN_LOCATION,
};
pub use config::{RouteWatchConfig, WeatherThresholds};
pub use emergency::{EmergencyFacility, FacilityCategory, OverpassClient, RawFeature};
pub use error::RouteWatchError;
pub use geocoding::GeocodingClient;
pub use models::{BoundingBox, Coordinate, RouteGeometry, RouteStep, RouteUpdate, WeatherObservation};
pub use risk::{RiskClassifier, RiskFactor, RiskFactorKind, RouteRiskReport, Severity};
pub use sampler::SampledCity;
pub use weather_api::WeatherApiClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RouteWatchError>;

/// Initialize tracing output from the logging configuration
///
/// Respects `RUST_LOG` when set; otherwise uses the configured level.
pub fn init_tracing(config: &config::LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    result.map_err(|e| RouteWatchError::config(format!("Failed to initialize tracing: {e}")))
}
