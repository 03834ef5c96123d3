//! Configuration management for the `RouteWatch` engine
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RouteWatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `RouteWatch` engine
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouteWatchConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherApiConfig,
    /// Reverse-geocoding API configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// POI feature query configuration
    #[serde(default)]
    pub features: FeatureQueryConfig,
    /// Route analysis constants
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Severe-weather thresholds
    #[serde(default)]
    pub thresholds: WeatherThresholds,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Weather API key
    pub api_key: Option<String>,
    /// Base URL for the current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Reverse-geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding access token
    pub access_token: Option<String>,
    /// Base URL for the places endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// POI feature query configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureQueryConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_features_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; corridor queries can be slow
    #[serde(default = "default_features_timeout")]
    pub timeout_seconds: u32,
}

/// Route analysis constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Corridor radius around the route in kilometers (authoritative filter)
    #[serde(default = "default_corridor_radius_km")]
    pub corridor_radius_km: f64,
    /// Degree padding for the bounding-box pre-filter (~2 km at 0.02)
    #[serde(default = "default_bbox_buffer_deg")]
    pub bbox_buffer_deg: f64,
    /// Step sampling stride for per-point lookups
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,
}

/// Severe-weather thresholds; one breach classifies a factor as high
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeatherThresholds {
    /// Wind speed in m/s
    #[serde(default = "default_wind_speed_ms")]
    pub wind_speed_ms: f64,
    /// Rain over the last hour in mm
    #[serde(default = "default_rain_mm")]
    pub rain_mm: f64,
    /// Snow over the last hour in mm
    #[serde(default = "default_snow_mm")]
    pub snow_mm: f64,
    /// Visibility floor in meters
    #[serde(default = "default_visibility_m")]
    pub visibility_m: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string()
}

fn default_features_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_features_timeout() -> u32 {
    60
}

fn default_corridor_radius_km() -> f64 {
    5.0
}

fn default_bbox_buffer_deg() -> f64 {
    0.02
}

fn default_sample_stride() -> usize {
    5
}

fn default_wind_speed_ms() -> f64 {
    20.0
}

fn default_rain_mm() -> f64 {
    50.0
}

fn default_snow_mm() -> f64 {
    10.0
}

fn default_visibility_m() -> f64 {
    1000.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for FeatureQueryConfig {
    fn default() -> Self {
        Self {
            base_url: default_features_base_url(),
            timeout_seconds: default_features_timeout(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            corridor_radius_km: default_corridor_radius_km(),
            bbox_buffer_deg: default_bbox_buffer_deg(),
            sample_stride: default_sample_stride(),
        }
    }
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            wind_speed_ms: default_wind_speed_ms(),
            rain_mm: default_rain_mm(),
            snow_mm: default_snow_mm(),
            visibility_m: default_visibility_m(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl RouteWatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with ROUTEWATCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("ROUTEWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: RouteWatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("routewatch").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.analysis.sample_stride == 0 {
            return Err(RouteWatchError::config("Sample stride must be at least 1").into());
        }

        if self.analysis.corridor_radius_km <= 0.0 || self.analysis.corridor_radius_km > 100.0 {
            return Err(RouteWatchError::config(
                "Corridor radius must be between 0 and 100 km",
            )
            .into());
        }

        if self.analysis.bbox_buffer_deg < 0.0 || self.analysis.bbox_buffer_deg > 1.0 {
            return Err(RouteWatchError::config(
                "Bounding box buffer must be between 0 and 1 degrees",
            )
            .into());
        }

        if self.thresholds.wind_speed_ms <= 0.0
            || self.thresholds.rain_mm <= 0.0
            || self.thresholds.snow_mm <= 0.0
            || self.thresholds.visibility_m <= 0.0
        {
            return Err(RouteWatchError::config("Weather thresholds must be positive").into());
        }

        if self.weather.timeout_seconds > 300
            || self.geocoding.timeout_seconds > 300
            || self.features.timeout_seconds > 300
        {
            return Err(RouteWatchError::config("API timeouts cannot exceed 300 seconds").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RouteWatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RouteWatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [
            &self.weather.base_url,
            &self.geocoding.base_url,
            &self.features.base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RouteWatchError::config(
                    "API base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        Ok(())
    }
}
