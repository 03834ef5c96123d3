//! Weather API client
//!
//! Thin HTTP wrapper over an OpenWeatherMap-style current-weather endpoint,
//! deserializing responses into the engine's `WeatherObservation` model.
//! Retry policy deliberately lives with the caller, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::WeatherProvider;
use crate::config::RouteWatchConfig;
use crate::models::{Coordinate, WeatherObservation};
use crate::{Result, RouteWatchError};

/// Client for the current-weather endpoint
pub struct WeatherApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// Current-weather response payload
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainData,
    wind: WindData,
    rain: Option<Precipitation>,
    snow: Option<Precipitation>,
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<ConditionData>,
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindData {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Precipitation {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionData {
    main: String,
}

impl WeatherApiClient {
    /// Create a new client
    pub fn new(config: &RouteWatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_seconds.into()))
            .user_agent("RouteWatch/0.1.0")
            .build()
            .map_err(|e| RouteWatchError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.weather.api_key.clone(),
            base_url: config.weather.base_url.clone(),
        })
    }
}

impl From<CurrentWeatherResponse> for WeatherObservation {
    fn from(response: CurrentWeatherResponse) -> Self {
        WeatherObservation {
            temperature: response.main.temp,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            rain_1h: response.rain.and_then(|r| r.one_hour),
            snow_1h: response.snow.and_then(|s| s.one_hour),
            // The provider omits visibility above its 10 km reporting cap
            visibility: response.visibility.unwrap_or(10_000.0),
            condition: response
                .weather
                .first()
                .map(|w| w.main.clone())
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current_weather(&self, point: Coordinate) -> Result<WeatherObservation> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            RouteWatchError::config("Weather API key is required for weather lookups")
        })?;

        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, point.lat, point.lon, api_key
        );
        debug!("Requesting weather for {}", point.format_lat_lon());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouteWatchError::lookup(format!("Weather request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RouteWatchError::lookup(format!(
                "Weather API returned status {}",
                response.status()
            )));
        }

        let payload: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| RouteWatchError::lookup(format!("Failed to parse weather response: {e}")))?;

        Ok(payload.into())
    }
}
