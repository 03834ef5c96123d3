//! Reverse-geocoding client
//!
//! Resolves a coordinate to a place name via a Mapbox-places-style endpoint.
//! A point with no resolvable place yields the "Unknown Location" sentinel
//! rather than an error, so a sampled city list can always be displayed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::{PlaceNameProvider, UNKNOWN_LOCATION};
use crate::config::RouteWatchConfig;
use crate::models::Coordinate;
use crate::{Result, RouteWatchError};

/// Client for reverse-geocoding lookups
pub struct GeocodingClient {
    client: Client,
    access_token: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    place_name: String,
}

impl GeocodingClient {
    /// Create a new client
    pub fn new(config: &RouteWatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.geocoding.timeout_seconds.into()))
            .user_agent("RouteWatch/0.1.0")
            .build()
            .map_err(|e| RouteWatchError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            access_token: config.geocoding.access_token.clone(),
            base_url: config.geocoding.base_url.clone(),
        })
    }
}

#[async_trait]
impl PlaceNameProvider for GeocodingClient {
    async fn place_name(&self, point: Coordinate) -> Result<String> {
        let access_token = self.access_token.as_deref().ok_or_else(|| {
            RouteWatchError::config("Geocoding access token is required for place lookups")
        })?;

        let url = format!(
            "{}/{},{}.json?access_token={}&types=place&limit=1",
            self.base_url,
            point.lon,
            point.lat,
            urlencoding::encode(access_token)
        );
        debug!("Reverse geocoding {}", point.format_lat_lon());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouteWatchError::lookup(format!("Geocoding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RouteWatchError::lookup(format!(
                "Geocoding API returned status {}",
                response.status()
            )));
        }

        let payload: GeocodingResponse = response.json().await.map_err(|e| {
            RouteWatchError::lookup(format!("Failed to parse geocoding response: {e}"))
        })?;

        let name = payload
            .features
            .into_iter()
            .next()
            .map(|feature| feature.place_name)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        Ok(name)
    }
}
