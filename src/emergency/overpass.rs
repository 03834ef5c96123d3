//! Overpass API client for emergency-related POI features

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::RawFeature;
use crate::analysis::FeatureProvider;
use crate::config::RouteWatchConfig;
use crate::models::{BoundingBox, Coordinate};
use crate::{Result, RouteWatchError};

/// Client for Overpass POI queries
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OsmElement>,
}

#[derive(Debug, Deserialize)]
struct OsmElement {
    #[serde(rename = "type")]
    elem_type: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OsmCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OsmCenter {
    lat: f64,
    lon: f64,
}

impl OverpassClient {
    /// Create a new client
    pub fn new(config: &RouteWatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.features.timeout_seconds.into()))
            .user_agent("RouteWatch/0.1.0")
            .build()
            .map_err(|e| RouteWatchError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.features.base_url.clone(),
        })
    }

    /// Build the Overpass QL query for emergency features within a box
    ///
    /// Hospitals/clinics, police and fire stations by amenity tag, plus
    /// anything carrying an explicit emergency=yes tag, across nodes, ways
    /// and relations. `out center` gives ways and relations a representative
    /// coordinate.
    fn build_query(bbox: &BoundingBox) -> String {
        let area = bbox.overpass_filter();
        let mut query = String::from("[out:json];\n(\n");
        for elem in ["node", "way", "relation"] {
            query.push_str(&format!("  {elem}[\"amenity\"~\"hospital|clinic\"]{area};\n"));
            query.push_str(&format!(
                "  {elem}[\"amenity\"~\"police|fire_station\"]{area};\n"
            ));
            query.push_str(&format!("  {elem}[\"emergency\"~\"yes\"]{area};\n"));
        }
        query.push_str(");\nout center;\n");
        query
    }
}

impl OsmElement {
    fn into_raw_feature(self) -> RawFeature {
        let coordinate = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lon, lat)),
            _ => self
                .center
                .map(|center| Coordinate::new(center.lon, center.lat)),
        };

        RawFeature {
            id: format!("{}/{}", self.elem_type, self.id),
            coordinate,
            tags: self.tags,
        }
    }
}

#[async_trait]
impl FeatureProvider for OverpassClient {
    async fn features_in(&self, bbox: &BoundingBox) -> Result<Vec<RawFeature>> {
        let query = Self::build_query(bbox);
        let url = format!("{}?data={}", self.base_url, urlencoding::encode(&query));
        debug!("Overpass query:\n{query}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouteWatchError::lookup(format!("Overpass request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RouteWatchError::lookup(format!(
                "Overpass API returned status {}",
                response.status()
            )));
        }

        let payload: OverpassResponse = response.json().await.map_err(|e| {
            RouteWatchError::lookup(format!("Failed to parse Overpass response: {e}"))
        })?;

        info!("Overpass returned {} elements", payload.elements.len());

        Ok(payload
            .elements
            .into_iter()
            .map(OsmElement::into_raw_feature)
            .collect())
    }
}
