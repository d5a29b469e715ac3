//! Maps HTTP client.
//!
//! Provides async methods for the directions and reverse geocoding
//! endpoints. The API key is sent as the `key` query parameter.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::MapsError;
use super::types::{DirectionsRequest, DirectionsResponse, GeocodeResponse};

/// Default base URL for the maps API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Maps API client.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Request directions.
    ///
    /// A response whose `status` is not `OK` is returned as `Ok`; only
    /// requests that produced no decodable payload are errors.
    pub async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, MapsError> {
        let query = request.query_pairs();
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            mode = %request.mode,
            waypoints = request.waypoints.len(),
            "Requesting directions"
        );
        self.get_json("directions/json", query).await
    }

    /// Look up postal codes near a coordinate.
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodeResponse, MapsError> {
        let query = vec![
            ("latlng", format!("{lat},{lng}")),
            ("result_type", "postal_code".to_string()),
        ];
        debug!(lat, lng, "Requesting reverse geocode");
        self.get_json("geocode/json", query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&'static str, String)>,
    ) -> Result<T, MapsError> {
        let url = format!("{}/{}", self.base_url, path);
        query.push(("key", self.api_key.clone()));

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapsError::json(e, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MapsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = MapsConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation_trims_trailing_slash() {
        let config = MapsConfig::new("test-key").with_base_url("http://localhost:8080/");
        let client = MapsClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let config = MapsConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = MapsClient::new(config).unwrap();
        let request =
            DirectionsRequest::new("B1 1AA", "M1 1AE", crate::domain::TravelMode::Driving);

        let result = client.directions(&request).await;
        assert!(matches!(result, Err(MapsError::Http(_))));
    }
}
