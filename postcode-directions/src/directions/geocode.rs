//! Reverse geocoding of coordinates to full postcodes.

use tracing::{debug, warn};

use crate::domain::is_valid_postcode;
use crate::maps::GeocodeResponse;

use super::api::MapsApi;
use super::pacer::Pacer;

/// Entry returned in place of postcodes when the request itself failed.
pub const REQUEST_ERROR: &str = "Request Error";

/// Looks up the full postcodes around a coordinate.
pub struct ReverseGeocoder<'a, A, P> {
    api: &'a A,
    pacer: &'a P,
}

impl<'a, A: MapsApi, P: Pacer> ReverseGeocoder<'a, A, P> {
    pub fn new(api: &'a A, pacer: &'a P) -> Self {
        Self { api, pacer }
    }

    /// Postcodes of every postal-code result near `(lat, lng)`.
    ///
    /// Outward codes and other partial forms are dropped. A failed request
    /// yields the single entry [`REQUEST_ERROR`].
    pub async fn reverse(&self, lat: f64, lng: f64) -> Vec<String> {
        let response = self.api.reverse_geocode(lat, lng).await;
        self.pacer.pause().await;

        match response {
            Ok(response) => {
                let postcodes = extract_postcodes(&response);
                debug!(
                    lat,
                    lng,
                    status = %response.status,
                    found = postcodes.len(),
                    "Reverse geocoded"
                );
                postcodes
            }
            Err(e) => {
                warn!(lat, lng, error = %e, "Reverse geocode request failed");
                vec![REQUEST_ERROR.to_string()]
            }
        }
    }
}

/// Collect the valid postal-code short names from every result.
pub fn extract_postcodes(response: &GeocodeResponse) -> Vec<String> {
    response
        .results
        .iter()
        .flat_map(|result| &result.address_components)
        .filter(|component| component.is_postal_code())
        .map(|component| component.short_name.as_str())
        .filter(|name| is_valid_postcode(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::mock::{Canned, CountingPacer, MockMaps};
    use serde_json::json;

    fn postal(short_name: &str) -> serde_json::Value {
        json!({"types": ["postal_code"], "short_name": short_name})
    }

    #[tokio::test]
    async fn partial_postcodes_dropped() {
        let mut maps = MockMaps::new();
        maps.on_geocode(Canned::Body(json!({
            "status": "OK",
            "results": [
                {"address_components": [postal("SW1A 1AA")]},
                {"address_components": [postal("SW1")]}
            ]
        })));
        let pacer = CountingPacer::default();
        let geocoder = ReverseGeocoder::new(&maps, &pacer);

        let postcodes = geocoder.reverse(51.501, -0.1416).await;

        assert_eq!(postcodes, vec!["SW1A 1AA"]);
        assert_eq!(pacer.pauses(), 1);
    }

    #[tokio::test]
    async fn non_postal_components_ignored() {
        let mut maps = MockMaps::new();
        maps.on_geocode(Canned::Body(json!({
            "status": "OK",
            "results": [{"address_components": [
                {"types": ["locality", "political"], "short_name": "B1 1AA"},
                postal("M1 1AE")
            ]}]
        })));
        let pacer = CountingPacer::default();
        let geocoder = ReverseGeocoder::new(&maps, &pacer);

        assert_eq!(geocoder.reverse(53.47, -2.23).await, vec!["M1 1AE"]);
    }

    #[tokio::test]
    async fn no_results_is_empty() {
        let maps = MockMaps::new();
        let pacer = CountingPacer::default();
        let geocoder = ReverseGeocoder::new(&maps, &pacer);

        assert!(geocoder.reverse(0.0, 0.0).await.is_empty());
        assert_eq!(maps.api_call_count(), 1);
    }

    #[tokio::test]
    async fn failed_request_yields_sentinel() {
        let mut maps = MockMaps::new();
        maps.on_geocode(Canned::Unavailable);
        let pacer = CountingPacer::default();
        let geocoder = ReverseGeocoder::new(&maps, &pacer);

        assert_eq!(geocoder.reverse(51.5, -0.12).await, vec![REQUEST_ERROR]);
        assert_eq!(pacer.pauses(), 1);
    }
}
