//! Seam between the pipeline and the maps service.

use crate::domain::RouteStatus;
use crate::maps::{
    DirectionsRequest, DirectionsResponse, GeocodeResponse, MapsClient, MapsError,
};

/// Trait for issuing maps requests.
///
/// This abstraction allows the pipeline to be tested with canned responses.
#[allow(async_fn_in_trait)]
pub trait MapsApi {
    /// Request directions for one origin/destination (with optional waypoints).
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, MapsError>;

    /// Reverse geocode a coordinate, restricted to postal code results.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodeResponse, MapsError>;
}

impl MapsApi for MapsClient {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, MapsError> {
        MapsClient::directions(self, request).await
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodeResponse, MapsError> {
        MapsClient::reverse_geocode(self, lat, lng).await
    }
}

/// Status recorded for a request that produced no usable payload.
pub(crate) fn status_for_error(err: &MapsError) -> RouteStatus {
    match err {
        MapsError::Json { .. } => RouteStatus::MalformedResponse,
        _ => RouteStatus::NetworkError,
    }
}
