//! Distance and duration for driving, bicycling and walking.

use tracing::{debug, warn};

use crate::domain::{ModeResult, RouteMeasure, RouteStatus, TravelMode};
use crate::maps::{DirectionsRequest, DirectionsResponse};

use super::api::{MapsApi, status_for_error};
use super::pacer::Pacer;

/// Fetches the total distance and duration of a route for one mode.
///
/// Waypoints are sent in a single request; the service answers with one
/// leg per hop and the legs are summed.
pub struct ModeDistanceFetcher<'a, A, P> {
    api: &'a A,
    pacer: &'a P,
}

impl<'a, A: MapsApi, P: Pacer> ModeDistanceFetcher<'a, A, P> {
    pub fn new(api: &'a A, pacer: &'a P) -> Self {
        Self { api, pacer }
    }

    /// Fetch distance and duration for `mode`.
    ///
    /// Never fails: a request that produced no payload is recorded as
    /// `NETWORK_ERROR`, and a non-OK service status is passed through.
    pub async fn fetch(
        &self,
        mode: TravelMode,
        origin: &str,
        destination: &str,
        waypoints: &[String],
    ) -> ModeResult {
        let request = DirectionsRequest::new(origin, destination, mode).with_waypoints(waypoints);

        let response = self.api.directions(&request).await;
        self.pacer.pause().await;

        let result = match response {
            Ok(response) => summarize_route(mode, &response),
            Err(e) => {
                warn!(%mode, origin, destination, error = %e, "Directions request failed");
                ModeResult::failed(mode, status_for_error(&e))
            }
        };

        debug!(
            %mode,
            status = %result.status(),
            distance_m = ?result.distance_m(),
            duration_s = ?result.duration_s(),
            "Mode fetched"
        );

        result
    }
}

/// Reduce the first route of a response to its total distance and duration.
fn summarize_route(mode: TravelMode, response: &DirectionsResponse) -> ModeResult {
    let status = RouteStatus::from_service(&response.status);
    if !status.is_ok() {
        if let Some(message) = &response.error_message {
            debug!(%mode, %status, error_message = %message, "Service returned no route");
        }
        return ModeResult::failed(mode, status);
    }

    let Some(route) = response.routes.first().filter(|r| !r.legs.is_empty()) else {
        warn!(%mode, "OK response without a route leg");
        return ModeResult::failed(mode, RouteStatus::MalformedResponse);
    };

    let mut total = RouteMeasure::default();
    for leg in &route.legs {
        match (&leg.distance, &leg.duration) {
            (Some(distance), Some(duration)) => {
                total = total + RouteMeasure::new(distance.value, duration.value);
            }
            _ => {
                warn!(%mode, "Route leg missing distance or duration");
                return ModeResult::failed(mode, RouteStatus::MalformedResponse);
            }
        }
    }

    ModeResult::ok(mode, total)
}
