//! Public transport journeys.
//!
//! Transit requests do not take waypoints, so a journey through waypoints
//! is requested hop by hop and the hops are folded into one result.

use tracing::{debug, warn};

use crate::domain::{RouteStatus, TransitMetrics, TransitResult, TravelMode, build_pairs};
use crate::maps::{DirectionsRequest, DirectionsResponse, Leg, StepTravelMode};

use super::api::{MapsApi, status_for_error};
use super::pacer::Pacer;

/// Fetches and decomposes a single point-to-point transit journey.
pub struct TransitJourneyFetcher<'a, A, P> {
    api: &'a A,
    pacer: &'a P,
}

impl<'a, A: MapsApi, P: Pacer> TransitJourneyFetcher<'a, A, P> {
    pub fn new(api: &'a A, pacer: &'a P) -> Self {
        Self { api, pacer }
    }

    /// Fetch one transit journey from `origin` to `destination`.
    ///
    /// Without a departure time the service plans for the current time.
    pub async fn fetch_single(
        &self,
        origin: &str,
        destination: &str,
        departure_time: Option<i64>,
    ) -> TransitResult {
        let request = DirectionsRequest::new(origin, destination, TravelMode::Transit)
            .with_departure_time(departure_time);

        let response = self.api.directions(&request).await;
        self.pacer.pause().await;

        let result = match response {
            Ok(response) => decompose_response(&response, departure_time),
            Err(e) => {
                warn!(origin, destination, error = %e, "Transit request failed");
                TransitResult::failed(status_for_error(&e), departure_time)
            }
        };

        debug!(
            origin,
            destination,
            status = %result.status,
            lines = ?result.lines,
            "Transit journey fetched"
        );

        result
    }
}

/// Decompose the first leg of the first route.
fn decompose_response(response: &DirectionsResponse, departure_time: Option<i64>) -> TransitResult {
    let status = RouteStatus::from_service(&response.status);
    if !status.is_ok() {
        return TransitResult::failed(status, departure_time);
    }

    let Some(leg) = response.routes.first().and_then(|r| r.legs.first()) else {
        warn!("OK transit response without a route leg");
        return TransitResult::failed(RouteStatus::MalformedResponse, departure_time);
    };

    match decompose_leg(leg) {
        Some((metrics, lines)) => TransitResult::ok(metrics, lines, departure_time),
        None => {
            warn!("Transit leg missing distance or duration");
            TransitResult::failed(RouteStatus::MalformedResponse, departure_time)
        }
    }
}

/// Split a leg into walking and riding and measure each.
///
/// Returns `None` if the leg has no distance or duration.
fn decompose_leg(leg: &Leg) -> Option<(TransitMetrics, Vec<String>)> {
    let distance_m = leg.distance.as_ref()?.value;
    let duration_s = leg.duration.as_ref()?.value;
    let steps = &leg.steps;

    let is_walk = |mode: StepTravelMode| mode == StepTravelMode::Walking;

    let walk_to_first_m = steps
        .first()
        .filter(|s| is_walk(s.travel_mode))
        .map_or(0.0, |s| s.distance_m());
    let walk_from_last_m = steps
        .last()
        .filter(|s| is_walk(s.travel_mode))
        .map_or(0.0, |s| s.distance_m());
    let total_walk_m: f64 = steps
        .iter()
        .filter(|s| is_walk(s.travel_mode))
        .map(|s| s.distance_m())
        .sum();

    let mut lines = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        if is_walk(step.travel_mode) {
            continue;
        }
        match step.line_short_name() {
            Some(name) => lines.push(name.to_string()),
            None => warn!(step = index, mode = ?step.travel_mode, "No line short name for step"),
        }
    }

    let metrics = TransitMetrics {
        distance_m,
        duration_s,
        node_count: steps.len() as u32,
        walk_to_first_m,
        walk_from_last_m,
        total_walk_m,
    };

    Some((metrics, lines))
}

/// Fetches transit journeys through waypoints by chaining single hops.
pub struct TransitAggregator<'a, A, P> {
    journeys: TransitJourneyFetcher<'a, A, P>,
}

impl<'a, A: MapsApi, P: Pacer> TransitAggregator<'a, A, P> {
    pub fn new(api: &'a A, pacer: &'a P) -> Self {
        Self {
            journeys: TransitJourneyFetcher::new(api, pacer),
        }
    }

    /// Fetch a transit journey from `origin` to `destination` via `waypoints`.
    ///
    /// Every hop is requested even after one fails. The combined status is
    /// that of the first failing hop, and failed hops add nothing to the
    /// totals.
    pub async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        departure_time: Option<i64>,
    ) -> TransitResult {
        if waypoints.is_empty() {
            return self
                .journeys
                .fetch_single(origin, destination, departure_time)
                .await;
        }

        let mut hops = Vec::with_capacity(waypoints.len() + 1);
        for (from, to) in build_pairs(origin, destination, waypoints) {
            hops.push(self.journeys.fetch_single(from, to, departure_time).await);
        }

        combine_hops(hops, departure_time)
    }
}

/// Marker placed before each hop's lines.
fn hop_marker(index: usize) -> String {
    format!("[{}]", index + 1)
}

/// Fold hop results into one journey.
///
/// Lines are grouped under a marker per hop. When no hop rode a named line
/// the result has no lines at all.
fn combine_hops(hops: Vec<TransitResult>, departure_time: Option<i64>) -> TransitResult {
    let mut status = RouteStatus::Ok;
    let mut metrics: Option<TransitMetrics> = None;
    let mut hop_lines = Vec::with_capacity(hops.len());

    for (index, hop) in hops.into_iter().enumerate() {
        if status.is_ok() && !hop.status.is_ok() {
            debug!(hop = index, status = %hop.status, "Transit hop failed");
            status = hop.status.clone();
        }

        if hop.status.is_ok() {
            if let Some(hop_metrics) = hop.metrics {
                *metrics.get_or_insert_with(TransitMetrics::default) += hop_metrics;
            }
            hop_lines.push(hop.lines);
        } else {
            hop_lines.push(Vec::new());
        }
    }

    let lines = if hop_lines.iter().all(Vec::is_empty) {
        Vec::new()
    } else {
        hop_lines
            .into_iter()
            .enumerate()
            .flat_map(|(index, names)| std::iter::once(hop_marker(index)).chain(names))
            .collect()
    };

    TransitResult {
        status,
        metrics,
        lines,
        departure_time,
    }
}
