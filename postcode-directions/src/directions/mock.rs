//! Canned maps responses for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::domain::TravelMode;
use crate::maps::{DirectionsRequest, DirectionsResponse, GeocodeResponse, MapsError};

use super::api::MapsApi;
use super::pacer::Pacer;

/// What the mock answers for one request.
#[derive(Debug, Clone)]
pub enum Canned {
    /// A JSON body returned with HTTP 200.
    Body(Value),
    /// A non-2xx response.
    Unavailable,
}

type DirectionsKey = (TravelMode, String, String);

/// Mock maps service that answers from canned responses.
///
/// Directions not explicitly registered answer `NOT_FOUND`.
#[derive(Default)]
pub struct MockMaps {
    directions: HashMap<DirectionsKey, Canned>,
    geocode: Option<Canned>,
    requests: Mutex<Vec<DirectionsRequest>>,
    geocode_calls: Mutex<usize>,
}

impl MockMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_directions(
        &mut self,
        mode: TravelMode,
        origin: &str,
        destination: &str,
        canned: Canned,
    ) -> &mut Self {
        self.directions
            .insert((mode, origin.to_string(), destination.to_string()), canned);
        self
    }

    pub fn on_geocode(&mut self, canned: Canned) -> &mut Self {
        self.geocode = Some(canned);
        self
    }

    /// Every directions request received, in order.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Total number of requests of any kind.
    pub fn api_call_count(&self) -> usize {
        self.requests.lock().unwrap().len() + *self.geocode_calls.lock().unwrap()
    }
}

impl MapsApi for MockMaps {
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, MapsError> {
        self.requests.lock().unwrap().push(request.clone());
        let key = (
            request.mode,
            request.origin.clone(),
            request.destination.clone(),
        );
        let canned = self
            .directions
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Canned::Body(status_only("NOT_FOUND")));
        answer(canned)
    }

    async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<GeocodeResponse, MapsError> {
        *self.geocode_calls.lock().unwrap() += 1;
        let canned = self
            .geocode
            .clone()
            .unwrap_or_else(|| Canned::Body(json!({"status": "ZERO_RESULTS", "results": []})));
        answer(canned)
    }
}

fn answer<T: serde::de::DeserializeOwned>(canned: Canned) -> Result<T, MapsError> {
    match canned {
        Canned::Body(value) => {
            let body = value.to_string();
            serde_json::from_str(&body).map_err(|e| MapsError::json(e, &body))
        }
        Canned::Unavailable => Err(MapsError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        }),
    }
}

/// Pacer that counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingPacer {
    pauses: Mutex<usize>,
}

impl CountingPacer {
    pub fn pauses(&self) -> usize {
        *self.pauses.lock().unwrap()
    }
}

impl Pacer for CountingPacer {
    async fn pause(&self) {
        *self.pauses.lock().unwrap() += 1;
    }
}

/// A body with only a status.
pub fn status_only(status: &str) -> Value {
    json!({"status": status, "routes": []})
}

/// An OK route with one leg per `(distance, duration)`.
pub fn route_body(legs: &[(f64, f64)]) -> Value {
    let legs: Vec<Value> = legs
        .iter()
        .map(|(distance, duration)| {
            json!({
                "distance": {"value": distance},
                "duration": {"value": duration},
                "steps": []
            })
        })
        .collect();
    json!({"status": "OK", "routes": [{"legs": legs}]})
}

/// One step of a canned transit leg.
pub enum CannedStep<'a> {
    Walk(f64),
    Ride(f64, Option<&'a str>),
}

/// An OK transit route with a single leg made of `steps`.
pub fn transit_body(distance: f64, duration: f64, steps: &[CannedStep<'_>]) -> Value {
    let steps: Vec<Value> = steps
        .iter()
        .map(|step| match step {
            CannedStep::Walk(d) => json!({"travel_mode": "WALKING", "distance": {"value": d}}),
            CannedStep::Ride(d, Some(line)) => json!({
                "travel_mode": "TRANSIT",
                "distance": {"value": d},
                "transit_details": {"line": {"short_name": line}}
            }),
            CannedStep::Ride(d, None) => json!({
                "travel_mode": "TRANSIT",
                "distance": {"value": d},
                "transit_details": {"line": {"name": "Unnamed line"}}
            }),
        })
        .collect();
    json!({
        "status": "OK",
        "routes": [{"legs": [{
            "distance": {"value": distance},
            "duration": {"value": duration},
            "steps": steps
        }]}]
    })
}
