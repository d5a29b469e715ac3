//! Maps API request and response DTOs.
//!
//! Response types map directly to the directions and geocoding JSON
//! responses. Only the fields the pipeline reads are declared; everything
//! else is ignored. Fields the service omits on failure are `Option` or
//! default to empty.

use serde::Deserialize;

use crate::domain::TravelMode;

/// Parameters of one directions request.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    /// Intermediate stops, sent pipe-joined.
    pub waypoints: Vec<String>,
    /// Epoch seconds; only meaningful for transit.
    pub departure_time: Option<i64>,
}

impl DirectionsRequest {
    /// Create a request without waypoints or departure time.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        mode: TravelMode,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode,
            waypoints: Vec::new(),
            departure_time: None,
        }
    }

    /// Set the waypoints.
    pub fn with_waypoints(mut self, waypoints: &[String]) -> Self {
        self.waypoints = waypoints.to_vec();
        self
    }

    /// Set the departure time.
    pub fn with_departure_time(mut self, departure_time: Option<i64>) -> Self {
        self.departure_time = departure_time;
        self
    }

    /// Query parameters for this request, excluding the API key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("mode", self.mode.as_str().to_string()),
        ];
        if !self.waypoints.is_empty() {
            query.push(("waypoints", self.waypoints.join("|")));
        }
        if let Some(departure_time) = self.departure_time {
            query.push(("departure_time", departure_time.to_string()));
        }
        query
    }
}

/// Response from the directions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// "OK", "ZERO_RESULTS", "NOT_FOUND", ...
    pub status: String,

    /// Candidate routes; only the first is used.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Explanation accompanying a non-OK status.
    pub error_message: Option<String>,
}

/// One route: a leg per hop between origin, waypoints and destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A measured quantity in metres or seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: f64,
}

/// One movement within a leg.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub travel_mode: StepTravelMode,
    pub distance: Option<TextValue>,
    pub transit_details: Option<TransitDetails>,
}

impl Step {
    /// Step distance in metres, zero when the service omitted it.
    pub fn distance_m(&self) -> f64 {
        self.distance.as_ref().map_or(0.0, |d| d.value)
    }

    /// Short name of the line ridden in this step, if the service gave one.
    pub fn line_short_name(&self) -> Option<&str> {
        self.transit_details
            .as_ref()?
            .line
            .as_ref()?
            .short_name
            .as_deref()
    }
}

/// Travel mode of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepTravelMode {
    Walking,
    Transit,
    Driving,
    Bicycling,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitDetails {
    pub line: Option<TransitLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitLine {
    pub short_name: Option<String>,
}

/// Response from the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub types: Vec<String>,
    pub short_name: String,
}

impl AddressComponent {
    /// Whether this component is a postal code.
    pub fn is_postal_code(&self) -> bool {
        self.types.iter().any(|t| t == "postal_code")
    }
}
