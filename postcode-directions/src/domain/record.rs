//! Input pairs and the measurement records built from them.

use std::fmt;
use std::ops::{Add, AddAssign};

use super::mode::{RouteStatus, TravelMode};

/// One input row: an origin/destination pair with optional waypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcodePair {
    /// Caller-supplied identifier, copied to the output row.
    pub id: String,
    pub origin: String,
    pub destination: String,
    /// Intermediate stops, visited in this order.
    pub waypoints: Vec<String>,
}

impl PostcodePair {
    /// Create a pair without waypoints.
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            waypoints: Vec::new(),
        }
    }

    /// Set the waypoints.
    pub fn with_waypoints<I, S>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.waypoints = waypoints.into_iter().map(Into::into).collect();
        self
    }
}

/// Total distance and duration of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteMeasure {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RouteMeasure {
    pub fn new(distance_m: f64, duration_s: f64) -> Self {
        Self {
            distance_m,
            duration_s,
        }
    }
}

impl Add for RouteMeasure {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            distance_m: self.distance_m + rhs.distance_m,
            duration_s: self.duration_s + rhs.duration_s,
        }
    }
}

/// Result of a driving, bicycling or walking request.
///
/// The measurement is present exactly when the status is `OK`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeResult {
    mode: TravelMode,
    status: RouteStatus,
    measure: Option<RouteMeasure>,
}

impl ModeResult {
    /// A successful result.
    pub fn ok(mode: TravelMode, measure: RouteMeasure) -> Self {
        Self {
            mode,
            status: RouteStatus::Ok,
            measure: Some(measure),
        }
    }

    /// A failed result carrying no measurement.
    ///
    /// Passing `RouteStatus::Ok` here is a caller bug; the status is
    /// recorded as `MalformedResponse` instead so the invariant holds.
    pub fn failed(mode: TravelMode, status: RouteStatus) -> Self {
        let status = if status.is_ok() {
            RouteStatus::MalformedResponse
        } else {
            status
        };
        Self {
            mode,
            status,
            measure: None,
        }
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn status(&self) -> &RouteStatus {
        &self.status
    }

    pub fn measure(&self) -> Option<RouteMeasure> {
        self.measure
    }

    pub fn distance_m(&self) -> Option<f64> {
        self.measure.map(|m| m.distance_m)
    }

    pub fn duration_s(&self) -> Option<f64> {
        self.measure.map(|m| m.duration_s)
    }
}

/// Numeric metrics of a transit journey.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitMetrics {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Number of steps (walks and rides) in the journey.
    pub node_count: u32,
    pub walk_to_first_m: f64,
    pub walk_from_last_m: f64,
    /// All walking, including walks between rides.
    pub total_walk_m: f64,
}

impl Add for TransitMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            distance_m: self.distance_m + rhs.distance_m,
            duration_s: self.duration_s + rhs.duration_s,
            node_count: self.node_count + rhs.node_count,
            walk_to_first_m: self.walk_to_first_m + rhs.walk_to_first_m,
            walk_from_last_m: self.walk_from_last_m + rhs.walk_from_last_m,
            total_walk_m: self.total_walk_m + rhs.total_walk_m,
        }
    }
}

impl AddAssign for TransitMetrics {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Result of a transit request, or of several chained ones.
///
/// For a single request `metrics` is present exactly when `status` is OK.
/// A chained result may carry the metrics of its successful parts alongside
/// the status of the first part that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitResult {
    pub status: RouteStatus,
    pub metrics: Option<TransitMetrics>,
    /// Short names of the transit lines ridden, in order.
    pub lines: Vec<String>,
    /// Departure time sent with the request.
    pub departure_time: Option<i64>,
}

impl TransitResult {
    /// A successful result.
    pub fn ok(metrics: TransitMetrics, lines: Vec<String>, departure_time: Option<i64>) -> Self {
        Self {
            status: RouteStatus::Ok,
            metrics: Some(metrics),
            lines,
            departure_time,
        }
    }

    /// A failed result carrying no metrics.
    pub fn failed(status: RouteStatus, departure_time: Option<i64>) -> Self {
        Self {
            status,
            metrics: None,
            lines: Vec::new(),
            departure_time,
        }
    }

    /// Lines joined with spaces, or `None` when no line was recorded.
    pub fn lines_joined(&self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join(" "))
        }
    }
}

/// Outcome of validating the postcodes of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostcodeStatus {
    Ok,
    OriginInvalid,
    DestinationInvalid,
    WaypointInvalid,
    BothInvalid,
}

impl PostcodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostcodeStatus::Ok => "OK",
            PostcodeStatus::OriginInvalid => "ORIGIN_INVALID",
            PostcodeStatus::DestinationInvalid => "DESTINATION_INVALID",
            PostcodeStatus::WaypointInvalid => "WAYPOINT_INVALID",
            PostcodeStatus::BothInvalid => "BOTH_INVALID",
        }
    }
}

impl fmt::Display for PostcodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-mode results for a pair whose postcodes all validated.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionMeasurements {
    pub driving: ModeResult,
    pub bicycling: ModeResult,
    pub walking: ModeResult,
    pub transit: TransitResult,
}

impl DirectionMeasurements {
    /// Look up the result for a non-transit mode.
    pub fn mode(&self, mode: TravelMode) -> Option<&ModeResult> {
        match mode {
            TravelMode::Driving => Some(&self.driving),
            TravelMode::Bicycling => Some(&self.bicycling),
            TravelMode::Walking => Some(&self.walking),
            TravelMode::Transit => None,
        }
    }
}

/// The merged output for one input pair.
///
/// Measurements are present exactly when the postcode status is OK.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionRecord {
    pub id: String,
    pub origin: String,
    pub destination: String,
    postcode_status: PostcodeStatus,
    measurements: Option<DirectionMeasurements>,
}

impl DirectionRecord {
    /// Record for a pair that was fully queried.
    pub fn measured(pair: &PostcodePair, measurements: DirectionMeasurements) -> Self {
        Self {
            id: pair.id.clone(),
            origin: pair.origin.clone(),
            destination: pair.destination.clone(),
            postcode_status: PostcodeStatus::Ok,
            measurements: Some(measurements),
        }
    }

    /// Record for a pair rejected before any request was made.
    pub fn rejected(pair: &PostcodePair, status: PostcodeStatus) -> Self {
        debug_assert!(status != PostcodeStatus::Ok);
        Self {
            id: pair.id.clone(),
            origin: pair.origin.clone(),
            destination: pair.destination.clone(),
            postcode_status: status,
            measurements: None,
        }
    }

    pub fn postcode_status(&self) -> PostcodeStatus {
        self.postcode_status
    }

    pub fn measurements(&self) -> Option<&DirectionMeasurements> {
        self.measurements.as_ref()
    }
}
