//! Travel modes and request statuses.

use std::fmt;

/// Transport mode understood by the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Driving,
    Bicycling,
    Walking,
    Transit,
}

impl TravelMode {
    /// The non-transit modes, in the order they are queried.
    pub const ROAD_MODES: [TravelMode; 3] =
        [TravelMode::Driving, TravelMode::Bicycling, TravelMode::Walking];

    /// Value of the `mode` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one directions request.
///
/// Most variants mirror the `status` field of the service response.
/// `NetworkError` and `MalformedResponse` are local: the first means the
/// request produced no payload, the second that the payload could not be
/// used (undecodable, or `OK` without a route).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxWaypointsExceeded,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    NetworkError,
    MalformedResponse,
    /// Any other status token returned by the service.
    Other(String),
}

impl RouteStatus {
    /// Interpret a service status token.
    pub fn from_service(token: &str) -> Self {
        match token {
            "OK" => RouteStatus::Ok,
            "NOT_FOUND" => RouteStatus::NotFound,
            "ZERO_RESULTS" => RouteStatus::ZeroResults,
            "MAX_WAYPOINTS_EXCEEDED" => RouteStatus::MaxWaypointsExceeded,
            "INVALID_REQUEST" => RouteStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => RouteStatus::OverQueryLimit,
            "REQUEST_DENIED" => RouteStatus::RequestDenied,
            "UNKNOWN_ERROR" => RouteStatus::UnknownError,
            other => RouteStatus::Other(other.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RouteStatus::Ok)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteStatus::Ok => "OK",
            RouteStatus::NotFound => "NOT_FOUND",
            RouteStatus::ZeroResults => "ZERO_RESULTS",
            RouteStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            RouteStatus::InvalidRequest => "INVALID_REQUEST",
            RouteStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            RouteStatus::RequestDenied => "REQUEST_DENIED",
            RouteStatus::UnknownError => "UNKNOWN_ERROR",
            RouteStatus::NetworkError => "NETWORK_ERROR",
            RouteStatus::MalformedResponse => "MALFORMED_RESPONSE",
            RouteStatus::Other(token) => token,
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_query_values() {
        assert_eq!(TravelMode::Driving.as_str(), "driving");
        assert_eq!(TravelMode::Transit.to_string(), "transit");
    }

    #[test]
    fn road_modes_exclude_transit() {
        assert!(!TravelMode::ROAD_MODES.contains(&TravelMode::Transit));
        assert_eq!(TravelMode::ROAD_MODES[0], TravelMode::Driving);
    }

    #[test]
    fn status_tokens_roundtrip() {
        for token in [
            "OK",
            "NOT_FOUND",
            "ZERO_RESULTS",
            "MAX_WAYPOINTS_EXCEEDED",
            "INVALID_REQUEST",
            "OVER_QUERY_LIMIT",
            "REQUEST_DENIED",
            "UNKNOWN_ERROR",
            "SOMETHING_NEW",
        ] {
            assert_eq!(RouteStatus::from_service(token).as_str(), token);
        }
    }

    #[test]
    fn unknown_token_kept() {
        assert_eq!(
            RouteStatus::from_service("SOMETHING_NEW"),
            RouteStatus::Other("SOMETHING_NEW".into())
        );
        assert!(!RouteStatus::from_service("SOMETHING_NEW").is_ok());
    }

    #[test]
    fn local_statuses_display() {
        assert_eq!(RouteStatus::NetworkError.to_string(), "NETWORK_ERROR");
        assert_eq!(RouteStatus::MalformedResponse.to_string(), "MALFORMED_RESPONSE");
    }
}
