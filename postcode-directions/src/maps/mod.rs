//! Maps web service client.
//!
//! This module provides an HTTP client for the directions and geocoding
//! endpoints of the external maps service.
//!
//! Key characteristics of the service:
//! - HTTP 200 is returned for most failures; the JSON `status` field says
//!   whether route data is present ("OK", "ZERO_RESULTS", ...)
//! - Distances are in metres and durations in seconds
//! - A request with waypoints returns one leg per hop in a single route

mod client;
mod error;
mod types;

pub use client::{MapsClient, MapsConfig};
pub use error::MapsError;
pub use types::{
    AddressComponent, DirectionsRequest, DirectionsResponse, GeocodeResponse, GeocodeResult, Leg,
    Route, Step, StepTravelMode, TextValue, TransitDetails, TransitLine,
};
