//! Domain types for postcode directions.
//!
//! This module contains the validated input types, the departure time
//! calculation, and the typed records that results are folded into.
//! Types enforce their invariants at construction time.

mod error;
mod mode;
mod postcode;
mod record;
mod time;
mod waypoint;

pub use error::DomainError;
pub use mode::{RouteStatus, TravelMode};
pub use postcode::is_valid_postcode;
pub use record::{
    DirectionMeasurements, DirectionRecord, ModeResult, PostcodePair, PostcodeStatus,
    RouteMeasure, TransitMetrics, TransitResult,
};
pub use time::{
    DEFAULT_DEPARTURE_WEEKDAY, TimeOfDay, format_timestamp, next_departure, parse_weekday,
    wall_clock_seconds, weekday_from_index,
};
pub use waypoint::build_pairs;
