//! The directions pipeline.
//!
//! Given a pair of postcodes, this module validates them, fetches distance
//! and duration for each travel mode, and folds the transit journey into a
//! single record. It also reverse geocodes coordinates to postcodes.
//!
//! All requests go through [`MapsApi`] and are paced by a [`Pacer`], one
//! at a time.

mod aggregate;
mod api;
mod geocode;
#[cfg(test)]
mod mock;
mod mode;
mod pacer;
mod transit;

pub use aggregate::{DirectionAggregator, classify_postcodes};
pub use api::MapsApi;
pub use geocode::{REQUEST_ERROR, ReverseGeocoder, extract_postcodes};
pub use mode::ModeDistanceFetcher;
pub use pacer::{DEFAULT_REQUEST_DELAY, FixedIntervalPacer, MIN_REQUEST_DELAY, Pacer};
pub use transit::{TransitAggregator, TransitJourneyFetcher};
