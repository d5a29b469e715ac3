//! Postcode directions.
//!
//! A batch tool that answers: "how far apart are these two UK postcodes
//! by car, bike, on foot and by public transport?"
//!
//! Pairs are read from CSV, validated, queried against a maps web service
//! one request at a time, and written back out with one row per pair.

pub mod config;
pub mod directions;
pub mod domain;
pub mod maps;
pub mod table;
