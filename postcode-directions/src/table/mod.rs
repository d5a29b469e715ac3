//! CSV input and output tables.
//!
//! Input tables are read whole before processing starts. Output rows are
//! written as each record is produced, so a partial table survives an
//! interrupted run.

mod error;
mod input;
mod output;

pub use error::TableError;
pub use input::{
    Coordinate, DEFAULT_ID_COLUMN, DEFAULT_NA_MARKER, read_coordinates, read_coordinates_path,
    read_pairs, read_pairs_path,
};
pub use output::{DEFAULT_NA_TOKEN, DIRECTIONS_HEADER, DirectionsWriter, GeocodeWriter};
