//! Reading input tables.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::domain::PostcodePair;

use super::error::TableError;

/// Cell value meaning "no waypoint here".
pub const DEFAULT_NA_MARKER: &str = "99";

/// Column holding the row identifier.
pub const DEFAULT_ID_COLUMN: &str = "UniqueID";

const ORIGIN_COLUMN: &str = "OriginPostcode";
const DESTINATION_COLUMN: &str = "DestinationPostcode";
const WAYPOINT_MARKER: &str = "Waypoint";
const LATITUDE_COLUMN: &str = "Latitude";
const LONGITUDE_COLUMN: &str = "Longitude";

/// A row of the reverse geocoding input.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

/// Read postcode pairs from CSV.
///
/// Every column whose header contains `Waypoint` contributes a waypoint, in
/// header order. Cells equal to `na_marker` and empty cells are skipped.
pub fn read_pairs<R: io::Read>(
    reader: R,
    na_marker: &str,
) -> Result<Vec<PostcodePair>, TableError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();

    let id = column(&headers, DEFAULT_ID_COLUMN)?;
    let origin = column(&headers, ORIGIN_COLUMN)?;
    let destination = column(&headers, DESTINATION_COLUMN)?;
    let waypoint_columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| name.contains(WAYPOINT_MARKER))
        .map(|(index, _)| index)
        .collect();
    debug!(waypoint_columns = waypoint_columns.len(), "Input headers read");

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result?;
        let waypoints: Vec<&str> = waypoint_columns
            .iter()
            .map(|&index| cell(&record, index))
            .filter(|value| !value.is_empty() && *value != na_marker)
            .collect();

        pairs.push(
            PostcodePair::new(
                cell(&record, id),
                cell(&record, origin),
                cell(&record, destination),
            )
            .with_waypoints(waypoints),
        );
    }

    info!(rows = pairs.len(), "Read postcode pairs");
    Ok(pairs)
}

/// Read postcode pairs from a CSV file.
pub fn read_pairs_path(path: &Path, na_marker: &str) -> Result<Vec<PostcodePair>, TableError> {
    read_pairs(File::open(path)?, na_marker)
}

/// Read coordinates from CSV with `Latitude` and `Longitude` columns.
pub fn read_coordinates<R: io::Read>(
    reader: R,
    id_column: &str,
) -> Result<Vec<Coordinate>, TableError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();

    let id = column(&headers, id_column)?;
    let lat = column(&headers, LATITUDE_COLUMN)?;
    let lng = column(&headers, LONGITUDE_COLUMN)?;

    let mut coordinates = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Header is row 1
        let row = index + 2;
        coordinates.push(Coordinate {
            id: cell(&record, id).to_string(),
            lat: number(&record, lat, LATITUDE_COLUMN, row)?,
            lng: number(&record, lng, LONGITUDE_COLUMN, row)?,
        });
    }

    info!(rows = coordinates.len(), "Read coordinates");
    Ok(coordinates)
}

/// Read coordinates from a CSV file.
pub fn read_coordinates_path(path: &Path, id_column: &str) -> Result<Vec<Coordinate>, TableError> {
    read_coordinates(File::open(path)?, id_column)
}

fn csv_reader<R: io::Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn column(headers: &StringRecord, name: &str) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| TableError::MissingColumn(name.to_string()))
}

/// Cell at `index`, or empty for a short row.
fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn number(record: &StringRecord, index: usize, name: &str, row: usize) -> Result<f64, TableError> {
    let value = cell(record, index);
    value.parse().map_err(|_| TableError::InvalidNumber {
        row,
        column: name.to_string(),
        value: value.to_string(),
    })
}
