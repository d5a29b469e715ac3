//! Writing output tables.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::Writer;

use crate::domain::{DirectionRecord, ModeResult, TravelMode};

use super::error::TableError;

/// Rendered in place of a missing value.
pub const DEFAULT_NA_TOKEN: &str = "NA";

/// Columns of the directions table, in order.
pub const DIRECTIONS_HEADER: [&str; 22] = [
    "UniqueID",
    "Origin Postcode",
    "Destination Postcode",
    "Driving Distance (m)",
    "Driving Duration (sec)",
    "Driving request status",
    "Bicycling Distance (m)",
    "Bicycling Duration (sec)",
    "Bicycling request status",
    "Walking Distance (m)",
    "Walking Duration (sec)",
    "Walking request status",
    "Transit Request Status",
    "Transit Distance (m)",
    "Transit Duration (sec)",
    "Number of Transit Nodes",
    "Walking Distance to 1st stop (m)",
    "Walking Distance from last stop (m)",
    "Total Walking Distance (m)",
    "Postcode Status",
    "Transit Lines",
    "Transit Departure Time",
];

/// Writes one row per [`DirectionRecord`].
pub struct DirectionsWriter<W: io::Write> {
    writer: Writer<W>,
    na_token: String,
}

impl DirectionsWriter<File> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: &Path, na_token: impl Into<String>) -> Result<Self, TableError> {
        Self::new(File::create(path)?, na_token)
    }
}

impl<W: io::Write> DirectionsWriter<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W, na_token: impl Into<String>) -> Result<Self, TableError> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(DIRECTIONS_HEADER)?;
        Ok(Self {
            writer,
            na_token: na_token.into(),
        })
    }

    pub fn write(&mut self, record: &DirectionRecord) -> Result<(), TableError> {
        let row = self.row(record);
        self.writer.write_record(&row)?;
        Ok(())
    }

    /// Flush buffered rows to the underlying writer.
    pub fn flush(&mut self) -> Result<(), TableError> {
        self.writer.flush()?;
        Ok(())
    }

    fn row(&self, record: &DirectionRecord) -> Vec<String> {
        let na = || self.na_token.clone();
        let opt_num = |value: Option<f64>| value.map_or_else(na, format_number);

        let mut row = Vec::with_capacity(DIRECTIONS_HEADER.len());
        row.push(record.id.clone());
        row.push(record.origin.clone());
        row.push(record.destination.clone());

        let measurements = record.measurements();

        for mode in TravelMode::ROAD_MODES {
            match measurements.and_then(|m| m.mode(mode)) {
                Some(result) => row.extend(self.mode_cells(result)),
                None => row.extend([na(), na(), na()]),
            }
        }

        let transit = measurements.map(|m| &m.transit);
        let metrics = transit.and_then(|t| t.metrics);
        row.push(transit.map_or_else(na, |t| t.status.to_string()));
        row.push(opt_num(metrics.map(|m| m.distance_m)));
        row.push(opt_num(metrics.map(|m| m.duration_s)));
        row.push(metrics.map_or_else(na, |m| m.node_count.to_string()));
        row.push(opt_num(metrics.map(|m| m.walk_to_first_m)));
        row.push(opt_num(metrics.map(|m| m.walk_from_last_m)));
        row.push(opt_num(metrics.map(|m| m.total_walk_m)));

        row.push(record.postcode_status().to_string());
        row.push(transit.and_then(|t| t.lines_joined()).unwrap_or_else(na));
        row.push(
            transit
                .and_then(|t| t.departure_time)
                .map_or_else(na, |ts| ts.to_string()),
        );

        row
    }

    fn mode_cells(&self, result: &ModeResult) -> [String; 3] {
        [
            result
                .distance_m()
                .map_or_else(|| self.na_token.clone(), format_number),
            result
                .duration_s()
                .map_or_else(|| self.na_token.clone(), format_number),
            result.status().to_string(),
        ]
    }
}

/// Writes reverse geocoding results.
pub struct GeocodeWriter<W: io::Write> {
    writer: Writer<W>,
    na_token: String,
}

impl GeocodeWriter<File> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(
        path: &Path,
        id_column: &str,
        na_token: impl Into<String>,
    ) -> Result<Self, TableError> {
        Self::new(File::create(path)?, id_column, na_token)
    }
}

impl<W: io::Write> GeocodeWriter<W> {
    pub fn new(inner: W, id_column: &str, na_token: impl Into<String>) -> Result<Self, TableError> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record([id_column, "Latitude", "Longitude", "Postcodes"])?;
        Ok(Self {
            writer,
            na_token: na_token.into(),
        })
    }

    /// Write one row; postcodes are joined with `;`.
    pub fn write(
        &mut self,
        id: &str,
        lat: f64,
        lng: f64,
        postcodes: &[String],
    ) -> Result<(), TableError> {
        let joined = if postcodes.is_empty() {
            self.na_token.clone()
        } else {
            postcodes.join(";")
        };
        let lat = lat.to_string();
        let lng = lng.to_string();
        self.writer
            .write_record([id, lat.as_str(), lng.as_str(), joined.as_str()])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), TableError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Whole numbers are written without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
