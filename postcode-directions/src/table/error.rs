//! Table I/O error types.

/// Errors reading input tables or writing output tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Malformed CSV, or a CSV read/write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File could not be opened or flushed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required header is absent
    #[error("missing required column {0:?}")]
    MissingColumn(String),

    /// A numeric cell did not parse
    #[error("invalid number {value:?} in column {column:?} on row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}
