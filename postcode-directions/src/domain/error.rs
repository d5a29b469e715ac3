//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Time of day not in HH:MM:SS form
    #[error("invalid time of day {0:?}: expected HH:MM:SS")]
    InvalidTimeOfDay(String),

    /// Weekday number outside 0 (Monday) to 6 (Sunday)
    #[error("invalid weekday {0}: expected 0 (Monday) to 6 (Sunday)")]
    InvalidWeekday(u32),

    /// Weekday name not recognized
    #[error("invalid weekday {0:?}")]
    UnknownWeekday(String),
}
