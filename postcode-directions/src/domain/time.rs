//! Departure time handling for transit queries.
//!
//! Transit directions depend on the timetable, so every pair in a run is
//! queried with one shared departure timestamp: a fixed time of day on the
//! next occurrence of a chosen weekday. Wednesday is the default because it
//! rarely falls on a public holiday.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;

use super::error::DomainError;

/// Weekday used when none is configured.
pub const DEFAULT_DEPARTURE_WEEKDAY: Weekday = Weekday::Wed;

/// A wall-clock time of day, parsed from "HH:MM:SS".
///
/// # Examples
///
/// ```
/// use postcode_directions::domain::TimeOfDay;
///
/// assert!(TimeOfDay::parse("08:00:00").is_ok());
/// assert!(TimeOfDay::parse("23:59:59").is_ok());
///
/// assert!(TimeOfDay::parse("8:00:00").is_err());
/// assert!(TimeOfDay::parse("08:00").is_err());
/// assert!(TimeOfDay::parse("24:00:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse a time from "HH:MM:SS" format.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidTimeOfDay(s.to_string());

        // Must be exactly 8 characters: HH:MM:SS
        let bytes = s.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(invalid());
        }

        let hour = parse_two_digits(&bytes[0..2]).ok_or_else(invalid)?;
        let minute = parse_two_digits(&bytes[3..5]).ok_or_else(invalid)?;
        let second = parse_two_digits(&bytes[6..8]).ok_or_else(invalid)?;

        NaiveTime::from_hms_opt(hour, minute, second)
            .map(TimeOfDay)
            .ok_or_else(invalid)
    }

    /// Create from a `NaiveTime`.
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Returns the underlying time.
    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({})", self.0.format("%H:%M:%S"))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Convert a weekday number (0 = Monday ... 6 = Sunday) to a `Weekday`.
pub fn weekday_from_index(index: u32) -> Result<Weekday, DomainError> {
    if index > 6 {
        return Err(DomainError::InvalidWeekday(index));
    }
    Weekday::try_from(index as u8).map_err(|_| DomainError::InvalidWeekday(index))
}

/// Parse a weekday given either as a number (0 = Monday) or a name
/// ("wed", "Wednesday").
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    let s = s.trim();
    if let Ok(index) = s.parse::<u32>() {
        return weekday_from_index(index);
    }
    Weekday::from_str(s).map_err(|_| DomainError::UnknownWeekday(s.to_string()))
}

/// Compute the departure timestamp of the next `weekday` at `time_of_day` in `tz`.
///
/// The date always rolls forward: if today is already `weekday` the result
/// is a week from today, even when `time_of_day` has not yet passed.
///
/// The timestamp counts seconds from midnight on 1970-01-01 in `tz`
/// itself, not from the UTC epoch: the local wall-clock time is encoded as
/// if it were UTC. In British Summer Time, 08:00 therefore yields the same
/// value as 08:00 UTC. Every wall-clock time is representable, including
/// ones skipped by a clock change.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use postcode_directions::domain::{TimeOfDay, next_departure};
///
/// // Monday 2026-06-01 12:00 UTC
/// let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
/// let at_eight = TimeOfDay::parse("08:00:00").unwrap();
///
/// let ts = next_departure(at_eight, Weekday::Wed, now, chrono_tz::Europe::London);
/// let wall_clock = Utc.with_ymd_and_hms(2026, 6, 3, 8, 0, 0).unwrap();
/// assert_eq!(ts, wall_clock.timestamp());
/// ```
pub fn next_departure(time_of_day: TimeOfDay, weekday: Weekday, now: DateTime<Utc>, tz: Tz) -> i64 {
    let local_now = now.with_timezone(&tz);

    let mut days_ahead = i64::from(weekday.num_days_from_monday())
        - i64::from(local_now.weekday().num_days_from_monday());
    if days_ahead <= 0 {
        days_ahead += 7;
    }

    let date = local_now.date_naive() + Duration::days(days_ahead);
    wall_clock_seconds(date.and_time(time_of_day.time()))
}

/// Seconds from 1970-01-01 00:00 to `local`, both read on the same clock.
pub fn wall_clock_seconds(local: NaiveDateTime) -> i64 {
    local.and_utc().timestamp()
}

/// Render a departure timestamp as a wall-clock time in `tz`, for logging.
///
/// Expects the zone-anchored encoding produced by [`next_departure`].
pub fn format_timestamp(timestamp: i64, tz: Tz) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => format!("{} {}", dt.naive_utc().format("%Y-%m-%d %H:%M:%S"), tz.name()),
        None => timestamp.to_string(),
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The departure is after the current local time and on the requested weekday
        #[test]
        fn always_future_on_target_weekday(
            now_secs in 0i64..4_000_000_000,
            weekday in 0u32..7,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) {
            let now = DateTime::from_timestamp(now_secs, 0).unwrap();
            let target = weekday_from_index(weekday).unwrap();
            let time = TimeOfDay::new(NaiveTime::from_hms_opt(hour, minute, second).unwrap());

            for tz in [chrono_tz::UTC, chrono_tz::Europe::London, chrono_tz::America::New_York] {
                let local_now = wall_clock_seconds(now.with_timezone(&tz).naive_local());
                let ts = next_departure(time, target, now, tz);

                prop_assert!(ts > local_now);
                prop_assert!(ts - local_now <= 8 * 24 * 3600);
                let local = DateTime::from_timestamp(ts, 0).unwrap().naive_utc();
                prop_assert_eq!(local.weekday(), target);
            }
        }
    }
}
