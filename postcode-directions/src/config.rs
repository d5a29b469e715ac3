//! Run configuration.
//!
//! Settings are read once from an optional TOML file, overridden by
//! command-line flags, and passed down explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::warn;

use crate::directions::{DEFAULT_REQUEST_DELAY, MIN_REQUEST_DELAY};
use crate::domain::{
    DEFAULT_DEPARTURE_WEEKDAY, DomainError, TimeOfDay, next_departure, parse_weekday,
    wall_clock_seconds,
};
use crate::maps::MapsConfig;
use crate::table::{DEFAULT_ID_COLUMN, DEFAULT_NA_MARKER, DEFAULT_NA_TOKEN};

/// Errors building the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for these settings
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No API key in the file, flags or environment
    #[error("no API key configured (set MAPS_API_KEY or [api] key)")]
    MissingApiKey,

    #[error("unknown timezone {0:?}")]
    InvalidTimezone(String),

    /// Departure override is neither an epoch nor "now"
    #[error("invalid departure epoch {0:?}: expected seconds or \"now\"")]
    InvalidEpoch(String),

    #[error(transparent)]
    Departure(#[from] DomainError),
}

/// All settings for a run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub files: FileSettings,
    pub departure: DepartureSettings,
    pub output: OutputSettings,
    pub requests: RequestSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub key: Option<String>,
    /// Overrides the production endpoint
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            key: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Waypoint cells with this value are ignored.
    pub na_marker: String,
    /// Identifier column of the coordinates table.
    pub id_column: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            na_marker: DEFAULT_NA_MARKER.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DepartureSettings {
    /// Local time of day, `HH:MM:SS`.
    pub time_of_day: String,
    /// Weekday name or number (0 = Monday).
    pub weekday: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Raw epoch seconds or `now`; replaces the weekday calculation.
    pub epoch: Option<String>,
}

impl Default for DepartureSettings {
    fn default() -> Self {
        Self {
            time_of_day: "08:00:00".to_string(),
            weekday: DEFAULT_DEPARTURE_WEEKDAY.to_string(),
            timezone: "Europe/London".to_string(),
            epoch: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Written in place of missing values.
    pub na_token: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            na_token: DEFAULT_NA_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Pause after every request (milliseconds). Values below the
    /// minimum are raised to it.
    pub delay_ms: u64,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_REQUEST_DELAY.as_millis() as u64,
        }
    }
}

/// How the transit departure time is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepartureSetting {
    /// Next `weekday` at `time_of_day` in `tz`.
    Scheduled {
        time_of_day: TimeOfDay,
        weekday: Weekday,
        tz: Tz,
    },
    /// Fixed epoch seconds, sent as given.
    Epoch(i64),
    /// The moment the run starts, as a wall-clock time in `tz`.
    Now { tz: Tz },
}

impl DepartureSetting {
    /// Resolve to a departure timestamp relative to `now`.
    ///
    /// Scheduled and `Now` departures use the zone-anchored encoding of
    /// [`next_departure`].
    pub fn resolve(&self, now: DateTime<Utc>) -> i64 {
        match *self {
            DepartureSetting::Scheduled {
                time_of_day,
                weekday,
                tz,
            } => next_departure(time_of_day, weekday, now, tz),
            DepartureSetting::Epoch(ts) => ts,
            DepartureSetting::Now { tz } => {
                wall_clock_seconds(now.with_timezone(&tz).naive_local())
            }
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Maps client configuration. Fails without an API key.
    pub fn maps_config(&self) -> Result<MapsConfig, ConfigError> {
        let key = self
            .api
            .key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = MapsConfig::new(key).with_timeout(self.api.timeout_secs);
        if let Some(url) = &self.api.base_url {
            config = config.with_base_url(url.clone());
        }
        Ok(config)
    }

    /// Pause after each request, never shorter than [`MIN_REQUEST_DELAY`].
    pub fn request_delay(&self) -> Duration {
        let configured = Duration::from_millis(self.requests.delay_ms);
        if configured < MIN_REQUEST_DELAY {
            warn!(
                configured_ms = self.requests.delay_ms,
                minimum_ms = MIN_REQUEST_DELAY.as_millis() as u64,
                "Request delay below minimum, using minimum"
            );
            return MIN_REQUEST_DELAY;
        }
        configured
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.departure
            .timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.departure.timezone.clone()))
    }

    /// Validate the departure settings.
    pub fn departure(&self) -> Result<DepartureSetting, ConfigError> {
        if let Some(epoch) = &self.departure.epoch {
            let epoch = epoch.trim();
            if epoch.eq_ignore_ascii_case("now") {
                return Ok(DepartureSetting::Now {
                    tz: self.timezone()?,
                });
            }
            return epoch
                .parse()
                .map(DepartureSetting::Epoch)
                .map_err(|_| ConfigError::InvalidEpoch(epoch.to_string()));
        }

        Ok(DepartureSetting::Scheduled {
            time_of_day: TimeOfDay::parse(&self.departure.time_of_day)?,
            weekday: parse_weekday(&self.departure.weekday)?,
            tz: self.timezone()?,
        })
    }
}
