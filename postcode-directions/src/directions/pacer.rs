//! Request pacing.
//!
//! The maps service is called strictly one request at a time, with a pause
//! after every request whether it succeeded or not. There is no retry and
//! no backoff.

use std::time::Duration;

/// Shortest pause allowed between requests.
pub const MIN_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Default pause between requests.
pub const DEFAULT_REQUEST_DELAY: Duration = MIN_REQUEST_DELAY;

/// Trait for pausing between requests.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    /// Called once after every request.
    async fn pause(&self);
}

/// Sleeps for a fixed interval after each request.
#[derive(Debug, Clone, Copy)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    /// Intervals shorter than [`MIN_REQUEST_DELAY`] are raised to it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_REQUEST_DELAY),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedIntervalPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

impl Pacer for FixedIntervalPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.interval).await;
    }
}
