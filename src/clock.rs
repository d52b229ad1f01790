//! Monotonic time source for pose samples.
//!
//! Every timestamp in the pipeline is a [`Duration`] measured from a fixed
//! epoch, so samples from one run compare and subtract without touching the
//! wall clock. Replays and tests supply timestamps directly.

use std::time::{Duration, Instant};

/// Monotonic timestamp relative to a clock epoch
pub type Timestamp = Duration;

/// A monotonic clock anchored at the moment it was started
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    epoch: Instant,
}

impl SessionClock {
    /// Create a clock anchored to now
    #[must_use]
    pub fn start() -> Self {
        Self { epoch: Instant::now() }
    }

    /// Create a clock from a known epoch
    #[must_use]
    pub const fn from_epoch(epoch: Instant) -> Self {
        Self { epoch }
    }

    /// Time elapsed since the epoch
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.epoch.elapsed()
    }

    /// The underlying epoch instant
    #[must_use]
    pub const fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Convert fractional milliseconds to a timestamp, saturating at zero
#[must_use]
pub fn from_millis_f64(ms: f64) -> Timestamp {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}
