use super::SmoothedPosition;
use crate::{clock::Timestamp, ingest::PoseSample};
use log::{trace, warn};
use std::collections::VecDeque;
use std::time::Duration;

/// Moving average over the samples seen within a recent time window.
///
/// Samples are kept in timestamp order, so eviction only ever pops from the
/// front. A shorter window reacts faster, a longer one is steadier.
#[derive(Debug, Clone)]
pub struct TimeWindowAverage {
    window: Duration,
    history: VecDeque<PoseSample>,
}

impl TimeWindowAverage {
    /// Create a smoother with the given window
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero
    #[must_use]
    pub fn new(window: Duration) -> Self {
        assert!(!window.is_zero(), "Window must be greater than 0");
        Self {
            window,
            history: VecDeque::new(),
        }
    }

    /// The configured window
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Append a sample at the tail of the history.
    ///
    /// A sample older than the current tail would break the ordering that
    /// eviction relies on, so it is dropped and false is returned.
    pub fn append(&mut self, sample: PoseSample) -> bool {
        if let Some(last) = self.history.back() {
            if sample.timestamp < last.timestamp {
                warn!(
                    "Dropping out-of-order sample at {:?} (history tail at {:?})",
                    sample.timestamp, last.timestamp
                );
                return false;
            }
        }
        self.history.push_back(sample);
        true
    }

    /// Evict samples older than `now - window`, then average what remains.
    ///
    /// Returns `None` when no samples are left inside the window.
    pub fn current_average(&mut self, now: Timestamp) -> Option<SmoothedPosition> {
        self.evict(now);

        if self.history.is_empty() {
            return None;
        }

        let n = self.history.len() as f64;
        let x = self.history.iter().map(|s| s.x).sum::<f64>() / n;
        let y = self.history.iter().map(|s| s.y).sum::<f64>() / n;

        Some(SmoothedPosition {
            x,
            y,
            samples: self.history.len(),
        })
    }

    /// Remove samples with `timestamp < now - window` from the head
    fn evict(&mut self, now: Timestamp) {
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };

        let before = self.history.len();
        while self.history.front().is_some_and(|s| s.timestamp < cutoff) {
            self.history.pop_front();
        }

        let evicted = before - self.history.len();
        if evicted > 0 {
            trace!("Evicted {} samples older than {:?}", evicted, cutoff);
        }
    }

    /// Samples currently retained, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &PoseSample> {
        self.history.iter()
    }

    /// Number of retained samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no samples are retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
