//! Signal filtering for the tracked head position.
//!
//! Two filters sit in the pipeline. A time-windowed moving average removes
//! per-frame detector jitter from the raw samples, and exponential easing
//! moves a continuous actuator toward its target without visible snaps.

/// Time-windowed moving average over recent pose samples
pub mod moving_average;

/// Exponential easing toward a moving target
pub mod exponential;

pub use exponential::Easing;
pub use moving_average::TimeWindowAverage;

/// Mean position over the samples currently inside the smoothing window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPosition {
    /// Mean horizontal position
    pub x: f64,
    /// Mean vertical position
    pub y: f64,
    /// Number of samples that contributed
    pub samples: usize,
}
