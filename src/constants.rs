//! Constants used throughout the library

/// Index of the chin point in the 468-point face mesh
pub const CHIN_LANDMARK_INDEX: usize = 152;

/// Smoothing window for the paddle consumer, in milliseconds
pub const DEFAULT_PADDLE_WINDOW_MS: u64 = 200;

/// Smoothing window for the steering consumer, in milliseconds
pub const DEFAULT_STEERING_WINDOW_MS: u64 = 500;

/// Horizontal dead zone used by paddle aim-assist
pub const DEFAULT_PADDLE_DEAD_ZONE: f64 = 0.02;

/// Steering dead zones. Head tilt noise is larger sideways than vertically.
pub const DEFAULT_HORIZONTAL_DEAD_ZONE: f64 = 0.03;
pub const DEFAULT_VERTICAL_DEAD_ZONE: f64 = 0.01;

/// Per-tick easing factor applied to the paddle position
pub const DEFAULT_EASING: f64 = 0.2;

/// Default playfield geometry, in pixels
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_PADDLE_WIDTH: f64 = 100.0;

/// Steering consumer tick period, in milliseconds
pub const DEFAULT_TICK_MS: u64 = 150;

/// Easing factor bounds
pub const EASING_MIN: f64 = 0.0;
pub const EASING_MAX: f64 = 1.0;

/// Upper bound (exclusive) for any dead zone on a normalized axis
pub const DEAD_ZONE_MAX: f64 = 0.5;
