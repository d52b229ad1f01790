//! Configuration management for the head pose control pipeline

use crate::{constants::*, direction::Direction, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark ingestion configuration
    pub ingest: IngestConfig,

    /// Continuous (paddle) control configuration
    pub paddle: PaddleConfig,

    /// Discrete (steering) control configuration
    pub steering: SteeringConfig,
}

/// Landmark ingestion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Index of the tracked landmark in the detector output
    pub landmark_index: usize,

    /// Clamp landmark coordinates into [0, 1]
    pub clamp_coordinates: bool,
}

/// Continuous targeting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    /// Smoothing window in milliseconds
    pub window_ms: u64,

    /// Horizontal dead zone for aim-assist classification
    pub dead_zone: f64,

    /// Easing factor applied per tick (0.0-1.0]
    pub easing: f64,

    /// Enable aim-assist
    pub aim_assist: bool,

    /// Playfield width in pixels
    pub canvas_width: f64,

    /// Paddle width in pixels
    pub paddle_width: f64,

    /// Detector x axis is mirrored relative to the screen
    pub mirror_x: bool,
}

/// Discrete direction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Smoothing window in milliseconds
    pub window_ms: u64,

    /// Horizontal dead zone
    pub horizontal_dead_zone: f64,

    /// Vertical dead zone
    pub vertical_dead_zone: f64,

    /// Game tick period in milliseconds
    pub tick_ms: u64,

    /// Heading committed at session start
    pub initial_heading: Direction,

    /// Detector x axis is mirrored relative to the screen
    pub mirror_x: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            landmark_index: CHIN_LANDMARK_INDEX,
            clamp_coordinates: true,
        }
    }
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_PADDLE_WINDOW_MS,
            dead_zone: DEFAULT_PADDLE_DEAD_ZONE,
            easing: DEFAULT_EASING,
            aim_assist: true,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            paddle_width: DEFAULT_PADDLE_WIDTH,
            mirror_x: true,
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_STEERING_WINDOW_MS,
            horizontal_dead_zone: DEFAULT_HORIZONTAL_DEAD_ZONE,
            vertical_dead_zone: DEFAULT_VERTICAL_DEAD_ZONE,
            tick_ms: DEFAULT_TICK_MS,
            initial_heading: Direction::Right,
            mirror_x: true,
        }
    }
}

impl PaddleConfig {
    /// Smoothing window as a duration
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    fn validate(&self) -> Result<()> {
        validate_window("paddle", self.window_ms)?;
        validate_dead_zone("paddle dead zone", self.dead_zone)?;
        if !(self.easing > EASING_MIN && self.easing <= EASING_MAX) {
            return Err(Error::ConfigError(
                "Easing factor must be in (0.0, 1.0]".to_string(),
            ));
        }
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            return Err(Error::ConfigError("Canvas width must be positive".to_string()));
        }
        if !(self.paddle_width.is_finite() && self.paddle_width > 0.0 && self.paddle_width < self.canvas_width) {
            return Err(Error::ConfigError(
                "Paddle width must be positive and narrower than the canvas".to_string(),
            ));
        }
        Ok(())
    }
}

impl SteeringConfig {
    /// Smoothing window as a duration
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Tick period as a duration
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    fn validate(&self) -> Result<()> {
        validate_window("steering", self.window_ms)?;
        validate_dead_zone("horizontal dead zone", self.horizontal_dead_zone)?;
        validate_dead_zone("vertical dead zone", self.vertical_dead_zone)?;
        if self.tick_ms == 0 {
            return Err(Error::ConfigError("Tick period must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn validate_window(name: &str, window_ms: u64) -> Result<()> {
    if window_ms == 0 {
        return Err(Error::ConfigError(format!(
            "{name} smoothing window must be greater than 0"
        )));
    }
    Ok(())
}

fn validate_dead_zone(name: &str, value: f64) -> Result<()> {
    if !(0.0..DEAD_ZONE_MAX).contains(&value) {
        return Err(Error::ConfigError(format!(
            "{name} must be in [0.0, {DEAD_ZONE_MAX})"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.paddle.validate()?;
        self.steering.validate()?;
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Pose Control Configuration

# Landmark ingestion
ingest:
  landmark_index: 152
  clamp_coordinates: true

# Continuous paddle control
paddle:
  window_ms: 200
  dead_zone: 0.02
  easing: 0.2
  aim_assist: true
  canvas_width: 800.0
  paddle_width: 100.0
  mirror_x: true

# Discrete steering control
steering:
  window_ms: 500
  horizontal_dead_zone: 0.03
  vertical_dead_zone: 0.01
  tick_ms: 150
  initial_heading: right
  mirror_x: true
"#;
