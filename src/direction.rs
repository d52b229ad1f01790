//! Directional classification of head deviation from the neutral point.
//!
//! Deviations are measured in normalized detector units. Anything inside
//! the dead zone is treated as noise rather than intent.

use crate::{calibration::NeutralPosition, filters::SmoothedPosition, Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Screen-space heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the top of the screen
    Up,
    /// Toward the bottom of the screen
    Down,
    /// Toward the left of the screen
    Left,
    /// Toward the right of the screen
    Right,
}

impl Direction {
    /// The 180° reverse of this heading
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether `other` points exactly the other way
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::InvalidInput(format!("Unknown direction: {s}"))),
        }
    }
}

/// Offset of the smoothed position from the neutral point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    /// `avg_x - neutral_x`
    pub horizontal: f64,
    /// `avg_y - neutral_y`
    pub vertical: f64,
}

impl Deviation {
    /// Deviation of `position` from `neutral`
    #[must_use]
    pub fn between(position: &SmoothedPosition, neutral: &NeutralPosition) -> Self {
        Self {
            horizontal: position.x - neutral.x,
            vertical: position.y - neutral.y,
        }
    }
}

/// Per-axis dead-zone thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadZone {
    /// Minimum horizontal deviation treated as intent
    pub horizontal: f64,
    /// Minimum vertical deviation treated as intent
    pub vertical: f64,
}

impl DeadZone {
    /// Create dead zones for both axes
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self { horizontal, vertical }
    }

    /// Classify the horizontal axis alone.
    ///
    /// With `mirror_x` the detector x axis runs opposite to the screen, so a
    /// negative deviation is a move to the right.
    #[must_use]
    pub fn horizontal(&self, deviation: f64, mirror_x: bool) -> Option<Direction> {
        let screen = if mirror_x { -deviation } else { deviation };
        if screen > self.horizontal {
            Some(Direction::Right)
        } else if screen < -self.horizontal {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Classify the vertical axis alone. Image y grows downward.
    #[must_use]
    pub fn vertical(&self, deviation: f64) -> Option<Direction> {
        if deviation < -self.vertical {
            Some(Direction::Up)
        } else if deviation > self.vertical {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Classify both axes. Checked in the order right, left, up, down and the
    /// first exceeded threshold wins.
    #[must_use]
    pub fn classify(&self, deviation: &Deviation, mirror_x: bool) -> Option<Direction> {
        self.horizontal(deviation.horizontal, mirror_x)
            .or_else(|| self.vertical(deviation.vertical))
    }
}
