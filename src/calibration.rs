//! Neutral point calibration.
//!
//! The neutral point is the head position the player holds when a session
//! starts. It is latched once from the first sample seen after the start
//! command and stays fixed until the session is reset, so a player cannot
//! recenter mid-game.

use crate::ingest::PoseSample;
use log::info;

/// Calibrated "no input" reference position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralPosition {
    /// Horizontal reference
    pub x: f64,
    /// Vertical reference
    pub y: f64,
}

/// One-shot latch for the neutral position of a play session
#[derive(Debug, Clone, Default)]
pub struct NeutralCalibrator {
    neutral: Option<NeutralPosition>,
}

impl NeutralCalibrator {
    /// Create an uncalibrated latch
    #[must_use]
    pub const fn new() -> Self {
        Self { neutral: None }
    }

    /// Latch `sample` as the neutral point if the session is active and no
    /// neutral point is set yet. Returns true when the latch fired.
    pub fn maybe_calibrate(&mut self, session_active: bool, sample: &PoseSample) -> bool {
        if !session_active || self.neutral.is_some() {
            return false;
        }

        info!("Neutral position calibrated at ({:.4}, {:.4})", sample.x, sample.y);
        self.neutral = Some(NeutralPosition {
            x: sample.x,
            y: sample.y,
        });
        true
    }

    /// The calibrated neutral position, if any
    #[must_use]
    pub const fn neutral(&self) -> Option<NeutralPosition> {
        self.neutral
    }

    /// Whether the latch has fired for this session
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.neutral.is_some()
    }

    /// Clear the latch for a new session
    pub fn reset(&mut self) {
        self.neutral = None;
    }
}
