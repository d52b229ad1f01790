//! Control resolution: turning the smoothed head position into game input.
//!
//! A consumer picks one [`ControlPolicy`]. The paddle policy produces a
//! continuous horizontal position, the steering policy produces debounced
//! discrete headings. Both read the same [`PoseSignal`] built by the
//! pipeline.

/// Continuous horizontal targeting with optional aim-assist
pub mod paddle;

/// Discrete four-way steering with reversal suppression
pub mod steering;

pub use paddle::{BallState, PaddlePolicy};
pub use steering::SteeringPolicy;

use crate::{calibration::NeutralPosition, direction::Direction, filters::SmoothedPosition};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Control value handed to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlOutput {
    /// Horizontal coordinate the continuous actuator should take
    TargetPosition {
        /// Position in playfield pixels
        x: f64,
    },
    /// Discrete heading for the next game tick
    DirectionCommand {
        /// New heading
        direction: Direction,
    },
}

/// Smoothed, calibration-aware view of the head position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSignal {
    /// Mean position over the smoothing window
    pub average: SmoothedPosition,
    /// Neutral point of the current session, if latched yet
    pub neutral: Option<NeutralPosition>,
    /// Whether a play session is running
    pub session_active: bool,
}

/// Consumer-specific mapping from pose signal to control output
pub trait ControlPolicy {
    /// Per-tick game state the policy needs from the consumer
    type Input;

    /// Smoothing window this consumer wants
    fn window(&self) -> Duration;

    /// React to a freshly smoothed signal on the sampling cadence
    fn observe(&mut self, _signal: &PoseSignal) {}

    /// Produce the output for one consumer tick.
    ///
    /// `signal` is `None` when the smoothing window is empty. Returning
    /// `None` tells the consumer to keep its previous control state.
    ///
    /// An empty window does not force `None`. State latched by
    /// [`Self::observe`] while samples existed may still be emitted, so a
    /// steering heading held pending before the face was lost commits on
    /// the next tick.
    fn resolve(&mut self, signal: Option<&PoseSignal>, input: &Self::Input) -> Option<ControlOutput>;

    /// Return to the start-of-session state
    fn reset(&mut self);

    /// Policy name
    fn name(&self) -> &str;
}
