//! Play session state machine.
//!
//! `Idle -> Active` on start, `Active -> Ended` when the consumer reports a
//! win or loss, and `Ended -> Active` on restart. Starting always counts as
//! a fresh session and bumps the epoch, which lets late detector results
//! from an earlier session be recognised and dropped.

use log::{debug, info};
use serde::Serialize;

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No session has started yet
    Idle,
    /// A session is running
    Active,
    /// The last session finished
    Ended,
}

/// Session state refined with calibration progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No session has started yet
    Idle,
    /// Running, waiting for the first sample to set the neutral point
    Calibrating,
    /// Running and calibrated
    Active,
    /// The last session finished
    Ended,
}

/// Identifier of one play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionEpoch(pub u64);

/// Tracks the session lifecycle
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    epoch: SessionEpoch,
}

impl Session {
    /// Create an idle session tracker
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
            epoch: SessionEpoch(0),
        }
    }

    /// Start a new session from any state and return its epoch
    pub fn start(&mut self) -> SessionEpoch {
        self.epoch = SessionEpoch(self.epoch.0 + 1);
        info!("Session {} started (was {:?})", self.epoch.0, self.state);
        self.state = SessionState::Active;
        self.epoch
    }

    /// End the running session. Returns false when none was running.
    pub fn end(&mut self) -> bool {
        if self.state != SessionState::Active {
            debug!("Ignoring end request in state {:?}", self.state);
            return false;
        }
        info!("Session {} ended", self.epoch.0);
        self.state = SessionState::Ended;
        true
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Epoch of the latest session
    #[must_use]
    pub const fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    /// Whether a session is running
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Whether `epoch` names the running session
    #[must_use]
    pub fn is_current(&self, epoch: SessionEpoch) -> bool {
        self.is_active() && self.epoch == epoch
    }

    /// State refined by whether the neutral point is set
    #[must_use]
    pub const fn phase(&self, calibrated: bool) -> SessionPhase {
        match self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Active if calibrated => SessionPhase::Active,
            SessionState::Active => SessionPhase::Calibrating,
            SessionState::Ended => SessionPhase::Ended,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
