use super::{ControlOutput, ControlPolicy, PoseSignal};
use crate::{
    config::PaddleConfig,
    direction::{DeadZone, Direction},
    filters::Easing,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ball state reported by the consumer each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Horizontal position in playfield pixels
    pub x: f64,
    /// Horizontal velocity
    pub dx: f64,
    /// Vertical velocity, positive toward the paddle
    pub dy: f64,
}

impl BallState {
    /// Whether the ball is heading toward the player's side
    #[must_use]
    pub fn approaching(&self) -> bool {
        self.dy > 0.0
    }

    /// Direction the paddle must move to meet the ball
    #[must_use]
    pub fn required_direction(&self) -> Option<Direction> {
        if self.dx > 0.0 {
            Some(Direction::Right)
        } else if self.dx < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Continuous paddle targeting.
///
/// By default the paddle follows the head directly. With aim-assist on,
/// while the ball approaches, a head movement in the direction the ball is
/// travelling snaps the target onto the ball. Any other movement, including
/// none at all, falls back to direct control. The paddle eases toward its
/// target and is clamped to the playfield.
#[derive(Debug, Clone)]
pub struct PaddlePolicy {
    window: Duration,
    dead_zone: DeadZone,
    easing: Easing,
    aim_assist: bool,
    canvas_width: f64,
    paddle_width: f64,
    mirror_x: bool,
    position: f64,
}

impl PaddlePolicy {
    /// Create a paddle policy from configuration
    ///
    /// # Panics
    ///
    /// Panics if the easing factor is not in (0, 1], or if the paddle is
    /// not positive and narrower than the canvas
    #[must_use]
    pub fn new(config: &PaddleConfig) -> Self {
        assert!(
            config.canvas_width.is_finite()
                && config.paddle_width > 0.0
                && config.paddle_width < config.canvas_width,
            "Paddle width must be positive and narrower than the canvas"
        );
        let mut policy = Self {
            window: config.window(),
            dead_zone: DeadZone::new(config.dead_zone, 0.0),
            easing: Easing::new(config.easing),
            aim_assist: config.aim_assist,
            canvas_width: config.canvas_width,
            paddle_width: config.paddle_width,
            mirror_x: config.mirror_x,
            position: 0.0,
        };
        policy.position = policy.centered();
        policy
    }

    /// Current paddle position (left edge, playfield pixels)
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Place the paddle explicitly, clamped to the playfield
    pub fn set_position(&mut self, position: f64) {
        self.position = position.clamp(0.0, self.max_position());
    }

    /// Rightmost allowed paddle position
    #[must_use]
    pub fn max_position(&self) -> f64 {
        self.canvas_width - self.paddle_width
    }

    fn centered(&self) -> f64 {
        self.max_position() / 2.0
    }

    /// Target from direct head control
    #[must_use]
    pub fn direct_target(&self, avg_x: f64) -> f64 {
        let screen_x = if self.mirror_x { 1.0 - avg_x } else { avg_x };
        screen_x * self.canvas_width - self.paddle_width / 2.0
    }

    /// Direction the player is leaning, relative to the neutral point
    #[must_use]
    pub fn player_direction(&self, signal: &PoseSignal) -> Option<Direction> {
        let neutral = signal.neutral?;
        self.dead_zone
            .horizontal(signal.average.x - neutral.x, self.mirror_x)
    }

    /// Whether aim-assist may override direct control this tick
    #[must_use]
    pub fn aim_assist_applies(&self, signal: &PoseSignal, ball: &BallState) -> bool {
        self.aim_assist && signal.session_active && ball.approaching() && signal.neutral.is_some()
    }

    /// Unsmoothed target for this tick
    #[must_use]
    pub fn target(&self, signal: &PoseSignal, ball: &BallState) -> f64 {
        if self.aim_assist_applies(signal, ball) {
            let player = self.player_direction(signal);
            let required = ball.required_direction();
            if player.is_some() && player == required {
                debug!("Aim-assist: player moved {:?} with the ball, snapping to ball", player);
                return ball.x - self.paddle_width / 2.0;
            }
        }
        self.direct_target(signal.average.x)
    }
}

impl ControlPolicy for PaddlePolicy {
    type Input = BallState;

    fn window(&self) -> Duration {
        self.window
    }

    fn resolve(&mut self, signal: Option<&PoseSignal>, ball: &BallState) -> Option<ControlOutput> {
        let signal = signal?;
        let target = self.target(signal, ball);
        self.position = self
            .easing
            .step(self.position, target)
            .clamp(0.0, self.max_position());

        Some(ControlOutput::TargetPosition { x: self.position })
    }

    fn reset(&mut self) {
        self.position = self.centered();
    }

    fn name(&self) -> &str {
        "PaddlePolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calibration::NeutralPosition, filters::SmoothedPosition};

    fn signal(avg_x: f64, neutral_x: Option<f64>) -> PoseSignal {
        PoseSignal {
            average: SmoothedPosition {
                x: avg_x,
                y: 0.5,
                samples: 1,
            },
            neutral: neutral_x.map(|x| NeutralPosition { x, y: 0.5 }),
            session_active: true,
        }
    }

    #[test]
    fn test_starts_centered() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        assert_eq!(policy.position(), 350.0);
    }

    #[test]
    fn test_direct_target_is_mirrored() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        // (1 - 0.25) * 800 - 50
        assert_eq!(policy.direct_target(0.25), 550.0);

        let raw = PaddlePolicy::new(&PaddleConfig {
            mirror_x: false,
            ..PaddleConfig::default()
        });
        assert_eq!(raw.direct_target(0.25), 150.0);
    }

    #[test]
    fn test_easing_from_known_position() {
        let mut policy = PaddlePolicy::new(&PaddleConfig::default());
        policy.set_position(100.0);

        // Direct target (1 - 0.6875) * 800 - 50 = 200
        let s = signal(0.6875, None);
        let ball = BallState::default();
        assert_eq!(
            policy.resolve(Some(&s), &ball),
            Some(ControlOutput::TargetPosition { x: 120.0 })
        );
        assert_eq!(
            policy.resolve(Some(&s), &ball),
            Some(ControlOutput::TargetPosition { x: 136.0 })
        );
    }

    #[test]
    fn test_aim_assist_snaps_to_ball() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        let ball = BallState {
            x: 600.0,
            dx: 3.0,
            dy: 4.0,
        };
        // Leaning right on screen means detector x below neutral
        let s = signal(0.45, Some(0.5));
        assert_eq!(policy.player_direction(&s), Some(Direction::Right));
        assert_eq!(policy.target(&s, &ball), 550.0);
    }

    #[test]
    fn test_wrong_direction_falls_back_to_direct() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        let ball = BallState {
            x: 600.0,
            dx: -3.0,
            dy: 4.0,
        };
        let s = signal(0.45, Some(0.5));
        assert_eq!(policy.target(&s, &ball), policy.direct_target(0.45));
    }

    #[test]
    fn test_no_assist_when_ball_leaving_or_uncalibrated() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        let leaving = BallState {
            x: 600.0,
            dx: 3.0,
            dy: -4.0,
        };
        let s = signal(0.45, Some(0.5));
        assert!(!policy.aim_assist_applies(&s, &leaving));

        let approaching = BallState { dy: 4.0, ..leaving };
        let uncalibrated = signal(0.45, None);
        assert!(!policy.aim_assist_applies(&uncalibrated, &approaching));
        assert_eq!(policy.target(&uncalibrated, &approaching), policy.direct_target(0.45));
    }

    #[test]
    fn test_dead_zone_blocks_assist() {
        let policy = PaddlePolicy::new(&PaddleConfig::default());
        let ball = BallState {
            x: 600.0,
            dx: 3.0,
            dy: 4.0,
        };
        let s = signal(0.49, Some(0.5));
        assert_eq!(policy.player_direction(&s), None);
        assert_eq!(policy.target(&s, &ball), policy.direct_target(0.49));
    }

    #[test]
    fn test_position_is_clamped() {
        let mut policy = PaddlePolicy::new(&PaddleConfig {
            easing: 1.0,
            ..PaddleConfig::default()
        });
        let ball = BallState::default();

        policy.resolve(Some(&signal(0.0, None)), &ball);
        assert_eq!(policy.position(), 700.0);

        policy.resolve(Some(&signal(1.0, None)), &ball);
        assert_eq!(policy.position(), 0.0);
    }

    #[test]
    fn test_no_signal_means_no_update() {
        let mut policy = PaddlePolicy::new(&PaddleConfig::default());
        assert_eq!(policy.resolve(None, &BallState::default()), None);
        assert_eq!(policy.position(), 350.0);
    }

    #[test]
    fn test_reset_recenters() {
        let mut policy = PaddlePolicy::new(&PaddleConfig::default());
        policy.set_position(10.0);
        policy.reset();
        assert_eq!(policy.position(), 350.0);
    }
}
