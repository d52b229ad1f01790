use super::{ControlOutput, ControlPolicy, PoseSignal};
use crate::{
    config::SteeringConfig,
    direction::{DeadZone, Deviation, Direction},
};
use log::debug;
use std::time::Duration;

/// Discrete four-way steering for grid movement.
///
/// Every smoothed sample is classified against the neutral point and the
/// result is held as a pending heading. The pending heading is committed at
/// the start of the next game tick, so a heading never changes mid-tick.
/// Reversals of the committed heading are rejected before they are held.
#[derive(Debug, Clone)]
pub struct SteeringPolicy {
    window: Duration,
    dead_zone: DeadZone,
    mirror_x: bool,
    initial: Direction,
    committed: Direction,
    pending: Option<Direction>,
}

impl SteeringPolicy {
    /// Create a steering policy from configuration
    #[must_use]
    pub fn new(config: &SteeringConfig) -> Self {
        Self {
            window: config.window(),
            dead_zone: DeadZone::new(config.horizontal_dead_zone, config.vertical_dead_zone),
            mirror_x: config.mirror_x,
            initial: config.initial_heading,
            committed: config.initial_heading,
            pending: None,
        }
    }

    /// Heading in effect for the current tick
    #[must_use]
    pub const fn committed(&self) -> Direction {
        self.committed
    }

    /// Heading waiting for the next tick
    #[must_use]
    pub const fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Hold `candidate` for the next tick unless it reverses the committed
    /// heading. Returns whether it was accepted.
    pub fn propose(&mut self, candidate: Direction) -> bool {
        if candidate.is_opposite(self.committed) {
            debug!(
                "Rejecting {} while heading {}: reversal not allowed",
                candidate, self.committed
            );
            return false;
        }
        if self.pending != Some(candidate) {
            debug!("Pending heading set to {}", candidate);
        }
        self.pending = Some(candidate);
        true
    }

    /// Commit the pending heading. Returns the new heading if it changed.
    pub fn commit(&mut self) -> Option<Direction> {
        let next = self.pending.take()?;
        if next == self.committed {
            return None;
        }
        self.committed = next;
        Some(next)
    }
}

impl ControlPolicy for SteeringPolicy {
    type Input = ();

    fn window(&self) -> Duration {
        self.window
    }

    fn observe(&mut self, signal: &PoseSignal) {
        // Without a neutral point there is nothing to measure against
        let Some(neutral) = signal.neutral else {
            return;
        };

        let deviation = Deviation::between(&signal.average, &neutral);
        if let Some(candidate) = self.dead_zone.classify(&deviation, self.mirror_x) {
            self.propose(candidate);
        }
    }

    fn resolve(&mut self, _signal: Option<&PoseSignal>, _input: &()) -> Option<ControlOutput> {
        self.commit()
            .map(|direction| ControlOutput::DirectionCommand { direction })
    }

    fn reset(&mut self) {
        self.committed = self.initial;
        self.pending = None;
    }

    fn name(&self) -> &str {
        "SteeringPolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calibration::NeutralPosition, filters::SmoothedPosition};

    fn signal(x: f64, y: f64, neutral: Option<(f64, f64)>) -> PoseSignal {
        PoseSignal {
            average: SmoothedPosition { x, y, samples: 1 },
            neutral: neutral.map(|(x, y)| NeutralPosition { x, y }),
            session_active: true,
        }
    }

    #[test]
    fn test_reverse_is_never_accepted() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());
        assert_eq!(policy.committed(), Direction::Right);

        // Far past the threshold, still a reversal
        policy.observe(&signal(0.9, 0.5, Some((0.5, 0.5))));
        assert_eq!(policy.pending(), None);
        assert_eq!(policy.resolve(None, &()), None);
        assert_eq!(policy.committed(), Direction::Right);
    }

    #[test]
    fn test_dead_zone_leaves_heading_alone() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());
        policy.observe(&signal(0.52, 0.5, Some((0.5, 0.5))));
        assert_eq!(policy.pending(), None);
    }

    #[test]
    fn test_pending_commits_on_tick() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());

        policy.observe(&signal(0.5, 0.45, Some((0.5, 0.5))));
        assert_eq!(policy.pending(), Some(Direction::Up));
        assert_eq!(policy.committed(), Direction::Right);

        // Back in the dead zone; the pending heading is kept
        policy.observe(&signal(0.5, 0.5, Some((0.5, 0.5))));
        assert_eq!(policy.pending(), Some(Direction::Up));

        assert_eq!(
            policy.resolve(None, &()),
            Some(ControlOutput::DirectionCommand {
                direction: Direction::Up
            })
        );
        assert_eq!(policy.committed(), Direction::Up);
        assert_eq!(policy.resolve(None, &()), None);
    }

    #[test]
    fn test_no_neutral_holds_heading() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());
        policy.observe(&signal(0.1, 0.1, None));
        assert_eq!(policy.pending(), None);
        assert_eq!(policy.resolve(None, &()), None);
    }

    #[test]
    fn test_latest_candidate_wins_before_tick() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());
        assert!(policy.propose(Direction::Up));
        assert!(policy.propose(Direction::Down));
        assert_eq!(policy.commit(), Some(Direction::Down));

        // Up is now a reversal
        assert!(!policy.propose(Direction::Up));
        assert_eq!(policy.pending(), None);
    }

    #[test]
    fn test_reset_restores_initial_heading() {
        let mut policy = SteeringPolicy::new(&SteeringConfig {
            initial_heading: Direction::Down,
            ..SteeringConfig::default()
        });
        policy.propose(Direction::Left);
        policy.commit();
        policy.propose(Direction::Up);
        policy.reset();

        assert_eq!(policy.committed(), Direction::Down);
        assert_eq!(policy.pending(), None);
    }

    #[test]
    fn test_pending_commits_after_window_empties() {
        let mut policy = SteeringPolicy::new(&SteeringConfig::default());
        policy.observe(&signal(0.5, 0.6, Some((0.5, 0.5))));

        // Face lost before the tick; the latched heading still commits once
        assert_eq!(
            policy.resolve(None, &()),
            Some(ControlOutput::DirectionCommand {
                direction: Direction::Down
            })
        );
        assert_eq!(policy.resolve(None, &()), None);
    }
}
