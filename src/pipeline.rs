//! Head pose control pipeline.
//!
//! Wires ingestion, calibration, smoothing and a consumer-specific
//! [`ControlPolicy`] into one session-scoped object. Two cadences drive it:
//! the sampling side calls [`ControlPipeline::accept_frame`] and
//! [`ControlPipeline::ingest`] once per video frame, and the consumer calls
//! [`ControlPipeline::resolve`] once per game tick. All methods take
//! `&mut self`, so on a multi-threaded runtime the pipeline belongs behind a
//! single `Mutex` shared by both cadences.

use crate::{
    calibration::{NeutralCalibrator, NeutralPosition},
    clock::{SessionClock, Timestamp},
    config::{Config, IngestConfig},
    control::{ControlOutput, ControlPolicy, PaddlePolicy, PoseSignal, SteeringPolicy},
    filters::TimeWindowAverage,
    ingest::{Detection, FrameStamp, PoseIngestor, PoseSample},
    session::{Session, SessionEpoch, SessionPhase, SessionState},
};
use log::{debug, trace};

/// What happened to one detector result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IngestOutcome {
    /// The sample entered the smoothing history
    Accepted {
        /// The ingested sample
        sample: PoseSample,
        /// Whether this sample set the neutral point
        calibrated: bool,
    },
    /// No face, or the tracked landmark was unusable
    NoFace,
    /// No session is running
    Inactive,
    /// The result belongs to an earlier session
    StaleSession,
    /// The sample is older than the newest one in history
    OutOfOrder,
}

/// Pipeline driving the continuous paddle policy
pub type PaddlePipeline = ControlPipeline<PaddlePolicy>;

/// Pipeline driving the discrete steering policy
pub type SteeringPipeline = ControlPipeline<SteeringPolicy>;

/// Session-scoped head pose control pipeline
pub struct ControlPipeline<P: ControlPolicy> {
    ingestor: PoseIngestor,
    calibrator: NeutralCalibrator,
    smoother: TimeWindowAverage,
    session: Session,
    clock: SessionClock,
    policy: P,
}

impl PaddlePipeline {
    /// Build a paddle pipeline from configuration
    ///
    /// # Panics
    ///
    /// Panics on paddle settings that [`Config::validate`] rejects
    #[must_use]
    pub fn paddle(config: &Config) -> Self {
        Self::new(&config.ingest, PaddlePolicy::new(&config.paddle))
    }
}

impl SteeringPipeline {
    /// Build a steering pipeline from configuration
    #[must_use]
    pub fn steering(config: &Config) -> Self {
        Self::new(&config.ingest, SteeringPolicy::new(&config.steering))
    }
}

impl<P: ControlPolicy> ControlPipeline<P> {
    /// Create an idle pipeline around `policy`. Its clock starts now.
    #[must_use]
    pub fn new(ingest: &IngestConfig, policy: P) -> Self {
        debug!(
            "Creating pipeline with {} ({:?} window)",
            policy.name(),
            policy.window()
        );
        Self {
            ingestor: PoseIngestor::from_config(ingest),
            calibrator: NeutralCalibrator::new(),
            smoother: TimeWindowAverage::new(policy.window()),
            session: Session::new(),
            clock: SessionClock::start(),
            policy,
        }
    }

    /// Start a new session, clearing history, neutral point and policy state
    pub fn start_session(&mut self) -> SessionEpoch {
        self.smoother.reset();
        self.calibrator.reset();
        self.ingestor.reset();
        self.policy.reset();
        self.session.start()
    }

    /// End the running session. Further samples and ticks are ignored.
    pub fn end_session(&mut self) -> bool {
        self.session.end()
    }

    /// Current session state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Session state refined with calibration progress
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.session.phase(self.calibrator.is_calibrated())
    }

    /// Epoch of the latest session. Capture it before an asynchronous
    /// detector call and hand it to [`Self::ingest_for_epoch`].
    #[must_use]
    pub const fn epoch(&self) -> SessionEpoch {
        self.session.epoch()
    }

    /// Whether a session is running
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Check whether a frame should be sent to the detector at all.
    /// Returns false while idle and for repeated frames.
    pub fn accept_frame(&mut self, stamp: FrameStamp) -> bool {
        self.session.is_active() && self.ingestor.is_new_frame(stamp)
    }

    /// Ingest a detector result for the running session
    pub fn ingest(&mut self, detection: &Detection, now: Timestamp) -> IngestOutcome {
        self.ingest_for_epoch(self.session.epoch(), detection, now)
    }

    /// Ingest a detector result that was requested during session `epoch`.
    /// Results that outlived their session are discarded.
    pub fn ingest_for_epoch(&mut self, epoch: SessionEpoch, detection: &Detection, now: Timestamp) -> IngestOutcome {
        if !self.session.is_active() {
            trace!("Discarding detection: no active session");
            return IngestOutcome::Inactive;
        }
        if epoch != self.session.epoch() {
            debug!(
                "Discarding detection from session {} during session {}",
                epoch.0,
                self.session.epoch().0
            );
            return IngestOutcome::StaleSession;
        }

        match self.ingestor.extract(detection, now) {
            Some(sample) => self.ingest_sample(sample),
            None => IngestOutcome::NoFace,
        }
    }

    /// Ingest a live detector result, stamped with the pipeline clock
    pub fn ingest_now(&mut self, detection: &Detection) -> IngestOutcome {
        let now = self.clock.now();
        self.ingest(detection, now)
    }

    /// Ingest an already extracted sample
    pub fn ingest_sample(&mut self, sample: PoseSample) -> IngestOutcome {
        let active = self.session.is_active();
        if !active {
            return IngestOutcome::Inactive;
        }
        if !self.smoother.append(sample) {
            return IngestOutcome::OutOfOrder;
        }
        let calibrated = self.calibrator.maybe_calibrate(active, &sample);

        if let Some(signal) = self.signal(sample.timestamp) {
            self.policy.observe(&signal);
        }

        IngestOutcome::Accepted { sample, calibrated }
    }

    /// Ingest a sequence of samples, returning how many were accepted
    pub fn feed<I>(&mut self, samples: I) -> usize
    where
        I: IntoIterator<Item = PoseSample>,
    {
        samples
            .into_iter()
            .filter(|sample| matches!(self.ingest_sample(*sample), IngestOutcome::Accepted { .. }))
            .count()
    }

    /// Smoothed signal at `now`, or `None` when the window is empty
    pub fn signal(&mut self, now: Timestamp) -> Option<PoseSignal> {
        let average = self.smoother.current_average(now)?;
        Some(PoseSignal {
            average,
            neutral: self.calibrator.neutral(),
            session_active: self.session.is_active(),
        })
    }

    /// Control output for one consumer tick.
    ///
    /// `None` means no update: the session is not running, the window is
    /// empty, or the policy has nothing new. The consumer keeps its
    /// previous control state in that case.
    pub fn resolve(&mut self, input: &P::Input, now: Timestamp) -> Option<ControlOutput> {
        if !self.session.is_active() {
            return None;
        }
        let signal = self.signal(now);
        if signal.is_none() {
            trace!("No samples inside the smoothing window at {:?}", now);
        }
        self.policy.resolve(signal.as_ref(), input)
    }

    /// [`Self::resolve`] at the current pipeline clock time
    pub fn resolve_now(&mut self, input: &P::Input) -> Option<ControlOutput> {
        let now = self.clock.now();
        self.resolve(input, now)
    }

    /// Clock used by [`Self::ingest_now`] and [`Self::resolve_now`]
    #[must_use]
    pub const fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Neutral point of the running session
    #[must_use]
    pub const fn neutral(&self) -> Option<NeutralPosition> {
        self.calibrator.neutral()
    }

    /// Number of samples currently held for smoothing
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.smoother.len()
    }

    /// Samples currently held for smoothing, oldest first
    pub fn history(&self) -> impl Iterator<Item = &PoseSample> {
        self.smoother.samples()
    }

    /// The control policy
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the control policy
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}
