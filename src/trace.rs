//! Recorded landmark traces and offline replay.
//!
//! A trace is a JSON-lines file. Each line is one [`TraceRecord`]: a video
//! frame with the detector's view of it, an optional ball state for the
//! paddle consumer, and an optional session event. Replaying a trace runs
//! it through a pipeline exactly as a live game loop would.

use crate::{
    clock::{from_millis_f64, Timestamp},
    config::Config,
    control::{BallState, ControlOutput, ControlPolicy},
    ingest::{Detection, FrameObservation, FrameStamp, Landmark},
    pipeline::{ControlPipeline, PaddlePipeline, SteeringPipeline},
    Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Session command embedded in a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceEvent {
    /// Player pressed start
    Start,
    /// Game reported win or loss
    End,
}

/// One line of a landmark trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Monotonic time of the record in milliseconds
    pub time_ms: f64,

    /// Media time of the video frame, defaults to `time_ms`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ms: Option<f64>,

    /// Landmarks of the detected face. Absent when the record carries no
    /// frame, empty when the frame had no face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,

    /// Ball state at this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<BallState>,

    /// Session command applied before the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<TraceEvent>,
}

impl TraceRecord {
    /// Monotonic timestamp of the record
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        from_millis_f64(self.time_ms)
    }

    /// The video frame carried by this record, if any
    #[must_use]
    pub fn observation(&self) -> Option<FrameObservation> {
        let landmarks = self.landmarks.as_ref()?;
        let detection = if landmarks.is_empty() {
            Detection::empty()
        } else {
            Detection::single(landmarks.clone())
        };

        Some(FrameObservation {
            stamp: FrameStamp::from_millis_f64(self.frame_ms.unwrap_or(self.time_ms)),
            captured_at: self.timestamp(),
            detection,
        })
    }
}

/// Parse one trace line. `line_no` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<TraceRecord> {
    let record: TraceRecord = serde_json::from_str(line)
        .map_err(|e| Error::TraceError(format!("line {line_no}: {e}")))?;

    if !record.time_ms.is_finite() || record.time_ms < 0.0 {
        return Err(Error::TraceError(format!(
            "line {line_no}: time_ms must be a non-negative number"
        )));
    }
    Ok(record)
}

/// Read a trace, skipping blank lines and `#` comments
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        records.push(parse_line(trimmed, index + 1)?);
    }
    Ok(records)
}

/// Load a trace file
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceRecord>> {
    let path = path.as_ref();
    info!("Loading trace from {}", path.display());
    let file = File::open(path)?;
    read_trace(BufReader::new(file))
}

/// A control output produced during replay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayStep {
    /// Trace time of the output in milliseconds
    pub time_ms: f64,
    /// The output
    #[serde(flatten)]
    pub output: ControlOutput,
}

impl ReplayStep {
    /// Encode as a single JSON line
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn apply_event<P: ControlPolicy>(pipeline: &mut ControlPipeline<P>, event: Option<TraceEvent>) {
    match event {
        Some(TraceEvent::Start) => {
            pipeline.start_session();
        }
        Some(TraceEvent::End) => {
            pipeline.end_session();
        }
        None => {}
    }
}

fn ingest_record<P: ControlPolicy>(pipeline: &mut ControlPipeline<P>, record: &TraceRecord) {
    if let Some(frame) = record.observation() {
        if pipeline.accept_frame(frame.stamp) {
            let outcome = pipeline.ingest(&frame.detection, frame.captured_at);
            debug!("t={}ms: {:?}", record.time_ms, outcome);
        }
    }
}

/// Replay a trace through a paddle pipeline, resolving once per record
///
/// # Panics
///
/// Panics on paddle geometry that [`Config::validate`] rejects
pub fn replay_paddle(config: &Config, records: &[TraceRecord]) -> Vec<ReplayStep> {
    let mut pipeline = PaddlePipeline::paddle(config);
    let mut ball = BallState::default();
    let mut steps = Vec::new();

    for record in records {
        apply_event(&mut pipeline, record.event);
        if let Some(state) = record.ball {
            ball = state;
        }
        ingest_record(&mut pipeline, record);

        if let Some(output) = pipeline.resolve(&ball, record.timestamp()) {
            steps.push(ReplayStep {
                time_ms: record.time_ms,
                output,
            });
        }
    }
    steps
}

/// Replay a trace through a steering pipeline, ticking every
/// `steering.tick_ms` of trace time from each session start
///
/// # Panics
///
/// Panics if `steering.tick_ms` is zero
pub fn replay_steering(config: &Config, records: &[TraceRecord]) -> Vec<ReplayStep> {
    assert!(config.steering.tick_ms > 0, "Tick period must be greater than 0");
    let mut pipeline = SteeringPipeline::steering(config);
    let tick_ms = config.steering.tick_ms as f64;
    let mut next_tick: Option<f64> = None;
    let mut steps = Vec::new();

    for record in records {
        if let Some(mut tick) = next_tick {
            while tick <= record.time_ms {
                if let Some(output) = pipeline.resolve(&(), from_millis_f64(tick)) {
                    steps.push(ReplayStep { time_ms: tick, output });
                }
                tick += tick_ms;
            }
            next_tick = Some(tick);
        }

        apply_event(&mut pipeline, record.event);
        match record.event {
            Some(TraceEvent::Start) => next_tick = Some(record.time_ms + tick_ms),
            Some(TraceEvent::End) => next_tick = None,
            None => {}
        }
        ingest_record(&mut pipeline, record);
    }
    steps
}
