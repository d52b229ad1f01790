//! Pose sample ingestion from facial landmark detections.
//!
//! The landmark detector itself lives outside this crate. Each video frame
//! it yields zero or one set of normalized 2D points, and the ingestor
//! reduces that to a single tracked reference point (the chin by default).
//! Frames without a face produce nothing; no placeholder sample is ever
//! injected downstream.

use crate::{clock::Timestamp, config::IngestConfig};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A normalized 2D landmark point from the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal coordinate in [0, 1] of the mirrored video frame
    pub x: f64,
    /// Vertical coordinate in [0, 1], growing downward
    pub y: f64,
}

impl Landmark {
    /// Create a landmark point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of one detector call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Landmark sets, one per detected face
    pub faces: Vec<Vec<Landmark>>,
}

impl Detection {
    /// A detection with no face in view
    #[must_use]
    pub const fn empty() -> Self {
        Self { faces: Vec::new() }
    }

    /// A detection with exactly one face
    #[must_use]
    pub fn single(landmarks: Vec<Landmark>) -> Self {
        Self { faces: vec![landmarks] }
    }

    /// Whether at least one face was found
    #[must_use]
    pub fn faces_found(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Landmarks of the tracked face. Only the first face is ever used.
    #[must_use]
    pub fn primary_face(&self) -> Option<&[Landmark]> {
        self.faces.first().map(Vec::as_slice)
    }
}

/// Presentation time of a video frame, used to spot repeated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameStamp(pub Duration);

impl FrameStamp {
    /// Build a stamp from fractional milliseconds of media time
    #[must_use]
    pub fn from_millis_f64(ms: f64) -> Self {
        Self(crate::clock::from_millis_f64(ms))
    }
}

/// One observation of the tracked point. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    /// When the sample was taken
    pub timestamp: Timestamp,
    /// Normalized horizontal position in the mirrored frame
    pub x: f64,
    /// Normalized vertical position
    pub y: f64,
}

impl PoseSample {
    /// Create a new pose sample
    #[must_use]
    pub const fn new(timestamp: Timestamp, x: f64, y: f64) -> Self {
        Self { timestamp, x, y }
    }
}

/// A video frame together with what the detector saw in it
#[derive(Debug, Clone, PartialEq)]
pub struct FrameObservation {
    /// Media time of the frame
    pub stamp: FrameStamp,
    /// Monotonic time at which the detection completed
    pub captured_at: Timestamp,
    /// Detector output for the frame
    pub detection: Detection,
}

/// Extracts the tracked reference point from detector output
#[derive(Debug, Clone)]
pub struct PoseIngestor {
    landmark_index: usize,
    clamp_coordinates: bool,
    last_frame: Option<FrameStamp>,
}

impl PoseIngestor {
    /// Create an ingestor tracking the landmark at `landmark_index`
    #[must_use]
    pub const fn new(landmark_index: usize, clamp_coordinates: bool) -> Self {
        Self {
            landmark_index,
            clamp_coordinates,
            last_frame: None,
        }
    }

    /// Create an ingestor from configuration
    #[must_use]
    pub const fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.landmark_index, config.clamp_coordinates)
    }

    /// Index of the tracked landmark
    #[must_use]
    pub const fn landmark_index(&self) -> usize {
        self.landmark_index
    }

    /// Mark `stamp` as seen. Returns false when the same frame was already
    /// presented, in which case the caller should skip detection entirely.
    pub fn is_new_frame(&mut self, stamp: FrameStamp) -> bool {
        if self.last_frame == Some(stamp) {
            trace!("Skipping repeated frame at {:?}", stamp.0);
            return false;
        }
        self.last_frame = Some(stamp);
        true
    }

    /// Turn a detection into a pose sample taken at `now`.
    ///
    /// Returns `None` when no face was found, the tracked landmark is
    /// missing, or its coordinates are not finite.
    #[must_use]
    pub fn extract(&self, detection: &Detection, now: Timestamp) -> Option<PoseSample> {
        let face = detection.primary_face()?;
        let Some(point) = face.get(self.landmark_index) else {
            warn!(
                "Face has {} landmarks, tracked index {} is missing",
                face.len(),
                self.landmark_index
            );
            return None;
        };

        if !point.x.is_finite() || !point.y.is_finite() {
            warn!("Discarding non-finite landmark ({}, {})", point.x, point.y);
            return None;
        }

        let (x, y) = if self.clamp_coordinates {
            (point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
        } else {
            (point.x, point.y)
        };

        Some(PoseSample::new(now, x, y))
    }

    /// Forget the last seen frame
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

/// Lazy sequence of pose samples over a stream of frame observations.
///
/// Repeated frames and frames without a face are skipped. Build a fresh
/// sequence for every session.
pub struct PoseSamples<I> {
    ingestor: PoseIngestor,
    frames: I,
}

impl<I> PoseSamples<I>
where
    I: Iterator<Item = FrameObservation>,
{
    /// Wrap an iterator of observations
    pub fn new(ingestor: PoseIngestor, frames: I) -> Self {
        Self { ingestor, frames }
    }
}

impl<I> Iterator for PoseSamples<I>
where
    I: Iterator<Item = FrameObservation>,
{
    type Item = PoseSample;

    fn next(&mut self) -> Option<Self::Item> {
        for frame in self.frames.by_ref() {
            if !self.ingestor.is_new_frame(frame.stamp) {
                continue;
            }
            if let Some(sample) = self.ingestor.extract(&frame.detection, frame.captured_at) {
                return Some(sample);
            }
        }
        None
    }
}
