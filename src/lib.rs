//! Head pose control library for face-tracked games.
//!
//! Turns a jittery per-frame facial landmark stream into a stable control
//! signal for a real-time game loop:
//! - Ingestion picks one tracked point (the chin) out of each detection
//! - Calibration latches a neutral head position when a session starts
//! - A time-windowed moving average removes detector jitter
//! - A control policy maps the smoothed, neutral-relative position to game
//!   input, either a continuous paddle position or a discrete heading
//!
//! The landmark detector, video capture and rendering are external.
//!
//! # Examples
//!
//! ## Paddle Control
//!
//! ```
//! use head_pose_control::{
//!     config::Config,
//!     control::{BallState, ControlOutput},
//!     ingest::{Detection, Landmark},
//!     pipeline::PaddlePipeline,
//! };
//! use std::time::Duration;
//!
//! let mut config = Config::default();
//! config.ingest.landmark_index = 0;
//!
//! let mut pipeline = PaddlePipeline::paddle(&config);
//! pipeline.start_session();
//!
//! // The first sample after start becomes the neutral point
//! let detection = Detection::single(vec![Landmark::new(0.5, 0.5)]);
//! pipeline.ingest(&detection, Duration::from_millis(16));
//!
//! let ball = BallState { x: 400.0, dx: 2.0, dy: 3.0 };
//! if let Some(ControlOutput::TargetPosition { x }) = pipeline.resolve(&ball, Duration::from_millis(16)) {
//!     println!("Paddle at {x:.1}");
//! }
//! ```
//!
//! ## Grid Steering
//!
//! ```
//! use head_pose_control::{
//!     config::Config,
//!     ingest::{Detection, FrameStamp, Landmark},
//!     pipeline::SteeringPipeline,
//! };
//! use std::time::Duration;
//!
//! let mut config = Config::default();
//! config.ingest.landmark_index = 0;
//!
//! let mut pipeline = SteeringPipeline::steering(&config);
//! let epoch = pipeline.start_session();
//!
//! // Sampling cadence: once per new video frame
//! let stamp = FrameStamp(Duration::from_millis(33));
//! if pipeline.accept_frame(stamp) {
//!     let detection = Detection::single(vec![Landmark::new(0.5, 0.5)]);
//!     pipeline.ingest_for_epoch(epoch, &detection, Duration::from_millis(40));
//! }
//!
//! // Game tick: commit whatever heading is pending
//! if let Some(output) = pipeline.resolve(&(), Duration::from_millis(150)) {
//!     println!("{output:?}");
//! }
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

/// Monotonic time source
pub mod clock;

/// Pose sample extraction from landmark detections
pub mod ingest;

/// Neutral point calibration
pub mod calibration;

/// Signal filtering for smoothing the tracked position
pub mod filters;

/// Direction classification with dead zones
pub mod direction;

/// Control policies for continuous and discrete consumers
pub mod control;

/// Play session state machine
pub mod session;

/// End-to-end control pipeline
pub mod pipeline;

/// Landmark trace files and offline replay
pub mod trace;

pub use error::{Error, Result};
