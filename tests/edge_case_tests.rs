//! Edge case tests for ingestion, smoothing and control policies


use head_pose_control::{
    config::{Config, SteeringConfig},
    control::{BallState, ControlOutput, ControlPolicy, PaddlePolicy, PoseSignal, SteeringPolicy},
    direction::Direction,
    filters::SmoothedPosition,
    ingest::{Detection, Landmark, PoseIngestor},
    pipeline::{IngestOutcome, PaddlePipeline, SteeringPipeline},
};
use test_helpers::{face_at, ms, test_config};

#[test]
fn test_extreme_landmark_values() {
    let mut pipeline = PaddlePipeline::paddle(&test_config());
    pipeline.start_session();

    let values = vec![
        (f64::NAN, 0.5),
        (0.5, f64::INFINITY),
        (f64::NEG_INFINITY, f64::NAN),
    ];
    for (x, y) in values {
        assert_eq!(pipeline.ingest(&face_at(x, y), ms(0)), IngestOutcome::NoFace);
    }
    assert!(pipeline.neutral().is_none());

    // Finite values outside [0, 1] are clamped, not dropped
    let outcome = pipeline.ingest(&face_at(1e100, -1e100), ms(1));
    assert!(matches!(outcome, IngestOutcome::Accepted { sample, .. } if sample.x == 1.0 && sample.y == 0.0));
}

#[test]
fn test_multiple_faces_use_first() {
    let ingestor = PoseIngestor::new(0, true);
    let detection = Detection {
        faces: vec![vec![Landmark::new(0.2, 0.3)], vec![Landmark::new(0.8, 0.9)]],
    };

    let sample = ingestor.extract(&detection, ms(5)).unwrap();
    assert_eq!((sample.x, sample.y), (0.2, 0.3));
}

#[test]
fn test_default_landmark_index_needs_full_mesh() {
    let mut pipeline = SteeringPipeline::steering(&Config::default());
    pipeline.start_session();

    // A single-point face has no chin landmark at index 152
    assert_eq!(pipeline.ingest(&face_at(0.5, 0.5), ms(0)), IngestOutcome::NoFace);

    let mut mesh = vec![Landmark::new(0.0, 0.0); 468];
    mesh[152] = Landmark::new(0.45, 0.8);
    let outcome = pipeline.ingest(&Detection::single(mesh), ms(10));
    assert!(matches!(outcome, IngestOutcome::Accepted { calibrated: true, .. }));
}

#[test]
fn test_out_of_order_sample_does_not_calibrate() {
    let mut pipeline = SteeringPipeline::steering(&test_config());
    pipeline.start_session();

    pipeline.ingest(&face_at(0.5, 0.5), ms(100));
    assert_eq!(pipeline.ingest(&face_at(0.9, 0.9), ms(50)), IngestOutcome::OutOfOrder);
    assert_eq!(pipeline.history_len(), 1);
}

#[test]
fn test_resolve_with_stale_history() {
    let mut pipeline = SteeringPipeline::steering(&test_config());
    pipeline.start_session();
    pipeline.ingest(&face_at(0.5, 0.5), ms(0));

    // Long after the window, nothing left to average
    assert!(pipeline.signal(ms(10_000)).is_none());
    assert_eq!(pipeline.resolve(&(), ms(10_000)), None);
    assert_eq!(pipeline.history_len(), 0);
}

#[test]
fn test_zero_dead_zone_reacts_to_any_deviation() {
    let mut policy = SteeringPolicy::new(&SteeringConfig {
        horizontal_dead_zone: 0.0,
        vertical_dead_zone: 0.0,
        ..SteeringConfig::default()
    });
    let signal = PoseSignal {
        average: SmoothedPosition {
            x: 0.5,
            y: 0.5001,
            samples: 1,
        },
        neutral: Some(head_pose_control::calibration::NeutralPosition { x: 0.5, y: 0.5 }),
        session_active: true,
    };

    policy.observe(&signal);
    assert_eq!(policy.pending(), Some(Direction::Down));
}

#[test]
fn test_ball_without_horizontal_motion_gets_no_assist() {
    let mut config = test_config();
    config.paddle.easing = 1.0;
    let policy = PaddlePolicy::new(&config.paddle);
    let signal = PoseSignal {
        average: SmoothedPosition {
            x: 0.25,
            y: 0.5,
            samples: 4,
        },
        neutral: Some(head_pose_control::calibration::NeutralPosition { x: 0.5, y: 0.5 }),
        session_active: true,
    };
    let ball = BallState {
        x: 100.0,
        dx: 0.0,
        dy: 3.0,
    };

    assert_eq!(ball.required_direction(), None);
    assert_eq!(policy.target(&signal, &ball), policy.direct_target(0.25));
}

#[test]
fn test_inactive_signal_disables_assist() {
    let policy = PaddlePolicy::new(&test_config().paddle);
    let signal = PoseSignal {
        average: SmoothedPosition {
            x: 0.25,
            y: 0.5,
            samples: 4,
        },
        neutral: Some(head_pose_control::calibration::NeutralPosition { x: 0.5, y: 0.5 }),
        session_active: false,
    };
    let ball = BallState {
        x: 100.0,
        dx: 2.0,
        dy: 3.0,
    };

    assert!(!policy.aim_assist_applies(&signal, &ball));
}

#[test]
fn test_paddle_reset_on_new_session() {
    let mut config = test_config();
    config.paddle.easing = 1.0;
    let mut pipeline = PaddlePipeline::paddle(&config);
    pipeline.start_session();
    pipeline.ingest(&face_at(0.0, 0.5), ms(0));
    assert_eq!(
        pipeline.resolve(&BallState::default(), ms(0)),
        Some(ControlOutput::TargetPosition { x: 700.0 })
    );

    pipeline.start_session();
    assert_eq!(pipeline.policy().position(), 350.0);
}
