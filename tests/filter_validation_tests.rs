//! Tests for filter and policy parameter validation

use head_pose_control::{
    config::{Config, PaddleConfig},
    control::PaddlePolicy,
    filters::{Easing, TimeWindowAverage},
    pipeline::PaddlePipeline,
    trace::{replay_steering, TraceEvent, TraceRecord},
};
use std::time::Duration;

#[test]
#[should_panic(expected = "Window must be greater than 0")]
fn test_time_window_zero_window() {
    let _ = TimeWindowAverage::new(Duration::ZERO);
}

#[test]
#[should_panic(expected = "Easing factor must be in (0, 1]")]
fn test_easing_zero_factor() {
    let _ = Easing::new(0.0);
}

#[test]
#[should_panic(expected = "Easing factor must be in (0, 1]")]
fn test_easing_too_large_factor() {
    let _ = Easing::new(1.5);
}

#[test]
#[should_panic(expected = "Easing factor must be in (0, 1]")]
fn test_paddle_policy_rejects_bad_easing() {
    let _ = PaddlePolicy::new(&PaddleConfig {
        easing: -0.2,
        ..PaddleConfig::default()
    });
}

#[test]
fn test_config_validation() {
    let cases: Vec<(&str, Box<dyn Fn(&mut Config)>)> = vec![
        ("zero paddle window", Box::new(|c| c.paddle.window_ms = 0)),
        ("zero steering window", Box::new(|c| c.steering.window_ms = 0)),
        ("easing above one", Box::new(|c| c.paddle.easing = 1.5)),
        ("negative dead zone", Box::new(|c| c.paddle.dead_zone = -0.01)),
        ("huge dead zone", Box::new(|c| c.steering.horizontal_dead_zone = 0.5)),
        ("NaN dead zone", Box::new(|c| c.steering.vertical_dead_zone = f64::NAN)),
        ("zero canvas", Box::new(|c| c.paddle.canvas_width = 0.0)),
        ("paddle wider than canvas", Box::new(|c| c.paddle.paddle_width = 1000.0)),
        ("zero tick", Box::new(|c| c.steering.tick_ms = 0)),
    ];

    for (name, mutate) in cases {
        let mut config = Config::default();
        mutate(&mut config);
        assert!(config.validate().is_err(), "{name} should fail validation");
    }

    // Valid edge values should work
    let mut config = Config::default();
    config.paddle.easing = 1.0;
    config.paddle.dead_zone = 0.0;
    config.steering.window_ms = 1;
    assert!(config.validate().is_ok());
}

#[test]
#[should_panic(expected = "Paddle width must be positive and narrower than the canvas")]
fn test_paddle_wider_than_canvas() {
    let _ = PaddlePolicy::new(&PaddleConfig {
        paddle_width: 900.0,
        ..PaddleConfig::default()
    });
}

#[test]
#[should_panic(expected = "Paddle width must be positive and narrower than the canvas")]
fn test_paddle_nan_width() {
    let _ = PaddlePolicy::new(&PaddleConfig {
        paddle_width: f64::NAN,
        ..PaddleConfig::default()
    });
}

#[test]
#[should_panic(expected = "Paddle width must be positive and narrower than the canvas")]
fn test_paddle_pipeline_rejects_bad_geometry() {
    let mut config = Config::default();
    config.paddle.paddle_width = config.paddle.canvas_width;
    let _ = PaddlePipeline::paddle(&config);
}

#[test]
#[should_panic(expected = "Tick period must be greater than 0")]
fn test_steering_replay_zero_tick() {
    let mut config = Config::default();
    config.steering.tick_ms = 0;
    let records = vec![TraceRecord {
        time_ms: 0.0,
        frame_ms: None,
        landmarks: None,
        ball: None,
        event: Some(TraceEvent::Start),
    }];
    let _ = replay_steering(&config, &records);
}
