//! Replays recorded landmark traces through the head pose control pipeline.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use head_pose_control::{
    config::{Config, EXAMPLE_CONFIG},
    trace::{load_trace, replay_paddle, replay_steering},
};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Continuous horizontal paddle control
    Paddle,
    /// Discrete four-way steering
    Steering,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark trace to replay (JSON lines)
    #[arg(short, long, required_unless_present = "print_config")]
    trace: Option<String>,

    /// Control variant to drive
    #[arg(long, value_enum, default_value = "paddle")]
    variant: Variant,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override the smoothing window in milliseconds
    #[arg(short, long)]
    window_ms: Option<u64>,

    /// Disable paddle aim-assist
    #[arg(long)]
    no_aim_assist: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).with_context(|| format!("Failed to load config {path}"))?
        }
        None => Config::default(),
    };

    if let Some(window_ms) = args.window_ms {
        match args.variant {
            Variant::Paddle => config.paddle.window_ms = window_ms,
            Variant::Steering => config.steering.window_ms = window_ms,
        }
    }
    if args.no_aim_assist {
        config.paddle.aim_assist = false;
    }
    config.validate()?;

    let trace_path = args.trace.context("No trace file given")?;
    let records = load_trace(&trace_path).with_context(|| format!("Failed to load trace {trace_path}"))?;
    info!("Replaying {} records as {:?}", records.len(), args.variant);

    let steps = match args.variant {
        Variant::Paddle => replay_paddle(&config, &records),
        Variant::Steering => replay_steering(&config, &records),
    };

    for step in &steps {
        println!("{}", step.to_json_line()?);
    }
    info!("Produced {} control outputs", steps.len());

    Ok(())
}
