//! # Strider Robot Binary
//!
//! Runs one simulated match: autonomous, then teleop, then disabled.
//!
//! # Usage
//!
//! ```bash
//! # Full match with the routine from config/robot.toml
//! strider_robot --config config/robot.toml
//!
//! # Pick the autonomous routine, stop after 1000 ticks
//! strider_robot --auto mid --ticks 1000
//!
//! # Teleop only, verbose JSON logs
//! strider_robot --teleop-only -v --json
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use clap::Parser;
use strider_command::cycle::CycleRunner;
use strider_common::config::{ConfigError, ConfigLoader, LogLevel};
use strider_common::consts::{AUTO_SELECT_KEY, DEFAULT_CONFIG_PATH};
use strider_common::io::dashboard::{Dashboard, MemoryDashboard};
use strider_robot::sim::SimRobot;
use strider_robot::{Robot, RobotConfig, RobotError};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Strider - command-based robot running against simulated hardware
#[derive(Parser, Debug)]
#[command(name = "strider_robot")]
#[command(version)]
#[command(about = "Command-based robot running a simulated match")]
#[command(long_about = None)]
struct Args {
    /// Path to robot.toml. Defaults to config/robot.toml when present.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Autonomous routine key (right, mid, left). Overrides the config.
    #[arg(short, long, value_name = "KEY")]
    auto: Option<String>,

    /// Skip autonomous and start in teleop.
    #[arg(long)]
    teleop_only: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("FATAL: {e}");
        eprintln!("strider_robot: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (config, source) = load_config(args.config.as_deref())?;
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    setup_tracing(&args, config.shared.log_level);
    info!(
        "Strider robot v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );
    match &source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => warn!("No config file found; using defaults"),
    }

    let sim = SimRobot::new();
    let dashboard = Arc::new(MemoryDashboard::new());
    let routine = args
        .auto
        .as_deref()
        .unwrap_or(&config.autonomous.default_routine);
    dashboard.put_string(AUTO_SELECT_KEY, routine);

    let hardware = sim.hardware(config.controllers.driver_port, config.controllers.operator_port);
    let mut robot = Robot::new(&config, hardware, dashboard.clone())?;

    let mut runner = CycleRunner::new(config.period()).map_err(RobotError::from)?;
    if let Some(ticks) = args.ticks {
        runner = runner.with_limit(ticks);
    }

    let running = runner.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    if args.teleop_only {
        robot.start_teleop()?;
    } else {
        robot.start_match()?;
    }

    let stop = runner.running_flag();
    let period = config.period();
    let mut failure: Option<RobotError> = None;
    runner.run(|_| {
        if let Err(e) = robot.tick() {
            error!("tick failed: {e}");
            failure = Some(e);
            stop.store(false, Ordering::SeqCst);
            return;
        }
        sim.step(period);
        if robot.match_over() {
            stop.store(false, Ordering::SeqCst);
        }
    });

    let stats = runner.stats();
    info!(
        cycles = stats.cycle_count,
        overruns = stats.overruns,
        avg_us = stats.avg_cycle_ns() / 1_000,
        max_us = stats.max_cycle_ns / 1_000,
        mode = %robot.mode(),
        heading = dashboard.get_number("Heading", 0.0),
        "Strider robot shutdown complete"
    );

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Explicit path must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<(RobotConfig, Option<PathBuf>), ConfigError> {
    match path {
        Some(path) => Ok((RobotConfig::load(path)?, Some(path.to_path_buf()))),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Ok((RobotConfig::load(default)?, Some(default.to_path_buf())))
            } else {
                Ok((RobotConfig::default(), None))
            }
        }
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        log_level.as_filter().parse().unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
