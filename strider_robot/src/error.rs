//! Robot setup and runtime errors.

use strider_command::cycle::CycleError;
use thiserror::Error;

/// Anything that stops the robot from starting or changing mode.
#[derive(Debug, Error)]
pub enum RobotError {
    /// Bad `robot.toml`.
    #[error(transparent)]
    Config(#[from] strider_common::config::ConfigError),

    /// Invalid subsystem or command registration.
    #[error("scheduler setup failed: {0}")]
    Scheduler(#[from] strider_command::ConfigError),

    /// No controller plugged into a configured port.
    #[error("no controller on port {port}")]
    MissingController { port: u8 },

    #[error(transparent)]
    Cycle(#[from] CycleError),
}
