//! # Strider Robot Library
//!
//! Command-based robot built on `strider_command`: six subsystems, their
//! teleop default commands, autonomous commands and routines, and a mode
//! machine that runs a full match against simulated hardware.
//!
//! # Module Structure
//!
//! - [`config`] - `robot.toml` sections and validation
//! - [`subsystems`] - Drivetrain, collector, shooter, hopper, climber, stats
//! - [`commands`] - Teleop default commands and autonomous commands
//! - [`routine`] - Autonomous routine selection
//! - [`container`] - Subsystem registration and default-command wiring
//! - [`mode`] - Disabled / Autonomous / Teleop / EStop transitions
//! - [`robot`] - Per-tick driver tying the above together
//! - [`sim`] - Simulated motors, gyro and controllers
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        strider_robot                         │
//! │  ┌────────────┐    ┌──────────────┐    ┌─────────────────┐   │
//! │  │ CycleRunner│───►│    Robot     │───►│ RobotContainer  │   │
//! │  │ (pacing)   │    │ (mode, match)│    │ (wiring)        │   │
//! │  └────────────┘    └──────┬───────┘    └────────┬────────┘   │
//! │                           │ run()               │ register   │
//! │                           ▼                     ▼            │
//! │                    ┌──────────────────────────────────┐      │
//! │                    │   strider_command::Scheduler     │      │
//! │                    └──────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod container;
pub mod error;
pub mod mode;
pub mod robot;
pub mod routine;
pub mod sim;
pub mod subsystems;

pub use crate::config::RobotConfig;
pub use crate::container::{Hardware, RobotContainer};
pub use crate::error::RobotError;
pub use crate::mode::{ModeEvent, RobotMode};
pub use crate::robot::Robot;
pub use crate::routine::{AutoRoutine, RoutineSelector};
