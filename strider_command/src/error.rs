//! Setup-time errors.
//!
//! Everything here is raised while subsystems, default commands and
//! compositions are being registered. Run-time conflicts are resolved by
//! preemption and reported through `ScheduleOutcome`, never as errors.

use thiserror::Error;

/// Invalid scheduler registration or command composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Subsystem name registered twice.
    #[error("subsystem '{0}' is already registered")]
    DuplicateSubsystem(String),

    /// No more subsystem ids available.
    #[error("subsystem limit of {limit} reached")]
    SubsystemLimit { limit: usize },

    /// Requirement refers to a subsystem the scheduler does not know.
    #[error("command '{command}' requires unregistered subsystem #{index}")]
    UnknownSubsystem { command: String, index: u8 },

    /// Second default command bound to the same subsystem.
    #[error("subsystem '{subsystem}' already has default command '{existing}'")]
    DuplicateDefault { subsystem: String, existing: String },

    /// Default command requirements are not exactly its subsystem.
    #[error("default command '{command}' must require exactly subsystem '{subsystem}'")]
    DefaultRequirementMismatch { subsystem: String, command: String },

    /// Two children of a parallel group need the same subsystem.
    #[error("parallel commands '{first}' and '{second}' require the same subsystem")]
    OverlappingRequirements { first: String, second: String },

    /// Command id not known to this scheduler.
    #[error("unknown command id {0}")]
    UnknownCommand(u64),
}
