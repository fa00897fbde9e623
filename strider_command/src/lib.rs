//! # Strider Command Library
//!
//! Cooperative, tick-driven command scheduler for robot control loops.
//! Commands declare which subsystems they need; the scheduler guarantees
//! that at most one scheduled command holds a subsystem at any time, runs
//! the command lifecycle (`initialize` → `execute`* → `end`) once per
//! tick, backfills idle subsystems with their default commands, and
//! admits commands from trigger bindings.
//!
//! ## Building Blocks
//!
//! 1. **Subsystem**: named exclusive resource, at most 64 per scheduler
//! 2. **Command**: unit of behavior with a requirement set
//! 3. **Group**: sequential and parallel composition of commands
//! 4. **Trigger**: boolean condition bound to a command
//! 5. **Scheduler**: claim table, lifecycle driver, default backfill
//!
//! Everything is single-threaded. Hosts that tick from another thread
//! share the scheduler as a [`scheduler::SharedScheduler`].

pub mod command;
pub mod cycle;
pub mod error;
pub mod group;
pub mod scheduler;
pub mod subsystem;
pub mod trigger;

pub use command::basic::{InstantCommand, RunCommand, WaitCommand};
pub use command::timer::TickTimer;
pub use command::{Command, CommandId, CommandState};
pub use error::ConfigError;
pub use group::{ParallelGroup, SequentialGroup};
pub use scheduler::{ScheduleOutcome, Scheduler, SharedScheduler};
pub use subsystem::{Requirements, SubsystemId};
pub use trigger::{Trigger, TriggerMode};
