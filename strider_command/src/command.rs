//! Command model.
//!
//! A [`Command`] is a unit of work that needs exclusive access to a fixed set
//! of subsystems and is driven through a four-phase lifecycle by the
//! scheduler:
//!
//! ```text
//! Pending ──initialize()──► Initialized ──execute()──► Running ──is_finished()──► Finished
//!    ▲                                                    │
//!    └────────────── schedule again (registered) ◄────────┘ end(interrupted)
//! ```
//!
//! ## Contract
//!
//! - `initialize` runs exactly once per scheduling episode, before the first
//!   `execute`.
//! - `execute` runs once per tick while the command is scheduled.
//! - `is_finished` has no side effects and does not flap back to `false`.
//! - `end` runs exactly once per initialized episode, with
//!   `interrupted = true` on preemption or cancellation, and must zero any
//!   actuation regardless of the flag.
//!
//! No callback may block; long behavior spans many ticks.

pub mod basic;
pub mod timer;

use crate::subsystem::Requirements;

/// Scheduler-assigned handle of a command instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

impl CommandId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cmd#{}", self.0)
    }
}

/// Lifecycle state tracked by the scheduler for each command.
///
/// Between ticks a scheduled command is either `Pending` or `Running`.
/// `Initialized` only holds inside `Scheduler::run`, between a command's
/// `initialize()` and its first `execute()`; it is never observable from
/// outside a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandState {
    /// Admitted and holding its subsystems; not yet initialized.
    #[default]
    Pending,
    /// `initialize()` has run this episode; transient within a tick.
    Initialized,
    /// `execute()` has run at least once this episode.
    Running,
    /// Ended, naturally or by interruption.
    Finished,
}

impl CommandState {
    /// True while the command holds its requirements.
    #[inline]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self, Self::Pending | Self::Initialized | Self::Running)
    }

    /// True once `initialize()` has run and `end()` has not.
    #[inline]
    pub const fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }
}

/// A schedulable unit of work.
///
/// Primitive commands and groups both implement this trait; groups own their
/// children exclusively.
pub trait Command: Send {
    /// Human-readable name used in logs and telemetry.
    fn name(&self) -> &str;

    /// Subsystems this command holds while scheduled.
    fn requirements(&self) -> Requirements;

    fn initialize(&mut self) {}

    fn execute(&mut self) {}

    fn is_finished(&self) -> bool {
        false
    }

    fn end(&mut self, _interrupted: bool) {}

    /// Whether a newly scheduled conflicting command may preempt this one.
    fn interruptible(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("requirements", &self.requirements())
            .finish()
    }
}
