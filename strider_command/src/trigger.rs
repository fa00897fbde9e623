//! Trigger bindings.
//!
//! A trigger is a boolean condition over live input, polled once per tick at
//! the start of `Scheduler::run`. When it fires, its bound command is
//! scheduled unless already running.

use strider_common::io::controller::ButtonSupplier;

use crate::command::CommandId;

/// When a trigger schedules its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Every tick the condition holds (re-schedules after the command ends
    /// or is preempted while the condition stays true).
    #[default]
    WhileTrue,
    /// Only on the tick the condition goes from false to true.
    OnRising,
}

/// A condition paired with the mode it fires in.
pub struct Trigger {
    condition: ButtonSupplier,
    mode: TriggerMode,
    previous: bool,
}

impl Trigger {
    /// Fires every tick `condition` is true.
    pub fn new(condition: impl Fn() -> bool + Send + 'static) -> Self {
        Self::with_mode(condition, TriggerMode::WhileTrue)
    }

    /// Fires on each false→true transition of `condition`.
    pub fn on_rising(condition: impl Fn() -> bool + Send + 'static) -> Self {
        Self::with_mode(condition, TriggerMode::OnRising)
    }

    pub fn with_mode(condition: impl Fn() -> bool + Send + 'static, mode: TriggerMode) -> Self {
        Self {
            condition: Box::new(condition),
            mode,
            previous: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Evaluate the condition once; true if the bound command should be
    /// scheduled this tick.
    pub fn poll(&mut self) -> bool {
        let now = (self.condition)();
        let fire = match self.mode {
            TriggerMode::WhileTrue => now,
            TriggerMode::OnRising => now && !self.previous,
        };
        self.previous = now;
        fire
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("mode", &self.mode)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}

/// A trigger bound to a registered command.
#[derive(Debug)]
pub(crate) struct Binding {
    pub trigger: Trigger,
    pub command: CommandId,
}
