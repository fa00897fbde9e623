//! The cooperative command scheduler.
//!
//! Owns every registered command, the subsystem claim table and the trigger
//! bindings. Driven by one [`Scheduler::run`] call per control-loop tick.
//!
//! ## Tick phases (fixed order)
//!
//! 1. **Triggers**: poll every binding; fired commands are admitted.
//! 2. **Default backfill**: every unclaimed subsystem gets its default
//!    command admitted.
//! 3. **Execute**: in admission order: `initialize()` if pending,
//!    `execute()`, and if `is_finished()` then `end(false)` and release.
//!
//! ## Arbitration
//!
//! Admission is last-scheduled-wins. Every current holder of a required
//! subsystem is ended with `end(true)` and loses *all* of its claims before
//! the newcomer claims. The only exception is a non-default holder whose
//! `interruptible()` is false: then the newcomer is rejected. Neither case
//! is an error.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use strider_common::consts::MAX_SUBSYSTEMS;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandId, CommandState};
use crate::error::ConfigError;
use crate::subsystem::{Requirements, SubsystemId, SubsystemSlot};
use crate::trigger::{Binding, Trigger};

/// Scheduler behind one coarse lock, for hosts that tick from another
/// thread. Hold the lock for the whole `run()` call.
pub type SharedScheduler = Arc<Mutex<Scheduler>>;

/// Result of admitting a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Admitted; holds its requirements and initializes on the next run.
    Scheduled,
    /// Already scheduled; nothing changed.
    AlreadyScheduled,
    /// A non-interruptible command holds a required subsystem.
    Rejected {
        subsystem: SubsystemId,
        held_by: CommandId,
    },
}

/// Whether the scheduler keeps a command after it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifetime {
    /// Reusable instance (default and trigger-bound commands).
    Registered,
    /// Discarded when it ends.
    OneShot,
}

struct CommandEntry {
    command: Box<dyn Command>,
    requirements: Requirements,
    /// `None` until first scheduled.
    state: Option<CommandState>,
    lifetime: Lifetime,
    default_for: Option<SubsystemId>,
}

impl CommandEntry {
    #[inline]
    fn is_scheduled(&self) -> bool {
        self.state.is_some_and(|s| s.is_scheduled())
    }
}

/// Tick-driven command scheduler.
pub struct Scheduler {
    subsystems: Vec<SubsystemSlot>,
    commands: HashMap<CommandId, CommandEntry>,
    /// Scheduled commands in admission order.
    scheduled: Vec<CommandId>,
    bindings: Vec<Binding>,
    next_id: u64,
    tick: u64,
    enabled: bool,
}

assert_impl_all!(Scheduler: Send);

impl Scheduler {
    pub fn new() -> Self {
        Self {
            subsystems: Vec::new(),
            commands: HashMap::new(),
            scheduled: Vec::new(),
            bindings: Vec::new(),
            next_id: 1,
            tick: 0,
            enabled: true,
        }
    }

    /// Move into a [`SharedScheduler`].
    pub fn into_shared(self) -> SharedScheduler {
        Arc::new(Mutex::new(self))
    }

    // ─── Registration ───────────────────────────────────────────────

    /// Register a subsystem under a unique name.
    pub fn register_subsystem(&mut self, name: impl Into<String>) -> Result<SubsystemId, ConfigError> {
        let name = name.into();
        if self.subsystems.iter().any(|s| s.name() == name) {
            return Err(ConfigError::DuplicateSubsystem(name));
        }
        if self.subsystems.len() >= MAX_SUBSYSTEMS {
            return Err(ConfigError::SubsystemLimit {
                limit: MAX_SUBSYSTEMS,
            });
        }

        let id = SubsystemId::new(self.subsystems.len() as u8);
        debug!(subsystem = %name, index = id.index(), "subsystem registered");
        self.subsystems.push(SubsystemSlot::new(name));
        Ok(id)
    }

    /// Bind the command a subsystem runs when nothing else claims it.
    ///
    /// # Errors
    /// - `UnknownSubsystem` for an unregistered id.
    /// - `DuplicateDefault` if the subsystem already has one.
    /// - `DefaultRequirementMismatch` unless the command requires exactly
    ///   this subsystem.
    pub fn register_default_command(
        &mut self,
        subsystem: SubsystemId,
        command: Box<dyn Command>,
    ) -> Result<CommandId, ConfigError> {
        let Some(slot) = self.subsystems.get(subsystem.index()) else {
            return Err(ConfigError::UnknownSubsystem {
                command: command.name().to_string(),
                index: subsystem.index() as u8,
            });
        };
        if let Some(existing) = slot.default_command() {
            return Err(ConfigError::DuplicateDefault {
                subsystem: slot.name().to_string(),
                existing: self.command_name(existing).unwrap_or_default().to_string(),
            });
        }
        if command.requirements() != Requirements::of(subsystem) {
            return Err(ConfigError::DefaultRequirementMismatch {
                subsystem: slot.name().to_string(),
                command: command.name().to_string(),
            });
        }

        let name = command.name().to_string();
        let id = self.insert(command, Lifetime::Registered, Some(subsystem))?;
        self.subsystems[subsystem.index()].set_default(id);
        info!(subsystem = %self.subsystems[subsystem.index()].name(), command = %name, "default command bound");
        Ok(id)
    }

    /// Keep a reusable command instance without scheduling it.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<CommandId, ConfigError> {
        self.insert(command, Lifetime::Registered, None)
    }

    /// Bind a trigger to a registered command.
    pub fn bind(&mut self, trigger: Trigger, command: CommandId) -> Result<(), ConfigError> {
        match self.commands.get(&command) {
            Some(entry) if entry.lifetime == Lifetime::Registered => {
                self.bindings.push(Binding { trigger, command });
                Ok(())
            }
            _ => Err(ConfigError::UnknownCommand(command.raw())),
        }
    }

    /// Register `command` and bind `trigger` to it.
    pub fn bind_new(&mut self, trigger: Trigger, command: Box<dyn Command>) -> Result<CommandId, ConfigError> {
        let id = self.register(command)?;
        self.bind(trigger, id)?;
        Ok(id)
    }

    fn insert(
        &mut self,
        command: Box<dyn Command>,
        lifetime: Lifetime,
        default_for: Option<SubsystemId>,
    ) -> Result<CommandId, ConfigError> {
        let requirements = command.requirements();
        if let Some(highest) = requirements.highest() {
            if highest.index() >= self.subsystems.len() {
                return Err(ConfigError::UnknownSubsystem {
                    command: command.name().to_string(),
                    index: highest.index() as u8,
                });
            }
        }

        let id = CommandId::new(self.next_id);
        self.next_id += 1;
        self.commands.insert(
            id,
            CommandEntry {
                command,
                requirements,
                state: None,
                lifetime,
                default_for,
            },
        );
        Ok(id)
    }

    // ─── Scheduling ─────────────────────────────────────────────────

    /// Admit a one-shot command; it is discarded once it ends.
    ///
    /// A rejected one-shot command is discarded immediately.
    pub fn schedule(&mut self, command: Box<dyn Command>) -> Result<(CommandId, ScheduleOutcome), ConfigError> {
        let id = self.insert(command, Lifetime::OneShot, None)?;
        let outcome = self.admit(id)?;
        if outcome != ScheduleOutcome::Scheduled {
            self.commands.remove(&id);
        }
        Ok((id, outcome))
    }

    /// Admit a previously registered command.
    pub fn schedule_registered(&mut self, id: CommandId) -> Result<ScheduleOutcome, ConfigError> {
        self.admit(id)
    }

    fn admit(&mut self, id: CommandId) -> Result<ScheduleOutcome, ConfigError> {
        let Some(entry) = self.commands.get(&id) else {
            return Err(ConfigError::UnknownCommand(id.raw()));
        };
        if entry.is_scheduled() {
            return Ok(ScheduleOutcome::AlreadyScheduled);
        }
        let requirements = entry.requirements;

        let mut holders: Vec<CommandId> = Vec::new();
        for subsystem in requirements.ids() {
            let Some(holder) = self.subsystems[subsystem.index()].claimant() else {
                continue;
            };
            if holders.contains(&holder) {
                continue;
            }
            if let Some(held) = self.commands.get(&holder) {
                if held.default_for.is_none() && !held.command.interruptible() {
                    warn!(
                        command = %entry.command.name(),
                        held_by = %held.command.name(),
                        subsystem = %self.subsystems[subsystem.index()].name(),
                        "schedule rejected: holder is not interruptible"
                    );
                    return Ok(ScheduleOutcome::Rejected {
                        subsystem,
                        held_by: holder,
                    });
                }
            }
            holders.push(holder);
        }

        for holder in holders {
            debug!(
                preempted = %self.command_name(holder).unwrap_or_default(),
                by = %self.command_name(id).unwrap_or_default(),
                "preempting"
            );
            self.retire(holder, true);
        }

        for subsystem in requirements.ids() {
            let acquired = self.subsystems[subsystem.index()].acquire(id);
            debug_assert!(acquired, "{subsystem} still claimed after preemption");
        }
        if let Some(entry) = self.commands.get_mut(&id) {
            entry.state = Some(CommandState::Pending);
            debug!(command = %entry.command.name(), tick = self.tick, "scheduled");
        }
        self.scheduled.push(id);
        Ok(ScheduleOutcome::Scheduled)
    }

    /// Interrupt a scheduled command. Returns `false` if it was not
    /// scheduled.
    pub fn cancel(&mut self, id: CommandId) -> bool {
        let scheduled = self.commands.get(&id).is_some_and(CommandEntry::is_scheduled);
        if scheduled {
            debug!(command = %self.command_name(id).unwrap_or_default(), "cancelled");
            self.retire(id, true);
        }
        scheduled
    }

    /// Interrupt every scheduled command, in admission order.
    pub fn cancel_all(&mut self) {
        for id in self.scheduled.clone() {
            self.retire(id, true);
        }
    }

    /// End a scheduled command and release everything it holds.
    ///
    /// `end` only runs if the command was initialized this episode.
    fn retire(&mut self, id: CommandId, interrupted: bool) {
        let Some(entry) = self.commands.get_mut(&id) else {
            return;
        };
        let Some(state) = entry.state.filter(CommandState::is_scheduled) else {
            return;
        };
        if state.is_initialized() {
            entry.command.end(interrupted);
        }
        entry.state = Some(CommandState::Finished);
        let requirements = entry.requirements;
        let lifetime = entry.lifetime;

        for subsystem in requirements.ids() {
            self.subsystems[subsystem.index()].release(id);
        }
        self.scheduled.retain(|c| *c != id);
        if lifetime == Lifetime::OneShot {
            self.commands.remove(&id);
        }
    }

    // ─── Tick ───────────────────────────────────────────────────────

    /// Run one tick: triggers, default backfill, execute/retire.
    ///
    /// Never blocks. While disabled only the tick counter advances.
    pub fn run(&mut self) {
        self.tick += 1;
        if !self.enabled {
            return;
        }

        self.poll_triggers();
        self.backfill_defaults();

        for id in self.scheduled.clone() {
            let Some(entry) = self.commands.get_mut(&id) else {
                continue;
            };
            let Some(state) = entry.state.filter(CommandState::is_scheduled) else {
                continue;
            };
            if state == CommandState::Pending {
                entry.command.initialize();
                entry.state = Some(CommandState::Initialized);
            }
            entry.command.execute();
            entry.state = Some(CommandState::Running);

            if entry.command.is_finished() {
                debug!(command = %entry.command.name(), tick = self.tick, "finished");
                self.retire(id, false);
            }
        }
    }

    fn poll_triggers(&mut self) {
        let fired: Vec<CommandId> = self
            .bindings
            .iter_mut()
            .filter_map(|b| b.trigger.poll().then_some(b.command))
            .collect();

        for id in fired {
            if let Err(e) = self.admit(id) {
                warn!("trigger binding skipped: {e}");
            }
        }
    }

    fn backfill_defaults(&mut self) {
        for index in 0..self.subsystems.len() {
            let slot = &self.subsystems[index];
            if slot.is_claimed() {
                continue;
            }
            let Some(default) = slot.default_command() else {
                continue;
            };
            if let Err(e) = self.admit(default) {
                warn!("default command skipped: {e}");
            }
        }
    }

    /// Enable or disable the scheduler. Disabling cancels everything and
    /// suspends triggers and default backfill until re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.enabled {
            self.cancel_all();
        }
        if enabled != self.enabled {
            info!(enabled, "scheduler state changed");
        }
        self.enabled = enabled;
    }

    // ─── Queries ────────────────────────────────────────────────────

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ticks run since construction.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_scheduled(&self, id: CommandId) -> bool {
        self.commands.get(&id).is_some_and(CommandEntry::is_scheduled)
    }

    /// Lifecycle state; `None` for unknown, discarded or never-scheduled
    /// commands.
    pub fn state(&self, id: CommandId) -> Option<CommandState> {
        self.commands.get(&id).and_then(|e| e.state)
    }

    /// Scheduled commands in admission (execution) order.
    pub fn scheduled(&self) -> &[CommandId] {
        &self.scheduled
    }

    #[inline]
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Requirement set captured when the command was registered.
    pub fn requirements(&self, id: CommandId) -> Option<Requirements> {
        self.commands.get(&id).map(|e| e.requirements)
    }

    pub fn command_name(&self, id: CommandId) -> Option<&str> {
        self.commands.get(&id).map(|e| e.command.name())
    }

    /// Command currently holding `subsystem`.
    pub fn claimant(&self, subsystem: SubsystemId) -> Option<CommandId> {
        self.subsystems.get(subsystem.index()).and_then(SubsystemSlot::claimant)
    }

    pub fn default_command(&self, subsystem: SubsystemId) -> Option<CommandId> {
        self.subsystems
            .get(subsystem.index())
            .and_then(SubsystemSlot::default_command)
    }

    pub fn subsystem_name(&self, subsystem: SubsystemId) -> Option<&str> {
        self.subsystems.get(subsystem.index()).map(SubsystemSlot::name)
    }

    pub fn subsystem_id(&self, name: &str) -> Option<SubsystemId> {
        self.subsystems
            .iter()
            .position(|s| s.name() == name)
            .map(|i| SubsystemId::new(i as u8))
    }

    pub fn subsystem_count(&self) -> usize {
        self.subsystems.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tick", &self.tick)
            .field("enabled", &self.enabled)
            .field("subsystems", &self.subsystems)
            .field("scheduled", &self.scheduled)
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
