//! Subsystem identity, requirement sets and the per-subsystem claim slot.
//!
//! A subsystem is an exclusive resource. Its [`SubsystemSlot`] records which
//! command currently holds it and which command runs when nobody does.
//! Claims follow the same acquire/release discipline as an axis source lock:
//! acquiring succeeds only when the slot is free or already held by the
//! caller, and releasing only succeeds for the holder.

use bitflags::bitflags;
use strider_common::consts::MAX_SUBSYSTEMS;

use crate::command::CommandId;

/// Dense handle of a registered subsystem, stable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsystemId(u8);

impl SubsystemId {
    /// Caller guarantees `index < MAX_SUBSYSTEMS`.
    pub(crate) const fn new(index: u8) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subsystem#{}", self.0)
    }
}

bitflags! {
    /// Set of subsystems a command needs exclusive access to.
    ///
    /// One bit per [`SubsystemId`]; fixed once a command is constructed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Requirements: u64 {
        const _ = !0;
    }
}

impl Requirements {
    /// Requirement on a single subsystem.
    #[inline]
    pub const fn of(id: SubsystemId) -> Self {
        Self::from_bits_retain(1u64 << id.0)
    }

    /// This set plus `id`.
    #[inline]
    pub const fn with(self, id: SubsystemId) -> Self {
        Self::from_bits_retain(self.bits() | (1u64 << id.0))
    }

    #[inline]
    pub const fn requires(&self, id: SubsystemId) -> bool {
        self.bits() & (1u64 << id.0) != 0
    }

    /// Member ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = SubsystemId> {
        let bits = self.bits();
        (0..MAX_SUBSYSTEMS as u8)
            .filter(move |i| bits & (1u64 << i) != 0)
            .map(SubsystemId)
    }

    /// Number of required subsystems.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.bits().count_ones()
    }

    /// Highest required index, if any.
    pub const fn highest(&self) -> Option<SubsystemId> {
        if self.is_empty() {
            None
        } else {
            Some(SubsystemId((63 - self.bits().leading_zeros()) as u8))
        }
    }
}

impl Default for Requirements {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<SubsystemId> for Requirements {
    fn from_iter<I: IntoIterator<Item = SubsystemId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Scheduler-side state of one subsystem.
#[derive(Debug, Clone)]
pub struct SubsystemSlot {
    name: String,
    /// Command presently holding the subsystem (default command included).
    claimant: Option<CommandId>,
    /// Command run when nothing else claims the subsystem.
    default_command: Option<CommandId>,
}

impl SubsystemSlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            claimant: None,
            default_command: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn claimant(&self) -> Option<CommandId> {
        self.claimant
    }

    #[inline]
    pub const fn default_command(&self) -> Option<CommandId> {
        self.default_command
    }

    #[inline]
    pub const fn is_claimed(&self) -> bool {
        self.claimant.is_some()
    }

    /// True if `command` may take the subsystem without preempting anyone.
    #[inline]
    pub fn is_available_to(&self, command: CommandId) -> bool {
        match self.claimant {
            None => true,
            Some(holder) => holder == command,
        }
    }

    /// Claim for `command`. Returns `false` if another command holds it.
    pub fn acquire(&mut self, command: CommandId) -> bool {
        if self.is_available_to(command) {
            self.claimant = Some(command);
            true
        } else {
            false
        }
    }

    /// Release the claim, only if held by `command`.
    pub fn release(&mut self, command: CommandId) -> bool {
        if self.claimant == Some(command) {
            self.claimant = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_default(&mut self, command: CommandId) {
        self.default_command = Some(command);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
