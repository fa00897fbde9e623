//! Robot mode transitions.
//!
//! Disabled → Autonomous → Teleop → Disabled, plus Disabled ↔ Teleop for
//! practice, and EStop from anywhere. EStop is terminal.

use std::fmt;

/// Driver-station mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotMode {
    #[default]
    Disabled,
    Autonomous,
    Teleop,
    /// Emergency stop; only a restart leaves it.
    EStop,
}

impl RobotMode {
    /// Whether the scheduler runs in this mode.
    #[inline]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Autonomous | Self::Teleop)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Autonomous => "autonomous",
            Self::Teleop => "teleop",
            Self::EStop => "estop",
        }
    }
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event that can change the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    EnableAutonomous,
    EnableTeleop,
    Disable,
    EmergencyStop,
}

/// Result of a mode transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition succeeded: new mode.
    Ok(RobotMode),
    /// Transition rejected: reason.
    Rejected(&'static str),
}

/// Holds the current mode and applies the transition table.
#[derive(Debug, Clone, Default)]
pub struct ModeStateMachine {
    mode: RobotMode,
}

impl ModeStateMachine {
    pub const fn new() -> Self {
        Self {
            mode: RobotMode::Disabled,
        }
    }

    #[inline]
    pub const fn mode(&self) -> RobotMode {
        self.mode
    }

    pub fn handle_event(&mut self, event: ModeEvent) -> TransitionResult {
        use ModeEvent::*;
        use RobotMode::*;

        let next = match (self.mode, event) {
            (EStop, _) => return TransitionResult::Rejected("emergency stop is latched"),
            (_, EmergencyStop) => EStop,

            (Disabled, EnableAutonomous) => Autonomous,
            (Disabled, EnableTeleop) => Teleop,
            (Autonomous, EnableTeleop) => Teleop,
            (Autonomous | Teleop, Disable) => Disabled,

            (Disabled, Disable) => return TransitionResult::Rejected("already disabled"),
            (Autonomous, EnableAutonomous) => return TransitionResult::Rejected("already in autonomous"),
            (Teleop, EnableTeleop) => return TransitionResult::Rejected("already in teleop"),
            (Teleop, EnableAutonomous) => {
                return TransitionResult::Rejected("autonomous must start from disabled");
            }
        };

        self.mode = next;
        TransitionResult::Ok(next)
    }
}
