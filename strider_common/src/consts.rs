//! System-wide constants for the Strider workspace.
//!
//! Single source of truth for numeric limits, default paths and
//! well-known dashboard keys.

/// Maximum number of subsystems a scheduler can arbitrate.
///
/// Requirement sets are packed into a `u64`, one bit per subsystem.
pub const MAX_SUBSYSTEMS: usize = 64;

/// Default control-loop period in milliseconds (50 Hz).
pub const DEFAULT_CYCLE_PERIOD_MS: u64 = 20;

/// Upper bound accepted for the control-loop period.
pub const MAX_CYCLE_PERIOD_MS: u64 = 1000;

/// Nominal lower bound of an analog axis or motor output.
pub const OUTPUT_MIN: f64 = -1.0;

/// Nominal upper bound of an analog axis or motor output.
pub const OUTPUT_MAX: f64 = 1.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/robot.toml";

/// Dashboard key holding the autonomous routine selection.
pub const AUTO_SELECT_KEY: &str = "Auto Select";
