//! Prelude module for common re-exports.
//!
//! ```rust
//! use strider_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{AUTO_SELECT_KEY, DEFAULT_CYCLE_PERIOD_MS, MAX_SUBSYSTEMS};

// ─── Hardware Boundary ──────────────────────────────────────────────
pub use crate::hal::gyro::Gyro;
pub use crate::hal::motor::{MotorController, clamp_output};

// ─── Inputs & Dashboard ─────────────────────────────────────────────
pub use crate::io::controller::{AxisSupplier, ButtonSupplier, Controller, sanitize_axis};
pub use crate::io::dashboard::{Dashboard, DashboardValue, MemoryDashboard};

/// Default control-loop period as Duration.
pub const DEFAULT_CYCLE_PERIOD: Duration = Duration::from_millis(DEFAULT_CYCLE_PERIOD_MS);
