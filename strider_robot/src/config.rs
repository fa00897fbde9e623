//! Robot configuration (`robot.toml`).
//!
//! Every section is optional; missing fields fall back to the values the
//! robot was tuned with.
//!
//! ```toml
//! [shared]
//! service_name = "strider"
//!
//! [cycle]
//! period_ms = 20
//!
//! [match]
//! autonomous_secs = 15
//! teleop_secs = 135
//!
//! [autonomous]
//! default_routine = "right"
//!
//! [controllers]
//! driver_port = 0
//! operator_port = 1
//!
//! [speeds]
//! intake = 0.5
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strider_common::config::{ConfigError, SharedConfig};
use strider_common::consts::{DEFAULT_CYCLE_PERIOD_MS, MAX_CYCLE_PERIOD_MS};

/// Top-level robot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default, rename = "match")]
    pub match_timing: MatchConfig,
    #[serde(default)]
    pub autonomous: AutonomousConfig,
    #[serde(default)]
    pub controllers: ControllerConfig,
    #[serde(default)]
    pub bindings: BindingConfig,
    #[serde(default)]
    pub speeds: SpeedConfig,
}

impl RobotConfig {
    /// Validate ranges across all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if !(1..=MAX_CYCLE_PERIOD_MS).contains(&self.cycle.period_ms) {
            return Err(ConfigError::ValidationError(format!(
                "cycle.period_ms must be in 1..={MAX_CYCLE_PERIOD_MS}, got {}",
                self.cycle.period_ms
            )));
        }

        for (name, value) in self.speeds.entries() {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "speeds.{name} must be in [-1, 1], got {value}"
                )));
            }
        }

        if self.controllers.driver_port == self.controllers.operator_port {
            return Err(ConfigError::ValidationError(format!(
                "driver and operator share controller port {}",
                self.controllers.driver_port
            )));
        }
        Ok(())
    }

    /// Serialize back to TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.cycle.period_ms)
    }
}

// ─── Sections ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Control-loop period [ms].
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
}

fn default_period_ms() -> u64 {
    DEFAULT_CYCLE_PERIOD_MS
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
        }
    }
}

/// Match phase lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_autonomous_secs")]
    pub autonomous_secs: u64,
    #[serde(default = "default_teleop_secs")]
    pub teleop_secs: u64,
}

fn default_autonomous_secs() -> u64 {
    15
}

fn default_teleop_secs() -> u64 {
    135
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            autonomous_secs: default_autonomous_secs(),
            teleop_secs: default_teleop_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutonomousConfig {
    /// Routine key seeded into the dashboard at startup.
    #[serde(default = "default_routine")]
    pub default_routine: String,
}

fn default_routine() -> String {
    "right".to_string()
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            default_routine: default_routine(),
        }
    }
}

/// Controller ports: the driver uses a gamepad, the operator a flight
/// stick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub driver_port: u8,
    #[serde(default = "default_operator_port")]
    pub operator_port: u8,
}

fn default_operator_port() -> u8 {
    1
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            driver_port: 0,
            operator_port: default_operator_port(),
        }
    }
}

/// Axis and button numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Driver left stick Y.
    pub drive_speed_axis: u8,
    /// Driver right stick X.
    pub drive_rotation_axis: u8,
    /// Driver A button.
    pub collect_button: u8,
    /// Operator trigger.
    pub shoot_button: u8,
    /// Operator thumb button.
    pub hopper_toggle_button: u8,
    /// Operator base button.
    pub climb_toggle_button: u8,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            drive_speed_axis: 1,
            drive_rotation_axis: 4,
            collect_button: 1,
            shoot_button: 1,
            hopper_toggle_button: 2,
            climb_toggle_button: 12,
        }
    }
}

/// Motor outputs in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub intake: f64,
    pub shooter: f64,
    pub hopper: f64,
    pub climber: f64,
    /// Autonomous drive speed (negative drives backwards).
    pub auto_drive: f64,
    pub auto_turn: f64,
    pub auto_collect: f64,
}

impl SpeedConfig {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("intake", self.intake),
            ("shooter", self.shooter),
            ("hopper", self.hopper),
            ("climber", self.climber),
            ("auto_drive", self.auto_drive),
            ("auto_turn", self.auto_turn),
            ("auto_collect", self.auto_collect),
        ]
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            intake: 0.5,
            shooter: 1.0,
            hopper: 0.6,
            climber: 0.8,
            auto_drive: -0.5,
            auto_turn: 0.5,
            auto_collect: 0.5,
        }
    }
}
