//! Autonomous routine selection.
//!
//! The routine key arrives as a raw dashboard string and is mapped once,
//! at the boundary, onto the closed [`AutoRoutine`] set. Unknown keys are
//! not an error: they fall back to [`AutoRoutine::FALLBACK`].
//!
//! | Key     | Routine |
//! |---------|---------|
//! | `right` | AutoShoot → AutoDrive (3 s) → AutoCollect |
//! | `mid`   | AutoShoot → AutoTurn (120°) → AutoDrive (33 s) |
//! | other   | (AutoDrive (3 s) ∥ AutoCollect) → AutoTurn (180°) |

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use strider_command::{ConfigError, ParallelGroup, SequentialGroup};
use strider_common::consts::AUTO_SELECT_KEY;
use strider_common::hal::gyro::Gyro;
use strider_common::io::dashboard::Dashboard;
use tracing::{info, warn};

use crate::commands::{AutoCollect, AutoDrive, AutoShoot, AutoTurn};
use crate::config::RobotConfig;
use crate::subsystems::{Collector, Drivetrain, Hopper, Shooter, SubsystemHandle};

/// Dashboard key listing the selectable routine keys.
pub const AUTO_OPTIONS_KEY: &str = "Auto Select/options";

/// The fixed set of autonomous routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoRoutine {
    Right,
    Mid,
    Left,
}

impl AutoRoutine {
    pub const ALL: [AutoRoutine; 3] = [Self::Right, Self::Mid, Self::Left];

    /// Routine used for unrecognized keys.
    pub const FALLBACK: AutoRoutine = Self::Left;

    /// Routine used when no key has been published.
    pub const DEFAULT: AutoRoutine = Self::Right;

    pub const fn key(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Mid => "mid",
            Self::Left => "left",
        }
    }

    /// Exact key match.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// Map any key, falling back for unknown ones.
    pub fn from_key(key: &str) -> Self {
        Self::parse(key).unwrap_or_else(|| {
            warn!(key, fallback = Self::FALLBACK.key(), "unrecognized autonomous routine key");
            Self::FALLBACK
        })
    }
}

impl fmt::Display for AutoRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Speeds and timing shared by every routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoTuning {
    pub period: Duration,
    pub drive_speed: f64,
    pub turn_speed: f64,
    pub collect_speed: f64,
    pub shooter_speed: f64,
    pub hopper_speed: f64,
}

impl AutoTuning {
    pub fn from_config(config: &RobotConfig) -> Self {
        Self {
            period: config.period(),
            drive_speed: config.speeds.auto_drive,
            turn_speed: config.speeds.auto_turn,
            collect_speed: config.speeds.auto_collect,
            shooter_speed: config.speeds.shooter,
            hopper_speed: config.speeds.hopper,
        }
    }
}

impl Default for AutoTuning {
    fn default() -> Self {
        Self::from_config(&RobotConfig::default())
    }
}

/// Builds a fresh routine command on every call.
pub struct RoutineSelector {
    drivetrain: SubsystemHandle<Drivetrain>,
    collector: SubsystemHandle<Collector>,
    shooter: SubsystemHandle<Shooter>,
    hopper: SubsystemHandle<Hopper>,
    gyro: Arc<dyn Gyro>,
    tuning: AutoTuning,
}

impl RoutineSelector {
    pub const SHOOT_DURATION: Duration = Duration::from_secs(7);
    pub const SHORT_DRIVE: Duration = Duration::from_secs(3);
    pub const LONG_DRIVE: Duration = Duration::from_secs(33);
    pub const MID_TURN_DEGREES: f64 = 120.0;
    pub const LEFT_TURN_DEGREES: f64 = 180.0;

    pub fn new(
        drivetrain: SubsystemHandle<Drivetrain>,
        collector: SubsystemHandle<Collector>,
        shooter: SubsystemHandle<Shooter>,
        hopper: SubsystemHandle<Hopper>,
        gyro: Arc<dyn Gyro>,
        tuning: AutoTuning,
    ) -> Self {
        Self {
            drivetrain,
            collector,
            shooter,
            hopper,
            gyro,
            tuning,
        }
    }

    /// Publish the options, read the key and build the routine.
    ///
    /// A missing key selects [`AutoRoutine::DEFAULT`].
    pub fn select_from(&self, dashboard: &dyn Dashboard) -> Result<SequentialGroup, ConfigError> {
        let keys = AutoRoutine::ALL.map(AutoRoutine::key);
        dashboard.put_string_array(AUTO_OPTIONS_KEY, &keys);
        let key = dashboard.get_string(AUTO_SELECT_KEY, AutoRoutine::DEFAULT.key());
        self.select(&key)
    }

    /// Build the routine for a raw key.
    pub fn select(&self, key: &str) -> Result<SequentialGroup, ConfigError> {
        let routine = AutoRoutine::from_key(key);
        info!(routine = %routine, "autonomous routine selected");
        self.build(routine)
    }

    pub fn build(&self, routine: AutoRoutine) -> Result<SequentialGroup, ConfigError> {
        let group = match routine {
            AutoRoutine::Right => SequentialGroup::new(vec![
                Box::new(self.shoot()),
                Box::new(self.drive(Self::SHORT_DRIVE)),
                Box::new(self.collect()),
            ]),
            AutoRoutine::Mid => SequentialGroup::new(vec![
                Box::new(self.shoot()),
                Box::new(self.turn(Self::MID_TURN_DEGREES)),
                Box::new(self.drive(Self::LONG_DRIVE)),
            ]),
            AutoRoutine::Left => SequentialGroup::new(vec![
                Box::new(ParallelGroup::new(vec![
                    Box::new(self.drive(Self::SHORT_DRIVE)),
                    Box::new(self.collect()),
                ])?),
                Box::new(self.turn(Self::LEFT_TURN_DEGREES)),
            ]),
        };
        Ok(group)
    }

    fn shoot(&self) -> AutoShoot {
        AutoShoot::new(
            self.shooter.clone(),
            self.hopper.clone(),
            Self::SHOOT_DURATION,
            false,
            self.tuning.period,
        )
        .with_speeds(self.tuning.shooter_speed, self.tuning.hopper_speed)
    }

    fn drive(&self, duration: Duration) -> AutoDrive {
        AutoDrive::new(
            self.drivetrain.clone(),
            self.tuning.drive_speed,
            0.0,
            duration,
            self.tuning.period,
        )
    }

    fn turn(&self, degrees: f64) -> AutoTurn {
        AutoTurn::new(
            self.drivetrain.clone(),
            Arc::clone(&self.gyro),
            self.tuning.turn_speed,
            degrees,
        )
    }

    fn collect(&self) -> AutoCollect {
        AutoCollect::new(self.collector.clone(), self.tuning.collect_speed, self.tuning.period)
    }
}
