//! Autonomous commands.
//!
//! Durations are converted to tick counts once, at construction, using
//! the control-loop period; finish predicates only compare counters.

use std::sync::Arc;
use std::time::Duration;

use strider_command::{Command, Requirements, TickTimer};
use strider_common::hal::gyro::Gyro;

use crate::subsystems::{Collector, Drivetrain, Hopper, Shooter, SubsystemHandle};

// ─── AutoShoot ──────────────────────────────────────────────────────

/// Spins the shooter and feeds the hopper for a fixed time.
pub struct AutoShoot {
    shooter: SubsystemHandle<Shooter>,
    hopper: SubsystemHandle<Hopper>,
    timer: TickTimer,
    spin_up: TickTimer,
    shooter_speed: f64,
    hopper_speed: f64,
}

impl AutoShoot {
    /// Flywheel spin-up time before feeding, when requested.
    pub const SPIN_UP: Duration = Duration::from_secs(1);
    pub const DEFAULT_SHOOTER_SPEED: f64 = 1.0;
    pub const DEFAULT_HOPPER_SPEED: f64 = 0.6;

    pub fn new(
        shooter: SubsystemHandle<Shooter>,
        hopper: SubsystemHandle<Hopper>,
        duration: Duration,
        wait_for_spin_up: bool,
        period: Duration,
    ) -> Self {
        let spin_up = if wait_for_spin_up {
            TickTimer::from_duration(Self::SPIN_UP, period)
        } else {
            TickTimer::new(0)
        };
        Self {
            shooter,
            hopper,
            timer: TickTimer::from_duration(duration, period),
            spin_up,
            shooter_speed: Self::DEFAULT_SHOOTER_SPEED,
            hopper_speed: Self::DEFAULT_HOPPER_SPEED,
        }
    }

    pub fn with_speeds(mut self, shooter: f64, hopper: f64) -> Self {
        self.shooter_speed = shooter;
        self.hopper_speed = hopper;
        self
    }

    fn stop(&self) {
        self.shooter.lock().stop();
        self.hopper.lock().stop();
    }
}

impl Command for AutoShoot {
    fn name(&self) -> &str {
        "AutoShoot"
    }

    fn requirements(&self) -> Requirements {
        self.shooter.requirements().union(self.hopper.requirements())
    }

    fn initialize(&mut self) {
        self.timer.reset();
        self.spin_up.reset();
    }

    fn execute(&mut self) {
        self.timer.tick();
        self.spin_up.tick();
        self.shooter.lock().spin(self.shooter_speed);
        let feed = if self.spin_up.expired() { self.hopper_speed } else { 0.0 };
        self.hopper.lock().feed(feed);
    }

    fn is_finished(&self) -> bool {
        self.timer.expired()
    }

    fn end(&mut self, _interrupted: bool) {
        self.stop();
    }
}

// ─── AutoDrive ──────────────────────────────────────────────────────

/// Drives with fixed speed and rotation for a fixed time.
pub struct AutoDrive {
    drivetrain: SubsystemHandle<Drivetrain>,
    speed: f64,
    rotation: f64,
    timer: TickTimer,
}

impl AutoDrive {
    pub fn new(
        drivetrain: SubsystemHandle<Drivetrain>,
        speed: f64,
        rotation: f64,
        duration: Duration,
        period: Duration,
    ) -> Self {
        Self {
            drivetrain,
            speed,
            rotation,
            timer: TickTimer::from_duration(duration, period),
        }
    }

    /// Ticks this command runs for.
    pub fn ticks(&self) -> u64 {
        self.timer.limit()
    }
}

impl Command for AutoDrive {
    fn name(&self) -> &str {
        "AutoDrive"
    }

    fn requirements(&self) -> Requirements {
        self.drivetrain.requirements()
    }

    fn initialize(&mut self) {
        self.timer.reset();
    }

    fn execute(&mut self) {
        self.timer.tick();
        self.drivetrain.lock().arcade_drive(self.speed, self.rotation);
    }

    fn is_finished(&self) -> bool {
        self.timer.expired()
    }

    fn end(&mut self, _interrupted: bool) {
        self.drivetrain.lock().stop();
    }
}

// ─── AutoTurn ───────────────────────────────────────────────────────

/// Turns in place until the heading has changed by `degrees`.
///
/// While the gyro reads non-finite the drivetrain is held stopped.
pub struct AutoTurn {
    drivetrain: SubsystemHandle<Drivetrain>,
    gyro: Arc<dyn Gyro>,
    speed: f64,
    degrees: f64,
    start: Option<f64>,
    turned: f64,
}

impl AutoTurn {
    pub fn new(drivetrain: SubsystemHandle<Drivetrain>, gyro: Arc<dyn Gyro>, speed: f64, degrees: f64) -> Self {
        Self {
            drivetrain,
            gyro,
            speed,
            degrees: degrees.abs(),
            start: None,
            turned: 0.0,
        }
    }

    /// Heading change since initialize [deg].
    pub fn turned(&self) -> f64 {
        self.turned
    }
}

impl Command for AutoTurn {
    fn name(&self) -> &str {
        "AutoTurn"
    }

    fn requirements(&self) -> Requirements {
        self.drivetrain.requirements()
    }

    fn initialize(&mut self) {
        self.start = Some(self.gyro.angle()).filter(|a| a.is_finite());
        self.turned = 0.0;
    }

    fn execute(&mut self) {
        let angle = self.gyro.angle();
        // No valid heading: hold still and keep the previous progress.
        if !angle.is_finite() {
            self.drivetrain.lock().stop();
            return;
        }
        let start = *self.start.get_or_insert(angle);
        self.turned = (angle - start).abs();
        self.drivetrain.lock().arcade_drive(0.0, self.speed);
    }

    fn is_finished(&self) -> bool {
        self.turned >= self.degrees
    }

    fn end(&mut self, _interrupted: bool) {
        self.drivetrain.lock().stop();
    }
}

// ─── AutoCollect ────────────────────────────────────────────────────

/// Runs the intake for a fixed window.
pub struct AutoCollect {
    collector: SubsystemHandle<Collector>,
    speed: f64,
    timer: TickTimer,
}

impl AutoCollect {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

    pub fn new(collector: SubsystemHandle<Collector>, speed: f64, period: Duration) -> Self {
        Self {
            collector,
            speed,
            timer: TickTimer::from_duration(Self::DEFAULT_DURATION, period),
        }
    }

    pub fn with_duration(mut self, duration: Duration, period: Duration) -> Self {
        self.timer = TickTimer::from_duration(duration, period);
        self
    }
}

impl Command for AutoCollect {
    fn name(&self) -> &str {
        "AutoCollect"
    }

    fn requirements(&self) -> Requirements {
        self.collector.requirements()
    }

    fn initialize(&mut self) {
        self.timer.reset();
    }

    fn execute(&mut self) {
        self.timer.tick();
        self.collector.lock().run(self.speed);
    }

    fn is_finished(&self) -> bool {
        self.timer.expired()
    }

    fn end(&mut self, _interrupted: bool) {
        self.collector.lock().stop();
    }
}
