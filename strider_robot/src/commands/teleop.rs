//! Teleop default commands.

use std::sync::Arc;

use strider_command::{Command, Requirements};
use strider_common::hal::gyro::Gyro;
use strider_common::io::controller::{AxisSupplier, ButtonSupplier};

use crate::subsystems::{
    Climber, Collector, Drivetrain, Hopper, Shooter, Stats, SubsystemHandle, Telemetry,
};

// ─── Drive ──────────────────────────────────────────────────────────

/// Arcade drive from two axes. Never finishes.
pub struct Drive {
    drivetrain: SubsystemHandle<Drivetrain>,
    speed: AxisSupplier,
    rotation: AxisSupplier,
}

impl Drive {
    pub fn new(drivetrain: SubsystemHandle<Drivetrain>, speed: AxisSupplier, rotation: AxisSupplier) -> Self {
        Self {
            drivetrain,
            speed,
            rotation,
        }
    }
}

impl Command for Drive {
    fn name(&self) -> &str {
        "Drive"
    }

    fn requirements(&self) -> Requirements {
        self.drivetrain.requirements()
    }

    fn execute(&mut self) {
        let speed = (self.speed)();
        let rotation = (self.rotation)();
        self.drivetrain.lock().arcade_drive(speed, rotation);
    }

    fn end(&mut self, _interrupted: bool) {
        self.drivetrain.lock().stop();
    }
}

// ─── Collect ────────────────────────────────────────────────────────

/// Runs the intake while the button is held.
pub struct Collect {
    collector: SubsystemHandle<Collector>,
    button: ButtonSupplier,
    speed: f64,
}

impl Collect {
    pub fn new(collector: SubsystemHandle<Collector>, button: ButtonSupplier, speed: f64) -> Self {
        Self {
            collector,
            button,
            speed,
        }
    }
}

impl Command for Collect {
    fn name(&self) -> &str {
        "Collect"
    }

    fn requirements(&self) -> Requirements {
        self.collector.requirements()
    }

    fn execute(&mut self) {
        let speed = if (self.button)() { self.speed } else { 0.0 };
        self.collector.lock().run(speed);
    }

    fn end(&mut self, _interrupted: bool) {
        self.collector.lock().stop();
    }
}

// ─── Shoot ──────────────────────────────────────────────────────────

/// Spins the flywheel while the trigger is held.
pub struct Shoot {
    shooter: SubsystemHandle<Shooter>,
    trigger: ButtonSupplier,
    speed: f64,
}

impl Shoot {
    pub fn new(shooter: SubsystemHandle<Shooter>, trigger: ButtonSupplier, speed: f64) -> Self {
        Self {
            shooter,
            trigger,
            speed,
        }
    }
}

impl Command for Shoot {
    fn name(&self) -> &str {
        "Shoot"
    }

    fn requirements(&self) -> Requirements {
        self.shooter.requirements()
    }

    fn execute(&mut self) {
        let speed = if (self.trigger)() { self.speed } else { 0.0 };
        self.shooter.lock().spin(speed);
    }

    fn end(&mut self, _interrupted: bool) {
        self.shooter.lock().stop();
    }
}

// ─── Toggled mechanisms ─────────────────────────────────────────────

/// On/off latch flipped by each press. Starts off every episode.
#[derive(Debug, Default, Clone, Copy)]
struct Toggle {
    on: bool,
}

impl Toggle {
    fn update(&mut self, pressed: bool) -> bool {
        if pressed {
            self.on = !self.on;
        }
        self.on
    }
}

/// Each press toggles the hopper feed.
pub struct MoveBalls {
    hopper: SubsystemHandle<Hopper>,
    pressed: ButtonSupplier,
    speed: f64,
    toggle: Toggle,
}

impl MoveBalls {
    pub fn new(hopper: SubsystemHandle<Hopper>, pressed: ButtonSupplier, speed: f64) -> Self {
        Self {
            hopper,
            pressed,
            speed,
            toggle: Toggle::default(),
        }
    }
}

impl Command for MoveBalls {
    fn name(&self) -> &str {
        "MoveBalls"
    }

    fn requirements(&self) -> Requirements {
        self.hopper.requirements()
    }

    fn initialize(&mut self) {
        self.toggle = Toggle::default();
    }

    fn execute(&mut self) {
        let on = self.toggle.update((self.pressed)());
        self.hopper.lock().feed(if on { self.speed } else { 0.0 });
    }

    fn end(&mut self, _interrupted: bool) {
        self.hopper.lock().stop();
    }
}

/// Each press toggles the climber winch.
pub struct Climb {
    climber: SubsystemHandle<Climber>,
    pressed: ButtonSupplier,
    speed: f64,
    toggle: Toggle,
}

impl Climb {
    pub fn new(climber: SubsystemHandle<Climber>, pressed: ButtonSupplier, speed: f64) -> Self {
        Self {
            climber,
            pressed,
            speed,
            toggle: Toggle::default(),
        }
    }
}

impl Command for Climb {
    fn name(&self) -> &str {
        "Climb"
    }

    fn requirements(&self) -> Requirements {
        self.climber.requirements()
    }

    fn initialize(&mut self) {
        self.toggle = Toggle::default();
    }

    fn execute(&mut self) {
        let on = self.toggle.update((self.pressed)());
        self.climber.lock().winch(if on { self.speed } else { 0.0 });
    }

    fn end(&mut self, _interrupted: bool) {
        self.climber.lock().stop();
    }
}

// ─── UpdateStats ────────────────────────────────────────────────────

/// Read-only views used to sample telemetry. Sampling never writes
/// outputs, so it needs no claim on these subsystems.
#[derive(Clone)]
pub struct TelemetrySources {
    pub drivetrain: SubsystemHandle<Drivetrain>,
    pub collector: SubsystemHandle<Collector>,
    pub shooter: SubsystemHandle<Shooter>,
    pub hopper: SubsystemHandle<Hopper>,
    pub climber: SubsystemHandle<Climber>,
    pub gyro: Arc<dyn Gyro>,
}

impl TelemetrySources {
    pub fn sample(&self) -> Telemetry {
        let (left_drive, right_drive) = self.drivetrain.lock().outputs();
        Telemetry {
            left_drive,
            right_drive,
            collector: self.collector.lock().speed(),
            shooter: self.shooter.lock().speed(),
            hopper: self.hopper.lock().speed(),
            climber: self.climber.lock().speed(),
            heading: self.gyro.angle(),
        }
    }
}

/// Publishes telemetry every tick the predicate holds.
pub struct UpdateStats {
    stats: SubsystemHandle<Stats>,
    enabled: ButtonSupplier,
    sources: TelemetrySources,
}

impl UpdateStats {
    pub fn new(stats: SubsystemHandle<Stats>, enabled: ButtonSupplier, sources: TelemetrySources) -> Self {
        Self {
            stats,
            enabled,
            sources,
        }
    }
}

impl Command for UpdateStats {
    fn name(&self) -> &str {
        "UpdateStats"
    }

    fn requirements(&self) -> Requirements {
        self.stats.requirements()
    }

    fn execute(&mut self) {
        if (self.enabled)() {
            let telemetry = self.sources.sample();
            self.stats.lock().publish(&telemetry);
        }
    }
}
