//! Telemetry publishing.
//!
//! Stats owns no actuators; it is a subsystem so that exactly one command
//! writes the telemetry keys at a time.

use std::sync::Arc;

use strider_common::io::dashboard::Dashboard;

/// One tick's worth of robot outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    pub left_drive: f64,
    pub right_drive: f64,
    pub collector: f64,
    pub shooter: f64,
    pub hopper: f64,
    pub climber: f64,
    /// Gyro heading [deg].
    pub heading: f64,
}

pub struct Stats {
    dashboard: Arc<dyn Dashboard>,
    updates: u64,
}

impl Stats {
    pub const NAME: &'static str = "stats";

    pub fn new(dashboard: Arc<dyn Dashboard>) -> Self {
        Self {
            dashboard,
            updates: 0,
        }
    }

    pub fn publish(&mut self, telemetry: &Telemetry) {
        self.updates += 1;
        let d = &self.dashboard;
        d.put_number("Drive/Left", telemetry.left_drive);
        d.put_number("Drive/Right", telemetry.right_drive);
        d.put_number("Collector", telemetry.collector);
        d.put_number("Shooter", telemetry.shooter);
        d.put_bool("Shooter/Spinning", telemetry.shooter != 0.0);
        d.put_number("Hopper", telemetry.hopper);
        d.put_number("Climber", telemetry.climber);
        d.put_number("Heading", telemetry.heading);
        d.put_number("Stats/Updates", self.updates as f64);
    }

    /// Number of `publish` calls so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}
