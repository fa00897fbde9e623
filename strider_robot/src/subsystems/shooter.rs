//! Flywheel shooter.

use strider_common::hal::motor::{MotorController, clamp_output};

pub struct Shooter {
    wheel: Box<dyn MotorController>,
}

impl Shooter {
    pub const NAME: &'static str = "shooter";

    pub fn new(wheel: Box<dyn MotorController>) -> Self {
        Self { wheel }
    }

    pub fn spin(&mut self, speed: f64) {
        self.wheel.set(clamp_output(speed));
    }

    pub fn stop(&mut self) {
        self.wheel.stop();
    }

    pub fn speed(&self) -> f64 {
        self.wheel.get()
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.get() != 0.0
    }
}
