//! Ball intake.

use strider_common::hal::motor::{MotorController, clamp_output};

pub struct Collector {
    motor: Box<dyn MotorController>,
}

impl Collector {
    pub const NAME: &'static str = "collector";

    pub fn new(motor: Box<dyn MotorController>) -> Self {
        Self { motor }
    }

    pub fn run(&mut self, speed: f64) {
        self.motor.set(clamp_output(speed));
    }

    pub fn stop(&mut self) {
        self.motor.stop();
    }

    pub fn speed(&self) -> f64 {
        self.motor.get()
    }
}
