//! End-game climber winch.

use strider_common::hal::motor::{MotorController, clamp_output};

pub struct Climber {
    winch: Box<dyn MotorController>,
}

impl Climber {
    pub const NAME: &'static str = "climber";

    pub fn new(winch: Box<dyn MotorController>) -> Self {
        Self { winch }
    }

    pub fn winch(&mut self, speed: f64) {
        self.winch.set(clamp_output(speed));
    }

    pub fn stop(&mut self) {
        self.winch.stop();
    }

    pub fn speed(&self) -> f64 {
        self.winch.get()
    }
}
