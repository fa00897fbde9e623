//! Differential drivetrain.

use strider_common::hal::motor::{MotorController, clamp_output};

pub struct Drivetrain {
    left: Box<dyn MotorController>,
    right: Box<dyn MotorController>,
}

impl Drivetrain {
    pub const NAME: &'static str = "drivetrain";

    pub fn new(left: Box<dyn MotorController>, right: Box<dyn MotorController>) -> Self {
        Self { left, right }
    }

    /// Arcade mix: `speed` forward/back, `rotation` positive turns right.
    ///
    /// Inputs are sanitized, so a dropped axis reading stops the side
    /// instead of saturating it.
    pub fn arcade_drive(&mut self, speed: f64, rotation: f64) {
        let speed = clamp_output(speed);
        let rotation = clamp_output(rotation);
        self.left.set(clamp_output(speed + rotation));
        self.right.set(clamp_output(speed - rotation));
    }

    pub fn stop(&mut self) {
        self.left.stop();
        self.right.stop();
    }

    /// `(left, right)` outputs.
    pub fn outputs(&self) -> (f64, f64) {
        (self.left.get(), self.right.get())
    }
}
