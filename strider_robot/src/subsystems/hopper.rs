//! Ball transport between collector and shooter.

use strider_common::hal::motor::{MotorController, clamp_output};

pub struct Hopper {
    feed: Box<dyn MotorController>,
}

impl Hopper {
    pub const NAME: &'static str = "hopper";

    pub fn new(feed: Box<dyn MotorController>) -> Self {
        Self { feed }
    }

    pub fn feed(&mut self, speed: f64) {
        self.feed.set(clamp_output(speed));
    }

    pub fn stop(&mut self) {
        self.feed.stop();
    }

    pub fn speed(&self) -> f64 {
        self.feed.get()
    }
}
