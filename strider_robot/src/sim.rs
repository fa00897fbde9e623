//! In-process simulation backends.
//!
//! Stand-ins for motor controllers, the gyro and the two driver-station
//! controllers, so the robot can run a full match without hardware. A
//! [`SimRobot`] owns one of each and integrates the drivetrain's turn
//! output into the gyro heading every step.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use strider_common::hal::gyro::Gyro;
use strider_common::hal::motor::{MotorController, clamp_output};
use strider_common::io::controller::Controller;

use crate::container::Hardware;

/// Turn rate at full differential output [deg/s].
pub const MAX_TURN_RATE_DPS: f64 = 180.0;

/// Highest axis/button number a simulated controller exposes.
pub const SIM_CHANNELS: usize = 16;

// ─── Motor ──────────────────────────────────────────────────────────

/// Simulated motor output. Clones share the same output.
#[derive(Debug, Clone, Default)]
pub struct SimMotor {
    output: Arc<Mutex<f64>>,
}

impl SimMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> f64 {
        *self.output.lock()
    }
}

impl MotorController for SimMotor {
    fn set(&mut self, output: f64) {
        *self.output.lock() = clamp_output(output);
    }

    fn get(&self) -> f64 {
        *self.output.lock()
    }
}

// ─── Gyro ───────────────────────────────────────────────────────────

/// Simulated continuous-angle gyro.
#[derive(Debug, Default)]
pub struct SimGyro {
    angle: Mutex<f64>,
}

impl SimGyro {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the heading by `degrees`.
    pub fn rotate(&self, degrees: f64) {
        *self.angle.lock() += degrees;
    }
}

impl Gyro for SimGyro {
    fn angle(&self) -> f64 {
        *self.angle.lock()
    }

    fn reset(&self) {
        *self.angle.lock() = 0.0;
    }
}

// ─── Controller ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ControllerState {
    axes: [f64; SIM_CHANNELS],
    buttons: [bool; SIM_CHANNELS],
    pressed: [bool; SIM_CHANNELS],
}

/// Simulated gamepad or joystick with settable axes and buttons.
///
/// Out-of-range channels read as neutral.
#[derive(Debug, Default)]
pub struct SimController {
    state: Mutex<ControllerState>,
}

impl SimController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_axis(&self, axis: u8, value: f64) {
        if let Some(slot) = self.state.lock().axes.get_mut(usize::from(axis)) {
            *slot = value;
        }
    }

    /// Set a button; a released → held change latches a press.
    pub fn set_button(&self, button: u8, held: bool) {
        let mut state = self.state.lock();
        let index = usize::from(button);
        if index >= SIM_CHANNELS {
            return;
        }
        if held && !state.buttons[index] {
            state.pressed[index] = true;
        }
        state.buttons[index] = held;
    }

    /// Press and release in one call; latches a press.
    pub fn tap(&self, button: u8) {
        self.set_button(button, true);
        self.set_button(button, false);
    }
}

impl Controller for SimController {
    fn raw_axis(&self, axis: u8) -> f64 {
        self.state.lock().axes.get(usize::from(axis)).copied().unwrap_or(0.0)
    }

    fn raw_button(&self, button: u8) -> bool {
        self.state.lock().buttons.get(usize::from(button)).copied().unwrap_or(false)
    }

    fn raw_button_pressed(&self, button: u8) -> bool {
        let mut state = self.state.lock();
        match state.pressed.get_mut(usize::from(button)) {
            Some(latched) => std::mem::take(latched),
            None => false,
        }
    }
}

// ─── Whole robot ────────────────────────────────────────────────────

/// Simulated hardware for one robot.
#[derive(Debug, Clone)]
pub struct SimRobot {
    pub left_drive: SimMotor,
    pub right_drive: SimMotor,
    pub collector: SimMotor,
    pub shooter: SimMotor,
    pub hopper: SimMotor,
    pub climber: SimMotor,
    pub gyro: Arc<SimGyro>,
    pub driver: Arc<SimController>,
    pub operator: Arc<SimController>,
}

impl SimRobot {
    pub fn new() -> Self {
        Self {
            left_drive: SimMotor::new(),
            right_drive: SimMotor::new(),
            collector: SimMotor::new(),
            shooter: SimMotor::new(),
            hopper: SimMotor::new(),
            climber: SimMotor::new(),
            gyro: Arc::new(SimGyro::new()),
            driver: Arc::new(SimController::new()),
            operator: Arc::new(SimController::new()),
        }
    }

    /// Hardware bundle wired to this simulation; the driver controller
    /// sits on `driver_port` and the operator on `operator_port`.
    pub fn hardware(&self, driver_port: u8, operator_port: u8) -> Hardware {
        let driver: Arc<dyn Controller> = self.driver.clone();
        let operator: Arc<dyn Controller> = self.operator.clone();

        Hardware {
            left_drive: Box::new(self.left_drive.clone()),
            right_drive: Box::new(self.right_drive.clone()),
            collector: Box::new(self.collector.clone()),
            shooter: Box::new(self.shooter.clone()),
            hopper: Box::new(self.hopper.clone()),
            climber: Box::new(self.climber.clone()),
            gyro: self.gyro.clone(),
            controllers: vec![(driver_port, driver), (operator_port, operator)],
        }
    }

    /// Integrate the drivetrain's turn output over `dt` into the gyro.
    pub fn step(&self, dt: Duration) {
        let turn = (self.left_drive.output() - self.right_drive.output()) / 2.0;
        self.gyro.rotate(turn * MAX_TURN_RATE_DPS * dt.as_secs_f64());
    }
}

impl Default for SimRobot {
    fn default() -> Self {
        Self::new()
    }
}
