//! Hardware boundary: actuation sinks and sensors.
//!
//! Subsystems own their actuators through these traits so the command
//! layer never depends on a concrete driver.

pub mod gyro;
pub mod motor;
