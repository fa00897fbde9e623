//! Heading sensor.

/// Continuous heading source (an IMU yaw axis).
///
/// Angles are in degrees and do not wrap at 360.
pub trait Gyro: Send + Sync {
    /// Current heading [deg].
    fn angle(&self) -> f64;

    /// Re-zero the heading.
    fn reset(&self);
}
