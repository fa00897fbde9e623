//! Motor controller sink.

use crate::consts::{OUTPUT_MAX, OUTPUT_MIN};

/// A fire-and-forget motor output.
///
/// Implementations must be non-blocking and idempotent under repeated
/// identical `set` calls.
pub trait MotorController: Send {
    /// Command a normalized output in `[-1.0, 1.0]`.
    fn set(&mut self, output: f64);

    /// Last commanded output.
    fn get(&self) -> f64;

    /// Zero the output.
    fn stop(&mut self) {
        self.set(0.0);
    }
}

/// Clamp an output into the nominal range. NaN becomes `0.0`.
#[inline]
pub fn clamp_output(output: f64) -> f64 {
    if output.is_nan() {
        0.0
    } else {
        output.clamp(OUTPUT_MIN, OUTPUT_MAX)
    }
}
