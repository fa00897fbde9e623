//! Controller input providers.
//!
//! A [`Controller`] exposes raw axis and button reads. Commands never hold a
//! controller directly; they receive zero-argument suppliers built from one,
//! so bindings can be re-pointed without touching command code.

use std::sync::Arc;

use crate::consts::{OUTPUT_MAX, OUTPUT_MIN};

/// Analog value supplier, nominally in `[-1.0, 1.0]`.
pub type AxisSupplier = Box<dyn Fn() -> f64 + Send>;

/// Boolean supplier (button state or an enable predicate).
pub type ButtonSupplier = Box<dyn Fn() -> bool + Send>;

/// A gamepad or joystick.
///
/// All reads are non-blocking. `raw_button_pressed` is the only read with an
/// observable side effect: it consumes the rising edge it reports.
pub trait Controller: Send + Sync {
    /// Raw axis value.
    fn raw_axis(&self, axis: u8) -> f64;

    /// Current button state.
    fn raw_button(&self, button: u8) -> bool;

    /// True once per press: the button went down since the last query.
    fn raw_button_pressed(&self, button: u8) -> bool;
}

/// Coerce a raw axis read into a safe value: NaN becomes `0.0`, everything
/// else is clamped into the nominal range.
#[inline]
pub fn sanitize_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(OUTPUT_MIN, OUTPUT_MAX)
    }
}

/// Supplier reading one axis of a controller.
pub fn axis(controller: &Arc<dyn Controller>, axis: u8) -> AxisSupplier {
    let controller = Arc::clone(controller);
    Box::new(move || sanitize_axis(controller.raw_axis(axis)))
}

/// Supplier reading a held button.
pub fn button(controller: &Arc<dyn Controller>, button: u8) -> ButtonSupplier {
    let controller = Arc::clone(controller);
    Box::new(move || controller.raw_button(button))
}

/// Supplier reporting button presses (rising edges).
pub fn button_pressed(controller: &Arc<dyn Controller>, button: u8) -> ButtonSupplier {
    let controller = Arc::clone(controller);
    Box::new(move || controller.raw_button_pressed(button))
}

/// Supplier that is always true.
pub fn always() -> ButtonSupplier {
    Box::new(|| true)
}
