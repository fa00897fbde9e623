//! Operator input and dashboard boundary.
//!
//! Controllers are polled once per tick by trigger predicates and command
//! bodies. The dashboard is both the telemetry sink and the configuration
//! source read at autonomous-routine selection time.

pub mod controller;
pub mod dashboard;
