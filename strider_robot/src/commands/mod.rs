//! Robot commands.
//!
//! - [`teleop`]: default commands, one per subsystem, driven by the
//!   driver and operator controllers.
//! - [`autonomous`]: time- or sensor-bounded commands composed into
//!   autonomous routines.
//!
//! Every command zeroes the outputs it owns in `end`, interrupted or not.

pub mod autonomous;
pub mod teleop;

pub use autonomous::{AutoCollect, AutoDrive, AutoShoot, AutoTurn};
pub use teleop::{Climb, Collect, Drive, MoveBalls, Shoot, TelemetrySources, UpdateStats};
