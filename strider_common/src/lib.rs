//! Strider Common Library
//!
//! Shared constants, configuration loading, and the boundary traits every
//! Strider crate talks to hardware through.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide constants
//! - [`hal`] - Actuation sinks and sensors (motors, gyro)
//! - [`io`] - Input providers (controllers) and the dashboard key-value store
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use strider_common::prelude::*;
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod io;
pub mod prelude;
