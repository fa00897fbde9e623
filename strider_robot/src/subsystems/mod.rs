//! Robot subsystems.
//!
//! Each mechanism is a plain struct over its motors. Commands reach it
//! through a [`SubsystemHandle`], which pairs the shared state with the
//! scheduler id the command must require before writing outputs.

pub mod climber;
pub mod collector;
pub mod drivetrain;
pub mod hopper;
pub mod shooter;
pub mod stats;

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use strider_command::{ConfigError, Requirements, Scheduler, SubsystemId};

pub use climber::Climber;
pub use collector::Collector;
pub use drivetrain::Drivetrain;
pub use hopper::Hopper;
pub use shooter::Shooter;
pub use stats::{Stats, Telemetry};

/// Shared handle to one registered subsystem.
pub struct SubsystemHandle<T> {
    id: SubsystemId,
    state: Arc<Mutex<T>>,
}

impl<T> SubsystemHandle<T> {
    /// Register `name` with the scheduler and wrap `state`.
    pub fn register(scheduler: &mut Scheduler, name: &str, state: T) -> Result<Self, ConfigError> {
        let id = scheduler.register_subsystem(name)?;
        Ok(Self {
            id,
            state: Arc::new(Mutex::new(state)),
        })
    }

    #[inline]
    pub fn id(&self) -> SubsystemId {
        self.id
    }

    /// `{self}` as a requirement set.
    #[inline]
    pub fn requirements(&self) -> Requirements {
        Requirements::of(self.id)
    }

    /// Lock the subsystem state. Held only for the duration of one call.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock()
    }
}

impl<T> Clone for SubsystemHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> std::fmt::Debug for SubsystemHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsystemHandle").field("id", &self.id).finish_non_exhaustive()
    }
}
