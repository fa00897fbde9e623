//! Small general-purpose commands built from closures.

use crate::command::Command;
use crate::command::timer::TickTimer;
use crate::subsystem::Requirements;

type Action = Box<dyn FnMut() + Send>;

/// Runs an action once on initialize and finishes immediately.
pub struct InstantCommand {
    name: String,
    requirements: Requirements,
    action: Action,
}

impl InstantCommand {
    pub fn new(name: impl Into<String>, action: impl FnMut() + Send + 'static) -> Self {
        Self {
            name: name.into(),
            requirements: Requirements::empty(),
            action: Box::new(action),
        }
    }

    pub fn requiring(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }
}

impl Command for InstantCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self) {
        (self.action)();
    }

    fn is_finished(&self) -> bool {
        true
    }
}

/// Runs an action every tick until interrupted; `on_end` runs on end.
pub struct RunCommand {
    name: String,
    requirements: Requirements,
    action: Action,
    on_end: Option<Action>,
}

impl RunCommand {
    pub fn new(name: impl Into<String>, action: impl FnMut() + Send + 'static) -> Self {
        Self {
            name: name.into(),
            requirements: Requirements::empty(),
            action: Box::new(action),
            on_end: None,
        }
    }

    pub fn requiring(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn on_end(mut self, action: impl FnMut() + Send + 'static) -> Self {
        self.on_end = Some(Box::new(action));
        self
    }
}

impl Command for RunCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn execute(&mut self) {
        (self.action)();
    }

    fn end(&mut self, _interrupted: bool) {
        if let Some(on_end) = self.on_end.as_mut() {
            on_end();
        }
    }
}

/// Does nothing for a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct WaitCommand {
    name: String,
    timer: TickTimer,
}

impl WaitCommand {
    pub fn new(ticks: u64) -> Self {
        Self {
            name: format!("Wait({ticks})"),
            timer: TickTimer::new(ticks),
        }
    }
}

impl Command for WaitCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::empty()
    }

    fn initialize(&mut self) {
        self.timer.reset();
    }

    fn execute(&mut self) {
        self.timer.tick();
    }

    fn is_finished(&self) -> bool {
        self.timer.expired()
    }
}
