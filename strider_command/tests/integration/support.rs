//! Shared fixtures: a recording command and a scheduler with subsystems.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use strider_command::{Command, Requirements, Scheduler, SubsystemId};

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// Drain the log so each tick can be inspected on its own.
pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock())
}

/// Shared boolean input, standing in for a button.
#[derive(Clone, Default)]
pub struct Button(Arc<AtomicBool>);

impl Button {
    pub fn set(&self, pressed: bool) {
        self.0.store(pressed, Ordering::SeqCst);
    }

    pub fn supplier(&self) -> impl Fn() -> bool + Send + 'static {
        let state = Arc::clone(&self.0);
        move || state.load(Ordering::SeqCst)
    }
}

/// Command that logs `name.init`, `name.exec`, `name.end(bool)` and
/// finishes after `runs` executes (`None` = never).
pub struct Recorder {
    name: String,
    requirements: Requirements,
    runs: Option<u32>,
    executed: u32,
    interruptible: bool,
    log: Log,
}

impl Recorder {
    pub fn new(name: &str, runs: Option<u32>, log: &Log) -> Self {
        Self {
            name: name.to_string(),
            requirements: Requirements::empty(),
            runs,
            executed: 0,
            interruptible: true,
            log: Arc::clone(log),
        }
    }

    pub fn requiring(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn uninterruptible(mut self) -> Self {
        self.interruptible = false;
        self
    }

    pub fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }
}

impl Command for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self) {
        self.executed = 0;
        self.log.lock().push(format!("{}.init", self.name));
    }

    fn execute(&mut self) {
        self.executed += 1;
        self.log.lock().push(format!("{}.exec", self.name));
    }

    fn end(&mut self, interrupted: bool) {
        self.log.lock().push(format!("{}.end({interrupted})", self.name));
    }

    fn is_finished(&self) -> bool {
        self.runs.is_some_and(|runs| self.executed >= runs)
    }

    fn interruptible(&self) -> bool {
        self.interruptible
    }
}

/// Scheduler with the given subsystems registered in order.
pub fn scheduler_with(names: &[&str]) -> (Scheduler, Vec<SubsystemId>) {
    let mut scheduler = Scheduler::new();
    let ids = names
        .iter()
        .map(|n| scheduler.register_subsystem(*n).unwrap())
        .collect();
    (scheduler, ids)
}

/// Every subsystem has at most one scheduled command requiring it.
pub fn assert_exclusive(scheduler: &Scheduler, subsystems: &[SubsystemId]) {
    for &subsystem in subsystems {
        let holders: Vec<_> = scheduler
            .scheduled()
            .iter()
            .filter(|id| {
                scheduler
                    .requirements(**id)
                    .is_some_and(|r| r.requires(subsystem))
            })
            .collect();
        assert!(
            holders.len() <= 1,
            "{subsystem} held by {} commands at tick {}",
            holders.len(),
            scheduler.tick_count()
        );
        if let Some(&&holder) = holders.first() {
            assert_eq!(scheduler.claimant(subsystem), Some(holder));
        }
    }
}
