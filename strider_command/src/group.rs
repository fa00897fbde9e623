//! Command groups: sequential and parallel composition.
//!
//! Both groups are themselves commands, so they nest. A group requires the
//! union of its children's requirements and owns its children exclusively.
//! Children are opaque: a nested group is observed only through its own
//! `is_finished()`.

pub mod parallel;
pub mod sequential;

pub use parallel::ParallelGroup;
pub use sequential::SequentialGroup;

use crate::command::Command;
use crate::subsystem::Requirements;

/// Union of all children's requirements.
fn union_requirements(children: &[Box<dyn Command>]) -> Requirements {
    children
        .iter()
        .fold(Requirements::empty(), |acc, c| acc.union(c.requirements()))
}

/// `Kind(a, b, c)`.
fn group_name(kind: &str, children: &[Box<dyn Command>]) -> String {
    let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
    format!("{kind}({})", names.join(", "))
}

// ─── Test Support ───────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod recording {
    //! Scripted command that records its lifecycle calls.

    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::command::Command;
    use crate::subsystem::Requirements;

    pub type Log = Arc<Mutex<Vec<String>>>;

    pub fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// Finishes after `runs` executes (`None` = never).
    pub struct Recording {
        name: String,
        requirements: Requirements,
        runs: Option<u32>,
        executed: u32,
        log: Log,
    }

    impl Recording {
        pub fn new(name: &str, runs: Option<u32>, log: &Log) -> Self {
            Self {
                name: name.to_string(),
                requirements: Requirements::empty(),
                runs,
                executed: 0,
                log: Arc::clone(log),
            }
        }

        pub fn requiring(mut self, requirements: Requirements) -> Self {
            self.requirements = requirements;
            self
        }

        pub fn boxed(self) -> Box<dyn Command> {
            Box::new(self)
        }
    }

    impl Command for Recording {
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

        fn is_finished(&self) -> bool {
            self.runs.is_some_and(|n| self.executed >= n)
        }

        fn end(&mut self, interrupted: bool) {
            self.log
                .lock()
                .push(format!("{}.end({interrupted})", self.name));
        }
    }
}
