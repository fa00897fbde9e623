//! Parallel composition: run children concurrently until all finish.
//!
//! Every live child executes each tick. A child that reports finished is
//! ended with `end(false)` on that same tick and skipped afterwards; the
//! group finishes once no child is left. Children must not share
//! subsystems.

use crate::command::Command;
use crate::error::ConfigError;
use crate::group::{group_name, union_requirements};
use crate::subsystem::Requirements;

/// Runs children together; finished when every child has finished.
pub struct ParallelGroup {
    name: String,
    requirements: Requirements,
    children: Vec<Box<dyn Command>>,
    /// Per-child flag: initialized this episode and not yet ended.
    live: Vec<bool>,
}

impl ParallelGroup {
    /// Build a group from children with pairwise-disjoint requirements.
    ///
    /// # Errors
    /// `ConfigError::OverlappingRequirements` if two children need the same
    /// subsystem.
    pub fn new(children: Vec<Box<dyn Command>>) -> Result<Self, ConfigError> {
        let mut claimed = Requirements::empty();
        for (i, child) in children.iter().enumerate() {
            let reqs = child.requirements();
            if claimed.intersects(reqs) {
                let first = children[..i]
                    .iter()
                    .find(|c| c.requirements().intersects(reqs))
                    .map(|c| c.name().to_string())
                    .unwrap_or_default();
                return Err(ConfigError::OverlappingRequirements {
                    first,
                    second: child.name().to_string(),
                });
            }
            claimed = claimed.union(reqs);
        }

        Ok(Self {
            name: group_name("Parallel", &children),
            requirements: claimed,
            live: vec![false; children.len()],
            children,
        })
    }

    /// Number of children still running this episode.
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|l| **l).count()
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name()).collect()
    }
}

impl Command for ParallelGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        debug_assert_eq!(self.requirements, union_requirements(&self.children));
        self.requirements
    }

    fn initialize(&mut self) {
        for (child, live) in self.children.iter_mut().zip(self.live.iter_mut()) {
            child.initialize();
            *live = true;
        }
    }

    fn execute(&mut self) {
        for (child, live) in self.children.iter_mut().zip(self.live.iter_mut()) {
            if !*live {
                continue;
            }
            child.execute();
            if child.is_finished() {
                child.end(false);
                *live = false;
            }
        }
    }

    fn is_finished(&self) -> bool {
        !self.live.iter().any(|l| *l)
    }

    fn end(&mut self, interrupted: bool) {
        for (child, live) in self.children.iter_mut().zip(self.live.iter_mut()) {
            if *live {
                child.end(interrupted);
                *live = false;
            }
        }
    }

    fn interruptible(&self) -> bool {
        self.children.iter().all(|c| c.interruptible())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
