//! Sequential composition: run children one at a time, in order.
//!
//! A child reporting finished is retired at the start of the group's next
//! execute: that tick it receives `end(false)` and the following child is
//! initialized and executed. The group therefore reports finished one tick
//! after its last child does.

use crate::command::Command;
use crate::group::{group_name, union_requirements};
use crate::subsystem::Requirements;

/// Runs children in order; finished when the index passes the last child.
pub struct SequentialGroup {
    name: String,
    requirements: Requirements,
    children: Vec<Box<dyn Command>>,
    /// Index of the current child.
    index: usize,
    /// Whether the current child has been initialized and not yet ended.
    child_active: bool,
}

impl SequentialGroup {
    pub fn new(children: Vec<Box<dyn Command>>) -> Self {
        Self {
            name: group_name("Sequential", &children),
            requirements: union_requirements(&children),
            children,
            index: 0,
            child_active: false,
        }
    }

    /// Index of the child currently running (equals `len()` when done).
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of the children in order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name()).collect()
    }
}

impl Command for SequentialGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self) {
        self.index = 0;
        self.child_active = false;
    }

    fn execute(&mut self) {
        if self.child_active {
            let current = &mut self.children[self.index];
            if current.is_finished() {
                current.end(false);
                self.child_active = false;
                self.index += 1;
            }
        }

        let Some(current) = self.children.get_mut(self.index) else {
            return;
        };
        if !self.child_active {
            current.initialize();
            self.child_active = true;
        }
        current.execute();
    }

    fn is_finished(&self) -> bool {
        self.index >= self.children.len()
    }

    fn end(&mut self, interrupted: bool) {
        if self.child_active {
            // Only reachable on interruption: natural completion retires
            // every child inside execute().
            self.children[self.index].end(interrupted);
            self.child_active = false;
        }
    }

    fn interruptible(&self) -> bool {
        self.children.iter().all(|c| c.interruptible())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
