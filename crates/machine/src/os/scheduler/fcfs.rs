//! First-Come, First-Served (FCFS) Scheduling.
//!
//! Runs the process under the cursor with no timer, so it keeps the CPU
//! until its program is exhausted. Processes run in admission order.

use super::{ActiveList, Decision, Scheduler};

/// FCFS scheduler state.
#[derive(Debug, Default)]
pub struct Fcfs {
    active: ActiveList,
}

impl Fcfs {
    /// Creates an FCFS scheduler with an empty active list.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn active(&self) -> &ActiveList {
        &self.active
    }

    fn active_mut(&mut self) -> &mut ActiveList {
        &mut self.active
    }

    fn pick_process(&mut self) -> Decision {
        self.active
            .current()
            .map_or_else(Decision::halt, |p| Decision::run(p.clone(), None))
    }
}
