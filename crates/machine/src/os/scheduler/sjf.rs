//! Shortest-Job-First (SJF) Scheduling.
//!
//! When a new list is admitted, processes are stably sorted by the length
//! of their programs; each then runs to completion with no timer. The
//! order is a snapshot taken at admission, not re-evaluated as processes
//! make progress.

use super::{ActiveList, Decision, Scheduler};

/// SJF scheduler state.
#[derive(Debug, Default)]
pub struct Sjf {
    active: ActiveList,
}

impl Sjf {
    /// Creates an SJF scheduler with an empty active list.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn active(&self) -> &ActiveList {
        &self.active
    }

    fn active_mut(&mut self) -> &mut ActiveList {
        &mut self.active
    }

    fn list_changed(&mut self) {
        self.active.sort_by_program_length();
    }

    fn pick_process(&mut self) -> Decision {
        self.active
            .current()
            .map_or_else(Decision::halt, |p| Decision::run(p.clone(), None))
    }
}
