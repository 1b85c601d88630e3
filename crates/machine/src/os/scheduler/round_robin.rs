//! Round-Robin (RR) Scheduling.
//!
//! Visits live processes in cyclic list order, giving each a slice of at
//! most `quantum` instructions before the timer preempts it.

use super::{ActiveList, Decision, Scheduler};
use crate::common::error::ConfigError;
use crate::common::types::Time;

/// Round-robin scheduler state.
#[derive(Debug)]
pub struct RoundRobin {
    active: ActiveList,
    quantum: Time,
}

impl RoundRobin {
    /// Creates a round-robin scheduler.
    ///
    /// # Arguments
    ///
    /// * `quantum` - Maximum number of instructions per slice.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantum`] when `quantum` is not positive.
    pub fn new(quantum: Time) -> Result<Self, ConfigError> {
        if quantum <= 0 {
            return Err(ConfigError::InvalidQuantum(quantum));
        }
        Ok(Self {
            active: ActiveList::default(),
            quantum,
        })
    }

    /// The slice length.
    pub const fn quantum(&self) -> Time {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
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
            .map_or_else(Decision::halt, |p| Decision::run(p.clone(), Some(self.quantum)))
    }
}
