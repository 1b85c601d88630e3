//! CPU Scheduling Algorithms.
//!
//! Implements the policies that decide which process runs next and for how long.
//!
//! # Algorithms
//!
//! - `Fcfs`: First-Come, First-Served; runs each process to completion.
//! - `RoundRobin`: Cyclic turns of at most a fixed quantum.
//! - `Sjf`: Shortest Job First; orders admitted processes by program length.
//!
//! Every algorithm shares the same state machine over the active list
//! ([`Scheduler::set_list`] and [`Scheduler::schedule`]); strategies only
//! supply [`Scheduler::pick_process`] and optionally [`Scheduler::list_changed`].

/// First-come, first-served scheduling.
pub mod fcfs;

/// Round-robin scheduling.
pub mod round_robin;

/// Shortest-job-first scheduling.
pub mod sjf;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::common::error::ConfigError;
use crate::common::types::Time;
use crate::config::{SchedulerConfig, SchedulingPolicy};
use crate::os::process::ProcessRef;

pub use fcfs::Fcfs;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

/// Outcome of a scheduling step: which process runs next, and for how long.
#[derive(Clone, Default)]
pub struct Decision {
    /// Process to run; `None` means the CPU should go to sleep.
    pub process: Option<ProcessRef>,
    /// Timer quantum; `None` means no timer (run until the job is exhausted).
    pub quantum: Option<Time>,
}

impl Decision {
    /// Nothing left to run.
    pub const fn halt() -> Self {
        Self {
            process: None,
            quantum: None,
        }
    }

    /// Run `process`, preempting it after `quantum` instructions if given.
    pub const fn run(process: ProcessRef, quantum: Option<Time>) -> Self {
        Self {
            process: Some(process),
            quantum,
        }
    }

    /// Returns `true` if this is the halt decision.
    pub const fn is_halt(&self) -> bool {
        self.process.is_none()
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("process", &self.process.as_ref().map(Rc::as_ptr))
            .field("quantum", &self.quantum)
            .finish()
    }
}

/// The ordered list of live processes and the circular cursor into it.
#[derive(Debug, Default)]
pub struct ActiveList {
    processes: Vec<ProcessRef>,
    current: usize,
}

impl ActiveList {
    /// Replaces the list outright, dropping repeated process handles.
    fn replace(&mut self, processes: Vec<ProcessRef>) {
        let mut unique: Vec<ProcessRef> = Vec::with_capacity(processes.len());
        for process in processes {
            if unique.iter().any(|p| Rc::ptr_eq(p, &process)) {
                warn!("process admitted twice; keeping the first occurrence");
                continue;
            }
            unique.push(process);
        }
        self.processes = unique;
        self.current = 0;
    }

    /// Parks the cursor one before the first position (the last slot, circularly).
    fn rewind(&mut self) {
        self.current = self.processes.len().saturating_sub(1);
    }

    /// Drops exhausted processes at the cursor and moves it to the next candidate.
    ///
    /// Returns `false` once the list is empty.
    fn advance(&mut self) -> bool {
        let mut removed = false;
        while self
            .processes
            .get(self.current)
            .is_some_and(|p| !p.borrow().has_next())
        {
            drop(self.processes.remove(self.current));
            removed = true;
        }

        // After a removal the cursor already sits on the next candidate.
        if !removed && self.current < self.processes.len() {
            self.current += 1;
        }
        if self.current >= self.processes.len() {
            self.current = 0;
        }

        !self.processes.is_empty()
    }

    /// Process under the cursor.
    pub fn current(&self) -> Option<&ProcessRef> {
        self.processes.get(self.current)
    }

    /// Cursor position.
    pub const fn cursor(&self) -> usize {
        self.current
    }

    /// Number of live processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Returns `true` if no process is left.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Live processes in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRef> {
        self.processes.iter()
    }

    /// Stable sort by ascending program length.
    pub fn sort_by_program_length(&mut self) {
        self.processes.sort_by_key(|p| p.borrow().program().len());
    }
}

/// Trait for CPU scheduling algorithms.
///
/// Implementors own an [`ActiveList`] and decide the quantum of the process
/// under the cursor. The provided methods implement the shared state machine.
pub trait Scheduler {
    /// Short name of the algorithm, for logs.
    fn name(&self) -> &'static str;

    /// The active list.
    fn active(&self) -> &ActiveList;

    /// The active list, mutably.
    fn active_mut(&mut self) -> &mut ActiveList;

    /// Hook run after the list is replaced and before the cursor is reset.
    fn list_changed(&mut self) {}

    /// Picks the process to run once the cursor rests on a live process.
    ///
    /// Implementations should pick the process under the cursor.
    fn pick_process(&mut self) -> Decision;

    /// Replaces the active list.
    ///
    /// The next [`schedule`](Scheduler::schedule) call lands on the first
    /// eligible process of the (possibly reordered) list.
    fn set_list(&mut self, processes: Vec<ProcessRef>) {
        self.active_mut().replace(processes);
        self.list_changed();
        self.active_mut().rewind();
        debug!(
            scheduler = self.name(),
            processes = self.active().len(),
            "active list replaced"
        );
    }

    /// Chooses the next process and its quantum, or halts when none is left.
    fn schedule(&mut self) -> Decision {
        if !self.active_mut().advance() {
            debug!(scheduler = self.name(), "no process left; halting");
            return Decision::halt();
        }
        self.pick_process()
    }
}

/// Shared handle to a scheduler, as handed to `Computer::install_os`.
///
/// Cloning the handle shares the underlying scheduler.
#[derive(Clone)]
pub struct SchedulingAlgorithm {
    inner: Rc<RefCell<dyn Scheduler>>,
}

impl SchedulingAlgorithm {
    /// Wraps a scheduler implementation.
    pub fn new<S: Scheduler + 'static>(scheduler: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(scheduler)),
        }
    }

    /// Builds the algorithm described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantum`] for a round-robin quantum that is not positive.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, ConfigError> {
        match config.policy {
            SchedulingPolicy::Fcfs => Ok(create_fcfs_scheduling()),
            SchedulingPolicy::RoundRobin => create_rr_scheduling(config.quantum),
            SchedulingPolicy::Sjf => Ok(create_sjf_scheduling()),
        }
    }

    /// See [`Scheduler::set_list`].
    pub fn set_list(&self, processes: Vec<ProcessRef>) {
        self.inner.borrow_mut().set_list(processes);
    }

    /// See [`Scheduler::schedule`].
    pub fn schedule(&self) -> Decision {
        self.inner.borrow_mut().schedule()
    }

    /// Name of the underlying algorithm.
    pub fn name(&self) -> &'static str {
        self.inner.borrow().name()
    }

    /// Number of live processes in the active list.
    pub fn active_len(&self) -> usize {
        self.inner.borrow().active().len()
    }
}

impl fmt::Debug for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulingAlgorithm")
            .field("name", &self.name())
            .field("active", &self.active_len())
            .finish()
    }
}

/// Creates first-come, first-served scheduling.
pub fn create_fcfs_scheduling() -> SchedulingAlgorithm {
    SchedulingAlgorithm::new(Fcfs::new())
}

/// Creates round-robin scheduling with the given quantum.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidQuantum`] when `quantum` is not positive.
pub fn create_rr_scheduling(quantum: Time) -> Result<SchedulingAlgorithm, ConfigError> {
    Ok(SchedulingAlgorithm::new(RoundRobin::new(quantum)?))
}

/// Creates shortest-job-first scheduling.
pub fn create_sjf_scheduling() -> SchedulingAlgorithm {
    SchedulingAlgorithm::new(Sjf::new())
}
