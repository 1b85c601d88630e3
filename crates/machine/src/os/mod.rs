//! Operating system: admission and dispatch.
//!
//! The OS turns program texts into processes, hands them to the scheduling
//! algorithm and drives the CPU. It provides:
//! 1. **Admission:** Every text is compiled before anything runs; one bad program aborts the batch.
//! 2. **Dispatch:** The interrupt handler asks the scheduler for the next job and arms the timer.
//! 3. **Lifecycle:** The handler is removed after the run, whether it halted or faulted.

/// Processes: execution cursors over programs.
pub mod process;

/// Scheduling algorithms.
pub mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::common::error::Result;
use crate::core::cpu::Cpu;
use crate::stats::RunStats;

pub use process::{Process, ProcessRef};
pub use scheduler::{
    Decision, Scheduler, SchedulingAlgorithm, create_fcfs_scheduling, create_rr_scheduling,
    create_sjf_scheduling,
};

/// The operating system installed on a computer.
///
/// Obtained from `Computer::install_os`; shares the computer's CPU.
#[derive(Debug)]
pub struct Os {
    cpu: Rc<RefCell<Cpu>>,
    scheduler: SchedulingAlgorithm,
}

impl Os {
    pub(crate) const fn new(cpu: Rc<RefCell<Cpu>>, scheduler: SchedulingAlgorithm) -> Self {
        Self { cpu, scheduler }
    }

    /// Compiles and runs a batch of programs until every one is exhausted.
    ///
    /// Each text becomes one process. Blocks until the CPU halts.
    ///
    /// # Arguments
    ///
    /// * `programs` - Program texts, in admission order.
    ///
    /// # Errors
    ///
    /// A compilation fault (nothing has run yet), or the first runtime or
    /// protection fault of the run. The CPU is halted in either case.
    pub fn execute_programs<S: AsRef<str>>(&self, programs: &[S]) -> Result<()> {
        let processes = programs
            .iter()
            .map(|text| Process::compile(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            scheduler = self.scheduler.name(),
            programs = processes.len(),
            "admitting programs"
        );
        self.scheduler.set_list(processes);

        let mut cpu = self.cpu.borrow_mut();
        cpu.disable_timer()?;
        let scheduler = self.scheduler.clone();
        cpu.set_interrupt_handler(Some(Box::new(move |cpu: &mut Cpu| {
            dispatch(cpu, &scheduler)
        })))?;

        let outcome = dispatch(&mut cpu, &self.scheduler).and_then(|()| cpu.awaken());
        cpu.set_interrupt_handler(None)?;
        if let Err(err) = &outcome {
            debug!(%err, "run aborted");
        }
        outcome
    }

    /// Statistics of the CPU across every run so far.
    pub fn stats(&self) -> RunStats {
        self.cpu.borrow().stats().clone()
    }

    /// The scheduling algorithm in use.
    pub const fn scheduler(&self) -> &SchedulingAlgorithm {
        &self.scheduler
    }
}

/// Asks the scheduler for the next job and programs the CPU accordingly.
fn dispatch(cpu: &mut Cpu, scheduler: &SchedulingAlgorithm) -> Result<()> {
    let decision = scheduler.schedule();
    let Some(process) = decision.process else {
        debug!("nothing left to run; halting");
        cpu.set_job(None)?;
        return cpu.sleep();
    };
    match decision.quantum {
        Some(quantum) => cpu.set_timer(quantum)?,
        None => cpu.disable_timer()?,
    }
    debug!(quantum = ?decision.quantum, "dispatching");
    cpu.set_job(Some(process))
}
