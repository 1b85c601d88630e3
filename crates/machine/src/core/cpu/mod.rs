//! CPU Core Definition and Control Operations.
//!
//! This module defines the `Cpu` structure, the container for the processor state. It
//! coordinates the following:
//! 1. **State Management:** Register file, RAM binding, current job and privilege level.
//! 2. **Timer:** A countdown of executed instructions that raises an interrupt at zero.
//! 3. **Protection:** Control operations are refused outside supervisor level.
//! 4. **Execution:** The run loop lives in [`execution`]; interrupts and ticks in [`trap`].

/// The run loop and its state-restoring guard.
pub mod execution;

/// Interrupt dispatch, timer ticks and privilege checks.
pub mod trap;

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::common::error::{ConfigError, Result};
use crate::common::memory::{RegisterSet, SharedRam};
use crate::common::types::{Number, Time};
use crate::core::arch::mode::PrivilegeLevel;
use crate::os::process::ProcessRef;
use crate::soc::output::{OutputDebug, SharedOutput, stdout_channel};
use crate::stats::RunStats;

/// Interrupt handler: runs at supervisor level with the interrupted CPU.
pub type InterruptHandler = Box<dyn FnMut(&mut Cpu) -> Result<()>>;

/// The processor: registers, bound RAM, job, timer, interrupt line and privilege level.
pub struct Cpu {
    /// Register file (`R1`..).
    registers: RegisterSet,
    /// RAM shared with the owning computer.
    ram: Option<SharedRam>,
    /// Remaining instructions before the timer fires.
    timer: Time,
    /// Whether the timer is counting.
    timer_active: bool,
    /// Installed interrupt handler.
    handler: Option<InterruptHandler>,
    /// Bumped every time a handler is installed or cleared.
    handler_epoch: u64,
    /// Process currently assigned to the CPU.
    job: Option<ProcessRef>,
    /// Run flag of the execution loop.
    awake: bool,
    /// Current privilege level.
    level: PrivilegeLevel,
    /// Destination of `PRINTLN`.
    output: SharedOutput,
    /// Counters.
    stats: RunStats,
}

impl Cpu {
    /// Creates a halted CPU at supervisor level.
    ///
    /// # Arguments
    ///
    /// * `register_count` - Number of registers (`R1`..`R<register_count>`).
    /// * `ram` - RAM to bind, if already configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSize`] when `register_count` is not positive.
    pub fn new(register_count: Number, ram: Option<SharedRam>) -> Result<Self, ConfigError> {
        Ok(Self {
            registers: RegisterSet::new(register_count)?,
            ram,
            timer: 0,
            timer_active: false,
            handler: None,
            handler_epoch: 0,
            job: None,
            awake: false,
            level: PrivilegeLevel::Supervisor,
            output: stdout_channel(),
            stats: RunStats::default(),
        })
    }

    /// Binds `ram` (or unbinds with `None`).
    pub fn set_ram(&mut self, ram: Option<SharedRam>) {
        self.ram = ram;
    }

    /// Returns the bound RAM, if any.
    pub const fn ram(&self) -> Option<&SharedRam> {
        self.ram.as_ref()
    }

    /// Redirects `PRINTLN` output.
    pub fn set_output(&mut self, output: SharedOutput) {
        self.output = output;
    }

    /// Zeroes every register.
    pub fn clear_registers(&mut self) {
        self.registers.clear();
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterSet {
        &self.registers
    }

    /// Current privilege level.
    pub const fn level(&self) -> PrivilegeLevel {
        self.level
    }

    /// Returns `true` while the execution loop runs.
    pub const fn is_running(&self) -> bool {
        self.awake
    }

    /// Remaining timer count, or `None` when the timer is disabled.
    pub const fn timer(&self) -> Option<Time> {
        if self.timer_active {
            Some(self.timer)
        } else {
            None
        }
    }

    /// The current job, if any.
    pub const fn job(&self) -> Option<&ProcessRef> {
        self.job.as_ref()
    }

    /// Returns `true` if an interrupt handler is installed.
    pub const fn has_interrupt_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run statistics accumulated so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Installs (or clears, with `None`) the interrupt handler.
    ///
    /// # Errors
    ///
    /// Protection fault outside supervisor level.
    pub fn set_interrupt_handler(&mut self, handler: Option<InterruptHandler>) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "set_interrupt_handler")?;
        self.handler = handler;
        self.handler_epoch = self.handler_epoch.wrapping_add(1);
        Ok(())
    }

    /// Stops the execution loop after the current step.
    ///
    /// # Errors
    ///
    /// Protection fault outside supervisor level.
    pub fn sleep(&mut self) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "sleep")?;
        self.awake = false;
        Ok(())
    }

    /// Assigns the process the CPU executes next.
    ///
    /// # Errors
    ///
    /// Protection fault outside supervisor level.
    pub fn set_job(&mut self, process: Option<ProcessRef>) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "set_job")?;
        let switched = match (&self.job, &process) {
            (Some(old), Some(new)) => !Rc::ptr_eq(old, new),
            (None, Some(_)) => true,
            (_, None) => false,
        };
        if switched {
            self.stats.context_switches += 1;
            debug!(
                remaining = process.as_ref().map_or(0, |p| p.borrow().remaining()),
                "context switch"
            );
        }
        self.job = process;
        Ok(())
    }

    /// Arms the timer to fire after `left` more instructions.
    ///
    /// # Errors
    ///
    /// Protection fault outside supervisor level.
    pub fn set_timer(&mut self, left: Time) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "set_timer")?;
        self.timer_active = true;
        self.timer = left;
        Ok(())
    }

    /// Stops the timer.
    ///
    /// # Errors
    ///
    /// Protection fault outside supervisor level.
    pub fn disable_timer(&mut self) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "disable_timer")?;
        self.timer_active = false;
        Ok(())
    }
}

impl Clone for Cpu {
    /// Copies the registers only; the copy is halted, unbound and has no job or handler.
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            ram: None,
            timer: 0,
            timer_active: false,
            handler: None,
            handler_epoch: 0,
            job: None,
            awake: false,
            level: PrivilegeLevel::Supervisor,
            output: Rc::clone(&self.output),
            stats: RunStats::default(),
        }
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("registers", &self.registers)
            .field("ram_bound", &self.ram.is_some())
            .field("timer", &self.timer())
            .field("has_handler", &self.handler.is_some())
            .field("has_job", &self.job.is_some())
            .field("awake", &self.awake)
            .field("level", &self.level)
            .field("output", &OutputDebug(&self.output))
            .finish_non_exhaustive()
    }
}
