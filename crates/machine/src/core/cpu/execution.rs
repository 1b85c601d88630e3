//! Main Execution Loop.
//!
//! This module implements the run loop of the CPU. It performs the following:
//! 1. **Fetch:** Takes the next instruction from the current job, or interrupts when there is none.
//! 2. **Execute:** Runs the instruction against the register file, the bound RAM and the output.
//! 3. **Timing:** Ticks the timer once per executed instruction.
//! 4. **Restoration:** Returns the CPU to a halted supervisor state on every exit path.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::Cpu;
use crate::common::error::Result;
use crate::core::arch::mode::PrivilegeLevel;

/// Restores the halted supervisor state when the run loop exits, even by unwinding.
struct HaltGuard<'a> {
    cpu: &'a mut Cpu,
}

impl Deref for HaltGuard<'_> {
    type Target = Cpu;

    fn deref(&self) -> &Cpu {
        self.cpu
    }
}

impl DerefMut for HaltGuard<'_> {
    fn deref_mut(&mut self) -> &mut Cpu {
        self.cpu
    }
}

impl Drop for HaltGuard<'_> {
    fn drop(&mut self) {
        self.cpu.awake = false;
        self.cpu.level = PrivilegeLevel::Supervisor;
        self.cpu.timer_active = false;
    }
}

impl Cpu {
    /// Runs jobs until the CPU is put to sleep.
    ///
    /// The loop runs at user level. Whenever there is no job, or the job is
    /// exhausted, the CPU interrupts so the handler can pick new work or
    /// call [`Cpu::sleep`].
    ///
    /// # Errors
    ///
    /// Protection fault when called outside supervisor level; otherwise the
    /// first runtime fault raised by an instruction or the handler. The CPU is
    /// halted at supervisor level with the timer off either way.
    pub fn awaken(&mut self) -> Result<()> {
        self.require_level(PrivilegeLevel::Supervisor, "awaken")?;
        self.awake = true;

        let mut cpu = HaltGuard { cpu: self };
        cpu.level = PrivilegeLevel::User;
        while cpu.awake {
            cpu.step()?;
        }
        cpu.stats.runs_completed += 1;
        Ok(())
    }

    /// Executes one instruction of the current job and ticks the timer.
    fn step(&mut self) -> Result<()> {
        let next = self.job.as_ref().and_then(|job| job.borrow_mut().next());
        let Some(instruction) = next else {
            return self.interrupt();
        };

        trace!(%instruction, "execute");
        {
            let mut ram = self.ram.as_ref().map(|ram| ram.borrow_mut());
            let mut output = self.output.borrow_mut();
            instruction.execute(&mut self.registers, ram.as_deref_mut(), &mut *output)?;
        }
        self.stats.record(instruction.class());
        self.timer_tick()
    }
}
