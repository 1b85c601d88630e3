//! Run statistics collection and reporting.
//!
//! This module tracks what the CPU did while running programs. It provides:
//! 1. **Instruction counts:** Total retired instructions and the mix by class.
//! 2. **Interrupts:** Interrupts taken and how many came from timer expiry.
//! 3. **Scheduling:** Context switches between distinct processes and completed runs.

use std::fmt;

use crate::isa::InstructionClass;

/// Counters accumulated by a CPU across `awaken` calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,
    /// `SET` instructions retired.
    pub inst_set: u64,
    /// `LOAD`/`STORE` instructions retired.
    pub inst_memory: u64,
    /// `ADD`/`SUB`/`MUL`/`DIV` instructions retired.
    pub inst_arithmetic: u64,
    /// `PRINTLN` instructions retired.
    pub inst_output: u64,

    /// Interrupts taken, from any source.
    pub interrupts: u64,
    /// Interrupts caused by the timer reaching zero.
    pub timer_expirations: u64,
    /// Times the job was replaced by a different process.
    pub context_switches: u64,
    /// `awaken` calls that returned without a fault.
    pub runs_completed: u64,
}

impl RunStats {
    /// Records one retired instruction of the given class.
    pub fn record(&mut self, class: InstructionClass) {
        self.instructions_retired += 1;
        match class {
            InstructionClass::Set => self.inst_set += 1,
            InstructionClass::Memory => self.inst_memory += 1,
            InstructionClass::Arithmetic => self.inst_arithmetic += 1,
            InstructionClass::Output => self.inst_output += 1,
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RUN STATISTICS")?;
        writeln!(f, "  instructions retired  {}", self.instructions_retired)?;
        writeln!(f, "    set                 {}", self.inst_set)?;
        writeln!(f, "    memory              {}", self.inst_memory)?;
        writeln!(f, "    arithmetic          {}", self.inst_arithmetic)?;
        writeln!(f, "    output              {}", self.inst_output)?;
        writeln!(f, "  interrupts            {}", self.interrupts)?;
        writeln!(f, "    timer expirations   {}", self.timer_expirations)?;
        writeln!(f, "  context switches      {}", self.context_switches)?;
        write!(f, "  runs completed        {}", self.runs_completed)
    }
}
