//! Interrupt and Protection Logic.
//!
//! This module implements the interrupt line of the CPU. It performs the following:
//! 1. **Interrupt Dispatch:** Elevates to supervisor level, runs the installed handler, drops back.
//! 2. **Timer:** Counts executed instructions down and interrupts when the count reaches zero.
//! 3. **Protection:** Refuses control operations attempted below the required level.

use tracing::debug;

use super::Cpu;
use crate::common::error::{Fault, ProtectionFault, Result};
use crate::core::arch::mode::PrivilegeLevel;

impl Cpu {
    /// Raises an interrupt.
    ///
    /// The handler runs at supervisor level and the CPU returns to user level
    /// afterwards. A handler that replaces or clears itself stays replaced.
    ///
    /// # Errors
    ///
    /// [`Fault::NoInterruptHandler`] if no handler is installed, otherwise
    /// whatever the handler returns.
    pub(crate) fn interrupt(&mut self) -> Result<()> {
        let mut handler = self.handler.take().ok_or(Fault::NoInterruptHandler)?;
        let epoch = self.handler_epoch;
        self.stats.interrupts += 1;

        self.level = PrivilegeLevel::Supervisor;
        let outcome = handler(self);
        self.level = PrivilegeLevel::User;

        if self.handler_epoch == epoch {
            self.handler = Some(handler);
        }
        outcome
    }

    /// Advances the timer by one executed instruction.
    ///
    /// An active timer reaching zero deactivates itself and interrupts.
    pub(crate) fn timer_tick(&mut self) -> Result<()> {
        if !self.timer_active {
            return Ok(());
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.timer_active = false;
            self.stats.timer_expirations += 1;
            debug!("timer expired");
            self.interrupt()?;
        }
        Ok(())
    }

    /// Checks that the CPU currently runs at `required` level or above.
    ///
    /// # Arguments
    ///
    /// * `required` - Minimum level for the operation.
    /// * `operation` - Name recorded in the fault.
    pub(crate) fn require_level(
        &self,
        required: PrivilegeLevel,
        operation: &'static str,
    ) -> Result<(), ProtectionFault> {
        if self.level.permits(required) {
            Ok(())
        } else {
            Err(ProtectionFault { operation })
        }
    }
}
