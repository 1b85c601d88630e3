//! The configurable computer.
//!
//! A `Computer` starts empty. The caller adds a CPU and RAM in any order,
//! then installs an operating system. From that moment the computer is
//! locked: its components can no longer be replaced and it can no longer be
//! copied or overwritten.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::common::error::ConfigError;
use crate::common::memory::{Ram, SharedRam};
use crate::common::types::Number;
use crate::config::MachineConfig;
use crate::core::cpu::Cpu;
use crate::os::Os;
use crate::os::scheduler::SchedulingAlgorithm;
use crate::soc::output::{OutputDebug, SharedOutput, stdout_channel};

/// Container of a CPU and RAM.
pub struct Computer {
    cpu: Option<Rc<RefCell<Cpu>>>,
    ram: Option<SharedRam>,
    output: SharedOutput,
    locked: bool,
}

impl Computer {
    /// Creates a computer with no CPU and no RAM, printing to standard output.
    pub fn new() -> Self {
        Self {
            cpu: None,
            ram: None,
            output: stdout_channel(),
            locked: false,
        }
    }

    /// Creates a computer with the CPU and RAM described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSize`] for a non-positive register count or RAM size.
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        let mut computer = Self::new();
        computer.set_ram(config.ram_size)?;
        computer.set_cpu(config.registers)?;
        Ok(computer)
    }

    const fn ensure_unlocked(&self) -> Result<(), ConfigError> {
        if self.locked {
            Err(ConfigError::IllegalChange)
        } else {
            Ok(())
        }
    }

    /// Replaces the CPU with a fresh one, bound to the current RAM.
    ///
    /// # Arguments
    ///
    /// * `register_count` - Number of registers (`R1`..`R<register_count>`).
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalChange`] once locked, [`ConfigError::InvalidSize`]
    /// when `register_count` is not positive.
    pub fn set_cpu(&mut self, register_count: Number) -> Result<(), ConfigError> {
        self.ensure_unlocked()?;
        let mut cpu = Cpu::new(register_count, self.ram.clone())?;
        cpu.set_output(Rc::clone(&self.output));
        self.cpu = Some(Rc::new(RefCell::new(cpu)));
        Ok(())
    }

    /// Replaces the RAM with a fresh zeroed one and binds it to the CPU, if any.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalChange`] once locked, [`ConfigError::InvalidSize`]
    /// when `size` is not positive.
    pub fn set_ram(&mut self, size: Number) -> Result<(), ConfigError> {
        self.ensure_unlocked()?;
        let ram = Rc::new(RefCell::new(Ram::new(size)?));
        if let Some(cpu) = &self.cpu {
            cpu.borrow_mut().set_ram(Some(Rc::clone(&ram)));
        }
        self.ram = Some(ram);
        Ok(())
    }

    /// Redirects `PRINTLN` output of this computer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalChange`] once locked.
    pub fn set_output(&mut self, output: SharedOutput) -> Result<(), ConfigError> {
        self.ensure_unlocked()?;
        if let Some(cpu) = &self.cpu {
            cpu.borrow_mut().set_output(Rc::clone(&output));
        }
        self.output = output;
        Ok(())
    }

    /// Installs an operating system driven by `algorithm` and locks the computer.
    ///
    /// Registers and RAM are zeroed first.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoRam`] without RAM, then [`ConfigError::NoCpu`] without a CPU.
    pub fn install_os(&mut self, algorithm: SchedulingAlgorithm) -> Result<Os, ConfigError> {
        let ram = self.ram.as_ref().ok_or(ConfigError::NoRam)?;
        let cpu = self.cpu.as_ref().ok_or(ConfigError::NoCpu)?;

        cpu.borrow_mut().clear_registers();
        ram.borrow_mut().clear();
        self.locked = true;
        debug!(scheduler = algorithm.name(), "OS installed; computer locked");

        Ok(Os::new(Rc::clone(cpu), algorithm))
    }

    /// Returns `true` once an OS has been installed.
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Deep-copies the CPU and RAM into a new, unlocked computer.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalChange`] if this computer is locked.
    pub fn try_clone(&self) -> Result<Self, ConfigError> {
        self.ensure_unlocked()?;
        Ok(self.deep_copy())
    }

    /// Overwrites this computer with a deep copy of `other`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalChange`] if this computer is locked.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), ConfigError> {
        self.ensure_unlocked()?;
        *self = other.deep_copy();
        Ok(())
    }

    /// Copies the components and rebinds the copied RAM into the copied CPU.
    fn deep_copy(&self) -> Self {
        let ram = self
            .ram
            .as_ref()
            .map(|ram| Rc::new(RefCell::new(ram.borrow().clone())));
        let cpu = self.cpu.as_ref().map(|cpu| {
            let mut copy = cpu.borrow().clone();
            copy.set_ram(ram.clone());
            Rc::new(RefCell::new(copy))
        });
        Self {
            cpu,
            ram,
            output: Rc::clone(&self.output),
            locked: false,
        }
    }

    /// Snapshot of the register file, if a CPU is present.
    pub fn registers(&self) -> Option<Vec<Number>> {
        self.cpu
            .as_ref()
            .map(|cpu| cpu.borrow().registers().as_slice().to_vec())
    }

    /// Snapshot of the RAM, if present.
    pub fn ram(&self) -> Option<Vec<Number>> {
        self.ram.as_ref().map(|ram| ram.borrow().as_slice().to_vec())
    }
}

impl Default for Computer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Computer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computer")
            .field("cpu", &self.cpu)
            .field("ram", &self.ram.as_ref().map(|ram| ram.borrow().len()))
            .field("output", &OutputDebug(&self.output))
            .field("locked", &self.locked)
            .finish()
    }
}
