//! Processor implementation.
//!
//! This module contains the execution engine: privilege levels and the CPU
//! with its timer, interrupt line and run loop.

/// Architecture-level definitions (privilege levels).
pub mod arch;

/// CPU state, privileged control operations and the execution loop.
pub mod cpu;

pub use self::arch::mode::PrivilegeLevel;
pub use self::cpu::{Cpu, InterruptHandler};
