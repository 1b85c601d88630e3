//! Single-processor computer simulator library.
//!
//! This crate implements a small machine with an interrupt-driven operating system:
//! 1. **Common:** Numeric domains, faults, and bounds-checked register/RAM storage.
//! 2. **ISA:** Eight instructions, immutable programs, and disassembly.
//! 3. **Assembler:** Line-oriented translation of program text into programs.
//! 4. **Core:** The CPU with privilege levels, a timer, an interrupt line and its run loop.
//! 5. **OS:** Processes, scheduling algorithms (FCFS, round-robin, SJF), and dispatch.
//! 6. **SoC:** The configurable computer and its output channel.
//! 7. **Simulation:** Configuration and run statistics.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use uniproc_core::{BufferSink, Computer, create_fcfs_scheduling};
//!
//! let output = BufferSink::shared();
//! let mut computer = Computer::new();
//! computer.set_output(output.clone()).unwrap();
//! computer.set_cpu(4).unwrap();
//! computer.set_ram(16).unwrap();
//!
//! let os = computer.install_os(create_fcfs_scheduling()).unwrap();
//! os.execute_programs(&["SET R1 3\nPRINTLN R1"]).unwrap();
//! assert_eq!(output.borrow().contents(), "3\n");
//! ```

/// Assembler (program text to instruction sequences).
pub mod asm;
/// Common types and constants (numeric domains, faults, memory).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (privilege levels, control operations, execution loop, interrupts).
pub mod core;
/// Instruction set (instructions, programs, disassembly).
pub mod isa;
/// Operating system (processes, schedulers, dispatch).
pub mod os;
/// System level (computer, output channel).
pub mod soc;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The CPU; normally owned by a [`Computer`].
pub use crate::core::Cpu;
/// Crate-wide fault type and result alias.
pub use crate::common::{Error, Result};
/// Operating system and scheduling factories.
pub use crate::os::{
    Os, SchedulingAlgorithm, create_fcfs_scheduling, create_rr_scheduling, create_sjf_scheduling,
};
/// Top-level machine and output channels.
pub use crate::soc::{BufferSink, Computer, OutputSink, SharedOutput, StdoutSink};
/// Run statistics.
pub use crate::stats::RunStats;
