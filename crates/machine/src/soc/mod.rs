//! System-level assembly of the machine.
//!
//! This module wires the components into a usable computer. It provides:
//! 1. **Computer:** Owns the CPU and RAM, and locks them once an OS is installed.
//! 2. **Output:** The channel `PRINTLN` writes to.

/// The configurable computer.
pub mod computer;

/// Numeric output channels.
pub mod output;

pub use computer::Computer;
pub use output::{BufferSink, OutputSink, SharedOutput, StdoutSink};
