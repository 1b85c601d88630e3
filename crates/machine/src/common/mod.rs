//! Common types shared by every component of the simulator.
//!
//! This module provides the fundamental building blocks used across the crate:
//! 1. **Numeric Domains:** Cell values, register ids, addresses and timer counts.
//! 2. **Constants:** Index origins of the register file and RAM.
//! 3. **Error Handling:** The fault taxonomy (configuration, compilation, runtime, protection).
//! 4. **Storage:** The bounds-checked memory used for both registers and RAM.

/// Index origins and other machine-wide constants.
pub mod constants;

/// Fault types and the crate-wide `Result`.
pub mod error;

/// Bounds-checked fixed-size storage (register file and RAM).
pub mod memory;

/// Numeric domain aliases.
pub mod types;

pub use error::{CompileError, ConfigError, Error, Fault, ProtectionFault, Result};
pub use memory::{AddressSpace, Memory, Ram, RegisterSet, RegisterSpace, SharedRam, Space};
pub use types::{Number, Time, Wide};
