//! Machine-wide constants.

use super::types::Number;

/// First valid register id (`R1`).
pub const REGISTER_ORIGIN: Number = 1;

/// First valid RAM address (`M0`).
pub const RAM_ORIGIN: Number = 0;

/// Mnemonics accepted by the assembler, in encoding order.
pub const MNEMONICS: [&str; 8] = ["SET", "LOAD", "STORE", "ADD", "SUB", "MUL", "DIV", "PRINTLN"];
