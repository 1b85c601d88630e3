//! Fault definitions.
//!
//! This module defines the error handling of the simulator. It provides:
//! 1. **Configuration Faults:** Invalid sizes, reconfiguration after the OS is installed, missing parts.
//! 2. **Compilation Faults:** Unknown opcodes and malformed operands, with line text and offset.
//! 3. **Runtime Faults:** Out-of-range registers and addresses, division by zero, failed output.
//! 4. **Protection Faults:** Privileged CPU operations attempted from user level.
//!
//! Every fault is propagated to the caller; nothing in the crate retries or swallows one.

use thiserror::Error;

use super::types::Number;

/// Faults raised while configuring a computer or a scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A memory (register file or RAM) was requested with a non-positive size.
    #[error("Illegal argument: {what} size must be positive, got {size}")]
    InvalidSize {
        /// Which memory was being built (`"register file"` or `"RAM"`).
        what: &'static str,
        /// The rejected size.
        size: Number,
    },

    /// A round-robin quantum was not positive.
    #[error("Illegal argument: quantum must be positive, got {0}")]
    InvalidQuantum(Number),

    /// The computer is locked because an OS has already been installed.
    #[error("OS already installed")]
    IllegalChange,

    /// `install_os` was called before RAM was configured.
    #[error("No RAM")]
    NoRam,

    /// `install_os` was called before a CPU was configured.
    #[error("No CPU")]
    NoCpu,

    /// A configuration document could not be read or deserialized.
    #[error("Invalid configuration: {0}")]
    Parse(String),
}

/// Faults raised by the assembler.
///
/// Compilation stops at the first faulting line and produces no program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The opcode keyword is not one of the eight known mnemonics.
    #[error("Unknown instruction: {instruction}")]
    UnknownInstruction {
        /// The offending opcode token.
        instruction: String,
        /// 1-based line number within the program text.
        line_number: usize,
    },

    /// An operand was malformed or the line carried trailing characters.
    #[error("Parser error: {cause} in: \"{line}\":{position}")]
    Parse {
        /// Human-readable reason.
        cause: String,
        /// The line text, with any trailing carriage return removed.
        line: String,
        /// Character offset where parsing failed.
        position: usize,
        /// 1-based line number within the program text.
        line_number: usize,
    },
}

impl CompileError {
    /// Returns the 1-based line number the fault was raised on.
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnknownInstruction { line_number, .. } | Self::Parse { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Re-targets the fault at the given 1-based line number.
    pub(crate) fn at_line(mut self, number: usize) -> Self {
        match &mut self {
            Self::UnknownInstruction { line_number, .. } | Self::Parse { line_number, .. } => {
                *line_number = number;
            }
        }
        self
    }
}

/// Faults raised while instructions execute.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// Register id outside the register file.
    #[error("Register out of range: {0}")]
    InvalidRegister(Number),

    /// RAM address outside the configured RAM.
    #[error("Address out of range: {0}")]
    InvalidAddress(Number),

    /// `DIV` with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// A memory instruction ran on a CPU with no RAM bound.
    #[error("No RAM bound to the CPU")]
    RamNotBound,

    /// An interrupt was raised while no handler was installed.
    #[error("No interrupt handler installed")]
    NoInterruptHandler,

    /// The output channel rejected a `PRINTLN` line.
    #[error("Output failed: {0}")]
    Output(String),
}

/// A privileged CPU operation was attempted from user level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("General protection fault: {operation} requires supervisor level")]
pub struct ProtectionFault {
    /// Name of the rejected operation.
    pub operation: &'static str,
}

/// Any fault the simulator can raise.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`CompileError`].
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// See [`Fault`].
    #[error(transparent)]
    Runtime(#[from] Fault),

    /// See [`ProtectionFault`].
    #[error(transparent)]
    Protection(#[from] ProtectionFault),
}

/// Crate-wide result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
