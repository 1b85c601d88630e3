//! Instruction definitions and execution.
//!
//! Each instruction captures its operands (register ids, addresses, literals)
//! at compile time. Execution reads every operand before writing anything,
//! so a faulting instruction leaves registers and RAM untouched.

use crate::common::error::Fault;
use crate::common::memory::{Ram, RegisterSet};
use crate::common::types::{Number, Wide};
use crate::soc::output::OutputSink;

/// A single machine instruction with its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `SET R<reg> <value>`: register ← literal.
    Set {
        /// Destination register.
        reg: Number,
        /// Literal value.
        value: Number,
    },
    /// `LOAD R<dest> M<addr>`: register ← RAM.
    Load {
        /// Destination register.
        dest: Number,
        /// Source address.
        addr: Number,
    },
    /// `STORE M<addr> R<src>`: RAM ← register.
    Store {
        /// Destination address.
        addr: Number,
        /// Source register.
        src: Number,
    },
    /// `ADD R<dest> R<src>`: dest ← dest + src.
    Add {
        /// Destination (and left operand) register.
        dest: Number,
        /// Right operand register.
        src: Number,
    },
    /// `SUB R<dest> R<src>`: dest ← dest - src.
    Sub {
        /// Destination (and left operand) register.
        dest: Number,
        /// Right operand register.
        src: Number,
    },
    /// `MUL R<dest> R<src>`: dest ← dest * src.
    Mul {
        /// Destination (and left operand) register.
        dest: Number,
        /// Right operand register.
        src: Number,
    },
    /// `DIV R<dest> R<src>`: dest ← dest / src, truncating.
    Div {
        /// Destination (and dividend) register.
        dest: Number,
        /// Divisor register.
        src: Number,
    },
    /// `PRINTLN R<reg>`: writes the register value as a line of output.
    Println {
        /// Register to print.
        reg: Number,
    },
}

/// Coarse grouping of instructions, used for run statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// `SET`.
    Set,
    /// `LOAD` and `STORE`.
    Memory,
    /// `ADD`, `SUB`, `MUL`, `DIV`.
    Arithmetic,
    /// `PRINTLN`.
    Output,
}

impl Instruction {
    /// Assembly mnemonic of the instruction.
    pub const fn opcode(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Load { .. } => "LOAD",
            Self::Store { .. } => "STORE",
            Self::Add { .. } => "ADD",
            Self::Sub { .. } => "SUB",
            Self::Mul { .. } => "MUL",
            Self::Div { .. } => "DIV",
            Self::Println { .. } => "PRINTLN",
        }
    }

    /// Statistics class of the instruction.
    pub const fn class(&self) -> InstructionClass {
        match self {
            Self::Set { .. } => InstructionClass::Set,
            Self::Load { .. } | Self::Store { .. } => InstructionClass::Memory,
            Self::Add { .. } | Self::Sub { .. } | Self::Mul { .. } | Self::Div { .. } => {
                InstructionClass::Arithmetic
            }
            Self::Println { .. } => InstructionClass::Output,
        }
    }

    /// Applies the instruction to the machine state.
    ///
    /// # Arguments
    ///
    /// * `registers` - The CPU register file.
    /// * `ram` - The bound RAM, if any.
    /// * `output` - Destination of `PRINTLN`.
    ///
    /// # Errors
    ///
    /// Out-of-range register or address, division by zero, or a memory
    /// instruction without RAM. State is unchanged when an error is returned.
    pub fn execute(
        &self,
        registers: &mut RegisterSet,
        ram: Option<&mut Ram>,
        output: &mut dyn OutputSink,
    ) -> Result<(), Fault> {
        match *self {
            Self::Set { reg, value } => registers.store(reg, value),
            Self::Load { dest, addr } => {
                let ram = ram.ok_or(Fault::RamNotBound)?;
                let value = ram.load(addr)?;
                registers.store(dest, value)
            }
            Self::Store { addr, src } => {
                let ram = ram.ok_or(Fault::RamNotBound)?;
                let value = registers.load(src)?;
                ram.store(addr, value)
            }
            Self::Add { dest, src } => arithmetic(registers, dest, src, |l, r| Ok(l + r)),
            Self::Sub { dest, src } => arithmetic(registers, dest, src, |l, r| Ok(l - r)),
            Self::Mul { dest, src } => arithmetic(registers, dest, src, |l, r| Ok(l * r)),
            Self::Div { dest, src } => arithmetic(registers, dest, src, |l, r| {
                if r == 0 {
                    return Err(Fault::DivisionByZero);
                }
                Ok(l / r)
            }),
            Self::Println { reg } => {
                let value = registers.load(reg)?;
                output.write_line(value)
            }
        }
    }
}

/// Computes `dest ← op(dest, src)` in the widened domain and truncates back.
///
/// Both operands are read (and `op` may fail) before the destination is written.
fn arithmetic(
    registers: &mut RegisterSet,
    dest: Number,
    src: Number,
    op: impl FnOnce(Wide, Wide) -> Result<Wide, Fault>,
) -> Result<(), Fault> {
    let rhs = registers.load(src)?;
    let lhs = registers.load(dest)?;
    let result = op(Wide::from(lhs), Wide::from(rhs))?;
    registers.store(dest, result as Number)
}
