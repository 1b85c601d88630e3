//! Instruction Disassembler.
//!
//! Renders instructions back into the canonical assembly text accepted by
//! the assembler, for trace logging, listings and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use uniproc_core::isa::Instruction;
//! let text = Instruction::Add { dest: 1, src: 2 }.to_string();
//! assert_eq!(text, "ADD R1 R2");
//! ```

use std::fmt;

use super::instruction::Instruction;
use super::program::Program;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match *self {
            Self::Set { reg, value } => write!(f, "{op} R{reg} {value}"),
            Self::Load { dest, addr } => write!(f, "{op} R{dest} M{addr}"),
            Self::Store { addr, src } => write!(f, "{op} M{addr} R{src}"),
            Self::Add { dest, src }
            | Self::Sub { dest, src }
            | Self::Mul { dest, src }
            | Self::Div { dest, src } => write!(f, "{op} R{dest} R{src}"),
            Self::Println { reg } => write!(f, "{op} R{reg}"),
        }
    }
}

impl fmt::Display for Program {
    /// One instruction per line, in canonical form; re-assembles to an equal program.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self.iter() {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Renders a numbered listing of `program`, one instruction per line.
///
/// ```
/// use uniproc_core::isa::{listing, Instruction, Program};
/// let program = Program::new(vec![Instruction::Println { reg: 3 }]);
/// assert_eq!(listing(&program), "   0  PRINTLN R3\n");
/// ```
pub fn listing(program: &Program) -> String {
    program
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (index, instruction)| {
            out.push_str(&format!("{index:>4}  {instruction}\n"));
            out
        })
}
