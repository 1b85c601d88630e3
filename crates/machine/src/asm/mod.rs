//! Assembler: text programs to instruction sequences.
//!
//! The assembler is stateless. [`compile`] splits the text into lines,
//! tolerates DOS line endings, skips whitespace-only lines and translates
//! every other line into exactly one instruction:
//!
//! ```text
//! SET     R<reg> <signed-int>
//! LOAD    R<reg> M<addr>
//! STORE   M<addr> R<reg>
//! ADD     R<dest> R<src>
//! SUB     R<dest> R<src>
//! MUL     R<dest> R<src>
//! DIV     R<dest> R<src>
//! PRINTLN R<reg>
//! ```
//!
//! The first faulting line aborts compilation; no partial program is returned.

mod parser;

use tracing::debug;

use crate::common::error::CompileError;
use crate::isa::{Instruction, Program};

use self::parser::LineParser;

/// Compiles a whole program text.
///
/// # Errors
///
/// Returns the fault of the first line that is not a valid instruction or blank.
///
/// # Examples
///
/// ```
/// use uniproc_core::asm::compile;
/// let program = compile("SET R1 3\n\nPRINTLN R1\r\n").unwrap();
/// assert_eq!(program.len(), 2);
/// ```
pub fn compile(text: &str) -> Result<Program, CompileError> {
    let mut instructions = Vec::new();
    for (index, raw) in text.split('\n').enumerate() {
        if let Some(instruction) = compile_line(raw).map_err(|e| e.at_line(index + 1))? {
            instructions.push(instruction);
        }
    }
    debug!(instructions = instructions.len(), "compiled program");
    Ok(Program::new(instructions))
}

/// Compiles a single line; `Ok(None)` for a blank line.
///
/// Faults report line number 1.
///
/// # Errors
///
/// Unknown opcode, malformed operand, or trailing characters.
pub fn compile_line(raw: &str) -> Result<Option<Instruction>, CompileError> {
    let mut parser = LineParser::new(raw);
    let op = parser.word();
    let instruction = match op.as_str() {
        "" => return Ok(None),
        "SET" => {
            let reg = parser.register()?;
            let value = parser.number()?;
            Instruction::Set { reg, value }
        }
        "LOAD" => {
            let dest = parser.register()?;
            let addr = parser.address()?;
            Instruction::Load { dest, addr }
        }
        "STORE" => {
            let addr = parser.address()?;
            let src = parser.register()?;
            Instruction::Store { addr, src }
        }
        "ADD" => {
            let (dest, src) = parser.register_pair()?;
            Instruction::Add { dest, src }
        }
        "SUB" => {
            let (dest, src) = parser.register_pair()?;
            Instruction::Sub { dest, src }
        }
        "MUL" => {
            let (dest, src) = parser.register_pair()?;
            Instruction::Mul { dest, src }
        }
        "DIV" => {
            let (dest, src) = parser.register_pair()?;
            Instruction::Div { dest, src }
        }
        "PRINTLN" => {
            let reg = parser.register()?;
            Instruction::Println { reg }
        }
        _ => {
            return Err(CompileError::UnknownInstruction {
                instruction: op,
                line_number: 1,
            });
        }
    };
    parser.end()?;
    Ok(Some(instruction))
}
