//! Processes: execution cursors over programs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::asm;
use crate::common::error::CompileError;
use crate::isa::{Instruction, Program};

/// Process shared between the scheduler's active list and the CPU.
pub type ProcessRef = Rc<RefCell<Process>>;

/// A cursor over one immutable [`Program`].
///
/// A process only ever moves forward; once exhausted it is never reused.
#[derive(Clone, Debug)]
pub struct Process {
    program: Program,
    position: usize,
}

impl Process {
    /// Creates a process positioned at the first instruction of `program`.
    pub const fn new(program: Program) -> Self {
        Self {
            program,
            position: 0,
        }
    }

    /// Assembles `text` and wraps the result in a fresh shared process.
    ///
    /// # Errors
    ///
    /// Returns the first compilation fault of `text`.
    pub fn compile(text: &str) -> Result<ProcessRef, CompileError> {
        Ok(Self::new(asm::compile(text)?).into_shared())
    }

    /// Wraps the process for sharing with a scheduler and a CPU.
    pub fn into_shared(self) -> ProcessRef {
        Rc::new(RefCell::new(self))
    }

    /// The underlying program, read-only.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Returns `true` while instructions remain.
    pub fn has_next(&self) -> bool {
        self.position < self.program.len()
    }

    /// Index of the next instruction to run.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of instructions not yet handed out.
    pub fn remaining(&self) -> usize {
        self.program.len() - self.position
    }
}

impl Iterator for Process {
    type Item = Instruction;

    /// Returns the instruction at the cursor and advances past it.
    fn next(&mut self) -> Option<Instruction> {
        let instruction = self.program.get(self.position).copied()?;
        self.position += 1;
        Some(instruction)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Process {}
