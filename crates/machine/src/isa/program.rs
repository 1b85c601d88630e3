//! Compiled programs.
//!
//! A program is created once by the assembler and never mutated afterwards.
//! Cloning a [`Program`] clones the handle, not the instructions, so any
//! number of processes and schedulers may refer to the same sequence.

use std::ops::Deref;
use std::rc::Rc;

use super::instruction::Instruction;

/// An ordered, immutable, reference-counted instruction sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    instructions: Rc<[Instruction]>,
}

impl Program {
    /// Wraps a finished instruction sequence.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns `true` if both handles refer to the same sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.instructions, &other.instructions)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for Program {
    type Target = [Instruction];

    fn deref(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}
