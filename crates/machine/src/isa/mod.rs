//! Instruction set of the machine.
//!
//! This module defines the eight instructions, their execution semantics and
//! the immutable programs the assembler produces. It provides:
//! 1. **Instructions:** `SET`, `LOAD`, `STORE`, `ADD`, `SUB`, `MUL`, `DIV`, `PRINTLN`.
//! 2. **Programs:** Shared, never-mutated instruction sequences.
//! 3. **Disassembly:** Rendering instructions and programs back to assembly text.

/// Canonical assembly rendering of instructions and program listings.
pub mod disasm;

/// Instruction variants and their execution.
pub mod instruction;

/// Immutable shared instruction sequences.
pub mod program;

pub use disasm::listing;
pub use instruction::{Instruction, InstructionClass};
pub use program::Program;
