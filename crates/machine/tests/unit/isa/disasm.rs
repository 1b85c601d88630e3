//! # Disassembly Tests
//!
//! Canonical rendering of each instruction form and numbered listings.

use pretty_assertions::assert_eq;
use rstest::rstest;
use uniproc_core::asm::compile;
use uniproc_core::isa::{Instruction, listing};

#[rstest]
#[case(Instruction::Set { reg: 1, value: -5 }, "SET R1 -5")]
#[case(Instruction::Load { dest: 2, addr: 10 }, "LOAD R2 M10")]
#[case(Instruction::Store { addr: 0, src: 3 }, "STORE M0 R3")]
#[case(Instruction::Sub { dest: 1, src: 2 }, "SUB R1 R2")]
#[case(Instruction::Mul { dest: 3, src: 3 }, "MUL R3 R3")]
#[case(Instruction::Div { dest: 4, src: 1 }, "DIV R4 R1")]
#[case(Instruction::Println { reg: 16 }, "PRINTLN R16")]
fn test_instruction_text(#[case] instruction: Instruction, #[case] text: &str) {
    assert_eq!(instruction.to_string(), text);
    assert_eq!(instruction.opcode(), text.split(' ').next().unwrap());
}

#[test]
fn test_listing_numbers_instructions() {
    let program = compile("SET R1 1\n\nADD R1 R1\nPRINTLN R1").unwrap();
    assert_eq!(
        listing(&program),
        "   0  SET R1 1\n   1  ADD R1 R1\n   2  PRINTLN R1\n"
    );
}

#[test]
fn test_listing_of_empty_program() {
    assert_eq!(listing(&compile("").unwrap()), "");
}
