//! # OS Execution Tests
//!
//! Runs batches of programs end to end and checks output order, fault
//! propagation and statistics for each scheduling algorithm.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mockall::Sequence;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uniproc_core::common::{CompileError, Fault};
use uniproc_core::{
    Computer, Error, create_fcfs_scheduling, create_rr_scheduling, create_sjf_scheduling,
};

use crate::common::harness::{TestContext, printer, run_batch};
use crate::common::mocks::MockOutput;

#[test]
fn test_set_and_print() {
    let (outcome, printed, _) = run_batch(create_fcfs_scheduling(), &["SET R1 3\nPRINTLN R1"]);
    outcome.unwrap();
    assert_eq!(printed, vec![3]);
}

#[test]
fn test_arithmetic_program() {
    let program = "SET R1 6\nSET R2 7\nMUL R1 R2\nSET R3 -2\n\
                   DIV R1 R3\nPRINTLN R1\nSUB R1 R2\nPRINTLN R1";
    let (outcome, printed, _) = run_batch(create_fcfs_scheduling(), &[program]);
    outcome.unwrap();
    assert_eq!(printed, vec![-21, -28]);
}

#[test]
fn test_fcfs_runs_each_program_to_completion() {
    let a = printer(1, 3);
    let b = printer(2, 1);
    let (outcome, printed, stats) = run_batch(create_fcfs_scheduling(), &[&a, &b]);
    outcome.unwrap();
    assert_eq!(printed, vec![1, 1, 1, 2]);
    assert_eq!(stats.instructions_retired, 6);
    assert_eq!(stats.interrupts, 2);
    assert_eq!(stats.timer_expirations, 0);
    assert_eq!(stats.context_switches, 2);
}

#[test]
fn test_round_robin_interleaves_slices() {
    let a = printer(1, 3);
    let b = printer(2, 1);
    let (outcome, printed, stats) = run_batch(create_rr_scheduling(2).unwrap(), &[&a, &b]);
    outcome.unwrap();
    assert_eq!(printed, vec![1, 2, 1, 1]);
    assert_eq!(stats.timer_expirations, 3);
    assert_eq!(stats.context_switches, 3);
    assert_eq!(stats.runs_completed, 1);
}

#[test]
fn test_sjf_runs_shortest_first() {
    let a = printer(1, 3);
    let b = printer(2, 1);
    let c = printer(3, 1);
    let (outcome, printed, _) = run_batch(create_sjf_scheduling(), &[&a, &b, &c]);
    outcome.unwrap();
    assert_eq!(printed, vec![2, 3, 1, 1, 1]);
}

#[test]
fn test_empty_batch_and_empty_programs() {
    let (outcome, printed, _) = run_batch::<&str>(create_fcfs_scheduling(), &[]);
    outcome.unwrap();
    assert!(printed.is_empty());

    let body = printer(1, 1);
    let (outcome, printed, _) = run_batch(
        create_rr_scheduling(1).unwrap(),
        &["", body.as_str(), "\n\n"],
    );
    outcome.unwrap();
    assert_eq!(printed, vec![1]);
}

#[test]
fn test_compile_fault_aborts_before_running() {
    let (outcome, printed, stats) =
        run_batch(create_fcfs_scheduling(), &["SET R1 1\nPRINTLN R1", "PRINTLN R1\nBAD"]);
    assert_eq!(
        outcome,
        Err(Error::Compile(CompileError::UnknownInstruction {
            instruction: "BAD".to_owned(),
            line_number: 2,
        }))
    );
    assert!(printed.is_empty());
    assert_eq!(stats.instructions_retired, 0);
}

#[test]
fn test_division_by_zero_stops_the_batch() {
    let (outcome, printed, _) = run_batch(
        create_fcfs_scheduling(),
        &["SET R1 5\nPRINTLN R1\nDIV R1 R2\nPRINTLN R1", "SET R3 1\nPRINTLN R3"],
    );
    assert_eq!(outcome, Err(Error::Runtime(Fault::DivisionByZero)));
    assert_eq!(printed, vec![5]);
}

#[test]
fn test_invalid_register_is_a_runtime_fault() {
    let mut ctx = TestContext::new(2, 4);
    let os = ctx.boot(create_fcfs_scheduling());
    assert_eq!(
        os.execute_programs(&["PRINTLN R3"]),
        Err(Error::Runtime(Fault::InvalidRegister(3)))
    );
}

#[test]
fn test_os_recovers_after_a_fault() {
    let mut ctx = TestContext::default();
    let os = ctx.boot(create_rr_scheduling(1).unwrap());
    assert!(os.execute_programs(&["LOAD R1 M99"]).is_err());
    os.execute_programs(&["SET R1 4\nPRINTLN R1"]).unwrap();
    assert_eq!(ctx.printed(), vec![4]);
}

#[test]
fn test_empty_batch_after_a_fault_runs_nothing() {
    let mut ctx = TestContext::default();
    let os = ctx.boot(create_fcfs_scheduling());
    assert_eq!(
        os.execute_programs(&["SET R1 7\nDIV R1 R2\nPRINTLN R1\nPRINTLN R1"]),
        Err(Error::Runtime(Fault::DivisionByZero))
    );
    os.execute_programs::<&str>(&[]).unwrap();
    assert!(ctx.printed().is_empty());
    assert_eq!(os.stats().instructions_retired, 1);
}

#[test]
fn test_failed_output_is_a_runtime_fault() {
    let mut sink = MockOutput::new();
    sink.expect_write_line()
        .with(eq(1))
        .times(1)
        .return_const(Err(Fault::Output("broken pipe".to_owned())));

    let mut computer = Computer::new();
    computer.set_output(Rc::new(RefCell::new(sink))).unwrap();
    computer.set_cpu(1).unwrap();
    computer.set_ram(1).unwrap();
    let os = computer.install_os(create_fcfs_scheduling()).unwrap();
    assert_eq!(
        os.execute_programs(&["SET R1 1\nPRINTLN R1\nPRINTLN R1"]),
        Err(Error::Runtime(Fault::Output("broken pipe".to_owned())))
    );
}

#[test]
fn test_state_persists_between_batches() {
    let mut ctx = TestContext::default();
    let os = ctx.boot(create_fcfs_scheduling());
    os.execute_programs(&["SET R1 9\nSTORE M3 R1"]).unwrap();
    os.execute_programs(&["LOAD R2 M3\nPRINTLN R1\nPRINTLN R2"]).unwrap();
    assert_eq!(ctx.printed(), vec![9, 9]);
    assert_eq!(os.stats().runs_completed, 2);
}

#[test]
fn test_runs_are_deterministic() {
    let programs = [printer(1, 4), printer(2, 2), printer(3, 5)];
    let texts: Vec<&str> = programs.iter().map(String::as_str).collect();
    let first = run_batch(create_rr_scheduling(3).unwrap(), &texts);
    let second = run_batch(create_rr_scheduling(3).unwrap(), &texts);
    assert_eq!(first, second);
}

#[test]
fn test_output_reaches_the_configured_sink() {
    let mut sink = MockOutput::new();
    let mut seq = Sequence::new();
    sink.expect_write_line()
        .with(eq(3))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(Ok(()));
    sink.expect_write_line()
        .with(eq(6))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(Ok(()));

    let mut computer = Computer::new();
    computer.set_output(Rc::new(RefCell::new(sink))).unwrap();
    computer.set_cpu(2).unwrap();
    computer.set_ram(1).unwrap();
    let os = computer.install_os(create_fcfs_scheduling()).unwrap();
    os.execute_programs(&["SET R1 3\nPRINTLN R1\nADD R1 R1\nPRINTLN R1"])
        .unwrap();
}

/// Reference model: rotate a queue, running at most `quantum` instructions per turn.
fn round_robin_model(lengths: &[usize], quantum: usize) -> Vec<i32> {
    let mut queue: VecDeque<(i32, usize)> = lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| (i as i32 + 1, len))
        .collect();
    let mut printed = Vec::new();
    while let Some((id, left)) = queue.pop_front() {
        let slice = left.min(quantum);
        // The first instruction of every program is the SET.
        let total = lengths[id as usize - 1];
        for step in (total - left)..(total - left + slice) {
            if step > 0 {
                printed.push(id);
            }
        }
        if left > slice {
            queue.push_back((id, left - slice));
        }
    }
    printed
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_robin_matches_rotation_model(
        prints in prop::collection::vec(0usize..7, 1..6),
        quantum in 1i32..5,
    ) {
        let programs: Vec<String> = prints
            .iter()
            .enumerate()
            .map(|(i, &n)| printer(i as i32 + 1, n))
            .collect();
        let texts: Vec<&str> = programs.iter().map(String::as_str).collect();
        let lengths: Vec<usize> = prints.iter().map(|n| n + 1).collect();

        let (outcome, printed, stats) = run_batch(create_rr_scheduling(quantum).unwrap(), &texts);
        prop_assert!(outcome.is_ok());
        prop_assert_eq!(printed, round_robin_model(&lengths, quantum as usize));
        prop_assert_eq!(stats.instructions_retired, lengths.iter().sum::<usize>() as u64);
    }
}
