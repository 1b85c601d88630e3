//! # Computer Tests
//!
//! Component configuration, the installation lock and deep copies.

use pretty_assertions::assert_eq;
use uniproc_core::common::ConfigError;
use uniproc_core::config::MachineConfig;
use uniproc_core::{BufferSink, Computer, create_fcfs_scheduling};

use crate::common::harness::TestContext;

#[test]
fn test_install_requires_ram_then_cpu() {
    let mut computer = Computer::new();
    assert_eq!(
        computer.install_os(create_fcfs_scheduling()).unwrap_err(),
        ConfigError::NoRam
    );

    computer.set_cpu(2).unwrap();
    assert_eq!(
        computer.install_os(create_fcfs_scheduling()).unwrap_err(),
        ConfigError::NoRam
    );

    let mut computer = Computer::new();
    computer.set_ram(2).unwrap();
    assert_eq!(
        computer.install_os(create_fcfs_scheduling()).unwrap_err(),
        ConfigError::NoCpu
    );
    assert!(!computer.is_locked());
}

#[test]
fn test_invalid_sizes() {
    let mut computer = Computer::new();
    assert!(matches!(
        computer.set_cpu(0),
        Err(ConfigError::InvalidSize { size: 0, .. })
    ));
    assert!(matches!(
        computer.set_ram(-1),
        Err(ConfigError::InvalidSize { size: -1, .. })
    ));
}

#[test]
fn test_ram_is_rebound_into_existing_cpu() {
    let mut ctx = TestContext::new(2, 2);
    ctx.computer.set_ram(8).unwrap();
    let os = ctx.boot(create_fcfs_scheduling());
    os.execute_programs(&["SET R1 5\nSTORE M7 R1\nLOAD R2 M7\nPRINTLN R2"])
        .unwrap();
    assert_eq!(ctx.printed(), vec![5]);
    assert_eq!(ctx.computer.ram().unwrap()[7], 5);
}

#[test]
fn test_install_locks_the_computer() {
    let mut ctx = TestContext::default();
    let _os = ctx.boot(create_fcfs_scheduling());
    let computer = &mut ctx.computer;

    assert!(computer.is_locked());
    assert_eq!(computer.set_cpu(4), Err(ConfigError::IllegalChange));
    assert_eq!(computer.set_ram(4), Err(ConfigError::IllegalChange));
    assert_eq!(
        computer.set_output(BufferSink::shared()),
        Err(ConfigError::IllegalChange)
    );
    assert_eq!(computer.try_clone().unwrap_err(), ConfigError::IllegalChange);

    let other = Computer::new();
    assert_eq!(computer.assign_from(&other), Err(ConfigError::IllegalChange));
}

#[test]
fn test_install_clears_registers_and_ram() {
    let mut ctx = TestContext::new(2, 2);
    let os = ctx.boot(create_fcfs_scheduling());
    os.execute_programs(&["SET R1 3\nSTORE M1 R1"]).unwrap();
    assert_eq!(ctx.computer.registers(), Some(vec![3, 0]));
    assert_eq!(ctx.computer.ram(), Some(vec![0, 3]));
}

#[test]
fn test_clone_is_deep_and_unlocked() {
    let mut original = TestContext::new(2, 4);
    let mut copy = original.computer.try_clone().unwrap();
    assert!(!copy.is_locked());

    let os = copy.install_os(create_fcfs_scheduling()).unwrap();
    os.execute_programs(&["SET R2 8\nSTORE M0 R2"]).unwrap();
    assert_eq!(copy.ram(), Some(vec![8, 0, 0, 0]));
    assert_eq!(original.computer.ram(), Some(vec![0, 0, 0, 0]));
    assert_eq!(original.computer.registers(), Some(vec![0, 0]));

    // The source stays configurable.
    original.computer.set_cpu(3).unwrap();
}

#[test]
fn test_clone_of_partial_computer() {
    let mut computer = Computer::new();
    computer.set_ram(3).unwrap();
    let copy = computer.try_clone().unwrap();
    assert_eq!(copy.ram(), Some(vec![0, 0, 0]));
    assert_eq!(copy.registers(), None);
}

#[test]
fn test_assign_from_locked_source() {
    let mut source = TestContext::new(3, 3);
    let _os = source.boot(create_fcfs_scheduling());

    let mut target = Computer::new();
    target.assign_from(&source.computer).unwrap();
    assert!(!target.is_locked());
    assert_eq!(target.registers(), Some(vec![0, 0, 0]));
    assert_eq!(target.ram(), Some(vec![0, 0, 0]));
    let _os = target.install_os(create_fcfs_scheduling()).unwrap();
}

#[test]
fn test_from_config() {
    let config = MachineConfig {
        registers: 3,
        ram_size: 5,
    };
    let computer = Computer::from_config(&config).unwrap();
    assert_eq!(computer.registers().map(|r| r.len()), Some(3));
    assert_eq!(computer.ram().map(|r| r.len()), Some(5));

    let bad = MachineConfig {
        registers: 0,
        ram_size: 5,
    };
    assert!(Computer::from_config(&bad).is_err());
}
