//! # Fault Tests
//!
//! Checks fault messages and the conversions into the umbrella `Error`.

use pretty_assertions::assert_eq;
use uniproc_core::Error;
use uniproc_core::common::{CompileError, ConfigError, Fault, ProtectionFault};

#[test]
fn test_config_messages() {
    assert_eq!(ConfigError::IllegalChange.to_string(), "OS already installed");
    assert_eq!(ConfigError::NoRam.to_string(), "No RAM");
    assert_eq!(ConfigError::NoCpu.to_string(), "No CPU");
}

#[test]
fn test_parse_message_carries_line_and_offset() {
    let err = CompileError::Parse {
        cause: "Trailing characters".to_owned(),
        line: "PRINTLN R1 R2".to_owned(),
        position: 11,
        line_number: 1,
    };
    assert_eq!(
        err.to_string(),
        "Parser error: Trailing characters in: \"PRINTLN R1 R2\":11"
    );
}

#[test]
fn test_protection_fault_names_operation() {
    let err = ProtectionFault { operation: "sleep" };
    assert!(err.to_string().starts_with("General protection fault"));
    assert!(err.to_string().contains("sleep"));
}

#[test]
fn test_umbrella_conversions() {
    let err: Error = Fault::DivisionByZero.into();
    assert_eq!(err, Error::Runtime(Fault::DivisionByZero));
    assert_eq!(err.to_string(), "Division by zero");

    let err: Error = ConfigError::NoCpu.into();
    assert!(matches!(err, Error::Config(ConfigError::NoCpu)));
}
