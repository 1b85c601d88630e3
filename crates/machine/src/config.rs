//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to build a computer
//! and its operating system. It provides:
//! 1. **Defaults:** Baseline machine dimensions and scheduling parameters.
//! 2. **Structures:** Hierarchical config for general, machine, and scheduler settings.
//! 3. **Enums:** The scheduling policy.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::load`) or built with
//! `Config::default()`. Every field may be omitted.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::types::{Number, Time};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::types::{Number, Time};

    /// Size of the register file (`R1`..`R16`).
    pub const REGISTERS: Number = 16;

    /// Number of RAM cells (`M0`..`M1023`).
    pub const RAM_SIZE: Number = 1024;

    /// Round-robin time slice, in instructions.
    pub const QUANTUM: Time = 4;
}

/// CPU scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SchedulingPolicy {
    /// First-come, first-served: each process runs to completion in admission order.
    #[default]
    #[serde(alias = "FCFS")]
    Fcfs,
    /// Round-robin: cyclic turns of at most `quantum` instructions.
    #[serde(alias = "RR")]
    RoundRobin,
    /// Shortest job first: admission sorted by program length, then run to completion.
    #[serde(alias = "SJF")]
    Sjf,
}

/// Top-level simulator configuration.
///
/// # Examples
///
/// ```
/// use uniproc_core::config::{Config, SchedulingPolicy};
///
/// let json = r#"{
///     "machine": { "registers": 4 },
///     "scheduler": { "policy": "RR", "quantum": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.machine.registers, 4);
/// assert_eq!(config.machine.ram_size, 1024);
/// assert_eq!(config.scheduler.policy, SchedulingPolicy::RoundRobin);
/// assert!(!config.general.trace_instructions);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Machine dimensions
    #[serde(default)]
    pub machine: MachineConfig,
    /// Scheduling algorithm
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction (at `trace` level).
    #[serde(default)]
    pub trace_instructions: bool,
}

/// Machine dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MachineConfig {
    /// Number of registers.
    #[serde(default = "MachineConfig::default_registers")]
    pub registers: Number,

    /// Number of RAM cells.
    #[serde(default = "MachineConfig::default_ram_size")]
    pub ram_size: Number,
}

impl MachineConfig {
    const fn default_registers() -> Number {
        defaults::REGISTERS
    }

    const fn default_ram_size() -> Number {
        defaults::RAM_SIZE
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            registers: defaults::REGISTERS,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Scheduling algorithm selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// Policy to install.
    #[serde(default)]
    pub policy: SchedulingPolicy,

    /// Time slice for round-robin; ignored by the other policies.
    #[serde(default = "SchedulerConfig::default_quantum")]
    pub quantum: Time,
}

impl SchedulerConfig {
    const fn default_quantum() -> Time {
        defaults::QUANTUM
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            quantum: defaults::QUANTUM,
        }
    }
}
