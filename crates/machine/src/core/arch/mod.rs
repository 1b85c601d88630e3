//! Architecture-level definitions.
//!
//! The machine has a two-level protection model: supervisor code may change
//! CPU control state, user code only runs job instructions.

/// Privilege level definitions.
pub mod mode;
