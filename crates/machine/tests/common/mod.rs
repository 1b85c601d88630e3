//! Shared test infrastructure.

/// Computer construction and run helpers.
pub mod harness;
