//! Operating system tests.

/// End-to-end batches through `Os::execute_programs`.
pub mod execution;
