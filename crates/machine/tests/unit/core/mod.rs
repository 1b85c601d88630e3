//! CPU tests.


/// Privilege levels.
pub mod mode;
