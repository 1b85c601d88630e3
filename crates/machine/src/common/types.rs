//! Numeric domains of the machine.
//!
//! Every register cell, RAM cell, register id, address and literal lives in
//! the same signed 32-bit domain. Arithmetic is carried out in a widened
//! 64-bit domain and truncated back, so overflow wraps exactly like
//! two's-complement hardware.

/// Value held by a register or a RAM cell; also used for register ids and addresses.
pub type Number = i32;

/// Widened domain used by arithmetic instructions before narrowing back to [`Number`].
pub type Wide = i64;

/// Timer count, measured in executed instructions.
pub type Time = i32;
