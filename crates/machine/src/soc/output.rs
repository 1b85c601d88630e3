//! Numeric output channel.
//!
//! `PRINTLN` writes one decimal line per execution to the computer's output
//! channel. The channel is a trait object so the console, tests and
//! embedders can each decide where the lines go.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::common::error::Fault;
use crate::common::types::Number;

/// Destination of `PRINTLN` output.
pub trait OutputSink {
    /// Emits `value` as one line of decimal text.
    ///
    /// # Errors
    ///
    /// [`Fault::Output`] when the line cannot be delivered.
    fn write_line(&mut self, value: Number) -> Result<(), Fault>;
}

/// Output channel shared between a computer, its CPU and the caller.
pub type SharedOutput = Rc<RefCell<dyn OutputSink>>;

/// Writes each value to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, value: Number) -> Result<(), Fault> {
        let mut out = io::stdout().lock();
        writeln!(out, "{value}").map_err(|err| Fault::Output(err.to_string()))
    }
}

/// Collects output lines in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BufferSink {
    values: Vec<Number>,
}

impl BufferSink {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer already wrapped for sharing.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Values printed so far, in execution order.
    pub fn values(&self) -> &[Number] {
        &self.values
    }

    /// Printed lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }

    /// The complete output text, one line per value.
    pub fn contents(&self) -> String {
        self.values.iter().fold(String::new(), |mut acc, value| {
            acc.push_str(&value.to_string());
            acc.push('\n');
            acc
        })
    }

    /// Discards everything captured so far.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, value: Number) -> Result<(), Fault> {
        self.values.push(value);
        Ok(())
    }
}

/// Returns a fresh shared channel writing to standard output.
pub fn stdout_channel() -> SharedOutput {
    Rc::new(RefCell::new(StdoutSink))
}

/// Wrapper giving a [`SharedOutput`] a `Debug` representation.
pub(crate) struct OutputDebug<'a>(pub(crate) &'a SharedOutput);

impl fmt::Debug for OutputDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputSink@{:p}", Rc::as_ptr(self.0).cast::<()>())
    }
}
