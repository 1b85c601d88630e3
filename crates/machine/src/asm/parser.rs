//! Line scanner for the assembler.
//!
//! A `LineParser` walks one line character by character. Every fault it
//! raises carries the line text and the offset of the character where
//! parsing stopped.

use crate::common::error::CompileError;
use crate::common::types::{Number, Wide};

/// Whitespace as understood by the assembler (C `isspace` in the "C" locale).
const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Cursor over a single source line.
pub(crate) struct LineParser {
    line: String,
    chars: Vec<char>,
    pos: usize,
}

impl LineParser {
    /// Creates a parser over `raw`, dropping one trailing carriage return.
    pub(crate) fn new(raw: &str) -> Self {
        let line = raw.strip_suffix('\r').unwrap_or(raw).to_owned();
        let chars = line.chars().collect();
        Self {
            line,
            chars,
            pos: 0,
        }
    }

    /// Builds a parse fault at the current position.
    fn fail(&self, cause: impl Into<String>) -> CompileError {
        CompileError::Parse {
            cause: cause.into(),
            line: self.line.clone(),
            position: self.pos,
            line_number: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Reads the next whitespace-delimited word; empty at end of line.
    pub(crate) fn word(&mut self) -> String {
        self.skip_spaces();
        let start = self.pos;
        while self.peek().is_some_and(|c| !is_space(c)) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Reads a decimal integer with an optional leading minus.
    ///
    /// The literal ends at whitespace or end of line and must fit a [`Number`].
    fn integer(&mut self) -> Result<Number, CompileError> {
        let mut negative = false;
        let mut digits = 0usize;
        let mut value: Wide = 0;

        while let Some(c) = self.peek() {
            if is_space(c) {
                break;
            }
            if c == '-' {
                if negative || digits > 0 {
                    return Err(self.fail("Minus sign should not appear inside a number"));
                }
                negative = true;
                self.pos += 1;
                continue;
            }
            if !c.is_ascii_digit() {
                return Err(self.fail(format!("Expected a digit, got '{c}'")));
            }
            value = value * 10 + Wide::from(c as u8 - b'0');
            let limit = Wide::from(Number::MAX) + Wide::from(negative);
            if value > limit {
                return Err(self.fail("Number is too big"));
            }
            digits += 1;
            self.pos += 1;
        }

        if digits == 0 {
            return Err(self.fail("Expected a number"));
        }
        let signed = if negative { -value } else { value };
        Ok(signed as Number)
    }

    /// Reads `prefix` immediately followed by an integer.
    fn prefixed(&mut self, prefix: char, expected: &str) -> Result<Number, CompileError> {
        self.skip_spaces();
        match self.peek() {
            None => Err(self.fail("Unexpected end of line")),
            Some(c) if c == prefix => {
                self.pos += 1;
                self.integer()
            }
            Some(_) => Err(self.fail(expected)),
        }
    }

    /// Reads a register token (`R<int>`).
    pub(crate) fn register(&mut self) -> Result<Number, CompileError> {
        self.prefixed('R', "Expected a register")
    }

    /// Reads two register tokens.
    pub(crate) fn register_pair(&mut self) -> Result<(Number, Number), CompileError> {
        let dest = self.register()?;
        let src = self.register()?;
        Ok((dest, src))
    }

    /// Reads an address token (`M<int>`).
    pub(crate) fn address(&mut self) -> Result<Number, CompileError> {
        self.prefixed('M', "Expected a memory address")
    }

    /// Reads a plain number token.
    pub(crate) fn number(&mut self) -> Result<Number, CompileError> {
        self.skip_spaces();
        if self.peek().is_none() {
            return Err(self.fail("Unexpected end of line"));
        }
        self.integer()
    }

    /// Requires that only whitespace remains on the line.
    pub(crate) fn end(&mut self) -> Result<(), CompileError> {
        self.skip_spaces();
        if self.pos != self.chars.len() {
            return Err(self.fail("Trailing characters"));
        }
        Ok(())
    }
}
