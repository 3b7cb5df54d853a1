//! Submodule defining the errors used across the crate.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::lexer::LexerError;

/// A location in the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Computes the line and column of a byte offset in `input`.
    ///
    /// Offsets past the end of the input are clamped to its length, which is
    /// where end-of-input errors are reported.
    #[must_use]
    pub fn locate(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        Self {
            offset,
            line: before.bytes().filter(|&b| b == b'\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors returned when a statement cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Lexer error.
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),
    /// A token that no grammar alternative accepts at this point.
    #[error("Unexpected {found} at {position}, expected {}", one_of(.expected))]
    UnexpectedToken {
        /// Tokens that would have been accepted.
        expected: Vec<&'static str>,
        /// Description of the token that was found.
        found: String,
        /// Position of the offending token.
        position: Position,
    },
    /// A number too large for the clause it appears in.
    #[error("Number {value} at {position} is out of range")]
    NumberOutOfRange {
        /// The number as written.
        value: u64,
        /// Position of the number.
        position: Position,
    },
}

impl ParseError {
    /// Where in the input the error was detected.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexer(error) => error.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::NumberOutOfRange { position, .. } => *position,
        }
    }
}

/// Formats the admissible alternatives as `A`, `A or B`, or `one of A, B, C`.
fn one_of(expected: &[&str]) -> String {
    match expected {
        [] => String::from("nothing"),
        [single] => String::from(*single),
        [first, second] => alloc::format!("{first} or {second}"),
        several => alloc::format!("one of {}", several.join(", ")),
    }
}
