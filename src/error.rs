use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

use crate::span::{Position, Span};

pub type Result<T, E = SyntaxError> = std::result::Result<T, E>;

/// The first lexical or grammatical error found in a source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct SyntaxError {
    pub position: Position,
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Error type threaded through the nom lexer combinators. `message` stays
/// `None` when no lexer rule matched at `input`.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError<'a> {
    pub input: Span<'a>,
    pub message: Option<String>,
}

impl<'a> LexError<'a> {
    pub fn new(input: Span<'a>, message: impl Into<String>) -> Self {
        Self {
            input,
            message: Some(message.into()),
        }
    }
}

impl<'a> ParseError<Span<'a>> for LexError<'a> {
    fn from_error_kind(input: Span<'a>, _kind: ErrorKind) -> Self {
        Self {
            input,
            message: None,
        }
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<LexError<'_>> for SyntaxError {
    fn from(err: LexError<'_>) -> Self {
        let position = Position::from_span(err.input);
        let message = err.message.unwrap_or_else(|| {
            match err.input.fragment().chars().next() {
                Some(c) => format!("illegal character U+{:04X} '{}'", c as u32, c.escape_debug()),
                None => "unexpected end of input".to_string(),
            }
        });
        Self { position, message }
    }
}
