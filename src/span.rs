//! Span and position utilities

use std::fmt;

use nom_locate::LocatedSpan;

/// Input type of the lexer
pub type Span<'a> = LocatedSpan<&'a str>;

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// Byte offset from the start of the text
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based byte column
    pub column: usize,
}

impl Position {
    pub fn from_span(span: Span) -> Self {
        Self {
            offset: span.location_offset(),
            line: span.location_line() as usize,
            column: span.get_column(),
        }
    }

    /// Position of the first byte of `text`.
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
