use nom::bytes::complete::tag;
use nom::error::{ErrorKind, ParseError};

use crate::error::LexError;
use crate::result::LexResult;
use crate::span::Span;
use crate::token::{TokenKind, OPERATORS};

/// parse the longest operator or delimiter at the start of `input`
pub fn operator(input: Span) -> LexResult<TokenKind> {
    for (spelling, kind) in OPERATORS {
        if let Ok((rest, _)) = tag::<_, _, LexError>(*spelling)(input) {
            return Ok((rest, *kind));
        }
    }
    Err(nom::Err::Error(LexError::from_error_kind(input, ErrorKind::Tag)))
}
