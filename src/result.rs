use nom::IResult;

use crate::error::LexError;
use crate::span::Span;

pub type LexResult<'a, O> = IResult<Span<'a>, O, LexError<'a>>;
