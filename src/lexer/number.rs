use nom::branch::alt;
use nom::bytes::complete::*;
use nom::character::complete::*;
use nom::combinator::*;
use nom::sequence::*;
use nom::Parser;

use crate::error::LexError;
use crate::result::LexResult;
use crate::span::Span;
use crate::token::TokenKind;

use super::consumed;

/// parse an integer, floating-point or imaginary literal
pub fn number(input: Span) -> LexResult<TokenKind> {
    let (rest, kind) = alt((prefixed_integer, decimal)).parse(input)?;
    let (rest, imaginary) = opt(char('i')).parse(rest)?;
    if imaginary.is_some() {
        return Ok((rest, TokenKind::Imag));
    }
    if kind == TokenKind::Int {
        legacy_octal(input, rest)?;
    }
    Ok((rest, kind))
}

fn digits(input: Span) -> LexResult<Span> {
    recognize(pair(digit1, take_while(|c: char| c.is_ascii_digit() || c == '_'))).parse(input)
}

/// `0x1F`, `0o17`, `0b101`
fn prefixed_integer(input: Span) -> LexResult<TokenKind> {
    let (body, (_, base)) = (char('0'), one_of("xXoObB")).parse(input)?;
    let (rest, body) = take_while(|c: char| c.is_ascii_hexdigit() || c == '_').parse(body)?;

    let (radix, name) = match base.to_ascii_lowercase() {
        'x' => (16, "hexadecimal"),
        'o' => (8, "octal"),
        _ => (2, "binary"),
    };
    if !body.fragment().chars().any(|c| c != '_') {
        return Err(nom::Err::Failure(LexError::new(
            input,
            format!("{} literal has no digits", name),
        )));
    }
    if let Some(bad) = body
        .fragment()
        .chars()
        .find(|c| *c != '_' && !c.is_digit(radix))
    {
        return Err(nom::Err::Failure(LexError::new(
            input,
            format!("invalid digit '{}' in {} literal", bad, name),
        )));
    }
    Ok((rest, TokenKind::Int))
}

/// `42`, `3.14`, `1e9`, `.5`, `6.`
fn decimal(input: Span) -> LexResult<TokenKind> {
    let (rest, text) = alt((
        recognize((digits, opt(pair(char('.'), opt(digits))), opt(exponent))),
        recognize((char('.'), digits, opt(exponent))),
    ))
    .parse(input)?;

    let kind = if text.fragment().contains(['.', 'e', 'E']) {
        TokenKind::Float
    } else {
        TokenKind::Int
    };
    Ok((rest, kind))
}

fn exponent(input: Span) -> LexResult<Span> {
    let (body, _) = (one_of("eE"), opt(one_of("+-"))).parse(input)?;
    let (rest, _) = digits(body).map_err(|_: nom::Err<LexError>| {
        nom::Err::Failure(LexError::new(input, "exponent has no digits"))
    })?;
    Ok(consumed(input, rest))
}

/// integers written with a leading `0` are octal
fn legacy_octal<'a>(start: Span<'a>, rest: Span<'a>) -> Result<(), nom::Err<LexError<'a>>> {
    let (_, text) = consumed(start, rest);
    let text = text.fragment();
    if !text.starts_with('0') || text.starts_with("0x") || text.starts_with("0X") {
        return Ok(());
    }
    match text.chars().find(|c| matches!(c, '8' | '9')) {
        Some(bad) => Err(nom::Err::Failure(LexError::new(
            start,
            format!("invalid digit '{}' in octal literal", bad),
        ))),
        None => Ok(()),
    }
}
