use nom::bytes::complete::*;
use nom::character::complete::char;
use nom::Input;
use nom::Parser;

use crate::error::LexError;
use crate::result::LexResult;
use crate::span::Span;

use super::consumed;

/// parse a string like `"hello\n"`, validating its escape sequences
pub fn interpreted_string(input: Span) -> LexResult<Span> {
    let (body, _) = char('"').parse(input)?;
    let (rest, _) = quoted_body(input, body, '"', "string literal not terminated")?;
    Ok(consumed(input, rest))
}

/// parse a string like `` `C:\raw` ``, which may span lines
pub fn raw_string(input: Span) -> LexResult<Span> {
    let (body, _) = char('`').parse(input)?;
    let (rest, _) = (take_until("`"), tag("`"))
        .parse(body)
        .map_err(|_: nom::Err<LexError>| {
            nom::Err::Failure(LexError::new(input, "raw string literal not terminated"))
        })?;
    Ok(consumed(input, rest))
}

/// parse a rune like `'a'` or `'\u00e9'`
pub fn rune(input: Span) -> LexResult<Span> {
    let (body, _) = char('\'').parse(input)?;
    let (rest, count) = quoted_body(input, body, '\'', "rune literal not terminated")?;
    match count {
        1 => Ok(consumed(input, rest)),
        0 => Err(nom::Err::Failure(LexError::new(
            input,
            "empty rune literal or unescaped ' in rune literal",
        ))),
        _ => Err(nom::Err::Failure(LexError::new(input, "illegal rune literal"))),
    }
}

/// Scans `body` up to and including the closing `quote`, returning the
/// remaining input and the number of characters between the quotes.
fn quoted_body<'a>(
    start: Span<'a>,
    body: Span<'a>,
    quote: char,
    unterminated: &'static str,
) -> Result<(Span<'a>, usize), nom::Err<LexError<'a>>> {
    let text = *body.fragment();
    let mut index = 0;
    let mut count = 0;

    while let Some(c) = text[index..].chars().next() {
        if c == quote {
            let (rest, _) = body.take_split(index + c.len_utf8());
            return Ok((rest, count));
        }
        match c {
            '\n' => break,
            '\\' => index += escape_len(body, index, quote)?,
            _ => index += c.len_utf8(),
        }
        count += 1;
    }

    Err(nom::Err::Failure(LexError::new(start, unterminated)))
}

/// Byte length of the escape sequence starting at `body[index]`, which is a
/// backslash.
fn escape_len<'a>(body: Span<'a>, index: usize, quote: char) -> Result<usize, nom::Err<LexError<'a>>> {
    let (at, _) = body.take_split(index);
    let fail = |message: &str| nom::Err::Failure(LexError::new(at, message));

    let text = &body.fragment()[index + 1..];
    let (digits, radix) = match text.chars().next() {
        Some(c) if c == quote => return Ok(2),
        Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\') => return Ok(2),
        Some('0'..='7') => (3, 8),
        Some('x') => (2, 16),
        Some('u') => (4, 16),
        Some('U') => (8, 16),
        None | Some('\n') => return Err(fail("escape sequence not terminated")),
        Some(_) => return Err(fail("unknown escape sequence")),
    };

    // octal escapes carry their first digit in place of a letter
    let skip = if radix == 8 { 0 } else { 1 };
    let mut seen = 0;
    for c in text.chars().skip(skip).take(digits) {
        if !c.is_digit(radix) {
            return Err(fail(if c == quote || c == '\n' {
                "escape sequence not terminated"
            } else {
                "illegal character in escape sequence"
            }));
        }
        seen += 1;
    }
    if seen < digits {
        return Err(fail("escape sequence not terminated"));
    }
    Ok(1 + skip + digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex<'a>(
        parser: fn(Span<'a>) -> LexResult<'a, Span<'a>>,
        input: &'a str,
    ) -> Result<(&'a str, &'a str), String> {
        match parser(Span::new(input)) {
            Ok((rest, literal)) => Ok((*rest.fragment(), *literal.fragment())),
            Err(nom::Err::Failure(err)) => Err(err.message.unwrap_or_default()),
            Err(_) => Err("no match".to_string()),
        }
    }

    #[test]
    fn test_interpreted_string() {
        assert_eq!(lex(interpreted_string, r#""hello")"#), Ok((")", r#""hello""#)));
        assert_eq!(lex(interpreted_string, r#""""#), Ok(("", r#""""#)));
        assert_eq!(
            lex(interpreted_string, r#""a\"b\n\x41\u00e9\101" x"#),
            Ok((" x", r#""a\"b\n\x41\u00e9\101""#))
        );
        assert_eq!(lex(interpreted_string, "\"日本\""), Ok(("", "\"日本\"")));
        assert_eq!(
            lex(interpreted_string, "\"open\nnext\""),
            Err("string literal not terminated".to_string())
        );
        assert_eq!(
            lex(interpreted_string, r#""bad \q""#),
            Err("unknown escape sequence".to_string())
        );
        assert_eq!(
            lex(interpreted_string, r#""\xZZ""#),
            Err("illegal character in escape sequence".to_string())
        );
        assert_eq!(lex(interpreted_string, "x"), Err("no match".to_string()));
    }

    #[test]
    fn test_raw_string() {
        assert_eq!(lex(raw_string, "`a\\n\nb` "), Ok((" ", "`a\\n\nb`")));
        assert_eq!(
            lex(raw_string, "`open"),
            Err("raw string literal not terminated".to_string())
        );
    }

    #[test]
    fn test_rune() {
        assert_eq!(lex(rune, "'a'"), Ok(("", "'a'")));
        assert_eq!(lex(rune, r"'\''"), Ok(("", r"'\''")));
        assert_eq!(lex(rune, r"'\n',"), Ok((",", r"'\n'")));
        assert_eq!(lex(rune, "'é'"), Ok(("", "'é'")));
        assert_eq!(lex(rune, "'ab'"), Err("illegal rune literal".to_string()));
        assert_eq!(
            lex(rune, "''"),
            Err("empty rune literal or unescaped ' in rune literal".to_string())
        );
        assert_eq!(lex(rune, "'a"), Err("rune literal not terminated".to_string()));
    }
}
