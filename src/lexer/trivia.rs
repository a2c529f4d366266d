use nom::bytes::complete::*;
use nom::combinator::*;
use nom::sequence::*;
use nom::Parser;

use crate::error::LexError;
use crate::result::LexResult;
use crate::span::Span;

use super::consumed;

/// spaces, tabs and carriage returns; newlines are tokens of their own
/// because they may end a statement
pub fn blank(input: Span) -> LexResult<Span> {
    take_while(|c: char| c == ' ' || c == '\t' || c == '\r').parse(input)
}

pub fn newline(input: Span) -> LexResult<Span> {
    tag("\n")(input)
}

/// parse comment like `// line comment`, stopping before the newline
pub fn line_comment(input: Span) -> LexResult<Span> {
    recognize(pair(tag("//"), take_while(|c: char| c != '\n'))).parse(input)
}

/// parse comment like `/* general comment */`, which may span lines
pub fn block_comment(input: Span) -> LexResult<Span> {
    let (body, _) = tag("/*")(input)?;
    let (rest, _) = terminated(take_until("*/"), tag("*/"))
        .parse(body)
        .map_err(|_: nom::Err<LexError>| {
            nom::Err::Failure(LexError::new(input, "comment not terminated"))
        })?;
    Ok(consumed(input, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments<'a>(result: LexResult<'a, Span<'a>>) -> (&'a str, &'a str) {
        let (rest, matched) = result.unwrap();
        (*rest.fragment(), *matched.fragment())
    }

    #[test]
    fn test_blank() {
        assert_eq!(fragments(blank(Span::new(" \t x"))), ("x", " \t "));
        assert_eq!(fragments(blank(Span::new("\nx"))), ("\nx", ""));
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            fragments(line_comment(Span::new("// comment\nnext"))),
            ("\nnext", "// comment")
        );
        assert_eq!(fragments(line_comment(Span::new("//"))), ("", "//"));
        assert!(line_comment(Span::new("/ not")).is_err());
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(
            fragments(block_comment(Span::new("/* a \n b */x"))),
            ("x", "/* a \n b */")
        );
        assert_eq!(fragments(block_comment(Span::new("/**/"))), ("", "/**/"));

        match block_comment(Span::new("/* open")) {
            Err(nom::Err::Failure(err)) => {
                assert_eq!(err.message.as_deref(), Some("comment not terminated"));
                assert_eq!(err.input.location_offset(), 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
