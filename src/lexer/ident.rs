use nom::bytes::complete::*;
use nom::character::complete::satisfy;
use nom::combinator::*;
use nom::sequence::*;
use nom::Parser;

use crate::result::LexResult;
use crate::span::Span;
use crate::token::TokenKind;

fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_letter_or_digit(c: char) -> bool {
    is_letter(c) || c.is_numeric()
}

pub fn identifier(input: Span) -> LexResult<Span> {
    recognize(pair(satisfy(is_letter), take_while(is_letter_or_digit))).parse(input)
}

/// an identifier or the keyword it spells
pub fn word(input: Span) -> LexResult<TokenKind> {
    map(identifier, |word: Span| {
        TokenKind::keyword(word.fragment()).unwrap_or(TokenKind::Ident)
    })
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(input: &str) -> Option<(&str, &str)> {
        identifier(Span::new(input))
            .ok()
            .map(|(rest, id)| (*rest.fragment(), *id.fragment()))
    }

    #[test]
    fn test_identifier() {
        assert_eq!(ident("a"), Some(("", "a")));
        assert_eq!(ident("a_0 b"), Some((" b", "a_0")));
        assert_eq!(ident("_"), Some(("", "_")));
        assert_eq!(ident("_0_1"), Some(("", "_0_1")));
        assert_eq!(ident("日本語 x"), Some((" x", "日本語")));
        assert_eq!(ident("0a"), None);
        assert_eq!(ident(""), None);
    }

    #[test]
    fn test_word() {
        let kind = |input: &str| word(Span::new(input)).map(|(_, kind)| kind).ok();
        assert_eq!(kind("func"), Some(TokenKind::Func));
        assert_eq!(kind("funcs"), Some(TokenKind::Ident));
        assert_eq!(kind("range"), Some(TokenKind::Range));
        assert_eq!(kind("Println"), Some(TokenKind::Ident));
    }
}
