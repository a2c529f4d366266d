//! Go lexer
//!
//! Tokens are recognized with nom combinators over a located span. The
//! driver applies Go's semicolon rule: a newline (or the end of input, or a
//! comment standing in for one) ends the statement when the line's final
//! token is an identifier, a literal, one of the keywords `break`,
//! `continue`, `fallthrough`, `return`, or one of `++ -- ) ] }`.

mod ident;
mod number;
mod operator;
mod string;
mod trivia;

use nom::branch::alt;
use nom::combinator::value;
use nom::Input;
use nom::Parser;

use crate::error::SyntaxError;
use crate::result::LexResult;
use crate::span::{Position, Span};
use crate::token::{Token, TokenKind};

use self::ident::word;
use self::number::number;
use self::operator::operator;
use self::string::{interpreted_string, raw_string, rune};
use self::trivia::{blank, block_comment, line_comment, newline};

/// Splits `start` at the point `rest` begins, returning `(rest, consumed)`.
pub(crate) fn consumed<'a>(start: Span<'a>, rest: Span<'a>) -> (Span<'a>, Span<'a>) {
    start.take_split(rest.location_offset() - start.location_offset())
}

fn token(input: Span) -> LexResult<TokenKind> {
    alt((
        word,
        number,
        value(TokenKind::String, interpreted_string),
        value(TokenKind::String, raw_string),
        value(TokenKind::Char, rune),
        operator,
    ))
    .parse(input)
}

const BYTE_ORDER_MARK: char = '\u{feff}';

pub struct Lexer<'a> {
    rest: Span<'a>,
    insert_semicolon: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut rest = Span::new(text);
        // a leading byte order mark is skipped, but still counts toward columns
        if text.starts_with(BYTE_ORDER_MARK) {
            rest = rest.take_from(BYTE_ORDER_MARK.len_utf8());
        }
        Self {
            rest,
            insert_semicolon: false,
        }
    }

    fn semicolon(&mut self, at: Span<'a>) -> Token<'a> {
        self.insert_semicolon = false;
        Token {
            kind: TokenKind::Semicolon,
            text: "\n",
            position: Position::from_span(at),
        }
    }

    /// Returns the next token; `Eof` repeats once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'a>, SyntaxError> {
        loop {
            if let Ok((rest, _)) = blank(self.rest) {
                self.rest = rest;
            }
            let at = self.rest;

            if at.fragment().is_empty() {
                if self.insert_semicolon {
                    return Ok(self.semicolon(at));
                }
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: "",
                    position: Position::from_span(at),
                });
            }

            if let Ok((rest, _)) = newline(at) {
                self.rest = rest;
                if self.insert_semicolon {
                    return Ok(self.semicolon(at));
                }
                continue;
            }

            match alt((line_comment, block_comment)).parse(at) {
                Ok((rest, comment)) => {
                    self.rest = rest;
                    let ends_line =
                        comment.fragment().starts_with("//") || comment.fragment().contains('\n');
                    if self.insert_semicolon && ends_line {
                        return Ok(self.semicolon(at));
                    }
                    continue;
                }
                Err(nom::Err::Failure(err)) => return Err(err.into()),
                Err(_) => {}
            }

            let (rest, kind) = match token(at) {
                Ok(ok) => ok,
                Err(nom::Err::Error(err) | nom::Err::Failure(err)) => return Err(err.into()),
                Err(nom::Err::Incomplete(_)) => {
                    return Err(SyntaxError::new(
                        Position::from_span(at),
                        "unexpected end of input",
                    ))
                }
            };
            let (rest, text) = consumed(at, rest);
            self.rest = rest;
            self.insert_semicolon = kind.ends_statement();

            log::trace!("token {:?} {:?} at {}", kind, text.fragment(), Position::from_span(at));
            return Ok(Token {
                kind,
                text: text.fragment(),
                position: Position::from_span(at),
            });
        }
    }
}

/// Tokenizes `text` up to and including `Eof`. A lexical error stops the
/// scan: the returned tokens then end with an `Illegal` token at the error
/// position and the error is handed back alongside them, so a parser can
/// report whichever error comes first in the text.
pub fn tokenize(text: &str) -> (Vec<Token<'_>>, Option<SyntaxError>) {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        match lexer.next_token() {
            Ok(token) => {
                tokens.push(token);
                if token.kind == TokenKind::Eof {
                    return (tokens, None);
                }
            }
            Err(err) => {
                tokens.push(Token {
                    kind: TokenKind::Illegal,
                    text: "",
                    position: err.position,
                });
                return (tokens, Some(err));
            }
        }
    }
}
