//! Recursive-descent Go parser over the token stream of [`crate::lexer`].
//!
//! The parser stops at the first error. Errors read like the Go parser's:
//! `expected X, found Y`, where `Y` is the literal text of identifiers and
//! literals, `newline` for an inserted semicolon and the quoted token
//! otherwise.

mod decl;
mod expr;
mod stmt;
mod types;

use crate::ast::File;
use crate::config::MAX_NESTING;
use crate::error::{Result, SyntaxError};
use crate::lexer::tokenize;
use crate::span::Position;
use crate::token::{Token, TokenKind};

/// parse a Go source file
pub fn parse(text: &str) -> Result<File> {
    Parser::new(text).parse_file()
}

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
    lex_error: Option<SyntaxError>,
    /// < 0 in control clause headers, where `T {` opens a block rather than
    /// a composite literal; >= 0 elsewhere
    expr_lev: i32,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        let (tokens, lex_error) = tokenize(text);
        Self {
            tokens,
            cursor: 0,
            lex_error,
            expr_lev: 0,
            depth: 0,
        }
    }

    fn token(&self) -> Token<'a> {
        // the token stream always ends with `Eof` or `Illegal`
        self.tokens[self.cursor]
    }

    fn kind(&self) -> TokenKind {
        self.token().kind
    }

    fn position(&self) -> Position {
        self.token().position
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consumes the current token. The final token is never consumed.
    fn next(&mut self) -> Token<'a> {
        let token = self.token();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.next();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        if self.at(kind) {
            Ok(self.next())
        } else {
            Err(self.error_expected(&format!("'{}'", kind)))
        }
    }

    /// A semicolon may be omitted before a closing `)` or `}`.
    fn expect_semi(&mut self) -> Result<()> {
        match self.kind() {
            TokenKind::RParen | TokenKind::RBrace => Ok(()),
            TokenKind::Semicolon => {
                self.next();
                Ok(())
            }
            _ => Err(self.error_expected("';'")),
        }
    }

    /// Whether a list continues: `true` at a comma, `false` at `follow`.
    fn at_comma(&self, context: &str, follow: TokenKind) -> Result<bool> {
        if self.at(TokenKind::Comma) {
            return Ok(true);
        }
        if self.at(follow) {
            return Ok(false);
        }
        let newline = if self.token().is_implicit_semicolon() {
            " before newline"
        } else {
            ""
        };
        Err(self.error_at(
            self.position(),
            format!("missing ','{} in {}", newline, context),
        ))
    }

    fn expect_closing(&mut self, kind: TokenKind, context: &str) -> Result<Token<'a>> {
        if !self.at(kind) && self.token().is_implicit_semicolon() {
            return Err(self.error_at(
                self.position(),
                format!("missing ',' before newline in {}", context),
            ));
        }
        self.expect(kind)
    }

    fn error_expected(&self, what: &str) -> SyntaxError {
        let token = self.token();
        let found = if token.is_implicit_semicolon() {
            "newline".to_string()
        } else if token.kind.is_literal() {
            token.text.to_string()
        } else {
            format!("'{}'", token.kind)
        };
        self.error_at(token.position, format!("expected {}, found {}", what, found))
    }

    /// Builds an error, preferring the lexical error when the parser has run
    /// into the point where scanning stopped.
    fn error_at(&self, position: Position, message: impl Into<String>) -> SyntaxError {
        if self.at(TokenKind::Illegal) {
            if let Some(err) = &self.lex_error {
                return err.clone();
            }
        }
        SyntaxError::new(position, message)
    }

    /// Enters one level of syntactic nesting.
    fn deepen(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error_at(self.position(), "exceeded max nesting depth"));
        }
        Ok(())
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.deepen()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn parse_file(mut self) -> Result<File> {
        self.expect(TokenKind::Package)?;
        let position = self.position();
        let package = self.ident()?;
        if package.name == "_" {
            return Err(self.error_at(position, "invalid package name _"));
        }
        self.expect_semi()?;

        let mut decls = Vec::new();
        while self.at(TokenKind::Import) {
            decls.push(crate::ast::Decl::Gen(self.gen_decl(TokenKind::Import)?));
            self.expect_semi()?;
        }
        while !self.at(TokenKind::Eof) {
            decls.push(self.decl()?);
        }

        log::trace!("parsed {} top-level declarations", decls.len());
        Ok(File { package, decls })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;

    use super::*;

    fn error(text: &str) -> String {
        match parse(text) {
            Ok(file) => panic!("expected a syntax error, got {:?}", file),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_package_clause() {
        assert_eq!(
            parse("package main"),
            Ok(File {
                package: Ident::new("main"),
                decls: vec![],
            })
        );
        assert_eq!(error(""), "1:1: expected 'package', found 'EOF'");
        assert_eq!(error("func main() {}"), "1:1: expected 'package', found 'func'");
        assert_eq!(error("package"), "1:8: expected 'IDENT', found 'EOF'");
        assert_eq!(error("package _"), "1:9: invalid package name _");
        assert_eq!(error("package main main"), "1:14: expected ';', found main");
    }

    #[test]
    fn test_first_error_wins() {
        // the grammar error precedes the illegal character
        assert_eq!(
            error("package main\nfunc {\n@"),
            "2:6: expected 'IDENT', found '{'"
        );
        // the parser reaches the illegal character first
        assert_eq!(
            error("package main\nvar x = @"),
            "2:9: illegal character U+0040 '@'"
        );
        assert_eq!(
            error("package main\nvar s = \"open"),
            "2:9: string literal not terminated"
        );
    }

    #[test]
    fn test_imports_before_declarations() {
        assert_eq!(
            error("package main\nvar x int\nimport \"fmt\""),
            "3:1: expected declaration, found 'import'"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let text = format!("package main\nvar x = {}1{}", "(".repeat(1000), ")".repeat(1000));
        assert!(error(&text).ends_with("exceeded max nesting depth"));

        let text = format!("package main\nvar x = {}1{}", "(".repeat(20), ")".repeat(20));
        assert!(parse(&text).is_ok());

        let text = format!("package main\nvar x = a{}", "+a".repeat(500));
        assert!(error(&text).ends_with("exceeded max nesting depth"));
    }
}
