//! Expressions
//!
//! Binary operators are parsed by precedence climbing over
//! [`TokenKind::precedence`]. A `{` after a type name starts a composite
//! literal only outside control clause headers, so `if x == T {` reads the
//! `{` as the start of the block.

use crate::ast::*;
use crate::error::Result;
use crate::token::{TokenKind, LOWEST_PREC};

use super::Parser;

/// Expressions that may stand before the `{` of a composite literal.
fn is_literal_type(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) | Expr::ArrayType { .. } | Expr::StructType(_) | Expr::MapType { .. } => {
            true
        }
        Expr::Selector { x, .. } => matches!(**x, Expr::Ident(_)),
        _ => false,
    }
}

/// `T` or `pkg.T`
fn is_type_name(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) => true,
        Expr::Selector { x, .. } => matches!(**x, Expr::Ident(_)),
        _ => false,
    }
}

impl<'a> Parser<'a> {
    pub(super) fn expr(&mut self) -> Result<Expr> {
        self.binary_expr(LOWEST_PREC + 1)
    }

    pub(super) fn expr_list(&mut self) -> Result<Vec<Expr>> {
        let mut list = vec![self.expr()?];
        while self.eat(TokenKind::Comma) {
            list.push(self.expr()?);
        }
        Ok(list)
    }

    fn binary_expr(&mut self, min_prec: u8) -> Result<Expr> {
        let mut x = self.unary_expr()?;
        let mut wraps = 0;
        loop {
            let op = self.kind();
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.next();
            self.deepen()?;
            wraps += 1;
            let y = self.binary_expr(prec + 1)?;
            x = Expr::Binary {
                x: Box::new(x),
                op,
                y: Box::new(y),
            };
        }
        self.depth -= wraps;
        Ok(x)
    }

    fn unary_expr(&mut self) -> Result<Expr> {
        self.nested(|p| match p.kind() {
            TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Not
            | TokenKind::Xor
            | TokenKind::And
            | TokenKind::Tilde => {
                let op = p.next().kind;
                let x = Box::new(p.unary_expr()?);
                Ok(Expr::Unary { op, x })
            }
            TokenKind::Arrow => {
                if p.tokens.get(p.cursor + 1).map(|token| token.kind) == Some(TokenKind::Chan) {
                    return p.chan_type();
                }
                p.next();
                let x = Box::new(p.unary_expr()?);
                Ok(Expr::Unary {
                    op: TokenKind::Arrow,
                    x,
                })
            }
            TokenKind::Mul => {
                p.next();
                Ok(Expr::Star(Box::new(p.unary_expr()?)))
            }
            _ => p.primary_expr(),
        })
    }

    fn primary_expr(&mut self) -> Result<Expr> {
        let mut x = self.operand()?;
        let mut wraps = 0;
        loop {
            x = match self.kind() {
                TokenKind::Period => self.selector_or_assertion(x)?,
                TokenKind::LBrack => self.index_or_slice(x)?,
                TokenKind::LParen => self.call(x)?,
                TokenKind::LBrace
                    if is_literal_type(&x) && (self.expr_lev >= 0 || !is_type_name(&x)) =>
                {
                    self.composite_lit(Some(x))?
                }
                _ => break,
            };
            self.deepen()?;
            wraps += 1;
        }
        self.depth -= wraps;
        Ok(x)
    }

    fn operand(&mut self) -> Result<Expr> {
        let token = self.token();
        match token.kind {
            TokenKind::Ident => Ok(Expr::Ident(self.ident()?)),
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Char
            | TokenKind::String => {
                self.next();
                Ok(Expr::BasicLit(BasicLit {
                    kind: token.kind,
                    value: token.text.to_string(),
                }))
            }
            TokenKind::LParen => {
                self.next();
                self.expr_lev += 1;
                let x = self.expr()?;
                self.expr_lev -= 1;
                self.expect(TokenKind::RParen)?;
                Ok(Expr::Paren(Box::new(x)))
            }
            TokenKind::Func => self.func_type_or_lit(),
            _ => match self.try_type()? {
                Some(ty) => Ok(ty),
                None => Err(self.error_expected("operand")),
            },
        }
    }

    fn func_type_or_lit(&mut self) -> Result<Expr> {
        self.expect(TokenKind::Func)?;
        let ty = self.signature()?;
        if !self.at(TokenKind::LBrace) {
            return Ok(Expr::FuncType(ty));
        }
        self.expr_lev += 1;
        let body = self.block()?;
        self.expr_lev -= 1;
        Ok(Expr::FuncLit { ty, body })
    }

    fn selector_or_assertion(&mut self, x: Expr) -> Result<Expr> {
        self.expect(TokenKind::Period)?;
        match self.kind() {
            TokenKind::Ident => Ok(Expr::Selector {
                x: Box::new(x),
                sel: self.ident()?,
            }),
            TokenKind::LParen => {
                self.next();
                let ty = if self.eat(TokenKind::Type) {
                    None
                } else {
                    Some(Box::new(self.parse_type()?))
                };
                self.expect(TokenKind::RParen)?;
                Ok(Expr::TypeAssert { x: Box::new(x), ty })
            }
            _ => Err(self.error_expected("selector or type assertion")),
        }
    }

    /// `x[i]`, `x[lo:hi]` or `x[lo:hi:max]`
    fn index_or_slice(&mut self, x: Expr) -> Result<Expr> {
        self.expect(TokenKind::LBrack)?;
        self.expr_lev += 1;
        let mut index: [Option<Box<Expr>>; 3] = [None, None, None];
        let mut colons = 0;
        if !self.at(TokenKind::Colon) {
            index[0] = Some(Box::new(self.expr()?));
        }
        while self.at(TokenKind::Colon) && colons < 2 {
            colons += 1;
            self.next();
            if !matches!(
                self.kind(),
                TokenKind::Colon | TokenKind::RBrack | TokenKind::Eof
            ) {
                index[colons] = Some(Box::new(self.expr()?));
            }
        }
        self.expr_lev -= 1;
        let position = self.position();
        self.expect(TokenKind::RBrack)?;

        let [low, high, max] = index;
        if colons == 0 {
            return match low {
                Some(index) => Ok(Expr::Index {
                    x: Box::new(x),
                    index,
                }),
                None => Err(self.error_at(position, "expected operand")),
            };
        }
        if colons == 2 {
            if high.is_none() {
                return Err(self.error_at(position, "middle index required in 3-index slice"));
            }
            if max.is_none() {
                return Err(self.error_at(position, "final index required in 3-index slice"));
            }
        }
        Ok(Expr::Slice {
            x: Box::new(x),
            low,
            high,
            max,
        })
    }

    fn call(&mut self, fun: Expr) -> Result<Expr> {
        self.expect(TokenKind::LParen)?;
        self.expr_lev += 1;
        let mut args = Vec::new();
        let mut spread = false;
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) && !spread {
            args.push(self.expr()?);
            spread = self.eat(TokenKind::Ellipsis);
            if !self.at_comma("argument list", TokenKind::RParen)? {
                break;
            }
            self.next();
        }
        self.expr_lev -= 1;
        self.expect_closing(TokenKind::RParen, "argument list")?;
        Ok(Expr::Call {
            fun: Box::new(fun),
            args,
            spread,
        })
    }

    pub(super) fn composite_lit(&mut self, ty: Option<Expr>) -> Result<Expr> {
        self.nested(|p| {
            p.expect(TokenKind::LBrace)?;
            p.expr_lev += 1;
            let mut elts = Vec::new();
            while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Eof) {
                elts.push(p.element()?);
                if !p.at_comma("composite literal", TokenKind::RBrace)? {
                    break;
                }
                p.next();
            }
            p.expr_lev -= 1;
            p.expect_closing(TokenKind::RBrace, "composite literal")?;
            Ok(Expr::CompositeLit {
                ty: ty.map(Box::new),
                elts,
            })
        })
    }

    /// `value` or `key: value`, where either may be an elided-type literal
    fn element(&mut self) -> Result<Expr> {
        let x = self.element_value()?;
        if !self.eat(TokenKind::Colon) {
            return Ok(x);
        }
        let value = self.element_value()?;
        Ok(Expr::KeyValue {
            key: Box::new(x),
            value: Box::new(value),
        })
    }

    fn element_value(&mut self) -> Result<Expr> {
        if self.at(TokenKind::LBrace) {
            self.composite_lit(None)
        } else {
            self.expr()
        }
    }
}
