//! Package-level declarations and their specs

use crate::ast::*;
use crate::error::Result;
use crate::token::TokenKind;

use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn decl(&mut self) -> Result<Decl> {
        let decl = match self.kind() {
            kind @ (TokenKind::Const | TokenKind::Type | TokenKind::Var) => {
                Decl::Gen(self.gen_decl(kind)?)
            }
            TokenKind::Func => Decl::Func(self.func_decl()?),
            _ => return Err(self.error_expected("declaration")),
        };
        self.expect_semi()?;
        Ok(decl)
    }

    /// `keyword spec` or `keyword ( spec; ... )`
    pub(super) fn gen_decl(&mut self, keyword: TokenKind) -> Result<GenDecl> {
        self.expect(keyword)?;
        let mut specs = Vec::new();
        if self.eat(TokenKind::LParen) {
            let mut index = 0;
            while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
                specs.push(self.spec(keyword, index)?);
                self.expect_semi()?;
                index += 1;
            }
            self.expect(TokenKind::RParen)?;
        } else {
            specs.push(self.spec(keyword, 0)?);
        }
        Ok(GenDecl { keyword, specs })
    }

    fn spec(&mut self, keyword: TokenKind, index: usize) -> Result<Spec> {
        match keyword {
            TokenKind::Import => self.import_spec().map(Spec::Import),
            TokenKind::Type => self.type_spec().map(Spec::Type),
            _ => self.value_spec(keyword, index).map(Spec::Value),
        }
    }

    fn import_spec(&mut self) -> Result<ImportSpec> {
        let name = match self.kind() {
            TokenKind::Period => {
                self.next();
                Some(Ident::new("."))
            }
            TokenKind::Ident => Some(self.ident()?),
            _ => None,
        };

        let token = self.token();
        match token.kind {
            TokenKind::String => {
                self.next();
                Ok(ImportSpec {
                    name,
                    path: BasicLit {
                        kind: token.kind,
                        value: token.text.to_string(),
                    },
                })
            }
            kind if kind.is_literal() => {
                Err(self.error_at(token.position, "import path must be a string"))
            }
            _ => Err(self.error_at(token.position, "missing import path")),
        }
    }

    /// `index` counts the specs before this one in a group; the first
    /// constant of a group must have values.
    fn value_spec(&mut self, keyword: TokenKind, index: usize) -> Result<ValueSpec> {
        let position = self.position();
        let names = self.ident_list()?;
        let mut ty = None;
        let mut values = Vec::new();

        if keyword == TokenKind::Const {
            if !matches!(
                self.kind(),
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::RParen
            ) {
                ty = self.try_type()?;
                if self.eat(TokenKind::Assign) {
                    values = self.expr_list()?;
                }
            }
            if values.is_empty() && (index == 0 || ty.is_some()) {
                return Err(self.error_at(position, "missing init expr for const declaration"));
            }
        } else {
            if !self.at(TokenKind::Assign) {
                ty = Some(self.parse_type()?);
            }
            if self.eat(TokenKind::Assign) {
                values = self.expr_list()?;
            }
        }

        Ok(ValueSpec { names, ty, values })
    }

    fn type_spec(&mut self) -> Result<TypeSpec> {
        let name = self.ident()?;
        let alias = self.eat(TokenKind::Assign);
        let ty = self.parse_type()?;
        Ok(TypeSpec { name, alias, ty })
    }

    fn func_decl(&mut self) -> Result<FuncDecl> {
        self.expect(TokenKind::Func)?;
        let recv = if self.at(TokenKind::LParen) {
            Some(self.parameters()?)
        } else {
            None
        };
        let name = self.ident()?;
        let ty = self.signature()?;
        let body = if self.at(TokenKind::LBrace) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(FuncDecl {
            recv,
            name,
            ty,
            body,
        })
    }

    pub(super) fn ident(&mut self) -> Result<Ident> {
        if self.at(TokenKind::Ident) {
            Ok(Ident::new(self.next().text))
        } else {
            Err(self.error_expected("'IDENT'"))
        }
    }

    pub(super) fn ident_list(&mut self) -> Result<Vec<Ident>> {
        let mut list = vec![self.ident()?];
        while self.eat(TokenKind::Comma) {
            list.push(self.ident()?);
        }
        Ok(list)
    }
}
