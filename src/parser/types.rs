//! Type expressions, signatures and field lists

use crate::ast::*;
use crate::error::Result;
use crate::span::Position;
use crate::token::TokenKind;

use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_type(&mut self) -> Result<Expr> {
        match self.try_type()? {
            Some(ty) => Ok(ty),
            None => Err(self.error_expected("type")),
        }
    }

    /// Parses a type if one starts at the current token.
    pub(super) fn try_type(&mut self) -> Result<Option<Expr>> {
        self.nested(|p| {
            let ty = match p.kind() {
                TokenKind::Ident => p.type_name()?,
                TokenKind::LBrack => p.array_type()?,
                TokenKind::Struct => p.struct_type()?,
                TokenKind::Mul => {
                    p.next();
                    Expr::Star(Box::new(p.parse_type()?))
                }
                TokenKind::Func => {
                    p.next();
                    Expr::FuncType(p.signature()?)
                }
                TokenKind::Interface => p.interface_type()?,
                TokenKind::Map => p.map_type()?,
                TokenKind::Chan | TokenKind::Arrow => p.chan_type()?,
                TokenKind::LParen => {
                    p.next();
                    let ty = p.parse_type()?;
                    p.expect(TokenKind::RParen)?;
                    Expr::Paren(Box::new(ty))
                }
                _ => return Ok(None),
            };
            Ok(Some(ty))
        })
    }

    /// `T` or `pkg.T`
    fn type_name(&mut self) -> Result<Expr> {
        let x = Expr::Ident(self.ident()?);
        if !self.eat(TokenKind::Period) {
            return Ok(x);
        }
        let sel = self.ident()?;
        Ok(Expr::Selector {
            x: Box::new(x),
            sel,
        })
    }

    fn array_type(&mut self) -> Result<Expr> {
        self.expect(TokenKind::LBrack)?;
        let len = match self.kind() {
            TokenKind::RBrack => None,
            TokenKind::Ellipsis => {
                self.next();
                Some(Box::new(Expr::Ellipsis(None)))
            }
            _ => {
                self.expr_lev += 1;
                let len = self.expr()?;
                self.expr_lev -= 1;
                Some(Box::new(len))
            }
        };
        self.expect(TokenKind::RBrack)?;
        let elt = Box::new(self.parse_type()?);
        Ok(Expr::ArrayType { len, elt })
    }

    fn map_type(&mut self) -> Result<Expr> {
        self.expect(TokenKind::Map)?;
        self.expect(TokenKind::LBrack)?;
        let key = Box::new(self.parse_type()?);
        self.expect(TokenKind::RBrack)?;
        let value = Box::new(self.parse_type()?);
        Ok(Expr::MapType { key, value })
    }

    /// `chan T`, `chan<- T` or `<-chan T`
    pub(super) fn chan_type(&mut self) -> Result<Expr> {
        let dir = if self.eat(TokenKind::Chan) {
            if self.eat(TokenKind::Arrow) {
                ChanDir::Send
            } else {
                ChanDir::Both
            }
        } else {
            self.expect(TokenKind::Arrow)?;
            self.expect(TokenKind::Chan)?;
            ChanDir::Recv
        };
        let value = Box::new(self.parse_type()?);
        Ok(Expr::ChanType { dir, value })
    }

    fn struct_type(&mut self) -> Result<Expr> {
        self.expect(TokenKind::Struct)?;
        self.expect(TokenKind::LBrace)?;
        let mut list = Vec::new();
        while matches!(
            self.kind(),
            TokenKind::Ident | TokenKind::Mul | TokenKind::LParen
        ) {
            list.push(self.field_decl()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::StructType(FieldList { list }))
    }

    fn field_decl(&mut self) -> Result<Field> {
        let (names, ty) = match self.kind() {
            TokenKind::Ident => {
                let name = self.ident()?;
                match self.kind() {
                    TokenKind::Period => {
                        self.next();
                        let sel = self.ident()?;
                        let ty = Expr::Selector {
                            x: Box::new(Expr::Ident(name)),
                            sel,
                        };
                        (vec![], ty)
                    }
                    TokenKind::Semicolon | TokenKind::String | TokenKind::RBrace => {
                        (vec![], Expr::Ident(name))
                    }
                    _ => {
                        let mut names = vec![name];
                        while self.eat(TokenKind::Comma) {
                            names.push(self.ident()?);
                        }
                        (names, self.parse_type()?)
                    }
                }
            }
            TokenKind::Mul => {
                self.next();
                (vec![], Expr::Star(Box::new(self.type_name()?)))
            }
            _ => {
                return Err(self.error_at(self.position(), "cannot parenthesize embedded type"));
            }
        };

        let tag = if self.at(TokenKind::String) {
            let token = self.next();
            Some(BasicLit {
                kind: token.kind,
                value: token.text.to_string(),
            })
        } else {
            None
        };
        self.expect_semi()?;
        Ok(Field { names, ty, tag })
    }

    fn interface_type(&mut self) -> Result<Expr> {
        self.expect(TokenKind::Interface)?;
        self.expect(TokenKind::LBrace)?;
        let mut list = Vec::new();
        while self.at(TokenKind::Ident) {
            list.push(self.method_spec()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::InterfaceType(FieldList { list }))
    }

    /// A method signature or an embedded interface.
    fn method_spec(&mut self) -> Result<Field> {
        let name = self.ident()?;
        let field = match self.kind() {
            TokenKind::LParen => Field {
                names: vec![name],
                ty: Expr::FuncType(self.signature()?),
                tag: None,
            },
            TokenKind::Period => {
                self.next();
                let sel = self.ident()?;
                Field {
                    names: vec![],
                    ty: Expr::Selector {
                        x: Box::new(Expr::Ident(name)),
                        sel,
                    },
                    tag: None,
                }
            }
            _ => Field {
                names: vec![],
                ty: Expr::Ident(name),
                tag: None,
            },
        };
        self.expect_semi()?;
        Ok(field)
    }

    pub(super) fn signature(&mut self) -> Result<FuncType> {
        let params = self.parameters()?;
        let results = if self.at(TokenKind::LParen) {
            Some(self.parameters()?)
        } else {
            self.try_type()?.map(|ty| FieldList {
                list: vec![Field {
                    names: vec![],
                    ty,
                    tag: None,
                }],
            })
        };
        Ok(FuncType { params, results })
    }

    pub(super) fn parameters(&mut self) -> Result<FieldList> {
        self.expect(TokenKind::LParen)?;
        let list = if self.at(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parameter_list()?
        };
        self.expect_closing(TokenKind::RParen, "parameter list")?;
        Ok(FieldList { list })
    }

    /// Either every parameter is named (`a, b int, c string`) or none is
    /// (`int, string`). The list is read as types until a type follows one
    /// of them, which turns the types read so far into names.
    fn parameter_list(&mut self) -> Result<Vec<Field>> {
        let mut list = Vec::new();
        loop {
            let position = self.position();
            list.push((position, self.var_type()?));
            if !self.eat(TokenKind::Comma) || self.at(TokenKind::RParen) {
                break;
            }
        }

        let Some(ty) = self.try_var_type()? else {
            return Ok(list
                .into_iter()
                .map(|(_, ty)| Field {
                    names: vec![],
                    ty,
                    tag: None,
                })
                .collect());
        };

        let names = self.names_of(list)?;
        let mut params = vec![Field {
            names,
            ty,
            tag: None,
        }];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::RParen) {
                break;
            }
            let names = self.ident_list()?;
            let ty = self.var_type()?;
            params.push(Field {
                names,
                ty,
                tag: None,
            });
        }
        Ok(params)
    }

    fn names_of(&self, list: Vec<(Position, Expr)>) -> Result<Vec<Ident>> {
        list.into_iter()
            .map(|(position, expr)| match expr {
                Expr::Ident(ident) => Ok(ident),
                _ => Err(self.error_at(position, "expected identifier")),
            })
            .collect()
    }

    fn var_type(&mut self) -> Result<Expr> {
        match self.try_var_type()? {
            Some(ty) => Ok(ty),
            None => Err(self.error_expected("type")),
        }
    }

    /// A type, or `...T` for a variadic parameter.
    fn try_var_type(&mut self) -> Result<Option<Expr>> {
        if !self.at(TokenKind::Ellipsis) {
            return self.try_type();
        }
        let position = self.position();
        self.next();
        match self.try_type()? {
            Some(ty) => Ok(Some(Expr::Ellipsis(Some(Box::new(ty))))),
            None => Err(self.error_at(position, "'...' parameter is missing type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::parse;
    use crate::token::TokenKind;

    fn type_of(text: &str) -> Expr {
        let source = format!("package main\ntype T {}", text);
        match parse(&source).map(|file| file.decls) {
            Ok(mut decls) => match decls.pop() {
                Some(Decl::Gen(GenDecl { mut specs, .. })) => match specs.pop() {
                    Some(Spec::Type(spec)) => spec.ty,
                    other => panic!("unexpected spec {:?}", other),
                },
                other => panic!("unexpected declaration {:?}", other),
            },
            Err(err) => panic!("{}", err),
        }
    }

    fn params(text: &str) -> Vec<Field> {
        match type_of(&format!("func{}", text)) {
            Expr::FuncType(ty) => ty.params.list,
            other => panic!("not a function type: {:?}", other),
        }
    }

    fn field(names: &[&str], ty: Expr) -> Field {
        Field {
            names: names.iter().map(|name| Ident::new(*name)).collect(),
            ty,
            tag: None,
        }
    }

    #[test]
    fn test_parameter_grouping() {
        assert_eq!(
            params("(int, string)"),
            vec![field(&[], Expr::ident("int")), field(&[], Expr::ident("string"))]
        );
        assert_eq!(
            params("(a, b int, c ...string)"),
            vec![
                field(&["a", "b"], Expr::ident("int")),
                field(
                    &["c"],
                    Expr::Ellipsis(Some(Box::new(Expr::ident("string"))))
                ),
            ]
        );
        assert_eq!(
            params("(w io.Writer,)"),
            vec![field(
                &["w"],
                Expr::Selector {
                    x: Box::new(Expr::ident("io")),
                    sel: Ident::new("Writer"),
                }
            )]
        );
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(
            type_of("map[string][]int"),
            Expr::MapType {
                key: Box::new(Expr::ident("string")),
                value: Box::new(Expr::ArrayType {
                    len: None,
                    elt: Box::new(Expr::ident("int")),
                }),
            }
        );
        assert_eq!(
            type_of("[...]byte"),
            Expr::ArrayType {
                len: Some(Box::new(Expr::Ellipsis(None))),
                elt: Box::new(Expr::ident("byte")),
            }
        );
        assert_eq!(
            type_of("<-chan chan<- int"),
            Expr::ChanType {
                dir: ChanDir::Recv,
                value: Box::new(Expr::ChanType {
                    dir: ChanDir::Send,
                    value: Box::new(Expr::ident("int")),
                }),
            }
        );
    }

    #[test]
    fn test_struct_fields() {
        assert_eq!(
            type_of("struct {\n\tX, Y int `json:\"x\"`\n\tio.Reader\n\t*Node\n}"),
            Expr::StructType(FieldList {
                list: vec![
                    Field {
                        names: vec![Ident::new("X"), Ident::new("Y")],
                        ty: Expr::ident("int"),
                        tag: Some(BasicLit {
                            kind: TokenKind::String,
                            value: "`json:\"x\"`".to_string(),
                        }),
                    },
                    field(
                        &[],
                        Expr::Selector {
                            x: Box::new(Expr::ident("io")),
                            sel: Ident::new("Reader"),
                        }
                    ),
                    field(&[], Expr::Star(Box::new(Expr::ident("Node")))),
                ],
            })
        );
    }

    #[test]
    fn test_interface_methods() {
        assert_eq!(
            type_of("interface {\n\tfmt.Stringer\n\tLen() int\n}"),
            Expr::InterfaceType(FieldList {
                list: vec![
                    field(
                        &[],
                        Expr::Selector {
                            x: Box::new(Expr::ident("fmt")),
                            sel: Ident::new("Stringer"),
                        }
                    ),
                    field(
                        &["Len"],
                        Expr::FuncType(FuncType {
                            params: FieldList::default(),
                            results: Some(FieldList {
                                list: vec![field(&[], Expr::ident("int"))],
                            }),
                        })
                    ),
                ],
            })
        );
    }

    #[test]
    fn test_parameter_errors() {
        let error = |text: &str| {
            parse(&format!("package main\nfunc f{}", text))
                .map(|_| ())
                .unwrap_err()
                .to_string()
        };
        assert_eq!(error("(a.b c)"), "2:8: expected identifier");
        assert_eq!(error("(a ...)"), "2:10: '...' parameter is missing type");
        assert_eq!(
            error("(\n\ta int\n)"),
            "3:7: missing ',' before newline in parameter list"
        );
    }
}
