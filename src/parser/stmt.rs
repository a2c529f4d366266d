//! Statements and blocks
//!
//! Statements leave their terminating semicolon to the caller except where
//! the statement form decides it, as with labels and `else if` chains.

use crate::ast::*;
use crate::error::Result;
use crate::span::Position;
use crate::token::TokenKind;

use super::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StmtMode {
    Basic,
    /// a label may follow a lone identifier
    LabelOk,
    /// `range` may follow `=` or `:=`
    RangeOk,
}

fn is_type_switch_guard(stmt: Option<&Stmt>) -> bool {
    let is_guard = |x: &Expr| matches!(x, Expr::TypeAssert { ty: None, .. });
    match stmt {
        Some(Stmt::Expr(x)) => is_guard(x),
        Some(Stmt::Assign {
            lhs,
            tok: TokenKind::Define,
            rhs,
        }) => lhs.len() == 1 && rhs.len() == 1 && is_guard(&rhs[0]),
        _ => false,
    }
}

impl<'a> Parser<'a> {
    pub(super) fn block(&mut self) -> Result<BlockStmt> {
        self.expect(TokenKind::LBrace)?;
        let list = self.stmt_list()?;
        self.expect(TokenKind::RBrace)?;
        Ok(BlockStmt { list })
    }

    fn stmt_list(&mut self) -> Result<Vec<Stmt>> {
        let mut list = Vec::new();
        while !matches!(
            self.kind(),
            TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
        ) {
            list.push(self.stmt()?);
        }
        Ok(list)
    }

    fn stmt(&mut self) -> Result<Stmt> {
        self.nested(|p| p.stmt_inner())
    }

    fn stmt_inner(&mut self) -> Result<Stmt> {
        let token = self.token();
        match token.kind {
            TokenKind::Const | TokenKind::Type | TokenKind::Var => {
                let decl = self.gen_decl(token.kind)?;
                self.expect_semi()?;
                Ok(Stmt::Decl(decl))
            }
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Char
            | TokenKind::String
            | TokenKind::Func
            | TokenKind::LParen
            | TokenKind::LBrack
            | TokenKind::Struct
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Interface
            | TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Mul
            | TokenKind::And
            | TokenKind::Xor
            | TokenKind::Arrow
            | TokenKind::Not
            | TokenKind::Tilde => {
                let stmt = self.simple_stmt(StmtMode::LabelOk)?;
                if !matches!(stmt, Stmt::Labeled { .. }) {
                    self.expect_semi()?;
                }
                Ok(stmt)
            }
            TokenKind::Go | TokenKind::Defer => {
                self.next();
                let position = self.position();
                let call = self.expr()?;
                if !matches!(call, Expr::Call { .. }) {
                    return Err(self.error_at(
                        position,
                        format!("expression in {} must be function call", token.kind),
                    ));
                }
                self.expect_semi()?;
                Ok(if token.kind == TokenKind::Go {
                    Stmt::Go(call)
                } else {
                    Stmt::Defer(call)
                })
            }
            TokenKind::Return => {
                self.next();
                let results = if matches!(self.kind(), TokenKind::Semicolon | TokenKind::RBrace) {
                    Vec::new()
                } else {
                    self.expr_list()?
                };
                self.expect_semi()?;
                Ok(Stmt::Return(results))
            }
            TokenKind::Break | TokenKind::Continue | TokenKind::Goto | TokenKind::Fallthrough => {
                self.next();
                let label = if token.kind != TokenKind::Fallthrough && self.at(TokenKind::Ident) {
                    Some(self.ident()?)
                } else {
                    None
                };
                self.expect_semi()?;
                Ok(Stmt::Branch {
                    tok: token.kind,
                    label,
                })
            }
            TokenKind::LBrace => {
                let block = self.block()?;
                self.expect_semi()?;
                Ok(Stmt::Block(block))
            }
            TokenKind::If => self.if_stmt(),
            TokenKind::Switch => self.switch_stmt(),
            TokenKind::Select => self.select_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::Semicolon => {
                self.next();
                Ok(Stmt::Empty {
                    implicit: token.is_implicit_semicolon(),
                })
            }
            // a label right before the closing brace
            TokenKind::RBrace => Ok(Stmt::Empty { implicit: true }),
            _ => Err(self.error_expected("statement")),
        }
    }

    fn simple_stmt(&mut self, mode: StmtMode) -> Result<Stmt> {
        let position = self.position();
        let lhs = self.expr_list()?;

        let tok = self.kind();
        if tok == TokenKind::Define || tok == TokenKind::Assign || tok.is_op_assign() {
            self.next();
            let plain = tok == TokenKind::Define || tok == TokenKind::Assign;
            if mode == StmtMode::RangeOk && plain && self.eat(TokenKind::Range) {
                let x = self.expr()?;
                return self.range_clause(position, lhs, Some(tok), x);
            }
            let rhs = self.expr_list()?;
            return Ok(Stmt::Assign { lhs, tok, rhs });
        }

        match (tok, self.single(position, lhs)?) {
            (TokenKind::Colon, Expr::Ident(label)) if mode == StmtMode::LabelOk => {
                self.next();
                let stmt = Box::new(self.stmt()?);
                Ok(Stmt::Labeled { label, stmt })
            }
            (TokenKind::Arrow, chan) => {
                self.next();
                let value = self.expr()?;
                Ok(Stmt::Send { chan, value })
            }
            (TokenKind::Inc | TokenKind::Dec, x) => {
                self.next();
                Ok(Stmt::IncDec { x, tok })
            }
            (_, x) => Ok(Stmt::Expr(x)),
        }
    }

    /// The single expression of a list that must have exactly one.
    fn single(&self, position: Position, list: Vec<Expr>) -> Result<Expr> {
        let mut list = list.into_iter();
        match (list.next(), list.next()) {
            (Some(x), None) => Ok(x),
            _ => Err(self.error_at(position, "expected 1 expression")),
        }
    }

    /// A range header; the body is filled in by the enclosing `for`.
    fn range_clause(
        &self,
        position: Position,
        lhs: Vec<Expr>,
        tok: Option<TokenKind>,
        x: Expr,
    ) -> Result<Stmt> {
        if lhs.len() > 2 {
            return Err(self.error_at(position, "expected at most 2 expressions"));
        }
        let mut lhs = lhs.into_iter();
        Ok(Stmt::Range {
            key: lhs.next(),
            value: lhs.next(),
            tok,
            x,
            body: BlockStmt::default(),
        })
    }

    /// Unwraps the expression of an expression statement in a header.
    fn header_expr(&self, stmt: Option<Stmt>, want: &str, position: Position) -> Result<Option<Expr>> {
        match stmt {
            None => Ok(None),
            Some(Stmt::Expr(x)) => Ok(Some(x)),
            Some(other) => {
                let found = if matches!(other, Stmt::Assign { .. }) {
                    "assignment"
                } else {
                    "simple statement"
                };
                Err(self.error_at(
                    position,
                    format!(
                        "expected {}, found {} (missing parentheses around composite literal?)",
                        want, found
                    ),
                ))
            }
        }
    }

    fn if_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::If)?;
        let (init, cond) = self.if_header()?;
        let body = self.block()?;
        let els = if self.eat(TokenKind::Else) {
            match self.kind() {
                TokenKind::If => Some(Box::new(self.nested(|p| p.if_stmt())?)),
                TokenKind::LBrace => {
                    let block = self.block()?;
                    self.expect_semi()?;
                    Some(Box::new(Stmt::Block(block)))
                }
                _ => return Err(self.error_expected("if statement or block")),
            }
        } else {
            self.expect_semi()?;
            None
        };
        Ok(Stmt::If {
            init,
            cond,
            body,
            els,
        })
    }

    fn if_header(&mut self) -> Result<(Option<Box<Stmt>>, Expr)> {
        if self.at(TokenKind::LBrace) {
            return Err(self.error_at(self.position(), "missing condition in if statement"));
        }

        let prev_lev = self.expr_lev;
        self.expr_lev = -1;

        let mut position = self.position();
        let mut init = None;
        if !self.at(TokenKind::Semicolon) {
            init = Some(self.simple_stmt(StmtMode::Basic)?);
        }
        let cond = if self.eat(TokenKind::Semicolon) {
            if self.at(TokenKind::LBrace) {
                return Err(self.error_at(self.position(), "missing condition in if statement"));
            }
            position = self.position();
            Some(self.simple_stmt(StmtMode::Basic)?)
        } else {
            init.take()
        };
        self.expr_lev = prev_lev;

        match self.header_expr(cond, "boolean expression", position)? {
            Some(cond) => Ok((init.map(Box::new), cond)),
            None => Err(self.error_at(position, "missing condition in if statement")),
        }
    }

    fn switch_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Switch)?;

        let mut init = None;
        let mut tag = None;
        let mut position = self.position();
        if !self.at(TokenKind::LBrace) {
            let prev_lev = self.expr_lev;
            self.expr_lev = -1;
            if !self.at(TokenKind::Semicolon) {
                tag = Some(self.simple_stmt(StmtMode::Basic)?);
            }
            if self.eat(TokenKind::Semicolon) {
                init = tag.take();
                if !self.at(TokenKind::LBrace) {
                    position = self.position();
                    tag = Some(self.simple_stmt(StmtMode::Basic)?);
                }
            }
            self.expr_lev = prev_lev;
        }

        let type_switch = is_type_switch_guard(tag.as_ref());
        self.expect(TokenKind::LBrace)?;
        let mut list = Vec::new();
        while matches!(self.kind(), TokenKind::Case | TokenKind::Default) {
            list.push(self.case_clause()?);
        }
        self.expect(TokenKind::RBrace)?;
        self.expect_semi()?;

        let init = init.map(Box::new);
        let body = BlockStmt { list };
        match tag {
            Some(assign) if type_switch => Ok(Stmt::TypeSwitch {
                init,
                assign: Box::new(assign),
                body,
            }),
            tag => Ok(Stmt::Switch {
                init,
                tag: self.header_expr(tag, "switch expression", position)?,
                body,
            }),
        }
    }

    fn case_clause(&mut self) -> Result<Stmt> {
        let list = if self.eat(TokenKind::Case) {
            Some(self.expr_list()?)
        } else {
            self.expect(TokenKind::Default)?;
            None
        };
        self.expect(TokenKind::Colon)?;
        let body = self.stmt_list()?;
        Ok(Stmt::CaseClause { list, body })
    }

    fn select_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::Select)?;
        self.expect(TokenKind::LBrace)?;
        let mut list = Vec::new();
        while matches!(self.kind(), TokenKind::Case | TokenKind::Default) {
            list.push(self.comm_clause()?);
        }
        self.expect(TokenKind::RBrace)?;
        self.expect_semi()?;
        Ok(Stmt::Select {
            body: BlockStmt { list },
        })
    }

    fn comm_clause(&mut self) -> Result<Stmt> {
        let comm = if self.eat(TokenKind::Case) {
            let position = self.position();
            let lhs = self.expr_list()?;
            let comm = match self.kind() {
                TokenKind::Arrow => {
                    let chan = self.single(position, lhs)?;
                    self.next();
                    let value = self.expr()?;
                    Stmt::Send { chan, value }
                }
                tok @ (TokenKind::Assign | TokenKind::Define) => {
                    if lhs.len() > 2 {
                        return Err(self.error_at(position, "expected 1 or 2 expressions"));
                    }
                    self.next();
                    let rhs = vec![self.expr()?];
                    Stmt::Assign { lhs, tok, rhs }
                }
                _ => Stmt::Expr(self.single(position, lhs)?),
            };
            Some(Box::new(comm))
        } else {
            self.expect(TokenKind::Default)?;
            None
        };
        self.expect(TokenKind::Colon)?;
        let body = self.stmt_list()?;
        Ok(Stmt::CommClause { comm, body })
    }

    fn for_stmt(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::For)?;
        let prev_lev = self.expr_lev;
        self.expr_lev = -1;

        let mut init = None;
        let mut cond = None;
        let mut post = None;
        let mut range = None;
        if !self.at(TokenKind::LBrace) {
            let mut position = self.position();
            let mut header = None;
            if self.eat(TokenKind::Range) {
                let x = self.expr()?;
                header = Some(self.range_clause(position, Vec::new(), None, x)?);
            } else if !self.at(TokenKind::Semicolon) {
                header = Some(self.simple_stmt(StmtMode::RangeOk)?);
            }

            if matches!(header, Some(Stmt::Range { .. })) {
                range = header;
            } else if self.eat(TokenKind::Semicolon) {
                init = header.map(Box::new);
                if self.at(TokenKind::LBrace) {
                    return Err(self.error_at(self.position(), "expected for loop condition"));
                }
                position = self.position();
                let mut cond_stmt = None;
                if !self.at(TokenKind::Semicolon) {
                    cond_stmt = Some(self.simple_stmt(StmtMode::Basic)?);
                }
                cond = self.header_expr(cond_stmt, "boolean or range expression", position)?;
                self.expect_semi()?;
                if !self.at(TokenKind::LBrace) {
                    post = Some(Box::new(self.simple_stmt(StmtMode::Basic)?));
                }
            } else {
                cond = self.header_expr(header, "boolean or range expression", position)?;
            }
        }

        self.expr_lev = prev_lev;
        let body = self.block()?;
        self.expect_semi()?;

        match range {
            Some(Stmt::Range {
                key, value, tok, x, ..
            }) => Ok(Stmt::Range {
                key,
                value,
                tok,
                x,
                body,
            }),
            _ => Ok(Stmt::For {
                init,
                cond,
                post,
                body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::parse;
    use crate::token::TokenKind;

    /// the statements of `func main() { <text> }`
    fn stmts(text: &str) -> Vec<Stmt> {
        let source = format!("package main\nfunc main() {{\n{}\n}}", text);
        match parse(&source).map(|file| file.decls) {
            Ok(mut decls) => match decls.pop() {
                Some(Decl::Func(FuncDecl {
                    body: Some(body), ..
                })) => body.list,
                other => panic!("unexpected declaration {:?}", other),
            },
            Err(err) => panic!("{}", err),
        }
    }

    fn error(text: &str) -> String {
        parse(&format!("package main\nfunc main() {{\n{}\n}}", text))
            .map(|_| ())
            .unwrap_err()
            .to_string()
    }

    fn id(name: &str) -> Expr {
        Expr::ident(name)
    }

    fn int(value: &str) -> Expr {
        Expr::BasicLit(BasicLit {
            kind: TokenKind::Int,
            value: value.to_string(),
        })
    }

    #[test]
    fn test_simple_statements() {
        assert_eq!(
            stmts("x, y := 1, 2\nx += y\nx++\nch <- x\nf()"),
            vec![
                Stmt::Assign {
                    lhs: vec![id("x"), id("y")],
                    tok: TokenKind::Define,
                    rhs: vec![int("1"), int("2")],
                },
                Stmt::Assign {
                    lhs: vec![id("x")],
                    tok: TokenKind::AddAssign,
                    rhs: vec![id("y")],
                },
                Stmt::IncDec {
                    x: id("x"),
                    tok: TokenKind::Inc,
                },
                Stmt::Send {
                    chan: id("ch"),
                    value: id("x"),
                },
                Stmt::Expr(Expr::Call {
                    fun: Box::new(id("f")),
                    args: vec![],
                    spread: false,
                }),
            ]
        );
    }

    #[test]
    fn test_labels_and_branches() {
        assert_eq!(
            stmts("outer:\n\tfor {\n\t\tbreak outer\n\t}"),
            vec![Stmt::Labeled {
                label: Ident::new("outer"),
                stmt: Box::new(Stmt::For {
                    init: None,
                    cond: None,
                    post: None,
                    body: BlockStmt {
                        list: vec![Stmt::Branch {
                            tok: TokenKind::Break,
                            label: Some(Ident::new("outer")),
                        }],
                    },
                }),
            }]
        );
    }

    #[test]
    fn test_if_else_chain() {
        assert_eq!(
            stmts("if err := f(); err != nil {\n} else if ok {\n} else {\n}"),
            vec![Stmt::If {
                init: Some(Box::new(Stmt::Assign {
                    lhs: vec![id("err")],
                    tok: TokenKind::Define,
                    rhs: vec![Expr::Call {
                        fun: Box::new(id("f")),
                        args: vec![],
                        spread: false,
                    }],
                })),
                cond: Expr::Binary {
                    x: Box::new(id("err")),
                    op: TokenKind::Neq,
                    y: Box::new(id("nil")),
                },
                body: BlockStmt::default(),
                els: Some(Box::new(Stmt::If {
                    init: None,
                    cond: id("ok"),
                    body: BlockStmt::default(),
                    els: Some(Box::new(Stmt::Block(BlockStmt::default()))),
                })),
            }]
        );
    }

    #[test]
    fn test_else_if_chain_counts_toward_nesting() {
        let chain = |n: usize| format!("if x {{\n{}}}", "} else if x {\n".repeat(n));
        assert_eq!(stmts(&chain(50)).len(), 1);
        assert!(error(&chain(1000)).ends_with("exceeded max nesting depth"));
    }

    #[test]
    fn test_composite_literal_in_header() {
        // the brace opens the block, not a literal
        assert_eq!(
            stmts("if x == y {\n}"),
            vec![Stmt::If {
                init: None,
                cond: Expr::Binary {
                    x: Box::new(id("x")),
                    op: TokenKind::Eql,
                    y: Box::new(id("y")),
                },
                body: BlockStmt::default(),
                els: None,
            }]
        );
        // parenthesized literals are fine
        let list = stmts("if p == (T{}) {\n}");
        assert!(matches!(list[0], Stmt::If { .. }));
    }

    #[test]
    fn test_for_forms() {
        assert_eq!(
            stmts("for i := 0; i < n; i++ {\n}"),
            vec![Stmt::For {
                init: Some(Box::new(Stmt::Assign {
                    lhs: vec![id("i")],
                    tok: TokenKind::Define,
                    rhs: vec![int("0")],
                })),
                cond: Some(Expr::Binary {
                    x: Box::new(id("i")),
                    op: TokenKind::Lss,
                    y: Box::new(id("n")),
                }),
                post: Some(Box::new(Stmt::IncDec {
                    x: id("i"),
                    tok: TokenKind::Inc,
                })),
                body: BlockStmt::default(),
            }]
        );
        assert_eq!(
            stmts("for k, v := range m {\n}\nfor range ch {\n}"),
            vec![
                Stmt::Range {
                    key: Some(id("k")),
                    value: Some(id("v")),
                    tok: Some(TokenKind::Define),
                    x: id("m"),
                    body: BlockStmt::default(),
                },
                Stmt::Range {
                    key: None,
                    value: None,
                    tok: None,
                    x: id("ch"),
                    body: BlockStmt::default(),
                },
            ]
        );
    }

    #[test]
    fn test_switches() {
        let list = stmts("switch x := v.(type) {\ncase int, string:\ndefault:\n}");
        let Stmt::TypeSwitch { init, assign, body } = &list[0] else {
            panic!("expected a type switch, got {:?}", list[0]);
        };
        assert_eq!(*init, None);
        assert!(matches!(**assign, Stmt::Assign { .. }));
        assert_eq!(
            body.list,
            vec![
                Stmt::CaseClause {
                    list: Some(vec![id("int"), id("string")]),
                    body: vec![],
                },
                Stmt::CaseClause {
                    list: None,
                    body: vec![],
                },
            ]
        );

        let list = stmts("switch {\ncase x > 0:\n\treturn\n}");
        assert!(matches!(list[0], Stmt::Switch { tag: None, .. }));
    }

    #[test]
    fn test_select() {
        let list = stmts("select {\ncase v, ok := <-ch:\ncase out <- 1:\ndefault:\n}");
        let Stmt::Select { body } = &list[0] else {
            panic!("expected a select, got {:?}", list[0]);
        };
        assert_eq!(body.list.len(), 3);
        assert!(matches!(
            &body.list[1],
            Stmt::CommClause { comm: Some(comm), .. } if matches!(**comm, Stmt::Send { .. })
        ));
    }

    #[test]
    fn test_errors() {
        assert_eq!(error("if {\n}"), "3:4: missing condition in if statement");
        assert_eq!(error("go x"), "3:4: expression in go must be function call");
        assert_eq!(error("defer 1"), "3:7: expression in defer must be function call");
        assert_eq!(error("a, b"), "3:1: expected 1 expression");
        assert_eq!(error("x := 1 2"), "3:8: expected ';', found 2");
        assert_eq!(error("else"), "3:1: expected statement, found 'else'");
        assert_eq!(
            error("for x := 0 {\n}"),
            "3:5: expected boolean or range expression, found assignment (missing parentheses around composite literal?)"
        );
    }
}
