//! Lowering of the typed Go syntax tree into [`Node`]s
//!
//! Kinds and field names follow Go's `go/ast` package. Operator-bearing
//! nodes carry their operator or keyword as the literal.

use crate::ast::*;
use crate::token::TokenKind;

use super::Node;

pub trait IntoNode {
    fn into_node(self) -> Node;
}

fn nodes<T: IntoNode>(items: Vec<T>) -> Vec<Node> {
    items.into_iter().map(IntoNode::into_node).collect()
}

fn boxed<T: IntoNode>(item: Option<Box<T>>) -> Option<Node> {
    item.map(|item| item.into_node())
}

impl<T: IntoNode> IntoNode for Box<T> {
    fn into_node(self) -> Node {
        (*self).into_node()
    }
}

impl IntoNode for File {
    fn into_node(self) -> Node {
        Node::new("File")
            .single("Name", self.package.into_node())
            .list("Decls", nodes(self.decls))
    }
}

impl IntoNode for Ident {
    fn into_node(self) -> Node {
        Node::new("Ident").with_literal(self.name)
    }
}

impl IntoNode for BasicLit {
    fn into_node(self) -> Node {
        Node::new("BasicLit").with_literal(self.value)
    }
}

impl IntoNode for Decl {
    fn into_node(self) -> Node {
        match self {
            Decl::Gen(decl) => decl.into_node(),
            Decl::Func(decl) => decl.into_node(),
        }
    }
}

impl IntoNode for GenDecl {
    fn into_node(self) -> Node {
        Node::new("GenDecl")
            .with_literal(self.keyword.as_str())
            .list("Specs", nodes(self.specs))
    }
}

impl IntoNode for Spec {
    fn into_node(self) -> Node {
        match self {
            Spec::Import(spec) => Node::new("ImportSpec")
                .optional("Name", spec.name.map(IntoNode::into_node))
                .single("Path", spec.path.into_node()),
            Spec::Value(spec) => Node::new("ValueSpec")
                .list("Names", nodes(spec.names))
                .optional("Type", spec.ty.map(IntoNode::into_node))
                .list("Values", nodes(spec.values)),
            Spec::Type(spec) => {
                let node = Node::new("TypeSpec");
                let node = if spec.alias {
                    node.with_literal("alias")
                } else {
                    node
                };
                node.single("Name", spec.name.into_node())
                    .single("Type", spec.ty.into_node())
            }
        }
    }
}

impl IntoNode for FuncDecl {
    fn into_node(self) -> Node {
        Node::new("FuncDecl")
            .optional("Recv", self.recv.map(IntoNode::into_node))
            .single("Name", self.name.into_node())
            .single("Type", self.ty.into_node())
            .optional("Body", self.body.map(IntoNode::into_node))
    }
}

impl IntoNode for FuncType {
    fn into_node(self) -> Node {
        Node::new("FuncType")
            .single("Params", self.params.into_node())
            .optional("Results", self.results.map(IntoNode::into_node))
    }
}

impl IntoNode for FieldList {
    fn into_node(self) -> Node {
        Node::new("FieldList").list("List", nodes(self.list))
    }
}

impl IntoNode for Field {
    fn into_node(self) -> Node {
        Node::new("Field")
            .list("Names", nodes(self.names))
            .single("Type", self.ty.into_node())
            .optional("Tag", self.tag.map(IntoNode::into_node))
    }
}

impl IntoNode for BlockStmt {
    fn into_node(self) -> Node {
        Node::new("BlockStmt").list("List", nodes(self.list))
    }
}

impl IntoNode for Expr {
    fn into_node(self) -> Node {
        match self {
            Expr::Ident(ident) => ident.into_node(),
            Expr::BasicLit(lit) => lit.into_node(),
            Expr::CompositeLit { ty, elts } => Node::new("CompositeLit")
                .optional("Type", boxed(ty))
                .list("Elts", nodes(elts)),
            Expr::FuncLit { ty, body } => Node::new("FuncLit")
                .single("Type", ty.into_node())
                .single("Body", body.into_node()),
            Expr::Paren(x) => Node::new("ParenExpr").single("X", x.into_node()),
            Expr::Selector { x, sel } => Node::new("SelectorExpr")
                .single("X", x.into_node())
                .single("Sel", sel.into_node()),
            Expr::Index { x, index } => Node::new("IndexExpr")
                .single("X", x.into_node())
                .single("Index", index.into_node()),
            Expr::Slice { x, low, high, max } => Node::new("SliceExpr")
                .single("X", x.into_node())
                .optional("Low", boxed(low))
                .optional("High", boxed(high))
                .optional("Max", boxed(max)),
            Expr::TypeAssert { x, ty } => Node::new("TypeAssertExpr")
                .single("X", x.into_node())
                .optional("Type", boxed(ty)),
            Expr::Call { fun, args, spread } => {
                let node = Node::new("CallExpr");
                let node = if spread { node.with_literal("...") } else { node };
                node.single("Fun", fun.into_node())
                    .list("Args", nodes(args))
            }
            Expr::Star(x) => Node::new("StarExpr").single("X", x.into_node()),
            Expr::Unary { op, x } => Node::new("UnaryExpr")
                .with_literal(op.as_str())
                .single("X", x.into_node()),
            Expr::Binary { x, op, y } => Node::new("BinaryExpr")
                .with_literal(op.as_str())
                .single("X", x.into_node())
                .single("Y", y.into_node()),
            Expr::KeyValue { key, value } => Node::new("KeyValueExpr")
                .single("Key", key.into_node())
                .single("Value", value.into_node()),
            Expr::Ellipsis(elt) => Node::new("Ellipsis").optional("Elt", boxed(elt)),
            Expr::ArrayType { len, elt } => Node::new("ArrayType")
                .optional("Len", boxed(len))
                .single("Elt", elt.into_node()),
            Expr::StructType(fields) => Node::new("StructType").single("Fields", fields.into_node()),
            Expr::FuncType(ty) => ty.into_node(),
            Expr::InterfaceType(methods) => {
                Node::new("InterfaceType").single("Methods", methods.into_node())
            }
            Expr::MapType { key, value } => Node::new("MapType")
                .single("Key", key.into_node())
                .single("Value", value.into_node()),
            Expr::ChanType { dir, value } => {
                let dir = match dir {
                    ChanDir::Both => "chan",
                    ChanDir::Send => "chan<-",
                    ChanDir::Recv => "<-chan",
                };
                Node::new("ChanType")
                    .with_literal(dir)
                    .single("Value", value.into_node())
            }
        }
    }
}

/// `default` clauses have no expression list.
fn clause(kind: &'static str, is_default: bool) -> Node {
    let node = Node::new(kind);
    if is_default {
        node.with_literal(TokenKind::Default.as_str())
    } else {
        node
    }
}

impl IntoNode for Stmt {
    fn into_node(self) -> Node {
        match self {
            Stmt::Decl(decl) => Node::new("DeclStmt").single("Decl", decl.into_node()),
            Stmt::Empty { implicit } => {
                let node = Node::new("EmptyStmt");
                if implicit {
                    node.with_literal("implicit")
                } else {
                    node
                }
            }
            Stmt::Labeled { label, stmt } => Node::new("LabeledStmt")
                .single("Label", label.into_node())
                .single("Stmt", stmt.into_node()),
            Stmt::Expr(x) => Node::new("ExprStmt").single("X", x.into_node()),
            Stmt::Send { chan, value } => Node::new("SendStmt")
                .single("Chan", chan.into_node())
                .single("Value", value.into_node()),
            Stmt::IncDec { x, tok } => Node::new("IncDecStmt")
                .with_literal(tok.as_str())
                .single("X", x.into_node()),
            Stmt::Assign { lhs, tok, rhs } => Node::new("AssignStmt")
                .with_literal(tok.as_str())
                .list("Lhs", nodes(lhs))
                .list("Rhs", nodes(rhs)),
            Stmt::Go(call) => Node::new("GoStmt").single("Call", call.into_node()),
            Stmt::Defer(call) => Node::new("DeferStmt").single("Call", call.into_node()),
            Stmt::Return(results) => Node::new("ReturnStmt").list("Results", nodes(results)),
            Stmt::Branch { tok, label } => Node::new("BranchStmt")
                .with_literal(tok.as_str())
                .optional("Label", label.map(IntoNode::into_node)),
            Stmt::Block(block) => block.into_node(),
            Stmt::If {
                init,
                cond,
                body,
                els,
            } => Node::new("IfStmt")
                .optional("Init", boxed(init))
                .single("Cond", cond.into_node())
                .single("Body", body.into_node())
                .optional("Else", boxed(els)),
            Stmt::CaseClause { list, body } => clause("CaseClause", list.is_none())
                .list("List", nodes(list.unwrap_or_default()))
                .list("Body", nodes(body)),
            Stmt::Switch { init, tag, body } => Node::new("SwitchStmt")
                .optional("Init", boxed(init))
                .optional("Tag", tag.map(IntoNode::into_node))
                .single("Body", body.into_node()),
            Stmt::TypeSwitch { init, assign, body } => Node::new("TypeSwitchStmt")
                .optional("Init", boxed(init))
                .single("Assign", assign.into_node())
                .single("Body", body.into_node()),
            Stmt::CommClause { comm, body } => clause("CommClause", comm.is_none())
                .optional("Comm", boxed(comm))
                .list("Body", nodes(body)),
            Stmt::Select { body } => Node::new("SelectStmt").single("Body", body.into_node()),
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => Node::new("ForStmt")
                .optional("Init", boxed(init))
                .optional("Cond", cond.map(IntoNode::into_node))
                .optional("Post", boxed(post))
                .single("Body", body.into_node()),
            Stmt::Range {
                key,
                value,
                tok,
                x,
                body,
            } => {
                let node = Node::new("RangeStmt");
                let node = match tok {
                    Some(tok) => node.with_literal(tok.as_str()),
                    None => node,
                };
                node.optional("Key", key.map(IntoNode::into_node))
                    .optional("Value", value.map(IntoNode::into_node))
                    .single("X", x.into_node())
                    .single("Body", body.into_node())
            }
        }
    }
}
