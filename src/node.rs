//! Generic syntax tree consumed by the formatter
//!
//! A [`Node`] carries a kind name, an optional literal and its children in
//! parser order, each under a field name. Rendering goes through the
//! [`SyntaxNode`] trait only, so the formatter never switches on kinds.

mod lower;

pub use self::lower::IntoNode;

/// One child position of a node.
#[derive(Debug)]
pub enum ChildSlot<'a, N> {
    Absent,
    Single(&'a N),
    List(&'a [N]),
}

impl<N> Clone for ChildSlot<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for ChildSlot<'_, N> {}

/// Read-only traversal over a syntax tree.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> &str;

    fn literal(&self) -> Option<&str>;

    /// Children in source order, paired with their field names.
    fn children(&self) -> Box<dyn Iterator<Item = (&str, ChildSlot<'_, Self>)> + '_>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Child {
    Absent,
    Single(Box<Node>),
    List(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Slot {
    pub name: &'static str,
    pub child: Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    kind: &'static str,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    literal: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    slots: Vec<Slot>,
}

impl Node {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            literal: None,
            slots: Vec::new(),
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    fn push(mut self, name: &'static str, child: Child) -> Self {
        self.slots.push(Slot { name, child });
        self
    }

    pub fn single(self, name: &'static str, child: Node) -> Self {
        self.push(name, Child::Single(Box::new(child)))
    }

    /// A single child, or an absent slot for `None`.
    pub fn optional(self, name: &'static str, child: Option<Node>) -> Self {
        match child {
            Some(child) => self.single(name, child),
            None => self.absent(name),
        }
    }

    pub fn absent(self, name: &'static str) -> Self {
        self.push(name, Child::Absent)
    }

    pub fn list(self, name: &'static str, children: impl IntoIterator<Item = Node>) -> Self {
        self.push(name, Child::List(children.into_iter().collect()))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

impl SyntaxNode for Node {
    fn kind(&self) -> &str {
        self.kind
    }

    fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    fn children(&self) -> Box<dyn Iterator<Item = (&str, ChildSlot<'_, Self>)> + '_> {
        Box::new(self.slots.iter().map(|slot| {
            let child = match &slot.child {
                Child::Absent => ChildSlot::Absent,
                Child::Single(node) => ChildSlot::Single(&**node),
                Child::List(nodes) => ChildSlot::List(nodes.as_slice()),
            };
            (slot.name, child)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("CallExpr")
            .single("Fun", Node::new("Ident").with_literal("f"))
            .absent("Lparen")
            .list(
                "Args",
                vec![
                    Node::new("BasicLit").with_literal("1"),
                    Node::new("BasicLit").with_literal("2"),
                ],
            )
    }

    #[test]
    fn test_builder_keeps_order() {
        let node = sample();
        assert_eq!(node.kind(), "CallExpr");
        assert_eq!(node.literal(), None);

        let names: Vec<&str> = node.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Fun", "Lparen", "Args"]);

        let slots: Vec<_> = node.children().map(|(_, slot)| slot).collect();
        assert!(matches!(slots[0], ChildSlot::Single(fun) if fun.literal() == Some("f")));
        assert!(matches!(slots[1], ChildSlot::Absent));
        assert!(matches!(slots[2], ChildSlot::List(args) if args.len() == 2));
    }

    #[test]
    fn test_optional() {
        let node = Node::new("ReturnStmt").optional("X", None);
        assert_eq!(node.slots()[0].child, Child::Absent);

        let node = Node::new("ReturnStmt").optional("X", Some(Node::new("Ident")));
        assert_eq!(node.slots()[0].child, Child::Single(Box::new(Node::new("Ident"))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(Node::new("Ident").with_literal("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "Ident", "literal": "x" }));

        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["slots"][0]["name"], "Fun");
        assert_eq!(json["slots"][1]["child"], "Absent");
        assert_eq!(json["slots"][2]["child"]["List"][1]["literal"], "2");
    }
}
