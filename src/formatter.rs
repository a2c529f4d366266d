//! Indented text rendering of parse results
//!
//! One line per node, depth-first in child order:
//!
//! ```text
//! File
//!   Name: Ident: main
//!   Decls[0]: FuncDecl
//! ```

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::adapter::ParseResult;
use crate::config::INDENT_UNIT;
use crate::node::{ChildSlot, SyntaxNode};

/// Rendered text of one parse result. Clones share the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderedOutput(Arc<str>);

impl RenderedOutput {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RenderedOutput {
    fn from(text: String) -> Self {
        Self(text.into())
    }
}

impl Deref for RenderedOutput {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeFormatter {
    indent_size: usize,
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self {
            indent_size: INDENT_UNIT,
        }
    }
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(indent_size: usize) -> Self {
        Self { indent_size }
    }

    /// A failure renders as its message, a tree as one line per node.
    pub fn render(&self, result: &ParseResult) -> RenderedOutput {
        match result {
            ParseResult::Tree(root) => self.render_tree(root).into(),
            ParseResult::Failure(message) => message.clone().into(),
        }
    }

    pub fn render_tree<N: SyntaxNode>(&self, root: &N) -> String {
        let mut output = String::new();
        self.format_node(root, None, 0, &mut output);
        output
    }

    fn format_node<N: SyntaxNode>(
        &self,
        node: &N,
        label: Option<(&str, Option<usize>)>,
        depth: usize,
        output: &mut String,
    ) {
        self.indent(depth, output);
        match label {
            Some((field, Some(index))) => {
                output.push_str(field);
                output.push('[');
                output.push_str(&index.to_string());
                output.push_str("]: ");
            }
            Some((field, None)) => {
                output.push_str(field);
                output.push_str(": ");
            }
            None => {}
        }
        output.push_str(node.kind());
        if let Some(literal) = node.literal() {
            output.push_str(": ");
            push_escaped(literal, output);
        }
        output.push('\n');

        for (field, slot) in node.children() {
            match slot {
                ChildSlot::Absent => {}
                ChildSlot::Single(child) => {
                    self.format_node(child, Some((field, None)), depth + 1, output)
                }
                ChildSlot::List(children) => {
                    for (index, child) in children.iter().enumerate() {
                        self.format_node(child, Some((field, Some(index))), depth + 1, output);
                    }
                }
            }
        }
    }

    fn indent(&self, level: usize, output: &mut String) {
        for _ in 0..(level * self.indent_size) {
            output.push(' ');
        }
    }
}

/// Keeps a literal on one line.
fn push_escaped(literal: &str, output: &mut String) {
    for c in literal.chars() {
        if c.is_control() {
            output.extend(c.escape_default());
        } else {
            output.push(c);
        }
    }
}
