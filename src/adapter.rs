//! Bridge from source text to the generic node model

use crate::config::FILE_NAME;
use crate::node::{IntoNode, Node};
use crate::parser;

/// Outcome of one parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseResult {
    Tree(Node),
    /// `main.go:LINE:COL: description` of the first syntax error
    Failure(String),
}

impl ParseResult {
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree(_))
    }
}

/// Parses any text into a tree or the first error, never a partial tree.
pub fn parse(text: &str) -> ParseResult {
    match parser::parse(text) {
        Ok(file) => ParseResult::Tree(file.into_node()),
        Err(err) => {
            log::debug!("syntax error: {}", err);
            ParseResult::Failure(format!("{}:{}", FILE_NAME, err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            parse(""),
            ParseResult::Failure("main.go:1:1: expected 'package', found 'EOF'".to_string())
        );
        assert_eq!(
            parse("package main\nfunc main() {\n\tif {\n\t}\n}"),
            ParseResult::Failure("main.go:3:5: missing condition in if statement".to_string())
        );
    }

    #[test]
    fn test_tree() {
        assert!(parse(crate::config::STARTER_TEXT).is_tree());
        assert!(!parse("package").is_tree());
    }
}
