//! Fixed settings of the viewer core.

/// Program shown before the first edit arrives.
pub const STARTER_TEXT: &str = r#"
package main

import (
	"fmt"
)

func main() {
	fmt.Println("Hello, playground")
}"#;

/// Spaces per level of tree depth.
pub const INDENT_UNIT: usize = 2;

/// File name reported in syntax error messages.
pub const FILE_NAME: &str = "main.go";

/// Deepest syntactic nesting the parser accepts before giving up.
pub const MAX_NESTING: usize = 128;
