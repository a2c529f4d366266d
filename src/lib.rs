pub mod adapter;
pub mod ast;
pub mod config;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod pipeline;
pub mod result;
pub mod span;
pub mod token;

pub use adapter::{parse, ParseResult};
pub use formatter::{RenderedOutput, TreeFormatter};
pub use node::{ChildSlot, Node, SyntaxNode};
pub use pipeline::{PipelineController, PipelineState};
