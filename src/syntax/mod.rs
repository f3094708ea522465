//! Source tree model: syntax kinds, the rowan tree, a logos lexer, the
//! outline parser and typed AST views.

pub mod ast;
mod kind;
mod lexer;
mod parser;

pub use kind::{HaxeLanguage, KindSet, NodeKind, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use parser::{Parse, ParseError, parse};
