//! Recursive-descent parser.
//!
//! `ParserState` is split across files by grammar area:
//! - `state` - token cursor, lookahead, automatic semicolon insertion
//! - `state_statements` - source unit, module elements, statements
//! - `state_class_members` - class declarations and their members
//! - `state_expressions` - expressions, including arrow functions
//! - `state_types` - types, parameter lists and call signatures

mod error;
mod state;
mod state_class_members;
mod state_expressions;
mod state_statements;
mod state_types;

pub use error::ParseError;
pub use state::ParserState;

use tsdl_syntax::SyntaxNode;

/// Parse `text` into a `SourceUnit` tree.
pub fn parse(text: &str) -> Result<SyntaxNode, ParseError> {
    ParserState::new(text)?.parse_source_unit()
}

#[cfg(test)]
#[path = "../../tests/parser_tests.rs"]
mod tests;
