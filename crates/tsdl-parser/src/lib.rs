//! Reference parser for the tsdl compiler.
//!
//! Builds the full-fidelity tree the lowering pass consumes. The parser is
//! fail-fast: the first syntax error aborts with a positioned [`ParseError`];
//! there is no error recovery.

pub mod parser;

pub use parser::{ParseError, ParserState, parse};
