//! Reference scanner for the tsdl compiler.
//!
//! This crate turns source text into realized tokens:
//! - `Scanner` - on-demand tokenizer; the parser drives it one token at a time
//!   and can reposition it for speculative parsing and regex rescans
//! - `char_codes` - character classification
//!
//! Trivia convention: a token's trailing trivia runs up to and including the
//! first line break after it; everything after that line break belongs to the
//! leading trivia of the next token.

pub mod char_codes;
pub mod scanner;

pub use scanner::{ScanDiagnostic, Scanner};
