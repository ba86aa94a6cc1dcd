use thiserror::Error;
use tsdl_common::{LineMap, Position};

/// The first syntax error in a source text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }

    /// Zero-based line/character of the error within `text`.
    pub fn position(&self, text: &str) -> Position {
        LineMap::build(text).position_of(self.offset.min(text.len()))
    }
}
