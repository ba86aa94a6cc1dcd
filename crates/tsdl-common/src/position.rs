//! Line/column bookkeeping over source text.

use memchr::memchr2_iter;
use serde::{Deserialize, Serialize};

/// A zero-based line/character position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Precomputed start offsets of every line in a text.
///
/// Recognizes `\n`, `\r\n` and a lone `\r` as line terminators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMap {
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        for index in memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[index] == b'\r' && bytes.get(index + 1) == Some(&b'\n') {
                // the `\n` of this pair starts the next line
                continue;
            }
            line_starts.push(index + 1);
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Offset of the first character of the line containing `offset`.
    pub fn line_start_of(&self, offset: usize) -> usize {
        self.line_starts[self.line_of(offset)]
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Line/character for an offset, where character counts bytes from the line start.
    pub fn position_of(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        Position::new(line as u32, (offset - self.line_starts[line]) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_starts_for_mixed_terminators() {
        let map = LineMap::build("a\nbc\r\nd\re");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_start(1), Some(2));
        assert_eq!(map.line_start(2), Some(6));
        assert_eq!(map.line_start(3), Some(8));
    }

    #[test]
    fn offsets_map_to_lines() {
        let map = LineMap::build("ab\ncd\n");
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(2), 0);
        assert_eq!(map.line_of(3), 1);
        assert_eq!(map.line_start_of(4), 3);
        assert_eq!(map.position_of(4), Position::new(1, 1));
        assert_eq!(map.line_of(6), 2);
    }
}
