//! Common enums shared between the front end, the emitter and the CLI.

use serde::{Deserialize, Serialize};

/// Line terminator used for line breaks synthesized by the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewLineKind {
    /// `\r\n`
    #[serde(rename = "crlf")]
    CarriageReturnLineFeed,
    /// `\n`
    #[default]
    #[serde(rename = "lf")]
    LineFeed,
}

impl NewLineKind {
    /// The exact character sequence for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CarriageReturnLineFeed => "\r\n",
            Self::LineFeed => "\n",
        }
    }

    /// Recognize a line-terminator sequence.
    pub fn from_sequence(text: &str) -> Option<Self> {
        match text {
            "\r\n" => Some(Self::CarriageReturnLineFeed),
            "\n" => Some(Self::LineFeed),
            _ => None,
        }
    }
}

/// Returns true for characters that terminate a line in source text.
#[inline]
pub const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Returns true for characters the scanner treats as whitespace trivia.
#[inline]
pub const fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_sequences_round_trip() {
        for kind in [NewLineKind::CarriageReturnLineFeed, NewLineKind::LineFeed] {
            assert_eq!(NewLineKind::from_sequence(kind.as_str()), Some(kind));
        }
        assert_eq!(NewLineKind::from_sequence("\r"), None);
    }

    #[test]
    fn whitespace_classification() {
        assert!(is_white_space_single_line(' '));
        assert!(is_white_space_single_line('\t'));
        assert!(!is_white_space_single_line('\n'));
        assert!(is_line_break('\u{2028}'));
    }
}
