//! Formatting and lowering options.
//!
//! The emitter never guesses at layout: every synthesized line break and every
//! indentation run it produces comes from these records.

use crate::common::NewLineKind;
use serde::{Deserialize, Serialize};

/// Layout options used by the lowering pass for synthesized trivia.
///
/// Serialized with camelCase field names so a config file reads
/// `{ "indentSize": 2, "useTabs": false, "newLineCharacter": "\n" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattingOptions {
    /// Number of columns per indentation level.
    pub indent_size: usize,
    /// Whether indentation runs are made of tab characters.
    pub use_tabs: bool,
    /// The exact character sequence used for synthesized line breaks.
    pub new_line_character: String,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        FormattingOptions {
            indent_size: 4,
            use_tabs: false,
            new_line_character: NewLineKind::LineFeed.as_str().to_string(),
        }
    }
}

impl FormattingOptions {
    pub fn new(indent_size: usize, use_tabs: bool, new_line: NewLineKind) -> Self {
        FormattingOptions {
            indent_size,
            use_tabs,
            new_line_character: new_line.as_str().to_string(),
        }
    }

    /// Columns a tab character advances to (next multiple of this value).
    #[inline]
    pub fn tab_size(&self) -> usize {
        self.indent_size.max(1)
    }

    /// Text for `column` columns of indentation, honoring `use_tabs`.
    pub fn indentation_string(&self, column: usize) -> String {
        if self.use_tabs && self.indent_size > 0 {
            let tabs = column / self.indent_size;
            let spaces = column % self.indent_size;
            let mut text = String::with_capacity(tabs + spaces);
            text.extend(std::iter::repeat_n('\t', tabs));
            text.extend(std::iter::repeat_n(' ', spaces));
            text
        } else {
            " ".repeat(column)
        }
    }

    /// Column width of a run of whitespace that starts at `start_column`.
    pub fn column_width(&self, start_column: usize, text: &str) -> usize {
        let tab_size = self.tab_size();
        text.chars().fold(start_column, |column, ch| {
            if ch == '\t' {
                column + tab_size - column % tab_size
            } else {
                column + 1
            }
        })
    }

    pub fn new_line(&self) -> &str {
        &self.new_line_character
    }
}

/// Options for a full `lower` invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringOptions {
    #[serde(flatten)]
    pub formatting: FormattingOptions,
    /// Prepend the `__extends` runtime helper to files that lowered a derived class.
    pub emit_helpers: bool,
}

impl LoweringOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<FormattingOptions> for LoweringOptions {
    fn from(formatting: FormattingOptions) -> Self {
        LoweringOptions {
            formatting,
            emit_helpers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_with_spaces() {
        let options = FormattingOptions::default();
        assert_eq!(options.indentation_string(0), "");
        assert_eq!(options.indentation_string(6), "      ");
    }

    #[test]
    fn indentation_with_tabs_keeps_remainder_as_spaces() {
        let options = FormattingOptions::new(4, true, NewLineKind::LineFeed);
        assert_eq!(options.indentation_string(9), "\t\t ");
    }

    #[test]
    fn tab_advances_to_next_stop() {
        let options = FormattingOptions::new(4, false, NewLineKind::LineFeed);
        assert_eq!(options.column_width(0, "\t"), 4);
        assert_eq!(options.column_width(0, "  \t"), 4);
        assert_eq!(options.column_width(0, "  \t "), 5);
    }

    #[test]
    fn options_deserialize_from_camel_case_json() {
        let options = LoweringOptions::from_json(
            r#"{ "indentSize": 2, "useTabs": true, "newLineCharacter": "\r\n", "emitHelpers": true }"#,
        )
        .expect("valid options");
        assert_eq!(options.formatting.indent_size, 2);
        assert!(options.formatting.use_tabs);
        assert_eq!(options.formatting.new_line(), "\r\n");
        assert!(options.emit_helpers);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options = LoweringOptions::from_json("{}").expect("valid options");
        assert_eq!(options, LoweringOptions::default());
    }
}
