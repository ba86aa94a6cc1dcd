//! Parser state - token cursor, lookahead and semicolon insertion

use super::ParseError;
use tsdl_common::limits::MAX_PARSE_DEPTH;
use tsdl_scanner::Scanner;
use tsdl_syntax::{SyntaxKind, SyntaxToken};

/// Cursor position that speculative parsing can rewind to.
#[derive(Clone)]
pub(crate) struct Snapshot {
    current: SyntaxToken,
    current_full_start: usize,
    scanner_position: usize,
    previous_ends_line: bool,
}

pub struct ParserState<'a> {
    pub(crate) scanner: Scanner<'a>,
    /// Token under the cursor (not yet consumed).
    pub(crate) current: SyntaxToken,
    /// Offset of the current token's leading trivia.
    pub(crate) current_full_start: usize,
    /// The last consumed token's trailing trivia ended in a line break.
    pub(crate) previous_ends_line: bool,
    pub(crate) depth: u32,
}

impl<'a> ParserState<'a> {
    pub fn new(text: &'a str) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(text);
        let current = scanner.scan();
        if let Some(diagnostic) = scanner.take_diagnostic() {
            return Err(ParseError::new(diagnostic.message, diagnostic.offset));
        }
        Ok(ParserState {
            scanner,
            current,
            current_full_start: 0,
            previous_ends_line: false,
            depth: 0,
        })
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.current.kind()
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current.kind() == kind
    }

    /// Current token is the identifier `word` (a contextual keyword).
    pub(crate) fn at_contextual(&self, word: &str) -> bool {
        self.current.kind() == SyntaxKind::IdentifierName && self.current.text() == word
    }

    /// Offset of the current token's text, for error reporting.
    pub(crate) fn token_start(&self) -> usize {
        self.current_full_start + self.current.leading_trivia().full_width()
    }

    /// A line break separates the previous token from the current one.
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.previous_ends_line || self.current.leading_trivia().has_new_line()
    }

    /// Consume the current token and scan the next one.
    pub(crate) fn bump(&mut self) -> Result<SyntaxToken, ParseError> {
        let next_full_start = self.scanner.position();
        let next = self.scanner.scan();
        if let Some(diagnostic) = self.scanner.take_diagnostic() {
            return Err(ParseError::new(diagnostic.message, diagnostic.offset));
        }
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous_ends_line = consumed.trailing_trivia().has_new_line();
        self.current_full_start = next_full_start;
        Ok(consumed)
    }

    pub(crate) fn error<T>(&self, message: impl Into<String>) -> Result<T, ParseError> {
        Err(ParseError::new(message, self.token_start()))
    }

    pub(crate) fn expected<T>(&self, what: &str) -> Result<T, ParseError> {
        let found = if self.at(SyntaxKind::EndOfFileToken) {
            "end of file".to_string()
        } else {
            format!("'{}'", self.current.text())
        };
        self.error(format!("expected {what}, found {found}"))
    }

    /// Consume a token of `kind` or fail.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Result<SyntaxToken, ParseError> {
        if self.at(kind) {
            return self.bump();
        }
        self.expected(&kind.to_string())
    }

    pub(crate) fn eat_optional(&mut self, kind: SyntaxKind) -> Result<Option<SyntaxToken>, ParseError> {
        if self.at(kind) {
            return self.bump().map(Some);
        }
        Ok(None)
    }

    /// Consume an identifier (contextual keywords included).
    pub(crate) fn eat_identifier(&mut self) -> Result<SyntaxToken, ParseError> {
        if self.at(SyntaxKind::IdentifierName) {
            return self.bump();
        }
        self.expected("identifier")
    }

    /// Identifier or keyword after a `.`; keywords are re-kinded.
    pub(crate) fn eat_identifier_name(&mut self) -> Result<SyntaxToken, ParseError> {
        if self.kind().is_identifier_or_keyword() {
            return self.bump().map(|token| token.to_identifier_name());
        }
        self.expected("identifier")
    }

    pub(crate) fn at_property_name(&self) -> bool {
        self.kind().is_identifier_or_keyword()
            || matches!(
                self.kind(),
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
            )
    }

    /// Identifier, keyword (re-kinded as identifier), string or number.
    pub(crate) fn eat_property_name(&mut self) -> Result<SyntaxToken, ParseError> {
        if self.kind().is_keyword() {
            return self.bump().map(|token| token.to_identifier_name());
        }
        if self.at_property_name() {
            return self.bump();
        }
        self.expected("property name")
    }

    /// A `;`, or an empty semicolon token where one may be inserted.
    pub(crate) fn eat_semicolon(&mut self) -> Result<SyntaxToken, ParseError> {
        if self.at(SyntaxKind::SemicolonToken) {
            return self.bump();
        }
        if self.can_insert_semicolon() {
            return Ok(SyntaxToken::empty(SyntaxKind::SemicolonToken));
        }
        self.expected("';'")
    }

    pub(crate) fn can_insert_semicolon(&self) -> bool {
        self.at(SyntaxKind::CloseBraceToken)
            || self.at(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current.clone(),
            current_full_start: self.current_full_start,
            scanner_position: self.scanner.position(),
            previous_ends_line: self.previous_ends_line,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.current = snapshot.current;
        self.current_full_start = snapshot.current_full_start;
        self.scanner.set_position(snapshot.scanner_position);
        self.previous_ends_line = snapshot.previous_ends_line;
        self.scanner.take_diagnostic();
    }

    /// Run `check` and rewind, returning its answer.
    pub(crate) fn look_ahead(&mut self, check: impl FnOnce(&mut Self) -> Result<bool, ParseError>) -> bool {
        let snapshot = self.snapshot();
        let answer = check(self).unwrap_or(false);
        self.restore(snapshot);
        answer
    }

    /// Kind of the token after the current one.
    pub(crate) fn next_kind(&mut self) -> SyntaxKind {
        let snapshot = self.snapshot();
        let kind = match self.bump() {
            Ok(_) => self.kind(),
            Err(_) => SyntaxKind::ErrorToken,
        };
        self.restore(snapshot);
        kind
    }

    /// Re-read the current `/` or `/=` as a regular expression literal.
    pub(crate) fn rescan_slash(&mut self) -> Result<(), ParseError> {
        self.current = self.scanner.rescan_slash(self.current_full_start);
        if let Some(diagnostic) = self.scanner.take_diagnostic() {
            return Err(ParseError::new(diagnostic.message, diagnostic.offset));
        }
        Ok(())
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return self.error("nesting is too deep");
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
