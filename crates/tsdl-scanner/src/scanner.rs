//! On-demand scanner.
//!
//! `Scanner::scan` reads leading trivia, one token and its trailing trivia,
//! and returns a realized [`SyntaxToken`]. A `/` is scanned as a punctuator;
//! the parser calls [`Scanner::rescan_slash`] when it expects an expression
//! and the token must be a regular expression literal instead.

use crate::char_codes::{is_digit, is_hex_digit, is_identifier_part, is_identifier_start};
use smallvec::SmallVec;
use tracing::trace;
use tsdl_common::common::{is_line_break, is_white_space_single_line};
use tsdl_syntax::value::{decode_identifier, decode_numeric, decode_string};
use tsdl_syntax::{SyntaxKind, SyntaxToken, SyntaxTrivia, TokenValue, TriviaKind, TriviaList};

/// A lexical error: unterminated literal/comment or an unexpected character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub offset: usize,
    pub message: String,
}

pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    diagnostic: Option<ScanDiagnostic>,
}

type TriviaBuffer = SmallVec<[SyntaxTrivia; 4]>;

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner {
            text,
            pos: 0,
            diagnostic: None,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Offset of the next token's leading trivia.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    /// The first lexical error seen since the last call, if any.
    pub fn take_diagnostic(&mut self) -> Option<ScanDiagnostic> {
        self.diagnostic.take()
    }

    fn report(&mut self, offset: usize, message: impl Into<String>) {
        if self.diagnostic.is_none() {
            self.diagnostic = Some(ScanDiagnostic {
                offset,
                message: message.into(),
            });
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(ahead)
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Scan the next token with its leading and trailing trivia.
    pub fn scan(&mut self) -> SyntaxToken {
        let leading = self.scan_trivia(false);
        let start = self.pos;
        let (kind, value) = self.scan_token_text();
        let text = &self.text[start..self.pos];
        let trailing = if kind == SyntaxKind::EndOfFileToken {
            TriviaList::EMPTY
        } else {
            self.scan_trivia(true)
        };
        trace!(?kind, start, text, "scanned token");
        SyntaxToken::new(kind, leading, text, value, trailing)
    }

    /// Rescan a `/` or `/=` token starting at `full_start` as a regular
    /// expression literal.
    pub fn rescan_slash(&mut self, full_start: usize) -> SyntaxToken {
        self.pos = full_start;
        let leading = self.scan_trivia(false);
        let start = self.pos;
        self.scan_regex_body(start);
        let text = &self.text[start..self.pos];
        let trailing = self.scan_trivia(true);
        SyntaxToken::new(
            SyntaxKind::RegularExpressionLiteral,
            leading,
            text,
            TokenValue::Regex(text.into()),
            trailing,
        )
    }

    fn scan_token_text(&mut self) -> (SyntaxKind, TokenValue) {
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return (SyntaxKind::EndOfFileToken, TokenValue::None);
        };

        if is_identifier_start(ch) || ch == '\\' {
            return self.scan_identifier_or_keyword();
        }
        if is_digit(ch) || (ch == '.' && self.peek_at(1).is_some_and(is_digit)) {
            self.scan_number();
            let value = decode_numeric(&self.text[start..self.pos]);
            return (SyntaxKind::NumericLiteral, TokenValue::Number(value));
        }
        if ch == '"' || ch == '\'' {
            self.scan_string(ch);
            let value = decode_string(&self.text[start..self.pos]);
            return (SyntaxKind::StringLiteral, TokenValue::String(value.into()));
        }
        match self.scan_punctuation() {
            Some(kind) => (kind, TokenValue::None),
            None => {
                self.bump();
                self.report(start, format!("unexpected character {ch:?}"));
                (SyntaxKind::ErrorToken, TokenValue::None)
            }
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> (SyntaxKind, TokenValue) {
        let start = self.pos;
        loop {
            match self.peek() {
                Some('\\') => {
                    if self.peek_at(1) != Some('u') {
                        break;
                    }
                    self.pos += 2;
                    self.eat_while(is_hex_digit);
                }
                Some(ch) if is_identifier_part(ch) => self.pos += ch.len_utf8(),
                _ => break,
            }
        }
        let text = &self.text[start..self.pos];
        if text.is_empty() {
            self.bump();
            self.report(start, "invalid escape in identifier");
            return (SyntaxKind::ErrorToken, TokenValue::None);
        }
        match SyntaxKind::keyword_from_text(text) {
            Some(SyntaxKind::TrueKeyword) => (SyntaxKind::TrueKeyword, TokenValue::Boolean(true)),
            Some(SyntaxKind::FalseKeyword) => {
                (SyntaxKind::FalseKeyword, TokenValue::Boolean(false))
            }
            Some(keyword) => (keyword, TokenValue::None),
            None => (
                SyntaxKind::IdentifierName,
                TokenValue::Identifier(decode_identifier(text).into()),
            ),
        }
    }

    fn scan_number(&mut self) {
        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            self.eat_while(is_hex_digit);
            return;
        }
        self.eat_while(is_digit);
        if self.peek() == Some('.') {
            self.pos += 1;
            self.eat_while(is_digit);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let checkpoint = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.peek().is_some_and(is_digit) {
                self.eat_while(is_digit);
            } else {
                self.pos = checkpoint;
            }
        }
    }

    fn scan_string(&mut self, quote: char) {
        let start = self.pos;
        self.pos += quote.len_utf8();
        loop {
            match self.peek() {
                None => {
                    self.report(start, "unterminated string literal");
                    return;
                }
                Some(ch) if ch == quote => {
                    self.pos += ch.len_utf8();
                    return;
                }
                Some('\\') => {
                    self.pos += 1;
                    // Escaped character, including a line continuation.
                    if self.peek() == Some('\r') && self.peek_at(1) == Some('\n') {
                        self.pos += 2;
                    } else {
                        self.bump();
                    }
                }
                Some(ch) if is_line_break(ch) => {
                    self.report(start, "unterminated string literal");
                    return;
                }
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
    }

    fn scan_regex_body(&mut self, start: usize) {
        // Opening slash
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek() {
                None => {
                    self.report(start, "unterminated regular expression literal");
                    return;
                }
                Some(ch) if is_line_break(ch) => {
                    self.report(start, "unterminated regular expression literal");
                    return;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.bump();
                }
                Some('[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some('/') if !in_class => {
                    self.pos += 1;
                    break;
                }
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
        // Flags
        self.eat_while(is_identifier_part);
    }

    fn scan_punctuation(&mut self) -> Option<SyntaxKind> {
        const PUNCTUATION: &[(&str, SyntaxKind)] = &[
            (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            ("...", SyntaxKind::DotDotDotToken),
            ("===", SyntaxKind::EqualsEqualsEqualsToken),
            ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
            (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
            (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
            ("<=", SyntaxKind::LessThanEqualsToken),
            (">=", SyntaxKind::GreaterThanEqualsToken),
            ("==", SyntaxKind::EqualsEqualsToken),
            ("=>", SyntaxKind::EqualsGreaterThanToken),
            ("!=", SyntaxKind::ExclamationEqualsToken),
            ("++", SyntaxKind::PlusPlusToken),
            ("--", SyntaxKind::MinusMinusToken),
            ("<<", SyntaxKind::LessThanLessThanToken),
            (">>", SyntaxKind::GreaterThanGreaterThanToken),
            ("&&", SyntaxKind::AmpersandAmpersandToken),
            ("||", SyntaxKind::BarBarToken),
            ("+=", SyntaxKind::PlusEqualsToken),
            ("-=", SyntaxKind::MinusEqualsToken),
            ("*=", SyntaxKind::AsteriskEqualsToken),
            ("%=", SyntaxKind::PercentEqualsToken),
            ("&=", SyntaxKind::AmpersandEqualsToken),
            ("|=", SyntaxKind::BarEqualsToken),
            ("^=", SyntaxKind::CaretEqualsToken),
            ("/=", SyntaxKind::SlashEqualsToken),
            ("{", SyntaxKind::OpenBraceToken),
            ("}", SyntaxKind::CloseBraceToken),
            ("(", SyntaxKind::OpenParenToken),
            (")", SyntaxKind::CloseParenToken),
            ("[", SyntaxKind::OpenBracketToken),
            ("]", SyntaxKind::CloseBracketToken),
            (".", SyntaxKind::DotToken),
            (";", SyntaxKind::SemicolonToken),
            (",", SyntaxKind::CommaToken),
            ("<", SyntaxKind::LessThanToken),
            (">", SyntaxKind::GreaterThanToken),
            ("+", SyntaxKind::PlusToken),
            ("-", SyntaxKind::MinusToken),
            ("*", SyntaxKind::AsteriskToken),
            ("%", SyntaxKind::PercentToken),
            ("&", SyntaxKind::AmpersandToken),
            ("|", SyntaxKind::BarToken),
            ("^", SyntaxKind::CaretToken),
            ("!", SyntaxKind::ExclamationToken),
            ("~", SyntaxKind::TildeToken),
            ("?", SyntaxKind::QuestionToken),
            (":", SyntaxKind::ColonToken),
            ("=", SyntaxKind::EqualsToken),
            ("/", SyntaxKind::SlashToken),
        ];
        let rest = &self.text[self.pos..];
        let (text, kind) = PUNCTUATION
            .iter()
            .find(|(text, _)| rest.starts_with(text))?;
        self.pos += text.len();
        Some(*kind)
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    /// Scan trivia. Trailing trivia stops after the first line break.
    fn scan_trivia(&mut self, trailing: bool) -> TriviaList {
        let mut items = TriviaBuffer::new();
        while let Some(ch) = self.peek() {
            let start = self.pos;
            let kind = if is_white_space_single_line(ch) {
                self.eat_while(is_white_space_single_line);
                TriviaKind::Whitespace
            } else if is_line_break(ch) {
                self.pos += ch.len_utf8();
                if ch == '\r' && self.peek() == Some('\n') {
                    self.pos += 1;
                }
                TriviaKind::NewLine
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                self.eat_while(|c| !is_line_break(c));
                TriviaKind::SingleLineComment
            } else if ch == '/' && self.peek_at(1) == Some('*') {
                self.scan_multi_line_comment(start);
                TriviaKind::MultiLineComment
            } else {
                break;
            };
            items.push(SyntaxTrivia::new(kind, &self.text[start..self.pos]));
            if trailing && kind == TriviaKind::NewLine {
                break;
            }
        }
        TriviaList::new(items.into_vec())
    }

    fn scan_multi_line_comment(&mut self, start: usize) {
        self.pos += 2;
        match self.text[self.pos..].find("*/") {
            Some(end) => self.pos += end + 2,
            None => {
                self.pos = self.text.len();
                self.report(start, "unterminated multi-line comment");
            }
        }
    }
}

/// Scan all of `text` into tokens, ending with the end-of-file token.
pub fn scan_all(text: &str) -> Vec<SyntaxToken> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let done = token.kind() == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
