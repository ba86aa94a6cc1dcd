//! Tokens: immutable leaves of the syntax tree.
//!
//! A token is either *empty* (zero width, no trivia; stands for syntactically
//! absent optional syntax) or *realized* (owns text, value and trivia). Tokens
//! are shared by `Arc`; every `with_*` operation returns a new token.
//!
//! Object identity matters: the invariant checker treats two positions that
//! hold the same `Arc` as one token appearing twice. [`SyntaxToken::copy_instance`]
//! produces a content-equal token with a fresh identity.

use crate::kind::SyntaxKind;
use crate::trivia::TriviaList;
use crate::value::{self, TokenValue};
use std::fmt;
use std::sync::Arc;

static EMPTY_TRIVIA: TriviaList = TriviaList::Empty;

#[derive(Clone, PartialEq)]
struct RealizedToken {
    kind: SyntaxKind,
    leading: TriviaList,
    text: Arc<str>,
    value: TokenValue,
    trailing: TriviaList,
}

#[derive(Clone, PartialEq)]
enum TokenData {
    Empty { kind: SyntaxKind },
    Realized(RealizedToken),
}

#[derive(Clone)]
pub struct SyntaxToken(Arc<TokenData>);

impl SyntaxToken {
    /// Zero-width token standing in for absent syntax of `kind`.
    pub fn empty(kind: SyntaxKind) -> Self {
        SyntaxToken(Arc::new(TokenData::Empty { kind }))
    }

    pub fn new(
        kind: SyntaxKind,
        leading: TriviaList,
        text: impl Into<Arc<str>>,
        value: TokenValue,
        trailing: TriviaList,
    ) -> Self {
        SyntaxToken(Arc::new(TokenData::Realized(RealizedToken {
            kind,
            leading,
            text: text.into(),
            value,
            trailing,
        })))
    }

    /// Realized token for a keyword or punctuator, using its fixed text.
    ///
    /// Kinds without fixed text produce a realized token with empty text.
    pub fn from_kind(kind: SyntaxKind) -> Self {
        let text = kind.text().unwrap_or("");
        let value = match kind {
            SyntaxKind::TrueKeyword => TokenValue::Boolean(true),
            SyntaxKind::FalseKeyword => TokenValue::Boolean(false),
            _ => TokenValue::None,
        };
        Self::new(kind, TriviaList::Empty, text, value, TriviaList::Empty)
    }

    pub fn identifier(name: &str) -> Self {
        let decoded = value::decode_identifier(name);
        Self::new(
            SyntaxKind::IdentifierName,
            TriviaList::Empty,
            name,
            TokenValue::Identifier(decoded.into()),
            TriviaList::Empty,
        )
    }

    /// String literal token; `text` includes the quotes.
    pub fn string_literal(text: &str) -> Self {
        let decoded = value::decode_string(text);
        Self::new(
            SyntaxKind::StringLiteral,
            TriviaList::Empty,
            text,
            TokenValue::String(decoded.into()),
            TriviaList::Empty,
        )
    }

    pub fn numeric_literal(text: &str) -> Self {
        Self::new(
            SyntaxKind::NumericLiteral,
            TriviaList::Empty,
            text,
            TokenValue::Number(value::decode_numeric(text)),
            TriviaList::Empty,
        )
    }

    pub fn kind(&self) -> SyntaxKind {
        match &*self.0 {
            TokenData::Empty { kind } => *kind,
            TokenData::Realized(token) => token.kind,
        }
    }

    pub fn text(&self) -> &str {
        match &*self.0 {
            TokenData::Empty { .. } => "",
            TokenData::Realized(token) => &token.text,
        }
    }

    pub fn value(&self) -> &TokenValue {
        static NO_VALUE: TokenValue = TokenValue::None;
        match &*self.0 {
            TokenData::Empty { .. } => &NO_VALUE,
            TokenData::Realized(token) => &token.value,
        }
    }

    pub fn value_text(&self) -> String {
        match self.value() {
            TokenValue::None => self.text().to_string(),
            value => value.value_text(),
        }
    }

    pub fn leading_trivia(&self) -> &TriviaList {
        match &*self.0 {
            TokenData::Empty { .. } => &EMPTY_TRIVIA,
            TokenData::Realized(token) => &token.leading,
        }
    }

    pub fn trailing_trivia(&self) -> &TriviaList {
        match &*self.0 {
            TokenData::Empty { .. } => &EMPTY_TRIVIA,
            TokenData::Realized(token) => &token.trailing,
        }
    }

    /// True for the zero-width empty variant.
    pub fn is_missing(&self) -> bool {
        matches!(&*self.0, TokenData::Empty { .. })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.text().len()
    }

    pub fn full_width(&self) -> usize {
        self.leading_trivia().full_width() + self.width() + self.trailing_trivia().full_width()
    }

    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.full_width());
        self.write_to(&mut text);
        text
    }

    pub fn write_to(&self, out: &mut String) {
        self.leading_trivia().write_to(out);
        out.push_str(self.text());
        self.trailing_trivia().write_to(out);
    }

    pub fn has_leading_comment(&self) -> bool {
        self.leading_trivia().has_comment()
    }

    pub fn has_trailing_comment(&self) -> bool {
        self.trailing_trivia().has_comment()
    }

    fn realized(&self) -> RealizedToken {
        match &*self.0 {
            TokenData::Empty { kind } => RealizedToken {
                kind: *kind,
                leading: TriviaList::Empty,
                text: Arc::from(""),
                value: TokenValue::None,
                trailing: TriviaList::Empty,
            },
            TokenData::Realized(token) => token.clone(),
        }
    }

    pub fn with_leading_trivia(&self, leading: TriviaList) -> Self {
        let mut token = self.realized();
        token.leading = leading;
        SyntaxToken(Arc::new(TokenData::Realized(token)))
    }

    pub fn with_trailing_trivia(&self, trailing: TriviaList) -> Self {
        let mut token = self.realized();
        token.trailing = trailing;
        SyntaxToken(Arc::new(TokenData::Realized(token)))
    }

    /// Same kind, text, value and trivia; distinct identity.
    pub fn copy_instance(&self) -> Self {
        SyntaxToken(Arc::new((*self.0).clone()))
    }

    /// A keyword re-kinded as an identifier name (for property names).
    pub fn to_identifier_name(&self) -> Self {
        if self.kind() == SyntaxKind::IdentifierName || !self.kind().is_keyword() {
            return self.clone();
        }
        let mut token = self.realized();
        token.kind = SyntaxKind::IdentifierName;
        token.value = TokenValue::Identifier(token.text.clone());
        SyntaxToken(Arc::new(TokenData::Realized(token)))
    }

    /// Same object, not merely equal content.
    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address identifying this token object.
    #[inline]
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Kind, text and trivia are equal (identity ignored).
    pub fn content_eq(&self, other: &SyntaxToken) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return write!(f, "{:?}(empty)", self.kind());
        }
        write!(f, "{:?}({:?})", self.kind(), self.full_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::SyntaxTrivia;

    #[test]
    fn full_text_is_leading_text_trailing() {
        let token = SyntaxToken::identifier("foo")
            .with_leading_trivia(TriviaList::space("  "))
            .with_trailing_trivia(TriviaList::single(SyntaxTrivia::new_line("\n")));
        assert_eq!(token.full_text(), "  foo\n");
        assert_eq!(token.full_width(), 6);
        assert_eq!(token.width(), 3);
    }

    #[test]
    fn empty_token_is_weightless() {
        let token = SyntaxToken::empty(SyntaxKind::SemicolonToken);
        assert!(token.is_missing());
        assert_eq!(token.full_width(), 0);
        assert_eq!(token.text(), "");
        let realized = token.with_leading_trivia(TriviaList::space(" "));
        assert!(!realized.is_missing());
        assert_eq!(realized.full_text(), " ");
    }

    #[test]
    fn with_trivia_never_mutates() {
        let token = SyntaxToken::from_kind(SyntaxKind::ReturnKeyword);
        let spaced = token.with_trailing_trivia(TriviaList::space(" "));
        assert_eq!(token.full_text(), "return");
        assert_eq!(spaced.full_text(), "return ");
    }

    #[test]
    fn copy_instance_has_fresh_identity() {
        let token = SyntaxToken::identifier("C");
        let copy = token.copy_instance();
        assert!(!token.ptr_eq(&copy));
        assert!(token.content_eq(&copy));
        assert!(token.ptr_eq(&token.clone()));
    }

    #[test]
    fn keyword_as_identifier_name() {
        let token = SyntaxToken::from_kind(SyntaxKind::DefaultKeyword);
        let name = token.to_identifier_name();
        assert_eq!(name.kind(), SyntaxKind::IdentifierName);
        assert_eq!(name.value_text(), "default");
    }

    #[test]
    fn literal_values() {
        assert_eq!(SyntaxToken::numeric_literal("0x10").value_text(), "16");
        assert_eq!(SyntaxToken::string_literal("\"a\\tb\"").value_text(), "a\tb");
        assert_eq!(
            SyntaxToken::from_kind(SyntaxKind::TrueKeyword).value(),
            &TokenValue::Boolean(true)
        );
    }
}
