//! Trivia and trivia lists.
//!
//! A trivia list has three shapes (empty, single item, many items). The shape
//! is picked at construction and never leaks: callers see the same behavior
//! through every accessor, and [`TriviaList::concat`] always returns one of the
//! three canonical shapes.

use crate::error::SyntaxError;
use crate::kind::TriviaKind;
use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

/// A single unit of whitespace, newline, comment or skipped text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTrivia {
    kind: TriviaKind,
    text: Arc<str>,
}

impl SyntaxTrivia {
    pub fn new(kind: TriviaKind, text: impl Into<Arc<str>>) -> Self {
        SyntaxTrivia {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<Arc<str>>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn new_line(text: impl Into<Arc<str>>) -> Self {
        Self::new(TriviaKind::NewLine, text)
    }

    #[inline]
    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn full_width(&self) -> usize {
        self.text.len()
    }

    /// Synthesized placeholder trivia with no text.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    #[inline]
    pub fn is_new_line(&self) -> bool {
        self.kind == TriviaKind::NewLine
    }

    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TriviaKind::Whitespace
    }

    fn flags(&self) -> TriviaFlags {
        match self.kind {
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment => TriviaFlags::COMMENT,
            TriviaKind::NewLine => TriviaFlags::NEW_LINE,
            TriviaKind::SkippedText => TriviaFlags::SKIPPED_TEXT,
            TriviaKind::Whitespace => TriviaFlags::empty(),
        }
    }
}

impl fmt::Debug for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, &*self.text)
    }
}

bitflags! {
    /// Summary of the trivia kinds present in a list.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TriviaFlags: u8 {
        const COMMENT = 1 << 0;
        const NEW_LINE = 1 << 1;
        const SKIPPED_TEXT = 1 << 2;
    }
}

#[derive(PartialEq, Eq, Hash)]
pub struct ManyTrivia {
    items: Box<[SyntaxTrivia]>,
    flags: TriviaFlags,
    full_width: usize,
}

/// An ordered, immutable sequence of trivia.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub enum TriviaList {
    #[default]
    Empty,
    Single(SyntaxTrivia),
    Many(Arc<ManyTrivia>),
}

impl TriviaList {
    pub const EMPTY: TriviaList = TriviaList::Empty;

    /// Build a list from items, picking the canonical shape.
    pub fn new(items: Vec<SyntaxTrivia>) -> Self {
        match items.len() {
            0 => TriviaList::Empty,
            1 => items
                .into_iter()
                .next()
                .map_or(TriviaList::Empty, TriviaList::Single),
            _ => {
                let flags = items
                    .iter()
                    .fold(TriviaFlags::empty(), |acc, item| acc | item.flags());
                let full_width = items.iter().map(SyntaxTrivia::full_width).sum();
                TriviaList::Many(Arc::new(ManyTrivia {
                    items: items.into_boxed_slice(),
                    flags,
                    full_width,
                }))
            }
        }
    }

    pub fn single(trivia: SyntaxTrivia) -> Self {
        TriviaList::Single(trivia)
    }

    /// A single whitespace trivia of `text`, or empty for empty text.
    pub fn space(text: &str) -> Self {
        if text.is_empty() {
            TriviaList::Empty
        } else {
            TriviaList::Single(SyntaxTrivia::whitespace(text))
        }
    }

    pub fn count(&self) -> usize {
        match self {
            TriviaList::Empty => 0,
            TriviaList::Single(_) => 1,
            TriviaList::Many(many) => many.items.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, TriviaList::Empty)
    }

    pub fn get(&self, index: usize) -> Result<&SyntaxTrivia, SyntaxError> {
        self.as_slice()
            .get(index)
            .ok_or(SyntaxError::IndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    pub fn as_slice(&self) -> &[SyntaxTrivia] {
        match self {
            TriviaList::Empty => &[],
            TriviaList::Single(item) => std::slice::from_ref(item),
            TriviaList::Many(many) => &many.items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxTrivia> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&SyntaxTrivia> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&SyntaxTrivia> {
        self.as_slice().last()
    }

    pub fn full_width(&self) -> usize {
        match self {
            TriviaList::Empty => 0,
            TriviaList::Single(item) => item.full_width(),
            TriviaList::Many(many) => many.full_width,
        }
    }

    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.full_width());
        self.write_to(&mut text);
        text
    }

    pub fn write_to(&self, out: &mut String) {
        for item in self.iter() {
            out.push_str(item.text());
        }
    }

    fn flags(&self) -> TriviaFlags {
        match self {
            TriviaList::Empty => TriviaFlags::empty(),
            TriviaList::Single(item) => item.flags(),
            TriviaList::Many(many) => many.flags,
        }
    }

    pub fn has_comment(&self) -> bool {
        self.flags().contains(TriviaFlags::COMMENT)
    }

    pub fn has_new_line(&self) -> bool {
        self.flags().contains(TriviaFlags::NEW_LINE)
    }

    pub fn has_skipped_text(&self) -> bool {
        self.flags().contains(TriviaFlags::SKIPPED_TEXT)
    }

    /// True iff every item is missing (vacuously true for the empty list).
    pub fn is_missing(&self) -> bool {
        self.iter().all(SyntaxTrivia::is_missing)
    }

    /// This list followed by `other`, never nested.
    pub fn concat(&self, other: &TriviaList) -> TriviaList {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut items = Vec::with_capacity(self.count() + other.count());
        items.extend(self.iter().cloned());
        items.extend(other.iter().cloned());
        TriviaList::new(items)
    }

    /// Keep the items matching `keep`, in order.
    pub fn filter(&self, mut keep: impl FnMut(&SyntaxTrivia) -> bool) -> TriviaList {
        let kept: Vec<_> = self.iter().filter(|item| keep(item)).cloned().collect();
        if kept.len() == self.count() {
            return self.clone();
        }
        TriviaList::new(kept)
    }

    /// The list up to, but excluding, the first newline.
    pub fn before_first_new_line(&self) -> TriviaList {
        let end = self
            .iter()
            .position(SyntaxTrivia::is_new_line)
            .unwrap_or(self.count());
        TriviaList::new(self.as_slice()[..end].to_vec())
    }
}

impl fmt::Debug for TriviaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<SyntaxTrivia> for TriviaList {
    fn from_iter<I: IntoIterator<Item = SyntaxTrivia>>(iter: I) -> Self {
        TriviaList::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TriviaList {
    type Item = &'a SyntaxTrivia;
    type IntoIter = std::slice::Iter<'a, SyntaxTrivia>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../tests/trivia_tests.rs"]
mod tests;
