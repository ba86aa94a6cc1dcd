//! Structural equality of trees.
//!
//! Two trees are structurally equal when they have the same node kinds and
//! child-wise equal slots, with tokens compared by kind and text. Options
//! additionally require equal offsets (every token starts and ends at the
//! same position) and equal comment content.

use crate::node::{SeparatedItem, SyntaxElement, SyntaxNode};
use crate::token::SyntaxToken;
use crate::trivia::{SyntaxTrivia, TriviaList};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EqualityOptions {
    /// Tokens must sit at the same offsets (trivia widths must match).
    pub require_same_offsets: bool,
    /// Comments in leading and trailing trivia must match.
    pub compare_comments: bool,
}

pub fn nodes_structurally_equal(a: &SyntaxNode, b: &SyntaxNode, options: EqualityOptions) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.kind() != b.kind() || a.slots().len() != b.slots().len() {
        return false;
    }
    if options.require_same_offsets && a.full_width() != b.full_width() {
        return false;
    }
    a.slots()
        .iter()
        .zip(b.slots())
        .all(|(x, y)| match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => elements_structurally_equal(x, y, options),
            _ => false,
        })
}

fn elements_structurally_equal(a: &SyntaxElement, b: &SyntaxElement, options: EqualityOptions) -> bool {
    match (a, b) {
        (SyntaxElement::Token(x), SyntaxElement::Token(y)) => {
            tokens_structurally_equal(x, y, options)
        }
        (SyntaxElement::Node(x), SyntaxElement::Node(y)) => {
            nodes_structurally_equal(x, y, options)
        }
        (SyntaxElement::List(x), SyntaxElement::List(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(m, n)| nodes_structurally_equal(m, n, options))
        }
        (SyntaxElement::SeparatedList(x), SyntaxElement::SeparatedList(y)) => {
            x.node_count() == y.node_count()
                && x.separator_count() == y.separator_count()
                && x.items().zip(y.items()).all(|pair| match pair {
                    (SeparatedItem::Node(m), SeparatedItem::Node(n)) => {
                        nodes_structurally_equal(m, n, options)
                    }
                    (SeparatedItem::Separator(m), SeparatedItem::Separator(n)) => {
                        tokens_structurally_equal(m, n, options)
                    }
                    _ => false,
                })
        }
        _ => false,
    }
}

pub fn tokens_structurally_equal(a: &SyntaxToken, b: &SyntaxToken, options: EqualityOptions) -> bool {
    if a.kind() != b.kind() || a.text() != b.text() {
        return false;
    }
    if options.require_same_offsets
        && (a.leading_trivia().full_width() != b.leading_trivia().full_width()
            || a.trailing_trivia().full_width() != b.trailing_trivia().full_width())
    {
        return false;
    }
    if options.compare_comments
        && (!comments_equal(a.leading_trivia(), b.leading_trivia())
            || !comments_equal(a.trailing_trivia(), b.trailing_trivia()))
    {
        return false;
    }
    true
}

fn comments_equal(a: &TriviaList, b: &TriviaList) -> bool {
    let comments = |list: &TriviaList| -> Vec<SyntaxTrivia> {
        list.iter().filter(|t| t.is_comment()).cloned().collect()
    };
    comments(a) == comments(b)
}
