//! Indentation engine.
//!
//! Lowering moves code between nesting levels: a class member becomes a
//! statement inside an IIFE, a namespace body moves one level in per
//! qualified-name segment. Everything here works on trivia only; token text
//! is never touched.
//!
//! ```typescript
//! module A.B {
//!     var x = 1;
//! }
//! ```
//!
//! The body of `A.B` ends up two wrappers deep, so `var x` is shifted right
//! by one indentation level:
//!
//! ```javascript
//! var A;
//! (function (A) {
//!     var B;
//!     (function (B) {
//!         var x = 1;
//!     })(B = A.B || (A.B = {}));
//!     A.B = B;
//! })(A || (A = {}));
//! ```

use tsdl_common::FormattingOptions;
use tsdl_syntax::{
    RewriteError, SyntaxNode, SyntaxRewriter, SyntaxToken, SyntaxTrivia, TriviaList, walk_node,
};

/// Shift every line of `node` by `delta` columns.
///
/// Only whitespace at the start of a line is adjusted. The line holding the
/// first token is adjusted only when `change_first_token` is set, because
/// callers usually place that token themselves. A dedent never takes a line
/// below one indentation level (`options.indent_size`); see
/// [`change_indentation_to_minimum`] for another floor.
pub fn change_indentation(
    node: &SyntaxNode,
    change_first_token: bool,
    delta: isize,
    options: &FormattingOptions,
) -> Result<SyntaxNode, RewriteError> {
    change_indentation_to_minimum(node, change_first_token, delta, options.indent_size, options)
}

/// [`change_indentation`] with the dedent floor given as `minimum_column`.
///
/// A dedent stops at `minimum_column`, and lines already at or below it
/// stay where they are. Indenting ignores the floor.
pub fn change_indentation_to_minimum(
    node: &SyntaxNode,
    change_first_token: bool,
    delta: isize,
    minimum_column: usize,
    options: &FormattingOptions,
) -> Result<SyntaxNode, RewriteError> {
    if delta == 0 {
        return Ok(node.clone());
    }
    let mut reindenter = Reindenter {
        options,
        delta,
        minimum_column,
        at_line_start: change_first_token,
    };
    walk_node(&mut reindenter, node)
}

/// Shift the line starts of leading trivia that begins on a fresh line.
pub fn shift_leading_trivia(
    trivia: &TriviaList,
    delta: isize,
    options: &FormattingOptions,
) -> TriviaList {
    if delta == 0 {
        return trivia.clone();
    }
    let mut reindenter = Reindenter {
        options,
        delta,
        minimum_column: options.indent_size,
        at_line_start: true,
    };
    reindenter
        .adjust(trivia, true)
        .unwrap_or_else(|| trivia.clone())
}

struct Reindenter<'a> {
    options: &'a FormattingOptions,
    delta: isize,
    minimum_column: usize,
    at_line_start: bool,
}

impl Reindenter<'_> {
    fn adjusted_column(&self, column: usize) -> usize {
        if self.delta >= 0 {
            return column + self.delta.unsigned_abs();
        }
        let floor = self.minimum_column;
        if column <= floor {
            column
        } else {
            column.saturating_sub(self.delta.unsigned_abs()).max(floor)
        }
    }

    fn indentation(&self, column: usize) -> Option<SyntaxTrivia> {
        (column > 0).then(|| SyntaxTrivia::whitespace(self.options.indentation_string(column)))
    }

    /// Adjusted copy of `trivia`, or `None` if nothing moved.
    ///
    /// `before_text` is set for leading trivia, where a line start left open
    /// at the end belongs to the token text that follows.
    fn adjust(&mut self, trivia: &TriviaList, before_text: bool) -> Option<TriviaList> {
        let mut items = Vec::with_capacity(trivia.count() + 1);
        let mut changed = false;
        for item in trivia {
            if item.is_new_line() {
                self.at_line_start = true;
                items.push(item.clone());
                continue;
            }
            if self.at_line_start {
                self.at_line_start = false;
                if item.is_whitespace() {
                    let column = self.options.column_width(0, item.text());
                    let adjusted = self.adjusted_column(column);
                    if adjusted == column {
                        items.push(item.clone());
                    } else {
                        changed = true;
                        items.extend(self.indentation(adjusted));
                    }
                    continue;
                }
                if let Some(indent) = self.indentation(self.adjusted_column(0)) {
                    changed = true;
                    items.push(indent);
                }
            }
            items.push(item.clone());
        }
        if before_text && self.at_line_start {
            self.at_line_start = false;
            if let Some(indent) = self.indentation(self.adjusted_column(0)) {
                changed = true;
                items.push(indent);
            }
        }
        changed.then(|| TriviaList::new(items))
    }
}

impl SyntaxRewriter for Reindenter<'_> {
    type Error = RewriteError;

    fn visit_token(&mut self, token: &SyntaxToken) -> Result<SyntaxToken, RewriteError> {
        if token.full_width() == 0 {
            return Ok(token.clone());
        }
        let leading = self.adjust(token.leading_trivia(), true);
        if token.width() > 0 {
            self.at_line_start = false;
        }
        let trailing = self.adjust(token.trailing_trivia(), false);
        if leading.is_none() && trailing.is_none() {
            return Ok(token.clone());
        }
        let mut token = token.clone();
        if let Some(leading) = leading {
            token = token.with_leading_trivia(leading);
        }
        if let Some(trailing) = trailing {
            token = token.with_trailing_trivia(trailing);
        }
        Ok(token)
    }
}

// =============================================================================
// Trivia builders
// =============================================================================

/// Whitespace for `column` columns; empty at column zero.
pub fn indentation_trivia(column: usize, options: &FormattingOptions) -> TriviaList {
    TriviaList::space(&options.indentation_string(column))
}

pub fn new_line_trivia(options: &FormattingOptions) -> TriviaList {
    TriviaList::single(SyntaxTrivia::new_line(options.new_line()))
}

/// Leading trivia moved to a line that starts at `column`.
///
/// Comment lines keep their order and are re-indented to `column`; the
/// token itself is indented to `column`.
pub fn relocated_leading_trivia(
    trivia: &TriviaList,
    column: usize,
    options: &FormattingOptions,
) -> TriviaList {
    let indent = options.indentation_string(column);
    let mut items = Vec::with_capacity(trivia.count() + 1);
    let mut at_line_start = true;
    for item in trivia {
        if item.is_new_line() {
            at_line_start = true;
            items.push(item.clone());
            continue;
        }
        if at_line_start {
            at_line_start = false;
            if !indent.is_empty() {
                items.push(SyntaxTrivia::whitespace(indent.as_str()));
            }
            if item.is_whitespace() {
                continue;
            }
        }
        items.push(item.clone());
    }
    if at_line_start && !indent.is_empty() {
        items.push(SyntaxTrivia::whitespace(indent.as_str()));
    }
    TriviaList::new(items)
}

/// `trivia` ending the line: kept as is if it already breaks the line,
/// otherwise with trailing whitespace dropped and a newline appended.
pub fn ensure_trailing_new_line(trivia: &TriviaList, options: &FormattingOptions) -> TriviaList {
    if trivia.has_new_line() {
        return trivia.clone();
    }
    let mut items = trivia.as_slice().to_vec();
    while items.last().is_some_and(SyntaxTrivia::is_whitespace) {
        items.pop();
    }
    items.push(SyntaxTrivia::new_line(options.new_line()));
    TriviaList::new(items)
}

/// One line per comment of `trivia` at `column`, then the indentation for
/// the token that follows.
pub fn comment_lines(trivia: &TriviaList, column: usize, options: &FormattingOptions) -> TriviaList {
    let indent = options.indentation_string(column);
    let mut items = Vec::new();
    for comment in trivia.iter().filter(|item| item.is_comment()) {
        if !indent.is_empty() {
            items.push(SyntaxTrivia::whitespace(indent.as_str()));
        }
        items.push(comment.clone());
        items.push(SyntaxTrivia::new_line(options.new_line()));
    }
    if !indent.is_empty() {
        items.push(SyntaxTrivia::whitespace(indent.as_str()));
    }
    TriviaList::new(items)
}

/// The comments of a trailing trivia list, each preceded by a space, ending
/// with a newline.
pub fn trailing_comment_line(trivia: &TriviaList, options: &FormattingOptions) -> TriviaList {
    let mut items = Vec::new();
    for comment in trivia.iter().filter(|item| item.is_comment()) {
        items.push(SyntaxTrivia::whitespace(" "));
        items.push(comment.clone());
    }
    items.push(SyntaxTrivia::new_line(options.new_line()));
    TriviaList::new(items)
}

/// Split leading trivia after its last newline: the head holds complete
/// lines (comments, blank lines), the tail the indentation of the token.
pub fn split_leading_trivia(trivia: &TriviaList) -> (TriviaList, TriviaList) {
    match trivia.iter().rposition(SyntaxTrivia::is_new_line) {
        Some(index) => {
            let items = trivia.as_slice();
            (
                TriviaList::new(items[..=index].to_vec()),
                TriviaList::new(items[index + 1..].to_vec()),
            )
        }
        None => (TriviaList::EMPTY, trivia.clone()),
    }
}

#[cfg(test)]
#[path = "../tests/indentation.rs"]
mod tests;
