//! Positions of tokens in a tree.
//!
//! Maps every token object of a tree to its absolute full-start offset and
//! answers line/column questions over the tree's rendered text. A tab
//! advances to the next multiple of the indent size.

use crate::token::SyntaxToken;
use crate::node::SyntaxNode;
use rustc_hash::FxHashMap;
use tsdl_common::{FormattingOptions, LineMap};

pub struct SyntaxInformationMap {
    full_starts: FxHashMap<usize, usize>,
    text: String,
    line_map: LineMap,
    tab_size: usize,
}

impl SyntaxInformationMap {
    pub fn build(root: &SyntaxNode, options: &FormattingOptions) -> Self {
        let mut full_starts = FxHashMap::default();
        let mut offset = 0;
        root.for_each_token(&mut |token| {
            full_starts.entry(token.identity()).or_insert(offset);
            offset += token.full_width();
        });
        let text = root.full_text();
        let line_map = LineMap::build(&text);
        SyntaxInformationMap {
            full_starts,
            text,
            line_map,
            tab_size: options.tab_size(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Offset of the token's leading trivia, if the token is in this tree.
    pub fn full_start(&self, token: &SyntaxToken) -> Option<usize> {
        self.full_starts.get(&token.identity()).copied()
    }

    /// Offset of the token's text.
    pub fn start(&self, token: &SyntaxToken) -> Option<usize> {
        self.full_start(token)
            .map(|full_start| full_start + token.leading_trivia().full_width())
    }

    pub fn end(&self, token: &SyntaxToken) -> Option<usize> {
        self.start(token).map(|start| start + token.width())
    }

    pub fn line_of_token(&self, token: &SyntaxToken) -> Option<usize> {
        self.start(token).map(|start| self.line_map.line_of(start))
    }

    /// Zero-based visual column of `offset`.
    pub fn column_of_offset(&self, offset: usize) -> usize {
        let line_start = self.line_map.line_start_of(offset);
        let end = offset.min(self.text.len());
        let prefix = self.text.get(line_start..end).unwrap_or("");
        self.advance(0, prefix)
    }

    pub fn column_for_start_of_token(&self, token: &SyntaxToken) -> Option<usize> {
        self.start(token).map(|start| self.column_of_offset(start))
    }

    pub fn column_for_end_of_token(&self, token: &SyntaxToken) -> Option<usize> {
        self.end(token).map(|end| self.column_of_offset(end))
    }

    /// Visual width of the whitespace that begins `line`.
    pub fn indentation_column_of_line(&self, line: usize) -> usize {
        let Some(start) = self.line_map.line_start(line) else {
            return 0;
        };
        let rest = self.text.get(start..).unwrap_or("");
        let indentation: &str = rest
            .split(|ch: char| !matches!(ch, ' ' | '\t'))
            .next()
            .unwrap_or("");
        self.advance(0, indentation)
    }

    /// Indentation of the line on which `token` starts.
    pub fn indentation_column_of_token(&self, token: &SyntaxToken) -> Option<usize> {
        self.line_of_token(token)
            .map(|line| self.indentation_column_of_line(line))
    }

    fn advance(&self, start_column: usize, text: &str) -> usize {
        text.chars().fold(start_column, |column, ch| {
            if ch == '\t' {
                column + self.tab_size - column % self.tab_size
            } else {
                column + 1
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::kind::SyntaxKind;
    use crate::trivia::{SyntaxTrivia, TriviaList};

    #[test]
    fn columns_follow_leading_trivia_and_tabs() {
        let first = factory::identifier("a");
        let second = factory::identifier("bb").with_leading_trivia(TriviaList::space("\t  "));
        let operator = factory::token(SyntaxKind::PlusToken)
            .with_leading_trivia(TriviaList::space(" "))
            .with_trailing_trivia(TriviaList::single(SyntaxTrivia::new_line("\n")));
        let statement = factory::expression_statement(
            crate::ast::BinaryExpression {
                left: factory::name_expression(first.clone()),
                operator_token: operator,
                right: factory::name_expression(second.clone()),
            }
            .build(),
        );
        assert_eq!(statement.full_text(), "a +\n\t  bb;");

        let map = SyntaxInformationMap::build(&statement, &FormattingOptions::default());
        assert_eq!(map.column_for_start_of_token(&first), Some(0));
        assert_eq!(map.column_for_end_of_token(&first), Some(1));
        assert_eq!(map.line_of_token(&second), Some(1));
        assert_eq!(map.column_for_start_of_token(&second), Some(6));
        assert_eq!(map.column_for_end_of_token(&second), Some(8));
        assert_eq!(map.indentation_column_of_token(&second), Some(6));
        assert_eq!(map.full_start(&factory::identifier("zz")), None);
    }
}
