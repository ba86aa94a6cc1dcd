//! Layout helpers shared by the lowering rules: columns of original tokens,
//! statement placement and block assembly.

use super::LoweringPass;
use crate::error::LoweringError;
use crate::indentation::{
    change_indentation, ensure_trailing_new_line, indentation_trivia, new_line_trivia,
    relocated_leading_trivia, shift_leading_trivia, split_leading_trivia,
};
use tsdl_syntax::{Lowered, SyntaxList, SyntaxNode, SyntaxToken, TriviaList, ast, walk_list};

impl LoweringPass<'_> {
    pub(crate) fn indent_size(&self) -> usize {
        self.options.indent_size
    }

    /// Column where `node`'s first token starts in the input tree.
    ///
    /// Synthesized nodes have no position and report column zero.
    pub(crate) fn column_of(&self, node: &SyntaxNode) -> usize {
        node.first_token()
            .and_then(|token| self.info.column_for_start_of_token(&token))
            .unwrap_or(0)
    }

    /// Indentation of the input line on which `node` starts.
    pub(crate) fn line_indentation_of(&self, node: &SyntaxNode) -> usize {
        node.first_token()
            .and_then(|token| self.info.indentation_column_of_token(&token))
            .unwrap_or(0)
    }

    pub(crate) fn line_of(&self, node: &SyntaxNode) -> Option<usize> {
        node.first_token()
            .and_then(|token| self.info.line_of_token(&token))
    }

    /// Indentation the line holding `node` is laid out at while it is being
    /// lowered. Matches [`Self::line_indentation_of`] unless an enclosing
    /// arrow body moves that line.
    pub(crate) fn laid_out_indentation_of(&self, node: &SyntaxNode) -> usize {
        let line = self.line_of(node);
        self.line_layouts
            .iter()
            .rev()
            .find(|(layout_line, _)| Some(*layout_line) == line)
            .map_or_else(|| self.line_indentation_of(node), |&(_, column)| column)
    }

    /// Lower `node` with the input line it starts on laid out at `column`.
    pub(crate) fn lower_with_line_at(
        &mut self,
        node: &SyntaxNode,
        column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let Some(line) = self.line_of(node) else {
            return self.lower_node(node);
        };
        self.line_layouts.push((line, column));
        let result = self.lower_node(node);
        self.line_layouts.pop();
        result
    }

    pub(crate) fn indentation(&self, column: usize) -> TriviaList {
        indentation_trivia(column, self.options)
    }

    pub(crate) fn new_line(&self) -> TriviaList {
        new_line_trivia(self.options)
    }

    /// `trivia` guaranteed to end its line.
    pub(crate) fn line_end(&self, trivia: &TriviaList) -> TriviaList {
        ensure_trailing_new_line(trivia, self.options)
    }

    pub(crate) fn relocated(&self, trivia: &TriviaList, column: usize) -> TriviaList {
        relocated_leading_trivia(trivia, column, self.options)
    }

    pub(crate) fn reindent(
        &self,
        node: &SyntaxNode,
        change_first_token: bool,
        delta: isize,
    ) -> Result<SyntaxNode, LoweringError> {
        Ok(change_indentation(node, change_first_token, delta, self.options)?)
    }

    /// A synthesized statement on its own line at `column`.
    pub(crate) fn statement_at(&self, statement: SyntaxNode, column: usize) -> SyntaxNode {
        statement
            .with_leading_trivia(self.indentation(column))
            .with_trailing_trivia(self.new_line())
    }

    /// A statement moved to its own line at `column`, keeping its comments.
    pub(crate) fn place_statement(&self, statement: &SyntaxNode, column: usize) -> SyntaxNode {
        statement
            .with_leading_trivia(self.relocated(&statement.leading_trivia(), column))
            .with_trailing_trivia(self.line_end(&statement.trailing_trivia()))
    }

    /// Leading trivia for a closing brace that must sit at `column`.
    ///
    /// Comments before the original brace are kept, shifted by `shift`.
    pub(crate) fn closing_brace_leading(
        &self,
        original: &SyntaxToken,
        column: usize,
        shift: isize,
    ) -> TriviaList {
        if original.leading_trivia().has_comment() {
            shift_leading_trivia(original.leading_trivia(), shift, self.options)
        } else {
            self.indentation(column)
        }
    }

    /// Insert `prologue` statements at the top of an already lowered block.
    ///
    /// The block is broken over lines when needed: prologue statements sit
    /// at `body_column`, the closing brace at `close_column`.
    pub(crate) fn assemble_block(
        &self,
        block: &SyntaxNode,
        prologue: Vec<SyntaxNode>,
        body_column: usize,
        close_column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        if prologue.is_empty() {
            return Ok(block.clone());
        }
        let view = ast::Block::try_cast(block)?;
        let mut statements: Vec<SyntaxNode> = prologue
            .iter()
            .map(|statement| self.place_statement(statement, body_column))
            .collect();
        for (index, statement) in view.statements.iter().enumerate() {
            if index == 0 {
                let leading = self.relocated(&statement.leading_trivia(), body_column);
                statements.push(statement.with_leading_trivia(leading));
            } else {
                statements.push(statement.clone());
            }
        }
        if let Some(last) = statements.last_mut() {
            *last = last.with_trailing_trivia(self.line_end(&last.trailing_trivia()));
        }
        let open_brace_token = view
            .open_brace_token
            .with_trailing_trivia(self.line_end(view.open_brace_token.trailing_trivia()));
        let close_brace_token = view.close_brace_token.with_leading_trivia(
            self.closing_brace_leading(&view.close_brace_token, close_column, 0),
        );
        Ok(ast::Block {
            open_brace_token,
            statements: SyntaxList::new(statements),
            close_brace_token,
        }
        .build())
    }

    /// The file is the outermost `this` scope; a capture goes first, after
    /// any comment lines that head the file.
    pub(crate) fn lower_source_unit(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        let unit = ast::SourceUnit::try_cast(node)?;
        self.push_this_scope();
        let elements = walk_list(self, &unit.module_elements);
        let captured = self.pop_this_scope();
        let elements = elements?;
        if !captured && elements.ptr_eq(&unit.module_elements) {
            return Ok(node.clone().into());
        }
        let mut statements = elements.nodes().to_vec();
        if captured {
            let mut capture = self.capture_statement(0);
            if let Some(first) = statements.first_mut() {
                let (head, tail) = split_leading_trivia(&first.leading_trivia());
                capture = capture.with_leading_trivia(head);
                *first = first.with_leading_trivia(tail);
            }
            statements.insert(0, capture);
        }
        Ok(ast::SourceUnit {
            module_elements: SyntaxList::new(statements),
            end_of_file_token: unit.end_of_file_token,
        }
        .build()
        .into())
    }
}

/// `token` with no trivia on either side.
pub(crate) fn without_trivia(token: &SyntaxToken) -> SyntaxToken {
    token
        .with_leading_trivia(TriviaList::EMPTY)
        .with_trailing_trivia(TriviaList::EMPTY)
}

/// `node` with the trivia around its edges removed.
pub(crate) fn strip_trivia(node: &SyntaxNode) -> SyntaxNode {
    node.with_leading_trivia(TriviaList::EMPTY)
        .with_trailing_trivia(TriviaList::EMPTY)
}
