//! ES5 Arrow Function Transform
//!
//! Transforms arrow functions into function expressions. Arrows do not
//! rebind `this`; references to it inside an arrow are redirected to a
//! `_this` variable declared by the enclosing function (see the capture
//! scopes in `lowering_pass`).
//!
//! ```typescript
//! var add = (a: number, b: number) => a + b;
//! ```
//!
//! becomes:
//!
//! ```javascript
//! var add = function (a, b) {
//!     return a + b;
//! };
//! ```
//!
//! An expression body always becomes a multi-line block with a single
//! `return` one indentation level below the line the arrow starts on.
//! Comments written between `=>` and the body are placed on their own lines
//! above the `return`, so a line comment can never split `return` from its
//! operand.
//!
//! Continuation lines of the expression keep their offset from its first
//! token. When the expression starts on a line of its own they keep their
//! offset from the arrow's start instead:
//!
//! ```typescript
//! var f = x =>
//!         x +
//!             1;
//! ```
//!
//! becomes:
//!
//! ```javascript
//! var f = function (x) {
//!     return x +
//!         1;
//! };
//! ```

use super::ParameterFacts;
use crate::error::LoweringError;
use crate::indentation::comment_lines;
use crate::lowering_pass::LoweringPass;
use crate::lowering_pass::lowering_pass_helpers::{strip_trivia, without_trivia};
use tsdl_syntax::{Lowered, NodeKind, SyntaxKind, SyntaxNode, SyntaxToken, TriviaList, ast, factory};

/// Width of `return ` ahead of the returned expression.
const RETURN_PREFIX_WIDTH: usize = "return ".len();

impl LoweringPass<'_> {
    /// `x => body`
    pub(crate) fn lower_simple_arrow_function(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let arrow = ast::SimpleArrowFunctionExpression::try_cast(node)?;
        let parameter_list =
            factory::parameter_list(vec![factory::parameter(without_trivia(&arrow.identifier))])
                .with_trailing_trivia(arrow.identifier.trailing_trivia().clone());
        self.lower_arrow(
            node,
            parameter_list,
            &ParameterFacts::default(),
            &arrow.equals_greater_than_token,
            &arrow.body,
        )
    }

    /// `(a, b): T => body`
    pub(crate) fn lower_parenthesized_arrow_function(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let arrow = ast::ParenthesizedArrowFunctionExpression::try_cast(node)?;
        let signature = ast::CallSignature::try_cast(&arrow.call_signature)?;
        let (parameter_list, facts) = self
            .lower_parameter_list(&signature.parameter_list, signature.type_annotation.as_ref())?;
        self.lower_arrow(
            node,
            parameter_list,
            &facts,
            &arrow.equals_greater_than_token,
            &arrow.body,
        )
    }

    fn lower_arrow(
        &mut self,
        node: &SyntaxNode,
        parameter_list: SyntaxNode,
        facts: &ParameterFacts,
        arrow_token: &SyntaxToken,
        body: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let column = self.laid_out_indentation_of(node);
        let body_column = column + self.indent_size();

        let mut separator = parameter_list.trailing_trivia();
        if body.kind() == NodeKind::Block && arrow_token.trailing_trivia().has_comment() {
            separator = separator.concat(arrow_token.trailing_trivia());
        }
        if separator.is_empty() {
            separator = TriviaList::space(" ");
        }
        let parameter_list = parameter_list
            .with_leading_trivia(TriviaList::EMPTY)
            .with_trailing_trivia(separator);

        self.enter_arrow();
        let block = self.lower_arrow_body(node, facts, arrow_token, body, column, body_column);
        self.exit_arrow();
        let block = block?;

        Ok(ast::FunctionExpression {
            function_keyword: factory::token_then_space(SyntaxKind::FunctionKeyword)
                .with_leading_trivia(node.leading_trivia()),
            identifier: None,
            call_signature: factory::call_signature(parameter_list),
            block,
        }
        .build()
        .into())
    }

    fn lower_arrow_body(
        &mut self,
        node: &SyntaxNode,
        facts: &ParameterFacts,
        arrow_token: &SyntaxToken,
        body: &SyntaxNode,
        column: usize,
        body_column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let prologue = self.parameter_prologue(facts, body_column)?;
        if body.kind() == NodeKind::Block {
            let block = self.lower_node(body)?;
            // The block's lines follow the arrow's input line.
            let shift = column as isize - self.line_indentation_of(node) as isize;
            let block = self.reindent(&block, false, shift)?;
            return self.assemble_block(&block, prologue, body_column, column);
        }

        let delta = if arrow_token.trailing_trivia().has_new_line() {
            body_column as isize - self.column_of(node) as isize
        } else {
            (body_column + RETURN_PREFIX_WIDTH) as isize - self.column_of(body) as isize
        };
        // The expression's first line ends up at `body_column` once shifted
        // by `delta`; arrows nested on that line lay out against it.
        let first_line_column = (body_column as isize - delta).max(0) as usize;
        let expression = self.lower_with_line_at(body, first_line_column)?;
        let comments = arrow_token
            .trailing_trivia()
            .concat(&expression.leading_trivia());
        let trailing = expression.trailing_trivia();
        let expression = self.reindent(&strip_trivia(&expression), false, delta)?;
        let return_statement = factory::return_statement(Some(expression))
            .with_leading_trivia(comment_lines(&comments, body_column, self.options()))
            .with_trailing_trivia(self.new_line());

        let mut statements: Vec<SyntaxNode> = prologue
            .iter()
            .map(|statement| self.place_statement(statement, body_column))
            .collect();
        statements.push(return_statement);
        Ok(factory::block(
            factory::token(SyntaxKind::OpenBraceToken).with_trailing_trivia(self.new_line()),
            statements,
            factory::token(SyntaxKind::CloseBraceToken)
                .with_leading_trivia(self.indentation(column))
                .with_trailing_trivia(trailing),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/arrow_es5.rs"]
mod tests;
