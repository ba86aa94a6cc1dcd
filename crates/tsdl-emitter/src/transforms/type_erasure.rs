//! Type erasure.
//!
//! Annotations, casts, interfaces and ambient (`declare`) declarations carry
//! no runtime meaning and are dropped; `export` modifiers go too, since the
//! output has no module system. Comments attached to kept tokens survive.
//!
//! ```typescript
//! export var x: number = <number>y;
//! ```
//!
//! ```javascript
//! var x = y;
//! ```

use crate::error::LoweringError;
use crate::lowering_pass::LoweringPass;
use tsdl_syntax::{Lowered, SyntaxNode, SyntaxToken, TriviaList, ast, walk_node};

/// Trailing trivia for a token whose following type-only syntax was dropped.
///
/// The dropped part's trailing trivia takes over, unless the kept token
/// carries a comment, in which case both are kept.
pub(crate) fn erased_trailing_trivia(kept: &TriviaList, dropped: &TriviaList) -> TriviaList {
    if kept.has_comment() {
        kept.concat(dropped)
    } else {
        dropped.clone()
    }
}

/// Leading trivia for the token after a dropped modifier keyword.
pub(crate) fn leading_after_modifier(modifier: &SyntaxToken, next_leading: &TriviaList) -> TriviaList {
    let mut trivia = modifier.leading_trivia().clone();
    if modifier.trailing_trivia().has_comment() {
        trivia = trivia.concat(modifier.trailing_trivia());
    }
    trivia.concat(next_leading)
}

impl LoweringPass<'_> {
    pub(crate) fn lower_variable_statement(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let statement = ast::VariableStatement::try_cast(node)?;
        if statement.declare_keyword.is_some() {
            return Ok(Lowered::Removed);
        }
        let walked = walk_node(self, node)?;
        let Some(export) = &statement.export_keyword else {
            return Ok(walked.into());
        };
        let lowered = ast::VariableStatement::try_cast(&walked)?;
        let leading =
            leading_after_modifier(export, &lowered.variable_declaration.leading_trivia());
        Ok(ast::VariableStatement {
            export_keyword: None,
            declare_keyword: None,
            variable_declaration: lowered.variable_declaration.with_leading_trivia(leading),
            semicolon_token: lowered.semicolon_token,
        }
        .build()
        .into())
    }

    pub(crate) fn lower_variable_declarator(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let declarator = ast::VariableDeclarator::try_cast(node)?;
        let Some(annotation) = &declarator.type_annotation else {
            return Ok(walk_node(self, node)?.into());
        };
        let equals_value_clause = declarator
            .equals_value_clause
            .as_ref()
            .map(|clause| self.lower_node(clause))
            .transpose()?;
        let trailing = erased_trailing_trivia(
            declarator.identifier.trailing_trivia(),
            &annotation.trailing_trivia(),
        );
        Ok(ast::VariableDeclarator {
            identifier: declarator.identifier.with_trailing_trivia(trailing),
            type_annotation: None,
            equals_value_clause,
        }
        .build()
        .into())
    }

    /// `<T>expr` becomes `expr`; the cast's leading trivia moves onto it.
    pub(crate) fn lower_cast_expression(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        let cast = ast::CastExpression::try_cast(node)?;
        let expression = self.lower_node(&cast.expression)?;
        let leading = cast
            .less_than_token
            .leading_trivia()
            .concat(&expression.leading_trivia());
        Ok(expression.with_leading_trivia(leading).into())
    }
}

#[cfg(test)]
#[path = "../../tests/type_erasure.rs"]
mod tests;
