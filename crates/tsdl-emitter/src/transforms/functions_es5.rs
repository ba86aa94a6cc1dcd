//! Function declarations, function expressions and object-literal accessors.
//!
//! Each of these opens a new `this` scope. Their parameter lists are lowered
//! and the resulting prologue (captured `this`, default values, rest
//! parameter) is spliced into the top of the body.

use super::leading_after_modifier;
use super::type_erasure::erased_trailing_trivia;
use crate::error::LoweringError;
use crate::lowering_pass::LoweringPass;
use tracing::trace;
use tsdl_syntax::{Lowered, NodeKind, SyntaxKind, SyntaxNode, TriviaList, ast, factory, walk_node};

impl LoweringPass<'_> {
    /// Lower the parameter list and body of a function whose own line
    /// starts at `column`; the body is laid out one level deeper.
    ///
    /// Returns the lowered parameter list and block.
    pub(crate) fn lower_function_like(
        &mut self,
        parameter_list: &SyntaxNode,
        return_type: Option<&SyntaxNode>,
        block: &SyntaxNode,
        column: usize,
    ) -> Result<(SyntaxNode, SyntaxNode), LoweringError> {
        let body_column = column + self.indent_size();
        self.push_this_scope();
        let lowered = self.lower_function_parts(parameter_list, return_type, block, body_column);
        let captured = self.pop_this_scope();
        let (parameter_list, mut prologue, block) = lowered?;
        if captured {
            prologue.insert(0, self.capture_statement(body_column));
        }
        let block = self.assemble_block(&block, prologue, body_column, column)?;
        Ok((parameter_list, block))
    }

    fn lower_function_parts(
        &mut self,
        parameter_list: &SyntaxNode,
        return_type: Option<&SyntaxNode>,
        block: &SyntaxNode,
        body_column: usize,
    ) -> Result<(SyntaxNode, Vec<SyntaxNode>, SyntaxNode), LoweringError> {
        let (parameter_list, facts) = self.lower_parameter_list(parameter_list, return_type)?;
        let prologue = self.parameter_prologue(&facts, body_column)?;
        let block = self.lower_node(block)?;
        Ok((parameter_list, prologue, block))
    }

    pub(crate) fn lower_function_declaration(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let function = ast::FunctionDeclaration::try_cast(node)?;
        if function.declare_keyword.is_some() {
            return Ok(Lowered::Removed);
        }
        let Some(block) = &function.block else {
            trace!(name = %function.identifier.text(), "dropping overload signature");
            return Ok(Lowered::Removed);
        };
        let signature = ast::CallSignature::try_cast(&function.call_signature)?;
        let column = self.line_indentation_of(node);
        let (parameter_list, lowered_block) = self.lower_function_like(
            &signature.parameter_list,
            signature.type_annotation.as_ref(),
            block,
            column,
        )?;
        if function.export_keyword.is_none()
            && parameter_list.ptr_eq(&signature.parameter_list)
            && lowered_block.ptr_eq(block)
        {
            return Ok(node.clone().into());
        }
        let function_keyword = match &function.export_keyword {
            Some(export) => function.function_keyword.with_leading_trivia(leading_after_modifier(
                export,
                function.function_keyword.leading_trivia(),
            )),
            None => function.function_keyword.clone(),
        };
        Ok(ast::FunctionDeclaration {
            export_keyword: None,
            declare_keyword: None,
            function_keyword,
            identifier: function.identifier.clone(),
            call_signature: factory::call_signature(parameter_list),
            block: Some(lowered_block),
            semicolon_token: function.semicolon_token.clone(),
        }
        .build()
        .into())
    }

    pub(crate) fn lower_function_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let function = ast::FunctionExpression::try_cast(node)?;
        let signature = ast::CallSignature::try_cast(&function.call_signature)?;
        let column = self.line_indentation_of(node);
        let (parameter_list, block) = self.lower_function_like(
            &signature.parameter_list,
            signature.type_annotation.as_ref(),
            &function.block,
            column,
        )?;
        if parameter_list.ptr_eq(&signature.parameter_list) && block.ptr_eq(&function.block) {
            return Ok(node.clone().into());
        }
        Ok(ast::FunctionExpression {
            function_keyword: function.function_keyword,
            identifier: function.identifier,
            call_signature: factory::call_signature(parameter_list),
            block,
        }
        .build()
        .into())
    }

    /// `get p() { }` / `set p(v) { }` inside an object literal.
    pub(crate) fn lower_accessor_property_assignment(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.push_this_scope();
        let walked = walk_node(self, node);
        let captured = self.pop_this_scope();
        let walked = walked?;
        if walked.kind() == NodeKind::GetAccessorPropertyAssignment {
            let mut accessor = ast::GetAccessorPropertyAssignment::try_cast(&walked)?;
            let original = ast::GetAccessorPropertyAssignment::try_cast(node)?;
            if let Some(annotation) = &original.type_annotation {
                // The walk dropped the return type; its trivia moves to `)`.
                accessor.close_paren_token =
                    accessor.close_paren_token.with_trailing_trivia(erased_trailing_trivia(
                        original.close_paren_token.trailing_trivia(),
                        &annotation.trailing_trivia(),
                    ));
                accessor.type_annotation = None;
            } else if !captured {
                return Ok(walked.into());
            }
            if captured {
                let column = self.line_indentation_of(node);
                let body_column = column + self.indent_size();
                let capture = vec![self.capture_statement(body_column)];
                accessor.block =
                    self.assemble_block(&accessor.block, capture, body_column, column)?;
            }
            return Ok(accessor.build().into());
        }
        if !captured {
            return Ok(walked.into());
        }
        let column = self.line_indentation_of(node);
        let body_column = column + self.indent_size();
        let capture = vec![self.capture_statement(body_column)];
        let mut accessor = ast::SetAccessorPropertyAssignment::try_cast(&walked)?;
        accessor.block = self.assemble_block(&accessor.block, capture, body_column, column)?;
        Ok(accessor.build().into())
    }

    /// A statement may not begin with `function` unless it declares one, so
    /// an expression statement that now does is parenthesized.
    pub(crate) fn lower_expression_statement(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let walked = walk_node(self, node)?;
        let statement = ast::ExpressionStatement::try_cast(&walked)?;
        let starts_with_function = statement
            .expression
            .first_token()
            .is_some_and(|token| token.kind() == SyntaxKind::FunctionKeyword);
        if !starts_with_function {
            return Ok(walked.into());
        }
        let leading = statement.expression.leading_trivia();
        let trailing = statement.expression.trailing_trivia();
        let inner = statement
            .expression
            .with_leading_trivia(TriviaList::EMPTY)
            .with_trailing_trivia(TriviaList::EMPTY);
        let wrapped = factory::parenthesized(inner)
            .with_leading_trivia(leading)
            .with_trailing_trivia(trailing);
        Ok(ast::ExpressionStatement {
            expression: wrapped,
            semicolon_token: statement.semicolon_token,
        }
        .build()
        .into())
    }
}

#[cfg(test)]
#[path = "../../tests/functions_es5.rs"]
mod tests;
