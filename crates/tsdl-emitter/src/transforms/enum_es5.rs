//! ES5 Enum Transform
//!
//! An enum becomes a variable and an IIFE that records both directions of
//! the mapping:
//!
//! ```typescript
//! enum E { A, B = 5, C }
//! ```
//!
//! becomes:
//!
//! ```javascript
//! var E;
//! (function (E) {
//!     E._map = [];
//!     E._map[E.A = 0] = "A";
//!     E._map[E.B = 5] = "B";
//!     E._map[E.C = 6] = "C";
//! })(E || (E = {}));
//! ```
//!
//! A member without an initializer takes its ordinal while every member
//! before it was implicit; after that it is the previous member plus one.

use super::leading_after_modifier;
use crate::error::LoweringError;
use crate::indentation::trailing_comment_line;
use crate::lowering_pass::LoweringPass;
use crate::lowering_pass::lowering_pass_helpers::{strip_trivia, without_trivia};
use tracing::trace;
use tsdl_syntax::value::number_to_text;
use tsdl_syntax::{Lowered, NodeKind, SyntaxKind, SyntaxNode, SyntaxToken, ast, factory};

/// Value of the member before the one being lowered.
enum PreviousValue {
    /// Every member so far was implicit; holds the next ordinal.
    Ordinal(usize),
    /// A numeric constant.
    Known(f64),
    /// Only known at run time, through the member's name.
    Member(SyntaxToken),
}

impl LoweringPass<'_> {
    pub(crate) fn lower_enum_declaration(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let declaration = ast::EnumDeclaration::try_cast(node)?;
        if declaration.declare_keyword.is_some() {
            return Ok(Lowered::Removed);
        }
        let name = without_trivia(&declaration.identifier);
        let column = self.column_of(node);
        let body_column = column + self.indent_size();

        let enum_name = || factory::name_expression(name.clone());
        let reverse_map = || factory::member_access_path(enum_name(), &["_map"]);
        let mut statements = vec![self.statement_at(
            factory::expression_statement(factory::assignment(
                reverse_map(),
                factory::array_literal(Vec::new()),
            )),
            body_column,
        )];

        let elements = &declaration.enum_elements;
        let mut previous = PreviousValue::Ordinal(0);
        for (index, element) in elements.nodes().iter().enumerate() {
            let Some(member) = ast::EnumElement::cast(element) else {
                continue;
            };
            let value = match &member.equals_value_clause {
                Some(clause) => {
                    let clause = ast::EqualsValueClause::try_cast(clause)?;
                    let value = strip_trivia(&self.lower_node(&clause.value)?);
                    previous = match numeric_constant(&value) {
                        Some(number) => PreviousValue::Known(number),
                        None => PreviousValue::Member(without_trivia(&member.property_name)),
                    };
                    value
                }
                None => {
                    let (value, next) = implicit_value(&previous, &name, &member.property_name);
                    previous = next;
                    value
                }
            };

            let target = match member.property_name.kind() {
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => factory::element_access(
                    enum_name(),
                    factory::literal(without_trivia(&member.property_name)),
                ),
                _ => factory::member_access(enum_name(), without_trivia(&member.property_name)),
            };
            let record = factory::assignment(
                factory::element_access(reverse_map(), factory::assignment(target, value)),
                factory::string_literal(&member.property_name.value_text()),
            );
            let mut trailing = element.trailing_trivia();
            if let Some(separator) = elements.separators().get(index) {
                trailing = trailing.concat(separator.trailing_trivia());
            }
            statements.push(
                factory::expression_statement(record)
                    .with_leading_trivia(self.relocated(&element.leading_trivia(), body_column))
                    .with_trailing_trivia(trailing_comment_line(&trailing, self.options())),
            );
        }
        trace!(name = %name.text(), members = statements.len() - 1, "lowered enum");

        let block = factory::block(
            factory::token(SyntaxKind::OpenBraceToken)
                .with_trailing_trivia(self.line_end(declaration.open_brace_token.trailing_trivia())),
            statements,
            factory::token(SyntaxKind::CloseBraceToken).with_leading_trivia(
                self.closing_brace_leading(&declaration.close_brace_token, column, 0),
            ),
        );
        let function = factory::function_expression(
            factory::parameter_list(vec![factory::parameter(name.clone())]),
            block,
        );
        let argument = factory::binary(
            enum_name(),
            SyntaxKind::BarBarToken,
            factory::parenthesized(factory::assignment(enum_name(), factory::empty_object_literal())),
        );
        let call = factory::invocation(factory::parenthesized(function), vec![argument]);

        let leading = match &declaration.export_keyword {
            Some(export) => {
                leading_after_modifier(export, declaration.enum_keyword.leading_trivia())
            }
            None => declaration.enum_keyword.leading_trivia().clone(),
        };
        let variable = factory::variable_statement(name.clone(), None)
            .with_leading_trivia(leading)
            .with_trailing_trivia(self.new_line());
        let initializer = factory::expression_statement(call)
            .with_leading_trivia(self.indentation(column))
            .with_trailing_trivia(self.line_end(declaration.close_brace_token.trailing_trivia()));
        Ok(Lowered::Many(vec![variable, initializer]))
    }
}

/// Value of a member without an initializer, and what the next member
/// follows.
fn implicit_value(
    previous: &PreviousValue,
    enum_name: &SyntaxToken,
    member_name: &SyntaxToken,
) -> (SyntaxNode, PreviousValue) {
    match previous {
        PreviousValue::Ordinal(ordinal) => (
            number_literal(*ordinal as f64),
            PreviousValue::Ordinal(ordinal + 1),
        ),
        PreviousValue::Known(number) => {
            let value = number + 1.0;
            (number_literal(value), PreviousValue::Known(value))
        }
        PreviousValue::Member(previous_name) => {
            let previous_member = match previous_name.kind() {
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => factory::element_access(
                    factory::name_expression(enum_name.clone()),
                    factory::literal(previous_name.clone()),
                ),
                _ => factory::member_access(
                    factory::name_expression(enum_name.clone()),
                    previous_name.clone(),
                ),
            };
            let value = factory::binary(
                previous_member,
                SyntaxKind::PlusToken,
                factory::numeric_literal("1"),
            );
            (value, PreviousValue::Member(without_trivia(member_name)))
        }
    }
}

/// `value` as a numeric literal, negative numbers as `-n`.
fn number_literal(value: f64) -> SyntaxNode {
    if value < 0.0 {
        factory::prefix_unary(
            SyntaxKind::MinusToken,
            factory::numeric_literal(&number_to_text(-value)),
        )
    } else {
        factory::numeric_literal(&number_to_text(value))
    }
}

/// The number `node` denotes when it is a literal, or a signed literal.
fn numeric_constant(node: &SyntaxNode) -> Option<f64> {
    match node.kind() {
        NodeKind::LiteralExpression => {
            let literal = ast::LiteralExpression::cast(node)?;
            literal.literal_token.value().as_number()
        }
        NodeKind::PrefixUnaryExpression => {
            let unary = ast::PrefixUnaryExpression::cast(node)?;
            let operand = numeric_constant(&unary.operand)?;
            match unary.operator_token.kind() {
                SyntaxKind::MinusToken => Some(-operand),
                SyntaxKind::PlusToken => Some(operand),
                _ => None,
            }
        }
        NodeKind::ParenthesizedExpression => {
            numeric_constant(&ast::ParenthesizedExpression::cast(node)?.expression)
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/enum_es5.rs"]
mod tests;
