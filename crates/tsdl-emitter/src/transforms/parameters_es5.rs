//! ES5 Parameter Transform
//!
//! Parameter lists lose their type syntax, default values move into the
//! body, and a rest parameter is rebuilt from `arguments`:
//!
//! ```typescript
//! function f(a: number, b = 1, ...rest: any[]) { }
//! ```
//!
//! ```javascript
//! function f(a, b) {
//!     if (typeof b === "undefined") { b = 1; }
//!     var rest = [];
//!     for (var _i = 2; _i < arguments.length; _i++) {
//!         rest[_i - 2] = arguments[_i];
//!     }
//! }
//! ```
//!
//! Parameter properties (`constructor(public x)`) are reported back to the
//! class transform, which assigns them to `this`.

use super::type_erasure::{erased_trailing_trivia, leading_after_modifier};
use crate::error::LoweringError;
use crate::lowering_pass::LoweringPass;
use crate::lowering_pass::lowering_pass_helpers::{strip_trivia, without_trivia};
use tsdl_syntax::{SeparatedList, SyntaxKind, SyntaxNode, SyntaxToken, TriviaList, ast, factory};

/// A parameter with a default value, as written in the input.
#[derive(Clone, Debug)]
pub(crate) struct DefaultValue {
    pub name: SyntaxToken,
    pub value: SyntaxNode,
}

#[derive(Clone, Debug)]
pub(crate) struct RestParameter {
    pub name: SyntaxToken,
    /// Position of the rest parameter in the list.
    pub index: usize,
}

/// What a lowered parameter list leaves for the function body to do.
#[derive(Clone, Debug, Default)]
pub(crate) struct ParameterFacts {
    pub defaults: Vec<DefaultValue>,
    pub rest: Option<RestParameter>,
    /// Names declared `public` or `private` in a constructor.
    pub properties: Vec<SyntaxToken>,
}

impl LoweringPass<'_> {
    /// Erase types from a parameter list and drop a rest parameter.
    ///
    /// `return_type` is the annotation following the list, if any; its
    /// trailing trivia moves onto the closing paren.
    pub(crate) fn lower_parameter_list(
        &mut self,
        list: &SyntaxNode,
        return_type: Option<&SyntaxNode>,
    ) -> Result<(SyntaxNode, ParameterFacts), LoweringError> {
        let view = ast::ParameterList::try_cast(list)?;
        let mut facts = ParameterFacts::default();
        let mut parameters = Vec::with_capacity(view.parameters.node_count());
        let mut changed = return_type.is_some();
        for (index, node) in view.parameters.nodes().iter().enumerate() {
            let parameter = ast::Parameter::try_cast(node)?;
            if parameter.dot_dot_dot_token.is_some() {
                facts.rest = Some(RestParameter {
                    name: without_trivia(&parameter.identifier),
                    index,
                });
                changed = true;
                break;
            }
            if let Some(clause) = &parameter.equals_value_clause {
                let clause = ast::EqualsValueClause::try_cast(clause)?;
                facts.defaults.push(DefaultValue {
                    name: without_trivia(&parameter.identifier),
                    value: clause.value,
                });
            }
            if parameter.public_or_private_keyword.is_some() {
                facts.properties.push(without_trivia(&parameter.identifier));
            }
            let erased = self.erase_parameter(node)?;
            changed |= !erased.ptr_eq(node);
            parameters.push(erased);
        }
        if !changed {
            return Ok((list.clone(), facts));
        }
        let separators = view
            .parameters
            .separators()
            .iter()
            .take(parameters.len().saturating_sub(1))
            .cloned()
            .collect();
        let mut close_paren_token = view.close_paren_token.clone();
        if let Some(return_type) = return_type {
            close_paren_token = close_paren_token.with_trailing_trivia(erased_trailing_trivia(
                view.close_paren_token.trailing_trivia(),
                &return_type.trailing_trivia(),
            ));
        }
        let lowered = ast::ParameterList {
            open_paren_token: view.open_paren_token,
            parameters: SeparatedList::new(parameters, separators),
            close_paren_token,
        }
        .build();
        Ok((lowered, facts))
    }

    /// A parameter reduced to its name, keeping the surrounding trivia.
    pub(crate) fn erase_parameter(&self, node: &SyntaxNode) -> Result<SyntaxNode, LoweringError> {
        let parameter = ast::Parameter::try_cast(node)?;
        let has_suffix = parameter.question_token.is_some()
            || parameter.type_annotation.is_some()
            || parameter.equals_value_clause.is_some();
        let has_prefix =
            parameter.dot_dot_dot_token.is_some() || parameter.public_or_private_keyword.is_some();
        if !has_suffix && !has_prefix {
            return Ok(node.clone());
        }
        let identifier = &parameter.identifier;
        let mut leading = identifier.leading_trivia().clone();
        for modifier in [
            &parameter.public_or_private_keyword,
            &parameter.dot_dot_dot_token,
        ]
        .into_iter()
        .flatten()
        {
            leading = leading_after_modifier(modifier, &leading);
        }
        let trailing = if has_suffix {
            erased_trailing_trivia(identifier.trailing_trivia(), &node.trailing_trivia())
        } else {
            identifier.trailing_trivia().clone()
        };
        Ok(factory::parameter(
            identifier
                .with_leading_trivia(leading)
                .with_trailing_trivia(trailing),
        ))
    }

    /// Statements that must run before the body: default values, then the
    /// rest parameter. Must be called inside the function's `this` scope.
    pub(crate) fn parameter_prologue(
        &mut self,
        facts: &ParameterFacts,
        body_column: usize,
    ) -> Result<Vec<SyntaxNode>, LoweringError> {
        let mut statements = Vec::new();
        for default in &facts.defaults {
            statements.push(self.default_value_statement(default, body_column)?);
        }
        if let Some(rest) = &facts.rest {
            statements.extend(self.rest_parameter_statements(rest, body_column));
        }
        Ok(statements)
    }

    /// `if (typeof p === "undefined") { p = value; }`
    fn default_value_statement(
        &mut self,
        default: &DefaultValue,
        body_column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let name = default.name.text();
        let value = strip_trivia(&self.lower_node(&default.value)?);
        let prefix = format!("if (typeof {name} === \"undefined\") {{ {name} = ");
        let delta = (body_column + prefix.chars().count()) as isize
            - self.column_of(&default.value) as isize;
        let value = self.reindent(&value, false, delta)?;

        let condition = factory::binary(
            factory::prefix_unary(
                SyntaxKind::TypeOfKeyword,
                factory::name_expression(default.name.clone()),
            ),
            SyntaxKind::EqualsEqualsEqualsToken,
            factory::string_literal("undefined"),
        );
        let assignment = factory::expression_statement(factory::assignment(
            factory::name_expression(default.name.clone()),
            value,
        ))
        .with_trailing_trivia(TriviaList::space(" "));
        let block = factory::block(
            factory::token_then_space(SyntaxKind::OpenBraceToken),
            vec![assignment],
            factory::token(SyntaxKind::CloseBraceToken),
        );
        Ok(self.statement_at(factory::if_statement(condition, block), body_column))
    }

    /// `var rest = [];` and the loop copying the trailing arguments into it.
    fn rest_parameter_statements(&self, rest: &RestParameter, body_column: usize) -> Vec<SyntaxNode> {
        let counter = || factory::identifier_name("_i");
        let first_index = || factory::numeric_literal(&rest.index.to_string());

        let declaration = factory::variable_statement(
            rest.name.clone(),
            Some(factory::array_literal(Vec::new())),
        );

        let target_index = if rest.index == 0 {
            counter()
        } else {
            factory::binary(counter(), SyntaxKind::MinusToken, first_index())
        };
        let copy = factory::expression_statement(factory::assignment(
            factory::element_access(factory::name_expression(rest.name.clone()), target_index),
            factory::element_access(factory::identifier_name("arguments"), counter()),
        ));
        let body = factory::block(
            factory::token(SyntaxKind::OpenBraceToken).with_trailing_trivia(self.new_line()),
            vec![self.statement_at(copy, body_column + self.indent_size())],
            factory::token(SyntaxKind::CloseBraceToken)
                .with_leading_trivia(self.indentation(body_column)),
        );
        let copy_loop = ast::ForStatement {
            for_keyword: factory::token_then_space(SyntaxKind::ForKeyword),
            open_paren_token: factory::token(SyntaxKind::OpenParenToken),
            variable_declaration: Some(factory::variable_declaration(
                factory::identifier("_i"),
                Some(first_index()),
            )),
            initializer: None,
            first_semicolon_token: factory::token_then_space(SyntaxKind::SemicolonToken),
            condition: Some(factory::binary(
                counter(),
                SyntaxKind::LessThanToken,
                factory::member_access_path(factory::identifier_name("arguments"), &["length"]),
            )),
            second_semicolon_token: factory::token_then_space(SyntaxKind::SemicolonToken),
            incrementor: Some(factory::postfix_unary(counter(), SyntaxKind::PlusPlusToken)),
            close_paren_token: factory::token_then_space(SyntaxKind::CloseParenToken),
            statement: body,
        }
        .build();

        vec![
            self.statement_at(declaration, body_column),
            self.statement_at(copy_loop, body_column),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/parameters_es5.rs"]
mod tests;
