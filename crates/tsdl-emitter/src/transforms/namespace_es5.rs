//! ES5 Namespace Transform
//!
//! A module declaration becomes a variable and an IIFE that fills it in. A
//! dotted name nests one wrapper per part:
//!
//! ```typescript
//! module A.B {
//!     export function f() { }
//! }
//! ```
//!
//! becomes:
//!
//! ```javascript
//! var A;
//! (function (A) {
//!     var B;
//!     (function (B) {
//!         function f() { }
//!         B.f = f;
//!     })(B = A.B || (A.B = {}));
//!     A.B = B;
//! })(A || (A = {}));
//! ```
//!
//! `X || (X = {})` lets a later declaration of the same namespace reopen
//! it. Exported members are attached to the innermost parameter after the
//! body. A namespace whose body lowers to nothing (only types) is removed.

use super::leading_after_modifier;
use crate::error::LoweringError;
use crate::lowering_pass::LoweringPass;
use crate::lowering_pass::lowering_pass_helpers::without_trivia;
use tracing::debug;
use tsdl_common::limits::MAX_QUALIFIED_NAME_DEPTH;
use tsdl_syntax::facts::qualified_name_parts;
use tsdl_syntax::{
    Lowered, NodeKind, SyntaxKind, SyntaxNode, SyntaxRewriter, SyntaxToken, ast, factory,
};

impl LoweringPass<'_> {
    pub(crate) fn lower_module_declaration(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let module = ast::ModuleDeclaration::try_cast(node)?;
        if module.declare_keyword.is_some() || module.name.kind() == NodeKind::LiteralExpression {
            return Ok(Lowered::Removed);
        }
        let parts: Vec<SyntaxToken> = qualified_name_parts(&module.name)
            .iter()
            .map(without_trivia)
            .collect();
        if parts.is_empty() {
            return Err(LoweringError::internal("namespace", "module name is not a name", node));
        }
        if parts.len() > MAX_QUALIFIED_NAME_DEPTH {
            return Err(LoweringError::internal(
                "namespace",
                format!("qualified name has more than {MAX_QUALIFIED_NAME_DEPTH} parts"),
                node,
            ));
        }

        let column = self.column_of(node);
        let depth = parts.len();
        let shift = (self.indent_size() * (depth - 1)) as isize;
        let body_column = column + self.indent_size() * depth;

        self.push_this_scope();
        let body = self.lower_module_body(&module, shift);
        let captured = self.pop_this_scope();
        let (mut statements, exported) = body?;
        if statements.is_empty() {
            debug!(namespace = %module.name.full_text().trim(), "removing namespace without values");
            return Ok(Lowered::Removed);
        }
        if captured {
            statements.insert(0, self.capture_statement(body_column));
        }
        if let Some(inner) = parts.last() {
            for name in exported {
                let export = factory::assignment(
                    factory::member_access(factory::name_expression(inner.clone()), name.clone()),
                    factory::name_expression(name),
                );
                statements.push(factory::expression_statement(export));
            }
        }
        let mut statements: Vec<SyntaxNode> = statements
            .iter()
            .map(|statement| self.place_statement(statement, body_column))
            .collect();

        // Wrap from the innermost part outwards.
        for level in (0..depth).rev() {
            let level_column = column + self.indent_size() * level;
            let innermost = level + 1 == depth;
            let open_trailing = if innermost {
                self.line_end(module.open_brace_token.trailing_trivia())
            } else {
                self.new_line()
            };
            let close_leading = if innermost {
                self.closing_brace_leading(&module.close_brace_token, level_column, shift)
            } else {
                self.indentation(level_column)
            };
            let block = factory::block(
                factory::token(SyntaxKind::OpenBraceToken).with_trailing_trivia(open_trailing),
                statements,
                factory::token(SyntaxKind::CloseBraceToken).with_leading_trivia(close_leading),
            );
            let parent = level.checked_sub(1).map(|index| &parts[index]);
            statements = self.namespace_wrapper(&parts[level], parent, block, level_column);
        }

        let leading = match &module.export_keyword {
            Some(export) => leading_after_modifier(export, module.module_keyword.leading_trivia()),
            None => module.module_keyword.leading_trivia().clone(),
        };
        if let Some(first) = statements.first_mut() {
            *first = first.with_leading_trivia(leading);
        }
        if let Some(last) = statements.last_mut() {
            *last = last.with_trailing_trivia(self.line_end(module.close_brace_token.trailing_trivia()));
        }
        Ok(Lowered::Many(statements))
    }

    /// Lowered body statements, shifted for the nesting depth, and the names
    /// of the exported members.
    fn lower_module_body(
        &mut self,
        module: &ast::ModuleDeclaration,
        shift: isize,
    ) -> Result<(Vec<SyntaxNode>, Vec<SyntaxToken>), LoweringError> {
        let mut statements = Vec::new();
        let mut exported = Vec::new();
        for element in module.module_elements.iter() {
            let lowered = self.visit_node(element)?.into_nodes();
            if lowered.is_empty() {
                continue;
            }
            exported.extend(exported_names(element));
            for statement in lowered {
                statements.push(self.reindent(&statement, true, shift)?);
            }
        }
        Ok((statements, exported))
    }

    /// `var X;` and `(function (X) { ... })(...);`, plus `P.X = X;` when
    /// nested in `P`.
    fn namespace_wrapper(
        &self,
        name: &SyntaxToken,
        parent: Option<&SyntaxToken>,
        block: SyntaxNode,
        column: usize,
    ) -> Vec<SyntaxNode> {
        let declaration = factory::variable_statement(name.clone(), None);
        let function = factory::function_expression(
            factory::parameter_list(vec![factory::parameter(name.clone())]),
            block,
        );
        let argument = match parent {
            None => or_create(factory::name_expression(name.clone()), || {
                factory::name_expression(name.clone())
            }),
            Some(parent) => {
                let member =
                    || factory::member_access(factory::name_expression(parent.clone()), name.clone());
                factory::assignment(factory::name_expression(name.clone()), or_create(member(), member))
            }
        };
        let call = factory::invocation(factory::parenthesized(function), vec![argument]);
        let mut statements = vec![
            self.statement_at(declaration, column),
            self.statement_at(factory::expression_statement(call), column),
        ];
        if let Some(parent) = parent {
            let attach = factory::assignment(
                factory::member_access(factory::name_expression(parent.clone()), name.clone()),
                factory::name_expression(name.clone()),
            );
            statements.push(self.statement_at(factory::expression_statement(attach), column));
        }
        statements
    }
}

/// `target || (target = {})`
fn or_create(target: SyntaxNode, assignee: impl Fn() -> SyntaxNode) -> SyntaxNode {
    factory::binary(
        target,
        SyntaxKind::BarBarToken,
        factory::parenthesized(factory::assignment(assignee(), factory::empty_object_literal())),
    )
}

/// Names an `export`ed module element declares.
fn exported_names(element: &SyntaxNode) -> Vec<SyntaxToken> {
    match element.kind() {
        NodeKind::VariableStatement => {
            let Some(statement) = ast::VariableStatement::cast(element) else {
                return Vec::new();
            };
            if statement.export_keyword.is_none() {
                return Vec::new();
            }
            ast::VariableDeclaration::cast(&statement.variable_declaration)
                .map(|declaration| {
                    declaration
                        .variable_declarators
                        .nodes()
                        .iter()
                        .filter_map(ast::VariableDeclarator::cast)
                        .map(|declarator| without_trivia(&declarator.identifier))
                        .collect()
                })
                .unwrap_or_default()
        }
        NodeKind::FunctionDeclaration => ast::FunctionDeclaration::cast(element)
            .map(|function| named(&function.export_keyword, &function.identifier))
            .unwrap_or_default(),
        NodeKind::ClassDeclaration => ast::ClassDeclaration::cast(element)
            .map(|class| named(&class.export_keyword, &class.identifier))
            .unwrap_or_default(),
        NodeKind::EnumDeclaration => ast::EnumDeclaration::cast(element)
            .map(|declaration| named(&declaration.export_keyword, &declaration.identifier))
            .unwrap_or_default(),
        NodeKind::ModuleDeclaration => ast::ModuleDeclaration::cast(element)
            .and_then(|module| {
                let first = qualified_name_parts(&module.name).into_iter().next()?;
                Some(named(&module.export_keyword, &first))
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn named(export: &Option<SyntaxToken>, identifier: &SyntaxToken) -> Vec<SyntaxToken> {
    match export {
        Some(_) => vec![without_trivia(identifier)],
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/namespace_es5.rs"]
mod tests;
