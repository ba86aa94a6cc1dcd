//! `super` references inside lowered classes.
//!
//! The class IIFE receives the base class as `_super`:
//!
//! ```typescript
//! super(a);
//! super.greet(b);
//! var f = super.greet;
//! ```
//!
//! ```javascript
//! _super.call(this, a);
//! _super.prototype.greet.call(this, b);
//! var f = _super.prototype.greet;
//! ```

use crate::error::LoweringError;
use crate::lowering_pass::LoweringPass;
use tsdl_syntax::{
    Lowered, SeparatedList, SyntaxKind, SyntaxNode, SyntaxToken, TriviaList, ast,
    factory, walk_node,
};

impl LoweringPass<'_> {
    pub(crate) fn lower_invocation_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let invocation = ast::InvocationExpression::try_cast(node)?;
        if let Some(callee) = ast::SuperExpression::cast(&invocation.expression) {
            let target = factory::member_access(
                super_reference(&callee.super_keyword),
                factory::identifier("call"),
            )
            .with_trailing_trivia(callee.super_keyword.trailing_trivia().clone());
            return self.call_with_this(target, &invocation.argument_list);
        }
        if let Some(access) = ast::MemberAccessExpression::cast(&invocation.expression) {
            if let Some(base) = ast::SuperExpression::cast(&access.expression) {
                let method = factory::member_access(
                    prototype_of_super(&base.super_keyword),
                    access.name.with_trailing_trivia(TriviaList::EMPTY),
                );
                let target = factory::member_access(method, factory::identifier("call"))
                    .with_trailing_trivia(access.name.trailing_trivia().clone());
                return self.call_with_this(target, &invocation.argument_list);
            }
        }
        Ok(walk_node(self, node)?.into())
    }

    /// `super.name` outside a call reads from the base prototype.
    pub(crate) fn lower_member_access_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let access = ast::MemberAccessExpression::try_cast(node)?;
        let Some(base) = ast::SuperExpression::cast(&access.expression) else {
            return Ok(walk_node(self, node)?.into());
        };
        Ok(ast::MemberAccessExpression {
            expression: prototype_of_super(&base.super_keyword),
            dot_token: access.dot_token,
            name: access.name,
        }
        .build()
        .into())
    }

    /// `target(this, ...arguments)`, keeping the original parentheses.
    fn call_with_this(
        &mut self,
        target: SyntaxNode,
        argument_list: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let lowered = self.lower_node(argument_list)?;
        let list = ast::ArgumentList::try_cast(&lowered)?;
        let this = self.this_reference(&factory::token(SyntaxKind::ThisKeyword));
        let mut arguments = vec![this];
        let mut separators = Vec::with_capacity(list.arguments.separator_count() + 1);
        if list.arguments.node_count() > 0 {
            separators.push(factory::token_then_space(SyntaxKind::CommaToken));
        }
        arguments.extend(list.arguments.nodes().iter().cloned());
        separators.extend(list.arguments.separators().iter().cloned());
        let argument_list = ast::ArgumentList {
            open_paren_token: list.open_paren_token,
            arguments: SeparatedList::new(arguments, separators),
            close_paren_token: list.close_paren_token,
        }
        .build();
        Ok(ast::InvocationExpression {
            expression: target,
            argument_list,
        }
        .build()
        .into())
    }
}

/// `_super`, carrying the leading trivia of the `super` keyword.
fn super_reference(keyword: &SyntaxToken) -> SyntaxNode {
    factory::name_expression(
        factory::identifier("_super").with_leading_trivia(keyword.leading_trivia().clone()),
    )
}

/// `_super.prototype`
fn prototype_of_super(keyword: &SyntaxToken) -> SyntaxNode {
    factory::member_access(super_reference(keyword), factory::identifier("prototype"))
}

#[cfg(test)]
#[path = "../../tests/super_es5.rs"]
mod tests;
