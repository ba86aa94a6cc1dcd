//! Lowering Pass
//!
//! A bottom-up [`SyntaxRewriter`] that replaces every TypeScript-only
//! construct with its plain JavaScript equivalent. Each rule receives the
//! ORIGINAL node and recurses into original children, so column lookups in
//! the position map built from the input tree stay valid throughout.
//!
//! ## Examples
//!
//! ### Class
//!
//! ```typescript
//! class Point {
//!     constructor(public x: number) { }
//! }
//! ```
//!
//! becomes an IIFE returning the constructor function:
//!
//! ```javascript
//! var Point = (function () {
//!     function Point(x) {
//!         this.x = x;
//!     }
//!     return Point;
//! })();
//! ```
//!
//! ### Arrow functions and `this`
//!
//! ```typescript
//! function f() {
//!     return () => this;
//! }
//! ```
//!
//! Arrows do not rebind `this`, so the enclosing function captures it:
//!
//! ```javascript
//! function f() {
//!     var _this = this;
//!     return function () {
//!         return _this;
//!     };
//! }
//! ```
//!
//! The rules themselves live in `transforms/`; this module holds the pass
//! state, the `this` capture scopes and the per-kind dispatch.

#[path = "lowering_pass_helpers.rs"]
pub(crate) mod lowering_pass_helpers;

use crate::error::LoweringError;
use tracing::trace;
use tsdl_common::FormattingOptions;
use tsdl_common::limits::MAX_TREE_DEPTH;
use tsdl_syntax::{
    Lowered, SyntaxInformationMap, SyntaxNode, SyntaxRewriter, SyntaxToken, ast, dispatch_node,
    factory, rewrite_root,
};

/// `this` binding scope of one non-arrow function body (or the file).
#[derive(Debug, Default)]
struct ThisScope {
    /// Arrow functions entered since the scope began.
    arrow_depth: u32,
    /// Whether an arrow inside this scope referenced `this`.
    captured: bool,
}

pub struct LoweringPass<'a> {
    info: SyntaxInformationMap,
    options: &'a FormattingOptions,
    this_scopes: Vec<ThisScope>,
    /// Input lines an enclosing arrow body lays out at a different
    /// indentation, innermost last.
    line_layouts: Vec<(usize, usize)>,
    /// Current recursion depth for stack overflow protection
    visit_depth: u32,
    lowered_derived_class: bool,
}

impl<'a> LoweringPass<'a> {
    /// Prepare a pass over `root`; positions are taken from this tree.
    pub fn new(root: &SyntaxNode, options: &'a FormattingOptions) -> Self {
        LoweringPass {
            info: SyntaxInformationMap::build(root, options),
            options,
            this_scopes: Vec::new(),
            line_layouts: Vec::new(),
            visit_depth: 0,
            lowered_derived_class: false,
        }
    }

    pub fn run(&mut self, root: &SyntaxNode) -> Result<SyntaxNode, LoweringError> {
        rewrite_root(self, root)
    }

    /// Whether some class with a base class was lowered, so the output
    /// needs the `__extends` helper.
    pub fn lowered_derived_class(&self) -> bool {
        self.lowered_derived_class
    }

    pub(crate) fn options(&self) -> &FormattingOptions {
        self.options
    }

    pub(crate) fn mark_derived_class(&mut self) {
        self.lowered_derived_class = true;
    }

    /// Lower `node`, which must come back as exactly one node.
    pub(crate) fn lower_node(&mut self, node: &SyntaxNode) -> Result<SyntaxNode, LoweringError> {
        rewrite_root(self, node)
    }

    // =========================================================================
    // `this` capture
    // =========================================================================

    pub(crate) fn push_this_scope(&mut self) {
        self.this_scopes.push(ThisScope::default());
    }

    /// Leave the innermost scope; true if it needs `var _this = this;`.
    pub(crate) fn pop_this_scope(&mut self) -> bool {
        self.this_scopes.pop().is_some_and(|scope| scope.captured)
    }

    pub(crate) fn enter_arrow(&mut self) {
        if let Some(scope) = self.this_scopes.last_mut() {
            scope.arrow_depth += 1;
        }
    }

    pub(crate) fn exit_arrow(&mut self) {
        if let Some(scope) = self.this_scopes.last_mut() {
            scope.arrow_depth = scope.arrow_depth.saturating_sub(1);
        }
    }

    /// `this`, or `_this` inside an arrow function. `keyword` supplies the
    /// trivia of the reference.
    pub(crate) fn this_reference(&mut self, keyword: &SyntaxToken) -> SyntaxNode {
        if let Some(scope) = self.this_scopes.last_mut() {
            if scope.arrow_depth > 0 {
                scope.captured = true;
                let identifier = factory::identifier("_this")
                    .with_leading_trivia(keyword.leading_trivia().clone())
                    .with_trailing_trivia(keyword.trailing_trivia().clone());
                return factory::name_expression(identifier);
            }
        }
        ast::ThisExpression {
            this_keyword: keyword.clone(),
        }
        .build()
    }

    /// `var _this = this;` on its own line at `column`.
    pub(crate) fn capture_statement(&self, column: usize) -> SyntaxNode {
        let statement = factory::variable_statement(
            factory::identifier("_this"),
            Some(factory::this_expression()),
        );
        self.statement_at(statement, column)
    }
}

impl SyntaxRewriter for LoweringPass<'_> {
    type Error = LoweringError;

    fn visit_node(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        if self.visit_depth >= MAX_TREE_DEPTH {
            return Err(LoweringError::internal(
                "depth",
                format!("tree is nested deeper than {MAX_TREE_DEPTH} levels"),
                node,
            ));
        }
        self.visit_depth += 1;
        let result = dispatch_node(self, node);
        self.visit_depth -= 1;
        result
    }

    fn visit_source_unit(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_source_unit(node)
    }

    // Declarations

    fn visit_interface_declaration(&mut self, _node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        trace!("dropping interface declaration");
        Ok(Lowered::Removed)
    }

    fn visit_class_declaration(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_class_declaration(node)
    }

    fn visit_module_declaration(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_module_declaration(node)
    }

    fn visit_enum_declaration(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_enum_declaration(node)
    }

    fn visit_function_declaration(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_function_declaration(node)
    }

    fn visit_variable_statement(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_variable_statement(node)
    }

    fn visit_variable_declarator(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_variable_declarator(node)
    }

    // Signatures

    fn visit_type_annotation(&mut self, _node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        Ok(Lowered::Removed)
    }

    fn visit_call_signature(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        let signature = ast::CallSignature::try_cast(node)?;
        let (parameter_list, _) =
            self.lower_parameter_list(&signature.parameter_list, signature.type_annotation.as_ref())?;
        if parameter_list.ptr_eq(&signature.parameter_list) {
            return Ok(node.clone().into());
        }
        Ok(factory::call_signature(parameter_list).into())
    }

    fn visit_parameter_list(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        let (parameter_list, _) = self.lower_parameter_list(node, None)?;
        Ok(parameter_list.into())
    }

    fn visit_parameter(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        Ok(self.erase_parameter(node)?.into())
    }

    // Statements

    fn visit_expression_statement(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_expression_statement(node)
    }

    // Expressions

    fn visit_this_expression(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        let this = ast::ThisExpression::try_cast(node)?;
        let reference = self.this_reference(&this.this_keyword);
        if reference.kind() == node.kind() {
            return Ok(node.clone().into());
        }
        Ok(reference.into())
    }

    fn visit_cast_expression(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_cast_expression(node)
    }

    fn visit_invocation_expression(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_invocation_expression(node)
    }

    fn visit_member_access_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.lower_member_access_expression(node)
    }

    fn visit_function_expression(&mut self, node: &SyntaxNode) -> Result<Lowered, LoweringError> {
        self.lower_function_expression(node)
    }

    fn visit_get_accessor_property_assignment(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.lower_accessor_property_assignment(node)
    }

    fn visit_set_accessor_property_assignment(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.lower_accessor_property_assignment(node)
    }

    fn visit_simple_arrow_function_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.lower_simple_arrow_function(node)
    }

    fn visit_parenthesized_arrow_function_expression(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        self.lower_parenthesized_arrow_function(node)
    }
}

#[cfg(test)]
#[path = "../tests/lowering_pass.rs"]
mod tests;
