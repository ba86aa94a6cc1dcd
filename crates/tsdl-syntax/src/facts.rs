//! Queries over trees that the emitter uses to decide what to do.

use crate::ast::{self, NodeKind};
use crate::node::SyntaxNode;

/// True if `root` contains any construct the downlevel pass must rewrite.
///
/// A tree for which this is false is already valid in the target dialect
/// and can be emitted unchanged.
pub fn is_typescript_specific(root: &SyntaxNode) -> bool {
    root.any_node(&mut node_is_typescript_specific)
}

fn node_is_typescript_specific(node: &SyntaxNode) -> bool {
    match node.kind() {
        NodeKind::ClassDeclaration
        | NodeKind::InterfaceDeclaration
        | NodeKind::ModuleDeclaration
        | NodeKind::EnumDeclaration
        | NodeKind::SimpleArrowFunctionExpression
        | NodeKind::ParenthesizedArrowFunctionExpression
        | NodeKind::CastExpression
        | NodeKind::TypeAnnotation => true,
        NodeKind::Parameter => ast::Parameter::cast(node).is_some_and(|p| {
            p.dot_dot_dot_token.is_some()
                || p.public_or_private_keyword.is_some()
                || p.question_token.is_some()
                || p.equals_value_clause.is_some()
                || p.type_annotation.is_some()
        }),
        NodeKind::FunctionDeclaration => ast::FunctionDeclaration::cast(node).is_some_and(|f| {
            f.export_keyword.is_some() || f.declare_keyword.is_some() || f.block.is_none()
        }),
        NodeKind::VariableStatement => ast::VariableStatement::cast(node)
            .is_some_and(|v| v.export_keyword.is_some() || v.declare_keyword.is_some()),
        _ => false,
    }
}

/// True if `node` references `this` outside any nested function that
/// rebinds it. Arrow functions do not rebind `this`.
pub fn contains_this_reference(node: &SyntaxNode) -> bool {
    node.child_nodes().iter().any(|child| {
        if child.kind() == NodeKind::ThisExpression {
            return true;
        }
        if child.kind().is_function_like() {
            return false;
        }
        contains_this_reference(child)
    })
}

/// Identifier text of a module name node (`A` or `A.B.C`), outermost first.
pub fn qualified_name_parts(name: &SyntaxNode) -> Vec<crate::token::SyntaxToken> {
    if let Some(qualified) = ast::QualifiedName::cast(name) {
        let mut parts = qualified_name_parts(&qualified.left);
        parts.push(qualified.right);
        return parts;
    }
    if let Some(identifier) = ast::IdentifierName::cast(name) {
        return vec![identifier.identifier];
    }
    Vec::new()
}
