use super::*;
use crate::ast;
use crate::factory;
use crate::kind::SyntaxKind;

struct Identity;

impl SyntaxRewriter for Identity {
    type Error = RewriteError;
}

/// Renames identifiers `from` to `to`.
struct Rename {
    from: &'static str,
    to: &'static str,
}

impl SyntaxRewriter for Rename {
    type Error = RewriteError;

    fn visit_identifier_name(&mut self, node: &SyntaxNode) -> Result<Lowered, RewriteError> {
        let name = ast::IdentifierName::try_cast(node)?;
        if name.identifier.text() != self.from {
            return Ok(Lowered::Node(node.clone()));
        }
        let identifier = factory::identifier(self.to)
            .with_leading_trivia(name.identifier.leading_trivia().clone())
            .with_trailing_trivia(name.identifier.trailing_trivia().clone());
        Ok(Lowered::Node(ast::IdentifierName { identifier }.build()))
    }
}

/// Removes empty statements and duplicates expression statements.
struct Reshape;

impl SyntaxRewriter for Reshape {
    type Error = RewriteError;

    fn visit_empty_statement(&mut self, _node: &SyntaxNode) -> Result<Lowered, RewriteError> {
        Ok(Lowered::Removed)
    }

    fn visit_expression_statement(&mut self, node: &SyntaxNode) -> Result<Lowered, RewriteError> {
        let node = walk_node(self, node)?;
        Ok(Lowered::Many(vec![node.clone(), node]))
    }
}

fn sample_block() -> SyntaxNode {
    factory::block(
        factory::token(SyntaxKind::OpenBraceToken),
        vec![
            factory::expression_statement(factory::invocation(
                factory::identifier_name("f"),
                vec![factory::identifier_name("x")],
            )),
            ast::EmptyStatement {
                semicolon_token: factory::token(SyntaxKind::SemicolonToken),
            }
            .build(),
            factory::return_statement(Some(factory::binary(
                factory::identifier_name("y"),
                SyntaxKind::PlusToken,
                factory::identifier_name("z"),
            ))),
        ],
        factory::token(SyntaxKind::CloseBraceToken),
    )
}

#[test]
fn test_identity_rewrite_returns_same_object() {
    let block = sample_block();
    let result = rewrite_root(&mut Identity, &block).expect("identity rewrite");
    assert!(result.ptr_eq(&block));
}

#[test]
fn test_rewrite_shares_unaffected_subtrees() {
    let block = sample_block();
    let result = rewrite_root(&mut Rename { from: "x", to: "renamed" }, &block)
        .expect("rename rewrite");
    assert!(!result.ptr_eq(&block));
    assert_eq!(result.full_text(), "{f(renamed);;return y + z;}");

    let before = ast::Block::cast(&block).expect("block");
    let after = ast::Block::cast(&result).expect("block");
    assert!(!after.statements.nodes()[0].ptr_eq(&before.statements.nodes()[0]));
    assert!(after.statements.nodes()[1].ptr_eq(&before.statements.nodes()[1]));
    assert!(after.statements.nodes()[2].ptr_eq(&before.statements.nodes()[2]));
    assert!(after.open_brace_token.ptr_eq(&before.open_brace_token));
}

#[test]
fn test_list_members_can_be_removed_or_multiplied() {
    let block = sample_block();
    let result = rewrite_root(&mut Reshape, &block).expect("reshape");
    assert_eq!(result.full_text(), "{f(x);f(x);return y + z;}");
}

#[test]
fn test_fan_out_into_single_slot_is_an_error() {
    struct Explode;
    impl SyntaxRewriter for Explode {
        type Error = RewriteError;
        fn visit_identifier_name(&mut self, node: &SyntaxNode) -> Result<Lowered, RewriteError> {
            Ok(Lowered::Many(vec![node.clone(), node.clone()]))
        }
    }

    let statement = factory::return_statement(Some(factory::identifier_name("x")));
    let err = rewrite_root(&mut Explode, &statement).expect_err("fan-out in a node slot");
    assert_eq!(
        err,
        RewriteError::SlotFanOut {
            parent: NodeKind::ReturnStatement,
            slot: 1,
            produced: 2
        }
    );
}

#[test]
fn test_removing_optional_slot_clears_it() {
    struct DropValues;
    impl SyntaxRewriter for DropValues {
        type Error = RewriteError;
        fn visit_binary_expression(&mut self, _node: &SyntaxNode) -> Result<Lowered, RewriteError> {
            Ok(Lowered::Removed)
        }
    }

    let statement = factory::return_statement(Some(factory::binary(
        factory::identifier_name("a"),
        SyntaxKind::PlusToken,
        factory::identifier_name("b"),
    )));
    let result = rewrite_root(&mut DropValues, &statement).expect("optional slot");
    assert_eq!(result.full_text(), "return ;");
}
