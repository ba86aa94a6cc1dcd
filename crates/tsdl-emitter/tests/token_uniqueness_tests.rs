//! Every token object occupies a single tree position.

use tsdl_common::LoweringOptions;
use tsdl_emitter::{LoweringError, ensure_token_uniqueness, lower};
use tsdl_syntax::{Invariant, NodeKind, SyntaxKind, SyntaxNode, check_invariants, factory};

/// `x + x`, with both operands holding the same token object.
fn shared_token_statement() -> SyntaxNode {
    let token = factory::identifier("x");
    factory::expression_statement(factory::binary(
        factory::name_expression(token.clone()),
        SyntaxKind::PlusToken,
        factory::name_expression(token),
    ))
}

#[test]
fn shared_token_breaks_invariants() {
    let violation = check_invariants(&shared_token_statement()).expect_err("violation");
    assert_eq!(violation.invariant, Invariant::TokenUniqueness);
}

#[test]
fn uniqueness_pass_copies_repeated_tokens() {
    let statement = shared_token_statement();
    let unique = ensure_token_uniqueness(&statement).expect("rewrite");
    check_invariants(&unique).expect("invariants hold");
    assert_eq!(unique.full_text(), statement.full_text());
}

#[test]
fn unique_tree_is_returned_as_is() {
    let tree = tsdl_parser::parse("var a = b + c;\n").expect("parse");
    let unique = ensure_token_uniqueness(&tree).expect("rewrite");
    assert!(unique.ptr_eq(&tree));
}

#[test]
fn lower_rejects_shared_tokens() {
    let result = lower(&shared_token_statement(), &LoweringOptions::default());
    assert!(matches!(result, Err(LoweringError::PreconditionViolation { .. })));
}

#[test]
fn precondition_error_names_the_enclosing_nodes() {
    match lower(&shared_token_statement(), &LoweringOptions::default()) {
        Err(LoweringError::PreconditionViolation {
            kind,
            position,
            detail,
        }) => {
            assert_eq!(kind, NodeKind::IdentifierName);
            assert_eq!(position, "x + ".len());
            assert!(
                detail.ends_with("(in ExpressionStatement > BinaryExpression > IdentifierName)"),
                "{detail}"
            );
        }
        other => panic!("expected a precondition violation, got {other:?}"),
    }
}

#[test]
fn lowered_class_has_unique_tokens() {
    let tree = tsdl_parser::parse(
        "class B extends A {\n    x = 1;\n    constructor(public y) { super(); }\n    get z() { return 1; }\n    set z(v) { }\n}\n",
    )
    .expect("parse");
    let lowered = lower(&tree, &LoweringOptions::default()).expect("lower");
    check_invariants(&lowered).expect("invariants hold");
}

#[test]
fn lowered_namespace_and_enum_have_unique_tokens() {
    let tree = tsdl_parser::parse(
        "module A.B.C {\n    export enum E { X, Y = X + 1, Z }\n    export var v = () => this;\n}\n",
    )
    .expect("parse");
    let lowered = lower(&tree, &LoweringOptions::default()).expect("lower");
    check_invariants(&lowered).expect("invariants hold");
}
