//! Public-API tests for the tree model: equality, invariants and trivia laws.

use tsdl_syntax::factory;
use tsdl_syntax::{
    EqualityOptions, SyntaxKind, SyntaxTrivia, TriviaKind, TriviaList, check_invariants,
    is_typescript_specific, nodes_structurally_equal,
};

fn comment(text: &str) -> TriviaList {
    TriviaList::single(SyntaxTrivia::new(TriviaKind::MultiLineComment, text))
}

#[test]
fn trivia_concat_preserves_full_text() {
    let lists = [
        TriviaList::EMPTY,
        TriviaList::space(" "),
        comment("/* a */"),
        TriviaList::new(vec![
            SyntaxTrivia::whitespace("\t"),
            SyntaxTrivia::new_line("\r\n"),
        ]),
    ];
    for left in &lists {
        for right in &lists {
            let merged = left.concat(right);
            assert_eq!(merged.full_text(), left.full_text() + &right.full_text());
            assert_eq!(merged.count(), left.count() + right.count());
            assert_eq!(merged.has_comment(), left.has_comment() || right.has_comment());
        }
    }
}

#[test]
fn structural_equality_ignores_identity_and_whitespace_by_default() {
    let a = factory::expression_statement(factory::assignment(
        factory::identifier_name("x"),
        factory::numeric_literal("1"),
    ));
    let b = a.with_leading_trivia(TriviaList::space("    "));
    assert!(nodes_structurally_equal(&a, &b, EqualityOptions::default()));
    assert!(!nodes_structurally_equal(
        &a,
        &b,
        EqualityOptions {
            require_same_offsets: true,
            compare_comments: false,
        }
    ));
}

#[test]
fn structural_equality_can_compare_comments() {
    let base = factory::identifier_name("x");
    let commented = base.with_trailing_trivia(comment("/* note */"));
    let other = base.with_trailing_trivia(comment("/* other */"));
    let options = EqualityOptions {
        require_same_offsets: false,
        compare_comments: true,
    };
    assert!(nodes_structurally_equal(&commented, &commented.clone(), options));
    assert!(!nodes_structurally_equal(&commented, &other, options));
    assert!(nodes_structurally_equal(&commented, &other, EqualityOptions::default()));
}

#[test]
fn factory_output_satisfies_invariants() {
    let statement = factory::if_statement(
        factory::binary(
            factory::prefix_unary(SyntaxKind::TypeOfKeyword, factory::identifier_name("p")),
            SyntaxKind::EqualsEqualsEqualsToken,
            factory::string_literal("undefined"),
        ),
        factory::block(
            factory::token(SyntaxKind::OpenBraceToken),
            vec![factory::expression_statement(factory::assignment(
                factory::identifier_name("p"),
                factory::numeric_literal("0"),
            ))],
            factory::token(SyntaxKind::CloseBraceToken),
        ),
    );
    assert_eq!(
        statement.full_text(),
        "if (typeof p === \"undefined\") {p = 0;}"
    );
    assert!(check_invariants(&statement).is_ok());
    assert!(!is_typescript_specific(&statement));
}
