use super::*;
use crate::factory;
use crate::trivia::{SyntaxTrivia, TriviaList};

fn call_statement() -> SyntaxNode {
    factory::expression_statement(factory::invocation(
        factory::identifier_name("f"),
        vec![factory::identifier_name("a"), factory::identifier_name("b")],
    ))
    .with_leading_trivia(TriviaList::space("    "))
    .with_trailing_trivia(TriviaList::single(SyntaxTrivia::new_line("\n")))
}

#[test]
fn test_children_carry_full_start_offsets() {
    let root = SyntaxCursor::root(call_statement());
    assert_eq!(root.node().full_text(), "    f(a, b);\n");
    assert_eq!(root.full_start(), 0);
    assert_eq!(root.full_end(), "    f(a, b);\n".len());

    let invocation = &root.children()[0];
    assert_eq!(invocation.kind(), NodeKind::InvocationExpression);
    let children = invocation.children();
    assert_eq!(children[0].kind(), NodeKind::IdentifierName);
    assert_eq!(children[0].full_start(), 0);
    assert_eq!(children[1].kind(), NodeKind::ArgumentList);
    assert_eq!(children[1].full_start(), "    f".len());

    let arguments = children[1].children();
    let starts: Vec<usize> = arguments.iter().map(SyntaxCursor::full_start).collect();
    assert_eq!(starts, vec!["    f(".len(), "    f(a, ".len()]);
}

#[test]
fn test_found_cursor_reaches_its_ancestors() {
    let root = SyntaxCursor::root(call_statement());
    let offset = "    f(a, ".len();
    let found = root
        .find(&mut |cursor| cursor.full_start() == offset && cursor.kind() == NodeKind::IdentifierName)
        .expect("argument b");
    assert_eq!(found.node().full_text(), "b");

    let kinds: Vec<NodeKind> = found.ancestors().map(SyntaxCursor::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ArgumentList,
            NodeKind::InvocationExpression,
            NodeKind::ExpressionStatement,
        ]
    );
    assert!(found.ancestors().last().is_some_and(|top| top.node().ptr_eq(root.node())));
    assert_eq!(
        found.path(),
        "ExpressionStatement > InvocationExpression > ArgumentList > IdentifierName"
    );
}

#[test]
fn test_root_has_no_parent() {
    let root = SyntaxCursor::root(call_statement());
    assert!(root.parent().is_none());
    assert_eq!(root.ancestors().count(), 0);
    assert_eq!(root.path(), "ExpressionStatement");
}

#[test]
fn test_shared_node_gets_one_cursor_per_position() {
    let shared = factory::identifier_name("x");
    let statement = factory::expression_statement(factory::invocation(
        factory::identifier_name("f"),
        vec![shared.clone(), shared],
    ));
    let root = SyntaxCursor::root(statement);
    let mut starts = Vec::new();
    root.find(&mut |cursor| {
        if cursor.node().full_text() == "x" {
            starts.push(cursor.full_start());
        }
        false
    });
    assert_eq!(starts, vec!["f(".len(), "f(x, ".len()]);
}

#[test]
fn test_innermost_picks_deepest_cursor_of_kind() {
    let root = SyntaxCursor::root(call_statement());
    let offset = "    f(a, ".len();
    let argument = root
        .innermost(offset, NodeKind::IdentifierName)
        .expect("identifier at offset");
    assert_eq!(argument.node().full_text(), "b");
    let list = root
        .innermost(offset, NodeKind::ArgumentList)
        .expect("argument list");
    assert_eq!(list.full_start(), "    f".len());
    assert!(root.innermost(offset, NodeKind::ReturnStatement).is_none());
    assert!(root.innermost(1_000, NodeKind::IdentifierName).is_none());
}
