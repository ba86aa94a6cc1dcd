use super::*;
use tsdl_common::NewLineKind;
use tsdl_syntax::{TriviaKind, ast};

fn first_element(source: &str) -> SyntaxNode {
    let tree = match tsdl_parser::parse(source) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    };
    ast::SourceUnit::cast(&tree)
        .and_then(|unit| unit.module_elements.nodes().first().cloned())
        .expect("one module element")
}

fn comment(text: &str) -> SyntaxTrivia {
    let kind = if text.starts_with("//") {
        TriviaKind::SingleLineComment
    } else {
        TriviaKind::MultiLineComment
    };
    SyntaxTrivia::new(kind, text)
}

fn spaces() -> FormattingOptions {
    FormattingOptions::default()
}

// =============================================================================
// change_indentation
// =============================================================================

#[test]
fn indent_moves_every_line_after_the_first() {
    let function = first_element("function f() {\n    return 1;\n}\n");
    let shifted = change_indentation(&function, false, 4, &spaces()).unwrap();
    assert_eq!(shifted.full_text(), "function f() {\n        return 1;\n    }\n");
}

#[test]
fn indent_including_first_token() {
    let statement = first_element("var x = 1;\n");
    let shifted = change_indentation(&statement, true, 2, &spaces()).unwrap();
    assert_eq!(shifted.full_text(), "  var x = 1;\n");
}

#[test]
fn zero_delta_returns_same_node() {
    let function = first_element("function f() {\n    return 1;\n}\n");
    let shifted = change_indentation(&function, true, 0, &spaces()).unwrap();
    assert!(shifted.ptr_eq(&function));
}

#[test]
fn dedent_stops_at_one_level() {
    let function = first_element("function f() {\n        return 1;\n    }\n");
    let shifted = change_indentation(&function, false, -8, &spaces()).unwrap();
    // `return` stops at the floor; `}` already sits on it and stays.
    assert_eq!(shifted.full_text(), "function f() {\n    return 1;\n    }\n");
}

#[test]
fn dedent_to_a_given_minimum_column() {
    let function = first_element("function f() {\n        return 1;\n    }\n");
    let shifted = change_indentation_to_minimum(&function, false, -8, 0, &spaces()).unwrap();
    assert_eq!(shifted.full_text(), "function f() {\nreturn 1;\n}\n");
}

#[test]
fn lines_at_the_minimum_column_stay_put() {
    let function = first_element("function f() {\n  a();\n        return 1;\n}\n");
    let shifted = change_indentation_to_minimum(&function, false, -4, 2, &spaces()).unwrap();
    assert_eq!(shifted.full_text(), "function f() {\n  a();\n    return 1;\n}\n");
}

#[test]
fn single_line_node_is_unchanged() {
    let statement = first_element("var x = 1;");
    let shifted = change_indentation(&statement, false, 4, &spaces()).unwrap();
    assert_eq!(shifted.full_text(), "var x = 1;");
}

#[test]
fn indent_with_tabs() {
    let options = FormattingOptions::new(4, true, NewLineKind::LineFeed);
    let function = first_element("function f() {\n\treturn 1;\n}\n");
    let shifted = change_indentation(&function, false, 4, &options).unwrap();
    assert_eq!(shifted.full_text(), "function f() {\n\t\treturn 1;\n\t}\n");
}

#[test]
fn comment_lines_move_with_the_code() {
    let function = first_element("function f() {\n    // note\n    return 1;\n}\n");
    let shifted = change_indentation(&function, false, 2, &spaces()).unwrap();
    assert_eq!(
        shifted.full_text(),
        "function f() {\n      // note\n      return 1;\n  }\n"
    );
}

// =============================================================================
// Trivia builders
// =============================================================================

#[test]
fn shift_leading_trivia_adds_indentation_for_the_token() {
    let trivia = TriviaList::new(vec![
        SyntaxTrivia::whitespace("    "),
        comment("// c"),
        SyntaxTrivia::new_line("\n"),
    ]);
    let shifted = shift_leading_trivia(&trivia, 4, &spaces());
    assert_eq!(shifted.full_text(), "        // c\n    ");
    assert_eq!(shift_leading_trivia(&trivia, 0, &spaces()), trivia);
}

#[test]
fn relocated_trivia_reindents_comment_lines() {
    let trivia = TriviaList::new(vec![
        SyntaxTrivia::whitespace("  "),
        comment("// c"),
        SyntaxTrivia::new_line("\n"),
        SyntaxTrivia::whitespace("  "),
    ]);
    let relocated = relocated_leading_trivia(&trivia, 4, &spaces());
    assert_eq!(relocated.full_text(), "    // c\n    ");
}

#[test]
fn relocated_empty_trivia_is_just_indentation() {
    let relocated = relocated_leading_trivia(&TriviaList::EMPTY, 8, &spaces());
    assert_eq!(relocated.full_text(), "        ");
    assert!(relocated_leading_trivia(&TriviaList::EMPTY, 0, &spaces()).is_empty());
}

#[test]
fn trailing_new_line_is_ensured_once() {
    let options = spaces();
    assert_eq!(
        ensure_trailing_new_line(&TriviaList::space(" "), &options).full_text(),
        "\n"
    );
    let with_comment = TriviaList::new(vec![
        SyntaxTrivia::whitespace(" "),
        comment("/* c */"),
        SyntaxTrivia::whitespace(" "),
    ]);
    assert_eq!(
        ensure_trailing_new_line(&with_comment, &options).full_text(),
        " /* c */\n"
    );
    let ended = TriviaList::new(vec![
        SyntaxTrivia::whitespace(" "),
        comment("// c"),
        SyntaxTrivia::new_line("\n"),
    ]);
    assert_eq!(ensure_trailing_new_line(&ended, &options), ended);
}

#[test]
fn crlf_new_lines_follow_options() {
    let options = FormattingOptions::new(4, false, NewLineKind::CarriageReturnLineFeed);
    assert_eq!(new_line_trivia(&options).full_text(), "\r\n");
    assert_eq!(
        ensure_trailing_new_line(&TriviaList::EMPTY, &options).full_text(),
        "\r\n"
    );
}

#[test]
fn comments_become_their_own_lines() {
    let trivia = TriviaList::new(vec![
        SyntaxTrivia::whitespace(" "),
        comment("/* a */"),
        SyntaxTrivia::whitespace(" "),
        comment("// b"),
    ]);
    assert_eq!(
        comment_lines(&trivia, 2, &spaces()).full_text(),
        "  /* a */\n  // b\n  "
    );
    assert_eq!(comment_lines(&TriviaList::space(" "), 2, &spaces()).full_text(), "  ");
}

#[test]
fn trailing_comment_line_keeps_only_comments() {
    let trivia = TriviaList::new(vec![
        SyntaxTrivia::whitespace("   "),
        comment("// c"),
        SyntaxTrivia::new_line("\n"),
    ]);
    assert_eq!(trailing_comment_line(&trivia, &spaces()).full_text(), " // c\n");
    assert_eq!(trailing_comment_line(&TriviaList::EMPTY, &spaces()).full_text(), "\n");
}

#[test]
fn split_leading_trivia_at_last_new_line() {
    let trivia = TriviaList::new(vec![
        comment("// c"),
        SyntaxTrivia::new_line("\n"),
        SyntaxTrivia::whitespace("    "),
    ]);
    let (head, tail) = split_leading_trivia(&trivia);
    assert_eq!(head.full_text(), "// c\n");
    assert_eq!(tail.full_text(), "    ");

    let (head, tail) = split_leading_trivia(&TriviaList::space("  "));
    assert!(head.is_empty());
    assert_eq!(tail.full_text(), "  ");
}
