use super::*;
use tsdl_common::LoweringOptions;

fn lower_text(source: &str) -> String {
    let tree = tsdl_parser::parse(source)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    match crate::lower(&tree, &LoweringOptions::default()) {
        Ok(lowered) => lowered.full_text(),
        Err(err) => panic!("failed to lower {source:?}: {err}"),
    }
}

#[test]
fn variable_annotation_is_dropped() {
    assert_eq!(lower_text("var x: number = 1;\n"), "var x = 1;\n");
}

#[test]
fn annotation_without_initializer() {
    assert_eq!(lower_text("var x: string;\n"), "var x;\n");
}

#[test]
fn cast_keeps_only_the_expression() {
    assert_eq!(lower_text("var y = <number>x;\n"), "var y = x;\n");
}

#[test]
fn export_modifier_is_dropped() {
    assert_eq!(lower_text("export var x = 1;\n"), "var x = 1;\n");
}

#[test]
fn export_comment_is_kept() {
    let lowered = lower_text("export /* api */ var x = 1;\n");
    assert!(lowered.contains("/* api */"), "{lowered}");
    assert!(lowered.contains("var x = 1;"), "{lowered}");
}

#[test]
fn declare_statement_is_removed() {
    assert_eq!(lower_text("declare var x;\nvar y = 1;\n"), "var y = 1;\n");
}

#[test]
fn interface_is_removed() {
    assert_eq!(
        lower_text("interface I {\n    x: number;\n}\nvar a = 1;\n"),
        "var a = 1;\n"
    );
}

#[test]
fn overload_signatures_are_removed() {
    assert_eq!(
        lower_text("function f(x: number): number;\nfunction f(x) { return x; }\n"),
        "function f(x) { return x; }\n"
    );
}

#[test]
fn return_type_is_dropped() {
    assert_eq!(
        lower_text("function g(): number { return 1; }\n"),
        "function g() { return 1; }\n"
    );
}

#[test]
fn optional_and_annotated_parameters() {
    assert_eq!(
        lower_text("function h(a?, b: string) { }\n"),
        "function h(a, b) { }\n"
    );
}

#[test]
fn erased_trailing_trivia_prefers_dropped_part() {
    let kept = TriviaList::EMPTY;
    let dropped = TriviaList::space(" ");
    assert_eq!(erased_trailing_trivia(&kept, &dropped), dropped);
}
