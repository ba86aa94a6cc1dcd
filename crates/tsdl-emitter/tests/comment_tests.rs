//! Comments survive lowering next to the code they describe.

use tsdl_common::LoweringOptions;
use tsdl_emitter::lower;

fn lower_text(source: &str) -> String {
    let tree = tsdl_parser::parse(source)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    match lower(&tree, &LoweringOptions::default()) {
        Ok(lowered) => lowered.full_text(),
        Err(err) => panic!("failed to lower {source:?}: {err}"),
    }
}

#[test]
fn comment_before_class() {
    let text = lower_text("// leading comment\nclass A {\n}\n");
    assert!(text.starts_with("// leading comment\nvar A = (function () {\n"), "{text}");
}

#[test]
fn comment_after_class() {
    let text = lower_text("class A {\n} // end\n");
    assert!(text.ends_with("})(); // end\n"), "{text}");
}

#[test]
fn comment_on_enum_member() {
    let text = lower_text("enum E {\n    A, // first\n    B\n}\n");
    assert!(text.contains("    E._map[E.A = 0] = \"A\"; // first\n"), "{text}");
    assert!(text.contains("    E._map[E.B = 1] = \"B\";\n"), "{text}");
}

#[test]
fn comment_before_method() {
    let text = lower_text("class A {\n    // does m\n    m() { }\n}\n");
    assert!(text.contains("    // does m\n    A.prototype.m = function () { };\n"), "{text}");
}

#[test]
fn comment_before_namespace_member() {
    let text = lower_text("module M {\n    // the answer\n    export var x = 42;\n}\n");
    assert!(text.contains("    // the answer\n    var x = 42;\n"), "{text}");
}

#[test]
fn comment_on_dropped_annotation_is_kept() {
    let text = lower_text("var x /* count */: number = 1;\n");
    assert!(text.contains("/* count */"), "{text}");
    assert!(!text.contains("number"), "{text}");
}

#[test]
fn comment_inside_function_body_is_kept() {
    let text = lower_text("function f(a = 1) {\n    // body\n    return a;\n}\n");
    assert!(text.contains("    // body\n    return a;\n"), "{text}");
}

#[test]
fn comment_before_closing_brace_is_kept() {
    let text = lower_text("class A {\n    m() { }\n    // last\n}\n");
    assert!(text.contains("// last"), "{text}");
}

#[test]
fn comments_after_arrow_move_above_return() {
    let text = lower_text("var f = x => /* double */ x * 2;\n");
    assert!(text.contains("    /* double */\n    return x * 2;\n"), "{text}");
}
