//! End-to-end lowering of whole programs.

use tsdl_common::{FormattingOptions, LoweringOptions, NewLineKind};
use tsdl_emitter::{LoweringError, lower};
use tsdl_syntax::{SyntaxNode, ast, check_invariants, is_typescript_specific};

fn parse(source: &str) -> SyntaxNode {
    tsdl_parser::parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
}

fn lower_with(source: &str, options: &LoweringOptions) -> String {
    match lower(&parse(source), options) {
        Ok(lowered) => lowered.full_text(),
        Err(err) => panic!("failed to lower {source:?}: {err}"),
    }
}

fn lower_text(source: &str) -> String {
    lower_with(source, &LoweringOptions::default())
}

const PROGRAM: &str = "\
module Shapes {
    export interface Shape {
        area(): number;
    }

    export enum Kind { Square, Circle }

    export class Square {
        constructor(public side: number) { }
        area() { return this.side * this.side; }
    }
}

var squares = [1, 2].map((n: number) => new Shapes.Square(n));
";

#[test]
fn program_output_is_plain_javascript() {
    let lowered = lower(&parse(PROGRAM), &LoweringOptions::default()).expect("lower");
    assert!(!is_typescript_specific(&lowered));
    check_invariants(&lowered).expect("invariants hold");
}

#[test]
fn program_output_reparses_to_same_text() {
    let text = lower_text(PROGRAM);
    let reparsed = parse(&text);
    assert_eq!(reparsed.full_text(), text);
    assert!(!is_typescript_specific(&reparsed));
}

#[test]
fn program_output_shape() {
    let text = lower_text(PROGRAM);
    assert!(text.starts_with("var Shapes;\n(function (Shapes) {\n"), "{text}");
    assert!(!text.contains("interface"), "{text}");
    assert!(text.contains("    Shapes.Kind = Kind;\n"), "{text}");
    assert!(text.contains("    Shapes.Square = Square;\n"), "{text}");
    assert!(text.contains("this.side = side;"), "{text}");
    assert!(text.contains("Square.prototype.area = function () {"), "{text}");
    assert!(text.contains(".map(function (n) {\n    return new Shapes.Square(n);\n});\n"), "{text}");
    assert!(text.ends_with("})(Shapes || (Shapes = {}));\n\nvar squares = [1, 2].map(function (n) {\n    return new Shapes.Square(n);\n});\n"), "{text}");
}

#[test]
fn javascript_input_is_returned_unchanged() {
    let tree = parse("var x = 1;\nfunction f(a) { return a; }\n");
    let lowered = lower(&tree, &LoweringOptions::default()).expect("lower");
    assert!(lowered.ptr_eq(&tree));
}

#[test]
fn lowering_twice_changes_nothing() {
    let options = LoweringOptions::default();
    let once = lower(&parse(PROGRAM), &options).expect("lower");
    let twice = lower(&once, &options).expect("lower again");
    assert!(twice.ptr_eq(&once));
}

#[test]
fn input_tree_is_not_modified() {
    let tree = parse(PROGRAM);
    let before = tree.full_text();
    lower(&tree, &LoweringOptions::default()).expect("lower");
    assert_eq!(tree.full_text(), before);
}

#[test]
fn crlf_output() {
    let options = LoweringOptions::from(FormattingOptions::new(
        4,
        false,
        NewLineKind::CarriageReturnLineFeed,
    ));
    assert_eq!(
        lower_with("var f = x => x;\r\n", &options),
        "var f = function (x) {\r\n    return x;\r\n};\r\n"
    );
}

#[test]
fn tab_indentation() {
    let options = LoweringOptions::from(FormattingOptions::new(4, true, NewLineKind::LineFeed));
    assert_eq!(
        lower_with("var f = x => x;\n", &options),
        "var f = function (x) {\n\treturn x;\n};\n"
    );
}

#[test]
fn options_from_json() {
    let options = LoweringOptions::from_json(r#"{ "indentSize": 2 }"#).expect("options");
    assert_eq!(
        lower_with("var f = (a, b) => a + b;\n", &options),
        "var f = function (a, b) {\n  return a + b;\n};\n"
    );
}

#[test]
fn helper_needs_a_source_unit_root() {
    let tree = parse("class B extends A {\n}\n");
    let class = ast::SourceUnit::cast(&tree)
        .and_then(|unit| unit.module_elements.nodes().first().cloned())
        .expect("class");
    let options = LoweringOptions {
        emit_helpers: true,
        ..LoweringOptions::default()
    };
    let lowered = lower(&class, &options).expect("lower");
    let text = lowered.full_text();
    assert!(text.starts_with("var B = (function (_super) {"), "{text}");
    assert!(!text.contains("__extends ="), "{text}");
}

#[test]
fn helper_is_emitted_once() {
    let options = LoweringOptions {
        emit_helpers: true,
        ..LoweringOptions::default()
    };
    let text = lower_with("class B extends A {\n}\nclass C extends B {\n}\n", &options);
    assert_eq!(text.matches("var __extends").count(), 1, "{text}");
}

#[test]
fn helper_is_not_emitted_without_derived_class() {
    let options = LoweringOptions {
        emit_helpers: true,
        ..LoweringOptions::default()
    };
    let text = lower_with("class A {\n}\n", &options);
    assert!(!text.contains("__extends"), "{text}");
}

#[test]
fn errors_name_their_rule() {
    let error = LoweringError::InternalLoweringError {
        rule: "class",
        detail: "constructor without a body".to_string(),
        subtree: String::new(),
    };
    assert_eq!(
        error.to_string(),
        "lowering rule `class` failed: constructor without a body"
    );
}
