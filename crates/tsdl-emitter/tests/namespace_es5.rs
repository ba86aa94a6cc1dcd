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
fn module_with_exported_variable() {
    assert_eq!(
        lower_text("module M {\n    export var x = 1;\n}\n"),
        "var M;\n(function (M) {\n    var x = 1;\n    M.x = x;\n})(M || (M = {}));\n"
    );
}

#[test]
fn qualified_name_nests_wrappers() {
    assert_eq!(
        lower_text("module A.B {\n    export function f() { }\n}\n"),
        "var A;\n(function (A) {\n    var B;\n    (function (B) {\n        function f() { }\n        B.f = f;\n    })(B = A.B || (A.B = {}));\n    A.B = B;\n})(A || (A = {}));\n"
    );
}

#[test]
fn namespace_keyword_is_accepted() {
    let lowered = lower_text("namespace N {\n    var y = 2;\n}\n");
    assert!(lowered.starts_with("var N;\n(function (N) {\n    var y = 2;\n"), "{lowered}");
    assert!(!lowered.contains("N.y"), "{lowered}");
}

#[test]
fn empty_module_is_removed() {
    assert_eq!(lower_text("module M {\n}\nvar b = 2;\n"), "var b = 2;\n");
}

#[test]
fn module_of_only_types_is_removed() {
    assert_eq!(
        lower_text("module M {\n    interface I { }\n}\nvar b = 2;\n"),
        "var b = 2;\n"
    );
}

#[test]
fn string_named_module_is_removed() {
    assert_eq!(
        lower_text("module \"m\" {\n    var a = 1;\n}\nvar b = 2;\n"),
        "var b = 2;\n"
    );
}

#[test]
fn declared_module_is_removed() {
    assert_eq!(
        lower_text("declare module M {\n    var a;\n}\nvar b = 2;\n"),
        "var b = 2;\n"
    );
}

#[test]
fn exported_class_and_enum_are_published() {
    let lowered = lower_text(
        "module M {\n    export class C {\n    }\n    export enum E { A }\n}\n",
    );
    assert!(lowered.contains("    var C = (function () {\n"), "{lowered}");
    assert!(lowered.contains("    M.C = C;\n"), "{lowered}");
    assert!(lowered.contains("    M.E = E;\n"), "{lowered}");
}

#[test]
fn nested_module_is_published_by_first_name() {
    let lowered = lower_text("module O {\n    export module I {\n        var z = 0;\n    }\n}\n");
    assert!(lowered.contains("    O.I = I;\n"), "{lowered}");
    assert!(lowered.contains("        var z = 0;\n"), "{lowered}");
}

#[test]
fn exported_names_cover_declarators() {
    let tree = tsdl_parser::parse("export var a = 1, b;\n").expect("parse");
    let element = ast::SourceUnit::cast(&tree)
        .and_then(|unit| unit.module_elements.nodes().first().cloned())
        .expect("statement");
    let names: Vec<_> = exported_names(&element)
        .iter()
        .map(|name| name.text().to_string())
        .collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn unexported_names_are_private() {
    let tree = tsdl_parser::parse("function f() { }\n").expect("parse");
    let element = ast::SourceUnit::cast(&tree)
        .and_then(|unit| unit.module_elements.nodes().first().cloned())
        .expect("statement");
    assert!(exported_names(&element).is_empty());
}
