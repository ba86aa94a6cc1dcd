use super::*;
use tsdl_common::LoweringOptions;

fn lower_with(source: &str, options: &LoweringOptions) -> String {
    let tree = tsdl_parser::parse(source)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    match crate::lower(&tree, options) {
        Ok(lowered) => lowered.full_text(),
        Err(err) => panic!("failed to lower {source:?}: {err}"),
    }
}

fn lower_text(source: &str) -> String {
    lower_with(source, &LoweringOptions::default())
}

// =============================================================================
// Class shape
// =============================================================================

#[test]
fn class_with_method() {
    assert_eq!(
        lower_text("class A {\n    m() { return 1; }\n}\n"),
        "var A = (function () {\n    function A() {\n    }\n    A.prototype.m = function () { return 1; };\n    return A;\n})();\n"
    );
}

#[test]
fn derived_class_without_constructor() {
    assert_eq!(
        lower_text("class B extends A {\n}\n"),
        "var B = (function (_super) {\n    __extends(B, _super);\n    function B() {\n        _super.apply(this, arguments);\n    }\n    return B;\n})(A);\n"
    );
}

#[test]
fn derived_class_emits_helper_on_request() {
    let options = LoweringOptions {
        emit_helpers: true,
        ..LoweringOptions::default()
    };
    let lowered = lower_with("class B extends A {\n}\n", &options);
    assert!(
        lowered.starts_with("var __extends = this.__extends || function (d, b) {\n"),
        "{lowered}"
    );
    assert!(lowered.contains("var B = (function (_super) {"), "{lowered}");
}

#[test]
fn qualified_base_class() {
    let lowered = lower_text("class B extends M.A {\n}\n");
    assert!(lowered.ends_with("})(M.A);\n"), "{lowered}");
}

#[test]
fn declared_class_is_removed() {
    assert_eq!(lower_text("declare class A {\n}\nvar x = 1;\n"), "var x = 1;\n");
}

#[test]
fn exported_class_loses_modifier() {
    let lowered = lower_text("export class A {\n}\n");
    assert!(lowered.starts_with("var A = (function () {\n"), "{lowered}");
}

// =============================================================================
// Constructor
// =============================================================================

#[test]
fn parameter_properties_are_assigned() {
    let lowered = lower_text("class P {\n    constructor(public x: number) { }\n}\n");
    assert!(
        lowered.contains("    function P(x) {\n        this.x = x;\n    }\n"),
        "{lowered}"
    );
}

#[test]
fn super_call_comes_first_in_constructor() {
    let lowered = lower_text(
        "class B extends A {\n    y = 2;\n    constructor(public x) {\n        super(x);\n    }\n}\n",
    );
    let call = lowered.find("_super.call(this, x);").expect("super call");
    let property = lowered.find("this.x = x;").expect("parameter property");
    let field = lowered.find("this.y = 2;").expect("field");
    assert!(call < property && property < field, "{lowered}");
}

#[test]
fn instance_fields_go_to_synthesized_constructor() {
    let lowered = lower_text("class C {\n    x = 1;\n    static y = 2;\n}\n");
    assert!(lowered.contains("        this.x = 1;\n"), "{lowered}");
    assert!(lowered.contains("    C.y = 2;\n"), "{lowered}");
}

#[test]
fn field_without_initializer_emits_nothing() {
    let lowered = lower_text("class C {\n    x: number;\n}\n");
    assert!(!lowered.contains("this.x"), "{lowered}");
}

#[test]
fn arrow_in_method_captures_this() {
    let lowered = lower_text("class A {\n    m() {\n        return () => this.v;\n    }\n}\n");
    assert!(lowered.contains("var _this = this;"), "{lowered}");
    assert!(lowered.contains("return _this.v;"), "{lowered}");
}

// =============================================================================
// Members
// =============================================================================

#[test]
fn static_method_is_assigned_to_constructor() {
    let lowered = lower_text("class A {\n    static s() { }\n}\n");
    assert!(lowered.contains("    A.s = function () { };\n"), "{lowered}");
}

#[test]
fn string_named_method_uses_element_access() {
    let lowered = lower_text("class A {\n    \"a b\"() { }\n}\n");
    assert!(lowered.contains("A.prototype[\"a b\"] = function () { };"), "{lowered}");
}

#[test]
fn accessor_pair_becomes_one_property() {
    let lowered = lower_text("class C {\n    get x() { return 1; }\n    set x(v) { }\n}\n");
    assert!(
        lowered.contains(
            "    Object.defineProperty(C.prototype, \"x\", {\n        get: function () { return 1; },\n        set: function (v) { },\n        enumerable: true,\n        configurable: true\n    });\n"
        ),
        "{lowered}"
    );
    assert_eq!(lowered.matches("Object.defineProperty").count(), 1);
}

#[test]
fn static_accessor_targets_constructor() {
    let lowered = lower_text("class C {\n    static get x() { return 1; }\n}\n");
    assert!(lowered.contains("Object.defineProperty(C, \"x\", {"), "{lowered}");
}

#[test]
fn member_order_is_kept() {
    let lowered = lower_text("class A {\n    b() { }\n    a() { }\n}\n");
    let b = lowered.find("A.prototype.b").expect("b");
    let a = lowered.find("A.prototype.a").expect("a");
    assert!(b < a, "{lowered}");
}

#[test]
fn accessor_keys_separate_static_members() {
    let tree = tsdl_parser::parse("class C {\n    get x() { return 1; }\n    static get x() { return 2; }\n}\n")
        .expect("parse");
    let class = ast::SourceUnit::cast(&tree)
        .and_then(|unit| unit.module_elements.nodes().first().cloned())
        .and_then(|node| ast::ClassDeclaration::cast(&node))
        .expect("class");
    let keys: Vec<_> = class
        .class_elements
        .iter()
        .filter_map(accessor_key)
        .map(|(key, _)| key)
        .collect();
    assert_eq!(
        keys,
        [("x".to_string(), false), ("x".to_string(), true)]
    );
}
