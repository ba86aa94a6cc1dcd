use super::*;
use tsdl_syntax::{NodeKind, SyntaxKind, SyntaxNode, ast};

fn parse_ok(text: &str) -> SyntaxNode {
    match parse(text) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {text:?}: {err}"),
    }
}

fn elements(tree: &SyntaxNode) -> Vec<SyntaxNode> {
    ast::SourceUnit::cast(tree)
        .expect("source unit")
        .module_elements
        .nodes()
        .to_vec()
}

fn only_element(text: &str) -> SyntaxNode {
    let tree = parse_ok(text);
    let mut elements = elements(&tree);
    assert_eq!(elements.len(), 1, "expected one element in {text:?}");
    elements.remove(0)
}

/// Expression of a single expression statement.
fn only_expression(text: &str) -> SyntaxNode {
    let statement = only_element(text);
    ast::ExpressionStatement::cast(&statement)
        .expect("expression statement")
        .expression
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn class_with_members() {
    let class = only_element(
        "class A extends B implements I, J {\n    public x: number = 1;\n    private static y;\n    constructor(public a, b?: string) { super(); }\n    foo(): void {}\n    get p() { return 1; }\n    set p(v) {}\n}\n",
    );
    let class = ast::ClassDeclaration::cast(&class).expect("class");
    assert_eq!(class.identifier.text(), "A");
    assert!(class.extends_clause.is_some());
    let implements = ast::ImplementsClause::cast(class.implements_clause.as_ref().expect("implements"))
        .expect("implements clause");
    assert_eq!(implements.type_names.node_count(), 2);

    let kinds: Vec<NodeKind> = class.class_elements.iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::MemberVariableDeclaration,
            NodeKind::MemberVariableDeclaration,
            NodeKind::ConstructorDeclaration,
            NodeKind::MemberFunctionDeclaration,
            NodeKind::GetMemberAccessorDeclaration,
            NodeKind::SetMemberAccessorDeclaration,
        ]
    );
    let second = ast::MemberVariableDeclaration::cast(&class.class_elements.nodes()[1]).expect("member");
    assert!(second.public_or_private_keyword.is_some());
    assert!(second.static_keyword.is_some());
}

#[test]
fn keyword_named_members_stay_names() {
    let class = only_element("class A { static() {} get: number; }");
    let class = ast::ClassDeclaration::cast(&class).expect("class");
    let method = ast::MemberFunctionDeclaration::cast(&class.class_elements.nodes()[0]).expect("method");
    assert!(method.static_keyword.is_none());
    assert_eq!(method.property_name.text(), "static");
    assert_eq!(method.property_name.kind(), SyntaxKind::IdentifierName);
    assert_eq!(class.class_elements.nodes()[1].kind(), NodeKind::MemberVariableDeclaration);
}

#[test]
fn module_with_dotted_name_and_export_modifiers() {
    let module = only_element("module A.B {\n    export var x = 1;\n    export function f() {}\n}\n");
    let module = ast::ModuleDeclaration::cast(&module).expect("module");
    assert_eq!(module.name.kind(), NodeKind::QualifiedName);
    assert_eq!(module.name.full_text().trim(), "A.B");
    for element in module.module_elements.iter() {
        assert_eq!(element.first_token().map(|t| t.kind()), Some(SyntaxKind::ExportKeyword));
    }
}

#[test]
fn namespace_keyword_is_contextual() {
    assert_eq!(only_element("namespace N { }").kind(), NodeKind::ModuleDeclaration);
    assert_eq!(only_element("module = 1;").kind(), NodeKind::ExpressionStatement);
    assert_eq!(only_element("declare = 2;").kind(), NodeKind::ExpressionStatement);
}

#[test]
fn enum_trailing_comma_becomes_omitted_expression() {
    let declaration = only_element("enum E { A, B = 5, C, }");
    let declaration = ast::EnumDeclaration::cast(&declaration).expect("enum");
    assert_eq!(declaration.enum_elements.node_count(), 4);
    assert_eq!(declaration.enum_elements.separator_count(), 3);
    assert_eq!(
        declaration.enum_elements.nodes()[3].kind(),
        NodeKind::OmittedExpression
    );
}

#[test]
fn ambient_and_overload_declarations() {
    let tree = parse_ok("declare var x: number;\nfunction f(a: string);\nfunction f(a) {}\ndeclare class C {}\n");
    let kinds: Vec<NodeKind> = elements(&tree).iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::VariableStatement,
            NodeKind::FunctionDeclaration,
            NodeKind::FunctionDeclaration,
            NodeKind::ClassDeclaration,
        ]
    );
    let overload = ast::FunctionDeclaration::cast(&elements(&tree)[1]).expect("function");
    assert!(overload.block.is_none());
    assert!(overload.semicolon_token.is_some());
}

#[test]
fn interface_with_every_member_form() {
    let interface = only_element(
        "interface I extends J {\n    a: number;\n    b?(x: string): void;\n    (): I;\n    new (x): I;\n    [key: string]: any\n}\n",
    );
    let interface = ast::InterfaceDeclaration::cast(&interface).expect("interface");
    let body = ast::ObjectType::cast(&interface.body).expect("object type");
    let kinds: Vec<NodeKind> = body.type_members.iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertySignature,
            NodeKind::MethodSignature,
            NodeKind::CallSignatureMember,
            NodeKind::ConstructSignature,
            NodeKind::IndexSignature,
        ]
    );
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn return_without_expression_before_line_break() {
    let function = only_element("function f() {\n    return\n    1;\n}");
    let function = ast::FunctionDeclaration::cast(&function).expect("function");
    let block = ast::Block::cast(function.block.as_ref().expect("block")).expect("block");
    assert_eq!(block.statements.len(), 2);
    let ret = ast::ReturnStatement::cast(&block.statements.nodes()[0]).expect("return");
    assert!(ret.expression.is_none());
    assert!(ret.semicolon_token.is_missing());
}

#[test]
fn for_and_for_in_heads() {
    assert_eq!(only_element("for (var i = 0; i < n; i++) {}").kind(), NodeKind::ForStatement);
    assert_eq!(only_element("for (var k in o) {}").kind(), NodeKind::ForInStatement);
    assert_eq!(only_element("for (k in o) ;").kind(), NodeKind::ForInStatement);
    assert_eq!(only_element("for (;;) break;").kind(), NodeKind::ForStatement);
}

#[test]
fn statement_forms() {
    let tree = parse_ok(
        "if (a) b(); else c();\nwhile (x) x--;\ndo { } while (y)\nswitch (v) { case 1: break; default: }\ntry { } catch (e) { } finally { }\nlabel: for (;;) { continue label; }\nthrow e;\ndebugger;\nwith (o) { }\n;\n",
    );
    let kinds: Vec<NodeKind> = elements(&tree).iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::SwitchStatement,
            NodeKind::TryStatement,
            NodeKind::LabeledStatement,
            NodeKind::ThrowStatement,
            NodeKind::DebuggerStatement,
            NodeKind::WithStatement,
            NodeKind::EmptyStatement,
        ]
    );
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn binary_precedence_and_associativity() {
    let expression = only_expression("a + b * c - d;");
    let outer = ast::BinaryExpression::cast(&expression).expect("binary");
    assert_eq!(outer.operator_token.kind(), SyntaxKind::MinusToken);
    let left = ast::BinaryExpression::cast(&outer.left).expect("binary");
    assert_eq!(left.operator_token.kind(), SyntaxKind::PlusToken);
    assert_eq!(left.right.kind(), NodeKind::BinaryExpression);
}

#[test]
fn assignment_is_right_associative() {
    let expression = only_expression("a = b = c;");
    let outer = ast::BinaryExpression::cast(&expression).expect("binary");
    assert_eq!(outer.left.kind(), NodeKind::IdentifierName);
    assert_eq!(outer.right.kind(), NodeKind::BinaryExpression);
}

#[test]
fn arrow_functions_and_parenthesized_expressions() {
    assert_eq!(
        only_expression("x => x * 2;").kind(),
        NodeKind::SimpleArrowFunctionExpression
    );
    assert_eq!(
        only_expression("(a, b: number): number => { return a; };").kind(),
        NodeKind::ParenthesizedArrowFunctionExpression
    );
    assert_eq!(only_expression("(a);").kind(), NodeKind::ParenthesizedExpression);
    assert_eq!(only_expression("(a + b) * c;").kind(), NodeKind::BinaryExpression);
}

#[test]
fn member_calls_and_new() {
    let expression = only_expression("new A.B(1).c();");
    let call = ast::InvocationExpression::cast(&expression).expect("call");
    let access = ast::MemberAccessExpression::cast(&call.expression).expect("member access");
    let creation = ast::ObjectCreationExpression::cast(&access.expression).expect("new");
    assert_eq!(creation.expression.kind(), NodeKind::MemberAccessExpression);
    assert!(creation.argument_list.is_some());
}

#[test]
fn keyword_after_dot_is_a_name() {
    let expression = only_expression("a.default;");
    let access = ast::MemberAccessExpression::cast(&expression).expect("member access");
    assert_eq!(access.name.kind(), SyntaxKind::IdentifierName);
    assert_eq!(access.name.text(), "default");
}

#[test]
fn array_literal_elisions() {
    let expression = only_expression("[, a, , b, ];");
    let array = ast::ArrayLiteralExpression::cast(&expression).expect("array");
    assert_eq!(array.expressions.separator_count(), 4);
    assert_eq!(array.expressions.node_count(), 5);
    let omitted = array
        .expressions
        .nodes().iter()
        .filter(|node| node.kind() == NodeKind::OmittedExpression)
        .count();
    assert_eq!(omitted, 3);
}

#[test]
fn object_literal_with_accessors() {
    let expression = only_expression("({ a: 1, get b() { return 2; }, set b(v) { }, get: 3 });");
    let paren = ast::ParenthesizedExpression::cast(&expression).expect("paren");
    let object = ast::ObjectLiteralExpression::cast(&paren.expression).expect("object");
    let kinds: Vec<NodeKind> = object
        .property_assignments
        .nodes().iter()
        .map(SyntaxNode::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::SimplePropertyAssignment,
            NodeKind::GetAccessorPropertyAssignment,
            NodeKind::SetAccessorPropertyAssignment,
            NodeKind::SimplePropertyAssignment,
        ]
    );
}

#[test]
fn object_literal_get_accessor_with_return_type() {
    let expression = only_expression("({ get p(): number { return 1; } });");
    let paren = ast::ParenthesizedExpression::cast(&expression).expect("paren");
    let object = ast::ObjectLiteralExpression::cast(&paren.expression).expect("object");
    let accessor = ast::GetAccessorPropertyAssignment::cast(&object.property_assignments.nodes()[0])
        .expect("get accessor");
    let annotation = accessor.type_annotation.expect("return type");
    assert_eq!(annotation.kind(), NodeKind::TypeAnnotation);
    assert_eq!(annotation.full_text().trim(), ": number");
    assert_eq!(accessor.block.kind(), NodeKind::Block);
}

#[test]
fn regex_after_operator() {
    let expression = only_expression("x = /ab+c/g;");
    let binary = ast::BinaryExpression::cast(&expression).expect("binary");
    let literal = ast::LiteralExpression::cast(&binary.right).expect("literal");
    assert_eq!(literal.literal_token.kind(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(literal.literal_token.text(), "/ab+c/g");
}

#[test]
fn cast_expression() {
    let expression = only_expression("<number>x;");
    let cast = ast::CastExpression::cast(&expression).expect("cast");
    assert_eq!(cast.type_node.kind(), NodeKind::PredefinedType);
}

#[test]
fn postfix_requires_same_line() {
    let tree = parse_ok("a\n++b");
    let kinds: Vec<NodeKind> = elements(&tree).iter().map(SyntaxNode::kind).collect();
    assert_eq!(kinds, vec![NodeKind::ExpressionStatement, NodeKind::ExpressionStatement]);
}

#[test]
fn types_in_annotations() {
    let statement = only_element("var f: (a: number) => string[][] = null;");
    let statement = ast::VariableStatement::cast(&statement).expect("var");
    let declaration = ast::VariableDeclaration::cast(&statement.variable_declaration).expect("declaration");
    let declarator = ast::VariableDeclarator::cast(&declaration.variable_declarators.nodes()[0]).expect("declarator");
    let annotation = ast::TypeAnnotation::cast(declarator.type_annotation.as_ref().expect("annotation"))
        .expect("type annotation");
    let function_type = ast::FunctionType::cast(&annotation.type_node).expect("function type");
    assert_eq!(function_type.type_node.kind(), NodeKind::ArrayType);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn reports_first_error_with_offset() {
    let err = parse("var = 1;").expect_err("should fail");
    assert_eq!(err.offset, 4);
    assert!(err.message.contains("identifier"), "{}", err.message);
}

#[test]
fn reports_missing_close_brace() {
    let err = parse("class A {").expect_err("should fail");
    assert!(err.message.contains("'}'"), "{}", err.message);
    assert_eq!(err.position("class A {").line, 0);
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let handle = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(|| {
            let text = format!("x = {}1{};", "(".repeat(5000), ")".repeat(5000));
            parse(&text)
        })
        .expect("spawn parser thread");
    let err = handle.join().expect("parser thread").expect_err("should fail");
    assert!(err.message.contains("too deep"), "{}", err.message);
}

#[test]
fn missing_semicolon_on_same_line_is_an_error() {
    assert!(parse("a b").is_err());
    assert!(parse("a\nb").is_ok());
}
