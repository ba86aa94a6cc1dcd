//! Node and token factory.
//!
//! Builders for the syntax the lowering pass synthesizes. Each builder lays
//! out single spaces the way hand-written code would (`a = b`, `f(a, b)`,
//! `function (x) `); line breaks and indentation are left to the caller,
//! which knows the formatting options.

use crate::ast;
use crate::kind::SyntaxKind;
use crate::node::{SeparatedList, SyntaxList, SyntaxNode};
use crate::token::SyntaxToken;
use crate::trivia::TriviaList;

fn space() -> TriviaList {
    TriviaList::space(" ")
}

pub fn token(kind: SyntaxKind) -> SyntaxToken {
    SyntaxToken::from_kind(kind)
}

/// Token followed by one space.
pub fn token_then_space(kind: SyntaxKind) -> SyntaxToken {
    token(kind).with_trailing_trivia(space())
}

/// Token surrounded by single spaces (binary operators).
pub fn spaced_token(kind: SyntaxKind) -> SyntaxToken {
    token(kind)
        .with_leading_trivia(space())
        .with_trailing_trivia(space())
}

pub fn identifier(name: &str) -> SyntaxToken {
    SyntaxToken::identifier(name)
}

/// `name` as an expression.
pub fn identifier_name(name: &str) -> SyntaxNode {
    name_expression(identifier(name))
}

/// An identifier token as an expression.
pub fn name_expression(identifier: SyntaxToken) -> SyntaxNode {
    ast::IdentifierName { identifier }.build()
}

pub fn this_expression() -> SyntaxNode {
    ast::ThisExpression {
        this_keyword: token(SyntaxKind::ThisKeyword),
    }
    .build()
}

pub fn literal(literal_token: SyntaxToken) -> SyntaxNode {
    ast::LiteralExpression { literal_token }.build()
}

/// Double-quoted string literal with `value` as its content.
pub fn string_literal(value: &str) -> SyntaxNode {
    let mut text = String::with_capacity(value.len() + 2);
    text.push('"');
    for ch in value.chars() {
        match ch {
            '"' => text.push_str("\\\""),
            '\\' => text.push_str("\\\\"),
            '\n' => text.push_str("\\n"),
            '\r' => text.push_str("\\r"),
            _ => text.push(ch),
        }
    }
    text.push('"');
    literal(SyntaxToken::string_literal(&text))
}

pub fn numeric_literal(text: &str) -> SyntaxNode {
    literal(SyntaxToken::numeric_literal(text))
}

pub fn keyword_literal(kind: SyntaxKind) -> SyntaxNode {
    literal(token(kind))
}

/// `expression.name`
pub fn member_access(expression: SyntaxNode, name: SyntaxToken) -> SyntaxNode {
    ast::MemberAccessExpression {
        expression,
        dot_token: token(SyntaxKind::DotToken),
        name: name.to_identifier_name(),
    }
    .build()
}

/// `expression.a.b.c` for `names = ["a", "b", "c"]`.
pub fn member_access_path(expression: SyntaxNode, names: &[&str]) -> SyntaxNode {
    names
        .iter()
        .fold(expression, |acc, name| member_access(acc, identifier(name)))
}

/// `expression[argument]`
pub fn element_access(expression: SyntaxNode, argument_expression: SyntaxNode) -> SyntaxNode {
    ast::ElementAccessExpression {
        expression,
        open_bracket_token: token(SyntaxKind::OpenBracketToken),
        argument_expression,
        close_bracket_token: token(SyntaxKind::CloseBracketToken),
    }
    .build()
}

/// `(a, b, c)`
pub fn argument_list(arguments: Vec<SyntaxNode>) -> SyntaxNode {
    ast::ArgumentList {
        open_paren_token: token(SyntaxKind::OpenParenToken),
        arguments: SeparatedList::comma_separated(arguments),
        close_paren_token: token(SyntaxKind::CloseParenToken),
    }
    .build()
}

/// `expression(arguments)`
pub fn invocation(expression: SyntaxNode, arguments: Vec<SyntaxNode>) -> SyntaxNode {
    ast::InvocationExpression {
        expression,
        argument_list: argument_list(arguments),
    }
    .build()
}

/// `left <op> right` with single spaces around the operator.
pub fn binary(left: SyntaxNode, operator: SyntaxKind, right: SyntaxNode) -> SyntaxNode {
    ast::BinaryExpression {
        left,
        operator_token: spaced_token(operator),
        right,
    }
    .build()
}

/// `left = right`
pub fn assignment(left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
    binary(left, SyntaxKind::EqualsToken, right)
}

/// `<op>operand`; keyword operators get a trailing space (`typeof x`).
pub fn prefix_unary(operator: SyntaxKind, operand: SyntaxNode) -> SyntaxNode {
    let operator_token = if operator.is_keyword() {
        token_then_space(operator)
    } else {
        token(operator)
    };
    ast::PrefixUnaryExpression {
        operator_token,
        operand,
    }
    .build()
}

/// `operand<op>`
pub fn postfix_unary(operand: SyntaxNode, operator: SyntaxKind) -> SyntaxNode {
    ast::PostfixUnaryExpression {
        operand,
        operator_token: token(operator),
    }
    .build()
}

/// `[a, b]`
pub fn array_literal(expressions: Vec<SyntaxNode>) -> SyntaxNode {
    ast::ArrayLiteralExpression {
        open_bracket_token: token(SyntaxKind::OpenBracketToken),
        expressions: SeparatedList::comma_separated(expressions),
        close_bracket_token: token(SyntaxKind::CloseBracketToken),
    }
    .build()
}

pub fn parenthesized(expression: SyntaxNode) -> SyntaxNode {
    ast::ParenthesizedExpression {
        open_paren_token: token(SyntaxKind::OpenParenToken),
        expression,
        close_paren_token: token(SyntaxKind::CloseParenToken),
    }
    .build()
}

/// `expression;`
pub fn expression_statement(expression: SyntaxNode) -> SyntaxNode {
    ast::ExpressionStatement {
        expression,
        semicolon_token: token(SyntaxKind::SemicolonToken),
    }
    .build()
}

/// `return expression;` or `return;`
pub fn return_statement(expression: Option<SyntaxNode>) -> SyntaxNode {
    let return_keyword = if expression.is_some() {
        token_then_space(SyntaxKind::ReturnKeyword)
    } else {
        token(SyntaxKind::ReturnKeyword)
    };
    ast::ReturnStatement {
        return_keyword,
        expression,
        semicolon_token: token(SyntaxKind::SemicolonToken),
    }
    .build()
}

pub fn equals_value_clause(value: SyntaxNode) -> SyntaxNode {
    ast::EqualsValueClause {
        equals_token: spaced_token(SyntaxKind::EqualsToken),
        value,
    }
    .build()
}

/// `var name = initializer` without the semicolon (for-loop heads).
pub fn variable_declaration(name: SyntaxToken, initializer: Option<SyntaxNode>) -> SyntaxNode {
    let declarator = ast::VariableDeclarator {
        identifier: name,
        type_annotation: None,
        equals_value_clause: initializer.map(equals_value_clause),
    }
    .build();
    ast::VariableDeclaration {
        var_keyword: token_then_space(SyntaxKind::VarKeyword),
        variable_declarators: SeparatedList::new(vec![declarator], Vec::new()),
    }
    .build()
}

/// `var name = initializer;` or `var name;`
pub fn variable_statement(name: SyntaxToken, initializer: Option<SyntaxNode>) -> SyntaxNode {
    ast::VariableStatement {
        export_keyword: None,
        declare_keyword: None,
        variable_declaration: variable_declaration(name, initializer),
        semicolon_token: token(SyntaxKind::SemicolonToken),
    }
    .build()
}

pub fn parameter(identifier: SyntaxToken) -> SyntaxNode {
    ast::Parameter {
        dot_dot_dot_token: None,
        public_or_private_keyword: None,
        identifier,
        question_token: None,
        type_annotation: None,
        equals_value_clause: None,
    }
    .build()
}

/// `(a, b)`
pub fn parameter_list(parameters: Vec<SyntaxNode>) -> SyntaxNode {
    ast::ParameterList {
        open_paren_token: token(SyntaxKind::OpenParenToken),
        parameters: SeparatedList::comma_separated(parameters),
        close_paren_token: token(SyntaxKind::CloseParenToken),
    }
    .build()
}

pub fn call_signature(parameter_list: SyntaxNode) -> SyntaxNode {
    ast::CallSignature {
        parameter_list,
        type_annotation: None,
    }
    .build()
}

/// `{ statements }` with the given brace tokens.
pub fn block(
    open_brace_token: SyntaxToken,
    statements: Vec<SyntaxNode>,
    close_brace_token: SyntaxToken,
) -> SyntaxNode {
    ast::Block {
        open_brace_token,
        statements: SyntaxList::new(statements),
        close_brace_token,
    }
    .build()
}

/// `function (parameters) block`
///
/// The parameter list's closing paren gets a trailing space unless it
/// already carries trailing trivia.
pub fn function_expression(parameter_list: SyntaxNode, block: SyntaxNode) -> SyntaxNode {
    ast::FunctionExpression {
        function_keyword: token_then_space(SyntaxKind::FunctionKeyword),
        identifier: None,
        call_signature: call_signature(space_after(parameter_list)),
        block,
    }
    .build()
}

/// `function name(parameters) block`
pub fn function_declaration(
    identifier: SyntaxToken,
    parameter_list: SyntaxNode,
    block: SyntaxNode,
) -> SyntaxNode {
    ast::FunctionDeclaration {
        export_keyword: None,
        declare_keyword: None,
        function_keyword: token_then_space(SyntaxKind::FunctionKeyword),
        identifier,
        call_signature: call_signature(space_after(parameter_list)),
        block: Some(block),
        semicolon_token: None,
    }
    .build()
}

fn space_after(node: SyntaxNode) -> SyntaxNode {
    if node.trailing_trivia().full_width() > 0 {
        node
    } else {
        node.with_trailing_trivia(space())
    }
}

/// `name: expression`
pub fn property_assignment(name: SyntaxToken, expression: SyntaxNode) -> SyntaxNode {
    ast::SimplePropertyAssignment {
        property_name: name.to_identifier_name(),
        colon_token: token_then_space(SyntaxKind::ColonToken),
        expression,
    }
    .build()
}

/// `{ a: b, c: d }` with the given braces and separators.
pub fn object_literal(
    open_brace_token: SyntaxToken,
    property_assignments: SeparatedList,
    close_brace_token: SyntaxToken,
) -> SyntaxNode {
    ast::ObjectLiteralExpression {
        open_brace_token,
        property_assignments,
        close_brace_token,
    }
    .build()
}

/// `{}`
pub fn empty_object_literal() -> SyntaxNode {
    object_literal(
        token(SyntaxKind::OpenBraceToken),
        SeparatedList::empty(),
        token(SyntaxKind::CloseBraceToken),
    )
}

/// `if (condition) statement` with no else.
pub fn if_statement(condition: SyntaxNode, statement: SyntaxNode) -> SyntaxNode {
    ast::IfStatement {
        if_keyword: token_then_space(SyntaxKind::IfKeyword),
        open_paren_token: token(SyntaxKind::OpenParenToken),
        condition,
        close_paren_token: token_then_space(SyntaxKind::CloseParenToken),
        statement,
        else_clause: None,
    }
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_render_conventional_spacing() {
        let call = invocation(
            member_access_path(identifier_name("_super"), &["prototype", "foo", "call"]),
            vec![this_expression(), identifier_name("a")],
        );
        assert_eq!(call.full_text(), "_super.prototype.foo.call(this, a)");

        let statement = expression_statement(assignment(
            member_access(this_expression(), identifier("x")),
            identifier_name("x"),
        ));
        assert_eq!(statement.full_text(), "this.x = x;");
    }

    #[test]
    fn variable_statement_forms() {
        assert_eq!(variable_statement(identifier("E"), None).full_text(), "var E;");
        assert_eq!(
            variable_statement(identifier("x"), Some(numeric_literal("1"))).full_text(),
            "var x = 1;"
        );
    }

    #[test]
    fn loop_pieces() {
        let increment = postfix_unary(identifier_name("_i"), SyntaxKind::PlusPlusToken);
        assert_eq!(increment.full_text(), "_i++");
        assert_eq!(array_literal(Vec::new()).full_text(), "[]");
        assert_eq!(
            variable_declaration(identifier("_i"), Some(numeric_literal("0"))).full_text(),
            "var _i = 0"
        );
    }

    #[test]
    fn string_literal_escapes_quotes() {
        assert_eq!(string_literal("a\"b").full_text(), "\"a\\\"b\"");
    }

    #[test]
    fn typeof_gets_space() {
        let check = binary(
            prefix_unary(SyntaxKind::TypeOfKeyword, identifier_name("p")),
            SyntaxKind::EqualsEqualsEqualsToken,
            string_literal("undefined"),
        );
        assert_eq!(check.full_text(), "typeof p === \"undefined\"");
    }
}
