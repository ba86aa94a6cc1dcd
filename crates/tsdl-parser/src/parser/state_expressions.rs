//! Parser state - expression parsing methods

use super::ParseError;
use super::state::ParserState;
use tsdl_syntax::{SeparatedList, SyntaxKind, SyntaxNode, ast};

/// Binding power of a binary operator; 0 for tokens that are not one.
fn binary_precedence(kind: SyntaxKind, allow_in: bool) -> u8 {
    match kind {
        SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 6,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword => 7,
        SyntaxKind::InKeyword if allow_in => 7,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        _ => 0,
    }
}

impl ParserState<'_> {
    // =========================================================================
    // Expression entry points
    // =========================================================================

    /// Comma expression. `allow_in` is false inside a `for (...;` head.
    pub(crate) fn parse_expression(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        let mut left = self.parse_assignment_expression(allow_in)?;
        while self.at(SyntaxKind::CommaToken) {
            let operator_token = self.bump()?;
            let right = self.parse_assignment_expression(allow_in)?;
            left = ast::BinaryExpression {
                left,
                operator_token,
                right,
            }
            .build();
        }
        Ok(left)
    }

    pub(crate) fn parse_assignment_expression(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let expression = self.parse_assignment_expression_inner(allow_in);
        self.leave();
        expression
    }

    fn parse_assignment_expression_inner(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        if let Some(arrow) = self.try_parse_arrow_function(allow_in)? {
            return Ok(arrow);
        }
        let left = self.parse_conditional_expression(allow_in)?;
        if !self.kind().is_assignment_operator() {
            return Ok(left);
        }
        let operator_token = self.bump()?;
        let right = self.parse_assignment_expression(allow_in)?;
        Ok(ast::BinaryExpression {
            left,
            operator_token,
            right,
        }
        .build())
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// `x => body` or `(params): T => body`.
    ///
    /// The parenthesized form is parsed speculatively: a call signature that
    /// is not followed by `=>` rewinds to the `(`.
    fn try_parse_arrow_function(&mut self, allow_in: bool) -> Result<Option<SyntaxNode>, ParseError> {
        match self.kind() {
            SyntaxKind::IdentifierName if self.next_kind() == SyntaxKind::EqualsGreaterThanToken => {
                let identifier = self.bump()?;
                let equals_greater_than_token = self.bump()?;
                let body = self.parse_arrow_body(allow_in)?;
                Ok(Some(
                    ast::SimpleArrowFunctionExpression {
                        identifier,
                        equals_greater_than_token,
                        body,
                    }
                    .build(),
                ))
            }
            SyntaxKind::OpenParenToken => {
                let snapshot = self.snapshot();
                let call_signature = match self.parse_call_signature() {
                    Ok(signature) if self.at(SyntaxKind::EqualsGreaterThanToken) => signature,
                    _ => {
                        self.restore(snapshot);
                        return Ok(None);
                    }
                };
                let equals_greater_than_token = self.bump()?;
                let body = self.parse_arrow_body(allow_in)?;
                Ok(Some(
                    ast::ParenthesizedArrowFunctionExpression {
                        call_signature,
                        equals_greater_than_token,
                        body,
                    }
                    .build(),
                ))
            }
            _ => Ok(None),
        }
    }

    fn parse_arrow_body(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        if self.at(SyntaxKind::OpenBraceToken) {
            return self.parse_block();
        }
        self.parse_assignment_expression(allow_in)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn parse_conditional_expression(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        let condition = self.parse_binary_expression(0, allow_in)?;
        if !self.at(SyntaxKind::QuestionToken) {
            return Ok(condition);
        }
        let question_token = self.bump()?;
        let when_true = self.parse_assignment_expression(true)?;
        let colon_token = self.eat(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression(allow_in)?;
        Ok(ast::ConditionalExpression {
            condition,
            question_token,
            when_true,
            colon_token,
            when_false,
        }
        .build())
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary_expression(&mut self, min_precedence: u8, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let precedence = binary_precedence(self.kind(), allow_in);
            if precedence <= min_precedence {
                break;
            }
            let operator_token = self.bump()?;
            let right = self.parse_binary_expression(precedence, allow_in)?;
            left = ast::BinaryExpression {
                left,
                operator_token,
                right,
            }
            .build();
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let expression = self.parse_unary_expression_inner();
        self.leave();
        expression
    }

    fn parse_unary_expression_inner(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.kind() {
            SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::TypeOfKeyword => {
                let operator_token = self.bump()?;
                let operand = self.parse_unary_expression()?;
                Ok(ast::PrefixUnaryExpression {
                    operator_token,
                    operand,
                }
                .build())
            }
            SyntaxKind::LessThanToken => {
                let less_than_token = self.bump()?;
                let type_node = self.parse_type()?;
                let greater_than_token = self.eat(SyntaxKind::GreaterThanToken)?;
                let expression = self.parse_unary_expression()?;
                Ok(ast::CastExpression {
                    less_than_token,
                    type_node,
                    greater_than_token,
                    expression,
                }
                .build())
            }
            _ => {
                let operand = self.parse_left_hand_side_expression()?;
                if matches!(self.kind(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !self.has_preceding_line_break()
                {
                    let operator_token = self.bump()?;
                    return Ok(ast::PostfixUnaryExpression {
                        operand,
                        operator_token,
                    }
                    .build());
                }
                Ok(operand)
            }
        }
    }

    // =========================================================================
    // Member access, calls and `new`
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        let expression = if self.at(SyntaxKind::NewKeyword) {
            self.parse_object_creation_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_expression_rest(expression, true)
    }

    /// `.name`, `[index]` and (when `allow_calls`) `(arguments)` suffixes.
    fn parse_member_expression_rest(
        &mut self,
        mut expression: SyntaxNode,
        allow_calls: bool,
    ) -> Result<SyntaxNode, ParseError> {
        loop {
            expression = match self.kind() {
                SyntaxKind::DotToken => {
                    let dot_token = self.bump()?;
                    let name = self.eat_identifier_name()?;
                    ast::MemberAccessExpression {
                        expression,
                        dot_token,
                        name,
                    }
                    .build()
                }
                SyntaxKind::OpenBracketToken => {
                    let open_bracket_token = self.bump()?;
                    let argument_expression = self.parse_expression(true)?;
                    let close_bracket_token = self.eat(SyntaxKind::CloseBracketToken)?;
                    ast::ElementAccessExpression {
                        expression,
                        open_bracket_token,
                        argument_expression,
                        close_bracket_token,
                    }
                    .build()
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let argument_list = self.parse_argument_list()?;
                    ast::InvocationExpression {
                        expression,
                        argument_list,
                    }
                    .build()
                }
                _ => return Ok(expression),
            };
        }
    }

    fn parse_object_creation_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let new_keyword = self.bump()?;
        let target = if self.at(SyntaxKind::NewKeyword) {
            self.parse_object_creation_expression()
        } else {
            self.parse_primary_expression()
        };
        self.leave();
        let expression = self.parse_member_expression_rest(target?, false)?;
        let argument_list = if self.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list()?)
        } else {
            None
        };
        Ok(ast::ObjectCreationExpression {
            new_keyword,
            expression,
            argument_list,
        }
        .build())
    }

    pub(crate) fn parse_argument_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let arguments =
            self.parse_delimited(SyntaxKind::CloseParenToken, false, |p| p.parse_assignment_expression(true))?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        Ok(ast::ArgumentList {
            open_paren_token,
            arguments,
            close_paren_token,
        }
        .build())
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.kind() {
            SyntaxKind::ThisKeyword => Ok(ast::ThisExpression {
                this_keyword: self.bump()?,
            }
            .build()),
            SyntaxKind::SuperKeyword => Ok(ast::SuperExpression {
                super_keyword: self.bump()?,
            }
            .build()),
            SyntaxKind::IdentifierName => Ok(ast::IdentifierName {
                identifier: self.bump()?,
            }
            .build()),
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => Ok(ast::LiteralExpression {
                literal_token: self.bump()?,
            }
            .build()),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.rescan_slash()?;
                Ok(ast::LiteralExpression {
                    literal_token: self.bump()?,
                }
                .build())
            }
            SyntaxKind::OpenParenToken => {
                let open_paren_token = self.bump()?;
                let expression = self.parse_expression(true)?;
                let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
                Ok(ast::ParenthesizedExpression {
                    open_paren_token,
                    expression,
                    close_paren_token,
                }
                .build())
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let function_keyword = self.bump()?;
                let identifier = self.eat_optional(SyntaxKind::IdentifierName)?;
                let call_signature = self.parse_call_signature()?;
                let block = self.parse_block()?;
                Ok(ast::FunctionExpression {
                    function_keyword,
                    identifier,
                    call_signature,
                    block,
                }
                .build())
            }
            _ => self.expected("expression"),
        }
    }

    /// `[a, , b, ]`. Elisions and a trailing comma become
    /// `OmittedExpression`s, one more node than commas.
    fn parse_array_literal(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_bracket_token = self.bump()?;
        let mut nodes = Vec::new();
        let mut separators = Vec::new();
        loop {
            if self.at(SyntaxKind::CloseBracketToken) {
                if !separators.is_empty() {
                    nodes.push(ast::OmittedExpression {}.build());
                }
                break;
            }
            if self.at(SyntaxKind::CommaToken) {
                nodes.push(ast::OmittedExpression {}.build());
            } else {
                nodes.push(self.parse_assignment_expression(true)?);
                if !self.at(SyntaxKind::CommaToken) {
                    break;
                }
            }
            separators.push(self.bump()?);
        }
        let close_bracket_token = self.eat(SyntaxKind::CloseBracketToken)?;
        Ok(ast::ArrayLiteralExpression {
            open_bracket_token,
            expressions: SeparatedList::new(nodes, separators),
            close_bracket_token,
        }
        .build())
    }

    fn parse_object_literal(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_brace_token = self.bump()?;
        let property_assignments =
            self.parse_delimited(SyntaxKind::CloseBraceToken, true, |p| p.parse_property_assignment())?;
        let close_brace_token = self.eat(SyntaxKind::CloseBraceToken)?;
        Ok(ast::ObjectLiteralExpression {
            open_brace_token,
            property_assignments,
            close_brace_token,
        }
        .build())
    }

    fn parse_property_assignment(&mut self) -> Result<SyntaxNode, ParseError> {
        let is_get = self.at_contextual("get");
        if (is_get || self.at_contextual("set"))
            && self.look_ahead(|p| {
                p.bump()?;
                Ok(p.at_property_name())
            })
        {
            let keyword = self.bump()?;
            let property_name = self.eat_property_name()?;
            let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
            if is_get {
                let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
                let type_annotation = self.parse_type_annotation_opt()?;
                let block = self.parse_block()?;
                return Ok(ast::GetAccessorPropertyAssignment {
                    get_keyword: keyword,
                    property_name,
                    open_paren_token,
                    close_paren_token,
                    type_annotation,
                    block,
                }
                .build());
            }
            let parameter = self.parse_parameter()?;
            let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
            let block = self.parse_block()?;
            return Ok(ast::SetAccessorPropertyAssignment {
                set_keyword: keyword,
                property_name,
                open_paren_token,
                parameter,
                close_paren_token,
                block,
            }
            .build());
        }

        let property_name = self.eat_property_name()?;
        let colon_token = self.eat(SyntaxKind::ColonToken)?;
        let expression = self.parse_assignment_expression(true)?;
        Ok(ast::SimplePropertyAssignment {
            property_name,
            colon_token,
            expression,
        }
        .build())
    }
}
