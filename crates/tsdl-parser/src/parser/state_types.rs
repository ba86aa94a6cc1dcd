//! Parser state - type, signature and parameter parsing methods

use super::ParseError;
use super::state::ParserState;
use tsdl_syntax::{SyntaxKind, SyntaxList, SyntaxNode, SyntaxToken, ast};

/// Type keywords that are plain identifiers to the scanner.
const PREDEFINED_TYPE_NAMES: &[&str] = &["any", "number", "bool", "boolean", "string"];

impl ParserState<'_> {
    // =========================================================================
    // Types
    // =========================================================================

    /// `: Type` if the current token is a colon.
    pub(crate) fn parse_type_annotation_opt(&mut self) -> Result<Option<SyntaxNode>, ParseError> {
        if !self.at(SyntaxKind::ColonToken) {
            return Ok(None);
        }
        let colon_token = self.bump()?;
        let type_node = self.parse_type()?;
        Ok(Some(
            ast::TypeAnnotation {
                colon_token,
                type_node,
            }
            .build(),
        ))
    }

    pub(crate) fn parse_type(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let ty = self.parse_non_array_type();
        self.leave();
        let mut ty = ty?;
        while self.at(SyntaxKind::OpenBracketToken)
            && self.next_kind() == SyntaxKind::CloseBracketToken
        {
            let open_bracket_token = self.bump()?;
            let close_bracket_token = self.bump()?;
            ty = ast::ArrayType {
                element_type: ty,
                open_bracket_token,
                close_bracket_token,
            }
            .build();
        }
        Ok(ty)
    }

    fn parse_non_array_type(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.kind() {
            SyntaxKind::OpenBraceToken => self.parse_object_type(),
            SyntaxKind::OpenParenToken => {
                let parameter_list = self.parse_parameter_list()?;
                let equals_greater_than_token = self.eat(SyntaxKind::EqualsGreaterThanToken)?;
                let type_node = self.parse_type()?;
                Ok(ast::FunctionType {
                    parameter_list,
                    equals_greater_than_token,
                    type_node,
                }
                .build())
            }
            SyntaxKind::NewKeyword => {
                let new_keyword = self.bump()?;
                let parameter_list = self.parse_parameter_list()?;
                let equals_greater_than_token = self.eat(SyntaxKind::EqualsGreaterThanToken)?;
                let type_node = self.parse_type()?;
                Ok(ast::ConstructorType {
                    new_keyword,
                    parameter_list,
                    equals_greater_than_token,
                    type_node,
                }
                .build())
            }
            SyntaxKind::VoidKeyword => Ok(ast::PredefinedType {
                keyword: self.bump()?,
            }
            .build()),
            SyntaxKind::IdentifierName
                if PREDEFINED_TYPE_NAMES.contains(&self.current.text())
                    && self.next_kind() != SyntaxKind::DotToken =>
            {
                Ok(ast::PredefinedType {
                    keyword: self.bump()?,
                }
                .build())
            }
            SyntaxKind::IdentifierName => self.parse_qualified_name(),
            _ => self.expected("type"),
        }
    }

    /// `{ members }` of an interface or type literal.
    pub(crate) fn parse_object_type(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.at(SyntaxKind::EndOfFileToken) {
                return self.expected("'}'");
            }
            members.push(self.parse_type_member()?);
        }
        let close_brace_token = self.bump()?;
        Ok(ast::ObjectType {
            open_brace_token,
            type_members: SyntaxList::new(members),
            close_brace_token,
        }
        .build())
    }

    fn parse_type_member(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.kind() {
            SyntaxKind::OpenParenToken => {
                let call_signature = self.parse_call_signature()?;
                let separator_token = self.parse_type_member_separator()?;
                Ok(ast::CallSignatureMember {
                    call_signature,
                    separator_token,
                }
                .build())
            }
            SyntaxKind::NewKeyword if self.next_kind() == SyntaxKind::OpenParenToken => {
                let new_keyword = self.bump()?;
                let call_signature = self.parse_call_signature()?;
                let separator_token = self.parse_type_member_separator()?;
                Ok(ast::ConstructSignature {
                    new_keyword,
                    call_signature,
                    separator_token,
                }
                .build())
            }
            SyntaxKind::OpenBracketToken => {
                let open_bracket_token = self.bump()?;
                let parameter = self.parse_parameter()?;
                let close_bracket_token = self.eat(SyntaxKind::CloseBracketToken)?;
                let type_annotation = self.parse_type_annotation_opt()?;
                let separator_token = self.parse_type_member_separator()?;
                Ok(ast::IndexSignature {
                    open_bracket_token,
                    parameter,
                    close_bracket_token,
                    type_annotation,
                    separator_token,
                }
                .build())
            }
            _ => {
                let property_name = self.eat_property_name()?;
                let question_token = self.eat_optional(SyntaxKind::QuestionToken)?;
                if self.at(SyntaxKind::OpenParenToken) {
                    let call_signature = self.parse_call_signature()?;
                    let separator_token = self.parse_type_member_separator()?;
                    return Ok(ast::MethodSignature {
                        property_name,
                        question_token,
                        call_signature,
                        separator_token,
                    }
                    .build());
                }
                let type_annotation = self.parse_type_annotation_opt()?;
                let separator_token = self.parse_type_member_separator()?;
                Ok(ast::PropertySignature {
                    property_name,
                    question_token,
                    type_annotation,
                    separator_token,
                }
                .build())
            }
        }
    }

    /// `;` or `,` between type members; may be left out before `}` or a
    /// line break.
    fn parse_type_member_separator(&mut self) -> Result<Option<SyntaxToken>, ParseError> {
        if matches!(self.kind(), SyntaxKind::SemicolonToken | SyntaxKind::CommaToken) {
            return self.bump().map(Some);
        }
        if self.at(SyntaxKind::CloseBraceToken) || self.has_preceding_line_break() {
            return Ok(None);
        }
        self.expected("';'")
    }

    // =========================================================================
    // Signatures and parameters
    // =========================================================================

    /// `(parameters): ReturnType`
    pub(crate) fn parse_call_signature(&mut self) -> Result<SyntaxNode, ParseError> {
        let parameter_list = self.parse_parameter_list()?;
        let type_annotation = self.parse_type_annotation_opt()?;
        Ok(ast::CallSignature {
            parameter_list,
            type_annotation,
        }
        .build())
    }

    pub(crate) fn parse_parameter_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let parameters =
            self.parse_delimited(SyntaxKind::CloseParenToken, false, |p| p.parse_parameter())?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        Ok(ast::ParameterList {
            open_paren_token,
            parameters,
            close_paren_token,
        }
        .build())
    }

    /// `...`? `public`|`private`? name `?`? `: Type`? `= default`?
    pub(crate) fn parse_parameter(&mut self) -> Result<SyntaxNode, ParseError> {
        let dot_dot_dot_token = self.eat_optional(SyntaxKind::DotDotDotToken)?;
        let public_or_private_keyword = if matches!(
            self.kind(),
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword
        ) {
            Some(self.bump()?)
        } else {
            None
        };
        let identifier = self.eat_identifier()?;
        let question_token = self.eat_optional(SyntaxKind::QuestionToken)?;
        let type_annotation = self.parse_type_annotation_opt()?;
        let equals_value_clause = self.parse_equals_value_clause_opt(true)?;
        Ok(ast::Parameter {
            dot_dot_dot_token,
            public_or_private_keyword,
            identifier,
            question_token,
            type_annotation,
            equals_value_clause,
        }
        .build())
    }
}
