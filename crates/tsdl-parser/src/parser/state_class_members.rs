//! Parser state - class declaration and class member parsing methods

use super::ParseError;
use super::state::ParserState;
use tsdl_syntax::{SeparatedList, SyntaxKind, SyntaxList, SyntaxNode, SyntaxToken, ast};

impl ParserState<'_> {
    // =========================================================================
    // Class declarations
    // =========================================================================

    pub(crate) fn parse_class_declaration(
        &mut self,
        export_keyword: Option<SyntaxToken>,
        declare_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let class_keyword = self.bump()?;
        let identifier = self.eat_identifier()?;

        let extends_clause = if self.at(SyntaxKind::ExtendsKeyword) {
            let extends_keyword = self.bump()?;
            let base = self.parse_qualified_name()?;
            Some(
                ast::ExtendsClause {
                    extends_keyword,
                    type_names: SeparatedList::new(vec![base], Vec::new()),
                }
                .build(),
            )
        } else {
            None
        };

        let implements_clause = if self.at(SyntaxKind::ImplementsKeyword) {
            let implements_keyword = self.bump()?;
            let type_names = self.parse_type_name_list()?;
            Some(
                ast::ImplementsClause {
                    implements_keyword,
                    type_names,
                }
                .build(),
            )
        } else {
            None
        };

        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.at(SyntaxKind::EndOfFileToken) {
                return self.expected("'}'");
            }
            elements.push(self.parse_class_element()?);
        }
        let close_brace_token = self.bump()?;

        Ok(ast::ClassDeclaration {
            export_keyword,
            declare_keyword,
            class_keyword,
            identifier,
            extends_clause,
            implements_clause,
            open_brace_token,
            class_elements: SyntaxList::new(elements),
            close_brace_token,
        }
        .build())
    }

    // =========================================================================
    // Class elements
    // =========================================================================

    fn parse_class_element(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.at_contextual("constructor") && self.next_kind() == SyntaxKind::OpenParenToken {
            return self.parse_constructor_declaration();
        }

        let public_or_private_keyword = if matches!(
            self.kind(),
            SyntaxKind::PublicKeyword | SyntaxKind::PrivateKeyword
        ) && self.next_is_property_name()
        {
            Some(self.bump()?)
        } else {
            None
        };
        let static_keyword = if self.at(SyntaxKind::StaticKeyword) && self.next_is_property_name() {
            Some(self.bump()?)
        } else {
            None
        };

        if (self.at_contextual("get") || self.at_contextual("set")) && self.next_is_property_name() {
            return self.parse_member_accessor(public_or_private_keyword, static_keyword);
        }

        let property_name = self.eat_property_name()?;
        if self.at(SyntaxKind::OpenParenToken) {
            let call_signature = self.parse_call_signature()?;
            let (block, semicolon_token) = if self.at(SyntaxKind::OpenBraceToken) {
                (Some(self.parse_block()?), None)
            } else {
                (None, Some(self.eat_semicolon()?))
            };
            return Ok(ast::MemberFunctionDeclaration {
                public_or_private_keyword,
                static_keyword,
                property_name,
                call_signature,
                block,
                semicolon_token,
            }
            .build());
        }

        let variable_declarator = self.parse_variable_declarator_rest(property_name, true)?;
        let semicolon_token = self.eat_semicolon()?;
        Ok(ast::MemberVariableDeclaration {
            public_or_private_keyword,
            static_keyword,
            variable_declarator,
            semicolon_token,
        }
        .build())
    }

    /// The next token is a property name, so the current `public`,
    /// `static`, `get` or `set` is a modifier and not the member's name
    /// (`static()` and `get: number` declare members named by the keyword).
    fn next_is_property_name(&mut self) -> bool {
        self.look_ahead(|p| {
            p.bump()?;
            Ok(p.at_property_name())
        })
    }

    fn parse_constructor_declaration(&mut self) -> Result<SyntaxNode, ParseError> {
        let constructor_keyword = self.bump()?;
        let parameter_list = self.parse_parameter_list()?;
        let (block, semicolon_token) = if self.at(SyntaxKind::OpenBraceToken) {
            (Some(self.parse_block()?), None)
        } else {
            (None, Some(self.eat_semicolon()?))
        };
        Ok(ast::ConstructorDeclaration {
            constructor_keyword,
            parameter_list,
            block,
            semicolon_token,
        }
        .build())
    }

    fn parse_member_accessor(
        &mut self,
        public_or_private_keyword: Option<SyntaxToken>,
        static_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let is_get = self.at_contextual("get");
        let keyword = self.bump()?;
        let property_name = self.eat_property_name()?;
        let parameter_list = self.parse_parameter_list()?;
        if is_get {
            let type_annotation = self.parse_type_annotation_opt()?;
            let block = self.parse_block()?;
            return Ok(ast::GetMemberAccessorDeclaration {
                public_or_private_keyword,
                static_keyword,
                get_keyword: keyword,
                property_name,
                parameter_list,
                type_annotation,
                block,
            }
            .build());
        }
        let block = self.parse_block()?;
        Ok(ast::SetMemberAccessorDeclaration {
            public_or_private_keyword,
            static_keyword,
            set_keyword: keyword,
            property_name,
            parameter_list,
            block,
        }
        .build())
    }
}
