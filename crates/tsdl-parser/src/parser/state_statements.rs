//! Parser state - source unit, module element and statement parsing methods

use super::ParseError;
use super::state::ParserState;
use tsdl_syntax::{SeparatedList, SyntaxKind, SyntaxList, SyntaxNode, SyntaxToken, ast};
use tracing::debug;

impl ParserState<'_> {
    // =========================================================================
    // Source unit and module elements
    // =========================================================================

    /// Parse the whole text as a `SourceUnit`.
    pub fn parse_source_unit(mut self) -> Result<SyntaxNode, ParseError> {
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::EndOfFileToken) {
            elements.push(self.parse_module_element()?);
        }
        let end_of_file_token = self.current.clone();
        debug!(elements = elements.len(), "parsed source unit");
        Ok(ast::SourceUnit {
            module_elements: SyntaxList::new(elements),
            end_of_file_token,
        }
        .build())
    }

    pub(crate) fn parse_module_element(&mut self) -> Result<SyntaxNode, ParseError> {
        let export_keyword = self.eat_optional(SyntaxKind::ExportKeyword)?;
        let declare_keyword = if self.at_contextual("declare") && self.at_declare_modifier() {
            Some(self.bump()?)
        } else {
            None
        };
        let has_modifier = export_keyword.is_some() || declare_keyword.is_some();

        match self.kind() {
            SyntaxKind::ClassKeyword => self.parse_class_declaration(export_keyword, declare_keyword),
            SyntaxKind::InterfaceKeyword => {
                if declare_keyword.is_some() {
                    return self.error("'declare' is not allowed on an interface");
                }
                self.parse_interface_declaration(export_keyword)
            }
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(export_keyword, declare_keyword),
            SyntaxKind::FunctionKeyword => {
                self.parse_function_declaration(export_keyword, declare_keyword)
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(export_keyword, declare_keyword),
            SyntaxKind::IdentifierName if self.at_module_declaration() => {
                self.parse_module_declaration(export_keyword, declare_keyword)
            }
            _ if has_modifier => self.expected("declaration"),
            _ => self.parse_statement(),
        }
    }

    /// `declare` followed, on the same line, by something it can modify.
    fn at_declare_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.bump()?;
            Ok(!p.has_preceding_line_break()
                && (matches!(
                    p.kind(),
                    SyntaxKind::ClassKeyword
                        | SyntaxKind::EnumKeyword
                        | SyntaxKind::FunctionKeyword
                        | SyntaxKind::VarKeyword
                ) || p.at_contextual("module")
                    || p.at_contextual("namespace")))
        })
    }

    /// `module` or `namespace` followed by a name on the same line.
    fn at_module_declaration(&mut self) -> bool {
        if !self.at_contextual("module") && !self.at_contextual("namespace") {
            return false;
        }
        self.look_ahead(|p| {
            p.bump()?;
            Ok(!p.has_preceding_line_break()
                && matches!(p.kind(), SyntaxKind::IdentifierName | SyntaxKind::StringLiteral))
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_module_declaration(
        &mut self,
        export_keyword: Option<SyntaxToken>,
        declare_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let module_keyword = self.bump()?;
        let name = if self.at(SyntaxKind::StringLiteral) {
            ast::LiteralExpression {
                literal_token: self.bump()?,
            }
            .build()
        } else {
            self.parse_qualified_name()?
        };
        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.at(SyntaxKind::EndOfFileToken) {
                return self.expected("'}'");
            }
            elements.push(self.parse_module_element()?);
        }
        let close_brace_token = self.bump()?;
        Ok(ast::ModuleDeclaration {
            export_keyword,
            declare_keyword,
            module_keyword,
            name,
            open_brace_token,
            module_elements: SyntaxList::new(elements),
            close_brace_token,
        }
        .build())
    }

    /// `A` or `A.B.C` as nested `QualifiedName` nodes.
    pub(crate) fn parse_qualified_name(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut name = ast::IdentifierName {
            identifier: self.eat_identifier()?,
        }
        .build();
        while self.at(SyntaxKind::DotToken) {
            let dot_token = self.bump()?;
            let right = self.eat_identifier_name()?;
            name = ast::QualifiedName {
                left: name,
                dot_token,
                right,
            }
            .build();
        }
        Ok(name)
    }

    fn parse_enum_declaration(
        &mut self,
        export_keyword: Option<SyntaxToken>,
        declare_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let enum_keyword = self.bump()?;
        let identifier = self.eat_identifier()?;
        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let enum_elements =
            self.parse_delimited(SyntaxKind::CloseBraceToken, true, |p| p.parse_enum_element())?;
        let close_brace_token = self.eat(SyntaxKind::CloseBraceToken)?;
        Ok(ast::EnumDeclaration {
            export_keyword,
            declare_keyword,
            enum_keyword,
            identifier,
            open_brace_token,
            enum_elements,
            close_brace_token,
        }
        .build())
    }

    fn parse_enum_element(&mut self) -> Result<SyntaxNode, ParseError> {
        let property_name = self.eat_property_name()?;
        let equals_value_clause = self.parse_equals_value_clause_opt(true)?;
        Ok(ast::EnumElement {
            property_name,
            equals_value_clause,
        }
        .build())
    }

    fn parse_function_declaration(
        &mut self,
        export_keyword: Option<SyntaxToken>,
        declare_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let function_keyword = self.bump()?;
        let identifier = self.eat_identifier()?;
        let call_signature = self.parse_call_signature()?;
        let (block, semicolon_token) = if self.at(SyntaxKind::OpenBraceToken) {
            (Some(self.parse_block()?), None)
        } else {
            (None, Some(self.eat_semicolon()?))
        };
        Ok(ast::FunctionDeclaration {
            export_keyword,
            declare_keyword,
            function_keyword,
            identifier,
            call_signature,
            block,
            semicolon_token,
        }
        .build())
    }

    fn parse_interface_declaration(
        &mut self,
        export_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let interface_keyword = self.bump()?;
        let identifier = self.eat_identifier()?;
        let extends_clause = if self.at(SyntaxKind::ExtendsKeyword) {
            let extends_keyword = self.bump()?;
            let type_names = self.parse_type_name_list()?;
            Some(
                ast::ExtendsClause {
                    extends_keyword,
                    type_names,
                }
                .build(),
            )
        } else {
            None
        };
        let body = self.parse_object_type()?;
        Ok(ast::InterfaceDeclaration {
            export_keyword,
            interface_keyword,
            identifier,
            extends_clause,
            body,
        }
        .build())
    }

    /// `A, B.C, D`
    pub(crate) fn parse_type_name_list(&mut self) -> Result<SeparatedList, ParseError> {
        let mut nodes = vec![self.parse_qualified_name()?];
        let mut separators = Vec::new();
        while self.at(SyntaxKind::CommaToken) {
            separators.push(self.bump()?);
            nodes.push(self.parse_qualified_name()?);
        }
        Ok(SeparatedList::new(nodes, separators))
    }

    fn parse_variable_statement(
        &mut self,
        export_keyword: Option<SyntaxToken>,
        declare_keyword: Option<SyntaxToken>,
    ) -> Result<SyntaxNode, ParseError> {
        let variable_declaration = self.parse_variable_declaration(true)?;
        let semicolon_token = self.eat_semicolon()?;
        Ok(ast::VariableStatement {
            export_keyword,
            declare_keyword,
            variable_declaration,
            semicolon_token,
        }
        .build())
    }

    pub(crate) fn parse_variable_declaration(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        let var_keyword = self.eat(SyntaxKind::VarKeyword)?;
        let mut nodes = vec![self.parse_variable_declarator(allow_in)?];
        let mut separators = Vec::new();
        while self.at(SyntaxKind::CommaToken) {
            separators.push(self.bump()?);
            nodes.push(self.parse_variable_declarator(allow_in)?);
        }
        Ok(ast::VariableDeclaration {
            var_keyword,
            variable_declarators: SeparatedList::new(nodes, separators),
        }
        .build())
    }

    fn parse_variable_declarator(&mut self, allow_in: bool) -> Result<SyntaxNode, ParseError> {
        let identifier = self.eat_identifier()?;
        self.parse_variable_declarator_rest(identifier, allow_in)
    }

    /// Type annotation and initializer after a declarator's name.
    pub(crate) fn parse_variable_declarator_rest(
        &mut self,
        identifier: SyntaxToken,
        allow_in: bool,
    ) -> Result<SyntaxNode, ParseError> {
        let type_annotation = self.parse_type_annotation_opt()?;
        let equals_value_clause = self.parse_equals_value_clause_opt(allow_in)?;
        Ok(ast::VariableDeclarator {
            identifier,
            type_annotation,
            equals_value_clause,
        }
        .build())
    }

    pub(crate) fn parse_equals_value_clause_opt(
        &mut self,
        allow_in: bool,
    ) -> Result<Option<SyntaxNode>, ParseError> {
        if !self.at(SyntaxKind::EqualsToken) {
            return Ok(None);
        }
        let equals_token = self.bump()?;
        let value = self.parse_assignment_expression(allow_in)?;
        Ok(Some(ast::EqualsValueClause { equals_token, value }.build()))
    }

    /// Comma-separated elements up to (not including) `close`.
    ///
    /// A trailing comma, when allowed, is followed by a zero-width
    /// `OmittedExpression` so the list keeps one more node than separators.
    pub(crate) fn parse_delimited(
        &mut self,
        close: SyntaxKind,
        allow_trailing_comma: bool,
        mut parse_element: impl FnMut(&mut Self) -> Result<SyntaxNode, ParseError>,
    ) -> Result<SeparatedList, ParseError> {
        let mut nodes = Vec::new();
        let mut separators = Vec::new();
        if self.at(close) {
            return Ok(SeparatedList::empty());
        }
        loop {
            nodes.push(parse_element(self)?);
            if !self.at(SyntaxKind::CommaToken) {
                break;
            }
            separators.push(self.bump()?);
            if self.at(close) {
                if !allow_trailing_comma {
                    return self.expected("element");
                }
                nodes.push(ast::OmittedExpression {}.build());
                break;
            }
        }
        Ok(SeparatedList::new(nodes, separators))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.enter()?;
        let statement = self.parse_statement_inner();
        self.leave();
        statement
    }

    fn parse_statement_inner(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.kind() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::VarKeyword => self.parse_variable_statement(None, None),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(None, None),
            SyntaxKind::SemicolonToken => Ok(ast::EmptyStatement {
                semicolon_token: self.bump()?,
            }
            .build()),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::BreakKeyword => {
                let break_keyword = self.bump()?;
                let identifier = self.parse_jump_label()?;
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::BreakStatement {
                    break_keyword,
                    identifier,
                    semicolon_token,
                }
                .build())
            }
            SyntaxKind::ContinueKeyword => {
                let continue_keyword = self.bump()?;
                let identifier = self.parse_jump_label()?;
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::ContinueStatement {
                    continue_keyword,
                    identifier,
                    semicolon_token,
                }
                .build())
            }
            SyntaxKind::ReturnKeyword => {
                let return_keyword = self.bump()?;
                let expression = if self.at(SyntaxKind::SemicolonToken) || self.can_insert_semicolon() {
                    None
                } else {
                    Some(self.parse_expression(true)?)
                };
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::ReturnStatement {
                    return_keyword,
                    expression,
                    semicolon_token,
                }
                .build())
            }
            SyntaxKind::ThrowKeyword => {
                let throw_keyword = self.bump()?;
                if self.has_preceding_line_break() {
                    return self.error("line break not permitted after 'throw'");
                }
                let expression = self.parse_expression(true)?;
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::ThrowStatement {
                    throw_keyword,
                    expression,
                    semicolon_token,
                }
                .build())
            }
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => {
                let with_keyword = self.bump()?;
                let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
                let condition = self.parse_expression(true)?;
                let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
                let statement = self.parse_statement()?;
                Ok(ast::WithStatement {
                    with_keyword,
                    open_paren_token,
                    condition,
                    close_paren_token,
                    statement,
                }
                .build())
            }
            SyntaxKind::DebuggerKeyword => {
                let debugger_keyword = self.bump()?;
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::DebuggerStatement {
                    debugger_keyword,
                    semicolon_token,
                }
                .build())
            }
            SyntaxKind::IdentifierName if self.next_kind() == SyntaxKind::ColonToken => {
                let identifier = self.bump()?;
                let colon_token = self.bump()?;
                let statement = self.parse_statement()?;
                Ok(ast::LabeledStatement {
                    identifier,
                    colon_token,
                    statement,
                }
                .build())
            }
            _ => {
                let expression = self.parse_expression(true)?;
                let semicolon_token = self.eat_semicolon()?;
                Ok(ast::ExpressionStatement {
                    expression,
                    semicolon_token,
                }
                .build())
            }
        }
    }

    fn parse_jump_label(&mut self) -> Result<Option<SyntaxToken>, ParseError> {
        if self.at(SyntaxKind::IdentifierName) && !self.has_preceding_line_break() {
            return self.bump().map(Some);
        }
        Ok(None)
    }

    pub(crate) fn parse_block(&mut self) -> Result<SyntaxNode, ParseError> {
        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let statements = self.parse_statements_until_close_brace()?;
        let close_brace_token = self.eat(SyntaxKind::CloseBraceToken)?;
        Ok(ast::Block {
            open_brace_token,
            statements,
            close_brace_token,
        }
        .build())
    }

    fn parse_statements_until_close_brace(&mut self) -> Result<SyntaxList, ParseError> {
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            if self.at(SyntaxKind::EndOfFileToken) {
                return self.expected("'}'");
            }
            statements.push(self.parse_statement()?);
        }
        Ok(SyntaxList::new(statements))
    }

    fn parse_if_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let if_keyword = self.bump()?;
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression(true)?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        let else_clause = if self.at(SyntaxKind::ElseKeyword) {
            let else_keyword = self.bump()?;
            let statement = self.parse_statement()?;
            Some(
                ast::ElseClause {
                    else_keyword,
                    statement,
                }
                .build(),
            )
        } else {
            None
        };
        Ok(ast::IfStatement {
            if_keyword,
            open_paren_token,
            condition,
            close_paren_token,
            statement,
            else_clause,
        }
        .build())
    }

    fn parse_do_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let do_keyword = self.bump()?;
        let statement = self.parse_statement()?;
        let while_keyword = self.eat(SyntaxKind::WhileKeyword)?;
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression(true)?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        // A semicolon is always insertable after do-while.
        let semicolon_token = match self.eat_optional(SyntaxKind::SemicolonToken)? {
            Some(token) => token,
            None => SyntaxToken::empty(SyntaxKind::SemicolonToken),
        };
        Ok(ast::DoStatement {
            do_keyword,
            statement,
            while_keyword,
            open_paren_token,
            condition,
            close_paren_token,
            semicolon_token,
        }
        .build())
    }

    fn parse_while_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let while_keyword = self.bump()?;
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression(true)?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(ast::WhileStatement {
            while_keyword,
            open_paren_token,
            condition,
            close_paren_token,
            statement,
        }
        .build())
    }

    fn parse_for_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let for_keyword = self.bump()?;
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let mut variable_declaration = None;
        let mut initializer = None;
        if self.at(SyntaxKind::VarKeyword) {
            variable_declaration = Some(self.parse_variable_declaration(false)?);
        } else if !self.at(SyntaxKind::SemicolonToken) {
            initializer = Some(self.parse_expression(false)?);
        }

        if self.at(SyntaxKind::InKeyword) {
            let single_declarator = variable_declaration
                .as_ref()
                .and_then(ast::VariableDeclaration::cast)
                .is_none_or(|declaration| declaration.variable_declarators.node_count() == 1);
            if !single_declarator {
                return self.error("only one variable may be declared in a for-in statement");
            }
            let in_keyword = self.bump()?;
            let expression = self.parse_expression(true)?;
            let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            return Ok(ast::ForInStatement {
                for_keyword,
                open_paren_token,
                variable_declaration,
                left: initializer,
                in_keyword,
                expression,
                close_paren_token,
                statement,
            }
            .build());
        }

        let first_semicolon_token = self.eat(SyntaxKind::SemicolonToken)?;
        let condition = if self.at(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        let second_semicolon_token = self.eat(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.at(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;
        Ok(ast::ForStatement {
            for_keyword,
            open_paren_token,
            variable_declaration,
            initializer,
            first_semicolon_token,
            condition,
            second_semicolon_token,
            incrementor,
            close_paren_token,
            statement,
        }
        .build())
    }

    fn parse_try_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let try_keyword = self.bump()?;
        let block = self.parse_block()?;
        let catch_clause = if self.at(SyntaxKind::CatchKeyword) {
            let catch_keyword = self.bump()?;
            let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
            let identifier = self.eat_identifier()?;
            let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
            let block = self.parse_block()?;
            Some(
                ast::CatchClause {
                    catch_keyword,
                    open_paren_token,
                    identifier,
                    close_paren_token,
                    block,
                }
                .build(),
            )
        } else {
            None
        };
        let finally_clause = if self.at(SyntaxKind::FinallyKeyword) {
            let finally_keyword = self.bump()?;
            let block = self.parse_block()?;
            Some(
                ast::FinallyClause {
                    finally_keyword,
                    block,
                }
                .build(),
            )
        } else {
            None
        };
        if catch_clause.is_none() && finally_clause.is_none() {
            return self.expected("'catch' or 'finally'");
        }
        Ok(ast::TryStatement {
            try_keyword,
            block,
            catch_clause,
            finally_clause,
        }
        .build())
    }

    fn parse_switch_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let switch_keyword = self.bump()?;
        let open_paren_token = self.eat(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression(true)?;
        let close_paren_token = self.eat(SyntaxKind::CloseParenToken)?;
        let open_brace_token = self.eat(SyntaxKind::OpenBraceToken)?;
        let mut clauses = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) {
            let clause = match self.kind() {
                SyntaxKind::CaseKeyword => {
                    let case_keyword = self.bump()?;
                    let expression = self.parse_expression(true)?;
                    let colon_token = self.eat(SyntaxKind::ColonToken)?;
                    let statements = self.parse_switch_clause_statements()?;
                    ast::CaseSwitchClause {
                        case_keyword,
                        expression,
                        colon_token,
                        statements,
                    }
                    .build()
                }
                SyntaxKind::DefaultKeyword => {
                    let default_keyword = self.bump()?;
                    let colon_token = self.eat(SyntaxKind::ColonToken)?;
                    let statements = self.parse_switch_clause_statements()?;
                    ast::DefaultSwitchClause {
                        default_keyword,
                        colon_token,
                        statements,
                    }
                    .build()
                }
                _ => return self.expected("'case' or 'default'"),
            };
            clauses.push(clause);
        }
        let close_brace_token = self.bump()?;
        Ok(ast::SwitchStatement {
            switch_keyword,
            open_paren_token,
            expression,
            close_paren_token,
            open_brace_token,
            switch_clauses: SyntaxList::new(clauses),
            close_brace_token,
        }
        .build())
    }

    fn parse_switch_clause_statements(&mut self) -> Result<SyntaxList, ParseError> {
        let mut statements = Vec::new();
        while !matches!(
            self.kind(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            statements.push(self.parse_statement()?);
        }
        Ok(SyntaxList::new(statements))
    }
}
