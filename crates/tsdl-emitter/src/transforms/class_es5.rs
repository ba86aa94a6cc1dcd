//! ES5 Class Transform
//!
//! Transforms class declarations into an IIFE around a constructor
//! function:
//!
//! ```typescript
//! class Dog extends Animal {
//!     legs = 4;
//!     constructor(public name: string) { super(name); }
//!     bark() { return "woof"; }
//!     get age() { return 3; }
//!     static create() { return new Dog("rex"); }
//! }
//! ```
//!
//! becomes:
//!
//! ```javascript
//! var Dog = (function (_super) {
//!     __extends(Dog, _super);
//!     function Dog(name) {
//!         _super.call(this, name);
//!         this.name = name;
//!         this.legs = 4;
//!     }
//!     Dog.prototype.bark = function () { return "woof"; };
//!     Object.defineProperty(Dog.prototype, "age", {
//!         get: function () { return 3; },
//!         enumerable: true,
//!         configurable: true
//!     });
//!     Dog.create = function () { return new Dog("rex"); };
//!     return Dog;
//! })(Animal);
//! ```
//!
//! Statement order inside the IIFE: `__extends`, the constructor, members in
//! declaration order, `return`. Inside the constructor: captured `this`,
//! `super(...)` calls, default values, rest parameter, parameter
//! properties, instance field initializers, then the rest of the body.

use super::leading_after_modifier;
use crate::error::LoweringError;
use crate::indentation::trailing_comment_line;
use crate::lowering_pass::LoweringPass;
use crate::lowering_pass::lowering_pass_helpers::{strip_trivia, without_trivia};
use indexmap::IndexMap;
use tracing::debug;
use tsdl_syntax::facts::qualified_name_parts;
use tsdl_syntax::{
    Lowered, NodeKind, SeparatedList, SyntaxKind, SyntaxList, SyntaxNode, SyntaxRewriter,
    SyntaxToken, TriviaList, ast, factory,
};

/// The getter and setter of one property, in declaration order.
#[derive(Default)]
struct AccessorPair {
    first: Option<SyntaxNode>,
    get: Option<SyntaxNode>,
    set: Option<SyntaxNode>,
}

/// Accessors are grouped by property name and staticness.
type AccessorKey = (String, bool);

impl LoweringPass<'_> {
    pub(crate) fn lower_class_declaration(
        &mut self,
        node: &SyntaxNode,
    ) -> Result<Lowered, LoweringError> {
        let class = ast::ClassDeclaration::try_cast(node)?;
        if class.declare_keyword.is_some() {
            return Ok(Lowered::Removed);
        }
        let name = without_trivia(&class.identifier);
        let column = self.column_of(node);
        let body_column = column + self.indent_size();
        let base = class
            .extends_clause
            .as_ref()
            .map(|clause| self.base_class_expression(clause))
            .transpose()?;
        debug!(class = %name.text(), derived = base.is_some(), "lowering class");

        self.push_this_scope();
        let body = self.lower_class_body(&class, &name, base.is_some(), body_column);
        let captured = self.pop_this_scope();
        let mut statements = body?;
        if captured {
            let position = usize::from(base.is_some());
            statements.insert(position, self.capture_statement(body_column));
        }
        let statements = statements
            .iter()
            .map(|statement| self.place_statement(statement, body_column))
            .collect();

        let block = factory::block(
            factory::token(SyntaxKind::OpenBraceToken)
                .with_trailing_trivia(self.line_end(class.open_brace_token.trailing_trivia())),
            statements,
            factory::token(SyntaxKind::CloseBraceToken)
                .with_leading_trivia(self.closing_brace_leading(&class.close_brace_token, column, 0)),
        );
        let parameters = if base.is_some() {
            vec![factory::parameter(factory::identifier("_super"))]
        } else {
            Vec::new()
        };
        let function = factory::function_expression(factory::parameter_list(parameters), block);
        let iife = factory::invocation(factory::parenthesized(function), base.into_iter().collect());

        let leading = match &class.export_keyword {
            Some(export) => leading_after_modifier(export, class.class_keyword.leading_trivia()),
            None => class.class_keyword.leading_trivia().clone(),
        };
        let statement = factory::variable_statement(name, Some(iife))
            .with_leading_trivia(leading)
            .with_trailing_trivia(self.line_end(class.close_brace_token.trailing_trivia()));
        Ok(statement.into())
    }

    /// `extends A.B` as the expression `A.B`.
    fn base_class_expression(&self, node: &SyntaxNode) -> Result<SyntaxNode, LoweringError> {
        let clause = ast::ExtendsClause::try_cast(node)?;
        let Some(type_name) = clause.type_names.nodes().first() else {
            return Err(LoweringError::internal(
                "class",
                "extends clause without a base class",
                node,
            ));
        };
        let parts = qualified_name_parts(type_name);
        let mut parts = parts.iter().map(without_trivia);
        let Some(first) = parts.next() else {
            return Err(LoweringError::internal(
                "class",
                "base class is not a name",
                type_name,
            ));
        };
        Ok(parts.fold(factory::name_expression(first), factory::member_access))
    }

    /// Statements of the IIFE body, before layout.
    fn lower_class_body(
        &mut self,
        class: &ast::ClassDeclaration,
        name: &SyntaxToken,
        derived: bool,
        body_column: usize,
    ) -> Result<Vec<SyntaxNode>, LoweringError> {
        let mut statements = Vec::new();
        if derived {
            self.mark_derived_class();
            let extends = factory::invocation(
                factory::identifier_name("__extends"),
                vec![
                    factory::name_expression(name.clone()),
                    factory::identifier_name("_super"),
                ],
            );
            statements.push(self.statement_at(factory::expression_statement(extends), body_column));
        }

        let constructor = class.class_elements.iter().find(|member| {
            ast::ConstructorDeclaration::cast(member).is_some_and(|ctor| ctor.block.is_some())
        });
        let constructor = match constructor {
            Some(constructor) => {
                self.lower_constructor(class, name, constructor, derived, body_column)?
            }
            None => self.synthesized_constructor(class, name, derived, body_column)?,
        };
        statements.push(constructor);

        let mut accessors: IndexMap<AccessorKey, AccessorPair> = IndexMap::new();
        for member in class.class_elements.iter() {
            if let Some((key, is_get)) = accessor_key(member) {
                let pair = accessors.entry(key).or_default();
                pair.first.get_or_insert_with(|| member.clone());
                if is_get {
                    pair.get.get_or_insert_with(|| member.clone());
                } else {
                    pair.set.get_or_insert_with(|| member.clone());
                }
            }
        }

        for member in class.class_elements.iter() {
            match member.kind() {
                NodeKind::MemberFunctionDeclaration => {
                    if let Some(method) = self.lower_method(name, member, body_column)? {
                        statements.push(method);
                    }
                }
                NodeKind::MemberVariableDeclaration => {
                    if let Some(field) = self.static_field_initializer(name, member, body_column)? {
                        statements.push(field);
                    }
                }
                NodeKind::GetMemberAccessorDeclaration | NodeKind::SetMemberAccessorDeclaration => {
                    let Some((key, _)) = accessor_key(member) else {
                        continue;
                    };
                    if let Some(pair) = accessors.shift_remove(&key) {
                        statements.push(self.define_property(name, &key, pair, body_column)?);
                    }
                }
                _ => {}
            }
        }

        statements.push(self.statement_at(
            factory::return_statement(Some(factory::name_expression(name.clone()))),
            body_column,
        ));
        Ok(statements)
    }

    // =========================================================================
    // Constructor
    // =========================================================================

    fn lower_constructor(
        &mut self,
        class: &ast::ClassDeclaration,
        name: &SyntaxToken,
        node: &SyntaxNode,
        derived: bool,
        column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let constructor = ast::ConstructorDeclaration::try_cast(node)?;
        let Some(block) = &constructor.block else {
            return Err(LoweringError::internal("class", "constructor without a body", node));
        };
        let body_column = column + self.indent_size();
        self.push_this_scope();
        let parts = self.lower_constructor_parts(class, &constructor, block, derived, body_column);
        let captured = self.pop_this_scope();
        let (parameter_list, mut prologue, rest) = parts?;
        if captured {
            prologue.insert(0, self.capture_statement(body_column));
        }

        let view = ast::Block::try_cast(block)?;
        let lowered_block = ast::Block {
            open_brace_token: view.open_brace_token,
            statements: SyntaxList::new(rest),
            close_brace_token: view.close_brace_token,
        }
        .build();
        let block = self.assemble_block(&lowered_block, prologue, body_column, column)?;
        let function_keyword = factory::token_then_space(SyntaxKind::FunctionKeyword)
            .with_leading_trivia(self.relocated(&node.leading_trivia(), column));
        Ok(ast::FunctionDeclaration {
            export_keyword: None,
            declare_keyword: None,
            function_keyword,
            identifier: name.clone(),
            call_signature: factory::call_signature(parameter_list),
            block: Some(block),
            semicolon_token: None,
        }
        .build())
    }

    /// Returns the parameter list, the prologue (super calls, parameter
    /// handling, property assignments, field initializers) and the
    /// remaining body statements.
    fn lower_constructor_parts(
        &mut self,
        class: &ast::ClassDeclaration,
        constructor: &ast::ConstructorDeclaration,
        block: &SyntaxNode,
        derived: bool,
        body_column: usize,
    ) -> Result<(SyntaxNode, Vec<SyntaxNode>, Vec<SyntaxNode>), LoweringError> {
        let (parameter_list, facts) = self.lower_parameter_list(&constructor.parameter_list, None)?;
        let view = ast::Block::try_cast(block)?;
        let mut prologue = Vec::new();
        let mut rest = Vec::new();
        for statement in view.statements.iter() {
            let lowered = self.visit_statement(statement)?;
            if derived && is_super_call(statement) {
                prologue.extend(lowered);
            } else {
                rest.extend(lowered);
            }
        }
        prologue.extend(self.parameter_prologue(&facts, body_column)?);
        for property in &facts.properties {
            let assignment = factory::assignment(
                factory::member_access(factory::this_expression(), property.clone()),
                factory::name_expression(property.clone()),
            );
            prologue.push(self.statement_at(factory::expression_statement(assignment), body_column));
        }
        prologue.extend(self.instance_field_initializers(class, body_column)?);
        Ok((parameter_list, prologue, rest))
    }

    fn visit_statement(&mut self, statement: &SyntaxNode) -> Result<Vec<SyntaxNode>, LoweringError> {
        Ok(self.visit_node(statement)?.into_nodes())
    }

    /// `function A() { }` for a class without an explicit constructor.
    fn synthesized_constructor(
        &mut self,
        class: &ast::ClassDeclaration,
        name: &SyntaxToken,
        derived: bool,
        column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let body_column = column + self.indent_size();
        self.push_this_scope();
        let fields = self.instance_field_initializers(class, body_column);
        let captured = self.pop_this_scope();
        let mut statements = Vec::new();
        if captured {
            statements.push(self.capture_statement(body_column));
        }
        if derived {
            let forward = factory::invocation(
                factory::member_access_path(factory::identifier_name("_super"), &["apply"]),
                vec![factory::this_expression(), factory::identifier_name("arguments")],
            );
            statements.push(self.statement_at(factory::expression_statement(forward), body_column));
        }
        statements.extend(fields?);
        let block = factory::block(
            factory::token(SyntaxKind::OpenBraceToken).with_trailing_trivia(self.new_line()),
            statements,
            factory::token(SyntaxKind::CloseBraceToken)
                .with_leading_trivia(self.indentation(column)),
        );
        Ok(self.statement_at(
            factory::function_declaration(name.clone(), factory::parameter_list(Vec::new()), block),
            column,
        ))
    }

    /// `this.f = init;` for every instance field with an initializer.
    fn instance_field_initializers(
        &mut self,
        class: &ast::ClassDeclaration,
        body_column: usize,
    ) -> Result<Vec<SyntaxNode>, LoweringError> {
        let mut statements = Vec::new();
        for member in class.class_elements.iter() {
            let Some(field) = ast::MemberVariableDeclaration::cast(member) else {
                continue;
            };
            if field.static_keyword.is_some() {
                continue;
            }
            if let Some(statement) =
                self.field_assignment(factory::this_expression(), member, &field, body_column)?
            {
                statements.push(statement);
            }
        }
        Ok(statements)
    }

    fn static_field_initializer(
        &mut self,
        name: &SyntaxToken,
        member: &SyntaxNode,
        column: usize,
    ) -> Result<Option<SyntaxNode>, LoweringError> {
        let field = ast::MemberVariableDeclaration::try_cast(member)?;
        if field.static_keyword.is_none() {
            return Ok(None);
        }
        self.field_assignment(factory::name_expression(name.clone()), member, &field, column)
    }

    /// `receiver.f = init;` at `column`, or nothing for a field without an
    /// initializer.
    fn field_assignment(
        &mut self,
        receiver: SyntaxNode,
        member: &SyntaxNode,
        field: &ast::MemberVariableDeclaration,
        column: usize,
    ) -> Result<Option<SyntaxNode>, LoweringError> {
        let declarator = ast::VariableDeclarator::try_cast(&field.variable_declarator)?;
        let Some(clause) = &declarator.equals_value_clause else {
            return Ok(None);
        };
        let clause = ast::EqualsValueClause::try_cast(clause)?;
        let value = strip_trivia(&self.lower_node(&clause.value)?);
        let delta = column as isize - self.column_of(member) as isize;
        let value = self.reindent(&value, false, delta)?;
        let target = member_target(receiver, &declarator.identifier);
        let statement = factory::expression_statement(factory::assignment(target, value))
            .with_leading_trivia(self.relocated(&member.leading_trivia(), column))
            .with_trailing_trivia(self.line_end(field.semicolon_token.trailing_trivia()));
        Ok(Some(statement))
    }

    // =========================================================================
    // Methods and accessors
    // =========================================================================

    /// `A.prototype.m = function (...) { ... };`
    fn lower_method(
        &mut self,
        name: &SyntaxToken,
        member: &SyntaxNode,
        column: usize,
    ) -> Result<Option<SyntaxNode>, LoweringError> {
        let method = ast::MemberFunctionDeclaration::try_cast(member)?;
        let Some(block) = &method.block else {
            return Ok(None);
        };
        let signature = ast::CallSignature::try_cast(&method.call_signature)?;
        let (parameter_list, block) = self.lower_function_like(
            &signature.parameter_list,
            signature.type_annotation.as_ref(),
            block,
            column,
        )?;
        let block_trailing = block.trailing_trivia();
        let function = factory::function_expression(
            parameter_list,
            block.with_trailing_trivia(TriviaList::EMPTY),
        );
        let receiver = class_receiver(name, method.static_keyword.is_some());
        let assignment =
            factory::assignment(member_target(receiver, &method.property_name), function);
        Ok(Some(
            factory::expression_statement(assignment)
                .with_leading_trivia(self.relocated(&member.leading_trivia(), column))
                .with_trailing_trivia(self.line_end(&block_trailing)),
        ))
    }

    /// `Object.defineProperty(A.prototype, "p", { get: ..., set: ..., ... });`
    fn define_property(
        &mut self,
        name: &SyntaxToken,
        key: &AccessorKey,
        pair: AccessorPair,
        column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let property_column = column + self.indent_size();
        let mut properties = Vec::new();
        let mut separators = Vec::new();
        let mut pending_comments = TriviaList::EMPTY;
        for (keyword, accessor) in [("get", &pair.get), ("set", &pair.set)] {
            let Some(accessor) = accessor else {
                continue;
            };
            let function = self.accessor_function(accessor, property_column)?;
            if !properties.is_empty() {
                separators.push(self.separator_line(&pending_comments));
            }
            pending_comments = function.trailing_trivia();
            let property = factory::property_assignment(
                factory::identifier(keyword),
                function.with_trailing_trivia(TriviaList::EMPTY),
            )
            .with_leading_trivia(self.indentation(property_column));
            properties.push(property);
        }
        for flag in ["enumerable", "configurable"] {
            separators.push(self.separator_line(&pending_comments));
            pending_comments = TriviaList::EMPTY;
            properties.push(
                factory::property_assignment(
                    factory::identifier(flag),
                    factory::keyword_literal(SyntaxKind::TrueKeyword),
                )
                .with_leading_trivia(self.indentation(property_column)),
            );
        }
        if let Some(last) = properties.last_mut() {
            *last = last.with_trailing_trivia(self.new_line());
        }
        let descriptor = factory::object_literal(
            factory::token(SyntaxKind::OpenBraceToken).with_trailing_trivia(self.new_line()),
            SeparatedList::new(properties, separators),
            factory::token(SyntaxKind::CloseBraceToken)
                .with_leading_trivia(self.indentation(column)),
        );
        let (property_name, is_static) = key;
        let call = factory::invocation(
            factory::member_access_path(factory::identifier_name("Object"), &["defineProperty"]),
            vec![
                class_receiver(name, *is_static),
                factory::string_literal(property_name),
                descriptor,
            ],
        );
        let leading = pair
            .first
            .as_ref()
            .map(|first| self.relocated(&first.leading_trivia(), column))
            .unwrap_or_else(|| self.indentation(column));
        Ok(factory::expression_statement(call)
            .with_leading_trivia(leading)
            .with_trailing_trivia(self.new_line()))
    }

    /// `function (...) { ... }` for an accessor, laid out for a property at
    /// `property_column`.
    fn accessor_function(
        &mut self,
        accessor: &SyntaxNode,
        property_column: usize,
    ) -> Result<SyntaxNode, LoweringError> {
        let (parameter_list, return_type, block) = match accessor.kind() {
            NodeKind::GetMemberAccessorDeclaration => {
                let get = ast::GetMemberAccessorDeclaration::try_cast(accessor)?;
                (get.parameter_list, get.type_annotation, get.block)
            }
            _ => {
                let set = ast::SetMemberAccessorDeclaration::try_cast(accessor)?;
                (set.parameter_list, None, set.block)
            }
        };
        let column = self.column_of(accessor);
        let (parameter_list, block) =
            self.lower_function_like(&parameter_list, return_type.as_ref(), &block, column)?;
        let function = factory::function_expression(parameter_list, block);
        self.reindent(&function, false, property_column as isize - column as isize)
    }

    /// `,` ending a descriptor property line, after any carried comments.
    fn separator_line(&self, comments: &TriviaList) -> SyntaxToken {
        factory::token(SyntaxKind::CommaToken)
            .with_trailing_trivia(trailing_comment_line(comments, self.options()))
    }
}

/// `(name, is_static)` of an accessor member, and whether it is the getter.
fn accessor_key(member: &SyntaxNode) -> Option<(AccessorKey, bool)> {
    if let Some(get) = ast::GetMemberAccessorDeclaration::cast(member) {
        let key = (get.property_name.value_text(), get.static_keyword.is_some());
        return Some((key, true));
    }
    let set = ast::SetMemberAccessorDeclaration::cast(member)?;
    Some(((set.property_name.value_text(), set.static_keyword.is_some()), false))
}

/// `A` for static members, `A.prototype` otherwise.
fn class_receiver(name: &SyntaxToken, is_static: bool) -> SyntaxNode {
    let class = factory::name_expression(name.clone());
    if is_static {
        class
    } else {
        factory::member_access(class, factory::identifier("prototype"))
    }
}

/// `receiver.name`, or `receiver["name"]` for string and numeric names.
fn member_target(receiver: SyntaxNode, property_name: &SyntaxToken) -> SyntaxNode {
    match property_name.kind() {
        SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
            factory::element_access(receiver, factory::literal(without_trivia(property_name)))
        }
        _ => factory::member_access(receiver, without_trivia(property_name)),
    }
}

/// `super(...);` as a statement.
fn is_super_call(statement: &SyntaxNode) -> bool {
    ast::ExpressionStatement::cast(statement)
        .and_then(|statement| ast::InvocationExpression::cast(&statement.expression))
        .is_some_and(|call| call.expression.kind() == NodeKind::SuperExpression)
}

#[cfg(test)]
#[path = "../../tests/class_es5.rs"]
mod tests;
