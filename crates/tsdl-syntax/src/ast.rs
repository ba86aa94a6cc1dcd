//! Node kinds and typed node views.
//!
//! Every node kind is declared once in [`with_node_table`], as an ordered list
//! of named slots with a shape. From that table this module generates:
//!
//! - [`NodeKind`], the closed set of composite kinds, with its slot schema;
//! - one view struct per kind (`ast::ClassDeclaration`, ...) holding the
//!   slots as typed fields. `cast` validates the shape once, after which the
//!   fields are plain values; `build` turns a (possibly edited) view back into
//!   a node.
//!
//! The rewriter (`crate::rewriter`) expands the same table into one visit
//! hook per kind, so adding a kind here cannot leave the dispatch incomplete.

use crate::error::RewriteError;
use crate::node::{SeparatedList, SyntaxElement, SyntaxList, SyntaxNode};
use crate::token::SyntaxToken;

/// Shape of a child slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotShape {
    Token,
    OptionalToken,
    Node,
    OptionalNode,
    List,
    SeparatedList,
}

impl SlotShape {
    pub const fn is_optional(self) -> bool {
        matches!(self, SlotShape::OptionalToken | SlotShape::OptionalNode)
    }
}

/// Invoke `$callback!` with the full node table.
macro_rules! with_node_table {
    ($callback:ident) => {
        $callback! {
            // Source unit and names
            SourceUnit visit_source_unit {
                module_elements: list,
                end_of_file_token: token,
            }
            IdentifierName visit_identifier_name {
                identifier: token,
            }
            QualifiedName visit_qualified_name {
                left: node,
                dot_token: token,
                right: token,
            }

            // Types
            TypeAnnotation visit_type_annotation {
                colon_token: token,
                type_node: node,
            }
            PredefinedType visit_predefined_type {
                keyword: token,
            }
            ArrayType visit_array_type {
                element_type: node,
                open_bracket_token: token,
                close_bracket_token: token,
            }
            ObjectType visit_object_type {
                open_brace_token: token,
                type_members: list,
                close_brace_token: token,
            }
            FunctionType visit_function_type {
                parameter_list: node,
                equals_greater_than_token: token,
                type_node: node,
            }
            ConstructorType visit_constructor_type {
                new_keyword: token,
                parameter_list: node,
                equals_greater_than_token: token,
                type_node: node,
            }
            PropertySignature visit_property_signature {
                property_name: token,
                question_token: opt_token,
                type_annotation: opt_node,
                separator_token: opt_token,
            }
            MethodSignature visit_method_signature {
                property_name: token,
                question_token: opt_token,
                call_signature: node,
                separator_token: opt_token,
            }
            IndexSignature visit_index_signature {
                open_bracket_token: token,
                parameter: node,
                close_bracket_token: token,
                type_annotation: opt_node,
                separator_token: opt_token,
            }
            CallSignatureMember visit_call_signature_member {
                call_signature: node,
                separator_token: opt_token,
            }
            ConstructSignature visit_construct_signature {
                new_keyword: token,
                call_signature: node,
                separator_token: opt_token,
            }

            // Declarations
            InterfaceDeclaration visit_interface_declaration {
                export_keyword: opt_token,
                interface_keyword: token,
                identifier: token,
                extends_clause: opt_node,
                body: node,
            }
            ExtendsClause visit_extends_clause {
                extends_keyword: token,
                type_names: sep_list,
            }
            ImplementsClause visit_implements_clause {
                implements_keyword: token,
                type_names: sep_list,
            }
            FunctionDeclaration visit_function_declaration {
                export_keyword: opt_token,
                declare_keyword: opt_token,
                function_keyword: token,
                identifier: token,
                call_signature: node,
                block: opt_node,
                semicolon_token: opt_token,
            }
            ModuleDeclaration visit_module_declaration {
                export_keyword: opt_token,
                declare_keyword: opt_token,
                module_keyword: token,
                name: node,
                open_brace_token: token,
                module_elements: list,
                close_brace_token: token,
            }
            ClassDeclaration visit_class_declaration {
                export_keyword: opt_token,
                declare_keyword: opt_token,
                class_keyword: token,
                identifier: token,
                extends_clause: opt_node,
                implements_clause: opt_node,
                open_brace_token: token,
                class_elements: list,
                close_brace_token: token,
            }
            EnumDeclaration visit_enum_declaration {
                export_keyword: opt_token,
                declare_keyword: opt_token,
                enum_keyword: token,
                identifier: token,
                open_brace_token: token,
                enum_elements: sep_list,
                close_brace_token: token,
            }
            EnumElement visit_enum_element {
                property_name: token,
                equals_value_clause: opt_node,
            }

            // Class members
            ConstructorDeclaration visit_constructor_declaration {
                constructor_keyword: token,
                parameter_list: node,
                block: opt_node,
                semicolon_token: opt_token,
            }
            MemberFunctionDeclaration visit_member_function_declaration {
                public_or_private_keyword: opt_token,
                static_keyword: opt_token,
                property_name: token,
                call_signature: node,
                block: opt_node,
                semicolon_token: opt_token,
            }
            MemberVariableDeclaration visit_member_variable_declaration {
                public_or_private_keyword: opt_token,
                static_keyword: opt_token,
                variable_declarator: node,
                semicolon_token: token,
            }
            GetMemberAccessorDeclaration visit_get_member_accessor_declaration {
                public_or_private_keyword: opt_token,
                static_keyword: opt_token,
                get_keyword: token,
                property_name: token,
                parameter_list: node,
                type_annotation: opt_node,
                block: node,
            }
            SetMemberAccessorDeclaration visit_set_member_accessor_declaration {
                public_or_private_keyword: opt_token,
                static_keyword: opt_token,
                set_keyword: token,
                property_name: token,
                parameter_list: node,
                block: node,
            }

            // Signatures and parameters
            CallSignature visit_call_signature {
                parameter_list: node,
                type_annotation: opt_node,
            }
            ParameterList visit_parameter_list {
                open_paren_token: token,
                parameters: sep_list,
                close_paren_token: token,
            }
            Parameter visit_parameter {
                dot_dot_dot_token: opt_token,
                public_or_private_keyword: opt_token,
                identifier: token,
                question_token: opt_token,
                type_annotation: opt_node,
                equals_value_clause: opt_node,
            }

            // Statements
            VariableStatement visit_variable_statement {
                export_keyword: opt_token,
                declare_keyword: opt_token,
                variable_declaration: node,
                semicolon_token: token,
            }
            VariableDeclaration visit_variable_declaration {
                var_keyword: token,
                variable_declarators: sep_list,
            }
            VariableDeclarator visit_variable_declarator {
                identifier: token,
                type_annotation: opt_node,
                equals_value_clause: opt_node,
            }
            EqualsValueClause visit_equals_value_clause {
                equals_token: token,
                value: node,
            }
            Block visit_block {
                open_brace_token: token,
                statements: list,
                close_brace_token: token,
            }
            ExpressionStatement visit_expression_statement {
                expression: node,
                semicolon_token: token,
            }
            ReturnStatement visit_return_statement {
                return_keyword: token,
                expression: opt_node,
                semicolon_token: token,
            }
            IfStatement visit_if_statement {
                if_keyword: token,
                open_paren_token: token,
                condition: node,
                close_paren_token: token,
                statement: node,
                else_clause: opt_node,
            }
            ElseClause visit_else_clause {
                else_keyword: token,
                statement: node,
            }
            EmptyStatement visit_empty_statement {
                semicolon_token: token,
            }
            WhileStatement visit_while_statement {
                while_keyword: token,
                open_paren_token: token,
                condition: node,
                close_paren_token: token,
                statement: node,
            }
            DoStatement visit_do_statement {
                do_keyword: token,
                statement: node,
                while_keyword: token,
                open_paren_token: token,
                condition: node,
                close_paren_token: token,
                semicolon_token: token,
            }
            ForStatement visit_for_statement {
                for_keyword: token,
                open_paren_token: token,
                variable_declaration: opt_node,
                initializer: opt_node,
                first_semicolon_token: token,
                condition: opt_node,
                second_semicolon_token: token,
                incrementor: opt_node,
                close_paren_token: token,
                statement: node,
            }
            ForInStatement visit_for_in_statement {
                for_keyword: token,
                open_paren_token: token,
                variable_declaration: opt_node,
                left: opt_node,
                in_keyword: token,
                expression: node,
                close_paren_token: token,
                statement: node,
            }
            BreakStatement visit_break_statement {
                break_keyword: token,
                identifier: opt_token,
                semicolon_token: token,
            }
            ContinueStatement visit_continue_statement {
                continue_keyword: token,
                identifier: opt_token,
                semicolon_token: token,
            }
            ThrowStatement visit_throw_statement {
                throw_keyword: token,
                expression: node,
                semicolon_token: token,
            }
            TryStatement visit_try_statement {
                try_keyword: token,
                block: node,
                catch_clause: opt_node,
                finally_clause: opt_node,
            }
            CatchClause visit_catch_clause {
                catch_keyword: token,
                open_paren_token: token,
                identifier: token,
                close_paren_token: token,
                block: node,
            }
            FinallyClause visit_finally_clause {
                finally_keyword: token,
                block: node,
            }
            SwitchStatement visit_switch_statement {
                switch_keyword: token,
                open_paren_token: token,
                expression: node,
                close_paren_token: token,
                open_brace_token: token,
                switch_clauses: list,
                close_brace_token: token,
            }
            CaseSwitchClause visit_case_switch_clause {
                case_keyword: token,
                expression: node,
                colon_token: token,
                statements: list,
            }
            DefaultSwitchClause visit_default_switch_clause {
                default_keyword: token,
                colon_token: token,
                statements: list,
            }
            LabeledStatement visit_labeled_statement {
                identifier: token,
                colon_token: token,
                statement: node,
            }
            DebuggerStatement visit_debugger_statement {
                debugger_keyword: token,
                semicolon_token: token,
            }
            WithStatement visit_with_statement {
                with_keyword: token,
                open_paren_token: token,
                condition: node,
                close_paren_token: token,
                statement: node,
            }

            // Expressions
            LiteralExpression visit_literal_expression {
                literal_token: token,
            }
            ThisExpression visit_this_expression {
                this_keyword: token,
            }
            SuperExpression visit_super_expression {
                super_keyword: token,
            }
            ParenthesizedExpression visit_parenthesized_expression {
                open_paren_token: token,
                expression: node,
                close_paren_token: token,
            }
            BinaryExpression visit_binary_expression {
                left: node,
                operator_token: token,
                right: node,
            }
            ConditionalExpression visit_conditional_expression {
                condition: node,
                question_token: token,
                when_true: node,
                colon_token: token,
                when_false: node,
            }
            PrefixUnaryExpression visit_prefix_unary_expression {
                operator_token: token,
                operand: node,
            }
            PostfixUnaryExpression visit_postfix_unary_expression {
                operand: node,
                operator_token: token,
            }
            MemberAccessExpression visit_member_access_expression {
                expression: node,
                dot_token: token,
                name: token,
            }
            ElementAccessExpression visit_element_access_expression {
                expression: node,
                open_bracket_token: token,
                argument_expression: node,
                close_bracket_token: token,
            }
            InvocationExpression visit_invocation_expression {
                expression: node,
                argument_list: node,
            }
            ArgumentList visit_argument_list {
                open_paren_token: token,
                arguments: sep_list,
                close_paren_token: token,
            }
            ObjectCreationExpression visit_object_creation_expression {
                new_keyword: token,
                expression: node,
                argument_list: opt_node,
            }
            ArrayLiteralExpression visit_array_literal_expression {
                open_bracket_token: token,
                expressions: sep_list,
                close_bracket_token: token,
            }
            ObjectLiteralExpression visit_object_literal_expression {
                open_brace_token: token,
                property_assignments: sep_list,
                close_brace_token: token,
            }
            SimplePropertyAssignment visit_simple_property_assignment {
                property_name: token,
                colon_token: token,
                expression: node,
            }
            GetAccessorPropertyAssignment visit_get_accessor_property_assignment {
                get_keyword: token,
                property_name: token,
                open_paren_token: token,
                close_paren_token: token,
                type_annotation: opt_node,
                block: node,
            }
            SetAccessorPropertyAssignment visit_set_accessor_property_assignment {
                set_keyword: token,
                property_name: token,
                open_paren_token: token,
                parameter: node,
                close_paren_token: token,
                block: node,
            }
            FunctionExpression visit_function_expression {
                function_keyword: token,
                identifier: opt_token,
                call_signature: node,
                block: node,
            }
            SimpleArrowFunctionExpression visit_simple_arrow_function_expression {
                identifier: token,
                equals_greater_than_token: token,
                body: node,
            }
            ParenthesizedArrowFunctionExpression visit_parenthesized_arrow_function_expression {
                call_signature: node,
                equals_greater_than_token: token,
                body: node,
            }
            CastExpression visit_cast_expression {
                less_than_token: token,
                type_node: node,
                greater_than_token: token,
                expression: node,
            }
            OmittedExpression visit_omitted_expression {}
        }
    };
}
pub(crate) use with_node_table;

macro_rules! slot_shape {
    (token) => { SlotShape::Token };
    (opt_token) => { SlotShape::OptionalToken };
    (node) => { SlotShape::Node };
    (opt_node) => { SlotShape::OptionalNode };
    (list) => { SlotShape::List };
    (sep_list) => { SlotShape::SeparatedList };
}

macro_rules! slot_type {
    (token) => { SyntaxToken };
    (opt_token) => { Option<SyntaxToken> };
    (node) => { SyntaxNode };
    (opt_node) => { Option<SyntaxNode> };
    (list) => { SyntaxList };
    (sep_list) => { SeparatedList };
}

macro_rules! slot_extract {
    (token, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::Token(token))) => Some(token.clone()),
            _ => None,
        }
    };
    (opt_token, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::Token(token))) => Some(Some(token.clone())),
            Some(None) => Some(None),
            _ => None,
        }
    };
    (node, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::Node(node))) => Some(node.clone()),
            _ => None,
        }
    };
    (opt_node, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::Node(node))) => Some(Some(node.clone())),
            Some(None) => Some(None),
            _ => None,
        }
    };
    (list, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::List(list))) => Some(list.clone()),
            _ => None,
        }
    };
    (sep_list, $slot:expr) => {
        match $slot {
            Some(Some(SyntaxElement::SeparatedList(list))) => Some(list.clone()),
            _ => None,
        }
    };
}

macro_rules! slot_element {
    (token, $value:expr) => { Some(SyntaxElement::Token($value)) };
    (opt_token, $value:expr) => { $value.map(SyntaxElement::Token) };
    (node, $value:expr) => { Some(SyntaxElement::Node($value)) };
    (opt_node, $value:expr) => { $value.map(SyntaxElement::Node) };
    (list, $value:expr) => { Some(SyntaxElement::List($value)) };
    (sep_list, $value:expr) => { Some(SyntaxElement::SeparatedList($value)) };
}

macro_rules! define_nodes {
    ($( $kind:ident $visit:ident { $($field:ident : $shape:ident),* $(,)? } )*) => {
        /// Kind of a composite node.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($kind,)*
        }

        impl NodeKind {
            /// Slot shapes in document order.
            pub fn slot_shapes(self) -> &'static [SlotShape] {
                match self {
                    $(NodeKind::$kind => &[$(slot_shape!($shape)),*],)*
                }
            }

            pub fn slot_names(self) -> &'static [&'static str] {
                match self {
                    $(NodeKind::$kind => &[$(stringify!($field)),*],)*
                }
            }
        }

        $(
            #[derive(Clone, Debug)]
            pub struct $kind {
                $(pub $field: slot_type!($shape),)*
            }

            impl $kind {
                pub const KIND: NodeKind = NodeKind::$kind;

                /// Typed view of `node`, or `None` if it is another kind.
                #[allow(unused_mut, unused_variables)]
                pub fn cast(node: &SyntaxNode) -> Option<Self> {
                    if node.kind() != NodeKind::$kind {
                        return None;
                    }
                    let mut slots = node.slots().iter();
                    Some($kind {
                        $($field: slot_extract!($shape, slots.next())?,)*
                    })
                }

                pub fn try_cast(node: &SyntaxNode) -> Result<Self, RewriteError> {
                    Self::cast(node).ok_or_else(|| RewriteError::Malformed {
                        kind: node.kind(),
                        detail: format!("expected {:?}", NodeKind::$kind),
                    })
                }

                /// A new node holding these slots.
                pub fn build(self) -> SyntaxNode {
                    SyntaxNode::from_slots(NodeKind::$kind, vec![$(slot_element!($shape, self.$field)),*])
                }
            }

            impl From<$kind> for SyntaxNode {
                fn from(view: $kind) -> SyntaxNode {
                    view.build()
                }
            }
        )*
    };
}

with_node_table!(define_nodes);

impl NodeKind {
    /// Kinds that only carry type information and never reach the output.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            NodeKind::TypeAnnotation
                | NodeKind::PredefinedType
                | NodeKind::ArrayType
                | NodeKind::ObjectType
                | NodeKind::FunctionType
                | NodeKind::ConstructorType
                | NodeKind::PropertySignature
                | NodeKind::MethodSignature
                | NodeKind::IndexSignature
                | NodeKind::CallSignatureMember
                | NodeKind::ConstructSignature
                | NodeKind::InterfaceDeclaration
        )
    }

    pub fn is_arrow_function(self) -> bool {
        matches!(
            self,
            NodeKind::SimpleArrowFunctionExpression | NodeKind::ParenthesizedArrowFunctionExpression
        )
    }

    /// Kinds that introduce a new `this` binding.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ConstructorDeclaration
                | NodeKind::MemberFunctionDeclaration
                | NodeKind::GetMemberAccessorDeclaration
                | NodeKind::SetMemberAccessorDeclaration
                | NodeKind::GetAccessorPropertyAssignment
                | NodeKind::SetAccessorPropertyAssignment
        )
    }
}
