//! Runtime helpers the lowered code may call.

use crate::error::LoweringError;
use tsdl_common::FormattingOptions;
use tsdl_syntax::{SyntaxList, SyntaxNode, ast};

/// Prototype chaining for lowered derived classes.
const EXTENDS_HELPER: &str = "var __extends = this.__extends || function (d, b) {
    function __() { this.constructor = d; }
    __.prototype = b.prototype;
    d.prototype = new __();
};
";

/// `__extends` written with the configured indentation and newlines.
pub fn extends_helper_text(options: &FormattingOptions) -> String {
    EXTENDS_HELPER
        .replace("    ", &options.indentation_string(options.indent_size))
        .replace('\n', options.new_line())
}

/// `root` with the `__extends` helper placed before its first statement.
///
/// Only a source unit can take the helper; other roots come back unchanged.
pub(crate) fn prepend_extends_helper(
    root: &SyntaxNode,
    options: &FormattingOptions,
) -> Result<SyntaxNode, LoweringError> {
    let Some(unit) = ast::SourceUnit::cast(root) else {
        return Ok(root.clone());
    };
    let helper = tsdl_parser::parse(&extends_helper_text(options)).map_err(|err| {
        LoweringError::InternalLoweringError {
            rule: "helpers",
            detail: err.to_string(),
            subtree: String::new(),
        }
    })?;
    let helper = ast::SourceUnit::try_cast(&helper)?;
    let mut statements = helper.module_elements.nodes().to_vec();
    statements.extend(unit.module_elements.iter().cloned());
    Ok(ast::SourceUnit {
        module_elements: SyntaxList::new(statements),
        end_of_file_token: unit.end_of_file_token,
    }
    .build())
}
