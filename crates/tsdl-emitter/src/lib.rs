//! Downlevel lowering for the tsdl compiler.
//!
//! [`lower`] takes a full-fidelity tree of the TypeScript dialect and returns
//! a tree of plain JavaScript: classes, namespaces, enums and arrow functions
//! become functions and IIFEs, type syntax is erased, and the surrounding
//! whitespace and comments are carried into the rewritten code.
//!
//! ```
//! use tsdl_common::LoweringOptions;
//!
//! let tree = tsdl_parser::parse("var f = (x: number) => x * 2;\n").unwrap();
//! let lowered = tsdl_emitter::lower(&tree, &LoweringOptions::default()).unwrap();
//! assert_eq!(
//!     lowered.full_text(),
//!     "var f = function (x) {\n    return x * 2;\n};\n"
//! );
//! ```

// Errors reported by `lower`
pub mod error;
pub use error::LoweringError;

// Indentation and trivia arithmetic
pub mod indentation;
pub use indentation::{change_indentation, change_indentation_to_minimum, shift_leading_trivia};

// The lowering rewriter and its rules
pub mod lowering_pass;
pub use lowering_pass::LoweringPass;
mod transforms;

// Runtime helpers prepended to output that needs them
pub mod helpers;

// Token uniqueness pass run on every output tree
pub mod uniqueness;
pub use uniqueness::ensure_token_uniqueness;

use tracing::{debug, debug_span};
use tsdl_common::LoweringOptions;
use tsdl_syntax::{SyntaxNode, check_invariants, is_typescript_specific};

/// Lower `tree` to the JavaScript subset.
///
/// The input must satisfy the tree invariants; a violation is reported as
/// [`LoweringError::PreconditionViolation`] before anything is rewritten. A
/// tree with nothing TypeScript-specific in it is returned unchanged.
pub fn lower(tree: &SyntaxNode, options: &LoweringOptions) -> Result<SyntaxNode, LoweringError> {
    {
        let _span = debug_span!("precheck").entered();
        check_invariants(tree).map_err(|violation| LoweringError::precondition(violation, tree))?;
    }
    if !is_typescript_specific(tree) {
        debug!("nothing to lower");
        return Ok(tree.clone());
    }

    let (lowered, needs_extends) = {
        let _span = debug_span!("lowering", width = tree.full_width()).entered();
        let mut pass = LoweringPass::new(tree, &options.formatting);
        let lowered = pass.run(tree)?;
        (lowered, pass.lowered_derived_class())
    };
    let lowered = if options.emit_helpers && needs_extends {
        helpers::prepend_extends_helper(&lowered, &options.formatting)?
    } else {
        lowered
    };

    let unique = {
        let _span = debug_span!("uniqueness").entered();
        ensure_token_uniqueness(&lowered)?
    };
    {
        let _span = debug_span!("postcheck").entered();
        check_invariants(&unique).map_err(|violation| LoweringError::InternalLoweringError {
            rule: "invariants",
            detail: violation.to_string(),
            subtree: String::new(),
        })?;
    }
    if is_typescript_specific(&unique) {
        return Err(LoweringError::internal(
            "lowering",
            "output still contains TypeScript-specific syntax",
            &unique,
        ));
    }
    Ok(unique)
}
