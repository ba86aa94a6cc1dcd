//! Errors reported by `lower`.

use thiserror::Error;
use tsdl_syntax::{InvariantViolation, NodeKind, RewriteError, SyntaxCursor, SyntaxNode};

/// Why a tree could not be lowered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoweringError {
    /// The input tree is malformed; nothing was lowered.
    #[error("input tree is malformed at {kind:?} (offset {position}): {detail}")]
    PreconditionViolation {
        kind: NodeKind,
        position: usize,
        detail: String,
    },
    /// A lowering rule produced a tree that breaks the structural invariants,
    /// or met a shape it cannot handle.
    #[error("lowering rule `{rule}` failed: {detail}")]
    InternalLoweringError {
        rule: &'static str,
        detail: String,
        /// Rendered text of the offending subtree, possibly empty.
        subtree: String,
    },
}

impl LoweringError {
    /// `violation` found in `root`, with the path to the offending node.
    pub(crate) fn precondition(violation: InvariantViolation, root: &SyntaxNode) -> Self {
        let location = SyntaxCursor::root(root.clone())
            .innermost(violation.offset, violation.kind)
            .map(|cursor| format!(" (in {})", cursor.path()))
            .unwrap_or_default();
        LoweringError::PreconditionViolation {
            kind: violation.kind,
            position: violation.offset,
            detail: format!("{:?}: {}{location}", violation.invariant, violation.detail),
        }
    }

    pub(crate) fn internal(rule: &'static str, detail: impl Into<String>, subtree: &SyntaxNode) -> Self {
        LoweringError::InternalLoweringError {
            rule,
            detail: detail.into(),
            subtree: subtree.full_text(),
        }
    }
}

impl From<RewriteError> for LoweringError {
    fn from(err: RewriteError) -> Self {
        LoweringError::InternalLoweringError {
            rule: "rewrite",
            detail: err.to_string(),
            subtree: String::new(),
        }
    }
}
