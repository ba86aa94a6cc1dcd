//! Error types for the syntax tree model.

use crate::ast::NodeKind;
use thiserror::Error;

/// Failures of indexed access into trivia lists and node lists.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("index {index} is out of range for a list of {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}

/// A rewrite produced something the parent slot cannot hold.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// A single-element slot received zero or several replacement nodes.
    #[error("slot {slot} of {parent:?} requires exactly one node, rewrite produced {produced}")]
    SlotFanOut {
        parent: NodeKind,
        slot: usize,
        produced: usize,
    },
    /// A required slot was removed by a rewrite.
    #[error("required slot {slot} of {parent:?} was removed")]
    RequiredSlotRemoved { parent: NodeKind, slot: usize },
    /// A rebuilt node no longer matches its slot schema.
    #[error("{kind:?} is malformed: {detail}")]
    Malformed { kind: NodeKind, detail: String },
}

/// The global tree invariant that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invariant {
    /// Slot contents disagree with the node kind's schema.
    Shape,
    /// A composite's full width differs from the sum of its children.
    Width,
    /// A separated list's node count is not `separators + 1`.
    SeparatedListArity,
    /// A token object appears at more than one tree position.
    TokenUniqueness,
    /// Rendered leaf text differs from the source it was parsed from.
    FullFidelity,
}

/// A violated invariant, located by node kind and full-start offset.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{invariant:?} invariant violated at {kind:?} (offset {offset}): {detail}")]
pub struct InvariantViolation {
    pub invariant: Invariant,
    pub kind: NodeKind,
    pub offset: usize,
    pub detail: String,
}
