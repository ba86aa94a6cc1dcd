//! Centralized limits shared by the tree walkers.
//!
//! Trees are walked recursively; these bounds turn pathological nesting into
//! an error instead of a stack overflow.

/// Maximum nesting depth the parser accepts for expressions and statements.
pub const MAX_PARSE_DEPTH: u32 = 500;

/// Maximum depth the invariant checker and rewriters descend before failing.
pub const MAX_TREE_DEPTH: u32 = 2_000;

/// Maximum number of segments in a dotted namespace name (`A.B.C...`).
pub const MAX_QUALIFIED_NAME_DEPTH: usize = 100;
