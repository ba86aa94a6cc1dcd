//! Full-fidelity syntax tree for the tsdl downlevel compiler.
//!
//! The tree is immutable and shared by reference counting:
//! - trivia and trivia lists (`trivia`)
//! - tokens, empty or realized, with decoded values (`token`, `value`)
//! - nodes, lists and separated lists (`node`) with a closed set of kinds
//!   and typed views generated from one table (`ast`)
//! - a node factory for synthesized syntax (`factory`)
//! - the generic bottom-up rewriter (`rewriter`)
//! - parent-aware positioned cursors (`cursor`)
//! - structural equality, invariant checking and token positions

pub mod ast;
pub mod cursor;
pub mod equality;
pub mod error;
pub mod facts;
pub mod factory;
pub mod information_map;
pub mod invariants;
pub mod kind;
pub mod node;
pub mod rewriter;
pub mod token;
pub mod trivia;
pub mod value;

pub use ast::{NodeKind, SlotShape};
pub use cursor::SyntaxCursor;
pub use equality::{EqualityOptions, nodes_structurally_equal};
pub use error::{Invariant, InvariantViolation, RewriteError, SyntaxError};
pub use facts::is_typescript_specific;
pub use information_map::SyntaxInformationMap;
pub use invariants::{check_full_fidelity, check_invariants};
pub use kind::{SyntaxKind, TriviaKind};
pub use node::{Edge, SeparatedItem, SeparatedList, SyntaxElement, SyntaxList, SyntaxNode};
pub use rewriter::{Lowered, SyntaxRewriter, dispatch_node, rewrite_root, walk_list, walk_node};
pub use token::SyntaxToken;
pub use trivia::{SyntaxTrivia, TriviaList};
pub use value::TokenValue;
