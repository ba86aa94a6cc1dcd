//! Token uniqueness.
//!
//! Lowering rules reuse token objects freely (a class name appears in the
//! wrapper, the constructor and every member assignment). Before a tree
//! leaves `lower`, each token object must occupy a single position; repeats
//! are replaced by fresh copies with the same content.

use rustc_hash::FxHashSet;
use tracing::debug;
use tsdl_syntax::{RewriteError, SyntaxNode, SyntaxRewriter, SyntaxToken, rewrite_root};

#[derive(Default)]
struct TokenDeduplicator {
    seen: FxHashSet<usize>,
    copies: usize,
}

impl SyntaxRewriter for TokenDeduplicator {
    type Error = RewriteError;

    fn visit_token(&mut self, token: &SyntaxToken) -> Result<SyntaxToken, RewriteError> {
        if self.seen.insert(token.identity()) {
            return Ok(token.clone());
        }
        self.copies += 1;
        Ok(token.copy_instance())
    }
}

/// `root` with every repeated token object replaced by a copy.
///
/// A tree whose tokens are already unique is returned as is.
pub fn ensure_token_uniqueness(root: &SyntaxNode) -> Result<SyntaxNode, RewriteError> {
    let mut deduplicator = TokenDeduplicator::default();
    let result = rewrite_root(&mut deduplicator, root)?;
    debug!(
        tokens = deduplicator.seen.len(),
        copies = deduplicator.copies,
        "token uniqueness"
    );
    Ok(result)
}
