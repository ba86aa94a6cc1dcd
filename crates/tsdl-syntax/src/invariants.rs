//! Global tree invariants.
//!
//! - every slot matches its kind's schema;
//! - every container's cached full width is the sum of its children;
//! - separated lists hold `separators + 1` nodes unless empty;
//! - no token object appears at two positions.
//!
//! [`check_full_fidelity`] additionally compares the rendered leaves against
//! the source text a tree was parsed from.

use crate::ast::NodeKind;
use crate::error::{Invariant, InvariantViolation};
use crate::node::{SeparatedItem, SyntaxElement, SyntaxNode};
use crate::token::SyntaxToken;
use rustc_hash::FxHashSet;
use tracing::trace;

struct InvariantChecker {
    seen_tokens: FxHashSet<usize>,
    offset: usize,
}

/// Check the structural invariants of `root` and everything below it.
pub fn check_invariants(root: &SyntaxNode) -> Result<(), InvariantViolation> {
    let mut checker = InvariantChecker {
        seen_tokens: FxHashSet::default(),
        offset: 0,
    };
    checker.check_node(root)?;
    trace!(tokens = checker.seen_tokens.len(), "tree invariants hold");
    Ok(())
}

/// Rendering the leaves of `root` must reproduce `source` exactly.
pub fn check_full_fidelity(root: &SyntaxNode, source: &str) -> Result<(), InvariantViolation> {
    let rendered = root.full_text();
    if rendered == source {
        return Ok(());
    }
    let offset = rendered
        .bytes()
        .zip(source.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or(rendered.len().min(source.len()));
    Err(InvariantViolation {
        invariant: Invariant::FullFidelity,
        kind: root.kind(),
        offset,
        detail: format!(
            "rendered {} bytes, source has {} bytes",
            rendered.len(),
            source.len()
        ),
    })
}

impl InvariantChecker {
    fn violation(&self, invariant: Invariant, kind: NodeKind, detail: String) -> InvariantViolation {
        InvariantViolation {
            invariant,
            kind,
            offset: self.offset,
            detail,
        }
    }

    fn check_node(&mut self, node: &SyntaxNode) -> Result<(), InvariantViolation> {
        let kind = node.kind();
        let start = self.offset;
        let shapes = kind.slot_shapes();
        if shapes.len() != node.slots().len() {
            return Err(self.violation(
                Invariant::Shape,
                kind,
                format!("{} slots, schema has {}", node.slots().len(), shapes.len()),
            ));
        }
        for (index, slot) in node.slots().iter().enumerate() {
            match slot {
                None if shapes[index].is_optional() => {}
                None => {
                    return Err(self.violation(
                        Invariant::Shape,
                        kind,
                        format!("required slot `{}` is absent", kind.slot_names()[index]),
                    ));
                }
                Some(element) => self.check_element(kind, element)?,
            }
        }
        let measured = self.offset - start;
        if measured != node.full_width() {
            return Err(InvariantViolation {
                invariant: Invariant::Width,
                kind,
                offset: start,
                detail: format!("cached full width {} but children sum to {measured}", node.full_width()),
            });
        }
        Ok(())
    }

    fn check_element(&mut self, parent: NodeKind, element: &SyntaxElement) -> Result<(), InvariantViolation> {
        match element {
            SyntaxElement::Token(token) => self.check_token(parent, token),
            SyntaxElement::Node(node) => self.check_node(node),
            SyntaxElement::List(list) => {
                let start = self.offset;
                for node in list.iter() {
                    self.check_node(node)?;
                }
                self.check_list_width(parent, start, list.full_width())
            }
            SyntaxElement::SeparatedList(list) => {
                let nodes = list.node_count();
                let separators = list.separator_count();
                if !list.is_empty() && nodes != separators + 1 {
                    return Err(self.violation(
                        Invariant::SeparatedListArity,
                        parent,
                        format!("{nodes} nodes with {separators} separators"),
                    ));
                }
                let start = self.offset;
                for item in list.items() {
                    match item {
                        SeparatedItem::Node(node) => self.check_node(node)?,
                        SeparatedItem::Separator(token) => self.check_token(parent, token)?,
                    }
                }
                self.check_list_width(parent, start, list.full_width())
            }
        }
    }

    fn check_list_width(&self, parent: NodeKind, start: usize, cached: usize) -> Result<(), InvariantViolation> {
        let measured = self.offset - start;
        if measured == cached {
            return Ok(());
        }
        Err(InvariantViolation {
            invariant: Invariant::Width,
            kind: parent,
            offset: start,
            detail: format!("list caches full width {cached} but members sum to {measured}"),
        })
    }

    fn check_token(&mut self, parent: NodeKind, token: &SyntaxToken) -> Result<(), InvariantViolation> {
        if !self.seen_tokens.insert(token.identity()) {
            return Err(self.violation(
                Invariant::TokenUniqueness,
                parent,
                format!("token {token:?} appears more than once"),
            ));
        }
        self.offset += token.full_width();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::kind::SyntaxKind;
    use crate::node::SeparatedList;

    #[test]
    fn synthesized_statement_is_valid() {
        let statement = factory::expression_statement(factory::invocation(
            factory::identifier_name("f"),
            vec![factory::identifier_name("a"), factory::identifier_name("b")],
        ));
        assert_eq!(check_invariants(&statement), Ok(()));
    }

    #[test]
    fn shared_token_is_reported() {
        let name = factory::identifier("C");
        let statement = factory::expression_statement(factory::assignment(
            factory::name_expression(name.clone()),
            factory::name_expression(name),
        ));
        let err = check_invariants(&statement).expect_err("token shared twice");
        assert_eq!(err.invariant, Invariant::TokenUniqueness);
        assert_eq!(err.offset, 4, "second occurrence starts after `C = `");
    }

    #[test]
    fn separated_arity_is_reported() {
        let list = SeparatedList::new(
            vec![factory::identifier_name("a"), factory::identifier_name("b")],
            vec![],
        );
        let args = crate::ast::ArgumentList {
            open_paren_token: factory::token(SyntaxKind::OpenParenToken),
            arguments: list,
            close_paren_token: factory::token(SyntaxKind::CloseParenToken),
        }
        .build();
        let err = check_invariants(&args).expect_err("two nodes, no separator");
        assert_eq!(err.invariant, Invariant::SeparatedListArity);
    }

    #[test]
    fn fidelity_mismatch_reports_offset() {
        let node = factory::identifier_name("abc");
        assert!(check_full_fidelity(&node, "abc").is_ok());
        let err = check_full_fidelity(&node, "abd").expect_err("differs");
        assert_eq!(err.offset, 2);
    }
}
