//! Generic bottom-up rewriter.
//!
//! [`SyntaxRewriter`] has one hook per [`NodeKind`]; every hook defaults to
//! [`walk_node`], which rewrites the children and rebuilds the node only when
//! at least one child came back as a different object. A rewriter with no
//! overrides therefore returns the input tree itself, and unaffected
//! subtrees stay shared with the input after any rewrite.
//!
//! A hook returns a [`Lowered`] value: list members may be removed or fan
//! out into several replacements; single-node slots accept exactly one node
//! (or removal, when the slot is optional).

use crate::ast::{NodeKind, SlotShape};
use crate::error::RewriteError;
use crate::node::{SeparatedItem, SeparatedList, SyntaxElement, SyntaxList, SyntaxNode};
use crate::token::SyntaxToken;

/// Result of visiting one node.
#[derive(Clone, Debug)]
pub enum Lowered {
    /// Delete the element from its parent.
    Removed,
    Node(SyntaxNode),
    /// Replace one list member with several.
    Many(Vec<SyntaxNode>),
}

impl Lowered {
    pub fn into_nodes(self) -> Vec<SyntaxNode> {
        match self {
            Lowered::Removed => Vec::new(),
            Lowered::Node(node) => vec![node],
            Lowered::Many(nodes) => nodes,
        }
    }
}

impl From<SyntaxNode> for Lowered {
    fn from(node: SyntaxNode) -> Self {
        Lowered::Node(node)
    }
}

macro_rules! define_rewriter {
    ($( $kind:ident $visit:ident { $($field:ident : $shape:ident),* $(,)? } )*) => {
        /// A tree-to-tree transform dispatched by node kind.
        pub trait SyntaxRewriter {
            type Error: From<RewriteError>;

            fn visit_token(&mut self, token: &SyntaxToken) -> Result<SyntaxToken, Self::Error> {
                Ok(token.clone())
            }

            /// Entry point for every node; overriding it wraps the whole walk.
            fn visit_node(&mut self, node: &SyntaxNode) -> Result<Lowered, Self::Error> {
                dispatch_node(self, node)
            }

            $(
                fn $visit(&mut self, node: &SyntaxNode) -> Result<Lowered, Self::Error> {
                    walk_node(self, node).map(Lowered::Node)
                }
            )*
        }

        /// Call the per-kind hook of `rewriter` for `node`.
        pub fn dispatch_node<R: SyntaxRewriter + ?Sized>(
            rewriter: &mut R,
            node: &SyntaxNode,
        ) -> Result<Lowered, R::Error> {
            match node.kind() {
                $(NodeKind::$kind => rewriter.$visit(node),)*
            }
        }
    };
}

crate::ast::with_node_table!(define_rewriter);

/// Rewrite `root`, which must come back as exactly one node.
pub fn rewrite_root<R: SyntaxRewriter + ?Sized>(
    rewriter: &mut R,
    root: &SyntaxNode,
) -> Result<SyntaxNode, R::Error> {
    match rewriter.visit_node(root)? {
        Lowered::Node(node) => Ok(node),
        Lowered::Removed => Err(RewriteError::SlotFanOut {
            parent: root.kind(),
            slot: 0,
            produced: 0,
        }
        .into()),
        Lowered::Many(mut nodes) if nodes.len() == 1 => Ok(nodes.remove(0)),
        Lowered::Many(nodes) => Err(RewriteError::SlotFanOut {
            parent: root.kind(),
            slot: 0,
            produced: nodes.len(),
        }
        .into()),
    }
}

/// Rewrite every child of `node`, rebuilding it only if a child changed.
pub fn walk_node<R: SyntaxRewriter + ?Sized>(
    rewriter: &mut R,
    node: &SyntaxNode,
) -> Result<SyntaxNode, R::Error> {
    let shapes = node.kind().slot_shapes();
    let mut changed = false;
    let mut slots = Vec::with_capacity(node.slots().len());
    for (index, slot) in node.slots().iter().enumerate() {
        let Some(element) = slot else {
            slots.push(None);
            continue;
        };
        let optional = shapes.get(index).copied().is_some_and(SlotShape::is_optional);
        let rewritten = match element {
            SyntaxElement::Token(token) => {
                Some(SyntaxElement::Token(rewriter.visit_token(token)?))
            }
            SyntaxElement::Node(child) => {
                match single_node(rewriter.visit_node(child)?, node.kind(), index, optional)? {
                    Some(child) => Some(SyntaxElement::Node(child)),
                    None => None,
                }
            }
            SyntaxElement::List(list) => Some(SyntaxElement::List(walk_list(rewriter, list)?)),
            SyntaxElement::SeparatedList(list) => Some(SyntaxElement::SeparatedList(
                walk_separated_list(rewriter, list, node.kind(), index)?,
            )),
        };
        changed |= match &rewritten {
            Some(new) => !new.ptr_eq(element),
            None => true,
        };
        slots.push(rewritten);
    }
    if !changed {
        return Ok(node.clone());
    }
    Ok(SyntaxNode::new(node.kind(), slots)?)
}

fn single_node(
    lowered: Lowered,
    parent: NodeKind,
    slot: usize,
    optional: bool,
) -> Result<Option<SyntaxNode>, RewriteError> {
    match lowered {
        Lowered::Node(node) => Ok(Some(node)),
        Lowered::Removed if optional => Ok(None),
        Lowered::Removed => Err(RewriteError::RequiredSlotRemoved { parent, slot }),
        Lowered::Many(mut nodes) if nodes.len() == 1 => Ok(Some(nodes.remove(0))),
        Lowered::Many(nodes) => Err(RewriteError::SlotFanOut {
            parent,
            slot,
            produced: nodes.len(),
        }),
    }
}

/// Rewrite list members, flattening removals and fan-out.
pub fn walk_list<R: SyntaxRewriter + ?Sized>(
    rewriter: &mut R,
    list: &SyntaxList,
) -> Result<SyntaxList, R::Error> {
    let mut changed = false;
    let mut nodes = Vec::with_capacity(list.len());
    for member in list.iter() {
        match rewriter.visit_node(member)? {
            Lowered::Node(node) => {
                changed |= !node.ptr_eq(member);
                nodes.push(node);
            }
            Lowered::Removed => changed = true,
            Lowered::Many(many) => {
                changed = true;
                nodes.extend(many);
            }
        }
    }
    if !changed {
        return Ok(list.clone());
    }
    Ok(SyntaxList::new(nodes))
}

/// Rewrite the nodes and separators of a separated list.
///
/// Separated members must map to exactly one node each.
pub fn walk_separated_list<R: SyntaxRewriter + ?Sized>(
    rewriter: &mut R,
    list: &SeparatedList,
    parent: NodeKind,
    slot: usize,
) -> Result<SeparatedList, R::Error> {
    let mut changed = false;
    let mut nodes = Vec::with_capacity(list.node_count());
    let mut separators = Vec::with_capacity(list.separator_count());
    for item in list.items() {
        match item {
            SeparatedItem::Node(member) => {
                let Some(node) = single_node(rewriter.visit_node(member)?, parent, slot, false)?
                else {
                    return Err(RewriteError::RequiredSlotRemoved { parent, slot }.into());
                };
                changed |= !node.ptr_eq(member);
                nodes.push(node);
            }
            SeparatedItem::Separator(separator) => {
                let token = rewriter.visit_token(separator)?;
                changed |= !token.ptr_eq(separator);
                separators.push(token);
            }
        }
    }
    if !changed {
        return Ok(list.clone());
    }
    Ok(SeparatedList::new(nodes, separators))
}

#[cfg(test)]
#[path = "../tests/rewriter_tests.rs"]
mod tests;
