//! Positioned, parent-aware views over a tree.
//!
//! Nodes know neither their parent nor their offset, which is what lets one
//! node be shared by several trees. A [`SyntaxCursor`] pairs a node with its
//! absolute full-start offset and the cursor it was reached from. Cursors
//! point up, nodes point down; a cursor never owns its children, so the two
//! directions never form a cycle.

use crate::ast::NodeKind;
use crate::node::{SeparatedItem, SyntaxElement, SyntaxNode};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct SyntaxCursor(Arc<CursorData>);

struct CursorData {
    node: SyntaxNode,
    full_start: usize,
    parent: Option<SyntaxCursor>,
}

impl SyntaxCursor {
    /// Cursor at the root of a tree, offset zero.
    pub fn root(node: SyntaxNode) -> Self {
        SyntaxCursor(Arc::new(CursorData {
            node,
            full_start: 0,
            parent: None,
        }))
    }

    pub fn node(&self) -> &SyntaxNode {
        &self.0.node
    }

    pub fn kind(&self) -> NodeKind {
        self.0.node.kind()
    }

    pub fn full_start(&self) -> usize {
        self.0.full_start
    }

    pub fn full_end(&self) -> usize {
        self.0.full_start + self.0.node.full_width()
    }

    pub fn parent(&self) -> Option<&SyntaxCursor> {
        self.0.parent.as_ref()
    }

    /// Enclosing cursors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &SyntaxCursor> {
        std::iter::successors(self.parent(), |cursor| cursor.parent())
    }

    /// Child nodes in document order, lists flattened.
    pub fn children(&self) -> Vec<SyntaxCursor> {
        let mut children = Vec::new();
        let mut offset = self.0.full_start;
        for slot in self.0.node.slots().iter().flatten() {
            match slot {
                SyntaxElement::Token(token) => offset += token.full_width(),
                SyntaxElement::Node(node) => {
                    children.push(self.child(node, offset));
                    offset += node.full_width();
                }
                SyntaxElement::List(list) => {
                    for node in list.iter() {
                        children.push(self.child(node, offset));
                        offset += node.full_width();
                    }
                }
                SyntaxElement::SeparatedList(list) => {
                    for item in list.items() {
                        match item {
                            SeparatedItem::Node(node) => {
                                children.push(self.child(node, offset));
                                offset += node.full_width();
                            }
                            SeparatedItem::Separator(token) => offset += token.full_width(),
                        }
                    }
                }
            }
        }
        children
    }

    /// First cursor in pre-order, this one included, matching `predicate`.
    pub fn find(&self, predicate: &mut dyn FnMut(&SyntaxCursor) -> bool) -> Option<SyntaxCursor> {
        if predicate(self) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find(&mut *predicate))
    }

    /// Deepest cursor of `kind` at or below this one whose span holds
    /// `offset`.
    pub fn innermost(&self, offset: usize, kind: NodeKind) -> Option<SyntaxCursor> {
        if !self.contains(offset) {
            return None;
        }
        self.children()
            .iter()
            .find_map(|child| child.innermost(offset, kind))
            .or_else(|| (self.kind() == kind).then(|| self.clone()))
    }

    fn contains(&self, offset: usize) -> bool {
        offset == self.full_start() || (self.full_start() < offset && offset < self.full_end())
    }

    /// Node kinds from the root down to this cursor, `>`-separated.
    pub fn path(&self) -> String {
        let mut kinds: Vec<String> = self
            .ancestors()
            .map(|cursor| format!("{:?}", cursor.kind()))
            .collect();
        kinds.reverse();
        kinds.push(format!("{:?}", self.kind()));
        kinds.join(" > ")
    }

    fn child(&self, node: &SyntaxNode, full_start: usize) -> SyntaxCursor {
        SyntaxCursor(Arc::new(CursorData {
            node: node.clone(),
            full_start,
            parent: Some(self.clone()),
        }))
    }
}

impl fmt::Debug for SyntaxCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_start())
    }
}

#[cfg(test)]
#[path = "../tests/cursor_tests.rs"]
mod tests;
