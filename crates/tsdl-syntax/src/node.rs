//! Composite nodes, lists and separated lists.
//!
//! A node is an immutable, array-indexed set of child slots whose shapes are
//! fixed per [`NodeKind`] (see [`crate::ast`]). Each container caches its full
//! width at construction, so width queries never walk the tree.

use crate::ast::{NodeKind, SlotShape};
use crate::error::{RewriteError, SyntaxError};
use crate::kind::SyntaxKind;
use crate::token::SyntaxToken;
use crate::trivia::TriviaList;
use std::fmt;
use std::sync::Arc;

/// Content of one child slot.
#[derive(Clone, Debug)]
pub enum SyntaxElement {
    Token(SyntaxToken),
    Node(SyntaxNode),
    List(SyntaxList),
    SeparatedList(SeparatedList),
}

impl SyntaxElement {
    pub fn full_width(&self) -> usize {
        match self {
            SyntaxElement::Token(token) => token.full_width(),
            SyntaxElement::Node(node) => node.full_width(),
            SyntaxElement::List(list) => list.full_width(),
            SyntaxElement::SeparatedList(list) => list.full_width(),
        }
    }

    pub fn write_to(&self, out: &mut String) {
        match self {
            SyntaxElement::Token(token) => token.write_to(out),
            SyntaxElement::Node(node) => node.write_to(out),
            SyntaxElement::List(list) => list.nodes().iter().for_each(|n| n.write_to(out)),
            SyntaxElement::SeparatedList(list) => list.write_to(out),
        }
    }

    /// Same underlying object.
    pub fn ptr_eq(&self, other: &SyntaxElement) -> bool {
        match (self, other) {
            (SyntaxElement::Token(a), SyntaxElement::Token(b)) => a.ptr_eq(b),
            (SyntaxElement::Node(a), SyntaxElement::Node(b)) => a.ptr_eq(b),
            (SyntaxElement::List(a), SyntaxElement::List(b)) => a.ptr_eq(b),
            (SyntaxElement::SeparatedList(a), SyntaxElement::SeparatedList(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn for_each_token(&self, f: &mut dyn FnMut(&SyntaxToken)) {
        match self {
            SyntaxElement::Token(token) => f(token),
            SyntaxElement::Node(node) => node.for_each_token(f),
            SyntaxElement::List(list) => list.nodes().iter().for_each(|n| n.for_each_token(f)),
            SyntaxElement::SeparatedList(list) => {
                for item in list.items() {
                    match item {
                        SeparatedItem::Node(node) => node.for_each_token(f),
                        SeparatedItem::Separator(token) => f(token),
                    }
                }
            }
        }
    }

    fn shape_matches(&self, shape: SlotShape) -> bool {
        matches!(
            (self, shape),
            (SyntaxElement::Token(_), SlotShape::Token | SlotShape::OptionalToken)
                | (SyntaxElement::Node(_), SlotShape::Node | SlotShape::OptionalNode)
                | (SyntaxElement::List(_), SlotShape::List)
                | (SyntaxElement::SeparatedList(_), SlotShape::SeparatedList)
        )
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        SyntaxElement::Token(token)
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        SyntaxElement::Node(node)
    }
}

impl From<SyntaxList> for SyntaxElement {
    fn from(list: SyntaxList) -> Self {
        SyntaxElement::List(list)
    }
}

impl From<SeparatedList> for SyntaxElement {
    fn from(list: SeparatedList) -> Self {
        SyntaxElement::SeparatedList(list)
    }
}

struct NodeData {
    kind: NodeKind,
    slots: Box<[Option<SyntaxElement>]>,
    full_width: usize,
}

/// An immutable composite node.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Build a node, validating slots against the kind's schema.
    pub fn new(kind: NodeKind, slots: Vec<Option<SyntaxElement>>) -> Result<Self, RewriteError> {
        let shapes = kind.slot_shapes();
        if shapes.len() != slots.len() {
            return Err(RewriteError::Malformed {
                kind,
                detail: format!("expected {} slots, found {}", shapes.len(), slots.len()),
            });
        }
        for (index, (slot, shape)) in slots.iter().zip(shapes).enumerate() {
            match slot {
                None if shape.is_optional() => {}
                None => return Err(RewriteError::RequiredSlotRemoved { parent: kind, slot: index }),
                Some(element) if element.shape_matches(*shape) => {}
                Some(_) => {
                    return Err(RewriteError::Malformed {
                        kind,
                        detail: format!("slot {index} does not hold a {shape:?}"),
                    });
                }
            }
        }
        Ok(Self::from_slots(kind, slots))
    }

    /// Build a node whose slots are shape-correct by construction.
    pub(crate) fn from_slots(kind: NodeKind, slots: Vec<Option<SyntaxElement>>) -> Self {
        let full_width = slots.iter().flatten().map(SyntaxElement::full_width).sum();
        SyntaxNode(Arc::new(NodeData {
            kind,
            slots: slots.into_boxed_slice(),
            full_width,
        }))
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    #[inline]
    pub fn slots(&self) -> &[Option<SyntaxElement>] {
        &self.0.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SyntaxElement> {
        self.0.slots.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn full_width(&self) -> usize {
        self.0.full_width
    }

    /// Width excluding the leading trivia of the first token and the
    /// trailing trivia of the last one.
    pub fn width(&self) -> usize {
        let leading = self.leading_trivia().full_width();
        let trailing = self.trailing_trivia().full_width();
        self.full_width().saturating_sub(leading + trailing)
    }

    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.full_width());
        self.write_to(&mut text);
        text
    }

    pub fn write_to(&self, out: &mut String) {
        for slot in self.slots().iter().flatten() {
            slot.write_to(out);
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Visit every token (including empty ones) in document order.
    pub fn for_each_token(&self, f: &mut dyn FnMut(&SyntaxToken)) {
        for slot in self.slots().iter().flatten() {
            slot.for_each_token(f);
        }
    }

    pub fn tokens(&self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::new();
        self.for_each_token(&mut |token| tokens.push(token.clone()));
        tokens
    }

    /// Child nodes in slot order, flattening lists.
    pub fn child_nodes(&self) -> Vec<SyntaxNode> {
        let mut children = Vec::new();
        for slot in self.slots().iter().flatten() {
            match slot {
                SyntaxElement::Token(_) => {}
                SyntaxElement::Node(node) => children.push(node.clone()),
                SyntaxElement::List(list) => children.extend(list.nodes().iter().cloned()),
                SyntaxElement::SeparatedList(list) => children.extend(list.nodes().iter().cloned()),
            }
        }
        children
    }

    /// True if this node or any descendant satisfies `predicate`.
    pub fn any_node(&self, predicate: &mut dyn FnMut(&SyntaxNode) -> bool) -> bool {
        predicate(self)
            || self
                .child_nodes()
                .iter()
                .any(|child| child.any_node(&mut *predicate))
    }

    /// First token with non-zero full width.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        let mut found = None;
        self.for_each_token(&mut |token| {
            if found.is_none() && token.full_width() > 0 {
                found = Some(token.clone());
            }
        });
        found
    }

    /// Last token with non-zero full width.
    pub fn last_token(&self) -> Option<SyntaxToken> {
        let mut found = None;
        self.for_each_token(&mut |token| {
            if token.full_width() > 0 {
                found = Some(token.clone());
            }
        });
        found
    }

    pub fn leading_trivia(&self) -> TriviaList {
        self.first_token()
            .map(|token| token.leading_trivia().clone())
            .unwrap_or_default()
    }

    pub fn trailing_trivia(&self) -> TriviaList {
        self.last_token()
            .map(|token| token.trailing_trivia().clone())
            .unwrap_or_default()
    }

    /// Replace the token object `target` (by identity) with `replacement`.
    ///
    /// Returns `self` unchanged (same `Arc`) when `target` is not found.
    pub fn replace_token(&self, target: &SyntaxToken, replacement: &SyntaxToken) -> SyntaxNode {
        let mut changed = false;
        let slots: Vec<Option<SyntaxElement>> = self
            .slots()
            .iter()
            .map(|slot| {
                slot.as_ref().map(|element| {
                    let rewritten = replace_in_element(element, target, replacement);
                    changed |= !rewritten.ptr_eq(element);
                    rewritten
                })
            })
            .collect();
        if !changed {
            return self.clone();
        }
        SyntaxNode::from_slots(self.kind(), slots)
    }

    pub fn with_leading_trivia(&self, trivia: TriviaList) -> SyntaxNode {
        self.map_edge_token(Edge::First, &mut |token| token.with_leading_trivia(trivia.clone()))
            .unwrap_or_else(|| self.clone())
    }

    pub fn with_trailing_trivia(&self, trivia: TriviaList) -> SyntaxNode {
        self.map_edge_token(Edge::Last, &mut |token| token.with_trailing_trivia(trivia.clone()))
            .unwrap_or_else(|| self.clone())
    }

    /// Rebuild with the first (or last) non-zero-width token replaced by `f`.
    ///
    /// Only that one position changes, even if the same token object occurs
    /// elsewhere in the subtree. `None` if the node has no such token.
    pub fn map_edge_token(
        &self,
        edge: Edge,
        f: &mut dyn FnMut(&SyntaxToken) -> SyntaxToken,
    ) -> Option<SyntaxNode> {
        let count = self.slots().len();
        for step in 0..count {
            let index = edge.index(step, count);
            let Some(element) = self.slot(index) else {
                continue;
            };
            if let Some(replaced) = map_edge_in_element(element, edge, f) {
                let mut slots = self.slots().to_vec();
                slots[index] = Some(replaced);
                return Some(SyntaxNode::from_slots(self.kind(), slots));
            }
        }
        None
    }
}

/// Which end of a subtree an edit applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

impl Edge {
    fn index(self, step: usize, count: usize) -> usize {
        match self {
            Edge::First => step,
            Edge::Last => count - 1 - step,
        }
    }
}

fn map_edge_in_element(
    element: &SyntaxElement,
    edge: Edge,
    f: &mut dyn FnMut(&SyntaxToken) -> SyntaxToken,
) -> Option<SyntaxElement> {
    match element {
        SyntaxElement::Token(token) => {
            (token.full_width() > 0).then(|| SyntaxElement::Token(f(token)))
        }
        SyntaxElement::Node(node) => node.map_edge_token(edge, f).map(SyntaxElement::Node),
        SyntaxElement::List(list) => {
            let count = list.len();
            for step in 0..count {
                let index = edge.index(step, count);
                if let Some(replaced) = list.nodes()[index].map_edge_token(edge, f) {
                    let mut nodes = list.nodes().to_vec();
                    nodes[index] = replaced;
                    return Some(SyntaxElement::List(SyntaxList::new(nodes)));
                }
            }
            None
        }
        SyntaxElement::SeparatedList(list) => {
            let items: Vec<SeparatedItem<'_>> = list.items().collect();
            let count = items.len();
            for step in 0..count {
                let index = edge.index(step, count);
                let mut nodes = list.nodes().to_vec();
                let mut separators = list.separators().to_vec();
                let replaced = match items[index] {
                    SeparatedItem::Node(node) => node.map_edge_token(edge, f).map(|new| {
                        if let Some(slot) = nodes.iter_mut().find(|n| n.ptr_eq(node)) {
                            *slot = new;
                        }
                    }),
                    SeparatedItem::Separator(token) => (token.full_width() > 0).then(|| {
                        if let Some(slot) = separators.iter_mut().find(|s| s.ptr_eq(token)) {
                            *slot = f(token);
                        }
                    }),
                };
                if replaced.is_some() {
                    return Some(SyntaxElement::SeparatedList(SeparatedList::new(
                        nodes, separators,
                    )));
                }
            }
            None
        }
    }
}

fn replace_in_element(
    element: &SyntaxElement,
    target: &SyntaxToken,
    replacement: &SyntaxToken,
) -> SyntaxElement {
    match element {
        SyntaxElement::Token(token) if token.ptr_eq(target) => {
            SyntaxElement::Token(replacement.clone())
        }
        SyntaxElement::Token(_) => element.clone(),
        SyntaxElement::Node(node) => SyntaxElement::Node(node.replace_token(target, replacement)),
        SyntaxElement::List(list) => {
            let nodes: Vec<_> = list
                .nodes()
                .iter()
                .map(|node| node.replace_token(target, replacement))
                .collect();
            if nodes.iter().zip(list.nodes()).all(|(a, b)| a.ptr_eq(b)) {
                element.clone()
            } else {
                SyntaxElement::List(SyntaxList::new(nodes))
            }
        }
        SyntaxElement::SeparatedList(list) => {
            let nodes: Vec<_> = list
                .nodes()
                .iter()
                .map(|node| node.replace_token(target, replacement))
                .collect();
            let separators: Vec<_> = list
                .separators()
                .iter()
                .map(|sep| {
                    if sep.ptr_eq(target) {
                        replacement.clone()
                    } else {
                        sep.clone()
                    }
                })
                .collect();
            let unchanged = nodes.iter().zip(list.nodes()).all(|(a, b)| a.ptr_eq(b))
                && separators
                    .iter()
                    .zip(list.separators())
                    .all(|(a, b)| a.ptr_eq(b));
            if unchanged {
                element.clone()
            } else {
                SyntaxElement::SeparatedList(SeparatedList::new(nodes, separators))
            }
        }
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_text())
    }
}

struct ListData {
    nodes: Box<[SyntaxNode]>,
    full_width: usize,
}

/// An ordered list of nodes.
#[derive(Clone)]
pub struct SyntaxList(Arc<ListData>);

impl SyntaxList {
    pub fn new(nodes: Vec<SyntaxNode>) -> Self {
        let full_width = nodes.iter().map(SyntaxNode::full_width).sum();
        SyntaxList(Arc::new(ListData {
            nodes: nodes.into_boxed_slice(),
            full_width,
        }))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[inline]
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.0.nodes
    }

    pub fn len(&self) -> usize {
        self.0.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&SyntaxNode, SyntaxError> {
        self.0.nodes.get(index).ok_or(SyntaxError::IndexOutOfRange {
            index,
            count: self.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxNode> {
        self.0.nodes.iter()
    }

    #[inline]
    pub fn full_width(&self) -> usize {
        self.0.full_width
    }

    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SyntaxList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.nodes()).finish()
    }
}

impl FromIterator<SyntaxNode> for SyntaxList {
    fn from_iter<I: IntoIterator<Item = SyntaxNode>>(iter: I) -> Self {
        SyntaxList::new(iter.into_iter().collect())
    }
}

struct SeparatedData {
    nodes: Box<[SyntaxNode]>,
    separators: Box<[SyntaxToken]>,
    full_width: usize,
}

/// Nodes interleaved with separator tokens: `n0 s0 n1 s1 ... nk`.
///
/// A well-formed list has `separators + 1` nodes unless it is empty; the
/// invariant checker reports any other arity.
#[derive(Clone)]
pub struct SeparatedList(Arc<SeparatedData>);

/// One element of a separated list in document order.
#[derive(Clone, Copy, Debug)]
pub enum SeparatedItem<'a> {
    Node(&'a SyntaxNode),
    Separator(&'a SyntaxToken),
}

impl SeparatedList {
    pub fn new(nodes: Vec<SyntaxNode>, separators: Vec<SyntaxToken>) -> Self {
        let full_width = nodes.iter().map(SyntaxNode::full_width).sum::<usize>()
            + separators.iter().map(SyntaxToken::full_width).sum::<usize>();
        SeparatedList(Arc::new(SeparatedData {
            nodes: nodes.into_boxed_slice(),
            separators: separators.into_boxed_slice(),
            full_width,
        }))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Separate `nodes` with fresh tokens from `separator`.
    pub fn from_nodes(nodes: Vec<SyntaxNode>, mut separator: impl FnMut() -> SyntaxToken) -> Self {
        let separators = (1..nodes.len()).map(|_| separator()).collect();
        Self::new(nodes, separators)
    }

    /// Comma-separated list of `nodes`, commas followed by a single space.
    pub fn comma_separated(nodes: Vec<SyntaxNode>) -> Self {
        Self::from_nodes(nodes, || {
            SyntaxToken::from_kind(SyntaxKind::CommaToken).with_trailing_trivia(TriviaList::space(" "))
        })
    }

    #[inline]
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.0.nodes
    }

    #[inline]
    pub fn separators(&self) -> &[SyntaxToken] {
        &self.0.separators
    }

    pub fn node_count(&self) -> usize {
        self.0.nodes.len()
    }

    pub fn separator_count(&self) -> usize {
        self.0.separators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.nodes.is_empty() && self.0.separators.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&SyntaxNode, SyntaxError> {
        self.0.nodes.get(index).ok_or(SyntaxError::IndexOutOfRange {
            index,
            count: self.node_count(),
        })
    }

    /// Elements in document order.
    pub fn items(&self) -> impl Iterator<Item = SeparatedItem<'_>> {
        let mut nodes = self.0.nodes.iter();
        let mut separators = self.0.separators.iter();
        let mut node_turn = true;
        std::iter::from_fn(move || {
            let item = if node_turn {
                nodes
                    .next()
                    .map(SeparatedItem::Node)
                    .or_else(|| separators.next().map(SeparatedItem::Separator))
            } else {
                separators
                    .next()
                    .map(SeparatedItem::Separator)
                    .or_else(|| nodes.next().map(SeparatedItem::Node))
            };
            node_turn = !node_turn;
            item
        })
    }

    #[inline]
    pub fn full_width(&self) -> usize {
        self.0.full_width
    }

    pub fn write_to(&self, out: &mut String) {
        for item in self.items() {
            match item {
                SeparatedItem::Node(node) => node.write_to(out),
                SeparatedItem::Separator(token) => token.write_to(out),
            }
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &SeparatedList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SeparatedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items()).finish()
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
