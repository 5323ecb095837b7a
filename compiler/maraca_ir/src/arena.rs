//! Node arena.
//!
//! Owns every node of one syntax tree. Nodes are appended once and never
//! mutated afterwards; a node may be referenced from several parents.

use crate::{Bracket, Chained, Level, Node, NodeId, NodeKind, Span};

/// Contiguous storage for the nodes of one tree.
#[derive(Clone, Default, Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node with a source span.
    pub fn alloc_at(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1);
        self.nodes.push(Node::new(kind, span));
        NodeId::new(index)
    }

    /// Append a node that has no source location.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.alloc_at(kind, Span::DUMMY)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|node| &node.kind)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node allocated after the first `len`.
    ///
    /// Lets a backtracking parser discard a failed attempt.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(u32::try_from(i).unwrap_or(u32::MAX - 1)), node))
    }

    /// Binding strength of the node as it renders.
    ///
    /// Missing nodes count as atoms so callers never parenthesise them.
    pub fn level(&self, id: NodeId) -> Level {
        let Some(kind) = self.kind(id) else {
            return Level::Atom;
        };
        match kind {
            NodeKind::Function { .. } | NodeKind::Assign { .. } => Level::Item,
            NodeKind::Push { .. } => Level::Push,
            NodeKind::Trigger { .. } => Level::Trigger,
            NodeKind::Binary { op, .. } => op.level(),
            NodeKind::Unary { .. } => Level::Unary,
            NodeKind::Combine { dot: true, .. } => Level::Dot,
            NodeKind::Combine { dot: false, .. } => Level::Juxtapose,
            NodeKind::List {
                bracket: Bracket::None,
                items,
            } => match items.as_slice() {
                [] => Level::Atom,
                [only] => self.level(*only),
                _ if self.is_template(items) => Level::Atom,
                _ => Level::Sequence,
            },
            NodeKind::List { .. }
            | NodeKind::Interpret { .. }
            | NodeKind::Library(_)
            | NodeKind::Value(_)
            | NodeKind::Nil
            | NodeKind::Context
            | NodeKind::Comment(_)
            | NodeKind::Eval(_)
            | NodeKind::Part { .. }
            | NodeKind::Identity
            | NodeKind::Error(_) => Level::Atom,
        }
    }

    /// Whether `items` is exactly one interpolated string, from its `first`
    /// part to its `last` part.
    pub fn is_template(&self, items: &[NodeId]) -> bool {
        let opens = items
            .first()
            .is_some_and(|&id| matches!(self.kind(id), Some(NodeKind::Part { first: true, .. })));
        let closes_at = items
            .iter()
            .position(|&id| matches!(self.kind(id), Some(NodeKind::Part { last: true, .. })));
        opens && closes_at.is_some_and(|i| i + 1 == items.len())
    }

    // Construction helpers for trees built in code.

    pub fn value(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Value(text.into()))
    }

    pub fn list(&mut self, bracket: Bracket, items: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::List { bracket, items })
    }

    pub fn assign(&mut self, key: Option<NodeId>, value: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::Assign { key, value })
    }

    pub fn function(&mut self, key: Option<NodeId>, value: Option<NodeId>, body: NodeId) -> NodeId {
        self.alloc(NodeKind::Function { key, value, body })
    }

    /// Member chain joined with dots.
    pub fn dot_chain(&mut self, items: &[NodeId]) -> NodeId {
        let items = items.iter().map(|&node| Chained::new(node, false)).collect();
        self.alloc(NodeKind::Combine { dot: true, items })
    }

    /// Juxtaposition with a space after every element.
    pub fn spaced_chain(&mut self, items: &[NodeId]) -> NodeId {
        let last = items.len().saturating_sub(1);
        let items = items
            .iter()
            .enumerate()
            .map(|(i, &node)| Chained::new(node, i < last))
            .collect();
        self.alloc(NodeKind::Combine { dot: false, items })
    }
}
