//! Chain Formatting
//!
//! Member chains (`a.b.c`), juxtaposition (`a b`) and interpretation
//! (`@x`). A chain is one group: it stays on one line, or every spaced
//! element after the first moves to its own indented line. Unspaced elements
//! stay attached to the one before them.

use maraca_ir::{Bracket, Chained, Level, NodeId, NodeKind};

use super::literals::is_bare;
use super::Compiler;
use crate::doc::{concat, group, indent, line, nil, softline, Doc};
use crate::docs;
use crate::error::FormatError;

impl Compiler<'_> {
    pub(super) fn dot_chain(&mut self, items: &[Chained]) -> Result<Doc, FormatError> {
        let Some((first, rest)) = items.split_first() else {
            return Ok(nil());
        };
        let first = self.child(first.node, Level::Atom)?;
        let mut tail = Vec::with_capacity(rest.len());
        for item in rest {
            tail.push(docs![softline(), ".", self.child(item.node, Level::Atom)?]);
        }
        Ok(group(docs![first, indent(concat(tail))]))
    }

    pub(super) fn juxtapose(&mut self, items: &[Chained]) -> Result<Doc, FormatError> {
        let Some((first, rest)) = items.split_first() else {
            return Ok(nil());
        };
        let mut prev = *first;
        let first = self.child(first.node, Level::Dot)?;
        let mut tail = Vec::with_capacity(rest.len());
        for item in rest {
            let doc = self.child(item.node, Level::Dot)?;
            if prev.space_after {
                tail.push(docs![line(), doc]);
            } else if self.fuses(prev.node, item.node) {
                // Two words printed back to back would read as one, and a
                // space would change the spacing bit.
                tail.push(docs!["(", doc, ")"]);
            } else {
                tail.push(doc);
            }
            prev = *item;
        }
        Ok(group(docs![first, indent(concat(tail))]))
    }

    /// `@` per level, then the body. A nested interpretation keeps its own
    /// parentheses so the levels stay apart.
    pub(super) fn interpret(&mut self, level: u8, body: NodeId) -> Result<Doc, FormatError> {
        let marks = self.text(body, "@".repeat(usize::from(level)))?;
        let body = if matches!(self.arena.kind(body), Some(NodeKind::Interpret { .. })) {
            docs!["(", self.compile_node(body)?, ")"]
        } else {
            self.child(body, Level::Atom)?
        };
        Ok(docs![marks, body])
    }

    /// Whether `next` printed right after `prev` would read as part of it.
    fn fuses(&self, prev: NodeId, next: NodeId) -> bool {
        // Either side already sits in parentheses.
        if self.arena.level(prev) < Level::Dot || self.arena.level(next) < Level::Dot {
            return false;
        }
        let first = self.first_atom(next).and_then(|id| self.arena.kind(id));
        let starts_word = matches!(first, Some(NodeKind::Value(v)) if is_bare(v));
        match self.last_atom(prev).and_then(|id| self.arena.kind(id)) {
            Some(NodeKind::Value(v)) if is_bare(v) => starts_word,
            // Library names also take `_`, which is how a blank prints.
            Some(NodeKind::Library(_)) => {
                starts_word || matches!(first, Some(NodeKind::Value(v)) if v == " ")
            }
            _ => false,
        }
    }

    /// The node printed last when `id` is an element of a chain.
    fn last_atom(&self, id: NodeId) -> Option<NodeId> {
        match self.arena.kind(id)? {
            NodeKind::Interpret { body, .. } => self.last_atom(*body),
            NodeKind::Combine { items, .. } => self.last_atom(items.last()?.node),
            NodeKind::List {
                bracket: Bracket::None,
                items,
            } if items.len() == 1 => self.last_atom(items[0]),
            _ => Some(id),
        }
    }

    /// The node printed first when `id` is an element of a chain.
    fn first_atom(&self, id: NodeId) -> Option<NodeId> {
        match self.arena.kind(id)? {
            NodeKind::Combine { items, .. } => self.first_atom(items.first()?.node),
            NodeKind::List {
                bracket: Bracket::None,
                items,
            } if items.len() == 1 => self.first_atom(items[0]),
            _ => Some(id),
        }
    }
}
