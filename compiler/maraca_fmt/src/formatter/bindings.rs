//! Function and Assignment Formatting

use maraca_ir::{Bracket, Level, NodeId, NodeKind};

use super::Compiler;
use crate::doc::{concat, group, indent, line, nil, softline, Doc};
use crate::docs;
use crate::error::FormatError;

impl Compiler<'_> {
    /// `k=>body`, `v=>>body`, `k=>v=>>body`, `=>body`.
    pub(super) fn function(
        &mut self,
        key: Option<NodeId>,
        value: Option<NodeId>,
        body: NodeId,
    ) -> Result<Doc, FormatError> {
        let mut head = Vec::with_capacity(4);
        if let Some(key) = key {
            head.push(self.child(key, Level::Atom)?);
            head.push(docs!["=>"]);
        }
        if let Some(value) = value {
            head.push(self.child(value, Level::Atom)?);
            head.push(docs!["=>>"]);
        }
        if key.is_none() && value.is_none() {
            head.push(docs!["=>"]);
        }

        // `k=>v=>>x` reads as one function with two bindings.
        let body = if key.is_some() && value.is_none() && self.is_value_function(body) {
            docs!["(", self.compile_node(body)?, ")"]
        } else {
            self.child(body, Level::Item)?
        };

        Ok(group(docs![concat(head), indent(docs![softline(), body])]))
    }

    /// `key:value` and its shorthands.
    pub(super) fn assign(
        &mut self,
        key: Option<NodeId>,
        value: Option<NodeId>,
    ) -> Result<Doc, FormatError> {
        match (key, value) {
            (None, None) => Ok(docs![":"]),
            (Some(key), None) => Ok(docs![self.child(key, Level::Push)?, ":"]),
            (Some(key), Some(value)) if key == value => {
                Ok(docs![self.child(key, Level::Push)?, ":="])
            }
            (Some(key), Some(value)) if self.is_context_lookup(key, value) => {
                Ok(docs![self.child(key, Level::Push)?, "::"])
            }
            (key, Some(value)) => {
                let head = match key {
                    Some(key) => self.child(key, Level::Push)?,
                    None => nil(),
                };
                // Keep `: :x` and `k: =>x` from fusing into shorthand tokens.
                let sep = if self.starts_with_binding_symbol(value) {
                    line()
                } else {
                    softline()
                };
                let value = self.child(value, Level::Item)?;
                Ok(group(docs![head, ":", indent(docs![sep, value])]))
            }
        }
    }

    fn is_value_function(&self, id: NodeId) -> bool {
        matches!(
            self.arena.kind(id),
            Some(NodeKind::Function {
                key: None,
                value: Some(_),
                ..
            })
        )
    }

    /// `value` is `?.key` for this very `key` node.
    fn is_context_lookup(&self, key: NodeId, value: NodeId) -> bool {
        let Some(NodeKind::Combine { dot: true, items }) = self.arena.kind(value) else {
            return false;
        };
        match items.as_slice() {
            [context, member] => {
                member.node == key
                    && matches!(self.arena.kind(context.node), Some(NodeKind::Context))
            }
            _ => false,
        }
    }

    /// Whether `id` prints starting with `:` or `=`.
    fn starts_with_binding_symbol(&self, id: NodeId) -> bool {
        match self.arena.kind(id) {
            Some(NodeKind::Assign { key: None, .. }) => true,
            Some(NodeKind::Function {
                key: None,
                value: None,
                ..
            }) => true,
            Some(NodeKind::List {
                bracket: Bracket::None,
                items,
            }) if items.len() == 1 => self.starts_with_binding_symbol(items[0]),
            _ => false,
        }
    }
}
