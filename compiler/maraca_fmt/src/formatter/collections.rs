//! List Formatting
//!
//! Lists are split into chunks in a single forward scan: plain items, runs
//! of empty slots (one blank line each), and interpolated strings running
//! from a `first` text part to a `last` one.

use maraca_ir::{Bracket, Level, NodeId, NodeKind};

use super::literals::{Piece, STRING};
use super::Compiler;
use crate::doc::{concat, group, group_with_id, hardline, if_break, indent, line, nil, softline, Doc};
use crate::docs;
use crate::error::FormatError;

/// A printable run of list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Chunk<'i> {
    Item(NodeId),
    /// One or more empty slots between two items.
    Blank,
    /// Text parts and the blocks interpolated between them.
    Template(&'i [NodeId]),
}

impl Compiler<'_> {
    pub(super) fn list(&mut self, bracket: Bracket, items: &[NodeId]) -> Result<Doc, FormatError> {
        let mut inner = Vec::new();
        let mut count = 0;
        let mut blank = false;
        for chunk in self.chunks(items) {
            let doc = match chunk {
                Chunk::Blank => {
                    blank = true;
                    continue;
                }
                Chunk::Item(id) => self.child(id, Level::Item)?,
                Chunk::Template(parts) => self.template(parts)?,
            };
            if count > 0 {
                inner.push(docs![","]);
                if blank {
                    inner.push(hardline());
                }
                inner.push(line());
            }
            inner.push(doc);
            count += 1;
            blank = false;
        }

        let Some((open, close)) = bracket.pair() else {
            return Ok(match count {
                0 => nil(),
                1 => concat(inner),
                _ => group(concat(inner)),
            });
        };
        if count == 0 {
            return Ok(docs![open, close]);
        }

        let id = self.group_ids.fresh();
        let trailing = if self.config.add_trailing_comma() {
            if_break(docs![","], nil(), Some(id))
        } else {
            nil()
        };
        Ok(group_with_id(
            docs![
                open,
                indent(docs![softline(), concat(inner), trailing]),
                softline(),
                close
            ],
            id,
        ))
    }

    /// Split `items` into chunks. Leading and trailing empty slots are
    /// dropped and consecutive ones coalesce.
    pub(super) fn chunks<'i>(&self, items: &'i [NodeId]) -> Vec<Chunk<'i>> {
        let mut chunks = Vec::with_capacity(items.len());
        let mut i = 0;
        while i < items.len() {
            let id = items[i];
            match self.arena.kind(id) {
                Some(NodeKind::Nil) => {
                    if matches!(chunks.last(), Some(Chunk::Item(_) | Chunk::Template(_))) {
                        chunks.push(Chunk::Blank);
                    }
                    i += 1;
                }
                Some(NodeKind::Part { first: true, .. }) => {
                    let end = items[i..]
                        .iter()
                        .position(|&p| {
                            matches!(self.arena.kind(p), Some(NodeKind::Part { last: true, .. }))
                        })
                        .map(|offset| i + offset);
                    if let Some(end) = end {
                        chunks.push(Chunk::Template(&items[i..=end]));
                        i = end + 1;
                    } else {
                        chunks.push(Chunk::Item(id));
                        i += 1;
                    }
                }
                _ => {
                    chunks.push(Chunk::Item(id));
                    i += 1;
                }
            }
        }
        if chunks.last() == Some(&Chunk::Blank) {
            chunks.pop();
        }
        chunks
    }

    /// One quoted string with its interpolated blocks.
    fn template(&mut self, parts: &[NodeId]) -> Result<Doc, FormatError> {
        let Some(&first) = parts.first() else {
            return Ok(nil());
        };
        let mut pieces = Vec::new();
        for &id in parts {
            match self.kind(id)? {
                NodeKind::Part { text, .. } => pieces.extend(text.chars().map(Piece::Char)),
                NodeKind::List { bracket, .. } if *bracket != Bracket::None => {
                    pieces.push(Piece::Embed(self.compile_node(id)?));
                }
                // Only bracketed blocks can open inside quotes.
                _ => pieces.push(Piece::Embed(docs!["{", self.compile_node(id)?, "}"])),
            }
        }
        self.quoted(first, STRING, pieces)
    }
}
