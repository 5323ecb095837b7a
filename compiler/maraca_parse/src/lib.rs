//! Recursive descent parser for canonical Maraca syntax.
//!
//! Reads characters directly into a [`NodeArena`]. The parser exists so the
//! formatter has real trees to work on: it accepts everything the formatter
//! prints, and a little more whitespace than that.
//!
//! Parentheses group without producing nodes. The assignment shorthands
//! `k:=` and `k::` share the key node between key and value, which is how
//! the formatter recognises them again.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use maraca_ir::{NodeArena, NodeId, NodeKind, Span};

#[cfg(test)]
mod tests;

/// A parsed source file.
#[derive(Debug)]
pub struct Parsed {
    pub arena: NodeArena,
    /// Bracketless list of the top-level items.
    pub root: NodeId,
}

/// Parse a whole source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(source);
    let root = parser.program()?;
    tracing::debug!(nodes = parser.arena.len(), "parsed");
    Ok(Parsed {
        arena: parser.arena,
        root,
    })
}

/// Parser state.
struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: NodeArena,
    /// Extent of the most recently completed atom. An expression that ends
    /// where its only atom ends can bind a function argument.
    last_atom: Option<(usize, usize)>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            arena: NodeArena::with_capacity(source.len() / 4),
            last_atom: None,
        }
    }

    /// Allocate a node spanning `start` to the current position.
    fn alloc(&mut self, kind: NodeKind, start: usize) -> NodeId {
        let span = self.cursor.span_from(start);
        self.arena.alloc_at(kind, span)
    }

    fn error(&self, kind: ParseErrorKind, start: usize) -> ParseError {
        ParseError::new(kind, self.cursor.span_from(start))
    }

    /// Error for whatever sits at the cursor.
    fn unexpected(&self) -> ParseError {
        let start = self.cursor.position();
        match self.cursor.peek() {
            Some(c) => ParseError::new(
                ParseErrorKind::UnexpectedChar(c),
                Span::from_range(start..start + c.len_utf8()),
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEnd, Span::from_range(start..start)),
        }
    }

    /// Whether the input between `start` and the cursor is one atom.
    fn is_single_atom(&self, start: usize) -> bool {
        self.last_atom == Some((start, self.cursor.position()))
    }
}
