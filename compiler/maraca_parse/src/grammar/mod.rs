//! Grammar productions.
//!
//! Loosest first: sequence, item (function, assignment), push, trigger, core
//! operators, unary, juxtaposition, member chain, atom.
//!
//! # Modules
//!
//! - [`expr`]: push, trigger, core operators, juxtaposition and chains
//! - [`atoms`]: words, placeholders, blocks and parentheses
//! - [`text`]: strings, comments and inline code

mod atoms;
mod expr;
mod text;

use maraca_ir::{Bracket, Chained, NodeId, NodeKind};
use maraca_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// Characters that end an item sequence.
pub(crate) fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}' | '>')
}

impl Parser<'_> {
    /// The whole file: a bracketless list of items.
    pub(crate) fn program(&mut self) -> Result<NodeId, ParseError> {
        let items = self.sequence()?;
        self.cursor.skip_whitespace();
        if !self.cursor.is_at_end() {
            return Err(self.unexpected());
        }
        Ok(self.alloc(
            NodeKind::List {
                bracket: Bracket::None,
                items,
            },
            0,
        ))
    }

    /// Comma-separated items up to a closing bracket or the end of input.
    ///
    /// A doubled comma or a blank line between two items leaves one empty
    /// slot. Empty slots before the first item are dropped.
    pub(crate) fn sequence(&mut self) -> Result<Vec<NodeId>, ParseError> {
        let mut items = Vec::new();
        let mut expect_item = true;
        let mut blank = false;
        loop {
            let newlines = self.cursor.skip_whitespace();
            let Some(c) = self.cursor.peek() else {
                break;
            };
            if is_closer(c) {
                break;
            }
            if c == ',' {
                self.cursor.bump();
                if expect_item {
                    blank = true;
                }
                expect_item = true;
                continue;
            }
            if !expect_item {
                return Err(self.error(
                    ParseErrorKind::Expected("`,` between items"),
                    self.cursor.position(),
                ));
            }
            if !items.is_empty() && (blank || newlines >= 2) {
                let at = self.cursor.position();
                items.push(self.alloc(NodeKind::Nil, at));
            }
            blank = false;
            items.push(self.item()?);
            expect_item = false;
        }
        tracing::trace!(items = items.len(), "sequence");
        Ok(items)
    }

    /// One list item: a function, an assignment, or a push expression.
    pub(crate) fn item(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.item_inner())
    }

    fn item_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        if self.cursor.eat_str("=>") {
            let body = self.function_body()?;
            return Ok(self.alloc(
                NodeKind::Function {
                    key: None,
                    value: None,
                    body,
                },
                start,
            ));
        }
        if self.cursor.eat(':') {
            let value = self.optional_item()?;
            return Ok(self.alloc(NodeKind::Assign { key: None, value }, start));
        }
        let head = self.push_expr()?;
        self.item_rest(start, head)
    }

    /// Continue an item whose leading expression is already parsed.
    fn item_rest(&mut self, start: usize, head: NodeId) -> Result<NodeId, ParseError> {
        if self.is_single_atom(start) {
            if self.eat_spaced("=>>") {
                let body = self.function_body()?;
                return Ok(self.alloc(
                    NodeKind::Function {
                        key: None,
                        value: Some(head),
                        body,
                    },
                    start,
                ));
            }
            if self.eat_spaced("=>") {
                return ensure_sufficient_stack(|| self.key_function(start, head));
            }
        }

        if !self.eat_spaced(":") {
            return Ok(head);
        }
        // `:=` unless it starts `=>` or `==`.
        if self.cursor.at("=") && !self.cursor.at("=>") && !self.cursor.at("==") {
            self.cursor.bump();
            return Ok(self.alloc(
                NodeKind::Assign {
                    key: Some(head),
                    value: Some(head),
                },
                start,
            ));
        }
        if self.cursor.eat(':') {
            let at = self.cursor.position();
            let context = self.alloc(NodeKind::Context, at);
            let lookup = self.alloc(
                NodeKind::Combine {
                    dot: true,
                    items: vec![Chained::new(context, false), Chained::new(head, false)],
                },
                start,
            );
            return Ok(self.alloc(
                NodeKind::Assign {
                    key: Some(head),
                    value: Some(lookup),
                },
                start,
            ));
        }
        let value = self.optional_item()?;
        Ok(self.alloc(
            NodeKind::Assign {
                key: Some(head),
                value,
            },
            start,
        ))
    }

    /// After `key=>`: either `value=>>body` or a plain body.
    fn key_function(&mut self, start: usize, key: NodeId) -> Result<NodeId, ParseError> {
        self.cursor.skip_whitespace();
        let body_start = self.cursor.position();
        let (value, body) = if self.cursor.peek().is_some_and(starts_operand) {
            let head = self.push_expr()?;
            if self.is_single_atom(body_start) && self.eat_spaced("=>>") {
                (Some(head), self.function_body()?)
            } else {
                (None, self.item_rest(body_start, head)?)
            }
        } else {
            (None, self.item()?)
        };
        Ok(self.alloc(
            NodeKind::Function {
                key: Some(key),
                value,
                body,
            },
            start,
        ))
    }

    /// Consume `token` after optional spaces, or nothing.
    fn eat_spaced(&mut self, token: &str) -> bool {
        let save = self.cursor.position();
        self.cursor.skip_blanks();
        if self.cursor.eat_str(token) {
            true
        } else {
            self.cursor.set_position(save);
            false
        }
    }

    fn function_body(&mut self) -> Result<NodeId, ParseError> {
        self.cursor.skip_whitespace();
        self.item()
    }

    /// An item if one follows, otherwise nothing and the cursor stays put.
    fn optional_item(&mut self) -> Result<Option<NodeId>, ParseError> {
        let save = self.cursor.position();
        self.cursor.skip_whitespace();
        if self.cursor.peek().is_some_and(|c| c != ',' && !is_closer(c)) {
            Ok(Some(self.item()?))
        } else {
            self.cursor.set_position(save);
            Ok(None)
        }
    }
}

/// Characters that can begin a push expression.
fn starts_operand(c: char) -> bool {
    atoms::starts_atom(c) || c == '!' || c == '-'
}
