//! Expressions between item level and atoms.
//!
//! Whitespace is looked past before every infix token and given back when
//! no token follows, so the caller sees the cursor right after the operand.

use maraca_ir::{BinaryOp, Chained, Level, NodeId, NodeKind, UnaryOp};
use maraca_stack::ensure_sufficient_stack;

use super::atoms::starts_atom;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `value -> target`, grouping to the left.
    pub(crate) fn push_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let mut value = self.trigger_expr()?;
        while self.eat_infix("->") {
            let target = self.trigger_expr()?;
            value = self.alloc(NodeKind::Push { value, target }, start);
        }
        Ok(value)
    }

    /// `trigger | action`, grouping to the left.
    fn trigger_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let mut trigger = self.binary(Level::Equality)?;
        while self.eat_infix("|") {
            let action = self.binary(Level::Equality)?;
            trigger = self.alloc(NodeKind::Trigger { trigger, action }, start);
        }
        Ok(trigger)
    }

    /// Precedence climbing over the core operators, loosest allowed `min`.
    fn binary(&mut self, min: Level) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let mut left = self.unary()?;
        loop {
            let save = self.cursor.position();
            self.cursor.skip_whitespace();
            let Some(op) = self.peek_binary_op().filter(|op| op.level() >= min) else {
                self.cursor.set_position(save);
                break;
            };
            self.cursor.eat_str(op.as_symbol());
            self.cursor.skip_whitespace();
            let next = if op.is_right_assoc() {
                op.level()
            } else {
                op.level().tighter()
            };
            let right = ensure_sufficient_stack(|| self.binary(next))?;
            left = self.alloc(NodeKind::Binary { op, left, right }, start);
        }
        Ok(left)
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        let rest = self.cursor.rest();
        if rest.starts_with("==") {
            return Some(BinaryOp::Eq);
        }
        if rest.starts_with("!=") {
            return Some(BinaryOp::NotEq);
        }
        match rest.chars().next()? {
            '+' => Some(BinaryOp::Add),
            '-' if !rest.starts_with("->") => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '%' => Some(BinaryOp::Mod),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    /// `!x`, `- x`
    fn unary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let op = if self.cursor.at("!") && !self.cursor.at("!=") {
            UnaryOp::Not
        } else if self.cursor.at("-") && !self.cursor.at("->") {
            UnaryOp::Neg
        } else {
            return self.juxtapose();
        };
        self.cursor.bump();
        self.cursor.skip_whitespace();
        let operand = ensure_sufficient_stack(|| self.unary())?;
        Ok(self.alloc(NodeKind::Unary { op, operand }, start))
    }

    /// Member chains written side by side. Each element remembers whether
    /// whitespace followed it.
    fn juxtapose(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let first = self.dot_chain()?;
        let mut items = Vec::new();
        let mut prev = first;
        loop {
            let save = self.cursor.position();
            self.cursor.skip_whitespace();
            if !self.cursor.peek().is_some_and(starts_atom) {
                self.cursor.set_position(save);
                break;
            }
            let spaced = self.cursor.position() > save;
            items.push(Chained::new(prev, spaced));
            prev = self.dot_chain()?;
        }
        if items.is_empty() {
            return Ok(first);
        }
        items.push(Chained::new(prev, false));
        Ok(self.alloc(NodeKind::Combine { dot: false, items }, start))
    }

    /// `a.b.c`
    fn dot_chain(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let first = self.atom()?;
        let mut items = vec![Chained::new(first, false)];
        while self.eat_infix(".") {
            items.push(Chained::new(self.atom()?, false));
        }
        if items.len() == 1 {
            return Ok(first);
        }
        Ok(self.alloc(NodeKind::Combine { dot: true, items }, start))
    }

    /// Consume `token` and the whitespace around it, or nothing.
    fn eat_infix(&mut self, token: &str) -> bool {
        let save = self.cursor.position();
        self.cursor.skip_whitespace();
        if self.cursor.eat_str(token) {
            self.cursor.skip_whitespace();
            true
        } else {
            self.cursor.set_position(save);
            false
        }
    }
}
