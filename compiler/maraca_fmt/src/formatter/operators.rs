//! Operator Formatting
//!
//! Core operators, push (`->`) and trigger (`|`). Each binary form is one
//! group: flat on one line, or broken with the right-hand side indented.

use maraca_ir::{BinaryOp, Level, NodeId, UnaryOp};

use super::Compiler;
use crate::doc::{group, indent, line, Doc};
use crate::docs;
use crate::error::FormatError;

impl Compiler<'_> {
    pub(super) fn push(&mut self, value: NodeId, target: NodeId) -> Result<Doc, FormatError> {
        let value = self.child(value, Level::Push)?;
        let target = self.child(target, Level::Trigger)?;
        Ok(group(docs![value, " ->", indent(docs![line(), target])]))
    }

    pub(super) fn trigger(&mut self, trigger: NodeId, action: NodeId) -> Result<Doc, FormatError> {
        let trigger = self.child(trigger, Level::Trigger)?;
        let action = self.child(action, Level::Equality)?;
        Ok(group(docs![trigger, " |", indent(docs![line(), action])]))
    }

    pub(super) fn unary(&mut self, op: UnaryOp, operand: NodeId) -> Result<Doc, FormatError> {
        let operand = self.child(operand, Level::Unary)?;
        let space = if op.spaced() { " " } else { "" };
        Ok(docs![op.as_symbol(), space, operand])
    }

    pub(super) fn binary(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    ) -> Result<Doc, FormatError> {
        let level = op.level();
        let (left_min, right_min) = if op.is_right_assoc() {
            (level.tighter(), level)
        } else {
            (level, level.tighter())
        };
        let left = self.child(left, left_min)?;
        let right = self.child(right, right_min)?;
        Ok(group(docs![
            left,
            indent(docs![line(), op.as_symbol(), line(), right])
        ]))
    }
}
