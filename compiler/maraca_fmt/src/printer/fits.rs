//! Flat-width measurement.

use rustc_hash::FxHashMap;

use super::propagate::ForcedGroups;
use super::{Command, Item, Mode};
use crate::doc::{Doc, GroupId, LineKind};

/// Inputs of one measurement besides the candidate itself.
#[derive(Clone, Copy)]
pub(super) struct Fits<'r, 'a> {
    /// Pending commands, printed after the candidate (top of stack last).
    pub rest: &'r [Command<'a>],
    pub forced: &'r ForcedGroups,
    pub group_modes: &'r FxHashMap<GroupId, Mode>,
    /// Fail on forced groups instead of measuring them broken.
    pub must_be_flat: bool,
}

impl<'a> Fits<'_, 'a> {
    /// Whether `next` fits in `width` columns when printed flat, followed by
    /// the rest of the current line.
    ///
    /// Inside `next`, hard lines and break markers fail the test. Once the
    /// candidate is exhausted the measurement continues into the pending
    /// commands and succeeds at the first line those would break.
    pub fn fits(&self, next: &[(Mode, &'a Doc)], width: isize) -> bool {
        let mut width = width;
        let mut rest_idx = self.rest.len();
        let mut in_rest = false;
        let mut stack: Vec<(Mode, &'a Doc)> = next.iter().rev().copied().collect();

        while width >= 0 {
            let Some((mode, doc)) = stack.pop() else {
                if rest_idx == 0 {
                    return true;
                }
                rest_idx -= 1;
                in_rest = true;
                let cmd = self.rest[rest_idx];
                match cmd.item {
                    Item::Doc(doc) => stack.push((cmd.mode, doc)),
                    Item::FillRest(parts) => {
                        stack.extend(parts.iter().rev().map(|d| (cmd.mode, d)));
                    }
                }
                continue;
            };

            match doc {
                Doc::Text(text) => {
                    let len = isize::try_from(text.chars().count()).unwrap_or(isize::MAX);
                    width = width.saturating_sub(len);
                }
                Doc::Concat(docs) | Doc::Fill(docs) => {
                    stack.extend(docs.iter().rev().map(|d| (mode, d)));
                }
                Doc::Indent(contents) | Doc::MarkAsRoot(contents) => {
                    stack.push((mode, &**contents));
                }
                Doc::Group { contents, .. } => {
                    let forced = self.forced.contains(doc);
                    if forced && self.must_be_flat {
                        return false;
                    }
                    let mode = if forced { Mode::Break } else { mode };
                    stack.push((mode, &**contents));
                }
                Doc::IfBreak {
                    broken,
                    flat,
                    group,
                } => {
                    let group_mode = match group {
                        Some(id) => self.group_modes.get(id).copied().unwrap_or(Mode::Flat),
                        None => mode,
                    };
                    let branch = if group_mode == Mode::Break { broken } else { flat };
                    stack.push((mode, &**branch));
                }
                Doc::Line(kind) => {
                    let hard = matches!(kind, LineKind::Hard | LineKind::Literal);
                    if hard && !in_rest {
                        return false;
                    }
                    if hard || mode == Mode::Break {
                        return true;
                    }
                    if *kind == LineKind::Normal {
                        width -= 1;
                    }
                }
                Doc::BreakParent => {
                    if !in_rest {
                        return false;
                    }
                }
            }
        }
        false
    }
}
