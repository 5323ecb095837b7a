//! Break propagation.
//!
//! Computed bottom-up once per print, before any group is decided: a group
//! is forced broken when anything inside it (including a nested group, or
//! either branch of an `IfBreak`) holds a hard line, a literal line or a
//! `BreakParent`.

use maraca_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::doc::{Doc, LineKind};

/// Groups that must break, keyed by node address within one document.
#[derive(Default, Debug)]
pub(super) struct ForcedGroups {
    groups: FxHashSet<*const Doc>,
}

impl ForcedGroups {
    pub fn contains(&self, group: &Doc) -> bool {
        self.groups.contains(&std::ptr::from_ref(group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

pub(super) fn propagate_breaks(doc: &Doc) -> ForcedGroups {
    let mut forced = ForcedGroups::default();
    contains_forced_break(doc, &mut forced);
    tracing::trace!(forced = forced.len(), "break propagation");
    forced
}

/// Whether `doc` forces its enclosing group to break. Visits every child so
/// that nested groups are recorded too.
fn contains_forced_break(doc: &Doc, forced: &mut ForcedGroups) -> bool {
    ensure_sufficient_stack(|| match doc {
        Doc::Text(_) => false,
        Doc::Line(kind) => matches!(kind, LineKind::Hard | LineKind::Literal),
        Doc::BreakParent => true,
        Doc::Concat(docs) | Doc::Fill(docs) => docs
            .iter()
            .fold(false, |found, d| contains_forced_break(d, forced) || found),
        Doc::Indent(contents) | Doc::MarkAsRoot(contents) => {
            contains_forced_break(contents, forced)
        }
        Doc::Group { contents, .. } => {
            let broken = contains_forced_break(contents, forced);
            if broken {
                forced.groups.insert(std::ptr::from_ref(doc));
            }
            broken
        }
        Doc::IfBreak { broken, flat, .. } => {
            let in_broken = contains_forced_break(broken, forced);
            contains_forced_break(flat, forced) || in_broken
        }
    })
}
