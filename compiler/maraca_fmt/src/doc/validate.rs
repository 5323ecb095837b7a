//! Whole-document checks.

use maraca_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use super::{Doc, GroupId};
use crate::error::DocError;

impl Doc {
    /// Check the construction rules over the whole tree: no text fragment
    /// holds a newline and no two groups share an id.
    pub fn validate(&self) -> Result<(), DocError> {
        let mut seen = FxHashSet::default();
        check(self, &mut seen)
    }
}

fn check(doc: &Doc, seen: &mut FxHashSet<GroupId>) -> Result<(), DocError> {
    ensure_sufficient_stack(|| match doc {
        Doc::Text(text) if text.contains('\n') => Err(DocError::NewlineInText {
            text: text.to_string(),
        }),
        Doc::Text(_) | Doc::Line(_) | Doc::BreakParent => Ok(()),
        Doc::Concat(docs) | Doc::Fill(docs) => docs.iter().try_for_each(|d| check(d, seen)),
        Doc::Group { contents, id } => {
            if let Some(id) = id {
                if !seen.insert(*id) {
                    return Err(DocError::DuplicateGroupId(*id));
                }
            }
            check(contents, seen)
        }
        Doc::Indent(contents) | Doc::MarkAsRoot(contents) => check(contents, seen),
        Doc::IfBreak { broken, flat, .. } => {
            check(broken, seen)?;
            check(flat, seen)
        }
    })
}
