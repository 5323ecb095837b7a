//! Document Model
//!
//! The intermediate layout tree between the syntax tree and the final text.
//! A [`Doc`] says what may break and how, never where: the printer decides
//! that for a given width.
//!
//! Build documents with the free functions in this module and the [`docs!`]
//! concatenation macro:
//!
//! ```
//! use maraca_fmt::doc::{group, indent, softline};
//! use maraca_fmt::{docs, render};
//!
//! let doc = group(docs!["[", indent(docs![softline(), "a"]), softline(), "]"]);
//! assert_eq!(render(&doc, 80, 2), "[a]");
//! assert_eq!(render(&doc, 2, 2), "[\n  a\n]");
//! ```
//!
//! [`docs!`]: crate::docs

mod validate;

use std::borrow::Cow;
use std::fmt;

use crate::error::DocError;

/// Identity of a group, for [`Doc::IfBreak`] lookups.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

impl GroupId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        GroupId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Hands out fresh group ids, so every group in one document is distinct.
#[derive(Default, Debug)]
pub struct GroupIds {
    next: u32,
}

impl GroupIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> GroupId {
        let id = GroupId(self.next);
        self.next += 1;
        id
    }
}

/// Line break flavours.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LineKind {
    /// Nothing when flat.
    Soft,
    /// A space when flat.
    Normal,
    /// Always a newline; breaks every enclosing group.
    Hard,
    /// Always a newline without indentation; breaks every enclosing group.
    Literal,
}

/// Layout document.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Doc {
    /// Single-line text.
    Text(Cow<'static, str>),
    /// Juxtaposition.
    Concat(Vec<Doc>),
    /// A possible (or forced) line break.
    Line(LineKind),
    /// Contents whose lines are all flat or all broken.
    Group {
        contents: Box<Doc>,
        id: Option<GroupId>,
    },
    /// One more indentation unit for the contents.
    Indent(Box<Doc>),
    /// Alternating content and separators; each separator breaks on its own.
    Fill(Vec<Doc>),
    /// `broken` if the referenced (or enclosing) group broke, else `flat`.
    IfBreak {
        broken: Box<Doc>,
        flat: Box<Doc>,
        group: Option<GroupId>,
    },
    /// Indentation inside is measured from the column where this starts.
    MarkAsRoot(Box<Doc>),
    /// Forces every enclosing group to break.
    BreakParent,
}

impl From<&'static str> for Doc {
    fn from(text: &'static str) -> Self {
        Doc::Text(Cow::Borrowed(text))
    }
}

/// Concatenate documents: `docs!["(", inner, ")"]`.
///
/// String literals become [`token`]s.
#[macro_export]
macro_rules! docs {
    () => {
        $crate::doc::Doc::Concat(Vec::new())
    };
    ($($doc:expr),+ $(,)?) => {
        $crate::doc::Doc::Concat(vec![$($crate::doc::Doc::from($doc)),+])
    };
}

/// The empty document.
pub fn nil() -> Doc {
    Doc::Concat(Vec::new())
}

/// Static text known to be single-line.
pub fn token(text: &'static str) -> Doc {
    Doc::Text(Cow::Borrowed(text))
}

/// Owned text; rejects newlines.
pub fn text(text: impl Into<String>) -> Result<Doc, DocError> {
    let text = text.into();
    if text.contains('\n') {
        return Err(DocError::NewlineInText { text });
    }
    Ok(Doc::Text(Cow::Owned(text)))
}

pub fn concat(docs: Vec<Doc>) -> Doc {
    Doc::Concat(docs)
}

/// A space when flat, a newline when broken.
pub fn line() -> Doc {
    Doc::Line(LineKind::Normal)
}

/// Nothing when flat, a newline when broken.
pub fn softline() -> Doc {
    Doc::Line(LineKind::Soft)
}

pub fn hardline() -> Doc {
    Doc::Line(LineKind::Hard)
}

pub fn literalline() -> Doc {
    Doc::Line(LineKind::Literal)
}

pub fn group(contents: Doc) -> Doc {
    Doc::Group {
        contents: Box::new(contents),
        id: None,
    }
}

pub fn group_with_id(contents: Doc, id: GroupId) -> Doc {
    Doc::Group {
        contents: Box::new(contents),
        id: Some(id),
    }
}

pub fn indent(contents: Doc) -> Doc {
    Doc::Indent(Box::new(contents))
}

/// Word-wrap region: `parts` alternate content, separator, content, ...
pub fn fill(parts: Vec<Doc>) -> Doc {
    Doc::Fill(parts)
}

/// `docs` separated by `sep`.
pub fn join(sep: &Doc, docs: impl IntoIterator<Item = Doc>) -> Doc {
    let mut parts = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(sep.clone());
        }
        parts.push(doc);
    }
    Doc::Concat(parts)
}

/// Choose between `broken` and `flat` by the mode of `group`, or of the
/// enclosing group when `group` is `None`.
pub fn if_break(broken: Doc, flat: Doc, group: Option<GroupId>) -> Doc {
    Doc::IfBreak {
        broken: Box::new(broken),
        flat: Box::new(flat),
        group,
    }
}

pub fn mark_as_root(contents: Doc) -> Doc {
    Doc::MarkAsRoot(Box::new(contents))
}

pub fn break_parent() -> Doc {
    Doc::BreakParent
}
