//! Literal Formatting
//!
//! Values, comments, inline code, raw error text, and the quoted-text
//! builder shared with string templates.
//!
//! Quoted text is lossless: every character either prints as itself or
//! behind a `\`. A real newline prints as `\` and a hard break; a single
//! space between two visible characters becomes a fill separator, so long
//! strings wrap like prose. The reader turns a bare line break (and the
//! indentation after it) back into one space.

use std::mem;

use maraca_ir::NodeId;

use super::Compiler;
use crate::doc::{concat, fill, hardline, line, literalline, mark_as_root, Doc};
use crate::docs;
use crate::error::FormatError;

/// Delimiter and escaped characters of one quoting style.
#[derive(Clone, Copy, Debug)]
pub(super) struct QuoteStyle {
    delimiter: char,
    escapes: &'static [char],
}

/// `"text"`; brackets open interpolations, so they are escaped too.
pub(super) const STRING: QuoteStyle = QuoteStyle {
    delimiter: '"',
    escapes: &['\\', '"', '[', ']', '{', '}', '<', '>'],
};

/// `` `comment` ``
pub(super) const COMMENT: QuoteStyle = QuoteStyle {
    delimiter: '`',
    escapes: &['\\', '`'],
};

const EVAL_ESCAPES: &[char] = &['\\', '\''];

/// One unit of quoted content.
pub(super) enum Piece {
    Char(char),
    /// An interpolated block, already compiled.
    Embed(Doc),
}

/// Identifiers and numbers print bare.
pub(super) fn is_bare(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

impl Compiler<'_> {
    pub(super) fn value(&mut self, id: NodeId, value: &str) -> Result<Doc, FormatError> {
        if is_bare(value) {
            return self.text(id, value);
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(docs!["\"\""]),
            (Some(' '), None) => Ok(docs!["_"]),
            (Some(c), None) if !c.is_whitespace() => self.text(id, format!("\\{c}")),
            _ => self.quoted(id, STRING, value.chars().map(Piece::Char).collect()),
        }
    }

    pub(super) fn comment(&mut self, id: NodeId, comment: &str) -> Result<Doc, FormatError> {
        self.quoted(id, COMMENT, comment.chars().map(Piece::Char).collect())
    }

    /// A text part outside any template prints as a plain string.
    pub(super) fn orphan_part(&mut self, id: NodeId, text: &str) -> Result<Doc, FormatError> {
        if text.is_empty() {
            return Ok(docs!["\"\""]);
        }
        self.quoted(id, STRING, text.chars().map(Piece::Char).collect())
    }

    /// `'code'`, line structure kept exactly.
    pub(super) fn eval(&mut self, id: NodeId, code: &str) -> Result<Doc, FormatError> {
        let mut escaped = String::with_capacity(code.len() + 2);
        escaped.push('\'');
        for c in code.chars() {
            if EVAL_ESCAPES.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('\'');
        self.verbatim(id, &escaped)
    }

    /// Text printed exactly as given; newlines become literal lines.
    pub(super) fn verbatim(&mut self, id: NodeId, raw: &str) -> Result<Doc, FormatError> {
        let mut parts = Vec::new();
        for (i, segment) in raw.split('\n').enumerate() {
            if i > 0 {
                parts.push(literalline());
            }
            parts.push(self.text(id, segment)?);
        }
        Ok(concat(parts))
    }

    /// Build a quoted, word-wrapped block whose continuation lines align
    /// under the opening delimiter.
    pub(super) fn quoted(
        &mut self,
        id: NodeId,
        style: QuoteStyle,
        pieces: Vec<Piece>,
    ) -> Result<Doc, FormatError> {
        let blank: Vec<bool> = pieces
            .iter()
            .map(|p| matches!(p, Piece::Char(c) if c.is_whitespace()))
            .collect();
        let last = pieces.len().saturating_sub(1);

        let mut parts: Vec<Doc> = Vec::new();
        let mut content: Vec<Doc> = Vec::new();
        let mut buf = String::new();
        buf.push(style.delimiter);
        // Still inside the indentation of a line that follows a newline.
        let mut line_start = false;

        for (i, piece) in pieces.into_iter().enumerate() {
            match piece {
                Piece::Embed(doc) => {
                    self.flush(id, &mut buf, &mut content)?;
                    content.push(doc);
                    line_start = false;
                }
                Piece::Char('\n') => {
                    buf.push('\\');
                    self.flush(id, &mut buf, &mut content)?;
                    parts.push(take_content(&mut content));
                    parts.push(hardline());
                    line_start = true;
                }
                Piece::Char(' ') if i > 0 && i < last && !blank[i - 1] && !blank[i + 1] => {
                    self.flush(id, &mut buf, &mut content)?;
                    parts.push(take_content(&mut content));
                    parts.push(line());
                }
                Piece::Char(c @ (' ' | '\t')) if line_start => {
                    buf.push('\\');
                    buf.push(c);
                }
                Piece::Char(c) => {
                    if style.escapes.contains(&c) {
                        buf.push('\\');
                    }
                    buf.push(c);
                    line_start = false;
                }
            }
        }

        buf.push(style.delimiter);
        self.flush(id, &mut buf, &mut content)?;
        parts.push(take_content(&mut content));
        Ok(mark_as_root(fill(parts)))
    }

    fn flush(
        &self,
        id: NodeId,
        buf: &mut String,
        content: &mut Vec<Doc>,
    ) -> Result<(), FormatError> {
        if !buf.is_empty() {
            content.push(self.text(id, mem::take(buf))?);
        }
        Ok(())
    }
}

fn take_content(content: &mut Vec<Doc>) -> Doc {
    let mut docs = mem::take(content);
    if docs.len() == 1 {
        docs.pop().unwrap_or_else(crate::doc::nil)
    } else {
        concat(docs)
    }
}
