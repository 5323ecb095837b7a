//! Parse error types.

use maraca_ir::Span;
use thiserror::Error;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A string, comment, inline code or block was never closed.
    #[error("unterminated {0}")]
    Unterminated(&'static str),
    #[error("expected {0}")]
    Expected(&'static str),
}

/// A parse failure and the source range it points at.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// 1-based line and column of the error start.
    pub fn line_col(&self, source: &str) -> (u32, u32) {
        self.span.line_col(source)
    }
}
