//! Formatter errors.
//!
//! Only malformed trees and malformed documents are errors. Overlong lines
//! are not: the printer always produces output.

use maraca_ir::NodeId;

use crate::doc::GroupId;

/// A document that breaks the layout engine's construction rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    /// Text fragments are single-line; newlines must be `Line` documents.
    #[error("text fragment contains a newline: {text:?}")]
    NewlineInText { text: String },

    /// Two groups in one document share an id.
    #[error("group id {0:?} is used by more than one group")]
    DuplicateGroupId(GroupId),
}

/// Error from compiling a syntax tree into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The node compiler produced an invalid document for `node`.
    #[error("invalid document for node {node}: {source}")]
    Document {
        node: NodeId,
        #[source]
        source: DocError,
    },

    /// A child id points outside the arena.
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    /// A node is its own ancestor.
    #[error("node {0} contains itself")]
    Cycle(NodeId),
}
