//! Maraca Formatter
//!
//! Canonical formatting for Maraca syntax trees.
//!
//! # Architecture
//!
//! Formatting runs in two stages over pure data:
//!
//! 1. **Compile**: the node compiler maps the syntax tree to a [`Doc`], the
//!    layout document that says what may break, never where.
//! 2. **Print**: the layout engine renders the document at a target width,
//!    deciding group by group whether content stays flat or breaks.
//!
//! Nothing is shared between calls, so separate trees can be formatted on
//! separate threads.
//!
//! # Modules
//!
//! - [`doc`]: document model and builders
//! - [`printer`]: layout engine
//! - [`formatter`]: node compiler
//! - [`emitter`]: output abstraction with column tracking
//! - [`config`]: width, indentation and trailing-comma settings

pub mod config;
pub mod doc;
pub mod emitter;
mod error;
pub mod formatter;
pub mod printer;

pub use config::{FormatConfig, TrailingCommas, DEFAULT_PRINT_WIDTH, DEFAULT_TAB_WIDTH};
pub use doc::{Doc, GroupId, LineKind};
pub use emitter::{Emitter, StringEmitter};
pub use error::{DocError, FormatError};
pub use formatter::{compile, Compiler};
pub use printer::{render, Printer};

use maraca_ir::{NodeArena, NodeId};

/// Format the tree rooted at `root`.
///
/// The result carries no trailing newline; file-level conventions belong to
/// the caller.
pub fn format_tree(
    arena: &NodeArena,
    root: NodeId,
    config: &FormatConfig,
) -> Result<String, FormatError> {
    let doc = compile(arena, root, config)?;
    Ok(render(&doc, config.print_width, config.tab_width))
}
