//! Node Compiler
//!
//! Maps a syntax tree to a [`Doc`], one rule per [`NodeKind`]. The match in
//! [`Compiler::compile_kind`] is exhaustive, so a new node kind does not
//! build until it has a rule.
//!
//! Children are compiled first and wrapped in parentheses when their
//! [`Level`] is looser than the slot they sit in. Shared nodes are compiled
//! once per occurrence, except for the assignment shorthands, which render
//! the shared key once.
//!
//! # Modules
//!
//! - [`bindings`]: functions and assignments
//! - [`chains`]: member chains, juxtaposition and interpretation
//! - [`collections`]: lists, blank slots and string templates
//! - [`literals`]: values, comments, inline code and quoted text
//! - [`operators`]: core operators, push and trigger

mod bindings;
mod chains;
mod collections;
mod literals;
mod operators;

use maraca_ir::{Level, NodeArena, NodeId, NodeKind};
use maraca_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::config::FormatConfig;
use crate::doc::{text, Doc, GroupIds};
use crate::docs;
use crate::error::{DocError, FormatError};

/// Compile the tree rooted at `root` into a validated document.
///
/// Text is checked as each rule builds it, so a bad payload is reported
/// against its own node. The whole-document check that follows only covers
/// structure no single rule owns, such as group ids, and reports `root`.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root, nodes = arena.len()))]
pub fn compile(arena: &NodeArena, root: NodeId, config: &FormatConfig) -> Result<Doc, FormatError> {
    let mut compiler = Compiler::new(arena, config);
    let doc = compiler.compile_node(root)?;
    doc.validate()
        .map_err(|source| FormatError::Document { node: root, source })?;
    Ok(doc)
}

/// Tree-to-document compiler for one tree.
pub struct Compiler<'a> {
    arena: &'a NodeArena,
    config: &'a FormatConfig,
    group_ids: GroupIds,
    /// Nodes on the current compilation path.
    in_progress: FxHashSet<NodeId>,
}

impl<'a> Compiler<'a> {
    pub fn new(arena: &'a NodeArena, config: &'a FormatConfig) -> Self {
        Compiler {
            arena,
            config,
            group_ids: GroupIds::new(),
            in_progress: FxHashSet::default(),
        }
    }

    /// Compile one node and everything below it.
    pub fn compile_node(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        ensure_sufficient_stack(|| {
            let kind = self.kind(id)?;
            tracing::trace!(node = %id, kind = kind.name(), "compiling");
            if !self.in_progress.insert(id) {
                return Err(FormatError::Cycle(id));
            }
            let doc = self.compile_kind(id, kind);
            self.in_progress.remove(&id);
            doc
        })
    }

    fn compile_kind(&mut self, id: NodeId, kind: &'a NodeKind) -> Result<Doc, FormatError> {
        match kind {
            NodeKind::Function { key, value, body } => self.function(*key, *value, *body),
            NodeKind::Assign { key, value } => self.assign(*key, *value),
            NodeKind::Push { value, target } => self.push(*value, *target),
            NodeKind::Trigger { trigger, action } => self.trigger(*trigger, *action),
            NodeKind::Interpret { level, body } => self.interpret(*level, *body),
            NodeKind::Unary { op, operand } => self.unary(*op, *operand),
            NodeKind::Binary { op, left, right } => self.binary(*op, *left, *right),
            NodeKind::Library(name) => Ok(docs!["#", self.text(id, name)?]),
            NodeKind::List { bracket, items } => self.list(*bracket, items),
            NodeKind::Combine { dot: true, items } => self.dot_chain(items),
            NodeKind::Combine { dot: false, items } => self.juxtapose(items),
            NodeKind::Value(value) => self.value(id, value),
            NodeKind::Nil => Ok(crate::doc::nil()),
            NodeKind::Context => Ok(docs!["?"]),
            NodeKind::Identity => Ok(docs!["~"]),
            NodeKind::Comment(comment) => self.comment(id, comment),
            NodeKind::Eval(code) => self.eval(id, code),
            NodeKind::Part { text, .. } => self.orphan_part(id, text),
            NodeKind::Error(raw) => self.verbatim(id, raw),
        }
    }

    /// Compile `id` for a slot that needs at least `min` binding strength.
    fn child(&mut self, id: NodeId, min: Level) -> Result<Doc, FormatError> {
        let doc = self.compile_node(id)?;
        if self.arena.level(id) < min {
            Ok(docs!["(", doc, ")"])
        } else {
            Ok(doc)
        }
    }

    fn kind(&self, id: NodeId) -> Result<&'a NodeKind, FormatError> {
        self.arena.kind(id).ok_or(FormatError::MissingNode(id))
    }

    /// Owned text attributed to `node` on failure.
    fn text(&self, node: NodeId, s: impl Into<String>) -> Result<Doc, FormatError> {
        text(s).map_err(|source: DocError| FormatError::Document { node, source })
    }
}
