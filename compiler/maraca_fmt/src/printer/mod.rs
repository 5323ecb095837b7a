//! Layout Engine
//!
//! Renders a [`Doc`] at a target width. Single pass over an explicit command
//! stack; the only look-ahead is the bounded [`fits`] measurement.
//!
//! # Algorithm
//!
//! 1. A pre-pass marks every group that contains a hard line or a
//!    [`Doc::BreakParent`], and every ancestor of such a group, as forced.
//! 2. Commands are popped top-down. A forced group breaks. A group inside a
//!    flat parent stays flat. Otherwise the group is measured flat together
//!    with whatever follows it on the same line, and breaks if that overflows.
//! 3. Fills decide each separator on its own from the pair of contents
//!    around it.
//!
//! Overflow is never an error: text longer than the width is printed as-is.

mod fits;
mod propagate;

use rustc_hash::FxHashMap;

use crate::doc::{Doc, GroupId, LineKind};
use crate::emitter::{Emitter, StringEmitter};

use fits::Fits;
use propagate::{propagate_breaks, ForcedGroups};

/// Whether the lines of a group render as breaks.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mode {
    Flat,
    Break,
}

/// Indentation in effect for a command.
///
/// `root` is the column a [`Doc::MarkAsRoot`] pinned, `level` the indent units
/// added since.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
struct Indentation {
    root: usize,
    level: usize,
}

impl Indentation {
    fn width(self, unit: usize) -> usize {
        self.root + self.level * unit
    }

    fn indent(self) -> Self {
        Indentation {
            level: self.level + 1,
            ..self
        }
    }

    fn mark_root(column: usize) -> Self {
        Indentation {
            root: column,
            level: 0,
        }
    }
}

/// What a command prints.
#[derive(Copy, Clone, Debug)]
enum Item<'a> {
    Doc(&'a Doc),
    /// The unprinted tail of a fill, starting at a content item.
    FillRest(&'a [Doc]),
}

#[derive(Copy, Clone, Debug)]
struct Command<'a> {
    indent: Indentation,
    mode: Mode,
    item: Item<'a>,
}

impl<'a> Command<'a> {
    fn with(self, mode: Mode, doc: &'a Doc) -> Self {
        Command {
            mode,
            item: Item::Doc(doc),
            ..self
        }
    }
}

/// Document printer for one width and indentation unit.
///
/// A printer may be reused; each call to [`Printer::print`] starts afresh.
#[derive(Debug, Clone)]
pub struct Printer {
    print_width: usize,
    indent_unit: usize,
    broken_groups: usize,
}

impl Printer {
    pub fn new(print_width: usize, indent_unit: usize) -> Self {
        Printer {
            print_width,
            indent_unit,
            broken_groups: 0,
        }
    }

    /// Number of groups the last print rendered broken.
    pub fn broken_groups(&self) -> usize {
        self.broken_groups
    }

    /// Print `doc` to a string.
    pub fn print(&mut self, doc: &Doc) -> String {
        let mut out = StringEmitter::new();
        self.print_to(doc, &mut out);
        out.output()
    }

    /// Print `doc` into `out`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = self.print_width, indent = self.indent_unit)
    )]
    pub fn print_to<E: Emitter>(&mut self, doc: &Doc, out: &mut E) {
        self.broken_groups = 0;
        let forced = propagate_breaks(doc);
        let mut group_modes: FxHashMap<GroupId, Mode> = FxHashMap::default();
        let mut cmds = vec![Command {
            indent: Indentation::default(),
            mode: Mode::Break,
            item: Item::Doc(doc),
        }];

        while let Some(cmd) = cmds.pop() {
            let doc = match cmd.item {
                Item::Doc(doc) => doc,
                Item::FillRest(parts) => {
                    self.print_fill(cmd, parts, &mut cmds, &forced, &group_modes, out);
                    continue;
                }
            };

            match doc {
                Doc::Text(text) => out.emit(text),
                Doc::Concat(docs) => {
                    cmds.extend(docs.iter().rev().map(|d| cmd.with(cmd.mode, d)));
                }
                Doc::Indent(contents) => cmds.push(Command {
                    indent: cmd.indent.indent(),
                    ..cmd.with(cmd.mode, contents)
                }),
                Doc::MarkAsRoot(contents) => cmds.push(Command {
                    indent: Indentation::mark_root(out.column()),
                    ..cmd.with(cmd.mode, contents)
                }),
                Doc::Group { contents, id } => {
                    let mode = if forced.contains(doc) {
                        Mode::Break
                    } else if cmd.mode == Mode::Flat {
                        Mode::Flat
                    } else {
                        let next = [(Mode::Flat, &**contents)];
                        let check = Fits {
                            rest: &cmds,
                            forced: &forced,
                            group_modes: &group_modes,
                            must_be_flat: false,
                        };
                        if check.fits(&next, self.remaining(out.column())) {
                            Mode::Flat
                        } else {
                            Mode::Break
                        }
                    };
                    tracing::trace!(?id, ?mode, column = out.column(), "group");
                    if mode == Mode::Break {
                        self.broken_groups += 1;
                    }
                    if let Some(id) = id {
                        group_modes.insert(*id, mode);
                    }
                    cmds.push(cmd.with(mode, contents));
                }
                Doc::IfBreak {
                    broken,
                    flat,
                    group,
                } => {
                    let mode = match group {
                        Some(id) => group_modes.get(id).copied().unwrap_or(Mode::Flat),
                        None => cmd.mode,
                    };
                    let branch = if mode == Mode::Break { broken } else { flat };
                    cmds.push(cmd.with(cmd.mode, branch));
                }
                Doc::Fill(parts) => cmds.push(Command {
                    item: Item::FillRest(parts),
                    ..cmd
                }),
                Doc::Line(kind) => match (cmd.mode, kind) {
                    (Mode::Flat, LineKind::Soft) => {}
                    (Mode::Flat, LineKind::Normal) => out.emit(" "),
                    (_, LineKind::Literal) => out.emit_literal_newline(),
                    _ => {
                        out.emit_newline();
                        out.emit_indent(cmd.indent.width(self.indent_unit));
                    }
                },
                Doc::BreakParent => {}
            }
        }
    }

    /// One step of the fill algorithm: decide the separator after the first
    /// content item of `parts`, then schedule the tail.
    fn print_fill<'a, E: Emitter>(
        &self,
        cmd: Command<'a>,
        parts: &'a [Doc],
        cmds: &mut Vec<Command<'a>>,
        forced: &ForcedGroups,
        group_modes: &FxHashMap<GroupId, Mode>,
        out: &E,
    ) {
        let Some((content, tail)) = parts.split_first() else {
            return;
        };
        let remaining = self.remaining(out.column());
        let alone = Fits {
            rest: &[],
            forced,
            group_modes,
            must_be_flat: true,
        };
        let content_fits = alone.fits(&[(Mode::Flat, content)], remaining);
        let content_mode = if content_fits { Mode::Flat } else { Mode::Break };

        let Some((separator, tail)) = tail.split_first() else {
            cmds.push(cmd.with(content_mode, content));
            return;
        };
        let Some(next) = tail.first() else {
            cmds.push(cmd.with(content_mode, separator));
            cmds.push(cmd.with(content_mode, content));
            return;
        };

        // The last pair also has to leave room for what follows the fill.
        let pair = Fits {
            rest: if tail.len() == 1 { cmds.as_slice() } else { &[] },
            ..alone
        };
        let pair_fits = pair.fits(
            &[
                (Mode::Flat, content),
                (Mode::Flat, separator),
                (Mode::Flat, next),
            ],
            remaining,
        );

        cmds.push(Command {
            item: Item::FillRest(tail),
            ..cmd
        });
        if pair_fits {
            cmds.push(cmd.with(Mode::Flat, separator));
            cmds.push(cmd.with(Mode::Flat, content));
        } else {
            tracing::trace!(column = out.column(), "fill break");
            cmds.push(cmd.with(Mode::Break, separator));
            cmds.push(cmd.with(content_mode, content));
        }
    }

    fn remaining(&self, column: usize) -> isize {
        let width = isize::try_from(self.print_width).unwrap_or(isize::MAX);
        let column = isize::try_from(column).unwrap_or(isize::MAX);
        width.saturating_sub(column)
    }
}

/// Render `doc` at `max_width` with `indent_unit` spaces per level.
pub fn render(doc: &Doc, max_width: usize, indent_unit: usize) -> String {
    Printer::new(max_width, indent_unit).print(doc)
}
