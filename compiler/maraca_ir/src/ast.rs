//! Syntax tree node types.
//!
//! The tree is a closed sum type: every consumer matches [`NodeKind`]
//! exhaustively, so adding a variant is a compile error everywhere it is not
//! yet handled.

use std::fmt;

use crate::{BinaryOp, NodeId, Span, UnaryOp};

/// A syntax tree node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Opening bracket of a list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Bracket {
    /// `[ ]`
    Square,
    /// `{ }`
    Curly,
    /// `< >`
    Angle,
    /// No delimiters: the program root and interpolated text.
    None,
}

impl Bracket {
    /// Opening and closing symbols, or `None` for bracketless lists.
    pub const fn pair(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Square => Some(("[", "]")),
            Self::Curly => Some(("{", "}")),
            Self::Angle => Some(("<", ">")),
            Self::None => None,
        }
    }

    /// Bracket opened by `c`, if any.
    pub const fn from_open(c: char) -> Option<Bracket> {
        match c {
            '[' => Some(Self::Square),
            '{' => Some(Self::Curly),
            '<' => Some(Self::Angle),
            _ => None,
        }
    }

    /// Closing character expected for this bracket.
    pub const fn closer(self) -> Option<char> {
        match self {
            Self::Square => Some(']'),
            Self::Curly => Some('}'),
            Self::Angle => Some('>'),
            Self::None => None,
        }
    }
}

/// One element of a combine chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Chained {
    pub node: NodeId,
    /// Whitespace separates this element from the next one.
    pub space_after: bool,
}

impl Chained {
    pub const fn new(node: NodeId, space_after: bool) -> Self {
        Chained { node, space_after }
    }
}

/// Node variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    /// `k=>body`, `v=>>body`, `k=>v=>>body` or `=>body`.
    Function {
        key: Option<NodeId>,
        value: Option<NodeId>,
        body: NodeId,
    },
    /// `key:value` and its shorthands.
    Assign {
        key: Option<NodeId>,
        value: Option<NodeId>,
    },
    /// `value -> target`
    Push { value: NodeId, target: NodeId },
    /// `trigger | action`
    Trigger { trigger: NodeId, action: NodeId },
    /// `@body`, `@@body`, ...
    Interpret { level: u8, body: NodeId },
    /// `!x`, `- x`
    Unary { op: UnaryOp, operand: NodeId },
    /// `a + b`
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    /// `#name`
    Library(String),
    /// Bracketed block, or a bracketless item sequence.
    List { bracket: Bracket, items: Vec<NodeId> },
    /// Member chain `a.b.c` (`dot`) or juxtaposition `a b`.
    Combine { dot: bool, items: Vec<Chained> },
    /// Literal text value.
    Value(String),
    /// Empty slot.
    Nil,
    /// `?`
    Context,
    /// `` `text` ``
    Comment(String),
    /// `'code'`
    Eval(String),
    /// A run of literal text inside an interpolated string. The string spans
    /// from the part marked `first` to the part marked `last`; the siblings
    /// in between are the interpolated blocks.
    Part {
        text: String,
        first: bool,
        last: bool,
    },
    /// `~`
    Identity,
    /// Source the parser could not make sense of, kept verbatim.
    Error(String),
}

impl NodeKind {
    /// Human-readable name of the variant, for diagnostics and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Function { .. } => "function",
            NodeKind::Assign { .. } => "assign",
            NodeKind::Push { .. } => "push",
            NodeKind::Trigger { .. } => "trigger",
            NodeKind::Interpret { .. } => "interpret",
            NodeKind::Unary { .. } | NodeKind::Binary { .. } => "core",
            NodeKind::Library(_) => "library",
            NodeKind::List { .. } => "list",
            NodeKind::Combine { .. } => "combine",
            NodeKind::Value(_) => "value",
            NodeKind::Nil => "nil",
            NodeKind::Context => "context",
            NodeKind::Comment(_) => "comment",
            NodeKind::Eval(_) => "eval",
            NodeKind::Part { .. } => "part",
            NodeKind::Identity => "identity",
            NodeKind::Error(_) => "error",
        }
    }
}
