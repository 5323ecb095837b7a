//! Core operators.
//!
//! Binding strength is expressed with [`Level`], which the parser uses for
//! precedence climbing and the formatter uses to decide where parentheses are
//! required.

/// Binary core operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Equality
    Eq,
    NotEq,

    // Additive
    Add,
    Sub,

    // Multiplicative
    Mul,
    Div,
    Mod,

    // Exponent
    Pow,
}

impl BinaryOp {
    /// Every binary operator, longest symbols first so a scanner can match
    /// greedily.
    pub const ALL: [BinaryOp; 8] = [
        Self::Eq,
        Self::NotEq,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
    ];

    /// Source-level symbol.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    /// Level at which this operator binds.
    pub const fn level(self) -> Level {
        match self {
            Self::Eq | Self::NotEq => Level::Equality,
            Self::Add | Self::Sub => Level::Additive,
            Self::Mul | Self::Div | Self::Mod => Level::Multiplicative,
            Self::Pow => Level::Exponent,
        }
    }

    /// `^` groups to the right; everything else groups to the left.
    pub const fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Unary core operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `!x`
    Not,
    /// `- x`
    Neg,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
        }
    }

    /// Negation keeps a space after the symbol so `- 5` never reads back as
    /// a signed literal.
    pub const fn spaced(self) -> bool {
        matches!(self, Self::Neg)
    }
}

/// Binding strength of a syntactic position, loosest first.
///
/// A child can sit in a slot without parentheses when its own level is at
/// least the level the slot requires.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Level {
    /// Several items without brackets; only valid at the program root.
    Sequence,
    /// Functions and assignments; only valid as whole items.
    Item,
    /// `a -> b`
    Push,
    /// `a | b`
    Trigger,
    /// `==` `!=`
    Equality,
    /// `+` `-`
    Additive,
    /// `*` `/` `%`
    Multiplicative,
    /// `^`
    Exponent,
    /// `!x`, `- x`
    Unary,
    /// `a b`
    Juxtapose,
    /// `a.b`
    Dot,
    /// Literals, brackets, placeholders.
    Atom,
}

impl Level {
    /// The next tighter level. `Atom` is its own successor.
    #[must_use]
    pub const fn tighter(self) -> Level {
        match self {
            Self::Sequence => Self::Item,
            Self::Item => Self::Push,
            Self::Push => Self::Trigger,
            Self::Trigger => Self::Equality,
            Self::Equality => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Exponent,
            Self::Exponent => Self::Unary,
            Self::Unary => Self::Juxtapose,
            Self::Juxtapose => Self::Dot,
            Self::Dot | Self::Atom => Self::Atom,
        }
    }
}
