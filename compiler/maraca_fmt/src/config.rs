//! Formatter Configuration
//!
//! Line width, indentation unit and trailing-comma policy. The driver builds
//! one of these from its command line and hands it to [`format_tree`].
//!
//! [`format_tree`]: crate::format_tree

/// Default target line width.
pub const DEFAULT_PRINT_WIDTH: usize = 80;

/// Default spaces per indentation level.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Configuration for the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Line width the layout engine tries to stay within.
    pub print_width: usize,

    /// Spaces per indentation level.
    pub tab_width: usize,

    /// Whether broken bracketed lists end with a separator.
    pub trailing_commas: TrailingCommas,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            print_width: DEFAULT_PRINT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            trailing_commas: TrailingCommas::Always,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified line width.
    pub fn with_print_width(print_width: usize) -> Self {
        Self {
            print_width,
            ..Default::default()
        }
    }

    /// Create a new config with the specified indentation unit.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            tab_width,
            ..Default::default()
        }
    }

    /// Check if a broken list gets a trailing separator.
    #[inline]
    pub fn add_trailing_comma(&self) -> bool {
        self.trailing_commas.is_always()
    }
}

/// Trailing comma behavior for broken lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TrailingCommas {
    /// Always end a broken list with `,` (default), even with one element.
    #[default]
    Always,

    /// Never add trailing commas.
    Never,
}

impl TrailingCommas {
    #[inline]
    pub fn is_always(self) -> bool {
        matches!(self, TrailingCommas::Always)
    }

    #[inline]
    pub fn is_never(self) -> bool {
        matches!(self, TrailingCommas::Never)
    }
}
