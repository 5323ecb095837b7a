//! Output Emitter
//!
//! Abstraction for output production during printing. The printer needs the
//! current column (for fits measurements and root marks), so emitters track it.

/// Trait for emitting printed output.
pub trait Emitter {
    /// Emit a single-line text fragment.
    fn emit(&mut self, text: &str);

    /// Drop trailing blanks on the current line, then emit `\n`.
    fn emit_newline(&mut self);

    /// Emit `\n` as-is; whatever precedes it on the line is content.
    fn emit_literal_newline(&mut self);

    /// Emit indentation as the given number of spaces.
    fn emit_indent(&mut self, spaces: usize);

    /// Column of the next character, counted in `char`s.
    fn column(&self) -> usize;
}

/// String-based emitter for in-memory formatting.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
    column: usize,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }

    fn trim_trailing_blanks(&mut self) {
        let kept = self.buffer.trim_end_matches([' ', '\t']).len();
        let dropped = self.buffer.len() - kept;
        self.buffer.truncate(kept);
        // Blanks are single-byte, so bytes dropped equal columns dropped.
        self.column = self.column.saturating_sub(dropped);
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.column += text.chars().count();
    }

    fn emit_newline(&mut self) {
        self.trim_trailing_blanks();
        self.emit_literal_newline();
    }

    fn emit_literal_newline(&mut self) {
        self.buffer.push('\n');
        self.column = 0;
    }

    fn emit_indent(&mut self, spaces: usize) {
        self.buffer.extend(std::iter::repeat(' ').take(spaces));
        self.column += spaces;
    }

    fn column(&self) -> usize {
        self.column
    }
}
