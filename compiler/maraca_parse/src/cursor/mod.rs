//! Character cursor over source text.
//!
//! The grammar is small enough to parse straight from characters, so there
//! is no separate token stream. The cursor only ever rests on a char
//! boundary.

use maraca_ir::Span;

#[cfg(test)]
mod tests;

pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Byte offset of the next character.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back to a position returned by [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            self.source.is_char_boundary(pos),
            "cursor position {pos} is not a char boundary"
        );
        self.pos = pos;
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    #[inline]
    pub fn at(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.at(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds and return them.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Skip spaces, tabs and line breaks. Returns the number of line breaks
    /// crossed.
    pub fn skip_whitespace(&mut self) -> usize {
        self.eat_while(char::is_whitespace)
            .chars()
            .filter(|&c| c == '\n')
            .count()
    }

    /// Skip spaces and tabs only.
    pub fn skip_blanks(&mut self) {
        self.eat_while(|c| c == ' ' || c == '\t');
    }

    /// Span from `start` to the current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }
}
