//! Quoted text.
//!
//! Strings and comments share one reading: `\` takes the next character
//! literally, and `\` before a line break is a real newline. A bare line
//! break is a wrap point and reads as one space. Either way the indentation
//! that follows is skipped.
//!
//! Inside strings an unescaped `[`, `{` or `<` opens a block; a string with
//! blocks becomes a bracketless list of text parts and blocks.

use maraca_ir::{Bracket, NodeId, NodeKind};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `"text"`, possibly with interpolated blocks.
    pub(crate) fn string(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let mut texts = vec![String::new()];
        let mut embeds = Vec::new();
        loop {
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::Unterminated("string"), start)),
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some(c) => {
                    if let Some(bracket) = Bracket::from_open(c) {
                        embeds.push(self.block(bracket)?);
                        texts.push(String::new());
                    } else if let Some(text) = texts.last_mut() {
                        self.quoted_char(text);
                    }
                }
            }
        }

        if embeds.is_empty() {
            let text = texts.pop().unwrap_or_default();
            return Ok(self.alloc(NodeKind::Value(text), start));
        }

        let last = embeds.len();
        let mut items = Vec::with_capacity(2 * embeds.len() + 1);
        for (i, text) in texts.into_iter().enumerate() {
            let (first, is_last) = (i == 0, i == last);
            if first || is_last || !text.is_empty() {
                items.push(self.alloc(
                    NodeKind::Part {
                        text,
                        first,
                        last: is_last,
                    },
                    start,
                ));
            }
            if let Some(&embed) = embeds.get(i) {
                items.push(embed);
            }
        }
        Ok(self.alloc(
            NodeKind::List {
                bracket: Bracket::None,
                items,
            },
            start,
        ))
    }

    /// `` `text` ``
    pub(crate) fn comment(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let mut text = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::Unterminated("comment"), start)),
                Some('`') => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => self.quoted_char(&mut text),
            }
        }
        Ok(self.alloc(NodeKind::Comment(text), start))
    }

    /// `'code'`: everything up to the closing quote, line breaks included.
    pub(crate) fn eval(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let mut code = String::new();
        loop {
            match self.cursor.bump() {
                None => {
                    return Err(self.error(ParseErrorKind::Unterminated("inline code"), start));
                }
                Some('\'') => break,
                Some('\\') => match self.cursor.bump() {
                    Some(c) => code.push(c),
                    None => {
                        return Err(
                            self.error(ParseErrorKind::Unterminated("inline code"), start)
                        );
                    }
                },
                Some(c) => code.push(c),
            }
        }
        Ok(self.alloc(NodeKind::Eval(code), start))
    }

    /// Read one unit of quoted text into `out`.
    fn quoted_char(&mut self, out: &mut String) {
        match self.cursor.bump() {
            Some('\\') => match self.cursor.bump() {
                Some('\n') => {
                    out.push('\n');
                    self.cursor.skip_blanks();
                }
                Some(c) => out.push(c),
                // The caller reports the missing delimiter.
                None => {}
            },
            Some('\n') => {
                out.push(' ');
                self.cursor.skip_blanks();
            }
            Some(c) => out.push(c),
            None => {}
        }
    }
}
