//! Atoms: words, escaped characters, placeholders, library references,
//! interpretation marks, blocks and parentheses.

use maraca_ir::{Bracket, NodeId, NodeKind};
use maraca_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// Characters that can begin an atom.
pub(crate) fn starts_atom(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '"' | '`' | '\'' | '\\' | '_' | '?' | '~' | '#' | '@' | '[' | '{' | '<' | '('
        )
}

impl Parser<'_> {
    pub(crate) fn atom(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let id = ensure_sufficient_stack(|| self.atom_inner())?;
        self.last_atom = Some((start, self.cursor.position()));
        Ok(id)
    }

    fn atom_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return Err(self.unexpected());
        };
        match c {
            '"' => self.string(),
            '`' => self.comment(),
            '\'' => self.eval(),
            '(' => self.parenthesized(),
            '#' => self.library(),
            '@' => self.interpret(),
            '\\' => self.escaped_char(),
            '?' | '~' | '_' => {
                self.cursor.bump();
                let kind = match c {
                    '?' => NodeKind::Context,
                    '~' => NodeKind::Identity,
                    _ => NodeKind::Value(" ".to_string()),
                };
                Ok(self.alloc(kind, start))
            }
            c if c.is_alphanumeric() => {
                let word = self.cursor.eat_while(char::is_alphanumeric);
                Ok(self.alloc(NodeKind::Value(word.to_string()), start))
            }
            c => match Bracket::from_open(c) {
                Some(bracket) => self.block(bracket),
                None => Err(self.unexpected()),
            },
        }
    }

    /// `[...]`, `{...}` or `<...>`.
    pub(crate) fn block(&mut self, bracket: Bracket) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let items = self.sequence()?;
        self.close(bracket.closer(), start)?;
        Ok(self.alloc(NodeKind::List { bracket, items }, start))
    }

    /// `(item)` is the item itself; anything else is a bracketless list.
    fn parenthesized(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let mut items = self.sequence()?;
        self.close(Some(')'), start)?;
        if items.len() == 1 {
            if let Some(only) = items.pop() {
                return Ok(only);
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

    fn close(&mut self, closer: Option<char>, start: usize) -> Result<(), ParseError> {
        let Some(closer) = closer else {
            return Ok(());
        };
        if self.cursor.eat(closer) {
            return Ok(());
        }
        if self.cursor.is_at_end() {
            return Err(self.error(ParseErrorKind::Unterminated("block"), start));
        }
        let expected = match closer {
            ']' => "`]`",
            '}' => "`}`",
            '>' => "`>`",
            _ => "`)`",
        };
        Err(self.error(ParseErrorKind::Expected(expected), self.cursor.position()))
    }

    /// `#name`
    fn library(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        let name = self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::Expected("library name after `#`"), start));
        }
        Ok(self.alloc(NodeKind::Library(name.to_string()), start))
    }

    /// `@` repeated, then an atom.
    fn interpret(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        let marks = self.cursor.eat_while(|c| c == '@');
        let level = u8::try_from(marks.len())
            .map_err(|_| self.error(ParseErrorKind::Expected("at most 255 `@` marks"), start))?;
        let body = self.atom()?;
        Ok(self.alloc(NodeKind::Interpret { level, body }, start))
    }

    /// `\c`: one character as a value.
    fn escaped_char(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();
        match self.cursor.peek() {
            Some(c) if !c.is_whitespace() => {
                self.cursor.bump();
                Ok(self.alloc(NodeKind::Value(c.to_string()), start))
            }
            _ => Err(self.error(
                ParseErrorKind::Expected("a character after `\\`"),
                start,
            )),
        }
    }
}
