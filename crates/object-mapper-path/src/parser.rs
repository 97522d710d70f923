//! Parser for the path text notation.
//!
//! ```text
//! path     := step*
//! step     := "." ident call?  |  "[" (integer | string) "]"
//! call     := "(" (json ("," json)*)? ")"
//! string   := '"' json-escaped '"'  |  "'" escaped "'"
//! ```
//!
//! Whitespace is allowed between steps and inside brackets.

use serde_json::Value;
use thiserror::Error;

use crate::path::Path;
use crate::types::{Accessor, PathStep};
use crate::validate::is_identifier_char;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid number at {pos}")]
    InvalidNumber { pos: usize },
    #[error("Unclosed string at {pos}")]
    UnclosedString { pos: usize },
    #[error("Invalid escape sequence at {pos}")]
    InvalidEscape { pos: usize },
    #[error("Invalid call argument at {pos}: {message}")]
    InvalidArgument { pos: usize, message: String },
}

/// Path notation parser.
pub struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    /// Parse a path. The empty string is the root path.
    pub fn parse(input: &'a str) -> Result<Path, ParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Path, ParseError> {
        let mut steps = Vec::new();
        self.skip_whitespace();
        while let Some(c) = self.peek() {
            let accessor = match c {
                '.' => {
                    self.advance();
                    self.parse_field()?
                }
                '[' => self.parse_subscript()?,
                _ => return Err(self.unexpected()),
            };
            steps.push(PathStep::Read(accessor));
            self.skip_whitespace();
        }
        Ok(Path::new(steps))
    }

    fn parse_field(&mut self) -> Result<Accessor, ParseError> {
        let name = self.parse_identifier()?;
        if self.peek() != Some('(') {
            return Ok(Accessor::field(name));
        }
        self.advance();
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(Accessor::Field { name, args });
        }
        loop {
            self.skip_whitespace();
            args.push(self.parse_argument()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(_) => return Err(self.unexpected()),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
        Ok(Accessor::Field { name, args })
    }

    fn parse_subscript(&mut self) -> Result<Accessor, ParseError> {
        self.expect('[')?;
        self.skip_whitespace();
        let accessor = match self.peek() {
            Some('"') => Accessor::Key(self.parse_json_string()?),
            Some('\'') => Accessor::Key(self.parse_quoted_string()?),
            Some('-') | Some('0'..='9') => Accessor::Index(self.parse_number()?),
            Some(_) => return Err(self.unexpected()),
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.skip_whitespace();
        self.expect(']')?;
        Ok(accessor)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(_) => self.unexpected(),
                None => ParseError::UnexpectedEnd,
            });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_number(&mut self) -> Result<i64, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.pos]
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidNumber { pos: start })
    }

    /// Double-quoted keys use JSON string syntax, which is also how keys are
    /// displayed.
    fn parse_json_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.skip_string('"')?;
        serde_json::from_str(&self.input[start..self.pos])
            .map_err(|_| ParseError::InvalidEscape { pos: start })
    }

    fn parse_quoted_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.advance();
        let mut result = String::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString { pos: start }),
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_pos = self.pos;
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        _ => return Err(ParseError::InvalidEscape { pos: escape_pos }),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
        Ok(result)
    }

    /// A call argument is one JSON literal. Its extent is found by scanning
    /// to the next top-level `,` or `)`; serde_json then parses the slice.
    fn parse_argument(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.skip_string('"')?;
                    continue;
                }
                '[' | '{' => depth += 1,
                ']' | '}' => {
                    if depth == 0 {
                        return Err(self.unexpected());
                    }
                    depth -= 1;
                }
                ',' | ')' if depth == 0 => break,
                _ => {}
            }
            self.advance();
        }
        let literal = self.input[start..self.pos].trim();
        serde_json::from_str(literal).map_err(|err| ParseError::InvalidArgument {
            pos: start,
            message: err.to_string(),
        })
    }

    /// Moves past a string delimited by `quote`, honouring backslash escapes.
    fn skip_string(&mut self, quote: char) -> Result<(), ParseError> {
        let start = self.pos;
        self.advance();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString { pos: start }),
                Some('\\') => {
                    self.advance();
                    if self.peek().is_none() {
                        return Err(ParseError::UnclosedString { pos: start });
                    }
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.unexpected()),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(ch) => ParseError::UnexpectedChar { ch, pos: self.pos },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}
