//! Hand-written scanner producing one [`Token`] at a time.
//!
//! Dispatch is on the first byte of the token. Literal scanners find their
//! closing delimiter with `memchr` and cook the content in [`crate::escape`].

use crate::cursor::Cursor;
use crate::escape::{unescape_regexp, unescape_string};
use crate::{LexError, LexErrorKind, Span, Token, TokenKind};

pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
        }
    }

    /// The next token, skipping whitespace.
    ///
    /// Returns an EOF token at the end, and again on every later call.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start), ""));
        }
        match self.cursor.current() {
            b'0'..=b'9' => self.number(start),
            b'-' | b'+' => self.signed_number(start),
            b'"' => self.string(start),
            b'`' => self.raw_string(start),
            b'/' => self.regexp(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.identifier(start)),
            b'.' => self.dots(start),
            b'(' => Ok(self.single(start, TokenKind::LParen)),
            b')' => Ok(self.single(start, TokenKind::RParen)),
            b'[' => Ok(self.single(start, TokenKind::LBracket)),
            b']' => Ok(self.single(start, TokenKind::RBracket)),
            b'{' => Ok(self.single(start, TokenKind::LBrace)),
            b'}' => Ok(self.single(start, TokenKind::RBrace)),
            b',' => Ok(self.single(start, TokenKind::Comma)),
            b':' => Ok(self.single(start, TokenKind::Colon)),
            b'?' => Ok(self.single(start, TokenKind::Question)),
            b'|' => Ok(self.single(start, TokenKind::Pipe)),
            b'^' => Ok(self.single(start, TokenKind::Caret)),
            b'&' => Ok(self.single(start, TokenKind::Ampersand)),
            b'!' => Ok(self.single(start, TokenKind::Bang)),
            b'~' => Ok(self.single(start, TokenKind::Tilde)),
            b'=' => Ok(self.single(start, TokenKind::Equals)),
            _ => {
                let c = self.cursor.current_char().unwrap_or('\0');
                self.cursor.advance_char();
                Err(self.error(LexErrorKind::UnexpectedChar(c), start))
            }
        }
    }

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, self.span_from(start), self.cursor.slice_from(start))
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.cursor.pos())
    }

    fn error(&self, kind: LexErrorKind, start: u32) -> LexError {
        LexError::new(kind, self.span_from(start))
    }

    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    fn identifier(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.token(TokenKind::Identifier, start)
    }

    fn dots(&mut self, start: u32) -> Result<Token, LexError> {
        if self.cursor.peek() != b'.' {
            self.cursor.advance();
            return Err(self.error(LexErrorKind::LoneDot, start));
        }
        if self.cursor.peek2() == b'.' {
            self.cursor.advance_n(3);
            Ok(self.token(TokenKind::Ellipsis, start))
        } else {
            self.cursor.advance_n(2);
            Ok(self.token(TokenKind::DotDot, start))
        }
    }

    // ─── Numbers ────────────────────────────────────────────────────

    fn signed_number(&mut self, start: u32) -> Result<Token, LexError> {
        if !self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            return Err(self.error(LexErrorKind::MissingDigits, start));
        }
        self.cursor.advance();
        self.number(start)
    }

    /// Digits at the cursor, `start` possibly covering a sign before them.
    fn number(&mut self, start: u32) -> Result<Token, LexError> {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            let digits = self.cursor.pos();
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            if self.cursor.pos() == digits {
                return Err(self.error(LexErrorKind::MissingDigits, start));
            }
            return Ok(self.token(TokenKind::Integer, start));
        }

        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut kind = TokenKind::Integer;

        // `1..5` is a range, `1.5` a fraction.
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
            kind = TokenKind::Float;
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            let exponent_digits = match self.cursor.peek() {
                b'+' | b'-' => self.cursor.peek2().is_ascii_digit(),
                b => b.is_ascii_digit(),
            };
            self.cursor.advance();
            if !exponent_digits {
                return Err(self.error(LexErrorKind::MissingDigits, start));
            }
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            self.cursor.eat_while(|b| b.is_ascii_digit());
            kind = TokenKind::Float;
        }
        Ok(self.token(kind, start))
    }

    // ─── Literals ───────────────────────────────────────────────────

    fn string(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        loop {
            match self.cursor.skip_to_any3(b'"', b'\\', b'\n') {
                b'"' => break,
                b'\\' => {
                    self.cursor.advance();
                    if self.cursor.is_eof() {
                        return Err(self.error(LexErrorKind::UnterminatedString, start));
                    }
                    self.cursor.advance_char();
                }
                _ => return Err(self.error(LexErrorKind::UnterminatedString, start)),
            }
        }
        let content = self.cursor.slice(content_start, self.cursor.pos());
        self.cursor.advance();
        let cooked = unescape_string(content, content_start)?;
        Ok(Token::new(TokenKind::String, self.span_from(start), cooked))
    }

    fn raw_string(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        if !self.cursor.skip_to(b'`') {
            return Err(self.error(LexErrorKind::UnterminatedRawString, start));
        }
        let content = self.cursor.slice(content_start, self.cursor.pos());
        self.cursor.advance();
        Ok(Token::new(TokenKind::RawString, self.span_from(start), content))
    }

    fn regexp(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        loop {
            match self.cursor.skip_to_any3(b'/', b'\\', b'\n') {
                b'/' => break,
                b'\\' => {
                    self.cursor.advance();
                    if self.cursor.is_eof() || self.cursor.current() == b'\n' {
                        return Err(self.error(LexErrorKind::UnterminatedRegexp, start));
                    }
                    self.cursor.advance_char();
                }
                _ => return Err(self.error(LexErrorKind::UnterminatedRegexp, start)),
            }
        }
        let content = self.cursor.slice(content_start, self.cursor.pos());
        self.cursor.advance();
        Ok(Token::new(
            TokenKind::Regexp,
            self.span_from(start),
            unescape_regexp(content),
        ))
    }
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests;
