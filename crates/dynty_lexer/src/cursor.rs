//! Byte cursor over the source text.
//!
//! Reads past the end return `0`, so lookahead never needs a bounds check
//! at the call site. A `0` inside the source is told apart from the end by
//! [`Cursor::is_eof`].

use crate::{LexError, LexErrorKind, Span};

/// Longest source whose offsets fit in a [`Span`].
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Reject sources a cursor cannot address in full.
pub(crate) fn check_len(len: usize) -> Result<(), LexError> {
    if len > MAX_SOURCE_LEN {
        let end = Span::new(u32::MAX, u32::MAX);
        return Err(LexError::new(LexErrorKind::SourceTooLong { len }, end));
    }
    Ok(())
}

/// Cursor over the bytes of a `&str`.
///
/// [`Copy`], so a scanner can snapshot it cheaply.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `source`.
    ///
    /// Sources longer than [`MAX_SOURCE_LEN`] are cut off at that length;
    /// [`tokenize`](crate::tokenize) rejects them before scanning.
    pub fn new(source: &'a str) -> Self {
        let mut end = source.len().min(MAX_SOURCE_LEN);
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        Cursor {
            source: &source[..end],
            pos: 0,
        }
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.source.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    /// The byte at the current position, `0` at the end.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// The byte after the current one.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// The byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance by `n` bytes, stopping at the end.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len());
    }

    /// Advance past one UTF-8 character.
    #[allow(clippy::cast_possible_truncation, reason = "a char is at most 4 bytes")]
    #[inline]
    pub fn advance_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.advance_n(width as u32);
    }

    /// The character at the current position.
    pub fn current_char(&self) -> Option<char> {
        self.source[self.pos as usize..].chars().next()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[allow(clippy::cast_possible_truncation, reason = "cut to u32::MAX in new")]
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    /// The source text between two positions.
    ///
    /// Both must be character boundaries, which holds for positions the
    /// scanner stopped at.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.source[start as usize..end as usize]
    }

    /// The source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip spaces, tabs and line breaks.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    }

    /// Advance to the next byte among `a`, `b` and `c`, or to the end.
    ///
    /// Returns the byte found, `0` at the end.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len"
    )]
    pub fn skip_to_any3(&mut self, a: u8, b: u8, c: u8) -> u8 {
        let remaining = &self.source.as_bytes()[self.pos as usize..];
        match memchr::memchr3(a, b, c, remaining) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len();
                0
            }
        }
    }

    /// Advance to the next `byte`, or to the end. Returns whether it was found.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len"
    )]
    pub fn skip_to(&mut self, byte: u8) -> bool {
        let remaining = &self.source.as_bytes()[self.pos as usize..];
        match memchr::memchr(byte, remaining) {
            Some(offset) => {
                self.pos += offset as u32;
                true
            }
            None => {
                self.pos = self.source_len();
                false
            }
        }
    }
}
