//! Bracketed forms: arrays, maps, tuples and structs.

use dynty_lexer::TokenKind;
use dynty_value::{SizeRange, StructEntry, Type};

use super::Grammar;
use crate::{ParseError, ParseErrorKind};

impl Grammar<'_, '_, '_> {
    /// `[T]`, `[T,min]` or `[T,min,max]`.
    pub(super) fn array(&mut self) -> Result<Type, ParseError> {
        self.cursor.advance();
        let element = self.any_of()?;
        let size = if self.cursor.eat(TokenKind::Comma) {
            self.size_params()?
        } else {
            SizeRange::UNBOUNDED
        };
        self.expect(TokenKind::RBracket, "`,` or `]`")?;
        Ok(Type::sized_array(element, size))
    }

    /// `map` or `map[K(,min(,max))]V`. The value binds like a unary operand.
    pub(super) fn map(&mut self) -> Result<Type, ParseError> {
        if !self.cursor.eat(TokenKind::LBracket) {
            return Ok(Type::map(Type::Any, Type::Any));
        }
        let key = self.any_of()?;
        let size = if self.cursor.eat(TokenKind::Comma) {
            self.size_params()?
        } else {
            SizeRange::UNBOUNDED
        };
        self.expect(TokenKind::RBracket, "`,` or `]`")?;
        let value = self.nested(Self::unary)?;
        Ok(Type::sized_map(key, value, size))
    }

    /// `{...}` holding either tuple elements or struct entries.
    ///
    /// `{}` is the empty tuple. A trailing `...` opens a struct to
    /// additional keys.
    pub(super) fn braces(&mut self) -> Result<Type, ParseError> {
        let open = self.cursor.advance();
        let mut elements = Vec::new();
        let mut entries = Vec::new();
        let mut additional = false;
        while !self.cursor.check(TokenKind::RBrace) {
            if self.at_open_marker() {
                if !elements.is_empty() {
                    return Err(self.error_at(ParseErrorKind::MixedEntries, self.cursor.current().span));
                }
                self.cursor.advance();
                additional = true;
                self.cursor.eat(TokenKind::Comma);
                break;
            }
            if self.at_struct_entry() {
                if !elements.is_empty() {
                    return Err(self.error_at(ParseErrorKind::MixedEntries, self.cursor.current().span));
                }
                entries.push(self.struct_entry()?);
            } else {
                if !entries.is_empty() {
                    return Err(self.error_at(ParseErrorKind::MixedEntries, self.cursor.current().span));
                }
                elements.push(self.any_of()?);
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(TokenKind::RBrace, "`,` or `}`")?;
        if entries.is_empty() && !additional {
            return Ok(Type::tuple(elements));
        }
        self.construct(Type::structure(entries, additional), open.span.merge(close.span))
    }

    /// A `...` that is not the start of a `...N` range.
    fn at_open_marker(&self) -> bool {
        self.cursor.check(TokenKind::Ellipsis)
            && matches!(
                self.cursor.peek_kind_at(1),
                TokenKind::RBrace | TokenKind::Comma
            )
    }

    /// `key:` or `key?:` ahead.
    fn at_struct_entry(&self) -> bool {
        let key = matches!(
            self.cursor.current_kind(),
            TokenKind::Identifier | TokenKind::String | TokenKind::RawString
        );
        key && match self.cursor.peek_kind_at(1) {
            TokenKind::Colon => true,
            TokenKind::Question => self.cursor.peek_kind_at(2) == TokenKind::Colon,
            _ => false,
        }
    }

    fn struct_entry(&mut self) -> Result<StructEntry, ParseError> {
        let key = self.cursor.advance();
        let required = !self.cursor.eat(TokenKind::Question);
        self.expect(TokenKind::Colon, "`:`")?;
        let value = self.any_of()?;
        Ok(StructEntry::new(&*key.text, value, required))
    }

    /// `min` or `min,max` inside brackets. A lone `min` leaves the upper
    /// bound open.
    pub(super) fn size_params(&mut self) -> Result<SizeRange, ParseError> {
        let min = self.size()?;
        if !self.cursor.eat(TokenKind::Comma) {
            return Ok(SizeRange::at_least(min));
        }
        let max = self.size()?;
        Ok(SizeRange::new(min, max))
    }

    fn size(&mut self) -> Result<usize, ParseError> {
        if !self.cursor.check(TokenKind::Integer) {
            return Err(self.expected("a size"));
        }
        let token = self.cursor.advance();
        token
            .text
            .parse::<usize>()
            .map_err(|_| {
                self.error_at(
                    ParseErrorKind::Expected {
                        expected: "a non-negative size",
                    },
                    token.span,
                )
            })
    }
}
