//! Numbers and ranges.
//!
//! A range is integral unless either bound is written as a float, in which
//! case both bounds are read as floats. `..` includes the upper bound,
//! `...` excludes it.

use dynty_lexer::{Span, Token, TokenKind};
use dynty_value::{Float, Integer, Type};

use super::Grammar;
use crate::{ParseError, ParseErrorKind};

impl Grammar<'_, '_, '_> {
    /// A number, optionally starting a range: `5`, `1.5`, `1..10`, `0...`.
    pub(super) fn number(&mut self) -> Result<Type, ParseError> {
        let lower = self.cursor.advance();
        let inclusive = match self.cursor.current_kind() {
            TokenKind::DotDot => true,
            TokenKind::Ellipsis => false,
            _ => return self.exact_number(&lower),
        };
        let op = self.cursor.advance();
        let upper = self.range_bound();
        let end = upper.as_ref().map_or(op.span, |t| t.span);
        self.range(Some(&lower), upper.as_ref(), inclusive, lower.span.merge(end))
    }

    /// A range without a lower bound: `..10`, `...0.5`.
    pub(super) fn open_range(&mut self) -> Result<Type, ParseError> {
        let op = self.cursor.advance();
        let Some(upper) = self.range_bound() else {
            return Err(self.expected("a number after the range operator"));
        };
        let inclusive = op.kind == TokenKind::DotDot;
        self.range(None, Some(&upper), inclusive, op.span.merge(upper.span))
    }

    fn range_bound(&mut self) -> Option<Token> {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Integer | TokenKind::Float
        )
        .then(|| self.cursor.advance())
    }

    fn exact_number(&self, token: &Token) -> Result<Type, ParseError> {
        if token.kind == TokenKind::Float {
            Ok(Type::ExactFloat(self.float(token)?))
        } else {
            Ok(Type::ExactInteger(self.integer(token)?))
        }
    }

    fn range(
        &self,
        lower: Option<&Token>,
        upper: Option<&Token>,
        inclusive: bool,
        span: Span,
    ) -> Result<Type, ParseError> {
        let is_float = lower
            .into_iter()
            .chain(upper)
            .any(|t| t.kind == TokenKind::Float);
        if is_float {
            let min = lower.map(|t| self.float(t)).transpose()?;
            let max = upper.map(|t| self.float(t)).transpose()?;
            self.construct(Type::float_range(min, max, inclusive), span)
        } else {
            let min = lower.map(|t| self.integer(t)).transpose()?;
            let max = upper.map(|t| self.integer(t)).transpose()?;
            self.construct(Type::integer_range(min, max, inclusive), span)
        }
    }

    fn integer(&self, token: &Token) -> Result<Integer, ParseError> {
        Integer::parse(&token.text).ok_or_else(|| self.malformed(token))
    }

    /// A float bound; integer literals are widened.
    fn float(&self, token: &Token) -> Result<Float, ParseError> {
        if token.kind == TokenKind::Integer {
            return self
                .integer(token)
                .map(|i| Float::parse(&i.to_string()).unwrap_or_else(|| Float::from(i.to_f64())));
        }
        Float::parse(&token.text).ok_or_else(|| self.malformed(token))
    }

    fn malformed(&self, token: &Token) -> ParseError {
        self.error_at(
            ParseErrorKind::Expected {
                expected: "a well-formed number",
            },
            token.span,
        )
    }
}
