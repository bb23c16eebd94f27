//! Recursive descent over the type expression grammar.
//!
//! ```text
//! top     := anyOf EOF
//! anyOf   := oneOf ('|' oneOf)*
//! oneOf   := allOf ('^' allOf)*
//! allOf   := unary ('&' unary)*
//! unary   := '!' unary | '~' STRING | primary
//! primary := number | range | STRING | RAWSTRING | REGEXP
//!          | IDENT '=' anyOf
//!          | IDENT ('[' params ']')?
//!          | '[' anyOf (',' INT (',' INT)?)? ']'
//!          | '{' entries? '}'
//!          | 'map' ('[' anyOf (',' INT (',' INT)?)? ']' unary)?
//!          | '(' anyOf ')'
//! ```
//!
//! Literals and ranges live in `literal`, identifiers (built-ins and
//! aliases) in `named`, and bracketed forms in `collection`.

mod collection;
mod literal;
mod named;

use dynty_lexer::{LineIndex, Span, Token, TokenKind};
use dynty_stack::ensure_sufficient_stack;
use dynty_value::{AliasAdder, Type};

use crate::cursor::Cursor;
use crate::scope::Scope;
use crate::{ParseError, ParseErrorKind, ParserConfig};

pub(crate) struct Grammar<'s, 'g, 'a> {
    cursor: Cursor,
    source: &'s str,
    index: LineIndex<'s>,
    config: ParserConfig,
    depth: usize,
    scope: Scope,
    adder: &'g mut AliasAdder<'a>,
}

impl<'s, 'g, 'a> Grammar<'s, 'g, 'a> {
    pub(crate) fn new(
        cursor: Cursor,
        source: &'s str,
        index: LineIndex<'s>,
        config: ParserConfig,
        adder: &'g mut AliasAdder<'a>,
    ) -> Self {
        Grammar {
            cursor,
            source,
            index,
            config,
            depth: 0,
            scope: Scope::default(),
            adder,
        }
    }

    /// Parse the whole input, then register its alias declarations.
    pub(crate) fn parse_top(mut self) -> Result<Type, ParseError> {
        let t = self.any_of()?;
        if !self.cursor.is_at_end() {
            return Err(self.expected("end of input"));
        }
        if let Some((slot, span)) = self.scope.unresolved() {
            let kind = ParseErrorKind::UnresolvedAlias {
                name: slot.name().to_owned(),
            };
            return Err(self.error_at(kind, *span));
        }
        let Grammar {
            scope,
            adder,
            source,
            index,
            ..
        } = self;
        for (slot, span) in scope.into_declared() {
            let name = slot.name().to_owned();
            adder
                .add(name.as_str(), Type::Alias(slot))
                .map_err(|err| {
                    let kind = match err {
                        dynty_value::Error::AliasConflict { .. } => {
                            ParseErrorKind::AliasRedefined { name }
                        }
                        other => ParseErrorKind::Construction(other),
                    };
                    ParseError::at(kind, span, source, &index)
                })?;
        }
        Ok(t)
    }

    fn any_of(&mut self) -> Result<Type, ParseError> {
        self.nested(|g| {
            let first = g.one_of()?;
            if !g.cursor.check(TokenKind::Pipe) {
                return Ok(first);
            }
            let mut operands = vec![first];
            while g.cursor.eat(TokenKind::Pipe) {
                operands.push(g.one_of()?);
            }
            Ok(Type::any_of(operands))
        })
    }

    fn one_of(&mut self) -> Result<Type, ParseError> {
        let first = self.all_of()?;
        if !self.cursor.check(TokenKind::Caret) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.cursor.eat(TokenKind::Caret) {
            operands.push(self.all_of()?);
        }
        Ok(Type::one_of(operands))
    }

    fn all_of(&mut self) -> Result<Type, ParseError> {
        let first = self.unary()?;
        if !self.cursor.check(TokenKind::Ampersand) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.cursor.eat(TokenKind::Ampersand) {
            operands.push(self.unary()?);
        }
        Ok(Type::all_of(operands))
    }

    fn unary(&mut self) -> Result<Type, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Bang => {
                self.cursor.advance();
                let negated = self.nested(Self::unary)?;
                Ok(Type::not(negated))
            }
            TokenKind::Tilde => {
                self.cursor.advance();
                let text = self.expect_string("a string after `~`")?;
                Ok(Type::ci_string(&*text.text))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Type, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Integer | TokenKind::Float => self.number(),
            TokenKind::DotDot | TokenKind::Ellipsis => self.open_range(),
            TokenKind::String | TokenKind::RawString => {
                let token = self.cursor.advance();
                Ok(Type::exact_string(&*token.text))
            }
            TokenKind::Regexp => {
                let token = self.cursor.advance();
                self.construct(Type::pattern(&token.text), token.span)
            }
            TokenKind::Identifier => self.named(),
            TokenKind::LBracket => self.array(),
            TokenKind::LBrace => self.braces(),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.any_of()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.expected("a type")),
        }
    }

    /// Run one level of nesting, failing once the configured depth is
    /// exceeded.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            let kind = ParseErrorKind::TooDeep {
                limit: self.config.max_depth,
            };
            return Err(self.error_at(kind, self.cursor.current().span));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.cursor.check(kind) {
            Ok(self.cursor.advance())
        } else {
            Err(self.expected(expected))
        }
    }

    /// A quoted or raw string token.
    fn expect_string(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::String | TokenKind::RawString => Ok(self.cursor.advance()),
            _ => Err(self.expected(expected)),
        }
    }

    /// Lift a constructor failure to an error at `span`.
    fn construct<T>(&self, result: Result<T, dynty_value::Error>, span: Span) -> Result<T, ParseError> {
        result.map_err(|err| self.error_at(ParseErrorKind::Construction(err), span))
    }

    fn expected(&self, expected: &'static str) -> ParseError {
        let span = self.cursor.current().span;
        self.error_at(ParseErrorKind::Expected { expected }, span)
    }

    fn error_at(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::at(kind, span, self.source, &self.index)
    }
}
