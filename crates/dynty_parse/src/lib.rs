//! Parser for type expressions.
//!
//! Turns text such as `map[string](int|string)` or
//! `x = {value: int, next: x|nil}` into a [`Type`]. Rendering a type with
//! `Display` produces text this parser reads back to an equal type.
//!
//! Alias declarations in the text are registered when the parse succeeds:
//! [`parse`] keeps them private to the returned type, [`parse_with`] adds
//! them to a shared [`AliasRegistry`] and resolves names already in it.

mod cursor;
mod error;
mod grammar;
mod scope;

pub use error::{ParseError, ParseErrorKind};

use dynty_lexer::{tokenize, LineIndex};
use dynty_value::{AliasAdder, AliasMap, AliasRegistry, Type};

use crate::cursor::Cursor;
use crate::grammar::Grammar;

/// Parser limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest nesting of brackets, parentheses and prefix operators.
    pub max_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parser for one type expression.
pub struct Parser<'s> {
    source: &'s str,
    config: ParserConfig,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        Parser::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &'s str, config: ParserConfig) -> Self {
        Parser { source, config }
    }

    /// Parse with a private alias scope.
    pub fn parse(&self) -> Result<Type, ParseError> {
        let base = AliasMap::default();
        let mut adder = AliasAdder::new(&base);
        self.parse_in(&mut adder)
    }

    /// Parse, resolving names through `adder` and adding the aliases the
    /// text declares to it. Nothing is added when the parse fails.
    pub fn parse_in(&self, adder: &mut AliasAdder<'_>) -> Result<Type, ParseError> {
        let index = LineIndex::new(self.source);
        let tokens = tokenize(self.source).map_err(|err| ParseError::lex(err, self.source, &index))?;
        Grammar::new(Cursor::new(tokens), self.source, index, self.config, adder).parse_top()
    }
}

/// Parse `source` with a private alias scope.
pub fn parse(source: &str) -> Result<Type, ParseError> {
    Parser::new(source).parse()
}

/// Parse `source` against `registry`, publishing its alias declarations.
pub fn parse_with(source: &str, registry: &AliasRegistry) -> Result<Type, ParseError> {
    let _span = tracing::debug_span!("parse_with", len = source.len()).entered();
    registry.extend(|adder| Parser::new(source).parse_in(adder))
}

#[cfg(test)]
mod tests;
