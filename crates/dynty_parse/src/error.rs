//! Parse errors.
//!
//! Every error carries the text of the offending token, its span and the
//! 1-based line and column the span starts at.

use dynty_lexer::{LexError, LexErrorKind, LineIndex, Span, TokenKind};

/// A failed parse.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{line}:{column}: {kind}, found {}", describe_found(.found))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Source text of the offending token, empty at end of input.
    pub found: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The next token cannot continue the expression.
    #[error("expected {expected}")]
    Expected { expected: &'static str },

    #[error("{0}")]
    Lex(LexErrorKind),

    /// A brace block mixing `key: type` entries with bare element types.
    #[error("struct entries and tuple elements cannot be mixed")]
    MixedEntries,

    /// A name that is neither built in, declared nor registered.
    #[error("reference to unresolved alias `{name}`")]
    UnresolvedAlias { name: String },

    #[error("alias `{name}` is already defined")]
    AliasRedefined { name: String },

    /// `x = x`, `x = int | x` and other declarations that reach themselves
    /// outside any collection.
    #[error("alias `{name}` refers to itself outside a collection")]
    SelfAlias { name: String },

    #[error("`{name}` is a built-in type and cannot be redefined")]
    BuiltinRedefined { name: String },

    /// A type or value constructor rejected its arguments.
    #[error("{0}")]
    Construction(dynty_value::Error),

    /// Nesting deeper than [`crate::ParserConfig::max_depth`].
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl ParseError {
    /// An error at `span` of `source`.
    pub(crate) fn at(kind: ParseErrorKind, span: Span, source: &str, index: &LineIndex<'_>) -> Self {
        let (line, column) = index.line_col(span.start);
        let found = source
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default();
        ParseError {
            kind,
            found: found.to_owned(),
            span,
            line,
            column,
        }
    }

    pub(crate) fn lex(err: LexError, source: &str, index: &LineIndex<'_>) -> Self {
        ParseError::at(ParseErrorKind::Lex(err.kind), err.span, source, index)
    }

    /// Whether the parse ran out of input.
    pub fn is_eof(&self) -> bool {
        self.found.is_empty() && self.span.is_empty()
    }
}

/// Errors raised outside of any token, such as alias conflicts found while
/// merging into a registry. They have no location.
impl From<dynty_value::Error> for ParseError {
    fn from(err: dynty_value::Error) -> Self {
        let kind = match err {
            dynty_value::Error::AliasConflict { name } => ParseErrorKind::AliasRedefined {
                name: name.to_string(),
            },
            other => ParseErrorKind::Construction(other),
        };
        ParseError {
            kind,
            found: String::new(),
            span: Span::new(0, 0),
            line: 1,
            column: 1,
        }
    }
}

fn describe_found(found: &str) -> String {
    if found.is_empty() {
        TokenKind::Eof.describe().to_owned()
    } else {
        format!("`{found}`")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn display_includes_location_and_token() {
        let source = "int |\n  ]";
        let err = ParseError::at(
            ParseErrorKind::Expected { expected: "a type" },
            Span::new(8, 9),
            source,
            &LineIndex::new(source),
        );
        assert_eq!(err.to_string(), "2:3: expected a type, found `]`");
    }

    #[test]
    fn display_at_end_of_input() {
        let source = "int |";
        let err = ParseError::at(
            ParseErrorKind::Expected { expected: "a type" },
            Span::new(5, 5),
            source,
            &LineIndex::new(source),
        );
        assert!(err.is_eof());
        assert!(err.to_string().starts_with("1:6: expected a type, found "));
    }

    #[test]
    fn alias_conflict_maps_to_redefinition() {
        let err = ParseError::from(dynty_value::Error::AliasConflict { name: "x".into() });
        assert_eq!(err.kind, ParseErrorKind::AliasRedefined { name: "x".into() });
        assert_eq!((err.line, err.column), (1, 1));
    }
}
