//! Lexer errors.

use crate::Span;

/// A lexical error and where it happened.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// A lone `.`; ranges are written `..` or `...`.
    #[error("unexpected `.`, expected `..` or `...`")]
    LoneDot,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated raw string literal")]
    UnterminatedRawString,
    #[error("unterminated regexp literal")]
    UnterminatedRegexp,
    #[error("invalid escape `\\{0}`")]
    InvalidEscape(char),
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    /// `0x`, `1e` or a sign without digits.
    #[error("expected digits")]
    MissingDigits,
    #[error("source of {len} bytes is too long to tokenize")]
    SourceTooLong { len: usize },
}
