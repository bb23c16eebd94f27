//! Token and span types.

use std::fmt;

/// Byte range in the source, `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Token discriminant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Decimal or `0x` hex integer, with an optional sign.
    Integer,
    /// Number with a fraction and/or exponent.
    Float,
    /// `"..."`, escapes resolved.
    String,
    /// `` `...` ``, taken verbatim.
    RawString,
    /// `/.../`, with `\/` resolved to `/`.
    Regexp,
    Identifier,
    /// `..`
    DotDot,
    /// `...`
    Ellipsis,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Question,
    Pipe,
    Caret,
    Ampersand,
    Bang,
    Tilde,
    Equals,
    Eof,
}

impl TokenKind {
    /// How the kind is named in messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string literal",
            TokenKind::RawString => "raw string literal",
            TokenKind::Regexp => "regexp literal",
            TokenKind::Identifier => "identifier",
            TokenKind::DotDot => "`..`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Question => "`?`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Bang => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::Equals => "`=`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Whether the token carries a literal payload in [`Token::text`].
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::Regexp
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One token.
///
/// `text` is the cooked content of string, raw string and regexp literals
/// and the source text of everything else (empty for EOF).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: Box<str>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<Box<str>>) -> Self {
        Token {
            kind,
            span,
            text: text.into(),
        }
    }

    /// Whether this is the identifier `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && &*self.text == name
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::String => write!(f, "{:?}", self.text),
            TokenKind::RawString => write!(f, "`{}`", self.text),
            TokenKind::Regexp => write!(f, "/{}/", self.text),
            TokenKind::Integer | TokenKind::Float | TokenKind::Identifier => {
                write!(f, "`{}`", self.text)
            }
            other => f.write_str(other.describe()),
        }
    }
}
