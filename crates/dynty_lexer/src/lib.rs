//! Tokenizer for the type expression language.
//!
//! The lexer turns text such as `map[string](int|"none")` or
//! `x = {value: int, next: x|nil}` into a flat list of [`Token`]s ending in
//! [`TokenKind::Eof`]. It knows nothing about types; the parser gives the
//! tokens their meaning.
//!
//! String, raw string and regexp tokens carry their cooked content; every
//! other token carries its source text. Lexing stops at the first error.

mod cursor;
mod error;
mod escape;
mod line_index;
mod scanner;
mod token;

pub use cursor::{Cursor, MAX_SOURCE_LEN};
pub use error::{LexError, LexErrorKind};
pub use line_index::LineIndex;
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

/// Tokenize `source`, ending the list with an EOF token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    cursor::check_len(source.len())?;
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
