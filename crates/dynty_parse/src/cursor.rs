//! Cursor over the token list of one parse.

use dynty_lexer::{Token, TokenKind};

/// Position in a token list that always ends with [`TokenKind::Eof`].
pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with EOF"
        );
        Cursor { tokens, pos: 0 }
    }

    /// The current token. Past the end this stays on EOF.
    pub(crate) fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token `n` positions ahead of the current one.
    pub(crate) fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::Cursor;
    use dynty_lexer::{tokenize, TokenKind};

    #[test]
    fn advance_stops_at_eof() {
        let mut c = Cursor::new(tokenize("int").unwrap());
        assert_eq!(c.advance().kind, TokenKind::Identifier);
        assert!(c.is_at_end());
        assert_eq!(c.advance().kind, TokenKind::Eof);
        assert_eq!(c.advance().kind, TokenKind::Eof);
    }

    #[test]
    fn peek_past_end_is_eof() {
        let c = Cursor::new(tokenize("a :").unwrap());
        assert_eq!(c.peek_kind_at(1), TokenKind::Colon);
        assert_eq!(c.peek_kind_at(2), TokenKind::Eof);
        assert_eq!(c.peek_kind_at(10), TokenKind::Eof);
    }

    #[test]
    fn eat_only_matching() {
        let mut c = Cursor::new(tokenize("| &").unwrap());
        assert!(!c.eat(TokenKind::Ampersand));
        assert!(c.eat(TokenKind::Pipe));
        assert!(c.eat(TokenKind::Ampersand));
        assert!(c.is_at_end());
    }
}
