//! The umbrella error of the facade and the CLI.

use dynty_lexer::LexError;
use dynty_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Value(#[from] dynty_value::Error),

    #[error("lexical error at {span:?}: {0}", span = .0.span)]
    Lex(#[from] LexError),

    #[error("parse error at {0}")]
    Parse(#[from] ParseError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrong command line.
    #[error("{0}")]
    Usage(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::Error;

    #[test]
    fn parse_errors_keep_their_location() {
        let err = Error::from(dynty_parse::parse("[int").unwrap_err());
        assert!(err.to_string().starts_with("parse error at 1:5: expected"));
    }

    #[test]
    fn lex_errors_show_their_span() {
        let err = Error::from(dynty_lexer::tokenize("a $").unwrap_err());
        assert_eq!(err.to_string(), "lexical error at 2..3: unexpected character '$'");
    }

    #[test]
    fn value_errors_are_transparent() {
        let inner = dynty_value::Error::OddPairCount { len: 3 };
        assert_eq!(Error::from(inner.clone()).to_string(), inner.to_string());
    }
}
