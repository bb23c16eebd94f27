#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{tokenize, LexErrorKind, Span, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .iter()
        .map(|t| t.text.to_string())
        .collect()
}

fn error(source: &str) -> (LexErrorKind, Span) {
    let err = tokenize(source).unwrap_err();
    (err.kind, err.span)
}

#[test]
fn empty_and_blank_sources() {
    assert_eq!(kinds(""), [TokenKind::Eof]);
    assert_eq!(kinds(" \t\r\n "), [TokenKind::Eof]);
    let eof = tokenize("  ").unwrap().pop().unwrap();
    assert_eq!(eof.span, Span::new(2, 2));
}

#[test]
fn punctuation() {
    use TokenKind::*;
    assert_eq!(
        kinds("()[]{},:?|^&!~="),
        [
            LParen, RParen, LBracket, RBracket, LBrace, RBrace, Comma, Colon, Question, Pipe,
            Caret, Ampersand, Bang, Tilde, Equals, Eof
        ]
    );
}

#[test]
fn identifiers() {
    assert_eq!(kinds("map _x a1_b"), [
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Eof
    ]);
    assert_eq!(texts("string[1]"), ["string", "[", "1", "]", ""]);
}

#[test]
fn integers() {
    assert_eq!(texts("0 42 -7 +3 0x1F -0xff"), ["0", "42", "-7", "+3", "0x1F", "-0xff", ""]);
    assert!(kinds("0x1F").starts_with(&[TokenKind::Integer]));
}

#[test]
fn floats() {
    assert_eq!(
        kinds("1.5 -0.25 1e10 2E-3 6.02e+23"),
        [TokenKind::Float, TokenKind::Float, TokenKind::Float, TokenKind::Float, TokenKind::Float, TokenKind::Eof]
    );
}

#[test]
fn ranges_split_from_numbers() {
    use TokenKind::*;
    assert_eq!(kinds("1..10"), [Integer, DotDot, Integer, Eof]);
    assert_eq!(kinds("1...10"), [Integer, Ellipsis, Integer, Eof]);
    assert_eq!(kinds("..5"), [DotDot, Integer, Eof]);
    assert_eq!(kinds("1.5..2.5"), [Float, DotDot, Float, Eof]);
    assert_eq!(kinds("-3.."), [Integer, DotDot, Eof]);
    assert_eq!(texts("0.5...1"), ["0.5", "...", "1", ""]);
}

#[test]
fn strings_are_cooked() {
    let tokens = tokenize(r#""a\"b" "\u{41}\n""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(&*tokens[0].text, "a\"b");
    assert_eq!(tokens[0].span, Span::new(0, 6));
    assert_eq!(&*tokens[1].text, "A\n");
}

#[test]
fn raw_strings_are_verbatim() {
    let tokens = tokenize("`a\\n\"b\nc`").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::RawString);
    assert_eq!(&*tokens[0].text, "a\\n\"b\nc");
}

#[test]
fn regexps_resolve_only_slashes() {
    let tokens = tokenize(r"/^a\/b\d+$/ |").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Regexp);
    assert_eq!(&*tokens[0].text, r"^a/b\d+$");
    assert_eq!(tokens[1].kind, TokenKind::Pipe);
}

#[test]
fn type_expression() {
    use TokenKind::*;
    assert_eq!(
        kinds(r#"x = {value: int, next?: x|nil, ...} & map[string,1](int|"a")"#),
        [
            Identifier, Equals, LBrace, Identifier, Colon, Identifier, Comma, Identifier, Question,
            Colon, Identifier, Pipe, Identifier, Comma, Ellipsis, RBrace, Ampersand, Identifier,
            LBracket, Identifier, Comma, Integer, RBracket, LParen, Identifier, Pipe, String,
            RParen, Eof
        ]
    );
}

#[test]
fn unterminated_literals() {
    assert_eq!(error(r#""abc"#), (LexErrorKind::UnterminatedString, Span::new(0, 4)));
    assert_eq!(error("\"ab\ncd\""), (LexErrorKind::UnterminatedString, Span::new(0, 3)));
    assert_eq!(error(r#""ab\"#), (LexErrorKind::UnterminatedString, Span::new(0, 4)));
    assert_eq!(error("`abc").0, LexErrorKind::UnterminatedRawString);
    assert_eq!(error("/abc").0, LexErrorKind::UnterminatedRegexp);
    assert_eq!(error("/a\\/").0, LexErrorKind::UnterminatedRegexp);
}

#[test]
fn invalid_escapes() {
    assert_eq!(error(r#"  "a\qb""#), (LexErrorKind::InvalidEscape('q'), Span::new(4, 6)));
    assert_eq!(error(r#""\u{zz}""#).0, LexErrorKind::InvalidUnicodeEscape);
}

#[test]
fn bad_numbers() {
    assert_eq!(error("0x"), (LexErrorKind::MissingDigits, Span::new(0, 2)));
    assert_eq!(error("1e"), (LexErrorKind::MissingDigits, Span::new(0, 2)));
    assert_eq!(error("- 1"), (LexErrorKind::MissingDigits, Span::new(0, 1)));
}

#[test]
fn stray_characters() {
    assert_eq!(error("a . b"), (LexErrorKind::LoneDot, Span::new(2, 3)));
    assert_eq!(error("int # x"), (LexErrorKind::UnexpectedChar('#'), Span::new(4, 5)));
    assert_eq!(error("é"), (LexErrorKind::UnexpectedChar('é'), Span::new(0, 2)));
}

#[test]
fn eof_repeats() {
    let mut scanner = crate::Scanner::new("a");
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
}

#[allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]
mod properties {
    use super::*;

    proptest! {
        #[test]
        fn never_panics(source in "\\PC{0,40}") {
            let _ = tokenize(&source);
        }

        #[test]
        fn spans_are_ordered_and_in_bounds(source in "[a-z0-9 .|&^!(){}\\[\\],:?=~\"-]{0,40}") {
            if let Ok(tokens) = tokenize(&source) {
                let mut last = 0;
                for t in &tokens {
                    prop_assert!(t.span.start >= last);
                    prop_assert!(t.span.end as usize <= source.len());
                    last = t.span.end;
                }
                prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            }
        }

        #[test]
        fn integers_lex_whole(n in any::<i64>()) {
            let text = n.to_string();
            let tokens = tokenize(&text).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(tokens[0].kind, TokenKind::Integer);
            prop_assert_eq!(&*tokens[0].text, text.as_str());
        }
    }
}
