#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn plain_content_is_borrowed() {
    assert!(matches!(unescape_string("abc", 0).unwrap(), Cow::Borrowed("abc")));
    assert!(matches!(unescape_regexp("a\\d+"), Cow::Borrowed("a\\d+")));
}

#[test]
fn simple_escapes() {
    assert_eq!(
        unescape_string(r#"a\n\t\r\0\\\"\'\/"#, 0).unwrap(),
        "a\n\t\r\0\\\"'/"
    );
}

#[test]
fn unicode_escapes() {
    assert_eq!(unescape_string(r"\u00e9x", 0).unwrap(), "éx");
    assert_eq!(unescape_string(r"\u{1F600}!", 0).unwrap(), "\u{1F600}!");
    assert_eq!(unescape_string(r"\u{41}B", 0).unwrap(), "AB");
}

#[test]
fn bad_unicode_escapes() {
    for bad in [r"\u12", r"\u{}", r"\u{110000}", r"\u{d800}", r"\uzzzz", r"\u{1234567}"] {
        let err = unescape_string(bad, 10).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidUnicodeEscape, "{bad}");
        assert_eq!(err.span.start, 10);
    }
}

#[test]
fn unknown_escape_reports_its_span() {
    let err = unescape_string(r"ab\q", 5).unwrap_err();
    assert_eq!(err, LexError::new(LexErrorKind::InvalidEscape('q'), Span::new(7, 9)));
}

#[test]
fn regexp_keeps_its_own_escapes() {
    assert_eq!(unescape_regexp(r"a\/b\d\\"), r"a/b\d\\");
    assert_eq!(unescape_regexp(r"\\/"), r"\\/");
}
