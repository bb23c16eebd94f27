#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn hex_round_trip() {
    let bin = Binary::from_hex("00ff10Ab").unwrap();
    assert_eq!(bin.as_bytes(), &[0x00, 0xff, 0x10, 0xab]);
    assert_eq!(bin.to_hex(), "00ff10ab");
}

#[test]
fn hex_rejects_bad_input() {
    assert!(Binary::from_hex("abc").is_err());
    assert!(Binary::from_hex("zz").is_err());
    assert!(Binary::from_hex("").unwrap().is_empty());
}

#[test]
fn regexp_equality_by_pattern() {
    let a = Regexp::new("^a+$").unwrap();
    let b = Regexp::new("^a+$").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert!(a.is_match("aaa"));
    assert!(!a.is_match("aab"));
}

#[test]
fn regexp_rejects_invalid_pattern() {
    let err = Regexp::new("(").unwrap_err();
    assert!(matches!(err, Error::InvalidRegexp { pattern, .. } if pattern == "("));
}

#[test]
fn timestamp_normalizes_to_utc() {
    let a = Timestamp::parse("2024-01-01T12:00:00+02:00").unwrap();
    let b = Timestamp::parse("2024-01-01T10:00:00Z").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "2024-01-01T10:00:00Z");
    assert!(Timestamp::parse("yesterday").is_err());
}

#[test]
fn natives_compare_by_identity() {
    let a = Native::new(String::from("x"));
    let b = Native::new(String::from("x"));
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert_eq!(a.downcast_ref::<String>().map(String::as_str), Some("x"));
    assert!(a.type_name().ends_with("String"));
}
