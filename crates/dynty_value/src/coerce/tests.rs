#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use crate::{Alias, Error, Integer, Map, SizeRange, StructEntry, Type, Value};

fn array(values: Vec<Value>) -> Value {
    Value::from(values)
}

#[test]
fn integers_from_strings_floats_and_bools() {
    let t = Type::integer();
    assert_eq!(t.new_value(Value::from(" 42 ")).unwrap(), Value::from(42));
    assert_eq!(t.new_value(Value::from("0x1f")).unwrap(), Value::from(31));
    assert_eq!(t.new_value(Value::from(3.9)).unwrap(), Value::from(3));
    assert_eq!(t.new_value(Value::from(true)).unwrap(), Value::from(1));
    assert_eq!(t.new_value(Value::from(7)).unwrap(), Value::from(7));
}

#[test]
fn integer_out_of_range_is_rejected() {
    let t = Type::integer_range(Some(Integer::from(1)), Some(Integer::from(10)), true).unwrap();
    let err = t.new_value(Value::from("11")).unwrap_err();
    assert_eq!(
        err,
        Error::NotAssignable {
            expected: t.clone(),
            actual: Value::from(11),
        }
    );
    assert!(matches!(
        t.new_value(Value::from("ten")),
        Err(Error::NotAssignable { .. })
    ));
}

#[test]
fn floats() {
    let t = Type::float();
    assert_eq!(t.new_value(Value::from(2)).unwrap(), Value::from(2.0));
    assert_eq!(t.new_value(Value::from("1.5")).unwrap(), Value::from(1.5));
    assert_eq!(t.new_value(Value::from(false)).unwrap(), Value::from(0.0));
}

#[test]
fn strings_from_scalars() {
    let t = Type::string();
    assert_eq!(t.new_value(Value::from(12)).unwrap(), Value::from("12"));
    assert_eq!(t.new_value(Value::from(true)).unwrap(), Value::from("true"));
    assert_eq!(t.new_value(Value::from(0.5)).unwrap(), Value::from("0.5"));

    let short = Type::sized_string(SizeRange::new(1, 2));
    assert!(short.new_value(Value::from(123)).is_err());
    assert_eq!(short.new_value(Value::from("ab")).unwrap(), Value::from("ab"));
}

#[test]
fn booleans() {
    assert_eq!(Type::Boolean.new_value(Value::from("TRUE")).unwrap(), Value::from(true));
    assert_eq!(Type::Boolean.new_value(Value::from(0)).unwrap(), Value::from(false));
    assert!(Type::Boolean.new_value(Value::from("yes")).is_err());
}

#[test]
fn regexps_and_timestamps_from_text() {
    let re = Type::Regexp.new_value(Value::from("^a+$")).unwrap();
    assert!(re.as_regexp().unwrap().is_match("aa"));
    assert!(matches!(
        Type::Regexp.new_value(Value::from("(")),
        Err(Error::InvalidRegexp { .. })
    ));

    let ts = Type::Timestamp
        .new_value(Value::from("2021-03-04T05:06:07Z"))
        .unwrap();
    assert_eq!(ts.to_string(), r#"time["2021-03-04T05:06:07Z"]"#);
    assert!(matches!(
        Type::Timestamp.new_value(Value::from("yesterday")),
        Err(Error::InvalidTimestamp { .. })
    ));
}

#[test]
fn binaries() {
    let b = Type::binary().new_value(Value::from("00ff")).unwrap();
    assert_eq!(b.as_binary().unwrap().as_bytes(), &[0x00, 0xff]);
    let from_ints = Type::binary()
        .new_value(array(vec![Value::from(1), Value::from(2)]))
        .unwrap();
    assert_eq!(from_ints.as_binary().unwrap().as_bytes(), &[1, 2]);
    assert!(Type::binary()
        .new_value(array(vec![Value::from(256)]))
        .is_err());
}

#[test]
fn maps_from_pair_arrays() {
    let t = Type::map(Type::string(), Type::integer());
    let m = t
        .new_value(array(vec![
            Value::from("a"),
            Value::from(1),
            Value::from("b"),
            Value::from(2),
        ]))
        .unwrap();
    let expected: Map = [
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
    ]
    .into_iter()
    .collect();
    assert_eq!(m, Value::Map(expected));
    assert_eq!(
        t.new_value(array(vec![Value::from("a")])),
        Err(Error::OddPairCount { len: 1 })
    );
}

#[test]
fn structs_check_the_converted_map() {
    let t = Type::structure(vec![StructEntry::new("a", Type::integer(), true)], false).unwrap();
    assert!(t
        .new_value(array(vec![Value::from("a"), Value::from(1)]))
        .is_ok());
    assert!(t
        .new_value(array(vec![Value::from("b"), Value::from(1)]))
        .is_err());
}

#[test]
fn arrays_from_maps_and_scalars() {
    let t = Type::array(Type::Any);
    let m: Map = std::iter::once((Value::from("k"), Value::from(1))).collect();
    assert_eq!(
        t.new_value(Value::Map(m)).unwrap(),
        array(vec![Value::from("k"), Value::from(1)])
    );
    assert_eq!(t.new_value(Value::from(5)).unwrap(), array(vec![Value::from(5)]));
    let same = array(vec![Value::Nil]);
    assert_eq!(t.new_value(same.clone()).unwrap(), same);
}

#[test]
fn meta_takes_the_type_of_its_argument() {
    let t = Type::Meta(None);
    let v = t.new_value(Value::from(3)).unwrap();
    assert_eq!(v, Value::Type(Type::ExactInteger(Integer::from(3))));
    let typed = Type::meta(Some(Type::string()));
    assert!(typed.new_value(Value::from(3)).is_err());
    assert!(typed.new_value(Value::from(Type::exact_string("x"))).is_ok());
}

#[test]
fn aliases_convert_to_their_target() {
    let t = Type::Alias(Alias::defined("count", Type::integer()));
    assert_eq!(t.new_value(Value::from("5")).unwrap(), Value::from(5));
    let err = t.new_value(Value::Nil).unwrap_err();
    assert!(matches!(err, Error::NotAssignable { expected, .. } if expected == t));
}

#[test]
fn unconvertible_arguments_are_checked_as_is() {
    assert_eq!(Type::Nil.new_value(Value::Nil).unwrap(), Value::Nil);
    assert!(Type::Nil.new_value(Value::from(1)).is_err());
    assert_eq!(Type::Any.new_value(Value::from("x")).unwrap(), Value::from("x"));
}
