use pretty_assertions::assert_eq;

use dynty_value::{Integer, SizeRange, StructEntry, Type, Value};

use super::map;
use crate::parse;

#[test]
fn sized_string() {
    let t = parse("string[1,10]").unwrap();
    assert_eq!(t, Type::sized_string(SizeRange::new(1, 10)));
    assert!(t.instance(&Value::from("a")));
    assert!(t.instance(&Value::from("0123456789")));
    assert!(!t.instance(&Value::from("")));
    assert!(!t.instance(&Value::from("0123456789a")));
    assert!(!t.instance(&Value::from(5)));
}

#[test]
fn map_of_union() {
    let t = parse("map[string](int|string)").unwrap();
    assert_eq!(
        t,
        Type::map(
            Type::string(),
            Type::any_of(vec![Type::integer(), Type::string()])
        )
    );
    assert!(t.instance(&map(&[("a", Value::from(1)), ("b", Value::from("x"))])));
    assert!(t.instance(&map(&[])));
    assert!(!t.instance(&map(&[("a", Value::from(1.5))])));
}

#[test]
fn struct_with_optional_entry() {
    let t = parse("{a:int, b?:string}").unwrap();
    let expected = Type::structure(
        vec![
            StructEntry::new("a", Type::integer(), true),
            StructEntry::new("b", Type::string(), false),
        ],
        false,
    )
    .unwrap();
    assert_eq!(t, expected);
    assert!(t.instance(&map(&[("a", Value::from(1))])));
    assert!(t.instance(&map(&[("a", Value::from(1)), ("b", Value::from("x"))])));
    assert!(!t.instance(&map(&[("b", Value::from("x"))])));
    assert!(!t.instance(&map(&[("a", Value::from(1)), ("c", Value::from(2))])));
    assert!(!t.instance(&map(&[("a", Value::from(1)), ("b", Value::from(2))])));
}

#[test]
fn integer_range() {
    let t = parse("1..10").unwrap();
    assert_eq!(
        t,
        Type::integer_range(Some(Integer::from(1)), Some(Integer::from(10)), true).unwrap()
    );
    assert!(t.instance(&Value::from(1)));
    assert!(t.instance(&Value::from(10)));
    assert!(!t.instance(&Value::from(0)));
    assert!(!t.instance(&Value::from(11)));
    assert!(parse("int").unwrap().assignable(&t));
    assert!(!t.assignable(&parse("int").unwrap()));
}

#[test]
fn recursive_linked_list() {
    let t = parse("x = {value: int, next: x|nil}").unwrap();
    let tail = map(&[("value", Value::from(2)), ("next", Value::Nil)]);
    let list = map(&[("value", Value::from(1)), ("next", tail)]);
    assert!(t.instance(&list));

    let broken_tail = map(&[("value", Value::from("two")), ("next", Value::Nil)]);
    let broken = map(&[("value", Value::from(1)), ("next", broken_tail)]);
    assert!(!t.instance(&broken));
    assert!(!t.instance(&Value::Nil));

    assert!(t.assignable(&t));
    assert_eq!(t.to_string(), "x = {value:int,next:x|nil}");
}
