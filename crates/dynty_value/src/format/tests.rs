#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{Alias, AliasRegistry, Binary, Float, Integer, Map, StructEntry};

fn int_range(min: Option<i64>, max: Option<i64>) -> Type {
    Type::integer_range(min.map(Integer::from), max.map(Integer::from), true).unwrap()
}

fn render(t: &Type) -> String {
    TypeFormatter::new().format(t)
}

#[test]
fn primitives() {
    assert_eq!(render(&Type::Any), "any");
    assert_eq!(render(&Type::Nil), "nil");
    assert_eq!(render(&Type::Boolean), "bool");
    assert_eq!(render(&Type::ExactBoolean(false)), "false");
    assert_eq!(render(&Type::integer()), "int");
    assert_eq!(render(&Type::float()), "float");
    assert_eq!(render(&Type::string()), "string");
    assert_eq!(render(&Type::binary()), "binary");
    assert_eq!(render(&Type::Regexp), "regexp");
    assert_eq!(render(&Type::Timestamp), "time");
    assert_eq!(render(&Type::Meta(None)), "type");
    assert_eq!(render(&Type::meta(Some(Type::integer()))), "type[int]");
}

#[test]
fn ranges() {
    assert_eq!(render(&int_range(Some(1), Some(10))), "1..10");
    assert_eq!(render(&int_range(None, Some(10))), "..10");
    assert_eq!(render(&int_range(Some(-3), None)), "-3..");
    assert_eq!(render(&int_range(Some(4), Some(4))), "4");
    let exclusive = Type::float_range(Some(Float::from(0.5)), Some(Float::from(2.0)), false).unwrap();
    assert_eq!(render(&exclusive), "0.5...2.0");
    let inclusive = Type::float_range(Some(Float::from(0.5)), None, true).unwrap();
    assert_eq!(render(&inclusive), "0.5..");
}

#[test]
fn sized_kinds() {
    assert_eq!(render(&Type::sized_string(SizeRange::new(1, 10))), "string[1,10]");
    assert_eq!(render(&Type::sized_string(SizeRange::at_least(2))), "string[2]");
    assert_eq!(render(&Type::sized_binary(SizeRange::exact(4))), "binary[4,4]");
    assert_eq!(render(&Type::sized_array(Type::integer(), SizeRange::new(0, 3))), "[int,0,3]");
    assert_eq!(
        render(&Type::sized_map(Type::string(), Type::integer(), SizeRange::at_least(1))),
        "map[string,1]int"
    );
}

#[test]
fn exact_scalars() {
    assert_eq!(render(&Type::exact_string("a\"b\n")), r#""a\"b\n""#);
    assert_eq!(render(&Type::ci_string("Hi")), r#"~"Hi""#);
    assert_eq!(render(&Type::pattern("a/b").unwrap()), r"/a\/b/");
    assert_eq!(
        render(&Type::ExactBinary(Binary::from_hex("cafe").unwrap())),
        r#"binary["cafe"]"#
    );
    assert_eq!(render(&Type::ExactFloat(Float::from(1.0))), "1.0");
}

#[test]
fn collections() {
    assert_eq!(render(&Type::array(Type::string())), "[string]");
    assert_eq!(render(&Type::tuple(vec![Type::integer(), Type::Nil])), "{int,nil}");
    assert_eq!(render(&Type::map(Type::string(), Type::integer())), "map[string]int");
    let s = Type::structure(
        vec![
            StructEntry::new("a", Type::integer(), true),
            StructEntry::new("b", Type::string(), false),
            StructEntry::new("two words", Type::Nil, true),
        ],
        true,
    )
    .unwrap();
    assert_eq!(render(&s), r#"{a:int,b?:string,"two words":nil,...}"#);
    let open = Type::structure(Vec::new(), true).unwrap();
    assert_eq!(render(&open), "{...}");
}

#[test]
fn exact_collections() {
    let arr = Value::from(vec![Value::from(1), Value::from("x")]);
    assert_eq!(render(&arr.type_of()), r#"{1,"x"}"#);
    let map: Map = [(Value::from("k"), Value::from(1.5))].into_iter().collect();
    assert_eq!(render(&Value::Map(map).type_of()), r#"{"k":1.5}"#);
}

#[test]
fn operator_precedence() {
    let a = Type::exact_string("a");
    let b = Type::exact_string("b");
    let c = Type::exact_string("c");

    let union = Type::any_of(vec![a.clone(), Type::all_of(vec![b.clone(), c.clone()])]);
    assert_eq!(render(&union), r#""a"|"b"&"c""#);

    let meet = Type::all_of(vec![a.clone(), Type::any_of(vec![b.clone(), c.clone()])]);
    assert_eq!(render(&meet), r#""a"&("b"|"c")"#);

    let choice = Type::one_of(vec![Type::any_of(vec![a.clone(), b.clone()]), c.clone()]);
    assert_eq!(render(&choice), r#"("a"|"b")^"c""#);

    let negated = Type::not(Type::any_of(vec![a, b]));
    assert_eq!(render(&negated), r#"!("a"|"b")"#);
}

#[test]
fn map_values_bind_tightly() {
    let t = Type::map(Type::string(), Type::any_of(vec![Type::integer(), Type::string()]));
    assert_eq!(render(&t), "map[string](int|string)");
    let elem = Type::array(Type::any_of(vec![Type::integer(), Type::string()]));
    assert_eq!(render(&elem), "[int|string]");
}

#[test]
fn recursive_alias_is_written_once() {
    let slot = Alias::new("x");
    let body = Type::structure(
        vec![
            StructEntry::new("value", Type::integer(), true),
            StructEntry::new("next", Type::any_of(vec![Type::Alias(slot.clone()), Type::Nil]), true),
        ],
        false,
    )
    .unwrap();
    slot.define(body).unwrap();
    let t = Type::Alias(slot);
    assert_eq!(render(&t), "x = {value:int,next:x|nil}");
    assert_eq!(t.to_string(), "x = {value:int,next:x|nil}");

    let nested = Type::array(t);
    assert_eq!(render(&nested), "[x = {value:int,next:x|nil}]");
    let wrapped = Type::not(Type::Alias(Alias::defined("y", Type::integer())));
    assert_eq!(render(&wrapped), "!(y = int)");
}

#[test]
fn unresolved_alias_is_its_name() {
    assert_eq!(render(&Type::Alias(Alias::new("pending"))), "pending");
}

#[test]
fn registered_types_are_named() {
    let registry = AliasRegistry::new();
    let ints = Type::array(Type::integer());
    registry
        .extend(|adder| adder.add("ints", ints.clone()))
        .unwrap();
    let snapshot = registry.snapshot();
    let formatter = TypeFormatter::with_aliases(&snapshot);

    let t = Type::map(Type::string(), Type::array(Type::integer()));
    assert_eq!(formatter.format(&t), "map[string]ints");
    assert_eq!(formatter.format(&ints), "ints");
    // Scalars are never replaced by a name.
    let registry = AliasRegistry::new();
    registry
        .extend(|adder| adder.add("number", Type::integer()))
        .unwrap();
    let snapshot = registry.snapshot();
    assert_eq!(TypeFormatter::with_aliases(&snapshot).format(&Type::integer()), "int");
}

#[test]
fn values() {
    let nested = Value::from(vec![
        Value::Nil,
        Value::from(true),
        Value::from(vec![Value::from(-1)]),
        Value::from(Type::string()),
    ]);
    assert_eq!(nested.to_string(), "{nil,true,{-1},string}");
    assert_eq!(Value::from("q\"").to_string(), r#""q\"""#);
    assert_eq!(Value::from(2.0).to_string(), "2.0");
}
