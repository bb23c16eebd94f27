use std::sync::Arc;

use pretty_assertions::assert_eq;

use dynty_value::{AliasAdder, AliasMap, AliasRegistry, Type, TypeFormatter, Value};

use super::map;
use crate::{parse, parse_with, ParseErrorKind, Parser};

#[test]
fn alias_is_transparent() {
    let t = parse("ints = [int]").unwrap();
    assert!(matches!(t, Type::Alias(_)));
    assert_eq!(t, Type::array(Type::integer()));
    assert_eq!(t.to_string(), "ints = [int]");
}

#[test]
fn forward_reference_is_resolved_by_later_declaration() {
    let t = parse("{a: y, b: y = 1..3}").unwrap();
    assert!(t.instance(&map(&[("a", Value::from(1)), ("b", Value::from(3))])));
    assert!(!t.instance(&map(&[("a", Value::from(4)), ("b", Value::from(3))])));
}

#[test]
fn declaration_inside_operator_binds_rest_of_operand() {
    let t = parse("!(n = nil)").unwrap();
    assert_eq!(t, Type::not(Type::Nil));
    assert_eq!(t.to_string(), "!(n = nil)");
}

#[test]
fn mutually_recursive_aliases() {
    let base = AliasMap::default();
    let mut adder = AliasAdder::new(&base);
    Parser::new("{tree = {value: int, children: forest}, forest = [tree]}")
        .parse_in(&mut adder)
        .unwrap();
    let tree = adder.get_type("tree").unwrap().clone();

    let leaf = map(&[
        ("value", Value::from(1)),
        ("children", Value::from(Vec::<Value>::new())),
    ]);
    let node = map(&[
        ("value", Value::from(2)),
        ("children", Value::from(vec![leaf.clone(), leaf])),
    ]);
    assert!(tree.instance(&node));
    assert!(!tree.instance(&map(&[("value", Value::from(2)), ("children", Value::Nil)])));
    assert!(tree.assignable(&tree));
}

#[test]
fn private_parse_leaves_no_trace() {
    parse("ints = [int]").unwrap();
    let err = parse("ints").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnresolvedAlias { name: "ints".into() });
}

#[test]
fn parse_in_collects_declarations() {
    let base = AliasMap::default();
    let mut adder = AliasAdder::new(&base);
    Parser::new("{a = int, b = [a]}").parse_in(&mut adder).unwrap();
    assert_eq!(adder.get_type("a").unwrap(), &Type::integer());
    assert_eq!(adder.get_type("b").unwrap(), &Type::array(Type::integer()));

    let t = Parser::new("map[string]b").parse_in(&mut adder).unwrap();
    assert_eq!(t, Type::map(Type::string(), Type::array(Type::integer())));
}

#[test]
fn failed_parse_in_adds_nothing() {
    let base = AliasMap::default();
    let mut adder = AliasAdder::new(&base);
    assert!(Parser::new("{a = int, b = c}").parse_in(&mut adder).is_err());
    assert!(adder.is_empty());
}

#[test]
fn registry_publishes_declarations() {
    let registry = AliasRegistry::new();
    parse_with("ints = [int]", &registry).unwrap();
    let snapshot = registry.snapshot();
    assert_eq!(snapshot.get_type("ints").unwrap(), &Type::array(Type::integer()));

    let t = parse_with("map[string]ints", &registry).unwrap();
    assert_eq!(t, Type::map(Type::string(), Type::array(Type::integer())));
    assert_eq!(
        TypeFormatter::with_aliases(&registry.snapshot()).format(&t),
        "map[string]ints"
    );
}

#[test]
fn registry_is_untouched_by_failed_parse() {
    let registry = AliasRegistry::new();
    let before = registry.snapshot();
    let err = parse_with("a = int | b", &registry).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnresolvedAlias { name: "b".into() });
    assert!(Arc::ptr_eq(&before, &registry.snapshot()));
    assert!(registry.snapshot().get_type("a").is_none());
}

#[test]
fn registry_rejects_conflicting_redeclaration() {
    let registry = AliasRegistry::new();
    parse_with("ints = [int]", &registry).unwrap();

    // An equal redeclaration is accepted.
    parse_with("ints = [int]", &registry).unwrap();

    let err = parse_with("ints = [string]", &registry).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::AliasRedefined { name: "ints".into() });
    assert_eq!((err.line, err.column), (1, 1));
    assert_eq!(
        registry.snapshot().get_type("ints").unwrap(),
        &Type::array(Type::integer())
    );
}

#[test]
fn registered_recursive_alias_is_reusable() {
    let registry = AliasRegistry::new();
    parse_with("list = {value: int, next: list|nil}", &registry).unwrap();
    let t = parse_with("[list]", &registry).unwrap();
    let node = map(&[("value", Value::from(1)), ("next", Value::Nil)]);
    assert!(t.instance(&Value::from(vec![node])));
}

#[test]
fn private_parse_ignores_registry() {
    let registry = AliasRegistry::new();
    parse_with("id = int", &registry).unwrap();
    // A private parse never sees the registry.
    assert_eq!(parse("id = string").unwrap(), Type::string());
}
