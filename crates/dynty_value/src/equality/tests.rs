#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{Alias, StructEntry, Type};

fn linked_list(name: &str) -> Type {
    let slot = Alias::new(name);
    let body = Type::structure(
        vec![
            StructEntry::new("value", Type::integer(), true),
            StructEntry::new("next", Type::any_of(vec![Type::Alias(slot.clone()), Type::Nil]), true),
        ],
        false,
    )
    .unwrap();
    slot.define(body).unwrap();
    Type::Alias(slot)
}

#[test]
fn aliases_are_transparent() {
    let a = Alias::defined("a", Type::integer());
    assert_eq!(Type::Alias(a.clone()), Type::integer());
    assert_eq!(Type::integer(), Type::Alias(a.clone()));
    assert_eq!(Type::Alias(a).hash_code(), Type::integer().hash_code());
}

#[test]
fn unresolved_aliases_equal_only_themselves() {
    let a = Alias::new("a");
    let b = Alias::new("a");
    assert_eq!(Type::Alias(a.clone()), Type::Alias(a.clone()));
    assert_ne!(Type::Alias(a), Type::Alias(b));
}

#[test]
fn recursive_types_compare_structurally() {
    let x = linked_list("x");
    let y = linked_list("y");
    assert_eq!(x, y);
    assert_eq!(x.hash_code(), y.hash_code());
}

#[test]
fn recursive_alias_hashes_like_its_body() {
    let x = linked_list("x");
    let body = x.resolved().clone();
    assert_eq!(x, body);
    assert_eq!(x.hash_code(), body.hash_code());
}

#[test]
fn operand_order_does_not_matter() {
    let a = Type::any_of(vec![Type::integer(), Type::string(), Type::Nil]);
    let b = Type::any_of(vec![Type::Nil, Type::integer(), Type::string()]);
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_ne!(a, Type::all_of(vec![Type::Nil, Type::integer(), Type::string()]));
}

#[test]
fn struct_entry_order_does_not_matter() {
    let a = Type::structure(
        vec![
            StructEntry::new("a", Type::integer(), true),
            StructEntry::new("b", Type::string(), false),
        ],
        false,
    )
    .unwrap();
    let b = Type::structure(
        vec![
            StructEntry::new("b", Type::string(), false),
            StructEntry::new("a", Type::integer(), true),
        ],
        false,
    )
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
}

#[test]
fn tuple_order_matters() {
    let a = Type::tuple(vec![Type::integer(), Type::string()]);
    let b = Type::tuple(vec![Type::string(), Type::integer()]);
    assert_ne!(a, b);
}
