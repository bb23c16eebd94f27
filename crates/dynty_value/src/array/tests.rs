#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn ints(values: &[i64]) -> Array {
    values.iter().map(|v| Value::from(*v)).collect()
}

#[test]
fn frozen_copy_shares_storage() {
    let a = ints(&[1, 2, 3]);
    assert!(a.is_frozen());
    assert!(a.frozen_copy().ptr_eq(&a));
}

#[test]
fn thaw_then_freeze_is_a_new_array() {
    let a = ints(&[1, 2]);
    let mut m = a.thawed_copy();
    assert!(!m.is_frozen());
    m.push(Value::from(3));
    let b = m.freeze();
    assert_eq!(a, ints(&[1, 2]));
    assert_eq!(b, ints(&[1, 2, 3]));
}

#[test]
fn whole_slice_shares_storage() {
    let a = ints(&[1, 2, 3]);
    assert!(a.slice(0, 3).unwrap().ptr_eq(&a));
    assert_eq!(a.slice(1, 3).unwrap(), ints(&[2, 3]));
    assert!(matches!(
        a.slice(2, 5),
        Err(Error::IndexOutOfBounds { index: 5, len: 3 })
    ));
}

#[test]
fn flatten_is_recursive() {
    let nested: Array = vec![
        Value::from(1),
        Value::from(vec![Value::from(2), Value::from(vec![Value::from(3)])]),
    ]
    .into();
    assert_eq!(nested.flatten(), ints(&[1, 2, 3]));
    let flat = ints(&[1]);
    assert!(flat.flatten().ptr_eq(&flat));
}

#[test]
fn unique_keeps_first_occurrence() {
    assert_eq!(ints(&[3, 1, 3, 2, 1]).unique(), ints(&[3, 1, 2]));
}

#[test]
fn to_map_pairs_elements() {
    let a: Array = vec![Value::from("a"), Value::from(1), Value::from("b"), Value::from(2)].into();
    let m = a.to_map().unwrap();
    assert_eq!(m.get_str("b"), Some(&Value::from(2)));
    assert!(matches!(
        ints(&[1, 2, 3]).to_map(),
        Err(Error::OddPairCount { len: 3 })
    ));
}

#[test]
fn sort_is_total_across_kinds() {
    let a: Array = vec![
        Value::from("b"),
        Value::from(2.5),
        Value::Nil,
        Value::from(1),
        Value::from("a"),
        Value::from(f64::NAN),
    ]
    .into();
    let sorted = a.sort();
    assert_eq!(sorted.get(0), Some(&Value::Nil));
    assert_eq!(sorted.get(1), Some(&Value::from(1)));
    assert_eq!(sorted.get(2), Some(&Value::from(2.5)));
    assert_eq!(sorted.get(4), Some(&Value::from("a")));
    assert_eq!(sorted.get(5), Some(&Value::from("b")));
}

#[test]
fn with_and_without() {
    let a = ints(&[1, 2]);
    assert_eq!(a.with(Value::from(3)), ints(&[1, 2, 3]));
    assert_eq!(a.with_all([Value::from(3), Value::from(4)]), ints(&[1, 2, 3, 4]));
    assert_eq!(ints(&[1, 2, 1]).without(&Value::from(1)), ints(&[2]));
    assert!(a.without(&Value::from(9)).ptr_eq(&a));
    assert_eq!(a.reverse(), ints(&[2, 1]));
    assert_eq!(a.index_of(&Value::from(2)), Some(1));
}

#[test]
fn mutable_positional_edits() {
    let mut m = MutableArray::from(vec![Value::from(1), Value::from(3)]);
    m.insert(1, Value::from(2)).unwrap();
    assert_eq!(m.set(0, Value::from(0)).unwrap(), Value::from(1));
    assert_eq!(m.remove(2).unwrap(), Value::from(3));
    assert_eq!(m.pop(), Some(Value::from(2)));
    assert!(m.insert(5, Value::Nil).is_err());
    assert!(m.remove(1).is_err());
    assert_eq!(m.freeze(), ints(&[0]));
}

#[test]
fn thawed_copy_is_shallow() {
    let inner = ints(&[1]);
    let outer: Array = vec![Value::Array(inner.clone())].into();
    let thawed = outer.thawed_copy();
    // Nested collections stay frozen and shared.
    assert!(thawed.get(0).unwrap().as_array().unwrap().ptr_eq(&inner));
}
