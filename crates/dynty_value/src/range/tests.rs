#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn int(v: i64) -> Option<Integer> {
    Some(Integer::from(v))
}

fn float(v: f64) -> Option<Float> {
    Some(Float::from(v))
}

#[test]
fn exclusive_integer_ranges_become_inclusive() {
    let r = IntegerRange::new(int(1), int(10), false).unwrap();
    assert_eq!(r, IntegerRange::new(int(1), int(9), true).unwrap());
    assert!(!r.contains(&Integer::from(10)));
}

#[test]
fn swapped_bounds_are_normalized() {
    let r = IntegerRange::new(int(10), int(1), true).unwrap();
    assert_eq!(r.min(), Some(&Integer::from(1)));
    assert_eq!(SizeRange::new(5, 2), SizeRange::new(2, 5));
}

#[test]
fn empty_exclusive_range_is_an_error() {
    assert!(matches!(
        IntegerRange::new(int(3), int(3), false),
        Err(Error::InvalidRange { .. })
    ));
    assert!(FloatRange::new(float(1.0), float(1.0), false).is_err());
    assert!(FloatRange::new(float(f64::NAN), None, true).is_err());
}

#[test]
fn open_ranges() {
    let at_least = IntegerRange::new(int(0), None, true).unwrap();
    assert!(at_least.contains(&Integer::from(i64::MAX)));
    assert!(!at_least.contains(&Integer::from(-1)));
    assert!(IntegerRange::UNBOUNDED.contains_range(&at_least));
    assert!(!at_least.contains_range(&IntegerRange::UNBOUNDED));
}

#[test]
fn integer_overlap() {
    let a = IntegerRange::new(int(1), int(5), true).unwrap();
    let b = IntegerRange::new(int(5), int(9), true).unwrap();
    let c = IntegerRange::new(int(6), None, true).unwrap();
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c));
    assert!(b.overlaps(&c));
}

#[test]
fn float_exclusive_max() {
    let r = FloatRange::new(float(0.0), float(1.0), false).unwrap();
    assert!(r.contains(&Float::from(0.0)));
    assert!(r.contains(&Float::from(0.999)));
    assert!(!r.contains(&Float::from(1.0)));
    assert!(!r.contains(&Float::from(f64::NAN)));

    let inclusive = FloatRange::new(float(0.0), float(1.0), true).unwrap();
    assert!(inclusive.contains_range(&r));
    assert!(!r.contains_range(&inclusive));
}

#[test]
fn float_overlap_respects_exclusivity() {
    let below = FloatRange::new(float(0.0), float(1.0), false).unwrap();
    let above = FloatRange::new(float(1.0), float(2.0), true).unwrap();
    assert!(!below.overlaps(&above));
    assert!(!above.overlaps(&below));
    let touching = FloatRange::new(float(0.0), float(1.0), true).unwrap();
    assert!(touching.overlaps(&above));
}

#[test]
fn size_ranges() {
    let r = SizeRange::new(1, 10);
    assert!(r.contains(1) && r.contains(10) && !r.contains(11));
    assert!(SizeRange::UNBOUNDED.contains_range(r));
    assert!(SizeRange::at_least(1).contains_range(r));
    assert!(!r.overlaps(SizeRange::at_least(11)));
}
