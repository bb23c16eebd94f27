//! Structural equality and hashing of types.
//!
//! Both see through defined aliases. Equality threads the recursion guard so
//! two self-referential types compare equal when they unfold the same way.
//! Hashing has no second operand to guard against; it hashes the unfolded
//! type down to a fixed depth instead. Alias nodes do not count towards the
//! depth, so an alias and its target always hash alike.

use dynty_stack::ensure_sufficient_stack;

use crate::guard::{Guard, RecursionGuard};
use crate::hash::{combine, hash_str, ordered, unordered};
use crate::Type;

/// Structural levels below the root that contribute to a type hash.
const HASH_DEPTH: u8 = 6;

pub(crate) fn type_eq(a: &Type, b: &Type, guard: Guard<'_>) -> bool {
    if a.same_node(b) {
        return true;
    }
    match (a, b) {
        (Type::Alias(x), Type::Alias(y)) if x.ptr_eq(y) => return true,
        (Type::Alias(x), _) => {
            let Some(target) = x.target() else {
                return false;
            };
            let frame = RecursionGuard::push(guard, a.identity(), b.identity());
            return frame.hit() || type_eq(target, b, Some(&frame));
        }
        (_, Type::Alias(y)) => {
            let Some(target) = y.target() else {
                return false;
            };
            let frame = RecursionGuard::push(guard, a.identity(), b.identity());
            return frame.hit() || type_eq(a, target, Some(&frame));
        }
        _ => {}
    }

    match (a, b) {
        (Type::Any, Type::Any)
        | (Type::Nil, Type::Nil)
        | (Type::Boolean, Type::Boolean)
        | (Type::Regexp, Type::Regexp)
        | (Type::Timestamp, Type::Timestamp)
        | (Type::Native, Type::Native) => true,
        (Type::ExactBoolean(x), Type::ExactBoolean(y)) => x == y,
        (Type::Integer(x), Type::Integer(y)) => x == y,
        (Type::ExactInteger(x), Type::ExactInteger(y)) => x == y,
        (Type::Float(x), Type::Float(y)) => x == y,
        (Type::ExactFloat(x), Type::ExactFloat(y)) => x == y,
        (Type::String(x), Type::String(y)) | (Type::Binary(x), Type::Binary(y)) => x == y,
        (Type::ExactString(x), Type::ExactString(y)) | (Type::CiString(x), Type::CiString(y)) => {
            x == y
        }
        (Type::Pattern(x), Type::Pattern(y)) | (Type::ExactRegexp(x), Type::ExactRegexp(y)) => {
            x == y
        }
        (Type::ExactTimestamp(x), Type::ExactTimestamp(y)) => x == y,
        (Type::ExactBinary(x), Type::ExactBinary(y)) => x == y,
        (Type::ExactArray(x), Type::ExactArray(y)) => x == y,
        (Type::ExactMap(x), Type::ExactMap(y)) => x == y,
        (Type::ExactNative(x), Type::ExactNative(y)) => x == y,
        (Type::Meta(None), Type::Meta(None)) => true,
        (Type::Meta(Some(x)), Type::Meta(Some(y))) => deep(a, b, guard, |g| type_eq(x, y, g)),
        (Type::Array(x), Type::Array(y)) => {
            x.size == y.size && deep(a, b, guard, |g| type_eq(&x.element, &y.element, g))
        }
        (Type::Tuple(x), Type::Tuple(y)) => {
            x.len() == y.len()
                && deep(a, b, guard, |g| {
                    x.elements.iter().zip(&y.elements).all(|(p, q)| type_eq(p, q, g))
                })
        }
        (Type::Map(x), Type::Map(y)) => {
            x.size == y.size
                && deep(a, b, guard, |g| {
                    type_eq(&x.key, &y.key, g) && type_eq(&x.value, &y.value, g)
                })
        }
        (Type::Struct(x), Type::Struct(y)) => {
            x.additional == y.additional
                && x.entries.len() == y.entries.len()
                && deep(a, b, guard, |g| {
                    x.entries.iter().all(|e| {
                        y.get(&e.key).is_some_and(|o| {
                            o.required == e.required && type_eq(&e.value, &o.value, g)
                        })
                    })
                })
        }
        (Type::AllOf(x), Type::AllOf(y)) => {
            deep(a, b, guard, |g| same_set(&x.operands, &y.operands, g))
        }
        (Type::AnyOf(x), Type::AnyOf(y)) => {
            deep(a, b, guard, |g| same_set(&x.operands, &y.operands, g))
        }
        (Type::OneOf(x), Type::OneOf(y)) => {
            deep(a, b, guard, |g| same_set(&x.operands, &y.operands, g))
        }
        (Type::Not(x), Type::Not(y)) => deep(a, b, guard, |g| type_eq(&x.negated, &y.negated, g)),
        _ => false,
    }
}

/// Run `compare` one guard frame deeper; a hit counts as equal.
fn deep(a: &Type, b: &Type, guard: Guard<'_>, compare: impl FnOnce(Guard<'_>) -> bool) -> bool {
    let frame = RecursionGuard::push(guard, a.identity(), b.identity());
    frame.hit() || ensure_sufficient_stack(|| compare(Some(&frame)))
}

/// Operand lists compared as sets.
pub(crate) fn same_set(x: &[Type], y: &[Type], guard: Guard<'_>) -> bool {
    x.len() == y.len()
        && x.iter().all(|p| y.iter().any(|q| type_eq(p, q, guard)))
        && y.iter().all(|q| x.iter().any(|p| type_eq(p, q, guard)))
}

pub(crate) fn type_hash(t: &Type) -> u32 {
    hash_in(t, HASH_DEPTH)
}

fn hash_in(t: &Type, levels: u8) -> u32 {
    let t = t.resolved();
    let seed = t.tag() as u32;
    if levels == 0 {
        return seed;
    }
    let depth = levels - 1;
    match t {
        // `resolved` stops at undefined slots and alias-only cycles.
        Type::Alias(a) => combine(seed, hash_str(a.name())),
        Type::Any
        | Type::Nil
        | Type::Boolean
        | Type::Regexp
        | Type::Timestamp
        | Type::Native
        | Type::Meta(None) => seed,
        Type::ExactBoolean(b) => combine(seed, u32::from(*b)),
        Type::Integer(r) => combine(seed, r.hash_code()),
        Type::ExactInteger(i) => combine(seed, i.hash_code()),
        Type::Float(r) => combine(seed, r.hash_code()),
        Type::ExactFloat(f) => combine(seed, f.hash_code()),
        Type::String(s) | Type::Binary(s) => combine(seed, s.hash_code()),
        Type::ExactString(s) | Type::CiString(s) => combine(seed, hash_str(s)),
        Type::Pattern(r) | Type::ExactRegexp(r) => combine(seed, r.hash_code()),
        Type::ExactTimestamp(ts) => combine(seed, ts.hash_code()),
        Type::ExactBinary(b) => combine(seed, b.hash_code()),
        Type::ExactArray(a) => combine(seed, a.hash_code()),
        Type::ExactMap(m) => combine(seed, m.hash_code()),
        Type::ExactNative(n) => combine(seed, n.hash_code()),
        Type::Meta(Some(inner)) => combine(seed, hash_in(inner, depth)),
        Type::Array(a) => ordered(seed, [a.size.hash_code(), hash_in(&a.element, depth)]),
        Type::Tuple(tuple) => ordered(seed, tuple.elements.iter().map(|e| hash_in(e, depth))),
        Type::Map(m) => ordered(
            seed,
            [
                m.size.hash_code(),
                hash_in(&m.key, depth),
                hash_in(&m.value, depth),
            ],
        ),
        Type::Struct(s) => {
            let entries = s.entries.iter().map(|e| {
                ordered(
                    hash_str(&e.key),
                    [u32::from(e.required), hash_in(&e.value, depth)],
                )
            });
            combine(unordered(seed, entries), u32::from(s.additional))
        }
        Type::AllOf(x) => unordered(seed, x.operands.iter().map(|o| hash_in(o, depth))),
        Type::AnyOf(x) => unordered(seed, x.operands.iter().map(|o| hash_in(o, depth))),
        Type::OneOf(x) => unordered(seed, x.operands.iter().map(|o| hash_in(o, depth))),
        Type::Not(x) => combine(seed, hash_in(&x.negated, depth)),
    }
}

#[cfg(test)]
mod tests;
