//! Assignability and instance checks.
//!
//! `assignable(a, b)` asks whether every instance of `b` is an instance of
//! `a`. Each kind answers for the pairs it knows about; when the receiver
//! has no rule for `b` the question is turned around and `b` is asked
//! whether it can be assigned *to* `a` (a union is, when each of its
//! operands is; an exact type is, when `a` accepts its value). Deep kinds
//! push a recursion guard frame, and a guard hit is answered with `true`,
//! which makes comparisons of self-referential types co-inductive.

use smallvec::SmallVec;

use dynty_stack::ensure_sufficient_stack;

use crate::collection_type::{ArrayType, MapType, StructType, TupleType};
use crate::equality::same_set;
use crate::guard::{Guard, RecursionGuard};
use crate::logical::{AllOf, AnyOf, Not, OneOf};
use crate::{Map, SizeRange, Type, TypeTag, Value};

/// The pairwise rules of one deep kind.
pub(crate) trait TypeRules {
    /// `Some(answer)` when this kind has a rule for `other`, `None` to let
    /// `other` decide through [`TypeRules::assignable_to`].
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool>;

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool;

    /// Whether `self` can be assigned to `target`, for receivers without a
    /// rule of their own.
    fn assignable_to(&self, _target: &Type, _guard: Guard<'_>) -> bool {
        false
    }
}

pub(crate) fn assignable(a: &Type, b: &Type, guard: Guard<'_>) -> bool {
    if a.same_node(b) {
        return true;
    }
    if let Type::Alias(x) = a {
        return match x.target() {
            Some(target) => deep(a, b.identity(), guard, |g| assignable(target, b, g)),
            None => matches!(b, Type::Alias(y) if x.ptr_eq(y)),
        };
    }
    if let Type::Alias(y) = b {
        return match y.target() {
            Some(target) => deep(a, b.identity(), guard, |g| assignable(a, target, g)),
            None => false,
        };
    }
    let rule = match a {
        Type::Array(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::Tuple(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::Map(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::Struct(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::AllOf(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::AnyOf(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::OneOf(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        Type::Not(x) => deep(a, b.identity(), guard, |g| x.assignable_from(b, g)),
        _ => scalar_rule(a, b, guard),
    };
    match rule {
        Some(answer) => answer,
        None => reverse(b, a, guard),
    }
}

/// Run `check` one guard frame deeper. A guard hit answers `true` (or
/// `Some(true)` for rules).
fn deep<R: From<bool>>(a: &Type, that: usize, guard: Guard<'_>, check: impl FnOnce(Guard<'_>) -> R) -> R {
    let frame = RecursionGuard::push(guard, a.identity(), that);
    if frame.hit() {
        return R::from(true);
    }
    ensure_sufficient_stack(|| check(Some(&frame)))
}

/// Rules for kinds without nested types.
fn scalar_rule(a: &Type, b: &Type, guard: Guard<'_>) -> Option<bool> {
    let answer = match (a, b) {
        (Type::Any, _) | (Type::Nil, Type::Nil) => true,
        (Type::Boolean, Type::Boolean | Type::ExactBoolean(_))
        | (Type::Regexp, Type::Regexp | Type::ExactRegexp(_))
        | (Type::Timestamp, Type::Timestamp | Type::ExactTimestamp(_))
        | (Type::Native, Type::Native | Type::ExactNative(_))
        | (Type::Meta(None), Type::Meta(_)) => true,
        (Type::ExactBoolean(x), Type::ExactBoolean(y)) => x == y,
        (Type::Integer(r), Type::Integer(o)) => r.contains_range(o),
        (Type::Integer(r), Type::ExactInteger(v)) => r.contains(v),
        (Type::ExactInteger(x), Type::ExactInteger(y)) => x == y,
        (Type::Float(r), Type::Float(o)) => r.contains_range(o),
        (Type::Float(r), Type::ExactFloat(v)) => r.contains(v),
        (Type::ExactFloat(x), Type::ExactFloat(y)) => x == y,
        (Type::String(s), Type::String(o)) | (Type::Binary(s), Type::Binary(o)) => {
            s.contains_range(*o)
        }
        (Type::String(s), Type::ExactString(v)) => s.contains(v.chars().count()),
        (Type::String(s), Type::CiString(v)) => {
            s.is_unbounded() || s.contains(v.chars().count())
        }
        (Type::String(s), Type::Pattern(_)) => s.is_unbounded(),
        (Type::ExactString(x), Type::ExactString(y)) => x == y,
        (Type::CiString(x), Type::CiString(y) | Type::ExactString(y)) => ci_eq(x, y),
        (Type::Pattern(x), Type::Pattern(y)) => x == y,
        (Type::Pattern(r), Type::ExactString(v)) => r.is_match(v),
        (Type::ExactRegexp(x), Type::ExactRegexp(y)) => x == y,
        (Type::ExactTimestamp(x), Type::ExactTimestamp(y)) => x == y,
        (Type::Binary(s), Type::ExactBinary(v)) => s.contains(v.len()),
        (Type::ExactBinary(x), Type::ExactBinary(y)) => x == y,
        (Type::ExactArray(x), Type::ExactArray(y)) => x == y,
        (Type::ExactMap(x), Type::ExactMap(y)) => x == y,
        (Type::ExactNative(x), Type::ExactNative(y)) => x == y,
        (Type::Meta(Some(t)), Type::Meta(Some(u))) => assignable(t, u, guard),
        (Type::Meta(Some(_)), Type::Meta(None)) => false,
        _ => return None,
    };
    Some(answer)
}

/// Reverse dispatch: whether `b` declares itself assignable to `a`.
fn reverse(b: &Type, a: &Type, guard: Guard<'_>) -> bool {
    match b {
        Type::AllOf(x) => x.assignable_to(a, guard),
        Type::AnyOf(x) => x.assignable_to(a, guard),
        Type::OneOf(x) => x.assignable_to(a, guard),
        Type::Not(x) => x.assignable_to(a, guard),
        _ => b.exact_value().is_some_and(|v| instance(a, &v, guard)),
    }
}

pub(crate) fn instance(t: &Type, v: &Value, guard: Guard<'_>) -> bool {
    match t {
        Type::Any => true,
        Type::Nil => v.is_nil(),
        Type::Boolean => matches!(v, Value::Bool(_)),
        Type::ExactBoolean(b) => v.as_bool() == Some(*b),
        Type::Integer(r) => v.as_integer().is_some_and(|i| r.contains(i)),
        Type::ExactInteger(x) => v.as_integer() == Some(x),
        Type::Float(r) => v.as_float().is_some_and(|f| r.contains(f)),
        Type::ExactFloat(x) => v.as_float() == Some(x),
        Type::String(s) => v.as_str().is_some_and(|x| s.contains(x.chars().count())),
        Type::ExactString(x) => v.as_str() == Some(&**x),
        Type::CiString(x) => v.as_str().is_some_and(|y| ci_eq(x, y)),
        Type::Pattern(r) => v.as_str().is_some_and(|y| r.is_match(y)),
        Type::Regexp => matches!(v, Value::Regexp(_)),
        Type::ExactRegexp(r) => v.as_regexp() == Some(r),
        Type::Timestamp => matches!(v, Value::Timestamp(_)),
        Type::ExactTimestamp(ts) => v.as_timestamp() == Some(ts),
        Type::Binary(s) => v.as_binary().is_some_and(|b| s.contains(b.len())),
        Type::ExactBinary(b) => v.as_binary() == Some(b),
        Type::Native => matches!(v, Value::Native(_)),
        Type::ExactNative(n) => v.as_native() == Some(n),
        Type::Meta(None) => matches!(v, Value::Type(_)),
        Type::Meta(Some(m)) => v.as_type().is_some_and(|u| assignable(m, u, guard)),
        Type::ExactArray(a) => v.as_array() == Some(a),
        Type::ExactMap(m) => v.as_map_like().is_some_and(|x| *x == *m),
        Type::Array(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::Tuple(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::Map(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::Struct(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::AllOf(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::AnyOf(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::OneOf(x) => deep(t, v.identity(), guard, |g| x.instance_of(v, g)),
        Type::Not(x) => x.instance_of(v, guard),
        Type::Alias(a) => match a.target() {
            Some(target) => deep(t, v.identity(), guard, |g| instance(target, v, g)),
            None => false,
        },
    }
}

fn ci_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Whether `a` and `b` provably share no instance.
///
/// Conservative: `false` means "not proven", not "overlapping".
pub(crate) fn disjoint(a: &Type, b: &Type, guard: Guard<'_>) -> bool {
    let (a, b) = (a.resolved(), b.resolved());
    if let Some(v) = b.exact_value() {
        return !instance(a, &v, guard);
    }
    if let Some(v) = a.exact_value() {
        return !instance(b, &v, guard);
    }
    let frame = RecursionGuard::push(guard, a.identity(), b.identity());
    if frame.hit() {
        return false;
    }
    let guard = Some(&frame);
    match (a, b) {
        (Type::Any, _) | (_, Type::Any) => false,
        (Type::AnyOf(x), _) => x.operands.iter().all(|t| disjoint(t, b, guard)),
        (_, Type::AnyOf(x)) => x.operands.iter().all(|t| disjoint(a, t, guard)),
        (Type::AllOf(x), _) => x.operands.iter().any(|t| disjoint(t, b, guard)),
        (_, Type::AllOf(x)) => x.operands.iter().any(|t| disjoint(a, t, guard)),
        (Type::Not(x), _) => assignable(&x.negated, b, guard),
        (_, Type::Not(x)) => assignable(&x.negated, a, guard),
        (Type::Integer(x), Type::Integer(y)) => !x.overlaps(y),
        (Type::Float(x), Type::Float(y)) => !x.overlaps(y),
        (Type::String(x), Type::String(y)) | (Type::Binary(x), Type::Binary(y)) => !x.overlaps(*y),
        _ => match (family(a), family(b)) {
            (Some(x), Some(y)) => x != y,
            _ => false,
        },
    }
}

/// The generic kind a type belongs to, `None` for logical and alias types.
fn family(t: &Type) -> Option<TypeTag> {
    match t {
        Type::AllOf(_) | Type::AnyOf(_) | Type::OneOf(_) | Type::Not(_) | Type::Alias(_) | Type::Any => None,
        other => Some(other.generic().tag()),
    }
}

impl TypeRules for ArrayType {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::Array(o) => Some(
                self.size.contains_range(o.size) && assignable(&self.element, &o.element, guard),
            ),
            Type::Tuple(o) => Some(
                self.size.contains(o.len())
                    && o.elements.iter().all(|e| assignable(&self.element, e, guard)),
            ),
            _ => None,
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        value.as_array().is_some_and(|a| {
            self.size.contains(a.len()) && a.iter().all(|v| instance(&self.element, v, guard))
        })
    }
}

impl TypeRules for TupleType {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::Tuple(o) => Some(
                self.len() == o.len()
                    && self
                        .elements
                        .iter()
                        .zip(&o.elements)
                        .all(|(t, u)| assignable(t, u, guard)),
            ),
            Type::Array(o) => Some(
                o.size == SizeRange::exact(self.len())
                    && self.elements.iter().all(|t| assignable(t, &o.element, guard)),
            ),
            _ => None,
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        value.as_array().is_some_and(|a| {
            a.len() == self.len()
                && self
                    .elements
                    .iter()
                    .zip(a.iter())
                    .all(|(t, v)| instance(t, v, guard))
        })
    }
}

impl TypeRules for MapType {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::Map(o) => Some(
                self.size.contains_range(o.size)
                    && assignable(&self.key, &o.key, guard)
                    && assignable(&self.value, &o.value, guard),
            ),
            Type::Struct(o) => {
                let open_ok = !o.additional
                    || (assignable(&self.key, &Type::Any, guard)
                        && assignable(&self.value, &Type::Any, guard));
                Some(
                    self.size.contains_range(o.size_range())
                        && open_ok
                        && o.entries.iter().all(|e| {
                            assignable(&self.key, &Type::ExactString(e.key.clone()), guard)
                                && assignable(&self.value, &e.value, guard)
                        }),
                )
            }
            _ => None,
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        value.as_map_like().is_some_and(|m| {
            self.size.contains(m.len())
                && m.iter().all(|(k, v)| {
                    instance(&self.key, k, guard) && instance(&self.value, v, guard)
                })
        })
    }
}

impl TypeRules for StructType {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::Struct(o) => {
                let declared = self.entries.iter().all(|e| match o.get(&e.key) {
                    Some(oe) => (!e.required || oe.required) && assignable(&e.value, &oe.value, guard),
                    None => !e.required && (!o.additional || assignable(&e.value, &Type::Any, guard)),
                });
                let extra = self.additional
                    || (!o.additional && o.entries.iter().all(|oe| self.get(&oe.key).is_some()));
                Some(declared && extra)
            }
            Type::Map(_) => Some(
                self.additional && self.entries.iter().all(|e| !e.required && assignable(&e.value, &Type::Any, guard)),
            ),
            _ => None,
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        let Some(map) = value.as_map_like() else {
            return false;
        };
        struct_instance(self, &map, guard)
    }
}

fn struct_instance(t: &StructType, map: &Map, guard: Guard<'_>) -> bool {
    let declared = t.entries.iter().all(|e| match map.get_str(&e.key) {
        Some(v) => instance(&e.value, v, guard),
        None => !e.required,
    });
    declared
        && (t.additional
            || map
                .keys()
                .all(|k| k.as_str().is_some_and(|name| t.get(name).is_some())))
}

impl TypeRules for AllOf {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::AllOf(o) => Some(less_restrictive(&self.operands, &o.operands, other, guard)),
            _ => Some(self.operands.iter().all(|t| assignable(t, other, guard))),
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        self.operands.iter().all(|t| instance(t, value, guard))
    }

    fn assignable_to(&self, target: &Type, guard: Guard<'_>) -> bool {
        self.operands.iter().any(|t| assignable(target, t, guard))
    }
}

/// Intersection against intersection.
///
/// Every receiver operand must accept at least one candidate operand (one
/// candidate may serve several receivers). A receiver operand that accepts
/// none is checked against the candidate intersection as a whole, which can
/// still succeed through rules that look at the candidate as one type.
fn less_restrictive(receiver: &[Type], candidate: &[Type], whole: &Type, guard: Guard<'_>) -> bool {
    let mut matched: SmallVec<[bool; 8]> = SmallVec::from_elem(false, receiver.len());
    for c in candidate {
        for (slot, r) in matched.iter_mut().zip(receiver) {
            if !*slot && assignable(r, c, guard) {
                *slot = true;
            }
        }
    }
    matched
        .iter()
        .zip(receiver)
        .all(|(&hit, r)| hit || assignable(r, whole, guard))
}

impl TypeRules for AnyOf {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        self.operands
            .iter()
            .any(|t| assignable(t, other, guard))
            .then_some(true)
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        self.operands.iter().any(|t| instance(t, value, guard))
    }

    fn assignable_to(&self, target: &Type, guard: Guard<'_>) -> bool {
        self.operands.iter().all(|t| assignable(target, t, guard))
    }
}

impl TypeRules for OneOf {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        if let Type::OneOf(o) = other {
            if same_set(&self.operands, &o.operands, guard) {
                return Some(true);
            }
        }
        let accepting: SmallVec<[usize; 4]> = self
            .operands
            .iter()
            .enumerate()
            .filter(|(_, t)| assignable(t, other, guard))
            .map(|(i, _)| i)
            .collect();
        match accepting.as_slice() {
            [] => None,
            [only] => Some(
                self.operands
                    .iter()
                    .enumerate()
                    .all(|(i, t)| i == *only || disjoint(t, other, guard)),
            ),
            _ => Some(false),
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        let mut matches = self.operands.iter().filter(|t| instance(t, value, guard));
        matches.next().is_some() && matches.next().is_none()
    }

    fn assignable_to(&self, target: &Type, guard: Guard<'_>) -> bool {
        self.operands.iter().all(|t| assignable(target, t, guard))
    }
}

impl TypeRules for Not {
    fn assignable_from(&self, other: &Type, guard: Guard<'_>) -> Option<bool> {
        match other {
            Type::Not(o) => Some(assignable(&o.negated, &self.negated, guard)),
            _ => disjoint(&self.negated, other, guard).then_some(true),
        }
    }

    fn instance_of(&self, value: &Value, guard: Guard<'_>) -> bool {
        !instance(&self.negated, value, guard)
    }
}
