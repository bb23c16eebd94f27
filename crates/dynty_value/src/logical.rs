//! The set operators: intersection, union, exclusive choice and negation.
//!
//! Constructors normalize. Intersections and unions absorb nested operators
//! of their own kind and drop duplicate operands; a single operand stands
//! for itself; a double negation cancels.

use std::sync::Arc;

use crate::Type;

/// `a & b & ...`: values matching every operand.
#[derive(Clone, Debug)]
pub struct AllOf {
    pub(crate) operands: Arc<[Type]>,
}

/// `a | b | ...`: values matching at least one operand.
#[derive(Clone, Debug)]
pub struct AnyOf {
    pub(crate) operands: Arc<[Type]>,
}

/// `a ^ b ^ ...`: values matching exactly one operand.
#[derive(Clone, Debug)]
pub struct OneOf {
    pub(crate) operands: Arc<[Type]>,
}

/// `!t`: values not matching `t`.
#[derive(Clone, Debug)]
pub struct Not {
    pub(crate) negated: Arc<Type>,
}

impl AllOf {
    pub fn operands(&self) -> &[Type] {
        &self.operands
    }
}

impl AnyOf {
    pub fn operands(&self) -> &[Type] {
        &self.operands
    }
}

impl OneOf {
    pub fn operands(&self) -> &[Type] {
        &self.operands
    }
}

impl Not {
    pub fn negated(&self) -> &Type {
        &self.negated
    }
}

fn push_unique(out: &mut Vec<Type>, t: Type) {
    if !out.contains(&t) {
        out.push(t);
    }
}

pub(crate) fn all_of(operands: Vec<Type>) -> Type {
    let mut flat = Vec::with_capacity(operands.len());
    for t in operands {
        match t {
            Type::AllOf(nested) => {
                for n in nested.operands.iter() {
                    push_unique(&mut flat, n.clone());
                }
            }
            Type::Any => {}
            other => push_unique(&mut flat, other),
        }
    }
    match flat.len() {
        0 => Type::Any,
        1 => flat.swap_remove(0),
        _ => Type::AllOf(AllOf {
            operands: flat.into(),
        }),
    }
}

pub(crate) fn any_of(operands: Vec<Type>) -> Type {
    let mut flat = Vec::with_capacity(operands.len());
    for t in operands {
        match t {
            Type::AnyOf(nested) => {
                for n in nested.operands.iter() {
                    push_unique(&mut flat, n.clone());
                }
            }
            Type::Any => return Type::Any,
            other => push_unique(&mut flat, other),
        }
    }
    match flat.len() {
        0 => not(Type::Any),
        1 => flat.swap_remove(0),
        _ => Type::AnyOf(AnyOf {
            operands: flat.into(),
        }),
    }
}

/// Exclusive choice keeps nested choices and duplicates: `a ^ a` matches
/// nothing, which deduplication would change.
pub(crate) fn one_of(mut operands: Vec<Type>) -> Type {
    match operands.len() {
        0 => not(Type::Any),
        1 => operands.swap_remove(0),
        _ => Type::OneOf(OneOf {
            operands: operands.into(),
        }),
    }
}

pub(crate) fn not(t: Type) -> Type {
    match t {
        Type::Not(inner) => Type::clone(&inner.negated),
        other => Type::Not(Not {
            negated: Arc::new(other),
        }),
    }
}
