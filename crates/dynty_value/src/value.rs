//! The [`Value`] enum: every piece of data the type algebra talks about.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bigdecimal::BigDecimal;
use dynty_stack::ensure_sufficient_stack;
use num_bigint::BigInt;

use crate::hash::hash_str;
use crate::{Array, Binary, Float, Integer, Map, Native, Regexp, StructMap, Timestamp, Type};

/// An immutable, cheaply clonable value.
///
/// Collection payloads are the frozen forms, so a `Value` is always deeply
/// immutable and can be shared across threads. Types are values too
/// ([`Value::Type`]), which is what makes `type[T]` expressible.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(Integer),
    Float(Float),
    String(Arc<str>),
    Binary(Binary),
    Regexp(Regexp),
    Timestamp(Timestamp),
    Array(Array),
    Map(Map),
    Struct(StructMap),
    Type(Type),
    Native(Native),
}

const NIL_HASH: u32 = 131;
const TRUE_HASH: u32 = 1231;
const FALSE_HASH: u32 = 1237;

impl Value {
    /// The exact type of this value.
    ///
    /// For a type value `t` this is `type[t]`.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Bool(b) => Type::ExactBoolean(*b),
            Value::Int(i) => Type::ExactInteger(i.clone()),
            Value::Float(f) => Type::ExactFloat(f.clone()),
            Value::String(s) => Type::ExactString(Arc::clone(s)),
            Value::Binary(b) => Type::ExactBinary(b.clone()),
            Value::Regexp(r) => Type::ExactRegexp(r.clone()),
            Value::Timestamp(t) => Type::ExactTimestamp(*t),
            Value::Array(a) => Type::ExactArray(a.clone()),
            Value::Map(m) => Type::ExactMap(m.clone()),
            Value::Struct(s) => Type::ExactMap(s.to_map()),
            Value::Type(t) => Type::meta(Some(t.clone())),
            Value::Native(n) => Type::ExactNative(n.clone()),
        }
    }

    /// Structural 32-bit hash. Equal values have equal hash codes.
    pub fn hash_code(&self) -> u32 {
        match self {
            Value::Nil => NIL_HASH,
            Value::Bool(true) => TRUE_HASH,
            Value::Bool(false) => FALSE_HASH,
            Value::Int(i) => i.hash_code(),
            Value::Float(f) => f.hash_code(),
            Value::String(s) => hash_str(s),
            Value::Binary(b) => b.hash_code(),
            Value::Regexp(r) => r.hash_code(),
            Value::Timestamp(t) => t.hash_code(),
            Value::Array(a) => ensure_sufficient_stack(|| a.hash_code()),
            Value::Map(m) => ensure_sufficient_stack(|| m.hash_code()),
            Value::Struct(s) => ensure_sufficient_stack(|| s.hash_code()),
            Value::Type(t) => t.hash_code(),
            Value::Native(n) => n.hash_code(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(Integer::as_i64)
    }

    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_regexp(&self) -> Option<&Regexp> {
        match self {
            Value::Regexp(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructMap> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Value::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Value::Native(n) => Some(n),
            _ => None,
        }
    }

    /// Maps and record views, both seen through the map protocol.
    pub fn as_map_like(&self) -> Option<Cow<'_, Map>> {
        match self {
            Value::Map(m) => Some(Cow::Borrowed(m)),
            Value::Struct(s) => Some(Cow::Owned(s.to_map())),
            _ => None,
        }
    }

    /// Partial ordering between comparable values.
    ///
    /// Integers and floats compare numerically with each other. Strings,
    /// booleans, timestamps and binaries compare naturally, arrays
    /// lexicographically, types by their tag. Everything else, including
    /// values of unrelated kinds, is unordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Nil, Value::Nil) => Some(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.compare(b),
            (Value::Int(a), Value::Float(b)) => integer_as_float(a).compare(b),
            (Value::Float(a), Value::Int(b)) => a.compare(&integer_as_float(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Binary(a), Value::Binary(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match ensure_sufficient_stack(|| x.compare(y))? {
                        Ordering::Equal => {}
                        ord => return Some(ord),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (Value::Type(a), Value::Type(b)) => Some(a.tag().cmp(&b.tag())),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Total order used for sorting: kinds first, then [`Value::compare`]
    /// where it is total, with deterministic tie breaks elsewhere.
    pub(crate) fn total_cmp(&self, other: &Value) -> Ordering {
        let rank = self.kind_rank().cmp(&other.kind_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match (self, other) {
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                number_total_cmp(self, other)
            }
            (Value::Regexp(a), Value::Regexp(b)) => a.as_str().cmp(b.as_str()),
            (Value::Array(a), Value::Array(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| ensure_sufficient_stack(|| x.total_cmp(y)))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Map(_) | Value::Struct(_), Value::Map(_) | Value::Struct(_)) => {
                map_len(self).cmp(&map_len(other))
            }
            (Value::Type(a), Value::Type(b)) => {
                a.tag().cmp(&b.tag()).then_with(|| {
                    match (a.exact_value(), b.exact_value()) {
                        (Some(x), Some(y)) => x.total_cmp(&y),
                        _ => Ordering::Equal,
                    }
                })
            }
            (Value::Native(_), Value::Native(_)) => Ordering::Equal,
            _ => self.compare(other).unwrap_or(Ordering::Equal),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Nil => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::Binary(_) => 4,
            Value::Regexp(_) => 5,
            Value::Timestamp(_) => 6,
            Value::Array(_) => 7,
            Value::Map(_) | Value::Struct(_) => 8,
            Value::Type(_) => 9,
            Value::Native(_) => 10,
        }
    }

    /// Address of the shared payload, 0 for values without one.
    pub(crate) fn identity(&self) -> usize {
        match self {
            Value::Array(a) => a.identity(),
            Value::Map(m) => m.identity(),
            Value::Struct(s) => s.identity(),
            Value::Type(t) => t.identity(),
            _ => 0,
        }
    }
}

fn map_len(v: &Value) -> usize {
    match v {
        Value::Map(m) => m.len(),
        Value::Struct(s) => s.len(),
        _ => 0,
    }
}

/// An integer as a float, exact when it overflows `f64`.
fn integer_as_float(i: &Integer) -> Float {
    let approx = i.to_f64();
    if approx.is_finite() {
        Float::from(approx)
    } else {
        Float::from_big(BigDecimal::from(i.to_big()))
    }
}

/// Numbers by approximate magnitude, then integers before floats, then
/// exactly. Each key refines the previous one, so the order is total.
fn number_total_cmp(a: &Value, b: &Value) -> Ordering {
    let approx = |v: &Value| match v {
        Value::Int(i) => i.to_f64(),
        Value::Float(f) => f.to_f64(),
        _ => 0.0,
    };
    approx(a)
        .total_cmp(&approx(b))
        .then_with(|| match (a, b) {
            (Value::Int(x), Value::Int(y)) => x.cmp(y),
            (Value::Float(x), Value::Float(y)) => x.compare(y).unwrap_or(Ordering::Equal),
            (Value::Int(_), _) => Ordering::Less,
            (_, Value::Int(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Regexp(a), Value::Regexp(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Map(a), Value::Map(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Struct(a), Value::Struct(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Struct(s), Value::Map(m)) | (Value::Map(m), Value::Struct(s)) => {
                ensure_sufficient_stack(|| s == m)
            }
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::value_to_string(self))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(Integer::from(v))
            }
        })*
    };
}

from_integer!(i32, i64, u32, u64, usize, Integer, BigInt);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(Float::from(v))
    }
}

impl From<Float> for Value {
    fn from(v: Float) -> Self {
        Value::Float(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Float(Float::from_big(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(Arc::from(v))
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::String(v)
    }
}

impl From<Binary> for Value {
    fn from(v: Binary) -> Self {
        Value::Binary(v)
    }
}

impl From<Regexp> for Value {
    fn from(v: Regexp) -> Self {
        Value::Regexp(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Array::from(v))
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<StructMap> for Value {
    fn from(v: StructMap) -> Self {
        Value::Struct(v)
    }
}

impl From<Type> for Value {
    fn from(v: Type) -> Self {
        Value::Type(v)
    }
}

impl From<Native> for Value {
    fn from(v: Native) -> Self {
        Value::Native(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
