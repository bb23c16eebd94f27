//! The [`Type`] enum and its constructors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::collection_type::{ArrayType, MapType, StructEntry, StructType, TupleType};
use crate::logical::{self, AllOf, AnyOf, Not, OneOf};
use crate::{
    assign, equality, Alias, Array, Binary, Error, Float, FloatRange, Integer, IntegerRange, Map,
    Native, Regexp, SizeRange, Timestamp, Value,
};

/// A set of values.
///
/// Every kind has a generic form (`int`, `string`, `[any]`) and, where it
/// makes sense, constrained forms (`1..10`, `string[1,5]`) and an exact form
/// matching one value (`5`, `"a"`). Constructors normalize, so equal sets
/// built different ways usually end up as the same variant: an unbounded
/// range is the generic type, a one-member range is the exact type.
///
/// Cloning is cheap; composite payloads are `Arc`-shared.
#[derive(Clone, Debug)]
pub enum Type {
    Any,
    Nil,
    Boolean,
    ExactBoolean(bool),
    Integer(IntegerRange),
    ExactInteger(Integer),
    Float(FloatRange),
    ExactFloat(Float),
    String(SizeRange),
    ExactString(Arc<str>),
    /// Strings equal to the payload ignoring case.
    CiString(Arc<str>),
    /// Strings matching a regular expression.
    Pattern(Regexp),
    Regexp,
    ExactRegexp(Regexp),
    Timestamp,
    ExactTimestamp(Timestamp),
    Binary(SizeRange),
    ExactBinary(Binary),
    Array(Arc<ArrayType>),
    Tuple(Arc<TupleType>),
    ExactArray(Array),
    Map(Arc<MapType>),
    Struct(Arc<StructType>),
    ExactMap(Map),
    AllOf(AllOf),
    AnyOf(AnyOf),
    OneOf(OneOf),
    Not(Not),
    /// `type` (`None`) or `type[T]`: type values, optionally bounded.
    Meta(Option<Arc<Type>>),
    Native,
    ExactNative(Native),
    Alias(Alias),
}

/// Discriminant of a [`Type`], used for deterministic ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    Any,
    Nil,
    Boolean,
    ExactBoolean,
    Integer,
    IntegerRange,
    ExactInteger,
    Float,
    FloatRange,
    ExactFloat,
    String,
    SizedString,
    ExactString,
    CiString,
    Pattern,
    Regexp,
    ExactRegexp,
    Timestamp,
    ExactTimestamp,
    Binary,
    SizedBinary,
    ExactBinary,
    Array,
    SizedArray,
    Tuple,
    ExactArray,
    Map,
    SizedMap,
    Struct,
    ExactMap,
    AllOf,
    AnyOf,
    OneOf,
    Not,
    Meta,
    Native,
    ExactNative,
    Alias,
}

impl Type {
    pub fn integer() -> Type {
        Type::Integer(IntegerRange::UNBOUNDED)
    }

    /// Integers in `min..max` (`inclusive`) or `min...max`.
    pub fn integer_range(min: Option<Integer>, max: Option<Integer>, inclusive: bool) -> Result<Type, Error> {
        let range = IntegerRange::new(min, max, inclusive)?;
        Ok(match range.single() {
            Some(v) => Type::ExactInteger(v.clone()),
            None => Type::Integer(range),
        })
    }

    pub fn float() -> Type {
        Type::Float(FloatRange::UNBOUNDED)
    }

    pub fn float_range(min: Option<Float>, max: Option<Float>, inclusive: bool) -> Result<Type, Error> {
        let range = FloatRange::new(min, max, inclusive)?;
        Ok(match range.single() {
            Some(v) => Type::ExactFloat(v.clone()),
            None => Type::Float(range),
        })
    }

    pub fn string() -> Type {
        Type::String(SizeRange::UNBOUNDED)
    }

    /// Strings with a char count in `size`.
    pub fn sized_string(size: SizeRange) -> Type {
        Type::String(size)
    }

    pub fn exact_string(s: impl Into<Arc<str>>) -> Type {
        Type::ExactString(s.into())
    }

    pub fn ci_string(s: impl Into<Arc<str>>) -> Type {
        Type::CiString(s.into())
    }

    pub fn pattern(pattern: &str) -> Result<Type, Error> {
        Regexp::new(pattern).map(Type::Pattern)
    }

    pub fn binary() -> Type {
        Type::Binary(SizeRange::UNBOUNDED)
    }

    pub fn sized_binary(size: SizeRange) -> Type {
        Type::Binary(size)
    }

    pub fn array(element: Type) -> Type {
        Type::sized_array(element, SizeRange::UNBOUNDED)
    }

    pub fn sized_array(element: Type, size: SizeRange) -> Type {
        Type::Array(Arc::new(ArrayType { element, size }))
    }

    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Tuple(Arc::new(TupleType { elements }))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::sized_map(key, value, SizeRange::UNBOUNDED)
    }

    pub fn sized_map(key: Type, value: Type, size: SizeRange) -> Type {
        Type::Map(Arc::new(MapType { key, value, size }))
    }

    /// A struct type. Keys must be unique.
    ///
    /// A closed struct without entries only matches the empty map and is
    /// built as `map[any,0,0]any`.
    pub fn structure(entries: Vec<StructEntry>, additional: bool) -> Result<Type, Error> {
        for (i, e) in entries.iter().enumerate() {
            if entries[..i].iter().any(|prev| prev.key == e.key) {
                return Err(Error::illegal("struct", format!("duplicate key `{}`", e.key)));
            }
        }
        if entries.is_empty() && !additional {
            return Ok(Type::sized_map(Type::Any, Type::Any, SizeRange::exact(0)));
        }
        Ok(Type::Struct(Arc::new(StructType { entries, additional })))
    }

    pub fn all_of(operands: Vec<Type>) -> Type {
        logical::all_of(operands)
    }

    pub fn any_of(operands: Vec<Type>) -> Type {
        logical::any_of(operands)
    }

    pub fn one_of(operands: Vec<Type>) -> Type {
        logical::one_of(operands)
    }

    /// `!t`. Negating a negation yields the original type.
    #[allow(clippy::should_implement_trait, reason = "constructor, not an operator")]
    pub fn not(t: Type) -> Type {
        logical::not(t)
    }

    pub fn meta(t: Option<Type>) -> Type {
        Type::Meta(t.map(Arc::new))
    }

    /// The exact type of `value`.
    pub fn exact(value: &Value) -> Type {
        value.type_of()
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Type::Any => TypeTag::Any,
            Type::Nil => TypeTag::Nil,
            Type::Boolean => TypeTag::Boolean,
            Type::ExactBoolean(_) => TypeTag::ExactBoolean,
            Type::Integer(r) if r.is_unbounded() => TypeTag::Integer,
            Type::Integer(_) => TypeTag::IntegerRange,
            Type::ExactInteger(_) => TypeTag::ExactInteger,
            Type::Float(r) if r.is_unbounded() => TypeTag::Float,
            Type::Float(_) => TypeTag::FloatRange,
            Type::ExactFloat(_) => TypeTag::ExactFloat,
            Type::String(s) if s.is_unbounded() => TypeTag::String,
            Type::String(_) => TypeTag::SizedString,
            Type::ExactString(_) => TypeTag::ExactString,
            Type::CiString(_) => TypeTag::CiString,
            Type::Pattern(_) => TypeTag::Pattern,
            Type::Regexp => TypeTag::Regexp,
            Type::ExactRegexp(_) => TypeTag::ExactRegexp,
            Type::Timestamp => TypeTag::Timestamp,
            Type::ExactTimestamp(_) => TypeTag::ExactTimestamp,
            Type::Binary(s) if s.is_unbounded() => TypeTag::Binary,
            Type::Binary(_) => TypeTag::SizedBinary,
            Type::ExactBinary(_) => TypeTag::ExactBinary,
            Type::Array(a) if a.size.is_unbounded() => TypeTag::Array,
            Type::Array(_) => TypeTag::SizedArray,
            Type::Tuple(_) => TypeTag::Tuple,
            Type::ExactArray(_) => TypeTag::ExactArray,
            Type::Map(m) if m.size.is_unbounded() => TypeTag::Map,
            Type::Map(_) => TypeTag::SizedMap,
            Type::Struct(_) => TypeTag::Struct,
            Type::ExactMap(_) => TypeTag::ExactMap,
            Type::AllOf(_) => TypeTag::AllOf,
            Type::AnyOf(_) => TypeTag::AnyOf,
            Type::OneOf(_) => TypeTag::OneOf,
            Type::Not(_) => TypeTag::Not,
            Type::Meta(_) => TypeTag::Meta,
            Type::Native => TypeTag::Native,
            Type::ExactNative(_) => TypeTag::ExactNative,
            Type::Alias(_) => TypeTag::Alias,
        }
    }

    /// The single value of an exact type.
    pub fn exact_value(&self) -> Option<Value> {
        Some(match self.resolved() {
            Type::Nil => Value::Nil,
            Type::ExactBoolean(b) => Value::Bool(*b),
            Type::ExactInteger(i) => Value::Int(i.clone()),
            Type::ExactFloat(f) => Value::Float(f.clone()),
            Type::ExactString(s) => Value::String(Arc::clone(s)),
            Type::ExactRegexp(r) => Value::Regexp(r.clone()),
            Type::ExactTimestamp(t) => Value::Timestamp(*t),
            Type::ExactBinary(b) => Value::Binary(b.clone()),
            Type::ExactArray(a) => Value::Array(a.clone()),
            Type::ExactMap(m) => Value::Map(m.clone()),
            Type::ExactNative(n) => Value::Native(n.clone()),
            _ => return None,
        })
    }

    pub fn is_exact(&self) -> bool {
        self.exact_value().is_some()
    }

    /// The least constrained type of the same kind.
    ///
    /// Logical operators are their own generic type.
    #[must_use]
    pub fn generic(&self) -> Type {
        match self.resolved() {
            Type::Boolean | Type::ExactBoolean(_) => Type::Boolean,
            Type::Integer(_) | Type::ExactInteger(_) => Type::integer(),
            Type::Float(_) | Type::ExactFloat(_) => Type::float(),
            Type::String(_) | Type::ExactString(_) | Type::CiString(_) | Type::Pattern(_) => {
                Type::string()
            }
            Type::Regexp | Type::ExactRegexp(_) => Type::Regexp,
            Type::Timestamp | Type::ExactTimestamp(_) => Type::Timestamp,
            Type::Binary(_) | Type::ExactBinary(_) => Type::binary(),
            Type::Array(_) | Type::Tuple(_) | Type::ExactArray(_) => Type::array(Type::Any),
            Type::Map(_) | Type::Struct(_) | Type::ExactMap(_) => Type::map(Type::Any, Type::Any),
            Type::Meta(_) => Type::Meta(None),
            Type::Native | Type::ExactNative(_) => Type::Native,
            other => other.clone(),
        }
    }

    /// Length bounds of sized kinds.
    pub fn size_range(&self) -> Option<SizeRange> {
        Some(match self.resolved() {
            Type::String(s) | Type::Binary(s) => *s,
            Type::ExactString(s) => SizeRange::exact(s.chars().count()),
            Type::ExactBinary(b) => SizeRange::exact(b.len()),
            Type::Array(a) => a.size,
            Type::Tuple(t) => SizeRange::exact(t.len()),
            Type::ExactArray(a) => SizeRange::exact(a.len()),
            Type::Map(m) => m.size,
            Type::Struct(s) => s.size_range(),
            Type::ExactMap(m) => SizeRange::exact(m.len()),
            _ => return None,
        })
    }

    /// Follow alias links to the first non-alias type.
    ///
    /// An unresolved alias resolves to itself.
    pub fn resolved(&self) -> &Type {
        let mut cur = self;
        // A chain longer than this is an alias cycle (`a = b`, `b = a`).
        for _ in 0..64 {
            match cur {
                Type::Alias(a) => match a.target() {
                    Some(t) => cur = t,
                    None => return cur,
                },
                other => return other,
            }
        }
        cur
    }

    /// Whether every instance of `other` is an instance of `self`.
    pub fn assignable(&self, other: &Type) -> bool {
        assign::assignable(self, other, None)
    }

    /// Whether `value` is a member of `self`.
    pub fn instance(&self, value: &Value) -> bool {
        assign::instance(self, value, None)
    }

    pub fn hash_code(&self) -> u32 {
        equality::type_hash(self)
    }

    /// Address of the shared payload, 0 for payload-free types.
    pub(crate) fn identity(&self) -> usize {
        fn addr<T: ?Sized>(p: *const T) -> usize {
            p.cast::<()>() as usize
        }
        match self {
            Type::Array(a) => addr(Arc::as_ptr(a)),
            Type::Tuple(t) => addr(Arc::as_ptr(t)),
            Type::Map(m) => addr(Arc::as_ptr(m)),
            Type::Struct(s) => addr(Arc::as_ptr(s)),
            Type::ExactArray(a) => a.identity(),
            Type::ExactMap(m) => m.identity(),
            Type::AllOf(x) => addr(Arc::as_ptr(&x.operands)),
            Type::AnyOf(x) => addr(Arc::as_ptr(&x.operands)),
            Type::OneOf(x) => addr(Arc::as_ptr(&x.operands)),
            Type::Not(x) => addr(Arc::as_ptr(&x.negated)),
            Type::Meta(Some(t)) => addr(Arc::as_ptr(t)),
            Type::Alias(a) => a.identity(),
            _ => 0,
        }
    }

    /// Both sides are the same shared node.
    pub(crate) fn same_node(&self, other: &Type) -> bool {
        let id = self.identity();
        id != 0 && id == other.identity() && self.tag() == other.tag()
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        equality::type_eq(self, other, None)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::TypeFormatter::new().format(self))
    }
}
