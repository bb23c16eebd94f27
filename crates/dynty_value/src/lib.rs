//! Immutable values and the dynamic type algebra describing them.
//!
//! A [`Value`] is any piece of data: a scalar, an [`Array`], an ordered
//! [`Map`], a record view ([`StructMap`]) or a [`Type`]. A `Type` is a set of
//! values. Types compose like sets (`AllOf`, `AnyOf`, `OneOf`, `Not`) and
//! answer two questions: [`Type::instance`] (is this value a member?) and
//! [`Type::assignable`] (is every member of that type a member of this one?).
//!
//! Types may refer to themselves through named [`Alias`]es; equality,
//! hashing, assignability and rendering all terminate on such types.
//!
//! Collections come in a frozen, `Arc`-shared form and a mutable, owned
//! form; see [`Mutability`].

mod alias;
mod array;
mod assign;
mod coerce;
mod collection_type;
mod equality;
mod error;
mod format;
mod guard;
mod hash;
#[cfg(feature = "json")]
mod json;
mod logical;
mod map;
mod mutability;
mod number;
mod primitive;
mod range;
mod record;
mod ty;
mod value;

pub use alias::{Alias, AliasAdder, AliasMap, AliasRegistry};
pub use array::{Array, MutableArray};
pub use collection_type::{ArrayType, MapType, StructEntry, StructType, TupleType};
pub use error::Error;
pub use format::TypeFormatter;
pub use logical::{AllOf, AnyOf, Not, OneOf};
pub use map::{Iter as MapIter, Map, MutableMap};
pub use mutability::Mutability;
pub use number::{Float, Integer};
pub use primitive::{Binary, Native, Regexp, Timestamp};
pub use range::{FloatRange, IntegerRange, SizeRange};
pub use record::{MutableStructMap, Record, StructMap};
pub use ty::{Type, TypeTag};
pub use value::Value;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
