//! Record views: user types seen through the map protocol.
//!
//! A host type implements [`Record`] to expose a fixed, ordered set of named
//! fields. [`StructMap`] (frozen) and [`MutableStructMap`] (owned) then make
//! it behave like a map with string keys in field declaration order.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Map, MutableMap, Mutability, Value};

/// A host type with named fields.
pub trait Record: fmt::Debug + Send + Sync + 'static {
    /// Name used in error messages.
    fn record_name(&self) -> &str;

    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Current value of `name`, `None` if there is no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Replace the value of `name`.
    ///
    /// Implementations reject unknown names with [`Error::UnknownField`]
    /// and unsuitable values with [`Error::NotAssignable`].
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), Error>;

    /// A boxed deep copy, used to thaw a frozen view.
    fn clone_record(&self) -> Box<dyn Record>;
}

fn entries(record: &dyn Record) -> impl Iterator<Item = (Value, Value)> + '_ {
    record
        .field_names()
        .iter()
        .map(move |name| (Value::from(*name), record.field(name).unwrap_or(Value::Nil)))
}

fn lookup(record: &dyn Record, key: &Value) -> Option<Value> {
    key.as_str().and_then(|name| record.field(name))
}

fn unknown_field(record: &dyn Record, key: &Value) -> Error {
    Error::UnknownField {
        record: record.record_name().to_owned(),
        field: key.as_str().map_or_else(|| key.to_string(), str::to_owned),
    }
}

/// A frozen record view.
#[derive(Clone)]
pub struct StructMap {
    record: Arc<dyn Record>,
}

impl StructMap {
    pub fn new(record: impl Record) -> Self {
        StructMap {
            record: Arc::new(record),
        }
    }

    pub fn record(&self) -> &dyn Record {
        &*self.record
    }

    pub fn len(&self) -> usize {
        self.record.field_names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        lookup(&*self.record, key)
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.record.field(name)
    }

    /// Field names and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        entries(&*self.record)
    }

    /// A frozen map with the same entries.
    pub fn to_map(&self) -> Map {
        self.iter().collect()
    }

    pub fn hash_code(&self) -> u32 {
        self.to_map().hash_code()
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.record).cast::<()>() as usize
    }
}

impl PartialEq for StructMap {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity() || self.to_map() == other.to_map()
    }
}

impl Eq for StructMap {}

impl PartialEq<Map> for StructMap {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(&k) == Some(&v))
    }
}

impl fmt::Debug for StructMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.record, f)
    }
}

impl Mutability for StructMap {
    type Frozen = StructMap;
    type Thawed = MutableStructMap;

    fn is_frozen(&self) -> bool {
        true
    }

    fn frozen_copy(&self) -> StructMap {
        self.clone()
    }

    fn thawed_copy(&self) -> MutableStructMap {
        MutableStructMap {
            record: self.record.clone_record(),
        }
    }
}

/// An owned, writable record view.
pub struct MutableStructMap {
    record: Box<dyn Record>,
}

impl MutableStructMap {
    pub fn new(record: impl Record) -> Self {
        MutableStructMap {
            record: Box::new(record),
        }
    }

    pub fn record(&self) -> &dyn Record {
        &*self.record
    }

    pub fn len(&self) -> usize {
        self.record.field_names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        lookup(&*self.record, key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        entries(&*self.record)
    }

    /// Write a field through the map protocol. The key must name a field.
    pub fn put(&mut self, key: &Value, value: Value) -> Result<(), Error> {
        let Some(name) = key.as_str() else {
            return Err(unknown_field(&*self.record, key));
        };
        if !self.record.field_names().contains(&name) {
            return Err(unknown_field(&*self.record, key));
        }
        self.record.set_field(name, value)
    }

    /// A mutable map with the same entries.
    pub fn to_map(&self) -> MutableMap {
        self.iter().collect()
    }

    /// Consume into the frozen form.
    pub fn freeze(self) -> StructMap {
        StructMap {
            record: Arc::from(self.record),
        }
    }
}

impl Clone for MutableStructMap {
    fn clone(&self) -> Self {
        MutableStructMap {
            record: self.record.clone_record(),
        }
    }
}

impl fmt::Debug for MutableStructMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.record, f)
    }
}

impl Mutability for MutableStructMap {
    type Frozen = StructMap;
    type Thawed = MutableStructMap;

    fn is_frozen(&self) -> bool {
        false
    }

    fn frozen_copy(&self) -> StructMap {
        StructMap {
            record: Arc::from(self.record.clone_record()),
        }
    }

    fn thawed_copy(&self) -> MutableStructMap {
        self.clone()
    }
}

#[cfg(test)]
mod tests;
