//! Payloads of the array, tuple, map and struct types.

use std::sync::Arc;

use crate::{SizeRange, Type};

/// `[element, min, max]`: arrays whose elements all match one type.
#[derive(Clone, Debug)]
pub struct ArrayType {
    pub(crate) element: Type,
    pub(crate) size: SizeRange,
}

impl ArrayType {
    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn size(&self) -> SizeRange {
        self.size
    }
}

/// `{t1, t2, ...}`: arrays with one type per position.
#[derive(Clone, Debug)]
pub struct TupleType {
    pub(crate) elements: Vec<Type>,
}

impl TupleType {
    pub fn elements(&self) -> &[Type] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// `map[key, min, max]value`.
#[derive(Clone, Debug)]
pub struct MapType {
    pub(crate) key: Type,
    pub(crate) value: Type,
    pub(crate) size: SizeRange,
}

impl MapType {
    pub fn key(&self) -> &Type {
        &self.key
    }

    pub fn value(&self) -> &Type {
        &self.value
    }

    pub fn size(&self) -> SizeRange {
        self.size
    }
}

/// One `key: type` (or optional `key?: type`) entry of a struct type.
#[derive(Clone, Debug)]
pub struct StructEntry {
    pub(crate) key: Arc<str>,
    pub(crate) value: Type,
    pub(crate) required: bool,
}

impl StructEntry {
    pub fn new(key: impl Into<Arc<str>>, value: Type, required: bool) -> Self {
        StructEntry {
            key: key.into(),
            value,
            required,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Type {
        &self.value
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// `{a: int, b?: string, ...}`: maps with named, typed entries.
///
/// `additional` allows keys that are not declared.
#[derive(Clone, Debug)]
pub struct StructType {
    pub(crate) entries: Vec<StructEntry>,
    pub(crate) additional: bool,
}

impl StructType {
    pub fn entries(&self) -> &[StructEntry] {
        &self.entries
    }

    pub fn allows_additional(&self) -> bool {
        self.additional
    }

    pub fn get(&self, key: &str) -> Option<&StructEntry> {
        self.entries.iter().find(|e| &*e.key == key)
    }

    pub fn required_count(&self) -> usize {
        self.entries.iter().filter(|e| e.required).count()
    }

    /// Possible entry counts of instances.
    pub fn size_range(&self) -> SizeRange {
        let max = if self.additional {
            usize::MAX
        } else {
            self.entries.len()
        };
        SizeRange::new(self.required_count(), max)
    }
}
