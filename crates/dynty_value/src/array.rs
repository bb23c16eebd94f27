//! Ordered sequences: the shared [`Array`] and the owned [`MutableArray`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dynty_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::hash::ordered;
use crate::{Error, Map, MutableMap, Mutability, Type, Value};

/// Seed of every array hash.
const ARRAY_SEED: u32 = 1;

/// A frozen, shareable sequence of values.
#[derive(Clone)]
pub struct Array {
    elements: Arc<[Value]>,
}

impl Array {
    pub fn new(elements: Vec<Value>) -> Self {
        Array {
            elements: elements.into(),
        }
    }

    pub fn empty() -> Self {
        Array::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.elements.iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Elements in `start..end`.
    ///
    /// A slice covering the whole array shares its storage.
    pub fn slice(&self, start: usize, end: usize) -> Result<Array, Error> {
        check_slice(start, end, self.len())?;
        if start == 0 && end == self.len() {
            return Ok(self.clone());
        }
        Ok(Array::new(self.elements[start..end].to_vec()))
    }

    /// Nested arrays expanded in place, recursively.
    pub fn flatten(&self) -> Array {
        if !self.elements.iter().any(|v| matches!(v, Value::Array(_))) {
            return self.clone();
        }
        let mut out = Vec::with_capacity(self.len());
        flatten_into(&self.elements, &mut out);
        Array::new(out)
    }

    /// Duplicates removed, keeping the first occurrence.
    pub fn unique(&self) -> Array {
        match unique_of(&self.elements) {
            Some(kept) => Array::new(kept),
            None => self.clone(),
        }
    }

    /// Interpret the elements as alternating keys and values.
    pub fn to_map(&self) -> Result<Map, Error> {
        pairs_to_map(&self.elements).map(MutableMap::freeze)
    }

    /// A new array with `value` appended.
    #[must_use]
    pub fn with(&self, value: Value) -> Array {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.extend_from_slice(&self.elements);
        out.push(value);
        Array::new(out)
    }

    /// A new array with all of `values` appended.
    #[must_use]
    pub fn with_all(&self, values: impl IntoIterator<Item = Value>) -> Array {
        let mut out = self.elements.to_vec();
        let before = out.len();
        out.extend(values);
        if out.len() == before {
            return self.clone();
        }
        Array::new(out)
    }

    /// A new array without any occurrence of `value`.
    #[must_use]
    pub fn without(&self, value: &Value) -> Array {
        if !self.contains(value) {
            return self.clone();
        }
        Array::new(self.elements.iter().filter(|v| *v != value).cloned().collect())
    }

    /// Stable sort by [`Value::compare`], kinds that do not compare grouped
    /// in a fixed order.
    #[must_use]
    pub fn sort(&self) -> Array {
        let mut out = self.elements.to_vec();
        out.sort_by(Value::total_cmp);
        Array::new(out)
    }

    #[must_use]
    pub fn reverse(&self) -> Array {
        let mut out = self.elements.to_vec();
        out.reverse();
        Array::new(out)
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    pub fn hash_code(&self) -> u32 {
        ordered(ARRAY_SEED, self.elements.iter().map(Value::hash_code))
    }

    pub fn type_of(&self) -> Type {
        Type::ExactArray(self.clone())
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.elements).cast::<()>() as usize
    }
}

fn check_slice(start: usize, end: usize, len: usize) -> Result<(), Error> {
    if end > len {
        return Err(Error::IndexOutOfBounds { index: end, len });
    }
    if start > end {
        return Err(Error::IndexOutOfBounds { index: start, len: end });
    }
    Ok(())
}

fn flatten_into(elements: &[Value], out: &mut Vec<Value>) {
    for v in elements {
        match v {
            Value::Array(nested) => ensure_sufficient_stack(|| flatten_into(&nested.elements, out)),
            other => out.push(other.clone()),
        }
    }
}

/// The first occurrences, or `None` when there are no duplicates.
fn unique_of(elements: &[Value]) -> Option<Vec<Value>> {
    let mut seen: FxHashSet<&Value> = FxHashSet::default();
    if elements.iter().all(|v| seen.insert(v)) {
        return None;
    }
    seen.clear();
    Some(elements.iter().filter(|v| seen.insert(*v)).cloned().collect())
}

fn pairs_to_map(elements: &[Value]) -> Result<MutableMap, Error> {
    if elements.len() % 2 != 0 {
        return Err(Error::OddPairCount {
            len: elements.len(),
        });
    }
    let mut map = MutableMap::with_capacity(elements.len() / 2);
    for pair in elements.chunks_exact(2) {
        map.put(pair[0].clone(), pair[1].clone());
    }
    Ok(map)
}

/// Nested arrays held only by this handle are dropped from a worklist, so a
/// deep chain does not recurse through the drop glue.
impl Drop for Array {
    fn drop(&mut self) {
        let Some(elements) = Arc::get_mut(&mut self.elements) else {
            return;
        };
        let mut pending: Vec<Array> = elements.iter_mut().filter_map(take_array).collect();
        while let Some(mut next) = pending.pop() {
            if let Some(nested) = Arc::get_mut(&mut next.elements) {
                pending.extend(nested.iter_mut().filter_map(take_array));
            }
        }
    }
}

fn take_array(slot: &mut Value) -> Option<Array> {
    if !matches!(slot, Value::Array(_)) {
        return None;
    }
    match std::mem::replace(slot, Value::Nil) {
        Value::Array(a) => Some(a),
        _ => None,
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.elements == other.elements
    }
}

impl Eq for Array {}

impl Hash for Array {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl From<Vec<Value>> for Array {
    fn from(v: Vec<Value>) -> Self {
        Array::new(v)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Mutability for Array {
    type Frozen = Array;
    type Thawed = MutableArray;

    fn is_frozen(&self) -> bool {
        true
    }

    fn frozen_copy(&self) -> Array {
        self.clone()
    }

    fn thawed_copy(&self) -> MutableArray {
        MutableArray {
            elements: self.elements.to_vec(),
        }
    }
}

/// An exclusively owned, growable sequence of values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutableArray {
    elements: Vec<Value>,
}

impl MutableArray {
    pub fn new() -> Self {
        MutableArray::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MutableArray {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn push(&mut self, value: Value) {
        self.elements.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.elements.pop()
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, Error> {
        let len = self.len();
        match self.elements.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// Insert before `index`. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<(), Error> {
        if index > self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.elements.insert(index, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, Error> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.elements.remove(index))
    }

    /// Remove the first occurrence of `value`.
    pub fn remove_value(&mut self, value: &Value) -> bool {
        match self.elements.iter().position(|v| v == value) {
            Some(index) => {
                self.elements.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<MutableArray, Error> {
        check_slice(start, end, self.len())?;
        Ok(MutableArray {
            elements: self.elements[start..end].to_vec(),
        })
    }

    pub fn flatten(&mut self) {
        let mut out = Vec::with_capacity(self.len());
        flatten_into(&self.elements, &mut out);
        self.elements = out;
    }

    pub fn unique(&mut self) {
        if let Some(kept) = unique_of(&self.elements) {
            self.elements = kept;
        }
    }

    pub fn sort(&mut self) {
        self.elements.sort_by(Value::total_cmp);
    }

    pub fn reverse(&mut self) {
        self.elements.reverse();
    }

    pub fn to_map(&self) -> Result<MutableMap, Error> {
        pairs_to_map(&self.elements)
    }

    /// Consume into the frozen form.
    pub fn freeze(self) -> Array {
        Array::new(self.elements)
    }
}

impl From<Vec<Value>> for MutableArray {
    fn from(elements: Vec<Value>) -> Self {
        MutableArray { elements }
    }
}

impl FromIterator<Value> for MutableArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        MutableArray {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for MutableArray {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl Mutability for MutableArray {
    type Frozen = Array;
    type Thawed = MutableArray;

    fn is_frozen(&self) -> bool {
        false
    }

    fn frozen_copy(&self) -> Array {
        Array::new(self.elements.clone())
    }

    fn thawed_copy(&self) -> MutableArray {
        self.clone()
    }
}

#[cfg(test)]
mod tests;
