//! Insertion-ordered hash maps: the shared [`Map`] and the owned
//! [`MutableMap`].
//!
//! Both wrap the same [`Table`]: a slab of entries addressed by index, a
//! power-of-two bucket array whose slots head singly linked collision
//! chains, and a doubly linked list threading every live entry in insertion
//! order. Removal unlinks an entry from both lists and recycles its slab
//! slot through a free list. Growing rebuilds the chains by walking the
//! order list, so iteration order survives resizes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::hash::{combine, unordered};
use crate::{Array, Mutability, Type, Value};

const MIN_BUCKETS: usize = 8;

/// Seed of every map hash.
const MAP_SEED: u32 = 2;

#[derive(Clone, Debug)]
struct Entry {
    key: Value,
    value: Value,
    hash: u32,
    /// Next entry in the same bucket.
    chain: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug, Default)]
struct Table {
    slots: Vec<Option<Entry>>,
    free: Vec<usize>,
    buckets: Vec<Option<usize>>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl Table {
    fn with_capacity(capacity: usize) -> Self {
        let mut table = Table::default();
        if capacity > 0 {
            table.buckets = vec![None; buckets_for(capacity)];
            table.slots.reserve(capacity);
        }
        table
    }

    fn entry(&self, index: usize) -> &Entry {
        self.slots[index]
            .as_ref()
            .unwrap_or_else(|| unreachable!("map slot {index} is linked but vacant"))
    }

    fn entry_mut(&mut self, index: usize) -> &mut Entry {
        self.slots[index]
            .as_mut()
            .unwrap_or_else(|| unreachable!("map slot {index} is linked but vacant"))
    }

    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }

    fn find(&self, key: &Value, hash: u32) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut cur = self.buckets[self.bucket_of(hash)];
        while let Some(index) = cur {
            let entry = self.entry(index);
            if entry.hash == hash && entry.key == *key {
                return Some(index);
            }
            cur = entry.chain;
        }
        None
    }

    fn get(&self, key: &Value) -> Option<&Value> {
        self.find(key, key.hash_code())
            .map(|index| &self.entry(index).value)
    }

    /// Insert or overwrite. An overwrite keeps the entry's position.
    fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        let hash = key.hash_code();
        if let Some(index) = self.find(&key, hash) {
            return Some(std::mem::replace(&mut self.entry_mut(index).value, value));
        }
        if (self.len + 1) * 4 > self.buckets.len() * 3 {
            self.resize(buckets_for(self.len + 1).max(self.buckets.len() * 2));
        }
        let bucket = self.bucket_of(hash);
        let entry = Entry {
            key,
            value,
            hash,
            chain: self.buckets[bucket],
            prev: self.tail,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(entry);
                index
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.buckets[bucket] = Some(index);
        match self.tail {
            Some(tail) => self.entry_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        None
    }

    fn remove(&mut self, key: &Value) -> Option<Value> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = key.hash_code();
        let bucket = self.bucket_of(hash);
        let mut before: Option<usize> = None;
        let mut cur = self.buckets[bucket];
        while let Some(index) = cur {
            let entry = self.entry(index);
            if entry.hash == hash && entry.key == *key {
                break;
            }
            before = Some(index);
            cur = entry.chain;
        }
        let index = cur?;
        let entry = self.slots[index].take()?;

        match before {
            Some(b) => self.entry_mut(b).chain = entry.chain,
            None => self.buckets[bucket] = entry.chain,
        }
        match entry.prev {
            Some(p) => self.entry_mut(p).next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(n) => self.entry_mut(n).prev = entry.prev,
            None => self.tail = entry.prev,
        }
        self.free.push(index);
        self.len -= 1;
        Some(entry.value)
    }

    fn resize(&mut self, bucket_count: usize) {
        tracing::trace!(
            len = self.len,
            from = self.buckets.len(),
            to = bucket_count,
            "map resize"
        );
        let mask = bucket_count - 1;
        let mut buckets = vec![None; bucket_count];
        let mut cur = self.head;
        while let Some(index) = cur {
            let entry = self.entry_mut(index);
            let bucket = entry.hash as usize & mask;
            entry.chain = buckets[bucket];
            buckets[bucket] = Some(index);
            cur = entry.next;
        }
        self.buckets = buckets;
    }

    fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            cur: self.head,
            remaining: self.len,
        }
    }

    fn same_entries(&self, other: &Table) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }

    fn hash_code(&self) -> u32 {
        unordered(
            MAP_SEED,
            self.iter().map(|(k, v)| combine(k.hash_code(), v.hash_code())),
        )
    }
}

fn buckets_for(len: usize) -> usize {
    (len * 4 / 3 + 1).next_power_of_two().max(MIN_BUCKETS)
}

/// Entries of a map in insertion order.
pub struct Iter<'a> {
    table: &'a Table,
    cur: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cur?;
        let entry = self.table.entry(index);
        self.cur = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// A frozen, shareable map preserving insertion order.
#[derive(Clone)]
pub struct Map {
    table: Arc<Table>,
}

impl Map {
    pub fn empty() -> Self {
        Map {
            table: Arc::new(Table::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len
    }

    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.table.get(&Value::from(key))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.table.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Union of both maps. Entries of `other` win; keys already present
    /// keep their position.
    #[must_use]
    pub fn merge(&self, other: &Map) -> Map {
        if other.is_empty() || self.ptr_eq(other) {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut table = Table::clone(&self.table);
        for (k, v) in other.iter() {
            table.insert(k.clone(), v.clone());
        }
        Map {
            table: Arc::new(table),
        }
    }

    /// A new map with `key` bound to `value`.
    #[must_use]
    pub fn with(&self, key: Value, value: Value) -> Map {
        if self.get(&key) == Some(&value) {
            return self.clone();
        }
        let mut table = Table::clone(&self.table);
        table.insert(key, value);
        Map {
            table: Arc::new(table),
        }
    }

    /// A new map without `key`.
    #[must_use]
    pub fn without(&self, key: &Value) -> Map {
        if !self.contains_key(key) {
            return self.clone();
        }
        let mut table = Table::clone(&self.table);
        table.remove(key);
        Map {
            table: Arc::new(table),
        }
    }

    /// Keys and values alternating, in insertion order.
    pub fn to_array(&self) -> Array {
        self.iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }

    pub fn ptr_eq(&self, other: &Map) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    /// Order independent hash of the entries.
    pub fn hash_code(&self) -> u32 {
        self.table.hash_code()
    }

    pub fn type_of(&self) -> Type {
        Type::ExactMap(self.clone())
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.table) as usize
    }
}

impl Default for Map {
    fn default() -> Self {
        Map::empty()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.table.same_entries(&other.table)
    }
}

impl Eq for Map {}

impl Hash for Map {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        iter.into_iter().collect::<MutableMap>().freeze()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Value, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Mutability for Map {
    type Frozen = Map;
    type Thawed = MutableMap;

    fn is_frozen(&self) -> bool {
        true
    }

    fn frozen_copy(&self) -> Map {
        self.clone()
    }

    fn thawed_copy(&self) -> MutableMap {
        MutableMap {
            table: Table::clone(&self.table),
        }
    }
}

/// An exclusively owned map preserving insertion order.
#[derive(Clone, Default)]
pub struct MutableMap {
    table: Table,
}

impl MutableMap {
    pub fn new() -> Self {
        MutableMap::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MutableMap {
            table: Table::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len
    }

    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.table.iter()
    }

    /// Bind `key` to `value`, returning the previous value.
    ///
    /// Overwriting keeps the key's original position.
    pub fn put(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        self.table.insert(key.into(), value.into())
    }

    /// Copy every entry of `other` into this map.
    pub fn put_all(&mut self, other: &Map) {
        for (k, v) in other.iter() {
            self.table.insert(k.clone(), v.clone());
        }
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.table.remove(key)
    }

    pub fn clear(&mut self) {
        self.table = Table::default();
    }

    /// Consume into the frozen form.
    pub fn freeze(self) -> Map {
        Map {
            table: Arc::new(self.table),
        }
    }
}

impl PartialEq for MutableMap {
    fn eq(&self, other: &Self) -> bool {
        self.table.same_entries(&other.table)
    }
}

impl Eq for MutableMap {}

impl fmt::Debug for MutableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Value, Value)> for MutableMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = MutableMap::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl Extend<(Value, Value)> for MutableMap {
    fn extend<I: IntoIterator<Item = (Value, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.table.insert(k, v);
        }
    }
}

impl Mutability for MutableMap {
    type Frozen = Map;
    type Thawed = MutableMap;

    fn is_frozen(&self) -> bool {
        false
    }

    fn frozen_copy(&self) -> Map {
        self.clone().freeze()
    }

    fn thawed_copy(&self) -> MutableMap {
        self.clone()
    }
}
