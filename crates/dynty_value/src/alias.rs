//! Named types: late-bound alias slots and the alias registry.
//!
//! An [`Alias`] is a named slot that is created empty and defined once. The
//! parser hands out the slot before the right-hand side of `x = ...` is
//! parsed, which is what lets a type refer to itself. Everything else in the
//! crate sees through defined aliases.
//!
//! A recursive type holds an `Arc` cycle through its slot
//! (`x -> {next: x|nil} -> x`). Such types are never freed; they are
//! expected to live as long as the registry or parse that created them.

use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::{Error, Type};

struct AliasSlot {
    name: Arc<str>,
    target: OnceLock<Type>,
}

/// A named, late-bound reference to a type.
#[derive(Clone)]
pub struct Alias(Arc<AliasSlot>);

impl Alias {
    /// An undefined placeholder.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Alias(Arc::new(AliasSlot {
            name: name.into(),
            target: OnceLock::new(),
        }))
    }

    /// A placeholder already bound to `target`.
    pub fn defined(name: impl Into<Arc<str>>, target: Type) -> Self {
        let alias = Alias::new(name);
        // A fresh slot is always empty.
        let _ = alias.0.target.set(target);
        alias
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.0.name)
    }

    pub fn target(&self) -> Option<&Type> {
        self.0.target.get()
    }

    pub fn is_defined(&self) -> bool {
        self.0.target.get().is_some()
    }

    /// Bind the placeholder. A slot can be bound only once.
    pub fn define(&self, target: Type) -> Result<(), Error> {
        self.0.target.set(target).map_err(|_| Error::AliasDefined {
            name: self.shared_name(),
        })
    }

    pub fn ptr_eq(&self, other: &Alias) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The target may lead back here.
        f.debug_tuple("Alias").field(&self.name()).finish()
    }
}

impl From<Alias> for Type {
    fn from(a: Alias) -> Self {
        Type::Alias(a)
    }
}

/// An immutable name/type mapping.
#[derive(Clone, Debug, Default)]
pub struct AliasMap {
    by_name: FxHashMap<Arc<str>, Type>,
    by_type: FxHashMap<Type, Arc<str>>,
}

impl AliasMap {
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.by_name.get(name)
    }

    pub fn get_name(&self, t: &Type) -> Option<&str> {
        self.by_type.get(t).map(|n| &**n)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(|n| &**n)
    }

    fn insert(&mut self, name: Arc<str>, t: Type) -> Result<(), Error> {
        if let Some(existing) = self.by_name.get(&name) {
            if *existing == t {
                return Ok(());
            }
            return Err(Error::AliasConflict { name });
        }
        self.by_type.insert(t.clone(), Arc::clone(&name));
        self.by_name.insert(name, t);
        Ok(())
    }
}

/// Collects new aliases on top of a base map without touching it.
///
/// Lookups see both the collected entries and the base. Collected entries
/// are kept in a list rather than hashed because placeholder types change
/// their hash once defined.
pub struct AliasAdder<'a> {
    base: &'a AliasMap,
    added: Vec<(Arc<str>, Type)>,
}

impl<'a> AliasAdder<'a> {
    pub fn new(base: &'a AliasMap) -> Self {
        AliasAdder {
            base,
            added: Vec::new(),
        }
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.added
            .iter()
            .rev()
            .find(|(n, _)| &**n == name)
            .map(|(_, t)| t)
            .or_else(|| self.base.get_type(name))
    }

    pub fn get_name(&self, t: &Type) -> Option<&str> {
        self.added
            .iter()
            .find(|(_, added)| added == t)
            .map(|(n, _)| &**n)
            .or_else(|| self.base.get_name(t))
    }

    /// Register `name`. Re-adding an equal type is a no-op.
    pub fn add(&mut self, name: impl Into<Arc<str>>, t: Type) -> Result<(), Error> {
        let name = name.into();
        if let Some(existing) = self.get_type(&name) {
            if *existing == t {
                return Ok(());
            }
            return Err(Error::AliasConflict { name });
        }
        self.added.push((name, t));
        Ok(())
    }

    /// Swap the type collected under `name`. Returns `false` when `name` was
    /// not collected by this adder.
    pub fn replace(&mut self, name: &str, t: Type) -> bool {
        match self.added.iter_mut().find(|(n, _)| &**n == name) {
            Some(entry) => {
                entry.1 = t;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    fn into_added(self) -> Vec<(Arc<str>, Type)> {
        self.added
    }
}

/// A shared, copy-on-write alias registry.
///
/// Readers take a snapshot (`Arc<AliasMap>`) and never block writers or see
/// a half-applied update. Writers collect entries in an [`AliasAdder`]
/// against a snapshot, then merge them into the latest map under a lock and
/// publish the result by swapping the `Arc`.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    current: RwLock<Arc<AliasMap>>,
    merge_lock: Mutex<()>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        AliasRegistry::default()
    }

    pub fn snapshot(&self) -> Arc<AliasMap> {
        Arc::clone(&self.current.read())
    }

    /// Let `populate` collect aliases, then publish them.
    ///
    /// Nothing is published when `populate` fails or adds nothing. A name
    /// that another writer bound to a different type in the meantime fails
    /// the merge with [`Error::AliasConflict`].
    pub fn extend<R, E>(&self, populate: impl FnOnce(&mut AliasAdder<'_>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<Error>,
    {
        let snapshot = self.snapshot();
        let mut adder = AliasAdder::new(&snapshot);
        let result = populate(&mut adder)?;
        if adder.is_empty() {
            return Ok(result);
        }
        let added = adder.into_added();

        let _merging = self.merge_lock.lock();
        let latest = self.snapshot();
        let mut next = AliasMap::clone(&latest);
        for (name, t) in added {
            next.insert(name, t)?;
        }
        tracing::debug!(aliases = next.len(), "alias registry updated");
        *self.current.write() = Arc::new(next);
        Ok(result)
    }
}
