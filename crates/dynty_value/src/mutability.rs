//! The frozen/mutable duality shared by every collection kind.
//!
//! Each collection exists as two distinct types: a frozen one (`Array`,
//! `Map`, `StructMap`) that is `Arc`-shared, deeply immutable and safe to
//! read from any thread, and a mutable one (`MutableArray`, `MutableMap`,
//! `MutableStructMap`) that is exclusively owned and mutated in place. The
//! frozen types have no mutating methods at all, so a write to a frozen
//! collection is rejected by the compiler.
//!
//! Elements of both forms are [`Value`](crate::Value)s, which are always
//! frozen. Freezing a mutable collection is therefore transitively deep.

/// Conversions between the frozen and the mutable form of a collection.
pub trait Mutability {
    /// The frozen form.
    type Frozen;
    /// The mutable form.
    type Thawed;

    /// Whether `self` is the frozen form.
    fn is_frozen(&self) -> bool;

    /// A frozen equivalent of `self`.
    ///
    /// When `self` is already frozen the result shares its storage, so
    /// freezing is idempotent and never fails.
    fn frozen_copy(&self) -> Self::Frozen;

    /// An independently mutable copy of `self`.
    fn thawed_copy(&self) -> Self::Thawed;
}
