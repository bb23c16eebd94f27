//! Errors raised by value and type construction, coercion and aliasing.

use std::sync::Arc;

use crate::{Type, Value};

/// Failure while building or converting a value or a type.
///
/// Every variant is raised at the point of detection and returned to the
/// immediate caller. Nothing in this crate retries or repairs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A range could not be built from the given bounds.
    #[error("invalid range: {reason}")]
    InvalidRange { reason: String },

    /// A factory received an argument it cannot use.
    #[error("illegal argument to {factory}: {detail}")]
    IllegalArgument {
        factory: &'static str,
        detail: String,
    },

    /// A value does not satisfy the type it was coerced into.
    #[error("the value {actual} cannot be assigned to a variable of type {expected}")]
    NotAssignable { expected: Type, actual: Value },

    /// A named reference never received a definition.
    #[error("reference to unresolved alias `{name}`")]
    UnresolvedAlias { name: Arc<str> },

    /// A name is already bound to a different type in the registry.
    #[error("alias `{name}` is already bound to a different type")]
    AliasConflict { name: Arc<str> },

    /// An alias slot was defined twice.
    #[error("alias `{name}` is already defined")]
    AliasDefined { name: Arc<str> },

    /// A record view was asked for a field it does not have.
    #[error("{record} has no field named `{field}`")]
    UnknownField { record: String, field: String },

    /// Positional access outside of a collection.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A key/value sequence with a dangling key.
    #[error("cannot build a map from an odd number of elements ({len})")]
    OddPairCount { len: usize },

    /// The pattern of a regular expression does not compile.
    #[error("invalid regular expression `{pattern}`: {message}")]
    InvalidRegexp { pattern: String, message: String },

    /// The text of a timestamp is not RFC 3339.
    #[error("invalid timestamp `{text}`: {message}")]
    InvalidTimestamp { text: String, message: String },

    /// The value cannot be expressed in an external data format.
    #[error("{what} has no JSON representation")]
    NotRepresentable { what: String },
}

impl Error {
    /// Shorthand for [`Error::IllegalArgument`].
    #[cold]
    pub(crate) fn illegal(factory: &'static str, detail: impl Into<String>) -> Self {
        Error::IllegalArgument {
            factory,
            detail: detail.into(),
        }
    }

    /// Shorthand for [`Error::NotAssignable`].
    #[cold]
    pub(crate) fn not_assignable(expected: &Type, actual: Value) -> Self {
        Error::NotAssignable {
            expected: expected.clone(),
            actual,
        }
    }
}
