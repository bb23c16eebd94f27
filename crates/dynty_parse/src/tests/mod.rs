//! Parser tests.
//!
//! - `scenarios`: parsing the documented example types and checking the
//!   values they accept
//! - `syntax`: every grammar form against a hand-built type
//! - `errors`: error kinds and locations
//! - `aliases`: declarations, forward references and the shared registry
//! - `round_trip`: rendering a parsed type and parsing it again

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod aliases;
mod scenarios;

use dynty_value::{Map, Value};

/// A frozen map with string keys.
pub(crate) fn map(pairs: &[(&str, Value)]) -> Value {
    Value::Map(
        pairs
            .iter()
            .map(|(k, v)| (Value::from(*k), v.clone()))
            .collect::<Map>(),
    )
}
