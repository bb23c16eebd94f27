//! Dynamic types and immutable values.
//!
//! This crate gathers the workspace behind one dependency:
//!
//! - values and the type algebra ([`Value`], [`Type`], [`Map`], ...)
//! - the type expression parser ([`parse`], [`parse_with`])
//! - the token stream behind the parser ([`tokenize`])
//!
//! ```text
//! let t = dynty::parse("map[string](int|string)")?;
//! assert!(t.instance(&value));
//! ```
//!
//! The `dynty` binary exposes the same operations on the command line; see
//! [`commands`].

pub mod commands;
mod error;

use std::sync::Once;

pub use error::Error;

pub use dynty_lexer::{tokenize, LexError, LexErrorKind, Span, Token, TokenKind};
pub use dynty_parse::{parse, parse_with, ParseError, ParseErrorKind, Parser, ParserConfig};
pub use dynty_value::Error as ValueError;
pub use dynty_value::{
    Alias, AliasAdder, AliasMap, AliasRegistry, AllOf, AnyOf, Array, ArrayType, BigDecimal,
    BigInt, Binary, Float, FloatRange, Integer, IntegerRange, Map, MapIter, MapType, Mutability,
    MutableArray, MutableMap, MutableStructMap, Native, Not, OneOf, Record, Regexp, SizeRange,
    StructEntry, StructMap, StructType, Timestamp, TupleType, Type, TypeFormatter, TypeTag, Value,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber printing to stderr.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=dynty_value=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
