//! Binary, regular expression, timestamp and native payloads.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::hash::{combine, hash_bytes, hash_str, hash_u64};
use crate::Error;

/// An immutable byte blob.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Binary(Arc<[u8]>);

impl Binary {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Binary(bytes.into())
    }

    /// Decode a hexadecimal string (either case, even length).
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let bytes = text.as_bytes();
        if bytes.len() % 2 != 0 {
            return Err(Error::illegal("binary", format!("odd length hex string {text:?}")));
        }
        bytes
            .chunks_exact(2)
            .map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(Error::illegal("binary", format!("invalid hex string {text:?}"))),
            })
            .collect::<Result<Vec<u8>, Error>>()
            .map(Binary::new)
    }

    pub fn to_hex(&self) -> String {
        use std::fmt::Write;
        let mut out = String::with_capacity(self.0.len() * 2);
        for b in self.0.iter() {
            let _ = write!(out, "{b:02x}");
        }
        out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hash_code(&self) -> u32 {
        hash_bytes(&self.0)
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl Hash for Binary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binary({})", self.to_hex())
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Vec<u8>> for Binary {
    fn from(v: Vec<u8>) -> Self {
        Binary::new(v)
    }
}

impl From<&[u8]> for Binary {
    fn from(v: &[u8]) -> Self {
        Binary::new(v)
    }
}

/// A compiled regular expression, compared by its source pattern.
#[derive(Clone, Debug)]
pub struct Regexp(Arc<Regex>);

impl Regexp {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Regex::new(pattern)
            .map(|re| Regexp(Arc::new(re)))
            .map_err(|e| Error::InvalidRegexp {
                pattern: pattern.to_owned(),
                message: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    pub fn hash_code(&self) -> u32 {
        hash_str(self.as_str())
    }
}

impl PartialEq for Regexp {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.as_str() == other.as_str()
    }
}

impl Eq for Regexp {}

impl Hash for Regexp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for Regexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in time with nanosecond precision, always in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse an RFC 3339 timestamp. Offsets are converted to UTC.
    pub fn parse(text: &str) -> Result<Self, Error> {
        DateTime::parse_from_rfc3339(text)
            .map(|t| Timestamp(t.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidTimestamp {
                text: text.to_owned(),
                message: e.to_string(),
            })
    }

    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn hash_code(&self) -> u32 {
        #[allow(clippy::cast_sign_loss, reason = "bit pattern is hashed")]
        let seconds = hash_u64(self.0.timestamp() as u64);
        combine(seconds, self.0.timestamp_subsec_nanos())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(t: DateTime<Utc>) -> Self {
        Timestamp(t)
    }
}

/// An opaque host object carried through the value model.
///
/// Natives are equal only to themselves (pointer identity).
#[derive(Clone)]
pub struct Native {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Native {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Native {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Rust type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.value).cast::<()>() as usize
    }

    pub fn hash_code(&self) -> u32 {
        hash_u64(self.address() as u64)
    }
}

impl PartialEq for Native {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Native {}

impl Hash for Native {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Native({})", self.type_name)
    }
}

#[cfg(test)]
mod tests;
