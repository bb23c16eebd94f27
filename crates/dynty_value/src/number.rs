//! Integer and float payloads.
//!
//! Both keep the common case in a machine word and fall back to an
//! arbitrary precision representation only when the value does not fit.
//! The small form is canonical: an `Integer::Big` never holds a value that
//! fits in an `i64`, so derived structural comparisons stay correct.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::hash::{combine, hash_str, hash_u64, ordered};

/// A signed integer of unlimited size.
#[derive(Clone, Debug)]
pub enum Integer {
    Small(i64),
    Big(Arc<BigInt>),
}

impl Integer {
    /// Build from an arbitrary precision integer, narrowing when possible.
    pub fn from_big(v: BigInt) -> Self {
        match i64::try_from(&v) {
            Ok(small) => Integer::Small(small),
            Err(_) => Integer::Big(Arc::new(v)),
        }
    }

    /// Parse an optionally signed decimal or `0x` hexadecimal literal.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            Some(hex) => (16, hex),
            None => (10, rest),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        if radix == 10 && !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if let Ok(small) = i64::from_str_radix(digits, radix) {
            if let Some(v) = if negative { small.checked_neg() } else { Some(small) } {
                return Some(Integer::Small(v));
            }
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
        Some(Integer::from_big(if negative { -magnitude } else { magnitude }))
    }

    /// The value as an `i64`, when it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Integer::Small(v) => Some(*v),
            Integer::Big(_) => None,
        }
    }

    pub fn to_big(&self) -> BigInt {
        match self {
            Integer::Small(v) => BigInt::from(*v),
            Integer::Big(v) => BigInt::clone(v),
        }
    }

    /// The nearest `f64`, infinite when out of range.
    #[allow(
        clippy::cast_precision_loss,
        reason = "approximation is the documented contract"
    )]
    pub fn to_f64(&self) -> f64 {
        match self {
            Integer::Small(v) => *v as f64,
            Integer::Big(v) => v.to_f64().unwrap_or(if v.sign() == Sign::Minus {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
        }
    }

    /// `self - 1`.
    pub fn pred(&self) -> Self {
        match self {
            Integer::Small(v) => match v.checked_sub(1) {
                Some(p) => Integer::Small(p),
                None => Integer::from_big(BigInt::from(*v) - 1),
            },
            Integer::Big(v) => Integer::from_big(BigInt::clone(v) - 1),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Small(v) => *v < 0,
            Integer::Big(v) => v.sign() == Sign::Minus,
        }
    }

    pub fn hash_code(&self) -> u32 {
        match self {
            #[allow(clippy::cast_sign_loss, reason = "bit pattern is hashed")]
            Integer::Small(v) => hash_u64(*v as u64),
            Integer::Big(v) => {
                let (sign, digits) = v.to_u32_digits();
                let seed = match sign {
                    Sign::Minus => 1,
                    Sign::NoSign => 0,
                    Sign::Plus => 2,
                };
                ordered(seed, digits)
            }
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Integer::Small(a), Integer::Small(b)) => a == b,
            (Integer::Big(a), Integer::Big(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Integer {}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Small(a), Integer::Small(b)) => a.cmp(b),
            (Integer::Big(a), Integer::Big(b)) => a.cmp(b),
            // A big value is always outside the i64 range.
            (Integer::Small(_), Integer::Big(b)) => {
                if b.sign() == Sign::Minus {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Integer::Big(a), Integer::Small(_)) => {
                if a.sign() == Sign::Minus {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Small(v) => write!(f, "{v}"),
            Integer::Big(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Integer::Small(v)
    }
}

impl From<i32> for Integer {
    fn from(v: i32) -> Self {
        Integer::Small(i64::from(v))
    }
}

impl From<u32> for Integer {
    fn from(v: u32) -> Self {
        Integer::Small(i64::from(v))
    }
}

impl From<u64> for Integer {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(small) => Integer::Small(small),
            Err(_) => Integer::Big(Arc::new(BigInt::from(v))),
        }
    }
}

impl From<usize> for Integer {
    fn from(v: usize) -> Self {
        Integer::from(v as u64)
    }
}

impl From<BigInt> for Integer {
    fn from(v: BigInt) -> Self {
        Integer::from_big(v)
    }
}

/// A floating point number, with an arbitrary precision decimal form for
/// literals that overflow `f64`.
///
/// Equality treats all NaNs as equal and `0.0 == -0.0`, so `Float` can be a
/// map key.
#[derive(Clone, Debug)]
pub enum Float {
    Small(f64),
    Big(Arc<BigDecimal>),
}

impl Float {
    /// Parse a float literal. The decimal form is used only when the text
    /// does not fit in a finite `f64`.
    pub fn parse(text: &str) -> Option<Self> {
        let small: f64 = text.parse().ok()?;
        if small.is_finite() {
            return Some(Float::Small(small));
        }
        BigDecimal::from_str(text)
            .ok()
            .map(|big| Float::Big(Arc::new(big)))
    }

    pub fn from_big(v: BigDecimal) -> Self {
        Float::Big(Arc::new(v))
    }

    /// The nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        match self {
            Float::Small(v) => *v,
            Float::Big(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn to_big(&self) -> Option<BigDecimal> {
        match self {
            Float::Small(v) => BigDecimal::from_f64(*v),
            Float::Big(v) => Some(BigDecimal::clone(v)),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Float::Small(v) if v.is_nan())
    }

    /// Numeric comparison. `None` when either side is NaN.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Float::Small(a), Float::Small(b)) => a.partial_cmp(b),
            _ => match (self.to_big(), other.to_big()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                // Only a non-finite `Small` has no decimal form, and every
                // decimal is finite.
                (None, Some(_)) => beyond_decimals(self),
                (Some(_), None) => beyond_decimals(other).map(Ordering::reverse),
                (None, None) => self.to_f64().partial_cmp(&other.to_f64()),
            },
        }
    }

    pub fn hash_code(&self) -> u32 {
        match self {
            Float::Small(v) => small_float_hash(*v),
            Float::Big(v) => match v.to_f64() {
                Some(f) if BigDecimal::from_f64(f).as_ref() == Some(&**v) => small_float_hash(f),
                _ => combine(1, hash_str(&v.normalized().to_string())),
            },
        }
    }
}

/// Ordering of an infinity against any finite decimal.
fn beyond_decimals(v: &Float) -> Option<Ordering> {
    let f = v.to_f64();
    if f.is_nan() {
        None
    } else if f > 0.0 {
        Some(Ordering::Greater)
    } else {
        Some(Ordering::Less)
    }
}

fn small_float_hash(v: f64) -> u32 {
    let canonical = if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    };
    hash_u64(canonical.to_bits())
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Float::Small(a), Float::Small(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `{:?}` always keeps a fraction or an exponent.
            Float::Small(v) => write!(f, "{v:?}"),
            Float::Big(v) => {
                let text = v.to_string();
                if text.contains(['.', 'e', 'E']) {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
        }
    }
}

impl From<f64> for Float {
    fn from(v: f64) -> Self {
        Float::Small(v)
    }
}

impl From<f32> for Float {
    fn from(v: f32) -> Self {
        Float::Small(f64::from(v))
    }
}

impl From<BigDecimal> for Float {
    fn from(v: BigDecimal) -> Self {
        Float::from_big(v)
    }
}
