//! 32-bit structural hash codes.
//!
//! Sequence-like values fold their parts with `h = h * 31 + part`. Set-like
//! values (map entries, logical operands, struct entries) sort the part
//! hashes first so the result does not depend on insertion order.

use smallvec::SmallVec;

const MULTIPLIER: u32 = 31;

/// Fold one more part into a running hash.
#[inline]
pub(crate) fn combine(h: u32, part: u32) -> u32 {
    h.wrapping_mul(MULTIPLIER).wrapping_add(part)
}

/// Hash a sequence of parts in order.
pub(crate) fn ordered(seed: u32, parts: impl IntoIterator<Item = u32>) -> u32 {
    parts.into_iter().fold(seed, combine)
}

/// Hash a set of parts independently of their order.
pub(crate) fn unordered(seed: u32, parts: impl IntoIterator<Item = u32>) -> u32 {
    let mut sorted: SmallVec<[u32; 8]> = parts.into_iter().collect();
    sorted.sort_unstable();
    ordered(seed, sorted)
}

pub(crate) fn hash_bytes(bytes: &[u8]) -> u32 {
    ordered(0, bytes.iter().map(|&b| u32::from(b)))
}

pub(crate) fn hash_str(s: &str) -> u32 {
    hash_bytes(s.as_bytes())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "folding the high word into the low word is the point"
)]
pub(crate) fn hash_u64(v: u64) -> u32 {
    (v ^ (v >> 32)) as u32
}
