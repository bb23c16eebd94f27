//! Bounds of range- and size-constrained types.

use std::cmp::Ordering;

use crate::hash::{combine, hash_u64};
use crate::{Error, Float, Integer};

/// Inclusive bounds on a length (string chars, binary bytes, collection
/// entries). `usize::MAX` as the maximum means unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizeRange {
    min: usize,
    max: usize,
}

impl SizeRange {
    pub const UNBOUNDED: SizeRange = SizeRange {
        min: 0,
        max: usize::MAX,
    };

    /// Bounds `min..=max`, swapped when given in the wrong order.
    pub fn new(min: usize, max: usize) -> Self {
        if min > max {
            SizeRange { min: max, max: min }
        } else {
            SizeRange { min, max }
        }
    }

    pub fn exact(len: usize) -> Self {
        SizeRange { min: len, max: len }
    }

    /// At least `min`, no upper bound.
    pub fn at_least(min: usize) -> Self {
        SizeRange {
            min,
            max: usize::MAX,
        }
    }

    pub fn min(self) -> usize {
        self.min
    }

    pub fn max(self) -> usize {
        self.max
    }

    pub fn is_unbounded(self) -> bool {
        self == SizeRange::UNBOUNDED
    }

    pub fn contains(self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }

    /// Whether every length in `other` is in `self`.
    pub fn contains_range(self, other: SizeRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub fn overlaps(self, other: SizeRange) -> bool {
        self.min.max(other.min) <= self.max.min(other.max)
    }

    pub fn hash_code(self) -> u32 {
        combine(hash_u64(self.min as u64), hash_u64(self.max as u64))
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        SizeRange::UNBOUNDED
    }
}

/// Inclusive integer bounds, either side optionally open.
///
/// Exclusive ranges are normalized on construction (`1...10` is `1..9`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntegerRange {
    min: Option<Integer>,
    max: Option<Integer>,
}

impl IntegerRange {
    pub const UNBOUNDED: IntegerRange = IntegerRange {
        min: None,
        max: None,
    };

    pub fn new(min: Option<Integer>, max: Option<Integer>, inclusive: bool) -> Result<Self, Error> {
        let (min, max) = match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            bounds => bounds,
        };
        let max = match max {
            Some(hi) if !inclusive => {
                if min.as_ref() == Some(&hi) {
                    return Err(Error::InvalidRange {
                        reason: format!("exclusive range {hi}...{hi} is empty"),
                    });
                }
                Some(hi.pred())
            }
            max => max,
        };
        Ok(IntegerRange { min, max })
    }

    pub fn min(&self) -> Option<&Integer> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Integer> {
        self.max.as_ref()
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// The single member, when `min == max`.
    pub fn single(&self) -> Option<&Integer> {
        match (&self.min, &self.max) {
            (Some(lo), Some(hi)) if lo == hi => Some(lo),
            _ => None,
        }
    }

    pub fn contains(&self, v: &Integer) -> bool {
        self.min.as_ref().map_or(true, |lo| lo <= v) && self.max.as_ref().map_or(true, |hi| v <= hi)
    }

    pub fn contains_range(&self, other: &IntegerRange) -> bool {
        let lower = match (&self.min, &other.min) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(lo), Some(olo)) => lo <= olo,
        };
        let upper = match (&self.max, &other.max) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(hi), Some(ohi)) => ohi <= hi,
        };
        lower && upper
    }

    pub fn overlaps(&self, other: &IntegerRange) -> bool {
        let lower = self.min.as_ref().max(other.min.as_ref());
        let upper = match (&self.max, &other.max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        match (lower, upper) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        }
    }

    pub fn hash_code(&self) -> u32 {
        combine(
            self.min.as_ref().map_or(0, Integer::hash_code),
            self.max.as_ref().map_or(0, Integer::hash_code),
        )
    }
}

/// Float bounds with an inclusive or exclusive maximum, either side
/// optionally open.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FloatRange {
    min: Option<Float>,
    max: Option<Float>,
    inclusive: bool,
}

impl FloatRange {
    pub const UNBOUNDED: FloatRange = FloatRange {
        min: None,
        max: None,
        inclusive: true,
    };

    pub fn new(min: Option<Float>, max: Option<Float>, inclusive: bool) -> Result<Self, Error> {
        if min.as_ref().is_some_and(Float::is_nan) || max.as_ref().is_some_and(Float::is_nan) {
            return Err(Error::InvalidRange {
                reason: "NaN cannot bound a range".to_owned(),
            });
        }
        let (min, max) = match (min, max) {
            (Some(lo), Some(hi)) if lo.compare(&hi) == Some(Ordering::Greater) => (Some(hi), Some(lo)),
            bounds => bounds,
        };
        if !inclusive {
            if let (Some(lo), Some(hi)) = (&min, &max) {
                if lo == hi {
                    return Err(Error::InvalidRange {
                        reason: format!("exclusive range {lo}...{hi} is empty"),
                    });
                }
            }
        }
        // An open maximum has nothing to exclude.
        let inclusive = inclusive || max.is_none();
        Ok(FloatRange { min, max, inclusive })
    }

    pub fn min(&self) -> Option<&Float> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Float> {
        self.max.as_ref()
    }

    /// Whether the maximum itself is a member.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn single(&self) -> Option<&Float> {
        match (&self.min, &self.max) {
            (Some(lo), Some(hi)) if self.inclusive && lo == hi => Some(lo),
            _ => None,
        }
    }

    pub fn contains(&self, v: &Float) -> bool {
        let above = self
            .min
            .as_ref()
            .map_or(!v.is_nan(), |lo| matches!(lo.compare(v), Some(Ordering::Less | Ordering::Equal)));
        let below = self.max.as_ref().map_or(!v.is_nan(), |hi| match v.compare(hi) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.inclusive,
            _ => false,
        });
        above && below
    }

    pub fn contains_range(&self, other: &FloatRange) -> bool {
        let lower = match (&self.min, &other.min) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(lo), Some(olo)) => matches!(lo.compare(olo), Some(Ordering::Less | Ordering::Equal)),
        };
        let upper = match (&self.max, &other.max) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(hi), Some(ohi)) => match ohi.compare(hi) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => self.inclusive || !other.inclusive,
                _ => false,
            },
        };
        lower && upper
    }

    pub fn overlaps(&self, other: &FloatRange) -> bool {
        // The range ending first decides whether the other one starts in time.
        let (first, second) = match (&self.max, &other.max) {
            (None, None) => return true,
            (Some(_), None) => (self, other),
            (None, Some(_)) => (other, self),
            (Some(a), Some(b)) => {
                if a.compare(b) == Some(Ordering::Greater) {
                    (other, self)
                } else {
                    (self, other)
                }
            }
        };
        let Some(end) = &first.max else { return true };
        match &first.min {
            Some(lo) => second.contains_from(lo, end, first.inclusive),
            None => second.contains_from_open(end, first.inclusive),
        }
    }

    /// Whether `self` has a member in `lo..hi` (or `lo..=hi`).
    fn contains_from(&self, lo: &Float, hi: &Float, inclusive: bool) -> bool {
        let start = match &self.min {
            Some(m) if m.compare(lo) == Some(Ordering::Greater) => m,
            _ => lo,
        };
        match start.compare(hi) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => inclusive && self.contains(start),
            _ => false,
        }
    }

    fn contains_from_open(&self, hi: &Float, inclusive: bool) -> bool {
        match &self.min {
            None => true,
            Some(m) => match m.compare(hi) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => inclusive,
                _ => false,
            },
        }
    }

    pub fn hash_code(&self) -> u32 {
        combine(
            combine(
                self.min.as_ref().map_or(0, Float::hash_code),
                self.max.as_ref().map_or(0, Float::hash_code),
            ),
            u32::from(self.inclusive),
        )
    }
}

#[cfg(test)]
mod tests;
