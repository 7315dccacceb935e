//! Feasible sets: the integers of a range that survive divisor and exclusion filters.
//!
//! Model
//! - A value `v` is feasible when `min <= v <= max`, `v` is a multiple of at least one
//!   divisor, and `v` is not excluded.
//! - Multiples of `d` and `-d` coincide, so only the divisor's magnitude matters here.
//!   The single-value sampler is stricter and rejects non-positive divisors up front.
//! - Alignment uses `i128` so ceiling/floor steps near the `i64` limits cannot overflow.

use crate::error::SampleError;
use std::collections::BTreeSet;

/// Inclusive integer range with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    min: i64,
    max: i64,
}

impl Range {
    pub fn new(min: i64, max: i64) -> Result<Self, SampleError> {
        if min > max {
            return Err(SampleError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    #[inline]
    pub fn contains(&self, v: i64) -> bool {
        self.min <= v && v <= self.max
    }

    #[inline]
    pub fn clamp(&self, v: i64) -> i64 {
        v.clamp(self.min, self.max)
    }
}

/// Non-empty list of non-zero divisors, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivisorSet(Vec<i64>);

impl DivisorSet {
    pub fn new(divisors: Vec<i64>) -> Result<Self, SampleError> {
        if divisors.is_empty() {
            return Err(SampleError::invalid_config("no valid divisors provided"));
        }
        if divisors.contains(&0) {
            return Err(SampleError::invalid_config("divisors cannot be zero"));
        }
        Ok(Self(divisors))
    }

    pub fn single(divisor: i64) -> Result<Self, SampleError> {
        Self::new(vec![divisor])
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

/// Values removed from a feasible set. May be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<i64>);

impl ExclusionSet {
    #[inline]
    pub fn contains(&self, v: i64) -> bool {
        self.0.contains(&v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Smallest multiple of `step` (> 0) that is `>= v`.
#[inline]
pub(crate) fn align_up(v: i64, step: i128) -> i128 {
    let v = v as i128;
    let rem = v.rem_euclid(step);
    if rem == 0 {
        v
    } else {
        v + (step - rem)
    }
}

/// Largest multiple of `step` (> 0) that is `<= v`.
#[inline]
pub(crate) fn align_down(v: i64, step: i128) -> i128 {
    let v = v as i128;
    v - v.rem_euclid(step)
}

/// Sorted, deduplicated feasible values of one axis. Immutable after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeasibleSet {
    values: Vec<i64>,
}

impl FeasibleSet {
    /// Union of the multiples of each divisor inside `range`, minus `exclusions`.
    ///
    /// An empty result is returned as-is; callers decide what "no feasible value" means.
    pub fn build(range: Range, divisors: &DivisorSet, exclusions: &ExclusionSet) -> Self {
        let mut valid = BTreeSet::new();
        let hi = range.max() as i128;
        for &d in divisors.as_slice() {
            let step = (d as i128).abs();
            let mut v = align_up(range.min(), step);
            while v <= hi {
                // v lies in [min, max], so the narrowing cast is exact.
                let candidate = v as i64;
                if !exclusions.contains(candidate) && range.contains(candidate) {
                    valid.insert(candidate);
                }
                v += step;
            }
        }
        Self {
            values: valid.into_iter().collect(),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<i64> {
        self.values.first().copied()
    }

    #[inline]
    pub fn contains(&self, v: i64) -> bool {
        self.values.binary_search(&v).is_ok()
    }

    #[inline]
    pub fn nearest(&self, target: i64) -> Option<i64> {
        nearest(target, &self.values)
    }
}

/// Candidate closest to `target` in an ascending slice; `None` if empty.
///
/// Ties resolve to the lower candidate.
pub fn nearest(target: i64, candidates: &[i64]) -> Option<i64> {
    let i = candidates.partition_point(|&c| c < target);
    let above = candidates.get(i).copied();
    let below = i.checked_sub(1).map(|j| candidates[j]);
    match (below, above) {
        (Some(b), Some(a)) => {
            let db = target as i128 - b as i128;
            let da = a as i128 - target as i128;
            Some(if da < db { a } else { b })
        }
        (Some(b), None) => Some(b),
        (None, a) => a,
    }
}
