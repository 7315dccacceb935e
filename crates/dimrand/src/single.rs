//! Single-value sampler: a uniform multiple of one divisor inside `[min, max]`.
//!
//! Two strategies draw from the same candidate set with the same distribution:
//! - `ClosedForm`: count the aligned multiples and pick an index (O(1) space).
//! - `Listed`: materialize the candidates through the feasible-set builder and pick one
//!   (O(count) space).
//!
//! A fixed seed is not expected to give the same value under both strategies.

use crate::error::SampleError;
use crate::feasible::{align_down, align_up, DivisorSet, ExclusionSet, FeasibleSet, Range};
use crate::source::RandomSource;

/// How the single-value sampler enumerates its candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegerStrategy {
    #[default]
    ClosedForm,
    Listed,
}

/// Aligned multiples of a positive divisor inside a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultipleSpan {
    pub first: i64,
    pub last: i64,
    pub divisor: i64,
}

impl MultipleSpan {
    /// Validate inputs and locate the first/last multiple.
    pub fn new(min: i64, max: i64, divisor: i64) -> Result<Self, SampleError> {
        let range = Range::new(min, max)?;
        if divisor <= 0 {
            return Err(SampleError::invalid_config(format!(
                "divisor must be a positive integer, got {divisor}"
            )));
        }
        let step = divisor as i128;
        let first = align_up(range.min(), step);
        let last = align_down(range.max(), step);
        if first > last {
            return Err(SampleError::EmptyFeasibleSet { min, max, divisor });
        }
        // Both lie inside [min, max].
        Ok(Self {
            first: first as i64,
            last: last as i64,
            divisor,
        })
    }

    /// Index of the last candidate, i.e. `count - 1`. Always fits: the span covers at most
    /// 2^64 integers.
    #[inline]
    pub fn last_index(&self) -> u64 {
        ((self.last as i128 - self.first as i128) / self.divisor as i128) as u64
    }

    /// Number of candidates; at least 1.
    #[inline]
    pub fn count(&self) -> u128 {
        self.last_index() as u128 + 1
    }

    #[inline]
    pub fn nth(&self, index: u64) -> i64 {
        (self.first as i128 + index as i128 * self.divisor as i128) as i64
    }
}

/// Uniform multiple of `divisor` in `[min, max]`, closed-form.
pub fn sample_uniform_multiple<R: RandomSource + ?Sized>(
    min: i64,
    max: i64,
    divisor: i64,
    rng: &mut R,
) -> Result<i64, SampleError> {
    let span = MultipleSpan::new(min, max, divisor)?;
    let index = rng.up_to(span.last_index());
    Ok(span.nth(index))
}

/// Uniform multiple of `divisor` in `[min, max]`, choosing from the materialized list.
pub fn sample_uniform_multiple_listed<R: RandomSource + ?Sized>(
    min: i64,
    max: i64,
    divisor: i64,
    rng: &mut R,
) -> Result<i64, SampleError> {
    // Same validation and emptiness check as the closed form.
    MultipleSpan::new(min, max, divisor)?;
    let range = Range::new(min, max)?;
    let candidates = FeasibleSet::build(
        range,
        &DivisorSet::single(divisor)?,
        &ExclusionSet::default(),
    );
    let index = rng.up_to(candidates.len() as u64 - 1) as usize;
    Ok(candidates.as_slice()[index])
}

/// Dispatch on `strategy`.
pub fn sample_with<R: RandomSource + ?Sized>(
    strategy: IntegerStrategy,
    min: i64,
    max: i64,
    divisor: i64,
    rng: &mut R,
) -> Result<i64, SampleError> {
    match strategy {
        IntegerStrategy::ClosedForm => sample_uniform_multiple(min, max, divisor, rng),
        IntegerStrategy::Listed => sample_uniform_multiple_listed(min, max, divisor, rng),
    }
}
