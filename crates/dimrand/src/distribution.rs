//! Drawing one value from a feasible set under a sampling mode.
//!
//! Gaussian draws use rejection-with-clamp-and-snap: a normal sample is truncated to an
//! integer, clamped into the axis range and snapped to the nearest feasible member. For a
//! non-empty set the first attempt always snaps, so the attempt bound and the
//! nearest-to-mean fallback only come into play when the bound is zero.

use crate::cfg::MAX_GAUSSIAN_ATTEMPTS;
use crate::feasible::{FeasibleSet, Range};
use crate::source::RandomSource;

/// How a value is drawn from a feasible set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplingMode {
    Uniform,
    Gaussian { mean: f64, std_dev: f64 },
}

/// Draw from `set` under `mode`; `None` iff `set` is empty.
pub fn sample<R: RandomSource + ?Sized>(
    mode: SamplingMode,
    set: &FeasibleSet,
    range: Range,
    rng: &mut R,
) -> Option<i64> {
    match mode {
        SamplingMode::Uniform => sample_uniform(set, rng),
        SamplingMode::Gaussian { mean, std_dev } => {
            sample_gaussian(mean, std_dev, set, range, MAX_GAUSSIAN_ATTEMPTS, rng)
        }
    }
}

pub fn sample_uniform<R: RandomSource + ?Sized>(set: &FeasibleSet, rng: &mut R) -> Option<i64> {
    let last = set.len().checked_sub(1)?;
    let index = rng.up_to(last as u64) as usize;
    set.as_slice().get(index).copied()
}

pub(crate) fn sample_gaussian<R: RandomSource + ?Sized>(
    mean: f64,
    std_dev: f64,
    set: &FeasibleSet,
    range: Range,
    attempts: u32,
    rng: &mut R,
) -> Option<i64> {
    if set.is_empty() {
        return None;
    }
    for _ in 0..attempts {
        let draw = trunc_to_i64(rng.normal(mean, std_dev));
        if let Some(v) = set.nearest(range.clamp(draw)) {
            return Some(v);
        }
    }
    set.nearest(round_to_i64(mean))
}

/// Truncate toward zero, saturating at the `i64` bounds; NaN maps to 0.
#[inline]
pub(crate) fn trunc_to_i64(x: f64) -> i64 {
    x.trunc() as i64
}

/// Round half to even, saturating at the `i64` bounds; NaN maps to 0.
#[inline]
pub(crate) fn round_to_i64(x: f64) -> i64 {
    x.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasible::{DivisorSet, ExclusionSet};
    use crate::source::{FixedSource, RngSource};

    fn multiples_of_64() -> (FeasibleSet, Range) {
        let range = Range::new(256, 1024).unwrap();
        let set = FeasibleSet::build(
            range,
            &DivisorSet::single(64).unwrap(),
            &ExclusionSet::default(),
        );
        (set, range)
    }

    #[test]
    fn empty_set_yields_none_in_every_mode() {
        let range = Range::new(7, 9).unwrap();
        let empty = FeasibleSet::build(
            range,
            &DivisorSet::single(5).unwrap(),
            &ExclusionSet::default(),
        );
        let mut rng = RngSource::seeded(1);
        assert_eq!(sample(SamplingMode::Uniform, &empty, range, &mut rng), None);
        let g = SamplingMode::Gaussian {
            mean: 8.0,
            std_dev: 1.0,
        };
        assert_eq!(sample(g, &empty, range, &mut rng), None);
        assert_eq!(sample_gaussian(8.0, 1.0, &empty, range, 0, &mut rng), None);
    }

    #[test]
    fn uniform_uses_scripted_index() {
        let (set, range) = multiples_of_64();
        let mut rng = FixedSource::picks(vec![4]);
        assert_eq!(sample(SamplingMode::Uniform, &set, range, &mut rng), Some(512));
    }

    #[test]
    fn gaussian_clamps_then_snaps() {
        let (set, range) = multiples_of_64();
        // 512 + 128 * z, truncated: 0.4 -> 563 -> 576; -10 -> clamp 256; +10 -> clamp 1024.
        let mut rng = FixedSource::normals(vec![0.4, -10.0, 10.0]);
        let mode = SamplingMode::Gaussian {
            mean: 512.0,
            std_dev: 128.0,
        };
        assert_eq!(sample(mode, &set, range, &mut rng), Some(576));
        assert_eq!(sample(mode, &set, range, &mut rng), Some(256));
        assert_eq!(sample(mode, &set, range, &mut rng), Some(1024));
    }

    #[test]
    fn gaussian_skips_excluded_gap() {
        let range = Range::new(256, 1024).unwrap();
        let set = FeasibleSet::build(
            range,
            &DivisorSet::single(64).unwrap(),
            &[512].into_iter().collect(),
        );
        let mut rng = FixedSource::normals(vec![0.0]);
        let v = sample(
            SamplingMode::Gaussian {
                mean: 512.0,
                std_dev: 0.0,
            },
            &set,
            range,
            &mut rng,
        )
        .unwrap();
        assert!(v == 448 || v == 576);
    }

    #[test]
    fn zero_attempts_fall_back_to_member_nearest_mean() {
        let (set, range) = multiples_of_64();
        let mut rng = FixedSource::normals(vec![100.0]);
        assert_eq!(
            sample_gaussian(700.0, 128.0, &set, range, 0, &mut rng),
            Some(704)
        );
    }

    #[test]
    fn gaussian_concentrates_near_mean() {
        let (set, range) = multiples_of_64();
        let mut rng = RngSource::seeded(99);
        let mode = SamplingMode::Gaussian {
            mean: 640.0,
            std_dev: 64.0,
        };
        let n = 4_000;
        let mut near = 0;
        for _ in 0..n {
            let v = sample(mode, &set, range, &mut rng).unwrap();
            assert!(set.contains(v));
            if (v - 640).abs() <= 128 {
                near += 1;
            }
        }
        // Within two standard deviations (after snapping) for the vast majority.
        assert!(near as f64 / n as f64 > 0.9);
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(trunc_to_i64(563.9), 563);
        assert_eq!(trunc_to_i64(-3.7), -3);
        assert_eq!(trunc_to_i64(f64::NAN), 0);
        assert_eq!(trunc_to_i64(1e300), i64::MAX);
        assert_eq!(round_to_i64(2.5), 2);
        assert_eq!(round_to_i64(3.5), 4);
        assert_eq!(round_to_i64(-0.6), -1);
    }
}
