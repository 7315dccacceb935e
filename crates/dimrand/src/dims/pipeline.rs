//! Paired-dimension orchestration.
//!
//! Stages run in a fixed order: validate, build feasible sets, generate base, area cap,
//! deviation, any-direction cap, final check. Any failure after validation drops into a
//! single fallback that snaps the best partial values (or the axis defaults) back onto the
//! feasible sets.

use super::request::{AxisSpec, DimensionRequest};
use crate::distribution::{self, round_to_i64, trunc_to_i64};
use crate::error::{Axis, SampleError};
use crate::feasible::FeasibleSet;
use crate::source::RandomSource;
use tracing::{debug, warn};

/// Result pair, serialized with the host's output names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    #[serde(rename = "Width")]
    pub width: i64,
    #[serde(rename = "Height")]
    pub height: i64,
}

impl Dimensions {
    #[inline]
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> i64 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    #[inline]
    fn set(&mut self, axis: Axis, v: i64) {
        match axis {
            Axis::Width => self.width = v,
            Axis::Height => self.height = v,
        }
    }

    /// `width * height`, widened so large dimensions cannot overflow.
    #[inline]
    pub fn area(&self) -> i128 {
        self.width as i128 * self.height as i128
    }

    /// `width / height`; infinite when the height is zero.
    #[inline]
    pub fn ratio(&self) -> f64 {
        if self.height == 0 {
            f64::INFINITY
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

/// Sampled dimensions plus the failure that forced a fallback, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionOutcome {
    pub dims: Dimensions,
    pub fallback: Option<SampleError>,
}

impl DimensionOutcome {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.fallback.is_none()
    }
}

/// Feasible set and default value of one axis.
#[derive(Clone, Debug)]
pub struct AxisPlan<'a> {
    pub spec: &'a AxisSpec,
    pub feasible: FeasibleSet,
    pub default: i64,
}

impl<'a> AxisPlan<'a> {
    pub fn new(spec: &'a AxisSpec) -> Self {
        let feasible = FeasibleSet::build(spec.range, &spec.divisors, &spec.exclusions);
        let min = spec.range.min();
        let default = if feasible.contains(min) {
            min
        } else {
            feasible.first().unwrap_or(min)
        };
        Self {
            spec,
            feasible,
            default,
        }
    }

    #[inline]
    fn snap(&self, v: i64) -> Option<i64> {
        self.feasible.nearest(v)
    }

    #[inline]
    fn snap_or_default(&self, v: i64) -> i64 {
        self.snap(v).unwrap_or(self.default)
    }
}

/// Sample a (width, height) pair for `req`.
///
/// Returns `Err` only for pre-flight validation failures. Everything later degrades to a
/// best-effort pair, reported through [`DimensionOutcome::fallback`].
pub fn sample_dimensions<R: RandomSource + ?Sized>(
    req: &DimensionRequest,
    rng: &mut R,
) -> Result<DimensionOutcome, SampleError> {
    req.validate()?;
    let mut pipeline = Pipeline::new(req);
    let outcome = match pipeline.resolve(rng) {
        Ok(dims) => DimensionOutcome {
            dims,
            fallback: None,
        },
        Err(err) => {
            debug_assert!(err.is_recoverable(), "{err}");
            warn!(
                error = %err,
                width = ?pipeline.width,
                height = ?pipeline.height,
                "using default dimensions"
            );
            DimensionOutcome {
                dims: pipeline.fallback(),
                fallback: Some(err),
            }
        }
    };
    Ok(outcome)
}

struct Pipeline<'a> {
    req: &'a DimensionRequest,
    plans: [AxisPlan<'a>; 2],
    // Best values so far; read by the fallback.
    width: Option<i64>,
    height: Option<i64>,
}

impl<'a> Pipeline<'a> {
    fn new(req: &'a DimensionRequest) -> Self {
        Self {
            req,
            plans: [AxisPlan::new(&req.width), AxisPlan::new(&req.height)],
            width: None,
            height: None,
        }
    }

    #[inline]
    fn plan(&self, axis: Axis) -> &AxisPlan<'a> {
        match axis {
            Axis::Width => &self.plans[0],
            Axis::Height => &self.plans[1],
        }
    }

    fn record(&mut self, axis: Axis, v: i64) {
        match axis {
            Axis::Width => self.width = Some(v),
            Axis::Height => self.height = Some(v),
        }
    }

    fn resolve<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Dimensions, SampleError> {
        let dims = self.generate_base(rng)?;
        let dims = self.apply_area_cap(dims);
        let dims = self.apply_deviation(dims);
        let dims = self.apply_any_direction_cap(dims);
        self.record(Axis::Width, dims.width);
        self.record(Axis::Height, dims.height);
        self.final_check(dims)?;
        Ok(dims)
    }

    /// Sampled value when the axis is randomized, its default otherwise.
    fn draw<R: RandomSource + ?Sized>(&self, axis: Axis, rng: &mut R) -> i64 {
        let plan = self.plan(axis);
        if !plan.spec.randomize {
            return plan.default;
        }
        distribution::sample(self.req.mode(axis), &plan.feasible, plan.spec.range, rng)
            .unwrap_or(plan.default)
    }

    fn generate_base<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Dimensions, SampleError> {
        let Some(aspect) = self.req.aspect else {
            let width = self.draw(Axis::Width, rng);
            self.record(Axis::Width, width);
            let height = self.draw(Axis::Height, rng);
            self.record(Axis::Height, height);
            return Ok(Dimensions::new(width, height));
        };

        let basis = aspect.basis.axis();
        let dependent = basis.other();
        let basis_value = self.draw(basis, rng);
        self.record(basis, basis_value);

        let dependent_plan = self.plan(dependent);
        let dependent_value = dependent_plan
            .snap(round_to_i64(aspect.dependent_of(basis_value)))
            .ok_or(SampleError::NoFeasibleDependent { axis: dependent })?;
        self.record(dependent, dependent_value);

        let mut dims = Dimensions::new(0, 0);
        dims.set(basis, basis_value);
        dims.set(dependent, dependent_value);
        for axis in [Axis::Width, Axis::Height] {
            let range = self.plan(axis).spec.range;
            let value = dims.get(axis);
            if !range.contains(value) {
                return Err(SampleError::OutOfBounds {
                    axis,
                    value,
                    min: range.min(),
                    max: range.max(),
                });
            }
        }
        Ok(dims)
    }

    fn apply_area_cap(&self, dims: Dimensions) -> Dimensions {
        let Some(cap) = self.req.cross.max_total_pixels.filter(|&c| c > 0) else {
            return dims;
        };
        let area = dims.area();
        if area <= cap as i128 {
            return dims;
        }
        let scale = (cap as f64 / area as f64).sqrt();
        let scaled = Dimensions::new(
            self.plan(Axis::Width)
                .snap_or_default(trunc_to_i64(dims.width as f64 * scale)),
            self.plan(Axis::Height)
                .snap_or_default(trunc_to_i64(dims.height as f64 * scale)),
        );
        debug!(?dims, ?scaled, cap, "area cap applied");
        scaled
    }

    fn apply_deviation(&self, mut dims: Dimensions) -> Dimensions {
        let Some(aspect) = self.req.aspect else {
            return dims;
        };
        let Some(max_deviation) = aspect.max_deviation_percent else {
            return dims;
        };
        let deviation = ((dims.ratio() - aspect.ratio) / aspect.ratio).abs() * 100.0;
        if deviation <= max_deviation {
            return dims;
        }
        let basis = aspect.basis.axis();
        let dependent = basis.other();
        let target = round_to_i64(aspect.dependent_of(dims.get(basis)));
        if let Some(v) = self.plan(dependent).snap(target) {
            debug!(?dims, %dependent, value = v, deviation, "aspect deviation corrected");
            dims.set(dependent, v);
        }
        dims
    }

    fn apply_any_direction_cap(&self, mut dims: Dimensions) -> Dimensions {
        let Some(cap) = self.req.cross.max_aspect_any_direction else {
            return dims;
        };
        let (larger, smaller) = if dims.width >= dims.height {
            (Axis::Width, Axis::Height)
        } else {
            (Axis::Height, Axis::Width)
        };
        let small = dims.get(smaller);
        let ratio = if small == 0 {
            f64::INFINITY
        } else {
            dims.get(larger) as f64 / small as f64
        };
        if ratio <= cap {
            return dims;
        }
        let plan = self.plan(larger);
        let target = small as f64 * cap;
        let adjusted = plan
            .snap(round_to_i64(target))
            .filter(|&v| plan.spec.range.contains(v))
            .or_else(|| plan.snap(trunc_to_i64(target)));
        if let Some(v) = adjusted {
            debug!(?dims, axis = %larger, value = v, ratio, cap, "aspect cap applied");
            dims.set(larger, v);
        }
        dims
    }

    fn final_check(&self, dims: Dimensions) -> Result<(), SampleError> {
        for axis in [Axis::Width, Axis::Height] {
            let value = dims.get(axis);
            if !self.plan(axis).feasible.contains(value) {
                return Err(SampleError::unsatisfied(format!(
                    "{axis} {value} is not a valid value"
                )));
            }
        }
        if let Some(cap) = self.req.cross.max_total_pixels.filter(|&c| c > 0) {
            if dims.area() > cap as i128 {
                return Err(SampleError::unsatisfied(format!(
                    "{}x{} exceeds {cap} pixels",
                    dims.width, dims.height
                )));
            }
        }
        Ok(())
    }

    /// Snap the best partial values (or the defaults) onto the feasible sets.
    ///
    /// An axis with an empty feasible set returns its raw default, which may violate that
    /// axis's divisor constraint.
    fn fallback(&self) -> Dimensions {
        let pick = |axis: Axis, partial: Option<i64>| {
            let plan = self.plan(axis);
            plan.snap_or_default(partial.unwrap_or(plan.default))
        };
        Dimensions::new(
            pick(Axis::Width, self.width),
            pick(Axis::Height, self.height),
        )
    }
}
