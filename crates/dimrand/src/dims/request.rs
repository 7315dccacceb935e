//! Typed request for the paired-dimension sampler.
//!
//! - `AxisSpec`: per-axis range, divisors, exclusions and randomize toggle.
//! - `AspectConfig`: present only when aspect-ratio maintenance is on.
//! - `GaussianConfig`: present only for Gaussian sampling; absent means uniform.
//! - `CrossConstraint`: joint width/height caps.

use crate::distribution::SamplingMode;
use crate::error::{Axis, SampleError};
use crate::feasible::{DivisorSet, ExclusionSet, Range};

#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    pub range: Range,
    pub divisors: DivisorSet,
    pub exclusions: ExclusionSet,
    /// When false the axis uses its default value instead of sampling.
    pub randomize: bool,
}

impl AxisSpec {
    pub fn new(range: Range, divisors: DivisorSet) -> Self {
        Self {
            range,
            divisors,
            exclusions: ExclusionSet::default(),
            randomize: true,
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.randomize = false;
        self
    }
}

/// Axis sampled first when maintaining an aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    #[default]
    Width,
    Height,
}

impl Basis {
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Basis::Width => Axis::Width,
            Basis::Height => Axis::Height,
        }
    }
}

/// Target aspect ratio (width / height) derived from a basis axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectConfig {
    pub ratio: f64,
    pub basis: Basis,
    /// Allowed deviation from `ratio` in percent; `None` skips the deviation step.
    pub max_deviation_percent: Option<f64>,
}

impl AspectConfig {
    /// Dependent-axis value implied by `basis_value`, before rounding.
    #[inline]
    pub fn dependent_of(&self, basis_value: i64) -> f64 {
        match self.basis {
            Basis::Width => basis_value as f64 / self.ratio,
            Basis::Height => basis_value as f64 * self.ratio,
        }
    }
}

/// Mean and standard deviation for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gaussian {
    pub mean: i64,
    pub std_dev: i64,
}

impl Gaussian {
    #[inline]
    pub fn mode(self) -> SamplingMode {
        SamplingMode::Gaussian {
            mean: self.mean as f64,
            std_dev: self.std_dev as f64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaussianConfig {
    pub width: Gaussian,
    pub height: Gaussian,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrossConstraint {
    /// Upper bound on `width * height`.
    pub max_total_pixels: Option<u64>,
    /// Upper bound on `max(w, h) / min(w, h)`.
    pub max_aspect_any_direction: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DimensionRequest {
    pub width: AxisSpec,
    pub height: AxisSpec,
    pub aspect: Option<AspectConfig>,
    pub gaussian: Option<GaussianConfig>,
    pub cross: CrossConstraint,
}

impl DimensionRequest {
    /// Uniform sampling, no aspect maintenance, no cross constraints.
    pub fn new(width: AxisSpec, height: AxisSpec) -> Self {
        Self {
            width,
            height,
            aspect: None,
            gaussian: None,
            cross: CrossConstraint::default(),
        }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::Width => &self.width,
            Axis::Height => &self.height,
        }
    }

    #[inline]
    pub fn mode(&self, axis: Axis) -> SamplingMode {
        match (&self.gaussian, axis) {
            (None, _) => SamplingMode::Uniform,
            (Some(g), Axis::Width) => g.width.mode(),
            (Some(g), Axis::Height) => g.height.mode(),
        }
    }

    /// Pre-flight checks. Failures here are returned to the caller, never recovered.
    pub fn validate(&self) -> Result<(), SampleError> {
        if let Some(aspect) = &self.aspect {
            if !(aspect.ratio.is_finite() && aspect.ratio > 0.0) {
                return Err(SampleError::invalid_config(
                    "aspect ratio must be a positive number",
                ));
            }
            if aspect.max_deviation_percent.is_some_and(f64::is_nan) {
                return Err(SampleError::invalid_config(
                    "max aspect ratio deviation must be a number",
                ));
            }
        }
        if let Some(cap) = self.cross.max_aspect_any_direction {
            if cap.is_nan() || cap <= 0.0 {
                return Err(SampleError::invalid_config(
                    "max aspect ratio in any direction must be positive",
                ));
            }
        }
        Ok(())
    }
}
