//! Host adapter: flat node inputs in, typed outputs and a cache policy out.
//!
//! The pipeline host calls a node with widget values (ints, floats, bools, strings). This
//! module parses those once into the typed requests used by the samplers. Node
//! registration and UI metadata stay on the host side.

use crate::cfg::PIXELS_PER_MEGAPIXEL;
use crate::dims::{
    sample_dimensions, AspectConfig, AxisSpec, Basis, CrossConstraint, DimensionOutcome,
    DimensionRequest, Gaussian, GaussianConfig,
};
use crate::error::SampleError;
use crate::feasible::Range;
use crate::parse::{parse_divisors, parse_exclusions};
use crate::single::{sample_with, IntegerStrategy};
use crate::source::RandomSource;
use serde::{Deserialize, Serialize};

/// Whether the host may reuse a previous result for identical inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    Cacheable,
    /// Re-run on every evaluation, even with unchanged inputs.
    AlwaysReevaluate,
}

impl CachePolicy {
    #[inline]
    pub fn is_volatile(self) -> bool {
        matches!(self, CachePolicy::AlwaysReevaluate)
    }
}

/// A unit the pipeline host can invoke.
pub trait HostNode {
    type Inputs;
    type Output;

    const NAME: &'static str;
    const CACHE_POLICY: CachePolicy;

    fn run<R: RandomSource + ?Sized>(
        &self,
        inputs: &Self::Inputs,
        rng: &mut R,
    ) -> Result<Self::Output, SampleError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerInputs {
    pub min_value: i64,
    pub max_value: i64,
    pub divisor: i64,
}

impl Default for IntegerInputs {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 100,
            divisor: 1,
        }
    }
}

/// Random multiple of a divisor. Errors are returned to the host unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIntegerNode {
    pub strategy: IntegerStrategy,
}

impl HostNode for RandomIntegerNode {
    type Inputs = IntegerInputs;
    type Output = i64;

    const NAME: &'static str = "RandomInteger";
    const CACHE_POLICY: CachePolicy = CachePolicy::AlwaysReevaluate;

    fn run<R: RandomSource + ?Sized>(
        &self,
        inputs: &IntegerInputs,
        rng: &mut R,
    ) -> Result<i64, SampleError> {
        sample_with(
            self.strategy,
            inputs.min_value,
            inputs.max_value,
            inputs.divisor,
            rng,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomizationType {
    #[default]
    Uniform,
    Gaussian,
}

/// Flat widget values of the dimension node, with the host's defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionInputs {
    pub min_width: i64,
    pub max_width: i64,
    pub width_divisors: String,
    pub min_height: i64,
    pub max_height: i64,
    pub height_divisors: String,
    pub randomize_width: bool,
    pub randomize_height: bool,
    pub maintain_aspect_ratio: bool,
    pub aspect_ratio: f64,
    pub aspect_ratio_basis: Basis,
    pub max_aspect_ratio_deviation: f64,
    pub randomization_type: RandomizationType,
    pub gaussian_mean_width: i64,
    pub gaussian_std_width: i64,
    pub gaussian_mean_height: i64,
    pub gaussian_std_height: i64,
    pub exclude_widths: String,
    pub exclude_heights: String,
    pub max_total_megapixels: f64,
    pub max_aspect_ratio_any_direction: f64,
}

impl Default for DimensionInputs {
    fn default() -> Self {
        Self {
            min_width: 256,
            max_width: 1024,
            width_divisors: "64".into(),
            min_height: 256,
            max_height: 1024,
            height_divisors: "64".into(),
            randomize_width: true,
            randomize_height: true,
            maintain_aspect_ratio: false,
            aspect_ratio: 1.0,
            aspect_ratio_basis: Basis::Width,
            max_aspect_ratio_deviation: 10.0,
            randomization_type: RandomizationType::Uniform,
            gaussian_mean_width: 512,
            gaussian_std_width: 128,
            gaussian_mean_height: 512,
            gaussian_std_height: 128,
            exclude_widths: String::new(),
            exclude_heights: String::new(),
            max_total_megapixels: 1.0,
            max_aspect_ratio_any_direction: 4.0,
        }
    }
}

impl DimensionInputs {
    /// Validate and parse into a typed request.
    ///
    /// The aspect ratio must be positive and finite even when maintenance is off. A deviation of
    /// exactly 0 and a megapixel cap that truncates to 0 pixels disable their steps.
    pub fn into_request(&self) -> Result<DimensionRequest, SampleError> {
        let width_range = Range::new(self.min_width, self.max_width)?;
        let height_range = Range::new(self.min_height, self.max_height)?;
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SampleError::invalid_config(
                "aspect ratio must be a positive number",
            ));
        }
        if self.max_aspect_ratio_any_direction.is_nan()
            || self.max_aspect_ratio_any_direction <= 0.0
        {
            return Err(SampleError::invalid_config(
                "max aspect ratio in any direction must be positive",
            ));
        }
        if self.max_total_megapixels.is_nan() || self.max_total_megapixels < 0.0 {
            return Err(SampleError::invalid_config(
                "max total megapixels must not be negative",
            ));
        }

        let width = AxisSpec {
            range: width_range,
            divisors: parse_divisors(&self.width_divisors)?,
            exclusions: parse_exclusions(&self.exclude_widths)?,
            randomize: self.randomize_width,
        };
        let height = AxisSpec {
            range: height_range,
            divisors: parse_divisors(&self.height_divisors)?,
            exclusions: parse_exclusions(&self.exclude_heights)?,
            randomize: self.randomize_height,
        };

        let aspect = self.maintain_aspect_ratio.then(|| AspectConfig {
            ratio: self.aspect_ratio,
            basis: self.aspect_ratio_basis,
            max_deviation_percent: Some(self.max_aspect_ratio_deviation)
                .filter(|&d| d != 0.0),
        });
        let gaussian = match self.randomization_type {
            RandomizationType::Uniform => None,
            RandomizationType::Gaussian => Some(GaussianConfig {
                width: Gaussian {
                    mean: self.gaussian_mean_width,
                    std_dev: self.gaussian_std_width,
                },
                height: Gaussian {
                    mean: self.gaussian_mean_height,
                    std_dev: self.gaussian_std_height,
                },
            }),
        };
        // `as` saturates, so absurd caps clamp instead of wrapping.
        let pixels = (self.max_total_megapixels * PIXELS_PER_MEGAPIXEL) as u64;
        let cross = CrossConstraint {
            max_total_pixels: Some(pixels).filter(|&p| p > 0),
            max_aspect_any_direction: Some(self.max_aspect_ratio_any_direction),
        };

        Ok(DimensionRequest {
            width,
            height,
            aspect,
            gaussian,
            cross,
        })
    }
}

/// Random (width, height) pair. Only malformed inputs are reported as errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomDimensionsNode;

impl HostNode for RandomDimensionsNode {
    type Inputs = DimensionInputs;
    type Output = DimensionOutcome;

    const NAME: &'static str = "RandomDimensions";
    const CACHE_POLICY: CachePolicy = CachePolicy::AlwaysReevaluate;

    fn run<R: RandomSource + ?Sized>(
        &self,
        inputs: &DimensionInputs,
        rng: &mut R,
    ) -> Result<DimensionOutcome, SampleError> {
        let request = inputs.into_request()?;
        sample_dimensions(&request, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::Dimensions;
    use crate::source::{FixedSource, RngSource};

    #[test]
    fn both_nodes_are_volatile() {
        assert!(RandomIntegerNode::CACHE_POLICY.is_volatile());
        assert!(RandomDimensionsNode::CACHE_POLICY.is_volatile());
        assert!(!CachePolicy::Cacheable.is_volatile());
    }

    #[test]
    fn integer_node_defaults_and_errors() {
        let mut rng = RngSource::seeded(8);
        for strategy in [IntegerStrategy::ClosedForm, IntegerStrategy::Listed] {
            let node = RandomIntegerNode { strategy };
            let v = node.run(&IntegerInputs::default(), &mut rng).unwrap();
            assert!((0..=100).contains(&v));
            let bad = IntegerInputs {
                min_value: 7,
                max_value: 9,
                divisor: 5,
            };
            assert!(matches!(
                node.run(&bad, &mut rng),
                Err(SampleError::EmptyFeasibleSet { .. })
            ));
        }
    }

    #[test]
    fn default_inputs_map_to_request() {
        let req = DimensionInputs::default().into_request().unwrap();
        assert_eq!(req.width.range, Range::new(256, 1024).unwrap());
        assert_eq!(req.height.divisors.as_slice(), &[64]);
        assert!(req.width.exclusions.is_empty());
        assert!(req.aspect.is_none());
        assert!(req.gaussian.is_none());
        assert_eq!(req.cross.max_total_pixels, Some(1_000_000));
        assert_eq!(req.cross.max_aspect_any_direction, Some(4.0));
    }

    #[test]
    fn optional_sections_follow_toggles() {
        let inputs = DimensionInputs {
            maintain_aspect_ratio: true,
            aspect_ratio: 1.5,
            aspect_ratio_basis: Basis::Height,
            max_aspect_ratio_deviation: 0.0,
            randomization_type: RandomizationType::Gaussian,
            max_total_megapixels: 0.0,
            exclude_widths: "320, 384".into(),
            ..DimensionInputs::default()
        };
        let req = inputs.into_request().unwrap();
        let aspect = req.aspect.unwrap();
        assert_eq!(aspect.basis, Basis::Height);
        assert_eq!(aspect.max_deviation_percent, None);
        assert_eq!(req.gaussian.unwrap().height.std_dev, 128);
        assert_eq!(req.cross.max_total_pixels, None);
        assert!(req.width.exclusions.contains(384));
    }

    #[test]
    fn megapixels_truncate_to_pixels() {
        let inputs = DimensionInputs {
            max_total_megapixels: 0.3333339,
            ..DimensionInputs::default()
        };
        let req = inputs.into_request().unwrap();
        assert_eq!(req.cross.max_total_pixels, Some(333_333));
        let inputs = DimensionInputs {
            max_total_megapixels: 1e-7,
            ..DimensionInputs::default()
        };
        assert_eq!(inputs.into_request().unwrap().cross.max_total_pixels, None);
    }

    #[test]
    fn preflight_failures_are_hard_errors() {
        let cases = [
            DimensionInputs {
                min_width: 2000,
                ..DimensionInputs::default()
            },
            DimensionInputs {
                aspect_ratio: 0.0,
                ..DimensionInputs::default()
            },
            DimensionInputs {
                aspect_ratio: f64::INFINITY,
                ..DimensionInputs::default()
            },
            DimensionInputs {
                max_aspect_ratio_any_direction: -1.0,
                ..DimensionInputs::default()
            },
            DimensionInputs {
                width_divisors: "64, sixty".into(),
                ..DimensionInputs::default()
            },
            DimensionInputs {
                exclude_heights: "1.5".into(),
                ..DimensionInputs::default()
            },
        ];
        let mut rng = RngSource::seeded(1);
        for inputs in cases {
            assert!(RandomDimensionsNode.run(&inputs, &mut rng).is_err(), "{inputs:?}");
        }
    }

    #[test]
    fn dimension_node_runs_with_scripted_source() {
        let mut rng = FixedSource::picks(vec![4, 8]);
        let out = RandomDimensionsNode
            .run(&DimensionInputs::default(), &mut rng)
            .unwrap();
        assert!(out.is_exact());
        assert_eq!(out.dims, Dimensions::new(512, 768));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let inputs: DimensionInputs =
            serde_json::from_str(r#"{"min_width": 512, "aspect_ratio_basis": "height"}"#).unwrap();
        assert_eq!(inputs.min_width, 512);
        assert_eq!(inputs.max_width, 1024);
        assert_eq!(inputs.aspect_ratio_basis, Basis::Height);
        let out = serde_json::to_value(Dimensions::new(640, 480)).unwrap();
        assert_eq!(out["Width"], 640);
        assert_eq!(out["Height"], 480);
    }
}
