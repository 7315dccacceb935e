//! Paired width/height sampling.
//!
//! Purpose
//! - Draw a `(width, height)` pair where each axis has its own range, divisors and
//!   exclusions, optionally tied by an aspect ratio and limited by cross-axis caps.
//! - Never fail after pre-flight validation: conflicts degrade to the nearest valid values.
//!
//! Model
//! - Per-axis feasible sets come from `feasible::FeasibleSet::build`; the default of an axis
//!   is its range minimum when feasible, else its smallest feasible value, else the raw
//!   minimum.
//! - Cross constraints run in order: area cap, aspect deviation (maintenance only),
//!   any-direction aspect cap.
//! - The final check requires feasible members and an area within the cap. Snapping can push
//!   a capped pair back over the cap; the fallback then returns the same pair as degraded.
//!
//! Known gap
//! - When an axis has no feasible value, the fallback returns that axis's raw default even
//!   though it may not satisfy the axis's divisors.

mod pipeline;
mod request;

pub use pipeline::{sample_dimensions, AxisPlan, DimensionOutcome, Dimensions};
pub use request::{
    AspectConfig, AxisSpec, Basis, CrossConstraint, DimensionRequest, Gaussian, GaussianConfig,
};
