//! Constrained random integers and paired width/height dimensions.
//!
//! Two samplers share one set of primitives:
//! - `single`: a uniform multiple of a divisor in `[min, max]` (closed-form or listed).
//! - `dims`: a `(width, height)` pair under per-axis divisors and exclusions, an optional
//!   aspect ratio, Gaussian or uniform draws, and cross-axis caps, degrading to the nearest
//!   valid values when constraints conflict.
//!
//! Every call is a pure computation over its inputs plus an injected `RandomSource`.
//! Results must never be cached by callers; see `host::CachePolicy`.

pub mod api;
pub mod cfg;
pub mod dims;
pub mod distribution;
pub mod error;
pub mod feasible;
pub mod host;
pub mod parse;
pub mod single;
pub mod source;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Axis, SampleError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::dims::{
        sample_dimensions, AspectConfig, AxisSpec, Basis, CrossConstraint, DimensionOutcome,
        DimensionRequest, Dimensions, Gaussian, GaussianConfig,
    };
    pub use crate::distribution::SamplingMode;
    pub use crate::error::{Axis, SampleError};
    pub use crate::feasible::{nearest, DivisorSet, ExclusionSet, FeasibleSet, Range};
    pub use crate::single::{
        sample_uniform_multiple, sample_uniform_multiple_listed, IntegerStrategy,
    };
    pub use crate::source::{FixedSource, RandomSource, RngSource, SeedToken};
}
