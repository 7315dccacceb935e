//! Error type shared by both samplers.
//!
//! The single-value sampler surfaces every variant to its caller. The paired sampler
//! recovers from the mid-pipeline variants (see [`SampleError::is_recoverable`]) and only
//! propagates pre-flight validation failures.

use std::fmt;

/// Which dimension a paired-sampler error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SampleError {
    /// `min > max`.
    InvalidRange { min: i64, max: i64 },
    /// Bad divisor, list, or ratio parameter.
    InvalidConfig { reason: String },
    /// No multiple of `divisor` lies in `[min, max]`.
    EmptyFeasibleSet { min: i64, max: i64, divisor: i64 },
    /// Aspect-ratio maintenance needs a dependent value but that axis has no feasible values.
    NoFeasibleDependent { axis: Axis },
    /// A dimension left its own range after aspect-ratio snapping.
    OutOfBounds {
        axis: Axis,
        value: i64,
        min: i64,
        max: i64,
    },
    /// Final membership check failed after cross-constraint resolution.
    Unsatisfied { reason: String },
}

impl SampleError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsatisfied(reason: impl Into<String>) -> Self {
        Self::Unsatisfied {
            reason: reason.into(),
        }
    }

    /// True for failures the paired sampler degrades from instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoFeasibleDependent { .. } | Self::OutOfBounds { .. } | Self::Unsatisfied { .. }
        )
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { min, max } => {
                write!(f, "invalid range: min {min} is greater than max {max}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::EmptyFeasibleSet { min, max, divisor } => {
                write!(f, "no multiples of {divisor} within the range [{min}, {max}]")
            }
            Self::NoFeasibleDependent { axis } => {
                write!(f, "no valid {axis} found to maintain aspect ratio")
            }
            Self::OutOfBounds {
                axis,
                value,
                min,
                max,
            } => write!(
                f,
                "{axis} {value} out of bounds [{min}, {max}] after applying aspect ratio"
            ),
            Self::Unsatisfied { reason } => write!(f, "constraints unsatisfied: {reason}"),
        }
    }
}

impl std::error::Error for SampleError {}
