//! Host-facing surface.
//!
//! Host adapters (the CLI, embedding runtimes) should only need these names: flat node
//! inputs, the two nodes, their cache policy and the randomness sources.

pub use crate::dims::{DimensionOutcome, Dimensions};
pub use crate::error::SampleError;
pub use crate::host::{
    CachePolicy, DimensionInputs, HostNode, IntegerInputs, RandomDimensionsNode,
    RandomIntegerNode, RandomizationType,
};
pub use crate::single::IntegerStrategy;
pub use crate::source::{RandomSource, RngSource, SeedToken};
