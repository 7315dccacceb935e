//! Fixed sampling constants (internal).
//!
//! Policy
//! - These are constants, not knobs. Host-facing defaults live on the input structs in
//!   `host` so a partial JSON document picks them up through `serde(default)`.

/// Upper bound on Gaussian draws before falling back to the member nearest the mean.
pub const MAX_GAUSSIAN_ATTEMPTS: u32 = 100;
/// Conversion factor for the host's megapixel cap.
pub const PIXELS_PER_MEGAPIXEL: f64 = 1_000_000.0;
