//! Comma-separated integer lists from the host boundary.
//!
//! Split on commas, trim whitespace, drop empty tokens, parse the rest as integers.
//! Any token that is not an integer rejects the whole list.

use crate::error::SampleError;
use crate::feasible::{DivisorSet, ExclusionSet};

pub fn parse_int_list(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| format!("{tok:?} is not an integer"))
        })
        .collect()
}

/// Parse a divisor list; it must hold at least one non-zero integer and no zeros.
pub fn parse_divisors(input: &str) -> Result<DivisorSet, SampleError> {
    let values = parse_int_list(input).map_err(|e| {
        SampleError::invalid_config(format!("divisors must be integers separated by commas: {e}"))
    })?;
    DivisorSet::new(values)
}

/// Parse an exclusion list; an empty string means no exclusions.
pub fn parse_exclusions(input: &str) -> Result<ExclusionSet, SampleError> {
    let values = parse_int_list(input).map_err(|e| {
        SampleError::invalid_config(format!(
            "exclusions must be integers separated by commas: {e}"
        ))
    })?;
    Ok(values.into_iter().collect())
}
