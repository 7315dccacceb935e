//! Histogram of sampled sizes for a quick visual check of the distributions.
//!
//! Usage:
//!   cargo run -p dimrand --example size_histogram -- uniform
//!   cargo run -p dimrand --example size_histogram -- gaussian
//!
//! Draws 2000 widths from the host defaults (256..1024 in steps of 64) and prints one bar
//! per feasible width.

use dimrand::api::{DimensionInputs, HostNode, RandomDimensionsNode, RandomizationType};
use dimrand::source::SeedToken;
use std::collections::BTreeMap;

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "uniform".to_string());
    let randomization_type = match mode.as_str() {
        "uniform" => RandomizationType::Uniform,
        "gaussian" => RandomizationType::Gaussian,
        _ => {
            eprintln!("usage: size_histogram [uniform|gaussian]");
            return;
        }
    };
    let inputs = DimensionInputs {
        randomization_type,
        ..DimensionInputs::default()
    };
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut fallbacks = 0;
    for index in 0..2000 {
        let mut rng = SeedToken { seed: 17, index }.source();
        match RandomDimensionsNode.run(&inputs, &mut rng) {
            Ok(out) => {
                if !out.is_exact() {
                    fallbacks += 1;
                }
                *counts.entry(out.dims.width).or_default() += 1;
            }
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        }
    }
    for (width, n) in &counts {
        println!("{width:>5} {:4} {}", n, "#".repeat(n / 10));
    }
    println!("fallbacks: {fallbacks}");
}
