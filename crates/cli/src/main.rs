use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dimrand::api::{
    DimensionInputs, HostNode, IntegerInputs, IntegerStrategy, RandomDimensionsNode,
    RandomIntegerNode, RandomSource, RngSource, SeedToken,
};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod inputs;

#[derive(Parser)]
#[command(name = "dimrand")]
#[command(about = "Constrained random integers and image dimensions")]
struct Cmd {
    /// Log adjustments and fallbacks at debug level (stderr)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a random multiple of a divisor in [min, max]
    Int {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min: i64,
        #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
        max: i64,
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        divisor: i64,
        #[arg(long, value_enum, default_value_t = StrategyArg::ClosedForm)]
        strategy: StrategyArg,
        #[command(flatten)]
        draws: Draws,
    },
    /// Draw a (width, height) pair from node inputs given as JSON
    Dims {
        /// JSON file with node inputs; missing fields take the node defaults
        #[arg(long)]
        input: Option<String>,
        /// Inline JSON applied on top of --input
        #[arg(long)]
        json: Option<String>,
        #[command(flatten)]
        draws: Draws,
    },
    /// Print the default dimension node inputs as JSON
    Defaults,
}

#[derive(clap::Args)]
struct Draws {
    /// Number of independent draws
    #[arg(long, default_value_t = 1)]
    count: u64,
    /// Seed for reproducible draws; draw i replays from (seed, i)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    ClosedForm,
    Listed,
}

impl From<StrategyArg> for IntegerStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::ClosedForm => IntegerStrategy::ClosedForm,
            StrategyArg::Listed => IntegerStrategy::Listed,
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Int {
            min,
            max,
            divisor,
            strategy,
            draws,
        } => int(
            IntegerInputs {
                min_value: min,
                max_value: max,
                divisor,
            },
            strategy.into(),
            draws,
        ),
        Action::Dims { input, json, draws } => {
            let inputs = inputs::load(input.as_deref(), json.as_deref())?;
            dims(&inputs, draws)
        }
        Action::Defaults => defaults(),
    }
}

fn source(seed: Option<u64>, index: u64) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeedToken { seed, index }.source()),
        None => Box::new(RngSource::thread()),
    }
}

fn int(inputs: IntegerInputs, strategy: IntegerStrategy, draws: Draws) -> Result<()> {
    tracing::debug!(?inputs, ?strategy, count = draws.count, "int");
    let node = RandomIntegerNode { strategy };
    for index in 0..draws.count {
        let mut rng = source(draws.seed, index);
        let value = node.run(&inputs, &mut *rng)?;
        let line = json!({
            "value": value,
            "volatile": RandomIntegerNode::CACHE_POLICY.is_volatile(),
        });
        println!("{line}");
    }
    Ok(())
}

fn dims(inputs: &DimensionInputs, draws: Draws) -> Result<()> {
    tracing::debug!(?inputs, count = draws.count, "dims");
    for index in 0..draws.count {
        let mut rng = source(draws.seed, index);
        let outcome = RandomDimensionsNode.run(inputs, &mut *rng)?;
        let line = json!({
            "Width": outcome.dims.width,
            "Height": outcome.dims.height,
            "exact": outcome.is_exact(),
            "fallback": outcome.fallback.as_ref().map(|e| e.to_string()),
            "volatile": RandomDimensionsNode::CACHE_POLICY.is_volatile(),
        });
        println!("{line}");
    }
    Ok(())
}

fn defaults() -> Result<()> {
    let obj = json!({
        "version": dimrand::VERSION,
        "inputs": DimensionInputs::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
