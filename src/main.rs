//! Capability Sim - single-run entry point
//!
//! Builds one seeded population, runs it for the configured number of
//! periods and prints the per-condition trajectories.

use std::path::PathBuf;

use capability_sim::core::config::ExperimentConfig;
use capability_sim::core::Result;
use capability_sim::population::build_population;
use capability_sim::simulation::run_simulation;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run one simulation and print per-condition trajectories
#[derive(Parser, Debug)]
#[command(name = "capability-sim")]
#[command(about = "Simulate operator capability growth under XAI assistance")]
struct Args {
    /// Experiment config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of periods (overrides the config value)
    #[arg(long)]
    periods: Option<u32>,

    /// Drop the direct condition factor from performance
    #[arg(long)]
    ablate: bool,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Write output to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging (RUST_LOG overrides the default filter)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("capability_sim=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    let params = config.parameters;
    let seed = args.seed.unwrap_or(config.seed);
    let periods = args.periods.unwrap_or(params.n_periods);

    tracing::info!(
        seed,
        periods,
        operators = params.n_operators,
        ablate = args.ablate,
        "Starting simulation"
    );

    let mut population = build_population(&params, seed)?;
    let trajectories = run_simulation(&mut population, &params, periods, args.ablate);

    let rendered = match args.format.as_str() {
        "json" => trajectories.to_json(),
        _ => trajectories.summary(),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "Wrote trajectories");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
