//! Headless Ablation Runner
//!
//! Runs replicated ablation studies or single-parameter sweeps and prints
//! comparison tables or JSON.

use std::path::PathBuf;

use capability_sim::ablation::{sensitivity_table, AblationRunner};
use capability_sim::core::config::ExperimentConfig;
use capability_sim::core::{Result, SweepParameter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Ablation Runner - replicated ablation and sensitivity studies
#[derive(Parser, Debug)]
#[command(name = "ablation_runner")]
#[command(about = "Run replicated ablation studies and parameter sweeps")]
struct Args {
    /// Experiment config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replications per scenario (overrides the config value)
    #[arg(long)]
    replications: Option<usize>,

    /// Seed of replication 0 (overrides the config seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Run replications one after another instead of on the thread pool
    #[arg(long)]
    serial: bool,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Write output to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the configured (or default) ablation scenarios
    Ablation,
    /// Sweep one parameter over a list of values
    Sweep {
        /// Parameter name, e.g. capability_coupling or growth_rate_ratio
        parameter: String,

        /// Values to try, in order
        #[arg(required = true, num_args = 1..)]
        values: Vec<f64>,

        /// Keep the direct condition factor in performance
        #[arg(long)]
        with_condition_factor: bool,
    },
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

    let runner = AblationRunner::new(args.replications.unwrap_or(config.parameters.n_replications))
        .with_seed(args.seed.unwrap_or(config.seed))
        .with_parallel(config.parallel && !args.serial);

    let rendered = match &args.command {
        Command::Ablation => {
            let report = runner.run(&config.parameters, &config.scenarios())?;
            match args.format.as_str() {
                "json" => report.to_json(),
                _ => report.summary_table(),
            }
        }
        Command::Sweep {
            parameter,
            values,
            with_condition_factor,
        } => {
            let parameter: SweepParameter = parameter.parse()?;
            let ablate = !with_condition_factor;
            let points = runner.sweep(&config.parameters, parameter, values, ablate)?;
            match args.format.as_str() {
                "json" => serde_json::to_string_pretty(&points)?,
                _ => sensitivity_table(parameter, &points),
            }
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "Wrote results");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
