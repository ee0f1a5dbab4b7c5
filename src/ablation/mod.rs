//! Ablation and sensitivity studies
//!
//! Re-instantiates populations under varied parameters across many seeded
//! replications and compares final-period performance between conditions.

pub mod orchestrator;
pub mod output;
pub mod scenario;
pub mod stats;

pub use orchestrator::{
    run_ablation_studies, run_replication, sensitivity_analysis, AblationRunner, SensitivityPoint,
};
pub use output::{sensitivity_table, AblationReport};
pub use scenario::{default_scenarios, AblationScenario, ScenarioResult};
pub use stats::{cohens_d, percent_improvement, DescriptiveStats};
