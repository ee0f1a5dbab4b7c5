//! Capability Sim - agent-based validation of capability-aware XAI
//!
//! Simulates a population of job-shop operators under Control, GenericXAI
//! and Combined (XAI + capability) conditions, and runs replicated ablation
//! and sensitivity studies over the model's structural parameters.

pub mod ablation;
pub mod core;
pub mod population;
pub mod simulation;

pub use crate::ablation::{
    run_ablation_studies, sensitivity_analysis, AblationReport, AblationScenario, ScenarioResult,
};
pub use crate::core::{Result, SimError, SimulationParameters};
pub use crate::population::{build_population, Operator, Population};
pub use crate::simulation::{run_simulation, Trajectories};
