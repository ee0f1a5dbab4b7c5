//! Ablation and sensitivity orchestration
//!
//! Every replication builds a fresh population from its own seed and runs
//! it for the base period count, so replication k gives the same result
//! whether it runs alone, serially in a batch, or on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ablation::output::AblationReport;
use crate::ablation::scenario::{AblationScenario, ScenarioResult};
use crate::core::error::{Result, SimError};
use crate::core::params::{SimulationParameters, SweepParameter};
use crate::core::types::{Condition, PerCondition};
use crate::population::build_population;
use crate::simulation::run_simulation;

/// One row of a sensitivity sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: f64,
    pub control_mean: f64,
    pub combined_mean: f64,
    pub improvement_pct: f64,
    pub cohens_d: f64,
}

impl SensitivityPoint {
    fn from_result(value: f64, result: &ScenarioResult) -> Self {
        Self {
            value,
            control_mean: result.stats.control.mean,
            combined_mean: result.stats.combined.mean,
            improvement_pct: result.improvement_pct,
            cohens_d: result.cohens_d,
        }
    }
}

/// Run one replication and return the final-period mean performance per condition
pub fn run_replication(
    params: &SimulationParameters,
    ablate_condition_factor: bool,
    seed: u64,
) -> Result<PerCondition<f64>> {
    let mut population = build_population(params, seed)?;
    let trajectories = run_simulation(
        &mut population,
        params,
        params.n_periods,
        ablate_condition_factor,
    );

    let final_for = |condition: Condition| {
        trajectories.final_performance(condition).ok_or_else(|| {
            SimError::Configuration(format!(
                "no final-period performance for {} (n_periods = {})",
                condition, params.n_periods
            ))
        })
    };

    let finals = PerCondition {
        control: final_for(Condition::Control)?,
        generic_xai: final_for(Condition::GenericXAI)?,
        combined: final_for(Condition::Combined)?,
    };
    tracing::trace!(seed, ?finals, "Replication complete");
    Ok(finals)
}

/// Replication plan shared by ablation studies and sweeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AblationRunner {
    pub n_replications: usize,
    /// Seed of replication 0; replication k uses `base_seed + k`
    pub base_seed: u64,
    /// Run replications on the rayon pool
    pub parallel: bool,
}

impl AblationRunner {
    pub fn new(n_replications: usize) -> Self {
        Self {
            n_replications,
            base_seed: 0,
            parallel: true,
        }
    }

    pub fn with_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed_for(&self, replication: usize) -> u64 {
        self.base_seed.wrapping_add(replication as u64)
    }

    /// Run every replication for one parameter snapshot, in replication order
    pub fn replicate(
        &self,
        params: &SimulationParameters,
        ablate_condition_factor: bool,
    ) -> Result<Vec<PerCondition<f64>>> {
        if self.n_replications == 0 {
            return Err(SimError::Configuration(
                "n_replications must be at least 1".into(),
            ));
        }
        if params.n_periods == 0 {
            return Err(SimError::Configuration(
                "n_periods must be at least 1 to compare final-period performance".into(),
            ));
        }

        if self.parallel {
            (0..self.n_replications)
                .into_par_iter()
                .map(|k| run_replication(params, ablate_condition_factor, self.seed_for(k)))
                .collect()
        } else {
            (0..self.n_replications)
                .map(|k| run_replication(params, ablate_condition_factor, self.seed_for(k)))
                .collect()
        }
    }

    /// Run one scenario against the base parameters
    pub fn run_scenario(
        &self,
        base: &SimulationParameters,
        scenario: &AblationScenario,
    ) -> Result<ScenarioResult> {
        let params = scenario.apply(base)?;
        let replications = self.replicate(&params, scenario.ablate_condition_factor)?;
        let result = ScenarioResult::from_replications(scenario.clone(), params, &replications);

        tracing::info!(
            scenario = %scenario.name,
            control = result.stats.control.mean,
            combined = result.stats.combined.mean,
            improvement_pct = result.improvement_pct,
            cohens_d = result.cohens_d,
            "Scenario complete"
        );
        Ok(result)
    }

    /// Run every scenario in order
    pub fn run(
        &self,
        base: &SimulationParameters,
        scenarios: &[AblationScenario],
    ) -> Result<AblationReport> {
        if scenarios.is_empty() {
            return Err(SimError::Configuration("no ablation scenarios given".into()));
        }

        let results = scenarios
            .iter()
            .map(|scenario| self.run_scenario(base, scenario))
            .collect::<Result<Vec<_>>>()?;

        Ok(AblationReport {
            base_parameters: base.clone(),
            n_replications: self.n_replications,
            base_seed: self.base_seed,
            results,
        })
    }

    /// Sweep one parameter over `values`, aggregating exactly like a scenario
    pub fn sweep(
        &self,
        base: &SimulationParameters,
        parameter: SweepParameter,
        values: &[f64],
        ablate_condition_factor: bool,
    ) -> Result<Vec<SensitivityPoint>> {
        if values.is_empty() {
            return Err(SimError::Configuration(format!(
                "empty value range for {}",
                parameter
            )));
        }

        values
            .iter()
            .map(|&value| {
                let params = parameter.apply(base, value)?;
                let scenario = AblationScenario {
                    name: format!("{}={}", parameter, value),
                    ablate_condition_factor,
                    growth_rate_ratio: None,
                    capability_coupling: None,
                };
                let replications = self.replicate(&params, ablate_condition_factor)?;
                let result = ScenarioResult::from_replications(scenario, params, &replications);
                let point = SensitivityPoint::from_result(value, &result);

                tracing::info!(
                    parameter = %parameter,
                    value,
                    improvement_pct = point.improvement_pct,
                    cohens_d = point.cohens_d,
                    "Sweep point complete"
                );
                Ok(point)
            })
            .collect()
    }
}

/// Run `scenarios` with seeds `0..n_replications`
pub fn run_ablation_studies(
    base: &SimulationParameters,
    scenarios: &[AblationScenario],
    n_replications: usize,
) -> Result<AblationReport> {
    AblationRunner::new(n_replications).run(base, scenarios)
}

/// Sweep the named parameter with the condition factor ablated
pub fn sensitivity_analysis(
    base: &SimulationParameters,
    param_name: &str,
    param_range: &[f64],
    n_replications: usize,
) -> Result<Vec<SensitivityPoint>> {
    let parameter: SweepParameter = param_name.parse()?;
    AblationRunner::new(n_replications).sweep(base, parameter, param_range, true)
}
