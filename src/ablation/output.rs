//! Ablation report and text/JSON export

use serde::{Deserialize, Serialize};

use crate::ablation::orchestrator::SensitivityPoint;
use crate::ablation::scenario::ScenarioResult;
use crate::core::params::{SimulationParameters, SweepParameter};

/// Results of an ablation study, in scenario order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AblationReport {
    pub base_parameters: SimulationParameters,
    pub n_replications: usize,
    pub base_seed: u64,
    pub results: Vec<ScenarioResult>,
}

impl AblationReport {
    /// Look up a scenario result by name
    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Fixed-width comparison table, one row per scenario
    pub fn summary_table(&self) -> String {
        let mut out = format!(
            "Ablation study: {} scenarios x {} replications (base seed {})\n",
            self.results.len(),
            self.n_replications,
            self.base_seed
        );
        out.push_str(&format!(
            "{:<20} {:>7} {:>6} {:>10} {:>8} {:>10} {:>8} {:>9} {:>8}\n",
            "scenario", "ablated", "ratio", "control", "sd", "combined", "sd", "improv%", "d"
        ));
        for result in &self.results {
            out.push_str(&format!(
                "{:<20} {:>7} {:>6.1} {:>10.1} {:>8.1} {:>10.1} {:>8.1} {:>9.2} {:>8.2}\n",
                result.name(),
                if result.scenario.ablate_condition_factor { "yes" } else { "no" },
                result.parameters.growth_rate_ratio(),
                result.stats.control.mean,
                result.stats.control.sd,
                result.stats.combined.mean,
                result.stats.combined.sd,
                result.improvement_pct,
                result.cohens_d,
            ));
        }
        out
    }
}

/// Fixed-width table of a sensitivity sweep
pub fn sensitivity_table(parameter: SweepParameter, points: &[SensitivityPoint]) -> String {
    let mut out = format!("Sensitivity sweep: {}\n", parameter);
    out.push_str(&format!(
        "{:>10} {:>10} {:>10} {:>9} {:>8}\n",
        "value", "control", "combined", "improv%", "d"
    ));
    for p in points {
        out.push_str(&format!(
            "{:>10.4} {:>10.1} {:>10.1} {:>9.2} {:>8.2}\n",
            p.value, p.control_mean, p.combined_mean, p.improvement_pct, p.cohens_d
        ));
    }
    out
}
