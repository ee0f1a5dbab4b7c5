//! Ablation scenarios and their aggregated results

use serde::{Deserialize, Serialize};

use crate::ablation::stats::{cohens_d, percent_improvement, DescriptiveStats};
use crate::core::error::Result;
use crate::core::params::SimulationParameters;
use crate::core::types::PerCondition;

/// A named configuration delta applied on top of base parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AblationScenario {
    pub name: String,
    /// Drop the direct condition factor from the evaluator
    #[serde(default)]
    pub ablate_condition_factor: bool,
    /// Combined growth rate as a multiple of Control's (None keeps base)
    #[serde(default)]
    pub growth_rate_ratio: Option<f64>,
    /// Capability coupling α override (None keeps base)
    #[serde(default)]
    pub capability_coupling: Option<f64>,
}

impl AblationScenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ablate_condition_factor: false,
            growth_rate_ratio: None,
            capability_coupling: None,
        }
    }

    pub fn ablated(mut self) -> Self {
        self.ablate_condition_factor = true;
        self
    }

    pub fn with_growth_ratio(mut self, ratio: f64) -> Self {
        self.growth_rate_ratio = Some(ratio);
        self
    }

    pub fn with_coupling(mut self, alpha: f64) -> Self {
        self.capability_coupling = Some(alpha);
        self
    }

    /// Derive the scenario's parameter snapshot from `base`
    pub fn apply(&self, base: &SimulationParameters) -> Result<SimulationParameters> {
        let mut params = base.clone();
        if let Some(ratio) = self.growth_rate_ratio {
            params.growth_rate_xai_cap = params.growth_rate_control * ratio;
        }
        if let Some(alpha) = self.capability_coupling {
            params.capability_coupling = alpha;
        }
        params.validate()?;
        Ok(params)
    }
}

/// The fixed scenario list: full model, then the condition factor ablated
/// at 6x, 2x and 3x growth ratio
pub fn default_scenarios() -> Vec<AblationScenario> {
    vec![
        AblationScenario::new("full_model"),
        AblationScenario::new("ablated_ratio_6x").ablated().with_growth_ratio(6.0),
        AblationScenario::new("ablated_ratio_2x").ablated().with_growth_ratio(2.0),
        AblationScenario::new("ablated_ratio_3x").ablated().with_growth_ratio(3.0),
    ]
}

/// Aggregated outcome of one scenario across replications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: AblationScenario,
    /// Effective parameters after applying the scenario
    pub parameters: SimulationParameters,
    /// Final-period mean performance, one entry per replication
    pub final_performance: PerCondition<Vec<f64>>,
    pub stats: PerCondition<DescriptiveStats>,
    /// Combined vs Control
    pub improvement_pct: f64,
    /// Combined vs Control, scaled by the Control replication SD
    pub cohens_d: f64,
    pub generic_improvement_pct: f64,
    pub generic_cohens_d: f64,
}

impl ScenarioResult {
    /// Aggregate per-replication final performance
    pub fn from_replications(
        scenario: AblationScenario,
        parameters: SimulationParameters,
        replications: &[PerCondition<f64>],
    ) -> Self {
        let final_performance = PerCondition {
            control: replications.iter().map(|r| r.control).collect::<Vec<_>>(),
            generic_xai: replications.iter().map(|r| r.generic_xai).collect(),
            combined: replications.iter().map(|r| r.combined).collect(),
        };
        let stats = final_performance.map(|_, samples| DescriptiveStats::from_samples(samples));

        Self {
            improvement_pct: percent_improvement(stats.control.mean, stats.combined.mean),
            cohens_d: cohens_d(&final_performance.control, stats.combined.mean),
            generic_improvement_pct: percent_improvement(
                stats.control.mean,
                stats.generic_xai.mean,
            ),
            generic_cohens_d: cohens_d(&final_performance.control, stats.generic_xai.mean),
            scenario,
            parameters,
            final_performance,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.scenario.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_order() {
        let names: Vec<_> = default_scenarios().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["full_model", "ablated_ratio_6x", "ablated_ratio_2x", "ablated_ratio_3x"]
        );
    }

    #[test]
    fn test_apply_overrides() {
        let base = SimulationParameters::default();
        let scenario = AblationScenario::new("s")
            .ablated()
            .with_growth_ratio(2.0)
            .with_coupling(0.5);
        let params = scenario.apply(&base).unwrap();

        assert!((params.growth_rate_xai_cap - 0.04).abs() < 1e-12);
        assert_eq!(params.capability_coupling, 0.5);
        assert_eq!(params.growth_rate_control, base.growth_rate_control);
    }

    #[test]
    fn test_apply_without_overrides_keeps_base() {
        let base = SimulationParameters::default();
        assert_eq!(AblationScenario::new("full").apply(&base).unwrap(), base);
    }

    #[test]
    fn test_apply_rejects_negative_coupling() {
        let base = SimulationParameters::default();
        assert!(AblationScenario::new("bad").with_coupling(-0.1).apply(&base).is_err());
    }

    #[test]
    fn test_result_aggregation() {
        let replications = vec![
            PerCondition { control: 900.0, generic_xai: 880.0, combined: 800.0 },
            PerCondition { control: 1100.0, generic_xai: 1020.0, combined: 900.0 },
        ];
        let result = ScenarioResult::from_replications(
            AblationScenario::new("s"),
            SimulationParameters::default(),
            &replications,
        );

        assert_eq!(result.final_performance.control, vec![900.0, 1100.0]);
        assert_eq!(result.stats.control.mean, 1000.0);
        assert_eq!(result.stats.combined.mean, 850.0);
        assert!((result.improvement_pct - 15.0).abs() < 1e-9);
        // Control population SD is 100
        assert!((result.cohens_d - 1.5).abs() < 1e-9);
        assert!((result.generic_improvement_pct - 5.0).abs() < 1e-9);
    }
}
