//! Experiment configuration loaded from TOML
//!
//! A config file carries the base parameter snapshot, the base seed and
//! the ablation scenarios to run. Every section is optional:
//!
//! ```toml
//! seed = 42
//!
//! [parameters]
//! n_periods = 36
//! capability_coupling = 0.4
//!
//! [[scenarios]]
//! name = "ablated_ratio_4x"
//! ablate_condition_factor = true
//! growth_rate_ratio = 4.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ablation::scenario::{default_scenarios, AblationScenario};
use crate::core::error::Result;
use crate::core::params::SimulationParameters;

fn default_parallel() -> bool {
    true
}

/// Complete experiment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Seed of replication 0; replication k uses `seed + k`
    #[serde(default)]
    pub seed: u64,
    /// Run replications on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Base parameter snapshot
    #[serde(default)]
    pub parameters: SimulationParameters,
    /// Ablation scenarios (empty = the default list)
    #[serde(default)]
    pub scenarios: Vec<AblationScenario>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel: true,
            parameters: SimulationParameters::default(),
            scenarios: Vec::new(),
        }
    }
}

impl ExperimentConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded experiment config");
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExperimentConfig = toml::from_str(content)?;
        config.parameters.validate()?;
        Ok(config)
    }

    /// Scenarios to run, falling back to the default list
    pub fn scenarios(&self) -> Vec<AblationScenario> {
        if self.scenarios.is_empty() {
            default_scenarios()
        } else {
            self.scenarios.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ExperimentConfig::from_toml_str("").unwrap();
        assert_eq!(config.seed, 0);
        assert!(config.parallel);
        assert_eq!(config.parameters, SimulationParameters::default());
        assert_eq!(config.scenarios().len(), 4);
    }

    #[test]
    fn test_partial_parameters_override() {
        let config = ExperimentConfig::from_toml_str(
            r#"
            seed = 7
            parallel = false

            [parameters]
            n_periods = 36
            capability_coupling = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert!(!config.parallel);
        assert_eq!(config.parameters.n_periods, 36);
        assert_eq!(config.parameters.capability_coupling, 0.4);
        assert_eq!(config.parameters.growth_rate_control, 0.02);
    }

    #[test]
    fn test_custom_scenarios_replace_defaults() {
        let config = ExperimentConfig::from_toml_str(
            r#"
            [[scenarios]]
            name = "ablated_ratio_4x"
            ablate_condition_factor = true
            growth_rate_ratio = 4.0
            "#,
        )
        .unwrap();

        let scenarios = config.scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "ablated_ratio_4x");
        assert_eq!(scenarios[0].growth_rate_ratio, Some(4.0));
        assert_eq!(scenarios[0].capability_coupling, None);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let result = ExperimentConfig::from_toml_str(
            r#"
            [parameters]
            n_operators = 10
            "#,
        );
        assert!(matches!(result, Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = ExperimentConfig::from_toml_str("seed = [");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}
