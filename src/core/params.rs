//! Simulation parameters with documented constants
//!
//! Every tunable constant of the operator model lives here: population
//! geometry, growth rates, performance coupling, psychological-realism
//! coefficients and noise levels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Condition, ExperienceLevel, CAPABILITY_DIMENSIONS};

/// Immutable configuration snapshot for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    // === POPULATION ===
    /// Total operator count; must equal `n_clusters * operators_per_cluster`
    pub n_operators: usize,

    /// Number of clusters; split into thirds by condition
    pub n_clusters: usize,

    /// Operators per cluster; split into thirds by experience tier
    pub operators_per_cluster: usize,

    /// Periods per run
    pub n_periods: u32,

    /// Replications per ablation scenario
    pub n_replications: usize,

    // === CAPABILITY GROWTH ===
    /// Per-period growth rate under Control
    pub growth_rate_control: f64,

    /// Per-period growth rate under GenericXAI
    pub growth_rate_generic: f64,

    /// Per-period growth rate under the Combined (XAI + capability) condition
    pub growth_rate_xai_cap: f64,

    /// Growth multiplier for novices (> 1, faster)
    pub novice_modifier: f64,

    /// Growth multiplier for experts (< 1, ceiling effect)
    pub expert_modifier: f64,

    // === PERFORMANCE ===
    /// Baseline makespan before condition and capability factors
    pub base_performance: f64,

    /// Coupling α between mean capability and performance
    ///
    /// Capability factor is `1 - α * mean(capabilities)`. At α = 0 the
    /// evaluator ignores capabilities entirely.
    pub capability_coupling: f64,

    /// Direct condition multiplier for Control
    pub fcond_control: f64,

    /// Direct condition multiplier for GenericXAI
    pub fcond_generic: f64,

    /// Direct condition multiplier for Combined
    pub fcond_xai_cap: f64,

    // === PSYCHOLOGICAL REALISM ===
    /// Hawthorne effect assigned to every assisted operator
    pub hawthorne_base: f64,

    /// Demand-characteristic boost assigned to Combined operators
    pub demand_characteristic_boost: f64,

    /// Complacency added per period under assisted conditions
    pub complacency_rate: f64,

    /// Capability lost per period once complacency passes the threshold
    pub atrophy_rate: f64,

    // === NOISE ===
    /// SD of the additive Gaussian noise on each capability update
    pub measurement_noise_sd: f64,

    /// SD of the multiplicative Gaussian noise on performance (mean 1.0)
    pub performance_noise_sd: f64,

    /// Weight of each capability dimension in the weighted capability index
    pub capability_weights: Vec<f64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            // 12 clusters x 15 operators: 4 clusters per arm, 5 per tier
            n_operators: 180,
            n_clusters: 12,
            operators_per_cluster: 15,
            n_periods: 24,
            n_replications: 100,

            // Combined grows 6x faster than Control
            growth_rate_control: 0.02,
            growth_rate_generic: 0.04,
            growth_rate_xai_cap: 0.12,
            novice_modifier: 1.3,
            expert_modifier: 0.7,

            base_performance: 1000.0,
            capability_coupling: 0.3,
            fcond_control: 1.0,
            fcond_generic: 0.95,
            fcond_xai_cap: 0.85,

            // Complacency crosses 0.5 after period 20
            hawthorne_base: 0.05,
            demand_characteristic_boost: 0.03,
            complacency_rate: 0.025,
            atrophy_rate: 0.005,

            measurement_noise_sd: 0.02,
            performance_noise_sd: 0.05,
            capability_weights: vec![1.0 / CAPABILITY_DIMENSIONS as f64; CAPABILITY_DIMENSIONS],
        }
    }
}

impl SimulationParameters {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth rate for an experimental condition
    pub fn growth_rate(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Control => self.growth_rate_control,
            Condition::GenericXAI => self.growth_rate_generic,
            Condition::Combined => self.growth_rate_xai_cap,
        }
    }

    /// Growth multiplier for an experience tier
    pub fn experience_modifier(&self, experience: ExperienceLevel) -> f64 {
        match experience {
            ExperienceLevel::Novice => self.novice_modifier,
            ExperienceLevel::Intermediate => 1.0,
            ExperienceLevel::Expert => self.expert_modifier,
        }
    }

    /// Direct performance multiplier for a condition
    pub fn condition_factor(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Control => self.fcond_control,
            Condition::GenericXAI => self.fcond_generic,
            Condition::Combined => self.fcond_xai_cap,
        }
    }

    /// Ratio of Combined growth to Control growth
    pub fn growth_rate_ratio(&self) -> f64 {
        if self.growth_rate_control > 0.0 {
            self.growth_rate_xai_cap / self.growth_rate_control
        } else {
            0.0
        }
    }

    /// Operators per experience tier within one cluster
    pub fn operators_per_tier(&self) -> usize {
        self.operators_per_cluster / ExperienceLevel::ALL.len()
    }

    /// Clusters per condition
    pub fn clusters_per_condition(&self) -> usize {
        self.n_clusters / Condition::ALL.len()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.n_clusters == 0 || self.operators_per_cluster == 0 {
            return Err(SimError::Configuration(
                "n_clusters and operators_per_cluster must be positive".into(),
            ));
        }

        if self.n_clusters % Condition::ALL.len() != 0 {
            return Err(SimError::Configuration(format!(
                "n_clusters ({}) must be divisible by 3 to split evenly across conditions",
                self.n_clusters
            )));
        }

        if self.operators_per_cluster % ExperienceLevel::ALL.len() != 0 {
            return Err(SimError::Configuration(format!(
                "operators_per_cluster ({}) must be divisible by 3 to split evenly across experience tiers",
                self.operators_per_cluster
            )));
        }

        let expected = self.n_clusters.checked_mul(self.operators_per_cluster);
        if expected != Some(self.n_operators) {
            return Err(SimError::Configuration(format!(
                "n_operators ({}) must equal n_clusters ({}) x operators_per_cluster ({})",
                self.n_operators, self.n_clusters, self.operators_per_cluster
            )));
        }

        for (name, value) in self.coefficients() {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::Configuration(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        if self.capability_weights.len() != CAPABILITY_DIMENSIONS {
            return Err(SimError::Configuration(format!(
                "capability_weights must have exactly {} entries, got {}",
                CAPABILITY_DIMENSIONS,
                self.capability_weights.len()
            )));
        }

        if let Some(w) = self
            .capability_weights
            .iter()
            .find(|w| !w.is_finite() || **w < 0.0)
        {
            return Err(SimError::Configuration(format!(
                "capability weights must be non-negative finite numbers, got {}",
                w
            )));
        }

        Ok(())
    }

    /// All rates and coefficients that must be non-negative, by name
    fn coefficients(&self) -> [(&'static str, f64); 16] {
        [
            ("growth_rate_control", self.growth_rate_control),
            ("growth_rate_generic", self.growth_rate_generic),
            ("growth_rate_xai_cap", self.growth_rate_xai_cap),
            ("novice_modifier", self.novice_modifier),
            ("expert_modifier", self.expert_modifier),
            ("base_performance", self.base_performance),
            ("capability_coupling", self.capability_coupling),
            ("fcond_control", self.fcond_control),
            ("fcond_generic", self.fcond_generic),
            ("fcond_xai_cap", self.fcond_xai_cap),
            ("hawthorne_base", self.hawthorne_base),
            ("demand_characteristic_boost", self.demand_characteristic_boost),
            ("complacency_rate", self.complacency_rate),
            ("atrophy_rate", self.atrophy_rate),
            ("measurement_noise_sd", self.measurement_noise_sd),
            ("performance_noise_sd", self.performance_noise_sd),
        ]
    }
}

/// A numeric parameter that a sensitivity sweep can vary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Sets `growth_rate_xai_cap = growth_rate_control * value`
    GrowthRateRatio,
    GrowthRateControl,
    GrowthRateGeneric,
    GrowthRateXaiCap,
    NoviceModifier,
    ExpertModifier,
    BasePerformance,
    CapabilityCoupling,
    FcondControl,
    FcondGeneric,
    FcondXaiCap,
    HawthorneBase,
    DemandCharacteristicBoost,
    ComplacencyRate,
    AtrophyRate,
    MeasurementNoiseSd,
    PerformanceNoiseSd,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 17] = [
        SweepParameter::GrowthRateRatio,
        SweepParameter::GrowthRateControl,
        SweepParameter::GrowthRateGeneric,
        SweepParameter::GrowthRateXaiCap,
        SweepParameter::NoviceModifier,
        SweepParameter::ExpertModifier,
        SweepParameter::BasePerformance,
        SweepParameter::CapabilityCoupling,
        SweepParameter::FcondControl,
        SweepParameter::FcondGeneric,
        SweepParameter::FcondXaiCap,
        SweepParameter::HawthorneBase,
        SweepParameter::DemandCharacteristicBoost,
        SweepParameter::ComplacencyRate,
        SweepParameter::AtrophyRate,
        SweepParameter::MeasurementNoiseSd,
        SweepParameter::PerformanceNoiseSd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SweepParameter::GrowthRateRatio => "growth_rate_ratio",
            SweepParameter::GrowthRateControl => "growth_rate_control",
            SweepParameter::GrowthRateGeneric => "growth_rate_generic",
            SweepParameter::GrowthRateXaiCap => "growth_rate_xai_cap",
            SweepParameter::NoviceModifier => "novice_modifier",
            SweepParameter::ExpertModifier => "expert_modifier",
            SweepParameter::BasePerformance => "base_performance",
            SweepParameter::CapabilityCoupling => "capability_coupling",
            SweepParameter::FcondControl => "fcond_control",
            SweepParameter::FcondGeneric => "fcond_generic",
            SweepParameter::FcondXaiCap => "fcond_xai_cap",
            SweepParameter::HawthorneBase => "hawthorne_base",
            SweepParameter::DemandCharacteristicBoost => "demand_characteristic_boost",
            SweepParameter::ComplacencyRate => "complacency_rate",
            SweepParameter::AtrophyRate => "atrophy_rate",
            SweepParameter::MeasurementNoiseSd => "measurement_noise_sd",
            SweepParameter::PerformanceNoiseSd => "performance_noise_sd",
        }
    }

    /// Return a copy of `base` with this parameter set to `value`, validated
    pub fn apply(self, base: &SimulationParameters, value: f64) -> Result<SimulationParameters> {
        let mut params = base.clone();
        let slot = match self {
            SweepParameter::GrowthRateRatio => {
                params.growth_rate_xai_cap = params.growth_rate_control * value;
                None
            }
            SweepParameter::GrowthRateControl => Some(&mut params.growth_rate_control),
            SweepParameter::GrowthRateGeneric => Some(&mut params.growth_rate_generic),
            SweepParameter::GrowthRateXaiCap => Some(&mut params.growth_rate_xai_cap),
            SweepParameter::NoviceModifier => Some(&mut params.novice_modifier),
            SweepParameter::ExpertModifier => Some(&mut params.expert_modifier),
            SweepParameter::BasePerformance => Some(&mut params.base_performance),
            SweepParameter::CapabilityCoupling => Some(&mut params.capability_coupling),
            SweepParameter::FcondControl => Some(&mut params.fcond_control),
            SweepParameter::FcondGeneric => Some(&mut params.fcond_generic),
            SweepParameter::FcondXaiCap => Some(&mut params.fcond_xai_cap),
            SweepParameter::HawthorneBase => Some(&mut params.hawthorne_base),
            SweepParameter::DemandCharacteristicBoost => {
                Some(&mut params.demand_characteristic_boost)
            }
            SweepParameter::ComplacencyRate => Some(&mut params.complacency_rate),
            SweepParameter::AtrophyRate => Some(&mut params.atrophy_rate),
            SweepParameter::MeasurementNoiseSd => Some(&mut params.measurement_noise_sd),
            SweepParameter::PerformanceNoiseSd => Some(&mut params.performance_noise_sd),
        };
        if let Some(slot) = slot {
            *slot = value;
        }

        params.validate()?;
        Ok(params)
    }
}

impl FromStr for SweepParameter {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        SweepParameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SimError::UnknownParameter(s.to_string()))
    }
}

impl std::fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_default_ratio_is_six() {
        let params = SimulationParameters::default();
        assert!((params.growth_rate_ratio() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_must_match_geometry() {
        let params = SimulationParameters {
            n_operators: 179,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_clusters_must_split_into_thirds() {
        let params = SimulationParameters {
            n_operators: 60,
            n_clusters: 4,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_cluster_size_must_split_into_tiers() {
        let params = SimulationParameters {
            n_operators: 48,
            n_clusters: 12,
            operators_per_cluster: 4,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let params = SimulationParameters {
            atrophy_rate: -0.01,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("atrophy_rate"));
    }

    #[test]
    fn test_nan_rejected() {
        let params = SimulationParameters {
            performance_noise_sd: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_weight_length_checked() {
        let params = SimulationParameters {
            capability_weights: vec![0.2; 5],
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("capability_weights"));
    }

    #[test]
    fn test_lookups() {
        let params = SimulationParameters::default();
        assert_eq!(params.growth_rate(Condition::Combined), params.growth_rate_xai_cap);
        assert_eq!(params.experience_modifier(ExperienceLevel::Intermediate), 1.0);
        assert!(params.experience_modifier(ExperienceLevel::Novice) > 1.0);
        assert!(params.experience_modifier(ExperienceLevel::Expert) < 1.0);
        assert_eq!(params.condition_factor(Condition::GenericXAI), params.fcond_generic);
        assert_eq!(params.operators_per_tier(), 5);
        assert_eq!(params.clusters_per_condition(), 4);
    }

    #[test]
    fn test_sweep_parameter_parse() {
        assert_eq!(
            "capability_coupling".parse::<SweepParameter>().unwrap(),
            SweepParameter::CapabilityCoupling
        );
        assert!(matches!(
            "warp_factor".parse::<SweepParameter>(),
            Err(SimError::UnknownParameter(_))
        ));
        for p in SweepParameter::ALL {
            assert_eq!(p.name().parse::<SweepParameter>().unwrap(), p);
        }
    }

    #[test]
    fn test_sweep_ratio_scales_control_rate() {
        let base = SimulationParameters::default();
        let params = SweepParameter::GrowthRateRatio.apply(&base, 3.0).unwrap();
        assert!((params.growth_rate_xai_cap - 0.06).abs() < 1e-12);
        assert_eq!(params.growth_rate_control, base.growth_rate_control);
    }

    #[test]
    fn test_sweep_rejects_negative_value() {
        let base = SimulationParameters::default();
        assert!(SweepParameter::AtrophyRate.apply(&base, -1.0).is_err());
    }
}
