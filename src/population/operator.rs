//! Operator state: identity, assignment, capabilities, psychological state

use serde::{Deserialize, Serialize};

use crate::core::types::{
    CapabilityDimension, ClusterId, Condition, ExperienceLevel, OperatorId, Period,
    CAPABILITY_DIMENSIONS,
};

/// Complacency level above which capabilities start to atrophy
pub const COMPLACENCY_THRESHOLD: f64 = 0.5;

/// Capability vector, every component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capabilities(pub [f64; CAPABILITY_DIMENSIONS]);

impl Capabilities {
    /// Build from raw values, clamping each into [0, 1]
    pub fn new(values: [f64; CAPABILITY_DIMENSIONS]) -> Self {
        let mut caps = Self(values);
        caps.clamp();
        caps
    }

    /// All dimensions at the same level
    pub fn uniform(value: f64) -> Self {
        Self::new([value; CAPABILITY_DIMENSIONS])
    }

    pub fn get(&self, dim: CapabilityDimension) -> f64 {
        self.0[dim.index()]
    }

    pub fn values(&self) -> &[f64; CAPABILITY_DIMENSIONS] {
        &self.0
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.0.iter_mut()
    }

    /// Unweighted mean across all dimensions
    pub fn mean(&self) -> f64 {
        self.0.iter().sum::<f64>() / CAPABILITY_DIMENSIONS as f64
    }

    /// Weighted capability index, normalized by the weight total
    ///
    /// Returns the unweighted mean when the weights sum to zero.
    pub fn weighted(&self, weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().take(CAPABILITY_DIMENSIONS).sum();
        if total <= 0.0 {
            return self.mean();
        }
        self.0
            .iter()
            .zip(weights)
            .map(|(value, weight)| value * weight)
            .sum::<f64>()
            / total
    }

    /// Force every component back into [0, 1]
    pub fn clamp(&mut self) {
        for value in self.0.iter_mut() {
            *value = value.clamp(0.0, 1.0);
        }
    }
}

/// A single operator in the population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub cluster: ClusterId,
    pub condition: Condition,
    pub experience: ExperienceLevel,
    pub capabilities: Capabilities,
    /// Baseline makespan for this operator
    pub base_performance: f64,
    /// Hawthorne-effect magnitude (0 under Control)
    pub hawthorne_effect: f64,
    /// Demand-characteristic magnitude (Combined only)
    pub demand_characteristic: f64,
    /// Accumulated complacency; never decreases
    pub complacency: f64,
    /// Periods this operator has been advanced
    pub period: Period,
}

impl Operator {
    /// Whether complacency has crossed the atrophy threshold
    pub fn is_atrophying(&self) -> bool {
        self.complacency > COMPLACENCY_THRESHOLD
    }
}
