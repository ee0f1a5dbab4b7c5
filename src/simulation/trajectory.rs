//! Per-condition trajectories recorded by the driver

use serde::{Deserialize, Serialize};

use crate::core::types::{CapabilityDimension, Condition, PerCondition, CAPABILITY_DIMENSIONS};

/// Mean performance per condition, one entry per aggregated period
pub type PerformanceTrajectories = PerCondition<Vec<f64>>;

/// Mean capabilities per condition, one column per aggregated period
pub type CapabilityTrajectories = PerCondition<CapabilityMatrix>;

/// 8 x periods matrix of mean capabilities, plus the weighted index series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityMatrix {
    pub dimensions: [Vec<f64>; CAPABILITY_DIMENSIONS],
    pub weighted_index: Vec<f64>,
}

impl CapabilityMatrix {
    /// Append one period's column
    pub fn push(&mut self, means: &[f64; CAPABILITY_DIMENSIONS], weighted_index: f64) {
        for (series, &mean) in self.dimensions.iter_mut().zip(means) {
            series.push(mean);
        }
        self.weighted_index.push(weighted_index);
    }

    pub fn dimension(&self, dim: CapabilityDimension) -> &[f64] {
        &self.dimensions[dim.index()]
    }

    /// Number of recorded periods
    pub fn len(&self) -> usize {
        self.weighted_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weighted_index.is_empty()
    }

    /// Column for the last recorded period
    pub fn last(&self) -> Option<[f64; CAPABILITY_DIMENSIONS]> {
        let mut column = [0.0; CAPABILITY_DIMENSIONS];
        for (slot, series) in column.iter_mut().zip(&self.dimensions) {
            *slot = *series.last()?;
        }
        Some(column)
    }
}

/// Everything a run records, per condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectories {
    /// Periods simulated
    pub periods: u32,
    pub performance: PerformanceTrajectories,
    pub capabilities: CapabilityTrajectories,
    /// Mean complacency per period
    pub complacency: PerCondition<Vec<f64>>,
}

impl Trajectories {
    /// Mean performance of a condition in the last recorded period
    pub fn final_performance(&self, condition: Condition) -> Option<f64> {
        self.performance.get(condition).last().copied()
    }

    /// Mean capability vector of a condition in the last recorded period
    pub fn final_capabilities(&self, condition: Condition) -> Option<[f64; CAPABILITY_DIMENSIONS]> {
        self.capabilities.get(condition).last()
    }

    pub fn into_parts(self) -> (PerformanceTrajectories, CapabilityTrajectories) {
        (self.performance, self.capabilities)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per condition with start and end values
    pub fn summary(&self) -> String {
        let mut out = format!("Simulated {} periods\n", self.periods);
        for (condition, series) in self.performance.iter() {
            let (Some(first), Some(last)) = (series.first(), series.last()) else {
                out.push_str(&format!("{:<12} no data\n", condition.name()));
                continue;
            };
            let capability = self
                .capabilities
                .get(condition)
                .weighted_index
                .last()
                .copied()
                .unwrap_or(0.0);
            let complacency = self
                .complacency
                .get(condition)
                .last()
                .copied()
                .unwrap_or(0.0);
            out.push_str(&format!(
                "{:<12} performance {:>8.1} -> {:>8.1}  capability {:.3}  complacency {:.3}\n",
                condition.name(),
                first,
                last,
                capability,
                complacency,
            ));
        }
        out
    }
}
