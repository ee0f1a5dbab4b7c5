//! Descriptive statistics and effect sizes

use serde::{Deserialize, Serialize};

/// Count, mean and population SD of a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
}

impl DescriptiveStats {
    /// Summarize a sample; an empty sample yields all zeros
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            n: samples.len(),
            mean: mean(samples),
            sd: population_sd(samples),
        }
    }
}

/// Arithmetic mean, 0 for an empty sample
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation (divides by n), 0 for an empty sample
pub fn population_sd(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let var = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / samples.len() as f64;
    var.sqrt()
}

/// Percent reduction of `treatment_mean` relative to `control_mean`
///
/// Positive when the treatment is faster (lower makespan).
pub fn percent_improvement(control_mean: f64, treatment_mean: f64) -> f64 {
    if control_mean == 0.0 {
        return 0.0;
    }
    (control_mean - treatment_mean) / control_mean * 100.0
}

/// Standardized mean difference against the Control replication SD
///
/// Returns 0 when the Control sample has no spread.
pub fn cohens_d(control_samples: &[f64], treatment_mean: f64) -> f64 {
    let sd = population_sd(control_samples);
    if sd <= f64::EPSILON {
        tracing::warn!(
            n = control_samples.len(),
            "Control SD is zero, reporting Cohen's d as 0"
        );
        return 0.0;
    }
    (mean(control_samples) - treatment_mean) / sd
}
