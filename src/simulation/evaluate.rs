//! Performance evaluator
//!
//! Makespan-like score, lower is better:
//! `operator base * condition_factor * (1 - α * mean(capabilities)) * noise`,
//! floored at `MIN_PERFORMANCE`. Ablating the condition factor leaves
//! capability as the only channel between condition and performance.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::params::SimulationParameters;
use crate::population::Operator;

/// Floor for any evaluated performance value
pub const MIN_PERFORMANCE: f64 = 100.0;

/// Evaluate one operator's performance for the current period
pub fn evaluate_performance<R: Rng + ?Sized>(
    operator: &Operator,
    params: &SimulationParameters,
    ablate_condition_factor: bool,
    rng: &mut R,
) -> f64 {
    let mut performance = operator.base_performance;

    if !ablate_condition_factor {
        performance *= params.condition_factor(operator.condition);
    }

    performance *= 1.0 - params.capability_coupling * operator.capabilities.mean();

    let z: f64 = StandardNormal.sample(rng);
    performance *= 1.0 + z * params.performance_noise_sd;

    performance.max(MIN_PERFORMANCE)
}
