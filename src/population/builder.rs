//! Population construction
//!
//! Cluster index decides the condition (first third Control, second third
//! GenericXAI, last third Combined). Slot index within a cluster decides the
//! experience tier (Novice, Intermediate, Expert in equal thirds).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::core::params::SimulationParameters;
use crate::core::types::{
    ClusterId, Condition, ExperienceLevel, OperatorId, CAPABILITY_DIMENSIONS,
};
use crate::population::operator::{Capabilities, Operator};
use crate::population::Population;

/// Lower bound of initial capability draws
pub const INITIAL_CAPABILITY_MIN: f64 = 0.2;

/// Upper bound of initial capability draws
pub const INITIAL_CAPABILITY_MAX: f64 = 0.4;

/// Build the operator population for one run
///
/// Fails with a configuration error when the parameters are invalid,
/// including any geometry that does not split evenly into three conditions
/// and three experience tiers.
pub fn build_population(params: &SimulationParameters, seed: u64) -> Result<Population> {
    params.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let clusters_per_condition = params.clusters_per_condition();
    let per_tier = params.operators_per_tier();

    let mut operators = Vec::with_capacity(params.n_operators);

    for cluster_idx in 0..params.n_clusters {
        let condition = condition_for_cluster(cluster_idx, clusters_per_condition);

        for slot in 0..params.operators_per_cluster {
            let experience = experience_for_slot(slot, per_tier);
            let id = OperatorId(operators.len() as u32);

            let mut values = [0.0; CAPABILITY_DIMENSIONS];
            for value in values.iter_mut() {
                *value = rng.gen_range(INITIAL_CAPABILITY_MIN..=INITIAL_CAPABILITY_MAX);
            }

            operators.push(Operator {
                id,
                cluster: ClusterId(cluster_idx as u32),
                condition,
                experience,
                capabilities: Capabilities::new(values),
                base_performance: params.base_performance,
                hawthorne_effect: if condition.is_assisted() {
                    params.hawthorne_base
                } else {
                    0.0
                },
                demand_characteristic: if condition == Condition::Combined {
                    params.demand_characteristic_boost
                } else {
                    0.0
                },
                complacency: 0.0,
                period: 0,
            });
        }
    }

    tracing::debug!(
        seed,
        operators = operators.len(),
        clusters = params.n_clusters,
        "Built population"
    );

    Ok(Population::with_rng(operators, params.operators_per_cluster, rng))
}

fn condition_for_cluster(cluster_idx: usize, clusters_per_condition: usize) -> Condition {
    match cluster_idx / clusters_per_condition.max(1) {
        0 => Condition::Control,
        1 => Condition::GenericXAI,
        _ => Condition::Combined,
    }
}

fn experience_for_slot(slot: usize, per_tier: usize) -> ExperienceLevel {
    match slot / per_tier.max(1) {
        0 => ExperienceLevel::Novice,
        1 => ExperienceLevel::Intermediate,
        _ => ExperienceLevel::Expert,
    }
}
