//! Simulation driver
//!
//! Each period: update every operator, then evaluate every operator on its
//! updated state, then aggregate by condition. Operators never read each
//! other's state, and the only shared resource is the population's seeded
//! random stream, consumed in operator order.

use crate::core::params::SimulationParameters;
use crate::core::types::{Condition, PerCondition, CAPABILITY_DIMENSIONS};
use crate::population::{Operator, Population};
use crate::simulation::evaluate::evaluate_performance;
use crate::simulation::trajectory::Trajectories;
use crate::simulation::update::update_operator;

/// Running sums for one condition within one period
#[derive(Debug, Clone, Default)]
struct ConditionAccumulator {
    count: usize,
    performance: f64,
    capabilities: [f64; CAPABILITY_DIMENSIONS],
    weighted_index: f64,
    complacency: f64,
}

impl ConditionAccumulator {
    fn add(&mut self, operator: &Operator, performance: f64, weights: &[f64]) {
        self.count += 1;
        self.performance += performance;
        for (sum, value) in self.capabilities.iter_mut().zip(operator.capabilities.values()) {
            *sum += value;
        }
        self.weighted_index += operator.capabilities.weighted(weights);
        self.complacency += operator.complacency;
    }
}

/// Run `n_periods` periods over the whole population
pub fn run_simulation(
    population: &mut Population,
    params: &SimulationParameters,
    n_periods: u32,
    ablate_condition_factor: bool,
) -> Trajectories {
    let mut trajectories = Trajectories {
        periods: n_periods,
        ..Default::default()
    };
    let mut performances = Vec::with_capacity(population.len());

    for _ in 0..n_periods {
        let (operators, rng) = population.split_mut();

        // 1. Update
        for operator in operators.iter_mut() {
            update_operator(operator, params, rng);
        }

        // 2. Evaluate on the updated state
        performances.clear();
        performances.extend(operators.iter().map(|operator| {
            evaluate_performance(operator, params, ablate_condition_factor, rng)
        }));

        // 3. Aggregate
        let mut sums: PerCondition<ConditionAccumulator> = PerCondition::default();
        for (operator, &performance) in operators.iter().zip(&performances) {
            sums.get_mut(operator.condition)
                .add(operator, performance, &params.capability_weights);
        }

        population.advance_period();
        let period = population.period();

        for condition in Condition::ALL {
            let acc = sums.get(condition);
            if acc.count == 0 {
                tracing::warn!(period, %condition, "No operators in condition, skipping aggregate");
                continue;
            }
            let n = acc.count as f64;

            trajectories
                .performance
                .get_mut(condition)
                .push(acc.performance / n);

            let means = acc.capabilities.map(|sum| sum / n);
            trajectories
                .capabilities
                .get_mut(condition)
                .push(&means, acc.weighted_index / n);

            trajectories
                .complacency
                .get_mut(condition)
                .push(acc.complacency / n);
        }

        tracing::debug!(
            period,
            control = ?trajectories.performance.control.last(),
            generic = ?trajectories.performance.generic_xai.last(),
            combined = ?trajectories.performance.combined.last(),
            "Period complete"
        );
    }

    trajectories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ClusterId, ExperienceLevel, OperatorId};
    use crate::population::{build_population, Capabilities};

    fn small_params() -> SimulationParameters {
        SimulationParameters {
            n_operators: 18,
            n_clusters: 3,
            operators_per_cluster: 6,
            n_periods: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_trajectory_lengths() {
        let params = small_params();
        let mut pop = build_population(&params, 1).unwrap();
        let traj = run_simulation(&mut pop, &params, params.n_periods, false);

        for condition in Condition::ALL {
            assert_eq!(traj.performance.get(condition).len(), 5);
            assert_eq!(traj.capabilities.get(condition).len(), 5);
            assert_eq!(traj.complacency.get(condition).len(), 5);
        }
        assert_eq!(pop.period(), 5);
        assert!(pop.operators().iter().all(|op| op.period == 5));
    }

    #[test]
    fn test_zero_periods() {
        let params = small_params();
        let mut pop = build_population(&params, 1).unwrap();
        let traj = run_simulation(&mut pop, &params, 0, false);

        for condition in Condition::ALL {
            assert!(traj.performance.get(condition).is_empty());
            assert!(traj.capabilities.get(condition).is_empty());
            assert!(traj.final_performance(condition).is_none());
        }
        assert_eq!(pop.period(), 0);
    }

    #[test]
    fn test_empty_condition_is_skipped() {
        let params = small_params();
        let operators: Vec<Operator> = (0..3)
            .map(|i| Operator {
                id: OperatorId(i),
                cluster: ClusterId(0),
                condition: Condition::Control,
                experience: ExperienceLevel::ALL[i as usize],
                capabilities: Capabilities::uniform(0.3),
                base_performance: params.base_performance,
                hawthorne_effect: 0.0,
                demand_characteristic: 0.0,
                complacency: 0.0,
                period: 0,
            })
            .collect();
        let mut pop = Population::from_operators(operators, 3, 8);

        let traj = run_simulation(&mut pop, &params, 4, false);

        assert_eq!(traj.performance.control.len(), 4);
        assert!(traj.performance.generic_xai.is_empty());
        assert!(traj.performance.combined.is_empty());
        assert!(traj.capabilities.combined.is_empty());
    }

    #[test]
    fn test_complacency_trajectory() {
        let params = small_params();
        let mut pop = build_population(&params, 2).unwrap();
        let traj = run_simulation(&mut pop, &params, 4, false);

        assert!(traj.complacency.control.iter().all(|&c| c == 0.0));
        let last = *traj.complacency.combined.last().unwrap();
        assert!((last - 4.0 * params.complacency_rate).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let params = small_params();
        let mut a = build_population(&params, 42).unwrap();
        let mut b = build_population(&params, 42).unwrap();

        let ta = run_simulation(&mut a, &params, 10, true);
        let tb = run_simulation(&mut b, &params, 10, true);
        assert_eq!(ta, tb);
    }
}
