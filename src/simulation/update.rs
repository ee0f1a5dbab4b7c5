//! Per-period update engine
//!
//! Capabilities grow logistically toward 1.0 at a rate set by condition and
//! experience. Assisted operators accumulate complacency; past the threshold
//! every dimension erodes by the atrophy rate each period.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::params::SimulationParameters;
use crate::population::Operator;

/// Advance one operator by one period
pub fn update_operator<R: Rng + ?Sized>(
    operator: &mut Operator,
    params: &SimulationParameters,
    rng: &mut R,
) {
    let rate =
        params.growth_rate(operator.condition) * params.experience_modifier(operator.experience);

    for value in operator.capabilities.iter_mut() {
        let growth = rate * (1.0 - *value);
        let z: f64 = StandardNormal.sample(rng);
        let noise = z * params.measurement_noise_sd;
        *value = (*value + growth + noise).clamp(0.0, 1.0);
    }

    if operator.condition.is_assisted() {
        operator.complacency += params.complacency_rate;
    }

    if operator.is_atrophying() {
        for value in operator.capabilities.iter_mut() {
            *value = (*value - params.atrophy_rate).clamp(0.0, 1.0);
        }
    }

    operator.period += 1;
}
