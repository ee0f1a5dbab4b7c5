//! Operator population
//!
//! Operators live in a single arena indexed by `OperatorId`. Clusters and
//! conditions are derived views over that arena: the builder lays operators
//! out cluster by cluster, so every cluster is a contiguous slice.
//!
//! The population also owns the seeded generator for its run. The builder
//! draws initial capabilities from it and the driver keeps drawing from the
//! same stream, so a run is fully determined by `(parameters, seed)`.

pub mod builder;
pub mod operator;

pub use builder::build_population;
pub use operator::{Capabilities, Operator, COMPLACENCY_THRESHOLD};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{ClusterId, Condition, ExperienceLevel, OperatorId, Period};

/// A cluster of operators sharing one condition
#[derive(Debug, Clone, Copy)]
pub struct Cluster<'a> {
    pub id: ClusterId,
    pub condition: Condition,
    pub members: &'a [Operator],
}

/// Arena of operators plus the run's random stream
#[derive(Debug, Clone)]
pub struct Population {
    operators: Vec<Operator>,
    operators_per_cluster: usize,
    period: Period,
    rng: ChaCha8Rng,
}

impl Population {
    /// Wrap an already-built operator list
    ///
    /// `build_population` is the normal entry point. This constructor exists
    /// for hand-assembled populations, which may leave conditions empty.
    pub fn from_operators(
        operators: Vec<Operator>,
        operators_per_cluster: usize,
        seed: u64,
    ) -> Self {
        Self::with_rng(operators, operators_per_cluster, ChaCha8Rng::seed_from_u64(seed))
    }

    pub(crate) fn with_rng(
        operators: Vec<Operator>,
        operators_per_cluster: usize,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            operators,
            operators_per_cluster,
            period: 0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn get(&self, id: OperatorId) -> Option<&Operator> {
        self.operators.get(id.index())
    }

    pub fn get_mut(&mut self, id: OperatorId) -> Option<&mut Operator> {
        self.operators.get_mut(id.index())
    }

    /// Operators and the random stream, borrowed together for a period update
    pub fn split_mut(&mut self) -> (&mut [Operator], &mut ChaCha8Rng) {
        (&mut self.operators, &mut self.rng)
    }

    /// Global period counter
    pub fn period(&self) -> Period {
        self.period
    }

    pub fn advance_period(&mut self) {
        self.period += 1;
    }

    pub fn by_condition(&self, condition: Condition) -> impl Iterator<Item = &Operator> {
        self.operators
            .iter()
            .filter(move |op| op.condition == condition)
    }

    /// Number of operators with the given condition and experience tier
    pub fn count(&self, condition: Condition, experience: ExperienceLevel) -> usize {
        self.by_condition(condition)
            .filter(|op| op.experience == experience)
            .count()
    }

    /// View of a single cluster
    pub fn cluster(&self, id: ClusterId) -> Option<Cluster<'_>> {
        if self.operators_per_cluster == 0 {
            return None;
        }
        let start = id.index().checked_mul(self.operators_per_cluster)?;
        let end = start.checked_add(self.operators_per_cluster)?;
        let members = self.operators.get(start..end)?;
        let condition = members.first()?.condition;
        Some(Cluster {
            id,
            condition,
            members,
        })
    }

    /// All clusters in index order
    pub fn clusters(&self) -> Vec<Cluster<'_>> {
        if self.operators_per_cluster == 0 {
            return Vec::new();
        }
        self.operators
            .chunks(self.operators_per_cluster)
            .filter_map(|members| {
                let first = members.first()?;
                Some(Cluster {
                    id: first.cluster,
                    condition: first.condition,
                    members,
                })
            })
            .collect()
    }
}
