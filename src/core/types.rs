//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Number of tracked capability dimensions
pub const CAPABILITY_DIMENSIONS: usize = 8;

/// Simulation period counter (discrete time unit)
pub type Period = u32;

/// Unique identifier for operators (index into the population arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorId(pub u32);

impl OperatorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Cluster identifier (operators in a cluster share one condition)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClusterId(pub u32);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Experimental arm an operator is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    /// No decision support
    Control,
    /// Generic XAI explanations, not tuned to the operator
    GenericXAI,
    /// XAI combined with capability-aware adaptation
    Combined,
}

impl Condition {
    /// All conditions in cluster assignment order
    pub const ALL: [Condition; 3] = [
        Condition::Control,
        Condition::GenericXAI,
        Condition::Combined,
    ];

    /// Whether the operator works with assistance (and can grow complacent)
    pub fn is_assisted(self) -> bool {
        !matches!(self, Condition::Control)
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Control => "Control",
            Condition::GenericXAI => "GenericXAI",
            Condition::Combined => "Combined",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Experience tier of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Novice,
    Intermediate,
    Expert,
}

impl ExperienceLevel {
    /// Tiers in per-cluster slot order
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Novice,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Expert,
    ];
}

/// Professional-skill axes tracked per operator, each scored in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CapabilityDimension {
    Autonomy,
    LearningAgility,
    ProblemSolving,
    SituationalAwareness,
    DecisionQuality,
    ToolProficiency,
    Collaboration,
    Adaptability,
}

impl CapabilityDimension {
    /// Dimensions in vector order
    pub const ALL: [CapabilityDimension; CAPABILITY_DIMENSIONS] = [
        CapabilityDimension::Autonomy,
        CapabilityDimension::LearningAgility,
        CapabilityDimension::ProblemSolving,
        CapabilityDimension::SituationalAwareness,
        CapabilityDimension::DecisionQuality,
        CapabilityDimension::ToolProficiency,
        CapabilityDimension::Collaboration,
        CapabilityDimension::Adaptability,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CapabilityDimension::Autonomy => "autonomy",
            CapabilityDimension::LearningAgility => "learning_agility",
            CapabilityDimension::ProblemSolving => "problem_solving",
            CapabilityDimension::SituationalAwareness => "situational_awareness",
            CapabilityDimension::DecisionQuality => "decision_quality",
            CapabilityDimension::ToolProficiency => "tool_proficiency",
            CapabilityDimension::Collaboration => "collaboration",
            CapabilityDimension::Adaptability => "adaptability",
        }
    }
}

/// One value per experimental condition
///
/// Used for everything that is aggregated by arm: trajectories,
/// final-period performance, descriptive statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerCondition<T> {
    pub control: T,
    pub generic_xai: T,
    pub combined: T,
}

impl<T> PerCondition<T> {
    /// Build by evaluating `f` once per condition, in `Condition::ALL` order
    pub fn from_fn(mut f: impl FnMut(Condition) -> T) -> Self {
        Self {
            control: f(Condition::Control),
            generic_xai: f(Condition::GenericXAI),
            combined: f(Condition::Combined),
        }
    }

    pub fn get(&self, condition: Condition) -> &T {
        match condition {
            Condition::Control => &self.control,
            Condition::GenericXAI => &self.generic_xai,
            Condition::Combined => &self.combined,
        }
    }

    pub fn get_mut(&mut self, condition: Condition) -> &mut T {
        match condition {
            Condition::Control => &mut self.control,
            Condition::GenericXAI => &mut self.generic_xai,
            Condition::Combined => &mut self.combined,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, &T)> {
        Condition::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Condition, &T) -> U) -> PerCondition<U> {
        PerCondition::from_fn(|c| f(c, self.get(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_control_is_unassisted() {
        assert!(!Condition::Control.is_assisted());
        assert!(Condition::GenericXAI.is_assisted());
        assert!(Condition::Combined.is_assisted());
    }

    #[test]
    fn test_dimension_indices_match_vector_order() {
        for (i, dim) in CapabilityDimension::ALL.iter().enumerate() {
            assert_eq!(dim.index(), i);
        }
    }

    #[test]
    fn test_per_condition_lookup() {
        let mut values = PerCondition::from_fn(|c| c.name().len());
        assert_eq!(*values.get(Condition::Control), 7);
        *values.get_mut(Condition::Combined) = 0;
        assert_eq!(values.combined, 0);

        let order: Vec<Condition> = values.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Condition::ALL.to_vec());
    }
}
