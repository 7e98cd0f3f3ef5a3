//! Work product bundle

use crate::records::{Fsr, SafetyGoal, SafetyStrategy, ValidationCriterion};
use serde::{Deserialize, Serialize};

/// Everything produced for one item's functional safety concept
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkProduct {
    /// Item / system name
    pub system_name: String,
    /// Safety goals
    pub safety_goals: Vec<SafetyGoal>,
    /// Safety strategies
    pub strategies: Vec<SafetyStrategy>,
    /// Functional safety requirements
    pub fsrs: Vec<Fsr>,
    /// Validation criteria
    pub validation_criteria: Vec<ValidationCriterion>,
}

impl WorkProduct {
    /// Empty work product for a system
    pub fn new(system_name: impl Into<String>) -> Self {
        Self {
            system_name: system_name.into(),
            ..Self::default()
        }
    }

    /// Goals, strategies and FSRs present, every FSR allocated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.safety_goals.is_empty()
            && !self.strategies.is_empty()
            && !self.fsrs.is_empty()
            && self.fsrs.iter().all(Fsr::is_allocated)
    }

    /// Summary counts
    #[must_use]
    pub fn stats(&self) -> WorkProductStats {
        WorkProductStats {
            system: self.system_name.clone(),
            total_safety_goals: self.safety_goals.len(),
            safety_relevant_goals: self
                .safety_goals
                .iter()
                .filter(|g| g.is_safety_relevant())
                .count(),
            total_strategies: self.strategies.len(),
            total_fsrs: self.fsrs.len(),
            allocated_fsrs: self.fsrs.iter().filter(|f| f.is_allocated()).count(),
            validation_criteria: self.validation_criteria.len(),
            complete: self.is_complete(),
        }
    }
}

/// Counts over a [`WorkProduct`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct WorkProductStats {
    pub system: String,
    pub total_safety_goals: usize,
    pub safety_relevant_goals: usize,
    pub total_strategies: usize,
    pub total_fsrs: usize,
    pub allocated_fsrs: usize,
    pub validation_criteria: usize,
    pub complete: bool,
}
