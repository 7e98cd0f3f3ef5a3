//! Validation settings

use crate::error::{ValidateError, ValidateResult};
use fsc_model::RECOMMENDED_FSRS_PER_GOAL;
use serde::{Deserialize, Serialize};

/// Thresholds and word lists used by the rule checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Shortest acceptable goal, FSR or criterion text
    pub min_description_chars: usize,
    /// Shortest strategy narrative that is not flagged as too brief
    pub min_strategy_chars: usize,
    /// Recommended FSR count per safety-relevant goal, inclusive
    pub recommended_fsrs_per_goal: (usize, usize),
    /// Phrases that make a goal read like an implementation
    pub implementation_phrases: Vec<String>,
    /// Opening verbs that make a goal read like a design task
    pub imperative_verbs: Vec<String>,
    /// Words that make an FSR hard to measure
    pub vague_terms: Vec<String>,
    /// Unallocated FSR IDs listed in the aggregated allocation issue
    pub allocation_preview_limit: usize,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 10,
            min_strategy_chars: 20,
            recommended_fsrs_per_goal: RECOMMENDED_FSRS_PER_GOAL,
            implementation_phrases: owned(&[
                "using",
                "via",
                "through",
                "by means of",
                "implement",
                "by using",
                "utilizing",
                "with the use of",
            ]),
            imperative_verbs: owned(&["design", "implement", "use"]),
            vague_terms: owned(&["appropriate", "adequate", "reasonable", "sufficient", "properly"]),
            allocation_preview_limit: 5,
        }
    }
}

impl ValidationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> ValidateResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// With minimum description length
    #[inline]
    #[must_use]
    pub fn with_min_description_chars(mut self, chars: usize) -> Self {
        self.min_description_chars = chars;
        self
    }

    /// With minimum strategy narrative length
    #[inline]
    #[must_use]
    pub fn with_min_strategy_chars(mut self, chars: usize) -> Self {
        self.min_strategy_chars = chars;
        self
    }

    /// With recommended FSR band
    #[inline]
    #[must_use]
    pub fn with_recommended_fsrs_per_goal(mut self, low: usize, high: usize) -> Self {
        self.recommended_fsrs_per_goal = (low, high);
        self
    }

    fn check(&self) -> ValidateResult<()> {
        let (low, high) = self.recommended_fsrs_per_goal;
        if low > high {
            return Err(ValidateError::invalid_config(
                "recommended_fsrs_per_goal",
                format!("lower bound {low} exceeds upper bound {high}"),
            ));
        }
        if self.min_description_chars == 0 {
            return Err(ValidateError::invalid_config(
                "min_description_chars",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
