//! Staged validation of a whole work product
//!
//! The run moves through a fixed sequence of stages. Each stage appends its
//! issues to one running list and never short-circuits on earlier errors, so
//! a single pass yields the complete picture.
//!
//! ```text
//! NotStarted -> GoalsValidated -> StrategiesValidated
//!            -> FsrsValidated -> TraceabilityValidated -> Done
//! ```

use crate::config::ValidationConfig;
use crate::cross;
use crate::entity;
use crate::error::{ValidateError, ValidateResult};
use crate::issue::Issue;
use crate::result::ValidationResult;
use fsc_model::WorkProduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a [`Validator`] in the stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing checked yet
    NotStarted,
    /// Goal checks appended
    GoalsValidated,
    /// Strategy checks appended
    StrategiesValidated,
    /// FSR checks appended
    FsrsValidated,
    /// Traceability and criteria checks appended
    TraceabilityValidated,
    /// Verdict computed
    Done,
}

impl Stage {
    /// Snake-case stage name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::NotStarted => "not_started",
            Stage::GoalsValidated => "goals_validated",
            Stage::StrategiesValidated => "strategies_validated",
            Stage::FsrsValidated => "fsrs_validated",
            Stage::TraceabilityValidated => "traceability_validated",
            Stage::Done => "done",
        }
    }

    /// The following stage, `None` once done
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        allowed_transitions(self).first().copied()
    }

    /// Whether the sequence has finished
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Stage::Done
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stages reachable from `from`; at most one, since the sequence is linear
#[must_use]
pub fn allowed_transitions(from: Stage) -> &'static [Stage] {
    use Stage::{Done, FsrsValidated, GoalsValidated, NotStarted, StrategiesValidated, TraceabilityValidated};
    match from {
        NotStarted => &[GoalsValidated],
        GoalsValidated => &[StrategiesValidated],
        StrategiesValidated => &[FsrsValidated],
        FsrsValidated => &[TraceabilityValidated],
        TraceabilityValidated => &[Done],
        Done => &[],
    }
}

/// Check a stage transition against the sequence
pub fn validate_transition(from: Stage, to: Stage) -> ValidateResult<()> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(ValidateError::illegal_transition(from, to))
    }
}

/// Staged validator over one work product
///
/// Borrowing the records keeps the run a pure function of its inputs:
/// two runs over the same work product give identical issue lists.
#[derive(Debug)]
pub struct Validator<'a> {
    work: &'a WorkProduct,
    config: &'a ValidationConfig,
    stage: Stage,
    issues: Vec<Issue>,
}

impl<'a> Validator<'a> {
    /// Validator at [`Stage::NotStarted`]
    #[must_use]
    pub fn new(work: &'a WorkProduct, config: &'a ValidationConfig) -> Self {
        Self {
            work,
            config,
            stage: Stage::NotStarted,
            issues: Vec::new(),
        }
    }

    /// Current stage
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Issues appended so far
    #[inline]
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Run the next stage and return the stage reached
    ///
    /// # Errors
    ///
    /// [`ValidateError::IllegalTransition`] when called after [`Stage::Done`].
    pub fn advance(&mut self) -> ValidateResult<Stage> {
        let to = self
            .stage
            .next()
            .ok_or_else(|| ValidateError::illegal_transition(self.stage, Stage::Done))?;
        self.transition(to)?;
        Ok(to)
    }

    /// Move to `to`, appending that stage's issues
    ///
    /// # Errors
    ///
    /// [`ValidateError::IllegalTransition`] unless `to` directly follows the
    /// current stage.
    pub fn transition(&mut self, to: Stage) -> ValidateResult<()> {
        validate_transition(self.stage, to)?;

        let before = self.issues.len();
        let work = self.work;
        let config = self.config;
        match to {
            Stage::NotStarted => {}
            Stage::GoalsValidated => {
                self.issues.extend(entity::validate_goals(&work.safety_goals, config));
            }
            Stage::StrategiesValidated => {
                self.issues
                    .extend(cross::strategy_coverage(&work.safety_goals, &work.strategies));
                self.issues
                    .extend(entity::validate_strategies(&work.strategies, config));
            }
            Stage::FsrsValidated => {
                self.issues
                    .extend(cross::fsr_coverage(&work.safety_goals, &work.fsrs, config));
                self.issues.extend(entity::validate_fsrs(&work.fsrs, config));
                self.issues
                    .extend(cross::allocation_completeness(&work.fsrs, config));
            }
            Stage::TraceabilityValidated => {
                self.issues
                    .extend(cross::traceability(&work.safety_goals, &work.fsrs));
                self.issues
                    .extend(entity::validate_criteria(&work.validation_criteria, config));
                self.issues.extend(cross::criteria_traceability(
                    &work.safety_goals,
                    &work.fsrs,
                    &work.validation_criteria,
                ));
            }
            Stage::Done => {}
        }

        tracing::debug!(
            system = %work.system_name,
            from = %self.stage,
            to = %to,
            new_issues = self.issues.len() - before,
            "Validation stage complete"
        );
        self.stage = to;
        Ok(())
    }

    /// Run every remaining stage and compute the verdict
    #[must_use]
    pub fn run(mut self) -> ValidationResult {
        while let Some(next) = self.stage.next() {
            // The sequence only offers legal successors
            if self.transition(next).is_err() {
                break;
            }
        }
        self.finish()
    }

    /// Verdict over the issues appended so far
    #[must_use]
    pub fn finish(self) -> ValidationResult {
        let result = ValidationResult::from_issues(self.issues);
        tracing::info!(
            system = %self.work.system_name,
            passed = result.passed,
            errors = result.error_count(),
            warnings = result.warning_count(),
            info = result.info_count(),
            "Validation finished"
        );
        result
    }
}

/// Validate a work product in one pass
#[must_use]
pub fn validate(work: &WorkProduct, config: &ValidationConfig) -> ValidationResult {
    Validator::new(work, config).run()
}
