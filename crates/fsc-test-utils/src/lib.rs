//! Testing utilities for the FSC workspace
//!
//! Record builders, canonical fixture texts and log setup shared by the
//! integration tests.

#![allow(missing_docs)]

use fsc_model::{Fsr, SafetyGoal, SafetyStrategy, StrategyKind, ValidationCriterion, WorkProduct};

/// One FSR as labeled blocks, terminated by a delimiter
pub const FSR_LABELED_TEXT: &str = "FSR-ID: FSR-SG-001-DET-1\n\
Description: Detect over-voltage >5%\n\
ASIL: C\n\
Safety Goal: SG-001\n\
---";

/// The same FSR as a markdown table row
pub const FSR_TABLE_TEXT: &str = "\
| FSR ID | Description | Allocated To | ASIL | Safety Goal | Verification | Timing |
|--------|-------------|--------------|------|-------------|--------------|--------|
| FSR-SG-001-DET-1 | Detect over-voltage >5% | Sensor | C | SG-001 | HIL test | 100ms |
";

/// Safety-relevant goal with safe state and FTTI filled in
pub fn goal(id: &str, asil: &str) -> SafetyGoal {
    SafetyGoal::new(id, format!("Avoid hazardous behaviour covered by {id}"), asil)
        .with_safe_state("Function switched off with driver warning")
        .with_ftti("100 ms")
}

/// FSR that passes every per-record check
pub fn fsr(id: &str, goal_id: &str, asil: &str) -> Fsr {
    Fsr::new(id, goal_id, "Detect deviation above 5% within 20 ms", asil)
        .with_allocation("Main ECU")
        .with_operating_modes("Normal, Degraded")
        .with_timing("20 ms")
        .with_safe_state("Output disabled")
        .with_verification("HIL fault injection")
}

/// Strategy with every aspect written out
pub fn complete_strategy(goal_id: &str) -> SafetyStrategy {
    StrategyKind::ALL
        .into_iter()
        .fold(SafetyStrategy::new(goal_id), |strategy, kind| {
            strategy.with_strategy(
                kind,
                format!("{} measures documented for {goal_id}", kind.display_name()),
            )
        })
}

/// Goal-level criterion with method and success criteria
pub fn criterion(id: &str, goal_id: &str) -> ValidationCriterion {
    ValidationCriterion::for_goal(id, goal_id, "Vehicle reaches the safe state in every test run")
        .with_method("Vehicle test")
        .with_success_criteria("Safe state reached within FTTI in 10 of 10 runs")
}

/// Work product whose goals carry a complete strategy and one criterion each
pub fn work_product(goals: Vec<SafetyGoal>, fsrs: Vec<Fsr>) -> WorkProduct {
    let mut work = WorkProduct::new("Test item");
    work.strategies = goals.iter().map(|g| complete_strategy(&g.id)).collect();
    work.validation_criteria = goals
        .iter()
        .enumerate()
        .map(|(n, g)| criterion(&format!("VC-{}-GOAL-{}", g.id, n + 1), &g.id))
        .collect();
    work.safety_goals = goals;
    work.fsrs = fsrs;
    work
}

/// Install a test-writer subscriber filtered by `RUST_LOG`; repeat calls are no-ops
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
