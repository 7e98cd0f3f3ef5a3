//! Cross-entity checks
//!
//! Rules that span record types: strategy and FSR coverage of goals, ASIL
//! inheritance, allocation completeness and the goal/FSR/criterion links.
//! Goal references are compared exactly; extraction canonicalizes them.

use crate::config::ValidationConfig;
use crate::issue::{Category, Issue, Rule};
use fsc_model::{Fsr, SafetyGoal, SafetyStrategy, ValidationCriterion, MIN_FSRS_PER_GOAL};
use std::collections::BTreeSet;

fn goal_ids(goals: &[SafetyGoal]) -> BTreeSet<&str> {
    goals.iter().map(|g| g.id.as_str()).collect()
}

/// Same ASIL level (`"ASIL C"` equals `"C"`); unrecognised values compare as text
fn same_asil(fsr: &Fsr, goal: &SafetyGoal) -> bool {
    match (fsr.asil_level(), goal.asil_level()) {
        (Some(a), Some(b)) => a == b,
        _ => fsr.asil.trim().eq_ignore_ascii_case(goal.asil.trim()),
    }
}

/// One strategy per safety-relevant goal; strategies must name a known goal
#[must_use]
pub fn strategy_coverage(goals: &[SafetyGoal], strategies: &[SafetyStrategy]) -> Vec<Issue> {
    let covered: BTreeSet<&str> = strategies.iter().map(|s| s.safety_goal_id.as_str()).collect();
    let known = goal_ids(goals);

    let missing = goals
        .iter()
        .filter(|g| g.is_safety_relevant() && !covered.contains(g.id.as_str()))
        .map(|g| {
            Issue::error(
                Category::Completeness,
                Rule::StrategyCoverage,
                "No safety strategy defined for this safety goal",
            )
            .for_item(&g.id)
        });

    let orphaned = strategies
        .iter()
        .filter(|s| !known.contains(s.safety_goal_id.as_str()))
        .map(|s| {
            Issue::warning(
                Category::Consistency,
                Rule::StrategyReference,
                format!("Strategy references non-existent goal: {}", s.safety_goal_id),
            )
            .for_item(&s.safety_goal_id)
        });

    missing.chain(orphaned).collect()
}

/// FSR count per safety-relevant goal and ASIL agreement with the parent
///
/// Zero FSRs is an error with rule `coverage`; a count outside the
/// recommended band is informational. An FSR whose ASIL differs from its
/// goal's is a warning only, since decomposition may lower it.
#[must_use]
pub fn fsr_coverage(goals: &[SafetyGoal], fsrs: &[Fsr], config: &ValidationConfig) -> Vec<Issue> {
    let (low, high) = config.recommended_fsrs_per_goal;
    let mut issues = Vec::new();

    for goal in goals.iter().filter(|g| g.is_safety_relevant()) {
        let derived: Vec<&Fsr> = fsrs.iter().filter(|f| f.safety_goal_id == goal.id).collect();
        let count = derived.len();

        if count < MIN_FSRS_PER_GOAL {
            issues.push(
                Issue::error(
                    Category::Completeness,
                    Rule::Coverage,
                    format!("Safety goal has {count} FSRs (minimum: {MIN_FSRS_PER_GOAL} required)"),
                )
                .for_item(&goal.id),
            );
        } else if count < low || count > high {
            issues.push(
                Issue::info(
                    Category::Completeness,
                    Rule::Coverage,
                    format!("Safety goal has {count} FSRs (recommended: {low}-{high})"),
                )
                .for_item(&goal.id),
            );
        }

        for fsr in derived.into_iter().filter(|f| !same_asil(f, goal)) {
            issues.push(
                Issue::warning(
                    Category::Consistency,
                    Rule::AsilInheritance,
                    format!(
                        "FSR ASIL ({}) differs from parent goal ASIL ({}) - justify if intentional",
                        fsr.asil, goal.asil
                    ),
                )
                .for_item(&fsr.id),
            );
        }
    }

    issues
}

/// One aggregated error when any FSR lacks a real allocation
///
/// Placeholder allocations count as unallocated.
#[must_use]
pub fn allocation_completeness(fsrs: &[Fsr], config: &ValidationConfig) -> Option<Issue> {
    let unallocated: Vec<&str> = fsrs
        .iter()
        .filter(|f| !f.is_allocated())
        .map(|f| f.id.as_str())
        .collect();
    if unallocated.is_empty() {
        return None;
    }

    let limit = config.allocation_preview_limit;
    let mut preview = unallocated
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if unallocated.len() > limit {
        preview.push_str(&format!(" (+{} more)", unallocated.len() - limit));
    }

    let mut message = format!(
        "{} of {} FSRs not allocated to architectural elements",
        unallocated.len(),
        fsrs.len()
    );
    if !preview.is_empty() {
        message.push_str(": ");
        message.push_str(&preview);
    }
    Some(Issue::error(
        Category::Completeness,
        Rule::AllocationCompleteness,
        message,
    ))
}

/// Every FSR names an existing goal
///
/// Goals without FSRs are reported once, by [`fsr_coverage`].
#[must_use]
pub fn traceability(goals: &[SafetyGoal], fsrs: &[Fsr]) -> Vec<Issue> {
    let known = goal_ids(goals);

    let mut issues: Vec<Issue> = fsrs
        .iter()
        .filter_map(|fsr| {
            if fsr.safety_goal_id.trim().is_empty() {
                Some(
                    Issue::error(
                        Category::Traceability,
                        Rule::OrphanedFsr,
                        "Orphaned FSR - no parent safety goal specified",
                    )
                    .for_item(&fsr.id),
                )
            } else if !known.contains(fsr.safety_goal_id.as_str()) {
                Some(
                    Issue::error(
                        Category::Traceability,
                        Rule::Traceability,
                        format!("FSR references non-existent safety goal: {}", fsr.safety_goal_id),
                    )
                    .for_item(&fsr.id),
                )
            } else {
                None
            }
        })
        .collect();

    if !goals.is_empty() && !fsrs.is_empty() {
        let relevant = goals.iter().filter(|g| g.is_safety_relevant()).count();
        #[allow(clippy::cast_precision_loss)]
        let average = if relevant == 0 {
            0.0
        } else {
            fsrs.len() as f64 / relevant as f64
        };
        issues.push(Issue::info(
            Category::Statistics,
            Rule::TraceabilityRatio,
            format!(
                "Traceability: {relevant} goals → {} FSRs (avg: {average:.1} FSRs/goal)",
                fsrs.len()
            ),
        ));
    }

    issues
}

/// Criteria exist, reference known goals and FSRs, and cover every
/// safety-relevant goal
#[must_use]
pub fn criteria_traceability(
    goals: &[SafetyGoal],
    fsrs: &[Fsr],
    criteria: &[ValidationCriterion],
) -> Vec<Issue> {
    if criteria.is_empty() {
        return vec![Issue::warning(
            Category::Completeness,
            Rule::CriteriaCoverage,
            "No safety validation criteria specified",
        )];
    }

    let known_goals = goal_ids(goals);
    let known_fsrs: BTreeSet<&str> = fsrs.iter().map(|f| f.id.as_str()).collect();
    let mut issues = Vec::new();

    for criterion in criteria {
        if !known_goals.contains(criterion.safety_goal_id.as_str()) {
            issues.push(
                Issue::error(
                    Category::Traceability,
                    Rule::CriterionReference,
                    format!(
                        "Validation criterion references non-existent safety goal: {}",
                        criterion.safety_goal_id
                    ),
                )
                .for_item(&criterion.id),
            );
        }
        if let Some(fsr_id) = criterion.fsr_id.as_deref().filter(|f| !f.trim().is_empty()) {
            if !known_fsrs.contains(fsr_id) {
                issues.push(
                    Issue::error(
                        Category::Traceability,
                        Rule::CriterionReference,
                        format!("Validation criterion references non-existent FSR: {fsr_id}"),
                    )
                    .for_item(&criterion.id),
                );
            }
        }
    }

    let validated: BTreeSet<&str> = criteria.iter().map(|c| c.safety_goal_id.as_str()).collect();
    for goal in goals
        .iter()
        .filter(|g| g.is_safety_relevant() && !validated.contains(g.id.as_str()))
    {
        issues.push(
            Issue::warning(
                Category::Completeness,
                Rule::CriteriaCoverage,
                "No validation criteria defined for this safety goal",
            )
            .for_item(&goal.id),
        );
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;
    use pretty_assertions::assert_eq;

    fn goal(id: &str, asil: &str) -> SafetyGoal {
        SafetyGoal::new(id, "Avoid unintended acceleration", asil)
    }

    fn fsr(id: &str, goal: &str, asil: &str) -> Fsr {
        Fsr::new(id, goal, "Detect pedal drift above 5%", asil).with_allocation("Pedal ECU")
    }

    #[test]
    fn strategy_missing_and_orphaned() {
        let goals = vec![goal("SG-001", "C"), goal("SG-002", "QM")];
        let strategies = vec![SafetyStrategy::new("SG-009")];
        let issues = strategy_coverage(&goals, &strategies);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].item_id.as_deref(), Some("SG-001"));
        assert_eq!(issues[1].severity, Severity::Warning);
        assert_eq!(issues[1].message, "Strategy references non-existent goal: SG-009");
    }

    #[test]
    fn zero_fsrs_is_a_coverage_error() {
        let issues = fsr_coverage(&[goal("SG-001", "C")], &[], &ValidationConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].rule_ref(), "coverage");
        assert_eq!(issues[0].message, "Safety goal has 0 FSRs (minimum: 1 required)");
    }

    #[test]
    fn below_band_is_info_and_asil_mismatch_warns() {
        let fsrs = vec![fsr("FSR-SG-001-DET-1", "SG-001", "C"), fsr("FSR-SG-001-CTL-1", "SG-001", "B")];
        let issues = fsr_coverage(&[goal("SG-001", "C")], &fsrs, &ValidationConfig::default());
        let summary: Vec<(Severity, Rule)> = issues.iter().map(|i| (i.severity, i.rule)).collect();
        assert_eq!(
            summary,
            vec![(Severity::Info, Rule::Coverage), (Severity::Warning, Rule::AsilInheritance)]
        );
        assert_eq!(issues[0].message, "Safety goal has 2 FSRs (recommended: 3-7)");
        assert_eq!(
            issues[1].message,
            "FSR ASIL (B) differs from parent goal ASIL (C) - justify if intentional"
        );
    }

    #[test]
    fn asil_spelling_does_not_count_as_mismatch() {
        let mut first = fsr("FSR-SG-001-DET-1", "SG-001", "C");
        first.asil = "ASIL C".to_string();
        let mut second = fsr("FSR-SG-001-DET-2", "SG-001", "C");
        second.asil = "c".to_string();
        let mut third = fsr("FSR-SG-001-DET-3", "SG-001", "C");
        third.asil = "ASIL B".to_string();
        let mut parent = goal("SG-001", "C");
        parent.asil = "C".to_string();

        let issues = fsr_coverage(&[parent], &[first, second, third], &ValidationConfig::default());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::AsilInheritance);
        assert_eq!(issues[0].item_id.as_deref(), Some("FSR-SG-001-DET-3"));
    }

    #[test]
    fn qm_goals_need_no_fsrs() {
        assert!(fsr_coverage(&[goal("SG-001", "QM")], &[], &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn allocation_aggregated_with_preview() {
        let mut fsrs: Vec<Fsr> = (1..=7)
            .map(|n| Fsr::new(format!("FSR-SG-001-DET-{n}"), "SG-001", "Detect drift above 5%", "C"))
            .collect();
        fsrs[0] = fsrs[0].clone().with_allocation("Pedal ECU");
        fsrs[1] = fsrs[1].clone().with_allocation("TBD");

        let issue = allocation_completeness(&fsrs, &ValidationConfig::default()).unwrap();
        assert_eq!(
            issue.message,
            "6 of 7 FSRs not allocated to architectural elements: FSR-SG-001-DET-2, \
             FSR-SG-001-DET-3, FSR-SG-001-DET-4, FSR-SG-001-DET-5, FSR-SG-001-DET-6 (+1 more)"
        );
        assert!(issue.item_id.is_none());
    }

    #[test]
    fn fully_allocated_is_silent() {
        let fsrs = vec![fsr("FSR-SG-001-DET-1", "SG-001", "C")];
        assert!(allocation_completeness(&fsrs, &ValidationConfig::default()).is_none());
    }

    #[test]
    fn dangling_and_orphaned_fsrs() {
        let goals = vec![goal("SG-001", "C")];
        let fsrs = vec![
            fsr("FSR-SG-001-DET-1", "SG-001", "C"),
            fsr("FSR-SG-002-DET-1", "SG-002", "C"),
            fsr("FSR-SG-003-DET-1", "", "C"),
        ];
        let issues = traceability(&goals, &fsrs);
        let rules: Vec<Rule> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec![Rule::Traceability, Rule::OrphanedFsr, Rule::TraceabilityRatio]);
        assert_eq!(issues[2].message, "Traceability: 1 goals → 3 FSRs (avg: 3.0 FSRs/goal)");
    }

    #[test]
    fn criteria_links() {
        let goals = vec![goal("SG-001", "C"), goal("SG-002", "B")];
        let fsrs = vec![fsr("FSR-SG-001-DET-1", "SG-001", "C")];
        let criteria = vec![
            ValidationCriterion::for_goal("VC-1", "SG-001", "Vehicle stops safely"),
            ValidationCriterion::for_goal("VC-2", "SG-001", "Drift detected").with_fsr("FSR-SG-001-DET-9"),
            ValidationCriterion::for_goal("VC-3", "SG-007", "Unknown goal"),
        ];
        let messages: Vec<String> = criteria_traceability(&goals, &fsrs, &criteria)
            .into_iter()
            .map(|i| i.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Validation criterion references non-existent FSR: FSR-SG-001-DET-9",
                "Validation criterion references non-existent safety goal: SG-007",
                "No validation criteria defined for this safety goal",
            ]
        );
    }

    #[test]
    fn no_criteria_is_one_warning() {
        let issues = criteria_traceability(&[goal("SG-001", "C")], &[], &[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
