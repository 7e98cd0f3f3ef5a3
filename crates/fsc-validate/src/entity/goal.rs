//! Safety goal checks (ISO 26262-3, 6.4.5 and 6.4.6)

use super::{contains_phrase, duplicate_issue, too_short};
use crate::config::ValidationConfig;
use crate::issue::{Category, Issue, Rule};
use fsc_model::{has_text, is_placeholder, Asil, SafetyGoal};
use std::collections::BTreeMap;

/// Check one safety goal
#[must_use]
pub fn validate_goal(goal: &SafetyGoal, config: &ValidationConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let item = goal.id.as_str();

    if too_short(&goal.description, config.min_description_chars) {
        issues.push(
            Issue::error(
                Category::Completeness,
                Rule::GoalDescription,
                format!(
                    "Safety goal description too short or missing (min {} characters)",
                    config.min_description_chars
                ),
            )
            .for_item(item),
        );
    }

    if goal.asil_level().is_none() {
        issues.push(
            Issue::error(
                Category::Correctness,
                Rule::GoalAsil,
                format!("Invalid ASIL level: {} (must be A, B, C, D, or QM)", goal.asil),
            )
            .for_item(item),
        );
    }

    if goal.is_safety_relevant() {
        match goal.safe_state.as_deref() {
            value if !has_text(value) => issues.push(
                Issue::warning(
                    Category::Completeness,
                    Rule::GoalSafeState,
                    "Safe state not specified for safety-relevant goal",
                )
                .for_item(item),
            ),
            Some(value) if is_placeholder(value) => issues.push(
                Issue::info(
                    Category::Completeness,
                    Rule::GoalSafeState,
                    "Safe state is placeholder - needs specification",
                )
                .for_item(item),
            ),
            _ => {}
        }

        match goal.ftti.as_deref() {
            value if !has_text(value) => issues.push(
                Issue::warning(
                    Category::Completeness,
                    Rule::GoalFtti,
                    "FTTI not specified for safety-relevant goal",
                )
                .for_item(item),
            ),
            Some(value) if is_placeholder(value) => issues.push(
                Issue::info(
                    Category::Completeness,
                    Rule::GoalFtti,
                    "FTTI is placeholder - needs determination",
                )
                .for_item(item),
            ),
            _ => {}
        }
    }

    if config
        .implementation_phrases
        .iter()
        .any(|phrase| contains_phrase(&goal.description, phrase))
    {
        issues.push(
            Issue::warning(
                Category::Correctness,
                Rule::GoalPhrasing,
                "Safety goal appears implementation-specific rather than result-oriented",
            )
            .for_item(item),
        );
    }

    let first_word: String = goal
        .description
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    if config.imperative_verbs.iter().any(|verb| *verb == first_word) {
        issues.push(
            Issue::info(
                Category::Correctness,
                Rule::GoalPhrasing,
                "Goal should describe required outcome, not implementation approach",
            )
            .for_item(item),
        );
    }

    issues
}

/// Check a goal list
///
/// Adds the list-level checks: at least one goal, at least one
/// safety-relevant goal, unique IDs and the ASIL distribution.
#[must_use]
pub fn validate_goals(goals: &[SafetyGoal], config: &ValidationConfig) -> Vec<Issue> {
    if goals.is_empty() {
        return vec![Issue::error(
            Category::Completeness,
            Rule::GoalSet,
            "No safety goals defined - at least one required",
        )];
    }

    let mut issues = Vec::new();

    let mut distribution: BTreeMap<Asil, usize> = BTreeMap::new();
    for level in goals.iter().filter_map(SafetyGoal::asil_level) {
        if level.is_safety_relevant() {
            *distribution.entry(level).or_default() += 1;
        }
    }

    if distribution.is_empty() {
        issues.push(Issue::error(
            Category::Completeness,
            Rule::GoalSet,
            "No safety-relevant goals found (all are QM - no ASIL A/B/C/D)",
        ));
    }

    for goal in goals {
        issues.extend(validate_goal(goal, config));
    }

    issues.extend(duplicate_issue("safety goal", goals.iter().map(|g| g.id.as_str())));

    if !distribution.is_empty() {
        let summary = distribution
            .iter()
            .map(|(level, count)| format!("ASIL {level}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(Issue::info(
            Category::Statistics,
            Rule::AsilDistribution,
            format!("ASIL distribution - {summary}"),
        ));
    }

    issues
}
