//! Validation criterion checks (ISO 26262-3, 7.4.3)

use super::{duplicate_issue, too_short};
use crate::config::ValidationConfig;
use crate::issue::{Category, Issue, Rule};
use fsc_model::{has_text, ValidationCriterion};

/// Check one validation criterion
#[must_use]
pub fn validate_criterion(criterion: &ValidationCriterion, config: &ValidationConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let item = criterion.id.as_str();

    if too_short(&criterion.criterion, config.min_description_chars) {
        issues.push(
            Issue::error(
                Category::Completeness,
                Rule::CriterionText,
                format!(
                    "Validation criterion text too short or missing (min {} characters)",
                    config.min_description_chars
                ),
            )
            .for_item(item),
        );
    }
    if !has_text(criterion.validation_method.as_deref()) {
        issues.push(
            Issue::warning(
                Category::Completeness,
                Rule::CriterionMethod,
                "Validation method not specified",
            )
            .for_item(item),
        );
    }
    if !has_text(criterion.success_criteria.as_deref()) {
        issues.push(
            Issue::warning(
                Category::Completeness,
                Rule::CriterionSuccess,
                "Success criteria not specified",
            )
            .for_item(item),
        );
    }

    issues
}

/// Check a criteria list: each criterion, unique IDs and the level split
#[must_use]
pub fn validate_criteria(criteria: &[ValidationCriterion], config: &ValidationConfig) -> Vec<Issue> {
    let mut issues: Vec<Issue> = criteria
        .iter()
        .flat_map(|c| validate_criterion(c, config))
        .collect();

    issues.extend(duplicate_issue(
        "validation criterion",
        criteria.iter().map(|c| c.id.as_str()),
    ));

    if !criteria.is_empty() {
        let goal_level = criteria.iter().filter(|c| c.is_goal_level()).count();
        issues.push(Issue::info(
            Category::Statistics,
            Rule::CriteriaDistribution,
            format!(
                "Validation criteria - goal-level: {goal_level}, FSR-level: {}",
                criteria.len() - goal_level
            ),
        ));
    }

    issues
}
