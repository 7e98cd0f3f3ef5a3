//! Safety strategy checks (ISO 26262-3, 7.4.2.3)

use super::{contains_phrase, duplicate_issue, too_short};
use crate::config::ValidationConfig;
use crate::issue::{Category, Issue, Rule};
use fsc_model::{SafetyStrategy, StrategyKind};

/// Check one strategy: all ten aspects present and each one substantial
#[must_use]
pub fn validate_strategy(strategy: &SafetyStrategy, config: &ValidationConfig) -> Vec<Issue> {
    let item = strategy.safety_goal_id.as_str();

    let mut issues: Vec<Issue> = strategy
        .missing_kinds()
        .into_iter()
        .map(|kind| {
            Issue::error(
                Category::Completeness,
                Rule::StrategyRequired,
                format!("Required strategy missing: {kind}"),
            )
            .for_item(item)
        })
        .collect();

    for kind in StrategyKind::ALL {
        let Some(text) = strategy.get(kind).filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        if too_short(text, config.min_strategy_chars) {
            issues.push(
                Issue::warning(
                    Category::Completeness,
                    Rule::StrategyDetail,
                    format!(
                        "Strategy too brief (< {} chars): {kind}",
                        config.min_strategy_chars
                    ),
                )
                .for_item(item),
            );
        } else if contains_phrase(text, "not applicable") {
            issues.push(
                Issue::info(
                    Category::Completeness,
                    Rule::StrategyDetail,
                    format!("Strategy marked as not applicable: {kind}"),
                )
                .for_item(item),
            );
        }
    }

    issues
}

/// Check a strategy list: each strategy, then one strategy per goal
#[must_use]
pub fn validate_strategies(strategies: &[SafetyStrategy], config: &ValidationConfig) -> Vec<Issue> {
    let mut issues: Vec<Issue> = strategies
        .iter()
        .flat_map(|s| validate_strategy(s, config))
        .collect();
    issues.extend(duplicate_issue(
        "safety strategy goal",
        strategies.iter().map(|s| s.safety_goal_id.as_str()),
    ));
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(goal: &str) -> SafetyStrategy {
        StrategyKind::ALL.into_iter().fold(SafetyStrategy::new(goal), |s, kind| {
            s.with_strategy(kind, format!("Detailed narrative for {}", kind.display_name()))
        })
    }

    #[test]
    fn complete_strategy_passes() {
        assert!(validate_strategy(&full("SG-001"), &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn missing_aspects_named_with_clause() {
        let strategy = SafetyStrategy::new("SG-001")
            .with_strategy(StrategyKind::FaultAvoidance, "Qualified components and reviews");
        let issues = validate_strategy(&strategy, &ValidationConfig::default());
        assert_eq!(issues.len(), 9);
        assert_eq!(
            issues[0].message,
            "Required strategy missing: Fault Detection (7.4.2.3.b)"
        );
        assert!(issues.iter().all(|i| i.item_id.as_deref() == Some("SG-001")));
    }

    #[test]
    fn brief_and_not_applicable_aspects() {
        let strategy = full("SG-001")
            .with_strategy(StrategyKind::Arbitration, "Single source")
            .with_strategy(
                StrategyKind::WarningExposure,
                "Not applicable, the function has no driver interaction",
            );
        let issues = validate_strategy(&strategy, &ValidationConfig::default());
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Strategy marked as not applicable: Warning - Exposure Reduction (7.4.2.3.f)",
                "Strategy too brief (< 20 chars): Arbitration (7.4.2.3.i)",
            ]
        );
    }

    #[test]
    fn one_strategy_per_goal() {
        let issues = validate_strategies(&[full("SG-001"), full("SG-001")], &ValidationConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Duplicate safety strategy goal IDs found: SG-001");
    }
}
