use fsc_model::{SafetyGoal, WorkProduct};
use fsc_test_utils::{fsr, goal, init_test_logging, work_product};
use fsc_validate::{
    validate, validate_fsrs, Category, Rule, Severity, Stage, ValidationConfig, Validator,
};
use pretty_assertions::assert_eq;

/// `work_product` gives each goal a complete strategy and a goal-level
/// criterion, so the missing FSRs are the only gap left
#[test]
fn goal_without_fsrs_fails_with_one_coverage_error() {
    init_test_logging();
    let work = work_product(vec![goal("SG-001", "C")], Vec::new());

    let result = validate(&work, &ValidationConfig::default());

    assert!(!result.passed);
    let errors: Vec<_> = result.issues.iter().filter(|i| i.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule_ref(), "coverage");
    assert_eq!(errors[0].item_id.as_deref(), Some("SG-001"));
    assert_eq!(work.strategies.len(), 1);
    assert_eq!(work.validation_criteria.len(), 1);
}

#[test]
fn bare_goal_also_lacks_a_strategy() {
    let mut work = WorkProduct::new("Test item");
    work.safety_goals.push(goal("SG-001", "C"));

    let result = validate(&work, &ValidationConfig::default());

    assert!(!result.passed);
    let mut rules: Vec<Rule> = result
        .issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.rule)
        .collect();
    rules.sort();
    assert_eq!(rules, vec![Rule::StrategyCoverage, Rule::Coverage]);
}

#[test]
fn duplicate_fsr_ids_fail() {
    let fsrs = vec![
        fsr("FSR-SG-001-DET-1", "SG-001", "C"),
        fsr("FSR-SG-001-DET-1", "SG-001", "C"),
    ];
    let batch = validate_fsrs(&fsrs, &ValidationConfig::default());
    let duplicate = batch
        .iter()
        .find(|i| i.rule == Rule::DuplicateId)
        .expect("duplicate issue");
    assert_eq!(duplicate.severity, Severity::Error);
    assert!(duplicate.message.contains("FSR-SG-001-DET-1"));

    let work = work_product(vec![goal("SG-001", "C")], fsrs);
    assert!(!validate(&work, &ValidationConfig::default()).passed);
}

#[test]
fn well_formed_work_product_passes() {
    let fsrs = (1..=3)
        .map(|n| fsr(&format!("FSR-SG-001-DET-{n}"), "SG-001", "C"))
        .collect();
    let work = work_product(vec![goal("SG-001", "C")], fsrs);

    let result = validate(&work, &ValidationConfig::default());

    assert!(result.passed, "{}", result.format_report());
    assert_eq!(result.error_count(), 0);
    assert_eq!(result.warning_count(), 0);
    assert!(result
        .issues
        .iter()
        .all(|i| i.severity == Severity::Info));
}

#[test]
fn decomposed_asil_warns_but_passes() {
    let fsrs = vec![
        fsr("FSR-SG-001-DET-1", "SG-001", "D"),
        fsr("FSR-SG-001-CTL-1", "SG-001", "B"),
        fsr("FSR-SG-001-SST-1", "SG-001", "D"),
    ];
    let work = work_product(vec![goal("SG-001", "D")], fsrs);

    let result = validate(&work, &ValidationConfig::default());

    assert!(result.passed);
    let warning = result
        .issues_for("FSR-SG-001-CTL-1")
        .find(|i| i.rule == Rule::AsilInheritance)
        .expect("asil warning");
    assert_eq!(warning.severity, Severity::Warning);
}

#[test]
fn placeholder_allocation_still_fails_the_batch() {
    let fsrs = vec![
        fsr("FSR-SG-001-DET-1", "SG-001", "C").with_allocation("TBD"),
        fsr("FSR-SG-001-DET-2", "SG-001", "C"),
        fsr("FSR-SG-001-DET-3", "SG-001", "C"),
    ];
    let work = work_product(vec![goal("SG-001", "C")], fsrs);

    let result = validate(&work, &ValidationConfig::default());

    assert!(!result.passed);
    let rules: Vec<(Severity, Rule)> = result
        .issues
        .iter()
        .filter(|i| matches!(i.rule, Rule::FsrAllocation | Rule::AllocationCompleteness))
        .map(|i| (i.severity, i.rule))
        .collect();
    assert_eq!(
        rules,
        vec![
            (Severity::Warning, Rule::FsrAllocation),
            (Severity::Error, Rule::AllocationCompleteness),
        ]
    );
}

#[test]
fn dangling_references_reported_not_rejected() {
    let mut work = work_product(
        vec![goal("SG-001", "C")],
        vec![
            fsr("FSR-SG-001-DET-1", "SG-001", "C"),
            fsr("FSR-SG-002-DET-1", "SG-002", "C"),
        ],
    );
    work.strategies.push(fsc_test_utils::complete_strategy("SG-009"));

    let result = validate(&work, &ValidationConfig::default());

    assert!(result
        .issues_for("FSR-SG-002-DET-1")
        .any(|i| i.rule == Rule::Traceability && i.is_error()));
    assert!(result
        .issues_for("SG-009")
        .any(|i| i.rule == Rule::StrategyReference && i.severity == Severity::Warning));
}

#[test]
fn empty_work_product() {
    let result = validate(&WorkProduct::new("Empty"), &ValidationConfig::default());
    let messages: Vec<&str> = result.issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "No safety goals defined - at least one required",
            "No safety validation criteria specified",
        ]
    );
}

#[test]
fn report_lists_categories_in_order() {
    let mut work = work_product(vec![goal("SG-001", "C")], Vec::new());
    work.safety_goals.push(SafetyGoal::new("SG-001", "Avoid loss of the wiping function", "B"));

    let report = validate(&work, &ValidationConfig::default()).format_report();

    assert!(report.starts_with("FAILED - Errors: "));
    let completeness = report.find("### COMPLETENESS").expect("completeness section");
    let correctness = report.find("### CORRECTNESS").expect("correctness section");
    let statistics = report.find("### STATISTICS").expect("statistics section");
    assert!(completeness < correctness && correctness < statistics);
    assert!(report.contains(
        "ERROR: Safety goal has 0 FSRs (minimum: 1 required) (coverage, ISO 7.4.2.2) [SG-001]"
    ));
    assert!(report.contains("ERROR: Duplicate safety goal IDs found: SG-001 (duplicate_id)"));
}

#[test]
fn staged_run_matches_one_shot() {
    let work = work_product(
        vec![goal("SG-001", "C"), goal("SG-002", "QM")],
        vec![fsr("FSR-SG-001-DET-1", "SG-001", "B")],
    );
    let config = ValidationConfig::default();

    let mut validator = Validator::new(&work, &config);
    let mut stages = Vec::new();
    while !validator.stage().is_terminal() {
        stages.push(validator.advance().unwrap());
    }
    assert_eq!(
        stages,
        vec![
            Stage::GoalsValidated,
            Stage::StrategiesValidated,
            Stage::FsrsValidated,
            Stage::TraceabilityValidated,
            Stage::Done,
        ]
    );
    assert_eq!(validator.finish(), validate(&work, &config));
}

#[test]
fn stricter_config_changes_findings() {
    let work = work_product(
        vec![goal("SG-001", "C")],
        vec![fsr("FSR-SG-001-DET-1", "SG-001", "C")],
    );
    let strict = ValidationConfig::default().with_min_strategy_chars(80);

    let result = validate(&work, &strict);

    assert!(result
        .issues
        .iter()
        .any(|i| i.rule == Rule::StrategyDetail && i.category == Category::Completeness));
}
