use fsc_model::{Fsr, SafetyGoal};
use fsc_test_utils::{fsr, goal, work_product};
use fsc_validate::{validate, Rule, ValidationConfig};
use proptest::prelude::*;

fn asil() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("QM"), Just("A"), Just("B"), Just("C"), Just("D"), Just("E")]
}

fn goals_and_fsrs() -> impl Strategy<Value = (Vec<SafetyGoal>, Vec<Fsr>)> {
    (
        proptest::collection::vec(asil(), 0..5),
        // (goal number, ASIL) per FSR; numbers past the goal count dangle
        proptest::collection::vec((1..8usize, asil(), any::<bool>()), 0..12),
    )
        .prop_map(|(goal_asils, fsr_specs)| {
            let goals = goal_asils
                .iter()
                .enumerate()
                .map(|(n, asil)| goal(&format!("SG-{:03}", n + 1), asil))
                .collect();
            let fsrs = fsr_specs
                .into_iter()
                .enumerate()
                .map(|(n, (goal_no, asil, allocated))| {
                    let goal_id = format!("SG-{goal_no:03}");
                    let mut record = fsr(&format!("FSR-{goal_id}-DET-{}", n + 1), &goal_id, asil);
                    if !allocated {
                        record.allocated_to = None;
                    }
                    record
                })
                .collect();
            (goals, fsrs)
        })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent((goals, fsrs) in goals_and_fsrs()) {
        let work = work_product(goals, fsrs);
        let config = ValidationConfig::default();

        let first = validate(&work, &config);
        let second = validate(&work, &config);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        prop_assert_eq!(first.format_report(), second.format_report());
    }

    #[test]
    fn prop_coverage_error_iff_goal_has_no_fsrs((goals, fsrs) in goals_and_fsrs()) {
        let work = work_product(goals, fsrs);
        let result = validate(&work, &ValidationConfig::default());

        for goal in work.safety_goals.iter().filter(|g| g.is_safety_relevant()) {
            let derived = work.fsrs.iter().filter(|f| f.safety_goal_id == goal.id).count();
            let flagged = result
                .issues_for(&goal.id)
                .any(|i| i.is_error() && i.rule == Rule::Coverage);
            prop_assert_eq!(derived == 0, flagged, "goal {}", goal.id);
        }
    }

    #[test]
    fn prop_verdict_matches_error_count((goals, fsrs) in goals_and_fsrs()) {
        let result = validate(&work_product(goals, fsrs), &ValidationConfig::default());
        prop_assert_eq!(result.passed, result.error_count() == 0);
        prop_assert_eq!(
            result.issues.len(),
            result.error_count() + result.warning_count() + result.info_count()
        );
    }
}
