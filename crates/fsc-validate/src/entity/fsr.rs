//! FSR checks (ISO 26262-3, 7.4.2.1, 7.4.2.4 and 7.4.2.8)

use super::{contains_phrase, duplicate_issue, too_short};
use crate::config::ValidationConfig;
use crate::issue::{Category, Issue, Rule};
use fsc_model::{has_text, is_placeholder, Fsr};
use std::collections::BTreeMap;

/// Check one FSR
#[must_use]
pub fn validate_fsr(fsr: &Fsr, config: &ValidationConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let item = fsr.id.as_str();
    let mut push = |issue: Issue| issues.push(issue.for_item(item));

    if too_short(&fsr.description, config.min_description_chars) {
        push(Issue::error(
            Category::Completeness,
            Rule::FsrDescription,
            format!(
                "FSR description too short or missing (min {} characters)",
                config.min_description_chars
            ),
        ));
    }

    if !fsr.asil_level().is_some_and(|a| a.is_safety_relevant()) {
        push(Issue::error(
            Category::Correctness,
            Rule::FsrAsil,
            format!("Invalid ASIL level: {} (must be A, B, C, or D)", fsr.asil),
        ));
    }

    if !has_text(fsr.allocated_to.as_deref()) {
        push(Issue::error(
            Category::Completeness,
            Rule::FsrAllocation,
            "FSR not allocated to architectural element",
        ));
    } else if fsr.has_placeholder_allocation() {
        push(Issue::warning(
            Category::Completeness,
            Rule::FsrAllocation,
            "FSR allocation is placeholder",
        ));
    }

    if !has_text(fsr.operating_modes.as_deref()) {
        push(Issue::warning(
            Category::Completeness,
            Rule::OperatingModes,
            "Operating modes not specified",
        ));
    }

    match fsr.timing.as_deref() {
        value if !has_text(value) => push(Issue::warning(
            Category::Completeness,
            Rule::FsrTiming,
            "FTTI/timing constraint not specified",
        )),
        Some(value) if is_placeholder(value) => push(Issue::info(
            Category::Completeness,
            Rule::FsrTiming,
            "FTTI/timing is placeholder",
        )),
        _ => {}
    }

    if !has_text(fsr.safe_state.as_deref()) {
        push(Issue::warning(
            Category::Completeness,
            Rule::FsrSafeState,
            "Safe state not specified",
        ));
    }

    if !has_text(fsr.verification_criteria.as_deref()) {
        push(Issue::warning(
            Category::Completeness,
            Rule::FsrVerification,
            "Verification criteria not specified",
        ));
    }

    if config
        .vague_terms
        .iter()
        .any(|term| contains_phrase(&fsr.description, term))
    {
        push(Issue::info(
            Category::Correctness,
            Rule::Measurability,
            "FSR contains vague terms - ensure measurability",
        ));
    }

    if fsr.fsr_type.expects_quantity() && !fsr.description.chars().any(|c| c.is_ascii_digit()) {
        push(Issue::info(
            Category::Correctness,
            Rule::Measurability,
            "FSR lacks quantitative criteria (consider adding thresholds/timing)",
        ));
    }

    issues
}

/// Check an FSR list: each FSR, unique IDs and the type distribution
///
/// Coverage against goals and allocation completeness are cross-entity
/// checks in [`cross`](crate::cross).
#[must_use]
pub fn validate_fsrs(fsrs: &[Fsr], config: &ValidationConfig) -> Vec<Issue> {
    let mut issues: Vec<Issue> = fsrs
        .iter()
        .flat_map(|fsr| validate_fsr(fsr, config))
        .collect();

    issues.extend(duplicate_issue("FSR", fsrs.iter().map(|f| f.id.as_str())));

    // Keyed by display name so the listing is alphabetical
    let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    for fsr in fsrs {
        *by_type.entry(fsr.fsr_type.display_name()).or_default() += 1;
    }
    if !by_type.is_empty() {
        let summary = by_type
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(Issue::info(
            Category::Statistics,
            Rule::FsrDistribution,
            format!("FSR distribution by type - {summary}"),
        ));
    }

    issues
}
