//! Identifier conventions
//!
//! Identifiers are opaque strings with documented formats:
//!
//! - Safety goal: `SG-###`
//! - FSR: `FSR-<goalRef>-<TYPE3>-<N>`, e.g. `FSR-SG-001-DET-1`
//! - Validation criterion: `VC-...`, e.g. `VC-SG-001-GOAL-1` or
//!   `VC-FSR-SG-001-DET-1-1`
//!
//! The formats are never enforced on records; they are used by extraction
//! to recognise identities and by callers to derive missing references.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern source for safety goal identifiers
pub const GOAL_ID_PATTERN: &str = r"\bSG-\d+\b";

/// Pattern source for FSR identifiers
pub const FSR_ID_PATTERN: &str = r"\bFSR-SG-\d+-[A-Z]{3}-\d+\b";

/// Pattern source for validation criterion identifiers
pub const CRITERION_ID_PATTERN: &str = r"\bVC-[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*";

static GOAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(GOAL_ID_PATTERN).expect("goal ID pattern is a valid regex"));

static FSR_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(FSR_ID_PATTERN).expect("FSR ID pattern is a valid regex"));

static CRITERION_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(CRITERION_ID_PATTERN).expect("criterion ID pattern is a valid regex")
});

/// Compiled safety goal ID regex
#[inline]
#[must_use]
pub fn goal_id_regex() -> &'static Regex {
    &GOAL_ID
}

/// Compiled FSR ID regex
#[inline]
#[must_use]
pub fn fsr_id_regex() -> &'static Regex {
    &FSR_ID
}

/// Compiled validation criterion ID regex
#[inline]
#[must_use]
pub fn criterion_id_regex() -> &'static Regex {
    &CRITERION_ID
}

/// First safety goal reference in `text`
///
/// For an FSR ID this is the parent goal embedded in the identifier.
#[must_use]
pub fn goal_ref_in(text: &str) -> Option<&str> {
    GOAL_ID.find(text).map(|m| m.as_str())
}

/// First FSR reference in `text`
#[must_use]
pub fn fsr_ref_in(text: &str) -> Option<&str> {
    FSR_ID.find(text).map(|m| m.as_str())
}

/// Numeric part of a goal identifier (`SG-007` -> 7)
#[must_use]
pub fn goal_number(id: &str) -> Option<u64> {
    id.trim().strip_prefix("SG-")?.parse().ok()
}

/// Whether two goal references denote the same goal
///
/// Zero padding is not significant: `SG-1` and `SG-001` are equal. Anything
/// that is not a well-formed goal ID only matches itself exactly.
#[must_use]
pub fn same_goal(a: &str, b: &str) -> bool {
    match (goal_number(a), goal_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a.trim() == b.trim(),
    }
}

/// Three-letter type code of an FSR ID (`FSR-SG-001-DET-1` -> `DET`)
#[must_use]
pub fn fsr_type_code(fsr_id: &str) -> Option<&str> {
    let mut segments = fsr_id.rsplit('-');
    let _number = segments.next()?;
    let code = segments.next()?;
    (code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_ref_from_fsr_id() {
        assert_eq!(goal_ref_in("FSR-SG-001-DET-1"), Some("SG-001"));
        assert_eq!(goal_ref_in("no reference"), None);
    }

    #[test]
    fn fsr_ref_from_criterion_id() {
        assert_eq!(fsr_ref_in("VC-FSR-SG-002-CTL-3-1"), Some("FSR-SG-002-CTL-3"));
    }

    #[test]
    fn goal_equivalence_ignores_padding() {
        assert!(same_goal("SG-1", "SG-001"));
        assert!(!same_goal("SG-1", "SG-010"));
        assert!(same_goal("HZ-7", "HZ-7"));
        assert!(!same_goal("HZ-7", "SG-7"));
    }

    #[test]
    fn type_code_extraction() {
        assert_eq!(fsr_type_code("FSR-SG-001-DET-1"), Some("DET"));
        assert_eq!(fsr_type_code("FSR-SG-001-DETECT-1"), None);
        assert_eq!(fsr_type_code("FSR"), None);
    }

    #[test]
    fn patterns_match_documented_formats() {
        assert!(fsr_id_regex().is_match("FSR-SG-001-DET-1"));
        assert!(!fsr_id_regex().is_match("NOTAN-ID"));
        assert!(goal_id_regex().is_match("SG-12"));
        assert_eq!(
            criterion_id_regex().find("see VC-SG-001-GOAL-1 now").map(|m| m.as_str()),
            Some("VC-SG-001-GOAL-1")
        );
    }
}
