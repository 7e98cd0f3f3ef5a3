//! Per-record checks
//!
//! Each module validates one record type in isolation and, for a list of
//! them, adds the batch checks: identifier uniqueness and a statistics
//! issue. Nothing here looks at other record types; see
//! [`cross`](crate::cross) for that.

use crate::issue::{Category, Issue, Rule};

pub mod criterion;
pub mod fsr;
pub mod goal;
pub mod strategy;

pub use criterion::{validate_criteria, validate_criterion};
pub use fsr::{validate_fsr, validate_fsrs};
pub use goal::{validate_goal, validate_goals};
pub use strategy::{validate_strategies, validate_strategy};

/// IDs occurring more than once, in order of first repetition
pub(crate) fn duplicate_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            if !duplicates.contains(&id) {
                duplicates.push(id);
            }
        } else {
            seen.push(id);
        }
    }
    duplicates
}

/// One error naming every duplicated ID, if any
pub(crate) fn duplicate_issue<'a>(
    what: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Option<Issue> {
    let duplicates = duplicate_ids(ids);
    (!duplicates.is_empty()).then(|| {
        Issue::error(
            Category::Correctness,
            Rule::DuplicateId,
            format!("Duplicate {what} IDs found: {}", duplicates.join(", ")),
        )
    })
}

/// Trimmed length below `min` characters
pub(crate) fn too_short(text: &str, min: usize) -> bool {
    text.trim().chars().count() < min
}

/// Whether `phrase` occurs in `text` as whole words, ignoring case
pub(crate) fn contains_phrase(text: &str, phrase: &str) -> bool {
    let text = text.to_lowercase();
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return false;
    }
    text.match_indices(phrase.as_str()).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + phrase.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
