//! Placeholder sentinels
//!
//! Generated text often fills fields it cannot decide with a "not yet
//! specified" marker. Such values are present but carry no information;
//! validators treat them differently from missing data.

/// Recognised sentinels, lower-case
pub const PLACEHOLDER_SENTINELS: &[&str] = &[
    "tbd",
    "tba",
    "to be determined",
    "to be specified",
    "to be defined",
    "unknown",
    "n/a",
    "placeholder",
    "not specified",
    "not yet specified",
];

/// Whether `text` is a placeholder sentinel
///
/// Matches a sentinel exactly (ignoring case, surrounding whitespace and
/// trailing punctuation) or a sentinel followed by an elaboration, such as
/// `"To be determined based on hazard analysis"`.
#[must_use]
pub fn is_placeholder(text: &str) -> bool {
    let normalized = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ';' | ','))
        .to_lowercase();
    if normalized.is_empty() {
        return false;
    }

    PLACEHOLDER_SENTINELS.iter().any(|sentinel| {
        normalized == *sentinel
            || normalized
                .strip_prefix(sentinel)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|next| !next.is_alphanumeric() && next != '/')
    })
}

/// Non-empty after trimming
#[inline]
#[must_use]
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sentinels() {
        assert!(is_placeholder("TBD"));
        assert!(is_placeholder(" tbd. "));
        assert!(is_placeholder("Unknown"));
        assert!(is_placeholder("N/A"));
    }

    #[test]
    fn elaborated_sentinels() {
        assert!(is_placeholder("To be determined based on hazard analysis"));
        assert!(is_placeholder("TBD - pending architecture"));
    }

    #[test]
    fn real_values_are_not_placeholders() {
        assert!(!is_placeholder("100 ms"));
        assert!(!is_placeholder("Tbdx controller"));
        assert!(!is_placeholder("Unknowns are handled by the monitor"));
        assert!(!is_placeholder(""));
    }

    #[test]
    fn has_text_ignores_whitespace() {
        assert!(has_text(Some("x")));
        assert!(!has_text(Some("   ")));
        assert!(!has_text(None));
    }
}
