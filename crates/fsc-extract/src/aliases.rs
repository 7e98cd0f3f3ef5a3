//! Field alias tables
//!
//! Generated text spells the same field many ways: `FSR ID`, `FSR-ID`,
//! `Requirement ID`. A label is normalized (markdown stripped, lower-cased,
//! parentheticals and enumerators removed, separators collapsed to `_`)
//! and looked up in a per-entity table of canonical spellings.

use crate::fields::Field;
use crate::markup::inline_text;
use std::collections::HashMap;

/// Normalize a label or table header cell for alias lookup
///
/// `"**Fault Avoidance (7.4.2.3.a)**"` becomes `"fault_avoidance"`,
/// `"b) Fault Detection"` becomes `"fault_detection"`, `"FSR-ID"` becomes
/// `"fsr_id"`.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let plain = inline_text(label).to_lowercase();

    let mut without_parens = String::with_capacity(plain.len());
    let mut depth = 0usize;
    for c in plain.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => without_parens.push(c),
            _ => {}
        }
    }

    let body = strip_enumerator(without_parens.trim());

    let mut out = String::with_capacity(body.len());
    for c in body.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Drop a leading `a)`, `b.`, `1)` or `12.` enumerator
fn strip_enumerator(text: &str) -> &str {
    let marker_len = text
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .count();
    if marker_len == 0 || marker_len > 2 {
        return text;
    }
    let rest = &text[marker_len..];
    let is_letter_marker = marker_len == 1 && text.starts_with(|c: char| c.is_ascii_lowercase());
    let is_number_marker = text[..marker_len].chars().all(|c| c.is_ascii_digit());
    match rest.strip_prefix(')').or_else(|| rest.strip_prefix('.')) {
        Some(after) if (is_letter_marker || is_number_marker) && after.starts_with(' ') => {
            after.trim_start()
        }
        _ => text,
    }
}

/// Compact form used for fuzzy header hints: alphanumerics only
#[must_use]
pub fn compact_label(label: &str) -> String {
    inline_text(label)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Canonical spelling to field, for one entity kind
#[derive(Debug, Clone)]
pub struct AliasTable {
    name: &'static str,
    entries: HashMap<&'static str, Field>,
}

impl AliasTable {
    /// Build a table from canonical spellings
    ///
    /// # Panics
    ///
    /// Panics when an alias is not already in normalized form or appears
    /// twice. Tables are process-wide constants, so either is a programming
    /// error that must surface on first use.
    #[must_use]
    pub fn new(name: &'static str, aliases: &[(&'static str, Field)]) -> Self {
        let mut entries = HashMap::with_capacity(aliases.len());
        for (alias, field) in aliases {
            let normalized = normalize_label(alias);
            assert!(
                normalized == *alias,
                "alias table '{name}': alias '{alias}' is not normalized (expected '{normalized}')"
            );
            let previous = entries.insert(*alias, *field);
            assert!(
                previous.is_none(),
                "alias table '{name}': duplicate alias '{alias}'"
            );
        }
        Self { name, entries }
    }

    /// Table name, for logs
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field for a raw label
    ///
    /// Exact normalized match first, then with a trailing `_strategy`
    /// removed (`"Timing Strategy"` matches `"timing"`).
    #[must_use]
    pub fn lookup(&self, raw_label: &str) -> Option<Field> {
        let key = normalize_label(raw_label);
        if key.is_empty() {
            return None;
        }
        self.entries.get(key.as_str()).copied().or_else(|| {
            key.strip_suffix("_strategy")
                .and_then(|stem| self.entries.get(stem).copied())
        })
    }

    /// Number of spellings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No spellings
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_examples() {
        assert_eq!(normalize_label("FSR-ID"), "fsr_id");
        assert_eq!(normalize_label("fsr id"), "fsr_id");
        assert_eq!(normalize_label("**Requirement ID**"), "requirement_id");
        assert_eq!(normalize_label("Fault Avoidance (7.4.2.3.a)"), "fault_avoidance");
        assert_eq!(normalize_label("b) Fault Detection"), "fault_detection");
        assert_eq!(normalize_label("FTTI [ms]"), "ftti");
        assert_eq!(normalize_label("Warning - Exposure Reduction"), "warning_exposure_reduction");
        assert_eq!(normalize_label("ASIL"), "asil");
    }

    #[test]
    fn enumerator_needs_separator() {
        assert_eq!(normalize_label("ab) thing"), "ab_thing");
        assert_eq!(normalize_label("12. Timing"), "timing");
        assert_eq!(normalize_label("asil"), "asil");
    }

    #[test]
    fn lookup_strips_strategy_suffix() {
        let table = AliasTable::new("test", &[("timing", Field::Timing), ("fsr_id", Field::Id)]);
        assert_eq!(table.lookup("Timing Strategy"), Some(Field::Timing));
        assert_eq!(table.lookup("FSR ID"), Some(Field::Id));
        assert_eq!(table.lookup("Note"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    #[should_panic(expected = "not normalized")]
    fn malformed_alias_panics() {
        let _ = AliasTable::new("broken", &[("FSR ID", Field::Id)]);
    }

    #[test]
    #[should_panic(expected = "duplicate alias")]
    fn duplicate_alias_panics() {
        let _ = AliasTable::new("broken", &[("asil", Field::Asil), ("asil", Field::Description)]);
    }

    #[test]
    fn compact_hints() {
        assert_eq!(compact_label("**FSR-ID**"), "fsrid");
    }
}
