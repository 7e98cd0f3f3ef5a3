//! Validation outcome and report rendering

use crate::error::ValidateResult;
use crate::issue::{Category, Issue, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregated outcome of a validation run
///
/// `passed` holds exactly when no issue has [`Severity::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// No error-severity issues
    pub passed: bool,
    /// Every finding, in the order the checks raised them
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    /// Build the result and derive the verdict from the issues
    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let passed = !issues.iter().any(Issue::is_error);
        Self { passed, issues }
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Number of errors
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warnings
    #[inline]
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of informational findings
    #[inline]
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    /// Whether any error was raised
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.passed
    }

    /// Issues about one record
    pub fn issues_for<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues
            .iter()
            .filter(move |i| i.item_id.as_deref() == Some(item_id))
    }

    /// `PASSED - Errors: 0, Warnings: 2, Info: 5`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} - Errors: {}, Warnings: {}, Info: {}",
            if self.passed { "PASSED" } else { "FAILED" },
            self.error_count(),
            self.warning_count(),
            self.info_count()
        )
    }

    /// Plain-text report: the summary, then issues grouped by category
    #[must_use]
    pub fn format_report(&self) -> String {
        let mut out = self.summary();
        out.push('\n');

        if self.issues.is_empty() {
            out.push_str("\nNo issues found.\n");
            return out;
        }

        let mut grouped: BTreeMap<Category, Vec<&Issue>> = BTreeMap::new();
        for issue in &self.issues {
            grouped.entry(issue.category).or_default().push(issue);
        }
        for (category, issues) in grouped {
            let _ = write!(out, "\n### {}\n", category.as_str().to_uppercase());
            for issue in issues {
                let _ = writeln!(out, "{issue}");
            }
        }
        out
    }

    /// JSON rendering with `passed`, counts and the issue list
    pub fn to_json(&self) -> ValidateResult<String> {
        let value = serde_json::json!({
            "passed": self.passed,
            "summary": {
                "errors": self.error_count(),
                "warnings": self.warning_count(),
                "info": self.info_count(),
            },
            "issues": self.issues,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
