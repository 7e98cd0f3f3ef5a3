//! Issue model
//!
//! Every finding is an [`Issue`]: a severity, a category for grouping in
//! the report, the [`Rule`] that raised it and the affected item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Blocks the work product
    Error,
    /// Should be addressed or justified
    Warning,
    /// Observation or statistic
    Info,
}

impl Severity {
    /// Report label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report section an issue is listed under
///
/// Variants are declared in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Required content missing
    Completeness,
    /// Records disagree with each other
    Consistency,
    /// Content present but wrong
    Correctness,
    /// Counts and distributions
    Statistics,
    /// Links between records
    Traceability,
}

impl Category {
    /// Lower-case tag
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Completeness => "completeness",
            Category::Consistency => "consistency",
            Category::Correctness => "correctness",
            Category::Statistics => "statistics",
            Category::Traceability => "traceability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule that raised an issue
///
/// Each rule has a stable slug (its `rule_ref`) and, where one applies, the
/// ISO 26262-3 clause it checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Rule {
    GoalDescription,
    GoalAsil,
    GoalSafeState,
    GoalFtti,
    GoalPhrasing,
    GoalSet,
    AsilDistribution,
    DuplicateId,
    StrategyRequired,
    StrategyDetail,
    StrategyCoverage,
    StrategyReference,
    FsrDescription,
    FsrAsil,
    FsrAllocation,
    OperatingModes,
    FsrTiming,
    FsrSafeState,
    FsrVerification,
    Measurability,
    /// At least one FSR per safety-relevant goal
    Coverage,
    AsilInheritance,
    AllocationCompleteness,
    FsrDistribution,
    Traceability,
    TraceabilityRatio,
    OrphanedFsr,
    CriterionText,
    CriterionMethod,
    CriterionSuccess,
    CriterionReference,
    CriteriaCoverage,
    CriteriaDistribution,
}

impl Rule {
    /// Stable slug used as the issue's `rule_ref`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::GoalDescription => "goal_description",
            Rule::GoalAsil => "goal_asil",
            Rule::GoalSafeState => "goal_safe_state",
            Rule::GoalFtti => "goal_ftti",
            Rule::GoalPhrasing => "goal_phrasing",
            Rule::GoalSet => "goal_set",
            Rule::AsilDistribution => "asil_distribution",
            Rule::DuplicateId => "duplicate_id",
            Rule::StrategyRequired => "strategy_required",
            Rule::StrategyDetail => "strategy_detail",
            Rule::StrategyCoverage => "strategy_coverage",
            Rule::StrategyReference => "strategy_reference",
            Rule::FsrDescription => "fsr_description",
            Rule::FsrAsil => "fsr_asil",
            Rule::FsrAllocation => "fsr_allocation",
            Rule::OperatingModes => "operating_modes",
            Rule::FsrTiming => "fsr_timing",
            Rule::FsrSafeState => "fsr_safe_state",
            Rule::FsrVerification => "fsr_verification",
            Rule::Measurability => "measurability",
            Rule::Coverage => "coverage",
            Rule::AsilInheritance => "asil_inheritance",
            Rule::AllocationCompleteness => "allocation_completeness",
            Rule::FsrDistribution => "fsr_distribution",
            Rule::Traceability => "traceability",
            Rule::TraceabilityRatio => "traceability_ratio",
            Rule::OrphanedFsr => "orphaned_fsr",
            Rule::CriterionText => "criterion_text",
            Rule::CriterionMethod => "criterion_method",
            Rule::CriterionSuccess => "criterion_success",
            Rule::CriterionReference => "criterion_reference",
            Rule::CriteriaCoverage => "criteria_coverage",
            Rule::CriteriaDistribution => "criteria_distribution",
        }
    }

    /// ISO 26262-3 clause, `None` for general housekeeping rules
    #[must_use]
    pub fn iso_clause(&self) -> Option<&'static str> {
        match self {
            Rule::GoalDescription | Rule::GoalPhrasing | Rule::GoalSet => Some("6.4.6"),
            Rule::GoalAsil | Rule::AsilDistribution => Some("6.4.5"),
            Rule::GoalSafeState => Some("7.4.2.5"),
            Rule::GoalFtti | Rule::FsrTiming => Some("7.4.2.4.b"),
            Rule::DuplicateId | Rule::TraceabilityRatio => None,
            Rule::StrategyRequired
            | Rule::StrategyDetail
            | Rule::StrategyCoverage
            | Rule::StrategyReference => Some("7.4.2.3"),
            Rule::FsrDescription
            | Rule::FsrVerification
            | Rule::Measurability
            | Rule::FsrDistribution
            | Rule::Traceability
            | Rule::OrphanedFsr => Some("7.4.2.1"),
            Rule::FsrAsil | Rule::AsilInheritance => Some("7.4.2.8.a"),
            Rule::FsrAllocation | Rule::AllocationCompleteness => Some("7.4.2.8"),
            Rule::OperatingModes => Some("7.4.2.4.a"),
            Rule::FsrSafeState => Some("7.4.2.4.c"),
            Rule::Coverage => Some("7.4.2.2"),
            Rule::CriterionText
            | Rule::CriterionMethod
            | Rule::CriterionSuccess
            | Rule::CriterionReference
            | Rule::CriteriaCoverage
            | Rule::CriteriaDistribution => Some("7.4.3"),
        }
    }
}

impl fmt::Display for Rule {
    /// `coverage, ISO 7.4.2.2`, or the bare slug without a clause
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iso_clause() {
            Some(clause) => write!(f, "{}, ISO {clause}", self.as_str()),
            None => f.write_str(self.as_str()),
        }
    }
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Severity
    pub severity: Severity,
    /// Report section
    pub category: Category,
    /// Rule that raised it
    #[serde(rename = "rule_ref")]
    pub rule: Rule,
    /// Human-readable message
    pub message: String,
    /// Affected record, when the finding concerns one
    pub item_id: Option<String>,
}

impl Issue {
    /// Issue without an item
    pub fn new(
        severity: Severity,
        category: Category,
        rule: Rule,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            rule,
            message: message.into(),
            item_id: None,
        }
    }

    /// Error issue
    pub fn error(category: Category, rule: Rule, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, rule, message)
    }

    /// Warning issue
    pub fn warning(category: Category, rule: Rule, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, rule, message)
    }

    /// Info issue
    pub fn info(category: Category, rule: Rule, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, rule, message)
    }

    /// Attach the affected item
    #[must_use]
    pub fn for_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// The rule's slug
    #[inline]
    #[must_use]
    pub fn rule_ref(&self) -> &'static str {
        self.rule.as_str()
    }

    /// Whether this issue fails the work product
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    /// `SEVERITY: message (rule_ref) [item_id]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.rule)?;
        if let Some(item) = &self.item_id {
            write!(f, " [{item}]")?;
        }
        Ok(())
    }
}
