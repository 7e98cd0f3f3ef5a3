//! Entity descriptors
//!
//! One descriptor per extractable entity parameterizes every strategy: the
//! identity field and its ID pattern, the alias table, block header
//! patterns and the scatter rules used as a last resort.

use crate::aliases::AliasTable;
use crate::fields::Field;
use regex::Regex;
use std::fmt;

/// Extractable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Safety goals
    SafetyGoal,
    /// Safety strategies
    SafetyStrategy,
    /// Functional safety requirements
    Fsr,
    /// Validation criteria
    ValidationCriterion,
    /// Allocation decisions
    Allocation,
}

impl EntityKind {
    /// Short name for logs and reports
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::SafetyGoal => "safety_goal",
            EntityKind::SafetyStrategy => "safety_strategy",
            EntityKind::Fsr => "fsr",
            EntityKind::ValidationCriterion => "validation_criterion",
            EntityKind::Allocation => "allocation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(pattern, field)` pair for the scatter strategy
///
/// The first capture group (or the whole match) becomes the field value.
#[derive(Debug, Clone)]
pub struct ScatterRule {
    /// Field to fill
    pub field: Field,
    /// Pattern applied to the context window
    pub pattern: Regex,
}

impl ScatterRule {
    /// Build a rule from a pattern source
    ///
    /// # Panics
    ///
    /// Panics on an invalid pattern; rules are built once into process-wide
    /// descriptors.
    #[must_use]
    pub fn new(field: Field, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("scatter rule for {field}: invalid pattern: {e}"));
        Self { field, pattern }
    }

    /// First value this rule finds in `window`
    #[must_use]
    pub fn find<'t>(&self, window: &'t str) -> Option<&'t str> {
        let caps = self.pattern.captures(window)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
    }
}

/// How to recognise one entity kind in text
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Entity kind
    pub kind: EntityKind,
    /// Field a record cannot exist without
    pub identity: Field,
    /// Pattern an identity value must contain
    pub id_pattern: &'static Regex,
    /// Label spellings
    pub aliases: AliasTable,
    /// Raw-line patterns that open a new labeled block
    ///
    /// A named `id` group, when present, captures the identity.
    pub block_headers: Vec<Regex>,
    /// Compact header substrings that mark a table identity column
    pub header_hints: &'static [&'static str],
    /// Ordered scatter rules
    pub scatter_rules: Vec<ScatterRule>,
    /// Field filled from the first prose line of a scatter window
    pub prose_field: Option<Field>,
}

impl EntityDescriptor {
    /// First ID-pattern match inside `value`
    #[must_use]
    pub fn find_id<'t>(&self, value: &'t str) -> Option<&'t str> {
        self.id_pattern.find(value).map(|m| m.as_str())
    }

    /// Identity captured by a block header line, if the line is one
    ///
    /// `Some(None)` is a header without an identity group.
    #[must_use]
    pub fn match_header<'t>(&self, line: &'t str) -> Option<Option<&'t str>> {
        self.block_headers.iter().find_map(|header| {
            header
                .captures(line)
                .map(|caps| caps.name("id").map(|m| m.as_str()))
        })
    }
}

/// Compile a built-in pattern
///
/// # Panics
///
/// Panics on an invalid pattern, naming the descriptor it belongs to.
#[must_use]
pub fn builtin_regex(owner: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("{owner}: invalid built-in pattern: {e}"))
}
