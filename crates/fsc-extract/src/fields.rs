//! Canonical record fields
//!
//! Every strategy reduces text to a [`FieldSet`]: canonical field to raw
//! value. Record builders then turn field sets into typed records.

use fsc_model::StrategyKind;
use std::collections::BTreeMap;
use std::fmt;

/// A canonical field any entity may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Record identifier
    Id,
    /// Parent safety goal reference
    SafetyGoalId,
    /// Parent FSR reference
    FsrId,
    /// Statement / requirement text
    Description,
    /// ASIL text
    Asil,
    /// Safe state
    SafeState,
    /// Goal FTTI
    Ftti,
    /// HARA severity
    Severity,
    /// HARA exposure
    Exposure,
    /// HARA controllability
    Controllability,
    /// Hazard reference
    HazardId,
    /// Hazardous event
    HazardousEvent,
    /// Operational situation
    OperationalSituation,
    /// FSR category
    Category,
    /// FSR operating modes
    OperatingModes,
    /// FSR timing constraint
    Timing,
    /// FSR emergency operation
    EmergencyOperation,
    /// FSR functional redundancy
    FunctionalRedundancy,
    /// Allocation target
    AllocatedTo,
    /// Allocation element kind
    AllocationType,
    /// Allocation rationale
    AllocationRationale,
    /// Interfaces
    Interface,
    /// FSR verification criteria
    VerificationCriteria,
    /// Validation criterion text
    Criterion,
    /// Validation method
    ValidationMethod,
    /// Test conditions
    TestConditions,
    /// Success criteria
    SuccessCriteria,
    /// Evidence required
    EvidenceRequired,
    /// One strategy aspect narrative
    Strategy(StrategyKind),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Strategy(kind) => write!(f, "strategy:{}", kind.as_str()),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Raw values captured for one record
///
/// The first value captured for a field is kept; later values for the same
/// field are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: BTreeMap<Field, String>,
}

impl FieldSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `value` unless `field` already has one
    ///
    /// Returns whether the value was taken.
    pub fn insert_first(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.values.entry(field) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Append a continuation line to an already captured field
    pub fn append_line(&mut self, field: Field, line: &str) {
        if let Some(value) = self.values.get_mut(&field) {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(line);
        }
    }

    /// Trimmed, non-empty value
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Owned trimmed value
    #[must_use]
    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// Whether `field` has a non-empty value
    #[inline]
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Whether `field` was captured at all, even empty
    #[inline]
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Whether any field other than `identity` has content
    #[must_use]
    pub fn has_content_besides(&self, identity: Field) -> bool {
        self.values
            .iter()
            .any(|(field, value)| *field != identity && !value.trim().is_empty())
    }

    /// Fill every field of `other` this set lacks
    pub fn merge_missing(&mut self, other: FieldSet) {
        for (field, value) in other.values {
            self.values.entry(field).or_insert(value);
        }
    }

    /// Captured strategy narratives
    pub fn strategies(&self) -> impl Iterator<Item = (StrategyKind, &str)> {
        self.values.iter().filter_map(|(field, value)| match field {
            Field::Strategy(kind) => Some((*kind, value.trim())),
            _ => None,
        })
    }

    /// Nothing captured
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
