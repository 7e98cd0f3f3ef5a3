//! Domain records
//!
//! Plain value types for the entities of a functional safety concept.
//! Records never validate themselves: a record may reference a goal that
//! does not exist, or carry an ASIL nobody recognises. Those problems are
//! reported by the validators so that every gap shows up in one report.

use crate::allocation::AllocationType;
use crate::asil::{normalize_asil_text, Asil};
use crate::fsr_type::FsrType;
use crate::placeholder::{has_text, is_placeholder};
use crate::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Safety goal derived from one HARA row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafetyGoal {
    /// Identifier, `SG-###`
    pub id: String,
    /// Result-oriented goal statement
    pub description: String,
    /// Normalized ASIL text; see [`Asil::parse_lenient`]
    pub asil: String,
    /// Safe state to reach or maintain
    pub safe_state: Option<String>,
    /// Fault-tolerant time interval, free text
    pub ftti: Option<String>,
    /// HARA severity (S0-S3)
    pub severity: Option<String>,
    /// HARA exposure (E0-E4)
    pub exposure: Option<String>,
    /// HARA controllability (C0-C3)
    pub controllability: Option<String>,
    /// Originating hazard
    pub hazard_id: Option<String>,
    /// Hazardous event text
    pub hazardous_event: Option<String>,
    /// Operational situation text
    pub operational_situation: Option<String>,
}

impl SafetyGoal {
    /// Goal with the three mandatory fields
    pub fn new(id: impl Into<String>, description: impl Into<String>, asil: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            asil: normalize_asil_text(asil),
            ..Self::default()
        }
    }

    /// Set the safe state
    #[must_use]
    pub fn with_safe_state(mut self, safe_state: impl Into<String>) -> Self {
        self.safe_state = Some(safe_state.into());
        self
    }

    /// Set the FTTI
    #[must_use]
    pub fn with_ftti(mut self, ftti: impl Into<String>) -> Self {
        self.ftti = Some(ftti.into());
        self
    }

    /// Set the hazard reference
    #[must_use]
    pub fn with_hazard(mut self, hazard_id: impl Into<String>) -> Self {
        self.hazard_id = Some(hazard_id.into());
        self
    }

    /// Parsed ASIL, `None` when the text is not a recognised level
    #[inline]
    #[must_use]
    pub fn asil_level(&self) -> Option<Asil> {
        Asil::parse_lenient(&self.asil)
    }

    /// A goal with a recognised ASIL above QM
    #[inline]
    #[must_use]
    pub fn is_safety_relevant(&self) -> bool {
        self.asil_level().is_some_and(|a| a.is_safety_relevant())
    }
}

/// Safety strategy narrative for one goal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafetyStrategy {
    /// Goal this strategy belongs to
    pub safety_goal_id: String,
    /// Narrative per strategy aspect
    pub strategies: BTreeMap<StrategyKind, String>,
}

impl SafetyStrategy {
    /// Empty strategy for a goal
    pub fn new(safety_goal_id: impl Into<String>) -> Self {
        Self {
            safety_goal_id: safety_goal_id.into(),
            strategies: BTreeMap::new(),
        }
    }

    /// Set one aspect
    #[must_use]
    pub fn with_strategy(mut self, kind: StrategyKind, text: impl Into<String>) -> Self {
        self.strategies.insert(kind, text.into());
        self
    }

    /// Narrative for one aspect, if present
    #[inline]
    #[must_use]
    pub fn get(&self, kind: StrategyKind) -> Option<&str> {
        self.strategies.get(&kind).map(String::as_str)
    }

    /// Aspects that are absent or blank, in clause order
    #[must_use]
    pub fn missing_kinds(&self) -> Vec<StrategyKind> {
        StrategyKind::ALL
            .into_iter()
            .filter(|kind| !has_text(self.get(*kind)))
            .collect()
    }

    /// All ten aspects present with non-empty text
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_kinds().is_empty()
    }
}

/// Functional safety requirement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fsr {
    /// Identifier, `FSR-<goalRef>-<TYPE3>-<N>`
    pub id: String,
    /// Parent goal; empty when the text named none
    pub safety_goal_id: String,
    /// Copy of the parent goal description
    pub safety_goal: Option<String>,
    /// Requirement text
    pub description: String,
    /// Normalized ASIL text
    pub asil: String,
    /// Category
    #[serde(rename = "type")]
    pub fsr_type: FsrType,
    /// Operating modes the requirement applies in
    pub operating_modes: Option<String>,
    /// Timing constraint / FTTI
    pub timing: Option<String>,
    /// Safe state
    pub safe_state: Option<String>,
    /// Emergency operation
    pub emergency_operation: Option<String>,
    /// Functional redundancy
    pub functional_redundancy: Option<String>,
    /// Architectural element the requirement is allocated to
    pub allocated_to: Option<String>,
    /// Kind of architectural element
    pub allocation_type: Option<AllocationType>,
    /// Why that element
    pub allocation_rationale: Option<String>,
    /// Interfaces involved
    pub interface: Option<String>,
    /// How the requirement will be verified
    pub verification_criteria: Option<String>,
}

impl Fsr {
    /// FSR with identity, parent, text and ASIL; the type is read from the ID
    pub fn new(
        id: impl Into<String>,
        safety_goal_id: impl Into<String>,
        description: impl Into<String>,
        asil: &str,
    ) -> Self {
        let id = id.into();
        let fsr_type = FsrType::from_fsr_id(&id);
        Self {
            id,
            safety_goal_id: safety_goal_id.into(),
            description: description.into(),
            asil: normalize_asil_text(asil),
            fsr_type,
            ..Self::default()
        }
    }

    /// Set the allocation target
    #[must_use]
    pub fn with_allocation(mut self, allocated_to: impl Into<String>) -> Self {
        self.allocated_to = Some(allocated_to.into());
        self
    }

    /// Set timing
    #[must_use]
    pub fn with_timing(mut self, timing: impl Into<String>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    /// Set the safe state
    #[must_use]
    pub fn with_safe_state(mut self, safe_state: impl Into<String>) -> Self {
        self.safe_state = Some(safe_state.into());
        self
    }

    /// Set operating modes
    #[must_use]
    pub fn with_operating_modes(mut self, modes: impl Into<String>) -> Self {
        self.operating_modes = Some(modes.into());
        self
    }

    /// Set verification criteria
    #[must_use]
    pub fn with_verification(mut self, criteria: impl Into<String>) -> Self {
        self.verification_criteria = Some(criteria.into());
        self
    }

    /// Parsed ASIL, `None` when the text is not a recognised level
    #[inline]
    #[must_use]
    pub fn asil_level(&self) -> Option<Asil> {
        Asil::parse_lenient(&self.asil)
    }

    /// Allocated to a named element, not a placeholder
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.allocated_to
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty() && !is_placeholder(a))
    }

    /// Allocation text present but only a placeholder
    #[must_use]
    pub fn has_placeholder_allocation(&self) -> bool {
        self.allocated_to.as_deref().is_some_and(is_placeholder)
    }
}

/// Validation criterion for a goal or an FSR
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationCriterion {
    /// Identifier, `VC-...`
    pub id: String,
    /// FSR under validation; `None` for goal-level criteria
    pub fsr_id: Option<String>,
    /// Goal under validation
    pub safety_goal_id: String,
    /// Acceptance criterion text
    pub criterion: String,
    /// Test, analysis, review, ...
    pub validation_method: Option<String>,
    /// Conditions the validation runs under
    pub test_conditions: Option<String>,
    /// What counts as passing
    pub success_criteria: Option<String>,
    /// Evidence to archive
    pub evidence_required: Option<String>,
}

impl ValidationCriterion {
    /// Goal-level criterion
    pub fn for_goal(
        id: impl Into<String>,
        safety_goal_id: impl Into<String>,
        criterion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            safety_goal_id: safety_goal_id.into(),
            criterion: criterion.into(),
            ..Self::default()
        }
    }

    /// Attach to an FSR
    #[must_use]
    pub fn with_fsr(mut self, fsr_id: impl Into<String>) -> Self {
        self.fsr_id = Some(fsr_id.into());
        self
    }

    /// Set the validation method
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.validation_method = Some(method.into());
        self
    }

    /// Set the success criteria
    #[must_use]
    pub fn with_success_criteria(mut self, success: impl Into<String>) -> Self {
        self.success_criteria = Some(success.into());
        self
    }

    /// No FSR reference
    #[inline]
    #[must_use]
    pub fn is_goal_level(&self) -> bool {
        !has_text(self.fsr_id.as_deref())
    }
}
