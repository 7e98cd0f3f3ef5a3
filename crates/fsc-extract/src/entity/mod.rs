//! Record builders per entity
//!
//! Each entity module owns its [`EntityDescriptor`] and turns a captured
//! [`FieldSet`] into a typed record. A builder returns `None` only when the
//! identity is missing; unknown parents never reject a record.

use crate::config::ExtractionConfig;
use crate::descriptor::EntityDescriptor;
use crate::fields::FieldSet;
use fsc_model::ids::{goal_ref_in, same_goal};
use fsc_model::{Fsr, SafetyGoal};

mod allocation;
mod criterion;
mod fsr;
mod goal;
mod strategy;

/// Records already known to the caller
///
/// Used to canonicalize references (`SG-1` resolves to a known `SG-001`)
/// and, for FSRs, to inherit parent fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownParents<'a> {
    /// Known safety goals
    pub goals: &'a [SafetyGoal],
    /// Known FSRs
    pub fsrs: &'a [Fsr],
}

impl<'a> KnownParents<'a> {
    /// No known parents
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Known goals only
    #[inline]
    #[must_use]
    pub fn goals(goals: &'a [SafetyGoal]) -> Self {
        Self { goals, fsrs: &[] }
    }

    /// Add known FSRs
    #[inline]
    #[must_use]
    pub fn with_fsrs(mut self, fsrs: &'a [Fsr]) -> Self {
        self.fsrs = fsrs;
        self
    }

    /// Known goal denoted by `reference`, ignoring zero padding
    #[must_use]
    pub fn find_goal(&self, reference: &str) -> Option<&'a SafetyGoal> {
        self.goals.iter().find(|g| same_goal(&g.id, reference))
    }

    /// Known FSR with exactly this ID
    #[must_use]
    pub fn find_fsr(&self, id: &str) -> Option<&'a Fsr> {
        let id = id.trim();
        self.fsrs.iter().find(|f| f.id == id)
    }

    /// Canonical goal reference
    ///
    /// The goal ID inside `text` (or the trimmed text when it holds none),
    /// replaced by the known goal's own spelling when one matches.
    #[must_use]
    pub fn canonical_goal_id(&self, text: &str) -> String {
        let reference = goal_ref_in(text).unwrap_or_else(|| text.trim());
        self.find_goal(reference)
            .map_or_else(|| reference.to_string(), |g| g.id.clone())
    }
}

/// A record type the pipeline can extract
pub trait Extract: Sized {
    /// Descriptor driving every strategy for this type
    fn descriptor() -> &'static EntityDescriptor;

    /// Build a record from captured fields
    ///
    /// Returns `None` when the fields do not identify a record.
    fn from_fields(
        fields: FieldSet,
        parents: &KnownParents<'_>,
        config: &ExtractionConfig,
    ) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_goal_uses_known_spelling() {
        let goals = vec![SafetyGoal::new("SG-001", "Avoid unintended braking", "C")];
        let parents = KnownParents::goals(&goals);
        assert_eq!(parents.canonical_goal_id("SG-1"), "SG-001");
        assert_eq!(parents.canonical_goal_id("Safety goal SG-001 (braking)"), "SG-001");
        assert_eq!(parents.canonical_goal_id("SG-004"), "SG-004");
        assert_eq!(KnownParents::none().canonical_goal_id(" HZ-3 "), "HZ-3");
    }
}
