use super::{Extract, KnownParents};
use crate::aliases::AliasTable;
use crate::config::ExtractionConfig;
use crate::descriptor::{builtin_regex, EntityDescriptor, EntityKind, ScatterRule};
use crate::fields::{Field, FieldSet};
use fsc_model::ids::{criterion_id_regex, fsr_ref_in, goal_ref_in};
use fsc_model::ValidationCriterion;
use once_cell::sync::Lazy;

const ALIASES: &[(&str, Field)] = &[
    ("id", Field::Id),
    ("vc_id", Field::Id),
    ("criterion_id", Field::Id),
    ("criteria_id", Field::Id),
    ("validation_criterion_id", Field::Id),
    ("fsr_id", Field::FsrId),
    ("fsr", Field::FsrId),
    ("fsr_ref", Field::FsrId),
    ("linked_fsr", Field::FsrId),
    ("requirement_id", Field::FsrId),
    ("safety_goal", Field::SafetyGoalId),
    ("safety_goal_id", Field::SafetyGoalId),
    ("sg", Field::SafetyGoalId),
    ("sg_id", Field::SafetyGoalId),
    ("goal", Field::SafetyGoalId),
    ("goal_id", Field::SafetyGoalId),
    ("criterion", Field::Criterion),
    ("criteria", Field::Criterion),
    ("validation_criterion", Field::Criterion),
    ("acceptance_criterion", Field::Criterion),
    ("description", Field::Criterion),
    ("validation_method", Field::ValidationMethod),
    ("method", Field::ValidationMethod),
    ("validation_approach", Field::ValidationMethod),
    ("test_conditions", Field::TestConditions),
    ("test_condition", Field::TestConditions),
    ("conditions", Field::TestConditions),
    ("success_criteria", Field::SuccessCriteria),
    ("success_criterion", Field::SuccessCriteria),
    ("pass_criteria", Field::SuccessCriteria),
    ("acceptance_criteria", Field::SuccessCriteria),
    ("evidence_required", Field::EvidenceRequired),
    ("required_evidence", Field::EvidenceRequired),
    ("evidence", Field::EvidenceRequired),
];

static DESCRIPTOR: Lazy<EntityDescriptor> = Lazy::new(|| EntityDescriptor {
    kind: EntityKind::ValidationCriterion,
    identity: Field::Id,
    id_pattern: criterion_id_regex(),
    aliases: AliasTable::new("validation_criterion", ALIASES),
    block_headers: vec![
        builtin_regex(
            "validation_criterion",
            r"^\s*\*\*(?P<id>VC-[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*)",
        ),
        builtin_regex(
            "validation_criterion",
            r"^\s*#{1,6}\s+\**(?P<id>VC-[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*)",
        ),
    ],
    header_hints: &["vcid", "criterionid", "criteriaid"],
    scatter_rules: vec![
        ScatterRule::new(Field::Criterion, r"(?im)^[\s*_#>-]*criterion[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(
            Field::ValidationMethod,
            r"(?im)^[\s*_#>-]*(?:validation\s+)?method[\s*_]*:[\s*_]*(.+)$",
        ),
        ScatterRule::new(
            Field::SuccessCriteria,
            r"(?im)^[\s*_#>-]*success\s+criteria[\s*_]*:[\s*_]*(.+)$",
        ),
    ],
    prose_field: Some(Field::Criterion),
});

impl Extract for ValidationCriterion {
    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_fields(
        fields: FieldSet,
        parents: &KnownParents<'_>,
        _config: &ExtractionConfig,
    ) -> Option<Self> {
        let raw_id = fields.get(Field::Id)?;
        let id = DESCRIPTOR.find_id(raw_id).unwrap_or(raw_id).to_string();

        let explicit_fsr = fields.get(Field::FsrId);
        let fsr_id = explicit_fsr
            .and_then(fsr_ref_in)
            .or(explicit_fsr)
            .or_else(|| fsr_ref_in(&id))
            .map(str::to_string);

        let known_fsr_goal = fsr_id
            .as_deref()
            .and_then(|f| parents.find_fsr(f))
            .map(|f| f.safety_goal_id.as_str())
            .filter(|g| !g.is_empty());
        let safety_goal_id = fields
            .get(Field::SafetyGoalId)
            .or(known_fsr_goal)
            .or_else(|| fsr_id.as_deref().and_then(goal_ref_in))
            .or_else(|| goal_ref_in(&id))
            .map(|reference| parents.canonical_goal_id(reference))
            .unwrap_or_default();

        Some(ValidationCriterion {
            id,
            fsr_id,
            safety_goal_id,
            criterion: fields.text(Field::Criterion).unwrap_or_default(),
            validation_method: fields.text(Field::ValidationMethod),
            test_conditions: fields.text(Field::TestConditions),
            success_criteria: fields.text(Field::SuccessCriteria),
            evidence_required: fields.text(Field::EvidenceRequired),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(pairs: &[(Field, &str)]) -> ValidationCriterion {
        let mut set = FieldSet::new();
        for (field, value) in pairs {
            set.insert_first(*field, *value);
        }
        ValidationCriterion::from_fields(set, &KnownParents::none(), &ExtractionConfig::default())
            .unwrap()
    }

    #[test]
    fn goal_level_from_id() {
        let vc = build(&[(Field::Id, "VC-SG-001-GOAL-1"), (Field::Criterion, "Vehicle decelerates")]);
        assert!(vc.is_goal_level());
        assert_eq!(vc.safety_goal_id, "SG-001");
    }

    #[test]
    fn fsr_level_from_id() {
        let vc = build(&[(Field::Id, "VC-FSR-SG-002-DET-1-1")]);
        assert_eq!(vc.fsr_id.as_deref(), Some("FSR-SG-002-DET-1"));
        assert_eq!(vc.safety_goal_id, "SG-002");
    }

    #[test]
    fn explicit_references_win() {
        let vc = build(&[
            (Field::Id, "VC-17"),
            (Field::FsrId, "FSR-SG-003-CTL-2"),
            (Field::SafetyGoalId, "SG-003"),
        ]);
        assert_eq!(vc.fsr_id.as_deref(), Some("FSR-SG-003-CTL-2"));
        assert_eq!(vc.safety_goal_id, "SG-003");
    }
}
