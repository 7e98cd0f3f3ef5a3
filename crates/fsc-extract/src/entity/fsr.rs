use super::{Extract, KnownParents};
use crate::aliases::AliasTable;
use crate::config::ExtractionConfig;
use crate::descriptor::{builtin_regex, EntityDescriptor, EntityKind, ScatterRule};
use crate::fields::{Field, FieldSet};
use fsc_model::ids::{fsr_id_regex, goal_ref_in};
use fsc_model::{is_placeholder, normalize_asil_text, AllocationType, Fsr, FsrType};
use once_cell::sync::Lazy;

const ALIASES: &[(&str, Field)] = &[
    ("fsr_id", Field::Id),
    ("fsrid", Field::Id),
    ("id", Field::Id),
    ("fsr", Field::Id),
    ("requirement_id", Field::Id),
    ("req_id", Field::Id),
    ("safety_goal", Field::SafetyGoalId),
    ("safety_goal_id", Field::SafetyGoalId),
    ("sg_id", Field::SafetyGoalId),
    ("sg", Field::SafetyGoalId),
    ("goal", Field::SafetyGoalId),
    ("goal_id", Field::SafetyGoalId),
    ("parent_goal", Field::SafetyGoalId),
    ("parent_safety_goal", Field::SafetyGoalId),
    ("linked_to_sg", Field::SafetyGoalId),
    ("traces_to", Field::SafetyGoalId),
    ("description", Field::Description),
    ("fsr_description", Field::Description),
    ("requirement", Field::Description),
    ("requirement_text", Field::Description),
    ("statement", Field::Description),
    ("asil", Field::Asil),
    ("asil_level", Field::Asil),
    ("category", Field::Category),
    ("type", Field::Category),
    ("fsr_type", Field::Category),
    ("requirement_type", Field::Category),
    ("operating_modes", Field::OperatingModes),
    ("operating_mode", Field::OperatingModes),
    ("modes", Field::OperatingModes),
    ("timing", Field::Timing),
    ("ftti", Field::Timing),
    ("timing_constraint", Field::Timing),
    ("fault_tolerant_time_interval", Field::Timing),
    ("reaction_time", Field::Timing),
    ("response_time", Field::Timing),
    ("safe_state", Field::SafeState),
    ("emergency_operation", Field::EmergencyOperation),
    ("functional_redundancy", Field::FunctionalRedundancy),
    ("redundancy", Field::FunctionalRedundancy),
    ("allocated_to", Field::AllocatedTo),
    ("allocation", Field::AllocatedTo),
    ("allocated", Field::AllocatedTo),
    ("preliminary_allocation", Field::AllocatedTo),
    ("primary_allocation", Field::AllocatedTo),
    ("component", Field::AllocatedTo),
    ("architectural_element", Field::AllocatedTo),
    ("allocation_type", Field::AllocationType),
    ("component_type", Field::AllocationType),
    ("allocation_rationale", Field::AllocationRationale),
    ("rationale", Field::AllocationRationale),
    ("interface", Field::Interface),
    ("interfaces", Field::Interface),
    ("verification", Field::VerificationCriteria),
    ("verification_criteria", Field::VerificationCriteria),
    ("verification_method", Field::VerificationCriteria),
    ("verification_criterion", Field::VerificationCriteria),
];

static DESCRIPTOR: Lazy<EntityDescriptor> = Lazy::new(|| EntityDescriptor {
    kind: EntityKind::Fsr,
    identity: Field::Id,
    id_pattern: fsr_id_regex(),
    aliases: AliasTable::new("fsr", ALIASES),
    block_headers: vec![
        builtin_regex("fsr", r"^\s*#{1,6}\s+\**(?P<id>FSR-SG-\d+-[A-Z]{3}-\d+)\b"),
        builtin_regex("fsr", r"^\s*\*\*(?P<id>FSR-SG-\d+-[A-Z]{3}-\d+)\*\*"),
    ],
    header_hints: &["fsrid", "requirementid"],
    scatter_rules: vec![
        ScatterRule::new(Field::Description, r"(?im)^[\s*_#>-]*description[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(Field::Asil, r"(?i)\bASIL[\s:*_-]*(QM|[ABCD])\b"),
        ScatterRule::new(Field::SafetyGoalId, r"(?i)\bsafety\s+goal\b[^\n]{0,20}?\b(SG-\d+)\b"),
        ScatterRule::new(Field::Category, r"(?im)^[\s*_#>-]*(?:category|type)[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(
            Field::Timing,
            r"(?i)\b(?:within|ftti|timing|response time|reaction time)\b[^\n\d]{0,20}(\d+(?:\.\d+)?\s*(?:ms|s|us)\b)",
        ),
        ScatterRule::new(Field::SafeState, r"(?im)\bsafe\s+state[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(
            Field::AllocatedTo,
            r"(?im)\b(?:allocated\s+to|allocation)[\s*_]*:?[\s*_]*([^\n.;|]+)",
        ),
        ScatterRule::new(
            Field::VerificationCriteria,
            r"(?im)^[\s*_#>-]*verification[^\n:]*:[\s*_]*(.+)$",
        ),
    ],
    prose_field: Some(Field::Description),
});

impl Extract for Fsr {
    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_fields(
        fields: FieldSet,
        parents: &KnownParents<'_>,
        config: &ExtractionConfig,
    ) -> Option<Self> {
        let raw_id = fields.get(Field::Id)?;
        let id = DESCRIPTOR.find_id(raw_id).unwrap_or(raw_id).to_string();

        let explicit_goal = fields.get(Field::SafetyGoalId);
        let safety_goal_id = explicit_goal
            .and_then(goal_ref_in)
            .or_else(|| goal_ref_in(&id))
            .or(explicit_goal)
            .map(|reference| parents.canonical_goal_id(reference))
            .unwrap_or_default();

        let parent = if config.inherit_parent_fields && !safety_goal_id.is_empty() {
            parents.find_goal(&safety_goal_id)
        } else {
            None
        };

        let asil = fields
            .get(Field::Asil)
            .map(normalize_asil_text)
            .or_else(|| parent.map(|g| g.asil.clone()))
            .unwrap_or_default();

        let fsr_type = fields
            .get(Field::Category)
            .and_then(FsrType::from_category)
            .unwrap_or_else(|| FsrType::from_fsr_id(&id));

        let allocated_to = fields.text(Field::AllocatedTo);
        let allocation_type = fields
            .get(Field::AllocationType)
            .and_then(AllocationType::parse_lenient)
            .or_else(|| {
                allocated_to
                    .as_deref()
                    .filter(|a| !is_placeholder(a))
                    .map(AllocationType::infer_from_component)
            });

        Some(Fsr {
            safety_goal: parent.map(|g| g.description.clone()),
            description: fields.text(Field::Description).unwrap_or_default(),
            asil,
            fsr_type,
            operating_modes: fields
                .text(Field::OperatingModes)
                .or_else(|| config.default_operating_modes.clone()),
            timing: fields
                .text(Field::Timing)
                .or_else(|| parent.and_then(|g| g.ftti.clone())),
            safe_state: fields
                .text(Field::SafeState)
                .or_else(|| parent.and_then(|g| g.safe_state.clone())),
            emergency_operation: fields.text(Field::EmergencyOperation),
            functional_redundancy: fields.text(Field::FunctionalRedundancy),
            allocated_to,
            allocation_type,
            allocation_rationale: fields.text(Field::AllocationRationale),
            interface: fields.text(Field::Interface),
            verification_criteria: fields.text(Field::VerificationCriteria),
            id,
            safety_goal_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsc_model::SafetyGoal;

    fn fields(pairs: &[(Field, &str)]) -> FieldSet {
        let mut set = FieldSet::new();
        for (field, value) in pairs {
            set.insert_first(*field, *value);
        }
        set
    }

    #[test]
    fn goal_reference_from_id_when_absent() {
        let fsr = Fsr::from_fields(
            fields(&[(Field::Id, "FSR-SG-002-CTL-1"), (Field::Description, "Limit torque")]),
            &KnownParents::none(),
            &ExtractionConfig::default(),
        )
        .unwrap();
        assert_eq!(fsr.safety_goal_id, "SG-002");
        assert_eq!(fsr.fsr_type, FsrType::FaultControl);
        assert_eq!(fsr.asil, "");
    }

    #[test]
    fn inherits_from_resolved_parent() {
        let goals = vec![SafetyGoal::new("SG-001", "Avoid over-voltage damage", "D")
            .with_ftti("100 ms")
            .with_safe_state("Supply disconnected")];
        let fsr = Fsr::from_fields(
            fields(&[(Field::Id, "FSR-SG-1-DET-1"), (Field::Description, "Detect >5%")]),
            &KnownParents::goals(&goals),
            &ExtractionConfig::default(),
        )
        .unwrap();
        assert_eq!(fsr.safety_goal_id, "SG-001");
        assert_eq!(fsr.asil, "D");
        assert_eq!(fsr.timing.as_deref(), Some("100 ms"));
        assert_eq!(fsr.safe_state.as_deref(), Some("Supply disconnected"));
        assert_eq!(fsr.safety_goal.as_deref(), Some("Avoid over-voltage damage"));
    }

    #[test]
    fn inheritance_can_be_disabled() {
        let goals = vec![SafetyGoal::new("SG-001", "Avoid over-voltage damage", "D")];
        let config = ExtractionConfig::default().with_inherit_parent_fields(false);
        let fsr = Fsr::from_fields(
            fields(&[(Field::Id, "FSR-SG-001-DET-1")]),
            &KnownParents::goals(&goals),
            &config,
        )
        .unwrap();
        assert_eq!(fsr.asil, "");
        assert_eq!(fsr.safety_goal, None);
    }

    #[test]
    fn allocation_type_inferred_unless_placeholder() {
        let config = ExtractionConfig::default();
        let ecu = Fsr::from_fields(
            fields(&[(Field::Id, "FSR-SG-001-DET-1"), (Field::AllocatedTo, "Battery ECU")]),
            &KnownParents::none(),
            &config,
        )
        .unwrap();
        assert_eq!(ecu.allocation_type, Some(AllocationType::Hardware));

        let tbd = Fsr::from_fields(
            fields(&[(Field::Id, "FSR-SG-001-DET-2"), (Field::AllocatedTo, "TBD")]),
            &KnownParents::none(),
            &config,
        )
        .unwrap();
        assert_eq!(tbd.allocation_type, None);
    }

    #[test]
    fn missing_identity_builds_nothing() {
        let built = Fsr::from_fields(
            fields(&[(Field::Description, "Detect over-voltage")]),
            &KnownParents::none(),
            &ExtractionConfig::default(),
        );
        assert!(built.is_none());
    }

    #[test]
    fn alias_table_is_well_formed() {
        assert_eq!(Fsr::descriptor().aliases.len(), ALIASES.len());
    }
}
