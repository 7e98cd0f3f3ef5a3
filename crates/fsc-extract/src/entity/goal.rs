use super::{Extract, KnownParents};
use crate::aliases::AliasTable;
use crate::config::ExtractionConfig;
use crate::descriptor::{builtin_regex, EntityDescriptor, EntityKind, ScatterRule};
use crate::fields::{Field, FieldSet};
use fsc_model::ids::goal_id_regex;
use fsc_model::{normalize_asil_text, SafetyGoal};
use once_cell::sync::Lazy;

// HARA column spellings plus the labels goal generation tends to use
const ALIASES: &[(&str, Field)] = &[
    ("id", Field::Id),
    ("sg_id", Field::Id),
    ("sgid", Field::Id),
    ("goal_id", Field::Id),
    ("safety_goal_id", Field::Id),
    ("description", Field::Description),
    ("safety_goal", Field::Description),
    ("safety_goals", Field::Description),
    ("goal", Field::Description),
    ("functional_safety_goal", Field::Description),
    ("goal_description", Field::Description),
    ("asil", Field::Asil),
    ("asil_level", Field::Asil),
    ("safety_level", Field::Asil),
    ("integrity_level", Field::Asil),
    ("safe_state", Field::SafeState),
    ("safestate", Field::SafeState),
    ("safety_state", Field::SafeState),
    ("ss", Field::SafeState),
    ("ftti", Field::Ftti),
    ("fault_tolerant_time_interval", Field::Ftti),
    ("fault_tolerant_time", Field::Ftti),
    ("time_interval", Field::Ftti),
    ("reaction_time", Field::Ftti),
    ("s", Field::Severity),
    ("severity", Field::Severity),
    ("sev", Field::Severity),
    ("e", Field::Exposure),
    ("exposure", Field::Exposure),
    ("exp", Field::Exposure),
    ("c", Field::Controllability),
    ("controllability", Field::Controllability),
    ("ctrl", Field::Controllability),
    ("hazard_id", Field::HazardId),
    ("haz_id", Field::HazardId),
    ("h_id", Field::HazardId),
    ("hazard_number", Field::HazardId),
    ("hazardous_event", Field::HazardousEvent),
    ("hazard_event", Field::HazardousEvent),
    ("hazard", Field::HazardousEvent),
    ("he", Field::HazardousEvent),
    ("event", Field::HazardousEvent),
    ("operational_situation", Field::OperationalSituation),
    ("operating_situation", Field::OperationalSituation),
    ("driving_situation", Field::OperationalSituation),
    ("operation", Field::OperationalSituation),
    ("scenario", Field::OperationalSituation),
];

static DESCRIPTOR: Lazy<EntityDescriptor> = Lazy::new(|| EntityDescriptor {
    kind: EntityKind::SafetyGoal,
    identity: Field::Id,
    id_pattern: goal_id_regex(),
    aliases: AliasTable::new("safety_goal", ALIASES),
    block_headers: vec![
        builtin_regex(
            "safety_goal",
            r"(?i)^\s*#{1,6}\s+\**(?:safety\s+goal\s*)?(?P<id>SG-\d+)\b",
        ),
        builtin_regex(
            "safety_goal",
            r"(?i)^\s*\*\*(?:safety\s+goal\s*)?(?P<id>SG-\d+)\b",
        ),
    ],
    header_hints: &["sgid", "goalid"],
    scatter_rules: vec![
        ScatterRule::new(Field::Description, r"(?im)^[\s*_#>-]*description[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(Field::Asil, r"(?i)\bASIL[\s:*_-]*(QM|[ABCD])\b"),
        ScatterRule::new(Field::SafeState, r"(?im)\bsafe\s+state[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(
            Field::Ftti,
            r"(?i)\bFTTI\b[^\n\d]{0,20}(\d+(?:\.\d+)?\s*(?:ms|s)\b)",
        ),
        ScatterRule::new(Field::HazardId, r"\b(H(?:Z|AZ)?-\d+)\b"),
    ],
    prose_field: Some(Field::Description),
});

impl Extract for SafetyGoal {
    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_fields(
        fields: FieldSet,
        _parents: &KnownParents<'_>,
        _config: &ExtractionConfig,
    ) -> Option<Self> {
        let raw_id = fields.get(Field::Id)?;
        let id = DESCRIPTOR.find_id(raw_id).unwrap_or(raw_id).to_string();

        Some(SafetyGoal {
            id,
            description: fields.text(Field::Description).unwrap_or_default(),
            asil: fields.get(Field::Asil).map(normalize_asil_text).unwrap_or_default(),
            safe_state: fields.text(Field::SafeState),
            ftti: fields.text(Field::Ftti),
            severity: fields.text(Field::Severity),
            exposure: fields.text(Field::Exposure),
            controllability: fields.text(Field::Controllability),
            hazard_id: fields.text(Field::HazardId),
            hazardous_event: fields.text(Field::HazardousEvent),
            operational_situation: fields.text(Field::OperationalSituation),
        })
    }
}
