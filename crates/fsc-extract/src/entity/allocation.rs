use super::{Extract, KnownParents};
use crate::aliases::AliasTable;
use crate::config::ExtractionConfig;
use crate::descriptor::{builtin_regex, EntityDescriptor, EntityKind, ScatterRule};
use crate::fields::{Field, FieldSet};
use fsc_model::ids::fsr_id_regex;
use fsc_model::{AllocationRecord, AllocationType};
use once_cell::sync::Lazy;

const ALIASES: &[(&str, Field)] = &[
    ("fsr_id", Field::FsrId),
    ("fsrid", Field::FsrId),
    ("fsr", Field::FsrId),
    ("id", Field::FsrId),
    ("requirement_id", Field::FsrId),
    ("allocation_for_fsr", Field::FsrId),
    ("primary_allocation", Field::AllocatedTo),
    ("allocated_to", Field::AllocatedTo),
    ("allocation", Field::AllocatedTo),
    ("component", Field::AllocatedTo),
    ("primary_component", Field::AllocatedTo),
    ("architectural_element", Field::AllocatedTo),
    ("element", Field::AllocatedTo),
    ("component_type", Field::AllocationType),
    ("allocation_type", Field::AllocationType),
    ("element_type", Field::AllocationType),
    ("type", Field::AllocationType),
    ("rationale", Field::AllocationRationale),
    ("allocation_rationale", Field::AllocationRationale),
    ("justification", Field::AllocationRationale),
    ("interface", Field::Interface),
    ("interfaces", Field::Interface),
    ("key_interfaces", Field::Interface),
];

static DESCRIPTOR: Lazy<EntityDescriptor> = Lazy::new(|| EntityDescriptor {
    kind: EntityKind::Allocation,
    identity: Field::FsrId,
    id_pattern: fsr_id_regex(),
    aliases: AliasTable::new("allocation", ALIASES),
    block_headers: vec![
        builtin_regex(
            "allocation",
            r"^\s*#{1,6}\s*(?i:allocation\s+for\s+fsr)\s*:?\s*\**(?P<id>FSR-SG-\d+-[A-Z]{3}-\d+)",
        ),
        builtin_regex("allocation", r"^\s*#{1,6}\s+\**(?P<id>FSR-SG-\d+-[A-Z]{3}-\d+)\b"),
    ],
    header_hints: &["fsrid"],
    scatter_rules: vec![
        ScatterRule::new(
            Field::AllocatedTo,
            r"(?im)\b(?:primary\s+allocation|allocated\s+to)[\s*_]*:?[\s*_]*([^\n.;|]+)",
        ),
        ScatterRule::new(Field::AllocationType, r"(?im)\bcomponent\s+type[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(Field::AllocationRationale, r"(?im)\brationale[\s*_]*:[\s*_]*(.+)$"),
        ScatterRule::new(Field::Interface, r"(?im)\binterfaces?[\s*_]*:[\s*_]*(.+)$"),
    ],
    prose_field: None,
});

impl Extract for AllocationRecord {
    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    /// An allocation without a target component is dropped
    fn from_fields(
        fields: FieldSet,
        _parents: &KnownParents<'_>,
        _config: &ExtractionConfig,
    ) -> Option<Self> {
        let raw_id = fields.get(Field::FsrId)?;
        let allocated_to = fields.text(Field::AllocatedTo)?;

        Some(AllocationRecord {
            fsr_id: DESCRIPTOR.find_id(raw_id).unwrap_or(raw_id).to_string(),
            allocated_to,
            allocation_type: fields
                .get(Field::AllocationType)
                .and_then(AllocationType::parse_lenient),
            rationale: fields.text(Field::AllocationRationale),
            interface: fields.text(Field::Interface),
        })
    }
}
