use super::{Extract, KnownParents};
use crate::aliases::AliasTable;
use crate::config::ExtractionConfig;
use crate::descriptor::{builtin_regex, EntityDescriptor, EntityKind, ScatterRule};
use crate::fields::{Field, FieldSet};
use fsc_model::ids::goal_id_regex;
use fsc_model::{SafetyStrategy, StrategyKind};
use once_cell::sync::Lazy;

const ALIASES: &[(&str, Field)] = &[
    ("safety_goal", Field::SafetyGoalId),
    ("safety_goal_id", Field::SafetyGoalId),
    ("sg", Field::SafetyGoalId),
    ("sg_id", Field::SafetyGoalId),
    ("goal", Field::SafetyGoalId),
    ("goal_id", Field::SafetyGoalId),
    ("fault_avoidance", Field::Strategy(StrategyKind::FaultAvoidance)),
    ("fault_detection", Field::Strategy(StrategyKind::FaultDetection)),
    ("fault_control", Field::Strategy(StrategyKind::FaultControl)),
    ("safe_state_transition", Field::Strategy(StrategyKind::SafeStateTransition)),
    ("transition_to_safe_state", Field::Strategy(StrategyKind::SafeStateTransition)),
    ("fault_tolerance", Field::Strategy(StrategyKind::FaultTolerance)),
    ("degradation", Field::Strategy(StrategyKind::Degradation)),
    ("graceful_degradation", Field::Strategy(StrategyKind::Degradation)),
    ("warning_exposure", Field::Strategy(StrategyKind::WarningExposure)),
    ("warning_exposure_reduction", Field::Strategy(StrategyKind::WarningExposure)),
    ("driver_warning_exposure", Field::Strategy(StrategyKind::WarningExposure)),
    ("driver_warning_strategy_exposure", Field::Strategy(StrategyKind::WarningExposure)),
    ("exposure_reduction", Field::Strategy(StrategyKind::WarningExposure)),
    ("warning_controllability", Field::Strategy(StrategyKind::WarningControllability)),
    ("driver_warning_controllability", Field::Strategy(StrategyKind::WarningControllability)),
    (
        "driver_warning_strategy_controllability",
        Field::Strategy(StrategyKind::WarningControllability),
    ),
    ("timing", Field::Strategy(StrategyKind::Timing)),
    ("timing_requirements", Field::Strategy(StrategyKind::Timing)),
    ("arbitration", Field::Strategy(StrategyKind::Arbitration)),
    ("arbitration_logic", Field::Strategy(StrategyKind::Arbitration)),
];

/// Label pattern per aspect for the scatter strategy
const SCATTER_LABELS: &[(StrategyKind, &str)] = &[
    (StrategyKind::FaultAvoidance, r"fault\s+avoidance"),
    (StrategyKind::FaultDetection, r"fault\s+detection"),
    (StrategyKind::FaultControl, r"fault\s+control"),
    (StrategyKind::SafeStateTransition, r"safe\s+state(?:\s+transition)?"),
    (StrategyKind::FaultTolerance, r"fault\s+tolerance"),
    (StrategyKind::Degradation, r"degradation"),
    (StrategyKind::WarningExposure, r"(?:driver\s+)?warning[^\n:]*exposure"),
    (StrategyKind::WarningControllability, r"(?:driver\s+)?warning[^\n:]*controllability"),
    (StrategyKind::Timing, r"timing"),
    (StrategyKind::Arbitration, r"arbitration"),
];

static DESCRIPTOR: Lazy<EntityDescriptor> = Lazy::new(|| EntityDescriptor {
    kind: EntityKind::SafetyStrategy,
    identity: Field::SafetyGoalId,
    id_pattern: goal_id_regex(),
    aliases: AliasTable::new("safety_strategy", ALIASES),
    block_headers: vec![builtin_regex(
        "safety_strategy",
        r"(?i)^\s*#{1,6}\s+[^\n]*?\b(?P<id>SG-\d+)\b",
    )],
    header_hints: &["safetygoal", "sgid", "goalid"],
    scatter_rules: SCATTER_LABELS
        .iter()
        .map(|(kind, label)| {
            ScatterRule::new(
                Field::Strategy(*kind),
                &format!(r"(?im)^[\s*_#>-]*(?:[a-j][.)]\s*)?{label}[^\n:]*:[\s*_]*(.+)$"),
            )
        })
        .collect(),
    prose_field: None,
});

impl Extract for SafetyStrategy {
    fn descriptor() -> &'static EntityDescriptor {
        &DESCRIPTOR
    }

    fn from_fields(
        fields: FieldSet,
        parents: &KnownParents<'_>,
        _config: &ExtractionConfig,
    ) -> Option<Self> {
        let goal = fields.get(Field::SafetyGoalId)?;
        let mut strategy = SafetyStrategy::new(parents.canonical_goal_id(goal));
        for (kind, text) in fields.strategies() {
            if !text.is_empty() {
                strategy.strategies.insert(kind, text.to_string());
            }
        }
        Some(strategy)
    }
}
