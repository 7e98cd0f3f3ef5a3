//! Allocation of FSRs to architectural elements
//!
//! Allocation is not a stored entity. The allocation step produces
//! [`AllocationRecord`]s, [`apply_allocations`] folds them into new FSR
//! values, and [`AllocationView`] projects a set of FSRs by component.

use crate::error::ModelError;
use crate::fsr_type::FsrType;
use crate::records::Fsr;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Kind of architectural element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    /// Hardware element
    Hardware,
    /// Software element
    Software,
    /// Mechanical element
    Mechanical,
    /// Hydraulic element
    Hydraulic,
    /// Electrical element
    Electrical,
    /// Electronic element
    Electronic,
    /// Whole-system allocation
    System,
    /// Element outside the item
    External,
}

const HARDWARE_WORDS: &[&str] = &[
    "hardware", "sensor", "actuator", "ecu", "module", "circuit", "monitor",
    "controller", "relay", "valve", "motor", "microcontroller", "watchdog",
];
const SOFTWARE_WORDS: &[&str] = &[
    "software", "algorithm", "function", "logic", "routine", "application",
    "driver", "handler", "protocol", "stack",
];
const EXTERNAL_WORDS: &[&str] = &[
    "vcu", "hmi", "cluster", "external", "gateway", "bcm", "vehicle", "network",
    "bus", "cloud",
];
const MECHANICAL_WORDS: &[&str] = &["mechanical", "spring", "lock", "physical", "fail-safe"];

impl AllocationType {
    /// All types
    pub const ALL: [AllocationType; 8] = [
        AllocationType::Hardware,
        AllocationType::Software,
        AllocationType::Mechanical,
        AllocationType::Hydraulic,
        AllocationType::Electrical,
        AllocationType::Electronic,
        AllocationType::System,
        AllocationType::External,
    ];

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            AllocationType::Hardware => "Hardware",
            AllocationType::Software => "Software",
            AllocationType::Mechanical => "Mechanical",
            AllocationType::Hydraulic => "Hydraulic",
            AllocationType::Electrical => "Electrical",
            AllocationType::Electronic => "Electronic",
            AllocationType::System => "System Level",
            AllocationType::External => "External Element",
        }
    }

    /// Lenient parse of an explicit type label
    ///
    /// Matches on the first word, so `"Software (ASIL C partition)"` and
    /// `"external element"` both resolve.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Option<AllocationType> {
        let lower = text.trim().to_lowercase();
        let first = lower
            .split(|c: char| !c.is_alphanumeric())
            .find(|w| !w.is_empty())?;
        match first {
            "hardware" | "hw" => Some(AllocationType::Hardware),
            "software" | "sw" => Some(AllocationType::Software),
            "mechanical" => Some(AllocationType::Mechanical),
            "hydraulic" => Some(AllocationType::Hydraulic),
            "electrical" => Some(AllocationType::Electrical),
            "electronic" => Some(AllocationType::Electronic),
            "system" => Some(AllocationType::System),
            "external" => Some(AllocationType::External),
            _ => None,
        }
    }

    /// Infer a type from a component name
    ///
    /// Keyword groups are checked hardware, software, external, mechanical;
    /// a name matching none defaults to hardware.
    #[must_use]
    pub fn infer_from_component(component: &str) -> AllocationType {
        let lower = component.to_lowercase();
        let hit = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if hit(HARDWARE_WORDS) {
            AllocationType::Hardware
        } else if hit(SOFTWARE_WORDS) {
            AllocationType::Software
        } else if hit(EXTERNAL_WORDS) {
            AllocationType::External
        } else if hit(MECHANICAL_WORDS) {
            AllocationType::Mechanical
        } else {
            AllocationType::Hardware
        }
    }
}

impl fmt::Display for AllocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AllocationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| ModelError::UnknownAllocationType(s.to_string()))
    }
}

/// One allocation decision from the allocation step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// FSR being allocated
    pub fsr_id: String,
    /// Primary component
    pub allocated_to: String,
    /// Explicit component type, if the text gave one
    pub allocation_type: Option<AllocationType>,
    /// Why this component
    pub rationale: Option<String>,
    /// Interfaces involved
    pub interface: Option<String>,
}

impl AllocationRecord {
    /// Record with FSR and component
    pub fn new(fsr_id: impl Into<String>, allocated_to: impl Into<String>) -> Self {
        Self {
            fsr_id: fsr_id.into(),
            allocated_to: allocated_to.into(),
            ..Self::default()
        }
    }

    /// Explicit type, or one inferred from the component name
    #[must_use]
    pub fn resolved_type(&self) -> AllocationType {
        self.allocation_type
            .unwrap_or_else(|| AllocationType::infer_from_component(&self.allocated_to))
    }
}

/// Fold allocation records into copies of `fsrs`
///
/// The first record naming an FSR wins; later records for the same FSR and
/// records naming unknown FSRs are ignored. FSRs without a record are
/// returned unchanged.
#[must_use]
pub fn apply_allocations(fsrs: &[Fsr], records: &[AllocationRecord]) -> Vec<Fsr> {
    let mut first: HashMap<&str, &AllocationRecord> = HashMap::new();
    for record in records {
        first.entry(record.fsr_id.trim()).or_insert(record);
    }

    fsrs.iter()
        .map(|fsr| {
            let mut fsr = fsr.clone();
            if let Some(record) = first.get(fsr.id.as_str()) {
                fsr.allocated_to = Some(record.allocated_to.clone());
                fsr.allocation_type = Some(record.resolved_type());
                if record.rationale.is_some() {
                    fsr.allocation_rationale.clone_from(&record.rationale);
                }
                if record.interface.is_some() {
                    fsr.interface.clone_from(&record.interface);
                }
            }
            fsr
        })
        .collect()
}

/// FSRs projected by allocation target
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationView {
    /// FSR IDs per component, components in lexical order
    pub by_component: BTreeMap<String, Vec<String>>,
    /// FSRs with no real allocation, in input order
    pub unallocated: Vec<String>,
    /// Allocated FSR count per component type
    pub by_type: BTreeMap<AllocationType, usize>,
    /// Allocated FSR count per ASIL text
    pub by_asil: BTreeMap<String, usize>,
    /// Allocated FSR count per FSR category
    pub by_fsr_type: BTreeMap<FsrType, usize>,
}

impl AllocationView {
    /// Build the projection
    #[must_use]
    pub fn build(fsrs: &[Fsr]) -> Self {
        let mut view = Self::default();
        for fsr in fsrs {
            let Some(component) = fsr.allocated_to.as_deref().filter(|_| fsr.is_allocated()) else {
                view.unallocated.push(fsr.id.clone());
                continue;
            };
            let component = component.trim();
            view.by_component
                .entry(component.to_string())
                .or_default()
                .push(fsr.id.clone());

            let kind = fsr
                .allocation_type
                .unwrap_or_else(|| AllocationType::infer_from_component(component));
            *view.by_type.entry(kind).or_default() += 1;
            *view.by_asil.entry(fsr.asil.clone()).or_default() += 1;
            *view.by_fsr_type.entry(fsr.fsr_type).or_default() += 1;
        }
        view
    }

    /// FSRs with a real allocation
    #[inline]
    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.by_component.values().map(Vec::len).sum()
    }

    /// Distinct components
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.by_component.len()
    }

    /// FSR IDs allocated to `component`
    #[must_use]
    pub fn fsrs_for(&self, component: &str) -> &[String] {
        self.by_component
            .get(component.trim())
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fsr(id: &str) -> Fsr {
        Fsr::new(id, "SG-001", "Requirement text long enough", "C")
    }

    #[test]
    fn infer_component_types() {
        assert_eq!(AllocationType::infer_from_component("Brake ECU"), AllocationType::Hardware);
        assert_eq!(
            AllocationType::infer_from_component("Torque arbitration algorithm"),
            AllocationType::Software
        );
        assert_eq!(AllocationType::infer_from_component("Instrument cluster"), AllocationType::External);
        assert_eq!(AllocationType::infer_from_component("Parking pawl spring"), AllocationType::Mechanical);
        assert_eq!(AllocationType::infer_from_component("Thing"), AllocationType::Hardware);
    }

    #[test]
    fn explicit_type_labels() {
        assert_eq!(AllocationType::parse_lenient("Software"), Some(AllocationType::Software));
        assert_eq!(AllocationType::parse_lenient("external element"), Some(AllocationType::External));
        assert_eq!(AllocationType::parse_lenient("System Level"), Some(AllocationType::System));
        assert_eq!(AllocationType::parse_lenient("bespoke"), None);
    }

    #[test]
    fn first_record_wins_and_inputs_untouched() {
        let fsrs = vec![fsr("FSR-SG-001-DET-1"), fsr("FSR-SG-001-CTL-1")];
        let records = vec![
            AllocationRecord::new("FSR-SG-001-DET-1", "Voltage monitor"),
            AllocationRecord::new("FSR-SG-001-DET-1", "Gateway"),
            AllocationRecord::new("FSR-SG-009-DET-1", "Elsewhere"),
        ];

        let applied = apply_allocations(&fsrs, &records);
        assert_eq!(applied[0].allocated_to.as_deref(), Some("Voltage monitor"));
        assert_eq!(applied[0].allocation_type, Some(AllocationType::Hardware));
        assert_eq!(applied[1].allocated_to, None);
        assert_eq!(fsrs[0].allocated_to, None);
    }

    #[test]
    fn view_groups_by_component() {
        let fsrs = vec![
            fsr("FSR-SG-001-DET-1").with_allocation("Brake ECU"),
            fsr("FSR-SG-001-CTL-1").with_allocation("Brake ECU"),
            fsr("FSR-SG-001-WRN-1").with_allocation("TBD"),
            fsr("FSR-SG-001-TIM-1"),
        ];
        let view = AllocationView::build(&fsrs);

        assert_eq!(view.component_count(), 1);
        assert_eq!(view.allocated_count(), 2);
        assert_eq!(view.fsrs_for("Brake ECU").len(), 2);
        assert_eq!(view.unallocated, vec!["FSR-SG-001-WRN-1", "FSR-SG-001-TIM-1"]);
        assert_eq!(view.by_type.get(&AllocationType::Hardware), Some(&2));
        assert_eq!(view.by_asil.get("C"), Some(&2));
    }
}
