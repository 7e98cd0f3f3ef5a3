//! FSR categories
//!
//! Every FSR ID embeds a three-letter code naming its category
//! (`FSR-SG-001-DET-1` is a fault detection requirement). Free text such as
//! `"Detection"` or `"safe state"` maps onto the same closed set.

use crate::error::ModelError;
use crate::ids;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a functional safety requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsrType {
    /// AVD
    FaultAvoidance,
    /// DET
    FaultDetection,
    /// CTL
    FaultControl,
    /// SST
    SafeStateTransition,
    /// TOL
    FaultTolerance,
    /// DEG
    Degradation,
    /// WRN
    WarningIndication,
    /// TIM
    Timing,
    /// ARB
    Arbitration,
    /// REA
    FaultReaction,
    /// IND
    FaultIndication,
    /// MOD
    OperatingMode,
    /// RED
    FunctionalRedundancy,
    /// SEQ
    SequenceControl,
    /// INT
    Interface,
    /// No recognisable category
    #[default]
    General,
}

/// Keyword to category, checked in order against lower-cased text
const CATEGORY_KEYWORDS: &[(&str, FsrType)] = &[
    ("detection", FsrType::FaultDetection),
    ("detect", FsrType::FaultDetection),
    ("control", FsrType::FaultControl),
    ("warning", FsrType::WarningIndication),
    ("warn", FsrType::WarningIndication),
    ("indication", FsrType::WarningIndication),
    ("avoidance", FsrType::FaultAvoidance),
    ("avoid", FsrType::FaultAvoidance),
    ("safe state", FsrType::SafeStateTransition),
    ("transition", FsrType::SafeStateTransition),
    ("tolerance", FsrType::FaultTolerance),
    ("tolerate", FsrType::FaultTolerance),
    ("degradation", FsrType::Degradation),
    ("timing", FsrType::Timing),
    ("arbitration", FsrType::Arbitration),
    ("reaction", FsrType::FaultReaction),
    ("redundancy", FsrType::FunctionalRedundancy),
    ("operating mode", FsrType::OperatingMode),
    ("sequence", FsrType::SequenceControl),
    ("interface", FsrType::Interface),
];

impl FsrType {
    /// Every category, `General` last
    pub const ALL: [FsrType; 16] = [
        FsrType::FaultAvoidance,
        FsrType::FaultDetection,
        FsrType::FaultControl,
        FsrType::SafeStateTransition,
        FsrType::FaultTolerance,
        FsrType::Degradation,
        FsrType::WarningIndication,
        FsrType::Timing,
        FsrType::Arbitration,
        FsrType::FaultReaction,
        FsrType::FaultIndication,
        FsrType::OperatingMode,
        FsrType::FunctionalRedundancy,
        FsrType::SequenceControl,
        FsrType::Interface,
        FsrType::General,
    ];

    /// Three-letter ID code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            FsrType::FaultAvoidance => "AVD",
            FsrType::FaultDetection => "DET",
            FsrType::FaultControl => "CTL",
            FsrType::SafeStateTransition => "SST",
            FsrType::FaultTolerance => "TOL",
            FsrType::Degradation => "DEG",
            FsrType::WarningIndication => "WRN",
            FsrType::Timing => "TIM",
            FsrType::Arbitration => "ARB",
            FsrType::FaultReaction => "REA",
            FsrType::FaultIndication => "IND",
            FsrType::OperatingMode => "MOD",
            FsrType::FunctionalRedundancy => "RED",
            FsrType::SequenceControl => "SEQ",
            FsrType::Interface => "INT",
            FsrType::General => "GEN",
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            FsrType::FaultAvoidance => "Fault Avoidance",
            FsrType::FaultDetection => "Fault Detection",
            FsrType::FaultControl => "Fault Control",
            FsrType::SafeStateTransition => "Safe State Transition",
            FsrType::FaultTolerance => "Fault Tolerance",
            FsrType::Degradation => "Degradation",
            FsrType::WarningIndication => "Warning/Indication",
            FsrType::Timing => "Timing",
            FsrType::Arbitration => "Arbitration",
            FsrType::FaultReaction => "Fault Reaction",
            FsrType::FaultIndication => "Fault Indication",
            FsrType::OperatingMode => "Operating Mode",
            FsrType::FunctionalRedundancy => "Functional Redundancy",
            FsrType::SequenceControl => "Sequence Control",
            FsrType::Interface => "Interface",
            FsrType::General => "General",
        }
    }

    /// Category from a three-letter code
    #[must_use]
    pub fn from_code(code: &str) -> Option<FsrType> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| *t != FsrType::General && t.code().eq_ignore_ascii_case(code))
    }

    /// Category embedded in an FSR ID, `General` when absent or unknown
    #[must_use]
    pub fn from_fsr_id(fsr_id: &str) -> FsrType {
        ids::fsr_type_code(fsr_id)
            .and_then(FsrType::from_code)
            .unwrap_or_default()
    }

    /// Lenient mapping of model-written category text
    ///
    /// Tries a display name, then a bare code, then the keyword table.
    #[must_use]
    pub fn from_category(text: &str) -> Option<FsrType> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(t) = Self::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(trimmed))
        {
            return Some(t);
        }
        if let Some(t) = Self::from_code(trimmed) {
            return Some(t);
        }

        let lower = trimmed.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, t)| *t)
    }

    /// Whether requirements of this category are expected to carry numbers
    #[inline]
    #[must_use]
    pub fn expects_quantity(&self) -> bool {
        matches!(self, FsrType::FaultDetection | FsrType::Timing)
    }
}

impl fmt::Display for FsrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FsrType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_category(s).ok_or_else(|| ModelError::UnknownFsrType(s.to_string()))
    }
}
