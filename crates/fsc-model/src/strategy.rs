//! Safety strategy kinds
//!
//! ISO 26262-3:2018, 7.4.2.3 lists the aspects a functional safety concept
//! must address for each safety goal. Each aspect is one `StrategyKind`.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the ten required strategy aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 7.4.2.3.a
    FaultAvoidance,
    /// 7.4.2.3.b
    FaultDetection,
    /// 7.4.2.3.b
    FaultControl,
    /// 7.4.2.3.c
    SafeStateTransition,
    /// 7.4.2.3.d
    FaultTolerance,
    /// 7.4.2.3.e
    Degradation,
    /// 7.4.2.3.f
    WarningExposure,
    /// 7.4.2.3.g
    WarningControllability,
    /// 7.4.2.3.h
    Timing,
    /// 7.4.2.3.i
    Arbitration,
}

impl StrategyKind {
    /// All kinds in clause order
    pub const ALL: [StrategyKind; 10] = [
        StrategyKind::FaultAvoidance,
        StrategyKind::FaultDetection,
        StrategyKind::FaultControl,
        StrategyKind::SafeStateTransition,
        StrategyKind::FaultTolerance,
        StrategyKind::Degradation,
        StrategyKind::WarningExposure,
        StrategyKind::WarningControllability,
        StrategyKind::Timing,
        StrategyKind::Arbitration,
    ];

    /// Stable snake_case tag
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::FaultAvoidance => "fault_avoidance",
            StrategyKind::FaultDetection => "fault_detection",
            StrategyKind::FaultControl => "fault_control",
            StrategyKind::SafeStateTransition => "safe_state_transition",
            StrategyKind::FaultTolerance => "fault_tolerance",
            StrategyKind::Degradation => "degradation",
            StrategyKind::WarningExposure => "warning_exposure",
            StrategyKind::WarningControllability => "warning_controllability",
            StrategyKind::Timing => "timing",
            StrategyKind::Arbitration => "arbitration",
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::FaultAvoidance => "Fault Avoidance",
            StrategyKind::FaultDetection => "Fault Detection",
            StrategyKind::FaultControl => "Fault Control",
            StrategyKind::SafeStateTransition => "Safe State Transition",
            StrategyKind::FaultTolerance => "Fault Tolerance",
            StrategyKind::Degradation => "Degradation",
            StrategyKind::WarningExposure => "Warning - Exposure Reduction",
            StrategyKind::WarningControllability => "Warning - Controllability",
            StrategyKind::Timing => "Timing Requirements",
            StrategyKind::Arbitration => "Arbitration",
        }
    }

    /// ISO 26262-3:2018 clause
    #[must_use]
    pub fn iso_clause(&self) -> &'static str {
        match self {
            StrategyKind::FaultAvoidance => "7.4.2.3.a",
            StrategyKind::FaultDetection | StrategyKind::FaultControl => "7.4.2.3.b",
            StrategyKind::SafeStateTransition => "7.4.2.3.c",
            StrategyKind::FaultTolerance => "7.4.2.3.d",
            StrategyKind::Degradation => "7.4.2.3.e",
            StrategyKind::WarningExposure => "7.4.2.3.f",
            StrategyKind::WarningControllability => "7.4.2.3.g",
            StrategyKind::Timing => "7.4.2.3.h",
            StrategyKind::Arbitration => "7.4.2.3.i",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.iso_clause())
    }
}

impl FromStr for StrategyKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStrategyKind(s.to_string()))
    }
}
