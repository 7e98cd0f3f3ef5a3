//! ASIL classification
//!
//! Automotive Safety Integrity Levels per ISO 26262-3. Records keep the
//! ASIL as normalized text so that an unrecognised value written by the
//! model survives extraction and is reported by the validators instead of
//! being silently coerced.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Automotive Safety Integrity Level
///
/// Ordered by stringency: `QM < A < B < C < D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Asil {
    /// Quality management, no safety requirement
    #[serde(rename = "QM")]
    Qm,
    /// ASIL A
    A,
    /// ASIL B
    B,
    /// ASIL C
    C,
    /// ASIL D
    D,
}

impl Asil {
    /// All levels in ascending order
    pub const ALL: [Asil; 5] = [Asil::Qm, Asil::A, Asil::B, Asil::C, Asil::D];

    /// Canonical short label ("QM", "A", ...)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Asil::Qm => "QM",
            Asil::A => "A",
            Asil::B => "B",
            Asil::C => "C",
            Asil::D => "D",
        }
    }

    /// Anything above QM carries safety requirements
    #[inline]
    #[must_use]
    pub fn is_safety_relevant(&self) -> bool {
        !matches!(self, Asil::Qm)
    }

    /// Lenient parse of model-written ASIL text
    ///
    /// Accepts `"C"`, `"asil c"`, `"ASIL-C"`, `"ASIL C (decomposed)"` and
    /// treats `"none"` as QM. Returns `None` when no level can be read.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Option<Asil> {
        let upper = text.trim().to_uppercase();
        let rest = upper.strip_prefix("ASIL").unwrap_or(&upper);
        let token: String = rest
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | ':'))
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();

        match token.as_str() {
            "QM" | "NONE" => Some(Asil::Qm),
            "A" => Some(Asil::A),
            "B" => Some(Asil::B),
            "C" => Some(Asil::C),
            "D" => Some(Asil::D),
            _ => None,
        }
    }
}

impl fmt::Display for Asil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Asil {
    type Err = ModelError;

    /// Strict parse: only the canonical labels are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QM" => Ok(Asil::Qm),
            "A" => Ok(Asil::A),
            "B" => Ok(Asil::B),
            "C" => Ok(Asil::C),
            "D" => Ok(Asil::D),
            other => Err(ModelError::InvalidAsil(other.to_string())),
        }
    }
}

/// Normalize ASIL text for storage on a record
///
/// Recognised values collapse to their canonical label; anything else is
/// kept trimmed and upper-cased so validators can report it verbatim.
#[must_use]
pub fn normalize_asil_text(text: &str) -> String {
    match Asil::parse_lenient(text) {
        Some(level) => level.as_str().to_string(),
        None => text.trim().to_uppercase(),
    }
}
