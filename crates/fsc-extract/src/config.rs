//! Extraction settings

use crate::error::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};

/// Settings shared by all strategies and record builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines scanned from the top of the text for a table header
    pub table_header_scan_lines: usize,
    /// FSRs take missing ASIL, timing and safe state from a resolved parent goal
    pub inherit_parent_fields: bool,
    /// Operating modes for FSRs whose text names none
    pub default_operating_modes: Option<String>,
    /// Longest text before a colon that still counts as a field label
    pub max_label_chars: usize,
}

impl ExtractionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from TOML; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> ExtractResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// With header scan depth
    #[inline]
    #[must_use]
    pub fn with_table_header_scan_lines(mut self, lines: usize) -> Self {
        self.table_header_scan_lines = lines;
        self
    }

    /// With parent-field inheritance on or off
    #[inline]
    #[must_use]
    pub fn with_inherit_parent_fields(mut self, inherit: bool) -> Self {
        self.inherit_parent_fields = inherit;
        self
    }

    /// With default operating modes
    #[inline]
    #[must_use]
    pub fn with_default_operating_modes(mut self, modes: impl Into<String>) -> Self {
        self.default_operating_modes = Some(modes.into());
        self
    }

    fn check(&self) -> ExtractResult<()> {
        if self.table_header_scan_lines == 0 {
            return Err(ExtractError::invalid_config(
                "table_header_scan_lines",
                "must be at least 1",
            ));
        }
        if self.max_label_chars < 2 {
            return Err(ExtractError::invalid_config(
                "max_label_chars",
                format!("{} is too short for any field label", self.max_label_chars),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            table_header_scan_lines: 40,
            inherit_parent_fields: true,
            default_operating_modes: None,
            max_label_chars: 48,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ExtractionConfig::from_toml_str("inherit_parent_fields = false").unwrap();
        assert!(!config.inherit_parent_fields);
        assert_eq!(config.table_header_scan_lines, 40);
    }

    #[test]
    fn operating_modes_from_toml() {
        let config =
            ExtractionConfig::from_toml_str("default_operating_modes = \"Normal, Degraded\"")
                .unwrap();
        assert_eq!(config.default_operating_modes.as_deref(), Some("Normal, Degraded"));
    }

    #[test]
    fn zero_scan_lines_rejected() {
        let err = ExtractionConfig::from_toml_str("table_header_scan_lines = 0").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig { field: "table_header_scan_lines", .. }));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            ExtractionConfig::from_toml_str("table_header_scan_lines = \"many\""),
            Err(ExtractError::ConfigParse(_))
        ));
    }
}
