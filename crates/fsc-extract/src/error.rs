//! Error types for extraction
//!
//! Extraction itself never fails: a strategy that does not recognise its
//! input returns `None` and the pipeline moves on. These errors cover
//! loading an [`ExtractionConfig`](crate::ExtractionConfig).

/// Errors raised while loading extraction settings
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Configuration text is not valid TOML for the config schema
    #[error("invalid extraction config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but a value is out of range
    #[error("invalid extraction config value for '{field}': {message}")]
    InvalidConfig {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ExtractError {
    /// Create an out-of-range config error
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for extraction setup
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display() {
        let err = ExtractError::invalid_config("table_header_scan_lines", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid extraction config value for 'table_header_scan_lines': must be at least 1"
        );
    }
}
