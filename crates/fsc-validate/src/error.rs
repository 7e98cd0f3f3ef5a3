//! Error types for validation
//!
//! Rule violations are data ([`Issue`](crate::Issue) values), never errors.
//! These cover configuration loading, report serialization and misuse of
//! the staged [`Validator`](crate::Validator).

use crate::aggregate::Stage;

/// Errors raised around a validation run
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Configuration text is not valid TOML for the config schema
    #[error("invalid validation config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but a value is out of range
    #[error("invalid validation config value for '{field}': {message}")]
    InvalidConfig {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Stage transition outside the fixed sequence
    #[error("illegal stage transition: {from} -> {to}")]
    IllegalTransition {
        /// Current stage
        from: Stage,
        /// Requested stage
        to: Stage,
    },

    /// Report could not be rendered as JSON
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ValidateError {
    /// Create an out-of-range config error
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Create an illegal transition error
    #[must_use]
    pub fn illegal_transition(from: Stage, to: Stage) -> Self {
        Self::IllegalTransition { from, to }
    }
}

/// Result type alias for validation setup and rendering
pub type ValidateResult<T> = Result<T, ValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_display() {
        let err = ValidateError::illegal_transition(Stage::Done, Stage::GoalsValidated);
        assert_eq!(err.to_string(), "illegal stage transition: done -> goals_validated");
    }
}
