//! Error types for the record model
//!
//! Records themselves never fail to construct; these errors cover the
//! strict conversions (`FromStr`) that callers opt into.

/// Errors raised by strict parsing of model enums
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Text is not one of QM, A, B, C, D
    #[error("invalid ASIL level: '{0}' (must be QM, A, B, C, or D)")]
    InvalidAsil(String),

    /// Text names no known strategy kind
    #[error("unknown strategy kind: '{0}'")]
    UnknownStrategyKind(String),

    /// Text names no known FSR type or type code
    #[error("unknown FSR type: '{0}'")]
    UnknownFsrType(String),

    /// Text names no known allocation type
    #[error("unknown allocation type: '{0}'")]
    UnknownAllocationType(String),
}

/// Result type alias for model conversions
pub type ModelResult<T> = Result<T, ModelError>;
