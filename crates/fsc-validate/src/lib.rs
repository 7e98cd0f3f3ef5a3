//! FSC Validate - ISO 26262-3 rule checks for functional safety concepts
//!
//! Checks run in three layers:
//! - **Entity** checks look at one record (or one list of a record type)
//! - **Cross-entity** checks follow references between goals, strategies,
//!   FSRs and validation criteria
//! - The **aggregate** [`Validator`] runs both in a fixed stage sequence and
//!   derives the pass/fail verdict
//!
//! Rule violations are [`Issue`] values, never errors. A work product passes
//! when no issue has [`Severity::Error`].
//!
//! # Example
//!
//! ```rust
//! use fsc_model::{SafetyGoal, WorkProduct};
//! use fsc_validate::{validate, ValidationConfig};
//!
//! let mut work = WorkProduct::new("Battery management");
//! work.safety_goals.push(SafetyGoal::new("SG-001", "Avoid thermal runaway of the cells", "C"));
//!
//! let result = validate(&work, &ValidationConfig::default());
//! assert!(!result.passed);
//! assert!(result.issues_for("SG-001").any(|i| i.rule_ref() == "coverage"));
//! println!("{}", result.format_report());
//! ```

pub mod aggregate;
pub mod config;
pub mod cross;
pub mod entity;
pub mod error;
pub mod issue;
pub mod result;

pub use aggregate::{validate, Stage, Validator};
pub use config::ValidationConfig;
pub use entity::{
    validate_criteria, validate_criterion, validate_fsr, validate_fsrs, validate_goal,
    validate_goals, validate_strategies, validate_strategy,
};
pub use error::{ValidateError, ValidateResult};
pub use issue::{Category, Issue, Rule, Severity};
pub use result::ValidationResult;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
