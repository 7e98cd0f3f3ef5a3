//! FSC Model - records of an ISO 26262 functional safety concept
//!
//! Plain value types for the artifacts a functional safety concept is built
//! from:
//! - Safety goals with ASIL and HARA context
//! - Safety strategies covering the ten aspects of ISO 26262-3, 7.4.2.3
//! - Functional safety requirements (FSRs) and their allocation
//! - Validation criteria for goals and FSRs
//!
//! Records carry no behaviour beyond small derived predicates. Extraction
//! lives in `fsc-extract`, checking in `fsc-validate`.
//!
//! # Example
//!
//! ```rust
//! use fsc_model::{Fsr, SafetyGoal};
//!
//! let goal = SafetyGoal::new("SG-001", "Avoid unintended acceleration", "ASIL C");
//! assert!(goal.is_safety_relevant());
//!
//! let fsr = Fsr::new("FSR-SG-001-DET-1", "SG-001", "Detect pedal sensor drift > 5%", "C")
//!     .with_allocation("Pedal sensor ECU");
//! assert!(fsr.is_allocated());
//! ```

pub mod allocation;
pub mod asil;
pub mod error;
pub mod fsr_type;
pub mod ids;
pub mod placeholder;
pub mod records;
pub mod strategy;
pub mod work_product;

pub use allocation::{apply_allocations, AllocationRecord, AllocationType, AllocationView};
pub use asil::{normalize_asil_text, Asil};
pub use error::{ModelError, ModelResult};
pub use fsr_type::FsrType;
pub use placeholder::{has_text, is_placeholder, PLACEHOLDER_SENTINELS};
pub use records::{Fsr, SafetyGoal, SafetyStrategy, ValidationCriterion};
pub use strategy::StrategyKind;
pub use work_product::{WorkProduct, WorkProductStats};

/// Fewest FSRs a safety-relevant goal may have
pub const MIN_FSRS_PER_GOAL: usize = 1;

/// Recommended FSR band per safety-relevant goal, inclusive
pub const RECOMMENDED_FSRS_PER_GOAL: (usize, usize) = (3, 7);

/// Operating modes assumed when the text names none
pub const DEFAULT_OPERATING_MODES: &str =
    "Normal operation, Degraded operation, Emergency operation, Off";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
