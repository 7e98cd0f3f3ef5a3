//! FSC Extract - typed records from generated text
//!
//! Generated text is unreliable: the same content arrives as labeled
//! blocks, markdown tables or loose prose. Extraction degrades through a
//! fixed chain of strategies until one of them yields records.
//!
//! # Architecture
//!
//! ```text
//! text → LabeledBlock → Table → RegexScatter → (Vec<R>, StrategyUsed)
//!            ↑ first strategy with at least one record wins
//! ```
//!
//! Every strategy is generic over an [`EntityDescriptor`]: the identity
//! field and ID pattern, an alias table for labels and table headers, block
//! header patterns and scatter rules. One descriptor exists per record type
//! through the [`Extract`] trait.
//!
//! # Example
//!
//! ```rust
//! use fsc_extract::{extract, ExtractionConfig, KnownParents, StrategyUsed};
//! use fsc_model::Fsr;
//!
//! let text = "FSR-ID: FSR-SG-001-DET-1\nDescription: Detect over-voltage >5%\nASIL: C\n---";
//! let (fsrs, used): (Vec<Fsr>, _) =
//!     extract(text, &KnownParents::none(), &ExtractionConfig::default());
//!
//! assert_eq!(used, StrategyUsed::LabeledBlock);
//! assert_eq!(fsrs[0].safety_goal_id, "SG-001");
//! ```

pub mod aliases;
pub mod config;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod fields;
pub mod markup;
pub mod pipeline;
pub mod strategies;

pub use config::ExtractionConfig;
pub use descriptor::{EntityDescriptor, EntityKind, ScatterRule};
pub use entity::{Extract, KnownParents};
pub use error::{ExtractError, ExtractResult};
pub use fields::{Field, FieldSet};
pub use pipeline::{extract, Extraction, ExtractionPipeline};
pub use strategies::{
    ExtractionStrategy, LabeledBlockStrategy, RegexScatterStrategy, StrategyUsed, TableStrategy,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
