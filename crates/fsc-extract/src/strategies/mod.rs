//! Extraction strategies
//!
//! Independent parsers, each turning one blob of generated text into field
//! sets for one entity kind:
//! - Labeled blocks (`Field: value` lines between delimiters)
//! - Pipe tables with a recognisable header row
//! - Regex scatter around ID mentions, as a last resort
//!
//! A strategy returns `None` when it does not recognise its shape at all
//! and `Some(vec![])` when it recognised the shape but found nothing usable.

use crate::config::ExtractionConfig;
use crate::descriptor::EntityDescriptor;
use crate::entity::{Extract, KnownParents};
use crate::fields::FieldSet;
use serde::{Deserialize, Serialize};
use std::fmt;

mod labeled;
mod scatter;
mod table;

pub use labeled::LabeledBlockStrategy;
pub use scatter::RegexScatterStrategy;
pub use table::TableStrategy;

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyUsed {
    /// Labeled-block parser
    LabeledBlock,
    /// Table parser
    Table,
    /// Regex-scatter parser
    RegexScatter,
    /// Every strategy failed
    None,
}

impl StrategyUsed {
    /// Short name for logs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyUsed::LabeledBlock => "labeled_block",
            StrategyUsed::Table => "table",
            StrategyUsed::RegexScatter => "regex_scatter",
            StrategyUsed::None => "none",
        }
    }
}

impl fmt::Display for StrategyUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parser in the fallback chain
///
/// Implement this trait to add another text shape to the chain.
pub trait ExtractionStrategy: Send + Sync + 'static {
    /// Identifies the strategy in results and logs
    fn kind(&self) -> StrategyUsed;

    /// Field sets for every record found, or `None` if the shape is absent
    fn try_parse(
        &self,
        text: &str,
        entity: &EntityDescriptor,
        config: &ExtractionConfig,
    ) -> Option<Vec<FieldSet>>;

    /// Chain priority (higher = tried first)
    fn priority(&self) -> i32 {
        0
    }
}

/// Run one strategy and build typed records from its field sets
///
/// Field sets that do not identify a record are dropped.
pub fn parse_records<R: Extract>(
    strategy: &dyn ExtractionStrategy,
    text: &str,
    parents: &KnownParents<'_>,
    config: &ExtractionConfig,
) -> Option<Vec<R>> {
    let sets = strategy.try_parse(text, R::descriptor(), config)?;
    Some(
        sets.into_iter()
            .filter_map(|fields| R::from_fields(fields, parents, config))
            .collect(),
    )
}
