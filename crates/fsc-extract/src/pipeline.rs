//! Extraction pipeline
//!
//! Strategies are tried in priority order against the same text. The first
//! one that produces at least one record wins; results from two strategies
//! are never merged. A strategy that recognises its shape but yields no
//! usable record does not stop the chain.

use crate::config::ExtractionConfig;
use crate::entity::{Extract, KnownParents};
use crate::strategies::{
    parse_records, ExtractionStrategy, LabeledBlockStrategy, RegexScatterStrategy, StrategyUsed,
    TableStrategy,
};

/// Records extracted from one text and the strategy that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<R> {
    /// Extracted records, in text order
    pub records: Vec<R>,
    /// Winning strategy, [`StrategyUsed::None`] when every strategy failed
    pub strategy: StrategyUsed,
}

impl<R> Extraction<R> {
    /// Nothing extracted
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            strategy: StrategyUsed::None,
        }
    }

    /// Whether no record was found
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into records and strategy
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<R>, StrategyUsed) {
        (self.records, self.strategy)
    }
}

/// Ordered chain of extraction strategies
pub struct ExtractionPipeline {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    config: ExtractionConfig,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("strategies", &self.strategy_order())
            .field("config", &self.config)
            .finish()
    }
}

impl ExtractionPipeline {
    /// Pipeline with the built-in chain: labeled block, table, regex scatter
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        let mut pipeline = Self::empty(config);
        pipeline.register(LabeledBlockStrategy);
        pipeline.register(TableStrategy);
        pipeline.register(RegexScatterStrategy);
        pipeline
    }

    /// Pipeline without strategies
    #[inline]
    #[must_use]
    pub fn empty(config: ExtractionConfig) -> Self {
        Self {
            strategies: Vec::new(),
            config,
        }
    }

    /// Add a strategy to the chain
    pub fn register<S: ExtractionStrategy>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
        // Stable sort keeps registration order among equal priorities
        self.strategies
            .sort_by_key(|s| std::cmp::Reverse(s.priority()));
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Strategies in the order they are tried
    #[must_use]
    pub fn strategy_order(&self) -> Vec<StrategyUsed> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Extract records of type `R` from `text`
    ///
    /// Never fails: an empty [`Extraction`] means nothing usable was found
    /// and the caller may ask for the text to be regenerated.
    #[must_use]
    pub fn extract<R: Extract>(&self, text: &str, parents: &KnownParents<'_>) -> Extraction<R> {
        let entity = R::descriptor().kind;

        for strategy in &self.strategies {
            let kind = strategy.kind();
            match parse_records::<R>(strategy.as_ref(), text, parents, &self.config) {
                Some(records) if !records.is_empty() => {
                    tracing::info!(
                        entity = %entity,
                        strategy = %kind,
                        records = records.len(),
                        "extraction succeeded"
                    );
                    return Extraction {
                        records,
                        strategy: kind,
                    };
                }
                Some(_) => {
                    tracing::debug!(entity = %entity, strategy = %kind, "shape recognised, no usable records");
                }
                None => {
                    tracing::debug!(entity = %entity, strategy = %kind, "shape not recognised");
                }
            }
        }

        tracing::warn!(
            entity = %entity,
            text_len = text.len(),
            "no strategy produced records"
        );
        Extraction::empty()
    }
}

/// Extract with the built-in chain
///
/// Shorthand for [`ExtractionPipeline::new`] followed by
/// [`ExtractionPipeline::extract`].
#[must_use]
pub fn extract<R: Extract>(
    text: &str,
    parents: &KnownParents<'_>,
    config: &ExtractionConfig,
) -> (Vec<R>, StrategyUsed) {
    ExtractionPipeline::new(config.clone())
        .extract(text, parents)
        .into_parts()
}
