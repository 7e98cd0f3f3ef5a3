//! Labeled-block strategy
//!
//! Text is a sequence of blocks separated by delimiter lines (`---`) or
//! entity block headers (`## Allocation for FSR: ...`, `**VC-...**`).
//! Inside a block, `Label: value` lines are matched against the entity's
//! alias table; lines that are not labels continue the previous field.

use super::{ExtractionStrategy, StrategyUsed};
use crate::config::ExtractionConfig;
use crate::descriptor::EntityDescriptor;
use crate::fields::{Field, FieldSet};
use crate::markup::{heading_level, inline_text, is_delimiter, is_fence, is_table_row};

/// Parser for `Field: value` blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledBlockStrategy;

impl ExtractionStrategy for LabeledBlockStrategy {
    fn kind(&self) -> StrategyUsed {
        StrategyUsed::LabeledBlock
    }

    fn try_parse(
        &self,
        text: &str,
        entity: &EntityDescriptor,
        config: &ExtractionConfig,
    ) -> Option<Vec<FieldSet>> {
        let mut parser = BlockParser::new(entity, config.max_label_chars);
        for line in text.lines() {
            parser.feed(line);
        }
        parser.finish()
    }

    fn priority(&self) -> i32 {
        30
    }
}

/// Split `"Label: value"`; the label must be short and non-empty
fn split_label(plain: &str, max_label_chars: usize) -> Option<(&str, &str)> {
    let (label, value) = plain.split_once(':')?;
    let label = label.trim();
    if label.is_empty() || label.chars().count() > max_label_chars {
        return None;
    }
    Some((label, value.trim()))
}

struct BlockParser<'d> {
    entity: &'d EntityDescriptor,
    max_label_chars: usize,
    recognized: bool,
    blocks: Vec<FieldSet>,
    current: FieldSet,
    // Field receiving continuation lines; `None` once a repeated label was ignored
    active: Option<Field>,
}

impl<'d> BlockParser<'d> {
    fn new(entity: &'d EntityDescriptor, max_label_chars: usize) -> Self {
        Self {
            entity,
            max_label_chars,
            recognized: false,
            blocks: Vec::new(),
            current: FieldSet::new(),
            active: None,
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || is_fence(line) {
            return;
        }
        if is_table_row(line) {
            // `Interface: CAN | LIN` is a label whose value holds pipes
            if !line.starts_with('|') {
                if let Some((field, value)) = self.label(&inline_text(line)) {
                    self.take_label(field, &value);
                    return;
                }
            }
            self.active = None;
            return;
        }
        if is_delimiter(line) {
            self.close_block();
            return;
        }
        if let Some(identity) = self.entity.match_header(line) {
            self.recognized = true;
            self.close_block();
            if let Some(id) = identity {
                self.current.insert_first(self.entity.identity, id);
            }
            return;
        }

        let plain = inline_text(line);
        let is_heading = heading_level(line).is_some();

        if is_heading {
            if let Some(field) = self.entity.aliases.lookup(&plain) {
                self.take_label(field, "");
                return;
            }
        }

        if let Some((field, value)) = self.label(&plain) {
            self.take_label(field, &value);
            return;
        }

        if is_heading {
            self.active = None;
        } else if let Some(field) = self.active {
            self.current.append_line(field, line);
        }
    }

    /// Known field and value of a `Label: value` line
    fn label(&self, plain: &str) -> Option<(Field, String)> {
        let (label, value) = split_label(plain, self.max_label_chars)?;
        let field = self.entity.aliases.lookup(label)?;
        Some((field, value.to_string()))
    }

    fn take_label(&mut self, field: Field, value: &str) {
        self.recognized = true;
        if field == self.entity.identity && self.current.contains(field) {
            self.close_block();
        }
        let taken = self.current.insert_first(field, value);
        self.active = taken.then_some(field);
    }

    fn close_block(&mut self) {
        let block = std::mem::take(&mut self.current);
        self.active = None;
        if block.has(self.entity.identity) {
            self.blocks.push(block);
        } else if !block.is_empty() {
            tracing::trace!(
                entity = %self.entity.kind,
                "dropping labeled block without {}",
                self.entity.identity
            );
        }
    }

    fn finish(mut self) -> Option<Vec<FieldSet>> {
        self.close_block();
        self.recognized.then_some(self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Extract;
    use fsc_model::{Fsr, SafetyStrategy, StrategyKind, ValidationCriterion};

    fn parse<R: Extract>(text: &str) -> Option<Vec<FieldSet>> {
        LabeledBlockStrategy.try_parse(text, R::descriptor(), &ExtractionConfig::default())
    }

    #[test]
    fn single_block_with_delimiter() {
        let text = "FSR-ID: FSR-SG-001-DET-1\nDescription: Detect over-voltage >5%\nASIL: C\nSafety Goal: SG-001\n---";
        let blocks = parse::<Fsr>(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].get(Field::Id), Some("FSR-SG-001-DET-1"));
        assert_eq!(blocks[0].get(Field::Description), Some("Detect over-voltage >5%"));
        assert_eq!(blocks[0].get(Field::Asil), Some("C"));
        assert_eq!(blocks[0].get(Field::SafetyGoalId), Some("SG-001"));
    }

    #[test]
    fn unterminated_trailing_block_is_emitted() {
        let text = "FSR-ID: FSR-SG-001-DET-1\nASIL: C\n---\nFSR-ID: FSR-SG-001-DET-2\nASIL: B";
        let blocks = parse::<Fsr>(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].get(Field::Asil), Some("B"));
    }

    #[test]
    fn repeated_identity_label_starts_new_block() {
        let text = "FSR ID: FSR-SG-001-DET-1\nASIL: C\nFSR ID: FSR-SG-001-DET-2\nASIL: D";
        let blocks = parse::<Fsr>(text).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].get(Field::Asil), Some("D"));
    }

    #[test]
    fn repeated_label_keeps_first_value_and_its_continuation() {
        let text = "FSR-ID: FSR-SG-001-DET-1\nDescription: first\ncontinued\nDescription: second\nignored tail\n---";
        let blocks = parse::<Fsr>(text).unwrap();
        assert_eq!(blocks[0].get(Field::Description), Some("first\ncontinued"));
    }

    #[test]
    fn blocks_without_identity_are_dropped() {
        let text = "Description: orphan text\nASIL: C\n---";
        assert_eq!(parse::<Fsr>(text), Some(Vec::new()));
    }

    #[test]
    fn unlabeled_text_is_not_recognised() {
        assert_eq!(parse::<Fsr>("Just a paragraph of prose.\nAnother line."), None);
        assert_eq!(parse::<Fsr>("| FSR ID | ASIL |\n|---|---|\n| FSR-SG-001-DET-1 | C |"), None);
    }

    #[test]
    fn label_values_may_contain_pipes() {
        let text = "FSR-ID: FSR-SG-001-DET-1\nAllocated To: Sensor ECU | Main MCU | Gateway\n\
                    Interface: CAN | LIN | SPI\n| not | a | label |\nASIL: C\n---";
        let blocks = parse::<Fsr>(text).unwrap();
        assert_eq!(
            blocks[0].get(Field::AllocatedTo),
            Some("Sensor ECU | Main MCU | Gateway")
        );
        assert_eq!(blocks[0].get(Field::Interface), Some("CAN | LIN | SPI"));
        assert_eq!(blocks[0].get(Field::Asil), Some("C"));
    }

    #[test]
    fn markdown_labels_and_bullets() {
        let text = "**VC-SG-001-GOAL-1**\n**Criterion:** Vehicle decelerates safely\n**Validation Method:** Vehicle test\nTest Conditions:\n- Dry asphalt\n- 100 km/h\nSuccess Criteria:\n- Stops within 40 m";
        let blocks = parse::<ValidationCriterion>(text).unwrap();
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.get(Field::Id), Some("VC-SG-001-GOAL-1"));
        assert_eq!(block.get(Field::Criterion), Some("Vehicle decelerates safely"));
        assert_eq!(block.get(Field::ValidationMethod), Some("Vehicle test"));
        assert_eq!(block.get(Field::TestConditions), Some("- Dry asphalt\n- 100 km/h"));
        assert_eq!(block.get(Field::SuccessCriteria), Some("- Stops within 40 m"));
    }

    #[test]
    fn strategy_headings_collect_narratives() {
        let text = "## Safety Strategy for SG-001\n### a) Fault Avoidance\nUse qualified components.\nApply design reviews.\n### Notes\nnot part of any aspect\n### i) Timing Requirements\nReach safe state within 100 ms.";
        let blocks = parse::<SafetyStrategy>(text).unwrap();
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.get(Field::SafetyGoalId), Some("SG-001"));
        assert_eq!(
            block.get(Field::Strategy(StrategyKind::FaultAvoidance)),
            Some("Use qualified components.\nApply design reviews.")
        );
        assert_eq!(
            block.get(Field::Strategy(StrategyKind::Timing)),
            Some("Reach safe state within 100 ms.")
        );
    }
}
