//! Regex-scatter strategy
//!
//! Last resort for prose. Every ID mention opens a context window that runs
//! to the next mention; the entity's scatter rules are applied inside the
//! window and the first match per field wins.

use super::{ExtractionStrategy, StrategyUsed};
use crate::config::ExtractionConfig;
use crate::descriptor::EntityDescriptor;
use crate::fields::{Field, FieldSet};
use crate::markup::inline_text;

/// Minimum length of a prose line taken from the rest of an ID line
const MIN_INLINE_PROSE_CHARS: usize = 10;
/// Minimum length of a prose line found below the ID line
const MIN_FOLLOWING_PROSE_CHARS: usize = 20;
/// Lines below the ID line searched for prose
const PROSE_LOOKAHEAD_LINES: usize = 10;
/// A colon this early marks a `Label: value` line, not prose
const LABEL_COLON_WINDOW: usize = 20;

/// Proximity matcher around ID mentions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScatterStrategy;

impl ExtractionStrategy for RegexScatterStrategy {
    fn kind(&self) -> StrategyUsed {
        StrategyUsed::RegexScatter
    }

    fn try_parse(
        &self,
        text: &str,
        entity: &EntityDescriptor,
        _config: &ExtractionConfig,
    ) -> Option<Vec<FieldSet>> {
        let mentions = id_mentions(text, entity);
        if mentions.is_empty() {
            return None;
        }

        // (id, fields) in order of first mention
        let mut records: Vec<(String, FieldSet)> = Vec::new();
        for (idx, &(start, end)) in mentions.iter().enumerate() {
            let window_end = mentions.get(idx + 1).map_or(text.len(), |next| next.0);
            let id = &text[start..end];
            let window = &text[end..window_end];
            let fields = scan_window(id, window, entity);

            match records.iter_mut().find(|(known, _)| known == id) {
                Some((_, existing)) => existing.merge_missing(fields),
                None => records.push((id.to_string(), fields)),
            }
        }

        let kept: Vec<FieldSet> = records
            .into_iter()
            .filter_map(|(id, fields)| {
                if fields.has_content_besides(entity.identity) {
                    Some(fields)
                } else {
                    tracing::trace!(entity = %entity.kind, "no content recovered near {}", id);
                    None
                }
            })
            .collect();

        tracing::debug!(
            entity = %entity.kind,
            "scatter: {} mentions, {} records kept",
            mentions.len(),
            kept.len()
        );
        Some(kept)
    }

    fn priority(&self) -> i32 {
        10
    }
}

/// Byte spans of standalone ID mentions
///
/// A match glued to a preceding `-` or alphanumeric is part of a longer ID
/// (`SG-001` inside `FSR-SG-001-DET-1`) and is skipped.
fn id_mentions(text: &str, entity: &EntityDescriptor) -> Vec<(usize, usize)> {
    entity
        .id_pattern
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            !matches!(before, Some(c) if c == '-' || c.is_alphanumeric())
        })
        .map(|m| (m.start(), m.end()))
        .collect()
}

fn scan_window(id: &str, window: &str, entity: &EntityDescriptor) -> FieldSet {
    let mut fields = FieldSet::new();
    fields.insert_first(entity.identity, id);

    for rule in &entity.scatter_rules {
        if fields.contains(rule.field) {
            continue;
        }
        if let Some(value) = rule.find(window) {
            fields.insert_first(rule.field, value);
        }
    }

    if let Some(prose_field) = entity.prose_field {
        if !fields.contains(prose_field) {
            if let Some(prose) = prose_line(window, entity) {
                fields.insert_first(prose_field, prose);
            }
        }
    }
    fields
}

fn looks_like_label(line: &str) -> bool {
    line.chars().take(LABEL_COLON_WINDOW).any(|c| c == ':')
}

/// Free text describing the record: the rest of the ID line, else the first
/// substantial line below it
fn prose_line(window: &str, entity: &EntityDescriptor) -> Option<String> {
    let mut lines = window.lines();

    let rest = lines
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| c.is_whitespace() || ":*-|).,;".contains(c));
    let rest = inline_text(rest.trim_end_matches(|c: char| c.is_whitespace() || c == '|'));
    if rest.chars().count() >= MIN_INLINE_PROSE_CHARS && !looks_like_label(&rest) {
        return Some(rest);
    }

    lines.take(PROSE_LOOKAHEAD_LINES).find_map(|line| {
        let plain = inline_text(line.trim().trim_start_matches(['-', '*', '>']));
        let starts_with_id = entity
            .id_pattern
            .find(&plain)
            .is_some_and(|m| m.start() == 0);
        (plain.chars().count() > MIN_FOLLOWING_PROSE_CHARS
            && !starts_with_id
            && !looks_like_label(&plain))
        .then_some(plain)
    })
}
