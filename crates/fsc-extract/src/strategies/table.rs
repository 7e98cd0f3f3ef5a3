//! Markdown table strategy

use super::{ExtractionStrategy, StrategyUsed};
use crate::aliases::compact_label;
use crate::config::ExtractionConfig;
use crate::descriptor::EntityDescriptor;
use crate::fields::{Field, FieldSet};
use crate::markup::{inline_text, is_separator_row, is_table_row, split_cells};

/// Parser for pipe tables whose header names the identity column
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStrategy;

impl ExtractionStrategy for TableStrategy {
    fn kind(&self) -> StrategyUsed {
        StrategyUsed::Table
    }

    fn try_parse(
        &self,
        text: &str,
        entity: &EntityDescriptor,
        config: &ExtractionConfig,
    ) -> Option<Vec<FieldSet>> {
        let lines: Vec<&str> = text.lines().collect();
        let (header_idx, header) = find_header(&lines, entity, config.table_header_scan_lines)?;

        tracing::debug!(
            entity = %entity.kind,
            "table header at line {}: {} columns, identity in column {}",
            header_idx + 1,
            header.columns.len(),
            header.identity_col
        );

        let mut records: Vec<FieldSet> = Vec::new();
        let mut current = Some(header);
        // Rows of earlier tables; a later table with the same ID adds columns to them
        let mut table_start = 0;
        let mut between_tables = false;

        for line in &lines[header_idx + 1..] {
            if !is_table_row(line) {
                between_tables = true;
                continue;
            }
            let cells = split_cells(line);
            if between_tables {
                between_tables = false;
                table_start = records.len();
                current = TableHeader::from_cells(&cells, entity);
                match &current {
                    Some(header) => tracing::debug!(
                        entity = %entity.kind,
                        "further table header: {} columns, identity in column {}",
                        header.columns.len(),
                        header.identity_col
                    ),
                    None => tracing::trace!(
                        entity = %entity.kind,
                        "skipping table without an identity column"
                    ),
                }
                continue;
            }
            if is_separator_row(&cells) {
                continue;
            }
            let Some(header) = &current else {
                continue;
            };
            if let Some(fields) = header.map_row(&cells, entity) {
                add_row(&mut records, table_start, fields, entity.identity);
            }
        }
        Some(records)
    }

    fn priority(&self) -> i32 {
        20
    }
}

/// Column layout of a recognised header row
#[derive(Debug)]
struct TableHeader {
    columns: Vec<Option<Field>>,
    identity_col: usize,
}

impl TableHeader {
    /// Header layout if one of `cells` names the identity column
    fn from_cells(cells: &[String], entity: &EntityDescriptor) -> Option<Self> {
        let mut columns: Vec<Option<Field>> =
            cells.iter().map(|c| entity.aliases.lookup(c)).collect();

        let identity_col = columns
            .iter()
            .position(|f| *f == Some(entity.identity))
            .or_else(|| {
                cells.iter().position(|c| {
                    let compact = compact_label(c);
                    entity.header_hints.iter().any(|hint| compact.contains(hint))
                })
            })?;

        columns[identity_col] = Some(entity.identity);
        Some(Self {
            columns,
            identity_col,
        })
    }

    fn map_row(&self, cells: &[String], entity: &EntityDescriptor) -> Option<FieldSet> {
        let identity_cell = cells.get(self.identity_col)?;
        let Some(id) = entity.find_id(identity_cell) else {
            tracing::trace!(
                entity = %entity.kind,
                "dropping table row: '{}' is not a valid identity",
                identity_cell
            );
            return None;
        };

        let mut fields = FieldSet::new();
        fields.insert_first(entity.identity, id);
        for (idx, cell) in cells.iter().enumerate() {
            if idx == self.identity_col {
                continue;
            }
            if let Some(Some(field)) = self.columns.get(idx) {
                let value = inline_text(cell);
                if !value.is_empty() {
                    fields.insert_first(*field, value);
                }
            }
        }
        Some(fields)
    }
}

/// Merge into the record of an earlier table with the same ID, else append
fn add_row(records: &mut Vec<FieldSet>, table_start: usize, fields: FieldSet, identity: Field) {
    let earlier = fields.get(identity).and_then(|id| {
        records[..table_start]
            .iter()
            .position(|r| r.get(identity) == Some(id))
    });
    match earlier {
        Some(idx) => records[idx].merge_missing(fields),
        None => records.push(fields),
    }
}

/// First pipe row within the scan window that names the identity column
fn find_header(
    lines: &[&str],
    entity: &EntityDescriptor,
    scan_lines: usize,
) -> Option<(usize, TableHeader)> {
    lines
        .iter()
        .take(scan_lines)
        .enumerate()
        .filter(|(_, line)| is_table_row(line))
        .find_map(|(idx, line)| {
            TableHeader::from_cells(&split_cells(line), entity).map(|header| (idx, header))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Extract;
    use fsc_model::{AllocationRecord, Fsr, SafetyGoal};

    const FSR_TABLE: &str = "\
| FSR ID | Description | Allocation | ASIL | Safety Goal | Verification | Timing |
|--------|-------------|------------|------|-------------|--------------|--------|
| FSR-SG-001-DET-1 | Detect over-voltage >5% | Sensor | C | SG-001 | HIL test | 100ms |
| NOTAN-ID | desc | ECU | C | SG-001 | test | 10ms |
";

    fn parse<R: Extract>(text: &str) -> Option<Vec<FieldSet>> {
        TableStrategy.try_parse(text, R::descriptor(), &ExtractionConfig::default())
    }

    #[test]
    fn maps_columns_through_aliases() {
        let rows = parse::<Fsr>(FSR_TABLE).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(Field::Id), Some("FSR-SG-001-DET-1"));
        assert_eq!(row.get(Field::Description), Some("Detect over-voltage >5%"));
        assert_eq!(row.get(Field::AllocatedTo), Some("Sensor"));
        assert_eq!(row.get(Field::Asil), Some("C"));
        assert_eq!(row.get(Field::SafetyGoalId), Some("SG-001"));
        assert_eq!(row.get(Field::VerificationCriteria), Some("HIL test"));
        assert_eq!(row.get(Field::Timing), Some("100ms"));
    }

    #[test]
    fn header_found_by_hint() {
        let text = "| Safety Goal ID | Goal | ASIL |\n|---|---|---|\n| SG-002 | Avoid rollaway | B |";
        let rows = parse::<SafetyGoal>(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(Field::Description), Some("Avoid rollaway"));
    }

    #[test]
    fn header_outside_scan_window_is_ignored() {
        let mut text = "filler\n".repeat(5);
        text.push_str(FSR_TABLE);
        let config = ExtractionConfig::default().with_table_header_scan_lines(3);
        assert!(TableStrategy.try_parse(&text, Fsr::descriptor(), &config).is_none());
    }

    #[test]
    fn no_header_is_not_recognised() {
        assert!(parse::<Fsr>("FSR-ID: FSR-SG-001-DET-1\nASIL: C").is_none());
    }

    #[test]
    fn following_table_uses_its_own_header() {
        let text = format!(
            "{FSR_TABLE}\nAllocation summary:\n\n\
             | FSR ID | Allocated To | Rationale |\n|---|---|---|\n\
             | FSR-SG-001-DET-1 | Battery ECU | Closest to sensor |\n\
             | FSR-SG-001-DET-2 | Main MCU | Spare capacity |\n"
        );
        let rows = parse::<Fsr>(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(Field::Description), Some("Detect over-voltage >5%"));
        assert_eq!(rows[0].get(Field::Asil), Some("C"));
        assert_eq!(rows[0].get(Field::AllocatedTo), Some("Sensor"));
        assert_eq!(rows[0].get(Field::AllocationRationale), Some("Closest to sensor"));
        assert_eq!(rows[1].get(Field::Id), Some("FSR-SG-001-DET-2"));
        assert_eq!(rows[1].get(Field::AllocatedTo), Some("Main MCU"));
        assert_eq!(rows[1].get(Field::Asil), None);
    }

    #[test]
    fn table_without_identity_column_is_skipped() {
        let text = format!(
            "{FSR_TABLE}\n| Component | Supplier |\n|---|---|\n| FSR-SG-001-DET-9 | ACME |\n"
        );
        let rows = parse::<Fsr>(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(Field::Id), Some("FSR-SG-001-DET-1"));
    }

    #[test]
    fn header_only_table_recognised_but_empty() {
        assert_eq!(parse::<AllocationRecord>("| FSR ID | Component |\n|---|---|"), Some(Vec::new()));
    }
}
