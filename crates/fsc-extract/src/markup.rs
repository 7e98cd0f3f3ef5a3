//! Markdown helpers
//!
//! Generated text is usually markdown. Labels arrive as `**ASIL:**`,
//! `- **Rationale:**` or `### a) Fault Avoidance`; these helpers reduce a
//! line to its plain text with pulldown-cmark before label matching.

use pulldown_cmark::{Event, Parser as MdParser};

/// Plain inline text of a single markdown line
///
/// Emphasis, list markers, heading hashes and link syntax are dropped;
/// code spans keep their content. Raw HTML is kept verbatim, since
/// generated text writes placeholders as `<Imax>`.
#[must_use]
pub fn inline_text(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for event in MdParser::new(line) {
        match event {
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineHtml(text)
            | Event::Html(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Heading level of a markdown ATX heading line
#[must_use]
pub fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    let rest = &trimmed[hashes..];
    ((1..=6).contains(&hashes) && (rest.is_empty() || rest.starts_with(char::is_whitespace)))
        .then_some(hashes)
}

/// Block delimiter: a thematic break of dashes, stars or underscores
#[must_use]
pub fn is_delimiter(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.chars().all(|c| c == *marker))
}

/// Code fence line
#[inline]
#[must_use]
pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Pipe-table row
#[inline]
#[must_use]
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') || (trimmed.contains('|') && trimmed.matches('|').count() >= 2)
}

/// Separator row such as `|---|:---:|`
#[must_use]
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let c = cell.trim();
            !c.is_empty() && c.contains('-') && c.chars().all(|ch| matches!(ch, '-' | ':' | ' '))
        })
}

/// Split a pipe row into trimmed cells
///
/// Only the empty cells produced by leading and trailing pipes are removed,
/// so interior empty cells keep column positions aligned.
#[must_use]
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.trim().split('|').map(|c| c.trim().to_string()).collect();
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_strips_emphasis_and_list_markers() {
        assert_eq!(inline_text("**Criterion:** Vehicle stops"), "Criterion: Vehicle stops");
        assert_eq!(inline_text("- **Rationale:** Fast path"), "Rationale: Fast path");
        assert_eq!(inline_text("### a) Fault Avoidance"), "a) Fault Avoidance");
        assert_eq!(inline_text("Timing: `10 ms`"), "Timing: 10 ms");
    }

    #[test]
    fn inline_text_keeps_angle_bracket_placeholders() {
        assert_eq!(
            inline_text("Description: Limit current to <Imax> within 10 ms"),
            "Description: Limit current to <Imax> within 10 ms"
        );
        assert_eq!(inline_text("**Safe State:** <to be defined>"), "Safe State: <to be defined>");
        assert_eq!(inline_text("<Tmax> reached"), "<Tmax> reached");
    }

    #[test]
    fn headings() {
        assert_eq!(heading_level("### a) Fault Avoidance"), Some(3));
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("plain"), None);
    }

    #[test]
    fn delimiters() {
        assert!(is_delimiter("---"));
        assert!(is_delimiter(" * * * "));
        assert!(!is_delimiter("--"));
        assert!(!is_delimiter("-a-"));
    }

    #[test]
    fn cells_keep_interior_gaps() {
        assert_eq!(
            split_cells("| FSR-SG-001-DET-1 |  | C |"),
            vec!["FSR-SG-001-DET-1", "", "C"]
        );
        assert_eq!(split_cells("a | b"), vec!["a", "b"]);
    }

    #[test]
    fn separator_rows() {
        assert!(is_separator_row(&split_cells("|---|:---:|")));
        assert!(!is_separator_row(&split_cells("| FSR ID | ASIL |")));
    }
}
