// src/table/mod.rs
use crate::document::Word;

/// One reconstructed table row: merged cells ordered left to right.
pub type Row = Vec<String>;

/// One reconstructed page: rows ordered top to bottom.
pub type Table = Vec<Row>;

/// Per-page reconstruction thresholds.
///
/// `row_gap` is the maximum y-distance between consecutive words (sorted by
/// descending y) that still belong to the same row. `cell_gap` is the
/// x-distance below which adjacent words in a row are merged into one cell.
/// Page layouts differ, so callers pass distinct configs per page; the
/// defaults fit the first (summary) page of the receipt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub row_gap: f64,
    pub cell_gap: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_gap: 5.0,
            cell_gap: 30.0,
        }
    }
}

/// Reconstructs a table from the flat word stream of one page.
///
/// Words are grouped into rows by scanning in descending-y order and closing
/// the current group whenever the y-gap to the previous word exceeds
/// `config.row_gap`. Within a row, words are ordered by ascending x and
/// merged into a single cell while the x-gap to the previous word stays
/// strictly below `config.cell_gap`; merged fragments are joined with one
/// space. A gap at or above the threshold starts a new cell.
///
/// Pure and deterministic: an empty word list yields an empty table, and no
/// empty rows are ever emitted. Coordinates are assumed finite.
pub fn reconstruct(mut words: Vec<Word>, config: &TableConfig) -> Table {
    // Top of page first.
    words.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut row_groups: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut last_y = f64::MAX;

    for word in words {
        if (word.y - last_y).abs() > config.row_gap && !current.is_empty() {
            row_groups.push(std::mem::take(&mut current));
        }
        last_y = word.y;
        current.push(word);
    }
    if !current.is_empty() {
        row_groups.push(current);
    }

    let mut table = Table::with_capacity(row_groups.len());

    for mut group in row_groups {
        group.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut merged_row = Row::new();
        let mut current_cell = group[0].text.clone();
        let mut last_x = group[0].x;

        for word in &group[1..] {
            if (word.x - last_x).abs() < config.cell_gap {
                current_cell.push(' ');
                current_cell.push_str(&word.text);
            } else {
                merged_row.push(std::mem::replace(&mut current_cell, word.text.clone()));
            }
            last_x = word.x;
        }
        merged_row.push(current_cell);
        table.push(merged_row);
    }

    tracing::trace!("Reconstructed {} rows from page words", table.len());

    table
}
