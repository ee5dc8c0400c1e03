// src/extractors/receipt2025.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::keywords::{anchor_keywords, AmountRow, AnchorKeywords, DeductionItem};
use crate::extractors::models::{EmployeeRecord, ExtractOptions};
use crate::extractors::{expected_base_year, EmployeeDataExtractor};
use crate::table::{Row, Table, TableConfig};
use crate::utils::error::ExtractError;
use crate::utils::table_debug;

// --- Constants ---
/// Redaction placeholder substituted for sensitive characters by issuers.
const MASKING_CHAR: char = '*';

// --- Regex Patterns (Lazy Static) ---
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));
static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("Failed to compile NON_DIGIT_RE"));

/// Ruleset for the receipt format in force for base year 2025.
///
/// All field lookups are anchor-driven: a row is located by the Korean
/// keyword it carries, then values are read relative to the anchor cell.
/// Issuers shuffle absolute positions freely but keep the labels, so this
/// survives layout differences the fixed-column approach does not.
pub struct Receipt2025Extractor;

impl Receipt2025Extractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Receipt2025Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDataExtractor for Receipt2025Extractor {
    fn extract(
        &self,
        first_page: &Table,
        second_page: &Table,
        opts: &ExtractOptions,
    ) -> Result<EmployeeRecord, ExtractError> {
        let kw = anchor_keywords(opts.variant);

        // Issuers disagree on intra-cell spacing, so every cell is reduced to
        // its non-whitespace characters before any anchor search.
        let first = normalize(first_page);
        let second = normalize(second_page);

        tracing::trace!("First page table:\n{}", table_debug::format_table(&first));
        tracing::trace!("Second page table:\n{}", table_debug::format_table(&second));

        // --- Identity ---
        let (name, rrn_text) = match identity_row(&first, kw) {
            Some(row) => (extract_name(row, kw), extract_rrn_text(row, kw)),
            None => (String::new(), String::new()),
        };
        let rrn_prefix = rrn_prefix_from(&rrn_text);
        tracing::debug!("name: {:?}, rrn_prefix: {:?}", name, rrn_prefix);

        if name.contains(MASKING_CHAR) || rrn_text.contains(MASKING_CHAR) {
            gate(
                opts.relaxed,
                ExtractError::RedactedData(
                    "name or resident registration number is masked".to_string(),
                ),
            )?;
        }
        if name.is_empty() || rrn_prefix.is_empty() {
            gate(
                opts.relaxed,
                ExtractError::InvalidDocument(
                    "employee name or resident registration number not found".to_string(),
                ),
            )?;
        }

        // --- Reference year ---
        let base_year = extract_base_year(&first, kw);
        tracing::debug!("base_year: {}", base_year);

        if base_year == 0 {
            gate(
                opts.relaxed,
                ExtractError::InvalidDocument("work period year not found".to_string()),
            )?;
        } else {
            let expected = expected_base_year();
            if base_year != expected {
                gate(
                    opts.relaxed,
                    ExtractError::WrongTaxYear {
                        expected,
                        found: base_year,
                    },
                )?;
            }
        }

        // --- First page amounts ---
        let total_income = first_amount_after(&first, |c| kw.matches_total(c));
        let untaxed_income = first_amount_after(&first, |c| contains_any(c, kw.untaxed));
        let prior_withholding = sum_three_after(&first, |c| contains_any(c, kw.current_workplace));
        let withheld_tax = sum_three_after(&first, |c| contains_any(c, kw.withheld_tax));

        tracing::debug!(
            "total_income: {}, untaxed_income: {}, prior_withholding: {}, withheld_tax: {}",
            total_income,
            untaxed_income,
            prior_withholding,
            withheld_tax
        );

        // --- Second page deduction items ---
        let mut deduction_total: i64 = 0;
        for item in kw.deductions {
            let amount = deduction_amount(&second, item, kw.target_amount);
            tracing::debug!("{}: {}", item.label, amount);
            deduction_total += amount;
        }

        let pre_deduction_salary =
            total_income + untaxed_income - prior_withholding - deduction_total;

        tracing::debug!(
            "deduction_total: {}, pre_deduction_salary: {}",
            deduction_total,
            pre_deduction_salary
        );

        Ok(EmployeeRecord {
            name,
            rrn_prefix,
            base_year,
            pre_deduction_salary,
            withheld_tax,
        })
    }

    fn second_page_config(&self) -> TableConfig {
        // The pension/insurance detail page packs a denser grid than the
        // summary page: lines sit closer together and columns are tighter.
        TableConfig {
            row_gap: 3.0,
            cell_gap: 25.0,
        }
    }
}

// --- Validation gate ---

/// Raises `err` in production mode; in relaxed mode logs it and lets the
/// extraction continue so an operator can inspect the remaining fields.
fn gate(relaxed: bool, err: ExtractError) -> Result<(), ExtractError> {
    if relaxed {
        tracing::warn!("Validation downgraded in relaxed mode: {}", err);
        Ok(())
    } else {
        Err(err)
    }
}

// --- Cell and row helpers ---

fn normalize(table: &Table) -> Table {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| WHITESPACE_RE.replace_all(cell, "").into_owned())
                .collect()
        })
        .collect()
}

fn contains_any(cell: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| cell.contains(k))
}

fn find_row<'a>(table: &'a Table, anchor: impl Fn(&str) -> bool) -> Option<&'a Row> {
    table.iter().find(|row| row.iter().any(|cell| anchor(cell)))
}

/// Cells strictly after the first cell matching `anchor`; empty when no cell
/// matches.
fn cells_after<'a>(row: &'a Row, anchor: impl Fn(&str) -> bool) -> &'a [String] {
    match row.iter().position(|cell| anchor(cell)) {
        Some(idx) => &row[idx + 1..],
        None => &[],
    }
}

/// Amounts are printed with comma thousands separators.
fn parse_amount(cell: &str) -> Option<i64> {
    let cleaned = cell.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

/// First numeric-parsable cell after the anchor cell of the anchor row,
/// defaulting to 0 when the row or a parsable cell is absent.
fn first_amount_after(table: &Table, anchor: impl Fn(&str) -> bool + Copy) -> i64 {
    find_row(table, anchor)
        .and_then(|row| {
            cells_after(row, anchor)
                .iter()
                .find_map(|c| parse_amount(c))
        })
        .unwrap_or(0)
}

/// Sum of the next three numeric-parsable cells after the anchor, once
/// leading blank cells are skipped. Three columns carry partial totals that
/// must be added, not treated as alternatives.
fn sum_three_after(table: &Table, anchor: impl Fn(&str) -> bool + Copy) -> i64 {
    find_row(table, anchor)
        .map(|row| {
            cells_after(row, anchor)
                .iter()
                .skip_while(|c| c.is_empty())
                .filter_map(|c| parse_amount(c))
                .take(3)
                .sum()
        })
        .unwrap_or(0)
}

// --- Identity fields ---

fn identity_row<'a>(table: &'a Table, kw: &AnchorKeywords) -> Option<&'a Row> {
    table.iter().find(|row| {
        row.iter().any(|c| kw.matches_marker6(c)) && row.iter().any(|c| kw.matches_marker7(c))
    })
}

/// The name is whatever follows the name label in the concatenation of cells
/// between the ⑥ marker and the ⑦ marker.
fn extract_name(row: &Row, kw: &AnchorKeywords) -> String {
    let between: String = row
        .iter()
        .skip_while(|c| !kw.matches_marker6(c))
        .take_while(|c| !kw.matches_marker7(c))
        .map(String::as_str)
        .collect();

    for label in kw.name_label {
        if let Some(pos) = between.find(label) {
            return between[pos + label.len()..].to_string();
        }
    }
    String::new()
}

/// Raw text of the registration-number region: every cell from the ⑦ marker
/// onward, concatenated. Kept raw so masking characters stay visible.
fn extract_rrn_text(row: &Row, kw: &AnchorKeywords) -> String {
    row.iter()
        .skip_while(|c| !kw.matches_marker7(c))
        .map(String::as_str)
        .collect()
}

/// Reduces the raw registration-number text to the 7-digit prefix. Non-digits
/// are stripped; when more than 13 digits remain (a "(7)" marker glyph
/// contributes one, and leading noise can add more), only the trailing 13 —
/// the registration number proper — are kept. Fewer than 7 digits resolves to
/// the empty string, which fails validation upstream.
fn rrn_prefix_from(raw: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(raw, "");
    let digits = digits.as_ref();
    let tail = if digits.len() > 13 {
        &digits[digits.len() - 13..]
    } else {
        digits
    };
    if tail.len() >= 7 {
        tail[..7].to_string()
    } else {
        String::new()
    }
}

// --- Reference year ---

/// Year the receipt reports on: the first 4 digits after the work-period
/// keyword. 0 when the row or the digits are missing.
fn extract_base_year(table: &Table, kw: &AnchorKeywords) -> i32 {
    let row = match find_row(table, |c| contains_any(c, kw.work_period)) {
        Some(row) => row,
        None => return 0,
    };

    let joined = row.concat();
    let after = kw
        .work_period
        .iter()
        .find_map(|k| joined.find(k).map(|pos| &joined[pos + k.len()..]));
    let after = match after {
        Some(text) => text,
        None => return 0,
    };

    let digits = NON_DIGIT_RE.replace_all(after, "");
    digits
        .get(..4)
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(0)
}

// --- Second page deduction items ---

/// Reads one deduction item's target amount: locate the anchor row, pick the
/// amount row per the item's policy, then take the first numeric-parsable
/// cell after the cell that is exactly the target-amount label. Missing
/// anchors (and an anchor on the top row when the policy says "row above")
/// resolve to 0 — absent items are normal, not an error.
fn deduction_amount(table: &Table, item: &DeductionItem, target_label: &str) -> i64 {
    let anchor_idx = match table
        .iter()
        .position(|row| row.iter().any(|c| contains_any(c, item.anchors)))
    {
        Some(idx) => idx,
        None => {
            tracing::trace!("No anchor row for {}; amount defaults to 0", item.label);
            return 0;
        }
    };

    let amount_row = match item.amount_row {
        AmountRow::Anchor => Some(&table[anchor_idx]),
        AmountRow::Above => anchor_idx.checked_sub(1).map(|idx| &table[idx]),
    };

    amount_row
        .and_then(|row| {
            row.iter()
                .skip_while(|c| c.as_str() != target_label)
                .skip(1)
                .find_map(|c| parse_amount(c))
        })
        .unwrap_or(0)
}
