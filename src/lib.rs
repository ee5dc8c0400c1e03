// src/lib.rs

//! Extracts a fixed payroll record from Korean withholding-tax receipt PDFs
//! (원천징수영수증): employee name, the 7-digit resident registration number
//! prefix, the reference tax year, the computed pre-deduction salary, and the
//! aggregated withheld tax.
//!
//! The PDF decoding itself lives behind the [`document::WordSource`] seam; a
//! caller supplies positioned words per page, this crate reconstructs the
//! page tables and walks them with layout-invariant keyword anchors. The same
//! logical form is printed with different physical layouts by different
//! payroll systems, so nothing here depends on absolute coordinates or column
//! indexes.

pub mod document;
pub mod extractors;
pub mod table;
pub mod utils;

pub use document::{StaticWordSource, Word, WordSource};
pub use extractors::{
    expected_base_year, for_year, EmployeeDataExtractor, EmployeeRecord, ExtractOptions,
    SourceVariant,
};
pub use table::{reconstruct, Row, Table, TableConfig};
pub use utils::{AppError, ExtractError, SourceError};

/// Runs the whole pipeline for one document: pulls the word streams for both
/// receipt pages, reconstructs the page tables, and extracts the employee
/// record with the ruleset for the currently expected base year.
///
/// The source is consumed and dropped as soon as both word streams are in
/// hand, releasing the underlying document handle before reconstruction
/// begins. Each call is an independent pure computation; callers may process
/// separate documents in parallel without coordination.
pub fn extract_employee_data<S: WordSource>(
    mut source: S,
    opts: &ExtractOptions,
) -> Result<EmployeeRecord, AppError> {
    let first_words = source.page_words(1)?;
    let second_words = source.page_words(2)?;
    drop(source); // document handle is released before any processing

    let extractor = extractors::for_year(expected_base_year());

    let first = table::reconstruct(first_words, &extractor.first_page_config());
    let second = table::reconstruct(second_words, &extractor.second_page_config());

    tracing::info!(
        "Reconstructed tables: {} rows on page 1, {} rows on page 2",
        first.len(),
        second.len()
    );

    let record = extractor.extract(&first, &second, opts)?;

    tracing::info!(
        "Extracted record for base year {}: salary {}, withheld tax {}",
        record.base_year,
        record.pre_deduction_salary,
        record.withheld_tax
    );

    Ok(record)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Lays the cells of one logical row out as words 100pt apart in x, wide
    /// enough to stay separate cells under both page configs.
    fn words_for_row(cells: &[&str], y: f64) -> Vec<Word> {
        cells
            .iter()
            .enumerate()
            .map(|(i, text)| Word::new(*text, 10.0 + 100.0 * i as f64, y))
            .collect()
    }

    #[test]
    fn test_end_to_end_from_positioned_words() {
        let year = expected_base_year();
        let period = format!("{year}.01.01~{year}.12.31");

        let mut page1 = Vec::new();
        page1.extend(words_for_row(
            &["⑥성명", "홍길동", "⑦주민등록번호", "850101-1234567"],
            700.0,
        ));
        page1.extend(words_for_row(&["근무기간", &period], 650.0));
        page1.extend(words_for_row(&["16계", "30,000,000"], 600.0));
        // Two fragments 20pt apart merge into the single cell "비과세소득 계"
        // under the default 30pt cell gap; the whitespace normalization pass
        // later erases the joining space.
        page1.push(Word::new("비과세소득", 10.0, 550.0));
        page1.push(Word::new("계", 30.0, 550.0));
        page1.push(Word::new("1,000,000", 200.0, 550.0));
        page1.extend(words_for_row(
            &["징수세액", "500,000", "50,000", "0"],
            500.0,
        ));

        let mut page2 = Vec::new();
        page2.extend(words_for_row(&["대상금액", "2,000,000"], 700.0));
        page2.extend(words_for_row(&["국민연금보험료"], 690.0));
        page2.extend(words_for_row(&["건강보험료", "대상금액", "1,500,000"], 600.0));

        let source = StaticWordSource::new(vec![page1, page2]);
        let record = extract_employee_data(source, &ExtractOptions::default())
            .expect("end-to-end extraction should succeed");

        assert_eq!(record.name, "홍길동");
        assert_eq!(record.rrn_prefix, "8501011");
        assert_eq!(record.base_year, year);
        // 30,000,000 + 1,000,000 - 0 - (2,000,000 + 1,500,000)
        assert_eq!(record.pre_deduction_salary, 27_500_000);
        assert_eq!(record.withheld_tax, 550_000);
    }

    #[test]
    fn test_missing_second_page_propagates_source_error() {
        let source = StaticWordSource::new(vec![vec![Word::new("계", 10.0, 700.0)]]);
        let err = extract_employee_data(source, &ExtractOptions::default())
            .expect_err("one-page document cannot be processed");
        assert!(matches!(err, AppError::Source(SourceError::MissingPage(2))));
    }
}
