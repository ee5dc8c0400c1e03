// src/extractors/mod.rs
pub mod keywords;
pub mod models;
pub mod receipt2025;

use chrono::Datelike;

use crate::table::{Table, TableConfig};
use crate::utils::error::ExtractError;

// Re-export key extraction types for convenience
pub use models::{EmployeeRecord, ExtractOptions, SourceVariant};
pub use receipt2025::Receipt2025Extractor;

/// One extraction ruleset: turns the two reconstructed page tables of a
/// receipt into the final employee record.
///
/// Rulesets also own the reconstruction thresholds for their document
/// format — how tight the row and cell grids are is a property of the form
/// revision, not of the caller.
pub trait EmployeeDataExtractor: Send + Sync {
    fn extract(
        &self,
        first_page: &Table,
        second_page: &Table,
        opts: &ExtractOptions,
    ) -> Result<EmployeeRecord, ExtractError>;

    fn first_page_config(&self) -> TableConfig {
        TableConfig::default()
    }

    fn second_page_config(&self) -> TableConfig {
        TableConfig::default()
    }
}

/// The base year an acceptable receipt must report on: the calendar year
/// before the current one.
pub fn expected_base_year() -> i32 {
    chrono::Local::now().year() - 1
}

static RECEIPT_2025: Receipt2025Extractor = Receipt2025Extractor;

/// Year-tagged ruleset lookup. A single real ruleset exists today; other
/// years fall back to it, so documents keep extracting until the form
/// actually changes and a dedicated ruleset lands here.
pub fn for_year(base_year: i32) -> &'static dyn EmployeeDataExtractor {
    match base_year {
        2025 => &RECEIPT_2025,
        _ => &RECEIPT_2025,
    }
}
