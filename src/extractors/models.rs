// src/extractors/models.rs
use serde::Serialize;

/// The employee data extracted from one withholding-tax receipt.
///
/// Built once, after every field has resolved; never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    /// Employee name as printed on the receipt.
    pub name: String,
    /// First 7 digits of the resident registration number (birth date plus
    /// the leading digit of the serial part). Empty when unresolved.
    pub rrn_prefix: String,
    /// The tax year the receipt reports on (4-digit calendar year).
    pub base_year: i32,
    /// Salary before the withheld tax is deducted: total income plus untaxed
    /// income, minus prior withholding at the current workplace and the seven
    /// pension/insurance target amounts.
    pub pre_deduction_salary: i64,
    /// Aggregated withheld tax (income tax, local income tax, special tax).
    pub withheld_tax: i64,
}

/// Which issuing system produced the document. Payroll vendors print the
/// same logical receipt with different glyphs and label spellings; the
/// variant selects the accepted keyword set and nothing else — it never
/// appears in the output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceVariant {
    /// Issuer unknown; match against the union of all accepted spellings.
    #[default]
    Unspecified,
    /// 국세청 홈택스 (National Tax Service portal).
    Hometax,
    /// 더존 payroll systems.
    Douzone,
    /// 더존 SmartA desktop line.
    SmartA,
    /// A recognized-as-foreign issuer; treated like `Unspecified`.
    Other,
}

/// Per-call extraction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub variant: SourceVariant,
    /// Diagnostic bypass: validation failures are logged instead of raised
    /// and a best-effort (possibly empty or zeroed) record is returned, so an
    /// operator can inspect intermediate values of a rejected document.
    /// Production callers leave this off.
    pub relaxed: bool,
}
