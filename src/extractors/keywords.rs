// src/extractors/keywords.rs
//
// Anchor keyword tables for the withholding-tax receipt, keyed by issuing
// system. Every field is located by keyword containment rather than column
// index, because absolute positions shift between payroll vendors; what a
// vendor is allowed to vary is the spelling, and those accepted spellings
// live here. All keywords are matched against whitespace-stripped cells.

use once_cell::sync::Lazy;

use crate::extractors::models::SourceVariant;

/// Where a deduction item's target amount sits relative to its anchor row.
///
/// Observed issuer layouts place the amount row above the label for the
/// pension items and employment insurance, but on the label row itself for
/// health insurance. This is a literal per-item policy, not a rule to infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRow {
    /// Read from the row immediately preceding the anchor row.
    Above,
    /// Read from the anchor row itself.
    Anchor,
}

/// One pension/insurance deduction item on the second page.
#[derive(Debug)]
pub struct DeductionItem {
    /// Name used in logs and diagnostics.
    pub label: &'static str,
    /// Accepted anchor spellings; containment match against any cell.
    pub anchors: &'static [&'static str],
    pub amount_row: AmountRow,
}

/// The full anchor set for one issuer family.
#[derive(Debug, Clone)]
pub struct AnchorKeywords {
    /// Accepted encodings of the ⑥ identity marker.
    pub marker6: &'static [&'static str],
    /// Accepted encodings of the ⑦ identity marker.
    pub marker7: &'static [&'static str],
    /// Label preceding the employee name inside the identity row.
    pub name_label: &'static [&'static str],
    pub work_period: &'static [&'static str],
    /// The total-income row is the cell containing both of these, or a cell
    /// that is exactly the bare total token.
    pub total_marker: &'static str,
    pub total_token: &'static str,
    pub untaxed: &'static [&'static str],
    pub current_workplace: &'static [&'static str],
    pub withheld_tax: &'static [&'static str],
    /// Exact cell text that precedes a deduction target amount.
    pub target_amount: &'static str,
    pub deductions: &'static [DeductionItem],
}

impl AnchorKeywords {
    pub fn matches_marker6(&self, cell: &str) -> bool {
        self.marker6.iter().any(|m| cell.contains(m))
    }

    pub fn matches_marker7(&self, cell: &str) -> bool {
        self.marker7.iter().any(|m| cell.contains(m))
    }

    pub fn matches_total(&self, cell: &str) -> bool {
        (cell.contains(self.total_marker) && cell.contains(self.total_token))
            || cell == self.total_token
    }
}

const DEDUCTION_ITEMS: &[DeductionItem] = &[
    DeductionItem {
        label: "national pension",
        anchors: &["국민연금보험료"],
        amount_row: AmountRow::Above,
    },
    DeductionItem {
        label: "public-official pension",
        anchors: &["공무원"],
        amount_row: AmountRow::Above,
    },
    DeductionItem {
        label: "military pension",
        anchors: &["군인연금"],
        amount_row: AmountRow::Above,
    },
    DeductionItem {
        label: "private-school pension",
        anchors: &["사립학교"],
        amount_row: AmountRow::Above,
    },
    DeductionItem {
        label: "postal pension",
        anchors: &["별정우체국"],
        amount_row: AmountRow::Above,
    },
    DeductionItem {
        label: "health insurance",
        anchors: &["건강보험료"],
        amount_row: AmountRow::Anchor,
    },
    DeductionItem {
        label: "employment insurance",
        anchors: &["고용보험료"],
        amount_row: AmountRow::Above,
    },
];

// The union set: accepts every spelling any known issuer uses. Documents of
// unknown provenance extract against this.
static UNION_KEYWORDS: Lazy<AnchorKeywords> = Lazy::new(|| AnchorKeywords {
    marker6: &["⑥", "(6)"],
    marker7: &["⑦", "(7)"],
    name_label: &["성명"],
    work_period: &["근무기간"],
    total_marker: "16",
    total_token: "계",
    untaxed: &["비과세소득"],
    current_workplace: &["주(현)근무지", "주(현)"],
    withheld_tax: &["징수세액"],
    target_amount: "대상금액",
    deductions: DEDUCTION_ITEMS,
});

// Hometax prints the circled-digit glyphs.
static HOMETAX_KEYWORDS: Lazy<AnchorKeywords> = Lazy::new(|| AnchorKeywords {
    marker6: &["⑥"],
    marker7: &["⑦"],
    ..(*UNION_KEYWORDS).clone()
});

// Douzone exports (including SmartA) substitute parenthesized digits for the
// circled glyphs, depending on the font set installed on the issuing machine.
static DOUZONE_KEYWORDS: Lazy<AnchorKeywords> = Lazy::new(|| AnchorKeywords {
    marker6: &["⑥", "(6)"],
    marker7: &["⑦", "(7)"],
    ..(*UNION_KEYWORDS).clone()
});

/// Looks up the anchor set for an issuing system. New issuer formats slot in
/// here without touching the extraction logic.
pub fn anchor_keywords(variant: SourceVariant) -> &'static AnchorKeywords {
    match variant {
        SourceVariant::Unspecified | SourceVariant::Other => &UNION_KEYWORDS,
        SourceVariant::Hometax => &HOMETAX_KEYWORDS,
        SourceVariant::Douzone | SourceVariant::SmartA => &DOUZONE_KEYWORDS,
    }
}
