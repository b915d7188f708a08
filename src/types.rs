use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A non-blank cell read from the source sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A true calendar date (date-formatted numeric cell)
    Date(NaiveDate),
    /// Free text
    Text(String),
    /// Any other numeric cell
    Number(f64),
}

impl CellValue {
    /// Textual form used whenever a field is consumed as text.
    ///
    /// Integral numbers drop their fractional part (`48071.0` → `48071`) so a
    /// numeric invoice cell reads the same as its text twin.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Render a number the way a spreadsheet user typed it
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

//==============================================================================
// Records
//==============================================================================

/// One row of the data region, columns B:G of the source sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    /// 1-based sheet row the record was read from
    pub row: u32,
    pub date: Option<CellValue>,
    pub invoice_number: Option<CellValue>,
    pub customer_name: Option<CellValue>,
    pub amount_due: Option<f64>,
    pub card_id: Option<CellValue>,
}

impl RawRecord {
    /// A row is data only when every identifying column is filled in.
    ///
    /// The totals row carries nothing but Amount Due, so this is also what
    /// drops it.
    pub fn has_required_fields(&self) -> bool {
        self.date.is_some()
            && self.invoice_number.is_some()
            && self.customer_name.is_some()
            && self.card_id.is_some()
    }
}

/// Debtor transaction classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Credit note (negative balance)
    #[serde(rename = "CRD")]
    Credit,
    /// Invoice (zero or positive balance)
    #[serde(rename = "INV")]
    Invoice,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CRD",
            TransactionType::Invoice => "INV",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header row of the generated CSV, in field order
pub const OUTPUT_HEADERS: [&str; 5] = [
    "Debtor Reference",
    "Transaction Type",
    "Document Number",
    "Document Date",
    "Document Balance",
];

/// One converted row, ready for the debtor import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Debtor Reference")]
    pub debtor_reference: String,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Document Number")]
    pub document_number: String,
    #[serde(rename = "Document Date")]
    pub document_date: String,
    #[serde(rename = "Document Balance")]
    pub document_balance: String,
}

impl OutputRecord {
    /// Field values in CSV column order
    pub fn fields(&self) -> [&str; 5] {
        [
            self.debtor_reference.as_str(),
            self.transaction_type.as_str(),
            self.document_number.as_str(),
            self.document_date.as_str(),
            self.document_balance.as_str(),
        ]
    }
}
