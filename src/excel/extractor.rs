//! Table extractor - Excel (.xlsx) bytes → raw receivable records
//!
//! The export has a fixed shape: a nine-row title block, the column header
//! on row 10, and the data in columns B:G. The last row carries only the
//! Amount Due total and is dropped by the required-field check.

use crate::error::{ConvertError, ConvertResult};
use crate::types::{CellValue, RawRecord};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use std::io::{Cursor, Read, Seek};
use tracing::debug;

/// Rows above the header row (the title block)
pub const SKIPPED_ROWS: u32 = 9;

/// First column read, zero-based (column B)
pub const FIRST_COLUMN: u32 = 1;

/// Last column read, zero-based (column G)
pub const LAST_COLUMN: u32 = 6;

pub const DATE_HEADER: &str = "Date";
pub const INVOICE_HEADER: &str = "Invoice No.";
pub const CUSTOMER_HEADER: &str = "Customer Name";
pub const AMOUNT_HEADER: &str = "Amount";
pub const AMOUNT_DUE_HEADER: &str = "Amount Due";
pub const CARD_ID_HEADER: &str = "Card ID";

/// Header row of the export, columns B:G left to right
pub const EXPECTED_HEADERS: [&str; 6] = [
    DATE_HEADER,
    INVOICE_HEADER,
    CUSTOMER_HEADER,
    AMOUNT_HEADER,
    AMOUNT_DUE_HEADER,
    CARD_ID_HEADER,
];

/// Which worksheet of the workbook holds the listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    #[default]
    First,
    Named(String),
}

impl SheetSelector {
    /// `None` selects the first sheet
    pub fn from_name(name: Option<String>) -> Self {
        match name {
            Some(name) => SheetSelector::Named(name),
            None => SheetSelector::First,
        }
    }
}

/// Extraction settings
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub sheet: SheetSelector,
}

/// Records that survived filtering, plus how many data rows were scanned
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    pub rows_read: usize,
}

/// Positions of the consumed columns, zero-based absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: u32,
    invoice_number: u32,
    customer_name: u32,
    amount_due: u32,
    card_id: u32,
}

/// Reads the receivables listing out of a workbook
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    options: ExtractOptions,
}

impl TableExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract the data rows that carry every required field
    pub fn extract(&self, bytes: &[u8]) -> ConvertResult<Vec<RawRecord>> {
        Ok(self.extract_with_stats(bytes)?.records)
    }

    /// Extract and report how many rows the data region held
    pub fn extract_with_stats(&self, bytes: &[u8]) -> ConvertResult<Extraction> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ConvertError::parse(format!("Failed to open Excel file: {}", e)))?;

        let range = self.worksheet(&mut workbook)?;
        self.extract_range(&range)
    }

    /// Resolve the configured worksheet
    fn worksheet<RS: Read + Seek>(&self, workbook: &mut Xlsx<RS>) -> ConvertResult<Range<Data>> {
        match &self.options.sheet {
            SheetSelector::First => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| ConvertError::parse("Workbook contains no worksheets"))?
                .map_err(|e| ConvertError::parse(format!("Failed to read worksheet: {}", e))),
            SheetSelector::Named(name) => {
                let sheet_names = workbook.sheet_names();
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(ConvertError::parse(format!(
                        "Worksheet '{}' not found. Available: {}",
                        name,
                        sheet_names.join(", ")
                    )));
                }
                workbook.worksheet_range(name).map_err(|e| {
                    ConvertError::parse(format!("Failed to read worksheet '{}': {}", name, e))
                })
            }
        }
    }

    /// Walk the data region of an already loaded sheet
    fn extract_range(&self, range: &Range<Data>) -> ConvertResult<Extraction> {
        let last_row = match range.end() {
            Some((row, _)) if !range.is_empty() && row >= SKIPPED_ROWS => row,
            _ => {
                return Err(ConvertError::parse(format!(
                    "Sheet has no header row: expected column headers on row {}",
                    SKIPPED_ROWS + 1
                )))
            }
        };

        let columns = locate_columns(range)?;
        let mut extraction = Extraction::default();

        for row in (SKIPPED_ROWS + 1)..=last_row {
            extraction.rows_read += 1;
            let sheet_row = row + 1;

            let mut record = RawRecord {
                row: sheet_row,
                date: cell_at(range, row, columns.date),
                invoice_number: cell_at(range, row, columns.invoice_number),
                customer_name: cell_at(range, row, columns.customer_name),
                amount_due: None,
                card_id: cell_at(range, row, columns.card_id),
            };

            if !record.has_required_fields() {
                debug!(row = sheet_row, "dropping row without required fields");
                continue;
            }

            record.amount_due = amount_at(range, row, columns.amount_due)?;
            extraction.records.push(record);
        }

        debug!(
            rows_read = extraction.rows_read,
            kept = extraction.records.len(),
            "extracted data region"
        );
        Ok(extraction)
    }
}

/// Map the header row (row 10, B:G) to column positions
fn locate_columns(range: &Range<Data>) -> ConvertResult<ColumnMap> {
    let headers: Vec<(u32, String)> = (FIRST_COLUMN..=LAST_COLUMN)
        .map(|col| {
            let name = cell_at(range, SKIPPED_ROWS, col)
                .map(|cell| cell.as_text().trim().to_string())
                .unwrap_or_default();
            (col, name)
        })
        .collect();

    let find = |wanted: &str| {
        headers
            .iter()
            .find(|(_, name)| name == wanted)
            .map(|(col, _)| *col)
    };

    let (date, invoice_number, customer_name, amount_due, card_id) = match (
        find(DATE_HEADER),
        find(INVOICE_HEADER),
        find(CUSTOMER_HEADER),
        find(AMOUNT_DUE_HEADER),
        find(CARD_ID_HEADER),
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e)) => (a, b, c, d, e),
        _ => {
            let missing: Vec<&str> = [
                DATE_HEADER,
                INVOICE_HEADER,
                CUSTOMER_HEADER,
                AMOUNT_DUE_HEADER,
                CARD_ID_HEADER,
            ]
            .into_iter()
            .filter(|wanted| find(*wanted).is_none())
            .collect();
            let found: Vec<&str> = headers
                .iter()
                .map(|(_, name)| name.as_str())
                .filter(|name| !name.is_empty())
                .collect();
            return Err(ConvertError::parse(format!(
                "Header row {} is missing column(s): {} (found in B:G: {})",
                SKIPPED_ROWS + 1,
                missing.join(", "),
                if found.is_empty() {
                    "nothing".to_string()
                } else {
                    found.join(", ")
                }
            )));
        }
    };

    Ok(ColumnMap {
        date,
        invoice_number,
        customer_name,
        amount_due,
        card_id,
    })
}

/// Non-blank value at an absolute position
fn cell_at(range: &Range<Data>, row: u32, col: u32) -> Option<CellValue> {
    range.get_value((row, col)).and_then(convert_cell)
}

/// Amount Due must be numeric on every row that is kept
fn amount_at(range: &Range<Data>, row: u32, col: u32) -> ConvertResult<Option<f64>> {
    let invalid = |shown: String| {
        ConvertError::parse(format!(
            "Amount Due on row {} is not a number: '{}'",
            row + 1,
            shown
        ))
    };

    match cell_at(range, row, col) {
        None => Ok(None),
        Some(CellValue::Number(n)) => Ok(Some(n)),
        Some(CellValue::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(invalid(s)),
        },
        Some(date @ CellValue::Date(_)) => Err(invalid(date.as_text())),
    }
}

/// Convert a calamine cell, treating empty text and error cells as blank
fn convert_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => text_value(s),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => {
            let text = if *b { "True" } else { "False" };
            Some(CellValue::Text(text.to_string()))
        }
        Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
            Some(datetime) => Some(CellValue::Date(datetime.date())),
            None => Some(CellValue::Number(dt.as_f64())),
        },
        Data::DateTimeIso(s) => match parse_iso_date(s) {
            Some(date) => Some(CellValue::Date(date)),
            None => text_value(s),
        },
        other => text_value(&other.to_string()),
    }
}

fn text_value(s: &str) -> Option<CellValue> {
    if s.trim().is_empty() {
        None
    } else {
        Some(CellValue::Text(s.to_string()))
    }
}

/// Date part of an ISO 8601 timestamp (`2024-01-05` or `2024-01-05T10:00:00`)
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
