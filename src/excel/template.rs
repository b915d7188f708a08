//! Template exporter - writes an empty (or sample) listing in the accepted layout

use crate::error::{ConvertError, ConvertResult};
use crate::excel::extractor::{EXPECTED_HEADERS, FIRST_COLUMN, SKIPPED_ROWS};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;

/// Worksheet name used for generated templates
pub const TEMPLATE_SHEET_NAME: &str = "Receivables";

/// One listing row as written into the template
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub date: NaiveDate,
    pub invoice_number: String,
    pub customer_name: String,
    pub amount: f64,
    pub amount_due: f64,
    pub card_id: String,
}

impl SampleRow {
    fn example_rows() -> Vec<SampleRow> {
        vec![
            SampleRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default(),
                invoice_number: "00048071".to_string(),
                customer_name: "Acme Co".to_string(),
                amount: 100.0,
                amount_due: 174.95,
                card_id: "*None".to_string(),
            },
            SampleRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap_or_default(),
                invoice_number: "INV-9".to_string(),
                customer_name: "Beta LLC".to_string(),
                amount: -5.0,
                amount_due: -5.0,
                card_id: "C99".to_string(),
            },
        ]
    }
}

/// Builds a workbook with the nine-row title block, the header on row 10
/// and a trailing Amount Due total.
pub struct TemplateExporter {
    title: String,
    rows: Vec<SampleRow>,
}

impl Default for TemplateExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExporter {
    /// Create an exporter with no data rows
    pub fn new() -> Self {
        Self {
            title: "Receivables Invoice Listing".to_string(),
            rows: Vec::new(),
        }
    }

    /// Fill the data region with two example invoices
    pub fn with_sample_data(mut self) -> Self {
        self.rows = SampleRow::example_rows();
        self
    }

    pub fn with_rows(mut self, rows: Vec<SampleRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Number of data rows the template will carry
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Save the template to disk
    pub fn export(&self, path: &Path) -> ConvertResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(path)
            .map_err(|e| ConvertError::Template(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    /// Render the template into memory
    pub fn to_buffer(&self) -> ConvertResult<Vec<u8>> {
        let mut workbook = self.build()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self) -> ConvertResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(TEMPLATE_SHEET_NAME)?;

        self.write_title_block(worksheet)?;
        self.write_header(worksheet)?;
        self.write_rows(worksheet)?;

        Ok(workbook)
    }

    /// Rows 1-9: report title, skipped on import
    fn write_title_block(&self, worksheet: &mut Worksheet) -> ConvertResult<()> {
        let title_format = Format::new().set_bold().set_font_size(14);
        let col = FIRST_COLUMN as u16;

        worksheet.write_string_with_format(0, col, &self.title, &title_format)?;
        worksheet.write_string(2, col, "Rows 1-9 are ignored on import.")?;
        worksheet.write_string(
            3,
            col,
            "Enter one invoice or credit per row below the header, then a total row.",
        )?;
        worksheet.write_string(
            4,
            col,
            "Card ID *None means no card on file; the customer name is used instead.",
        )?;
        Ok(())
    }

    /// Row 10: column headers in B:G
    fn write_header(&self, worksheet: &mut Worksheet) -> ConvertResult<()> {
        let header_format = Format::new().set_bold();

        for (offset, name) in EXPECTED_HEADERS.iter().enumerate() {
            let col = FIRST_COLUMN as u16 + offset as u16;
            worksheet.write_string_with_format(SKIPPED_ROWS, col, *name, &header_format)?;
            worksheet.set_column_width(col, 16)?;
        }
        Ok(())
    }

    /// Data rows, then the Amount Due total
    fn write_rows(&self, worksheet: &mut Worksheet) -> ConvertResult<()> {
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let money_format = Format::new().set_num_format("0.00");
        let col = FIRST_COLUMN as u16;

        let mut row = SKIPPED_ROWS + 1;
        for sample in &self.rows {
            let date = ExcelDateTime::from_ymd(
                sample.date.year() as u16,
                sample.date.month() as u8,
                sample.date.day() as u8,
            )?;
            worksheet.write_datetime_with_format(row, col, &date, &date_format)?;
            worksheet.write_string(row, col + 1, &sample.invoice_number)?;
            worksheet.write_string(row, col + 2, &sample.customer_name)?;
            worksheet.write_number_with_format(row, col + 3, sample.amount, &money_format)?;
            worksheet.write_number_with_format(row, col + 4, sample.amount_due, &money_format)?;
            worksheet.write_string(row, col + 5, &sample.card_id)?;
            row += 1;
        }

        let total: f64 = self.rows.iter().map(|r| r.amount_due).sum();
        let total_format = Format::new().set_bold().set_num_format("0.00");
        worksheet.write_number_with_format(row, col + 4, total, &total_format)?;
        Ok(())
    }
}
