//! Excel module for receivables listings
//!
//! - Extract: listing workbook (.xlsx) → raw records
//! - Template: accepted layout → workbook (.xlsx)

pub mod extractor;
mod template;

pub use extractor::{ExtractOptions, Extraction, SheetSelector, TableExtractor};
pub use template::{SampleRow, TemplateExporter, TEMPLATE_SHEET_NAME};
