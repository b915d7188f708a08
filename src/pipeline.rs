//! Conversion pipeline: extract the data region, transform each row

use crate::error::ConvertResult;
use crate::excel::{ExtractOptions, TableExtractor};
use crate::transform::transform;
use crate::types::OutputRecord;
use crate::writer;
use tracing::info;

/// Result of one conversion, with the row accounting shown in previews
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    /// Rows below the header that were examined
    pub rows_read: usize,
    /// Rows skipped for missing Date, Invoice No., Customer Name or Card ID
    pub rows_dropped: usize,
    pub records: Vec<OutputRecord>,
}

/// Spreadsheet bytes → debtor import records
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    extractor: TableExtractor,
}

impl Pipeline {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            extractor: TableExtractor::new(options),
        }
    }

    /// Run the conversion and keep the row counts
    pub fn run(&self, bytes: &[u8]) -> ConvertResult<Conversion> {
        let extraction = self.extractor.extract_with_stats(bytes)?;
        let records: Vec<OutputRecord> = extraction.records.iter().map(transform).collect();
        let rows_dropped = extraction.rows_read - records.len();

        info!(
            rows_read = extraction.rows_read,
            rows_dropped,
            records = records.len(),
            "converted receivables listing"
        );

        Ok(Conversion {
            rows_read: extraction.rows_read,
            rows_dropped,
            records,
        })
    }

    /// Converted records in source order
    pub fn convert(&self, bytes: &[u8]) -> ConvertResult<Vec<OutputRecord>> {
        Ok(self.run(bytes)?.records)
    }

    /// Converted records rendered as the import CSV
    pub fn convert_to_csv(&self, bytes: &[u8]) -> ConvertResult<Vec<u8>> {
        let records = self.convert(bytes)?;
        writer::to_csv_bytes(&records)
    }
}

/// Convert the first worksheet of an `.xlsx` upload
pub fn convert(bytes: &[u8]) -> ConvertResult<Vec<OutputRecord>> {
    Pipeline::default().convert(bytes)
}

/// Convert the first worksheet of an `.xlsx` upload straight to CSV bytes
pub fn convert_to_csv(bytes: &[u8]) -> ConvertResult<Vec<u8>> {
    Pipeline::default().convert_to_csv(bytes)
}
