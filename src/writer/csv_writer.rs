//! CSV writer for converted debtor records

use crate::error::ConvertResult;
use crate::types::{OutputRecord, OUTPUT_HEADERS};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the header row and one line per record.
///
/// Fields are quoted only when they contain a delimiter, quote or newline.
pub fn write_csv<W: Write>(writer: W, records: &[OutputRecord]) -> ConvertResult<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(OUTPUT_HEADERS)?;
    for record in records {
        csv.write_record(record.fields())?;
    }
    csv.flush()?;

    Ok(())
}

/// Render records to an in-memory UTF-8 CSV document
pub fn to_csv_bytes(records: &[OutputRecord]) -> ConvertResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(buffer)
}

/// Write records to a CSV file, replacing it if present
pub fn write_csv_file(path: &Path, records: &[OutputRecord]) -> ConvertResult<()> {
    let file = File::create(path)?;
    write_csv(file, records)
}
