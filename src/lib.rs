//! AR Reformat - receivables listing to debtor import CSV
//!
//! Reads a fixed-layout accounts-receivable export (title block on rows 1-9,
//! header on row 10, data in columns B:G, total on the last row) and derives
//! the five-column CSV expected by the debtor import.
//!
//! # Example
//!
//! ```no_run
//! use ar_reformat::pipeline;
//!
//! let bytes = std::fs::read("aged_receivables.xlsx")?;
//! let csv = pipeline::convert_to_csv(&bytes)?;
//! std::fs::write("converted_data.csv", csv)?;
//! # Ok::<(), ar_reformat::error::ConvertError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod pipeline;
pub mod transform;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use pipeline::{convert, convert_to_csv, Conversion, Pipeline};
pub use types::{CellValue, OutputRecord, RawRecord, TransactionType};
