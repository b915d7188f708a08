//! Output writers

mod csv_writer;

pub use csv_writer::{to_csv_bytes, write_csv, write_csv_file};
