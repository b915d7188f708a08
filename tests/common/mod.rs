//! Shared fixtures: receivables listings built in memory with rust_xlsxwriter

#![allow(dead_code)]

use ar_reformat::excel::extractor::EXPECTED_HEADERS;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};

/// One cell of a fixture row (columns B:G)
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Date(u16, u8, u8),
    Text(&'static str),
    Number(f64),
    Blank,
}

/// One worksheet of a fixture workbook
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Standard listing layout with the given data rows
    pub fn listing(name: &'static str, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name,
            headers: EXPECTED_HEADERS.to_vec(),
            rows,
        }
    }
}

/// The two invoices and total row used throughout the docs
pub fn sample_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![
            Cell::Date(2024, 1, 5),
            Cell::Text("00048071"),
            Cell::Text("Acme Co"),
            Cell::Number(100.0),
            Cell::Number(174.95),
            Cell::Text("*None"),
        ],
        vec![
            Cell::Date(2024, 1, 6),
            Cell::Text("INV-9"),
            Cell::Text("Beta LLC"),
            Cell::Number(-5.0),
            Cell::Number(-5.0),
            Cell::Text("C99"),
        ],
        totals_row(169.95),
    ]
}

pub fn totals_row(amount_due: f64) -> Vec<Cell> {
    vec![
        Cell::Blank,
        Cell::Blank,
        Cell::Blank,
        Cell::Blank,
        Cell::Number(amount_due),
        Cell::Blank,
    ]
}

/// Build a workbook: title block on rows 1-9, headers on row 10 from column B
pub fn build_workbook(sheets: &[Sheet]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();
        worksheet.write_string(0, 1, "Aged Receivables Report").unwrap();
        worksheet.write_string(2, 1, "As at 31/01/2024").unwrap();

        for (offset, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string(9, 1 + offset as u16, *header).unwrap();
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let row_num = 10 + r as u32;
            for (c, cell) in row.iter().enumerate() {
                let col = 1 + c as u16;
                match *cell {
                    Cell::Date(y, m, d) => {
                        let date = ExcelDateTime::from_ymd(y, m, d).unwrap();
                        worksheet
                            .write_datetime_with_format(row_num, col, &date, &date_format)
                            .unwrap();
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(row_num, col, s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_num, col, n).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Single-sheet listing in the standard layout
pub fn listing_workbook(rows: Vec<Vec<Cell>>) -> Vec<u8> {
    build_workbook(&[Sheet::listing("Sheet1", rows)])
}

/// Write fixture bytes to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
