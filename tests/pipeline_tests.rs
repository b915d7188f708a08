//! End-to-end conversion tests: workbook bytes → records → CSV

mod common;

use ar_reformat::excel::{ExtractOptions, SheetSelector, TableExtractor};
use ar_reformat::pipeline::{self, Pipeline};
use ar_reformat::types::TransactionType;
use ar_reformat::ConvertError;
use common::{build_workbook, listing_workbook, sample_rows, totals_row, Cell, Sheet};
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// END-TO-END
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sample_listing_to_csv() {
    let bytes = listing_workbook(sample_rows());
    let csv = pipeline::convert_to_csv(&bytes).unwrap();

    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "Debtor Reference,Transaction Type,Document Number,Document Date,Document Balance\n\
         Acme Co,INV,48071,2024-01-05,174.95\n\
         C99,CRD,INV-9,2024-01-06,-5.00\n"
    );
}

#[test]
fn test_sample_listing_records() {
    let bytes = listing_workbook(sample_rows());
    let records = pipeline::convert(&bytes).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].debtor_reference, "Acme Co");
    assert_eq!(records[0].transaction_type, TransactionType::Invoice);
    assert_eq!(records[1].debtor_reference, "C99");
    assert_eq!(records[1].transaction_type, TransactionType::Credit);
}

#[test]
fn test_convert_is_idempotent() {
    let bytes = listing_workbook(sample_rows());
    assert_eq!(
        pipeline::convert_to_csv(&bytes).unwrap(),
        pipeline::convert_to_csv(&bytes).unwrap()
    );
}

#[test]
fn test_output_count_is_data_rows_minus_totals() {
    let mut rows = Vec::new();
    for i in 0..25 {
        rows.push(vec![
            Cell::Date(2024, 2, 1 + (i % 28) as u8),
            Cell::Number(1000.0 + i as f64),
            Cell::Text("Gamma Pty"),
            Cell::Number(10.0),
            Cell::Number(10.0),
            Cell::Text("G1"),
        ]);
    }
    rows.push(totals_row(250.0));

    let conversion = Pipeline::default().run(&listing_workbook(rows)).unwrap();
    assert_eq!(conversion.rows_read, 26);
    assert_eq!(conversion.rows_dropped, 1);
    assert_eq!(conversion.records.len(), 25);
    assert_eq!(conversion.records[3].document_number, "1003");
}

#[test]
fn test_source_order_preserved() {
    let rows = vec![
        vec![
            Cell::Date(2024, 3, 9),
            Cell::Text("3"),
            Cell::Text("Zeta"),
            Cell::Blank,
            Cell::Number(3.0),
            Cell::Text("Z"),
        ],
        vec![
            Cell::Date(2024, 3, 1),
            Cell::Text("1"),
            Cell::Text("Alpha"),
            Cell::Blank,
            Cell::Number(1.0),
            Cell::Text("A"),
        ],
        totals_row(4.0),
    ];
    let records = pipeline::convert(&listing_workbook(rows)).unwrap();
    let refs: Vec<&str> = records.iter().map(|r| r.debtor_reference.as_str()).collect();
    assert_eq!(refs, vec!["Z", "A"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// ROW FILTERING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_malformed_middle_row_is_dropped() {
    let mut rows = sample_rows();
    rows.insert(
        1,
        vec![
            Cell::Date(2024, 1, 5),
            Cell::Text("48072"),
            Cell::Text("No Card Pty"),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Blank,
        ],
    );

    let conversion = Pipeline::default().run(&listing_workbook(rows)).unwrap();
    assert_eq!(conversion.rows_read, 4);
    assert_eq!(conversion.rows_dropped, 2);
    assert_eq!(conversion.records.len(), 2);
}

#[test]
fn test_whitespace_only_cell_counts_as_blank() {
    let rows = vec![
        vec![
            Cell::Date(2024, 1, 5),
            Cell::Text("1"),
            Cell::Text("   "),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Text("C1"),
        ],
        totals_row(1.0),
    ];
    let records = pipeline::convert(&listing_workbook(rows)).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_header_only_sheet_yields_header_only_csv() {
    let csv = pipeline::convert_to_csv(&listing_workbook(vec![])).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "Debtor Reference,Transaction Type,Document Number,Document Date,Document Balance\n"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// FIELD RULES THROUGH REAL CELLS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_numeric_invoice_and_text_date_cells() {
    let rows = vec![
        vec![
            Cell::Text("05/01/2024"),
            Cell::Number(48071.0),
            Cell::Text("Acme Co"),
            Cell::Number(0.0),
            Cell::Number(0.0),
            Cell::Text("CUST123"),
        ],
        totals_row(0.0),
    ];
    let records = pipeline::convert(&listing_workbook(rows)).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].document_number, "48071");
    assert_eq!(records[0].document_date, "05/01/2024");
    assert_eq!(records[0].transaction_type, TransactionType::Invoice);
    assert_eq!(records[0].document_balance, "0.00");
}

#[test]
fn test_amount_due_as_text_is_parsed() {
    let rows = vec![vec![
        Cell::Date(2024, 1, 5),
        Cell::Text("7"),
        Cell::Text("Acme Co"),
        Cell::Blank,
        Cell::Text("-12.5"),
        Cell::Text("C7"),
    ]];
    let records = pipeline::convert(&listing_workbook(rows)).unwrap();
    assert_eq!(records[0].document_balance, "-12.50");
    assert_eq!(records[0].transaction_type, TransactionType::Credit);
}

#[test]
fn test_blank_amount_due_on_data_row() {
    let rows = vec![vec![
        Cell::Date(2024, 1, 5),
        Cell::Text("7"),
        Cell::Text("Acme Co"),
        Cell::Blank,
        Cell::Blank,
        Cell::Text("C7"),
    ]];
    let records = pipeline::convert(&listing_workbook(rows)).unwrap();
    assert_eq!(records[0].document_balance, "");
    assert_eq!(records[0].transaction_type, TransactionType::Invoice);
}

#[test]
fn test_non_numeric_amount_due_fails_whole_conversion() {
    let mut rows = sample_rows();
    rows.insert(
        0,
        vec![
            Cell::Date(2024, 1, 4),
            Cell::Text("9"),
            Cell::Text("Acme Co"),
            Cell::Blank,
            Cell::Text("TBC"),
            Cell::Text("C9"),
        ],
    );
    let err = pipeline::convert(&listing_workbook(rows)).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("row 11"));
}

// ═══════════════════════════════════════════════════════════════════════════
// LAYOUT AND PARSE ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_not_a_spreadsheet() {
    let err = pipeline::convert(b"this is not a workbook").unwrap_err();
    assert!(matches!(err, ConvertError::Parse(_)));
    assert!(err.to_string().contains("Failed to open Excel file"));
}

#[test]
fn test_missing_header_column() {
    let sheet = Sheet {
        name: "Sheet1",
        headers: vec!["Date", "Invoice No.", "Customer Name", "Amount", "Amount Due"],
        rows: sample_rows(),
    };
    let err = pipeline::convert(&build_workbook(&[sheet])).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("Card ID"));
}

#[test]
fn test_header_on_wrong_row_is_rejected() {
    // Headers placed in row 1 instead of row 10
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (i, name) in ["Date", "Invoice No.", "Customer Name", "Amount", "Amount Due", "Card ID"]
        .iter()
        .enumerate()
    {
        worksheet.write_string(0, 1 + i as u16, *name).unwrap();
    }
    worksheet.write_string(1, 1, "2024-01-05").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let err = pipeline::convert(&bytes).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_columns_reordered_within_range() {
    let sheet = Sheet {
        name: "Sheet1",
        headers: vec![
            "Card ID",
            "Date",
            "Invoice No.",
            "Customer Name",
            "Amount",
            "Amount Due",
        ],
        rows: vec![
            vec![
                Cell::Text("C1"),
                Cell::Date(2024, 1, 5),
                Cell::Text("0042"),
                Cell::Text("Acme Co"),
                Cell::Number(9.0),
                Cell::Number(9.0),
            ],
            vec![
                Cell::Blank,
                Cell::Blank,
                Cell::Blank,
                Cell::Blank,
                Cell::Blank,
                Cell::Number(9.0),
            ],
        ],
    };
    let records = pipeline::convert(&build_workbook(&[sheet])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].debtor_reference, "C1");
    assert_eq!(records[0].document_number, "42");
    assert_eq!(records[0].document_date, "2024-01-05");
}

// ═══════════════════════════════════════════════════════════════════════════
// SHEET SELECTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_named_sheet_selection() {
    let bytes = build_workbook(&[
        Sheet {
            name: "Notes",
            headers: vec![],
            rows: vec![],
        },
        Sheet::listing("Aged", sample_rows()),
    ]);

    // First sheet has no header row
    assert!(pipeline::convert(&bytes).is_err());

    let pipeline = Pipeline::new(ExtractOptions {
        sheet: SheetSelector::Named("Aged".to_string()),
    });
    assert_eq!(pipeline.convert(&bytes).unwrap().len(), 2);
}

#[test]
fn test_named_sheet_missing() {
    let bytes = listing_workbook(sample_rows());
    let extractor = TableExtractor::new(ExtractOptions {
        sheet: SheetSelector::Named("Missing".to_string()),
    });
    let err = extractor.extract(&bytes).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("Sheet1"));
}

#[test]
fn test_extractor_reports_source_rows() {
    let records = TableExtractor::default()
        .extract(&listing_workbook(sample_rows()))
        .unwrap();
    let rows: Vec<u32> = records.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![11, 12]);
}
