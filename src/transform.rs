//! Field transformer - raw receivable record → debtor import record
//!
//! Every output field is derived independently; none of the rules can fail
//! on a record that passed extraction.

use crate::types::{CellValue, OutputRecord, RawRecord, TransactionType};

/// Card ID value meaning "no card on file"
pub const NO_CARD_SENTINEL: &str = "*None";

/// Convert one extracted row
pub fn transform(record: &RawRecord) -> OutputRecord {
    OutputRecord {
        debtor_reference: debtor_reference(
            record.card_id.as_ref(),
            record.customer_name.as_ref(),
        ),
        transaction_type: transaction_type(record.amount_due),
        document_number: document_number(record.invoice_number.as_ref()),
        document_date: document_date(record.date.as_ref()),
        document_balance: document_balance(record.amount_due),
    }
}

/// Card ID, or the customer name when the card is the `*None` sentinel
pub fn debtor_reference(card_id: Option<&CellValue>, customer_name: Option<&CellValue>) -> String {
    let card = text_or_empty(card_id);
    if card.trim() == NO_CARD_SENTINEL {
        text_or_empty(customer_name)
    } else {
        card
    }
}

/// Negative balances are credit notes; zero and blank count as invoices
pub fn transaction_type(amount_due: Option<f64>) -> TransactionType {
    match amount_due {
        Some(amount) if amount < 0.0 => TransactionType::Credit,
        _ => TransactionType::Invoice,
    }
}

/// Invoice number with leading zeros removed when it is purely digits
pub fn document_number(invoice_number: Option<&CellValue>) -> String {
    let text = text_or_empty(invoice_number);
    let trimmed = text.trim();

    if is_all_digits(trimmed) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        trimmed.to_string()
    }
}

/// ISO date for true dates, the cell text otherwise
pub fn document_date(date: Option<&CellValue>) -> String {
    match date {
        Some(CellValue::Date(d)) => d.format("%Y-%m-%d").to_string(),
        other => text_or_empty(other),
    }
}

/// Two-decimal balance, sign kept
pub fn document_balance(amount_due: Option<f64>) -> String {
    amount_due
        .map(|amount| format!("{:.2}", amount))
        .unwrap_or_default()
}

/// At least one character and every character an ASCII digit.
///
/// Signs and decimal points fail this check on purpose: `-5` and `123.0`
/// are passed through as written.
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn text_or_empty(value: Option<&CellValue>) -> String {
    value.map(CellValue::as_text).unwrap_or_default()
}
