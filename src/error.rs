use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input is not a readable workbook or its layout is not the expected one
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Template error: {0}")]
    Template(String),
}

impl ConvertError {
    /// Shorthand for a layout or decoding failure
    pub fn parse(message: impl Into<String>) -> Self {
        ConvertError::Parse(message.into())
    }

    /// True when the failure came from reading the spreadsheet
    pub fn is_parse(&self) -> bool {
        matches!(self, ConvertError::Parse(_))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ConvertError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ConvertError::Template(err.to_string())
    }
}
