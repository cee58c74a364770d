use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unrecognized event export header: {found}")]
    HeaderMismatch { found: String },

    #[error("Row {row} could not be tokenized into the expected column layout: {message}")]
    RowStructure { row: usize, message: String },

    #[error("Championship standings could not be decoded: {0}")]
    ChampionshipDecode(String),

    #[error("Workbook contains no usable sheet: {0}")]
    NoUsableSheet(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xls(#[from] calamine::XlsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
