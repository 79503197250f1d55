use thiserror::Error;

/// Errors that can occur during CSV parsing, image generation, or image parsing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("hex decoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("value for {field} is {len} bytes, max {max}")]
    ValueTooLong {
        field: String,
        len: usize,
        max: usize,
    },

    #[error("field {0} is set more than once")]
    DuplicateField(String),

    #[error("record error: {0}")]
    Record(#[from] nv_traceability::error::Error),
}
