//! Error types for dlc-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dlc-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bounded input was outside its allowed range
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A free-entry input below its minimum
    #[error("{name} must be at least {min}, got {value}")]
    BelowMinimum {
        name: &'static str,
        value: i64,
        min: i64,
    },

    /// Mean wind speed range with low above high
    #[error("invalid wind speed range: {low} > {high}")]
    InvertedWindRange { low: u32, high: u32 },

    /// DLC code that is not part of the predefined catalog
    #[error("unknown predefined DLC code '{0}'")]
    UnknownDlc(String),

    /// Unparseable enum text
    #[error(transparent)]
    Parse(#[from] ParseValueError),

    /// CSV writer error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook generation error
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned when parsing a class, flag or format label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
