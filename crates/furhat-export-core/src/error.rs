use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Error parsing JSON file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("The JSON file in {path} appears to be empty or insufficient ({records} records)")]
    InsufficientData { path: PathBuf, records: usize },

    #[error("Font {path} could not be loaded: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] printpdf::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
