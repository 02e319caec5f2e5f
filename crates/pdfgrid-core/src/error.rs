use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no text found in PDF. Scanned or image-only documents are not supported")]
    NoTextFound,

    #[error("no columns detected in PDF text")]
    NoColumnsDetected,

    #[error("no table rows detected in PDF text")]
    NoRowsDetected,

    #[error("failed to write workbook: {0}")]
    Export(String),

    #[error("a conversion is already in progress")]
    Busy,

    #[error("failed to load options from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    ConfigInvalid(String),

    #[error("{0}")]
    Roster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
