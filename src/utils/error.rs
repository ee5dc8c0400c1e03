// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the library

/// Terminal failures of a single extraction call. None of these are retried:
/// the source document is static, so retrying cannot change the outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("personal data redacted: {0}")]
    RedactedData(String),

    #[error("wrong tax year: expected base year {expected}, found {found}")]
    WrongTaxYear { expected: i32, found: i32 },
}

/// Failures of the external word-position collaborator (the component that
/// opens the PDF and yields `{text, x, y}` words per page).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading source document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode page {page}: {reason}")]
    Decode { page: u32, reason: String },

    #[error("source document has no page {0}")]
    MissingPage(u32),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("word source failed: {0}")]
    Source(#[from] SourceError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("serialization error: {0}")]
    Serialization(String),
}
