//! Error types for the typesift library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for typesift operations.
#[derive(Debug, Error)]
pub enum TypesiftError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column was submitted with no values at all.
    #[error("Empty column '{0}': classification requires at least one cell")]
    EmptyColumn(String),

    /// A data row does not match the expected column count.
    #[error("Ragged row {row}: expected {expected} cells, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for typesift operations.
pub type Result<T> = std::result::Result<T, TypesiftError>;
