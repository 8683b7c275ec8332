use thiserror::Error;

/// Main error type for casegraph
#[derive(Error, Debug)]
pub enum CasegraphError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Selected file index is out of range
    #[error("File not found in report: index {0}")]
    FileNotFound(usize),

    /// Selected case index is out of range for the selected file
    #[error("Case not found: file {file}, case {case}")]
    CaseNotFound { file: usize, case: usize },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using CasegraphError
pub type Result<T> = std::result::Result<T, CasegraphError>;
