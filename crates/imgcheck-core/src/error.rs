//! Error types for imgcheck-core

/// Result type for imgcheck-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in imgcheck-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from imgcheck-fs
    #[error(transparent)]
    Fs(#[from] imgcheck_fs::Error),

    /// Standard I/O error, typically from writing the report
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Checklist data is structurally invalid
    #[error("Invalid checklist: {message}")]
    InvalidChecklist { message: String },
}
