//! Error types for imgcheck-cli

use imgcheck_core::report::{EXIT_FAILURE, EXIT_USAGE};

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a CLI run before a complete report is produced
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from imgcheck-core
    #[error(transparent)]
    Core(#[from] imgcheck_core::Error),

    /// Standard I/O error, typically writing the report
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// An unusable checklist is a usage error; failing to write the report
    /// is a plain failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Core(imgcheck_core::Error::Io(_)) => EXIT_FAILURE,
            Self::Core(_) => EXIT_USAGE,
        }
    }
}
