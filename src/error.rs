//! Error types for trial-report
//!
//! Missing data (no trials for a family or slice) is never an error: the
//! selector reports 0.0 and the history extractor an empty sequence. Only
//! unreadable input and invalid configuration surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// trial-report error types
#[derive(Error, Debug)]
pub enum Error {
    /// A matched trial file could not be deserialized (fatal, no partial recovery)
    #[error("Corrupt trial file {path}: {message}\nRe-export the search log or remove the file from the directory.")]
    CorruptTrialFile {
        /// File that failed to deserialize
        path: PathBuf,
        /// Underlying decoder message
        message: String,
    },

    /// Report configuration is unusable
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Interaction dataset could not be read
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// Figure rendering failed
    #[error("Render error: {0}")]
    RenderError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
