use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Scratch storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create scratch directory {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write scratch file {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read scratch file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid scratch file name: {0}")]
    InvalidName(String),
}

/// Result type for scratch storage operations
pub type StorageResult<T> = Result<T, StorageError>;
