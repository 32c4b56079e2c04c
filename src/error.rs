//! Error types for tacozip

use std::io;

/// Result type for tacozip operations
pub type Result<T> = std::result::Result<T, TacoZipError>;

/// Error types that can occur during archive creation, ghost read, or ghost update.
#[derive(Debug)]
pub enum TacoZipError {
    /// Invalid argument: null/empty input, name too long, array size mismatch.
    Parameter(String),
    /// I/O error opening, reading, writing, seeking, flushing, or closing a file.
    Io(io::Error),
    /// The first bytes of the archive do not parse as a valid ghost record.
    InvalidGhost(String),
    /// Reserved for implementations that delegate to an external archive
    /// library. Never constructed by this crate's native serializer.
    Library(String),
}

impl std::fmt::Display for TacoZipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TacoZipError::Parameter(msg) => write!(f, "invalid parameter: {}", msg),
            TacoZipError::Io(e) => write!(f, "I/O error: {}", e),
            TacoZipError::InvalidGhost(msg) => write!(f, "invalid ghost record: {}", msg),
            TacoZipError::Library(msg) => write!(f, "backend library error: {}", msg),
        }
    }
}

impl std::error::Error for TacoZipError {}

impl From<io::Error> for TacoZipError {
    fn from(err: io::Error) -> Self {
        TacoZipError::Io(err)
    }
}
