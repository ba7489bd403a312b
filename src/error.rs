//! Error types for PICCULL.

use thiserror::Error;

/// Common error type for PICCULL.
#[derive(Error, Debug)]
pub enum PiccullError {
    /// Path traversal attempt or access outside the photo root.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Missing file or folder.
    #[error("{0} not found")]
    NotFound(String),

    /// Path exists but is not a directory.
    #[error("not a folder: {0}")]
    InvalidFolder(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable image data.
    ///
    /// Decode failures during metadata resolution are swallowed internally
    /// and degrade to zero values; this variant surfaces only where a
    /// decoded image is mandatory (thumbnail generation).
    #[error("decode error: {0}")]
    Decode(String),

    /// Thumbnail encoding or cache-write failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Validation error for configuration or user input.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for PICCULL operations.
pub type Result<T> = std::result::Result<T, PiccullError>;
