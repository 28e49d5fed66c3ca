//! Error types for kacl

use thiserror::Error;

/// Result type alias using KaclError
pub type Result<T> = std::result::Result<T, KaclError>;

/// Main error type for kacl operations
#[derive(Debug, Error)]
pub enum KaclError {
    /// The builder met an element tag outside the supported vocabulary
    #[error("unknown element tag: {0}")]
    UnknownTag(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
