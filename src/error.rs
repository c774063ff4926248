//! Error types for the feature pipeline

use thiserror::Error;

/// Failure to decode a leaf's content with its declared encodings.
///
/// Stored on the leaf itself so a single bad part never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode {content_type} content: {details}")]
pub struct DecodeError {
    /// MIME type of the leaf that failed
    pub content_type: String,

    /// Decoder message
    pub details: String,
}

/// Errors that can occur while building features
#[derive(Error, Debug)]
pub enum Error {
    /// The raw message has no recognizable header/body structure
    #[error("Failed to parse email structure: {0}")]
    Parse(String),

    /// Leaf content could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid pipeline parameter, raised before any processing
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Corpus or store I/O failure
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or unserializable persisted artifact
    #[error("Serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
