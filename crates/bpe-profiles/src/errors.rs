//! # Error Types

/// Errors from bpe-profiles operations.
#[derive(Debug, thiserror::Error)]
pub enum BpeProfilesError {
    /// The name is not one of the canonical encoding profiles.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The model identifier matches neither the exact nor the prefix tables.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// The vocabulary is empty, inconsistent, or its locator is not recognized.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Network fetch or download failure.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Parse error (base64, integer, binary snapshot, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for bpe-profiles operations.
pub type BPResult<T> = core::result::Result<T, BpeProfilesError>;
