//! Error types for the dirlist-core library.
//!
//! Parsing itself never fails: missing fields resolve to the sentinel and an
//! input without entity anchors yields an empty record list. Errors only come
//! from building a parser out of configuration and from reading page text.

use thiserror::Error;

/// Main error type for the dirlist library.
#[derive(Error, Debug)]
pub enum DirlistError {
    /// Page text input error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// A segmentation or cleaning pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading page text handed over by the text extraction step.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input bytes are not valid UTF-8.
    #[error("page text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The input contained no text at all.
    #[error("page text is empty")]
    Empty,
}

/// Result type for the dirlist library.
pub type Result<T> = std::result::Result<T, DirlistError>;
