//! Error types for booktree.
//!
//! Segmentation ambiguities (abbreviation false positives, unusual heading
//! nesting) are resolved by documented tie-break rules and never surface
//! here. Only I/O failures and the final lossless-integrity check are
//! reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the booktree library.
#[derive(Debug, Error)]
pub enum BookError {
    /// Invalid heading level specification.
    #[error("Invalid heading levels: '{0}'. Expected comma-separated digits 1-6 (e.g., 1,2)")]
    InvalidHeadingLevels(String),

    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input file could not be read or decoded as UTF-8.
    #[error("Input file not readable: {}: {detail}", .path.display())]
    InputUnreadable { path: PathBuf, detail: String },

    /// Output path could not be written.
    #[error("Output path not writable: {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reconstructed text diverged from the source beyond whitespace
    /// normalization. Locations are 1-based.
    #[error("Lossless check failed at chapter {chapter}, paragraph {paragraph}: {detail}")]
    LosslessCheckFailed {
        chapter: usize,
        paragraph: usize,
        detail: String,
    },

    /// Internal structural invariant violated (should be unreachable).
    #[error("Malformed output schema: {0}")]
    MalformedSchema(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for booktree operations.
pub type Result<T> = std::result::Result<T, BookError>;
