//! Error types for segmentation

use std::io;
use thiserror::Error;

/// Segmentation errors
///
/// Every error is terminal for the sequence that produced it: the partially
/// accumulated segment is discarded and the sequence yields nothing further.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// The very first read from the source failed
    ///
    /// Readability is checked lazily, so an unreadable source surfaces here
    /// rather than at construction.
    #[error("source is not readable")]
    InvalidSource(#[source] io::Error),

    /// The cancellation token was observed at a suspension point
    #[error("segmentation cancelled")]
    Cancelled,

    /// I/O error from the underlying source, passed through unchanged
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl SegmentError {
    /// Whether the sequence ended because of cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SegmentError::Cancelled)
    }

    /// The underlying I/O error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            SegmentError::InvalidSource(err) | SegmentError::Io(err) => Some(err),
            SegmentError::Cancelled | SegmentError::Config(_) => None,
        }
    }
}

impl From<toml::de::Error> for SegmentError {
    fn from(err: toml::de::Error) -> Self {
        SegmentError::Config(err.to_string())
    }
}

/// Result type for segmentation
pub type Result<T> = std::result::Result<T, SegmentError>;
