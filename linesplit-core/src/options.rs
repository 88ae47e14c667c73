//! Scan options shared by all drivers

use crate::{CR, LF};

const STRAY_CR: &str = "\r";

/// Decision parameters for the scanner
///
/// These are fixed for the lifetime of a [`Scanner`](crate::Scanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Character marking a segment boundary
    pub separator: char,
    /// Drop zero-length segments (and segments holding a single stray CR)
    pub suppress_blanks: bool,
    /// Treat carriage return as a boundary
    pub crlf_fold: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            separator: LF,
            suppress_blanks: true,
            crlf_fold: false,
        }
    }
}

impl ScanOptions {
    /// Options splitting on `separator` with the remaining defaults
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            ..Self::default()
        }
    }

    /// Whether `ch` closes the current segment
    #[inline]
    pub fn is_boundary(&self, ch: char) -> bool {
        ch == self.separator || (self.crlf_fold && ch == CR)
    }

    /// Whether a segment with this content should be dropped
    ///
    /// A lone carriage return counts as blank regardless of `crlf_fold`; it is
    /// what a blank DOS line looks like when only the line feed splits.
    #[inline]
    pub fn is_blank(&self, segment: &str) -> bool {
        self.suppress_blanks && (segment.is_empty() || segment == STRAY_CR)
    }
}
