//! Streaming delimiter-based text segmentation
//!
//! `linesplit` turns a byte stream into a lazy sequence of text segments
//! separated by a single configurable character. It never loads the whole
//! stream into memory, and it offers two ways to consume the same sequence:
//!
//! - **Pull iteration**: [`Segmenter`] implements [`Iterator`] and blocks the
//!   calling thread while the source has no data ready.
//! - **Suspending iteration**: [`Segmenter::next_segment`] and
//!   [`Segmenter::into_stream`] suspend the calling task instead, and can be
//!   aborted through a [`CancellationToken`](tokio_util::sync::CancellationToken).
//!
//! Both share one boundary-decision core ([`linesplit_core::Scanner`]), so
//! they produce identical segments for identical input and configuration.
//!
//! # Example
//!
//! ```rust
//! use linesplit::{Segmenter, SegmenterConfig};
//!
//! let config = SegmenterConfig::builder()
//!     .separator('\0')
//!     .build()
//!     .unwrap();
//!
//! let segments: Vec<String> = Segmenter::with_config("a b\0c\0\0".as_bytes(), config)
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(segments, ["a b", "c"]);
//! ```
//!
//! # Configuration
//!
//! | option | default | effect |
//! |---|---|---|
//! | `separator` | `'\n'` | character marking a segment boundary |
//! | `suppress_blanks` | `true` | drop empty segments (and a lone stray `'\r'`) |
//! | `buffered` | `true` | wrap the source in a buffering layer |
//! | `crlf_fold` | `false` | treat `'\r'` as a boundary as well |
//! | `buffer_capacity` | `8192` | size of the buffering layer in bytes |
//! | `encoding` | `"utf-8"` | WHATWG label of the source encoding |

#![warn(missing_docs)]

pub mod config;
mod decode;
pub mod error;
pub mod segmenter;
pub mod source;
pub mod suspend;

pub use config::{SegmenterConfig, SegmenterConfigBuilder};
pub use error::{Result, SegmentError};
pub use linesplit_core::{ScanOptions, Step};
pub use segmenter::Segmenter;
pub use source::{AsyncCharSource, AsyncTextReader, CharSource, TextReader};

use std::io::Read;

/// Split in-memory text
///
/// The configured encoding is ignored; `text` is already UTF-8.
///
/// ```rust
/// use linesplit::{split_str, SegmenterConfig};
///
/// let segments = split_str("foo\r\n\r\nbar", &SegmenterConfig::dos_lines()).unwrap();
/// assert_eq!(segments, ["foo", "bar"]);
/// ```
pub fn split_str(text: &str, config: &SegmenterConfig) -> Result<Vec<String>> {
    let config = SegmenterConfig {
        encoding: encoding_rs::UTF_8,
        ..config.clone()
    };
    split_reader(text.as_bytes(), config)
}

/// Split a whole reader and collect every segment
pub fn split_reader<R: Read>(reader: R, config: SegmenterConfig) -> Result<Vec<String>> {
    Segmenter::with_config(reader, config)?.collect()
}
