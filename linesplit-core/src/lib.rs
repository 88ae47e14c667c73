//! Boundary-decision core for streaming delimiter-based segmentation
//!
//! This crate holds the state machine shared by every consumption mode of
//! `linesplit`. It never performs I/O: drivers read one character unit at a
//! time from wherever they like and hand it to [`Scanner::step`], which
//! decides whether the unit extends the current segment, closes it, or ends
//! the sequence.
//!
//! # Example
//!
//! ```rust
//! use linesplit_core::{ScanOptions, Scanner, Step};
//!
//! let mut scanner = Scanner::new(ScanOptions::default());
//! let mut segments = Vec::new();
//!
//! for unit in "foo\n\nbar".chars().map(Some).chain([None]) {
//!     match scanner.step(unit) {
//!         Step::Segment(segment) | Step::Finished(Some(segment)) => segments.push(segment),
//!         _ => {}
//!     }
//! }
//!
//! assert_eq!(segments, ["foo", "bar"]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod options;
pub mod scanner;

pub use options::ScanOptions;
pub use scanner::{Scanner, Step};

/// Line feed, the default separator
pub const LF: char = '\n';

/// Carriage return, folded into a boundary when CRLF folding is enabled
pub const CR: char = '\r';
